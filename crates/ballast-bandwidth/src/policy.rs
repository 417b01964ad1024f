// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! The score-threshold affinity policy.
//!
//! The distance score doubles as the pair's price; the thresholds decide how
//! much capacity the pair may move. Checked in order:
//!
//! 1. node filter says no -> excluded,
//! 2. `local_only` node on a non-local pair -> excluded,
//! 3. `score < ras` -> near access, unlimited,
//! 4. `score < rjs` -> remote access, capped at `ral` of the node's capacity,
//! 5. otherwise -> rejected.

use crate::{
    doc::{NodeRecord, ViewRecord},
    options::ViewOptions,
};
use ballast_geo::location::{DistScorer, Location};
use ballast_model::{
    affinity::{Affinity, AffinityTable, BuyLimit},
    entity::{Buyer, Supplier},
    index::{BuyerIndex, SupplierIndex},
};

/// An affinity table over node/view documents, aligned with the supplier and
/// buyer slices of a match.
///
/// Locations must already be unified; the table scores each pair with the
/// view as the client and the node as the server.
pub struct ScoreAffinityTable<'a, S> {
    options: &'a ViewOptions,
    scorer: &'a S,
    nodes: &'a [NodeRecord],
    node_locations: &'a [Location],
    views: &'a [ViewRecord],
    view_locations: &'a [Location],
}

impl<'a, S> ScoreAffinityTable<'a, S>
where
    S: DistScorer,
{
    /// Builds the table.
    ///
    /// # Panics
    ///
    /// Panics if the record and location slices are not the same length per
    /// side.
    pub fn new(
        options: &'a ViewOptions,
        scorer: &'a S,
        nodes: &'a [NodeRecord],
        node_locations: &'a [Location],
        views: &'a [ViewRecord],
        view_locations: &'a [Location],
    ) -> Self {
        assert_eq!(
            nodes.len(),
            node_locations.len(),
            "called ScoreAffinityTable::new with {} nodes but {} node locations",
            nodes.len(),
            node_locations.len()
        );
        assert_eq!(
            views.len(),
            view_locations.len(),
            "called ScoreAffinityTable::new with {} views but {} view locations",
            views.len(),
            view_locations.len()
        );

        Self {
            options,
            scorer,
            nodes,
            node_locations,
            views,
            view_locations,
        }
    }
}

impl<S> AffinityTable<i64> for ScoreAffinityTable<'_, S>
where
    S: DistScorer,
{
    fn affinity(
        &self,
        supplier_index: SupplierIndex,
        _supplier: &Supplier<i64>,
        buyer_index: BuyerIndex,
        _buyer: &Buyer<i64>,
    ) -> Affinity<i64> {
        let node = &self.nodes[supplier_index.get()];
        let view = &self.views[buyer_index.get()];

        let scored = self.scorer.dist_score(
            &self.view_locations[buyer_index.get()],
            &self.node_locations[supplier_index.get()],
        );

        if let Some(filter) = &self.options.node_filter {
            if !filter(node, view) {
                return Affinity::limited(scored.score, BuyLimit::PercentOfCap(0.0));
            }
        }

        if node.local_only && !scored.local {
            return Affinity::limited(scored.score, BuyLimit::PercentOfCap(0.0));
        }

        if scored.score < self.options.remote_access_score {
            return Affinity::unlimited(scored.score);
        }

        if scored.score < self.options.reject_score {
            return Affinity::limited(
                scored.score,
                BuyLimit::PercentOfCap(self.options.remote_access_limit),
            );
        }

        Affinity::limited(scored.score, BuyLimit::PercentOfCap(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballast_geo::{
        china::{ChinaScorer, ChinaUnifier},
        location::LocationUnifier,
    };

    fn node(id: &str, isp: &str, province: &str) -> NodeRecord {
        NodeRecord {
            node: id.to_owned(),
            isp: isp.to_owned(),
            province: province.to_owned(),
            bw: 1.0,
            priority: 1.0,
            local_only: false,
        }
    }

    fn view(id: &str, isp: &str, province: &str) -> ViewRecord {
        ViewRecord {
            view: id.to_owned(),
            isp: Some(isp.to_owned()),
            province: Some(province.to_owned()),
            bw: Some(1.0),
            percent: None,
        }
    }

    struct Fixture {
        options: ViewOptions,
        scorer: ChinaScorer,
        nodes: Vec<NodeRecord>,
        node_locations: Vec<Location>,
        views: Vec<ViewRecord>,
        view_locations: Vec<Location>,
    }

    impl Fixture {
        fn new(options: ViewOptions, nodes: Vec<NodeRecord>, views: Vec<ViewRecord>) -> Self {
            let unifier = ChinaUnifier::new();
            let node_locations = nodes
                .iter()
                .map(|n| unifier.unify(&Location::new(n.isp.clone(), n.province.clone()), true))
                .collect();
            let view_locations = views
                .iter()
                .map(|v| unifier.unify(&v.location().unwrap(), false))
                .collect();
            Self {
                options,
                scorer: ChinaScorer::new(),
                nodes,
                node_locations,
                views,
                view_locations,
            }
        }

        fn affinity(&self) -> Affinity<i64> {
            let table = ScoreAffinityTable::new(
                &self.options,
                &self.scorer,
                &self.nodes,
                &self.node_locations,
                &self.views,
                &self.view_locations,
            );
            let supplier = Supplier::new(self.nodes[0].node.clone(), 10i64, 1);
            let buyer = Buyer::new(self.views[0].view.clone(), 10i64);
            table.affinity(SupplierIndex::new(0), &supplier, BuyerIndex::new(0), &buyer)
        }
    }

    #[test]
    fn test_near_pair_is_unlimited() {
        let fixture = Fixture::new(
            ViewOptions::default(),
            vec![node("n1", "电信", "北京")],
            vec![view("v1", "电信", "北京")],
        );

        let affinity = fixture.affinity();
        assert_eq!(affinity.price, 10.0);
        assert!(affinity.limit.is_unlimited());
    }

    #[test]
    fn test_remote_pair_is_capped() {
        let options = ViewOptions {
            remote_access_score: 20.0,
            reject_score: 80.0,
            remote_access_limit: 0.5,
            ..ViewOptions::default()
        };
        let fixture = Fixture::new(
            options,
            vec![node("n1", "电信", "新疆")],
            vec![view("v1", "电信", "北京")],
        );

        let affinity = fixture.affinity();
        assert_eq!(affinity.limit, BuyLimit::PercentOfCap(0.5));
        assert_eq!(affinity.limit.calculate(100, 1000), 50);
    }

    #[test]
    fn test_rejected_pair_has_zero_cap() {
        let options = ViewOptions {
            remote_access_score: 20.0,
            reject_score: 30.0,
            ..ViewOptions::default()
        };
        let fixture = Fixture::new(
            options,
            vec![node("n1", "联通", "新疆")],
            vec![view("v1", "电信", "西藏")],
        );

        let affinity = fixture.affinity();
        assert_eq!(affinity.price, 80.0);
        assert_eq!(affinity.limit.calculate(100, 1000), 0);
    }

    #[test]
    fn test_local_only_node_rejects_non_local_view() {
        let mut n = node("n1", "电信", "北京");
        n.local_only = true;
        let fixture = Fixture::new(
            ViewOptions::default(),
            vec![n],
            vec![view("v1", "联通", "上海")],
        );

        let affinity = fixture.affinity();
        assert_eq!(affinity.limit.calculate(100, 1000), 0);
    }

    #[test]
    fn test_local_only_node_accepts_local_view() {
        let mut n = node("n1", "telecom", "beijing");
        n.local_only = true;
        let fixture = Fixture::new(
            ViewOptions::default(),
            vec![n],
            vec![view("v1", "电信", "北京")],
        );

        let affinity = fixture.affinity();
        assert!(affinity.limit.is_unlimited());
    }

    #[test]
    fn test_node_filter_excludes_pair() {
        let options = ViewOptions {
            node_filter: Some(Box::new(|n: &NodeRecord, _: &ViewRecord| n.node != "n1")),
            ..ViewOptions::default()
        };
        let fixture = Fixture::new(
            options,
            vec![node("n1", "电信", "北京")],
            vec![view("v1", "电信", "北京")],
        );

        let affinity = fixture.affinity();
        assert_eq!(affinity.limit.calculate(100, 1000), 0);
    }
}
