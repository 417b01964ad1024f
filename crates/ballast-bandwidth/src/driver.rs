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

//! The end-to-end bandwidth matching driver.
//!
//! Orchestrates a run: node/view documents are normalized and converted to
//! integer tokens (capacities floored, demands ceiled), demand is optionally
//! balanced per ISP and merged per location, the greedy matcher runs over
//! the score-derived affinities, and the allocation is expanded back into
//! the output document plus a summary.

use crate::{
    doc::{AllocDoc, AllocGroup, AllocView, NodeRecord, ViewRecord},
    error::BandwidthError,
    merge::merge_by_location,
    options::ViewOptions,
    policy::ScoreAffinityTable,
    scale::auto_scale,
    units::BwUnit,
};
use ballast_geo::location::{DistScorer, Location, LocationUnifier};
use ballast_match::{config::MatcherConfig, greedy::GreedyMatcher};
use ballast_model::{
    entity::{Buyer, Supplier},
    index::{BuyerIndex, SupplierIndex},
};
use std::collections::HashMap;

/// Aggregate figures of a run, in Gbps.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub nodes: usize,
    pub views: usize,
    /// Total sellable capacity.
    pub nodes_bw: f64,
    /// Total (scaled) demand.
    pub views_bw: f64,
    /// Demand left unsatisfied.
    pub bw_needs: f64,
    /// Capacity left unallocated.
    pub bw_remains: f64,
    /// Per-ISP demand scales; empty unless auto-scaling ran.
    pub scales: HashMap<String, f64>,
}

/// One view whose demand was not fully satisfied, in output units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shortfall {
    pub view: String,
    pub demand: i64,
    pub rest: i64,
}

/// One node with unallocated capacity, in output units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leftover {
    pub node: String,
    pub isp: String,
    pub province: String,
    pub cap: i64,
    pub rest: i64,
}

/// Everything a run produces.
#[derive(Clone, Debug, PartialEq)]
pub struct BandwidthOutcome {
    pub allocs: AllocDoc,
    pub summary: Summary,
    pub perfect: bool,
    /// Unsatisfied views, largest shortfall first.
    pub shortfalls: Vec<Shortfall>,
    /// Nodes with spare capacity, largest leftover first.
    pub leftovers: Vec<Leftover>,
}

/// Converts a three-decimal float priority to the integer weight the matcher
/// consumes. The weight is always at least one.
pub(crate) fn priority_weight(priority: f64) -> i64 {
    (((priority * 1000.0).floor() as i64) + 1).max(1)
}

struct SupplySide {
    suppliers: Vec<Supplier<i64>>,
    records: Vec<NodeRecord>,
    locations: Vec<Location>,
    tokens: i64,
}

struct DemandSide {
    buyers: Vec<Buyer<i64>>,
    records: Vec<ViewRecord>,
    locations: Vec<Location>,
    /// Per buyer, the constituent `(view name, demand tokens)` pairs the
    /// allocation is expanded back to. A single pair unless views were
    /// merged.
    constituents: Vec<Vec<(String, i64)>>,
}

/// The deterministic driver over the core matcher.
pub struct BandwidthMatcher<U, S> {
    auto_scale: bool,
    auto_scale_min: Option<f64>,
    auto_scale_max: Option<f64>,
    auto_merge_view: bool,
    unit: BwUnit,
    options: ViewOptions,
    unifier: U,
    scorer: S,
}

impl<U, S> BandwidthMatcher<U, S>
where
    U: LocationUnifier,
    S: DistScorer,
{
    /// Creates a driver with default options around the given unifier and
    /// scorer.
    pub fn new(unifier: U, scorer: S) -> Self {
        Self {
            auto_scale: false,
            auto_scale_min: None,
            auto_scale_max: None,
            auto_merge_view: false,
            unit: BwUnit::default(),
            options: ViewOptions::default(),
            unifier,
            scorer,
        }
    }

    /// Replaces the view options; out-of-range knobs with safe defaults are
    /// repaired immediately.
    pub fn with_options(mut self, mut options: ViewOptions) -> Self {
        options.fix();
        self.options = options;
        self
    }

    /// Enables per-ISP demand scaling.
    pub fn with_auto_scale(mut self, enabled: bool) -> Self {
        self.auto_scale = enabled;
        self
    }

    /// Bounds the per-ISP demand scale.
    pub fn with_auto_scale_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.auto_scale_min = min;
        self.auto_scale_max = max;
        self
    }

    /// Enables same-location view merging.
    pub fn with_auto_merge_view(mut self, enabled: bool) -> Self {
        self.auto_merge_view = enabled;
        self
    }

    /// Sets the bandwidth token size.
    pub fn with_unit(mut self, unit: BwUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Runs a full match.
    ///
    /// `total_bw` (Gbps) is the reference total for percent-shaped views;
    /// it is only required when such views are present.
    pub fn match_bandwidth(
        &self,
        nodes: &[NodeRecord],
        views: &[ViewRecord],
        total_bw: Option<f64>,
    ) -> Result<BandwidthOutcome, BandwidthError> {
        let supply = self.build_supply(nodes);
        let resolved = self.resolve_views(views, total_bw)?;

        let scales = if self.auto_scale {
            self.compute_scales(&supply, &resolved)
        } else {
            HashMap::new()
        };

        let demand = self.build_demand(resolved, &scales);

        let needs_tokens: i64 = demand.buyers.iter().map(|b| b.demand()).sum();
        log::info!(
            "nodes: {}, views: {}, needs: {}, has: {}",
            supply.suppliers.len(),
            demand.buyers.len(),
            self.unit.weight(needs_tokens),
            self.unit.weight(supply.tokens)
        );

        let table = ScoreAffinityTable::new(
            &self.options,
            &self.scorer,
            &supply.records,
            &supply.locations,
            &demand.records,
            &demand.locations,
        );
        let config = MatcherConfig::new()
            .with_price_sensitivity(self.options.score_sensitivity)
            .with_price_bottom(self.options.remote_access_score)
            .with_enough_suppliers(self.options.enough_node_count)
            .with_exclusive(self.options.exclusive);
        let plan = GreedyMatcher::new(config).match_supply(&supply.suppliers, &demand.buyers, &table);

        let mut alloc_views = Vec::new();
        for (buyer_index, records) in plan.iter() {
            if records.is_empty() {
                continue;
            }
            let group = AllocGroup {
                nodes: records
                    .iter()
                    .map(|record| supply.suppliers[record.supplier.get()].id().to_owned())
                    .collect(),
                nodes_weight: records
                    .iter()
                    .map(|record| self.unit.weight(record.amount))
                    .collect(),
            };
            for (name, tokens) in &demand.constituents[buyer_index.get()] {
                alloc_views.push(AllocView {
                    name: name.clone(),
                    demand: self.unit.weight(*tokens),
                    groups: vec![group.clone()],
                });
            }
        }
        alloc_views.sort_by(|a, b| a.name.cmp(&b.name));

        let mut shortfalls: Vec<Shortfall> = demand
            .buyers
            .iter()
            .enumerate()
            .filter_map(|(i, buyer)| {
                let rest = plan.demand_rest(BuyerIndex::new(i));
                (rest > 0).then(|| Shortfall {
                    view: buyer.id().to_owned(),
                    demand: self.unit.weight(buyer.demand()),
                    rest: self.unit.weight(rest),
                })
            })
            .collect();
        shortfalls.sort_by(|a, b| b.rest.cmp(&a.rest));

        let mut leftovers: Vec<Leftover> = supply
            .suppliers
            .iter()
            .enumerate()
            .filter_map(|(i, supplier)| {
                let rest = plan.cap_rest(SupplierIndex::new(i));
                (rest > 0).then(|| Leftover {
                    node: supplier.id().to_owned(),
                    isp: supply.locations[i].isp.clone(),
                    province: supply.locations[i].province.clone(),
                    cap: self.unit.weight(supplier.cap()),
                    rest: self.unit.weight(rest),
                })
            })
            .collect();
        leftovers.sort_by(|a, b| b.rest.cmp(&a.rest));

        let shortfall_tokens: i64 = shortfalls.iter().map(|s| s.rest).sum::<i64>() / self.unit.mbps();
        let remains_tokens: i64 = leftovers.iter().map(|l| l.rest).sum::<i64>() / self.unit.mbps();

        let summary = Summary {
            nodes: nodes.len(),
            views: views.len(),
            nodes_bw: self.unit.gbps(supply.tokens),
            views_bw: self.unit.gbps(needs_tokens),
            bw_needs: self.unit.gbps(shortfall_tokens),
            bw_remains: self.unit.gbps(remains_tokens),
            scales,
        };

        Ok(BandwidthOutcome {
            allocs: AllocDoc { views: alloc_views },
            summary,
            perfect: plan.is_perfect(),
            shortfalls,
            leftovers,
        })
    }

    fn build_supply(&self, nodes: &[NodeRecord]) -> SupplySide {
        let mut records: Vec<NodeRecord> = nodes.to_vec();
        records.sort_by(|a, b| a.node.cmp(&b.node));

        let mut suppliers = Vec::with_capacity(records.len());
        let mut locations = Vec::with_capacity(records.len());
        let mut tokens = 0;

        for node in &records {
            let mut cap = self.unit.capacity_tokens(node.bw);
            if cap == 0 || node.isp.is_empty() || node.province.is_empty() {
                log::warn!("node {} is incomplete", node.node);
                cap = 0;
            }

            suppliers.push(Supplier::new(node.node.clone(), cap, priority_weight(node.priority)));
            locations.push(self.unifier.unify(
                &Location::new(node.isp.clone(), node.province.clone()),
                true,
            ));
            tokens += cap;
        }

        SupplySide {
            suppliers,
            records,
            locations,
            tokens,
        }
    }

    /// Resolves every view to its normalized location and unscaled demand in
    /// Gbps.
    fn resolve_views(
        &self,
        views: &[ViewRecord],
        total_bw: Option<f64>,
    ) -> Result<Vec<(ViewRecord, Location, f64)>, BandwidthError> {
        views
            .iter()
            .map(|view| {
                let location = self.unifier.unify(&view.location()?, false);
                let gbps = match (view.bw, view.percent) {
                    (Some(bw), _) => bw,
                    (None, Some(percent)) => {
                        let total = total_bw.ok_or_else(|| {
                            BandwidthError::InvalidOption(
                                "percent-shaped views require a total bandwidth".to_owned(),
                            )
                        })?;
                        percent * total
                    }
                    (None, None) => 0.0,
                };
                Ok((view.clone(), location, gbps))
            })
            .collect()
    }

    fn compute_scales(
        &self,
        supply: &SupplySide,
        resolved: &[(ViewRecord, Location, f64)],
    ) -> HashMap<String, f64> {
        let mut supply_by_isp: HashMap<String, f64> = HashMap::new();
        for (supplier, location) in supply.suppliers.iter().zip(&supply.locations) {
            *supply_by_isp.entry(location.isp.clone()).or_default() +=
                self.unit.gbps(supplier.cap());
        }

        let mut demand_by_isp: HashMap<String, f64> = HashMap::new();
        for (_, location, gbps) in resolved {
            *demand_by_isp.entry(location.isp.clone()).or_default() += gbps;
        }

        let scales = auto_scale(
            &supply_by_isp,
            &demand_by_isp,
            self.auto_scale_min,
            self.auto_scale_max,
        );
        for (isp, scale) in &scales {
            log::info!("auto scale {}: {:.3}", isp, scale);
        }
        scales
    }

    fn build_demand(
        &self,
        resolved: Vec<(ViewRecord, Location, f64)>,
        scales: &HashMap<String, f64>,
    ) -> DemandSide {
        let mut entries: Vec<(ViewRecord, Location, i64)> = resolved
            .into_iter()
            .map(|(record, location, gbps)| {
                let scale = scales.get(&location.isp).copied().unwrap_or(1.0);
                let tokens = self.unit.demand_tokens(gbps * scale);
                (record, location, tokens)
            })
            .collect();
        entries.sort_by(|a, b| b.2.cmp(&a.2));

        if self.auto_merge_view {
            let locations: Vec<Location> = entries.iter().map(|e| e.1.clone()).collect();
            let demands: Vec<i64> = entries.iter().map(|e| e.2).collect();
            let merged = merge_by_location(&locations, &demands);

            let mut buyers = Vec::with_capacity(merged.len());
            let mut records = Vec::with_capacity(merged.len());
            let mut merged_locations = Vec::with_capacity(merged.len());
            let mut constituents = Vec::with_capacity(merged.len());
            for group in merged {
                buyers.push(Buyer::new(group.id.clone(), group.demand));
                records.push(ViewRecord {
                    view: group.id,
                    isp: Some(group.location.isp.clone()),
                    province: Some(group.location.province.clone()),
                    bw: None,
                    percent: None,
                });
                merged_locations.push(group.location);
                constituents.push(
                    group
                        .members
                        .iter()
                        .map(|&member| (entries[member].0.view.clone(), entries[member].2))
                        .collect(),
                );
            }

            return DemandSide {
                buyers,
                records,
                locations: merged_locations,
                constituents,
            };
        }

        let buyers = entries
            .iter()
            .map(|(record, _, tokens)| Buyer::new(record.view.clone(), *tokens))
            .collect();
        let constituents = entries
            .iter()
            .map(|(record, _, tokens)| vec![(record.view.clone(), *tokens)])
            .collect();
        let locations = entries.iter().map(|e| e.1.clone()).collect();
        let records = entries.into_iter().map(|e| e.0).collect();

        DemandSide {
            buyers,
            records,
            locations,
            constituents,
        }
    }
}
