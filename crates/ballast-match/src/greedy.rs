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

//! The greedy tier-by-tier allocator.
//!
//! The engine materializes the full supplier×buyer pair list, sorts it by
//! (price tier, buyer position, priority descending) with a stable sort, and
//! walks it in chunks that share a price tier and a buyer. Within a chunk,
//! capacity is granted proportionally to `available × priority`, rounding up,
//! so a buyer's demand is spread across the tier's suppliers instead of
//! draining them one by one.
//!
//! Residual capacity and demand are tracked in a ledger owned by the engine;
//! the caller's entity slices are never mutated.

use crate::config::MatcherConfig;
use ballast_model::{
    affinity::AffinityTable,
    entity::{Buyer, Supplier},
    index::{BuyerIndex, SupplierIndex},
    num::MatchQuantity,
    plan::{BuyRecord, MatchPlan, RecordList},
};
use smallvec::SmallVec;

/// A greedy matcher that assigns buyers to suppliers based on price affinity
/// and supplier priority.
///
/// Matching strategy:
/// 1. Sort all (supplier, buyer) pairs by: price tier → buyer → priority.
/// 2. For each (price tier, buyer) chunk, grant supplier capacity
///    proportionally by priority (non-exclusive) or at full capacity only
///    (exclusive).
/// 3. Stop expanding a buyer once its demand is met, enough suppliers are
///    matched, and the price exceeds the configured ceiling.
///
/// The matcher never fails; an infeasible instance yields a plan with
/// `is_perfect() == false` and positive residual demand.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyMatcher {
    config: MatcherConfig,
}

/// One materialized (supplier, buyer) pair, annotated with everything the
/// chunk walk needs.
#[derive(Clone, Copy, Debug)]
struct PairEntry<T> {
    tier: i64,
    price: f32,
    limit: T,
    priority: T,
    supplier: SupplierIndex,
    buyer: BuyerIndex,
}

impl GreedyMatcher {
    /// Creates a matcher with the given configuration.
    #[inline]
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Returns the matcher's configuration.
    #[inline]
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Maps a price to its tier. Two prices are tied iff their tiers match.
    #[inline]
    fn tier(&self, price: f32) -> i64 {
        (price / self.config.price_sensitivity()) as i64
    }

    /// Matches buyers to suppliers and returns the allocation plan.
    ///
    /// Entities are read-only inputs; all residual bookkeeping lives in the
    /// returned plan. The affinity table is consulted exactly once per pair.
    pub fn match_supply<T, A>(
        &self,
        suppliers: &[Supplier<T>],
        buyers: &[Buyer<T>],
        affinities: &A,
    ) -> MatchPlan<T>
    where
        T: MatchQuantity,
        A: AffinityTable<T> + ?Sized,
    {
        let mut pairs = Vec::with_capacity(suppliers.len() * buyers.len());
        for (i, supplier) in suppliers.iter().enumerate() {
            let supplier_index = SupplierIndex::new(i);
            for (j, buyer) in buyers.iter().enumerate() {
                let buyer_index = BuyerIndex::new(j);
                let affinity = affinities.affinity(supplier_index, supplier, buyer_index, buyer);
                pairs.push(PairEntry {
                    tier: self.tier(affinity.price),
                    price: affinity.price,
                    limit: affinity.limit.calculate(supplier.cap(), buyer.demand()),
                    priority: supplier.priority(),
                    supplier: supplier_index,
                    buyer: buyer_index,
                });
            }
        }

        // Cheapest tier first; within a tier all of one buyer's pairs are
        // contiguous (the buyer's input position is the deterministic
        // tiebreaker), ordered by descending priority. The sort is stable, so
        // equal-priority suppliers keep their input order.
        pairs.sort_by(|a, b| {
            a.tier
                .cmp(&b.tier)
                .then(a.buyer.cmp(&b.buyer))
                .then(b.priority.cmp(&a.priority))
        });

        let mut records: Vec<RecordList<T>> = vec![SmallVec::new(); buyers.len()];
        let mut cap_rest: Vec<T> = suppliers.iter().map(|s| s.cap()).collect();
        let mut demand_rest: Vec<T> = buyers.iter().map(|b| b.demand()).collect();

        let exclusive = self.config.exclusive();
        let enough = self.config.enough_suppliers();
        let bottom_tier = self.tier(self.config.price_bottom());

        let mut start = 0;
        while start < pairs.len() {
            // A chunk is the run of pairs sharing this tier and buyer: all
            // suppliers available to the buyer at this price level.
            let mut end = start + 1;
            while end < pairs.len()
                && pairs[end].tier == pairs[start].tier
                && pairs[end].buyer == pairs[start].buyer
            {
                end += 1;
            }
            let chunk = &pairs[start..end];
            start = end;

            let buyer_index = chunk[0].buyer;
            let b = buyer_index.get();

            let mut available_total = T::zero();
            let mut factor_sum = T::zero();
            for pair in chunk {
                let available = pair.limit.min(cap_rest[pair.supplier.get()]);
                available_total = available_total + available;
                factor_sum = factor_sum + available * pair.priority;
            }

            let mut chunk_demand = demand_rest[b];

            // Demand may already be met while the supplier spread is not:
            // nudge the chunk's budget to a single unit so further suppliers
            // can still be onboarded toward the target count.
            if buyers[b].demand() > T::zero()
                && chunk_demand <= T::zero()
                && records[b].len() < enough
            {
                chunk_demand = T::one();
            }

            if chunk_demand <= T::zero() || available_total <= T::zero() || factor_sum <= T::zero()
            {
                continue;
            }

            log::debug!(
                "{} demand: {} demand_rest: {} available: {} factor_sum: {}",
                buyers[b].id(),
                buyers[b].demand(),
                chunk_demand,
                available_total,
                factor_sum
            );

            for pair in chunk {
                if factor_sum <= T::zero() {
                    break;
                }

                let s = pair.supplier.get();
                let mut amount = pair.limit.min(cap_rest[s]);
                let factor = amount * pair.priority;

                if !exclusive {
                    let share = factor.to_f64().unwrap_or(f64::MAX)
                        / factor_sum.to_f64().unwrap_or(f64::MAX)
                        * chunk_demand.to_f64().unwrap_or(f64::MAX);
                    let may = T::from_f64(share.ceil()).unwrap_or_else(T::max_value);
                    amount = may.min(amount);
                }
                factor_sum = factor_sum - factor;

                // Exclusive mode rejects both a partially drained supplier and
                // a limit below full capacity with the single equality test.
                if amount <= T::zero() || (exclusive && amount != suppliers[s].cap()) {
                    continue;
                }

                let buyer_records = &mut records[b];
                match buyer_records
                    .iter_mut()
                    .find(|record| record.supplier == pair.supplier)
                {
                    Some(record) => record.amount = record.amount + amount,
                    None => buyer_records.push(BuyRecord {
                        supplier: pair.supplier,
                        amount,
                    }),
                }

                log::debug!(
                    "  {} {} amount: {} factor: {}",
                    pair.price,
                    suppliers[s].id(),
                    amount,
                    factor
                );

                cap_rest[s] = cap_rest[s] - amount;
                demand_rest[b] = demand_rest[b] - amount;
                chunk_demand = chunk_demand - amount;

                if chunk_demand <= T::zero()
                    && records[b].len() >= enough
                    && (exclusive || pair.tier > bottom_tier)
                {
                    break;
                }
                // Keep at least one unit of budget so the rest of this tier
                // can still contribute toward the enough-count.
                chunk_demand = chunk_demand.max(T::one());
            }

            if demand_rest.iter().all(|rest| *rest <= T::zero()) {
                return MatchPlan::new(records, cap_rest, demand_rest, true);
            }
        }

        let perfect = demand_rest.iter().all(|rest| *rest <= T::zero());
        MatchPlan::new(records, cap_rest, demand_rest, perfect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballast_model::affinity::{Affinity, BuyLimit};
    use std::collections::HashMap;

    fn supplier(id: &str, cap: i64, priority: i64) -> Supplier<i64> {
        Supplier::new(id, cap, priority)
    }

    fn buyer(id: &str, demand: i64) -> Buyer<i64> {
        Buyer::new(id, demand)
    }

    /// An affinity table backed by explicit per-pair prices and limits,
    /// keyed by entity ids. Unlisted pairs default to price 100.
    #[derive(Default)]
    struct TestTable {
        prices: HashMap<(String, String), f32>,
        limits: HashMap<(String, String), i64>,
    }

    impl TestTable {
        fn new() -> Self {
            Self::default()
        }

        fn price(&mut self, supplier_id: &str, buyer_id: &str, price: f32) {
            self.prices
                .insert((supplier_id.to_owned(), buyer_id.to_owned()), price);
        }

        fn limit(&mut self, supplier_id: &str, buyer_id: &str, limit: i64) {
            self.limits
                .insert((supplier_id.to_owned(), buyer_id.to_owned()), limit);
        }
    }

    impl AffinityTable<i64> for TestTable {
        fn affinity(
            &self,
            _supplier_index: SupplierIndex,
            supplier: &Supplier<i64>,
            _buyer_index: BuyerIndex,
            buyer: &Buyer<i64>,
        ) -> Affinity<i64> {
            let key = (supplier.id().to_owned(), buyer.id().to_owned());
            let price = self.prices.get(&key).copied().unwrap_or(100.0);
            match self.limits.get(&key) {
                Some(&limit) => Affinity::limited(price, BuyLimit::Fixed(limit)),
                None => Affinity::unlimited(price),
            }
        }
    }

    fn matcher(sens: f32, bottom: f32, enough: usize, exclusive: bool) -> GreedyMatcher {
        GreedyMatcher::new(
            MatcherConfig::new()
                .with_price_sensitivity(sens)
                .with_price_bottom(bottom)
                .with_enough_suppliers(enough)
                .with_exclusive(exclusive),
        )
    }

    fn total(plan: &MatchPlan<i64>, b: usize) -> i64 {
        plan.allocated_to(BuyerIndex::new(b))
    }

    #[test]
    fn test_one_supplier_one_buyer() {
        let suppliers = vec![supplier("s1", 100, 1)];
        let buyers = vec![buyer("b1", 50)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);

        let plan = matcher(1.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        assert!(plan.is_perfect());
        let records = plan.records_for(BuyerIndex::new(0));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, 50);
        assert_eq!(plan.cap_rest(SupplierIndex::new(0)), 50);
    }

    #[test]
    fn test_one_supplier_two_buyers() {
        let suppliers = vec![supplier("s1", 100, 1)];
        let buyers = vec![buyer("b1", 30), buyer("b2", 40)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.price("s1", "b2", 10.0);

        let plan = matcher(1.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        assert!(plan.is_perfect());
        assert_eq!(plan.records_for(BuyerIndex::new(0))[0].amount, 30);
        assert_eq!(plan.records_for(BuyerIndex::new(1))[0].amount, 40);
        assert_eq!(plan.cap_rest(SupplierIndex::new(0)), 30);
    }

    #[test]
    fn test_prices_in_same_tier_are_tied() {
        // sens=1.0: prices 1.0 and 1.9 share tier 1 and split the demand.
        let suppliers = vec![supplier("s1", 100, 1), supplier("s2", 100, 1)];
        let buyers = vec![buyer("b1", 100)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 1.0);
        table.price("s2", "b1", 1.9);

        let plan = matcher(1.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        assert_eq!(plan.records_for(BuyerIndex::new(0)).len(), 2);
        assert_eq!(total(&plan, 0), 100);
    }

    #[test]
    fn test_wide_tier_groups_distant_prices() {
        // sens=10.0: prices 1.0 and 9.9 share tier 0.
        let suppliers = vec![supplier("s1", 100, 1), supplier("s2", 100, 1)];
        let buyers = vec![buyer("b1", 100)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 1.0);
        table.price("s2", "b1", 9.9);

        let plan = matcher(10.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        assert_eq!(plan.records_for(BuyerIndex::new(0)).len(), 2);
        assert_eq!(total(&plan, 0), 100);
    }

    #[test]
    fn test_narrow_tier_separates_close_prices() {
        // sens=0.1: prices 1.0 and 1.15 land in tiers 10 and 11, so the
        // cheaper supplier is drained before the other is considered.
        let suppliers = vec![supplier("s1", 100, 1), supplier("s2", 100, 1)];
        let buyers = vec![buyer("b1", 100)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 1.0);
        table.price("s2", "b1", 1.15);

        let plan = matcher(0.1, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        // The cheaper tier alone satisfies the demand.
        let records = plan.records_for(BuyerIndex::new(0));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].supplier, SupplierIndex::new(0));
        assert_eq!(total(&plan, 0), 100);
    }

    #[test]
    fn test_priority_weighted_split() {
        let suppliers = vec![supplier("s1", 100, 2), supplier("s2", 100, 1)];
        let buyers = vec![buyer("b1", 100)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.price("s2", "b1", 10.0);

        let plan = matcher(1.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        // factor_sum = 300, s1 gets ceil(200/300 * 100) = 67, s2 the rest.
        let records = plan.records_for(BuyerIndex::new(0));
        assert_eq!(records[0].supplier, SupplierIndex::new(0));
        assert_eq!(records[0].amount, 67);
        assert_eq!(records[1].amount, 33);
        assert!(plan.is_perfect());
    }

    #[test]
    fn test_equal_priority_splits_evenly() {
        let suppliers = vec![supplier("s1", 100, 1), supplier("s2", 100, 1)];
        let buyers = vec![buyer("b1", 100)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.price("s2", "b1", 10.0);

        let plan = matcher(1.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        for record in plan.records_for(BuyerIndex::new(0)) {
            assert!((49..=51).contains(&record.amount), "amount {}", record.amount);
        }
        assert_eq!(total(&plan, 0), 100);
    }

    #[test]
    fn test_non_exclusive_supplier_serves_many() {
        let suppliers = vec![supplier("s1", 100, 1)];
        let buyers = vec![buyer("b1", 60), buyer("b2", 40)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.price("s1", "b2", 10.0);

        let plan = matcher(1.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        assert!(plan.is_perfect());
        assert_eq!(plan.records_for(BuyerIndex::new(0))[0].amount, 60);
        assert_eq!(plan.records_for(BuyerIndex::new(1))[0].amount, 40);
    }

    #[test]
    fn test_exclusive_rejects_limited_supplier() {
        // A limit below full capacity makes the supplier untouchable in
        // exclusive mode.
        let suppliers = vec![supplier("s1", 100, 1)];
        let buyers = vec![buyer("b1", 150)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.limit("s1", "b1", 80);

        let plan = matcher(1.0, 0.0, 0, true).match_supply(&suppliers, &buyers, &table);

        assert!(plan.records_for(BuyerIndex::new(0)).is_empty());
        assert!(!plan.is_perfect());
    }

    #[test]
    fn test_exclusive_all_or_nothing() {
        let suppliers = vec![supplier("s1", 100, 1), supplier("s2", 100, 1)];
        let buyers = vec![buyer("b1", 100), buyer("b2", 100)];
        let mut table = TestTable::new();
        for s in ["s1", "s2"] {
            for b in ["b1", "b2"] {
                table.price(s, b, 10.0);
            }
        }

        let plan = matcher(1.0, 0.0, 0, true).match_supply(&suppliers, &buyers, &table);

        assert!(plan.is_perfect());
        let first = plan.records_for(BuyerIndex::new(0));
        let second = plan.records_for(BuyerIndex::new(1));
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(first[0].amount, 100);
        assert_eq!(second[0].amount, 100);
        assert_ne!(first[0].supplier, second[0].supplier);
    }

    #[test]
    fn test_all_prices_below_bottom_buys_everything() {
        let suppliers = vec![
            supplier("s1", 50, 1),
            supplier("s2", 50, 1),
            supplier("s3", 50, 1),
        ];
        let buyers = vec![buyer("b1", 150)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.price("s2", "b1", 10.0);
        table.price("s3", "b1", 20.0);

        let plan = matcher(1.0, 25.0, 0, false).match_supply(&suppliers, &buyers, &table);

        assert_eq!(total(&plan, 0), 150);
    }

    #[test]
    fn test_bottom_stops_expansion_once_satisfied() {
        let suppliers = vec![supplier("s1", 100, 1), supplier("s2", 50, 1)];
        let buyers = vec![buyer("b1", 100)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.price("s2", "b1", 30.0);

        let plan = matcher(1.0, 25.0, 1, false).match_supply(&suppliers, &buyers, &table);

        // s1 meets the demand and the enough-count; s2's tier is above the
        // ceiling and is never entered.
        let records = plan.records_for(BuyerIndex::new(0));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].supplier, SupplierIndex::new(0));
        assert_eq!(records[0].amount, 100);
    }

    #[test]
    fn test_expensive_tier_still_used_for_unmet_demand() {
        let suppliers = vec![
            supplier("s1", 50, 1),
            supplier("s2", 50, 1),
            supplier("s3", 50, 1),
        ];
        let buyers = vec![buyer("b1", 150)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.price("s2", "b1", 10.0);
        table.price("s3", "b1", 30.0);

        let plan = matcher(1.0, 25.0, 3, false).match_supply(&suppliers, &buyers, &table);

        assert!(plan.is_perfect());
        assert_eq!(total(&plan, 0), 150);
    }

    #[test]
    fn test_enough_count_met_stops_at_cheap_tier() {
        let suppliers = vec![supplier("s1", 100, 1), supplier("s2", 100, 1)];
        let buyers = vec![buyer("b1", 100)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.price("s2", "b1", 20.0);

        let plan = matcher(1.0, 15.0, 1, false).match_supply(&suppliers, &buyers, &table);

        assert_eq!(plan.records_for(BuyerIndex::new(0)).len(), 1);
    }

    #[test]
    fn test_enough_count_unmet_keeps_expanding() {
        let suppliers = vec![supplier("s1", 50, 1), supplier("s2", 50, 1)];
        let buyers = vec![buyer("b1", 100)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.price("s2", "b1", 20.0);

        let plan = matcher(1.0, 25.0, 2, false).match_supply(&suppliers, &buyers, &table);

        assert_eq!(plan.records_for(BuyerIndex::new(0)).len(), 2);
    }

    #[test]
    fn test_enough_overrides_satisfaction() {
        // Demand is met by a single tier-mate, but the spread target pulls in
        // a second supplier with a token amount.
        let suppliers = vec![supplier("s1", 100, 1), supplier("s2", 100, 1)];
        let buyers = vec![buyer("b1", 50)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.price("s2", "b1", 10.0);

        let plan = matcher(1.0, 0.0, 2, false).match_supply(&suppliers, &buyers, &table);

        let records = plan.records_for(BuyerIndex::new(0));
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|record| record.amount > 0));
        assert!(total(&plan, 0) >= 50);
    }

    #[test]
    fn test_nudge_onboards_one_unit_from_next_tier() {
        let suppliers = vec![supplier("s1", 100, 1), supplier("s2", 100, 1)];
        let buyers = vec![buyer("b1", 50)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.price("s2", "b1", 20.0);

        let plan = matcher(1.0, 25.0, 2, false).match_supply(&suppliers, &buyers, &table);

        let records = plan.records_for(BuyerIndex::new(0));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount, 50);
        // The second supplier exists only to satisfy the spread target.
        assert_eq!(records[1].amount, 1);
        // The overshoot is bounded by the nudge's single unit.
        assert_eq!(plan.demand_rest(BuyerIndex::new(0)), -1);
        assert!(plan.is_perfect());
    }

    #[test]
    fn test_fixed_limit_caps_the_pair() {
        let suppliers = vec![supplier("s1", 100, 1)];
        let buyers = vec![buyer("b1", 100)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.limit("s1", "b1", 30);

        let plan = matcher(1.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        assert_eq!(plan.records_for(BuyerIndex::new(0))[0].amount, 30);
        assert!(!plan.is_perfect());
    }

    #[test]
    fn test_insufficient_capacity_spills_over() {
        let suppliers = vec![supplier("s1", 50, 1), supplier("s2", 100, 1)];
        let buyers = vec![buyer("b1", 150)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.price("s2", "b1", 10.0);

        let plan = matcher(1.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        assert_eq!(total(&plan, 0), 150);
        assert!(plan.is_perfect());
    }

    #[test]
    fn test_zero_demand_buyer_gets_nothing() {
        let suppliers = vec![supplier("s1", 100, 1)];
        let buyers = vec![buyer("b1", 0), buyer("b2", 50)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.price("s1", "b2", 10.0);

        let plan = matcher(1.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        assert!(plan.is_perfect());
        assert!(plan.records_for(BuyerIndex::new(0)).is_empty());
        assert_eq!(plan.records_for(BuyerIndex::new(1))[0].amount, 50);
    }

    #[test]
    fn test_zero_capacity_supplier_grants_nothing() {
        let suppliers = vec![supplier("s1", 0, 1)];
        let buyers = vec![buyer("b1", 100)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);

        let plan = matcher(1.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        assert!(!plan.is_perfect());
        assert!(plan.records_for(BuyerIndex::new(0)).is_empty());
    }

    #[test]
    fn test_empty_suppliers() {
        let suppliers: Vec<Supplier<i64>> = Vec::new();
        let buyers = vec![buyer("b1", 100)];
        let table = TestTable::new();

        let plan = matcher(1.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        assert!(!plan.is_perfect());
        assert_eq!(plan.demand_rest(BuyerIndex::new(0)), 100);
    }

    #[test]
    fn test_empty_buyers_is_vacuously_perfect() {
        let suppliers = vec![supplier("s1", 100, 1)];
        let buyers: Vec<Buyer<i64>> = Vec::new();
        let table = TestTable::new();

        let plan = matcher(1.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        assert!(plan.is_perfect());
        assert_eq!(plan.num_buyers(), 0);
        assert_eq!(plan.cap_rest(SupplierIndex::new(0)), 100);
    }

    #[test]
    fn test_large_quantities() {
        let suppliers = vec![supplier("s1", 1_000_000_000, 1)];
        let buyers = vec![buyer("b1", 1_000_000_000)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);

        let plan = matcher(1.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        assert!(plan.is_perfect());
        assert_eq!(plan.records_for(BuyerIndex::new(0))[0].amount, 1_000_000_000);
    }

    #[test]
    fn test_capacity_conservation() {
        let suppliers = vec![supplier("s1", 100, 1), supplier("s2", 100, 1)];
        let buyers = vec![buyer("b1", 150)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.price("s2", "b1", 10.0);

        let plan = matcher(1.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        for (i, s) in suppliers.iter().enumerate() {
            let index = SupplierIndex::new(i);
            assert_eq!(
                s.cap(),
                plan.cap_rest(index) + plan.allocated_from(index),
                "capacity conservation violated for {}",
                s.id()
            );
            assert!(plan.cap_rest(index) >= 0);
        }
    }

    #[test]
    fn test_demand_conservation() {
        let suppliers = vec![supplier("s1", 100, 1)];
        let buyers = vec![buyer("b1", 80), buyer("b2", 20)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.price("s1", "b2", 10.0);

        let plan = matcher(1.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        for (i, b) in buyers.iter().enumerate() {
            let index = BuyerIndex::new(i);
            assert_eq!(b.demand(), plan.demand_rest(index) + plan.allocated_to(index));
        }
    }

    #[test]
    fn test_no_duplicate_suppliers_per_buyer() {
        let suppliers = vec![supplier("s1", 100, 1), supplier("s2", 100, 1)];
        let buyers = vec![buyer("b1", 150)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);
        table.price("s2", "b1", 10.0);

        let plan = matcher(1.0, 0.0, 0, false).match_supply(&suppliers, &buyers, &table);

        let mut seen = std::collections::HashSet::new();
        for record in plan.records_for(BuyerIndex::new(0)) {
            assert!(seen.insert(record.supplier), "duplicate supplier record");
            assert!(record.amount > 0);
        }
    }

    #[test]
    fn test_identical_inputs_give_identical_plans() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(42);
        let suppliers: Vec<Supplier<i64>> = (0..40)
            .map(|i| {
                supplier(
                    &format!("s{}", i),
                    rng.gen_range(10..500),
                    rng.gen_range(1..4),
                )
            })
            .collect();
        let buyers: Vec<Buyer<i64>> = (0..15)
            .map(|i| buyer(&format!("b{}", i), rng.gen_range(50..800)))
            .collect();
        let mut table = TestTable::new();
        for s in &suppliers {
            for b in &buyers {
                table.price(s.id(), b.id(), rng.gen_range(10.0f32..80.0f32));
            }
        }

        let engine = matcher(10.0, 50.0, 3, false);
        let first = engine.match_supply(&suppliers, &buyers, &table);
        let second = engine.match_supply(&suppliers, &buyers, &table);

        assert_eq!(first, second);

        // Conservation holds on randomized instances too.
        for (i, s) in suppliers.iter().enumerate() {
            let index = SupplierIndex::new(i);
            assert!(first.cap_rest(index) >= 0);
            assert_eq!(s.cap(), first.cap_rest(index) + first.allocated_from(index));
        }
        for (i, b) in buyers.iter().enumerate() {
            let index = BuyerIndex::new(i);
            assert_eq!(b.demand(), first.demand_rest(index) + first.allocated_to(index));
        }
    }

    #[test]
    fn test_rerun_on_satisfied_demand_is_empty_and_perfect() {
        // Feeding the residual demand of a perfect match back in yields an
        // empty allocation.
        let suppliers = vec![supplier("s1", 100, 1)];
        let buyers = vec![buyer("b1", 50)];
        let mut table = TestTable::new();
        table.price("s1", "b1", 10.0);

        let engine = matcher(1.0, 0.0, 0, false);
        let plan = engine.match_supply(&suppliers, &buyers, &table);
        assert!(plan.is_perfect());

        let drained = vec![buyer("b1", 0)];
        let rerun = engine.match_supply(&suppliers, &drained, &table);
        assert!(rerun.is_perfect());
        assert!(rerun.records_for(BuyerIndex::new(0)).is_empty());
    }
}
