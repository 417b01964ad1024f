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

use crate::{
    index::{BuyerIndex, SupplierIndex},
    num::MatchQuantity,
};
use smallvec::SmallVec;

/// A single allocation: `amount` units granted to a buyer by a supplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuyRecord<T> {
    /// The granting supplier.
    pub supplier: SupplierIndex,
    /// The granted amount; always strictly positive.
    pub amount: T,
}

/// Per-buyer record lists are short in practice (a handful of suppliers per
/// buyer), so they are stored inline up to this length.
pub type RecordList<T> = SmallVec<[BuyRecord<T>; 4]>;

/// The outcome of a match.
///
/// This struct uses a Structure of Arrays (SoA) layout. Data is indexed
/// directly by `BuyerIndex` / `SupplierIndex` (i.e., index `i` corresponds to
/// the `i`-th entity of the match's input slices).
///
/// Each buyer's record list is ordered by insertion (cheapest tier first) and
/// contains at most one record per supplier. The residual ledgers describe
/// the capacity and demand left over at termination: `cap_rest` is never
/// negative; `demand_rest` may be negative by at most the final grant's
/// rounding excess.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchPlan<T> {
    records: Vec<RecordList<T>>,
    cap_rest: Vec<T>,
    demand_rest: Vec<T>,
    perfect: bool,
}

impl<T> MatchPlan<T>
where
    T: MatchQuantity,
{
    /// Constructs a new `MatchPlan`.
    ///
    /// # Panics
    ///
    /// Panics if `records` and `demand_rest` have different lengths.
    pub fn new(
        records: Vec<RecordList<T>>,
        cap_rest: Vec<T>,
        demand_rest: Vec<T>,
        perfect: bool,
    ) -> Self {
        assert_eq!(
            records.len(),
            demand_rest.len(),
            "called MatchPlan::new with inconsistent vector lengths: records.len() = {}, demand_rest.len() = {}",
            records.len(),
            demand_rest.len()
        );

        Self {
            records,
            cap_rest,
            demand_rest,
            perfect,
        }
    }

    /// Returns the number of buyers in this plan.
    #[inline]
    pub fn num_buyers(&self) -> usize {
        self.records.len()
    }

    /// Returns the number of suppliers in this plan.
    #[inline]
    pub fn num_suppliers(&self) -> usize {
        self.cap_rest.len()
    }

    /// Returns `true` iff every buyer's demand was fully satisfied.
    #[inline]
    pub fn is_perfect(&self) -> bool {
        self.perfect
    }

    /// Returns the allocation records of a specific buyer.
    ///
    /// # Panics
    ///
    /// Panics if `buyer_index` is out of bounds.
    #[inline]
    pub fn records_for(&self, buyer_index: BuyerIndex) -> &[BuyRecord<T>] {
        &self.records[buyer_index.get()]
    }

    /// Returns the unallocated capacity of a specific supplier.
    ///
    /// # Panics
    ///
    /// Panics if `supplier_index` is out of bounds.
    #[inline]
    pub fn cap_rest(&self, supplier_index: SupplierIndex) -> T {
        self.cap_rest[supplier_index.get()]
    }

    /// Returns the unsatisfied demand of a specific buyer.
    ///
    /// # Panics
    ///
    /// Panics if `buyer_index` is out of bounds.
    #[inline]
    pub fn demand_rest(&self, buyer_index: BuyerIndex) -> T {
        self.demand_rest[buyer_index.get()]
    }

    /// Returns the total amount granted to a specific buyer.
    pub fn allocated_to(&self, buyer_index: BuyerIndex) -> T {
        self.records[buyer_index.get()]
            .iter()
            .fold(T::zero(), |sum, record| sum + record.amount)
    }

    /// Returns the total amount granted by a specific supplier across all
    /// buyers.
    pub fn allocated_from(&self, supplier_index: SupplierIndex) -> T {
        self.records
            .iter()
            .flat_map(|records| records.iter())
            .filter(|record| record.supplier == supplier_index)
            .fold(T::zero(), |sum, record| sum + record.amount)
    }

    /// Iterates over `(buyer, records)` pairs in buyer-index order.
    pub fn iter(&self) -> impl Iterator<Item = (BuyerIndex, &[BuyRecord<T>])> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, records)| (BuyerIndex::new(i), records.as_slice()))
    }
}
