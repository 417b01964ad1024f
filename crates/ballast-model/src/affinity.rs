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

//! Per-pair affinity: price, purchase limits, and the affinity table trait.

use crate::{
    entity::{Buyer, Supplier},
    index::{BuyerIndex, SupplierIndex},
    num::MatchQuantity,
};

/// An upper bound on the amount a single (supplier, buyer) pair may exchange.
///
/// Limits are cheap value objects evaluated against the pair's static
/// capacity and demand when the engine materializes its pair list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BuyLimit<T> {
    /// No bound beyond the supplier's capacity and the buyer's demand.
    Unlimited,
    /// A fixed absolute bound.
    Fixed(T),
    /// A fraction of the supplier's capacity, rounded up.
    PercentOfCap(f64),
    /// A fraction of the buyer's demand, rounded up.
    PercentOfDemand(f64),
}

impl<T> BuyLimit<T>
where
    T: MatchQuantity,
{
    /// Evaluates the limit against a pair's capacity and demand.
    ///
    /// `Unlimited` evaluates to `T::max_value()`; percentage variants round
    /// up and saturate at `T::max_value()` if the product does not fit.
    pub fn calculate(&self, supplier_cap: T, buyer_demand: T) -> T {
        match *self {
            BuyLimit::Unlimited => T::max_value(),
            BuyLimit::Fixed(limit) => limit,
            BuyLimit::PercentOfCap(ratio) => ceil_portion(supplier_cap, ratio),
            BuyLimit::PercentOfDemand(ratio) => ceil_portion(buyer_demand, ratio),
        }
    }

    /// Returns `true` if this limit is the unbounded variant.
    #[inline]
    pub fn is_unlimited(&self) -> bool {
        matches!(self, BuyLimit::Unlimited)
    }
}

fn ceil_portion<T>(base: T, ratio: f64) -> T
where
    T: MatchQuantity,
{
    let scaled = (base.to_f64().unwrap_or(f64::MAX) * ratio).ceil();
    T::from_f64(scaled).unwrap_or_else(T::max_value)
}

/// The affinity of a single (supplier, buyer) pair.
///
/// Lower prices are matched first; the limit caps how much the pair may
/// exchange. A zero-valued limit effectively excludes the pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affinity<T> {
    /// The pair's price. Lower is better; never negative.
    pub price: f32,
    /// The pair's purchase bound.
    pub limit: BuyLimit<T>,
}

impl<T> Affinity<T>
where
    T: MatchQuantity,
{
    /// An affinity with no purchase bound.
    #[inline]
    pub fn unlimited(price: f32) -> Self {
        Self {
            price,
            limit: BuyLimit::Unlimited,
        }
    }

    /// An affinity with the given purchase bound.
    #[inline]
    pub fn limited(price: f32, limit: BuyLimit<T>) -> Self {
        Self { price, limit }
    }

    /// An affinity that excludes the pair from any allocation.
    #[inline]
    pub fn rejected(price: f32) -> Self {
        Self {
            price,
            limit: BuyLimit::Fixed(T::zero()),
        }
    }
}

/// A pure per-pair policy consulted by the matching engine.
///
/// Implementations must be deterministic and free of side effects on their
/// inputs: for a fixed table, the same pair always yields the same affinity.
/// The indices identify the entities' positions in the match's input slices,
/// allowing tables to carry parallel metadata (locations, tags) without the
/// entities themselves having to.
pub trait AffinityTable<T>
where
    T: MatchQuantity,
{
    /// Returns the affinity of the given (supplier, buyer) pair.
    fn affinity(
        &self,
        supplier_index: SupplierIndex,
        supplier: &Supplier<T>,
        buyer_index: BuyerIndex,
        buyer: &Buyer<T>,
    ) -> Affinity<T>;
}
