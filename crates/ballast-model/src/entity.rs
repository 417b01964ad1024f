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

//! Immutable supplier and buyer value objects.
//!
//! Entities carry only their identity and static parameters. Residual
//! capacity and residual demand are bookkeeping of a single match run and
//! live in the engine's ledger (see `ballast_match`), which is returned as
//! part of the `MatchPlan`. This keeps entity slices shareable across match
//! calls and makes a match a pure function of its inputs.

use crate::num::MatchQuantity;

/// A capacity-bearing source in the matching bipartite graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Supplier<T> {
    id: String,
    cap: T,
    priority: T,
}

impl<T> Supplier<T>
where
    T: MatchQuantity,
{
    /// Constructs a new supplier.
    ///
    /// A supplier with zero capacity is carried through a match but never
    /// produces an allocation.
    ///
    /// # Panics
    ///
    /// Panics if `cap` is negative or `priority` is less than one.
    pub fn new<I>(id: I, cap: T, priority: T) -> Self
    where
        I: Into<String>,
    {
        assert!(
            cap >= T::zero(),
            "called `Supplier::new` with a negative capacity: {}",
            cap
        );
        assert!(
            priority >= T::one(),
            "called `Supplier::new` with a non-positive priority: {}",
            priority
        );

        Self {
            id: id.into(),
            cap,
            priority,
        }
    }

    /// Returns the supplier's identity.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the supplier's total capacity.
    #[inline]
    pub fn cap(&self) -> T {
        self.cap
    }

    /// Returns the supplier's allocation weight (always >= 1).
    #[inline]
    pub fn priority(&self) -> T {
        self.priority
    }
}

/// A demand-bearing sink in the matching bipartite graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Buyer<T> {
    id: String,
    demand: T,
}

impl<T> Buyer<T>
where
    T: MatchQuantity,
{
    /// Constructs a new buyer.
    ///
    /// A buyer with zero demand is carried through a match but never receives
    /// an allocation.
    ///
    /// # Panics
    ///
    /// Panics if `demand` is negative.
    pub fn new<I>(id: I, demand: T) -> Self
    where
        I: Into<String>,
    {
        assert!(
            demand >= T::zero(),
            "called `Buyer::new` with a negative demand: {}",
            demand
        );

        Self {
            id: id.into(),
            demand,
        }
    }

    /// Returns the buyer's identity.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the buyer's total demand.
    #[inline]
    pub fn demand(&self) -> T {
        self.demand
    }
}
