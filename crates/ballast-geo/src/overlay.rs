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

//! Override overlays for unifiers and scorers.
//!
//! An overlay consults a user-supplied dictionary before falling through to
//! its base implementation. Overrides are applied at construction: later
//! records with the same key overwrite earlier ones, so record order is
//! meaningful and the result is deterministic.

use crate::location::{DistScore, DistScorer, Location, LocationUnifier};
use std::collections::HashMap;

/// One unification override: `source` (on the given side) maps to `target`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnifyRecord {
    pub source: Location,
    pub server: bool,
    pub target: Location,
}

/// A unifier that applies explicit overrides before the base unifier.
///
/// Class predicates are always answered by the base: overrides rewrite
/// identities, not geography.
pub struct OverlayUnifier<U> {
    base: U,
    records: HashMap<(Location, bool), Location>,
}

impl<U> OverlayUnifier<U>
where
    U: LocationUnifier,
{
    pub fn new<R>(base: U, records: R) -> Self
    where
        R: IntoIterator<Item = UnifyRecord>,
    {
        let records = records
            .into_iter()
            .map(|record| ((record.source, record.server), record.target))
            .collect();
        Self { base, records }
    }
}

impl<U> LocationUnifier for OverlayUnifier<U>
where
    U: LocationUnifier,
{
    fn unify(&self, location: &Location, server: bool) -> Location {
        if let Some(target) = self.records.get(&(location.clone(), server)) {
            return target.clone();
        }
        self.base.unify(location, server)
    }

    fn in_normal(&self, location: &Location) -> bool {
        self.base.in_normal(location)
    }

    fn in_central(&self, location: &Location) -> bool {
        self.base.in_central(location)
    }

    fn in_frontier(&self, location: &Location) -> bool {
        self.base.in_frontier(location)
    }
}

/// One scoring override for an ordered `(client, server)` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreRecord {
    pub client: Location,
    pub server: Location,
    pub score: f32,
    pub local: bool,
}

/// A scorer that applies explicit pair overrides before the base scorer.
pub struct OverlayScorer<S> {
    base: S,
    records: HashMap<(Location, Location), DistScore>,
}

impl<S> OverlayScorer<S>
where
    S: DistScorer,
{
    pub fn new<R>(base: S, records: R) -> Self
    where
        R: IntoIterator<Item = ScoreRecord>,
    {
        let records = records
            .into_iter()
            .map(|record| {
                (
                    (record.client, record.server),
                    DistScore::new(record.score, record.local),
                )
            })
            .collect();
        Self { base, records }
    }
}

impl<S> DistScorer for OverlayScorer<S>
where
    S: DistScorer,
{
    fn dist_score(&self, client: &Location, server: &Location) -> DistScore {
        if let Some(&score) = self.records.get(&(client.clone(), server.clone())) {
            return score;
        }
        self.base.dist_score(client, server)
    }
}
