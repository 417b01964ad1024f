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

/// A raw or canonical `(ISP, province)` locality tag.
///
/// After normalization through a [`LocationUnifier`], both fields are drawn
/// from a closed canonical set; unknown values pass through unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub isp: String,
    pub province: String,
}

impl Location {
    /// Constructs a location from raw tags.
    pub fn new<I, P>(isp: I, province: P) -> Self
    where
        I: Into<String>,
        P: Into<String>,
    {
        Self {
            isp: isp.into(),
            province: province.into(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.isp, self.province)
    }
}

/// The scored distance of an ordered `(client, server)` pair.
///
/// `local` is only set for pairs sharing both ISP and province under
/// normalization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistScore {
    pub score: f32,
    pub local: bool,
}

impl DistScore {
    #[inline]
    pub const fn new(score: f32, local: bool) -> Self {
        Self { score, local }
    }

    /// A non-local score.
    #[inline]
    pub const fn remote(score: f32) -> Self {
        Self {
            score,
            local: false,
        }
    }
}

/// Normalizes raw locality tags to canonical form and classifies provinces.
///
/// Implementations are immutable after construction and safe for concurrent
/// reads.
pub trait LocationUnifier: Send + Sync {
    /// Canonicalizes a location. `server` distinguishes the supply side from
    /// the demand side for override dictionaries that treat them differently.
    fn unify(&self, location: &Location, server: bool) -> Location;

    /// Whether the province belongs to the *normal* class (a superset of
    /// *central*).
    fn in_normal(&self, location: &Location) -> bool;

    /// Whether the province belongs to the *central* class.
    fn in_central(&self, location: &Location) -> bool;

    /// Whether the province belongs to the *frontier* class.
    fn in_frontier(&self, location: &Location) -> bool;
}

/// Assigns a distance score to an ordered `(client, server)` pair of
/// normalized locations.
pub trait DistScorer: Send + Sync {
    fn dist_score(&self, client: &Location, server: &Location) -> DistScore;
}
