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
    doc::{NodeRecord, ViewRecord},
    error::BandwidthError,
};

/// The default target node count per view.
pub const DEFAULT_ENOUGH_NODE_COUNT: usize = 5;
/// The default remote-access score threshold.
pub const DEFAULT_REMOTE_ACCESS_SCORE: f32 = 50.0;
/// The default reject score threshold.
pub const DEFAULT_REJECT_SCORE: f32 = 80.0;
/// The default remote-access capacity fraction.
pub const DEFAULT_REMOTE_ACCESS_LIMIT: f64 = 0.1;
/// The default score sensitivity (price-tier width).
pub const DEFAULT_SCORE_SENSITIVITY: f32 = 10.0;

/// A pair predicate excluding nodes from specific views.
pub type NodeFilter = dyn Fn(&NodeRecord, &ViewRecord) -> bool + Send + Sync;

/// Per-view-group tuning of the affinity policy and the matcher.
pub struct ViewOptions {
    /// The target node count per view (`ecn`).
    pub enough_node_count: usize,
    /// Scores below this are near access with no capacity limit (`ras`,
    /// valid range `[20, 80]`).
    pub remote_access_score: f32,
    /// Scores below this (and at or above `ras`) are remote access; scores
    /// at or above it are rejected (`rjs`, valid range `[ras, 100]`).
    pub reject_score: f32,
    /// The capacity fraction a remote pair may use (`ral`, valid range
    /// `[0, 1]`).
    pub remote_access_limit: f64,
    /// The price-tier width handed to the matcher (`sens`).
    pub score_sensitivity: f32,
    /// All-or-nothing mode: a node serves at most one view.
    pub exclusive: bool,
    /// Optional pair filter; a `false` verdict excludes the pair.
    pub node_filter: Option<Box<NodeFilter>>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            enough_node_count: DEFAULT_ENOUGH_NODE_COUNT,
            remote_access_score: DEFAULT_REMOTE_ACCESS_SCORE,
            reject_score: DEFAULT_REJECT_SCORE,
            remote_access_limit: DEFAULT_REMOTE_ACCESS_LIMIT,
            score_sensitivity: DEFAULT_SCORE_SENSITIVITY,
            exclusive: false,
            node_filter: None,
        }
    }
}

impl ViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Silently repairs out-of-range knobs that have safe defaults; each
    /// correction is logged. Hard range violations are left to
    /// [`ViewOptions::validate`].
    pub fn fix(&mut self) {
        if !(0.0..=1.0).contains(&self.remote_access_limit) {
            log::warn!(
                "remote access limit {} out of [0, 1], reset to {}",
                self.remote_access_limit,
                DEFAULT_REMOTE_ACCESS_LIMIT
            );
            self.remote_access_limit = DEFAULT_REMOTE_ACCESS_LIMIT;
        }
        if self.score_sensitivity <= 0.0 {
            log::warn!(
                "score sensitivity {} is not positive, reset to {}",
                self.score_sensitivity,
                DEFAULT_SCORE_SENSITIVITY
            );
            self.score_sensitivity = DEFAULT_SCORE_SENSITIVITY;
        }
    }

    /// Validates the threshold ranges: `ras` in `[20, 80]`, `rjs` in
    /// `[ras, 100]`, `ral` in `[0, 1]`.
    pub fn validate(&self) -> Result<(), BandwidthError> {
        if !(20.0..=80.0).contains(&self.remote_access_score) {
            return Err(BandwidthError::InvalidOption(format!(
                "remote access score {} out of [20, 80]",
                self.remote_access_score
            )));
        }
        if self.reject_score < self.remote_access_score || self.reject_score > 100.0 {
            return Err(BandwidthError::InvalidOption(format!(
                "reject score {} out of [{}, 100]",
                self.reject_score, self.remote_access_score
            )));
        }
        if !(0.0..=1.0).contains(&self.remote_access_limit) {
            return Err(BandwidthError::InvalidOption(format!(
                "remote access limit {} out of [0, 1]",
                self.remote_access_limit
            )));
        }
        Ok(())
    }
}
