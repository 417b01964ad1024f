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

//! Bandwidth token conversion.
//!
//! The engine works on integer tokens of a fixed size. Capacities are
//! floored and demands are ceiled during conversion, so an infeasible
//! instance surfaces as unmet demand instead of being hidden by rounding.

/// The token size of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BwUnit {
    /// CDN scheduling: 100 Mbps tokens, weights reported in Mbps.
    #[default]
    Cdn,
    /// Storage scheduling: 50 Mbps tokens, weights reported in MBps.
    Storage,
}

impl BwUnit {
    /// The token size in Mbps.
    #[inline]
    pub const fn mbps(self) -> i64 {
        match self {
            BwUnit::Cdn => 100,
            BwUnit::Storage => 50,
        }
    }

    /// Converts a capacity in Gbps to tokens, rounding down.
    #[inline]
    pub fn capacity_tokens(self, gbps: f64) -> i64 {
        (gbps * 1000.0 / self.mbps() as f64).floor() as i64
    }

    /// Converts a demand in Gbps to tokens, rounding up.
    #[inline]
    pub fn demand_tokens(self, gbps: f64) -> i64 {
        (gbps * 1000.0 / self.mbps() as f64).ceil() as i64
    }

    /// Converts tokens to the output unit.
    #[inline]
    pub fn weight(self, tokens: i64) -> i64 {
        tokens * self.mbps()
    }

    /// Converts tokens back to Gbps for reporting.
    #[inline]
    pub fn gbps(self, tokens: i64) -> f64 {
        (tokens * self.mbps()) as f64 / 1000.0
    }
}
