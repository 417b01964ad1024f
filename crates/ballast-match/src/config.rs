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

/// The default price-tier width.
pub const DEFAULT_PRICE_SENSITIVITY: f32 = 1.0;

/// Tuning knobs of the greedy matcher.
///
/// * `price_sensitivity` groups prices into tiers: two prices belong to the
///   same tier iff `(price / sensitivity)` truncates to the same integer.
///   Prices within a tier are treated as tied and allocated proportionally,
///   so near-equal floating-point prices do not pick an arbitrary winner.
/// * `price_bottom` is a ceiling: once a buyer's demand is met and enough
///   suppliers are matched, tiers above the ceiling's tier are not entered.
/// * `enough_suppliers` is the target number of distinct suppliers per buyer.
///   A buyer whose demand is already met keeps onboarding suppliers until the
///   target is reached; this spread is a resilience property, not an
///   optimization.
/// * `exclusive` switches to all-or-nothing mode: a buyer may only take a
///   supplier at its full capacity, and each supplier serves at most one
///   buyer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatcherConfig {
    price_sensitivity: f32,
    price_bottom: f32,
    enough_suppliers: usize,
    exclusive: bool,
}

impl Default for MatcherConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl MatcherConfig {
    /// Creates a configuration with default knobs: tier width 1.0, no price
    /// ceiling, no supplier-count target, non-exclusive.
    #[inline]
    pub fn new() -> Self {
        Self {
            price_sensitivity: DEFAULT_PRICE_SENSITIVITY,
            price_bottom: 0.0,
            enough_suppliers: 0,
            exclusive: false,
        }
    }

    /// Sets the price-tier width.
    ///
    /// A non-positive width is invalid and is replaced by the default, with a
    /// warning; the matcher itself never divides by zero.
    pub fn with_price_sensitivity(mut self, sensitivity: f32) -> Self {
        if sensitivity <= 0.0 {
            log::warn!(
                "invalid price sensitivity {}, falling back to {}",
                sensitivity,
                DEFAULT_PRICE_SENSITIVITY
            );
            self.price_sensitivity = DEFAULT_PRICE_SENSITIVITY;
        } else {
            self.price_sensitivity = sensitivity;
        }
        self
    }

    /// Sets the price ceiling.
    #[inline]
    pub fn with_price_bottom(mut self, bottom: f32) -> Self {
        self.price_bottom = bottom;
        self
    }

    /// Sets the target number of distinct suppliers per buyer.
    #[inline]
    pub fn with_enough_suppliers(mut self, enough: usize) -> Self {
        self.enough_suppliers = enough;
        self
    }

    /// Enables or disables all-or-nothing mode.
    #[inline]
    pub fn with_exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = exclusive;
        self
    }

    /// Returns the price-tier width.
    #[inline]
    pub fn price_sensitivity(&self) -> f32 {
        self.price_sensitivity
    }

    /// Returns the price ceiling.
    #[inline]
    pub fn price_bottom(&self) -> f32 {
        self.price_bottom
    }

    /// Returns the target number of distinct suppliers per buyer.
    #[inline]
    pub fn enough_suppliers(&self) -> usize {
        self.enough_suppliers
    }

    /// Returns `true` if all-or-nothing mode is enabled.
    #[inline]
    pub fn exclusive(&self) -> bool {
        self.exclusive
    }
}
