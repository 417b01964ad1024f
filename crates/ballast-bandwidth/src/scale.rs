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

//! ISP-scoped supply/demand balancing.
//!
//! Demand never crosses ISPs, so each ISP's views are scaled by that ISP's
//! own supply-to-demand ratio before matching. A ratio above one inflates
//! demand to use idle capacity; below one it shrinks demand to what the ISP
//! can actually carry.

use std::collections::HashMap;

/// Computes the per-ISP demand scale: `supply / demand`, clamped to the
/// optional `[min, max]` bounds. ISPs without demand get no entry.
pub fn auto_scale(
    supply_by_isp: &HashMap<String, f64>,
    demand_by_isp: &HashMap<String, f64>,
    min: Option<f64>,
    max: Option<f64>,
) -> HashMap<String, f64> {
    let mut scales = HashMap::new();
    for (isp, &demand) in demand_by_isp {
        if demand <= 0.0 {
            continue;
        }
        let supply = supply_by_isp.get(isp).copied().unwrap_or(0.0);
        let mut scale = supply / demand;
        if let Some(max) = max {
            scale = scale.min(max);
        }
        if let Some(min) = min {
            scale = scale.max(min);
        }
        scales.insert(isp.clone(), scale);
    }
    scales
}
