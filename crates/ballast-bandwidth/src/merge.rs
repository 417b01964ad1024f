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

//! Same-location view merging.
//!
//! Views whose normalized locations coincide place identical demands on the
//! matcher, so they can be collapsed into one synthetic buyer and matched
//! once. The resulting allocation is expanded back to every constituent view
//! afterwards (each view references the shared supplier group).

use ballast_geo::location::Location;
use std::collections::HashMap;

/// One merged buyer: the summed demand of all views sharing a location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedBuyer {
    /// The synthetic buyer id, shaped `province-isp`.
    pub id: String,
    /// The shared normalized location.
    pub location: Location,
    /// The summed demand in tokens.
    pub demand: i64,
    /// Positions of the constituent views in the input slices.
    pub members: Vec<usize>,
}

/// Groups views by normalized location and sums their demands.
///
/// Groups keep the first-occurrence order of their location, are then sorted
/// by descending demand (stable), and remember their members for the
/// expansion pass.
///
/// # Panics
///
/// Panics if `locations` and `demands` have different lengths.
pub fn merge_by_location(locations: &[Location], demands: &[i64]) -> Vec<MergedBuyer> {
    assert_eq!(
        locations.len(),
        demands.len(),
        "called merge_by_location with {} locations but {} demands",
        locations.len(),
        demands.len()
    );

    let mut groups: Vec<MergedBuyer> = Vec::new();
    let mut by_location: HashMap<&Location, usize> = HashMap::new();

    for (index, location) in locations.iter().enumerate() {
        match by_location.get(location) {
            Some(&group) => {
                groups[group].demand += demands[index];
                groups[group].members.push(index);
            }
            None => {
                by_location.insert(location, groups.len());
                groups.push(MergedBuyer {
                    id: format!("{}-{}", location.province, location.isp),
                    location: location.clone(),
                    demand: demands[index],
                    members: vec![index],
                });
            }
        }
    }

    groups.sort_by(|a, b| b.demand.cmp(&a.demand));
    groups
}
