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
    china::taxonomy::ChinaTaxonomy,
    location::{DistScore, DistScorer, Location},
};

/// The distance-score ladder over canonical Chinese locations.
///
/// Rules (first match wins):
///
/// | condition | score | local |
/// |---|---|---|
/// | same ISP, same province | 10 | true |
/// | same ISP, same region | 20 | |
/// | same ISP, server normal, server region neighbors client region | 30 | |
/// | same ISP, both provinces central | 40 | |
/// | same ISP, server normal | 50 | |
/// | same ISP, server not frontier | 60 | |
/// | same ISP | 70 | |
/// | different ISP, server normal, same province | 60 | |
/// | otherwise | 80 | |
///
/// The ladder is intentionally asymmetric: the normal/central/frontier bands
/// are evaluated on the *server* side, so swapping client and server may
/// change the score. Inputs are expected to be normalized; raw tags score
/// through the unknown-province bands.
pub struct ChinaScorer {
    taxonomy: ChinaTaxonomy,
}

impl Default for ChinaScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChinaScorer {
    pub fn new() -> Self {
        Self {
            taxonomy: ChinaTaxonomy::new(),
        }
    }
}

impl DistScorer for ChinaScorer {
    fn dist_score(&self, client: &Location, server: &Location) -> DistScore {
        let client_region = self.taxonomy.region_of(&client.province);
        let server_region = self.taxonomy.region_of(&server.province);

        if client.isp == server.isp {
            if client.province == server.province {
                return DistScore::new(10.0, true);
            }

            if client_region == server_region {
                return DistScore::remote(20.0);
            }

            if self.taxonomy.is_normal(&server.province)
                && self.taxonomy.adjacent(client_region, server_region)
            {
                return DistScore::remote(30.0);
            }

            if self.taxonomy.is_central(&client.province)
                && self.taxonomy.is_central(&server.province)
            {
                return DistScore::remote(40.0);
            }

            if self.taxonomy.is_normal(&server.province) {
                return DistScore::remote(50.0);
            }

            if !self.taxonomy.is_frontier(&server.province) {
                return DistScore::remote(60.0);
            }

            return DistScore::remote(70.0);
        }

        if self.taxonomy.is_normal(&server.province) && client.province == server.province {
            return DistScore::remote(60.0);
        }

        DistScore::remote(80.0)
    }
}
