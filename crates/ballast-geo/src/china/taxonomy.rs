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

//! The fixed regional taxonomy of Chinese provinces.
//!
//! Provinces partition into regions; regions form an undirected neighbor
//! graph stored as a bit matrix. Three non-exclusive province classes feed
//! the scoring ladder: *central* (economically central), *normal* (a
//! superset of central), and *frontier*.

use fixedbitset::FixedBitSet;
use std::collections::{HashMap, HashSet};

/// A region tag. Provinces map onto exactly one region; locations with an
/// unrecognized province fall into `Unknown`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Unknown,
    Northeast,
    North,
    NorthCentral,
    SouthCentral,
    East,
    South,
    Northwest,
    Southwest,
    Xinjiang,
    Xizang,
    Taiwan,
    HongKongMacao,
    China,
}

impl Region {
    /// The number of region tags, including `Unknown`.
    pub const COUNT: usize = 14;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

const REGION_PROVINCES: &[(Region, &[&str])] = &[
    (Region::Northeast, &["辽宁", "吉林", "黑龙江"]),
    (Region::North, &["河北", "北京", "天津", "山西", "内蒙古"]),
    (Region::NorthCentral, &["山东", "河南"]),
    (Region::SouthCentral, &["湖北", "湖南"]),
    (Region::East, &["江苏", "安徽", "浙江", "江西", "福建", "上海"]),
    (Region::South, &["广东", "广西", "海南"]),
    (Region::Northwest, &["陕西", "宁夏", "甘肃", "青海"]),
    (Region::Southwest, &["四川", "云南", "贵州", "重庆"]),
    (Region::Xinjiang, &["新疆"]),
    (Region::Xizang, &["西藏"]),
    (Region::Taiwan, &["台湾"]),
    (Region::HongKongMacao, &["香港", "澳门"]),
    (Region::China, &["中国"]),
];

/// Undirected region adjacency. Isolated regions have no entries.
const REGION_NEIGHBORS: &[(Region, Region)] = &[
    (Region::Northeast, Region::North),
    (Region::North, Region::NorthCentral),
    (Region::North, Region::Northwest),
    (Region::NorthCentral, Region::SouthCentral),
    (Region::NorthCentral, Region::East),
    (Region::NorthCentral, Region::Northwest),
    (Region::SouthCentral, Region::East),
    (Region::SouthCentral, Region::South),
    (Region::SouthCentral, Region::Southwest),
    (Region::East, Region::South),
    (Region::South, Region::Southwest),
];

const CENTRAL_PROVINCES: &[&str] = &[
    "北京", "天津", "河北", "山西", "山东", "河南", "湖北", "湖南", "江苏", "安徽", "浙江",
    "江西", "福建", "上海", "广东", "广西", "中国",
];

const EXTRA_NORMAL_PROVINCES: &[&str] = &["辽宁", "陕西", "四川", "重庆", "贵州"];

const FRONTIER_PROVINCES: &[&str] = &["新疆", "西藏"];

/// The assembled province tables: region membership, region adjacency, and
/// the central/normal/frontier classes. Immutable after construction.
#[derive(Clone, Debug)]
pub struct ChinaTaxonomy {
    region_of: HashMap<&'static str, Region>,
    adjacency: FixedBitSet,
    central: HashSet<&'static str>,
    normal: HashSet<&'static str>,
    frontier: HashSet<&'static str>,
}

impl Default for ChinaTaxonomy {
    fn default() -> Self {
        Self::new()
    }
}

impl ChinaTaxonomy {
    pub fn new() -> Self {
        let mut region_of = HashMap::new();
        for &(region, provinces) in REGION_PROVINCES {
            for &province in provinces {
                region_of.insert(province, region);
            }
        }

        let mut adjacency = FixedBitSet::with_capacity(Region::COUNT * Region::COUNT);
        for &(a, b) in REGION_NEIGHBORS {
            adjacency.insert(a.index() * Region::COUNT + b.index());
            adjacency.insert(b.index() * Region::COUNT + a.index());
        }

        let central: HashSet<&'static str> = CENTRAL_PROVINCES.iter().copied().collect();
        let mut normal = central.clone();
        normal.extend(EXTRA_NORMAL_PROVINCES.iter().copied());
        let frontier: HashSet<&'static str> = FRONTIER_PROVINCES.iter().copied().collect();

        Self {
            region_of,
            adjacency,
            central,
            normal,
            frontier,
        }
    }

    /// Returns the region a canonical province belongs to, or
    /// `Region::Unknown` for unrecognized names.
    #[inline]
    pub fn region_of(&self, province: &str) -> Region {
        self.region_of.get(province).copied().unwrap_or(Region::Unknown)
    }

    /// Whether two regions are neighbors. Adjacency is symmetric and
    /// irreflexive.
    #[inline]
    pub fn adjacent(&self, a: Region, b: Region) -> bool {
        self.adjacency.contains(a.index() * Region::COUNT + b.index())
    }

    #[inline]
    pub fn is_central(&self, province: &str) -> bool {
        self.central.contains(province)
    }

    #[inline]
    pub fn is_normal(&self, province: &str) -> bool {
        self.normal.contains(province)
    }

    #[inline]
    pub fn is_frontier(&self, province: &str) -> bool {
        self.frontier.contains(province)
    }
}
