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

//! Canonicalization of raw ISP and province tags.
//!
//! Inputs are lowercased, then mapped through fixed alias tables (full
//! names, pinyin, and two-letter abbreviations all map to the canonical
//! Chinese short name). Values absent from the tables pass through
//! unchanged, so unknown localities still compare equal to themselves.

use crate::{
    china::taxonomy::ChinaTaxonomy,
    location::{Location, LocationUnifier},
};
use std::collections::HashMap;

const ISP_ALIASES: &[(&str, &[&str])] = &[
    ("移动", &["中国移动", "mobile", "cmcc"]),
    ("电信", &["中国电信", "telecom", "ctcc"]),
    ("联通", &["中国联通", "unicom", "cucc"]),
];

const PROVINCE_ALIASES: &[(&str, &[&str])] = &[
    ("安徽", &["安徽省", "anhui", "ah"]),
    ("北京", &["北京市", "beijing", "bj"]),
    ("重庆", &["重庆市", "chongqing", "cq"]),
    ("福建", &["福建省", "fujian", "fj"]),
    ("甘肃", &["甘肃省", "gansu", "gs"]),
    ("广东", &["广东省", "guangdong", "gd"]),
    ("广西", &["广西壮族自治区", "guangxi", "gx"]),
    ("贵州", &["贵州省", "guizhou", "gz"]),
    ("海南", &["海南省", "hainan", "hi"]),
    ("河北", &["河北省", "hebei", "he"]),
    ("河南", &["河南省", "henan", "ha"]),
    ("黑龙江", &["黑龙江省", "heilongjiang", "hl"]),
    ("湖北", &["湖北省", "hubei", "hb"]),
    ("湖南", &["湖南省", "hunan", "hn"]),
    ("吉林", &["吉林省", "jilin", "jl"]),
    ("江苏", &["江苏省", "jiangsu", "js"]),
    ("江西", &["江西省", "jiangxi", "jx"]),
    ("辽宁", &["辽宁省", "liaoning", "ln"]),
    ("内蒙古", &["内蒙古自治区", "neimenggu", "nm"]),
    ("宁夏", &["宁夏回族自治区", "ningxia", "nx"]),
    ("青海", &["青海省", "qinghai", "qh"]),
    ("山东", &["山东省", "shandong", "sd"]),
    ("山西", &["山西省", "shanxi", "sx"]),
    ("陕西", &["陕西省", "shaanxi", "sn"]),
    ("上海", &["上海市", "shanghai", "sh"]),
    ("四川", &["四川省", "sichuan", "sc"]),
    ("天津", &["天津市", "tianjin", "tj"]),
    ("西藏", &["西藏自治区", "xizang", "xz", "tibet"]),
    ("新疆", &["新疆维吾尔自治区", "xinjiang", "xj"]),
    ("云南", &["云南省", "yunnan", "yn"]),
    ("浙江", &["浙江省", "zhejiang", "zj"]),
    ("澳门", &["澳门特别行政区", "macao", "mo", "aomen"]),
    ("香港", &["香港特别行政区", "hongkong", "hk", "xianggang"]),
    ("台湾", &["台湾省", "taiwan", "tw"]),
];

/// The canonical unifier for Chinese localities.
pub struct ChinaUnifier {
    isp_alias: HashMap<&'static str, &'static str>,
    province_alias: HashMap<&'static str, &'static str>,
    taxonomy: ChinaTaxonomy,
}

impl Default for ChinaUnifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChinaUnifier {
    pub fn new() -> Self {
        Self {
            isp_alias: build_alias_map(ISP_ALIASES),
            province_alias: build_alias_map(PROVINCE_ALIASES),
            taxonomy: ChinaTaxonomy::new(),
        }
    }
}

fn build_alias_map(
    aliases: &'static [(&'static str, &'static [&'static str])],
) -> HashMap<&'static str, &'static str> {
    let mut map = HashMap::new();
    for &(canonical, names) in aliases {
        for &name in names {
            let previous = map.insert(name, canonical);
            debug_assert!(previous.is_none(), "repeated alias: {}", name);
        }
    }
    map
}

impl LocationUnifier for ChinaUnifier {
    fn unify(&self, location: &Location, _server: bool) -> Location {
        let isp = location.isp.to_lowercase();
        let isp = match self.isp_alias.get(isp.as_str()) {
            Some(&canonical) => canonical.to_owned(),
            None => isp,
        };

        let province = location.province.to_lowercase();
        let province = match self.province_alias.get(province.as_str()) {
            Some(&canonical) => canonical.to_owned(),
            None => province,
        };

        Location { isp, province }
    }

    fn in_normal(&self, location: &Location) -> bool {
        self.taxonomy.is_normal(&location.province)
    }

    fn in_central(&self, location: &Location) -> bool {
        self.taxonomy.is_central(&location.province)
    }

    fn in_frontier(&self, location: &Location) -> bool {
        self.taxonomy.is_frontier(&location.province)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unify(isp: &str, province: &str) -> Location {
        ChinaUnifier::new().unify(&Location::new(isp, province), false)
    }

    #[test]
    fn test_pinyin_aliases() {
        assert_eq!(unify("telecom", "beijing"), Location::new("电信", "北京"));
        assert_eq!(unify("unicom", "shanghai"), Location::new("联通", "上海"));
        assert_eq!(unify("mobile", "xinjiang"), Location::new("移动", "新疆"));
    }

    #[test]
    fn test_abbreviations_and_full_names() {
        assert_eq!(unify("cmcc", "bj"), Location::new("移动", "北京"));
        assert_eq!(unify("中国电信", "广西壮族自治区"), Location::new("电信", "广西"));
        assert_eq!(unify("ctcc", "tibet"), Location::new("电信", "西藏"));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(unify("TELECOM", "BeiJing"), Location::new("电信", "北京"));
    }

    #[test]
    fn test_canonical_names_pass_through() {
        assert_eq!(unify("电信", "北京"), Location::new("电信", "北京"));
    }

    #[test]
    fn test_unknown_values_pass_through_lowercased() {
        assert_eq!(unify("SomeISP", "atlantis"), Location::new("someisp", "atlantis"));
        assert_eq!(unify("", ""), Location::new("", ""));
    }

    #[test]
    fn test_class_predicates() {
        let unifier = ChinaUnifier::new();
        assert!(unifier.in_central(&Location::new("电信", "北京")));
        assert!(unifier.in_normal(&Location::new("电信", "四川")));
        assert!(!unifier.in_central(&Location::new("电信", "四川")));
        assert!(unifier.in_frontier(&Location::new("电信", "新疆")));
        assert!(!unifier.in_normal(&Location::new("电信", "西藏")));
    }
}
