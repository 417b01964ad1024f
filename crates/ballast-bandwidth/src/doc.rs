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

//! JSON document types for the node, view, and allocation files.

use crate::error::BandwidthError;
use ballast_geo::location::Location;
use serde::{Deserialize, Serialize};

/// One edge node of the node file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NodeRecord {
    pub node: String,
    #[serde(default)]
    pub isp: String,
    #[serde(default)]
    pub province: String,
    /// Sellable bandwidth in Gbps.
    #[serde(default)]
    pub bw: f64,
    /// Allocation weight; three decimal places are significant.
    #[serde(default)]
    pub priority: f64,
    /// Restricts the node to same-ISP same-province views.
    #[serde(default)]
    pub local_only: bool,
}

/// One demand view of the view file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ViewRecord {
    pub view: String,
    #[serde(default)]
    pub isp: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    /// Demanded bandwidth in Gbps.
    #[serde(default)]
    pub bw: Option<f64>,
    /// Demanded fraction of a run-wide total bandwidth.
    #[serde(default)]
    pub percent: Option<f64>,
}

impl ViewRecord {
    /// Returns the view's raw location.
    ///
    /// Explicit `isp`/`province` fields win; otherwise the location is
    /// derived from the view name, which must be `-`-separated in one of the
    /// accepted shapes: `Province-ISP` (2 segments) or
    /// `_-Province-_-ISP-_-_` (6 segments).
    pub fn location(&self) -> Result<Location, BandwidthError> {
        if let (Some(isp), Some(province)) = (&self.isp, &self.province) {
            return Ok(Location::new(isp.clone(), province.clone()));
        }

        let segments: Vec<&str> = self.view.split('-').collect();
        match segments.len() {
            2 => Ok(Location::new(segments[1], segments[0])),
            6 => Ok(Location::new(segments[3], segments[1])),
            _ => Err(BandwidthError::InvalidViewName(self.view.clone())),
        }
    }
}

/// The allocation output document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocDoc {
    pub views: Vec<AllocView>,
}

/// The allocation of a single view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocView {
    pub name: String,
    /// The view's demand in the output unit.
    pub demand: i64,
    pub groups: Vec<AllocGroup>,
}

/// One supplier group of an allocation: `nodes_weight[i]` is the amount
/// granted by `nodes[i]`, in the output unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocGroup {
    pub nodes: Vec<String>,
    #[serde(rename = "nodesWeight")]
    pub nodes_weight: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_record_defaults() {
        let node: NodeRecord = serde_json::from_str(r#"{"node": "n1"}"#).unwrap();
        assert_eq!(node.node, "n1");
        assert_eq!(node.isp, "");
        assert_eq!(node.province, "");
        assert_eq!(node.bw, 0.0);
        assert_eq!(node.priority, 0.0);
        assert!(!node.local_only);
    }

    #[test]
    fn test_node_record_full() {
        let node: NodeRecord = serde_json::from_str(
            r#"{"node": "n1", "isp": "telecom", "province": "beijing", "bw": 1.5,
                "priority": 1.25, "local_only": true}"#,
        )
        .unwrap();
        assert_eq!(node.bw, 1.5);
        assert!(node.local_only);
    }

    #[test]
    fn test_view_location_from_fields() {
        let view: ViewRecord = serde_json::from_str(
            r#"{"view": "v1", "isp": "telecom", "province": "beijing", "bw": 1.0}"#,
        )
        .unwrap();
        assert_eq!(view.location().unwrap(), Location::new("telecom", "beijing"));
    }

    #[test]
    fn test_view_location_from_two_segment_name() {
        let view: ViewRecord = serde_json::from_str(r#"{"view": "广东-电信", "bw": 1.0}"#).unwrap();
        assert_eq!(view.location().unwrap(), Location::new("电信", "广东"));
    }

    #[test]
    fn test_view_location_from_six_segment_name() {
        let view: ViewRecord =
            serde_json::from_str(r#"{"view": "默认-广东-华南-移动-中国-亚洲", "percent": 0.1}"#)
                .unwrap();
        assert_eq!(view.location().unwrap(), Location::new("移动", "广东"));
    }

    #[test]
    fn test_view_location_rejects_other_shapes() {
        let view: ViewRecord = serde_json::from_str(r#"{"view": "a-b-c"}"#).unwrap();
        assert!(matches!(
            view.location(),
            Err(BandwidthError::InvalidViewName(name)) if name == "a-b-c"
        ));
    }

    #[test]
    fn test_alloc_doc_field_names() {
        let doc = AllocDoc {
            views: vec![AllocView {
                name: "广东-电信".to_owned(),
                demand: 1000,
                groups: vec![AllocGroup {
                    nodes: vec!["n1".to_owned()],
                    nodes_weight: vec![1000],
                }],
            }],
        };

        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains(r#""nodesWeight":[1000]"#));
        assert!(json.contains(r#""demand":1000"#));

        let parsed: AllocDoc = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }
}
