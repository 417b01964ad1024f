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

use crate::CreateArgs;
use ballast_bandwidth::{
    driver::BandwidthMatcher, error::BandwidthError, io, options::ViewOptions, units::BwUnit,
};
use ballast_geo::china::{ChinaScorer, ChinaUnifier};

pub fn run(args: &CreateArgs) -> Result<(), BandwidthError> {
    if let Some(bw) = args.bw {
        if bw <= 0 {
            return Err(BandwidthError::InvalidOption(format!(
                "total bandwidth {} must be positive",
                bw
            )));
        }
    }

    let options = ViewOptions {
        enough_node_count: args.ecn,
        remote_access_score: args.ras,
        reject_score: args.rjs,
        remote_access_limit: args.ral,
        exclusive: args.exclusive,
        ..ViewOptions::default()
    };
    options.validate()?;

    let nodes = io::read_nodes(&args.node)?;
    let views = io::read_views(&args.view)?;

    let unit = if args.storage_mode {
        BwUnit::Storage
    } else {
        BwUnit::Cdn
    };
    let matcher = BandwidthMatcher::new(ChinaUnifier::new(), ChinaScorer::new())
        .with_options(options)
        .with_auto_scale(args.auto_scale)
        .with_auto_scale_bounds(args.auto_scale_min, args.auto_scale_max)
        .with_auto_merge_view(args.auto_merge_view)
        .with_unit(unit);

    let outcome = matcher.match_bandwidth(&nodes, &views, args.bw.map(|bw| bw as f64))?;

    io::write_allocs(&args.alloc, &outcome.allocs)?;

    let summary = &outcome.summary;
    println!(
        "nodes: {}, views: {}, needs: {}, has: {}",
        summary.nodes,
        summary.views,
        (summary.views_bw * 1000.0) as i64,
        (summary.nodes_bw * 1000.0) as i64
    );
    if !summary.scales.is_empty() {
        let mut scales: Vec<_> = summary.scales.iter().collect();
        scales.sort_by(|a, b| a.0.cmp(b.0));
        for (isp, scale) in scales {
            println!("scale {}: {:.3}", isp, scale);
        }
    }
    println!();

    if outcome.perfect {
        println!("perfect match");
    } else {
        for shortfall in &outcome.shortfalls {
            println!(
                "{} demand: {} demand_rest: {}",
                shortfall.view, shortfall.demand, shortfall.rest
            );
        }
        let needs: i64 = outcome.shortfalls.iter().map(|s| s.rest).sum();
        println!("total needs {}", needs);
    }
    println!();

    for leftover in &outcome.leftovers {
        println!(
            "{} {} {} cap: {} cap_rest: {}",
            leftover.isp, leftover.province, leftover.node, leftover.cap, leftover.rest
        );
    }
    let remains: i64 = outcome.leftovers.iter().map(|l| l.rest).sum();
    if remains > 0 {
        println!("total remains {}", remains);
    }

    Ok(())
}
