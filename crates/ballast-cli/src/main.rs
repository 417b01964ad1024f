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

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod create;

#[derive(Parser, Debug)]
#[command(name = "ballast", version, about = "Utility for working with bandwidth scheduling rings")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a scheduling ring allocation from node and view files
    #[clap(name = "create", alias = "c")]
    Create(CreateArgs),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// The input node.json
    #[arg(long = "node")]
    pub node: PathBuf,
    /// The input view.json
    #[arg(long = "view")]
    pub view: PathBuf,
    /// The output alloc.json
    #[arg(long = "alloc")]
    pub alloc: PathBuf,
    /// The total bandwidth [Gbps]; required for percent-shaped views
    #[arg(long = "bw")]
    pub bw: Option<i64>,
    /// The remote access score [20.0-80.0]
    #[arg(long = "ras", default_value_t = 50.0)]
    pub ras: f32,
    /// The reject score [ras-100.0]
    #[arg(long = "rjs", default_value_t = 80.0)]
    pub rjs: f32,
    /// The remote access limit [0.0-1.0]
    #[arg(long = "ral", default_value_t = 0.1)]
    pub ral: f64,
    /// The target node count per view
    #[arg(long = "ecn", default_value_t = 5)]
    pub ecn: usize,
    /// Scale each ISP's demand to its supply
    #[arg(long = "auto-scale")]
    pub auto_scale: bool,
    /// Lower bound of the auto-scale ratio
    #[arg(long = "auto-scale-min")]
    pub auto_scale_min: Option<f64>,
    /// Upper bound of the auto-scale ratio
    #[arg(long = "auto-scale-max")]
    pub auto_scale_max: Option<f64>,
    /// Merge views with the same location
    #[arg(long = "auto-merge-view")]
    pub auto_merge_view: bool,
    /// Assign each node to at most one view, at full capacity
    #[arg(long = "exclusive")]
    pub exclusive: bool,
    /// Storage scheduling mode (50 Mbps tokens, MBps weights)
    #[arg(long = "storage-mode")]
    pub storage_mode: bool,
    /// Verbose mode
    #[arg(short = 'v', long = "vv")]
    pub verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .target(env_logger::Target::Stdout)
        .init();
}

fn main() {
    let arguments = Arguments::parse();

    match arguments.command {
        Command::Create(args) => {
            init_logging(args.verbose);
            if let Err(e) = create::run(&args) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}
