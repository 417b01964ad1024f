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

//! # Ballast Bandwidth
//!
//! The CDN bandwidth scheduling facade over the ballast matching engine.
//! It turns node/view JSON documents into suppliers and buyers in integer
//! bandwidth tokens, derives per-pair affinities from the geographic distance
//! score, runs the greedy matcher, and assembles the allocation document and
//! a run summary.
//!
//! On top of the core match it provides ISP-scoped supply/demand balancing
//! (`scale`), same-location view merging (`merge`), and the score-threshold
//! affinity policy (`policy`). All of it is a deterministic driver: the same
//! inputs produce the same allocation document byte for byte.

pub mod doc;
pub mod driver;
pub mod error;
pub mod io;
pub mod merge;
pub mod options;
pub mod policy;
pub mod scale;
pub mod units;
