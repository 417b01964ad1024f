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

//! # Ballast Match
//!
//! The greedy price-tier matching engine. Given suppliers, buyers, and an
//! affinity table, it produces a deterministic allocation that fills cheap
//! price tiers first, spreads each buyer's demand across suppliers in
//! proportion to their priority, and keeps onboarding suppliers until a
//! configurable target count is reached.
//!
//! The engine is single-threaded, synchronous, and infallible: an infeasible
//! instance terminates normally with unmet demand reported in the plan's
//! residual ledger. For fixed inputs (including input order) and a fixed
//! configuration, the output is byte-identical across runs.

pub mod config;
pub mod greedy;
