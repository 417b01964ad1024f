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

//! # Ballast Model
//!
//! **The Core Domain Model for the Ballast Supply/Demand Matcher.**
//!
//! This crate defines the fundamental data structures used to represent a
//! bounded-capacity matching problem: capacity-bearing **suppliers**,
//! demand-bearing **buyers**, and the per-pair **affinity** (a price plus an
//! optional purchase limit) that a matching engine consumes. It serves as the
//! data interchange layer between the problem definition (user input) and the
//! matching engine (`ballast_match`).
//!
//! ## Architecture
//!
//! The crate is designed around a strict separation of concerns between
//! **construction** and **matching**:
//!
//! * **`index`**: Provides strongly-typed wrappers (`SupplierIndex`,
//!   `BuyerIndex`) to prevent logical indexing errors.
//! * **`num`**: The `MatchQuantity` trait alias for the integer quantity types
//!   the engine is generic over.
//! * **`entity`**: Immutable `Supplier` and `Buyer` value objects.
//! * **`affinity`**: The per-pair policy surface: `Affinity`, the `BuyLimit`
//!   variants, and the `AffinityTable` trait.
//! * **`plan`**: Defines the output format, including per-buyer allocation
//!   records and the residual capacity/demand ledgers.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Indices are distinct types. You cannot accidentally
//!     use a `SupplierIndex` to access a buyer.
//! 2.  **Immutable Inputs**: Suppliers and buyers carry no mutable residual
//!     fields; all residual state lives in the matcher's own ledger and is
//!     returned as part of the `MatchPlan`.
//! 3.  **Fail-Fast**: Constructors validate inputs eagerly so the engine never
//!     encounters an invalid state.

pub mod affinity;
pub mod entity;
pub mod index;
pub mod num;
pub mod plan;
