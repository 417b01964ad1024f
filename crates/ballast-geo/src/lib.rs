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

//! # Ballast Geo
//!
//! Locational scoring substrate for the ballast matcher: canonicalization of
//! raw `(ISP, province)` tags, a fixed regional taxonomy of Chinese provinces
//! with a neighbor graph, and an integer-stepped distance score over ordered
//! `(client, server)` location pairs.
//!
//! The score ladder's numeric steps are a contract — affinity policies
//! threshold on them — and scores always fall in `{10, 20, 30, 40, 50, 60,
//! 70, 80}`. All scorers and unifiers are immutable after construction and
//! safe for concurrent reads.
//!
//! `overlay` provides wrappers that consult a user-supplied override
//! dictionary before falling through to a base implementation, for the odd
//! peering arrangement the static tables cannot know about.

pub mod china;
pub mod location;
pub mod overlay;
