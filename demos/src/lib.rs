// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Example-only crate. See the `examples/` directory; run one with
//! `cargo run -p bracken_demos --example quadtree_basics`.
