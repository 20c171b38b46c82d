// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmark-only crate. See the `benches/` directory for the actual
//! benchmarks; run them with `cargo bench -p bracken_benches`.
