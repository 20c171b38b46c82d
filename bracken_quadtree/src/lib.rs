// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bracken Quadtree: a generic region quadtree over axis-aligned boxes.
//!
//! Bracken Quadtree is a reusable building block for broad-phase collision
//! detection, picking, and viewport culling in 2D worlds with fixed bounds.
//!
//! - Indexes items of any type `T` by an axis-aligned box recovered through a
//!   caller-supplied extractor; removal identity is a caller-supplied
//!   equality predicate (defaulting to `PartialEq`).
//! - Range queries by box overlap, bulk intersection-pair reports, and
//!   nearest-neighbor search against a rectangle with branch-and-bound
//!   pruning.
//! - Generic over the coordinate scalar (`f32` or `f64`) via the [`Coord`]
//!   trait; no geometry-crate dependency, so higher layers choose their own.
//!
//! The world box is fixed at construction. Each stored item lives in exactly
//! one node: the deepest node whose region fully contains the item's box. A
//! leaf splits into four children once it would exceed [`THRESHOLD`] items
//! (unless it sits at [`MAX_DEPTH`]), and removals collapse a node's children
//! back when their aggregate fits again. Items straddling a child boundary
//! stay at the parent, so queries never need deduplication.
//!
//! ## Edge semantics
//!
//! [`Box2D::contains`] is edge-inclusive while [`Box2D::intersects`] treats
//! touching edges as separated. Queries inherit this: a query box that only
//! grazes an item's edge does not report it.
//!
//! ## Example
//!
//! ```rust
//! use bracken_quadtree::{Box2D, Quadtree};
//!
//! // Items carry an id and a box; the extractor recovers the box.
//! let mut tree = Quadtree::new(
//!     Box2D::new(0.0_f32, 0.0, 100.0, 100.0),
//!     |item: &(u32, Box2D<f32>)| item.1,
//! );
//!
//! tree.insert((1, Box2D::new(10.0, 10.0, 8.0, 8.0))).unwrap();
//! tree.insert((2, Box2D::new(14.0, 14.0, 8.0, 8.0))).unwrap();
//! tree.insert((3, Box2D::new(70.0, 70.0, 8.0, 8.0))).unwrap();
//!
//! // Range query by overlap.
//! let hits = tree.query(&Box2D::new(0.0, 0.0, 30.0, 30.0));
//! assert_eq!(hits.len(), 2);
//!
//! // Every intersecting pair, each exactly once.
//! let pairs = tree.find_all_intersections();
//! assert_eq!(pairs.len(), 1);
//!
//! // Nearest stored item to a probe box.
//! let nearest = tree.find_closest(&Box2D::new(60.0, 60.0, 5.0, 5.0)).unwrap();
//! assert_eq!(nearest.0, 3);
//! ```
//!
//! ## Custom removal identity and filtered search
//!
//! ```rust
//! use bracken_quadtree::{Box2D, Quadtree};
//!
//! #[derive(Clone, Copy, Debug, PartialEq)]
//! struct Sprite {
//!     id: u32,
//!     bounds: Box2D<f64>,
//! }
//!
//! let mut tree = Quadtree::with_equal(
//!     Box2D::new(0.0, 0.0, 640.0, 480.0),
//!     |s: &Sprite| s.bounds,
//!     |a: &Sprite, b: &Sprite| a.id == b.id,
//! );
//!
//! tree.insert(Sprite { id: 1, bounds: Box2D::new(32.0, 32.0, 16.0, 16.0) }).unwrap();
//! tree.insert(Sprite { id: 2, bounds: Box2D::new(300.0, 200.0, 16.0, 16.0) }).unwrap();
//!
//! let probe = Box2D::new(40.0, 40.0, 4.0, 4.0);
//! let other = tree.find_closest_with(&probe, |s, _| s.id != 1).unwrap();
//! assert_eq!(other.id, 2);
//!
//! assert!(tree.remove(&Sprite { id: 1, bounds: Box2D::new(32.0, 32.0, 16.0, 16.0) }));
//! assert_eq!(tree.len(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod query;
pub mod tree;
pub mod types;

pub use tree::{MAX_DEPTH, OutOfBounds, Quadtree, THRESHOLD};
pub use types::{Box2D, Coord, Vec2, distance};
