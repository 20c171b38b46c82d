// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bracken Broadphase: a retained-mode 2D collision broad-phase.
//!
//! Bracken Broadphase is the collision-facing layer over
//! [`bracken_quadtree`]: it keeps a world of rectangles with payloads and
//! flags, addressed by small generational handles, and answers the three
//! questions a physics or game loop asks every frame.
//!
//! - [`Broadphase::query_rect`]: which colliders overlap this viewport?
//! - [`Broadphase::pairs`]: which pairs of colliders currently intersect?
//! - [`Broadphase::nearest`]: which collider is closest to this rectangle?
//!
//! Colliders are inserted, moved, and removed in retained mode; the quadtree
//! of proxies stays in sync on every call. Geometry is [`kurbo::Rect`], so
//! the crate plugs directly into kurbo-based scene code.
//!
//! # Example
//!
//! ```rust
//! use bracken_broadphase::{Broadphase, ColliderFlags};
//! use kurbo::Rect;
//!
//! let mut bp: Broadphase<u32> = Broadphase::new(Rect::new(0.0, 0.0, 1000.0, 1000.0));
//!
//! let player = bp.insert(Rect::new(100.0, 100.0, 120.0, 120.0), 1).unwrap();
//! let crate_ = bp.insert(Rect::new(110.0, 110.0, 130.0, 130.0), 2).unwrap();
//! let wall = bp
//!     .insert_with_flags(
//!         Rect::new(0.0, 0.0, 10.0, 1000.0),
//!         3,
//!         ColliderFlags::ACTIVE | ColliderFlags::STATIC,
//!     )
//!     .unwrap();
//!
//! // The player overlaps the crate; the wall overlaps nothing.
//! let pairs = bp.pairs();
//! assert_eq!(pairs.len(), 1);
//!
//! // Move the player against the wall and the pair set follows.
//! bp.set_rect(player, Rect::new(5.0, 100.0, 25.0, 120.0));
//! let pairs = bp.pairs();
//! assert_eq!(pairs.len(), 1);
//! assert!(pairs[0] == (player, wall) || pairs[0] == (wall, player));
//!
//! // Viewport culling for rendering.
//! let visible = bp.query_rect(Rect::new(0.0, 0.0, 200.0, 200.0));
//! assert_eq!(visible.len(), 3);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod types;
pub mod world;

pub use types::{ColliderFlags, ColliderId};
pub use world::{Broadphase, OutOfWorld};
