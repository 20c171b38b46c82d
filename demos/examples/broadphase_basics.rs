// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Broadphase basics.
//!
//! Insert a few colliders, move one, and watch the pair set and viewport
//! query follow.
//!
//! Run:
//! - `cargo run -p bracken_demos --example broadphase_basics`

use bracken_broadphase::{Broadphase, ColliderFlags};
use kurbo::Rect;

fn main() {
    let mut bp: Broadphase<&str> = Broadphase::new(Rect::new(0.0, 0.0, 1000.0, 1000.0));

    let player = bp.insert(Rect::new(100.0, 100.0, 130.0, 130.0), "player").unwrap();
    let enemy = bp.insert(Rect::new(400.0, 400.0, 430.0, 430.0), "enemy").unwrap();
    let wall = bp
        .insert_with_flags(
            Rect::new(0.0, 0.0, 20.0, 1000.0),
            "wall",
            ColliderFlags::ACTIVE | ColliderFlags::STATIC,
        )
        .unwrap();
    println!("world: {bp:?}");

    // No contacts yet.
    println!("pairs: {:?}", bp.pairs());
    assert!(bp.pairs().is_empty());

    // Walk the player into the wall.
    bp.set_rect(player, Rect::new(10.0, 100.0, 40.0, 130.0));
    let pairs = bp.pairs();
    println!("pairs after moving: {pairs:?}");
    assert_eq!(pairs.len(), 1);

    // Cull to a viewport around the enemy.
    let visible = bp.query_rect(Rect::new(300.0, 300.0, 500.0, 500.0));
    println!(
        "visible near the enemy: {:?}",
        visible.iter().map(|(_, name)| *name).collect::<Vec<_>>()
    );
    assert_eq!(visible.len(), 1);

    // Who is closest to the enemy?
    let (id, name) = bp.nearest(Rect::new(400.0, 400.0, 430.0, 430.0)).unwrap();
    println!("nearest to the enemy: {name}");
    assert_eq!(id, enemy);
    let _ = wall;
}
