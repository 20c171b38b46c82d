// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics.
//!
//! Build a small tree, run a range query, report intersecting pairs, and
//! find the nearest item to a probe box.
//!
//! Run:
//! - `cargo run -p bracken_demos --example quadtree_basics`

use bracken_quadtree::{Box2D, Quadtree};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Entity {
    id: u32,
    bounds: Box2D<f32>,
}

fn main() {
    let mut tree = Quadtree::new(Box2D::new(0.0_f32, 0.0, 1000.0, 1000.0), |e: &Entity| {
        e.bounds
    });

    // A loose diagonal of entities, some overlapping their neighbor.
    for i in 0..20 {
        let offset = i as f32 * 30.0;
        tree.insert(Entity {
            id: i,
            bounds: Box2D::new(offset, offset, 40.0, 40.0),
        })
        .unwrap();
    }
    println!("tree: {tree:?}");

    // Everything in the top-left 200x200 viewport.
    let visible = tree.query(&Box2D::new(0.0, 0.0, 200.0, 200.0));
    println!("visible entities: {:?}", visible.iter().map(|e| e.id).collect::<Vec<_>>());

    // Broad-phase pairs: each neighbor pair overlaps by 10 units.
    let pairs = tree.find_all_intersections();
    println!("intersecting pairs: {}", pairs.len());
    assert_eq!(pairs.len(), 19);

    // Nearest entity to a probe box in the middle of the world.
    let probe = Box2D::new(500.0, 400.0, 10.0, 10.0);
    let nearest = tree.find_closest(&probe).expect("tree is not empty");
    println!("nearest to probe: entity {}", nearest.id);
}
