// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only traversals: range query, intersection pairs, nearest-neighbor.

use alloc::vec::Vec;

use crate::tree::{Node, Quadtree, child_region};
use crate::types::{Box2D, Coord, distance};

impl<T, C, G, E> Quadtree<T, C, G, E>
where
    C: Coord,
    G: Fn(&T) -> Box2D<C>,
    E: Fn(&T, &T) -> bool,
{
    /// Collect copies of every stored item whose box intersects `query_box`.
    ///
    /// Children are visited only when their region intersects the query, and
    /// each item lives in exactly one node, so no deduplication happens.
    pub fn query(&self, query_box: &Box2D<C>) -> Vec<T>
    where
        T: Clone,
    {
        let mut found = Vec::new();
        if query_box.intersects(&self.world()) {
            Self::query_at(
                self.get_box_fn(),
                self.root(),
                self.world(),
                query_box,
                &mut found,
            );
        }
        found
    }

    fn query_at(
        get_box: &G,
        node: &Node<T>,
        region: Box2D<C>,
        query_box: &Box2D<C>,
        found: &mut Vec<T>,
    ) where
        T: Clone,
    {
        debug_assert!(query_box.intersects(&region));
        for value in &node.values {
            if query_box.intersects(&get_box(value)) {
                found.push(value.clone());
            }
        }
        if !node.is_leaf() {
            for i in 0..4 {
                let child = child_region(&region, i);
                if query_box.intersects(&child) {
                    Self::query_at(get_box, node.child(i), child, query_box, found);
                }
            }
        }
    }

    /// Report every unordered pair of stored items whose boxes intersect,
    /// each pair exactly once.
    ///
    /// Pairs within one bucket are walked upper-triangle; pairs spanning
    /// levels are found by testing each item against the buckets of its
    /// node's descendants. Exactly one of the two holds for any pair, which
    /// is what makes the report duplicate-free.
    pub fn find_all_intersections(&self) -> Vec<(T, T)>
    where
        T: Clone,
    {
        let mut pairs = Vec::new();
        Self::intersections_at(self.get_box_fn(), self.root(), &mut pairs);
        pairs
    }

    fn intersections_at(get_box: &G, node: &Node<T>, pairs: &mut Vec<(T, T)>)
    where
        T: Clone,
    {
        for i in 0..node.values.len() {
            for j in 0..i {
                if get_box(&node.values[i]).intersects(&get_box(&node.values[j])) {
                    pairs.push((node.values[i].clone(), node.values[j].clone()));
                }
            }
        }
        if !node.is_leaf() {
            for i in 0..4 {
                for value in &node.values {
                    Self::descendant_intersections(get_box, node.child(i), value, pairs);
                }
            }
            for i in 0..4 {
                Self::intersections_at(get_box, node.child(i), pairs);
            }
        }
    }

    fn descendant_intersections(get_box: &G, node: &Node<T>, value: &T, pairs: &mut Vec<(T, T)>)
    where
        T: Clone,
    {
        let value_box = get_box(value);
        for other in &node.values {
            if value_box.intersects(&get_box(other)) {
                pairs.push((value.clone(), other.clone()));
            }
        }
        if !node.is_leaf() {
            for i in 0..4 {
                Self::descendant_intersections(get_box, node.child(i), value, pairs);
            }
        }
    }

    /// The stored item whose box is closest to `search_box`, or `None` on an
    /// empty tree. Ties go to the first item found at the minimum distance.
    pub fn find_closest(&self, search_box: &Box2D<C>) -> Option<&T> {
        self.find_closest_with(search_box, |_, _| true)
    }

    /// Like [`find_closest`](Self::find_closest), restricted to items the
    /// predicate accepts (the predicate also receives the item's box).
    ///
    /// Branch and bound: subtrees whose region is already farther than the
    /// best candidate are pruned, and children are visited nearest-first so
    /// the bound tightens early. The initial bound is the world box's linear
    /// extent, so any stored item beats it.
    pub fn find_closest_with<P>(&self, search_box: &Box2D<C>, predicate: P) -> Option<&T>
    where
        P: Fn(&T, &Box2D<C>) -> bool,
    {
        let world = self.world();
        let bound = C::add(C::abs(world.width), C::abs(world.height));
        Self::closest_at(
            self.get_box_fn(),
            self.root(),
            world,
            search_box,
            (None, bound),
            &predicate,
        )
        .0
    }

    fn closest_at<'a, P>(
        get_box: &G,
        node: &'a Node<T>,
        region: Box2D<C>,
        search_box: &Box2D<C>,
        mut best: (Option<&'a T>, C),
        predicate: &P,
    ) -> (Option<&'a T>, C)
    where
        P: Fn(&T, &Box2D<C>) -> bool,
    {
        if distance(search_box, &region) > best.1 {
            return best;
        }

        for value in &node.values {
            let value_box = get_box(value);
            let d = distance(&value_box, search_box);
            if d < best.1 && predicate(value, &value_box) {
                best = (Some(value), d);
            }
        }

        // Which side of each bisector the search box's center falls on,
        // computed as 2*left + width to stay division-free.
        let rl = usize::from(
            C::add(C::add(search_box.left, search_box.left), search_box.width)
                > C::add(C::add(region.left, region.left), region.width),
        );
        let bt = usize::from(
            C::add(C::add(search_box.top, search_box.top), search_box.height)
                > C::add(C::add(region.top, region.top), region.height),
        );
        // Nearest quadrant first, then the two adjacent ones, the diagonal
        // opposite last.
        let order = [
            bt * 2 + rl,
            bt * 2 + (1 - rl),
            (1 - bt) * 2 + rl,
            (1 - bt) * 2 + (1 - rl),
        ];

        if !node.is_leaf() {
            for i in order {
                best = Self::closest_at(
                    get_box,
                    node.child(i),
                    child_region(&region, i),
                    search_box,
                    best,
                    predicate,
                );
            }
        }
        best
    }
}
