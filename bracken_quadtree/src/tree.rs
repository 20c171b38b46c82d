// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree structure and mutation: insert with split, remove with merge.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::types::{Box2D, Coord, Vec2};

/// Maximum number of items a leaf holds before it splits, below [`MAX_DEPTH`].
pub const THRESHOLD: usize = 16;

/// Maximum tree depth. Leaves at this depth grow without splitting.
pub const MAX_DEPTH: usize = 8;

/// A tree node: four optional owned children plus a local item bucket.
///
/// Either all four child slots are occupied (interior node) or none are
/// (leaf). The bucket is unordered; removal rearranges it by swap-and-pop.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) children: [Option<Box<Node<T>>>; 4],
    pub(crate) values: Vec<T>,
}

impl<T> Node<T> {
    fn new() -> Self {
        Self {
            children: [None, None, None, None],
            values: Vec::new(),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children[0].is_none()
    }

    pub(crate) fn child(&self, i: usize) -> &Self {
        self.children[i]
            .as_deref()
            .expect("interior node has four children")
    }

    fn child_mut(&mut self, i: usize) -> &mut Self {
        self.children[i]
            .as_deref_mut()
            .expect("interior node has four children")
    }
}

/// Classify `value_box` against the four quadrants of `node_box`.
///
/// Returns the quadrant index (NW=0, NE=1, SW=2, SE=3) when the box lies
/// strictly inside one quadrant, `None` when it straddles a bisector. The mix
/// of strict and non-strict comparisons partitions the plane without overlap
/// and must not be altered.
pub(crate) fn quadrant<C: Coord>(node_box: &Box2D<C>, value_box: &Box2D<C>) -> Option<usize> {
    let center = node_box.center();
    if value_box.right() < center.x {
        // West half.
        if value_box.bottom() < center.y {
            Some(0)
        } else if value_box.top >= center.y {
            Some(2)
        } else {
            None
        }
    } else if value_box.left >= center.x {
        // East half.
        if value_box.bottom() < center.y {
            Some(1)
        } else if value_box.top >= center.y {
            Some(3)
        } else {
            None
        }
    } else {
        None
    }
}

/// The region of child `i` of a node covering `region`. The four child boxes
/// exactly tile the parent.
pub(crate) fn child_region<C: Coord>(region: &Box2D<C>, i: usize) -> Box2D<C> {
    let origin = region.top_left();
    let size = region.size().halve();
    match i {
        // North-west.
        0 => Box2D::from_position_size(origin, size),
        // North-east.
        1 => Box2D::from_position_size(Vec2::new(C::add(origin.x, size.x), origin.y), size),
        // South-west.
        2 => Box2D::from_position_size(Vec2::new(origin.x, C::add(origin.y, size.y)), size),
        // South-east.
        3 => Box2D::from_position_size(origin + size, size),
        _ => unreachable!("child index out of range"),
    }
}

/// Error returned by [`Quadtree::insert`] when the item's box is not fully
/// contained in the world box. Carries the rejected item back to the caller.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("item box is not contained in the world box")]
pub struct OutOfBounds<T>(
    /// The rejected item.
    pub T,
);

/// A region quadtree indexing items by their axis-aligned boxes.
///
/// Each item lives in exactly one node: the deepest node whose region fully
/// contains the item's box, except that a leaf below [`MAX_DEPTH`] splits
/// once it would exceed [`THRESHOLD`] items, and items straddling a child
/// boundary stay at the parent.
///
/// The item's box is recovered through the stored `get_box` callable on every
/// traversal step, and `equal` is used only to locate items for removal. Both
/// are generic parameters, so user closures dispatch statically.
pub struct Quadtree<T, C, G, E = fn(&T, &T) -> bool>
where
    C: Coord,
    G: Fn(&T) -> Box2D<C>,
    E: Fn(&T, &T) -> bool,
{
    world: Box2D<C>,
    root: Node<T>,
    get_box: G,
    equal: E,
    len: usize,
}

fn partial_eq<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

impl<T, C, G> Quadtree<T, C, G>
where
    T: PartialEq,
    C: Coord,
    G: Fn(&T) -> Box2D<C>,
{
    /// Create an empty tree covering `world`, locating items for removal via
    /// their `PartialEq` implementation.
    pub fn new(world: Box2D<C>, get_box: G) -> Self {
        Self::with_equal(world, get_box, partial_eq::<T>)
    }
}

impl<T, C, G, E> Quadtree<T, C, G, E>
where
    C: Coord,
    G: Fn(&T) -> Box2D<C>,
    E: Fn(&T, &T) -> bool,
{
    /// Create an empty tree covering `world` with an explicit equality
    /// predicate, for item types whose removal identity is narrower than full
    /// equality (an id field, say).
    pub fn with_equal(world: Box2D<C>, get_box: G, equal: E) -> Self {
        debug_assert!(
            world.width >= C::zero() && world.height >= C::zero(),
            "world box must have non-negative size"
        );
        Self {
            world,
            root: Node::new(),
            get_box,
            equal,
            len: 0,
        }
    }

    /// The fixed outer box set at construction.
    pub fn world(&self) -> Box2D<C> {
        self.world
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop all items and collapse the tree to a single empty root.
    pub fn clear(&mut self) {
        self.root = Node::new();
        self.len = 0;
    }

    pub(crate) fn root(&self) -> &Node<T> {
        &self.root
    }

    pub(crate) fn get_box_fn(&self) -> &G {
        &self.get_box
    }

    /// Insert an item. The item's box must be fully contained in the world
    /// box; otherwise the item is handed back unchanged.
    pub fn insert(&mut self, value: T) -> Result<(), OutOfBounds<T>> {
        if !self.world.contains(&(self.get_box)(&value)) {
            return Err(OutOfBounds(value));
        }
        Self::insert_at(&self.get_box, &mut self.root, 0, self.world, value);
        self.len += 1;
        Ok(())
    }

    fn insert_at(get_box: &G, node: &mut Node<T>, depth: usize, region: Box2D<C>, value: T) {
        debug_assert!(region.contains(&get_box(&value)));
        if node.is_leaf() {
            if depth >= MAX_DEPTH || node.values.len() < THRESHOLD {
                node.values.push(value);
            } else {
                Self::split(get_box, node, &region);
                Self::insert_at(get_box, node, depth, region, value);
            }
        } else {
            match quadrant(&region, &get_box(&value)) {
                Some(i) => {
                    let child = child_region(&region, i);
                    Self::insert_at(get_box, node.child_mut(i), depth + 1, child, value);
                }
                // No child fully contains the box; it stays at this level.
                None => node.values.push(value),
            }
        }
    }

    /// Turn a leaf into an interior node, pushing each item with a definite
    /// quadrant into the matching child. Single level only: an overfull child
    /// is left as is and splits on a later insert.
    fn split(get_box: &G, node: &mut Node<T>, region: &Box2D<C>) {
        debug_assert!(node.is_leaf(), "only leaves can be split");
        for child in &mut node.children {
            *child = Some(Box::new(Node::new()));
        }
        let values = core::mem::take(&mut node.values);
        for value in values {
            match quadrant(region, &get_box(&value)) {
                Some(i) => node.child_mut(i).values.push(value),
                None => node.values.push(value),
            }
        }
    }

    /// Remove the first stored item that `equal` matches against `value`.
    ///
    /// Returns whether an item was removed. After a removal at a leaf, the
    /// leaf's direct parent is merged if its children's aggregate fits the
    /// threshold again; the merge never climbs further, so repeated removals
    /// can leave collapse opportunities higher up (the tree stays correct,
    /// just less compact).
    pub fn remove(&mut self, value: &T) -> bool {
        if !self.world.contains(&(self.get_box)(value)) {
            return false;
        }
        let removed = Self::remove_at(&self.get_box, &self.equal, &mut self.root, self.world, value);
        if removed {
            self.len -= 1;
        }
        removed
    }

    fn remove_at(
        get_box: &G,
        equal: &E,
        node: &mut Node<T>,
        region: Box2D<C>,
        value: &T,
    ) -> bool {
        debug_assert!(region.contains(&get_box(value)));
        if node.is_leaf() {
            return Self::remove_value(equal, node, value);
        }
        match quadrant(&region, &get_box(value)) {
            Some(i) => {
                let child = child_region(&region, i);
                let was_leaf = node.child(i).is_leaf();
                let removed = Self::remove_at(get_box, equal, node.child_mut(i), child, value);
                // Merge only at the direct parent of the removal leaf.
                if removed && was_leaf {
                    Self::try_merge(node);
                }
                removed
            }
            None => Self::remove_value(equal, node, value),
        }
    }

    fn remove_value(equal: &E, node: &mut Node<T>, value: &T) -> bool {
        match node.values.iter().position(|stored| equal(value, stored)) {
            Some(i) => {
                node.values.swap_remove(i);
                true
            }
            None => false,
        }
    }

    /// Collapse four leaf children back into `node` when their aggregate item
    /// count fits the threshold. Does nothing if any child is interior.
    fn try_merge(node: &mut Node<T>) {
        debug_assert!(!node.is_leaf(), "only interior nodes can be merged");
        let mut total = node.values.len();
        for i in 0..4 {
            let child = node.child(i);
            if !child.is_leaf() {
                return;
            }
            total += child.values.len();
        }
        if total <= THRESHOLD {
            node.values.reserve(total - node.values.len());
            for slot in &mut node.children {
                let mut child = slot.take().expect("interior node has four children");
                node.values.append(&mut child.values);
            }
        }
    }
}

impl<T, C, G, E> core::fmt::Debug for Quadtree<T, C, G, E>
where
    C: Coord,
    G: Fn(&T) -> Box2D<C>,
    E: Fn(&T, &T) -> bool,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Quadtree")
            .field("world", &self.world)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
impl<T, C, G, E> Quadtree<T, C, G, E>
where
    C: Coord,
    G: Fn(&T) -> Box2D<C>,
    E: Fn(&T, &T) -> bool,
{
    /// Walk the whole tree checking the structural invariants; panics on the
    /// first violation. Test-only.
    pub(crate) fn assert_invariants(&self) {
        let mut total = 0;
        Self::check_node(&self.get_box, &self.root, self.world, 0, &mut total);
        assert_eq!(total, self.len, "stored item count must match len");
    }

    fn check_node(
        get_box: &G,
        node: &Node<T>,
        region: Box2D<C>,
        depth: usize,
        total: &mut usize,
    ) {
        *total += node.values.len();
        for value in &node.values {
            assert!(
                region.contains(&get_box(value)),
                "every item must be contained in its node's region"
            );
        }
        let occupied = node.children.iter().filter(|c| c.is_some()).count();
        assert!(
            occupied == 0 || occupied == 4,
            "child slots must be all present or all absent"
        );
        if occupied == 0 {
            if depth < MAX_DEPTH {
                assert!(
                    node.values.len() <= THRESHOLD,
                    "leaves below max depth must fit the threshold"
                );
            }
        } else {
            for value in &node.values {
                assert!(
                    quadrant(&region, &get_box(value)).is_none(),
                    "items with a definite quadrant must be pushed down"
                );
            }
            for i in 0..4 {
                Self::check_node(get_box, node.child(i), child_region(&region, i), depth + 1, total);
            }
        }
    }
}
