// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The broad-phase world: slot storage, proxy tree, and queries.

use alloc::vec::Vec;

use bracken_quadtree::{Box2D, Quadtree};
use kurbo::Rect;

use crate::types::{ColliderFlags, ColliderId};

/// Error returned by [`Broadphase::insert`] when a collider rectangle is not
/// fully contained in the world rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("collider rect is not contained in the world rect")]
pub struct OutOfWorld;

/// Proxy stored in the quadtree. Payloads and flags stay in the slot table;
/// the tree only sees the id and a copy of the box.
#[derive(Copy, Clone, Debug)]
struct Proxy {
    id: ColliderId,
    aabb: Box2D<f64>,
}

fn proxy_box(p: &Proxy) -> Box2D<f64> {
    p.aabb
}

fn proxy_eq(a: &Proxy, b: &Proxy) -> bool {
    a.id == b.id
}

#[derive(Clone, Debug)]
struct Slot<P> {
    aabb: Box2D<f64>,
    payload: P,
    flags: ColliderFlags,
}

type ProxyTree = Quadtree<Proxy, f64, fn(&Proxy) -> Box2D<f64>, fn(&Proxy, &Proxy) -> bool>;

/// A retained-mode collision broad-phase over a fixed world rectangle.
///
/// Colliders are rectangles with a copyable payload and [`ColliderFlags`],
/// addressed by generational [`ColliderId`]s. Insertions, moves, and removals
/// keep a quadtree of proxies in sync, so viewport queries, intersection
/// pairs, and nearest-collider lookups stay cheap as the world fills up.
pub struct Broadphase<P: Copy> {
    slots: Vec<Option<Slot<P>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    tree: ProxyTree,
}

impl<P: Copy> Broadphase<P> {
    /// Create an empty broad-phase covering `world`.
    pub fn new(world: Rect) -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            tree: Quadtree::with_equal(
                rect_to_box(world),
                proxy_box as fn(&Proxy) -> Box2D<f64>,
                proxy_eq as fn(&Proxy, &Proxy) -> bool,
            ),
        }
    }

    /// The fixed world rectangle set at construction.
    pub fn world(&self) -> Rect {
        box_to_rect(&self.tree.world())
    }

    /// Number of live colliders.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the world holds no colliders.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Whether `id` refers to a live collider.
    pub fn is_alive(&self, id: ColliderId) -> bool {
        self.slot(id).is_some()
    }

    /// Insert a collider with default flags ([`ColliderFlags::ACTIVE`]).
    pub fn insert(&mut self, rect: Rect, payload: P) -> Result<ColliderId, OutOfWorld> {
        self.insert_with_flags(rect, payload, ColliderFlags::default())
    }

    /// Insert a collider with explicit flags. The rectangle must be fully
    /// contained in the world rectangle.
    pub fn insert_with_flags(
        &mut self,
        rect: Rect,
        payload: P,
        flags: ColliderFlags,
    ) -> Result<ColliderId, OutOfWorld> {
        let aabb = rect_to_box(rect);
        let idx = self.free_list.pop().unwrap_or_else(|| {
            self.slots.push(None);
            self.generations.push(0);
            self.slots.len() - 1
        });
        let generation = self.generations[idx] + 1;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "collider ids use 32-bit slot indices by design"
        )]
        let id = ColliderId::new(idx as u32, generation);
        if self.tree.insert(Proxy { id, aabb }).is_err() {
            self.free_list.push(idx);
            return Err(OutOfWorld);
        }
        self.generations[idx] = generation;
        self.slots[idx] = Some(Slot {
            aabb,
            payload,
            flags,
        });
        Ok(id)
    }

    /// Remove a collider. Returns false for stale or unknown ids.
    pub fn remove(&mut self, id: ColliderId) -> bool {
        let Some(aabb) = self.slot(id).map(|s| s.aabb) else {
            return false;
        };
        let removed = self.tree.remove(&Proxy { id, aabb });
        debug_assert!(removed, "slot table and proxy tree must agree");
        self.slots[id.idx()] = None;
        self.free_list.push(id.idx());
        true
    }

    /// Move a collider to a new rectangle. Returns false for stale ids or
    /// rectangles outside the world.
    pub fn set_rect(&mut self, id: ColliderId, rect: Rect) -> bool {
        let aabb = rect_to_box(rect);
        if !self.tree.world().contains(&aabb) {
            return false;
        }
        let Some(old) = self.slot(id).map(|s| s.aabb) else {
            return false;
        };
        let removed = self.tree.remove(&Proxy { id, aabb: old });
        debug_assert!(removed, "slot table and proxy tree must agree");
        let reinserted = self.tree.insert(Proxy { id, aabb }).is_ok();
        debug_assert!(reinserted, "containment was checked above");
        if let Some(slot) = self.slots[id.idx()].as_mut() {
            slot.aabb = aabb;
        }
        true
    }

    /// Replace a collider's flags. Returns false for stale ids.
    pub fn set_flags(&mut self, id: ColliderId, flags: ColliderFlags) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(slot) = self.slots[id.idx()].as_mut() {
            slot.flags = flags;
        }
        true
    }

    /// A live collider's rectangle.
    pub fn rect(&self, id: ColliderId) -> Option<Rect> {
        self.slot(id).map(|s| box_to_rect(&s.aabb))
    }

    /// A live collider's flags.
    pub fn flags(&self, id: ColliderId) -> Option<ColliderFlags> {
        self.slot(id).map(|s| s.flags)
    }

    /// A live collider's payload.
    pub fn payload(&self, id: ColliderId) -> Option<P> {
        self.slot(id).map(|s| s.payload)
    }

    /// Active colliders whose rectangles intersect `viewport`. Rectangles
    /// that merely touch the viewport edge are not reported.
    pub fn query_rect(&self, viewport: Rect) -> Vec<(ColliderId, P)> {
        self.tree
            .query(&rect_to_box(viewport))
            .into_iter()
            .filter_map(|p| {
                let slot = self.slot(p.id)?;
                slot.flags
                    .contains(ColliderFlags::ACTIVE)
                    .then_some((p.id, slot.payload))
            })
            .collect()
    }

    /// Every intersecting pair of active colliders, each pair exactly once.
    /// Pairs of two [`STATIC`](ColliderFlags::STATIC) colliders are skipped:
    /// scenery never collides with scenery.
    pub fn pairs(&self) -> Vec<(ColliderId, ColliderId)> {
        self.tree
            .find_all_intersections()
            .into_iter()
            .filter_map(|(a, b)| {
                let sa = self.slot(a.id)?;
                let sb = self.slot(b.id)?;
                let active = ColliderFlags::ACTIVE;
                if !sa.flags.contains(active) || !sb.flags.contains(active) {
                    return None;
                }
                if sa.flags.contains(ColliderFlags::STATIC)
                    && sb.flags.contains(ColliderFlags::STATIC)
                {
                    return None;
                }
                Some((a.id, b.id))
            })
            .collect()
    }

    /// The active collider nearest to `rect`, or `None` if the world has no
    /// active colliders.
    pub fn nearest(&self, rect: Rect) -> Option<(ColliderId, P)> {
        let probe = rect_to_box(rect);
        let found = self.tree.find_closest_with(&probe, |p, _| {
            self.slot(p.id)
                .map(|s| s.flags.contains(ColliderFlags::ACTIVE))
                .unwrap_or(false)
        })?;
        let slot = self.slot(found.id)?;
        Some((found.id, slot.payload))
    }

    fn slot(&self, id: ColliderId) -> Option<&Slot<P>> {
        let slot = self.slots.get(id.idx())?.as_ref()?;
        if self.generations[id.idx()] != id.1 {
            return None;
        }
        Some(slot)
    }
}

impl<P: Copy> core::fmt::Debug for Broadphase<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.slots.len();
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("Broadphase")
            .field("world", &self.world())
            .field("slots_total", &total)
            .field("alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

/// Convert a kurbo rectangle to the tree's box form, normalizing inverted
/// rectangles first.
fn rect_to_box(r: Rect) -> Box2D<f64> {
    let r = r.abs();
    Box2D::new(r.x0, r.y0, r.x1 - r.x0, r.y1 - r.y0)
}

fn box_to_rect(b: &Box2D<f64>) -> Rect {
    Rect::new(b.left, b.top, b.left + b.width, b.top + b.height)
}
