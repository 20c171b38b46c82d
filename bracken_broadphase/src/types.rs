// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the broad-phase: collider handles and flags.

/// Identifier for a collider (generational).
///
/// A small, copyable handle made of a slot index and a generation counter.
/// It stays stable while the collider is alive and becomes invalid when the
/// collider is removed; if the slot is later reused, the generation is
/// incremented, so a stale `ColliderId` never aliases a different live
/// collider. Use [`Broadphase::is_alive`](crate::Broadphase::is_alive) to
/// check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ColliderId(pub(crate) u32, pub(crate) u32);

impl ColliderId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Collider flags controlling query participation and pair reporting.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ColliderFlags: u8 {
        /// Collider participates in queries, pair reports, and nearest search.
        const ACTIVE = 0b0000_0001;
        /// Collider is scenery that never initiates motion; pairs of two
        /// static colliders are not reported.
        const STATIC = 0b0000_0010;
    }
}

impl Default for ColliderFlags {
    fn default() -> Self {
        Self::ACTIVE
    }
}
