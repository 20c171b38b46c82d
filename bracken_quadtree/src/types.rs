// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry: the coordinate scalar, 2D vectors, and boxes.

use core::fmt::Debug;
use core::ops::{Add, Sub};

/// Coordinate scalar abstraction for the quadtree.
///
/// The trait provides the handful of operations the tree and its distance
/// metric need, as explicit associated functions rather than operator bounds.
/// It is implemented for `f32` and `f64`. Integer scalars are not supported:
/// the box-to-box metric takes a square root in the coordinate type itself,
/// and the nearest-neighbor bound is a linear extent in the same type.
///
/// Float inputs are assumed to be finite (no NaNs). Debug builds may assert.
pub trait Coord: Copy + PartialOrd + Debug {
    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Multiply two scalar values.
    fn mul(a: Self, b: Self) -> Self;

    /// Half of the value (used for child regions and box centers).
    fn halve(v: Self) -> Self;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Absolute value.
    fn abs(v: Self) -> Self;

    /// Square root (diagonal cases of the box metric).
    fn sqrt(v: Self) -> Self;
}

impl Coord for f32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn mul(a: Self, b: Self) -> Self {
        a * b
    }

    #[inline]
    fn halve(v: Self) -> Self {
        0.5 * v
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn abs(v: Self) -> Self {
        libm::fabsf(v)
    }

    #[inline]
    fn sqrt(v: Self) -> Self {
        libm::sqrtf(v)
    }
}

impl Coord for f64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn mul(a: Self, b: Self) -> Self {
        a * b
    }

    #[inline]
    fn halve(v: Self) -> Self {
        0.5 * v
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn abs(v: Self) -> Self {
        libm::fabs(v)
    }

    #[inline]
    fn sqrt(v: Self) -> Self {
        libm::sqrt(v)
    }
}

/// A 2D vector of coordinate scalars.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vec2<C> {
    /// Horizontal component.
    pub x: C,
    /// Vertical component.
    pub y: C,
}

impl<C> Vec2<C> {
    /// Create a vector from its components.
    pub const fn new(x: C, y: C) -> Self {
        Self { x, y }
    }
}

impl<C: Coord> Vec2<C> {
    /// Component-wise half of the vector.
    pub fn halve(self) -> Self {
        Self::new(C::halve(self.x), C::halve(self.y))
    }
}

impl<C: Coord> Add for Vec2<C> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(C::add(self.x, rhs.x), C::add(self.y, rhs.y))
    }
}

impl<C: Coord> Sub for Vec2<C> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(C::sub(self.x, rhs.x), C::sub(self.y, rhs.y))
    }
}

/// An axis-aligned box given by its top-left corner and size.
///
/// `width` and `height` must be non-negative. y grows downward, so `bottom`
/// is the greater of the two vertical edges.
///
/// Two predicates with deliberately different edge semantics back the whole
/// tree: [`contains`](Self::contains) is non-strict on all four sides, while
/// [`intersects`](Self::intersects) treats boxes whose edges merely touch as
/// separated. The quadrant classifier and the query descent both rely on this
/// asymmetry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Box2D<C> {
    /// Minimum x (left edge).
    pub left: C,
    /// Minimum y (top edge).
    pub top: C,
    /// Horizontal extent. Must be non-negative.
    pub width: C,
    /// Vertical extent. Must be non-negative.
    pub height: C,
}

impl<C> Box2D<C> {
    /// Create a box from its top-left corner and size.
    pub const fn new(left: C, top: C, width: C, height: C) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a box from a position vector and a size vector.
    pub fn from_position_size(position: Vec2<C>, size: Vec2<C>) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }
}

impl<C: Coord> Box2D<C> {
    /// Maximum x (right edge).
    pub fn right(&self) -> C {
        C::add(self.left, self.width)
    }

    /// Maximum y (bottom edge).
    pub fn bottom(&self) -> C {
        C::add(self.top, self.height)
    }

    /// The top-left corner.
    pub fn top_left(&self) -> Vec2<C> {
        Vec2::new(self.left, self.top)
    }

    /// The center point.
    pub fn center(&self) -> Vec2<C> {
        Vec2::new(
            C::add(self.left, C::halve(self.width)),
            C::add(self.top, C::halve(self.height)),
        )
    }

    /// The size as a vector.
    pub fn size(&self) -> Vec2<C> {
        Vec2::new(self.width, self.height)
    }

    /// Whether `other` lies fully inside this box. Non-strict: a box sharing
    /// an edge with this one is still contained.
    pub fn contains(&self, other: &Self) -> bool {
        self.left <= other.left
            && other.right() <= self.right()
            && self.top <= other.top
            && other.bottom() <= self.bottom()
    }

    /// Whether the two boxes overlap with positive area on both axes.
    /// Strict: boxes that only touch along an edge or corner do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.left >= other.right()
            || self.right() <= other.left
            || self.top >= other.bottom()
            || self.bottom() <= other.top)
    }
}

/// Euclidean distance between the closest pair of points on two boxes.
///
/// Zero when the boxes overlap or touch. Otherwise one of nine regions
/// applies: on the four diagonals the distance runs corner to corner and
/// takes a square root; straight to one side it is the axial gap alone.
pub fn distance<C: Coord>(a: &Box2D<C>, b: &Box2D<C>) -> C {
    let ar = a.right();
    let ab = a.bottom();
    let br = b.right();
    let bb = b.bottom();

    if ar < b.left && ab < b.top {
        diagonal(C::sub(b.left, ar), C::sub(b.top, ab))
    } else if a.left > br && ab < b.top {
        diagonal(C::sub(a.left, br), C::sub(b.top, ab))
    } else if a.left > br && a.top > bb {
        diagonal(C::sub(a.left, br), C::sub(a.top, bb))
    } else if ar < b.left && a.top > bb {
        diagonal(C::sub(b.left, ar), C::sub(a.top, bb))
    } else if ar < b.left {
        C::sub(b.left, ar)
    } else if ab < b.top {
        C::sub(b.top, ab)
    } else if a.left > br {
        C::sub(a.left, br)
    } else if a.top > bb {
        C::sub(a.top, bb)
    } else {
        C::zero()
    }
}

#[inline]
fn diagonal<C: Coord>(dx: C, dy: C) -> C {
    C::sqrt(C::add(C::mul(dx, dx), C::mul(dy, dy)))
}
