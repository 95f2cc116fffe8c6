// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use crate::{geometry::vector_3::Vector3, numeric::scalar::Scalar};

/// An axis‐aligned bounding box in 3 dimensions.
///
/// The empty box has `min = +inf` and `max = -inf` on every axis, so the first
/// [`expand`](Aabb::expand) snaps it onto the point and it never overlaps
/// anything.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb<T: Scalar> {
    pub min: Vector3<T>,
    pub max: Vector3<T>,
}

impl<T: Scalar> Default for Aabb<T> {
    fn default() -> Self {
        Aabb::empty()
    }
}

impl<T: Scalar> Aabb<T> {
    pub fn new(min: Vector3<T>, max: Vector3<T>) -> Self {
        Aabb { min, max }
    }

    pub fn empty() -> Self {
        Aabb {
            min: Vector3::splat(T::infinity()),
            max: Vector3::splat(T::neg_infinity()),
        }
    }

    pub fn min(&self) -> &Vector3<T> {
        &self.min
    }

    /// Access the maximum corner.
    pub fn max(&self) -> &Vector3<T> {
        &self.max
    }

    /// Build the smallest AABB containing two points.
    pub fn from_points(a: &Vector3<T>, b: &Vector3<T>) -> Self {
        Aabb::new(a.min(b), a.max(b))
    }

    /// True until the box has been expanded at least once.
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    /// Grow the box to include `p`.
    pub fn expand(&mut self, p: &Vector3<T>) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Tightest box containing both `a` and `b`.
    pub fn merge(a: &Aabb<T>, b: &Aabb<T>) -> Aabb<T> {
        Aabb::new(a.min.min(&b.min), a.max.max(&b.max))
    }

    pub fn union(&self, other: &Aabb<T>) -> Aabb<T> {
        Aabb::merge(self, other)
    }

    /// `2 * (dx*dy + dx*dz + dy*dz)`; zero for the empty box.
    pub fn surface_area(&self) -> T {
        if self.is_empty() {
            return T::zero();
        }
        let (dx, dy, dz) = (self.extent(0), self.extent(1), self.extent(2));
        T::from_num_den(2, 1) * (dx * dy + dx * dz + dy * dz)
    }

    /// Does this AABB overlap `other`? Boxes sharing a face count.
    pub fn overlaps(&self, other: &Aabb<T>) -> bool {
        self.overlaps_within(other, T::zero())
    }

    /// Like [`overlaps`](Aabb::overlaps), but boxes separated by at most `pad`
    /// on every axis also count. Empty boxes still overlap nothing.
    pub fn overlaps_within(&self, other: &Aabb<T>, pad: T) -> bool {
        for i in 0..3 {
            if other.max[i] + pad < self.min[i] || self.max[i] + pad < other.min[i] {
                return false;
            }
        }
        true
    }

    /// Is `other` fully inside this box?
    pub fn contains(&self, other: &Aabb<T>) -> bool {
        (0..3).all(|i| self.min[i] <= other.min[i] && other.max[i] <= self.max[i])
    }

    pub fn center(&self) -> Vector3<T> {
        (self.min + self.max) * T::from_num_den(1, 2)
    }

    /// Length along axis `i`.
    pub fn extent(&self, i: usize) -> T {
        self.max[i] - self.min[i]
    }

    /// Return the axis index with largest extent.
    pub fn longest_axis(&self) -> usize {
        let mut best_i = 0usize;
        let mut best = self.extent(0);
        for i in 1..3 {
            let e = self.extent(i);
            if e > best {
                best_i = i;
                best = e;
            }
        }
        best_i
    }
}
