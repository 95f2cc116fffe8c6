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

use crate::{
    geometry::{
        triangle::Triangle,
        vector_3::{Vector3, VectorOps},
    },
    numeric::scalar::Scalar,
};

/// Decides whether two triangles intersect.
///
/// Implementations must be symmetric: `intersects(a, b) == intersects(b, a)`.
pub trait PairPredicate<T: Scalar> {
    fn intersects(&self, a: &Triangle<T>, b: &Triangle<T>) -> bool;

    /// Largest gap between two triangles that `intersects` may still accept,
    /// given the longest triangle edge in the batch. Box pruning pads every
    /// bounding box by this amount. Predicates that only accept real contact
    /// keep the default of zero.
    fn margin(&self, _longest_edge: T) -> T {
        T::zero()
    }
}

impl<T: Scalar, F> PairPredicate<T> for F
where
    F: Fn(&Triangle<T>, &Triangle<T>) -> bool,
{
    fn intersects(&self, a: &Triangle<T>, b: &Triangle<T>) -> bool {
        self(a, b)
    }
}

/// Tolerance-based triangle/triangle overlap test.
///
/// Touching counts as intersecting: shared vertices, shared edges and a vertex
/// resting on the other triangle all report `true`. Every comparison uses the
/// same `tolerance`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriTriIntersector<T: Scalar> {
    tolerance: T,
}

impl<T: Scalar> Default for TriTriIntersector<T> {
    fn default() -> Self {
        TriTriIntersector {
            tolerance: T::tolerance(),
        }
    }
}

impl<T: Scalar> TriTriIntersector<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(tolerance: T) -> Self {
        TriTriIntersector { tolerance }
    }

    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    /// Upper bound on the distance between two triangles this predicate
    /// accepts. A vertex may sit `sqrt(eps)` off the target plane, since the
    /// degenerate guard keeps `|v1 x v2| >= sqrt(eps)` while the volume test
    /// allows `eps`. The barycentric bounds let it sit a few `eps` edge
    /// lengths outside the target, and the degenerate fallback allows `eps`.
    pub fn margin(&self, longest_edge: T) -> T {
        let eps = self.tolerance;
        eps.sqrt() + eps * (T::one() + longest_edge * T::from_num_den(8, 1))
    }

    pub fn intersects(&self, t1: &Triangle<T>, t2: &Triangle<T>) -> bool {
        // 1) parallel planes only meet when they are the same plane
        if self.planes_parallel(t1, t2) && !self.coplanar(t1, t2) {
            return false;
        }

        // 2) edges of one triangle piercing the other
        if t1
            .edges()
            .iter()
            .any(|(origin, dir)| self.segment_hits_triangle(origin, dir, t2))
        {
            return true;
        }
        if t2
            .edges()
            .iter()
            .any(|(origin, dir)| self.segment_hits_triangle(origin, dir, t1))
        {
            return true;
        }

        // 3) vertices resting on or inside the other triangle
        if t1.vertices().iter().any(|p| self.point_in_triangle(p, t2)) {
            return true;
        }
        t2.vertices().iter().any(|p| self.point_in_triangle(p, t1))
    }

    fn planes_parallel(&self, t1: &Triangle<T>, t2: &Triangle<T>) -> bool {
        let d = t1.normal().dot(&t2.normal());
        d.abs() >= T::one() - self.tolerance
    }

    /// Plane offsets agree under either normal.
    fn coplanar(&self, t1: &Triangle<T>, t2: &Triangle<T>) -> bool {
        let same_offset = |n: &Vector3<T>| (n.dot(&t1.a) - n.dot(&t2.a)).abs() < self.tolerance;
        same_offset(&t2.normal()) || same_offset(&t1.normal())
    }

    /// Möller–Trumbore restricted to the finite segment `origin + t*dir`,
    /// `t` in `(eps, 1 - eps)`.
    fn segment_hits_triangle(
        &self,
        origin: &Vector3<T>,
        dir: &Vector3<T>,
        tri: &Triangle<T>,
    ) -> bool {
        let eps = self.tolerance;
        let edge1 = tri.b - tri.a;
        let edge2 = tri.c - tri.a;

        let h = dir.cross(&edge2);
        let det = edge1.dot(&h);
        if det.abs() < eps {
            // segment parallel to the plane, or degenerate target
            return false;
        }

        let f = T::one() / det;
        let s = *origin - tri.a;
        let u = f * s.dot(&h);
        if u < T::zero() || u > T::one() {
            return false;
        }

        let q = s.cross(&edge1);
        let v = f * dir.dot(&q);
        if v < T::zero() || u + v > T::one() {
            return false;
        }

        let t = f * edge2.dot(&q);
        t > eps && t < T::one() - eps
    }

    /// Coplanarity check followed by a barycentric inside test, boundary
    /// inclusive.
    fn point_in_triangle(&self, p: &Vector3<T>, tri: &Triangle<T>) -> bool {
        let eps = self.tolerance;
        let v1 = tri.b - tri.a;
        let v2 = tri.c - tri.a;
        let v3 = *p - tri.a;

        let volume = v1.dot(&v2.cross(&v3));
        if volume.abs() > eps {
            return false;
        }

        let dot00 = v1.dot(&v1);
        let dot01 = v1.dot(&v2);
        let dot02 = v1.dot(&v3);
        let dot11 = v2.dot(&v2);
        let dot12 = v2.dot(&v3);

        let denom = dot00 * dot11 - dot01 * dot01;
        if denom.abs() < eps {
            return self.point_on_degenerate(p, tri);
        }
        let inv_denom = T::one() / denom;

        let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
        let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;

        u >= -eps && v >= -eps && u + v <= T::one() + eps
    }

    /// A zero-area triangle is a segment or a point; test its edges directly.
    fn point_on_degenerate(&self, p: &Vector3<T>, tri: &Triangle<T>) -> bool {
        tri.edges()
            .iter()
            .any(|(start, dir)| self.point_on_segment(p, start, dir))
    }

    fn point_on_segment(&self, p: &Vector3<T>, start: &Vector3<T>, dir: &Vector3<T>) -> bool {
        let eps = self.tolerance;
        let rel = *p - *start;
        let len2 = dir.norm_squared();
        if len2 < eps * eps {
            return rel.norm() <= eps;
        }

        let t = rel.dot(dir) / len2;
        if t < -eps || t > T::one() + eps {
            return false;
        }
        let closest = *start + dir.scale(t.max(T::zero()).min(T::one()));
        (*p - closest).norm() <= eps
    }
}

impl<T: Scalar> PairPredicate<T> for TriTriIntersector<T> {
    fn intersects(&self, a: &Triangle<T>, b: &Triangle<T>) -> bool {
        TriTriIntersector::intersects(self, a, b)
    }

    fn margin(&self, longest_edge: T) -> T {
        TriTriIntersector::margin(self, longest_edge)
    }
}

/// [`TriTriIntersector`] with the default tolerance for `T`.
pub fn tri_tri_intersects<T: Scalar>(t1: &Triangle<T>, t2: &Triangle<T>) -> bool {
    TriTriIntersector::default().intersects(t1, t2)
}
