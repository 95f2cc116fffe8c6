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

//! Find every triangle in a batch that intersects at least one other triangle.
//!
//! The batch is indexed with a surface-area-heuristic BVH ([`build_index`]),
//! then the two halves of the tree are walked together, pruning by bounding
//! box, and only leaf pairs reach the exact predicate ([`find_intersecting`]).
//!
//! ```
//! use tribvh::{TriangleBatch, Vector3, build_index, find_intersecting};
//!
//! let v = |x: f64, y: f64, z: f64| Vector3::new(x, y, z);
//! let mut batch = TriangleBatch::new();
//! batch.push(v(0.0, 0.0, 0.0), v(5.0, 0.0, 0.0), v(0.0, 5.0, 0.0));
//! batch.push(v(1.0, 1.0, 0.0), v(2.0, 2.0, 0.0), v(1.0, 2.0, 0.0));
//! batch.push(v(9.0, 9.0, 9.0), v(10.0, 9.0, 9.0), v(9.0, 10.0, 9.0));
//!
//! let bvh = build_index(batch.into_vec()).unwrap();
//! assert_eq!(find_intersecting(&bvh).to_vec(), vec![0, 1]);
//! ```

pub mod error;
pub mod geometry;
pub mod io;
pub mod numeric;

pub use error::{Error, Result};
pub use geometry::{
    Aabb, Bvh, BvhConfig, BvhNode, IntersectionSet, NodeId, PairPredicate, TriTriIntersector,
    Triangle, TriangleBatch, Vector3, VectorOps, find_intersecting,
    find_intersecting_brute_force, find_intersecting_with, traverse,
};
pub use numeric::Scalar;

/// Build the BVH over `triangles`. Fails with [`Error::EmptyInput`] when the
/// batch is empty.
pub fn build_index<T: Scalar>(triangles: Vec<Triangle<T>>) -> Result<Bvh<T>> {
    Bvh::build(triangles)
}

/// Test a single pair with the default tolerance, without building a tree.
pub fn pair_intersects<T: Scalar>(t1: &Triangle<T>, t2: &Triangle<T>) -> bool {
    geometry::tri_tri_intersects(t1, t2)
}
