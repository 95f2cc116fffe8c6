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

pub mod aabb;
pub mod bvh;
pub mod bvh_traversal;
pub mod tri_tri_intersect;
pub mod triangle;
pub mod vector_3;

pub use aabb::Aabb;
pub use bvh::{Bvh, BvhConfig, BvhNode, NodeId};
pub use bvh_traversal::{
    IntersectionSet, find_intersecting, find_intersecting_brute_force, find_intersecting_with,
    traverse,
};
pub use tri_tri_intersect::{PairPredicate, TriTriIntersector, tri_tri_intersects};
pub use triangle::{Triangle, TriangleBatch};
pub use vector_3::{Vector3, VectorOps};
