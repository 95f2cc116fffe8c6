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
        aabb::Aabb,
        vector_3::{Vector3, VectorOps},
    },
    numeric::scalar::Scalar,
};

/// A triangle tagged with its position in the input batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle<T: Scalar> {
    pub a: Vector3<T>,
    pub b: Vector3<T>,
    pub c: Vector3<T>,
    pub index: usize,
}

impl<T: Scalar> Triangle<T> {
    /// A free-standing triangle with index 0. Use a [`TriangleBatch`] when
    /// the identity matters.
    pub fn new(a: Vector3<T>, b: Vector3<T>, c: Vector3<T>) -> Self {
        Self::with_index(a, b, c, 0)
    }

    pub fn with_index(a: Vector3<T>, b: Vector3<T>, c: Vector3<T>, index: usize) -> Self {
        Triangle { a, b, c, index }
    }

    pub fn vertices(&self) -> [Vector3<T>; 3] {
        [self.a, self.b, self.c]
    }

    /// Edges as (start, direction) pairs: a→b, b→c, c→a.
    pub fn edges(&self) -> [(Vector3<T>, Vector3<T>); 3] {
        [
            (self.a, self.b - self.a),
            (self.b, self.c - self.b),
            (self.c, self.a - self.c),
        ]
    }

    /// Unit normal, or zero for a degenerate triangle.
    pub fn normal(&self) -> Vector3<T> {
        (self.b - self.a).cross(&(self.c - self.a)).normalized()
    }

    pub fn centroid(&self) -> Vector3<T> {
        (self.a + self.b + self.c) / T::from_num_den(3, 1)
    }

    pub fn area(&self) -> T {
        (self.b - self.a).cross(&(self.c - self.a)).norm() * T::from_num_den(1, 2)
    }

    pub fn aabb(&self) -> Aabb<T> {
        let mut aabb = Aabb::empty();
        aabb.expand(&self.a);
        aabb.expand(&self.b);
        aabb.expand(&self.c);
        aabb
    }
}

/// Ordered triangle collection; each pushed triangle gets the next index.
#[derive(Debug, Clone, Default)]
pub struct TriangleBatch<T: Scalar> {
    triangles: Vec<Triangle<T>>,
}

impl<T: Scalar> TriangleBatch<T> {
    pub fn new() -> Self {
        TriangleBatch {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TriangleBatch {
            triangles: Vec::with_capacity(capacity),
        }
    }

    /// Append a triangle and return the index it was assigned.
    pub fn push(&mut self, a: Vector3<T>, b: Vector3<T>, c: Vector3<T>) -> usize {
        let index = self.triangles.len();
        self.triangles.push(Triangle::with_index(a, b, c, index));
        index
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn as_slice(&self) -> &[Triangle<T>] {
        &self.triangles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triangle<T>> {
        self.triangles.iter()
    }

    pub fn into_vec(self) -> Vec<Triangle<T>> {
        self.triangles
    }
}

impl<T: Scalar> FromIterator<[Vector3<T>; 3]> for TriangleBatch<T> {
    fn from_iter<I: IntoIterator<Item = [Vector3<T>; 3]>>(iter: I) -> Self {
        let mut batch = TriangleBatch::new();
        for [a, b, c] in iter {
            batch.push(a, b, c);
        }
        batch
    }
}

impl<T: Scalar> From<TriangleBatch<T>> for Vec<Triangle<T>> {
    fn from(batch: TriangleBatch<T>) -> Self {
        batch.triangles
    }
}
