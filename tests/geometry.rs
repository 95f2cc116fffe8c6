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

use tribvh::geometry::{Triangle, TriangleBatch, Vector3, VectorOps};

#[test]
fn test_vector_cross_and_dot() {
    let x = Vector3::new(1.0, 0.0, 0.0);
    let y = Vector3::new(0.0, 1.0, 0.0);
    assert_eq!(x.cross(&y), Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(y.cross(&x), Vector3::new(0.0, 0.0, -1.0));
    assert_eq!(x.dot(&y), 0.0);
    assert_eq!(Vector3::new(1.0, 2.0, 3.0).dot(&Vector3::new(4.0, 5.0, 6.0)), 32.0);
}

#[test]
fn test_vector_arithmetic() {
    let a = Vector3::new(1.0, 2.0, 3.0);
    let b = Vector3::new(0.5, -1.0, 2.0);
    assert_eq!(a + b, Vector3::new(1.5, 1.0, 5.0));
    assert_eq!(a - b, Vector3::new(0.5, 3.0, 1.0));
    assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
    assert_eq!(a / 2.0, Vector3::new(0.5, 1.0, 1.5));
    assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
    assert_eq!(a[0], 1.0);
    assert_eq!(a[2], 3.0);
}

#[test]
fn test_normalize() {
    let v = Vector3::<f64>::new(3.0, 0.0, 4.0);
    assert_eq!(v.norm(), 5.0);
    let n = v.normalized();
    assert!((n.norm() - 1.0).abs() < 1e-12);
    assert_eq!(n, Vector3::new(0.6, 0.0, 0.8));
}

#[test]
fn test_normalize_zero_is_zero() {
    let n = Vector3::<f64>::zero().normalized();
    assert_eq!(n, Vector3::zero());
    assert!(!n.x.is_nan() && !n.y.is_nan() && !n.z.is_nan());

    let n32 = Vector3::<f32>::zero().normalized();
    assert!(n32.is_zero());
}

#[test]
fn test_triangle_normal_and_centroid() {
    let t = Triangle::new(
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(3.0, 0.0, 0.0),
        Vector3::new(0.0, 3.0, 0.0),
    );
    assert_eq!(t.normal(), Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(t.centroid(), Vector3::new(1.0, 1.0, 0.0));
    assert_eq!(t.area(), 4.5);

    let aabb = t.aabb();
    assert_eq!(aabb.min, Vector3::new(0.0, 0.0, 0.0));
    assert_eq!(aabb.max, Vector3::new(3.0, 3.0, 0.0));
}

#[test]
fn test_degenerate_triangle_normal_is_zero() {
    let p = Vector3::new(2.0, 0.5, 0.0);
    assert!(Triangle::new(p, p, p).normal().is_zero());

    let line = Triangle::new(
        Vector3::new(3.0, 1.0, 0.0),
        Vector3::new(4.0, 4.0, 0.0),
        Vector3::new(5.0, 7.0, 0.0),
    );
    assert!(line.normal().is_zero());
    assert_eq!(line.area(), 0.0);
}

#[test]
fn test_batch_assigns_ordinal_indices() {
    let v = |x: f64| Vector3::new(x, 0.0, 0.0);
    let mut batch = TriangleBatch::new();
    assert!(batch.is_empty());
    assert_eq!(batch.push(v(0.0), v(1.0), v(2.0)), 0);
    assert_eq!(batch.push(v(3.0), v(4.0), v(5.0)), 1);
    assert_eq!(batch.push(v(6.0), v(7.0), v(8.0)), 2);

    let indices: Vec<usize> = batch.iter().map(|t| t.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(batch.as_slice()[1].a, v(3.0));

    let collected: TriangleBatch<f64> = (0..4)
        .map(|i| [v(i as f64), v(i as f64 + 1.0), v(i as f64 + 2.0)])
        .collect();
    assert_eq!(collected.len(), 4);
    assert_eq!(collected.into_vec()[3].index, 3);
}
