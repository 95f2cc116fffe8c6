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

use std::collections::{BTreeSet, btree_set};

use tracing::debug;

use crate::{
    geometry::{
        bvh::{Bvh, NodeId},
        triangle::Triangle,
        tri_tri_intersect::PairPredicate,
    },
    numeric::scalar::Scalar,
};

/// Indices of triangles that intersect at least one other triangle.
///
/// Iterates in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntersectionSet {
    indices: BTreeSet<usize>,
}

impl IntersectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: usize) -> bool {
        self.indices.insert(index)
    }

    /// Record both sides of an intersecting pair.
    pub fn insert_pair(&mut self, a: usize, b: usize) {
        self.indices.insert(a);
        self.indices.insert(b);
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, usize> {
        self.indices.iter()
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.indices.iter().copied().collect()
    }
}

impl FromIterator<usize> for IntersectionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        IntersectionSet {
            indices: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for IntersectionSet {
    type Item = usize;
    type IntoIter = btree_set::IntoIter<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.into_iter()
    }
}

impl<'a> IntoIterator for &'a IntersectionSet {
    type Item = &'a usize;
    type IntoIter = btree_set::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter()
    }
}

enum Visit {
    /// Every pair with both triangles under this node.
    Within(NodeId),
    /// Every pair with one triangle under each node.
    Across(NodeId, NodeId),
}

#[derive(Debug, Default)]
struct Counters {
    visits: usize,
    pruned: usize,
    predicate_calls: usize,
}

/// Collect into `results` every triangle that intersects another one under
/// `a` or `b`: pairs inside `a`, pairs inside `b`, and pairs across the two.
///
/// Cross pairs are pruned wherever the two bounding boxes are further apart
/// than the predicate's [`margin`](PairPredicate::margin).
pub fn traverse<T, P>(
    bvh: &Bvh<T>,
    a: NodeId,
    b: NodeId,
    predicate: &P,
    results: &mut IntersectionSet,
) where
    T: Scalar,
    P: PairPredicate<T> + ?Sized,
{
    let stack = vec![Visit::Across(a, b), Visit::Within(b), Visit::Within(a)];
    run(bvh, stack, predicate, results);
}

/// Every triangle in `bvh` that intersects another one, under the default
/// tolerance.
pub fn find_intersecting<T: Scalar>(bvh: &Bvh<T>) -> IntersectionSet {
    let predicate = crate::geometry::tri_tri_intersect::TriTriIntersector::default();
    find_intersecting_with(bvh, &predicate)
}

#[tracing::instrument(skip_all, fields(tri_count = bvh.len()))]
pub fn find_intersecting_with<T, P>(bvh: &Bvh<T>, predicate: &P) -> IntersectionSet
where
    T: Scalar,
    P: PairPredicate<T> + ?Sized,
{
    let mut results = IntersectionSet::new();
    let root = bvh.root();
    match bvh.node(root).children() {
        Some((left, right)) => traverse(bvh, left, right, predicate, &mut results),
        // a single leaf at the root only has its own pairs to check
        None => run(bvh, vec![Visit::Within(root)], predicate, &mut results),
    }
    results
}

fn run<T, P>(bvh: &Bvh<T>, mut stack: Vec<Visit>, predicate: &P, results: &mut IntersectionSet)
where
    T: Scalar,
    P: PairPredicate<T> + ?Sized,
{
    let mut counters = Counters::default();
    let pad = predicate.margin(bvh.longest_edge());

    while let Some(visit) = stack.pop() {
        counters.visits += 1;
        match visit {
            Visit::Within(id) => match bvh.node(id).children() {
                Some((left, right)) => {
                    stack.push(Visit::Across(left, right));
                    stack.push(Visit::Within(right));
                    stack.push(Visit::Within(left));
                }
                None => {
                    let tris = bvh.node_triangles(id);
                    for (i, t1) in tris.iter().enumerate() {
                        for t2 in &tris[i + 1..] {
                            test_pair(t1, t2, predicate, results, &mut counters);
                        }
                    }
                }
            },
            Visit::Across(a, b) => {
                let (na, nb) = (bvh.node(a), bvh.node(b));
                if !na.aabb.overlaps_within(&nb.aabb, pad) {
                    counters.pruned += 1;
                    continue;
                }

                match (na.children(), nb.children()) {
                    (None, None) => {
                        for t1 in bvh.node_triangles(a) {
                            for t2 in bvh.node_triangles(b) {
                                test_pair(t1, t2, predicate, results, &mut counters);
                            }
                        }
                    }
                    (None, Some((bl, br))) => {
                        stack.push(Visit::Across(a, bl));
                        stack.push(Visit::Across(a, br));
                    }
                    (Some((al, ar)), None) => {
                        stack.push(Visit::Across(al, b));
                        stack.push(Visit::Across(ar, b));
                    }
                    (Some((al, ar)), Some((bl, br))) => {
                        stack.push(Visit::Across(al, bl));
                        stack.push(Visit::Across(al, br));
                        stack.push(Visit::Across(ar, bl));
                        stack.push(Visit::Across(ar, br));
                    }
                }
            }
        }
    }

    debug!(
        visits = counters.visits,
        pruned = counters.pruned,
        predicate_calls = counters.predicate_calls,
        margin = ?pad,
        found = results.len(),
        "traversal finished"
    );
}

#[inline]
fn test_pair<T, P>(
    t1: &Triangle<T>,
    t2: &Triangle<T>,
    predicate: &P,
    results: &mut IntersectionSet,
    counters: &mut Counters,
) where
    T: Scalar,
    P: PairPredicate<T> + ?Sized,
{
    counters.predicate_calls += 1;
    if predicate.intersects(t1, t2) {
        results.insert_pair(t1.index, t2.index);
    }
}

/// Test every unordered pair once. Quadratic; the reference answer for
/// [`find_intersecting_with`].
pub fn find_intersecting_brute_force<T, P>(triangles: &[Triangle<T>], predicate: &P) -> IntersectionSet
where
    T: Scalar,
    P: PairPredicate<T> + ?Sized,
{
    let mut results = IntersectionSet::new();
    for (i, t1) in triangles.iter().enumerate() {
        for t2 in &triangles[i + 1..] {
            if predicate.intersects(t1, t2) {
                results.insert_pair(t1.index, t2.index);
            }
        }
    }
    results
}
