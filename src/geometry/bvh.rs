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

use std::{cmp::Ordering, ops::Range};

use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    geometry::{aabb::Aabb, triangle::Triangle, vector_3::VectorOps},
    numeric::scalar::Scalar,
};

/// Ranges above this many triangles sample every `BIG_STRIDE`-th split.
const BIG_STRIDE: usize = 70;
const MIDDLE_STRIDE: usize = 10;
const SMALL_STRIDE: usize = 2;

/// Index of a node inside its [`Bvh`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Cost constants of the surface-area heuristic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BvhConfig<T: Scalar> {
    /// Fixed cost charged for every internal node.
    pub traversal_cost: T,
    /// Cost per triangle of imbalance between the two halves.
    pub balance_penalty: T,
}

impl<T: Scalar> Default for BvhConfig<T> {
    fn default() -> Self {
        BvhConfig {
            traversal_cost: T::from_num_den(2, 1),
            balance_penalty: T::from_num_den(1, 10),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BvhNode<T: Scalar> {
    pub aabb: Aabb<T>,
    children: Option<(NodeId, NodeId)>,
    range: Range<usize>,
}

impl<T: Scalar> BvhNode<T> {
    fn placeholder() -> Self {
        BvhNode {
            aabb: Aabb::empty(),
            children: None,
            range: 0..0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    pub fn left(&self) -> Option<NodeId> {
        self.children.map(|(l, _)| l)
    }

    pub fn right(&self) -> Option<NodeId> {
        self.children.map(|(_, r)| r)
    }

    /// Slice of [`Bvh::triangles`] covered by this node. For an internal node
    /// this is the union of its leaves.
    pub fn triangle_range(&self) -> Range<usize> {
        self.range.clone()
    }
}

/// Bounding volume hierarchy over a triangle batch.
///
/// Nodes live in one arena and refer to their children by [`NodeId`]; the
/// root is always `NodeId(0)`. Triangles are stored once, reordered so every
/// node covers a contiguous range.
#[derive(Clone, Debug)]
pub struct Bvh<T: Scalar> {
    nodes: Vec<BvhNode<T>>,
    triangles: Vec<Triangle<T>>,
    longest_edge: T,
}

struct Task {
    node: NodeId,
    start: usize,
    end: usize, // exclusive
}

impl<T: Scalar> Bvh<T> {
    pub fn build(triangles: Vec<Triangle<T>>) -> Result<Self> {
        Self::build_with(triangles, &BvhConfig::default())
    }

    #[tracing::instrument(skip_all, fields(tri_count = triangles.len()))]
    pub fn build_with(triangles: Vec<Triangle<T>>, config: &BvhConfig<T>) -> Result<Self> {
        if triangles.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut triangles = triangles;
        let n = triangles.len();
        let mut nodes = Vec::with_capacity(2 * n - 1);
        nodes.push(BvhNode::placeholder());

        let mut stack = vec![Task {
            node: NodeId(0),
            start: 0,
            end: n,
        }];

        while let Some(task) = stack.pop() {
            let range = &mut triangles[task.start..task.end];
            let aabb = bounds_of(range);

            let split = if range.len() == 1 {
                None
            } else {
                let split = find_best_split(range, &aabb, config);
                if split.is_none() {
                    trace!(count = range.len(), "no improving split, keeping leaf");
                }
                split
            };

            let Some(split) = split else {
                nodes[task.node.0] = BvhNode {
                    aabb,
                    children: None,
                    range: task.start..task.end,
                };
                continue;
            };

            let left = NodeId(nodes.len());
            let right = NodeId(left.0 + 1);
            nodes.push(BvhNode::placeholder());
            nodes.push(BvhNode::placeholder());

            nodes[task.node.0] = BvhNode {
                aabb,
                children: Some((left, right)),
                range: task.start..task.end,
            };

            let mid = task.start + split;
            stack.push(Task {
                node: right,
                start: mid,
                end: task.end,
            });
            stack.push(Task {
                node: left,
                start: task.start,
                end: mid,
            });
        }

        let longest_edge = longest_edge_of(&triangles);
        let bvh = Bvh {
            nodes,
            triangles,
            longest_edge,
        };
        debug!(
            nodes = bvh.node_count(),
            leaves = bvh.leaf_count(),
            depth = bvh.depth(),
            "built bvh"
        );
        Ok(bvh)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &BvhNode<T> {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[BvhNode<T>] {
        &self.nodes
    }

    /// All triangles, in tree order.
    pub fn triangles(&self) -> &[Triangle<T>] {
        &self.triangles
    }

    /// Triangles under `id`.
    pub fn node_triangles(&self, id: NodeId) -> &[Triangle<T>] {
        &self.triangles[self.node(id).range.clone()]
    }

    /// Number of triangles in the tree.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Length of the longest triangle edge in the tree.
    pub fn longest_edge(&self) -> T {
        self.longest_edge
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root(), 1usize)];
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Some((l, r)) = self.node(id).children {
                stack.push((l, depth + 1));
                stack.push((r, depth + 1));
            }
        }
        deepest
    }
}

fn bounds_of<T: Scalar>(triangles: &[Triangle<T>]) -> Aabb<T> {
    let mut aabb = Aabb::empty();
    for tri in triangles {
        aabb.expand(&tri.a);
        aabb.expand(&tri.b);
        aabb.expand(&tri.c);
    }
    aabb
}

fn longest_edge_of<T: Scalar>(triangles: &[Triangle<T>]) -> T {
    triangles
        .iter()
        .flat_map(|tri| tri.edges())
        .map(|(_, dir)| dir.norm())
        .fold(T::zero(), |longest, len| longest.max(len))
}

/// Fewer candidate splits are sampled for large ranges.
fn sampling_stride(len: usize) -> usize {
    if len > BIG_STRIDE * 2 {
        BIG_STRIDE
    } else if len > MIDDLE_STRIDE * 2 {
        MIDDLE_STRIDE
    } else if len > SMALL_STRIDE * 2 {
        SMALL_STRIDE
    } else {
        1
    }
}

/// Sort `range` by centroid along the longest axis of `aabb` and return the
/// split position with the lowest SAH cost, if any candidate produced a
/// finite cost.
fn find_best_split<T: Scalar>(
    range: &mut [Triangle<T>],
    aabb: &Aabb<T>,
    config: &BvhConfig<T>,
) -> Option<usize> {
    let n = range.len();
    let axis = aabb.longest_axis();
    range.sort_by(|p, q| {
        p.centroid()[axis]
            .partial_cmp(&q.centroid()[axis])
            .unwrap_or(Ordering::Equal)
    });

    // prefix[i]: area of [0, i]; suffix[i]: area of [i, n)
    let mut prefix = Vec::with_capacity(n);
    let mut running = Aabb::empty();
    for tri in range.iter() {
        running = running.union(&tri.aabb());
        prefix.push(running.surface_area());
    }
    let mut suffix = vec![T::zero(); n];
    running = Aabb::empty();
    for (i, tri) in range.iter().enumerate().rev() {
        running = running.union(&tri.aabb());
        suffix[i] = running.surface_area();
    }

    let parent_area = aabb.surface_area();
    let ratio = |area: T| {
        if parent_area > T::zero() {
            area / parent_area
        } else {
            T::zero()
        }
    };

    let mut best_cost = T::infinity();
    let mut best_split = None;
    for i in (sampling_stride(n)..n).step_by(sampling_stride(n)) {
        let left_count = T::from_f64(i as f64);
        let right_count = T::from_f64((n - i) as f64);
        let imbalance = T::from_f64(i.abs_diff(n - i) as f64);

        let cost = config.traversal_cost
            + ratio(prefix[i - 1]) * left_count
            + ratio(suffix[i]) * right_count
            + config.balance_penalty * imbalance;

        if cost < best_cost {
            best_cost = cost;
            best_split = Some(i);
        }
    }
    best_split
}
