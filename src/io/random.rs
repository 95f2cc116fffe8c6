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

use rand::Rng;

use crate::{
    geometry::{triangle::TriangleBatch, vector_3::Vector3},
    numeric::scalar::Scalar,
};

/// Shape of a random batch. Both fields are expected to be finite; a
/// non-positive value collapses that part of the draw to zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomBatchConfig {
    /// Centres are drawn from `[-extent, extent]^3`.
    pub extent: f64,
    /// Vertices sit within `[-size, size]^3` of their centre.
    pub size: f64,
}

impl Default for RandomBatchConfig {
    fn default() -> Self {
        RandomBatchConfig {
            extent: 100.0,
            size: 1.0,
        }
    }
}

/// `count` independent random triangles, indexed `0..count`.
pub fn random_triangles<T: Scalar, R: Rng>(
    count: usize,
    config: &RandomBatchConfig,
    rng: &mut R,
) -> TriangleBatch<T> {
    // sample the unit cube and scale, so no range handed to rand can overflow
    let mut draw = |half: f64| -> [f64; 3] {
        if half > 0.0 {
            [
                half * rng.random_range(-1.0..=1.0),
                half * rng.random_range(-1.0..=1.0),
                half * rng.random_range(-1.0..=1.0),
            ]
        } else {
            [0.0; 3]
        }
    };

    let mut batch = TriangleBatch::with_capacity(count);
    for _ in 0..count {
        let center = draw(config.extent);
        let mut vertex = || {
            let offset = draw(config.size);
            Vector3::new(
                T::from_f64(center[0] + offset[0]),
                T::from_f64(center[1] + offset[1]),
                T::from_f64(center[2] + offset[2]),
            )
        };
        let (a, b, c) = (vertex(), vertex(), vertex());
        batch.push(a, b, c);
    }
    batch
}
