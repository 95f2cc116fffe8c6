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

use num_traits::Float;

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

/// Coordinate type shared by every geometric primitive in the crate.
pub trait Scalar: Float + Debug + Display + Default + FromStr + Send + Sync + 'static {
    /// Tolerance used by the intersection predicate when none is given.
    fn tolerance() -> Self;

    fn from_num_den(num: i32, den: i32) -> Self;

    fn from_f64(v: f64) -> Self;
}

impl Scalar for f64 {
    fn tolerance() -> Self {
        1e-8
    }

    fn from_num_den(num: i32, den: i32) -> Self {
        num as f64 / den as f64
    }

    fn from_f64(v: f64) -> Self {
        v
    }
}

impl Scalar for f32 {
    // 1e-8 sits below f32 resolution for unit-scale coordinates.
    fn tolerance() -> Self {
        1e-6
    }

    fn from_num_den(num: i32, den: i32) -> Self {
        num as f32 / den as f32
    }

    fn from_f64(v: f64) -> Self {
        v as f32
    }
}
