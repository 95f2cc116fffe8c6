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

use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    path::Path,
};

use crate::{
    error::{Error, Result},
    geometry::{bvh_traversal::IntersectionSet, triangle::TriangleBatch, vector_3::Vector3},
    numeric::scalar::Scalar,
};

/// Read a triangle batch.
/// Format:
///   <N>
///   x1 y1 z1 x2 y2 z2 x3 y3 z3   (N times)
/// Tokens may be split across lines arbitrarily; `#` starts a comment.
pub fn read_triangles<T: Scalar, R: BufRead>(reader: R) -> Result<TriangleBatch<T>> {
    let toks = tokenize(reader)?;
    let mut it = toks.iter().enumerate();

    let Some((pos, first)) = it.next() else {
        return Ok(TriangleBatch::new());
    };
    let count: usize = first.parse().map_err(|_| Error::Parse {
        position: pos,
        token: first.clone(),
    })?;

    let expected = count.checked_mul(9).ok_or_else(|| Error::Parse {
        position: pos,
        token: first.clone(),
    })?;
    let available = toks.len() - 1;
    if available < expected {
        return Err(Error::Truncated {
            expected,
            found: available,
        });
    }

    let mut coord = || -> Result<T> {
        // length checked above
        let (position, tok) = it.next().ok_or(Error::Truncated {
            expected,
            found: available,
        })?;
        tok.parse::<T>().map_err(|_| Error::Parse {
            position,
            token: tok.clone(),
        })
    };

    let mut batch = TriangleBatch::with_capacity(count);
    for _ in 0..count {
        let mut v = [Vector3::zero(); 3];
        for vertex in v.iter_mut() {
            *vertex = Vector3::new(coord()?, coord()?, coord()?);
        }
        batch.push(v[0], v[1], v[2]);
    }

    if let Some((position, _)) = it.next() {
        return Err(Error::TrailingData { position });
    }
    Ok(batch)
}

pub fn read_triangles_path<T: Scalar, P: AsRef<Path>>(path: P) -> Result<TriangleBatch<T>> {
    let file = File::open(path)?;
    read_triangles(BufReader::new(file))
}

/// Write a batch in the format accepted by [`read_triangles`], one triangle
/// per line.
pub fn write_triangles<T: Scalar, W: Write>(batch: &TriangleBatch<T>, mut out: W) -> Result<()> {
    writeln!(out, "{}", batch.len())?;
    for tri in batch.iter() {
        writeln!(
            out,
            "{} {} {} {} {} {} {} {} {}",
            tri.a.x, tri.a.y, tri.a.z, tri.b.x, tri.b.y, tri.b.z, tri.c.x, tri.c.y, tri.c.z
        )?;
    }
    out.flush()?;
    Ok(())
}

/// One index per line, ascending.
pub fn write_indices<W: Write>(indices: &IntersectionSet, mut out: W) -> Result<()> {
    for index in indices {
        writeln!(out, "{}", index)?;
    }
    out.flush()?;
    Ok(())
}

// Helper: iterate non-empty, non-comment tokens across lines
fn tokenize<R: BufRead>(r: R) -> Result<Vec<String>> {
    let mut toks = Vec::new();
    for line in r.lines() {
        let l = line?;
        let trimmed = l.split('#').next().unwrap_or("").trim();
        if trimmed.is_empty() {
            continue;
        }
        toks.extend(trimmed.split_whitespace().map(|s| s.to_string()));
    }
    Ok(toks)
}
