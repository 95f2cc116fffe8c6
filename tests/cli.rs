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
    io::Write,
    process::{Command, Output, Stdio},
};

fn tribvh(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tribvh"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // a rejected command line exits without reading stdin
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

const BATCH: &str = "\
3
0 0 0 5 0 0 0 5 0
1 1 0 2 2 0 1 2 0
9 9 9 10 9 9 9 10 9
";

#[test]
fn test_check_reads_stdin() {
    let output = tribvh(&[], BATCH);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0\n1\n");

    let output = tribvh(&["--brute-force"], BATCH);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0\n1\n");
}

#[test]
fn test_check_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(BATCH.as_bytes()).unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap();
    let output = tribvh(&["--input", path], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0\n1\n");
}

#[test]
fn test_loose_epsilon_reaches_hovering_vertex() {
    // the second triangle's lowest vertex hovers 1e-5 above the first
    let batch = "2\n0 0 0 1 0 0 0 1 0\n0.2 0.2 0.00001 0.2 0.2 1 0.5 0.1 1\n";
    assert_eq!(stdout(&tribvh(&[], batch)), "");
    assert_eq!(stdout(&tribvh(&["--epsilon", "1e-3"], batch)), "0\n1\n");
}

#[test]
fn test_empty_batch_prints_nothing() {
    let output = tribvh(&[], "");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_bad_input_fails() {
    let output = tribvh(&[], "2\n0 0 0 1 0 0 0 1 0\n");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let output = tribvh(&["--epsilon", "-1"], BATCH);
    assert!(!output.status.success());
}

#[test]
fn test_generate_feeds_check() {
    let output = tribvh(&["generate", "-n", "40", "--seed", "5", "--extent", "4"], "");
    assert!(output.status.success());
    let batch = stdout(&output);
    assert_eq!(batch.lines().next(), Some("40"));
    assert_eq!(batch.lines().count(), 41);

    let with_bvh = stdout(&tribvh(&[], &batch));
    let brute = stdout(&tribvh(&["--brute-force"], &batch));
    assert_eq!(with_bvh, brute);

    let again = stdout(&tribvh(&["generate", "-n", "40", "--seed", "5", "--extent", "4"], ""));
    assert_eq!(again, batch);

    assert!(!tribvh(&["generate", "--extent", "inf"], "").status.success());
}
