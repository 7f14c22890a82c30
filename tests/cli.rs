//! Drive the `squigmap` binary end to end

use std::io::Write;
use std::process::{Command, Output, Stdio};

use facet_svg::{PresentationAttrs, Svg, SvgNode, facet_xml};

const BIN: &str = env!("CARGO_BIN_EXE_squigmap");
const SQUARE: &str = "x,y\n0,0\n10,0\n0,10\n10,10\n";

fn run(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(BIN)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start squigmap");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("squigmap did not finish")
}

/// (paths, black circles, red circles)
fn census(svg: &str) -> (usize, usize, usize) {
    fn walk(children: &[SvgNode], counts: &mut (usize, usize, usize)) {
        for child in children {
            match child {
                SvgNode::G(g) => walk(&g.children, counts),
                SvgNode::Path(_) => counts.0 += 1,
                SvgNode::Circle(c) if c.fill() == Some("black") => counts.1 += 1,
                SvgNode::Circle(_) => counts.2 += 1,
            }
        }
    }
    let doc: Svg = facet_xml::from_str(svg.trim()).expect("output is not SVG");
    let mut counts = (0, 0, 0);
    walk(&doc.children, &mut counts);
    counts
}

#[test]
fn stdin_to_stdout() {
    let out = run(&["--seed", "1"], SQUARE);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let svg = String::from_utf8(out.stdout).unwrap();
    let (paths, black, red) = census(&svg);
    assert_eq!(paths, 4);
    assert_eq!(black, 4);
    assert!(red > 0);
}

#[test]
fn explicit_dash_reads_stdin() {
    let out = run(&["-", "--seed", "1"], SQUARE);
    assert!(out.status.success());
    assert_eq!(census(&String::from_utf8(out.stdout).unwrap()).1, 4);
}

#[test]
fn file_in_file_out() {
    let dir = std::env::temp_dir();
    let input = dir.join(format!("squigmap-cli-{}-in.csv", std::process::id()));
    let output = dir.join(format!("squigmap-cli-{}-out.svg", std::process::id()));
    std::fs::write(&input, SQUARE).unwrap();

    let out = run(
        &[
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--seed",
            "3",
        ],
        "",
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(out.stdout.is_empty());

    let svg = std::fs::read_to_string(&output).unwrap();
    assert_eq!(census(&svg).1, 4);

    let _ = std::fs::remove_file(input);
    let _ = std::fs::remove_file(output);
}

#[test]
fn by_site_without_points() {
    let out = run(&["--attribution", "by-site", "--hide-points", "--seed", "5"], SQUARE);
    assert!(out.status.success());
    let (paths, black, red) = census(&String::from_utf8(out.stdout).unwrap());
    assert_eq!(paths, 4);
    assert_eq!((black, red), (0, 0));
}

#[test]
fn seed_makes_output_reproducible() {
    let a = run(&["--seed", "99"], SQUARE);
    let b = run(&["--seed", "99"], SQUARE);
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn bad_input_fails_with_a_diagnostic() {
    let out = run(&[], "x,y\n1,2\n3,four\n");
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not numeric"), "{stderr}");
}

#[test]
fn missing_file_fails() {
    let out = run(&["/nonexistent/points.csv"], "");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("reading"));
}
