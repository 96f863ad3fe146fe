use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use woformat::cli::{print_usage, Args};
use woformat::line_ending::LineEnding;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("woformat")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let args = make_args(&["./woformat.yml"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.config, PathBuf::from("./woformat.yml"));
    assert_eq!(parsed.output_dir, PathBuf::from("."));
    assert!(parsed.templates.is_none());
    assert!(parsed.only.is_empty());
    assert!(parsed.line_ending.is_none());
    assert!(!parsed.verbose);
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "--output-dir",
        "./build",
        "--templates",
        "./templates",
        "--only",
        "*.plist",
        "--only",
        "WebServerResources/**",
        "--line-ending",
        "crlf",
        "--verbose",
        "./project",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.output_dir, PathBuf::from("./build"));
    assert_eq!(parsed.templates, Some(PathBuf::from("./templates")));
    assert_eq!(parsed.only, vec!["*.plist", "WebServerResources/**"]);
    assert_eq!(parsed.line_ending, Some(LineEnding::CrLf));
    assert!(parsed.verbose);
}

#[test]
fn test_short_flags() {
    let args = make_args(&["-o", "out", "-t", "tmpl", "-v", "./project"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.output_dir, PathBuf::from("out"));
    assert_eq!(parsed.templates, Some(PathBuf::from("tmpl")));
    assert!(parsed.verbose);
}

#[test]
fn test_invalid_line_ending() {
    let args = make_args(&["--line-ending", "nl", "./project"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_missing_args() {
    let args = make_args(&[]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_too_many_args() {
    let args = make_args(&["./project", "extra"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_print_usage_reports_success() {
    assert!(print_usage().is_ok());
}
