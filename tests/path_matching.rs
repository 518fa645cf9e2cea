// tests/path_matching.rs

mod common;
use crate::common::{path, paths};

use std::error::Error;

use proptest::prelude::*;

use radish::errors::RadishError;
use radish::paths::{ProjectPath, contains_glob, match_lines};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn plain_path_matches_by_prefix() {
    let p = path("extensions/rules/");

    assert_eq!(
        p.match_line("extensions/rules/tests/test_rules.py"),
        Some(path("extensions/rules/"))
    );
    assert!(p.matches("extensions/rules/"));
    assert!(!p.matches("extensions/other/setup.py"));
    assert!(!p.matches("js/extensions/rules/a.js"));
}

#[test]
fn glob_path_returns_concrete_directory() {
    let p = path("extensions/*/");

    let hit = p.match_line("extensions/cool/src/a.py").expect("should match");
    assert_eq!(hit, "extensions/cool/");
    assert!(!hit.is_glob());

    assert_eq!(
        p.match_line("extensions/cool/").as_ref().map(ProjectPath::as_str),
        Some("extensions/cool/")
    );
}

#[test]
fn glob_needs_trailing_structure() {
    let p = path("extensions/*/");

    assert!(!p.matches("extensions/cool"));
    assert!(!p.matches("extensions"));
    assert!(!p.matches("other/cool/a.py"));
}

#[test]
fn glob_star_does_not_cross_directories() {
    let p = path("js/*/");

    assert_eq!(p.match_line("js/frontend/src/app.js"), Some(path("js/frontend/")));
    // The match is on the first segment only; deeper nesting still maps to it.
    assert_eq!(p.match_line("js/a/b/c.js"), Some(path("js/a/")));
}

#[test]
fn glob_without_trailing_slash_returns_bare_segments() {
    let p = path("services/svc-*");

    assert_eq!(p.match_line("services/svc-a/main.go"), Some(path("services/svc-a")));
    assert!(!p.matches("services/other/main.go"));
}

#[test]
fn brackets_and_question_marks_are_literal() {
    let p = path("docs/[v1]/");

    assert!(!p.is_glob());
    assert_eq!(p.match_line("docs/[v1]/index.md"), Some(path("docs/[v1]/")));
    assert!(!p.matches("docs/v/index.md"));

    let q = path("what?/");
    assert!(!q.is_glob());
    assert!(q.matches("what?/README"));
    assert!(!q.matches("whatx/README"));
}

#[test]
fn identity_is_the_raw_string() {
    let glob = path("js/*/");
    let concrete = path("js/frontend/");

    assert_ne!(glob, concrete);
    assert_eq!(glob, "js/*/");
    assert!(glob.matches(concrete.as_str()));
    assert!(!concrete.matches(glob.as_str()));
}

#[test]
fn ordering_and_display_follow_the_raw_string() -> TestResult {
    let mut ps: Vec<ProjectPath> = vec!["b/".parse()?, "a/".parse()?, "c/x/".parse()?];
    ps.sort();

    let shown: Vec<String> = ps.iter().map(|p| p.to_string()).collect();
    assert_eq!(shown, vec!["a/", "b/", "c/x/"]);
    assert_eq!(format!("{:?}", ps[0]), "ProjectPath(\"a/\")");
    Ok(())
}

#[test]
fn invalid_glob_is_rejected() {
    let err = ProjectPath::new("broken/*[a/").unwrap_err();
    assert!(matches!(err, RadishError::InvalidGlob { ref pattern, .. } if pattern == "broken/*[a/"));
}

#[test]
fn glob_detection() {
    assert!(contains_glob("a/*/"));
    assert!(contains_glob("*"));
    assert!(!contains_glob("a/?"));
    assert!(!contains_glob("a/[bc]/"));
    assert!(!contains_glob("a/b/"));
}

#[test]
fn match_lines_collects_unique_sorted_paths() {
    let configured = paths(&["extensions/*/", "js/mobile/", "docs/"]);
    let lines = [
        "extensions/zeta/setup.py",
        "extensions/alpha/a.py",
        "extensions/alpha/b.py",
        "js/mobile/index.js",
        "README.md",
    ];

    let matched: Vec<String> = match_lines(&lines, &configured)
        .into_iter()
        .map(|p| p.to_string())
        .collect();

    assert_eq!(
        matched,
        vec!["extensions/alpha/", "extensions/zeta/", "js/mobile/"]
    );
}

#[test]
fn match_lines_with_no_lines_is_empty() {
    let configured = paths(&["a/"]);
    let lines: [&str; 0] = [];
    assert!(match_lines(&lines, &configured).is_empty());
}

#[test]
fn one_line_can_match_several_paths() {
    let configured = paths(&["js/", "js/*/"]);
    let matched = match_lines(&["js/web/app.js"], &configured);

    assert!(matched.contains(&path("js/")));
    assert!(matched.contains(&path("js/web/")));
    assert_eq!(matched.len(), 2);
}

fn segment() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

proptest! {
    // Every line under a concrete configured directory maps back to it.
    #[test]
    fn files_under_a_configured_dir_match_it(
        dirs in proptest::collection::vec(segment(), 1..5),
        tails in proptest::collection::vec(segment(), 1..4),
    ) {
        let configured: Vec<ProjectPath> = dirs
            .iter()
            .map(|d| ProjectPath::new(format!("{d}/")).unwrap())
            .collect();

        let line = format!("{}/{}", dirs[0], tails.join("/"));
        let matched = match_lines(&[line.as_str()], &configured);

        let expected = ProjectPath::new(format!("{}/", dirs[0])).unwrap();
        prop_assert!(matched.contains(&expected));
        for p in &matched {
            prop_assert!(line.starts_with(p.as_str()));
        }
    }

    // A one-segment glob maps any nested file to its top-level directory.
    #[test]
    fn star_glob_maps_to_first_segment(
        top in segment(),
        rest in proptest::collection::vec(segment(), 1..4),
    ) {
        let glob = ProjectPath::new("*/").unwrap();
        let line = format!("{top}/{}", rest.join("/"));

        let expected = format!("{top}/");
        prop_assert_eq!(glob.match_line(&line).map(|p| p.to_string()), Some(expected));
    }

    // Lines outside every configured directory match nothing.
    #[test]
    fn unrelated_lines_match_nothing(
        dirs in proptest::collection::vec(segment(), 1..5),
        tail in segment(),
    ) {
        let configured: Vec<ProjectPath> = dirs
            .iter()
            .map(|d| ProjectPath::new(format!("{d}/")).unwrap())
            .collect();

        // Upper-case segments never collide with the lower-case dirs.
        let line = format!("OTHER/{tail}");
        prop_assert!(match_lines(&[line.as_str()], &configured).is_empty());
    }
}
