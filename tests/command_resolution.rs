// tests/command_resolution.rs

mod common;
use crate::common::builders::{command, mapping_of};
use crate::common::{path, paths};

use radish::command::{Command, DEFAULT_KEY};
use radish::errors::RadishError;

#[test]
fn exact_then_glob_then_default() {
    let cmd = command(
        "test",
        &[("default", "A"), ("glob/*/", "B"), ("exact/", "C")],
    );

    assert_eq!(cmd.resolve(&path("exact/")), Some("C"));
    assert_eq!(cmd.resolve(&path("glob/one/")), Some("B"));
    assert_eq!(cmd.resolve(&path("other/")), Some("A"));
}

#[test]
fn no_default_means_no_command() {
    let cmd = command("lint", &[("js/*/", "eslint .")]);

    assert_eq!(cmd.resolve(&path("js/web/")), Some("eslint ."));
    assert_eq!(cmd.resolve(&path("python/api/")), None);
}

#[test]
fn first_declared_glob_wins_when_globs_overlap() {
    let cmd = command("build", &[("js/w*/", "first"), ("js/*/", "second")]);

    assert_eq!(cmd.resolve(&path("js/web/")), Some("first"));
    assert_eq!(cmd.resolve(&path("js/api/")), Some("second"));
}

#[test]
fn exact_key_beats_matching_glob() {
    let cmd = command("build", &[("js/*/", "glob"), ("js/web/", "exact")]);
    assert_eq!(cmd.resolve(&path("js/web/")), Some("exact"));
}

#[test]
fn items_lists_literals_then_globs_then_default() {
    let cmd = command(
        "test",
        &[
            ("default", "A"),
            ("glob/*/", "B"),
            ("exact/", "C"),
            ("other/", "D"),
        ],
    );

    assert_eq!(
        cmd.items(),
        vec![
            ("exact/", "C"),
            ("other/", "D"),
            ("glob/*/", "B"),
            (DEFAULT_KEY, "A"),
        ]
    );
}

#[test]
fn items_for_resolves_each_given_path_in_order() {
    let cmd = command("test", &[("js/*/", "npm test"), ("extensions/rules/", "py.test")]);
    let items = cmd.items_for(&paths(&["js/web/", "docs/", "extensions/rules/"]));

    assert_eq!(
        items,
        vec![
            (path("js/web/"), Some("npm test".to_string())),
            (path("docs/"), None),
            (path("extensions/rules/"), Some("py.test".to_string())),
        ]
    );
}

#[test]
fn invalid_glob_key_is_a_config_error() {
    let err = Command::new("bad", mapping_of(&[("js/*[/", "x")])).unwrap_err();
    assert!(matches!(err, RadishError::Config(ref msg) if msg.contains("bad")));
}

#[test]
fn equality_ignores_mapping_order() {
    let a = command("t", &[("a/", "1"), ("b/", "2")]);
    let b = command("t", &[("b/", "2"), ("a/", "1")]);
    let c = command("u", &[("a/", "1"), ("b/", "2")]);

    assert_eq!(a, b);
    assert_ne!(a, c);

    use std::collections::HashSet;
    let set: HashSet<_> = [a, b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
}
