//! End-to-end pipeline builds: config cascade, ignore rules, caching and
//! failure policies against real fixture trees.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::{TempDir, tempdir};

use hintpipe_core::{Pipeline, PipelineError, PipelineOptions};
use hintpipe_engine::BasicEngine;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn pipeline(options: PipelineOptions) -> Pipeline {
    Pipeline::new(Box::new(BasicEngine::new()), options)
}

fn quiet() -> PipelineOptions {
    PipelineOptions {
        log: false,
        ..Default::default()
    }
}

/// A tree resembling a small app: one clean file, one dirty file, and two
/// directories excluded by the ignore file.
fn fixture_tree() -> TempDir {
    let dir = tempdir().unwrap();
    write(dir.path(), ".jshintignore", "directory/**\ndummy/**\n");
    write(dir.path(), "core.js", "var a = 1\n");
    write(dir.path(), "look-no-errors.js", "var a = 1;\n");
    write(dir.path(), "directory/ignored.js", "var broken = 1\n");
    write(dir.path(), "dummy/also-ignored.js", "var broken = 1\n");
    dir
}

#[test]
fn ignored_directories_are_excluded_from_the_build() {
    let input = fixture_tree();
    let output = tempdir().unwrap();

    let outcome = pipeline(quiet()).build(input.path(), output.path()).unwrap();

    assert_eq!(outcome.files_checked, 2);
    assert_eq!(outcome.total_errors, 1);
    assert!(output.path().join("core.lint.js").is_file());
    assert!(output.path().join("look-no-errors.lint.js").is_file());
    assert!(!output.path().join("directory/ignored.lint.js").exists());
    assert!(!output.path().join("dummy/also-ignored.lint.js").exists());
}

#[test]
fn jshintrc_suppresses_diagnostics_for_its_subtree() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write(input.path(), ".jshintrc", r#"{ "asi": true }"#);
    write(input.path(), "core.js", "var a = 1\n");

    let outcome = pipeline(quiet()).build(input.path(), output.path()).unwrap();
    assert_eq!(outcome.total_errors, 0);
}

#[test]
fn jshintrc_tolerates_comments() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write(
        input.path(),
        ".jshintrc",
        "{\n  // semicolons are optional here\n  \"asi\": true\n}\n",
    );
    write(input.path(), "core.js", "var a = 1\n");

    let outcome = pipeline(quiet()).build(input.path(), output.path()).unwrap();
    assert_eq!(outcome.total_errors, 0);
}

#[test]
fn deeper_jshintrc_overrides_the_root() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write(input.path(), ".jshintrc", r#"{ "asi": true }"#);
    write(input.path(), "lax.js", "var a = 1\n");
    write(input.path(), "strict/.jshintrc", r#"{ "asi": false }"#);
    write(input.path(), "strict/core.js", "var a = 1\n");

    let outcome = pipeline(quiet()).build(input.path(), output.path()).unwrap();

    assert_eq!(outcome.total_errors, 1);
    let artifact = fs::read_to_string(output.path().join("strict/core.lint.js")).unwrap();
    assert!(artifact.contains("ok(false"));
    let lax = fs::read_to_string(output.path().join("lax.lint.js")).unwrap();
    assert!(lax.contains("ok(true"));
}

#[test]
fn jshintrc_root_relocates_config_discovery() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write(input.path(), "blah/.jshintrc", r#"{ "asi": true }"#);
    write(input.path(), "core.js", "var a = 1\n");

    let options = PipelineOptions {
        jshintrc_root: Some("blah".into()),
        ..quiet()
    };
    let outcome = pipeline(options).build(input.path(), output.path()).unwrap();
    assert_eq!(outcome.total_errors, 0);
}

#[test]
fn jshintrc_path_overrides_discovery_entirely() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    // The root config would fail the build; the override replaces it.
    write(input.path(), ".jshintrc", r#"{ "asi": false }"#);
    write(input.path(), "custom.jshintrc", r#"{ "asi": true }"#);
    write(input.path(), "core.js", "var a = 1\n");

    let options = PipelineOptions {
        jshintrc_path: Some("custom.jshintrc".into()),
        ..quiet()
    };
    let outcome = pipeline(options).build(input.path(), output.path()).unwrap();
    assert_eq!(outcome.total_errors, 0);
}

#[test]
fn malformed_jshintrc_fails_the_build() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write(input.path(), ".jshintrc", "{ \"asi\": tru\n");
    write(input.path(), "core.js", "var a = 1;\n");

    let err = pipeline(quiet())
        .build(input.path(), output.path())
        .unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
}

#[test]
fn fail_on_any_error_rejects_the_build() {
    let input = fixture_tree();
    let output = tempdir().unwrap();

    let options = PipelineOptions {
        fail_on_any_error: true,
        ..quiet()
    };
    let err = pipeline(options)
        .build(input.path(), output.path())
        .unwrap_err();

    assert_eq!(err.to_string(), "JSHint failed: 1 error(s) found");
    // Rejection happens before any artifact is written.
    assert!(fs::read_dir(output.path()).unwrap().next().is_none());
}

#[test]
fn rebuilds_reuse_cached_results_until_content_changes() {
    let input = fixture_tree();
    let output = tempdir().unwrap();
    let pipeline = pipeline(quiet());

    let first = pipeline.build(input.path(), output.path()).unwrap();
    assert_eq!(first.files_from_cache, 0);

    let second = pipeline.build(input.path(), output.path()).unwrap();
    assert_eq!(second.files_from_cache, 2);
    assert_eq!(second.total_errors, first.total_errors);

    write(input.path(), "core.js", "var a = 1;\n");
    let third = pipeline.build(input.path(), output.path()).unwrap();
    assert_eq!(third.files_from_cache, 1);
    assert_eq!(third.total_errors, 0);
}

#[test]
fn config_change_invalidates_cached_results() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write(input.path(), "core.js", "var a = 1\n");
    let pipeline = pipeline(quiet());

    let first = pipeline.build(input.path(), output.path()).unwrap();
    assert_eq!(first.total_errors, 1);

    write(input.path(), ".jshintrc", r#"{ "asi": true }"#);
    let second = pipeline.build(input.path(), output.path()).unwrap();
    assert_eq!(second.files_from_cache, 0);
    assert_eq!(second.total_errors, 0);
}

#[test]
fn persist_false_disables_the_cache() {
    let input = fixture_tree();
    let output = tempdir().unwrap();

    let options = PipelineOptions {
        persist: false,
        ..quiet()
    };
    let pipeline = pipeline(options);

    pipeline.build(input.path(), output.path()).unwrap();
    let second = pipeline.build(input.path(), output.path()).unwrap();
    assert_eq!(second.files_from_cache, 0);
}

#[test]
fn error_ceiling_flags_the_build_without_failing_it() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    let noisy: String = (0..10).map(|i| format!("var x{} = {}\n", i, i)).collect();
    write(input.path(), "noisy.js", &noisy);

    let options = PipelineOptions {
        max_errors: 5,
        ..quiet()
    };
    let outcome = pipeline(options).build(input.path(), output.path()).unwrap();

    assert!(outcome.too_many_errors);
    assert_eq!(outcome.total_errors, 10);
    assert!(output.path().join("noisy.lint.js").is_file());
}

#[test]
fn non_js_files_are_not_linted() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write(input.path(), "readme.md", "no semicolons here\n");
    write(input.path(), "style.css", "body { color: red }\n");
    write(input.path(), "core.js", "var a = 1;\n");

    let outcome = pipeline(quiet()).build(input.path(), output.path()).unwrap();
    assert_eq!(outcome.files_checked, 1);
    assert_eq!(outcome.total_errors, 0);
}
