use predicates::prelude::*;

use crate::common::TestProject;

/// A missing template fails before anything is written
#[test]
fn test_missing_template() {
    let project = TestProject::new().unwrap();
    project.write("ok/.env.example", "A=1\n").unwrap();

    project
        .dotenver()
        .args(["ok/.env.example", "missing/.env.example"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'missing/.env.example' could not be found"));

    assert!(!project.exists("ok/.env"));
}

/// A template that would overwrite itself is rejected
#[test]
fn test_template_named_like_target() {
    let project = TestProject::new().unwrap();
    project.write(".env", "A=1\n").unwrap();

    project
        .dotenver()
        .arg(".env")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Template file can not be named .env"));

    assert_eq!(project.read(".env"), "A=1\n");
}

/// A failing template does not prevent the others from being written
#[test]
fn test_failure_is_per_template() {
    let project = TestProject::new().unwrap();
    project.write("bad/.env.example", "A= ## dotenver:bolean\n").unwrap();
    project.write("bad/.env", "OLD=1\n").unwrap();
    project.write("good/.env.example", "B=1\n").unwrap();

    project
        .dotenver()
        .args(["bad/.env.example", "good/.env.example"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'good/.env.example' rendered to 'good/.env'"))
        .stderr(predicate::str::contains("Did you mean 'boolean'?"))
        .stderr(predicate::str::contains("1 of 2 template(s) failed"));

    assert_eq!(project.read("bad/.env"), "OLD=1\n");
    assert_eq!(project.read("good/.env"), "B=1\n");
}

/// Malformed directive arguments are reported with their line
#[test]
fn test_malformed_arguments() {
    let project = TestProject::new().unwrap();
    project.write(".env.example", "A=1\nB= ## dotenver:pyint(min_value=)\n").unwrap();

    project
        .dotenver()
        .arg(".env.example")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("line 2"));

    assert!(!project.exists(".env"));
}

/// Unexpected generator arguments are errors
#[test]
fn test_unexpected_argument() {
    let project = TestProject::new().unwrap();
    project.write(".env.example", "A= ## dotenver:word(lenght=3)\n").unwrap();

    project
        .dotenver()
        .arg(".env.example")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("word() got an unexpected keyword argument 'lenght'"));
}

/// Only single or double quotes are accepted for `quotes`
#[test]
fn test_invalid_quotes() {
    let project = TestProject::new().unwrap();
    project.write(".env.example", "A= ## dotenver:word(quotes='`')\n").unwrap();

    project
        .dotenver()
        .arg(".env.example")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("quotes must be a single"));
}

/// No arguments at all is a usage error
#[test]
fn test_no_arguments() {
    let project = TestProject::new().unwrap();
    project.dotenver().assert().code(2);
}
