use predicates::prelude::*;

use crate::common::TestProject;

/// --recursive renders every .env.example below the working directory
#[test]
fn test_recursive_renders_all() {
    let project = TestProject::new().unwrap();
    project.write(".env.example", "ROOT=1\n").unwrap();
    project.write("api/.env.example", "API=1\n").unwrap();
    project.write("services/worker/.env.example", "WORKER=1\n").unwrap();
    project.write("node_modules/pkg/.env.example", "IGNORED=1\n").unwrap();

    project
        .dotenver()
        .arg("--recursive")
        .assert()
        .success()
        .stderr(predicate::str::contains("'api/.env.example' rendered to 'api/.env'"));

    assert_eq!(project.read(".env"), "ROOT=1\n");
    assert_eq!(project.read("api/.env"), "API=1\n");
    assert_eq!(project.read("services/worker/.env"), "WORKER=1\n");
    assert!(!project.exists("node_modules/pkg/.env"));
}

/// No templates found is reported but not an error
#[test]
fn test_recursive_without_templates() {
    let project = TestProject::new().unwrap();

    project
        .dotenver()
        .arg("-r")
        .assert()
        .success()
        .stderr(predicate::str::contains("No \"**/.env.example\" files found"));
}

/// --pattern replaces the discovery glob
#[test]
fn test_recursive_custom_pattern() {
    let project = TestProject::new().unwrap();
    project.write("a/.env.template", "A=1\n").unwrap();
    project.write("b/.env.example", "B=1\n").unwrap();
    project.write("dotenver.toml", "template_suffixes = [\".template\", \".example\"]\n").unwrap();

    project.dotenver().args(["-r", "--pattern", "**/.env.template"]).assert().success();

    assert_eq!(project.read("a/.env"), "A=1\n");
    assert!(!project.exists("b/.env"));
}

/// Explicit files and --recursive can not be combined
#[test]
fn test_recursive_conflicts_with_files() {
    let project = TestProject::new().unwrap();
    project.write(".env.example", "A=1\n").unwrap();

    project.dotenver().args(["-r", ".env.example"]).assert().code(2);
}

/// --pattern is only accepted together with --recursive
#[test]
fn test_pattern_without_recursive_is_rejected() {
    let project = TestProject::new().unwrap();
    project.write("p1/.env.example", "A=1\n").unwrap();

    project
        .dotenver()
        .args(["--pattern", "nothing/**", "p1/.env.example"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--pattern"));

    assert!(!project.exists("p1/.env"));
}
