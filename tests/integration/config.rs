use predicates::prelude::*;

use crate::common::TestProject;

/// dotenver.toml in the working directory is picked up
#[test]
fn test_local_config_suffixes() {
    let project = TestProject::new().unwrap();
    project.write("dotenver.toml", "template_suffixes = [\".tpl\"]\n").unwrap();
    project.write(".env.tpl", "A=1\n").unwrap();

    project.dotenver().arg(".env.tpl").assert().success();

    assert_eq!(project.read(".env"), "A=1\n");
}

/// --config points at an explicit file
#[test]
fn test_explicit_config() {
    let project = TestProject::new().unwrap();
    project.write("conf/settings.toml", "recursive_pattern = \"**/.env.sample\"\ntemplate_suffixes = [\".sample\"]\n").unwrap();
    project.write("app/.env.sample", "A=1\n").unwrap();

    project.dotenver().args(["-r", "--config", "conf/settings.toml"]).assert().success();

    assert_eq!(project.read("app/.env"), "A=1\n");
}

/// A missing explicit config file is an error
#[test]
fn test_missing_explicit_config() {
    let project = TestProject::new().unwrap();
    project.write(".env.example", "A=1\n").unwrap();

    project
        .dotenver()
        .args(["-c", "nope.toml", ".env.example"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nope.toml"));
}

/// Unknown configuration keys are rejected
#[test]
fn test_unknown_config_key() {
    let project = TestProject::new().unwrap();
    project.write("dotenver.toml", "suffixes = [\".tpl\"]\n").unwrap();
    project.write(".env.example", "A=1\n").unwrap();

    project
        .dotenver()
        .arg(".env.example")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("dotenver.toml"));
}

/// DOTENVER_CONFIG names the configuration file
#[test]
fn test_config_from_environment() {
    let project = TestProject::new().unwrap();
    let config = project.write("elsewhere.toml", "template_suffixes = [\".dist\"]\n").unwrap();
    project.write(".env.dist", "A=1\n").unwrap();

    project.dotenver().env("DOTENVER_CONFIG", &config).arg(".env.dist").assert().success();

    assert_eq!(project.read(".env"), "A=1\n");
}
