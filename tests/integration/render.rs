use predicates::prelude::*;

use crate::common::{BOOLEAN_RENDERED, BOOLEAN_TEMPLATE, LEFTOVER_HEADER, TestProject};

/// Rendering a template without an existing .env
#[test]
fn test_render_new_dotenv() {
    let project = TestProject::new().unwrap();
    project.write(".env.example", BOOLEAN_TEMPLATE).unwrap();

    project
        .dotenver()
        .arg(".env.example")
        .assert()
        .success()
        .stderr(predicate::str::contains("'.env.example' rendered to '.env'"));

    assert_eq!(project.read(".env"), BOOLEAN_RENDERED);
}

/// Variables only present in the existing .env are kept after a separator
#[test]
fn test_unknowns_are_kept() {
    let project = TestProject::new().unwrap();
    project.write(".env.example", BOOLEAN_TEMPLATE).unwrap();
    project.write(".env", "\n# A comment\nEXISTING_VARIABLE=existing\n").unwrap();

    project.dotenver().arg(".env.example").assert().success();

    assert_eq!(
        project.read(".env"),
        format!("{BOOLEAN_RENDERED}{LEFTOVER_HEADER}EXISTING_VARIABLE=existing\n")
    );
}

/// Existing values win over literals and directives
#[test]
fn test_existing_are_respected() {
    let project = TestProject::new().unwrap();
    project.write(".env.example", BOOLEAN_TEMPLATE).unwrap();
    let existing = "\nSTATIC_VARIABLE=dynamic\nexport FALSE_VARIABLE=True\nTRUE_VARIABLE=False\n";
    project.write(".env", existing).unwrap();

    project.dotenver().arg(".env.example").assert().success();

    assert_eq!(project.read(".env"), existing);
}

/// --override regenerates everything from the template
#[test]
fn test_existing_are_overridden() {
    let project = TestProject::new().unwrap();
    project.write(".env.example", BOOLEAN_TEMPLATE).unwrap();
    project
        .write(
            ".env",
            "\n# A comment\nSTATIC_VARIABLE=dynamic\nexport FALSE_VARIABLE=True\nTRUE_VARIABLE=False\n",
        )
        .unwrap();

    project.dotenver().args(["--override", ".env.example"]).assert().success();

    assert_eq!(project.read(".env"), BOOLEAN_RENDERED);
}

/// --override drops variables unknown to the template
#[test]
fn test_unknowns_are_discarded() {
    let project = TestProject::new().unwrap();
    project.write(".env.example", BOOLEAN_TEMPLATE).unwrap();
    project.write(".env", "\n# A comment\nEXISTING_VARIABLE=existing\n").unwrap();

    project.dotenver().args(["-o", ".env.example"]).assert().success();

    assert_eq!(project.read(".env"), BOOLEAN_RENDERED);
}

/// A directive wins over a literal value on the same line
#[test]
fn test_dotenver_triumphs_value() {
    let project = TestProject::new().unwrap();
    project
        .write(".env.example", "\nVARIABLE=value ## dotenver:boolean(chance_of_getting_true=100)\n")
        .unwrap();

    project.dotenver().arg(".env.example").assert().success();

    assert_eq!(project.read(".env"), "\nVARIABLE=True\n");
}

/// Unassigned and empty declarations stay distinct
#[test]
fn test_presence_and_absence() {
    let project = TestProject::new().unwrap();
    project.write(".env.example", "UNSET\nEMPTY=\nexport EXPORTED\n").unwrap();
    project.write(".env", "LEFT\nLEFT_EMPTY=\n").unwrap();

    project.dotenver().arg(".env.example").assert().success();

    assert_eq!(
        project.read(".env"),
        format!("UNSET\nEMPTY=\nexport EXPORTED\n{LEFTOVER_HEADER}LEFT\nLEFT_EMPTY=\n")
    );
}

/// Leftovers follow the order of the existing file
#[test]
fn test_leftover_order() {
    let project = TestProject::new().unwrap();
    project.write(".env.example", "B=template\n").unwrap();
    project.write(".env", "Z=26\nB=kept\nA=1\nM=13\nA=2\n").unwrap();

    project.dotenver().arg(".env.example").assert().success();

    assert_eq!(project.read(".env"), format!("B=kept\n{LEFTOVER_HEADER}Z=26\nA=2\nM=13\n"));
}

/// Rendering twice without --override changes nothing
#[test]
fn test_idempotent() {
    let project = TestProject::new().unwrap();
    project
        .write(
            ".env.example",
            "# Secrets\nSECRET= ## dotenver:password(length=32, special_chars=false)\nTOKEN= ## dotenver:uuid4\n",
        )
        .unwrap();
    project.write(".env", "EXTRA=1\n").unwrap();

    project.dotenver().arg(".env.example").assert().success();
    let first = project.read(".env");
    project.dotenver().arg(".env.example").assert().success();

    assert_eq!(project.read(".env"), first);
    assert!(first.starts_with("# Secrets\nSECRET="));
    assert!(first.ends_with(&format!("{LEFTOVER_HEADER}EXTRA=1\n")));
}

/// Quoting options wrap and escape the generated value
#[test]
fn test_quotes_option() {
    let project = TestProject::new().unwrap();
    project
        .write(
            ".env.example",
            "SINGLE= ## dotenver:boolean(chance_of_getting_true=100, quotes=\"'\")\n\
             DOUBLE= ## dotenver:boolean(chance_of_getting_true=0, quotes='\"')\n",
        )
        .unwrap();

    project.dotenver().arg(".env.example").assert().success();

    assert_eq!(project.read(".env"), "SINGLE='True'\nDOUBLE=\"False\"\n");
}

/// Template braces outside directives are copied verbatim
#[test]
fn test_literal_braces_untouched() {
    let project = TestProject::new().unwrap();
    let template = "# {{ not rendered }}\nURL={{ host }}/{% raw %}\n";
    project.write(".env.example", template).unwrap();

    project.dotenver().arg(".env.example").assert().success();

    assert_eq!(project.read(".env"), template);
}

/// A template with a custom suffix renders to the stripped name
#[test]
fn test_destination_from_suffix() {
    let project = TestProject::new().unwrap();
    project.write("svc/.env.local.example", "A=1\n").unwrap();

    project
        .dotenver()
        .arg("svc/.env.local.example")
        .assert()
        .success()
        .stderr(predicate::str::contains("rendered to 'svc/.env.local'"));

    assert_eq!(project.read("svc/.env.local"), "A=1\n");
    assert!(!project.exists("svc/.env"));
}

/// --quiet suppresses success messages
#[test]
fn test_quiet() {
    let project = TestProject::new().unwrap();
    project.write(".env.example", "A=1\n").unwrap();

    project.dotenver().args(["-q", ".env.example"]).assert().success().stderr(predicate::str::is_empty());
}

/// A symlinked .env is updated through the link
#[cfg(unix)]
#[test]
fn test_symlinked_dotenv_is_written_through() {
    let project = TestProject::new().unwrap();
    project.write("real.env", "A=1\n").unwrap();
    project.write(".env.example", "A=2\nB=3\n").unwrap();
    std::os::unix::fs::symlink("real.env", project.path().join(".env")).unwrap();

    project.dotenver().arg(".env.example").assert().success();

    let link = std::fs::symlink_metadata(project.path().join(".env")).unwrap();
    assert!(link.file_type().is_symlink());
    assert_eq!(project.read("real.env"), "A=1\nB=3\n");
}
