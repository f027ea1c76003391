use crate::common::{BOOLEAN_TEMPLATE, TestProject};

/// Directives sharing a name get the first generated value
#[test]
fn test_named_values_are_equal() {
    let project = TestProject::new().unwrap();
    project.write("a/.env.example", BOOLEAN_TEMPLATE).unwrap();
    project
        .write(
            "b/.env.example",
            "\nNAMED_VARIABLE= ## dotenver:boolean(name='true', chance_of_getting_true=0)\n",
        )
        .unwrap();

    project.dotenver().args(["-o", "a/.env.example", "b/.env.example"]).assert().success();

    assert_eq!(project.read("b/.env"), "\nNAMED_VARIABLE=True\n");
}

/// Named values are shared using the `:name` syntax
#[test]
fn test_colon_name_shared_across_templates() {
    let project = TestProject::new().unwrap();
    let template = "DB_PASSWORD= ## dotenver:password:db(length=40)\n";
    project.write("api/.env.example", template).unwrap();
    project.write("worker/.env.example", "PASSWORD= ## dotenver:password:db(length=12)\n").unwrap();

    project.dotenver().args(["api/.env.example", "worker/.env.example"]).assert().success();

    let api = project.read("api/.env");
    let worker = project.read("worker/.env");
    let api_value = api.trim_end().strip_prefix("DB_PASSWORD=").unwrap();
    let worker_value = worker.trim_end().strip_prefix("PASSWORD=").unwrap();
    assert_eq!(api_value, worker_value);
    assert_eq!(api_value.len(), 40);
}

/// A value already in one .env is reused by every template naming it,
/// even templates processed earlier in the run
#[test]
fn test_existing_named_value_is_captured() {
    let project = TestProject::new().unwrap();
    project.write("a/.env.example", "SECRET= ## dotenver:password:shared\n").unwrap();
    project.write("b/.env.example", "KEY= ## dotenver:password:shared\n").unwrap();
    project.write("b/.env", "KEY=already-set\n").unwrap();

    project.dotenver().args(["a/.env.example", "b/.env.example"]).assert().success();

    assert_eq!(project.read("a/.env"), "SECRET=already-set\n");
    assert_eq!(project.read("b/.env"), "KEY=already-set\n");
}

/// The same name under different generators is a different value
#[test]
fn test_name_is_scoped_by_generator() {
    let project = TestProject::new().unwrap();
    project
        .write(
            ".env.example",
            "FLAG= ## dotenver:boolean:x(chance_of_getting_true=100)\nNUMBER= ## dotenver:pyint:x(min_value=7, max_value=7)\n",
        )
        .unwrap();

    project.dotenver().arg(".env.example").assert().success();

    assert_eq!(project.read(".env"), "FLAG=True\nNUMBER=7\n");
}
