use tempfile::TempDir;

mod common;

#[test]
fn e2e_add_edit_delete_roundtrip() {
    let data_dir = TempDir::new().expect("temp dir");

    let output = common::run(&data_dir, &["list"]);
    assert!(output.status.success(), "{:?}", output);
    assert!(common::id_of(&common::stdout(&output), "Ada").is_none());

    let output = common::run(
        &data_dir,
        &["add", "--name", "Ada", "--course", "Math", "--mobile", "555-0001"],
    );
    assert!(output.status.success(), "{:?}", output);
    let out = common::stdout(&output);
    assert!(out.contains("New student has been added successfully!"));
    let id = common::id_of(&out, "Ada").expect("Ada listed after insert");
    assert!(out.contains("555-0001"));

    let output = common::run(
        &data_dir,
        &[
            "edit",
            "--id",
            &id.to_string(),
            "--name",
            "Ada L.",
            "--course",
            "Physics",
            "--mobile",
            "555-0002",
        ],
    );
    assert!(output.status.success(), "{:?}", output);
    let out = common::stdout(&output);
    assert_eq!(common::id_of(&out, "Ada L."), Some(id));
    assert!(common::id_of(&out, "Ada").is_none());
    assert!(out.contains("Physics"));
    assert!(out.contains("555-0002"));

    let output = common::run(&data_dir, &["delete", "--id", &id.to_string(), "--yes"]);
    assert!(output.status.success(), "{:?}", output);
    let out = common::stdout(&output);
    assert!(out.contains("Student data has been deleted successfully!"));
    assert!(common::id_of(&out, "Ada L.").is_none());
}

#[test]
fn e2e_search_reports_matches_and_misses() {
    let data_dir = TempDir::new().expect("temp dir");

    for (name, course) in [("Grace", "Biology"), ("Alan", "Astronomy")] {
        let output = common::run(
            &data_dir,
            &["add", "--name", name, "--course", course, "--mobile", "555-1000"],
        );
        assert!(output.status.success(), "{:?}", output);
    }

    let output = common::run(&data_dir, &["search", "--name", "Grace"]);
    assert!(output.status.success(), "{:?}", output);
    let out = common::stdout(&output);
    assert!(common::id_of(&out, "Grace").is_some());
    assert!(common::id_of(&out, "Alan").is_none());

    let output = common::run(&data_dir, &["search", "--name", "Nobody"]);
    assert!(output.status.success(), "{:?}", output);
    assert!(common::stdout(&output).contains("No matching records found!"));
}

#[test]
fn e2e_delete_without_confirmation_keeps_record() {
    let data_dir = TempDir::new().expect("temp dir");

    let output = common::run(
        &data_dir,
        &["add", "--name", "Ada", "--course", "math", "--mobile", "1"],
    );
    assert!(output.status.success(), "{:?}", output);
    let id = common::id_of(&common::stdout(&output), "Ada").expect("Ada listed");

    let output = common::run(&data_dir, &["delete", "--id", &id.to_string()]);
    assert!(!output.status.success());

    let output = common::run(&data_dir, &["list"]);
    assert_eq!(common::id_of(&common::stdout(&output), "Ada"), Some(id));
}

#[test]
fn e2e_reset_starts_from_empty_store() {
    let data_dir = TempDir::new().expect("temp dir");

    let output = common::run(
        &data_dir,
        &["add", "--name", "Ada", "--course", "Math", "--mobile", "1"],
    );
    assert!(output.status.success(), "{:?}", output);

    let output = common::run(&data_dir, &["--reset", "list"]);
    assert!(output.status.success(), "{:?}", output);
    assert!(common::id_of(&common::stdout(&output), "Ada").is_none());
}

#[test]
fn e2e_unknown_course_is_rejected() {
    let data_dir = TempDir::new().expect("temp dir");

    let output = common::run(
        &data_dir,
        &["add", "--name", "Ada", "--course", "Chemistry", "--mobile", "1"],
    );
    assert!(!output.status.success());
}
