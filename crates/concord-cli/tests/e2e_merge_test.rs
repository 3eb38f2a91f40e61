//! End-to-end smoke tests for the CLI run path.

use std::fs;

use tempfile::tempdir;

use concord::{ConcordError, MergeBuilder, Origin};
use concord_cli::Args;

fn args(input_a: &str, input_b: &str, output: &str) -> Args {
    Args {
        input_a: input_a.to_string(),
        input_b: input_b.to_string(),
        output: output.to_string(),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn merges_two_files_into_one() {
    let dir = tempdir().expect("temp directory");
    let path_a = dir.path().join("revision_a.txt");
    let path_b = dir.path().join("revision_b.txt");
    let path_out = dir.path().join("merged.txt");

    fs::write(
        &path_a,
        "<1>]Class$(0,0)!Customer!!-name%-email%;\n",
    )
    .expect("write revision A");
    fs::write(
        &path_b,
        "<1>]Class$(10,0)!Customer!!-name%-phone%;\n<2>]Class$(90,90)!Invoice!;\n",
    )
    .expect("write revision B");

    let result = concord_cli::run(&args(
        path_a.to_str().expect("utf-8 path"),
        path_b.to_str().expect("utf-8 path"),
        path_out.to_str().expect("utf-8 path"),
    ));
    assert!(result.is_ok(), "run failed: {:?}", result.err());

    let written = fs::read_to_string(&path_out).expect("merged output");
    let merged = MergeBuilder::default().decode(&written, Origin::FromA);

    assert_eq!(merged.class_count(), 2);
    let customer = merged
        .classes()
        .iter()
        .find(|class| class.name() == "Customer")
        .expect("merged Customer");
    assert_eq!(customer.attributes(), ["email", "name", "phone"]);
    assert_eq!((customer.x(), customer.y()), (5, 0));
}

#[test]
fn missing_input_fails_without_writing_output() {
    let dir = tempdir().expect("temp directory");
    let path_a = dir.path().join("revision_a.txt");
    let path_out = dir.path().join("merged.txt");

    fs::write(&path_a, "<1>]Class$(0,0)!Customer!;\n").expect("write revision A");

    let missing = dir.path().join("nope.txt");
    let result = concord_cli::run(&args(
        path_a.to_str().expect("utf-8 path"),
        missing.to_str().expect("utf-8 path"),
        path_out.to_str().expect("utf-8 path"),
    ));

    assert!(matches!(result, Err(ConcordError::Input { .. })));
    assert!(!path_out.exists(), "no output may be written on failure");
}

#[test]
fn explicit_config_controls_the_threshold() {
    let dir = tempdir().expect("temp directory");
    let path_a = dir.path().join("revision_a.txt");
    let path_b = dir.path().join("revision_b.txt");
    let path_out = dir.path().join("merged.txt");
    let path_config = dir.path().join("config.toml");

    // Different names sharing one attribute token: the total lands around
    // 0.53, below the default 0.6 threshold but above the configured 0.5,
    // so only the loaded config makes this pair match.
    fs::write(&path_a, "<1>]Class$(0,0)!Kunde!!-name%;\n").expect("write revision A");
    fs::write(&path_b, "<1>]Class$(0,0)!Client!!-name%;\n").expect("write revision B");
    fs::write(&path_config, "[matching]\nthreshold = 0.5\n").expect("write config");

    let mut cli_args = args(
        path_a.to_str().expect("utf-8 path"),
        path_b.to_str().expect("utf-8 path"),
        path_out.to_str().expect("utf-8 path"),
    );
    cli_args.config = Some(path_config.to_str().expect("utf-8 path").to_string());

    concord_cli::run(&cli_args).expect("run with config");

    let written = fs::read_to_string(&path_out).expect("merged output");
    let merged = MergeBuilder::default().decode(&written, Origin::FromA);
    assert_eq!(merged.class_count(), 1);
    assert_eq!(merged.classes()[0].name(), "Kunde");
}
