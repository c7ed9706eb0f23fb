//! Real subprocesses through ProcessRunner and the default validator set

use spdx_verify::config::ValidatorConfig;
use spdx_verify::runner::validate_file;
use spdx_verify::tool::ProcessRunner;

use crate::support::harness::ToolsHarness;

#[test]
#[serial_test::serial]
fn test_default_tools_resolved_from_tools_dir() {
    let harness = ToolsHarness::with_java_tools();
    let doc = harness.document("doc.spdx");

    let tools = ValidatorConfig::default().resolve(&harness.tools_dir);
    let report = validate_file(&doc, &tools, &ProcessRunner).unwrap();

    assert_eq!(report.sections.len(), 2);
    assert_eq!(report.sections[0].tool, "new java-tools");
    assert_eq!(report.sections[0].lines, vec!["OK"]);
    assert!(report.sections[0].noise_removed);
    assert_eq!(report.sections[1].tool, "old java-tools");
    assert_eq!(report.sections[1].lines, vec!["ERROR: bad SPDX-ID"]);
    assert_eq!(report.sections[1].exit_code, Some(1));
}

#[test]
#[serial_test::serial]
fn test_file_path_is_last_argument() {
    let harness = ToolsHarness::new();
    harness.add_script("echo-args.sh", "for a in \"$@\"; do echo \"arg:$a\"; done\n");
    let config = harness.write_config(
        "tools:\n  - name: args\n    program: echo-args.sh\n    args: [Verify, --strict]\n",
    );
    let doc = harness.document("my doc.spdx");

    let tools = ValidatorConfig::load_from(&config)
        .unwrap()
        .resolve(&harness.tools_dir);
    let report = validate_file(&doc, &tools, &ProcessRunner).unwrap();

    assert_eq!(
        report.sections[0].lines,
        vec![
            "arg:Verify".to_string(),
            "arg:--strict".to_string(),
            format!("arg:{}", doc),
        ]
    );
}

#[test]
#[serial_test::serial]
fn test_silent_tool_produces_empty_section() {
    let harness = ToolsHarness::new();
    harness.add_script("silent.sh", "exit 0\n");
    let config = harness.write_config("tools:\n  - name: silent\n    program: silent.sh\n");
    let doc = harness.document("doc.spdx");

    let tools = ValidatorConfig::load_from(&config)
        .unwrap()
        .resolve(&harness.tools_dir);
    let report = validate_file(&doc, &tools, &ProcessRunner).unwrap();

    assert_eq!(report.sections.len(), 1);
    assert!(report.sections[0].lines.is_empty());
    assert_eq!(report.sections[0].exit_code, Some(0));
}

#[test]
#[serial_test::serial]
fn test_missing_executable_is_error() {
    let harness = ToolsHarness::new();
    let doc = harness.document("doc.spdx");

    let tools = ValidatorConfig::default().resolve(&harness.tools_dir);
    let err = validate_file(&doc, &tools, &ProcessRunner).unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("new java-tools"));
    assert!(message.contains("spdx-tools-java.sh"));
}
