use assert_cmd::prelude::*;
use cmistype_core::codec;
use predicates::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../core/tests/fixtures").join(name)
}

fn cmistype(xdg: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cmistype"));
    cmd.env("XDG_CONFIG_HOME", xdg);
    cmd
}

#[test]
fn convert_xml_to_json_on_stdout() {
    let tmp = tempdir().unwrap();
    let output = cmistype(tmp.path())
        .arg("convert")
        .arg(fixture("invoice_type.xml"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let converted = codec::read_json(output.stdout.as_slice()).unwrap();
    let original = codec::read_xml(File::open(fixture("invoice_type.xml")).unwrap()).unwrap();
    assert_eq!(converted, original);
}

#[test]
fn convert_json_to_xml_file() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("invoice.xml");

    cmistype(tmp.path())
        .arg("convert")
        .arg(fixture("invoice_type.json"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("xsi:type=\"cmis:cmisTypeDocumentDefinitionType\""));

    let converted = codec::read_xml(File::open(&out).unwrap()).unwrap();
    let original = codec::read_json(File::open(fixture("invoice_type.json")).unwrap()).unwrap();
    assert_eq!(converted, original);
}

#[test]
fn convert_honours_configured_compact_json() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    fs::write(&cfg, "version = 1\n[output]\nformat = \"json\"\npretty = false\n").unwrap();

    let output = cmistype(tmp.path())
        .arg("--config")
        .arg(&cfg)
        .args(["convert", "--from", "json"])
        .arg(fixture("invoice_type.json"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("{\"id\":\"acme:invoice\""));
}

#[test]
fn convert_refuses_json_without_base() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("nobase.xml");
    fs::write(
        &input,
        r#"<cmis:typeDefinition xmlns:cmis="http://docs.oasis-open.org/ns/cmis/core/200908/"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xsi:type="cmis:cmisTypeFolderDefinitionType">
  <cmis:id>acme:box</cmis:id>
</cmis:typeDefinition>"#,
    )
    .unwrap();

    cmistype(tmp.path())
        .args(["convert", "--to", "json"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error writing JSON"));
}

#[test]
fn convert_failure_leaves_existing_output_untouched() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("previous.json");
    fs::write(&out, "{\"id\":\"previous\"}").unwrap();

    // document variant declaring a folder base cannot be written as JSON
    cmistype(tmp.path())
        .arg("convert")
        .arg(fixture("broken_folder.xml"))
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error writing JSON"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "{\"id\":\"previous\"}");
}
