use cmistype_core::codec::WireFormat;
use cmistype_core::config::loader::ConfigLoader;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_full_config_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1

[output]
format = "json"
pretty = false

[logging]
level = "debug"
file_level = "trace"
file = "/tmp/cmistype.log"
"#;

    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path)).expect("should load");
    assert_eq!(rc.source.as_deref(), Some(cfg_path.as_path()));
    assert_eq!(rc.output.format, Some(WireFormat::Json));
    assert!(!rc.output.pretty);
    assert_eq!(rc.logging.level, "debug");
    assert_eq!(rc.logging.file_level.as_deref(), Some("trace"));
    assert_eq!(rc.logging.file, Some(PathBuf::from("/tmp/cmistype.log")));
}

#[test]
fn load_minimal_config_uses_defaults() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("cmistype/config.toml");
    write_file(&cfg_path, "version = 1\n");

    let rc = ConfigLoader::load(Some(&cfg_path)).expect("should load");
    assert_eq!(rc.output.format, None);
    assert!(rc.output.pretty);
    assert_eq!(rc.logging.level, "warn");
    assert!(rc.logging.file.is_none());
}

#[test]
fn log_file_path_is_expanded() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    write_file(
        &cfg_path,
        "version = 1\n[logging]\nfile = \"~/logs/out.log\"\n",
    );

    let rc = ConfigLoader::load(Some(&cfg_path)).expect("should load");
    let home = dirs::home_dir().expect("home directory");
    assert_eq!(rc.logging.file, Some(home.join("logs").join("out.log")));
}
