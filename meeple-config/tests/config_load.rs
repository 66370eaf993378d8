use meeple_common::OutputFormat;
use meeple_common::observability::LogFormat;
use meeple_config::MeepleConfigLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn test_config_load() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
source:
  url_template: "https://hobbygames.ru/nastolnie/ekbg?page={page}&parameter_type=0"
crawl:
  pages: 4
  concurrency: 2
  timeout_secs: 20
selectors:
  age: ".age-badge"
output:
  format: json
logging:
  format: json
  stderr: true
  filter: "meeple=debug"
"#;
    let p = write_yaml(&tmp, "meeple.yaml", file_yaml);

    let config = MeepleConfigLoader::new()
        .with_file(p)
        .load()
        .expect("load config");

    assert_eq!(config.crawl.pages, 4);
    assert_eq!(config.crawl.concurrency, 2);
    assert_eq!(config.crawl.timeout_secs, Some(20));
    assert_eq!(config.crawl.first_page, 1);
    assert_eq!(config.selectors.age, ".age-badge");
    assert_eq!(config.selectors.title, ".name");
    assert_eq!(config.output.format, OutputFormat::Json);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.logging.stderr);
    assert_eq!(config.logging.filter, "meeple=debug");
}

#[test]
#[serial]
fn missing_optional_file_yields_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = MeepleConfigLoader::new()
        .with_optional_file(tmp.path().join("absent.yaml"))
        .load()
        .expect("defaults load");
    assert_eq!(config.crawl.pages, 9);
    assert_eq!(config.output.format, OutputFormat::Text);
}

#[test]
#[serial]
fn missing_required_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let result = MeepleConfigLoader::new()
        .with_file(tmp.path().join("absent.yaml"))
        .load();
    assert!(result.is_err());
}

#[test]
#[serial]
fn env_overrides_file() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "meeple.yaml", "crawl:\n  pages: 4\n  concurrency: 2\n");

    temp_env::with_vars(
        [
            ("MEEPLE__CRAWL__PAGES", Some("2")),
            ("MEEPLE__SELECTORS__CARD", Some(".tile")),
        ],
        || {
            let config = MeepleConfigLoader::new()
                .with_file(&p)
                .load()
                .expect("load with env");
            assert_eq!(config.crawl.pages, 2);
            assert_eq!(config.crawl.concurrency, 2);
            assert_eq!(config.selectors.card, ".tile");
        },
    );
}

#[test]
#[serial]
fn invalid_values_fail_validation() {
    let err = MeepleConfigLoader::new()
        .with_yaml_str("source:\n  url_template: \"https://example.com/list\"\n")
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("{page}"));
}
