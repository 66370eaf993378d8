use meeple_common::observability::{LogFormat, LoggingConfig, init_logging};

#[test]
fn logs_land_in_the_configured_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = LoggingConfig {
        dir: Some(tmp.path().to_path_buf()),
        format: LogFormat::Json,
        stderr: true,
        filter: "debug".into(),
    };

    let path = init_logging(&cfg).expect("logging starts");
    assert_eq!(path.parent(), Some(tmp.path()));
    assert!(
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("meeple.log."))
    );
    tracing::info!(test = "init_logging", "logging.ready");

    // A second call keeps the first subscriber.
    let again = init_logging(&LoggingConfig::default()).unwrap();
    assert_eq!(again, path);
}
