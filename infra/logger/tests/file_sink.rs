use genu_logger::{LevelFilter, Logger};
use serial_test::serial;
use std::time::Duration;

#[test]
#[serial]
fn json_file_sink_writes_records() {
    let dir = tempfile::tempdir().expect("temp dir");
    let log_dir = dir.path().join("logs");

    let logger = Logger::builder()
        .name("genu-file")
        .console(false)
        .path(&log_dir)
        .json_file()
        .level(LevelFilter::INFO)
        .init()
        .expect("logger init");
    assert!(logger.has_file_sink());

    tracing::info!(unit = "GuardrailStack", "unit created");
    drop(logger);
    std::thread::sleep(Duration::from_millis(20));

    let contents: String = std::fs::read_dir(&log_dir)
        .expect("log dir exists")
        .flatten()
        .filter(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("log"))
        .map(|entry| std::fs::read_to_string(entry.path()).unwrap_or_default())
        .collect();

    assert!(contents.contains("\"unit\":\"GuardrailStack\""), "got: {contents}");
}
