use super::*;

#[tokio::test]
async fn test_mock_records_messages_in_order() {
    let log = Log::mock();
    log.info("test", "test message");
    log.warn("test", "warning message");
    log.error("other", 42);

    let messages = log.get_messages().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].level, LogLevel::Info);
    assert_eq!(messages[0].message, "test message");
    assert_eq!(messages[1].level, LogLevel::Warning);
    assert_eq!(messages[1].message, "warning message");
    assert_eq!(messages[2].scope, "other");
    assert_eq!(messages[2].message, "42");
}

#[tokio::test]
async fn test_log_warn_on_error() {
    let log = Log::mock();
    let ok: Result<u32, &str> = Ok(42);
    let err: Result<u32, &str> = Err("fail");
    assert_eq!(log.warn_on_error("test", ok), Ok(42));
    assert!(log.warn_on_error("test", err).is_err());

    let messages = log.get_messages().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].level, LogLevel::Warning);
    assert_eq!(messages[0].message, "fail");
}

#[tokio::test]
async fn test_log_error_on_error() {
    let log = Log::mock();
    let err: Result<(), String> = Err("boom".to_string());
    assert!(log.error_on_error("test", err).is_err());
    assert_eq!(log.get_messages().unwrap()[0].level, LogLevel::Error);
}

#[tokio::test]
async fn test_mock_flush_and_gc_are_noops() {
    let log = Log::mock();
    log.flush().await;
    log.collect_garbage().await;
    log.info("test", "still usable");
    assert_eq!(log.get_messages().unwrap().len(), 1);
}

#[tokio::test]
async fn test_actual_log_writes_files() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let log_dir = ArcPath::from(dir.path());
    let log = Log::spawn(LogLevel::Error, 0, log_dir.clone()).await?;
    assert!(log.get_messages().is_none());

    log.info("test", "written to file");
    log.warn("test", "also written");
    log.flush().await;

    let latest = tokio::fs::read_to_string(log_dir.join("latest.log")).await?;
    assert!(latest.contains("[INFO] [test] written to file"));
    assert!(latest.contains("[WARN] [test] also written"));

    let mut entries = tokio::fs::read_dir(&*log_dir).await?;
    let mut timestamped = 0;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_name().to_string_lossy().starts_with("snowflake-news_") {
            timestamped += 1;
        }
    }
    assert_eq!(timestamped, 1);
    Ok(())
}

#[tokio::test]
async fn test_messages_after_flush_are_dropped() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let log = Log::spawn(LogLevel::Error, 0, ArcPath::from(dir.path())).await?;
    log.flush().await;
    log.info("test", "nobody listens");
    log.flush().await;
    Ok(())
}
