use std::fs;
use tempfile::TempDir;
use workshift::config::LoggingConfig;
use workshift::logger::Logger;

#[test]
fn test_config_based_logging_disabled() {
    // Test with logging disabled
    let logger = Logger::from_config(&LoggingConfig::default()).unwrap();
    assert!(!logger.is_enabled());
    assert!(logger.log_file().is_none());
    assert_eq!(logger.level(), log::LevelFilter::Info);

    logger.log("Test message".to_string());
    let logs = logger.get_logs();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].contains("Test message"));
}

#[test]
fn test_config_based_logging_enabled() {
    let config = LoggingConfig {
        enabled: true,
        level: "debug".to_string(),
    };
    let logger = Logger::from_config(&config).unwrap();
    assert!(logger.is_enabled());
    assert_eq!(logger.level(), log::LevelFilter::Debug);
    assert_eq!(logger.log_file().unwrap(), Logger::get_log_file_path().unwrap());
}

#[test]
fn test_invalid_level_is_rejected() {
    let config = LoggingConfig {
        enabled: false,
        level: "chatty".to_string(),
    };
    assert!(Logger::from_config(&config).is_err());
}

#[test]
fn test_logs_newest_first_and_clear() {
    let logger = Logger::new();
    logger.log("first".to_string());
    logger.log("second".to_string());

    let logs = logger.get_logs();
    assert!(logs[0].ends_with("second"));
    assert!(logs[1].ends_with("first"));

    // Clones share the buffer
    logger.clone().clear();
    assert!(logger.get_logs().is_empty());
}

#[test]
fn test_buffer_is_bounded() {
    let logger = Logger::new();
    for i in 0..1005 {
        logger.log(format!("line {}", i));
    }

    let logs = logger.get_logs();
    assert_eq!(logs.len(), 1000);
    assert!(logs[0].ends_with("line 1004"));
    assert!(logs[999].ends_with("line 5"));
}

#[test]
fn test_install_captures_records() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("logs").join("workshift.log");
    let logger = Logger::new().with_log_file(&log_path);
    assert!(logger.is_enabled());

    logger.install().unwrap();
    log::info!("Board 7 created");
    log::debug!("below the level");

    let logs = logger.get_logs();
    let line = logs.iter().find(|l| l.contains("Board 7 created")).unwrap();
    // Buffered lines carry the same timestamp, level and target as the file
    assert!(line.starts_with('['), "{}", line);
    assert!(line.contains("] INFO "), "{}", line);
    assert!(line.contains("logger: Board 7 created"), "{}", line);
    assert!(!logs.iter().any(|l| l.contains("below the level")));

    let file_content = fs::read_to_string(&log_path).unwrap();
    assert!(file_content.contains("Board 7 created"));

    // Only one global logger per process
    assert!(Logger::new().install().is_err());
}
