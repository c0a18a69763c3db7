use std::time::Duration;

use webserver::config::{CONFIG_ENV, Config, LISTEN_ENV, ServeMode};

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.listen_addr, "0.0.0.0:8000");
    assert_eq!(cfg.mode, ServeMode::Serial);
    assert_eq!(cfg.read_timeout(), None);
    assert_eq!(cfg.max_header_lines, 256);
    assert!(!cfg.escape_path);
}

#[test]
fn test_config_from_yaml() {
    let yaml = r#"
listen_addr: "127.0.0.1:9000"
backlog: 16
mode: concurrent
read_timeout_ms: 2500
max_header_lines: 32
max_line_bytes: 1024
escape_path: true
"#;
    let cfg = Config::from_yaml_str(yaml).unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
    assert_eq!(cfg.backlog, 16);
    assert_eq!(cfg.mode, ServeMode::Concurrent);
    assert_eq!(cfg.read_timeout(), Some(Duration::from_millis(2500)));
    assert_eq!(cfg.max_header_lines, 32);
    assert_eq!(cfg.max_line_bytes, 1024);
    assert!(cfg.escape_path);
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml_str("escape_path: true\n").unwrap();

    assert!(cfg.escape_path);
    assert_eq!(cfg.listen_addr, "0.0.0.0:8000");
    assert_eq!(cfg.mode, ServeMode::Serial);
}

#[test]
fn test_config_empty_yaml_is_default() {
    let cfg = Config::from_yaml_str("  \n").unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:8000");
}

#[test]
fn test_config_rejects_unknown_fields() {
    assert!(Config::from_yaml_str("routes: []\n").is_err());
}

#[test]
fn test_config_rejects_unknown_mode() {
    assert!(Config::from_yaml_str("mode: forked\n").is_err());
}

#[test]
fn test_config_missing_file() {
    assert!(Config::from_file("/nonexistent/webserver.yaml").is_err());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.listen_addr, cfg2.listen_addr);
}

// Every env-var case lives in this one test so parallel tests never race on
// process environment.
#[test]
fn test_config_load_from_env() {
    let path = std::env::temp_dir().join(format!("webserver-test-{}.yaml", std::process::id()));
    std::fs::write(&path, "listen_addr: \"127.0.0.1:7000\"\nmode: concurrent\n").unwrap();

    unsafe {
        std::env::remove_var(CONFIG_ENV);
        std::env::remove_var(LISTEN_ENV);
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:8000");

    unsafe {
        std::env::set_var(CONFIG_ENV, &path);
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:7000");
    assert_eq!(cfg.mode, ServeMode::Concurrent);

    unsafe {
        std::env::set_var(LISTEN_ENV, "0.0.0.0:3000");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.mode, ServeMode::Concurrent);

    unsafe {
        std::env::remove_var(CONFIG_ENV);
        std::env::remove_var(LISTEN_ENV);
    }
    let _ = std::fs::remove_file(&path);
}
