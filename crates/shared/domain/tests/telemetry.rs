use plinth_domain::telemetry::{LogLevel, LogOutput, OverflowPolicy, TelemetryConfig};
use serde_json::json;

#[test]
fn telemetry_defaults_are_sane() {
    let cfg = TelemetryConfig::default();
    assert_eq!(cfg.service_name, "plinth");
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert_eq!(cfg.log_output, LogOutput::Stderr);
    assert!((cfg.sample_rate - 1.0).abs() < f64::EPSILON);
    assert_eq!(cfg.buffer_capacity, 1024);
    assert_eq!(cfg.overflow_policy, OverflowPolicy::DropOldest);
    assert!(cfg.port.is_none());
}

#[test]
fn telemetry_config_deserializes() {
    let raw = json!({
        "service_name": "ingest",
        "log_level": "debug",
        "log_output": "stdout",
        "sample_rate": 0.25,
        "overflow_policy": "drop_newest",
        "port": 4317
    });

    let cfg: TelemetryConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.service_name, "ingest");
    assert_eq!(cfg.log_level, LogLevel::Debug);
    assert_eq!(cfg.log_output, LogOutput::Stdout);
    assert_eq!(cfg.overflow_policy, OverflowPolicy::DropNewest);
    assert_eq!(cfg.port, Some(4317));
    // Unset fields fall back to defaults.
    assert_eq!(cfg.buffer_capacity, 1024);
}

#[test]
fn log_levels_order_by_verbosity() {
    assert!(LogLevel::Trace < LogLevel::Debug);
    assert!(LogLevel::Debug < LogLevel::Info);
    assert!(LogLevel::Info < LogLevel::Warn);
    assert!(LogLevel::Warn < LogLevel::Error);

    assert!(LogLevel::Info.allows(LogLevel::Error));
    assert!(LogLevel::Info.allows(LogLevel::Info));
    assert!(!LogLevel::Info.allows(LogLevel::Debug));
}

#[test]
fn level_names_parse_case_insensitively() {
    assert_eq!("WARN".parse::<LogLevel>().expect("parse level"), LogLevel::Warn);
    assert_eq!("trace".parse::<LogLevel>().expect("parse level"), LogLevel::Trace);
    assert!("warning".parse::<LogLevel>().is_err());

    assert_eq!("Main".parse::<LogOutput>().expect("parse output"), LogOutput::Main);
    assert_eq!(
        "DROP_OLDEST".parse::<OverflowPolicy>().expect("parse policy"),
        OverflowPolicy::DropOldest
    );
}
