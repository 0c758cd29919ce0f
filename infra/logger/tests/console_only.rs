use plinth_logger::{LogLevel, Telemetry, main_stream};

#[test]
fn init_console_only_has_no_guard() {
    let telemetry = Telemetry::builder()
        .name("integration-console-only")
        .console(true)
        .level(LogLevel::Info)
        .init()
        .expect("telemetry should initialize");

    assert!(telemetry.guard().is_none(), "console-only telemetry should not create a file guard");
    assert!(main_stream().is_none(), "console-only telemetry should not install a main stream");
}
