use plinth_logger::{LogOutput, LogStream, MemoryWriter, Telemetry, get_logger, set_main_stream};

#[test]
fn main_output_writes_through_the_installed_stream() {
    let writer = MemoryWriter::new();
    set_main_stream(LogStream::Memory(writer.clone()));

    let _telemetry = Telemetry::builder()
        .name("integration-main-capture")
        .output(LogOutput::Main)
        .init()
        .expect("telemetry should initialize");

    tracing::info!("captured by the main stream");

    let logger = get_logger("capture-component");
    logger.info("component message");

    let contents = writer.contents();
    assert!(contents.contains("captured by the main stream"));
    assert!(contents.contains("component message"));
    assert!(contents.contains("capture-component"), "records should carry the logger field");
}
