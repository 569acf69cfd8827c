use tracing_subscriber::EnvFilter;

/// Route client logs to the test output. Set `RUST_LOG=dial_client=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
