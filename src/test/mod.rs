//! Helpers shared by the unit tests.


/// Installs a subscriber printing `tracing` events that pass `RUST_LOG` into the test output. Only
/// the first call does anything.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
