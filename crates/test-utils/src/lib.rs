pub mod authenticators;
pub mod signers;
pub mod tokens;
pub mod users;

use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber filtered by `RUST_LOG`. Safe to call from
/// every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
