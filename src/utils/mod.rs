pub mod paths;

use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

/// Installs the global tracing subscriber, honouring `RUST_LOG` when set. Called once through
/// [`crate::init`]; later installs are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy()
        .add_directive("wallet_core=info".parse().unwrap_or_else(|_| LevelFilter::INFO.into()));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
