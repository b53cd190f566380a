use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a console subscriber for the process.
///
/// Filter defaults to `info` and is overridable through `RUST_LOG`. Fails if
/// a global subscriber is already set, so embedding applications that bring
/// their own subscriber can simply skip this.
pub fn init_logger() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(false),
        )
        .try_init()?;

    Ok(())
}
