//! Console logging for the binary.
//!
//! Events from the library and the binary go through one `fmt` layer. The
//! level is taken from `RUST_LOG` and defaults to `info`, for example:
//!
//! ```bash
//! RUST_LOG=nearmint=debug nearmint --bulk 5
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true)
                .pretty(),
        )
        .try_init()?;
    Ok(())
}
