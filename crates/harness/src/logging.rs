//! Logging setup for harness consumers and test binaries.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Initializes compact stderr logging.
///
/// `RUST_LOG` overrides the verbosity mapping. Calling this more than once
/// (as parallel test binaries do) keeps the first subscriber.
pub fn init(verbosity: u8) {
	// 0 = errors only
	// 1 (-v) = lifecycle/driver info
	// 2+ (-vv) = full transition tracing
	let filter = match verbosity {
		0 => "error",
		1 => "info",
		_ => "debug",
	};

	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	let _ = tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_target(true)
		.with_level(true)
		.compact()
		.try_init();
}
