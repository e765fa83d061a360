//! Process-level runtime setup.

use std::io;

use tokio::runtime::{Builder, Runtime};

use crate::config::RuntimeConfig;

pub mod panic_hook;

/// Builds the multi-threaded tokio runtime the server runs on.
pub(crate) fn build(config: &RuntimeConfig) -> io::Result<Runtime>
{
	let mut builder = Builder::new_multi_thread();

	builder.enable_all();

	if let Some(n) = config.worker_threads {
		builder.worker_threads(n.get());
	}

	builder.build()
}
