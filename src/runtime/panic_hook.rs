//! Global panic hook that routes panics through `tracing`.
//!
//! Handler panics are also caught by the HTTP layer, but panics on other tasks
//! (or before the server is up) only ever reach this hook.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic;

use crate::middleware::panic_handler::panic_message;

/// Installs our custom global panic hook.
///
/// The previous hook still runs afterwards.
pub fn install()
{
	let old_hook = panic::take_hook();

	panic::set_hook(Box::new(move |info| {
		let message = panic_message(info.payload()).unwrap_or("<non-string payload>");
		let location = info
			.location()
			.map(|location| location.to_string())
			.unwrap_or_default();

		// Only pay for a backtrace when `RUST_BACKTRACE` asks for one.
		let backtrace = Backtrace::capture();

		if backtrace.status() == BacktraceStatus::Captured {
			error!(
				target: "lotac_api::runtime::panics",
				%location,
				%backtrace,
				"thread panicked: {message}",
			);
		} else {
			error!(target: "lotac_api::runtime::panics", %location, "thread panicked: {message}");
		}

		old_hook(info)
	}));
}
