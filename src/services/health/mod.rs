//! A very basic service that acts as a healthcheck.

mod http;

/// A service that simply responds if the API is healthy.
#[derive(Debug, Default, Clone, Copy)]
pub struct HealthService {}

impl HealthService
{
	/// Create a new [`HealthService`].
	pub fn new() -> Self
	{
		Self {}
	}

	/// Reports that the process is up.
	#[tracing::instrument(level = "trace", skip(self))]
	pub async fn status(&self) -> &'static str
	{
		"OK"
	}
}
