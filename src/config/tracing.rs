use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct TracingConfig
{
	/// Whether to emit logs at all.
	///
	/// Filtering is controlled by the `RUST_LOG` environment variable.
	pub enable: bool,
}

impl Default for TracingConfig
{
	fn default() -> Self
	{
		Self { enable: true }
	}
}
