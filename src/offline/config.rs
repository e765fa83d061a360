use url::Url;

/// Settings for an [`OfflineWorker`].
///
/// [`OfflineWorker`]: super::OfflineWorker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig
{
	/// Build version; part of every partition name.
	pub version: Box<str>,

	/// The app's own origin, e.g. `https://lotac.vercel.app`.
	pub origin: Url,

	/// Requests whose path starts with this are API calls.
	pub api_prefix: Box<str>,

	/// Assets fetched into the static partition on install.
	///
	/// Relative entries are resolved against `origin`.
	pub manifest: Vec<Box<str>>,
}

impl WorkerConfig
{
	/// The app shell.
	pub const DEFAULT_MANIFEST: [&'static str; 5] = [
		"/",
		"/manifest.json",
		"/icons/icon-192.png",
		"/icons/icon-512.png",
		"/icons/maskable-512.png",
	];

	/// Third-party scripts, styles and fonts the app used to load from CDNs.
	pub const CDN_ASSETS: [&'static str; 5] = [
		"https://cdn.jsdelivr.net/npm/html2pdf.js@0.10.1/dist/html2pdf.bundle.min.js",
		"https://cdn.jsdelivr.net/npm/flatpickr/dist/flatpickr.min.css",
		"https://cdn.jsdelivr.net/npm/flatpickr",
		"https://cdn.jsdelivr.net/npm/flatpickr/dist/l10n/fr.js",
		"https://fonts.googleapis.com/css2?family=Dancing+Script:wght@400;600&display=swap",
	];

	pub fn new(version: impl Into<Box<str>>, origin: Url) -> Self
	{
		Self {
			version: version.into(),
			origin,
			api_prefix: Box::from("/api/"),
			manifest: Self::DEFAULT_MANIFEST.into_iter().map(Box::from).collect(),
		}
	}

	/// Adds [`CDN_ASSETS`] to the install manifest.
	///
	/// [`CDN_ASSETS`]: Self::CDN_ASSETS
	pub fn with_cdn_assets(mut self) -> Self
	{
		self.manifest.extend(Self::CDN_ASSETS.into_iter().map(Box::from));
		self
	}

	pub fn static_partition(&self) -> String
	{
		format!("static-{}", self.version)
	}

	pub fn runtime_partition(&self) -> String
	{
		format!("runtime-{}", self.version)
	}

	/// Resolves the manifest into absolute URLs.
	pub fn manifest_urls(&self) -> Result<Vec<Url>, url::ParseError>
	{
		self.manifest
			.iter()
			.map(|entry| self.origin.join(entry))
			.collect()
	}
}
