use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use bytes::Bytes;

/// The formats a map image can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat
{
	Png,
	Jpeg,
	Webp,
	Svg,
}

impl ImageFormat
{
	/// Guesses the format of a provider response from its `Content-Type`.
	///
	/// Providers are only ever asked for raster images, and PNG is what
	/// they send when they don't say.
	pub fn sniff(content_type: Option<&str>) -> Self
	{
		let content_type = content_type.unwrap_or_default().to_ascii_lowercase();

		if content_type.contains("jpeg") {
			Self::Jpeg
		} else if content_type.contains("webp") {
			Self::Webp
		} else {
			Self::Png
		}
	}

	pub const fn mime(self) -> &'static str
	{
		match self {
			Self::Png => "image/png",
			Self::Jpeg => "image/jpeg",
			Self::Webp => "image/webp",
			Self::Svg => "image/svg+xml",
		}
	}
}

/// An encoded map image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapImage
{
	format: ImageFormat,
	bytes: Bytes,
}

impl MapImage
{
	pub fn new(format: ImageFormat, bytes: impl Into<Bytes>) -> Self
	{
		Self { format, bytes: bytes.into() }
	}

	pub fn format(&self) -> ImageFormat
	{
		self.format
	}

	pub fn bytes(&self) -> &Bytes
	{
		&self.bytes
	}

	pub fn into_bytes(self) -> Bytes
	{
		self.bytes
	}

	/// Encodes the image as a `data:` URI.
	pub fn to_data_url(&self) -> String
	{
		format!("data:{};base64,{}", self.format.mime(), BASE64_STANDARD.encode(&self.bytes))
	}
}
