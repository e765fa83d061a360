//! The image served when no provider could deliver.

use super::{ImageFormat, MapImage};

pub const HEADLINE: &str = "🥺 carte indisponible";
pub const SUBLINE: &str = "réessaie dans un instant";

/// Renders a `width`×`height` SVG placeholder.
pub fn render(width: u32, height: u32) -> MapImage
{
	let x = f64::from(width) / 2.0;
	let headline_y = f64::from(height) / 2.0 - 10.0;
	let subline_y = f64::from(height) / 2.0 + 22.0;
	let svg = format!(
		r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}">
  <defs><linearGradient id="g" x1="0" y1="0" x2="1" y2="1">
    <stop offset="0" stop-color="#f6f7f9"/><stop offset="1" stop-color="#eceef1"/>
  </linearGradient></defs>
  <rect width="100%" height="100%" fill="url(#g)"/>
  <g fill="#c0392b" font-family="system-ui,-apple-system,Segoe UI,Roboto,Arial" text-anchor="middle">
    <text x="{x}" y="{headline_y}" font-size="22">{HEADLINE}</text>
    <text x="{x}" y="{subline_y}" font-size="14" fill="#7f8c8d">{SUBLINE}</text>
  </g>
</svg>
"##
	);

	MapImage::new(ImageFormat::Svg, svg)
}
