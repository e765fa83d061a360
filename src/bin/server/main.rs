//! LOTAC API - geocoding & static map proxies for the LOTAC itinerary app.
//! Copyright (C) 2024  LOTAC <contact@lotac.vercel.app>
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU General Public License as published by
//! the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! This program is distributed in the hope that it will be useful,
//! but WITHOUT ANY WARRANTY; without even the implied warranty of
//! MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
//! GNU General Public License for more details.
//!
//! You should have received a copy of the GNU General Public License
//! along with this program. If not, see https://www.gnu.org/licenses.

/// The main server entrypoint for the API.
fn main() -> color_eyre::Result<()>
{
	color_eyre::install()?;

	// A missing `.env` file is fine; everything it could set has a default.
	dotenvy::dotenv().ok();

	lotac_api::runtime::panic_hook::install();
	lotac_api::server::run()?;

	Ok(())
}
