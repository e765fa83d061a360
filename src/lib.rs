//! The LOTAC API.
//!
//! This crate implements the HTTP handlers backing the LOTAC itinerary app
//! (geocoding and static map proxies), as well as the offline cache engine
//! that the app's service worker runs.

/*
 * LOTAC API
 *
 * Copyright (C) 2024  LOTAC <contact@lotac.vercel.app>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see https://www.gnu.org/licenses.
 */

use axum::Router;

#[macro_use]
extern crate tracing as _;

#[cfg(test)]
mod testing;

mod cli;
mod middleware;
mod response;
mod signal;

pub mod config;
pub use config::Config;

pub mod offline;
pub mod runtime;
pub mod server;
pub mod services;

/// Builds the HTTP client shared by every service.
///
/// Upstream usage policies (Nominatim in particular) require a distinctive
/// `User-Agent`, so it is set once here instead of per request.
pub fn http_client(config: &config::UpstreamConfig) -> reqwest::Result<reqwest::Client>
{
	reqwest::Client::builder()
		.user_agent(&*config.user_agent)
		.build()
}

/// Returns the top-level router.
///
/// This is what we pass to [`axum::serve()`].
pub fn router(config: &Config, http_client: reqwest::Client) -> Router
{
	use self::services::{GeocodeService, HealthService, StaticMapService};

	let health_svc = HealthService::new();
	let geocode_svc = GeocodeService::new(http_client.clone(), config.geocode.clone());
	let staticmap_svc = StaticMapService::new(http_client, config.staticmap.clone());

	Router::new()
		.merge(health_svc)
		.merge(geocode_svc)
		.merge(staticmap_svc)
		.layer(middleware::panic_handler::layer())
		.layer(middleware::trace::layer())
}
