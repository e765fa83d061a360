//! API services.
//!
//! These contain the core business logic.
//!
//! If a service directly maps to an HTTP route, it will have an `http` module
//! and will implement `Into<axum::Router>`.

mod health;
pub use health::HealthService;

pub mod geocode;
pub use geocode::GeocodeService;

pub mod staticmap;
pub use staticmap::StaticMapService;
