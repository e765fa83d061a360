//! HTTP middleware shared by every route.

pub(crate) mod panic_handler;
pub(crate) mod trace;
