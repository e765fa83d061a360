//! The HTTP server.

use std::io;

use clap::Parser;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::config::{self, Config};
use crate::{cli, runtime, signal};

/// Errors that can occur when running the server.
#[derive(Debug, Error)]
pub enum Error
{
	#[error(transparent)]
	ParseCliArguments(#[from] clap::error::Error),

	#[error(transparent)]
	LoadConfiguration(#[from] config::LoadFromFileError),

	#[error("failed to initialize tokio: {0}")]
	InitializeTokio(#[source] io::Error),

	#[error("failed to build http client: {0}")]
	HttpClient(#[from] reqwest::Error),

	#[error("failed to bind tcp socket: {0}")]
	BindTcpSocket(#[source] io::Error),

	#[error("failed to get tcp local addr: {0}")]
	GetTcpLocalAddr(#[source] io::Error),

	#[error("failed to run http server: {0}")]
	Serve(#[source] io::Error),
}

/// Runs the server.
///
/// This parses CLI arguments, loads the configuration, and blocks until the
/// process receives a shutdown signal.
pub fn run() -> Result<(), Error>
{
	let args = cli::Args::try_parse()?;
	let mut config = args.load_config()?;

	args.apply_to_config(&mut config);
	config.apply_environment();

	if config.tracing.enable {
		initialize_tracing();
	}

	runtime::build(&config.runtime)
		.map_err(Error::InitializeTokio)?
		.block_on(serve(config))
}

async fn serve(config: Config) -> Result<(), Error>
{
	let http_client = crate::http_client(&config.upstream)?;
	let tcp_listener = TcpListener::bind(config.http.socket_addr())
		.await
		.map_err(Error::BindTcpSocket)?;

	let local_addr = tcp_listener.local_addr().map_err(Error::GetTcpLocalAddr)?;

	info!("listening on '{local_addr}'");

	if config.staticmap.google_maps_key().is_none() {
		info!("no Google Maps key configured; static maps will only use OSM providers");
	}

	debug!(?config, "loaded configuration");

	let service = crate::router(&config, http_client);

	axum::serve(tcp_listener, service)
		.with_graceful_shutdown(signal::shutdown())
		.await
		.map_err(Error::Serve)
}

fn initialize_tracing()
{
	tracing_subscriber::fmt()
		.pretty()
		.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
		.with_env_filter(EnvFilter::from_default_env())
		.init();
}
