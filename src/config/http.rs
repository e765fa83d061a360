use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct HttpConfig
{
	/// The IP address the server should listen on.
	#[serde(default = "HttpConfig::default_ip")]
	pub ip: IpAddr,

	/// The port the server should listen on.
	#[serde(default = "HttpConfig::default_port")]
	pub port: u16,
}

impl HttpConfig
{
	/// Returns the address the server should listen on.
	pub fn socket_addr(&self) -> SocketAddr
	{
		SocketAddr::new(self.ip, self.port)
	}

	fn default_ip() -> IpAddr
	{
		IpAddr::V4(Ipv4Addr::LOCALHOST)
	}

	fn default_port() -> u16
	{
		3000
	}
}

impl Default for HttpConfig
{
	fn default() -> Self
	{
		Self { ip: Self::default_ip(), port: Self::default_port() }
	}
}
