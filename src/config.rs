//! Validated client configuration: credentials, base URL, and transport settings.
//!
//! Everything that can be wrong with a deployment (missing secret or issuer, a plaintext base
//! URL, an unreadable client certificate) surfaces from [`ClientConfigBuilder::build`], never
//! from an individual call.

// std
use std::{fs, path::PathBuf, time::Duration as StdDuration};
// crates.io
use http::HeaderValue;
use rustls_pemfile::Item;
// self
use crate::{
	_prelude::*,
	auth::{Credentials, SigningSecret},
	error::ConfigError,
};

/// `User-Agent` sent when no override is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("Pliance.Rust.SDK:", env!("CARGO_PKG_VERSION"));

/// Source of a PEM bundle holding the client private key and certificate chain.
#[derive(Clone)]
pub enum ClientCertificate {
	/// In-memory PEM bytes.
	Pem(Vec<u8>),
	/// Path to a PEM file, read once while building the configuration.
	File(PathBuf),
}
impl ClientCertificate {
	fn load(self) -> Result<ClientIdentity, ConfigError> {
		let pem = match self {
			Self::Pem(bytes) => bytes,
			Self::File(path) =>
				fs::read(&path).map_err(|source| ConfigError::ClientCertificateRead { path, source })?,
		};

		ClientIdentity::from_pem(pem)
	}
}
impl Debug for ClientCertificate {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Pem(_) => f.write_str("ClientCertificate::Pem(<redacted>)"),
			Self::File(path) => f.debug_tuple("ClientCertificate::File").field(path).finish(),
		}
	}
}

/// Loaded PEM bundle for mutual TLS; contains private key material and is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientIdentity(Vec<u8>);
impl ClientIdentity {
	/// Parses the bundle and checks that it carries a private key and at least one certificate.
	///
	/// Only key and certificate sections are accepted; text outside PEM sections is ignored.
	pub fn from_pem(pem: Vec<u8>) -> Result<Self, ConfigError> {
		let mut reader = pem.as_slice();
		let (mut keys, mut certificates) = (0_usize, 0_usize);

		for item in rustls_pemfile::read_all(&mut reader) {
			let item =
				item.map_err(|e| invalid_certificate(format!("bundle is not valid PEM ({e})")))?;

			match item {
				Item::X509Certificate(_) => certificates += 1,
				Item::Pkcs1Key(_) | Item::Pkcs8Key(_) | Item::Sec1Key(_) => keys += 1,
				_ =>
					return Err(invalid_certificate(
						"bundle holds a section that is neither a key nor a certificate",
					)),
			}
		}

		if keys == 0 {
			return Err(invalid_certificate("bundle has no private key"));
		}
		if certificates == 0 {
			return Err(invalid_certificate("bundle has no certificate"));
		}

		Ok(Self(pem))
	}

	/// Returns the raw PEM bytes. Callers must avoid logging them.
	pub fn expose(&self) -> &[u8] {
		&self.0
	}
}
impl Debug for ClientIdentity {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ClientIdentity(<redacted>)")
	}
}

/// Immutable, validated configuration shared by every call of a dispatcher.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Token-signing credentials.
	pub credentials: Credentials,
	/// Service root; always ends with `/` so endpoint paths are appended.
	pub base_url: Url,
	/// Optional mutual-TLS identity.
	pub client_identity: Option<ClientIdentity>,
	/// Optional whole-request timeout; the transport default applies when unset.
	pub timeout: Option<StdDuration>,
	/// `User-Agent` header value.
	pub user_agent: HeaderValue,
}
impl ClientConfig {
	/// Creates an empty builder.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
	/// HMAC signing secret.
	pub secret: Option<SigningSecret>,
	/// Token issuer.
	pub issuer: Option<String>,
	/// Raw base URL, parsed during [`build`](Self::build).
	pub base_url: Option<String>,
	/// Optional client certificate source.
	pub client_certificate: Option<ClientCertificate>,
	/// Optional request timeout.
	pub timeout: Option<StdDuration>,
	/// Optional `User-Agent` override.
	pub user_agent: Option<String>,
}
impl ClientConfigBuilder {
	/// Sets the HMAC signing secret.
	pub fn secret(mut self, secret: impl Into<SigningSecret>) -> Self {
		self.secret = Some(secret.into());

		self
	}

	/// Sets the token issuer.
	pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
		self.issuer = Some(issuer.into());

		self
	}

	/// Sets the service base URL (e.g. `https://local.pliance.io/`).
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());

		self
	}

	/// Attaches a client certificate for mutual TLS.
	pub fn client_certificate(mut self, certificate: ClientCertificate) -> Self {
		self.client_certificate = Some(certificate);

		self
	}

	/// Bounds each request by `timeout`.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Overrides the `User-Agent` header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let secret = self.secret.ok_or(ConfigError::MissingSecret)?;
		let issuer = self.issuer.ok_or(ConfigError::MissingIssuer)?;
		let credentials = Credentials::new(secret, issuer)?;
		let base_url = parse_base_url(self.base_url.ok_or(ConfigError::MissingBaseUrl)?)?;
		let client_identity = self.client_certificate.map(ClientCertificate::load).transpose()?;
		let user_agent = match self.user_agent {
			Some(value) => HeaderValue::from_str(&value)
				.map_err(|_| ConfigError::InvalidUserAgent { value })?,
			None => HeaderValue::from_static(DEFAULT_USER_AGENT),
		};

		Ok(ClientConfig {
			credentials,
			base_url,
			client_identity,
			timeout: self.timeout,
			user_agent,
		})
	}
}

fn invalid_certificate(reason: impl Into<String>) -> ConfigError {
	ConfigError::InvalidClientCertificate { reason: reason.into() }
}

fn parse_base_url(raw: String) -> Result<Url, ConfigError> {
	let mut url =
		Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidBaseUrl { url: raw, source })?;

	if url.cannot_be_a_base() {
		return Err(ConfigError::UnsupportedBaseUrl { url: url.to_string() });
	}

	validate_scheme(&url)?;

	url.set_query(None);
	url.set_fragment(None);

	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	Ok(url)
}

// Plain HTTP is tolerated for loopback hosts only, so local mock servers stay reachable.
fn validate_scheme(url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(ConfigError::InsecureBaseUrl { url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
		Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	}
}
