//! Transport primitives for API calls.
//!
//! The module exposes [`ApiHttpClient`] alongside the [`HttpRequest`] and [`HttpResponse`]
//! aliases over the `http` crate's types, so downstream crates (and tests) can plug in their own
//! HTTP stack without touching token issuance or response classification. The crate ships
//! [`ReqwestHttpClient`] as the default implementation behind the `reqwest` feature.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError};
#[cfg(feature = "reqwest")] use crate::{config::ClientConfig, error::ConfigError};

/// Fully prepared outbound request.
///
/// The URI includes the query string for GET/DELETE; the body is empty unless a JSON payload is
/// sent. The `authorization` header value is marked sensitive so it never shows up in `Debug`.
pub type HttpRequest = http::Request<Vec<u8>>;
/// Raw response handed back by a transport.
pub type HttpResponse = http::Response<Vec<u8>>;

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of performing one API round trip.
///
/// Implementations must be `Send + Sync + 'static` so a dispatcher can be shared across tasks,
/// and must perform exactly one attempt per call: no retries, no redirects. Failures that occur
/// before an HTTP status is known map to [`TransportError`]; any status, including 4xx/5xx, is
/// returned as an [`HttpResponse`] for the dispatcher to classify.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves with the raw status, headers, and body.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Clients built by [`ReqwestHttpClient::from_config`] never follow redirects (the bearer token
/// must only reach the configured host), attach the configured client certificate, and keep
/// server certificate verification on; the crate offers no way to turn it off.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client honoring the TLS identity and timeout in `config`.
	pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
		let mut builder = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none());

		if let Some(identity) = &config.client_identity {
			let identity = reqwest::Identity::from_pem(identity.expose())
				.map_err(ConfigError::client_identity_rejected)?;

			builder = builder.identity(identity);
		}
		if let Some(timeout) = config.timeout {
			builder = builder.timeout(timeout);
		}

		Ok(Self(builder.build()?))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
		Box::pin(async move {
			let (parts, body) = request.into_parts();
			let mut builder =
				self.0.request(parts.method, parts.uri.to_string()).headers(parts.headers);

			if !body.is_empty() {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status();
			let headers = response.headers().clone();
			let mut http_response = HttpResponse::new(response.bytes().await?.to_vec());

			*http_response.status_mut() = status;
			*http_response.headers_mut() = headers;

			Ok(http_response)
		})
	}
}
