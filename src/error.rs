//! SDK-level error types shared by configuration, transport, and response classification.

// std
use std::path::PathBuf;
// self
use crate::_prelude::*;

/// SDK-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical SDK error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request-construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure before any HTTP response was obtained (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The service answered but signaled failure.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Token signing failed.
	#[error("Bearer token could not be signed.")]
	Token(#[from] jsonwebtoken::errors::Error),
}
impl Error {
	/// Returns the API-level failure, if the service answered and rejected the call.
	pub fn as_api(&self) -> Option<&ApiError> {
		match self {
			Self::Api(e) => Some(e),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised while constructing clients or requests.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Signing secret was not supplied or is empty.
	#[error("Signing secret is missing.")]
	MissingSecret,
	/// Token issuer was not supplied or is empty.
	#[error("Token issuer is missing.")]
	MissingIssuer,
	/// Base URL was not supplied.
	#[error("Base URL is missing.")]
	MissingBaseUrl,
	/// Base URL cannot be parsed.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Raw value that failed to parse.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL cannot carry relative endpoint paths (e.g. `mailto:` or `data:` URLs).
	#[error("Base URL `{url}` cannot be used as a base for endpoint paths.")]
	UnsupportedBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// Base URL does not use HTTPS and does not point at a loopback host.
	#[error("Base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// Endpoint path cannot be joined onto the base URL.
	#[error("Endpoint path `{path}` is invalid.")]
	InvalidPath {
		/// Endpoint path supplied by the descriptor.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Client certificate file could not be read.
	#[error("Client certificate `{}` could not be read.", path.display())]
	ClientCertificateRead {
		/// File path that failed to load.
		path: PathBuf,
		/// Underlying I/O failure.
		#[source]
		source: std::io::Error,
	},
	/// Client certificate bundle is not a usable PEM key + certificate chain.
	#[error("Client certificate is invalid: {reason}.")]
	InvalidClientCertificate {
		/// Human-readable validation failure.
		reason: String,
	},
	/// Configured `User-Agent` is not a valid header value.
	#[error("User agent `{value}` is not a valid header value.")]
	InvalidUserAgent {
		/// Rejected value.
		value: String,
	},
	/// The TLS stack refused the client certificate bundle.
	#[error("Client certificate was rejected by the TLS stack.")]
	ClientIdentityRejected {
		/// Transport-specific rejection.
		#[source]
		source: BoxError,
	},
	/// Outbound request could not be assembled (for example a header value with control
	/// characters).
	#[error("Request could not be assembled.")]
	InvalidRequest(#[from] http::Error),
	/// Acting identity failed local validation.
	#[error(transparent)]
	InvalidIdentity(#[from] crate::auth::IdentityError),
	/// Request payload could not be serialized to JSON.
	#[error("Request payload could not be serialized.")]
	PayloadSerialize(#[source] serde_json::Error),
	/// GET/DELETE payloads must be JSON objects so they can be encoded as query parameters.
	#[error("Query payload must be a JSON object, found {kind}.")]
	InvalidQueryPayload {
		/// JSON kind of the rejected payload.
		kind: &'static str,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's rejection of the client certificate bundle.
	pub fn client_identity_rejected(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::ClientIdentityRejected { source: Box::new(src) }
	}

	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request did not complete within the configured timeout.
	#[error("Request to the API timed out.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}

/// Failures signaled by the remote service.
///
/// A non-2xx status and a 2xx envelope with `success: false` are the same kind of failure with
/// different message content; [`Display`] renders the bare status number or the service message
/// so integrations matching on the text keep working.
#[derive(Debug, ThisError)]
pub enum ApiError {
	/// Non-2xx HTTP status; the body was not inspected.
	#[error("{status}")]
	Status {
		/// HTTP status code returned by the service.
		status: u16,
	},
	/// 2xx response whose envelope declared `success: false`.
	#[error("{message}")]
	Rejected {
		/// Message supplied by the service.
		message: String,
	},
	/// 2xx response whose body is not a valid result envelope.
	#[error("API returned a malformed response body (HTTP {status}).")]
	MalformedBody {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}
impl ApiError {
	/// Returns the HTTP status when the failure was classified by status code.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status } => Some(*status),
			_ => None,
		}
	}

	/// Returns the diagnostic text: the status number or the service message.
	pub fn message(&self) -> String {
		self.to_string()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn api_errors_render_status_or_message_verbatim() {
		let status: Error = ApiError::Status { status: 404 }.into();
		let rejected: Error = ApiError::Rejected { message: "Missing FirstName".into() }.into();

		assert_eq!(status.to_string(), "404");
		assert_eq!(rejected.to_string(), "Missing FirstName");
		assert_eq!(status.as_api().and_then(ApiError::status), Some(404));
		assert_eq!(rejected.as_api().map(ApiError::message).as_deref(), Some("Missing FirstName"));
		assert!(rejected.as_api().and_then(ApiError::status).is_none());
	}
}
