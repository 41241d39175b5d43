//! Token-signing credentials with a redacted secret.

// self
use crate::{_prelude::*, error::ConfigError};

/// Audience claim expected by the service on every token.
pub const AUDIENCE: &str = "pliance.io";

/// Redacted HMAC signing secret keeping key material out of logs.
///
/// String secrets are used as their UTF-8 bytes; a hex-looking secret is not decoded.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);
impl SigningSecret {
	/// Wraps raw secret bytes.
	pub fn new(value: impl Into<Vec<u8>>) -> Self {
		Self(value.into())
	}

	/// Returns the raw key bytes. Callers must avoid logging them.
	pub fn expose(&self) -> &[u8] {
		&self.0
	}

	/// Returns `true` when no key material was supplied.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl From<&str> for SigningSecret {
	fn from(value: &str) -> Self {
		Self::new(value.as_bytes())
	}
}
impl From<String> for SigningSecret {
	fn from(value: String) -> Self {
		Self::new(value.into_bytes())
	}
}
impl From<&[u8]> for SigningSecret {
	fn from(value: &[u8]) -> Self {
		Self::new(value)
	}
}
impl From<Vec<u8>> for SigningSecret {
	fn from(value: Vec<u8>) -> Self {
		Self::new(value)
	}
}
impl Debug for SigningSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SigningSecret").field(&"<redacted>").finish()
	}
}
impl Display for SigningSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Immutable signing material: secret, issuer, and the fixed [`AUDIENCE`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	secret: SigningSecret,
	issuer: String,
}
impl Credentials {
	/// Validates and wraps the signing secret and issuer.
	pub fn new(
		secret: impl Into<SigningSecret>,
		issuer: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let secret = secret.into();
		let issuer = issuer.into();

		if secret.is_empty() {
			return Err(ConfigError::MissingSecret);
		}
		if issuer.trim().is_empty() {
			return Err(ConfigError::MissingIssuer);
		}

		Ok(Self { secret, issuer })
	}

	/// Signing secret.
	pub fn secret(&self) -> &SigningSecret {
		&self.secret
	}

	/// Issuer claim (`iss`).
	pub fn issuer(&self) -> &str {
		&self.issuer
	}

	/// Audience claim (`aud`), always [`AUDIENCE`].
	pub fn audience(&self) -> &'static str {
		AUDIENCE
	}
}
