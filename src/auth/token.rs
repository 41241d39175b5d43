//! Short-lived HS256 bearer tokens minted fresh for every outbound call.

// crates.io
use jsonwebtoken::{Algorithm, EncodingKey, Header};
// self
use crate::{
	_prelude::*,
	auth::{ActingIdentity, Credentials},
};

/// Validity window of every issued token (`exp - iat`).
pub const TOKEN_LIFETIME: Duration = Duration::seconds(300);

/// Claim set asserted by an [`AuthToken`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
	/// Issued-at, Unix seconds.
	pub iat: i64,
	/// Not-before, always equal to `iat`.
	pub nbf: i64,
	/// Expiry, `iat` plus [`TOKEN_LIFETIME`].
	pub exp: i64,
	/// Audience, always [`AUDIENCE`](crate::auth::AUDIENCE).
	pub aud: String,
	/// Issuer taken from [`Credentials`].
	pub iss: String,
	/// Acting identity display name.
	pub given_name: String,
	/// Acting identity subject id.
	pub sub: String,
}
impl TokenClaims {
	/// Issued-at as a UTC instant, or `None` when `iat` is outside the representable range.
	pub fn issued_at(&self) -> Option<OffsetDateTime> {
		OffsetDateTime::from_unix_timestamp(self.iat).ok()
	}

	/// Expiry as a UTC instant, or `None` when `exp` is outside the representable range.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		OffsetDateTime::from_unix_timestamp(self.exp).ok()
	}
}

/// Signed compact token plus the claims it carries.
///
/// Tokens are single-use: the dispatcher consumes each one into exactly one request.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
	claims: TokenClaims,
	compact: String,
}
impl AuthToken {
	/// Claims embedded in the token.
	pub fn claims(&self) -> &TokenClaims {
		&self.claims
	}

	/// Returns the compact JWS string. Callers must avoid logging it.
	pub fn expose(&self) -> &str {
		&self.compact
	}

	/// Consumes the token into an `Authorization` header value.
	pub fn into_bearer(self) -> String {
		format!("Bearer {}", self.compact)
	}
}
impl Debug for AuthToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthToken")
			.field("claims", &self.claims)
			.field("compact", &"<redacted>")
			.finish()
	}
}

/// Mints [`AuthToken`]s from immutable [`Credentials`].
///
/// Issuing is a pure function of the clock, the credentials, and the identity, so one issuer
/// can be shared freely across concurrent callers.
#[derive(Clone)]
pub struct TokenIssuer {
	credentials: Credentials,
	key: EncodingKey,
}
impl TokenIssuer {
	/// Creates an issuer; credential validation already happened in [`Credentials::new`].
	pub fn new(credentials: Credentials) -> Self {
		let key = EncodingKey::from_secret(credentials.secret().expose());

		Self { credentials, key }
	}

	/// Credentials backing this issuer.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Issues a token for `identity` valid from now for [`TOKEN_LIFETIME`].
	///
	/// # Errors
	///
	/// Returns [`Error::Token`] only if the JWT library rejects the HMAC key, which does not
	/// happen for non-empty secrets.
	pub fn issue(&self, identity: &ActingIdentity) -> Result<AuthToken> {
		self.issue_at(identity, OffsetDateTime::now_utc())
	}

	/// Issues a token as if the clock read `instant` (truncated to whole seconds).
	///
	/// # Errors
	///
	/// See [`TokenIssuer::issue`].
	pub fn issue_at(&self, identity: &ActingIdentity, instant: OffsetDateTime) -> Result<AuthToken> {
		let iat = instant.unix_timestamp();
		let claims = TokenClaims {
			iat,
			nbf: iat,
			exp: iat + TOKEN_LIFETIME.whole_seconds(),
			aud: self.credentials.audience().to_owned(),
			iss: self.credentials.issuer().to_owned(),
			given_name: identity.display_name().to_owned(),
			sub: identity.subject_id().to_owned(),
		};
		let compact = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.key)?;

		Ok(AuthToken { claims, compact })
	}
}
impl Debug for TokenIssuer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenIssuer").field("credentials", &self.credentials).finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use jsonwebtoken::{DecodingKey, Validation};
	use time::macros;
	// self
	use super::*;

	fn issuer() -> TokenIssuer {
		TokenIssuer::new(
			Credentials::new("unit-secret", "Demo").expect("Credentials fixture should be valid."),
		)
	}

	fn identity() -> ActingIdentity {
		ActingIdentity::new("Adam", "1").expect("Identity fixture should be valid.")
	}

	#[test]
	fn claims_span_exactly_the_token_lifetime() {
		let instant = macros::datetime!(2025-11-10 12:00:00.750 UTC);
		let token =
			issuer().issue_at(&identity(), instant).expect("Issuing a token should succeed.");
		let claims = token.claims();

		assert_eq!(claims.iat, macros::datetime!(2025-11-10 12:00 UTC).unix_timestamp());
		assert_eq!(claims.nbf, claims.iat);
		assert_eq!(claims.exp - claims.iat, 300);
		assert_eq!(
			claims.expires_at().zip(claims.issued_at()).map(|(exp, iat)| exp - iat),
			Some(TOKEN_LIFETIME)
		);
		assert_eq!(claims.aud, "pliance.io");
		assert_eq!(claims.iss, "Demo");
		assert_eq!(claims.given_name, "Adam");
		assert_eq!(claims.sub, "1");
	}

	#[test]
	fn out_of_range_timestamps_have_no_instant() {
		let mut claims = issuer()
			.issue_at(&identity(), macros::datetime!(2025-11-10 12:00 UTC))
			.expect("Issuing a token should succeed.")
			.claims()
			.clone();

		claims.exp = i64::MAX;
		claims.iat = i64::MIN;

		assert_eq!(claims.expires_at(), None);
		assert_eq!(claims.issued_at(), None);
	}

	#[test]
	fn compact_token_verifies_with_the_shared_secret() {
		let instant = macros::datetime!(2025-11-10 12:00 UTC);
		let token =
			issuer().issue_at(&identity(), instant).expect("Issuing a token should succeed.");
		let mut validation = Validation::new(Algorithm::HS256);

		validation.validate_exp = false;
		validation.set_audience(&["pliance.io"]);
		validation.set_issuer(&["Demo"]);

		let decoded = jsonwebtoken::decode::<TokenClaims>(
			token.expose(),
			&DecodingKey::from_secret(b"unit-secret"),
			&validation,
		)
		.expect("Token should verify with the issuing secret.");

		assert_eq!(&decoded.claims, token.claims());
		assert_eq!(decoded.header.alg, Algorithm::HS256);
		assert!(
			jsonwebtoken::decode::<TokenClaims>(
				token.expose(),
				&DecodingKey::from_secret(b"other-secret"),
				&validation,
			)
			.is_err()
		);
	}

	#[test]
	fn debug_output_redacts_compact_token() {
		let token = issuer().issue(&identity()).expect("Issuing a token should succeed.");
		let rendered = format!("{token:?}");

		assert!(!rendered.contains(token.expose()));
		assert!(rendered.contains("<redacted>"));
		assert!(token.clone().into_bearer().starts_with("Bearer ey"));
	}
}
