//! Signs, sends, and classifies a single API call.
//!
//! [`RequestDispatcher::execute`] is the only place a request leaves the process: it mints a
//! fresh [`AuthToken`](crate::auth::AuthToken) for the acting identity, resolves the
//! descriptor against the base URL, performs exactly one round trip through the configured
//! [`ApiHttpClient`], and hands the raw response to [`response::classify`]. Nothing is retried
//! and nothing is cached; every call stands alone.

// crates.io
use http::{
	HeaderValue,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
};
// self
use crate::{
	_prelude::*,
	auth::{ActingIdentity, TokenIssuer},
	client::PlianceClient,
	config::ClientConfig,
	error::ConfigError,
	http::{ApiHttpClient, HttpRequest},
	obs::{self, RequestOutcome, RequestSpan},
	request::RequestDescriptor,
	response::{self, ApiResult},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

const JSON: &str = "application/json";

#[cfg(feature = "reqwest")]
/// Dispatcher specialized for the crate's default reqwest transport.
pub type ReqwestDispatcher = RequestDispatcher<ReqwestHttpClient>;

/// Owns the base URL, transport, and token issuer shared by every call.
///
/// All state is immutable and reference-counted, so clones are cheap and concurrent callers
/// never share a token or a request.
pub struct RequestDispatcher<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP client used for every outbound request.
	pub http_client: Arc<C>,
	config: Arc<ClientConfig>,
	issuer: Arc<TokenIssuer>,
}
impl<C> RequestDispatcher<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a dispatcher that reuses the caller-provided transport.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Self {
		let issuer = TokenIssuer::new(config.credentials.clone());

		Self {
			http_client: http_client.into(),
			config: Arc::new(config),
			issuer: Arc::new(issuer),
		}
	}

	/// Validated configuration backing this dispatcher.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Token issuer used for every call.
	pub fn token_issuer(&self) -> &TokenIssuer {
		&self.issuer
	}

	/// Binds an acting identity, returning the per-operation facade.
	pub fn client(&self, identity: ActingIdentity) -> PlianceClient<C> {
		PlianceClient::new(self.clone(), identity)
	}

	/// Performs one authenticated call and classifies the outcome.
	///
	/// # Errors
	///
	/// - [`Error::Config`] when the descriptor cannot be turned into a request.
	/// - [`Error::Transport`] when no HTTP response was obtained.
	/// - [`Error::Api`] for a non-2xx status (body not parsed), a malformed body, or a 2xx
	///   envelope with `success: false`.
	pub async fn execute(
		&self,
		descriptor: &RequestDescriptor,
		identity: &ActingIdentity,
	) -> Result<ApiResult> {
		let verb = descriptor.verb;
		let span = RequestSpan::new(verb, &descriptor.path);

		obs::record_request_outcome(verb, RequestOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = self.prepare(descriptor, identity)?;
				let response = self.http_client.execute(request).await?;

				Ok::<_, Error>(response::classify(response)?)
			})
			.await;

		span.record_result(&result);

		match &result {
			Ok(_) => obs::record_request_outcome(verb, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(verb, RequestOutcome::Failure),
		}

		result
	}

	/// Builds the outbound request, consuming a freshly issued token.
	fn prepare(
		&self,
		descriptor: &RequestDescriptor,
		identity: &ActingIdentity,
	) -> Result<HttpRequest> {
		let (url, body) = descriptor.resolve(&self.config.base_url)?;
		let token = self.issuer.issue(identity)?;
		let mut authorization = HeaderValue::try_from(token.into_bearer())
			.map_err(|e| ConfigError::InvalidRequest(e.into()))?;

		authorization.set_sensitive(true);

		let mut builder = http::Request::builder()
			.method(descriptor.verb.method())
			.uri(url.as_str())
			.header(AUTHORIZATION, authorization)
			.header(USER_AGENT, self.config.user_agent.clone())
			.header(ACCEPT, HeaderValue::from_static(JSON));

		if body.is_some() {
			builder = builder.header(CONTENT_TYPE, HeaderValue::from_static(JSON));
		}

		Ok(builder.body(body.unwrap_or_default()).map_err(ConfigError::InvalidRequest)?)
	}
}
#[cfg(feature = "reqwest")]
impl RequestDispatcher<ReqwestHttpClient> {
	/// Creates a dispatcher with a reqwest transport built from `config`.
	///
	/// # Errors
	///
	/// Returns [`Error::Config`] when the TLS identity is rejected or the client cannot be
	/// built.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::from_config(&config)?;

		Ok(Self::with_http_client(config, http_client))
	}
}
impl<C> Clone for RequestDispatcher<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			config: Arc::clone(&self.config),
			issuer: Arc::clone(&self.issuer),
		}
	}
}
impl<C> Debug for RequestDispatcher<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestDispatcher")
			.field("base_url", &self.config.base_url.as_str())
			.field("issuer", &self.config.credentials.issuer())
			.field("client_identity_set", &self.config.client_identity.is_some())
			.finish()
	}
}
