//! Demonstrates plugging a custom transport into the dispatcher.
//!
//! 1. Implement [`ApiHttpClient`] for any type that can perform one round trip.
//! 2. Pass it to [`RequestDispatcher::with_http_client`].
//! 3. Bind an [`ActingIdentity`] and call operations as usual; classification and token
//!    issuance do not depend on the transport.

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
};
// crates.io
use color_eyre::Result;
use http::header::AUTHORIZATION;
use serde_json::json;
// self
use pliance_sdk::{
	auth::ActingIdentity,
	config::ClientConfig,
	dispatch::RequestDispatcher,
	error::{Error, TransportError},
	http::{ApiHttpClient, HttpFuture, HttpRequest, HttpResponse},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = || {
		ClientConfig::builder()
			.secret("demo-secret")
			.issuer("Demo")
			.base_url("https://demo.pliance.io/")
			.build()
	};
	let identity = ActingIdentity::new("Demo Operator", "demo-operator")?;
	let client =
		RequestDispatcher::<MockHttpClient>::with_http_client(config()?, MockHttpClient::Success)
			.client(identity.clone());
	let pong = client.ping(&json!({})).await?;

	println!("Mock transport answered: {}.", pong.message);

	let rejecting =
		RequestDispatcher::<MockHttpClient>::with_http_client(config()?, MockHttpClient::Rejecting)
			.client(identity.clone());

	match rejecting.register_person(&json!({ "lastName": "Doe" })).await {
		Ok(_) => println!("Mock transport unexpectedly accepted the registration."),
		Err(Error::Api(e)) => println!("Service rejected the call: {e}."),
		Err(e) => println!("Unexpected failure: {e}."),
	}

	let failing = RequestDispatcher::<MockHttpClient>::with_http_client(
		config()?,
		MockHttpClient::Failing(MockTransportError::DnsFailure { host: "demo.pliance.io" }),
	)
	.client(identity);

	match failing.ping(&json!({})).await {
		Ok(_) => println!("Mock transport unexpectedly succeeded."),
		Err(Error::Transport(e)) => println!("Transport failure surfaced unchanged: {e}."),
		Err(e) => println!("Unexpected failure: {e}."),
	}

	Ok(())
}

#[derive(Clone, Debug)]
enum MockTransportError {
	DnsFailure { host: &'static str },
}
impl Display for MockTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::DnsFailure { host } => write!(f, "DNS lookup failed for {host}"),
		}
	}
}
impl StdError for MockTransportError {}

enum MockHttpClient {
	Success,
	Rejecting,
	Failing(MockTransportError),
}
impl ApiHttpClient for MockHttpClient {
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
		println!(
			"{} {} (bearer attached: {}).",
			request.method(),
			request.uri(),
			request.headers().contains_key(AUTHORIZATION)
		);

		let outcome = match self {
			Self::Success =>
				Ok(HttpResponse::new(b"{\"success\":true,\"message\":\"Pong\"}".to_vec())),
			Self::Rejecting => Ok(HttpResponse::new(
				b"{\"success\":false,\"message\":\"Missing FirstName\"}".to_vec(),
			)),
			Self::Failing(error) => Err(TransportError::network(error.clone())),
		};

		Box::pin(async move { outcome })
	}
}
