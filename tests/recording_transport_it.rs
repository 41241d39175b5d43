// std
use std::{collections::HashSet, sync::Arc};
// crates.io
use http::{
	Method,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use parking_lot::Mutex;
use serde_json::{Value, json};
use url::Url;
// self
use pliance_sdk::{
	auth::{ActingIdentity, TokenClaims},
	config::ClientConfig,
	dispatch::RequestDispatcher,
	endpoint::Endpoint,
	http::{ApiHttpClient, HttpFuture, HttpRequest, HttpResponse},
};

const SECRET: &str = "recording-secret";

/// Transport that records every request and answers with an echo of the request payload.
#[derive(Default)]
struct RecordingHttpClient {
	requests: Mutex<Vec<Arc<HttpRequest>>>,
}
impl RecordingHttpClient {
	fn recorded(&self) -> Vec<Arc<HttpRequest>> {
		self.requests.lock().clone()
	}
}
impl ApiHttpClient for RecordingHttpClient {
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
		let echo = if request.body().is_empty() {
			let url = url_of(&request);

			Value::Object(url.query_pairs().into_owned().map(|(k, v)| (k, Value::String(v))).collect())
		} else {
			serde_json::from_slice::<Value>(request.body()).unwrap_or(Value::Null)
		};

		self.requests.lock().push(Arc::new(request));

		let body = json!({ "success": true, "message": "", "data": echo });

		Box::pin(async move { Ok(HttpResponse::new(body.to_string().into_bytes())) })
	}
}

fn url_of(request: &HttpRequest) -> Url {
	Url::parse(&request.uri().to_string()).expect("Recorded URI should be an absolute URL.")
}

fn bearer(request: &HttpRequest) -> &str {
	request
		.headers()
		.get(AUTHORIZATION)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.strip_prefix("Bearer "))
		.expect("Every request must carry a bearer.")
}

fn build_dispatcher() -> (RequestDispatcher<RecordingHttpClient>, Arc<RecordingHttpClient>) {
	let config = ClientConfig::builder()
		.secret(SECRET)
		.issuer("Demo")
		.base_url("https://local.pliance.io/")
		.build()
		.expect("Client config fixture should be valid.");
	let transport = Arc::new(RecordingHttpClient::default());

	(RequestDispatcher::with_http_client(config, transport.clone()), transport)
}

fn decode(token: &str) -> TokenClaims {
	let mut validation = Validation::new(Algorithm::HS256);

	validation.set_audience(&["pliance.io"]);
	validation.set_issuer(&["Demo"]);

	jsonwebtoken::decode::<TokenClaims>(token, &DecodingKey::from_secret(SECRET.as_bytes()), &validation)
		.expect("Recorded token should verify against the shared secret.")
		.claims
}

#[tokio::test]
async fn body_verbs_send_json_and_query_verbs_send_parameters() {
	let (dispatcher, transport) = build_dispatcher();
	let client = dispatcher
		.client(ActingIdentity::new("Adam Furtenbach", "1337").expect("Identity should be valid."));
	let command = json!({
		"personReferenceId": "ref-1",
		"aliasId": "a1",
		"matchId": "m1",
		"classification": "FalsePositive",
	});
	let classified =
		client.classify_person_hit(&command).await.expect("Classify should succeed.");
	let viewed = client
		.view_person(&json!({ "personReferenceId": "ref-1" }))
		.await
		.expect("View should succeed.");

	assert_eq!(classified.data, command);
	assert_eq!(viewed.data["personReferenceId"], "ref-1");

	let recorded = transport.recorded();

	assert_eq!(recorded.len(), 2);
	assert_eq!(recorded[0].method(), Method::POST);
	assert_eq!(recorded[0].uri(), "https://local.pliance.io/api/PersonCommand/Classify");
	assert_eq!(recorded[0].headers()[CONTENT_TYPE], "application/json");
	assert_eq!(recorded[1].method(), Method::GET);
	assert_eq!(url_of(&recorded[1]).query(), Some("personReferenceId=ref-1"));
	assert!(recorded[1].body().is_empty());
	assert!(recorded[1].headers().get(CONTENT_TYPE).is_none());

	for request in &recorded {
		let claims = decode(bearer(request));

		assert_eq!(claims.given_name, "Adam Furtenbach");
		assert_eq!(claims.sub, "1337");
		assert_eq!(claims.exp - claims.iat, 300);
		assert_eq!(claims.nbf, claims.iat);
	}
}

#[tokio::test]
async fn every_operation_routes_to_its_table_entry() {
	let (dispatcher, transport) = build_dispatcher();
	let client = dispatcher.client(ActingIdentity::new("Adam", "1").expect("Identity should be valid."));

	for endpoint in Endpoint::ALL {
		client.call(*endpoint, &json!({})).await.expect("Echo transport should succeed.");
	}

	let recorded = transport.recorded();

	assert_eq!(recorded.len(), Endpoint::ALL.len());

	for (endpoint, request) in Endpoint::ALL.iter().zip(&recorded) {
		assert_eq!(request.method(), endpoint.verb().method());
		assert_eq!(request.uri().path(), format!("/{}", endpoint.path()));
	}
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_never_share_tokens_or_payloads() {
	let (dispatcher, transport) = build_dispatcher();
	let shared = dispatcher.client(ActingIdentity::new("Shared", "0").expect("Identity should be valid."));
	let mut handles = Vec::new();

	for n in 0..32 {
		let dispatcher = dispatcher.clone();
		let shared = shared.clone();

		handles.push(tokio::spawn(async move {
			let own = dispatcher.client(
				ActingIdentity::new(format!("User {n}"), format!("subject-{n}"))
					.expect("Identity should be valid."),
			);
			let tag = format!("own-{n}");
			let result = own
				.register_person(&json!({ "personReferenceId": tag }))
				.await
				.expect("Concurrent call should succeed.");

			assert_eq!(result.data["personReferenceId"], tag.as_str());

			shared
				.search_person(&json!({ "query": format!("shared-{n}") }))
				.await
				.expect("Concurrent shared-identity call should succeed.");
		}));
	}
	for handle in handles {
		handle.await.expect("Task should not panic.");
	}

	let recorded = transport.recorded();
	let mut tokens = HashSet::new();

	assert_eq!(recorded.len(), 64);

	for request in &recorded {
		let token = bearer(request);
		let claims = decode(token);

		tokens.insert(token.to_owned());

		if request.method() == Method::PUT {
			let body: Value =
				serde_json::from_slice(request.body()).expect("Registration body should be JSON.");
			let n = claims.sub.trim_start_matches("subject-");

			assert_eq!(body["personReferenceId"], format!("own-{n}").as_str());
			assert_eq!(claims.given_name, format!("User {n}"));
		} else {
			assert_eq!(request.method(), Method::GET);
			assert_eq!(claims.sub, "0");
			assert!(url_of(request).query().is_some_and(|query| query.starts_with("query=shared-")));
		}
	}

	// Shared-identity calls issued within the same second carry identical claims, so only the
	// per-user tokens are guaranteed distinct.
	assert!(tokens.len() >= 32);
}
