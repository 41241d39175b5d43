//! The service's JSON result envelope and the status/body classification applied to it.

// crates.io
use serde::{Deserializer, de::DeserializeOwned};
// self
use crate::{_prelude::*, error::ApiError, http::HttpResponse};

/// Envelope returned by every endpoint: `{success, message, data, ...}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResult {
	/// Service-side outcome flag.
	pub success: bool,
	/// Human-readable message; empty when the service omitted it or sent `null`.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub message: String,
	/// Endpoint-specific payload, opaque to the dispatcher.
	#[serde(default)]
	pub data: Value,
	/// Any other top-level fields (for example `status`), kept verbatim.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl ApiResult {
	/// Looks up a top-level field of `data`.
	pub fn data_field(&self, key: &str) -> Option<&Value> {
		self.data.get(key)
	}

	/// Deserializes `data` into a caller-defined shape.
	pub fn data_as<T>(&self) -> Result<T, serde_json::Error>
	where
		T: DeserializeOwned,
	{
		T::deserialize(&self.data)
	}
}

/// Classifies a raw response.
///
/// Any status outside 2xx fails with [`ApiError::Status`] before the body is looked at. A 2xx
/// body must parse as an [`ApiResult`]; `success: false` fails with [`ApiError::Rejected`].
pub fn classify(response: HttpResponse) -> Result<ApiResult, ApiError> {
	let status = response.status().as_u16();

	if !response.status().is_success() {
		return Err(ApiError::Status { status });
	}

	let mut deserializer = serde_json::Deserializer::from_slice(response.body());
	let result: ApiResult = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| ApiError::MalformedBody { source, status })?;

	if !result.success {
		return Err(ApiError::Rejected { message: result.message });
	}

	Ok(result)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(status: u16, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() =
			http::StatusCode::from_u16(status).expect("Status fixture should be in range.");

		response
	}

	#[test]
	fn success_envelope_is_returned_unchanged() {
		let result = classify(response(
			200,
			"{\"success\":true,\"message\":\"Pong\",\"data\":{\"personReferenceId\":\"r\"},\"status\":\"Success\"}",
		))
		.expect("Successful envelope should classify as success.");

		assert_eq!(result.message, "Pong");
		assert_eq!(result.data_field("personReferenceId"), Some(&Value::from("r")));
		assert_eq!(result.extra.get("status"), Some(&Value::from("Success")));
	}

	#[test]
	fn missing_or_null_message_defaults_to_empty() {
		let result = classify(response(204, "{\"success\":true,\"message\":null}"))
			.expect("Null message should be tolerated.");

		assert_eq!(result.message, "");
		assert_eq!(result.data, Value::Null);
	}

	#[test]
	fn non_2xx_fails_without_reading_the_body() {
		for status in [199, 301, 400, 404, 500] {
			let err = classify(response(status, "{\"success\":false,\"message\":\"ignored\"}"))
				.expect_err("Non-2xx status must fail.");

			assert!(matches!(err, ApiError::Status { status: s } if s == status));
		}

		let err = classify(response(404, "<html>not json</html>"))
			.expect_err("Non-2xx status must fail even with a non-JSON body.");

		assert_eq!(err.to_string(), "404");
	}

	#[test]
	fn rejected_envelope_carries_service_message() {
		let err = classify(response(200, "{\"success\":false,\"message\":\"Missing FirstName\"}"))
			.expect_err("success=false must fail.");

		assert!(matches!(&err, ApiError::Rejected { message } if message == "Missing FirstName"));
	}

	#[test]
	fn malformed_bodies_are_reported() {
		let err = classify(response(200, "{\"success\":\"yes\"}"))
			.expect_err("Non-boolean success flag must fail.");

		match err {
			ApiError::MalformedBody { source, status } => {
				assert_eq!(status, 200);
				assert!(source.inner().is_data());
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}

		assert!(matches!(
			classify(response(200, "")),
			Err(ApiError::MalformedBody { status: 200, .. })
		));
	}
}
