//! Transient request descriptors and payload placement (JSON body vs. query string).

// crates.io
use http::Method;
// self
use crate::{_prelude::*, endpoint::Endpoint, error::ConfigError};

/// HTTP verbs used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
	/// Read; payload travels as query parameters.
	Get,
	/// Create or replace; payload travels as a JSON body.
	Put,
	/// Command; payload travels as a JSON body.
	Post,
	/// Removal; payload travels as query parameters.
	Delete,
}
impl Verb {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Verb::Get => "GET",
			Verb::Put => "PUT",
			Verb::Post => "POST",
			Verb::Delete => "DELETE",
		}
	}

	/// Returns the matching [`Method`].
	pub fn method(self) -> Method {
		match self {
			Verb::Get => Method::GET,
			Verb::Put => Method::PUT,
			Verb::Post => Method::POST,
			Verb::Delete => Method::DELETE,
		}
	}

	/// Returns `true` when the payload is sent as a JSON body.
	pub const fn carries_body(self) -> bool {
		matches!(self, Verb::Put | Verb::Post)
	}
}
impl Display for Verb {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// One outbound call: verb, endpoint path relative to the base URL, and structured payload.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
	/// HTTP verb.
	pub verb: Verb,
	/// Path relative to the base URL; a leading `/` is ignored.
	pub path: String,
	/// Structured payload; `null` means "nothing to send".
	pub payload: Value,
}
impl RequestDescriptor {
	/// Creates a descriptor from raw parts.
	pub fn new(verb: Verb, path: impl Into<String>, payload: Value) -> Self {
		Self { verb, path: path.into(), payload }
	}

	/// Creates a descriptor for a named operation, serializing `payload` to JSON.
	pub fn for_endpoint<T>(endpoint: Endpoint, payload: &T) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		let payload = serde_json::to_value(payload).map_err(ConfigError::PayloadSerialize)?;

		Ok(Self::new(endpoint.verb(), endpoint.path(), payload))
	}

	/// Resolves the absolute URL (query included for GET/DELETE) and the optional JSON body.
	///
	/// A `null` payload sends nothing: no query string and no body.
	pub fn resolve(&self, base_url: &Url) -> Result<(Url, Option<Vec<u8>>), ConfigError> {
		let path = self.path.trim_start_matches('/');
		let mut url = base_url
			.join(path)
			.map_err(|source| ConfigError::InvalidPath { path: self.path.clone(), source })?;

		if self.verb.carries_body() {
			if self.payload.is_null() {
				return Ok((url, None));
			}

			let body = serde_json::to_vec(&self.payload).map_err(ConfigError::PayloadSerialize)?;

			return Ok((url, Some(body)));
		}

		let pairs = query_pairs(&self.payload)?;

		if !pairs.is_empty() {
			url.query_pairs_mut().extend_pairs(pairs);
		}

		Ok((url, None))
	}
}

/// Flattens a JSON object into query pairs.
///
/// Nested objects use dotted keys (`page.size`), arrays repeat their key, and `null` values are
/// skipped.
pub fn query_pairs(payload: &Value) -> Result<Vec<(String, String)>, ConfigError> {
	let mut pairs = Vec::new();

	match payload {
		Value::Null => {},
		Value::Object(map) =>
			for (key, value) in map {
				flatten(key, value, &mut pairs);
			},
		other => return Err(ConfigError::InvalidQueryPayload { kind: json_kind(other) }),
	}

	Ok(pairs)
}

fn flatten(key: &str, value: &Value, pairs: &mut Vec<(String, String)>) {
	match value {
		Value::Null => {},
		Value::Bool(flag) => pairs.push((key.to_owned(), flag.to_string())),
		Value::Number(number) => pairs.push((key.to_owned(), number.to_string())),
		Value::String(text) => pairs.push((key.to_owned(), text.clone())),
		Value::Array(items) =>
			for item in items {
				flatten(key, item, pairs);
			},
		Value::Object(map) =>
			for (child, value) in map {
				flatten(&format!("{key}.{child}"), value, pairs);
			},
	}
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}
