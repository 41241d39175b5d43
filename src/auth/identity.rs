//! The principal on whose behalf calls are made.

// self
use crate::_prelude::*;

/// Error returned when an acting identity fails local validation.
///
/// Only emptiness is checked here; the service is the authority on acceptable values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentityError {
	/// The field was empty or whitespace.
	#[error("Acting identity {field} cannot be empty.")]
	Empty {
		/// Field that failed validation (`display name` or `subject id`).
		field: &'static str,
	},
}

/// Human or system principal asserted in every token (`given_name` + `sub`).
///
/// Created once per logical session and reused across calls.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawIdentity", into = "RawIdentity")]
pub struct ActingIdentity {
	display_name: String,
	subject_id: String,
}
impl ActingIdentity {
	/// Creates a new identity after validation.
	pub fn new(
		display_name: impl Into<String>,
		subject_id: impl Into<String>,
	) -> Result<Self, IdentityError> {
		let display_name = display_name.into();
		let subject_id = subject_id.into();

		validate_field("display name", &display_name)?;
		validate_field("subject id", &subject_id)?;

		Ok(Self { display_name, subject_id })
	}

	/// Display name, sent as the `given_name` claim.
	pub fn display_name(&self) -> &str {
		&self.display_name
	}

	/// Subject identifier, sent as the `sub` claim.
	pub fn subject_id(&self) -> &str {
		&self.subject_id
	}
}
impl Debug for ActingIdentity {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ActingIdentity({} <{}>)", self.display_name, self.subject_id)
	}
}
impl Display for ActingIdentity {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.display_name)
	}
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIdentity {
	display_name: String,
	subject_id: String,
}
impl TryFrom<RawIdentity> for ActingIdentity {
	type Error = IdentityError;

	fn try_from(raw: RawIdentity) -> Result<Self, Self::Error> {
		Self::new(raw.display_name, raw.subject_id)
	}
}
impl From<ActingIdentity> for RawIdentity {
	fn from(identity: ActingIdentity) -> Self {
		Self { display_name: identity.display_name, subject_id: identity.subject_id }
	}
}

fn validate_field(field: &'static str, view: &str) -> Result<(), IdentityError> {
	if view.trim().is_empty() {
		return Err(IdentityError::Empty { field });
	}

	Ok(())
}
