//! Per-identity API handle.
//!
//! One method per named operation is generated in [`endpoint`](crate::endpoint); each
//! serializes its argument, builds a [`RequestDescriptor`], and forwards to
//! [`RequestDispatcher::execute`].

// self
use crate::{
	_prelude::*,
	auth::ActingIdentity,
	dispatch::RequestDispatcher,
	endpoint::Endpoint,
	http::ApiHttpClient,
	request::RequestDescriptor,
	response::ApiResult,
};

/// API facade bound to one [`ActingIdentity`].
///
/// Cheap to clone; clones share the dispatcher and identity.
pub struct PlianceClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	dispatcher: RequestDispatcher<C>,
	identity: ActingIdentity,
}
impl<C> PlianceClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Binds `identity` to `dispatcher`.
	pub fn new(dispatcher: RequestDispatcher<C>, identity: ActingIdentity) -> Self {
		Self { dispatcher, identity }
	}

	/// Identity asserted on every call.
	pub fn identity(&self) -> &ActingIdentity {
		&self.identity
	}

	/// Dispatcher shared with other clients.
	pub fn dispatcher(&self) -> &RequestDispatcher<C> {
		&self.dispatcher
	}

	/// Calls a named operation with any serializable payload.
	///
	/// # Errors
	///
	/// See [`RequestDispatcher::execute`]; payload serialization failures surface as
	/// [`Error::Config`].
	pub async fn call<T>(&self, endpoint: Endpoint, payload: &T) -> Result<ApiResult>
	where
		T: ?Sized + Serialize + Sync,
	{
		let descriptor = RequestDescriptor::for_endpoint(endpoint, payload)?;

		self.dispatcher.execute(&descriptor, &self.identity).await
	}
}
impl<C> Clone for PlianceClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self { dispatcher: self.dispatcher.clone(), identity: self.identity.clone() }
	}
}
impl<C> Debug for PlianceClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PlianceClient")
			.field("dispatcher", &self.dispatcher)
			.field("identity", &self.identity)
			.finish()
	}
}
