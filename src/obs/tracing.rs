// self
use crate::{_prelude::*, request::Verb};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// A span wrapping one dispatched call. Never carries tokens or payloads.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the verb and endpoint path.
	pub fn new(verb: Verb, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("pliance_sdk.request", verb = verb.as_str(), path);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (verb, path);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	/// Emits the final event for the call inside this span.
	pub fn record_result<T>(&self, result: &Result<T>) {
		#[cfg(feature = "tracing")]
		{
			let _guard = self.span.enter();

			match result {
				Ok(_) => tracing::debug!("request succeeded"),
				Err(e) => tracing::warn!(error = %e, "request failed"),
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = result;
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::ApiError;

	#[test]
	fn request_span_noop_without_tracing() {
		let span = RequestSpan::new(Verb::Get, "api/Ping");

		span.record_result::<()>(&Err(ApiError::Status { status: 503 }.into()));
		span.record_result(&Ok(()));
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = RequestSpan::new(Verb::Post, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
