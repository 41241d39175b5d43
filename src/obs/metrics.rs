// self
use crate::{obs::RequestOutcome, request::Verb};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_request_outcome(verb: Verb, outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"pliance_sdk_request_total",
			"verb" => verb.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (verb, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_request_outcome_noop_without_metrics() {
		record_request_outcome(Verb::Delete, RequestOutcome::Failure);
	}
}
