//! Static operation table: every named API operation mapped to its verb and path.

// self
use crate::{
	_prelude::*, client::PlianceClient, http::ApiHttpClient, request::Verb, response::ApiResult,
};

macro_rules! def_endpoints {
	($($doc:literal $variant:ident => $method:ident, $verb:ident $path:literal;)+) => {
		/// Named API operations.
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(rename_all = "snake_case")]
		pub enum Endpoint {
			$(
				#[doc = $doc]
				$variant,
			)+
		}
		impl Endpoint {
			/// Every operation, in table order.
			pub const ALL: &'static [Endpoint] = &[$(Endpoint::$variant,)+];

			/// HTTP verb used by the operation.
			pub const fn verb(self) -> Verb {
				match self {
					$(Endpoint::$variant => Verb::$verb,)+
				}
			}

			/// Path relative to the base URL.
			pub const fn path(self) -> &'static str {
				match self {
					$(Endpoint::$variant => $path,)+
				}
			}

			/// Stable operation name (the facade method name).
			pub const fn as_str(self) -> &'static str {
				match self {
					$(Endpoint::$variant => stringify!($method),)+
				}
			}
		}
		impl<C> PlianceClient<C>
		where
			C: ?Sized + ApiHttpClient,
		{
			$(
				#[doc = $doc]
				///
				/// # Errors
				///
				/// See [`PlianceClient::call`].
				pub async fn $method<T>(&self, payload: &T) -> Result<ApiResult>
				where
					T: ?Sized + Serialize + Sync,
				{
					self.call(Endpoint::$variant, payload).await
				}
			)+
		}
	};
}

def_endpoints! {
	"Archives a registered company." ArchiveCompany => archive_company, Post "api/CompanyCommand/Archive";
	"Archives a registered person." ArchivePerson => archive_person, Post "api/PersonCommand/Archive";
	"Classifies a screening hit on a company." ClassifyCompanyHit => classify_company_hit, Post "api/CompanyCommand/Classify";
	"Classifies a screening hit on a person." ClassifyPersonHit => classify_person_hit, Post "api/PersonCommand/Classify";
	"Fetches registry data for a company." CompanyData => company_data, Get "api/CompanyQuery/CompanyData";
	"Deletes a registered company." DeleteCompany => delete_company, Delete "api/CompanyCommand";
	"Deletes a registered person." DeletePerson => delete_person, Delete "api/PersonCommand";
	"Reads the change feed." Feed => feed, Get "api/FeedQuery";
	"Fetches the company report." GetCompanyReport => get_company_report, Get "api/ReportQuery/CompanyReport";
	"Fetches the general report." GetGeneralReport => get_general_report, Get "api/ReportQuery/GeneralReport";
	"Fetches the person report." GetPersonReport => get_person_report, Get "api/ReportQuery/PersonReport";
	"Reads the webhook configuration." GetWebhook => get_webhook, Get "api/WebhookQuery";
	"Lists registered companies." ListCompanies => list_companies, Get "api/CompanyQuery/List";
	"Lists registered persons." ListPersons => list_persons, Get "api/PersonQuery/List";
	"Lists failed webhook deliveries." ListWebhookDeliveryFailures => list_webhook_delivery_failures, Get "api/WebhookQuery/DeliveryFailures";
	"Checks connectivity and authentication; answers `Pong`." Ping => ping, Get "api/Ping";
	"Asks the service to send a test webhook delivery." Poke => poke, Post "api/WebhookQuery/Poke";
	"Registers (or updates) a company for screening." RegisterCompany => register_company, Put "api/CompanyCommand";
	"Registers (or updates) a person for screening." RegisterPerson => register_person, Put "api/PersonCommand";
	"Saves the webhook configuration." SaveWebhook => save_webhook, Put "api/WebhookCommand";
	"Searches sanctions and watchlist data for companies." SearchCompany => search_company, Get "api/CompanyQuery/Search";
	"Searches sanctions and watchlist data for persons." SearchPerson => search_person, Get "api/PersonQuery/Search";
	"Restores an archived company." UnarchiveCompany => unarchive_company, Post "api/CompanyCommand/Unarchive";
	"Restores an archived person." UnarchivePerson => unarchive_person, Post "api/PersonCommand/Unarchive";
	"Views a registered company by reference id." ViewCompany => view_company, Get "api/CompanyQuery";
	"Views a registered person by reference id." ViewPerson => view_person, Get "api/PersonQuery";
	"Fetches a watchlist entry for a company." WatchlistCompany => watchlist_company, Get "api/WatchlistQuery/Company";
	"Fetches a watchlist entry for a person." WatchlistPerson => watchlist_person, Get "api/WatchlistQuery";
	"Fetches a watchlist entry for a person (v2 shape)." WatchlistPersonV2 => watchlist_person_v2, Get "api/WatchlistQuery/v2";
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashSet;
	// self
	use super::*;

	#[test]
	fn table_is_unique_and_relative() {
		let names = Endpoint::ALL.iter().map(|e| e.as_str()).collect::<HashSet<_>>();
		let routes = Endpoint::ALL.iter().map(|e| (e.verb(), e.path())).collect::<HashSet<_>>();

		assert_eq!(Endpoint::ALL.len(), 29);
		assert_eq!(names.len(), Endpoint::ALL.len());
		assert_eq!(routes.len(), Endpoint::ALL.len());
		assert!(Endpoint::ALL.iter().all(|e| e.path().starts_with("api/")));
	}

	#[test]
	fn representative_routes() {
		assert_eq!((Endpoint::Ping.verb(), Endpoint::Ping.path()), (Verb::Get, "api/Ping"));
		assert_eq!(Endpoint::RegisterPerson.verb(), Verb::Put);
		assert_eq!(Endpoint::DeletePerson.verb(), Verb::Delete);
		assert_eq!(Endpoint::DeletePerson.path(), Endpoint::RegisterPerson.path());
		assert_eq!(Endpoint::ArchiveCompany.verb(), Verb::Post);
		assert_eq!(Endpoint::SearchCompany.path(), "api/CompanyQuery/Search");
		assert_eq!(Endpoint::WatchlistPersonV2.to_string(), "watchlist_person_v2");
	}
}
