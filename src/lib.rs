//! Async Rust SDK for the Pliance compliance-screening API.
//!
//! Every call carries a freshly signed five-minute bearer token and is classified into a single
//! success or failure outcome from the service's JSON envelope.
//!
//! The crate is organized leaves first:
//!
//! - [`auth`] builds acting identities, signing credentials, and per-call tokens.
//! - [`config`] validates the base URL, credentials, and client certificate once, up front.
//! - [`http`] is the transport seam with a reqwest-backed default.
//! - [`dispatch`] signs, sends, and classifies a single request.
//! - [`endpoint`] and [`client`] expose the named API operations for one acting identity.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod obs;
pub mod request;
pub mod response;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use jsonwebtoken;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, parking_lot as _, tokio as _};
