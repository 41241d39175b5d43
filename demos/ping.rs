//! Pings a live Pliance environment and views one person.
//!
//! Configure through the environment:
//!
//! - `PLIANCE_URL`: base URL, e.g. `https://adam.pliance.io/`.
//! - `PLIANCE_SECRET` and `PLIANCE_ISSUER`: token signing credentials.
//! - `PLIANCE_CERT` (optional): PEM file holding the client certificate and private key.
//! - `PLIANCE_PERSON` (optional): person reference id to view after the ping.

// std
use std::{env, time::Duration};
// crates.io
use color_eyre::{Result, eyre::WrapErr};
use serde_json::json;
// self
use pliance_sdk::{
	auth::ActingIdentity,
	config::{ClientCertificate, ClientConfig},
	dispatch::RequestDispatcher,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let mut builder = ClientConfig::builder()
		.base_url(env::var("PLIANCE_URL").wrap_err("PLIANCE_URL must be set.")?)
		.secret(env::var("PLIANCE_SECRET").wrap_err("PLIANCE_SECRET must be set.")?)
		.issuer(env::var("PLIANCE_ISSUER").wrap_err("PLIANCE_ISSUER must be set.")?)
		.timeout(Duration::from_secs(30));

	if let Ok(path) = env::var("PLIANCE_CERT") {
		builder = builder.client_certificate(ClientCertificate::File(path.into()));
	}

	let dispatcher = RequestDispatcher::new(builder.build()?)?;
	let client = dispatcher.client(ActingIdentity::new("Demo Operator", "demo-operator")?);
	let pong = client.ping(&json!({})).await?;

	println!("Ping answered: {}.", pong.message);

	if let Ok(reference_id) = env::var("PLIANCE_PERSON") {
		match client.view_person(&json!({ "personReferenceId": reference_id })).await {
			Ok(person) => println!("Person {reference_id}: {}.", person.data),
			Err(e) => println!("Viewing {reference_id} failed: {e}."),
		}
	}

	Ok(())
}
