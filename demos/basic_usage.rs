//! Basic usage of the InfluxDB HTTP transport.
//!
//! Run against a local v1 server:
//!
//! ```text
//! RUST_LOG=influxdb_transport=debug cargo run --example basic_usage
//! ```
//!
//! Set `INFLUXDB_URL` to point at another endpoint, and `INFLUXDB_TOKEN` to
//! talk to a v2 endpoint with an API token.

use influxdb_transport::{factory, EndpointVersion, TransportOptions};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let token = std::env::var("INFLUXDB_TOKEN").ok();
    let url = std::env::var("INFLUXDB_URL").unwrap_or_else(|_| match token {
        Some(_) => "http://localhost:8086/?org=acme&bucket=metrics".to_string(),
        None => "http://localhost:8086/?db=demo&rp=autogen".to_string(),
    });

    let mut options = TransportOptions::default();
    if let Some(token) = token {
        options = options.endpoint_version(EndpointVersion::V2).api_token(token);
    }

    println!("Connecting to {}", url);
    let transport = factory::get_with_options(&url, &options)?;

    if options.api_token.is_none() {
        transport.create_database().await?;
        println!("Database ready");
    }

    transport
        .send("cpu,host=server01,region=eu value=0.64".to_string())
        .await?;
    println!("Point written");

    match transport.query("SELECT * FROM cpu").await {
        Ok(body) => println!("Query result: {}", body),
        Err(e) => eprintln!("Query failed [{}]: {}", e.kind(), e),
    }

    Ok(())
}
