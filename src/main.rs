//! lakepath - Entry Point
//!
//! Runs the configured listing request against a local lake directory and
//! prints the result envelope as JSON.

use log::info;
use std::process;

use lakepath::config::AppConfig;
use lakepath::error::LakeError;
use lakepath::error::handlers::{error_to_exit_code, handle_error};
use lakepath::utils::logging::setup_logging;
use lakepath::{ListingQuery, LocalStore};

#[tokio::main]
async fn main() {
    // env_logger picks up RUST_LOG
    setup_logging();

    if let Err(e) = run().await {
        handle_error(&e);
        process::exit(error_to_exit_code(&e));
    }
}

async fn run() -> Result<(), LakeError> {
    let config = AppConfig::load()?;
    let base_url = config.lake.base_url();
    let request = config.request.to_request();

    info!(
        "Listing '{}' in {} (store root: {})",
        request.directory.as_deref().unwrap_or("/"),
        base_url,
        config.lake.store_root
    );

    let store = LocalStore::new(&config.lake.store_root);
    let listing = ListingQuery::new(&store).execute(&base_url, &request).await?;

    println!("{}", listing.to_json_pretty()?);
    Ok(())
}
