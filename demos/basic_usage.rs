//! Basic usage example for the Zenodo Search library.
//!
//! This example searches Zenodo by keywords, prints the matching records and
//! downloads the files of the first record.
//!
//! Run with `RUST_LOG=zenodo_search=debug` to see the requests being made.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zenodo_search::{explain_response, DownloadOptions, ZenodoClient, ZenodoError};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "zenodo_search=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = ZenodoClient::new()?;

    let records = match client.search_keywords(&["PIV", "turbulence"]).await {
        Ok(records) => records,
        Err(ZenodoError::RequestFailed { status }) => {
            eprintln!("{}", explain_response(status)?);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{:?}", records);
    if let Some(total) = records.total() {
        println!("Total matches on Zenodo: {}\n", total);
    }

    for (i, record) in records.iter().take(5).enumerate() {
        println!("{}. {}", i + 1, record);
        let creators = record.creators();
        if !creators.is_empty() {
            println!("   Creators: {}", creators.join("; "));
        }
        if let Some(doi) = record.doi() {
            println!("   DOI: {}", doi);
        }
    }

    if let Some(files) = records.get(0).and_then(|record| record.files()) {
        let options = DownloadOptions::new().destination_dir("./zenodo-files");
        let paths = files.download(&client, &options).await?;
        for path in paths {
            println!("Saved {}", path.display());
        }
    }

    Ok(())
}
