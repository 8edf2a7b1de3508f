//! Zapdos CLI — command-line client for the Zapdos API.
//!
//! Set ZAPDOS_API_KEY and ZAPDOS_API_URL (or API_URL). Uses X-API-Key auth.

use anyhow::Context;
use clap::{Parser, Subcommand};
use zapdos_cli::{human_size, init_tracing};
use zapdos_client::{ApiClient, SearchQuery, UploadCallbacks, UploadItem};

#[derive(Parser)]
#[command(name = "zapdos", about = "Zapdos API CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload files to pre-signed URLs
    Upload {
        /// Paths of the files to upload
        #[arg(required = true)]
        files: Vec<std::path::PathBuf>,
        /// Signed upload URL for each file, repeated in file order
        #[arg(long = "url", required = true)]
        urls: Vec<String>,
        /// Content type applied to every file
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Search stored objects
    Search {
        /// Search query
        query: String,
        /// Maximum number of results
        #[arg(long, default_value = "20")]
        limit: u32,
        /// Filter by object kind (e.g. "file")
        #[arg(long)]
        kind: Option<String>,
    },
    /// Get a stored object's record by ID
    Get {
        /// Object ID
        id: String,
    },
    /// Delete a stored object by ID
    Delete {
        /// Object ID
        id: String,
    },
    /// Download a signed URL to a local file
    Download {
        /// Signed download URL
        url: String,
        /// Output path
        #[arg(short, long)]
        output: std::path::PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let client = ApiClient::from_env().context("Failed to create API client")?;

    match cli.command {
        Commands::Upload {
            files,
            urls,
            content_type,
        } => {
            anyhow::ensure!(
                files.len() == urls.len(),
                "Expected one --url per file ({} files, {} urls)",
                files.len(),
                urls.len()
            );

            let mut items = Vec::with_capacity(files.len());
            for (file, url) in files.iter().zip(&urls) {
                let mut item = UploadItem::from_path(file, url)
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                if let Some(content_type) = &content_type {
                    item = item.with_content_type(content_type);
                }
                items.push(item);
            }

            let callbacks = UploadCallbacks::new()
                .on_progress(|event| {
                    if let Some(index) = event.file_index {
                        eprintln!("file {}: {}%", index, event.percent);
                    }
                })
                .on_failed(|event| {
                    if let Some(index) = event.file_index {
                        eprintln!("file {} failed: {}", index, event.message);
                    }
                });

            let outcomes = client.upload_files(items, Some(&callbacks)).await;
            println!("{}", serde_json::to_string_pretty(&outcomes)?);

            let failed = outcomes.iter().filter(|outcome| !outcome.is_success()).count();
            anyhow::ensure!(failed == 0, "{} of {} uploads failed", failed, outcomes.len());
        }
        Commands::Search { query, limit, kind } => {
            let mut search = SearchQuery::new(query).limit(limit);
            if let Some(kind) = kind {
                search = search.kind(kind);
            }
            let response = search.send(&client).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Get { id } => {
            let object = client.get_object(&id).await?;
            println!("{}", serde_json::to_string_pretty(&object)?);
        }
        Commands::Delete { id } => {
            client.delete_object(&id).await?;
            println!("Deleted {}", id);
        }
        Commands::Download { url, output } => {
            let written = client.download_to_path(&url, &output).await?;
            println!("Wrote {} ({})", output.display(), human_size(written));
        }
    }

    Ok(())
}
