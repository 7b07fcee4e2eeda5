//! Pocuter app-image uploader CLI.
//!
//! Stand-in for the device's drag-and-drop page: point it at a folder and
//! it locates the app image inside, prints its metadata, and uploads it to
//! the device with a progress readout.

mod config;

use std::io::Write;

use pocudrop_locator::FsEntry;
use pocudrop_session::{CycleEvent, DropSession, SessionError};
use pocudrop_uploader::UploadClient;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(folder) = args.next() else {
        eprintln!("usage: pocudrop <folder> [server-url]");
        std::process::exit(2);
    };
    let server_override = args.next();

    let config = config::Config::load()?;
    let server_url = server_override.unwrap_or(config.server_url);
    tracing::info!(%server_url, folder = %folder, "starting upload cycle");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(&folder, server_url))
}

async fn run(folder: &str, server_url: String) -> anyhow::Result<()> {
    let root = FsEntry::open(folder)?;
    let client = UploadClient::new(server_url)?;
    let mut session = DropSession::new(client);
    let mut events = session
        .take_events()
        .ok_or_else(|| anyhow::anyhow!("event stream already taken"))?;

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                CycleEvent::Located { app_id, path } => {
                    println!("app id: {app_id}");
                    println!("path:   ./{path}");
                }
                CycleEvent::Inspected { metadata, .. } => {
                    println!("size:   {:.2} KiB", metadata.size as f64 / 1024.0);
                    println!("md5:    {}", metadata.md5);
                    if !metadata.name.is_empty() {
                        println!("name:   {}", metadata.name);
                    }
                }
                CycleEvent::Progress { percent } => {
                    print!("\ruploading... {percent:3}%");
                    let _ = std::io::stdout().flush();
                }
                CycleEvent::Finished { status } => {
                    println!("\ndone (status {status})");
                }
            }
        }
    });

    let result = session.handle_drop(vec![root]).await;
    // Dropping the session closes the event channel and ends the printer.
    drop(session);
    let _ = printer.await;

    match result {
        Ok(outcome) => {
            match outcome.response {
                Some(body) => println!("{body}"),
                None => println!("upload finished with status {}", outcome.status),
            }
            Ok(())
        }
        Err(err) if err.is_user_facing() => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
        Err(err @ SessionError::Busy) => {
            tracing::error!(%err, "rejected by transfer-slot guard");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}
