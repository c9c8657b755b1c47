//! Mirrors a Google Drive folder tree to local disk.
//!
//! [`google_drive`] wraps the remote service (credentials, paginated
//! listing, chunked download); [`mirror::Walker`] walks the remote tree and
//! writes every accepted file to the matching local path.

use tracing::instrument::WithSubscriber;
use tracing::{info, Dispatch};

use crate::cli::Cli;
use crate::config::MirrorSettings;
use crate::google_drive::{authenticate, DriveClient, GoogleDrive};
use crate::mirror::{MirrorReport, Walker};
use prelude::*;

pub mod cli;
pub mod common;
pub mod config;
pub mod error;
pub mod google_drive;
pub mod mirror;
pub mod prelude;

#[cfg(test)]
mod test_utils;

pub use error::Error;

/// Authenticates and mirrors the folder named on the command line.
///
/// Everything runs with `log_sink` as the default subscriber.
pub async fn run(cli: Cli, log_sink: Dispatch) -> Result<MirrorReport> {
    let settings = MirrorSettings::new(cli.filter(), log_sink.clone());
    async move {
        info!("mirroring {} from drive {} to {}", cli.src_id, cli.src_drive, cli.dest.display());
        let credential = authenticate(&cli.token, cli.secret.as_deref()).await?;
        let drive = GoogleDrive::new(&credential).await?;
        let walker = Walker::new(DriveClient::new(drive), settings);
        walker.walk(cli.dest.as_path(), &cli.drive_id(), &cli.folder_id()).await
    }
    .with_subscriber(log_sink)
    .await
}
