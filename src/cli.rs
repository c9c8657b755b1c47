//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use mime::Mime;

use crate::config::MimeFilter;
use crate::google_drive::DriveId;

/// Copy a Google Drive folder tree to local disk.
#[derive(Parser, Debug, Clone)]
#[command(name = "drive_mirror", version, about)]
pub struct Cli {
    /// Source shared drive ID
    #[arg(long = "src-drive", value_name = "ID")]
    pub src_drive: String,

    /// Source folder ID
    #[arg(long = "src-id", value_name = "ID")]
    pub src_id: String,

    /// Local destination folder
    #[arg(long, value_name = "DIR")]
    pub dest: PathBuf,

    /// Path to the OAuth2 refresh JSON file
    #[arg(long, value_name = "FILE")]
    pub token: PathBuf,

    /// Path to the OAuth2 client secret JSON file, needed only when the
    /// token file is missing or invalid
    #[arg(long, value_name = "FILE")]
    pub secret: Option<PathBuf>,

    /// File type to download (repeatable); `*` works as a wildcard
    #[arg(long = "accept", value_name = "MIME", default_value = "application/pdf")]
    pub accept: Vec<Mime>,
}

impl Cli {
    pub fn drive_id(&self) -> DriveId {
        DriveId::from(self.src_drive.as_str())
    }

    pub fn folder_id(&self) -> DriveId {
        DriveId::from(self.src_id.as_str())
    }

    pub fn filter(&self) -> MimeFilter {
        MimeFilter::new(self.accept.iter().cloned())
    }
}
