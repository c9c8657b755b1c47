pub use auth::{authenticate, Credential, DRIVE_SCOPE};
pub use client::{ChunkStream, DriveBackend, DriveClient, Page};
pub use drive::GoogleDrive;
pub use drive_id::DriveId;
pub use entry::{EntryKind, RemoteEntry};

mod auth;
mod client;
mod drive;
mod drive_id;
mod entry;
pub(crate) mod helpers;

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";
pub const GOOGLE_APPS_MIME_PREFIX: &str = "application/vnd.google-apps.";
