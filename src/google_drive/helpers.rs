use google_drive3::api::File;

use crate::google_drive::RemoteEntry;
use crate::prelude::*;

/// The `fields` selector used for listings; only what the walk needs.
pub const FIELDS_LIST: &str = "nextPageToken, files(id, name, mimeType)";

pub fn remote_entry_from_file(file: File) -> Result<RemoteEntry> {
    let id = file
        .id
        .ok_or_else(|| Error::MalformedEntry("an id".into()))?;
    let name = file
        .name
        .ok_or_else(|| Error::MalformedEntry(format!("a name (id {})", id)))?;
    let mime_type = file
        .mime_type
        .ok_or_else(|| Error::MalformedEntry(format!("a mimeType (id {})", id)))?;
    Ok(RemoteEntry::new(id, name, mime_type))
}
