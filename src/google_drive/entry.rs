use crate::google_drive::{DriveId, FOLDER_MIME_TYPE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

/// One child of a remote folder, as returned by a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub id: DriveId,
    pub name: String,
    pub kind: EntryKind,
    pub mime_type: String,
}

impl RemoteEntry {
    pub fn new(
        id: impl Into<DriveId>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        let mime_type = mime_type.into();
        let kind = if mime_type == FOLDER_MIME_TYPE {
            EntryKind::Folder
        } else {
            EntryKind::File
        };
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            mime_type,
        }
    }

    pub fn folder(id: impl Into<DriveId>, name: impl Into<String>) -> Self {
        Self::new(id, name, FOLDER_MIME_TYPE)
    }
}
