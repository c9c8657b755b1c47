use std::fmt::{Display, Formatter};

use tracing::instrument::WithSubscriber;
use tracing::{debug, info, instrument, trace, warn};

use crate::common::LocalPath;
use crate::config::MirrorSettings;
use crate::google_drive::{DriveBackend, DriveClient, DriveId, EntryKind, RemoteEntry};
use crate::prelude::*;

/// Counts of what a walk did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorReport {
    pub folders_visited: usize,
    pub files_written: usize,
    pub bytes_written: u64,
    pub entries_skipped: usize,
}

impl Display for MirrorReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} folders visited, {} files written ({} bytes), {} entries skipped",
            self.folders_visited, self.files_written, self.bytes_written, self.entries_skipped
        )
    }
}

/// Work left to do, popped from the back.
#[derive(Debug)]
enum Pending {
    Folder { local: LocalPath, id: DriveId },
    File { parent: LocalPath, local: LocalPath, entry: RemoteEntry },
}

/// Mirrors a remote folder tree into a local directory.
#[derive(Debug)]
pub struct Walker<B> {
    client: DriveClient<B>,
    settings: MirrorSettings,
}

impl<B: DriveBackend> Walker<B> {
    pub fn new(client: DriveClient<B>, settings: MirrorSettings) -> Self {
        Self { client, settings }
    }

    pub fn client(&self) -> &DriveClient<B> {
        &self.client
    }

    /// Copies every accepted file below `folder_id` to the matching path
    /// below `local_root`.
    ///
    /// Entries are visited depth first, in name order at every level.
    /// Directories are only created once a file is about to be written into
    /// them, and existing files are overwritten. The first error ends the
    /// walk and leaves whatever was written so far in place.
    pub async fn walk(
        &self,
        local_root: impl Into<LocalPath>,
        drive_id: &DriveId,
        folder_id: &DriveId,
    ) -> Result<MirrorReport> {
        let dispatch = self.settings.log_sink().clone();
        self.walk_tree(local_root.into(), drive_id, folder_id)
            .with_subscriber(dispatch)
            .await
    }

    #[instrument(skip(self), fields(settings = %self.settings))]
    async fn walk_tree(
        &self,
        local_root: LocalPath,
        drive_id: &DriveId,
        folder_id: &DriveId,
    ) -> Result<MirrorReport> {
        let mut report = MirrorReport::default();
        let mut pending = vec![Pending::Folder {
            local: local_root,
            id: folder_id.clone(),
        }];
        while let Some(item) = pending.pop() {
            match item {
                Pending::Folder { local, id } => {
                    info!("Folder: {}", local);
                    report.folders_visited += 1;
                    let children = self.client.list_children(drive_id, &id).await?;
                    let mut queued = Vec::with_capacity(children.len());
                    for entry in children {
                        match self.plan(&local, entry) {
                            Some(next) => queued.push(next),
                            None => report.entries_skipped += 1,
                        }
                    }
                    // reversed, so the first name is popped first
                    pending.extend(queued.into_iter().rev());
                }
                Pending::File {
                    parent,
                    local,
                    entry,
                } => {
                    let written = self.mirror_file(&parent, &local, &entry).await?;
                    report.files_written += 1;
                    report.bytes_written += written;
                }
            }
        }
        debug!("walk finished: {}", report);
        Ok(report)
    }

    /// Decides what to do with one child of `parent`; `None` skips it.
    fn plan(&self, parent: &LocalPath, entry: RemoteEntry) -> Option<Pending> {
        let wanted = match entry.kind {
            EntryKind::Folder => true,
            EntryKind::File => self.settings.filter().accepts(&entry.mime_type),
        };
        if !wanted {
            trace!("skipping {} ({})", entry.name, entry.mime_type);
            return None;
        }
        let Some(local) = parent.child(&entry.name) else {
            warn!(
                "skipping {:?} (id {}): name is not usable as a local path",
                entry.name, entry.id
            );
            return None;
        };
        Some(match entry.kind {
            EntryKind::Folder => Pending::Folder {
                local,
                id: entry.id,
            },
            EntryKind::File => Pending::File {
                parent: parent.clone(),
                local,
                entry,
            },
        })
    }

    async fn mirror_file(
        &self,
        parent: &LocalPath,
        local: &LocalPath,
        entry: &RemoteEntry,
    ) -> Result<u64> {
        info!("File: {}", local);
        let data = self.client.download_file(&entry.id).await?;
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(parent.to_path_buf(), e))?;
        tokio::fs::write(local, &data)
            .await
            .map_err(|e| Error::io(local.to_path_buf(), e))?;
        debug!("wrote {} bytes to {}", data.len(), local);
        Ok(data.len() as u64)
    }
}
