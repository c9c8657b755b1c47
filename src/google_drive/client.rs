use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use tracing::{debug, instrument, trace};

use crate::google_drive::{DriveId, RemoteEntry};
use crate::prelude::*;

/// Successive pieces of a media download, in order.
pub type ChunkStream = BoxStream<'static, Result<Bytes>>;

/// One page of a folder listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub entries: Vec<RemoteEntry>,
    pub next_page_token: Option<String>,
}

/// The raw calls the mirror needs from the remote storage service.
#[async_trait]
pub trait DriveBackend: Send + Sync {
    /// Requests one page of the children of `folder_id` inside `drive_id`.
    async fn list_page(
        &self,
        drive_id: &DriveId,
        folder_id: &DriveId,
        page_token: Option<&str>,
    ) -> Result<Page>;

    /// Starts a media download of `file_id`.
    async fn open_download(&self, file_id: &DriveId) -> Result<ChunkStream>;
}

/// Listing and downloading on top of a [`DriveBackend`].
#[derive(Debug, Clone)]
pub struct DriveClient<B> {
    backend: B,
}

impl<B: DriveBackend> DriveClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// All children of `folder_id`, sorted by name.
    ///
    /// Pages are requested until the service stops returning a continuation
    /// token.
    #[instrument(skip(self))]
    pub async fn list_children(
        &self,
        drive_id: &DriveId,
        folder_id: &DriveId,
    ) -> Result<Vec<RemoteEntry>> {
        let mut entries = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            debug!("list_children: page_token: {:?}", page_token);
            let page = self
                .backend
                .list_page(drive_id, folder_id, page_token.as_deref())
                .await?;
            debug!("list_children: response: {}", page.entries.len());
            entries.extend(page.entries);
            page_token = page.next_page_token.filter(|t| !t.is_empty());
            if page_token.is_none() {
                break;
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// The full content of `file_id`: every chunk, in arrival order.
    #[instrument(skip(self))]
    pub async fn download_file(&self, file_id: &DriveId) -> Result<Vec<u8>> {
        let mut stream = self.backend.open_download(file_id).await?;
        let mut data = Vec::new();
        let mut counter = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            trace!("download_file: chunk {} ({} bytes)", counter, chunk.len());
            data.extend_from_slice(&chunk);
            counter += 1;
        }
        debug!("download_file: done, {} chunks, {} bytes", counter, data.len());
        Ok(data)
    }
}
