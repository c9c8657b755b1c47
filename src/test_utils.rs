use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use tracing::field::{Field, Visit};
use tracing::{Dispatch, Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

use crate::google_drive::{ChunkStream, DriveBackend, DriveId, Page, RemoteEntry};
use crate::prelude::*;

/// In-memory stand-in for the remote service.
///
/// Children are returned in insertion order (deliberately unsorted), page
/// tokens are offsets into that order, and every call is recorded as
/// `list <folder> <token|->` or `download <file>`.
#[derive(Debug)]
pub struct FakeDrive {
    children: HashMap<String, Vec<RemoteEntry>>,
    contents: HashMap<String, Vec<u8>>,
    page_size: Option<usize>,
    chunk_size: usize,
    failing_listings: HashSet<String>,
    failing_downloads: HashMap<String, usize>,
    calls: Mutex<Vec<String>>,
}

impl FakeDrive {
    pub fn new() -> Self {
        Self {
            children: HashMap::new(),
            contents: HashMap::new(),
            page_size: None,
            chunk_size: 3,
            failing_listings: HashSet::new(),
            failing_downloads: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `None` returns every child in a single page.
    pub fn with_page_size(mut self, page_size: Option<usize>) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn add_folder(&mut self, parent: &str, id: &str, name: &str) {
        self.children
            .entry(parent.to_string())
            .or_default()
            .push(RemoteEntry::folder(id, name));
    }

    pub fn add_file(&mut self, parent: &str, id: &str, name: &str, mime_type: &str, content: &[u8]) {
        self.children
            .entry(parent.to_string())
            .or_default()
            .push(RemoteEntry::new(id, name, mime_type));
        self.contents.insert(id.to_string(), content.to_vec());
    }

    pub fn fail_listing(&mut self, folder: &str) {
        self.failing_listings.insert(folder.to_string());
    }

    /// The download of `file` breaks after `chunks` chunks were delivered.
    pub fn fail_download_after(&mut self, file: &str, chunks: usize) {
        self.failing_downloads.insert(file.to_string(), chunks);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("download ").map(String::from))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DriveBackend for FakeDrive {
    async fn list_page(
        &self,
        _drive_id: &DriveId,
        folder_id: &DriveId,
        page_token: Option<&str>,
    ) -> Result<Page> {
        self.record(format!("list {} {}", folder_id, page_token.unwrap_or("-")));
        if self.failing_listings.contains(folder_id.as_str()) {
            return Err(Error::transfer("list files", "403 insufficient permissions"));
        }
        let all = self
            .children
            .get(folder_id.as_str())
            .cloned()
            .unwrap_or_default();
        let start: usize = match page_token {
            Some(token) => token
                .parse()
                .map_err(|_| Error::transfer("list files", "400 invalid page token"))?,
            None => 0,
        };
        let end = match self.page_size {
            Some(size) => (start + size).min(all.len()),
            None => all.len(),
        };
        let next_page_token = (end < all.len()).then(|| end.to_string());
        Ok(Page {
            entries: all[start..end].to_vec(),
            next_page_token,
        })
    }

    async fn open_download(&self, file_id: &DriveId) -> Result<ChunkStream> {
        self.record(format!("download {}", file_id));
        let content = self
            .contents
            .get(file_id.as_str())
            .ok_or_else(|| Error::transfer("download file", "404 file not found"))?;
        let mut chunks: Vec<Result<Bytes>> = content
            .chunks(self.chunk_size)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        if let Some(&after) = self.failing_downloads.get(file_id.as_str()) {
            chunks.truncate(after);
            chunks.push(Err(Error::transfer("download file", "connection reset")));
        }
        Ok(futures::stream::iter(chunks).boxed())
    }
}

/// A logging sink that keeps the message of every event it receives.
#[derive(Debug, Clone, Default)]
pub struct CapturedEvents {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CapturedEvents {
    pub fn dispatch(&self) -> Dispatch {
        Dispatch::new(tracing_subscriber::registry().with(self.clone()))
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl<S: Subscriber> Layer<S> for CapturedEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = MessageField(String::new());
        event.record(&mut message);
        self.messages.lock().unwrap().push(message.0);
    }
}

struct MessageField(String);

impl Visit for MessageField {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}
