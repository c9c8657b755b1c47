use std::fmt::Debug;

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use google_drive3::api::Scope;
use google_drive3::hyper::client::HttpConnector;
use google_drive3::hyper_rustls::HttpsConnector;
use google_drive3::DriveHub;
use google_drive3::{hyper_rustls, oauth2};
use hyper::Client;
use tracing::{debug, instrument};

use crate::google_drive::helpers::{remote_entry_from_file, FIELDS_LIST};
use crate::google_drive::{ChunkStream, Credential, DriveBackend, DriveId, Page};
use crate::prelude::*;

/// The production [`DriveBackend`]: Drive v3 through `google-drive3`.
#[derive(Clone)]
pub struct GoogleDrive {
    hub: DriveHub<HttpsConnector<HttpConnector>>,
}

impl GoogleDrive {
    #[instrument(skip(credential))]
    pub async fn new(credential: &Credential) -> Result<Self> {
        let auth = oauth2::AuthorizedUserAuthenticator::builder(credential.secret().clone())
            .build()
            .await
            .map_err(|e| Error::transfer("build authenticator", e))?;
        let http_client = Client::builder().build(
            hyper_rustls::HttpsConnectorBuilder::new()
                .with_native_roots()
                .https_or_http()
                .enable_http1()
                .enable_http2()
                .build(),
        );
        let hub = DriveHub::new(http_client, auth);

        let drive = GoogleDrive { hub };
        Ok(drive)
    }
}

#[async_trait]
impl DriveBackend for GoogleDrive {
    #[instrument]
    async fn list_page(
        &self,
        drive_id: &DriveId,
        folder_id: &DriveId,
        page_token: Option<&str>,
    ) -> Result<Page> {
        let drive_id = drive_id.query_safe()?;
        let folder_id = folder_id.query_safe()?;
        debug!("list_page: page_token: {:?}", page_token);
        let mut request = self
            .hub
            .files()
            .list()
            .corpora("drive")
            .drive_id(drive_id)
            .q(&format!("'{}' in parents", folder_id))
            .include_items_from_all_drives(true)
            .supports_all_drives(true)
            .add_scope(Scope::Full)
            .param("fields", FIELDS_LIST);
        if let Some(page_token) = page_token {
            request = request.page_token(page_token);
        }
        let (_response, result) = request
            .doit()
            .await
            .map_err(|e| Error::transfer("list files", e))?;
        let entries = result
            .files
            .unwrap_or_default()
            .into_iter()
            .map(remote_entry_from_file)
            .collect::<Result<Vec<_>>>()?;
        Ok(Page {
            entries,
            next_page_token: result.next_page_token,
        })
    }

    #[instrument]
    async fn open_download(&self, file_id: &DriveId) -> Result<ChunkStream> {
        let (response, _file) = self
            .hub
            .files()
            .get(file_id.as_str())
            .acknowledge_abuse(true)
            .supports_all_drives(true)
            .add_scope(Scope::Full)
            .param("alt", "media")
            .doit()
            .await
            .map_err(|e| Error::transfer("download file", e))?;
        debug!("open_download: status: {}", response.status());
        let stream = response
            .into_body()
            .map_err(|e| Error::transfer("download file", e))
            .boxed();
        Ok(stream)
    }
}

impl Debug for GoogleDrive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoogleDrive")
    }
}
