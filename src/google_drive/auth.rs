use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use google_drive3::oauth2;
use google_drive3::oauth2::authorized_user::AuthorizedUserSecret;
use google_drive3::oauth2::storage::{TokenInfo, TokenStorage};
use tracing::{debug, info, instrument, warn};

use crate::prelude::*;

pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

const AUTHORIZED_USER_TYPE: &str = "authorized_user";

/// Refresh-token material in the `authorized_user` format understood by the
/// OAuth2 library.
#[derive(Clone)]
pub struct Credential {
    secret: AuthorizedUserSecret,
}

impl Credential {
    pub fn secret(&self) -> &AuthorizedUserSecret {
        &self.secret
    }

    pub fn is_valid(&self) -> bool {
        !self.secret.client_id.is_empty() && !self.secret.refresh_token.is_empty()
    }

    /// Reads a stored credential; `None` if it is missing, unreadable, or
    /// not usable.
    async fn load(path: &Path) -> Option<Credential> {
        let raw = match tokio::fs::read(path).await {
            Ok(raw) => raw,
            Err(e) => {
                debug!("no stored credential at {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_slice::<AuthorizedUserSecret>(&raw) {
            Ok(secret) => Some(Credential { secret }).filter(Credential::is_valid),
            Err(e) => {
                warn!("stored credential at {} is not usable: {}", path.display(), e);
                None
            }
        }
    }

    async fn persist(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::io(parent, e))?;
        }
        let raw = serde_json::to_vec_pretty(&self.secret)
            .map_err(|e| Error::io(path, std::io::Error::other(e)))?;
        tokio::fs::write(path, raw)
            .await
            .map_err(|e| Error::io(path, e))?;
        debug!("credential stored at {}", path.display());
        Ok(())
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("client_id", &self.secret.client_id)
            .field("valid", &self.is_valid())
            .finish()
    }
}

/// Loads the credential stored at `token_path`.
///
/// If there is no usable credential there, the interactive consent flow is
/// run with the client secret at `secret_path` and its result is stored at
/// `token_path`. Without a secret this fails with a configuration error
/// before anything touches the network.
#[instrument]
pub async fn authenticate(token_path: &Path, secret_path: Option<&Path>) -> Result<Credential> {
    if let Some(credential) = Credential::load(token_path).await {
        debug!("using stored credential");
        return Ok(credential);
    }
    let Some(secret_path) = secret_path else {
        return Err(Error::Configuration(format!(
            "no valid credential at {} and no client secret given to create one",
            token_path.display()
        )));
    };
    let application_secret = oauth2::read_application_secret(secret_path)
        .await
        .map_err(|e| {
            Error::Configuration(format!(
                "cannot read client secret {}: {}",
                secret_path.display(),
                e
            ))
        })?;

    info!("no valid credential, starting consent flow");
    let store = CredentialStore::new(
        token_path,
        application_secret.client_id.clone(),
        application_secret.client_secret.clone(),
    );
    let auth = oauth2::InstalledFlowAuthenticator::builder(
        application_secret,
        oauth2::InstalledFlowReturnMethod::HTTPRedirect,
    )
    .with_storage(Box::new(store))
    .build()
    .await
    .map_err(|e| Error::transfer("build authenticator", e))?;
    auth.token(&[DRIVE_SCOPE])
        .await
        .map_err(|e| Error::transfer("consent flow", e))?;

    Credential::load(token_path)
        .await
        .ok_or_else(|| Error::transfer("consent flow", "no refresh token was issued"))
}

/// Token storage for the consent flow that writes the refresh token to
/// disk as an `authorized_user` credential.
struct CredentialStore {
    path: PathBuf,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<TokenInfo>>,
}

impl CredentialStore {
    fn new(path: impl Into<PathBuf>, client_id: String, client_secret: String) -> Self {
        Self {
            path: path.into(),
            client_id,
            client_secret,
            token: Mutex::new(None),
        }
    }
}

#[async_trait]
impl TokenStorage for CredentialStore {
    async fn set(&self, _scopes: &[&str], token: TokenInfo) -> anyhow::Result<()> {
        let refresh_token = token.refresh_token.clone();
        *self.token.lock().map_err(|_| anyhow::anyhow!("token lock poisoned"))? = Some(token);
        if let Some(refresh_token) = refresh_token {
            let credential = Credential {
                secret: AuthorizedUserSecret {
                    client_id: self.client_id.clone(),
                    client_secret: self.client_secret.clone(),
                    refresh_token,
                    key_type: AUTHORIZED_USER_TYPE.to_string(),
                },
            };
            credential.persist(&self.path).await?;
        }
        Ok(())
    }

    async fn get(&self, _scopes: &[&str]) -> Option<TokenInfo> {
        self.token.lock().ok().and_then(|t| t.clone())
    }
}
