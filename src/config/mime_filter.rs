use std::fmt::{Display, Formatter};
use std::str::FromStr;

use mime::Mime;

use crate::google_drive::GOOGLE_APPS_MIME_PREFIX;

/// The set of file types that get mirrored.
///
/// A pattern matches when type and subtype are equal, `*` acting as a
/// wildcard for either. Google-native types (`application/vnd.google-apps.*`)
/// are never accepted, whatever the patterns say: they have no binary
/// content to download.
#[derive(Debug, Clone, PartialEq)]
pub struct MimeFilter {
    accepted: Vec<Mime>,
}

impl MimeFilter {
    pub fn new(accepted: impl IntoIterator<Item = Mime>) -> Self {
        Self {
            accepted: accepted.into_iter().collect(),
        }
    }

    pub fn accepts(&self, mime_type: &str) -> bool {
        let Ok(candidate) = Mime::from_str(mime_type) else {
            return false;
        };
        if candidate
            .essence_str()
            .to_ascii_lowercase()
            .starts_with(GOOGLE_APPS_MIME_PREFIX)
        {
            return false;
        }
        self.accepted.iter().any(|pattern| {
            (pattern.type_() == mime::STAR || pattern.type_() == candidate.type_())
                && (pattern.subtype() == mime::STAR || pattern.subtype() == candidate.subtype())
        })
    }
}

impl Default for MimeFilter {
    /// Only PDF documents.
    fn default() -> Self {
        Self::new([mime::APPLICATION_PDF])
    }
}

impl Display for MimeFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let accepted: Vec<&str> = self.accepted.iter().map(|m| m.essence_str()).collect();
        write!(f, "[{}]", accepted.join(", "))
    }
}
