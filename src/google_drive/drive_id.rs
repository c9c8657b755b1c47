use std::fmt::{Display, Formatter};

use crate::prelude::*;

/// Identifier of a shared drive, folder, or file on the remote side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DriveId(String);

impl DriveId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks that the id can be embedded in a `'<id>' in parents` query.
    pub fn query_safe(&self) -> Result<&str> {
        if self.0.is_empty() {
            return Err(Error::Configuration("drive id is empty".into()));
        }
        if self.0.contains('\'') || self.0.contains('\\') {
            return Err(Error::Configuration(format!(
                "drive id contains invalid character: {}",
                self.0
            )));
        }
        Ok(&self.0)
    }
}

impl From<String> for DriveId {
    fn from(value: String) -> Self {
        DriveId(value)
    }
}
impl From<&str> for DriveId {
    fn from(s: &str) -> Self {
        DriveId(s.to_string())
    }
}
impl From<DriveId> for String {
    fn from(value: DriveId) -> Self {
        value.0
    }
}

impl Display for DriveId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
