use std::ffi::OsStr;
use std::fmt::Display;
use std::ops::Deref;
use std::path::{Component, Path, PathBuf};

//region LocalPath
/// A path on the local side of the mirror.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct LocalPath(PathBuf);

impl LocalPath {
    /// Joins a remote entry name onto this path.
    ///
    /// Returns `None` if the name is not exactly one normal path component
    /// (empty, `.`, `..`, or containing a separator of this platform), since
    /// joining it would land somewhere other than directly below `self`.
    pub fn child(&self, name: &str) -> Option<LocalPath> {
        if name.is_empty() || name.chars().any(std::path::is_separator) {
            return None;
        }
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(Self(self.0.join(name))),
            _ => None,
        }
    }
}

impl From<PathBuf> for LocalPath {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&Path> for LocalPath {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}

impl AsRef<Path> for LocalPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<OsStr> for LocalPath {
    fn as_ref(&self) -> &OsStr {
        self.0.as_os_str()
    }
}

impl Deref for LocalPath {
    type Target = PathBuf;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for LocalPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
//------------------------------------------

impl From<LocalPath> for PathBuf {
    fn from(value: LocalPath) -> Self {
        value.0
    }
}
//endregion
