use std::fmt::{Display, Formatter};

use tracing::Dispatch;

use crate::config::MimeFilter;

#[derive(Debug, Clone)]
pub struct MirrorSettings {
    /// Which file types get downloaded; everything else is skipped
    filter: MimeFilter,
    /// Where the walk reports its progress.
    ///
    /// The walk runs with this as its default subscriber instead of relying
    /// on a globally installed one.
    log_sink: Dispatch,
}

impl MirrorSettings {
    pub fn new(filter: MimeFilter, log_sink: Dispatch) -> Self {
        Self { filter, log_sink }
    }
}

impl Default for MirrorSettings {
    fn default() -> Self {
        Self::new(MimeFilter::default(), Dispatch::none())
    }
}

// region getters
impl MirrorSettings {
    pub fn filter(&self) -> &MimeFilter {
        &self.filter
    }
    pub fn log_sink(&self) -> &Dispatch {
        &self.log_sink
    }
}

// endregion
impl Display for MirrorSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MirrorSettings {{ accept: {} }}", self.filter)
    }
}
