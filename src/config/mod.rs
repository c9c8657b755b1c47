pub use mime_filter::MimeFilter;
pub use settings::MirrorSettings;

pub mod mime_filter;
pub mod settings;
