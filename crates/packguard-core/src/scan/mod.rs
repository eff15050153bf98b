//! Path and content scanning passes.

pub mod content;
pub mod paths;
pub mod walker;

pub use content::ContentScan;
pub use content::line_number_at;
pub use content::scan_sources;
pub use content::scan_text;
pub use paths::scan_paths;
pub use walker::SourceWalker;
pub use walker::relative_display;
