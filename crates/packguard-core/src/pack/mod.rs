//! Packaging dry-run invocation and output parsing.

pub mod parser;
pub mod runner;

pub use parser::FileList;
pub use parser::FileListEntry;
pub use parser::extract_json_payload;
pub use parser::parse_pack_output;
pub use runner::CapturedOutput;
pub use runner::CommandRunner;
pub use runner::PackRunner;
