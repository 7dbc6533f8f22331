/*!
# Core Module

Core functionality shared by the parser and the CLI: error handling and
file system helpers.
*/

pub mod errors;
pub mod fs_utils;

pub use errors::{DocParseError, DocResult};
pub use fs_utils::{ensure_dir, read_html_file};
