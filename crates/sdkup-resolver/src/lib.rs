mod resolve;
mod syntax;

pub use resolve::{resolve_version, LTS_CHANNEL};
pub use syntax::{exact_version, is_latest_patch_syntax, is_numeric_tag, is_valid_range};
