pub mod boundary;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod error;
pub mod git;
pub mod github;
pub mod gradle;
pub mod ui;
pub mod version;
pub mod version_code;

pub use error::{BumpError, Result};
pub use version_code::{encode, encode_value, VersionCode, UNENCODABLE};
