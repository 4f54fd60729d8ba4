//! Helper functions shared by the loader and the page templates

mod date;
mod url;

pub use date::*;
pub use url::*;
