//! Content module - loads posts and renders their markdown

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use error::ContentError;
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use post::{sort_posts, Post, PostMeta, PostSummary};
