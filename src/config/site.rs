//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub static_dir: String,
    pub about_file: String,

    // Writing
    pub extensions: Vec<String>,
    pub new_post_name: String,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Home page
    pub recent_posts: usize,
    pub order_by: OrderBy,
    #[serde(default)]
    pub links: Vec<ContactLink>,

    // Date formats (Moment.js style): listings, then the post page
    pub date_format: String,
    pub post_date_format: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Portfolio".to_string(),
            subtitle: "DevBlog".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "_posts".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),
            about_file: "about.md".to_string(),

            extensions: vec!["md".to_string(), "markdown".to_string()],
            new_post_name: ":title.md".to_string(),
            highlight: HighlightConfig::default(),

            recent_posts: 5,
            order_by: OrderBy::DateDesc,
            links: Vec::new(),

            date_format: "MMM D".to_string(),
            post_date_format: "MMMM D, YYYY".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Ordering applied to post listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderBy {
    /// Newest first
    #[default]
    #[serde(rename = "-date")]
    DateDesc,
    /// Oldest first
    #[serde(rename = "date")]
    DateAsc,
    /// By identifier
    #[serde(rename = "name")]
    Name,
}

/// A contact link shown on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLink {
    pub name: String,
    pub url: String,
    /// Short icon name (email, github, linkedin, ...)
    #[serde(default)]
    pub icon: String,
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}
