//! Built-in page templates using the Tera template engine
//!
//! Templates and the stylesheet are embedded in the binary, so a site
//! needs nothing but its content and `_config.yml`.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::ContactLink;
use crate::helpers::{format_date, parse_date};

/// Stylesheet written to `css/style.css`
pub const STYLESHEET: &str = include_str!("site/style.css");

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Links and rendered markdown are emitted verbatim; author text is
        // escaped explicitly with `| escape` in the templates
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("about.html", include_str!("site/about.html")),
            ("posts.html", include_str!("site/posts.html")),
            ("post.html", include_str!("site/post.html")),
            (
                "partials/post_list.html",
                include_str!("site/partials/post_list.html"),
            ),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: reformat an ISO date with a Moment.js pattern
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    // Anything that is not a date passes through untouched
    match parse_date(&s) {
        Some(date) => Ok(tera::Value::String(format_date(&date, &format))),
        None => Ok(tera::Value::String(s)),
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub links: Vec<ContactLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavData {
    pub home: String,
    pub about: String,
    pub posts: String,
    pub stylesheet: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub title: String,
    /// Date formatted for display
    pub date: String,
    /// ISO date for `<time datetime>`, empty when unknown
    pub datetime: String,
    pub link: String,
    /// Rendered HTML, empty in listings
    pub content: String,
}
