//! List site content

use anyhow::Result;

use crate::generator::{display_date, sorted_metadata, Generator};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = sorted_metadata(site)?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {:>8}  {}  [{}]",
                    display_date(&post, &site.config.date_format),
                    post.title.as_deref().unwrap_or("(untitled)"),
                    post.link()
                );
            }
        }
        "route" | "routes" => {
            let routes = Generator::new(site)?.routes()?;
            println!("Routes ({}):", routes.len());
            for route in routes {
                println!("  {}", route);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, route", content_type);
        }
    }

    Ok(())
}
