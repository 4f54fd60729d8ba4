//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# Site
title: John Doe
subtitle: DevBlog
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
content_dir: _posts
public_dir: public
static_dir: static
about_file: about.md

# Writing
extensions: [md, markdown]
new_post_name: ':title.md'
highlight:
  theme: base16-ocean.dark
  line_number: true

# Home page
recent_posts: 5
order_by: -date
links:
  - name: Email
    url: mailto:john@example.com
    icon: email
  - name: GitHub
    url: https://github.com/johndoe
    icon: github
  - name: LinkedIn
    url: https://linkedin.com/in/johndoe
    icon: linkedin

# Date formats: post listings and the post page
date_format: MMM D
post_date_format: MMMM D, YYYY
"#;

const ABOUT_TEMPLATE: &str = "# Hi\n\nWrite something about yourself here.\n";

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    let defaults = SiteConfig::default();
    fs::create_dir_all(target_dir.join(&defaults.content_dir))?;
    fs::create_dir_all(target_dir.join(&defaults.static_dir))?;

    fs::write(&config_path, CONFIG_TEMPLATE)?;
    fs::write(target_dir.join(&defaults.about_file), ABOUT_TEMPLATE)?;

    let today = chrono::Local::now().date_naive();
    let sample_post = format!(
        r#"---
title: "Hello World"
date: {}
---

Welcome to your new blog! Posts are markdown files in `_posts/` with a
`title` and a `date` in their front-matter.

## Quick Start

```bash
$ folio new "My New Post"
$ folio server
```
"#,
        today.format("%Y-%m-%d")
    );

    fs::write(
        target_dir.join(&defaults.content_dir).join("hello-world.md"),
        sample_post,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;
    use tempfile::TempDir;

    #[test]
    fn test_init_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.links.len(), 3);
        assert_eq!(site.config.date_format, "MMM D");

        let loader = site.loader().unwrap();
        assert_eq!(loader.list_post_identifiers().unwrap(), vec!["hello-world"]);
        let meta = loader.list_post_metadata().unwrap();
        assert_eq!(meta[0].title.as_deref(), Some("Hello World"));
        assert!(meta[0].date.is_some());
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
