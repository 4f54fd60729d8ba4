//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Create a new post file and return its path
pub fn run(site: &Site, title: &str) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let filename = site
        .config
        .new_post_name
        .replace(":title", &slug)
        .replace(":year", &now.format("%Y").to_string())
        .replace(":month", &now.format("%m").to_string())
        .replace(":day", &now.format("%d").to_string());

    fs::create_dir_all(&site.content_dir)?;
    let file_path = site.content_dir.join(&filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    // serde_yaml quotes the title when it needs it
    let title_yaml = serde_yaml::to_string(title)?;
    let content = format!(
        "---\ntitle: {}\ndate: {}\n---\n",
        title_yaml.trim_end(),
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_post() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = run(&site, "Rust: A Love Story").unwrap();
        assert_eq!(path.file_name().unwrap(), "rust-a-love-story.md");

        let post = site.loader().unwrap().load_post("rust-a-love-story").unwrap();
        assert_eq!(post.meta.title.as_deref(), Some("Rust: A Love Story"));
        assert!(post.meta.date.is_some());
        assert_eq!(post.body, "");
    }

    #[test]
    fn test_new_post_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        run(&site, "Twice").unwrap();
        assert!(run(&site, "Twice").is_err());
    }
}
