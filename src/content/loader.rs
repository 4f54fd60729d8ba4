//! Content loader - reads posts from the content directory

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use super::frontmatter::FrontMatter;
use super::post::{sort_posts, Post, PostMeta, PostSummary};
use super::ContentError;
use crate::config::OrderBy;
use crate::Site;

/// Loads posts from a single directory of markdown files
///
/// Every call reads the filesystem again; nothing is cached.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    content_dir: PathBuf,
    extensions: Vec<String>,
    /// Matches `<identifier>.<extension>` for the configured extensions
    pattern: Regex,
}

impl ContentLoader {
    /// Create a loader over `content_dir` recognizing the given extensions
    pub fn new<P: Into<PathBuf>>(content_dir: P, extensions: &[String]) -> Result<Self, ContentError> {
        let extensions: Vec<String> = extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        if extensions.is_empty() {
            return Err(ContentError::NoExtensions);
        }

        let alternatives = extensions
            .iter()
            .map(|e| regex::escape(e))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"^(.+)\.(?:{})$", alternatives))?;

        Ok(Self {
            content_dir: content_dir.into(),
            extensions,
            pattern,
        })
    }

    /// Create a loader for a site's content directory
    pub fn for_site(site: &Site) -> Result<Self, ContentError> {
        Self::new(&site.content_dir, &site.config.extensions)
    }

    /// List the identifiers of all posts, sorted
    ///
    /// Only regular files carrying one of the configured extensions count;
    /// dotfiles and directories are skipped. When the same identifier exists
    /// under two extensions only one entry is returned.
    pub fn list_post_identifiers(&self) -> Result<Vec<String>, ContentError> {
        let entries =
            fs::read_dir(&self.content_dir).map_err(|e| ContentError::io(&self.content_dir, e))?;

        let mut identifiers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ContentError::io(&self.content_dir, e))?;
            let path = entry.path();

            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!("Skipping non UTF-8 file name {:?}", path);
                continue;
            };
            if name.starts_with('.') || !path.is_file() {
                tracing::debug!("Skipping {:?}", path);
                continue;
            }

            match self.strip_extension(&name) {
                Some(identifier) => identifiers.push(identifier.to_string()),
                None => tracing::debug!("Skipping non-markdown file {:?}", path),
            }
        }

        identifiers.sort();
        let before = identifiers.len();
        identifiers.dedup();
        if identifiers.len() != before {
            tracing::warn!(
                "{} post(s) in {:?} share an identifier with another file",
                before - identifiers.len(),
                self.content_dir
            );
        }

        Ok(identifiers)
    }

    /// Metadata of every post, in identifier order
    pub fn list_post_metadata(&self) -> Result<Vec<PostMeta>, ContentError> {
        self.list_post_identifiers()?
            .iter()
            .map(|identifier| self.load_meta(identifier))
            .collect()
    }

    /// Listing entries for every post, dates formatted with `date_format`
    ///
    /// Entries pair positionally with `list_post_identifiers()`.
    pub fn list_all_post_metadata(&self, date_format: &str) -> Result<Vec<PostSummary>, ContentError> {
        Ok(self
            .list_post_metadata()?
            .iter()
            .map(|meta| meta.summary(date_format))
            .collect())
    }

    /// The first `limit` posts under `order`
    pub fn recent_posts(&self, limit: usize, order: OrderBy) -> Result<Vec<PostMeta>, ContentError> {
        let mut posts = self.list_post_metadata()?;
        sort_posts(&mut posts, order);
        posts.truncate(limit);
        Ok(posts)
    }

    /// Markdown body of one post, front-matter removed
    ///
    /// `identifier` may carry its extension (`hello-world.md`).
    pub fn get_post_content(&self, identifier: &str) -> Result<String, ContentError> {
        let path = self.resolve(identifier)?;
        let content = read_file(&path)?;
        let body = FrontMatter::strip(&content)
            .map_err(|source| ContentError::FrontMatter { path, source })?;
        Ok(clean_body(body))
    }

    /// Metadata and body of one post
    pub fn load_post(&self, identifier: &str) -> Result<Post, ContentError> {
        let path = self.resolve(identifier)?;
        let content = read_file(&path)?;
        let (fm, body) = FrontMatter::parse(&content)
            .map_err(|source| ContentError::FrontMatter { path: path.clone(), source })?;

        Ok(Post {
            meta: self.build_meta(&path, fm),
            body: clean_body(body),
        })
    }

    /// All posts with their bodies, in identifier order
    pub fn load_posts(&self) -> Result<Vec<Post>, ContentError> {
        self.list_post_identifiers()?
            .iter()
            .map(|identifier| self.load_post(identifier))
            .collect()
    }

    fn load_meta(&self, identifier: &str) -> Result<PostMeta, ContentError> {
        let path = self.resolve(identifier)?;
        let content = read_file(&path)?;
        let (fm, _) = FrontMatter::parse(&content)
            .map_err(|source| ContentError::FrontMatter { path: path.clone(), source })?;
        Ok(self.build_meta(&path, fm))
    }

    fn build_meta(&self, path: &Path, fm: FrontMatter) -> PostMeta {
        let date = fm.parse_date();

        if fm.title.is_none() {
            tracing::warn!("Post {:?} has no title", path);
        }
        match (&fm.date, &date) {
            (None, _) => tracing::warn!("Post {:?} has no date", path),
            (Some(raw), None) => tracing::warn!("Post {:?} has an unreadable date: {}", path, raw),
            _ => {}
        }

        let identifier = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| self.strip_extension(n))
            .unwrap_or_default()
            .to_string();

        PostMeta {
            identifier,
            title: fm.title,
            date,
        }
    }

    /// Strip a configured markdown extension from a file name
    fn strip_extension<'n>(&self, name: &'n str) -> Option<&'n str> {
        self.pattern
            .captures(name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Find the file backing `identifier`
    ///
    /// `identifier` plus each extension, in configuration order, wins over
    /// `identifier` taken as a file name.
    fn resolve(&self, identifier: &str) -> Result<PathBuf, ContentError> {
        let not_found = || ContentError::NotFound(identifier.to_string());

        if identifier.is_empty()
            || identifier.starts_with('.')
            || identifier.contains(['/', '\\'])
        {
            return Err(not_found());
        }

        // `a.md` listed from `a.md.md` must not resolve to the file `a.md`
        let appended = self
            .extensions
            .iter()
            .map(|ext| self.content_dir.join(format!("{}.{}", identifier, ext)))
            .find(|candidate| candidate.is_file());
        if let Some(path) = appended {
            return Ok(path);
        }

        if self.strip_extension(identifier).is_some() {
            let candidate = self.content_dir.join(identifier);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }

        Err(not_found())
    }
}

fn read_file(path: &Path) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|e| ContentError::io(path, e))
}

/// Drop blank lines before the body and trailing whitespace after it
fn clean_body(body: &str) -> String {
    body.trim_start_matches(['\n', '\r']).trim_end().to_string()
}
