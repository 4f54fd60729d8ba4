//! Generator module - writes every route of the site as static HTML

use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};

use tera::Context;
use walkdir::WalkDir;

use crate::content::{sort_posts, ContentLoader, FrontMatter, MarkdownRenderer, Post, PostMeta};
use crate::helpers::{date_xml, format_date, url_for, POSTS_ROUTE};
use crate::templates::{NavData, PostData, SiteData, TemplateRenderer, STYLESHEET};
use crate::Site;

/// Routes that exist regardless of content
pub const STATIC_ROUTES: [&str; 3] = ["/", "/about/", "/posts/"];

/// Shown on the about page when the site has no about file
const DEFAULT_ABOUT: &str = "# Hi";

/// Static site generator using the embedded templates
pub struct Generator {
    site: Site,
    loader: ContentLoader,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            loader: site.loader()?,
            renderer: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::with_options(&site.config.highlight),
        })
    }

    /// Generate the entire site, returning the number of pages written
    pub fn generate(&self) -> Result<usize> {
        let public_dir = &self.site.public_dir;
        fs::create_dir_all(public_dir)?;

        self.write_file(&public_dir.join("css/style.css"), STYLESHEET)?;
        self.copy_static_assets()?;

        let mut posts = self
            .loader
            .load_posts()
            .with_context(|| format!("Failed to load posts from {:?}", self.site.content_dir))?;
        posts.sort_by(|a, b| a.meta.compare(&b.meta, self.site.config.order_by));

        let site_data = self.build_site_data();
        let nav_data = self.build_nav_data();

        self.generate_home(&posts, &site_data, &nav_data)?;
        self.generate_about(&site_data, &nav_data)?;
        self.generate_post_index(&posts, &site_data, &nav_data)?;
        for post in &posts {
            self.generate_post(post, &site_data, &nav_data)?;
        }

        Ok(STATIC_ROUTES.len() + posts.len())
    }

    /// Every route the site serves, post routes last
    pub fn routes(&self) -> Result<Vec<String>> {
        let mut routes: Vec<String> = STATIC_ROUTES.iter().map(|r| r.to_string()).collect();
        routes.extend(post_routes(&self.loader.list_post_metadata()?));
        Ok(routes)
    }

    fn build_site_data(&self) -> SiteData {
        let config = &self.site.config;
        SiteData {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            links: config.links.clone(),
        }
    }

    fn build_nav_data(&self) -> NavData {
        let config = &self.site.config;
        NavData {
            home: url_for(config, "/"),
            about: url_for(config, "/about/"),
            posts: url_for(config, "/posts/"),
            stylesheet: url_for(config, "/css/style.css"),
        }
    }

    fn base_context(&self, site_data: &SiteData, nav_data: &NavData) -> Context {
        let mut context = Context::new();
        context.insert("site", site_data);
        context.insert("nav", nav_data);
        context
    }

    /// Listing entry for a post, without its body
    fn post_data(&self, meta: &PostMeta) -> PostData {
        let summary = meta.summary(&self.site.config.date_format);
        PostData {
            title: summary.title,
            date: summary.date,
            datetime: meta.date.as_ref().map(date_xml).unwrap_or_default(),
            link: url_for(&self.site.config, &summary.link),
            content: String::new(),
        }
    }

    fn generate_home(&self, posts: &[Post], site_data: &SiteData, nav_data: &NavData) -> Result<()> {
        let limit = self.site.config.recent_posts;
        let recent: Vec<PostData> = self
            .loader
            .recent_posts(limit, self.site.config.order_by)?
            .iter()
            .map(|meta| self.post_data(meta))
            .collect();

        let mut context = self.base_context(site_data, nav_data);
        context.insert("posts", &recent);
        context.insert("has_more", &(posts.len() > limit));

        let html = self.renderer.render("home.html", &context)?;
        self.write_route("/", &html)
    }

    fn generate_about(&self, site_data: &SiteData, nav_data: &NavData) -> Result<()> {
        let about_path = self.site.base_dir.join(&self.site.config.about_file);
        let markdown = if about_path.is_file() {
            let raw = fs::read_to_string(&about_path)?;
            FrontMatter::strip(&raw)
                .with_context(|| format!("Bad front-matter in {:?}", about_path))?
                .to_string()
        } else {
            DEFAULT_ABOUT.to_string()
        };

        let mut context = self.base_context(site_data, nav_data);
        context.insert("content", &self.markdown.render(&markdown));

        let html = self.renderer.render("about.html", &context)?;
        self.write_route("/about/", &html)
    }

    fn generate_post_index(&self, posts: &[Post], site_data: &SiteData, nav_data: &NavData) -> Result<()> {
        let all: Vec<PostData> = posts.iter().map(|p| self.post_data(&p.meta)).collect();

        let mut context = self.base_context(site_data, nav_data);
        context.insert("posts", &all);

        let html = self.renderer.render("posts.html", &context)?;
        self.write_route("/posts/", &html)
    }

    fn generate_post(&self, post: &Post, site_data: &SiteData, nav_data: &NavData) -> Result<()> {
        let mut data = self.post_data(&post.meta);
        data.content = self.markdown.render(&post.body);

        let mut context = self.base_context(site_data, nav_data);
        context.insert("post", &data);
        context.insert("post_date_format", &self.site.config.post_date_format);

        let html = self.renderer.render("post.html", &context)?;
        self.write_route(&post_route(&post.meta.identifier), &html)
    }

    /// Write a page to `<public>/<route>/index.html`
    fn write_route(&self, route: &str, html: &str) -> Result<()> {
        let output_path = route_output_path(&self.site.public_dir, route);
        self.write_file(&output_path, html)
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        tracing::debug!("Generated: {:?}", path);
        Ok(())
    }

    /// Copy the static directory into the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            tracing::debug!("Copied: {:?}", relative);
        }

        Ok(())
    }
}

/// Route of a single post page
pub fn post_route(identifier: &str) -> String {
    format!("{}/{}/", POSTS_ROUTE, identifier)
}

/// Routes for the given posts, in the given order
pub fn post_routes(posts: &[PostMeta]) -> Vec<String> {
    posts.iter().map(|p| post_route(&p.identifier)).collect()
}

/// Output file of a route inside the public directory
pub fn route_output_path(public_dir: &Path, route: &str) -> PathBuf {
    let relative = route.trim_matches('/');
    if relative.is_empty() {
        public_dir.join("index.html")
    } else {
        public_dir.join(relative).join("index.html")
    }
}

/// Display date of a post for command output
pub fn display_date(meta: &PostMeta, date_format: &str) -> String {
    meta.date
        .as_ref()
        .map(|d| format_date(d, date_format))
        .unwrap_or_else(|| "-".to_string())
}

/// Posts of a site sorted by its configured order
pub fn sorted_metadata(site: &Site) -> Result<Vec<PostMeta>> {
    let mut posts = site.loader()?.list_post_metadata()?;
    sort_posts(&mut posts, site.config.order_by);
    Ok(posts)
}
