//! URL helper functions

use crate::config::SiteConfig;

/// Route prefix shared by every post page
pub const POSTS_ROUTE: &str = "/posts";

/// Link to a single post
///
/// # Examples
/// ```ignore
/// post_link("hello-world") // -> "/posts/hello-world"
/// ```
pub fn post_link(identifier: &str) -> String {
    format!("{}/{}", POSTS_ROUTE, identifier)
}

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/blog/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_link() {
        assert_eq!(post_link("hello-world"), "/posts/hello-world");
    }

    #[test]
    fn test_url_for() {
        let mut config = SiteConfig::default();
        assert_eq!(url_for(&config, "/css/style.css"), "/css/style.css");
        assert_eq!(url_for(&config, ""), "/");

        config.root = "/blog/".to_string();
        assert_eq!(url_for(&config, "/css/style.css"), "/blog/css/style.css");
        assert_eq!(url_for(&config, "/"), "/blog/");
    }
}
