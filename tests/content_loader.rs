use std::fs;
use std::path::Path;

use folio::config::{OrderBy, SiteConfig};
use folio::content::{ContentError, ContentLoader, PostSummary};
use folio::generator::{post_routes, Generator};
use folio::Site;
use tempfile::TempDir;

fn extensions() -> Vec<String> {
    vec!["md".to_string(), "markdown".to_string()]
}

fn write_post(dir: &Path, name: &str, title: &str, date: &str, body: &str) {
    let content = format!("---\ntitle: \"{}\"\ndate: {}\n---\n{}\n", title, date, body);
    fs::write(dir.join(name), content).unwrap();
}

fn blog() -> (TempDir, ContentLoader) {
    let dir = TempDir::new().unwrap();
    write_post(dir.path(), "hello-world.md", "Hello World", "2022-01-01", "# Hi");
    write_post(dir.path(), "second-post.md", "Second", "2022-03-14", "Some *text*.");
    write_post(dir.path(), "older.markdown", "Older", "2021-07-04 09:15", "Old news.\n\n---\n\nAfter a rule.");
    let loader = ContentLoader::new(dir.path(), &extensions()).unwrap();
    (dir, loader)
}

#[test]
fn hello_world_scenario() {
    let (_dir, loader) = blog();

    let identifiers = loader.list_post_identifiers().unwrap();
    assert!(identifiers.contains(&"hello-world".to_string()));

    assert_eq!(loader.get_post_content("hello-world.md").unwrap(), "# Hi");
    assert_eq!(loader.get_post_content("hello-world").unwrap(), "# Hi");

    let metadata = loader.list_all_post_metadata("MMM D").unwrap();
    assert!(metadata.contains(&PostSummary {
        title: "Hello World".to_string(),
        date: "Jan 1".to_string(),
        link: "/posts/hello-world".to_string(),
    }));
}

#[test]
fn one_identifier_per_file_without_extension() {
    let (dir, loader) = blog();

    let identifiers = loader.list_post_identifiers().unwrap();
    let files = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(identifiers.len(), files);

    let mut deduped = identifiers.clone();
    deduped.dedup();
    assert_eq!(deduped, identifiers);

    for identifier in &identifiers {
        assert!(!identifier.ends_with(".md"));
        assert!(!identifier.ends_with(".markdown"));
    }
}

#[test]
fn content_never_contains_front_matter() {
    let (_dir, loader) = blog();

    for identifier in loader.list_post_identifiers().unwrap() {
        let body = loader.get_post_content(&identifier).unwrap();
        assert!(!body.starts_with("---"), "{} kept its delimiter", identifier);
        assert!(!body.contains("title:"), "{} kept its front-matter", identifier);
    }

    // horizontal rules inside the body survive
    assert!(loader.get_post_content("older").unwrap().contains("\n---\n"));
}

#[test]
fn metadata_pairs_with_identifiers() {
    let (_dir, loader) = blog();

    let identifiers = loader.list_post_identifiers().unwrap();
    let metadata = loader.list_all_post_metadata("MMM D").unwrap();
    assert_eq!(identifiers.len(), metadata.len());

    for (identifier, entry) in identifiers.iter().zip(&metadata) {
        assert_eq!(entry.link, format!("/posts/{}", identifier));
    }

    let raw = loader.list_post_metadata().unwrap();
    for (identifier, meta) in identifiers.iter().zip(&raw) {
        assert_eq!(&meta.identifier, identifier);
    }
}

#[test]
fn empty_directory() {
    let dir = TempDir::new().unwrap();
    let loader = ContentLoader::new(dir.path(), &extensions()).unwrap();

    assert!(loader.list_post_identifiers().unwrap().is_empty());
    assert!(loader.list_all_post_metadata("MMM D").unwrap().is_empty());
    assert!(post_routes(&loader.list_post_metadata().unwrap()).is_empty());
}

#[test]
fn empty_site_generates_no_post_routes() {
    let dir = TempDir::new().unwrap();
    let site = Site::with_config(dir.path().to_path_buf(), SiteConfig::default());
    fs::create_dir_all(&site.content_dir).unwrap();

    let routes = Generator::new(&site).unwrap().routes().unwrap();
    assert!(routes.iter().all(|r| !r.starts_with("/posts/") || r == "/posts/"));
}

#[test]
fn repeated_calls_are_identical() {
    let (_dir, loader) = blog();

    assert_eq!(
        loader.list_post_identifiers().unwrap(),
        loader.list_post_identifiers().unwrap()
    );
    assert_eq!(
        loader.list_all_post_metadata("MMM D").unwrap(),
        loader.list_all_post_metadata("MMM D").unwrap()
    );
    assert_eq!(
        loader.get_post_content("second-post").unwrap(),
        loader.get_post_content("second-post").unwrap()
    );
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let loader = ContentLoader::new(dir.path().join("nope"), &extensions()).unwrap();

    assert!(matches!(
        loader.list_post_identifiers(),
        Err(ContentError::Io { .. })
    ));
    assert!(loader.list_all_post_metadata("MMM D").is_err());
}

#[test]
fn unknown_post_is_not_found() {
    let (_dir, loader) = blog();
    assert!(matches!(
        loader.get_post_content("does-not-exist"),
        Err(ContentError::NotFound(id)) if id == "does-not-exist"
    ));
}

#[test]
fn missing_fields_become_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("untitled.md"), "---\ntags: [misc]\n---\nBody").unwrap();
    let loader = ContentLoader::new(dir.path(), &extensions()).unwrap();

    let metadata = loader.list_all_post_metadata("MMM D").unwrap();
    assert_eq!(
        metadata,
        vec![PostSummary {
            title: String::new(),
            date: String::new(),
            link: "/posts/untitled".to_string(),
        }]
    );
}

#[test]
fn malformed_front_matter_fails_listing() {
    let (dir, loader) = blog();
    fs::write(dir.path().join("broken.md"), "---\ntitle: [oops\n---\nBody").unwrap();

    assert!(matches!(
        loader.list_all_post_metadata("MMM D"),
        Err(ContentError::FrontMatter { .. })
    ));
}

#[test]
fn recent_posts_are_newest_first() {
    let (_dir, loader) = blog();

    let recent = loader.recent_posts(2, OrderBy::DateDesc).unwrap();
    let ids: Vec<_> = recent.iter().map(|p| p.identifier.as_str()).collect();
    assert_eq!(ids, vec!["second-post", "hello-world"]);
}
