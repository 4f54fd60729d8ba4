//! Post models

use chrono::NaiveDateTime;
use serde::Serialize;
use std::cmp::Ordering;

use crate::config::OrderBy;
use crate::helpers::{format_date, post_link};

/// Metadata of a post as read from its front-matter
///
/// Kept unformatted so callers decide how dates are displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMeta {
    /// Filename without its markdown extension
    pub identifier: String,

    /// Post title
    pub title: Option<String>,

    /// Publication date
    pub date: Option<NaiveDateTime>,
}

impl PostMeta {
    /// Link to the post page
    pub fn link(&self) -> String {
        post_link(&self.identifier)
    }

    /// Display form with the date formatted by `date_format`
    ///
    /// Missing fields become empty strings.
    pub fn summary(&self, date_format: &str) -> PostSummary {
        PostSummary {
            title: self.title.clone().unwrap_or_default(),
            date: self
                .date
                .as_ref()
                .map(|d| format_date(d, date_format))
                .unwrap_or_default(),
            link: self.link(),
        }
    }

    /// Compare two posts under the given listing order
    ///
    /// Undated posts go last for both date orders; ties fall back to the
    /// identifier so the result never depends on directory order.
    pub fn compare(&self, other: &Self, order: OrderBy) -> Ordering {
        let by_date = match (order, &self.date, &other.date) {
            (OrderBy::Name, _, _) => Ordering::Equal,
            (_, Some(_), None) => Ordering::Less,
            (_, None, Some(_)) => Ordering::Greater,
            (_, None, None) => Ordering::Equal,
            (OrderBy::DateDesc, Some(a), Some(b)) => b.cmp(a),
            (OrderBy::DateAsc, Some(a), Some(b)) => a.cmp(b),
        };
        by_date.then_with(|| self.identifier.cmp(&other.identifier))
    }
}

/// A post entry as shown in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub title: String,
    pub date: String,
    pub link: String,
}

/// A post with its markdown body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub meta: PostMeta,

    /// Markdown body with front-matter removed
    pub body: String,
}

/// Sort posts in place under the given order
pub fn sort_posts(posts: &mut [PostMeta], order: OrderBy) {
    posts.sort_by(|a, b| a.compare(b, order));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn meta(identifier: &str, date: Option<(i32, u32, u32)>) -> PostMeta {
        PostMeta {
            identifier: identifier.to_string(),
            title: Some(identifier.to_uppercase()),
            date: date.map(|(y, m, d)| {
                NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            }),
        }
    }

    #[test]
    fn test_summary() {
        let post = PostMeta {
            identifier: "hello-world".to_string(),
            title: Some("Hello World".to_string()),
            date: meta("x", Some((2022, 1, 1))).date,
        };
        assert_eq!(
            post.summary("MMM D"),
            PostSummary {
                title: "Hello World".to_string(),
                date: "Jan 1".to_string(),
                link: "/posts/hello-world".to_string(),
            }
        );
    }

    #[test]
    fn test_summary_with_missing_fields() {
        let post = PostMeta {
            identifier: "draft".to_string(),
            title: None,
            date: None,
        };
        let summary = post.summary("MMM D");
        assert_eq!(summary.title, "");
        assert_eq!(summary.date, "");
        assert_eq!(summary.link, "/posts/draft");
    }

    #[test]
    fn test_sort_newest_first() {
        let mut posts = vec![
            meta("a", Some((2021, 5, 1))),
            meta("b", None),
            meta("c", Some((2023, 1, 1))),
            meta("d", Some((2021, 5, 1))),
        ];
        sort_posts(&mut posts, OrderBy::DateDesc);
        let ids: Vec<_> = posts.iter().map(|p| p.identifier.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn test_sort_oldest_first() {
        let mut posts = vec![
            meta("b", None),
            meta("c", Some((2023, 1, 1))),
            meta("a", Some((2021, 5, 1))),
        ];
        sort_posts(&mut posts, OrderBy::DateAsc);
        let ids: Vec<_> = posts.iter().map(|p| p.identifier.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_sort_by_name() {
        let mut posts = vec![meta("zeta", Some((2023, 1, 1))), meta("alpha", None)];
        sort_posts(&mut posts, OrderBy::Name);
        assert_eq!(posts[0].identifier, "alpha");
    }
}
