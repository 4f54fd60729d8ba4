//! Front-matter parsing

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::helpers::parse_date;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("no front-matter block found")]
    Missing,

    #[error("front-matter block is not closed")]
    Unterminated,

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),
}

/// Custom deserializer that accepts any scalar and keeps its text
///
/// `date: 2022-01-01` and `title: 1984` are plain YAML scalars that are not
/// always strings; authors still mean the literal text.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ScalarString;

    impl<'de> Visitor<'de> for ScalarString {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarString)
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        Err(FrontMatterError::Missing)
    }

    /// Strip the front-matter block and return the body
    ///
    /// A document without a block is all body; a malformed block is still
    /// an error.
    pub fn strip(content: &str) -> Result<&str, FrontMatterError> {
        match Self::parse(content) {
            Ok((_, body)) => Ok(body),
            Err(FrontMatterError::Missing) => Ok(content),
            Err(e) => Err(e),
        }
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let rest = &content[3..]; // Skip opening ---
        let rest = rest.trim_start_matches([' ', '\t']);
        let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'));
        let Some(rest) = rest else {
            // `---text` on the first line is not a delimiter
            return Err(FrontMatterError::Missing);
        };

        let (yaml_content, remaining) = if let Some(after) = rest.strip_prefix("---") {
            ("", after)
        } else {
            let end_pos = rest.find("\n---").ok_or(FrontMatterError::Unterminated)?;
            (&rest[..end_pos], &rest[end_pos + 4..]) // Skip \n---
        };

        // Drop the remainder of the closing delimiter line
        let remaining = match remaining.find('\n') {
            Some(pos) => &remaining[pos + 1..],
            None => "",
        };

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml_content)?;
        Ok((fm, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str), FrontMatterError> {
        // JSON front-matter ends with ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            let end_pos = rest.find(";;;").ok_or(FrontMatterError::Unterminated)?;
            let json_content = &rest[..end_pos];
            let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);

            let fm: FrontMatter = serde_json::from_str(json_content)?;
            return Ok((fm, remaining));
        }

        // A JSON object at the start, closed by its matching brace. Anything
        // that is not one is a body that happens to start with `{`.
        let end_pos = json_object_end(content).ok_or(FrontMatterError::Missing)?;
        let json_content = &content[..end_pos];
        let remaining = content[end_pos..].trim_start_matches(['\n', '\r']);

        let fm: FrontMatter =
            serde_json::from_str(json_content).map_err(|_| FrontMatterError::Missing)?;
        Ok((fm, remaining))
    }

    /// Parse the date string into a date-time
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date)
    }
}

/// Byte offset just past the brace closing the leading JSON object
fn json_object_end(content: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in content.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: "Hello World"
date: 2022-01-01
---
# Hi
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.date.as_deref(), Some("2022-01-01"));
        assert_eq!(remaining, "# Hi\n");
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Test {Post}", "date": "2024-01-15"}

This is content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Test {Post}"));
        assert_eq!(remaining, "This is content.\n");
    }

    #[test]
    fn test_parse_semicolon_json_frontmatter() {
        let content = ";;;\n{\"title\": \"Fenced\"}\n;;;\nBody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Fenced"));
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_numeric_scalars_kept_as_text() {
        let content = "---\ntitle: 1984\ndate: 2024\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("1984"));
        assert_eq!(fm.date.as_deref(), Some("2024"));
        assert_eq!(fm.parse_date(), None);
    }

    #[test]
    fn test_missing_fields_are_none() {
        let content = "---\nauthor: someone\n---\nBody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(fm.date, None);
        assert!(fm.extra.contains_key("author"));
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_empty_block() {
        let (fm, remaining) = FrontMatter::parse("---\n---\nBody").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_missing_block() {
        let err = FrontMatter::parse("# Just markdown").unwrap_err();
        assert!(matches!(err, FrontMatterError::Missing));
        assert_eq!(FrontMatter::strip("# Just markdown").unwrap(), "# Just markdown");
    }

    #[test]
    fn test_unterminated_block() {
        let err = FrontMatter::parse("---\ntitle: Open\n# Hi").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated));
        assert!(FrontMatter::strip("---\ntitle: Open\n# Hi").is_err());
    }

    #[test]
    fn test_body_starting_with_brace() {
        for content in ["{not json} body", "{", "{\"open\": true"] {
            assert!(matches!(
                FrontMatter::parse(content).unwrap_err(),
                FrontMatterError::Missing
            ));
            assert_eq!(FrontMatter::strip(content).unwrap(), content);
        }
    }

    #[test]
    fn test_malformed_yaml() {
        let err = FrontMatter::parse("---\ntitle: [unclosed\n---\nBody").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_body_keeps_horizontal_rules() {
        let content = "---\ntitle: Rules\n---\nabove\n\n---\n\nbelow";
        let (_, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(remaining, "above\n\n---\n\nbelow");
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(remaining, "Body\r\n");
    }
}
