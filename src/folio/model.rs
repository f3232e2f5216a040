use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::Result;

/// Tag classifying a post. `Journal` and `Notebook` are the stock categories;
/// anything else found in a manifest is kept for display and filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Journal,
    Notebook,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Journal => "journal",
            Category::Notebook => "notebook",
            Category::Other(name) => name,
        }
    }

    /// Human label used for headings, e.g. "Journal".
    pub fn label(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Category names are case-insensitive; they are stored lowercased and trimmed.
impl From<String> for Category {
    fn from(value: String) -> Self {
        let name = value.trim().to_lowercase();
        match name.as_str() {
            "journal" => Category::Journal,
            "notebook" => Category::Notebook,
            _ => Category::Other(name),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::from(value.to_string())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which slice of the collection the list shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Category(Category),
}

impl Filter {
    pub fn matches(&self, post: &PostSummary) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(category) => &post.category == category,
        }
    }

    /// The value carried by a filter button (`data-filter`).
    pub fn key(&self) -> &str {
        match self {
            Filter::All => "all",
            Filter::Category(category) => category.as_str(),
        }
    }
}

impl FromStr for Filter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s.is_empty() {
            Ok(Filter::All)
        } else {
            Ok(Filter::Category(Category::from(s)))
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Metadata for one post, as listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    #[serde(with = "post_date")]
    pub date: NaiveDate,
    pub category: Category,
    pub excerpt: String,
    pub path: String,
}

impl PostSummary {
    /// Long US-style date, e.g. "June 1, 2024".
    pub fn display_date(&self) -> String {
        format_long_date(self.date)
    }
}

pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Parses a manifest date: `YYYY-MM-DD`, or an RFC 3339 timestamp reduced to its date.
pub fn parse_post_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}

mod post_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_post_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid post date: {raw}")))
    }
}

/// The index document: all post summaries plus a last-updated marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Manifest {
    pub posts: Vec<PostSummary>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct RawManifest {
    posts: Vec<serde_json::Value>,
    #[serde(rename = "lastUpdated", default)]
    last_updated: Option<serde_json::Value>,
}

impl Manifest {
    pub fn new(posts: Vec<PostSummary>, last_updated: DateTime<Utc>) -> Self {
        Self {
            posts,
            last_updated: Some(last_updated),
        }
    }

    /// Parses a manifest document, skipping entries that do not describe a
    /// valid post and any entry whose slug was already seen.
    ///
    /// Fails only when the document itself is not an object with a `posts` array.
    pub fn parse(json: &str) -> Result<Self> {
        let raw: RawManifest = serde_json::from_str(json)?;
        let mut posts: Vec<PostSummary> = Vec::with_capacity(raw.posts.len());
        let mut seen: HashSet<String> = HashSet::new();

        for (position, entry) in raw.posts.into_iter().enumerate() {
            let post: PostSummary = match serde_json::from_value(entry) {
                Ok(post) => post,
                Err(e) => {
                    warn!(position, error = %e, "skipping malformed manifest entry");
                    continue;
                }
            };
            if !seen.insert(post.slug.clone()) {
                warn!(slug = %post.slug, "skipping duplicate slug in manifest");
                continue;
            }
            posts.push(post);
        }

        let last_updated = raw
            .last_updated
            .and_then(|value| serde_json::from_value(value).ok());

        Ok(Self {
            posts,
            last_updated,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Sorts newest first. `sort_by` is stable, so equal dates keep manifest order.
pub fn sort_newest_first<T, F>(items: &mut [T], date_of: F)
where
    F: Fn(&T) -> NaiveDate,
{
    items.sort_by(|a, b| date_of(b).cmp(&date_of(a)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_strings() {
        assert_eq!(Category::from("journal"), Category::Journal);
        assert_eq!(Category::from("notebook"), Category::Notebook);
        assert_eq!(
            Category::from("travel"),
            Category::Other("travel".to_string())
        );
        assert_eq!(String::from(Category::Other("travel".into())), "travel");
        assert_eq!(Category::Notebook.label(), "Notebook");
    }

    #[test]
    fn category_names_fold_case() {
        assert_eq!(Category::from("Journal"), Category::Journal);
        assert_eq!(Category::from(" NOTEBOOK "), Category::Notebook);
        assert_eq!(Category::from("Travel"), Category::Other("travel".into()));
        assert_eq!(
            "Travel".parse::<Filter>().unwrap(),
            Filter::Category(Category::from("travel"))
        );
    }

    #[test]
    fn filter_parses_all_and_categories() {
        assert_eq!("all".parse::<Filter>().unwrap(), Filter::All);
        assert_eq!("ALL".parse::<Filter>().unwrap(), Filter::All);
        assert_eq!(
            "Journal".parse::<Filter>().unwrap(),
            Filter::Category(Category::Journal)
        );
        assert_eq!(Filter::Category(Category::Notebook).key(), "notebook");
    }

    #[test]
    fn parses_plain_and_rfc3339_dates() {
        assert_eq!(
            parse_post_date("2024-01-01"),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(
            parse_post_date("2024-06-01T10:30:00.000Z"),
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
        assert_eq!(parse_post_date("yesterday"), None);
        assert_eq!(parse_post_date("2024-13-01"), None);
    }

    #[test]
    fn formats_long_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(format_long_date(date), "June 1, 2024");
    }

    #[test]
    fn parse_skips_malformed_entries() {
        let json = r#"{
            "posts": [
                {"slug":"a","title":"A","date":"2024-01-01","category":"journal","excerpt":"x","path":"blog/posts/journal/a.md"},
                {"slug":"b","title":"B","category":"journal","excerpt":"x","path":"p"},
                {"slug":"c","title":"C","date":"not a date","category":"journal","excerpt":"x","path":"p"},
                {"slug":"d","title":"D","date":"2024-02-01","category":"travel","excerpt":"x","path":"p"}
            ],
            "lastUpdated": "2024-06-01T12:00:00.000Z"
        }"#;

        let manifest = Manifest::parse(json).unwrap();
        let slugs: Vec<_> = manifest.posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "d"]);
        assert_eq!(
            manifest.posts[1].category,
            Category::Other("travel".to_string())
        );
        assert!(manifest.last_updated.is_some());
    }

    #[test]
    fn parse_keeps_first_of_duplicate_slugs() {
        let json = r#"{"posts": [
            {"slug":"a","title":"First","date":"2024-01-01","category":"journal","excerpt":"","path":"p"},
            {"slug":"a","title":"Second","date":"2024-01-02","category":"journal","excerpt":"","path":"p"}
        ]}"#;

        let manifest = Manifest::parse(json).unwrap();
        assert_eq!(manifest.posts.len(), 1);
        assert_eq!(manifest.posts[0].title, "First");
        assert_eq!(manifest.last_updated, None);
    }

    #[test]
    fn parse_rejects_documents_without_posts() {
        assert!(Manifest::parse("[]").is_err());
        assert!(Manifest::parse("{\"lastUpdated\": null}").is_err());
        assert!(Manifest::parse("<html>").is_err());
    }

    #[test]
    fn serializes_with_manifest_field_names() {
        let post = PostSummary {
            slug: "2024-01-01-hello".into(),
            title: "Hello".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            category: Category::Journal,
            excerpt: "Hi".into(),
            path: "blog/posts/journal/2024-01-01-hello.md".into(),
        };
        let manifest = Manifest::new(vec![post], Utc::now());
        let json = manifest.to_json().unwrap();

        assert!(json.contains("\"lastUpdated\""));
        assert!(json.contains("\"date\": \"2024-01-01\""));
        assert!(json.contains("\"category\": \"journal\""));
    }

    #[test]
    fn sort_is_newest_first_and_stable() {
        let mut items = vec![
            ("x", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            ("old", NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()),
            ("y", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            ("new", NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
        ];
        sort_newest_first(&mut items, |(_, d)| *d);
        let order: Vec<_> = items.iter().map(|(s, _)| *s).collect();
        assert_eq!(order, vec!["new", "x", "y", "old"]);
    }
}
