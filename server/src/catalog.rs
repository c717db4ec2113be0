//! In-memory document catalog the development backend searches.
//!
//! Matching is plain case-insensitive substring containment. Results keep catalog
//! order; there is no scoring.
//!
//! Catalogs come from a JSON array of documents, from Reuters-21578 style SGML
//! (`<REUTERS>` blocks, one `.sgm` file or a directory of them), or from the bundled
//! sample headlines.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use docsearch_core::types::SearchRequest;
use tracing::debug;

/// One searchable document, serialized in the shape the widget expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub author: String,
    #[serde(rename = "specific_location", default)]
    pub location: String,
}

impl Document {
    fn new(title: &str, topic: &str, author: &str, location: &str) -> Self {
        Self {
            title: title.to_string(),
            topic: topic.to_string(),
            author: author.to_string(),
            location: location.to_string(),
        }
    }

    /// Whether this document satisfies every part of `req`.
    ///
    /// The query must appear in the title. Each non-empty filter must appear in the
    /// corresponding field; empty filters match everything.
    pub fn matches(&self, req: &SearchRequest) -> bool {
        contains_ci(&self.title, &req.query)
            && contains_ci(&self.topic, &req.topic)
            && contains_ci(&self.author, &req.author)
            && contains_ci(&self.location, &req.location)
    }
}

/// Decode the entities the archive uses and collapse runs of whitespace.
fn clean_text(raw: &str) -> String {
    let decoded = raw
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace("&#3;", "");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub struct Catalog {
    documents: Vec<Document>,
}

impl Catalog {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Load a catalog from a JSON file holding an array of documents.
    pub fn from_json_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("could not read {}: {e}", path.display()))?;
        let documents: Vec<Document> = serde_json::from_str(&content)
            .map_err(|e| format!("could not parse {}: {e}", path.display()))?;
        Ok(Self::new(documents))
    }

    /// Load a catalog from `path`: a directory or `.sgm` file is read as SGML,
    /// anything else as a JSON array of documents.
    pub fn load(path: &Path) -> Result<Self, String> {
        let is_sgml = path.is_dir() || path.extension().is_some_and(|ext| ext == "sgm");
        if is_sgml {
            Self::from_sgml_path(path)
        } else {
            Self::from_json_file(path)
        }
    }

    /// Load every `*.sgm` file in a directory (in file name order), or a single file.
    pub fn from_sgml_path(path: &Path) -> Result<Self, String> {
        let files = if path.is_dir() {
            let entries = std::fs::read_dir(path)
                .map_err(|e| format!("could not read {}: {e}", path.display()))?;
            let mut files: Vec<_> = entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "sgm"))
                .collect();
            files.sort();
            files
        } else {
            vec![path.to_path_buf()]
        };

        let mut documents = Vec::new();
        for file in &files {
            // The archive is not valid UTF-8 throughout
            let bytes =
                std::fs::read(file).map_err(|e| format!("could not read {}: {e}", file.display()))?;
            documents.extend(Self::from_sgml(&String::from_utf8_lossy(&bytes)).documents);
        }
        debug!(files = files.len(), documents = documents.len(), "Loaded SGML catalog");
        Ok(Self::new(documents))
    }

    /// Parse the `<REUTERS>` blocks in `content`. Blocks without a `<TITLE>` are skipped.
    ///
    /// Multiple `<D>` entries under `<TOPICS>` or `<PLACES>` are joined with `", "`.
    pub fn from_sgml(content: &str) -> Self {
        let article_re = Regex::new(r"(?s)<REUTERS\b.*?</REUTERS>").unwrap();
        let title_re = Regex::new(r"(?s)<TITLE>(.*?)</TITLE>").unwrap();
        let author_re = Regex::new(r"(?s)<AUTHOR>(.*?)</AUTHOR>").unwrap();
        let topics_re = Regex::new(r"(?s)<TOPICS>(.*?)</TOPICS>").unwrap();
        let places_re = Regex::new(r"(?s)<PLACES>(.*?)</PLACES>").unwrap();
        let d_re = Regex::new(r"(?s)<D>(.*?)</D>").unwrap();

        let inner = |re: &Regex, article: &str| -> String {
            re.captures(article).map(|c| clean_text(&c[1])).unwrap_or_default()
        };
        let entries = |re: &Regex, article: &str| -> String {
            let Some(list) = re.captures(article) else {
                return String::new();
            };
            d_re.captures_iter(&list[1]).map(|c| clean_text(&c[1])).collect::<Vec<_>>().join(", ")
        };

        let documents = article_re
            .find_iter(content)
            .filter_map(|m| {
                let article = m.as_str();
                let title = inner(&title_re, article);
                if title.is_empty() {
                    return None;
                }
                Some(Document {
                    title,
                    topic: entries(&topics_re, article),
                    author: inner(&author_re, article),
                    location: entries(&places_re, article),
                })
            })
            .collect();
        Self::new(documents)
    }

    /// Newswire headlines bundled for local development.
    pub fn builtin() -> Self {
        Self::new(vec![
            Document::new("Bahia cocoa review", "cocoa", "", "brazil"),
            Document::new("Cocoa buffer stock talks stall in London", "cocoa", "Lisa Vaughan", "uk"),
            Document::new("Computer Terminal Systems completes sale", "acq", "", "usa"),
            Document::new("Champion Products approves stock split", "earn", "", "usa"),
            Document::new("Crude oil prices firm on OPEC output curbs", "crude", "Philip Shehadi", "kuwait"),
            Document::new("Kuwait says no plans for emergency OPEC talks", "crude", "Philip Shehadi", "kuwait"),
            Document::new("Saudi crude output falls below quota", "crude", "", "saudi-arabia"),
            Document::new("US grain carloadings fall in week", "grain", "", "usa"),
            Document::new("China wheat imports seen rising", "grain", "Rich Miller", "china"),
            Document::new("Wheat futures close higher on export hopes", "grain", "Rich Miller", "usa"),
            Document::new("Coffee quota talks resume in London", "coffee", "Lisa Vaughan", "uk"),
            Document::new("Brazil coffee exporters await new registrations", "coffee", "", "brazil"),
            Document::new("Colombia coffee output estimate raised", "coffee", "", "colombia"),
            Document::new("Sugar beet plantings forecast lower in Europe", "sugar", "", "west-germany"),
            Document::new("Cuba sugar harvest behind schedule", "sugar", "", "cuba"),
            Document::new("Gold prices steady in quiet Zurich trade", "gold", "Peter Torday", "switzerland"),
            Document::new("South African gold mine output rises", "gold", "", "south-africa"),
            Document::new("Copper price cut by major US producer", "copper", "", "usa"),
            Document::new("Lead and zinc stocks decline on LME", "lead", "", "uk"),
            Document::new("Japan ship orders rise in February", "ship", "", "japan"),
            Document::new("Bundesbank leaves money market rates unchanged", "money-fx", "Peter Torday", "west-germany"),
            Document::new("Dollar opens higher in Tokyo", "money-fx", "", "japan"),
            Document::new("Fed adds reserves via customer repurchases", "money-fx", "", "usa"),
            Document::new("Trade deficit narrows as exports climb", "trade", "Rich Miller", "usa"),
        ])
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents matching `req`, in catalog order, at most `limit` of them.
    pub fn search(&self, req: &SearchRequest, limit: usize) -> Vec<&Document> {
        self.documents.iter().filter(|d| d.matches(req)).take(limit).collect()
    }
}
