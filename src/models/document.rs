//! Bibliographic record as returned by the search API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single search result.
///
/// Only the bibcode is guaranteed; every other field is present only when
/// the API returned it, and renderers fall back to placeholders otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique record identifier
    pub bibcode: String,

    /// Authors in publication order
    #[serde(default)]
    pub author: Option<Vec<String>>,

    /// Title fragments (usually one)
    #[serde(default)]
    pub title: Option<Vec<String>>,

    /// Publication date, `YYYY-MM-DD` with `00` for unknown parts
    #[serde(default)]
    pub pubdate: Option<String>,

    /// Abstract text (may contain markup)
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,

    #[serde(default)]
    pub citation_count: Option<u64>,

    /// Bibcodes of the referenced papers
    #[serde(default)]
    pub reference: Option<Vec<String>>,

    /// JSON-encoded link descriptors, one per available resource
    #[serde(default)]
    pub links_data: Option<Vec<String>>,

    /// Electronic source flags (`ADS_PDF`, `ADS_SCAN`, ...)
    #[serde(default)]
    pub esources: Option<Vec<String>>,

    /// Relevance score
    #[serde(default)]
    pub score: Option<f64>,

    /// Raw publication string (extended field)
    #[serde(default)]
    pub pub_raw: Option<String>,

    /// Keywords (extended field)
    #[serde(default)]
    pub keyword: Option<Vec<String>>,

    /// DOIs (extended field)
    #[serde(default)]
    pub doi: Option<Vec<String>>,

    /// Affiliations, parallel to `author` when complete (extended field)
    #[serde(default)]
    pub aff: Option<Vec<String>>,
}

impl Document {
    /// Create a document carrying only its bibcode
    pub fn new(bibcode: impl Into<String>) -> Self {
        Self {
            bibcode: bibcode.into(),
            ..Default::default()
        }
    }

    /// Number of listed authors, if the author field is present
    pub fn author_count(&self) -> Option<usize> {
        self.author.as_ref().map(Vec::len)
    }

    /// Number of references, if the reference field is present
    pub fn reference_count(&self) -> Option<usize> {
        self.reference.as_ref().map(Vec::len)
    }

    /// Whether the given esource flag is set
    pub fn has_esource(&self, flag: &str) -> bool {
        self.esources
            .as_ref()
            .is_some_and(|flags| flags.iter().any(|f| f == flag))
    }

    /// Decode the link descriptors. Entries that are not valid JSON objects
    /// are skipped.
    pub fn links(&self) -> Vec<LinkData> {
        let Some(raw) = &self.links_data else {
            return Vec::new();
        };
        raw.iter()
            .filter_map(|entry| match serde_json::from_str::<LinkData>(entry) {
                Ok(link) => Some(link),
                Err(err) => {
                    tracing::warn!(bibcode = %self.bibcode, error = %err, "skipping malformed link descriptor");
                    None
                }
            })
            .collect()
    }
}

/// One decoded `links_data` entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LinkData {
    /// Source type tag (`electr`, `pdf`, `data`, ...)
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// `open` for open-access resources
    #[serde(default)]
    pub access: Option<String>,

    /// Number of instances, e.g. data sets or catalogued objects
    #[serde(default, deserialize_with = "instances_as_string")]
    pub instances: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

impl LinkData {
    pub fn is_open_access(&self) -> bool {
        self.access.as_deref() == Some("open")
    }
}

// The API sends instance counts as strings, sometimes empty; numbers are
// accepted too.
fn instances_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_document() {
        let doc: Document = serde_json::from_str(r#"{"bibcode": "2020ApJ...900....1X"}"#).unwrap();
        assert_eq!(doc.bibcode, "2020ApJ...900....1X");
        assert!(doc.author.is_none());
        assert!(doc.title.is_none());
        assert!(doc.links().is_empty());
        assert_eq!(doc.author_count(), None);
    }

    #[test]
    fn test_deserialize_full_document() {
        let doc: Document = serde_json::from_str(
            r#"{
                "bibcode": "1929PNAS...15..168H",
                "author": ["Hubble, Edwin"],
                "title": ["A Relation between Distance and Radial Velocity"],
                "pubdate": "1929-03-00",
                "abstract": "Determinations of the motion of the sun...",
                "citation_count": 2700,
                "reference": ["1917PNAS....3..213S"],
                "esources": ["ADS_PDF", "ADS_SCAN"],
                "score": 12.5,
                "doi": ["10.1073/pnas.15.3.168"]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.citation_count, Some(2700));
        assert_eq!(doc.reference_count(), Some(1));
        assert!(doc.has_esource("ADS_SCAN"));
        assert!(!doc.has_esource("PUB_PDF"));
        assert_eq!(doc.abstract_text.as_deref(), Some("Determinations of the motion of the sun..."));
    }

    #[test]
    fn test_link_instances_string_or_number() {
        let mut doc = Document::new("X");
        doc.links_data = Some(vec![
            r#"{"type": "data", "instances": "3", "access": "open"}"#.to_string(),
            r#"{"type": "simbad", "instances": 7}"#.to_string(),
            r#"{"type": "ned", "instances": ""}"#.to_string(),
        ]);
        let links = doc.links();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].instances.as_deref(), Some("3"));
        assert!(links[0].is_open_access());
        assert_eq!(links[1].instances.as_deref(), Some("7"));
        assert!(!links[1].is_open_access());
        assert_eq!(links[2].instances, None);
    }

    #[test]
    fn test_malformed_link_is_skipped() {
        let mut doc = Document::new("X");
        doc.links_data = Some(vec!["not json".to_string(), r#"{"type": "gif"}"#.to_string()]);
        let links = doc.links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].kind.as_deref(), Some("gif"));
    }
}
