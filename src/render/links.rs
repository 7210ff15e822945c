//! Link kinds and per-document link classification.
//!
//! Both the summary row and the full record show the same set of links; they
//! only differ in how much of each entry they print.

use url::form_urlencoded;

use crate::models::Document;
use crate::render::{ADS_DATA_QUERY, LOCAL_DATA_QUERY};

/// A kind of resource linked from a record.
///
/// Variant order is the display order of both the summary link cell and the
/// full record's material list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkKind {
    Abstract,
    Ejournal,
    Article,
    Gif,
    Preprint,
    Data,
    References,
    Citations,
    Simbad,
    Ned,
    Spires,
}

/// Number of link kinds
pub const LINK_KIND_COUNT: usize = 11;

/// Source-type tags found in link descriptors and the kind each maps to.
pub const SOURCE_TYPES: &[(&str, LinkKind)] = &[
    ("electr", LinkKind::Ejournal),
    ("pdf", LinkKind::Article),
    ("postscript", LinkKind::Article),
    ("gif", LinkKind::Gif),
    ("preprint", LinkKind::Preprint),
    ("data", LinkKind::Data),
    ("simbad", LinkKind::Simbad),
    ("ned", LinkKind::Ned),
    ("spires", LinkKind::Spires),
];

/// Layout of the summary link cell, `A EFGX D RC SNH`. `None` is a spacer.
pub const SUMMARY_SLOTS: [Option<LinkKind>; 15] = [
    Some(LinkKind::Abstract),
    None,
    Some(LinkKind::Ejournal),
    Some(LinkKind::Article),
    Some(LinkKind::Gif),
    Some(LinkKind::Preprint),
    None,
    Some(LinkKind::Data),
    None,
    Some(LinkKind::References),
    Some(LinkKind::Citations),
    None,
    Some(LinkKind::Simbad),
    Some(LinkKind::Ned),
    Some(LinkKind::Spires),
];

impl LinkKind {
    /// All kinds in display order
    pub const ALL: [LinkKind; LINK_KIND_COUNT] = [
        LinkKind::Abstract,
        LinkKind::Ejournal,
        LinkKind::Article,
        LinkKind::Gif,
        LinkKind::Preprint,
        LinkKind::Data,
        LinkKind::References,
        LinkKind::Citations,
        LinkKind::Simbad,
        LinkKind::Ned,
        LinkKind::Spires,
    ];

    /// Look up the kind for a link descriptor's source-type tag
    pub fn from_source_type(tag: &str) -> Option<Self> {
        SOURCE_TYPES
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, kind)| *kind)
    }

    /// Single-letter label used in the summary cell
    pub fn letter(&self) -> char {
        match self {
            LinkKind::Abstract => 'A',
            LinkKind::Ejournal => 'E',
            LinkKind::Article => 'F',
            LinkKind::Gif => 'G',
            LinkKind::Preprint => 'X',
            LinkKind::Data => 'D',
            LinkKind::References => 'R',
            LinkKind::Citations => 'C',
            LinkKind::Simbad => 'S',
            LinkKind::Ned => 'N',
            LinkKind::Spires => 'H',
        }
    }

    /// The `link_type` parameter of the data-query script
    pub fn link_type(&self) -> &'static str {
        match self {
            LinkKind::Abstract => "ABSTRACT",
            LinkKind::Ejournal => "EJOURNAL",
            LinkKind::Article => "ARTICLE",
            LinkKind::Gif => "GIF",
            LinkKind::Preprint => "PREPRINT",
            LinkKind::Data => "DATA",
            LinkKind::References => "REFERENCES",
            LinkKind::Citations => "CITATIONS",
            LinkKind::Simbad => "SIMBAD",
            LinkKind::Ned => "NED",
            LinkKind::Spires => "SPIRES",
        }
    }

    /// Parse a `link_type` parameter
    pub fn from_link_type(link_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.link_type() == link_type)
    }

    /// Label in the full record's material list
    pub fn label(&self) -> &'static str {
        match self {
            LinkKind::Abstract => "Abstract",
            LinkKind::Ejournal => "Electronic on-line article (HTML)",
            LinkKind::Article => "Full article (PDF/Postscript)",
            LinkKind::Gif => "Scanned article (GIF)",
            LinkKind::Preprint => "arXiv e-print",
            LinkKind::Data => "On-line data",
            LinkKind::References => "References in the article",
            LinkKind::Citations => "Citations to the article",
            LinkKind::Simbad => "SIMBAD objects",
            LinkKind::Ned => "NED objects",
            LinkKind::Spires => "HEP/Spires information",
        }
    }

    /// Kinds served by this front end rather than the remote ADS site
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            LinkKind::Abstract | LinkKind::References | LinkKind::Citations
        )
    }

    /// Kinds annotated with a count
    pub fn shows_count(&self) -> bool {
        matches!(
            self,
            LinkKind::Data
                | LinkKind::Simbad
                | LinkKind::Ned
                | LinkKind::References
                | LinkKind::Citations
        )
    }

    /// Data-query URL for this kind of link on `bibcode`
    pub fn data_query_href(&self, bibcode: &str) -> String {
        let base = if self.is_local() {
            LOCAL_DATA_QUERY
        } else {
            ADS_DATA_QUERY
        };
        let bibcode: String = form_urlencoded::byte_serialize(bibcode.as_bytes()).collect();
        format!("{}?bibcode={}&link_type={}", base, bibcode, self.link_type())
    }
}

/// One link shown for a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub kind: LinkKind,
    pub open_access: bool,
    pub count: Option<String>,
    /// Direct URL from the link descriptor, if any
    pub url: Option<String>,
}

/// The links a document qualifies for, at most one per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    entries: [Option<LinkEntry>; LINK_KIND_COUNT],
}

impl LinkSet {
    /// Classify a document's links.
    ///
    /// Descriptors are applied in order, then `ADS_PDF` / `ADS_SCAN` esources
    /// force open-access article and scan links. A later entry for the same
    /// kind replaces an earlier one.
    pub fn for_document(doc: &Document) -> Self {
        let mut set = Self::default();

        if doc.abstract_text.is_some() {
            set.insert(LinkKind::Abstract, false, None, None);
        }
        if let Some(count) = doc.citation_count.filter(|c| *c > 0) {
            set.insert(LinkKind::Citations, false, Some(count.to_string()), None);
        }
        if let Some(count) = doc.reference_count() {
            set.insert(LinkKind::References, false, Some(count.to_string()), None);
        }

        for link in doc.links() {
            let Some(kind) = link.kind.as_deref().and_then(LinkKind::from_source_type) else {
                continue;
            };
            let open = link.is_open_access();
            set.insert(kind, open, link.instances, link.url);
        }

        if doc.has_esource("ADS_PDF") {
            set.insert(LinkKind::Article, true, None, None);
        }
        if doc.has_esource("ADS_SCAN") {
            set.insert(LinkKind::Gif, true, None, None);
        }
        set
    }

    fn insert(
        &mut self,
        kind: LinkKind,
        open_access: bool,
        count: Option<String>,
        url: Option<String>,
    ) {
        let count = count.filter(|_| kind.shows_count());
        self.entries[kind as usize] = Some(LinkEntry {
            kind,
            open_access,
            count,
            url,
        });
    }

    pub fn get(&self, kind: LinkKind) -> Option<&LinkEntry> {
        self.entries[kind as usize].as_ref()
    }

    /// Present entries in display order
    pub fn iter(&self) -> impl Iterator<Item = &LinkEntry> {
        self.entries.iter().flatten()
    }
}

/// arXiv identifier from an abstract-page URL; the whole URL when it has no
/// `arxiv.org/abs/` part.
pub fn arxiv_id(url: &str) -> &str {
    const MARKER: &str = "arxiv.org/abs/";
    match url.find(MARKER) {
        Some(pos) => &url[pos + MARKER.len()..],
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_links(links: &[&str]) -> Document {
        let mut doc = Document::new("2000A&A...000....0X");
        doc.links_data = Some(links.iter().map(|l| l.to_string()).collect());
        doc
    }

    #[test]
    fn test_source_type_table() {
        assert_eq!(LinkKind::from_source_type("electr"), Some(LinkKind::Ejournal));
        assert_eq!(LinkKind::from_source_type("pdf"), Some(LinkKind::Article));
        assert_eq!(LinkKind::from_source_type("postscript"), Some(LinkKind::Article));
        assert_eq!(LinkKind::from_source_type("spires"), Some(LinkKind::Spires));
        assert_eq!(LinkKind::from_source_type("abstract"), None);
    }

    #[test]
    fn test_summary_slots_spell_letters() {
        let layout: String = SUMMARY_SLOTS
            .iter()
            .map(|slot| slot.map(|k| k.letter()).unwrap_or(' '))
            .collect();
        assert_eq!(layout, "A EFGX D RC SNH");
    }

    #[test]
    fn test_link_type_round_trip() {
        for kind in LinkKind::ALL {
            assert_eq!(LinkKind::from_link_type(kind.link_type()), Some(kind));
        }
        assert_eq!(LinkKind::from_link_type("BOGUS"), None);
    }

    #[test]
    fn test_data_link_open_with_count() {
        let doc = doc_with_links(&[r#"{"type": "data", "access": "open", "instances": 3}"#]);
        let links = LinkSet::for_document(&doc);
        let data = links.get(LinkKind::Data).unwrap();
        assert!(data.open_access);
        assert_eq!(data.count.as_deref(), Some("3"));
    }

    #[test]
    fn test_count_dropped_for_uncounted_kinds() {
        let doc = doc_with_links(&[r#"{"type": "electr", "instances": "2"}"#]);
        let links = LinkSet::for_document(&doc);
        assert_eq!(links.get(LinkKind::Ejournal).unwrap().count, None);
    }

    #[test]
    fn test_esources_force_open_access() {
        let mut doc = doc_with_links(&[r#"{"type": "pdf", "access": "restricted"}"#]);
        doc.esources = Some(vec!["ADS_PDF".to_string(), "ADS_SCAN".to_string()]);
        let links = LinkSet::for_document(&doc);
        assert!(links.get(LinkKind::Article).unwrap().open_access);
        assert!(links.get(LinkKind::Gif).unwrap().open_access);
    }

    #[test]
    fn test_references_and_citations() {
        let mut doc = Document::new("X");
        doc.reference = Some(vec![]);
        doc.citation_count = Some(0);
        let links = LinkSet::for_document(&doc);
        assert_eq!(links.get(LinkKind::References).unwrap().count.as_deref(), Some("0"));
        assert!(links.get(LinkKind::Citations).is_none());
    }

    #[test]
    fn test_empty_document_has_no_links() {
        assert_eq!(LinkSet::for_document(&Document::new("X")).iter().count(), 0);
    }

    #[test]
    fn test_data_query_href() {
        assert_eq!(
            LinkKind::Citations.data_query_href("B"),
            "/cgi-bin/nph-data_query?bibcode=B&link_type=CITATIONS"
        );
        assert_eq!(
            LinkKind::Abstract.data_query_href("2000A&A...355L..27H"),
            "/cgi-bin/nph-data_query?bibcode=2000A%26A...355L..27H&link_type=ABSTRACT"
        );
        assert_eq!(
            LinkKind::Gif.data_query_href("B"),
            "http://adsabs.harvard.edu/cgi-bin/nph-data_query?bibcode=B&link_type=GIF"
        );
    }

    #[test]
    fn test_arxiv_id() {
        assert_eq!(arxiv_id("https://arxiv.org/abs/1234.5678"), "1234.5678");
        assert_eq!(arxiv_id("http://arxiv.org/abs/astro-ph/0101001"), "astro-ph/0101001");
        assert_eq!(arxiv_id("https://example.org/x"), "https://example.org/x");
    }
}
