//! HTML renderers.
//!
//! Every renderer is a pure function of its inputs and returns a markup
//! string. Record fields are inserted as the API returns them: titles and
//! abstracts already carry markup such as `<SUB>` and are not escaped.
//!
//! - [`render_summary`]: two-row summary of one record
//! - [`render_abstract`]: full record with links, metadata and abstract
//! - [`render_table`]: result banner and summary table for a page of results
//! - [`PageAssembler`]: page header and footer

mod links;
mod page;
mod record;
mod summary;
mod table;

pub use links::{arxiv_id, LinkEntry, LinkKind, LinkSet, SOURCE_TYPES, SUMMARY_SLOTS};
pub use page::{escape_html, render_header, PageAssembler, CGI_CONTENT_TYPE, STYLE};
pub use record::render_abstract;
pub use summary::{render_summary, MAX_SUMMARY_AUTHORS};
pub use table::render_table;

use crate::models::Document;

/// Root of the ADS classic site
pub const ADS_SITE: &str = "http://adsabs.harvard.edu";

/// Remote data-query script
pub const ADS_DATA_QUERY: &str = "http://adsabs.harvard.edu/cgi-bin/nph-data_query";

/// Local data-query script
pub const LOCAL_DATA_QUERY: &str = "/cgi-bin/nph-data_query";

/// Local query script
pub const LOCAL_ABS_CONNECT: &str = "/cgi-bin/nph-abs_connect";

/// `MM/YYYY` from a `YYYY-MM-DD` publication date, `????/??` when absent.
pub fn format_pubdate(pubdate: Option<&str>) -> String {
    let Some(date) = pubdate else {
        return "????/??".to_string();
    };
    match (date.get(5..7), date.get(0..4)) {
        (Some(month), Some(year)) => format!("{}/{}", month, year),
        _ => "????/??".to_string(),
    }
}

/// Joined title, `Untitled` when absent
pub fn title_text(doc: &Document) -> String {
    match &doc.title {
        Some(parts) => parts.concat(),
        None => "Untitled".to_string(),
    }
}
