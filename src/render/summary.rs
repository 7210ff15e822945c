//! Summary rows for the result table.

use crate::models::{Document, SortMode};
use crate::render::{format_pubdate, title_text, LinkKind, LinkSet, SUMMARY_SLOTS};

/// Authors listed before the remainder is collapsed into a count
pub const MAX_SUMMARY_AUTHORS: usize = 10;

/// Render one record as two table rows plus a separator row.
///
/// `index` is the zero-based position in the overall result list; the row is
/// numbered `index + 1`. The metric column follows `sort` so that it shows
/// the value the results are ordered by.
pub fn render_summary(index: usize, doc: &Document, sort: Option<SortMode>) -> String {
    let bibcode = &doc.bibcode;
    format!(
        "<tr><td>{}</td> <td><input type=\"checkbox\" name=\"bibcode\" value=\"{}\" disabled>&nbsp;<a href=\"/abs/{}\">{}</a></td> <td>{}</td> <td>{}</td> <td>{}</td></tr>\n\
         <tr><td></td> <td>{}</td> <td colspan=3>{}</td></tr>\n\
         <tr><td colspan=6><hr></td></tr>",
        index + 1,
        bibcode,
        bibcode,
        bibcode,
        metric_cell(doc, sort),
        format_pubdate(doc.pubdate.as_deref()),
        link_cell(doc),
        author_cell(doc),
        title_text(doc),
    )
}

fn author_cell(doc: &Document) -> String {
    let Some(authors) = &doc.author else {
        return "Anonymous".to_string();
    };
    let shown = authors.len().min(MAX_SUMMARY_AUTHORS);
    let mut cell = authors[..shown].join("; ");
    if authors.len() > MAX_SUMMARY_AUTHORS {
        cell.push_str(&format!(
            "; <font color=\"red\">and {} coauthors</font>",
            authors.len() - MAX_SUMMARY_AUTHORS
        ));
    }
    cell
}

fn metric_cell(doc: &Document, sort: Option<SortMode>) -> String {
    match sort {
        Some(SortMode::Citations) => doc.citation_count.unwrap_or(0).to_string(),
        Some(SortMode::AuthorCount) => doc.author_count().unwrap_or(0).to_string(),
        Some(SortMode::Score) => format!("{:.3}", doc.score.unwrap_or(0.0)),
        _ => "0.000".to_string(),
    }
}

fn link_cell(doc: &Document) -> String {
    let links = LinkSet::for_document(doc);
    SUMMARY_SLOTS
        .iter()
        .map(|slot| match slot.and_then(|kind| links.get(kind)) {
            Some(entry) => link_anchor(&doc.bibcode, entry.kind, entry.open_access, entry.count.as_deref()),
            None => {
                let letter = slot.map(|kind| kind.letter()).unwrap_or(' ');
                format!("<span class=\"h\">{}</span>&nbsp;&nbsp;", letter)
            }
        })
        .collect()
}

fn link_anchor(bibcode: &str, kind: LinkKind, open_access: bool, count: Option<&str>) -> String {
    let class = if open_access { " class=\"oa\"" } else { "" };
    let title = count
        .map(|c| format!(" title=\"{}\"", c))
        .unwrap_or_default();
    format!(
        "<a href=\"{}\"{}{}>{}</a>&nbsp;&nbsp;",
        kind.data_query_href(bibcode),
        class,
        title,
        kind.letter()
    )
}
