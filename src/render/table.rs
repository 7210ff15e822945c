//! Result table: count banner, header and one summary per record.

use crate::models::{ResultSet, SortMode};
use crate::render::render_summary;

const HELP_PAGES: &str = "http://adsabs.harvard.edu/abs_doc/help_pages/results.html";

/// Render a page of results as a banner plus a summary table.
///
/// Rows are numbered from `start_offset + 1`.
pub fn render_table(result: &ResultSet, start_offset: usize, sort: Option<SortMode>) -> String {
    let mut html = String::new();

    if result.is_partial() {
        html.push_str(&format!(
            "<p>Selected and retrieved <b>{}</b> documents, starting with number <b>{}</b>. Total number selected: <b>{}</b></p>",
            result.docs.len(),
            result.start + 1,
            result.num_found
        ));
    } else {
        html.push_str(&format!(
            "<p>Selected and retrieved <b>{}</b> documents.</p>",
            result.num_found
        ));
    }

    html.push_str(&format!(
        "\n<hr>\n<table>\n\
         <tr><th>#</th> <th width=\"25%\">Bibcode</th> <th width=\"6%\">{metric}</th> <th width=\"9%\">Date</th> <th><a href=\"{help}#available_items\">List of Links</a></th></tr>\n\
         <tr><th></th> <th>Authors</th> <th colspan=2>Title</th> <th><a href=\"{help}#access_links\">Access Control Help</a></tr>\n\
         <tr><td colspan=5><hr></td></tr>\n",
        metric = metric_label(sort),
        help = HELP_PAGES,
    ));

    for (i, doc) in result.docs.iter().enumerate() {
        html.push_str(&render_summary(i + start_offset, doc, sort));
    }

    html.push_str("</table>\n");
    html
}

fn metric_label(sort: Option<SortMode>) -> &'static str {
    match sort {
        Some(SortMode::Citations) => "Cites",
        Some(SortMode::AuthorCount) => "Nr.Auth.",
        _ => "Score",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Document;

    fn docs(count: usize) -> Vec<Document> {
        (0..count)
            .map(|i| Document::new(format!("2020ApJ...{:03}....1X", i)))
            .collect()
    }

    #[test]
    fn test_partial_banner() {
        let result = ResultSet::new(500, 20, docs(20));
        let html = render_table(&result, 20, None);
        assert!(html.starts_with(
            "<p>Selected and retrieved <b>20</b> documents, starting with number <b>21</b>. Total number selected: <b>500</b></p>"
        ));
    }

    #[test]
    fn test_complete_banner() {
        let result = ResultSet::new(3, 0, docs(3));
        let html = render_table(&result, 0, None);
        assert!(html.starts_with("<p>Selected and retrieved <b>3</b> documents.</p>"));
    }

    #[test]
    fn test_metric_header() {
        let result = ResultSet::new(0, 0, Vec::new());
        assert!(render_table(&result, 0, Some(SortMode::Citations)).contains(">Cites</th>"));
        assert!(render_table(&result, 0, Some(SortMode::AuthorCount)).contains(">Nr.Auth.</th>"));
        assert!(render_table(&result, 0, Some(SortMode::Score)).contains(">Score</th>"));
        assert!(render_table(&result, 0, None).contains(">Score</th>"));
    }

    #[test]
    fn test_rows_numbered_from_offset() {
        let result = ResultSet::new(50, 20, docs(2));
        let html = render_table(&result, 20, None);
        assert!(html.contains("<tr><td>21</td>"));
        assert!(html.contains("<tr><td>22</td>"));
        assert!(!html.contains("<tr><td>1</td>"));
        assert!(html.ends_with("</table>\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let result = ResultSet::new(10, 0, docs(4));
        assert_eq!(
            render_table(&result, 0, Some(SortMode::Citations)),
            render_table(&result, 0, Some(SortMode::Citations))
        );
    }
}
