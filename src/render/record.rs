//! Full record view: available materials, metadata table and abstract.

use url::form_urlencoded;

use crate::models::Document;
use crate::render::{
    arxiv_id, format_pubdate, title_text, LinkEntry, LinkKind, LinkSet, ADS_SITE,
    LOCAL_ABS_CONNECT,
};

/// Render the full view of one record.
pub fn render_abstract(doc: &Document) -> String {
    let bibcode = &doc.bibcode;
    let mut html = String::from("<hr><dl>\n");

    let links = LinkSet::for_document(doc);
    for entry in links.iter().filter(|e| e.kind != LinkKind::Abstract) {
        html.push_str(&material_entry(bibcode, entry));
    }

    html.push_str("</dl><table>\n");
    html.push_str(&meta_row("Title", &title_text(doc)));
    html.push_str(&meta_row("Authors", &author_links(doc)));
    if let Some(affiliations) = affiliation_text(doc) {
        html.push_str(&meta_row("Affiliation", &affiliations));
    }
    if let Some(publication) = &doc.pub_raw {
        html.push_str(&meta_row("Publication", publication));
    }
    html.push_str(&meta_row("Date", &format_pubdate(doc.pubdate.as_deref())));
    if let Some(keywords) = &doc.keyword {
        html.push_str(&meta_row("Keywords", &keywords.join("; ")));
    }
    if let Some(dois) = &doc.doi {
        let text = dois
            .iter()
            .map(|d| format!("<a href=\"https://dx.doi.org/{}\">{}</a>", d, d))
            .collect::<Vec<_>>()
            .join("; ");
        html.push_str(&meta_row("DOI", &text));
    }
    html.push_str(&meta_row(
        "ADS",
        &format!(
            "<a href=\"{site}/abs/{b}\">{b}</a>&nbsp; [<a href=\"{site}/cgi-bin/nph-bib_query?bibcode={b}&data_type=BIBTEX\">Bibtex entry</a>]",
            site = ADS_SITE,
            b = bibcode
        ),
    ));
    html.push_str("</table>\n");

    match &doc.abstract_text {
        Some(text) => {
            html.push_str("<h3 align=\"center\">Abstract</h3>\n");
            html.push_str(text);
        }
        None => html.push_str("Abstract not available"),
    }
    html.push_str("<br>\n");
    html
}

fn material_entry(bibcode: &str, entry: &LinkEntry) -> String {
    if entry.kind == LinkKind::Preprint {
        if let Some(url) = &entry.url {
            return format!(
                "<dt><b><a href=\"{}\" class=\"oa\">{}</a></b> ({})<br>",
                url,
                LinkKind::Preprint.label(),
                arxiv_id(url)
            );
        }
    }
    let class = if entry.open_access { " class=\"oa\"" } else { "" };
    let count = entry
        .count
        .as_ref()
        .map(|c| format!(" ({})", c))
        .unwrap_or_default();
    format!(
        "<dt><b><a href=\"{}\"{}>{}{}</a></b><br>",
        entry.kind.data_query_href(bibcode),
        class,
        entry.kind.label(),
        count
    )
}

fn meta_row(label: &str, value: &str) -> String {
    format!(
        "<tr><td><b>{}:</b></td><td>&nbsp;</td><td>{}</td></tr>\n",
        label, value
    )
}

fn author_links(doc: &Document) -> String {
    let Some(authors) = &doc.author else {
        return "Anonymous".to_string();
    };
    authors
        .iter()
        .map(|name| {
            let query: String = form_urlencoded::Serializer::new(String::new())
                .append_pair("author", name)
                .finish();
            format!("<a href=\"{}?{}\">{}</a>", LOCAL_ABS_CONNECT, query, name)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Affiliation cell, or `None` when there is nothing to show.
///
/// Affiliations are paired with author names only when both lists have the
/// same length. `-` marks an unknown affiliation and is skipped.
fn affiliation_text(doc: &Document) -> Option<String> {
    let affiliations = doc.aff.as_ref()?;
    let authors = doc.author.as_deref().unwrap_or_default();
    let paired = affiliations.len() == authors.len();

    let entries: Vec<String> = affiliations
        .iter()
        .enumerate()
        .filter(|(_, aff)| aff.as_str() != "-")
        .map(|(i, aff)| {
            if paired {
                format!("<u>{}</u>: {}", authors[i], aff)
            } else {
                aff.clone()
            }
        })
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(entries.join("<br>"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hubble() -> Document {
        let mut doc = Document::new("1929PNAS...15..168H");
        doc.author = Some(vec!["Hubble, Edwin".to_string()]);
        doc.title = Some(vec![
            "A Relation between Distance and Radial Velocity among Extra-Galactic Nebulae"
                .to_string(),
        ]);
        doc.pubdate = Some("1929-03-00".to_string());
        doc
    }

    #[test]
    fn test_minimal_record() {
        let html = render_abstract(&Document::new("B"));
        assert!(html.starts_with("<hr><dl>\n</dl><table>\n"));
        assert!(html.contains("<tr><td><b>Title:</b></td><td>&nbsp;</td><td>Untitled</td></tr>"));
        assert!(html.contains("<td>Anonymous</td>"));
        assert!(html.contains("<td>????/??</td>"));
        assert!(html.contains("Bibtex entry"));
        assert!(html.ends_with("</table>\nAbstract not available<br>\n"));
        assert!(!html.contains("Affiliation"));
        assert!(!html.contains("Keywords"));
        assert!(!html.contains("DOI"));
        assert!(!html.contains("Publication"));
    }

    #[test]
    fn test_author_links_are_form_encoded() {
        let html = render_abstract(&hubble());
        assert!(html.contains(
            "<a href=\"/cgi-bin/nph-abs_connect?author=Hubble%2C+Edwin\">Hubble, Edwin</a>"
        ));
    }

    #[test]
    fn test_abstract_body() {
        let mut doc = hubble();
        doc.abstract_text = Some("Determinations of the motion of the sun.".to_string());
        let html = render_abstract(&doc);
        assert!(html.contains(
            "<h3 align=\"center\">Abstract</h3>\nDeterminations of the motion of the sun.<br>\n"
        ));
        assert!(!html.contains("ABSTRACT"));
    }

    #[test]
    fn test_affiliations_paired() {
        let mut doc = hubble();
        doc.author = Some(vec!["Hubble, E.".to_string(), "Humason, M.".to_string()]);
        doc.aff = Some(vec!["Mount Wilson Observatory".to_string(), "-".to_string()]);
        let html = render_abstract(&doc);
        assert!(html.contains("<td><u>Hubble, E.</u>: Mount Wilson Observatory</td>"));
        assert!(!html.contains("Humason, M.</u>"));
    }

    #[test]
    fn test_affiliations_unpaired() {
        let mut doc = hubble();
        doc.aff = Some(vec!["Caltech".to_string(), "Carnegie".to_string()]);
        let html = render_abstract(&doc);
        assert!(html.contains("<td>Caltech<br>Carnegie</td>"));
    }

    #[test]
    fn test_affiliation_row_omitted_when_all_placeholders() {
        let mut doc = hubble();
        doc.aff = Some(vec!["-".to_string()]);
        assert!(!render_abstract(&doc).contains("Affiliation"));
    }

    #[test]
    fn test_extended_rows() {
        let mut doc = hubble();
        doc.pub_raw = Some("Proceedings of the National Academy of Sciences".to_string());
        doc.keyword = Some(vec!["cosmology".to_string(), "galaxies".to_string()]);
        doc.doi = Some(vec!["10.1073/pnas.15.3.168".to_string()]);
        let html = render_abstract(&doc);
        assert!(html.contains("<td>Proceedings of the National Academy of Sciences</td>"));
        assert!(html.contains("<td>cosmology; galaxies</td>"));
        assert!(html.contains(
            "<a href=\"https://dx.doi.org/10.1073/pnas.15.3.168\">10.1073/pnas.15.3.168</a>"
        ));
    }

    #[test]
    fn test_material_list() {
        let mut doc = hubble();
        doc.links_data = Some(vec![
            r#"{"type": "preprint", "access": "open", "url": "https://arxiv.org/abs/astro-ph/0001001"}"#.to_string(),
            r#"{"type": "simbad", "instances": "12"}"#.to_string(),
            r#"{"type": "electr", "access": "open"}"#.to_string(),
        ]);
        doc.reference = Some(vec!["A".to_string(), "B".to_string()]);
        doc.citation_count = Some(2700);
        let html = render_abstract(&doc);

        let ejournal = html.find("Electronic on-line article (HTML)").unwrap();
        let preprint = html.find("arXiv e-print").unwrap();
        let references = html.find("References in the article (2)").unwrap();
        let citations = html.find("Citations to the article (2700)").unwrap();
        let simbad = html.find("SIMBAD objects (12)").unwrap();
        assert!(ejournal < preprint && preprint < references);
        assert!(references < citations && citations < simbad);

        assert!(html.contains(
            "<dt><b><a href=\"https://arxiv.org/abs/astro-ph/0001001\" class=\"oa\">arXiv e-print</a></b> (astro-ph/0001001)<br>"
        ));
        assert!(html.contains(
            "<dt><b><a href=\"/cgi-bin/nph-data_query?bibcode=1929PNAS...15..168H&link_type=REFERENCES\">References in the article (2)</a></b><br>"
        ));
    }

    #[test]
    fn test_scan_esource() {
        let mut doc = hubble();
        doc.esources = Some(vec!["ADS_SCAN".to_string()]);
        let html = render_abstract(&doc);
        assert!(html.contains("link_type=GIF\" class=\"oa\">Scanned article (GIF)</a>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut doc = hubble();
        doc.aff = Some(vec!["Mount Wilson Observatory".to_string()]);
        assert_eq!(render_abstract(&doc), render_abstract(&doc));
    }
}
