//! Page header and footer.

use std::time::Duration;

use crate::context::RunContext;
use crate::models::ResultSet;

/// CGI header block that opens every page
pub const CGI_CONTENT_TYPE: &str = "Content-type: text/html; charset=UTF-8\r\n\r\n";

/// Embedded stylesheet: link states, open-access links, hidden link slots
pub const STYLE: &str = r#"<style type="text/css">
a:link {color: #0000ff}
a.oa:link {color: #00a000}
a:visited {color: #4000a0}
a.oa:visited {color: #006666}
a:hover {color: #ff0000}
a.oa:hover {color: #cc33cc}
td {vertical-align: top}
th {text-align: left}
span.h {visibility: hidden}
p.q {color: #a0a0a0}
</style>
"#;

/// Start of a page, CGI header included.
pub fn render_header(title: &str, heading: &str) -> String {
    format!(
        "{cgi}<html>\n<head>\n<title>{title}</title>\n\
         <link rel=\"icon\" href=\"http://adsabs.harvard.edu/favicon.ico\">\n\
         {style}</head>\n<body>\n\
         <h3><a href=\"http://adsabs.harvard.edu/\">SAO/NASA Astrophysics Data System (ADS)</a>&nbsp;\n\
         <a href=\"/abstract_service.html\">(neo)Classical Astronomy Abstract Service</a></h3>\n\
         <h3>{heading}</h3>\n",
        cgi = CGI_CONTENT_TYPE,
        title = title,
        style = STYLE,
        heading = heading,
    )
}

/// Wraps rendered content into complete pages for one run.
#[derive(Debug, Clone, Copy)]
pub struct PageAssembler {
    context: RunContext,
}

impl PageAssembler {
    pub fn new(context: RunContext) -> Self {
        Self { context }
    }

    pub fn render_header(&self, title: &str, heading: &str) -> String {
        render_header(title, heading)
    }

    /// End of a page with execution time since the run started, the
    /// server-side query time and the remaining quota.
    pub fn render_footer(&self, result: &ResultSet, footer: &str) -> String {
        Self::footer_with_elapsed(result, footer, self.context.elapsed())
    }

    /// Footer for a fixed elapsed time
    pub fn footer_with_elapsed(result: &ResultSet, footer: &str, elapsed: Duration) -> String {
        let quota = &result.quota;
        let remaining = quota.remaining.as_deref().unwrap_or("?");
        let window = match quota.reset_in {
            Some(reset) => {
                let secs = reset.as_secs();
                format!("{}h:{:02}m", secs / 3600, (secs % 3600) / 60)
            }
            None => "?h:??m".to_string(),
        };
        format!(
            "{}\n<p class=\"q\">execution time: {:.3} s, query time: {:.3} s, remaining quota: {} requests in the next {}</p>\n</body>\n</html>\n",
            footer,
            elapsed.as_secs_f64(),
            quota.query_time.as_secs_f64(),
            remaining,
            window
        )
    }

    /// Complete page reporting a failed query
    pub fn render_error(&self, message: &str) -> String {
        format!(
            "{}<p><b>Error:</b> {}</p>\n</body>\n</html>\n",
            render_header("ADS query error", "Query failed"),
            escape_html(message)
        )
    }
}

/// Escape text for inclusion in markup
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
