//! HTML text extraction helpers (scraper)

use scraper::{ElementRef, Html, Node, Selector};

/// Tags whose subtree never contributes text
const SKIP_TAGS: [&str; 4] = ["script", "style", "noscript", "svg"];

/// Text of the element with the given `id`, trimmed.
///
/// Text nodes are joined in document order; `None` when no element has
/// that id.
pub fn element_text_by_id(html: &str, id: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!("[id=\"{}\"]", id.replace('"', "\\\""))).ok()?;
    let element = document.select(&selector).next()?;
    Some(collect_text(element).trim().to_string())
}

fn collect_text(element: ElementRef) -> String {
    let mut out = String::new();
    for child in element.descendants() {
        if let Node::Text(text) = child.value() {
            let inside_skipped = child
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|el| SKIP_TAGS.contains(&el.value().name()));
            if !inside_skipped {
                out.push_str(text);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_PAGE: &str = r#"
        <html><body>
          <form method="post">
            <p id="human-question">Question:<br />Rok odkrycia Ameryki?</p>
            <input name="username" />
          </form>
        </body></html>"#;

    #[test]
    fn test_element_text_by_id() {
        assert_eq!(
            element_text_by_id(LOGIN_PAGE, "human-question").as_deref(),
            Some("Question:Rok odkrycia Ameryki?")
        );
    }

    #[test]
    fn test_element_text_by_id_missing() {
        assert_eq!(element_text_by_id(LOGIN_PAGE, "nope"), None);
    }

    #[test]
    fn test_element_text_skips_scripts() {
        let html = r#"<div id="q">Year<script>var x = 1;</script>?</div>"#;
        assert_eq!(element_text_by_id(html, "q").as_deref(), Some("Year?"));
    }
}
