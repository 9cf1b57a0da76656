use super::{ExtractError, TextExtractor};
use scraper::Html;

/// Elements whose text content never renders
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// HTML extractor built on the html5ever parser (via `scraper`)
///
/// Tags are stripped, entities decoded, and text nodes joined without any
/// separator, so whitespace between blocks comes only from the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExtractor;

impl TextExtractor for HtmlExtractor {
    fn extract(&self, content: &str) -> Result<String, ExtractError> {
        let document = Html::parse_document(content);

        let has_elements = document
            .tree
            .root()
            .children()
            .any(|child| child.value().is_element());
        if !has_elements {
            return Err(ExtractError::Parse(
                "parser produced no element tree".to_string(),
            ));
        }

        let mut text = String::with_capacity(content.len() / 2);
        for node in document.tree.root().descendants() {
            let Some(fragment) = node.value().as_text() else {
                continue;
            };

            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
            });

            if !hidden {
                text.push_str(fragment);
            }
        }

        Ok(text)
    }
}
