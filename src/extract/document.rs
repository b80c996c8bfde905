// src/extract/document.rs

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{ExtractError, Result};

/// Tags whose text counts as a table cell.
const CELL_TAGS: &[&str] = &["td", "th"];

/// A parsed HTML payload. Parsing is lenient: unclosed or misnested markup is
/// repaired by the tree builder instead of failing.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(payload: &str) -> Self {
        let html = Html::parse_document(payload);
        if !html.errors.is_empty() {
            debug!(
                recovered = html.errors.len(),
                "tolerated malformed markup while parsing"
            );
        }
        Self { html }
    }

    /// Every `table` element in document order, nested ones included as
    /// independent entries.
    pub fn tables(&self) -> Result<Vec<Node<'_>>> {
        Node::Element(self.html.root_element()).find_all("table")
    }
}

/// Typed view over a node of the parsed tree.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Element(ElementRef<'a>),
    Text(&'a str),
    /// Comments, doctypes and processing instructions.
    Other,
}

impl<'a> Node<'a> {
    /// All descendant elements named `tag`, in document order.
    pub fn find_all(&self, tag: &str) -> Result<Vec<Node<'a>>> {
        let Node::Element(element) = self else {
            return Ok(Vec::new());
        };
        let selector = tag_selector(tag)?;
        Ok(element
            .select(&selector)
            .filter(|found| found != element)
            .map(Node::Element)
            .collect())
    }

    /// First descendant element named `tag`.
    pub fn find(&self, tag: &str) -> Result<Option<Node<'a>>> {
        Ok(self.find_all(tag)?.into_iter().next())
    }

    /// Direct children, including whitespace text and comments.
    pub fn children(&self) -> Vec<Node<'a>> {
        let Node::Element(element) = self else {
            return Vec::new();
        };
        element
            .children()
            .map(|child| match child.value() {
                scraper::Node::Element(_) => ElementRef::wrap(child)
                    .map(Node::Element)
                    .unwrap_or(Node::Other),
                scraper::Node::Text(text) => Node::Text(text),
                _ => Node::Other,
            })
            .collect()
    }

    /// Plain text of a `td`/`th` cell: markup stripped, entities decoded,
    /// surrounding whitespace trimmed. Anything that is not a cell fails.
    pub fn get_text(&self) -> Result<String> {
        match self {
            Node::Element(element) if CELL_TAGS.contains(&element.value().name()) => {
                Ok(element.text().collect::<String>().trim().to_string())
            }
            Node::Element(element) => Err(ExtractError::Extraction(format!(
                "<{}> element",
                element.value().name()
            ))),
            Node::Text(_) => Err(ExtractError::Extraction("bare text".into())),
            Node::Other => Err(ExtractError::Extraction("non-element node".into())),
        }
    }
}

/// Selector for a plain element name; anything with CSS syntax is refused.
fn tag_selector(tag: &str) -> Result<Selector> {
    let is_name = tag.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !is_name {
        return Err(ExtractError::Parse(format!("not an element name: {:?}", tag)));
    }
    Selector::parse(tag).map_err(|e| ExtractError::Parse(format!("tag {:?}: {:?}", tag, e)))
}

/// Cell texts of one row, skipping any child whose text cannot be extracted.
pub(crate) fn row_cells(row: &Node<'_>) -> Vec<String> {
    row.children()
        .iter()
        .filter_map(|cell| match cell.get_text() {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::trace!(error = %e, "skipping cell");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_in_document_order_including_nested() {
        let doc = Document::parse(
            r#"<table id="a"><tr><td>1<table id="b"><tr><td>x</td></tr></table></td></tr></table>
               <table id="c"><tr><td>2</td></tr></table>"#,
        );
        let ids: Vec<_> = doc
            .tables()
            .unwrap()
            .iter()
            .map(|t| match t {
                Node::Element(e) => e.value().attr("id").unwrap().to_string(),
                _ => panic!("table is not an element"),
            })
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unclosed_markup_is_tolerated() {
        let doc = Document::parse("<table><tr><td>1<td>2<tr><td>3");
        let tables = doc.tables().unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].find_all("tr").unwrap().len(), 2);
    }

    #[test]
    fn test_get_text_strips_markup_and_entities() {
        let doc = Document::parse("<table><tr><td> <b>5</b> &amp; <i>6</i> </td></tr></table>");
        let td = doc.tables().unwrap()[0].find("td").unwrap().unwrap();
        assert_eq!(td.get_text().unwrap(), "5 & 6");
    }

    #[test]
    fn test_get_text_fails_on_non_cells() {
        let doc = Document::parse("<table><tr> <td>1</td><!-- c --></tr></table>");
        let tr = doc.tables().unwrap()[0].find("tr").unwrap().unwrap();
        let results: Vec<_> = tr.children().iter().map(|c| c.get_text().is_ok()).collect();
        assert_eq!(results, vec![false, true, false]);
        assert!(matches!(tr.get_text(), Err(ExtractError::Extraction(_))));
    }

    #[test]
    fn test_bad_tag_is_parse_error() {
        let doc = Document::parse("<table></table>");
        let table = doc.tables().unwrap()[0];
        for bad in ["", "1tr", "tr,", "t r", "t[r", "td > b"] {
            assert!(
                matches!(table.find_all(bad), Err(ExtractError::Parse(_))),
                "{:?} should be refused",
                bad
            );
        }
        assert!(table.find_all("tr").unwrap().is_empty());
    }

    #[test]
    fn test_row_cells_skips_whitespace_and_keeps_empty_cells() {
        let doc = Document::parse("<table><tr>\n  <th>A</th>\n  <th></th>\n</tr></table>");
        let tr = doc.tables().unwrap()[0].find("tr").unwrap().unwrap();
        assert_eq!(row_cells(&tr), vec!["A".to_string(), String::new()]);
    }
}
