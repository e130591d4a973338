//! Streaming reader over the drug dataset
//!
//! The dataset is a single root element whose children are drug records.
//! The full DrugBank export runs to gigabytes, so the reader materializes
//! one record subtree at a time instead of the whole document.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use crate::{Error, Result};

/// Namespace carried by every tag in a DrugBank export
pub const DRUGBANK_NAMESPACE: &str = "http://www.drugbank.ca";

/// An element of a record subtree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name without prefix
    pub local_name: String,
    /// Whether the tag resolves to the vendor namespace
    pub in_namespace: bool,
    /// Character data preceding the first child element
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// True if this element has no child elements
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
    BeforeRoot,
    InRoot,
    AfterRoot,
    Done,
}

/// Owned form of one parser event
enum Token {
    Open(Element),
    Leaf(Element),
    Close,
    Text(String),
    Eof,
    Skip,
}

/// Yields each direct child of the document root as an [`Element`] tree
pub struct DocumentReader<R: BufRead> {
    reader: NsReader<R>,
    namespace: Vec<u8>,
    buf: Vec<u8>,
    state: ReaderState,
}

impl DocumentReader<BufReader<File>> {
    /// Open a document on disk
    pub fn from_path(path: &Path, namespace: &str) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), namespace))
    }
}

impl<'a> DocumentReader<&'a [u8]> {
    /// Read a document held in memory
    pub fn from_xml(xml: &'a str, namespace: &str) -> Self {
        Self::new(xml.as_bytes(), namespace)
    }
}

impl<R: BufRead> DocumentReader<R> {
    pub fn new(reader: R, namespace: &str) -> Self {
        Self {
            reader: NsReader::from_reader(reader),
            namespace: namespace.as_bytes().to_vec(),
            buf: Vec::new(),
            state: ReaderState::BeforeRoot,
        }
    }

    /// Next record under the root, or `None` once the root is closed
    pub fn next_record(&mut self) -> Result<Option<Element>> {
        loop {
            match self.state {
                ReaderState::Done => return Ok(None),
                ReaderState::BeforeRoot => match self.next_token()? {
                    Token::Open(root) => {
                        tracing::debug!("Entered root element <{}>", root.local_name);
                        self.state = ReaderState::InRoot;
                    }
                    Token::Leaf(_) => self.state = ReaderState::AfterRoot,
                    Token::Eof => {
                        return Err(Error::Parse("document has no root element".to_string()));
                    }
                    Token::Close => {
                        return Err(Error::Parse("closing tag before root element".to_string()));
                    }
                    Token::Text(text) => reject_stray_text(&text, "before")?,
                    Token::Skip => {}
                },
                ReaderState::InRoot => match self.next_token()? {
                    Token::Open(mut record) => {
                        self.read_children(&mut record)?;
                        return Ok(Some(record));
                    }
                    Token::Leaf(record) => return Ok(Some(record)),
                    Token::Close => self.state = ReaderState::AfterRoot,
                    Token::Eof => {
                        return Err(Error::Parse("unexpected end of document inside root element".to_string()));
                    }
                    Token::Text(_) | Token::Skip => {}
                },
                // Only whitespace, comments and processing instructions may follow the root
                ReaderState::AfterRoot => match self.next_token()? {
                    Token::Eof => self.state = ReaderState::Done,
                    Token::Open(element) | Token::Leaf(element) => {
                        return Err(Error::Parse(format!(
                            "element <{}> after root element",
                            element.local_name
                        )));
                    }
                    Token::Close => {
                        return Err(Error::Parse("closing tag after root element".to_string()));
                    }
                    Token::Text(text) => reject_stray_text(&text, "after")?,
                    Token::Skip => {}
                },
            }
        }
    }

    fn read_children(&mut self, parent: &mut Element) -> Result<()> {
        loop {
            match self.next_token()? {
                Token::Open(mut child) => {
                    self.read_children(&mut child)?;
                    parent.children.push(child);
                }
                Token::Leaf(child) => parent.children.push(child),
                Token::Text(text) => {
                    if parent.children.is_empty() {
                        parent.text.push_str(&text);
                    }
                }
                Token::Close => return Ok(()),
                Token::Eof => {
                    return Err(Error::Parse(format!(
                        "unexpected end of document inside <{}>",
                        parent.local_name
                    )));
                }
                Token::Skip => {}
            }
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        let decoder = self.reader.decoder();
        self.buf.clear();
        let (resolved, event) = self.reader.read_resolved_event_into(&mut self.buf)?;
        let token = match event {
            Event::Start(start) => Token::Open(new_element(&self.namespace, &resolved, &start)),
            Event::Empty(start) => Token::Leaf(new_element(&self.namespace, &resolved, &start)),
            Event::End(_) => Token::Close,
            Event::Text(text) => Token::Text(text.unescape()?.into_owned()),
            Event::CData(data) => Token::Text(
                decoder
                    .decode(&data)
                    .map_err(quick_xml::Error::from)?
                    .into_owned(),
            ),
            Event::Eof => Token::Eof,
            _ => Token::Skip,
        };
        Ok(token)
    }
}

impl<R: BufRead> Iterator for DocumentReader<R> {
    type Item = Result<Element>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.state = ReaderState::Done;
                Some(Err(e))
            }
        }
    }
}

fn reject_stray_text(text: &str, position: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    Err(Error::Parse(format!("text {} root element", position)))
}

fn new_element(namespace: &[u8], resolved: &ResolveResult, start: &BytesStart) -> Element {
    let in_namespace = matches!(resolved, ResolveResult::Bound(Namespace(bound)) if *bound == namespace);
    Element {
        local_name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        in_namespace,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(xml: &str) -> Result<Vec<Element>> {
        DocumentReader::from_xml(xml, DRUGBANK_NAMESPACE).collect()
    }

    #[test]
    fn test_reads_each_root_child() {
        let xml = r#"<?xml version="1.0"?>
            <drugbank xmlns="http://www.drugbank.ca">
              <drug><name>Aspirin</name></drug>
              <drug><name>Warfarin</name></drug>
            </drugbank>"#;
        let drugs = records(xml).unwrap();
        assert_eq!(drugs.len(), 2);
        assert_eq!(drugs[0].local_name, "drug");
        assert!(drugs[0].in_namespace);
        assert_eq!(drugs[1].children[0].text, "Warfarin");
    }

    #[test]
    fn test_unescapes_text_and_cdata() {
        let xml = r#"<drugbank xmlns="http://www.drugbank.ca">
              <drug><name>A &amp; B</name><indication><![CDATA[<pain>]]></indication></drug>
            </drugbank>"#;
        let drugs = records(xml).unwrap();
        assert_eq!(drugs[0].children[0].text, "A & B");
        assert_eq!(drugs[0].children[1].text, "<pain>");
    }

    #[test]
    fn test_foreign_namespace_flagged() {
        let xml = r#"<drugbank xmlns="http://www.drugbank.ca" xmlns:x="urn:other">
              <drug><x:name>Other</x:name><name>Aspirin</name></drug>
            </drugbank>"#;
        let drugs = records(xml).unwrap();
        let children = &drugs[0].children;
        assert!(!children[0].in_namespace);
        assert!(children[1].in_namespace);
        assert_eq!(children[0].local_name, "name");
    }

    #[test]
    fn test_empty_elements_are_leaves() {
        let xml = r#"<drugbank xmlns="http://www.drugbank.ca"><drug><mechanism/></drug><drug/></drugbank>"#;
        let drugs = records(xml).unwrap();
        assert_eq!(drugs.len(), 2);
        assert!(drugs[0].children[0].is_leaf());
        assert_eq!(drugs[0].children[0].text, "");
        assert!(drugs[1].is_leaf());
    }

    #[test]
    fn test_empty_root_yields_nothing() {
        assert!(records(r#"<drugbank xmlns="http://www.drugbank.ca"/>"#).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_document_rejected() {
        let xml = r#"<drugbank xmlns="http://www.drugbank.ca"><drug><name>Aspirin</name>"#;
        assert!(records(xml).is_err());
    }

    #[test]
    fn test_text_before_root_rejected() {
        let xml = r#"garbage text<drugbank xmlns="http://www.drugbank.ca"><drug><name>Aspirin</name></drug></drugbank>"#;
        assert!(matches!(records(xml), Err(Error::Parse(_))));
    }

    #[test]
    fn test_content_after_root_rejected() {
        let unclosed = r#"<drugbank xmlns="http://www.drugbank.ca"><drug><name>Aspirin</name></drug></drugbank><drug><name>Unclosed"#;
        assert!(records(unclosed).is_err());

        let second_root = r#"<drugbank xmlns="http://www.drugbank.ca"/><drugbank xmlns="http://www.drugbank.ca"/>"#;
        assert!(records(second_root).is_err());

        let trailing_text = r#"<drugbank xmlns="http://www.drugbank.ca"></drugbank>tail"#;
        assert!(records(trailing_text).is_err());
    }

    #[test]
    fn test_comments_and_whitespace_around_root_allowed() {
        let xml = "<?xml version=\"1.0\"?>\n<!-- export -->\n<drugbank xmlns=\"http://www.drugbank.ca\"><drug/></drugbank>\n<!-- end -->\n";
        assert_eq!(records(xml).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_utf8_in_cdata_rejected() {
        let bytes: &[u8] = b"<drugbank xmlns=\"http://www.drugbank.ca\"><drug><name><![CDATA[\xff\xfe]]></name></drug></drugbank>";
        let result: Result<Vec<Element>> = DocumentReader::new(bytes, DRUGBANK_NAMESPACE).collect();
        assert!(result.is_err());
    }

    #[test]
    fn test_mismatched_tags_rejected() {
        let xml = r#"<drugbank xmlns="http://www.drugbank.ca"><drug><name>Aspirin</drug></drugbank>"#;
        assert!(records(xml).is_err());
    }

    #[test]
    fn test_missing_root_rejected() {
        assert!(matches!(records("   "), Err(Error::Parse(_))));
    }
}
