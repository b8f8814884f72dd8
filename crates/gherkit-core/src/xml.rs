//! Small helpers shared by the XML-reading stages

use std::path::Path;

use crate::message::Error;

/// Read a whole file, mapping I/O failures to a pipeline diagnostic.
pub(crate) fn read_file(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a document, mapping syntax failures to a pipeline diagnostic.
pub(crate) fn parse_document<'a>(
    content: &'a str,
    path: &Path,
) -> Result<roxmltree::Document<'a>, Error> {
    roxmltree::Document::parse(content).map_err(|source| Error::MalformedXml {
        path: path.to_path_buf(),
        source,
    })
}

/// Concatenated text content of an element, nested elements included.
pub(crate) fn element_text(node: roxmltree::Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// First child element with the given local name.
pub(crate) fn child_element<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

/// First descendant element with the given local name.
pub(crate) fn descendant_element<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.descendants()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}
