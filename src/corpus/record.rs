// Award record extraction from NSF-style XML files.
//
// An award file is a tree of nested elements; the two fields we care about
// (`AwardTitle` and `AbstractNarration`) can sit at any depth, so extraction
// searches the whole document rather than a fixed path. A well-formed file
// missing either field still yields a Record — the absent field resolves to
// a sentinel string, keeping extraction total over valid XML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Sentinel for a well-formed document without an `AwardTitle` element.
pub const NO_TITLE: &str = "No Title";
/// Sentinel for a well-formed document without an `AbstractNarration` element.
pub const NO_ABSTRACT: &str = "No Abstract";

/// Title and abstract extracted from one award file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Text of the first `AwardTitle` element, or "No Title"
    pub title: String,
    /// Text of the first `AbstractNarration` element, or "No Abstract"
    pub abstract_text: String,
}

/// Parse one award file and pull out its title and abstract.
///
/// Fails with [`Error::MalformedDocument`] when the file is not well-formed
/// XML. Missing fields are never an error; they map to the sentinels.
pub fn extract_record(path: &Path) -> Result<Record> {
    let raw = fs::read_to_string(path)?;

    let doc = roxmltree::Document::parse(&raw).map_err(|source| Error::MalformedDocument {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Record {
        title: first_descendant_text(&doc, "AwardTitle").unwrap_or_else(|| NO_TITLE.to_string()),
        abstract_text: first_descendant_text(&doc, "AbstractNarration")
            .unwrap_or_else(|| NO_ABSTRACT.to_string()),
    })
}

/// Text content of the first element with `tag` anywhere in the document.
fn first_descendant_text(doc: &roxmltree::Document, tag: &str) -> Option<String> {
    doc.descendants()
        .find(|node| node.has_tag_name(tag))
        .and_then(|node| node.text())
        .map(|text| text.to_string())
}
