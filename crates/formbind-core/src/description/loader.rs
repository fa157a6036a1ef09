//! Description document parser with validation
//!
//! Parses YAML (JSON is accepted as well) and validates the schema version,
//! id uniqueness across views, groups and widgets, and non-blank names.

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use super::document::{DescriptionDocument, SCHEMA_VERSION};
use super::index::DescriptionIndex;
use crate::errors::{FormBindError, Result};
use crate::{log_op_end, log_op_error, log_op_start};

/// Parse and validate a description document
///
/// # Errors
///
/// - `DescriptionParse` if the text is not a well-formed document
/// - `UnsupportedSchemaVersion` if `schema_version` is not 1
/// - `InvalidDescription` for blank ids or widget names
/// - `DuplicateElementId` if two elements share an id
pub fn parse_document(content: &str) -> Result<DescriptionDocument> {
    let document: DescriptionDocument =
        serde_yaml::from_str(content).map_err(|e| FormBindError::DescriptionParse {
            reason: e.to_string(),
        })?;

    validate_document(&document)?;

    Ok(document)
}

/// Read, parse and index a description document
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, otherwise the errors of
/// [`parse_document`].
pub fn load_descriptions(path: &Path) -> Result<DescriptionIndex> {
    let start = Instant::now();
    log_op_start!("load_descriptions", path = %path.display());

    let result = std::fs::read_to_string(path)
        .map_err(FormBindError::from)
        .and_then(|content| parse_document(&content))
        .map(DescriptionIndex::new);

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(index) => {
            log_op_end!(
                "load_descriptions",
                duration_ms = duration_ms,
                widget_count = index.len()
            );
        }
        Err(err) => {
            log_op_error!("load_descriptions", err.clone(), duration_ms = duration_ms);
        }
    }
    result
}

fn validate_document(document: &DescriptionDocument) -> Result<()> {
    if document.schema_version != SCHEMA_VERSION {
        return Err(FormBindError::UnsupportedSchemaVersion {
            found: document.schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    let mut ids = HashSet::new();
    let mut claim = |id: &str, what: &str| -> Result<()> {
        if id.trim().is_empty() {
            return Err(FormBindError::InvalidDescription {
                element_id: id.to_string(),
                reason: format!("{} id is blank", what),
            });
        }
        if !ids.insert(id.to_string()) {
            return Err(FormBindError::DuplicateElementId {
                element_id: id.to_string(),
            });
        }
        Ok(())
    };

    for view in &document.views {
        claim(&view.id, "view")?;
        for group in &view.groups {
            claim(&group.id, "group")?;
            for widget in &group.widgets {
                claim(&widget.id, "widget")?;
                if widget.name.trim().is_empty() {
                    return Err(FormBindError::InvalidDescription {
                        element_id: widget.id.clone(),
                        reason: "widget name is blank".to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}
