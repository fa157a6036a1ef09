//! Capability dispatch over description ids
//!
//! A description id reads `<sourceKind>:<widgetKind>:<elementId>`. The host
//! asks [`can_handle`] before routing a request to this engine.

use crate::config::EngineConfig;
use crate::model::WidgetKind;

/// Parsed form of a description id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionId<'a> {
    pub source_kind: &'a str,
    pub widget_kind: WidgetKind,
    pub element_id: &'a str,
}

impl<'a> DescriptionId<'a> {
    /// `None` unless all three segments are present and the widget kind tag is known
    pub fn parse(id: &'a str) -> Option<Self> {
        let mut segments = id.splitn(3, ':');
        let source_kind = segments.next().filter(|s| !s.is_empty())?;
        let widget_kind = segments.next().and_then(WidgetKind::from_tag)?;
        let element_id = segments.next().filter(|s| !s.is_empty())?;
        Some(Self {
            source_kind,
            widget_kind,
            element_id,
        })
    }
}

pub fn format_description_id(source_kind: &str, kind: WidgetKind, element_id: &str) -> String {
    format!("{}:{}:{}", source_kind, kind.tag(), element_id)
}

/// Whether this engine binds the widget behind `description_id`
pub fn can_handle(config: &EngineConfig, description_id: &str) -> bool {
    DescriptionId::parse(description_id).is_some_and(|id| {
        config
            .accepted_source_kinds
            .iter()
            .any(|kind| kind == id.source_kind)
    })
}
