use serde::{Deserialize, Serialize};

/// Explicit styling of a rendered widget; every field is optional
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetStyle {
    pub background_color: Option<String>,
    pub foreground_color: Option<String>,
    pub font_size: Option<u32>,
    pub italic: bool,
    pub bold: bool,
    pub underline: bool,
    pub strike_through: bool,
}

/// A style applied when `condition` evaluates to true
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalStyle<S = WidgetStyle> {
    pub condition: String,
    pub style: S,
}

impl<S> ConditionalStyle<S> {
    pub fn new(condition: impl Into<String>, style: S) -> Self {
        Self {
            condition: condition.into(),
            style,
        }
    }
}
