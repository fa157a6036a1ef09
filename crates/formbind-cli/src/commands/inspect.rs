//! Inspect command
//!
//! Usage: formbind inspect <FILE> [--source-kind <KIND>]

use clap::Args;
use std::path::PathBuf;

use formbind_core::capability::format_description_id;
use formbind_core::description::DescriptionDocument;
use formbind_core::load_descriptions;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Description document (YAML or JSON)
    pub file: PathBuf,

    /// Source kind used when printing description ids
    #[arg(long, default_value = "view")]
    pub source_kind: String,
}

/// Execute inspect command
pub fn execute(args: InspectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let index = load_descriptions(&args.file)?;
    print!("{}", render_listing(index.document(), &args.source_kind));
    Ok(())
}

/// One line per widget: description id, group path and declared slots
fn render_listing(document: &DescriptionDocument, source_kind: &str) -> String {
    let mut out = String::new();
    for (view, group, widget) in document.widgets() {
        let slots: Vec<String> = widget
            .kind
            .declared_slots()
            .into_iter()
            .map(|(name, count)| format!("{}({})", name, count))
            .collect();
        let slots = if slots.is_empty() {
            "-".to_string()
        } else {
            slots.join(", ")
        };
        out.push_str(&format!(
            "{}\t{}/{}\t{}\n",
            format_description_id(source_kind, widget.kind.kind(), &widget.id),
            view.id,
            group.id,
            slots
        ));
    }
    out.push_str(&format!("{} widget(s)\n", document.widgets().count()));
    out
}
