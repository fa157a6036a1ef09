//! Route command
//!
//! Usage: formbind route <DESCRIPTION_ID> [--config <FILE>]

use clap::Args;
use std::path::PathBuf;

use formbind_core::capability::{can_handle, DescriptionId};
use formbind_core::EngineConfig;

#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Description id, `<sourceKind>:<widgetKind>:<elementId>`
    pub description_id: String,

    /// Engine configuration (TOML); defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Execute route command
///
/// Exits with an error when the id is not handled, so scripts can branch on it.
pub fn execute(args: RouteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    if can_handle(&config, &args.description_id) {
        println!("handled: {}", args.description_id);
        return Ok(());
    }

    match DescriptionId::parse(&args.description_id) {
        Some(id) => Err(format!(
            "source kind '{}' is not accepted (accepted: {})",
            id.source_kind,
            config.accepted_source_kinds.join(", ")
        )
        .into()),
        None => Err(format!("'{}' is not a known description id", args.description_id).into()),
    }
}
