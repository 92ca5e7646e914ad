//! `fieldlog export` - write a CSV or ZIP artifact.

use anyhow::Result;
use chrono::Local;
use fieldlog::export::{ExportKind, Exporter};
use fieldlog::ui::format_bytes;
use std::path::Path;

use super::Context;

/// Execute the export command.
///
/// The artifact is named after today's local date.
pub async fn execute(ctx: &Context, kind: ExportKind, out_dir: Option<&Path>) -> Result<()> {
    let settings = &ctx.config.export;
    let exporter = Exporter::new(ctx.store.clone())
        .with_archive_options(settings.archive_options())
        .with_prefix(settings.prefix.clone());

    let dir = out_dir.unwrap_or(&settings.dir);
    let artifact = exporter
        .export_to_dir(kind, dir, Local::now().date_naive())
        .await?;

    println!(
        "Exported {} ({})",
        artifact.path.display(),
        format_bytes(artifact.size)
    );
    Ok(())
}
