//! `fieldlog add` - save one observation.

use anyhow::{Context as _, Result};
use chrono::Utc;
use fieldlog::capture::{self, LocationFix, PendingCapture, PhotoInput};
use std::path::Path;

use super::Context;
use crate::AddArgs;

/// Read a photo file and resolve its MIME type.
async fn read_photo(path: &Path, mime: Option<&str>) -> Result<PhotoInput> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read photo: {}", path.display()))?;
    let mime = mime.map_or_else(
        || {
            mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_string()
        },
        str::to_string,
    );
    Ok(PhotoInput { mime, bytes })
}

/// Execute the add command.
pub async fn execute(ctx: &Context, args: AddArgs) -> Result<()> {
    let photo = match &args.photo {
        Some(path) => Some(read_photo(path, args.mime.as_deref()).await?),
        None => None,
    };

    let pending = PendingCapture {
        fix: Some(LocationFix {
            latitude: args.lat,
            longitude: args.lon,
            accuracy: args.accuracy,
            timestamp: args.time.unwrap_or_else(Utc::now),
        }),
        photo,
        note: args.note,
    };

    let record = capture::save(&ctx.store, pending, ctx.config.capture).await?;
    println!("{}", record.id);
    Ok(())
}
