//! `fieldlog list` - show stored observations, newest first.

use anyhow::Result;
use fieldlog::record::{COORDINATE_PRECISION, Record};
use fieldlog::ui::note_preview;

use super::Context;

const NOTE_WIDTH: usize = 48;

/// Execute the list command.
pub async fn execute(ctx: &Context) -> Result<()> {
    let mut records = ctx.store.scan_all().await?;
    if records.is_empty() {
        println!("No records.");
        return Ok(());
    }
    records.sort_by(|a, b| Record::chronological(b, a));

    for record in &records {
        let accuracy = record
            .accuracy
            .map_or_else(|| "?".to_string(), |a| a.to_string());
        println!("{}  {}", record.timestamp_string(), record.id);
        println!(
            "    {:.p$}, {:.p$} (±{accuracy}m)",
            record.latitude,
            record.longitude,
            p = COORDINATE_PRECISION
        );
        if !record.note.is_empty() {
            println!("    {}", note_preview(&record.note, NOTE_WIDTH));
        }
        if let Some(photo) = &record.photo {
            println!("    photo: {} ({} bytes)", photo.name, photo.bytes.len());
        }
    }
    println!("\n{} record(s)", records.len());
    Ok(())
}
