//! Capture flow: turn collected sensor inputs into a stored record.
//!
//! Inputs arrive as one [`PendingCapture`] value instead of living in
//! process-wide state. Validation runs before any storage write, so a saved
//! record always carries the fields the export pipeline expects.

use crate::error::{Error, Result};
use crate::record::{Photo, Record, extension_for_mime, generate_id, round_coordinate};
use crate::store::RecordStore;
use chrono::{DateTime, SubsecRound, Utc};
use serde::Deserialize;
use tracing::info;

/// A location fix from the positioning sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Reported horizontal accuracy in meters.
    pub accuracy: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// Photo bytes as handed over by the camera or file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoInput {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Everything collected for one observation, not yet saved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingCapture {
    pub fix: Option<LocationFix>,
    pub photo: Option<PhotoInput>,
    pub note: String,
}

/// Rules applied when saving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CapturePolicy {
    /// Reject captures without a photo.
    pub require_photo: bool,
}

impl PendingCapture {
    /// Validate the inputs and build the record that would be stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedCaptureInput`] if the fix is missing or out
    /// of range, the photo is empty or not an image, or a required photo is
    /// absent.
    pub fn into_record(self, policy: CapturePolicy) -> Result<Record> {
        let fix = self
            .fix
            .ok_or_else(|| Error::capture("missing location fix"))?;
        validate_fix(&fix)?;

        if policy.require_photo && self.photo.is_none() {
            return Err(Error::capture("missing photo"));
        }

        let timestamp = fix.timestamp.trunc_subsecs(0);
        let id = generate_id(timestamp);

        let photo = match self.photo {
            Some(input) => Some(photo_for(&id, input)?),
            None => None,
        };

        Ok(Record {
            id,
            timestamp,
            latitude: round_coordinate(fix.latitude),
            longitude: round_coordinate(fix.longitude),
            accuracy: fix.accuracy.map(accuracy_meters),
            note: self.note,
            photo,
        })
    }
}

fn validate_fix(fix: &LocationFix) -> Result<()> {
    if !fix.latitude.is_finite() || fix.latitude.abs() > 90.0 {
        return Err(Error::capture(format!("latitude out of range: {}", fix.latitude)));
    }
    if !fix.longitude.is_finite() || fix.longitude.abs() > 180.0 {
        return Err(Error::capture(format!(
            "longitude out of range: {}",
            fix.longitude
        )));
    }
    if let Some(acc) = fix.accuracy
        && (!acc.is_finite() || acc < 0.0)
    {
        return Err(Error::capture(format!("invalid accuracy: {acc}")));
    }
    Ok(())
}

fn photo_for(id: &str, input: PhotoInput) -> Result<Photo> {
    if input.bytes.is_empty() {
        return Err(Error::capture("photo is empty"));
    }
    let ext = extension_for_mime(&input.mime)
        .ok_or_else(|| Error::capture(format!("not an image type: {:?}", input.mime)))?;
    Ok(Photo {
        name: format!("{id}.{ext}"),
        mime: input.mime,
        bytes: input.bytes,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn accuracy_meters(acc: f64) -> u32 {
    // validated finite and non-negative; `as` saturates above u32::MAX
    acc.round() as u32
}

/// Validate a pending capture and persist it as one record.
///
/// # Errors
///
/// Returns [`Error::UnsupportedCaptureInput`] without touching the store if
/// validation fails, or [`Error::Persistence`] if the insert cannot commit.
pub async fn save(
    store: &RecordStore,
    capture: PendingCapture,
    policy: CapturePolicy,
) -> Result<Record> {
    let record = capture.into_record(policy)?;
    store.insert(&record).await?;
    info!(
        id = %record.id,
        photo = record.photo_name().unwrap_or("-"),
        "Saved capture"
    );
    Ok(record)
}
