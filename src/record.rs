//! Record types for captured observations.
//!
//! A [`Record`] is stored and retrieved as one value: scalar fields and the
//! photo payload travel together, so there is never a metadata row pointing
//! at a missing blob.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Timestamp format used for CSV output (ISO-8601, second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Compact timestamp used as the id prefix.
const ID_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Length of the random id suffix in hex characters.
const ID_SUFFIX_LEN: usize = 8;

/// Decimal places kept for latitude and longitude.
pub const COORDINATE_PRECISION: usize = 7;

/// One captured observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique id, `<YYYYMMDDTHHMMSSZ>-<hex suffix>`. Immutable.
    pub id: String,
    /// Capture time, whole seconds.
    pub timestamp: DateTime<Utc>,
    /// Decimal degrees, rounded to 7 places.
    pub latitude: f64,
    /// Decimal degrees, rounded to 7 places.
    pub longitude: f64,
    /// Horizontal accuracy in meters, if the sensor reported one.
    pub accuracy: Option<u32>,
    /// Free text; may contain commas, quotes and newlines.
    pub note: String,
    /// Attached photo, owned exclusively by this record.
    pub photo: Option<Photo>,
}

/// Photo payload attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// `<record id>.<ext>`
    pub name: String,
    /// MIME type reported by the picker
    pub mime: String,
    /// Raw bytes; never empty
    #[serde(with = "hex_bytes")]
    pub bytes: Vec<u8>,
}

impl Record {
    /// Timestamp rendered as `YYYY-MM-DDTHH:MM:SSZ`.
    #[must_use]
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Photo file name, if the record carries a photo.
    #[must_use]
    pub fn photo_name(&self) -> Option<&str> {
        self.photo.as_ref().map(|p| p.name.as_str())
    }

    /// Ordering used by every export: oldest first, id as tie-breaker so the
    /// result does not depend on the backend's scan order.
    #[must_use]
    pub fn chronological(a: &Self, b: &Self) -> Ordering {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.id.cmp(&b.id))
    }
}

/// Sort records oldest first.
pub fn sort_oldest_first(records: &mut [Record]) {
    records.sort_by(Record::chronological);
}

/// Derive a record id from its capture time plus a random suffix.
///
/// The suffix keeps ids unique when several captures share a second.
#[must_use]
pub fn generate_id(timestamp: DateTime<Utc>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}",
        timestamp.trunc_subsecs(0).format(ID_TIMESTAMP_FORMAT),
        &suffix[..ID_SUFFIX_LEN]
    )
}

/// Pick a file extension for a photo MIME type.
///
/// Returns `None` for anything that is not `image/*`.
#[must_use]
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    let essence = mime
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    let subtype = essence.strip_prefix("image/")?;
    Some(match subtype {
        "png" => "png",
        "webp" => "webp",
        "heic" | "heif" => "heic",
        "gif" => "gif",
        _ => "jpg",
    })
}

/// Round a coordinate to the stored precision.
#[must_use]
pub fn round_coordinate(value: f64) -> f64 {
    const SCALE: f64 = 10_000_000.0;
    // `+ 0.0` turns a rounded `-0.0` into `0.0`
    (value * SCALE).round() / SCALE + 0.0
}

/// Photo bytes are stored as a hex string inside the JSON value.
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        hex::decode(encoded).map_err(serde::de::Error::custom)
    }
}
