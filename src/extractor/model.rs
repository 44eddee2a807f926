use serde::{Deserialize, Serialize};

/// One extracted place. Every optional field carries the unknown marker
/// rather than being omitted, so downstream consumers never see nulls or
/// missing keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Run-scoped identifier; stable within one run, not across runs.
    pub id: String,
    pub category: String,
    pub name: String,
    pub address: String,
    pub work_time: String,
    pub description: String,
    /// Remote URL right after extraction; replaced with the stored filename
    /// once the image is downloaded, or the placeholder token on failure.
    pub image_filename: String,
    /// Which site produced the record.
    pub source: String,
    /// The detail page the record came from.
    pub url: String,
}
