pub mod config;
pub mod crawler;
pub mod document;
pub mod extractor;
pub mod fetcher;
pub mod ids;
pub mod listing;
pub mod sites;
pub mod storage;

/// Marker substituted for any optional field no strategy could resolve.
pub const UNKNOWN: &str = "—";

/// Filename token used when no image could be found or downloaded.
pub const NO_IMAGE: &str = "no_image.jpg";
