//! Image materialization.
//!
//! Downloads the primary image for a record and stores it under a filename
//! derived from the place name. Failures are reported to the caller, who
//! substitutes the placeholder token; nothing here is fatal to a record.

use std::path::Path;

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::fetcher::get_client;

/// Files smaller than this are CDN error pages or tracking pixels.
const MIN_IMAGE_BYTES: usize = 1000;

static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SEPARATOR_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s]+").unwrap());

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("invalid image url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("http error {0}")]
    Http(reqwest::StatusCode),

    #[error("image too small ({0} bytes)")]
    TooSmall(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Download `image_url` into `dir`, returning the stored filename.
///
/// The URL is stripped of query parameters before fetching. When the first
/// attempt fails with an HTTP error and the profile supplies a path
/// rewrite, the rewritten URL is tried once.
#[instrument(skip_all, fields(url = %image_url, place = %place_name))]
pub async fn download(
    image_url: &str,
    place_name: &str,
    dir: &Path,
    rewrite: Option<(&str, &str)>,
) -> Result<String, ImageError> {
    let mut url = Url::parse(image_url)?;
    url.set_query(None);
    url.set_fragment(None);

    let bytes = match fetch_bytes(url.as_str()).await {
        Ok(bytes) => bytes,
        Err(first_err @ (ImageError::Http(_) | ImageError::Request(_))) => {
            let Some((from, to)) = rewrite.filter(|(from, _)| url.path().contains(from)) else {
                return Err(first_err);
            };
            let retry_url = url.as_str().replace(from, to);
            warn!(retry_url, "image fetch failed, retrying with rewritten path");
            fetch_bytes(&retry_url).await?
        }
        Err(other) => return Err(other),
    };

    if bytes.len() < MIN_IMAGE_BYTES {
        return Err(ImageError::TooSmall(bytes.len()));
    }

    let filename = build_filename(place_name, url.path());
    std::fs::create_dir_all(dir)?;
    std::fs::write(dir.join(&filename), &bytes)?;
    debug!(filename, size = bytes.len(), "image stored");
    Ok(filename)
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, ImageError> {
    let response = get_client().get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ImageError::Http(status));
    }
    Ok(response.bytes().await?.to_vec())
}

/// `{sanitized place name}_{8 hex chars}{extension}`; extension taken from
/// the URL path, defaulting to `.jpg` when absent or implausible.
fn build_filename(place_name: &str, url_path: &str) -> String {
    let safe = UNSAFE_CHARS.replace_all(place_name, "");
    let safe = SEPARATOR_RUNS.replace_all(safe.trim(), "_");

    let extension = url_path
        .rsplit_once('.')
        .map(|(_, ext)| format!(".{ext}"))
        .filter(|ext| ext.len() <= 5 && !ext.contains('/'))
        .unwrap_or_else(|| ".jpg".to_string());

    let tag = &uuid::Uuid::new_v4().simple().to_string()[..8];
    format!("{safe}_{tag}{extension}")
}
