use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

/// Character encodings we expect from the source sites. Both target sites
/// serve UTF-8 today, but older mirrors and embedded widgets still answer
/// in windows-1251, and mislabelled Latin-1 shows up in ad iframes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Charset {
    Utf8,
    Windows1251,
    Windows1252,
    Koi8R,
    Other(String),
}

impl Charset {
    pub fn from_encoding(encoding: &'static encoding_rs::Encoding) -> Self {
        use std::ptr;

        if ptr::eq(encoding, encoding_rs::UTF_8) {
            Self::Utf8
        } else if ptr::eq(encoding, encoding_rs::WINDOWS_1251) {
            Self::Windows1251
        } else if ptr::eq(encoding, encoding_rs::WINDOWS_1252) {
            Self::Windows1252
        } else if ptr::eq(encoding, encoding_rs::KOI8_R) {
            Self::Koi8R
        } else {
            Self::Other(encoding.name().to_ascii_lowercase())
        }
    }
}

/// A fetched and decoded page, ready for parsing.
#[derive(Debug)]
pub struct PageResponse {
    pub url_final: Url,
    pub status: StatusCode,
    pub body_utf8: String,
    pub charset: Charset,
}
