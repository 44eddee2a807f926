use crate::fetcher::{
    errors::FetchError,
    types::{Charset, PageResponse},
};
use bytes::Bytes;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    body_bytes: Bytes,
    content_type: &str,
) -> Result<PageResponse, FetchError> {
    let charset = detect_charset(content_type, &body_bytes);
    let body_utf8 = decode_to_utf8(&body_bytes, &charset)?;

    Ok(PageResponse {
        url_final,
        status,
        body_utf8,
        charset,
    })
}

fn detect_charset(content_type: &str, body_bytes: &[u8]) -> Charset {
    // 1. Content-Type header
    if let Some(charset) = charset_from_label(CHARSET_REGEX.captures(content_type)) {
        return charset;
    }

    // 2. <meta> declarations in the first 4KB
    let search_bytes = &body_bytes[..body_bytes.len().min(4096)];
    let search_str = String::from_utf8_lossy(search_bytes);

    if let Some(charset) = charset_from_label(META_CHARSET_REGEX.captures(&search_str)) {
        return charset;
    }
    if let Some(charset) = charset_from_label(META_HTTP_EQUIV_REGEX.captures(&search_str)) {
        return charset;
    }

    // 3. Heuristic detection. The sniffer is fed a Cyrillic hint because
    // short windows-1251 bodies are otherwise misread as Latin-1.
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, false);
    let detected = detector.guess(Some(b"ru"), true);

    Charset::from_encoding(detected)
}

fn charset_from_label(captures: Option<regex::Captures<'_>>) -> Option<Charset> {
    let label = captures?.get(1)?.as_str().to_lowercase();
    let encoding = Encoding::for_label(label.as_bytes())?;
    Some(Charset::from_encoding(encoding))
}

fn decode_to_utf8(body_bytes: &[u8], charset: &Charset) -> Result<String, FetchError> {
    let encoding = match charset {
        Charset::Utf8 => encoding_rs::UTF_8,
        Charset::Windows1251 => encoding_rs::WINDOWS_1251,
        Charset::Windows1252 => encoding_rs::WINDOWS_1252,
        Charset::Koi8R => encoding_rs::KOI8_R,
        Charset::Other(name) => Encoding::for_label(name.as_bytes()).unwrap_or(encoding_rs::UTF_8),
    };

    let (decoded, _encoding, had_errors) = encoding.decode(body_bytes);

    if had_errors {
        return Err(FetchError::Charset(format!(
            "failed to decode content as {}",
            encoding.name()
        )));
    }

    Ok(decoded.into_owned())
}
