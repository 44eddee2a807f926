//! Run orchestration.
//!
//! Strictly sequential: one page fetched and fully processed before the
//! next, with a bounded random pause between detail-page fetches. The
//! listing fetch is retried once on transient failures; a failed detail
//! page is abandoned and the run continues; a page without a name produces
//! no record. Nothing here aborts the run for a single bad document.

use rand::Rng;
use tracing::{info, warn};

use crate::config::Config;
use crate::document::{Document, StaticDocument};
use crate::extractor::{self, PlaceRecord};
use crate::fetcher::{FetchError, fetch};
use crate::ids::IdGen;
use crate::listing;
use crate::sites::SiteProfile;
use crate::storage::images;

/// Crawl every configured site in order and return the accumulated records.
pub async fn run(config: &Config, ids: &dyn IdGen) -> Vec<PlaceRecord> {
    let mut all = Vec::new();
    for profile in SiteProfile::all() {
        all.extend(crawl_site(&profile, config, ids).await);
    }
    all
}

/// Crawl one site: listing, optional category descent, then each detail
/// page through the extraction cascades.
pub async fn crawl_site(
    profile: &SiteProfile,
    config: &Config,
    ids: &dyn IdGen,
) -> Vec<PlaceRecord> {
    let mut records = Vec::new();
    let source = page_source(profile);

    let Some(listing_doc) = load_document(&source, &profile.listing_url, true).await else {
        return records;
    };

    // The attractions portal groups its cards under category pages reached
    // from the landing page; descend into the first one and use its
    // heading as the category label.
    let mut category = profile.default_category.clone();
    let cap = config.link_cap().unwrap_or(profile.link_cap);

    let category_link = category_url(listing_doc.as_ref(), profile);
    let links = match category_link {
        Some(category_link) => {
            drop(listing_doc);
            let Some(doc) = load_document(&source, &category_link, true).await else {
                return records;
            };
            if let Some(heading) = doc.texts("h1").into_iter().next() {
                category = heading;
            }
            listing::detail_links(doc.as_ref(), profile, cap)
        }
        None => listing::detail_links(listing_doc.as_ref(), profile, cap),
    };

    info!(
        source = %profile.source,
        count = links.len(),
        "detail links discovered"
    );

    for (i, url) in links.iter().enumerate() {
        if i > 0 {
            pause(config).await;
        }

        let Some(doc) = load_document(&source, url, false).await else {
            continue;
        };
        let record = extractor::extract_place(doc.as_ref(), profile, url, &category, ids);
        drop(doc);
        let Some(mut record) = record else {
            warn!(url = %url, "page has no discoverable name, skipping");
            continue;
        };

        if record.image_filename != crate::NO_IMAGE {
            let image_url = record.image_filename.clone();
            record.image_filename = match images::download(
                &image_url,
                &record.name,
                std::path::Path::new(config.images_dir()),
                profile.image_url_rewrite,
            )
            .await
            {
                Ok(filename) => filename,
                Err(e) => {
                    warn!(url = %image_url, error = %e, "image download failed");
                    crate::NO_IMAGE.to_string()
                }
            };
        }

        info!(source = %profile.source, name = %record.name, "record extracted");
        records.push(record);
    }

    records
}

/// First category link on the landing page, absolutized, for profiles that
/// organize detail pages under categories.
fn category_url(doc: &dyn Document, profile: &SiteProfile) -> Option<String> {
    let selector = profile.category_selector.as_deref()?;
    let origin = url::Url::parse(&profile.origin).ok()?;
    doc.attrs(selector, "href")
        .into_iter()
        .find_map(|href| origin.join(&href).ok())
        .map(|u| u.to_string())
}

/// The bounded random pause between successive fetches from one site.
async fn pause(config: &Config) {
    let max = config.delay_max_ms();
    if max == 0 {
        return;
    }
    let ms = rand::thread_rng().gen_range(config.delay_min_ms()..=max);
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

enum PageSource {
    Static,
    #[cfg(feature = "headless")]
    Rendered(crate::document::rendered::RenderedBrowser),
}

fn page_source(profile: &SiteProfile) -> PageSource {
    #[cfg(feature = "headless")]
    if profile.needs_rendering {
        match crate::document::rendered::RenderedBrowser::launch() {
            Ok(browser) => return PageSource::Rendered(browser),
            Err(e) => {
                warn!(error = %e, "browser launch failed, falling back to static fetch");
            }
        }
    }
    let _ = profile;
    PageSource::Static
}

async fn fetch_document(source: &PageSource, url: &str) -> Result<Box<dyn Document>, FetchError> {
    match source {
        PageSource::Static => {
            let page = fetch(url).await?;
            Ok(Box::new(StaticDocument::parse(&page.body_utf8)))
        }
        #[cfg(feature = "headless")]
        PageSource::Rendered(browser) => match browser.load(url) {
            Ok(doc) => Ok(Box::new(doc)),
            Err(e) => Err(FetchError::Unknown(e.to_string())),
        },
    }
}

/// Fetch and parse one page. Listing-level fetches get one retry on
/// transient failures; detail pages are abandoned on the first error.
async fn load_document(
    source: &PageSource,
    url: &str,
    retry_transient: bool,
) -> Option<Box<dyn Document>> {
    let first = match fetch_document(source, url).await {
        Ok(doc) => return Some(doc),
        Err(e) => e,
    };

    if retry_transient && first.should_retry() {
        warn!(url = %url, error = %first, "transient fetch failure, retrying once");
        match fetch_document(source, url).await {
            Ok(doc) => return Some(doc),
            Err(e) => warn!(url = %url, error = %e, "retry failed, skipping"),
        }
    } else {
        warn!(url = %url, error = %first, "page fetch failed, skipping");
    }
    None
}
