//! Document access adapter.
//!
//! The extraction cascades never touch a parse tree or a browser tab
//! directly; they see a [`Document`], a small capability set over an
//! already-loaded page. [`StaticDocument`] implements it over a
//! `scraper::Html` parse tree. With the `headless` feature enabled,
//! [`rendered::RenderedDocument`] implements the same trait over a page
//! snapshot taken from a real browser, for pages that only materialize
//! their markup after script execution.

#[cfg(feature = "headless")]
pub mod rendered;

use scraper::{ElementRef, Html, Selector};

/// Read-only view of a parsed page. Implementations never mutate the page.
///
/// All text is "visible" text: script/style content is excluded, block
/// element boundaries become line breaks, and whitespace within a line is
/// collapsed. Strategies rely on that line structure the same way a person
/// glancing at the rendered page would.
pub trait Document {
    /// Visible text of every element matching `selector`, in document order.
    /// An unparseable selector yields no matches, not an error.
    fn texts(&self, selector: &str) -> Vec<String>;

    /// `attr` values of every element matching `selector`, in document order.
    fn attrs(&self, selector: &str, attr: &str) -> Vec<String>;

    /// For every element matching `selector`: its own visible text paired
    /// with the visible text of its parent subtree. Used by label/heading
    /// strategies that need "the text that follows this element".
    fn texts_with_parent(&self, selector: &str) -> Vec<(String, String)>;

    /// Visible text of the whole page, one line per rendered text block.
    fn full_text(&self) -> String;
}

/// [`Document`] over a statically fetched and parsed HTML tree.
pub struct StaticDocument {
    html: Html,
}

impl StaticDocument {
    pub fn parse(raw_html: &str) -> Self {
        Self {
            html: Html::parse_document(raw_html),
        }
    }
}

impl Document for StaticDocument {
    fn texts(&self, selector: &str) -> Vec<String> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.html
            .select(&sel)
            .map(|el| element_text(el))
            .filter(|t| !t.is_empty())
            .collect()
    }

    fn attrs(&self, selector: &str, attr: &str) -> Vec<String> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.html
            .select(&sel)
            .filter_map(|el| el.value().attr(attr))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    }

    fn texts_with_parent(&self, selector: &str) -> Vec<(String, String)> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.html
            .select(&sel)
            .filter_map(|el| {
                let own = element_text(el);
                let parent = el.parent().and_then(ElementRef::wrap)?;
                Some((own, element_text(parent)))
            })
            .filter(|(own, _)| !own.is_empty())
            .collect()
    }

    fn full_text(&self) -> String {
        let body = Selector::parse("body").ok().and_then(|sel| {
            self.html.select(&sel).next()
        });
        match body {
            Some(el) => element_text(el),
            None => element_text(self.html.root_element()),
        }
    }
}

/// Visible text of an element subtree: skips non-rendered elements, breaks
/// lines at block boundaries, collapses intra-line whitespace.
fn element_text(el: ElementRef<'_>) -> String {
    // Script content is invisible in a browser, but the opening-hours
    // cascade reads JSON-LD blocks through `texts()`, so a selected
    // script element returns its raw text.
    if el.value().name() == "script" {
        return el.text().collect::<String>().trim().to_string();
    }

    let mut raw = String::new();
    collect_visible(el, &mut raw);

    let mut lines = Vec::new();
    for line in raw.split('\n') {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            lines.push(collapsed);
        }
    }
    lines.join("\n")
}

fn collect_visible(el: ElementRef<'_>, out: &mut String) {
    let name = el.value().name();
    if matches!(name, "script" | "style" | "noscript" | "template" | "head") {
        return;
    }
    if name == "br" {
        out.push('\n');
        return;
    }
    let block = is_block(name);
    if block {
        out.push('\n');
    }
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            collect_visible(child_el, out);
        }
    }
    if block {
        out.push('\n');
    }
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "div"
            | "dd"
            | "dl"
            | "dt"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "li"
            | "main"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "table"
            | "td"
            | "th"
            | "tr"
            | "ul"
    )
}
