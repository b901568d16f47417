//! In-page extraction of raw style and resource signals.
//!
//! One injected pass over every element collects computed colors and fonts,
//! resource URLs, meta tags, and the presence of caller-supplied global
//! symbols. Per-element faults are swallowed so a single malformed element
//! cannot abort the batch; the skip count is kept for diagnostics.

use {chromiumoxide::Page, serde::Serialize, serde_json::Value, tracing::debug};

use crate::{error::BrowserError, launch::BrowserSession};

/// Title reported when the document has none.
const UNTITLED: &str = "Untitled";

/// JavaScript to collect raw signals from the loaded document.
///
/// Takes the list of global symbol names to probe. Fully transparent colors
/// are excluded at the source: zero-alpha backgrounds dominate typical pages
/// and would flood the ranking with a meaningless entry. Presence probing of
/// globals treats absence as a normal negative, never an error.
const EXTRACT_SIGNALS_JS: &str = r#"
((globalNames) => {
    const colorMap = {};
    const fonts = [];
    const fontSeen = new Set();
    let skipped = 0;

    const isTransparent = (value) =>
        value === 'transparent' || value === 'rgba(0, 0, 0, 0)';

    for (const el of document.querySelectorAll('*')) {
        try {
            const style = getComputedStyle(el);
            const color = style.color;
            const bg = style.backgroundColor;
            const font = style.fontFamily;

            if (color && !isTransparent(color)) {
                colorMap[color] = (colorMap[color] || 0) + 1;
            }
            if (bg && !isTransparent(bg)) {
                colorMap[bg] = (colorMap[bg] || 0) + 1;
            }
            if (font && !fontSeen.has(font)) {
                fontSeen.add(font);
                fonts.push(font);
            }
        } catch (e) {
            skipped += 1;
        }
    }

    const resources = [];
    for (const el of document.querySelectorAll("script[src], link[rel='stylesheet']")) {
        const src = el.src || el.href;
        if (src) resources.push(String(src).toLowerCase());
    }

    const metas = [];
    for (const el of document.querySelectorAll('meta')) {
        const name = el.getAttribute('name') || el.getAttribute('property') || '';
        const content = el.getAttribute('content') || '';
        if (name || content) {
            metas.push({ name: name.toLowerCase(), content: content });
        }
    }

    const globals = globalNames.filter((name) => {
        try {
            return window[name] !== undefined;
        } catch (e) {
            return false;
        }
    });

    return {
        title: document.title || '',
        colors: Object.entries(colorMap).map(([value, count]) => ({ value, count })),
        fonts: fonts,
        resources: resources,
        metas: metas,
        globals: globals,
        skipped: skipped
    };
})
"#;

/// One distinct computed color and how many elements carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorSample {
    pub value: String,
    pub count: u32,
}

/// A meta tag's name (or property) and content, name lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

/// Raw signals collected from one loaded page, before aggregation.
#[derive(Debug, Clone, Serialize)]
pub struct RawSignals {
    /// Document title, `"Untitled"` when the page has none.
    pub title: String,
    /// Distinct non-transparent computed colors with element counts
    /// (text and background merged).
    pub colors: Vec<ColorSample>,
    /// Raw font-family declarations in first-seen order, not yet normalized.
    pub fonts: Vec<String>,
    /// Lowercased script/stylesheet resource URLs.
    pub resources: Vec<String>,
    /// All meta tags.
    pub metas: Vec<MetaTag>,
    /// Probed global symbols that were present in the page.
    pub globals: Vec<String>,
    /// Elements skipped because their introspection faulted.
    pub skipped_elements: u32,
}

/// Run the in-page extraction pass.
///
/// `probe_globals` is the list of well-known global exports to test for;
/// callers derive it from the technology-signature set.
pub async fn extract(
    session: &BrowserSession,
    probe_globals: &[&str],
) -> Result<RawSignals, BrowserError> {
    extract_from_page(session.page(), probe_globals).await
}

async fn extract_from_page(page: &Page, probe_globals: &[&str]) -> Result<RawSignals, BrowserError> {
    let globals_json = serde_json::to_string(probe_globals)
        .map_err(|e| BrowserError::ExtractionFailed(format!("encode globals: {e}")))?;
    let js = format!("({EXTRACT_SIGNALS_JS})({globals_json})");

    let result: Value = page
        .evaluate(js.as_str())
        .await
        .map_err(|e| BrowserError::JsEvalFailed(e.to_string()))?
        .into_value()
        .map_err(|e| BrowserError::JsEvalFailed(format!("failed to get result: {e:?}")))?;

    let signals = parse_signals(&result)?;

    debug!(
        colors = signals.colors.len(),
        fonts = signals.fonts.len(),
        resources = signals.resources.len(),
        globals = signals.globals.len(),
        skipped = signals.skipped_elements,
        "extracted raw signals"
    );

    Ok(signals)
}

fn parse_signals(result: &Value) -> Result<RawSignals, BrowserError> {
    let title = result
        .get("title")
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(UNTITLED)
        .to_string();

    let colors = result["colors"]
        .as_array()
        .ok_or_else(|| BrowserError::ExtractionFailed("colors not an array".into()))?
        .iter()
        .filter_map(|c| {
            Some(ColorSample {
                value: c["value"].as_str()?.to_string(),
                count: c["count"].as_u64()? as u32,
            })
        })
        .collect();

    let fonts = string_array(result, "fonts");
    let resources = string_array(result, "resources");
    let globals = string_array(result, "globals");

    let metas = result["metas"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|m| {
                    Some(MetaTag {
                        name: m["name"].as_str()?.to_string(),
                        content: m["content"].as_str()?.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let skipped_elements = result["skipped"].as_u64().unwrap_or(0) as u32;

    Ok(RawSignals {
        title,
        colors,
        fonts,
        resources,
        metas,
        globals,
        skipped_elements,
    })
}

fn string_array(result: &Value, key: &str) -> Vec<String> {
    result[key]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_signals_full_page() {
        let result = serde_json::json!({
            "title": "Example Domain",
            "colors": [
                { "value": "rgb(0, 0, 0)", "count": 12 },
                { "value": "rgb(255, 255, 255)", "count": 4 }
            ],
            "fonts": ["\"Helvetica Neue\", Helvetica, sans-serif"],
            "resources": ["https://example.com/wp-content/app.js"],
            "metas": [{ "name": "generator", "content": "WordPress 6.4" }],
            "globals": ["jQuery"],
            "skipped": 2
        });

        let signals = parse_signals(&result).unwrap();
        assert_eq!(signals.title, "Example Domain");
        assert_eq!(signals.colors.len(), 2);
        assert_eq!(signals.colors[0].value, "rgb(0, 0, 0)");
        assert_eq!(signals.colors[0].count, 12);
        assert_eq!(signals.fonts.len(), 1);
        assert_eq!(signals.resources[0], "https://example.com/wp-content/app.js");
        assert_eq!(signals.metas[0].name, "generator");
        assert_eq!(signals.globals, vec!["jQuery"]);
        assert_eq!(signals.skipped_elements, 2);
    }

    #[test]
    fn parse_signals_empty_page_yields_empty_collections() {
        let result = serde_json::json!({
            "title": "",
            "colors": [],
            "fonts": [],
            "resources": [],
            "metas": [],
            "globals": [],
            "skipped": 0
        });

        let signals = parse_signals(&result).unwrap();
        assert_eq!(signals.title, "Untitled");
        assert!(signals.colors.is_empty());
        assert!(signals.fonts.is_empty());
        assert!(signals.resources.is_empty());
        assert!(signals.metas.is_empty());
        assert!(signals.globals.is_empty());
    }

    #[test]
    fn parse_signals_whitespace_title_falls_back() {
        let result = serde_json::json!({
            "title": "   ",
            "colors": [],
            "fonts": [],
            "resources": [],
            "metas": [],
            "globals": [],
            "skipped": 0
        });

        assert_eq!(parse_signals(&result).unwrap().title, "Untitled");
    }

    #[test]
    fn parse_signals_malformed_entries_are_dropped() {
        let result = serde_json::json!({
            "title": "t",
            "colors": [
                { "value": "rgb(0, 0, 0)", "count": 5 },
                { "value": 42, "count": "bogus" }
            ],
            "fonts": ["Arial", 7],
            "resources": [],
            "metas": [{ "name": "ok", "content": "yes" }, { "name": 1 }],
            "globals": [],
            "skipped": 0
        });

        let signals = parse_signals(&result).unwrap();
        assert_eq!(signals.colors.len(), 1);
        assert_eq!(signals.fonts, vec!["Arial"]);
        assert_eq!(signals.metas.len(), 1);
    }

    #[test]
    fn parse_signals_missing_colors_is_an_error() {
        let result = serde_json::json!({ "title": "t" });
        assert!(parse_signals(&result).is_err());
    }
}
