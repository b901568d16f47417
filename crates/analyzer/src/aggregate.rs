//! Aggregation of raw page signals into the final ranked result.

use sitelens_browser::RawSignals;

use crate::{
    signatures::SIGNATURES,
    types::{AnalysisLimits, AnalysisResult, ColorEntry},
};

/// Generic fallback keywords never reported as fonts.
const GENERIC_FONT_KEYWORDS: &[&str] = &["serif", "sans-serif"];

/// Transform raw signals into the final result.
pub fn aggregate(signals: &RawSignals, limits: &AnalysisLimits) -> AnalysisResult {
    AnalysisResult {
        title: signals.title.clone(),
        colors: aggregate_colors(signals, limits),
        fonts: aggregate_fonts(signals, limits),
        technologies: detect_technologies(signals),
    }
}

/// Rank colors by occurrence, drop noise, cap the list.
///
/// Ties sort by value so the same page always yields the same ordering.
fn aggregate_colors(signals: &RawSignals, limits: &AnalysisLimits) -> Vec<ColorEntry> {
    let mut colors: Vec<ColorEntry> = signals
        .colors
        .iter()
        .filter(|c| c.count > limits.color_noise_threshold)
        .map(|c| ColorEntry {
            value: c.value.clone(),
            count: c.count,
        })
        .collect();

    colors.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    colors.truncate(limits.max_colors);
    colors
}

/// Normalize, deduplicate, and cap font families, keeping first-occurrence
/// order rather than frequency order.
fn aggregate_fonts(signals: &RawSignals, limits: &AnalysisLimits) -> Vec<String> {
    let mut fonts: Vec<String> = Vec::new();

    for declaration in &signals.fonts {
        if fonts.len() >= limits.max_fonts {
            break;
        }
        let Some(name) = normalize_font(declaration) else {
            continue;
        };
        if !fonts.contains(&name) {
            fonts.push(name);
        }
    }

    fonts
}

/// Normalize one font-family declaration to a family name.
///
/// Takes the first comma-separated entry, strips surrounding quotes, and
/// discards generic fallback keywords and trivially short tokens.
fn normalize_font(declaration: &str) -> Option<String> {
    let first = declaration.split(',').next()?;
    let name = first.trim().trim_matches(['"', '\'']).trim();

    if name.len() <= 2 {
        return None;
    }
    if GENERIC_FONT_KEYWORDS
        .iter()
        .any(|kw| name.eq_ignore_ascii_case(kw))
    {
        return None;
    }

    Some(name.to_string())
}

/// Evaluate every signature against the signals.
///
/// Each technology appears at most once even when several of its matchers
/// fire independently.
fn detect_technologies(signals: &RawSignals) -> Vec<String> {
    SIGNATURES
        .iter()
        .filter(|sig| sig.matches(signals))
        .map(|sig| sig.name.to_string())
        .collect()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        sitelens_browser::{ColorSample, MetaTag},
    };

    fn signals() -> RawSignals {
        RawSignals {
            title: "Untitled".into(),
            colors: Vec::new(),
            fonts: Vec::new(),
            resources: Vec::new(),
            metas: Vec::new(),
            globals: Vec::new(),
            skipped_elements: 0,
        }
    }

    fn color(value: &str, count: u32) -> ColorSample {
        ColorSample {
            value: value.into(),
            count,
        }
    }

    #[test]
    fn colors_sorted_non_increasing_and_thresholded() {
        let mut s = signals();
        s.colors = vec![
            color("rgb(1, 1, 1)", 4),
            color("rgb(2, 2, 2)", 90),
            color("rgb(3, 3, 3)", 3),
            color("rgb(4, 4, 4)", 12),
            color("rgb(5, 5, 5)", 1),
        ];

        let result = aggregate(&s, &AnalysisLimits::default());

        let counts: Vec<u32> = result.colors.iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![90, 12, 4]);
        assert!(result.colors.iter().all(|c| c.count > 3));
    }

    #[test]
    fn colors_capped_to_limit() {
        let mut s = signals();
        s.colors = (0..30)
            .map(|i| color(&format!("rgb({i}, {i}, {i})"), 10 + i))
            .collect();

        let result = aggregate(&s, &AnalysisLimits::default());
        assert_eq!(result.colors.len(), 15);
        // The cap keeps the highest-ranked entries.
        assert_eq!(result.colors[0].count, 39);
    }

    #[test]
    fn color_ties_break_deterministically() {
        let mut s = signals();
        s.colors = vec![color("rgb(9, 9, 9)", 5), color("rgb(1, 1, 1)", 5)];

        let result = aggregate(&s, &AnalysisLimits::default());
        assert_eq!(result.colors[0].value, "rgb(1, 1, 1)");
        assert_eq!(result.colors[1].value, "rgb(9, 9, 9)");
    }

    #[test]
    fn single_black_on_white_paragraph_below_threshold_yields_no_colors() {
        // A lone styled paragraph contributes a couple of samples at most;
        // below the noise threshold nothing is reported.
        let mut s = signals();
        s.colors = vec![
            color("rgb(0, 0, 0)", 2),
            color("rgb(255, 255, 255)", 1),
        ];

        let result = aggregate(&s, &AnalysisLimits::default());
        assert!(result.colors.is_empty());
    }

    #[test]
    fn fonts_normalized_first_entry_unquoted() {
        let mut s = signals();
        s.fonts = vec![
            "\"Helvetica Neue\", Helvetica, sans-serif".into(),
            "'Fira Code', monospace".into(),
        ];

        let result = aggregate(&s, &AnalysisLimits::default());
        assert_eq!(result.fonts, vec!["Helvetica Neue", "Fira Code"]);
    }

    #[test]
    fn fonts_generic_keywords_and_short_tokens_dropped() {
        let mut s = signals();
        s.fonts = vec![
            "serif".into(),
            "sans-serif".into(),
            "Sans-Serif, Arial".into(),
            "ui, system".into(),
            "Georgia, serif".into(),
        ];

        let result = aggregate(&s, &AnalysisLimits::default());
        assert_eq!(result.fonts, vec!["Georgia"]);
    }

    #[test]
    fn fonts_deduplicated_in_first_occurrence_order() {
        let mut s = signals();
        s.fonts = vec![
            "Georgia, serif".into(),
            "Arial, sans-serif".into(),
            "\"Georgia\", serif".into(),
        ];

        let result = aggregate(&s, &AnalysisLimits::default());
        assert_eq!(result.fonts, vec!["Georgia", "Arial"]);
    }

    #[test]
    fn fonts_capped_to_limit() {
        let mut s = signals();
        s.fonts = (0..20).map(|i| format!("Family{i:02}, serif")).collect();

        let result = aggregate(&s, &AnalysisLimits::default());
        assert_eq!(result.fonts.len(), 8);
        assert_eq!(result.fonts[0], "Family00");
    }

    #[test]
    fn wordpress_reported_once_despite_multiple_matchers() {
        let mut s = signals();
        s.resources
            .push("https://example.com/wp-content/app.js".into());
        s.metas.push(MetaTag {
            name: "generator".into(),
            content: "WordPress 6.4".into(),
        });
        s.globals.push("wp".into());

        let result = aggregate(&s, &AnalysisLimits::default());
        assert_eq!(
            result
                .technologies
                .iter()
                .filter(|t| *t == "WordPress")
                .count(),
            1
        );
    }

    #[test]
    fn multiple_technologies_detected_together() {
        let mut s = signals();
        s.resources
            .push("https://cdn.example.com/jquery.min.js".into());
        s.resources
            .push("https://cdn.example.com/bootstrap.min.css".into());

        let result = aggregate(&s, &AnalysisLimits::default());
        assert!(result.technologies.contains(&"jQuery".to_string()));
        assert!(result.technologies.contains(&"Bootstrap".to_string()));
    }

    #[test]
    fn empty_signals_yield_empty_arrays_not_absent_fields() {
        let result = aggregate(&signals(), &AnalysisLimits::default());
        assert_eq!(result.title, "Untitled");
        assert!(result.colors.is_empty());
        assert!(result.fonts.is_empty());
        assert!(result.technologies.is_empty());

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["colors"].is_array());
        assert!(json["fonts"].is_array());
        assert!(json["technologies"].is_array());
    }

    #[test]
    fn aggregation_is_idempotent_for_identical_signals() {
        let mut s = signals();
        s.colors = vec![color("rgb(0, 0, 0)", 40), color("rgb(7, 7, 7)", 9)];
        s.fonts = vec!["Inter, sans-serif".into()];
        s.resources.push("/wp-content/a.js".into());

        let first = aggregate(&s, &AnalysisLimits::default());
        let second = aggregate(&s, &AnalysisLimits::default());
        assert_eq!(first.colors, second.colors);
        assert_eq!(first.fonts, second.fonts);
        assert_eq!(first.technologies, second.technologies);
    }

    #[test]
    fn normalize_font_edge_cases() {
        assert_eq!(normalize_font("Arial"), Some("Arial".to_string()));
        assert_eq!(
            normalize_font("  ' Brandon Grotesque ' , serif"),
            Some("Brandon Grotesque".to_string())
        );
        assert_eq!(normalize_font("serif"), None);
        assert_eq!(normalize_font("SERIF"), None);
        assert_eq!(normalize_font("ui"), None);
        assert_eq!(normalize_font(""), None);
        assert_eq!(normalize_font("\"\""), None);
    }
}
