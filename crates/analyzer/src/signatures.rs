//! Technology signatures: named rule sets matched against page signals.
//!
//! The set is static, process-wide, and read-only; concurrent requests share
//! it with no synchronization. Detection is boolean per technology — any
//! matcher firing reports the name, and a name is reported at most once no
//! matter how many of its matchers fire.

use sitelens_browser::RawSignals;

/// A named rule set used to infer the presence of a front-end framework or
/// platform.
#[derive(Debug, Clone, Copy)]
pub struct TechnologySignature {
    pub name: &'static str,
    /// Substrings matched against lowercased script/stylesheet URLs.
    pub resources: &'static [&'static str],
    /// `(meta name, content fragment)` pairs; an empty fragment matches any
    /// content. Compared case-insensitively.
    pub metas: &'static [(&'static str, &'static str)],
    /// Well-known global exports probed in the page's execution context.
    pub globals: &'static [&'static str],
}

pub static SIGNATURES: &[TechnologySignature] = &[
    TechnologySignature {
        name: "WordPress",
        resources: &["wp-content", "wp-includes"],
        metas: &[("generator", "wordpress")],
        globals: &["wp"],
    },
    TechnologySignature {
        name: "Shopify",
        resources: &["cdn.shopify.com", "shopify"],
        metas: &[],
        globals: &["Shopify"],
    },
    TechnologySignature {
        name: "Squarespace",
        resources: &["squarespace"],
        metas: &[],
        globals: &["Squarespace"],
    },
    TechnologySignature {
        name: "Wix",
        resources: &["wixstatic.com", "parastorage.com"],
        metas: &[("generator", "wix")],
        globals: &[],
    },
    TechnologySignature {
        name: "Webflow",
        resources: &["webflow"],
        metas: &[("generator", "webflow")],
        globals: &["Webflow"],
    },
    TechnologySignature {
        name: "Drupal",
        resources: &["/sites/default/files"],
        metas: &[("generator", "drupal")],
        globals: &["Drupal"],
    },
    TechnologySignature {
        name: "Next.js",
        resources: &["/_next/"],
        metas: &[("generator", "next.js")],
        globals: &["__NEXT_DATA__"],
    },
    TechnologySignature {
        name: "Nuxt",
        resources: &["/_nuxt/"],
        metas: &[],
        globals: &["__NUXT__"],
    },
    TechnologySignature {
        name: "React",
        resources: &["react"],
        metas: &[],
        globals: &["React"],
    },
    TechnologySignature {
        name: "Vue.js",
        resources: &["vue"],
        metas: &[],
        globals: &["Vue"],
    },
    TechnologySignature {
        name: "Angular",
        resources: &["angular"],
        metas: &[],
        globals: &["ng"],
    },
    TechnologySignature {
        name: "Svelte",
        resources: &["svelte"],
        metas: &[],
        globals: &["__svelte"],
    },
    TechnologySignature {
        name: "jQuery",
        resources: &["jquery"],
        metas: &[],
        globals: &["jQuery"],
    },
    TechnologySignature {
        name: "Bootstrap",
        resources: &["bootstrap"],
        metas: &[],
        globals: &["bootstrap"],
    },
    TechnologySignature {
        name: "Tailwind CSS",
        resources: &["tailwind"],
        metas: &[],
        globals: &[],
    },
];

/// Every global symbol name any signature probes, deduplicated, for
/// injection into the extraction pass.
pub fn probe_globals() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for sig in SIGNATURES {
        for name in sig.globals {
            if !names.contains(name) {
                names.push(name);
            }
        }
    }
    names
}

impl TechnologySignature {
    /// Whether any matcher fires against the collected signals.
    ///
    /// All three matcher kinds are evaluated independently; no matcher's
    /// outcome gates another.
    pub fn matches(&self, signals: &RawSignals) -> bool {
        let resource_hit = self
            .resources
            .iter()
            .any(|needle| signals.resources.iter().any(|r| r.contains(needle)));

        let meta_hit = self.metas.iter().any(|(name, fragment)| {
            signals.metas.iter().any(|m| {
                m.name == *name
                    && (fragment.is_empty() || m.content.to_lowercase().contains(fragment))
            })
        });

        let global_hit = self
            .globals
            .iter()
            .any(|name| signals.globals.iter().any(|g| g == name));

        resource_hit || meta_hit || global_hit
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        sitelens_browser::{MetaTag, RawSignals},
    };

    fn empty_signals() -> RawSignals {
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

    fn signature(name: &str) -> &'static TechnologySignature {
        SIGNATURES
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("no signature named {name}"))
    }

    #[test]
    fn resource_substring_matches() {
        let mut signals = empty_signals();
        signals
            .resources
            .push("https://example.com/wp-content/themes/x/app.js".into());
        assert!(signature("WordPress").matches(&signals));
    }

    #[test]
    fn meta_generator_matches_case_insensitively() {
        let mut signals = empty_signals();
        signals.metas.push(MetaTag {
            name: "generator".into(),
            content: "WordPress 6.4.2".into(),
        });
        assert!(signature("WordPress").matches(&signals));
    }

    #[test]
    fn global_symbol_matches_exactly() {
        let mut signals = empty_signals();
        signals.globals.push("__NEXT_DATA__".into());
        assert!(signature("Next.js").matches(&signals));
        assert!(!signature("Nuxt").matches(&signals));
    }

    #[test]
    fn no_signals_no_match() {
        let signals = empty_signals();
        for sig in SIGNATURES {
            assert!(!sig.matches(&signals), "{} matched nothing", sig.name);
        }
    }

    #[test]
    fn probe_globals_is_deduplicated() {
        let names = probe_globals();
        for name in &names {
            assert_eq!(names.iter().filter(|n| n == &name).count(), 1);
        }
        assert!(names.contains(&"React"));
        assert!(names.contains(&"jQuery"));
    }

    #[test]
    fn signature_names_are_unique() {
        for sig in SIGNATURES {
            assert_eq!(
                SIGNATURES.iter().filter(|s| s.name == sig.name).count(),
                1,
                "duplicate signature name {}",
                sig.name
            );
        }
    }
}
