//! Browser binary detection for the local and sandboxed environments.

use std::path::PathBuf;

/// Known Chromium-based browser executable names to search for.
/// All of these support CDP (Chrome DevTools Protocol).
const CHROMIUM_EXECUTABLES: &[&str] = &[
    // Chrome
    "chrome",
    "google-chrome",
    "google-chrome-stable",
    // Chromium
    "chromium",
    "chromium-browser",
    // Microsoft Edge
    "msedge",
    "microsoft-edge",
    "microsoft-edge-stable",
    // Brave
    "brave",
    "brave-browser",
];

/// macOS app bundle paths for Chromium-based browsers.
#[cfg(target_os = "macos")]
const MACOS_APP_PATHS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
    "/Applications/Brave Browser.app/Contents/MacOS/Brave Browser",
];

/// Windows installation paths for Chromium-based browsers.
#[cfg(target_os = "windows")]
const WINDOWS_PATHS: &[&str] = &[
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe",
];

/// Fixed binary locations for constrained sandboxes, checked in order.
///
/// Constrained runtimes ship a minimal, statically-provisioned Chromium at a
/// known location; there is no PATH to search and no GUI browser installed.
const SANDBOX_BINARY_PATHS: &[&str] = &[
    "/opt/chromium/chrome",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/usr/lib/chromium/chromium",
    "/usr/bin/google-chrome-stable",
];

/// Result of browser detection.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    /// Whether a browser was found.
    pub found: bool,
    /// Path to the browser executable (if found).
    pub path: Option<PathBuf>,
    /// Platform-specific install instructions.
    pub install_hint: String,
}

impl DetectionResult {
    fn found_at(path: PathBuf) -> Self {
        Self {
            found: true,
            path: Some(path),
            install_hint: String::new(),
        }
    }
}

/// Detect if a Chromium-based browser is available on the local system.
///
/// Checks (in order):
/// 1. Custom path from config (if provided)
/// 2. CHROME environment variable
/// 3. Platform-specific installation paths (macOS app bundles, Windows paths)
///    - Checked before PATH because PATH can contain broken wrapper scripts
/// 4. Known executable names in PATH (fallback)
pub fn detect_browser(custom_path: Option<&str>) -> DetectionResult {
    // Check custom path first
    if let Some(path) = custom_path {
        let p = PathBuf::from(path);
        if p.exists() {
            return DetectionResult::found_at(p);
        }
    }

    // Check CHROME environment variable
    if let Ok(path) = std::env::var("CHROME") {
        let p = PathBuf::from(&path);
        if p.exists() {
            return DetectionResult::found_at(p);
        }
    }

    #[cfg(target_os = "macos")]
    for path in MACOS_APP_PATHS {
        let p = PathBuf::from(path);
        if p.exists() {
            return DetectionResult::found_at(p);
        }
    }

    #[cfg(target_os = "windows")]
    for path in WINDOWS_PATHS {
        let p = PathBuf::from(path);
        if p.exists() {
            return DetectionResult::found_at(p);
        }
    }

    // Fallback: check known executable names in PATH
    for name in CHROMIUM_EXECUTABLES {
        if let Ok(path) = which::which(name) {
            return DetectionResult::found_at(path);
        }
    }

    // Not found - return with install instructions
    DetectionResult {
        found: false,
        path: None,
        install_hint: install_instructions(),
    }
}

/// Candidate binaries for the local environment, in preference order:
/// the detected primary first, then distinct PATH hits as fallbacks.
pub fn local_candidates(custom_path: Option<&str>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(path) = detect_browser(custom_path).path {
        candidates.push(path);
    }
    for name in CHROMIUM_EXECUTABLES {
        if let Ok(path) = which::which(name)
            && !candidates.contains(&path)
        {
            candidates.push(path);
        }
    }
    candidates
}

/// Candidate binaries for the sandboxed environment, in preference order.
///
/// A configured `chrome_path` is the primary candidate; the fixed sandbox
/// locations are the fallbacks.
pub fn sandbox_candidates(custom_path: Option<&str>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(path) = custom_path {
        candidates.push(PathBuf::from(path));
    }
    for path in SANDBOX_BINARY_PATHS {
        let p = PathBuf::from(path);
        if p.exists() {
            candidates.push(p);
        }
    }
    candidates
}

/// Get platform-specific install instructions.
pub fn install_instructions() -> String {
    let instructions = if cfg!(target_os = "macos") {
        "  brew install --cask google-chrome\n  \
         # Alternatives: chromium, brave-browser, microsoft-edge"
    } else if cfg!(target_os = "linux") {
        "  Debian/Ubuntu: sudo apt install chromium-browser\n  \
         Fedora:         sudo dnf install chromium\n  \
         Arch:           sudo pacman -S chromium"
    } else if cfg!(target_os = "windows") {
        "  winget install Google.Chrome"
    } else {
        "  Download from https://www.google.com/chrome/"
    };

    format!(
        "No Chromium-based browser found. Install one:\n\n\
         {instructions}\n\n\
         Any Chromium-based browser works (Chrome, Chromium, Edge, Brave).\n\n\
         Or set the path manually:\n  \
         [browser]\n  \
         chrome_path = \"/path/to/browser\"\n\n\
         Or set the CHROME environment variable."
    )
}
