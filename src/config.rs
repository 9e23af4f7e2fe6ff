//! Behavior configuration.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user file is merged over it key by key,
//! so a config file only needs the values it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [carousel]
//! interval_ms = 5000        # Auto-play period
//!
//! [back_to_top]
//! threshold = 300           # Scroll offset (px) above which the control shows
//!
//! [gallery]
//! fade_delay_ms = 50        # Delay before a shown item turns opaque
//! all_category = "all"      # Filter tag that matches every item
//!
//! [forms]
//! login_page = "login.html" # Where a successful registration navigates
//!
//! [forms.error_style]
//! color = "#c0392b"
//! font_size = "12px"
//! margin_top = "5px"
//!
//! [forms.acknowledgments]
//! contact = "Thank you for your message! We will be in touch soon."
//! login = "Signed in. Welcome back."
//! register = "Registration complete. Please sign in."
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site behavior configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub carousel: CarouselConfig,
    pub back_to_top: BackToTopConfig,
    pub gallery: GalleryConfig,
    pub forms: FormsConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.interval_ms must be non-zero".into(),
            ));
        }
        if !self.back_to_top.threshold.is_finite() || self.back_to_top.threshold < 0.0 {
            return Err(ConfigError::Validation(
                "back_to_top.threshold must be a non-negative number".into(),
            ));
        }
        if self.gallery.fade_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "gallery.fade_delay_ms must be non-zero".into(),
            ));
        }
        if self.gallery.all_category.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gallery.all_category must not be empty".into(),
            ));
        }
        if self.forms.login_page.trim().is_empty() {
            return Err(ConfigError::Validation(
                "forms.login_page must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Milliseconds between automatic slide advances.
    pub interval_ms: u64,
}

impl CarouselConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { interval_ms: 5000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackToTopConfig {
    /// The control shows once the page is scrolled strictly past this offset.
    pub threshold: f64,
}

impl Default for BackToTopConfig {
    fn default() -> Self {
        Self { threshold: 300.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    pub fade_delay_ms: u64,
    /// Filter tag that matches every item regardless of its category.
    pub all_category: String,
}

impl GalleryConfig {
    pub fn fade_delay(&self) -> Duration {
        Duration::from_millis(self.fade_delay_ms)
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            fade_delay_ms: 50,
            all_category: "all".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormsConfig {
    /// Navigation target after a successful registration.
    pub login_page: String,
    pub error_style: ErrorStyle,
    pub acknowledgments: Acknowledgments,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            login_page: "login.html".to_string(),
            error_style: ErrorStyle::default(),
            acknowledgments: Acknowledgments::default(),
        }
    }
}

/// Inline style applied to a visible field error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ErrorStyle {
    pub color: String,
    pub font_size: String,
    pub margin_top: String,
}

impl ErrorStyle {
    /// `(property, value)` pairs, `display: block` first.
    pub fn declarations(&self) -> [(&'static str, &str); 4] {
        [
            ("display", "block"),
            ("color", self.color.as_str()),
            ("font-size", self.font_size.as_str()),
            ("margin-top", self.margin_top.as_str()),
        ]
    }
}

impl Default for ErrorStyle {
    fn default() -> Self {
        Self {
            color: "#c0392b".to_string(),
            font_size: "12px".to_string(),
            margin_top: "5px".to_string(),
        }
    }
}

/// Messages shown once a form passes validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Acknowledgments {
    pub contact: String,
    pub login: String,
    pub register: String,
}

impl Default for Acknowledgments {
    fn default() -> Self {
        Self {
            contact: "Thank you for your message! We will be in touch soon.".to_string(),
            login: "Signed in. Welcome back.".to_string(),
            register: "Registration complete. Please sign in.".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, over stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Kiln UI Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Banner carousel
# ---------------------------------------------------------------------------
[carousel]
# Milliseconds between automatic slide advances. Hovering the carousel
# pauses auto-play; leaving it or using the controls restarts the period.
interval_ms = 5000

# ---------------------------------------------------------------------------
# Back-to-top control
# ---------------------------------------------------------------------------
[back_to_top]
# The control becomes visible once the page is scrolled past this many pixels.
threshold = 300.0

# ---------------------------------------------------------------------------
# Gallery filter
# ---------------------------------------------------------------------------
[gallery]
# Milliseconds a newly shown item stays transparent before fading in.
fade_delay_ms = 50

# Filter tag that shows every item.
all_category = "all"

# ---------------------------------------------------------------------------
# Forms
# ---------------------------------------------------------------------------
[forms]
# Page a successful registration navigates to.
login_page = "login.html"

# Inline style of a visible field error message.
[forms.error_style]
color = "#c0392b"
font_size = "12px"
margin_top = "5px"

# Acknowledgment shown after a form passes validation.
[forms.acknowledgments]
contact = "Thank you for your message! We will be in touch soon."
login = "Signed in. Welcome back."
register = "Registration complete. Please sign in."
"##
}
