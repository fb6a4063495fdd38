//! Typed rules configuration.
//!
//! The on-disk YAML is deserialized straight into these structs, so an
//! unknown category name or a malformed weight table is rejected at load
//! time rather than silently ignored during scoring.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::dosha::Dosha;
use crate::models::question::QuestionItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub meta: Meta,
    pub questions: QuestionBanks,
    pub mappings: Mappings,
    #[serde(default)]
    pub branding: Branding,
    #[serde(default)]
    pub watermark: WatermarkConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub app_name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBanks {
    pub prakriti: Vec<QuestionItem>,
    pub vikriti: Vec<QuestionItem>,
    pub psychometric: Vec<QuestionItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mappings {
    #[serde(default)]
    pub career_rules: BTreeMap<Dosha, Vec<String>>,
    #[serde(default)]
    pub dosha_thresholds: DoshaThresholds,
}

/// Cut-offs applied to the mean of Prakriti and Vikriti percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoshaThresholds {
    pub mild: f64,
    pub moderate: f64,
    pub severe: f64,
}

impl Default for DoshaThresholds {
    fn default() -> Self {
        Self {
            mild: 55.0,
            moderate: 70.0,
            severe: 85.0,
        }
    }
}

/// Clinic identity printed on every generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub clinic_name: String,
    pub tagline: String,
    pub doctor: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    /// Hex colour for section headings, e.g. `#0F7A61`.
    pub accent_color: String,
    pub logo_path: Option<PathBuf>,
    pub signature_path: Option<PathBuf>,
    /// TrueType font used for report text. Falls back to Helvetica when unset.
    pub font_path: Option<PathBuf>,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            clinic_name: "AyurPrakriti Clinic".to_string(),
            tagline: "Authentic Ayurveda | Modern Precision".to_string(),
            doctor: String::new(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            website: String::new(),
            accent_color: "#0F7A61".to_string(),
            logo_path: None,
            signature_path: None,
            font_path: None,
        }
    }
}

impl Branding {
    /// Accent colour as RGB components in `[0, 1]`.
    pub fn accent_rgb(&self) -> Result<(f32, f32, f32), CoreError> {
        parse_hex_color(&self.accent_color)
    }

    /// `clinic - doctor - phone - email`, skipping empty parts.
    pub fn contact_line(&self) -> String {
        [&self.clinic_name, &self.doctor, &self.phone, &self.email]
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" - ")
    }
}

/// Watermark and footer settings for the branded PDF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkConfig {
    /// Defaults to the clinic name when unset.
    pub text: Option<String>,
    pub opacity: f32,
    pub show_footer_logo: bool,
    pub use_footer_signature: bool,
    /// `{page}` and `{total}` placeholders are substituted per page.
    pub page_number_format: String,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            text: None,
            opacity: 0.06,
            show_footer_logo: true,
            use_footer_signature: false,
            page_number_format: "Page {page}".to_string(),
        }
    }
}

impl WatermarkConfig {
    pub fn text_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.text.as_deref().unwrap_or(fallback)
    }

    /// Opacity clamped to the range the settings form allows.
    pub fn effective_opacity(&self) -> f32 {
        self.opacity.clamp(0.01, 0.2)
    }

    pub fn page_label(&self, page: usize, total: usize) -> String {
        self.page_number_format
            .replace("{page}", &page.to_string())
            .replace("{total}", &total.to_string())
    }
}

/// Parse `#RRGGBB` (leading `#` optional) into RGB components in `[0, 1]`.
pub fn parse_hex_color(hex: &str) -> Result<(f32, f32, f32), CoreError> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::InvalidColor(hex.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| f32::from(v) / 255.0)
            .map_err(|_| CoreError::InvalidColor(hex.to_string()))
    };
    Ok((channel(0)?, channel(2)?, channel(4)?))
}
