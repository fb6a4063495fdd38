use serde::{Deserialize, Serialize};
use tracing::warn;

use prakriti_core::config::{Branding, parse_hex_color};

/// RGB colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Tint {
    pub const BLACK: Tint = Tint::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Tint = Tint::rgb(1.0, 1.0, 1.0);
    pub const TEXT: Tint = Tint::rgb(0.13, 0.13, 0.13);
    pub const MUTED: Tint = Tint::rgb(0.45, 0.45, 0.45);
    pub const RULE: Tint = Tint::rgb(0.75, 0.75, 0.75);
    pub const DEFAULT_ACCENT: Tint = Tint::rgb(15.0 / 255.0, 122.0 / 255.0, 97.0 / 255.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Mix toward white so that `opacity` of the colour remains. Stands in
    /// for transparency, which the PDF backend does not expose.
    pub fn over_white(self, opacity: f32) -> Tint {
        let a = opacity.clamp(0.0, 1.0);
        let mix = |c: f32| 1.0 - a * (1.0 - c);
        Tint::rgb(mix(self.r), mix(self.g), mix(self.b))
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [c(self.r), c(self.g), c(self.b)]
    }

    /// `RRGGBB` without the leading `#`, as OOXML expects.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("{r:02X}{g:02X}{b:02X}")
    }
}

/// Accent colour from branding; an unparseable value falls back to the
/// default green.
pub fn accent_tint(branding: &Branding) -> Tint {
    match parse_hex_color(&branding.accent_color) {
        Ok((r, g, b)) => Tint::rgb(r, g, b),
        Err(e) => {
            warn!(error = %e, "Invalid accent colour, using default");
            Tint::DEFAULT_ACCENT
        }
    }
}

/// DOCX styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text (e.g. "Calibri").
    pub body_font: String,

    /// Font for headings.
    pub heading_font: String,

    /// Body text font size in points.
    pub body_size: usize,

    pub heading1_size: usize,
    pub heading2_size: usize,
    pub heading3_size: usize,

    /// Heading colour as `RRGGBB`.
    pub heading_color: String,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Calibri".to_string(),
            heading_font: "Calibri".to_string(),
            body_size: 11,
            heading1_size: 18,
            heading2_size: 14,
            heading3_size: 12,
            heading_color: Tint::DEFAULT_ACCENT.to_hex(),
        }
    }
}

impl DocumentStyles {
    pub fn from_branding(branding: &Branding) -> Self {
        Self {
            heading_color: accent_tint(branding).to_hex(),
            ..Self::default()
        }
    }
}

/// PDF typography, sizes in points.
#[derive(Debug, Clone, Copy)]
pub struct PdfStyles {
    pub accent: Tint,
    pub title_size: f32,
    pub heading_size: f32,
    pub subheading_size: f32,
    pub body_size: f32,
    pub small_size: f32,
    /// Line height as a multiple of the font size.
    pub leading: f32,
}

impl PdfStyles {
    pub fn from_branding(branding: &Branding) -> Self {
        Self {
            accent: accent_tint(branding),
            ..Self::default()
        }
    }
}

impl Default for PdfStyles {
    fn default() -> Self {
        Self {
            accent: Tint::DEFAULT_ACCENT,
            title_size: 20.0,
            heading_size: 14.0,
            subheading_size: 11.5,
            body_size: 10.0,
            small_size: 8.0,
            leading: 1.35,
        }
    }
}
