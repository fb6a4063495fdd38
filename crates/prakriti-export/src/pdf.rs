//! PDF rendering with `printpdf`.
//!
//! The report composer never fails: the primary layout engine is tried
//! first, then a single-pass fallback with the core data, then a one-page
//! error document, and finally a static minimal PDF.

use std::fs;
use std::io::{BufWriter, Cursor};
use std::path::{Path, PathBuf};

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use tracing::{debug, error, info, warn};

use prakriti_core::config::{Branding, WatermarkConfig};

use crate::error::ExportError;
use crate::layout::{Op, Page, PageGeometry, paginate};
use crate::report::{ReportInput, report_blocks};
use crate::styles::{PdfStyles, Tint};
use crate::text::{PT_TO_MM, chars_per_line, text_width_mm, to_builtin_charset, wrap_text};

/// Which engine produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfEngine {
    Primary,
    Fallback,
    Minimal,
}

#[derive(Debug, Clone)]
pub struct ReportPdf {
    pub bytes: Vec<u8>,
    pub engine: PdfEngine,
}

/// Last-resort document, valid enough for any viewer to open.
const STATIC_PDF: &[u8] = b"%PDF-1.4\n\
1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n\
2 0 obj << /Type /Pages /Kids [3 0 R] /Count 1 >> endobj\n\
3 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 595 842] >> endobj\n\
trailer << /Root 1 0 R >>\n\
%%EOF\n";

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Built-in fonts only encode a Latin subset.
    builtin: bool,
}

impl Fonts {
    fn pick(&self, bold: bool) -> &IndirectFontRef {
        if bold { &self.bold } else { &self.regular }
    }

    fn encode(&self, text: &str) -> String {
        if self.builtin {
            to_builtin_charset(text)
        } else {
            text.to_string()
        }
    }
}

fn builtin_fonts(doc: &PdfDocumentReference) -> Result<Fonts, ExportError> {
    Ok(Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(ExportError::pdf)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(ExportError::pdf)?,
        builtin: true,
    })
}

/// Read a TrueType/OpenType file, rejecting anything without a font header.
fn read_font_file(path: &Path) -> Result<Vec<u8>, ExportError> {
    let bytes = fs::read(path).map_err(|e| ExportError::Font {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let magic = bytes.get(..4).unwrap_or_default();
    let known: [&[u8]; 4] = [&[0x00, 0x01, 0x00, 0x00], b"true", b"OTTO", b"ttcf"];
    if !known.contains(&magic) {
        return Err(ExportError::Font {
            path: path.to_path_buf(),
            message: "not a TrueType or OpenType font".to_string(),
        });
    }
    Ok(bytes)
}

fn load_fonts(doc: &PdfDocumentReference, custom: Option<&Path>) -> Result<Fonts, ExportError> {
    let Some(path) = custom else {
        return builtin_fonts(doc);
    };
    let bytes = read_font_file(path)?;
    let font = doc
        .add_external_font(Cursor::new(bytes))
        .map_err(|e| ExportError::Font {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(Fonts {
        regular: font.clone(),
        bold: font,
        builtin: false,
    })
}

fn color(tint: Tint) -> Color {
    Color::Rgb(Rgb::new(tint.r, tint.g, tint.b, None))
}

fn point(x: f32, y: f32) -> (Point, bool) {
    (Point::new(Mm(x), Mm(y)), false)
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32, fill: Tint) {
    layer.set_fill_color(color(fill));
    layer.add_polygon(Polygon {
        rings: vec![vec![point(x, y), point(x + w, y), point(x + w, y + h), point(x, y + h)]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

fn stroke_line(layer: &PdfLayerReference, from: (f32, f32), to: (f32, f32), tint: Tint, thickness: f32) {
    layer.set_outline_color(color(tint));
    layer.set_outline_thickness(thickness);
    layer.add_line(Line {
        points: vec![point(from.0, from.1), point(to.0, to.1)],
        is_closed: false,
    });
}

fn draw_text(layer: &PdfLayerReference, fonts: &Fonts, text: &str, size: f32, x: f32, y: f32, bold: bool, tint: Tint) {
    layer.set_fill_color(color(tint));
    layer.use_text(fonts.encode(text), size, Mm(x), Mm(y), fonts.pick(bold));
}

/// Place an image file at `(x, y)` scaled to `w` millimetres wide.
/// Unreadable images are logged and skipped.
fn draw_image(layer: &PdfLayerReference, path: &Path, x: f32, y: f32, w: f32) {
    let decoded = match image_crate::open(path) {
        Ok(img) => img,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Image omitted");
            return;
        }
    };
    let buffer = decoded.to_rgb8();
    let px_w = buffer.width() as f32;
    if px_w <= 0.0 || w <= 0.0 {
        return;
    }
    let rgb = image_crate::DynamicImage::ImageRgb8(buffer);
    let dpi = px_w * 25.4 / w;
    Image::from_dynamic_image(&rgb).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(y)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
}

fn draw_ops(layer: &PdfLayerReference, fonts: &Fonts, ops: &[Op]) {
    for op in ops {
        match op {
            Op::Text {
                x,
                y,
                size,
                bold,
                color,
                text,
            } => draw_text(layer, fonts, text, *size, *x, *y, *bold, *color),
            Op::Rect { x, y, w, h, fill } => fill_rect(layer, *x, *y, *w, *h, *fill),
            Op::Line {
                from,
                to,
                color,
                thickness,
            } => stroke_line(layer, *from, *to, *color, *thickness),
            Op::Image { path, x, y, w, .. } => draw_image(layer, path, *x, *y, *w),
        }
    }
}

/// Per-page decoration: diagonal watermark beneath the content and a
/// footer with rule, optional logo, contact line and page label.
#[derive(Debug, Clone)]
pub struct PageDecor {
    pub watermark: Option<(String, Tint)>,
    pub footer_image: Option<PathBuf>,
    pub contact_line: String,
    pub watermark_config: WatermarkConfig,
}

impl PageDecor {
    pub fn for_report(branding: &Branding, watermark: &WatermarkConfig, styles: &PdfStyles) -> Self {
        let text = watermark.text_or(&branding.clinic_name).trim().to_string();
        let footer_image = if watermark.use_footer_signature {
            branding.signature_path.clone()
        } else if watermark.show_footer_logo {
            branding.logo_path.clone()
        } else {
            None
        };
        Self {
            watermark: (!text.is_empty())
                .then(|| (text, styles.accent.over_white(watermark.effective_opacity()))),
            footer_image,
            contact_line: branding.contact_line(),
            watermark_config: watermark.clone(),
        }
    }

    /// Footer only.
    pub fn plain(branding: &Branding) -> Self {
        Self {
            watermark: None,
            footer_image: None,
            contact_line: branding.contact_line(),
            watermark_config: WatermarkConfig {
                page_number_format: "Page {page} of {total}".to_string(),
                ..WatermarkConfig::default()
            },
        }
    }
}

fn draw_watermark(layer: &PdfLayerReference, fonts: &Fonts, geometry: &PageGeometry, text: &str, tint: Tint) {
    let size = 54.0;
    let width = text_width_mm(text, size).min(geometry.width * 1.3);
    let diagonal = std::f32::consts::FRAC_1_SQRT_2;
    let x = geometry.width / 2.0 - width / 2.0 * diagonal;
    let y = geometry.height / 2.0 - width / 2.0 * diagonal;
    let font = fonts.pick(true);
    layer.set_fill_color(color(tint));
    layer.begin_text_section();
    layer.set_font(font, size);
    layer.set_text_matrix(TextMatrix::TranslateRotate(Mm(x).into(), Mm(y).into(), 45.0));
    layer.write_text(fonts.encode(text), font);
    layer.end_text_section();
}

fn draw_footer(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    geometry: &PageGeometry,
    decor: &PageDecor,
    page: usize,
    total: usize,
) {
    let left = geometry.margin;
    let right = geometry.width - geometry.margin;
    let rule_y = geometry.margin + geometry.footer_band - 3.0;
    stroke_line(layer, (left, rule_y), (right, rule_y), Tint::RULE, 0.5);

    let mut text_x = left;
    if let Some(path) = decor.footer_image.as_deref()
        && path.exists()
    {
        draw_image(layer, path, left, geometry.margin - 1.0, 14.0);
        text_x += 17.0;
    }
    let size = 7.5;
    let label = decor.watermark_config.page_label(page, total);
    let label_x = right - text_width_mm(&label, size);
    let room = (label_x - text_x - 4.0).max(10.0);
    let contact: String = decor
        .contact_line
        .chars()
        .take(chars_per_line(room, size))
        .collect();
    let baseline = geometry.margin + 2.0;
    draw_text(layer, fonts, &contact, size, text_x, baseline, false, Tint::MUTED);
    draw_text(layer, fonts, &label, size, label_x, baseline, false, Tint::MUTED);
}

/// Render laid-out pages. Each page gets a watermark layer beneath a
/// content layer; `{total}` in the page label is the final page count.
pub fn render_pages(
    title: &str,
    pages: &[Page],
    geometry: PageGeometry,
    font_path: Option<&Path>,
    decor: &PageDecor,
) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(geometry.width), Mm(geometry.height), "Watermark");
    let fonts = load_fonts(&doc, font_path)?;
    let total = pages.len();

    for (i, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(geometry.width), Mm(geometry.height), "Watermark")
        };
        let page_ref = doc.get_page(page_index);
        if let Some((text, tint)) = &decor.watermark {
            draw_watermark(&page_ref.get_layer(layer_index), &fonts, &geometry, text, *tint);
        }
        let content = page_ref.add_layer("Content");
        draw_ops(&content, &fonts, &page.ops);
        draw_footer(&content, &fonts, &geometry, decor, i + 1, total);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf).map_err(ExportError::pdf)?;
    buf.into_inner().map_err(ExportError::pdf)
}

fn primary(input: &ReportInput) -> Result<Vec<u8>, ExportError> {
    let styles = PdfStyles::from_branding(&input.branding);
    let geometry = PageGeometry::A4;
    let pages = paginate(&report_blocks(input), geometry, styles);
    debug!(pages = pages.len(), "Report laid out");
    let decor = PageDecor::for_report(&input.branding, &input.watermark, &styles);
    let title = format!("{} - {}", input.branding.clinic_name, input.record.patient.name);
    render_pages(&title, &pages, geometry, input.branding.font_path.as_deref(), &decor)
}

/// Top-down text writer that starts a new page when it runs out of room.
struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    y: f32,
}

impl Canvas {
    const LEFT: f32 = 20.0;
    const TOP: f32 = 277.0;
    const BOTTOM: f32 = 20.0;

    fn new(title: &str) -> Result<Self, ExportError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(210.0), Mm(297.0), "Layer 1");
        let fonts = builtin_fonts(&doc)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            fonts,
            y: Self::TOP,
        })
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        let lh = size * 1.35 * PT_TO_MM;
        for line in wrap_text(text, chars_per_line(170.0, size)) {
            if self.y - lh < Self::BOTTOM {
                let (page, layer) = self.doc.add_page(Mm(210.0), Mm(297.0), "Layer 1");
                self.layer = self.doc.get_page(page).get_layer(layer);
                self.y = Self::TOP;
            }
            self.y -= lh;
            draw_text(&self.layer, &self.fonts, &line, size, Self::LEFT, self.y, bold, Tint::BLACK);
        }
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn finish(self) -> Result<Vec<u8>, ExportError> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc.save(&mut buf).map_err(ExportError::pdf)?;
        buf.into_inner().map_err(ExportError::pdf)
    }
}

fn fallback(input: &ReportInput, reason: &str) -> Result<Vec<u8>, ExportError> {
    let record = &input.record;
    let mut c = Canvas::new(&input.branding.clinic_name)?;
    c.line(&input.branding.clinic_name, 16.0, true);
    c.line("Personalized Ayurveda Report (summary layout)", 11.0, false);
    c.gap(3.0);
    c.line(&input.patient_line(), 10.0, false);
    c.line(&format!("Generated: {}", input.generated_label()), 9.0, false);
    c.gap(4.0);

    let shares = |d: &prakriti_core::models::dosha::ScoreDistribution| {
        d.iter()
            .map(|(k, v)| format!("{k} {v:.1}%"))
            .collect::<Vec<_>>()
            .join("  ")
    };
    c.line("Prakriti (constitutional)", 11.0, true);
    c.line(&shares(&record.prakriti_pct), 10.0, false);
    c.line("Vikriti (today)", 11.0, true);
    c.line(&shares(&record.vikriti_pct), 10.0, false);
    c.line("Psychometric (approx)", 11.0, true);
    let traits = record
        .psych_pct
        .iter()
        .map(|(k, v)| format!("{k} {v:.1}%"))
        .collect::<Vec<_>>()
        .join("  ");
    c.line(&traits, 10.0, false);
    c.gap(4.0);

    c.line("Top career suggestions", 11.0, true);
    for rec in record.career_recs.iter().take(3) {
        c.line(&format!("- {} (score {})", rec.role, rec.score), 10.0, false);
    }
    c.line("Relationship tips", 11.0, true);
    for tip in &record.relationship_tips {
        c.line(&format!("- {}: {}", tip.title, tip.detail), 10.0, false);
    }
    c.line("Health & lifestyle", 11.0, true);
    for line in record
        .health_recs
        .diet
        .iter()
        .chain(&record.health_recs.lifestyle)
        .chain(&record.health_recs.herbs)
    {
        c.line(&format!("- {line}"), 10.0, false);
    }
    c.gap(4.0);
    c.line("Personalised guideline", 11.0, true);
    for paragraph in input.guideline.split("\n\n") {
        c.line(&paragraph.replace('\n', " "), 9.5, false);
        c.gap(1.5);
    }
    c.gap(4.0);
    c.line(&format!("Note: full layout unavailable ({reason})."), 8.0, false);
    c.finish()
}

fn minimal(patient_name: &str, reason: &str) -> Result<Vec<u8>, ExportError> {
    let mut c = Canvas::new("Report error")?;
    c.line("Report could not be generated", 14.0, true);
    c.gap(3.0);
    c.line(&format!("Patient: {patient_name}"), 10.0, false);
    let reason: String = reason.chars().take(600).collect();
    c.line(&format!("Error: {reason}"), 9.0, false);
    c.finish()
}

/// Compose the branded report. Always returns non-empty PDF bytes.
pub fn compose_report_pdf(input: &ReportInput) -> ReportPdf {
    let primary_err = match primary(input) {
        Ok(bytes) => {
            return ReportPdf {
                bytes,
                engine: PdfEngine::Primary,
            };
        }
        Err(e) => e,
    };
    warn!(error = %primary_err, "Primary PDF engine failed, using fallback");

    let reason = primary_err.to_string();
    match fallback(input, &reason) {
        Ok(bytes) => {
            info!("Report produced by fallback engine");
            return ReportPdf {
                bytes,
                engine: PdfEngine::Fallback,
            };
        }
        Err(e) => warn!(error = %e, "Fallback PDF engine failed"),
    }

    match minimal(&input.record.patient.name, &reason) {
        Ok(bytes) => ReportPdf {
            bytes,
            engine: PdfEngine::Minimal,
        },
        Err(e) => {
            error!(error = %e, "Minimal PDF failed, returning static document");
            ReportPdf {
                bytes: STATIC_PDF.to_vec(),
                engine: PdfEngine::Minimal,
            }
        }
    }
}
