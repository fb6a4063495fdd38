use std::io::Cursor;

use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

use crate::error::ExportError;
use crate::render::render_report_text;
use crate::report::ReportInput;
use crate::styles::DocumentStyles;

/// Generate a DOCX document from rendered template output.
///
/// The `rendered` content uses a simple subset:
/// - `# Heading` → DOCX Heading 1
/// - `## Heading` → DOCX Heading 2
/// - `### Heading` → DOCX Heading 3
/// - `- item` → bullet list item (prefixed with bullet character)
/// - `1. item` → numbered list item, number kept as written
/// - `**bold**` → bold run
/// - `---` or `***` → page break
/// - Everything else → normal paragraph
pub fn generate_docx(rendered: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size, styles))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size, styles))
        .add_style(heading_style("Heading3", "heading 3", styles.heading3_size, styles));

    for line in rendered.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            docx = docx.add_paragraph(Paragraph::new());
            continue;
        }

        if let Some(text) = trimmed.strip_prefix("### ") {
            docx = docx.add_paragraph(heading_paragraph(text, "Heading3"));
        } else if let Some(text) = trimmed.strip_prefix("## ") {
            docx = docx.add_paragraph(heading_paragraph(text, "Heading2"));
        } else if let Some(text) = trimmed.strip_prefix("# ") {
            docx = docx.add_paragraph(heading_paragraph(text, "Heading1"));
        } else if let Some(text) = trimmed.strip_prefix("- ") {
            docx = docx.add_paragraph(list_paragraph("\u{2022} ", text, styles));
        } else if let Some((number, text)) = numbered_item(trimmed) {
            docx = docx.add_paragraph(list_paragraph(&format!("{number}. "), text, styles));
        } else if trimmed == "---" || trimmed == "***" {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
            );
        } else {
            docx = docx.add_paragraph(body_paragraph(trimmed, styles));
        }
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

/// Render the report template and convert it to DOCX. No pagination control.
pub fn compose_report_docx(input: &ReportInput) -> Result<Vec<u8>, ExportError> {
    let rendered = render_report_text(input)?;
    generate_docx(&rendered, &DocumentStyles::from_branding(&input.branding))
}

/// `12. text` → `(12, "text")`.
fn numbered_item(line: &str) -> Option<(u32, &str)> {
    let (number, rest) = line.split_once(". ")?;
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((number.parse().ok()?, rest))
}

fn heading_style(style_id: &str, name: &str, size_pt: usize, styles: &DocumentStyles) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
        .bold()
        .color(&styles.heading_color)
        .fonts(RunFonts::new().ascii(&styles.heading_font))
}

fn heading_paragraph(text: &str, style_id: &str) -> Paragraph {
    Paragraph::new()
        .style(style_id)
        .add_run(Run::new().add_text(text))
}

fn list_paragraph(marker: &str, text: &str, styles: &DocumentStyles) -> Paragraph {
    let marker_run = Run::new()
        .add_text(marker)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font));

    let mut para = Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(marker_run);

    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }

    para
}

fn body_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new().align(AlignmentType::Left);
    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }
    para
}

fn text_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

/// Parse simple inline formatting: **bold** segments.
fn parse_inline(text: &str, styles: &DocumentStyles) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("**") {
        let before = &remaining[..start];
        if !before.is_empty() {
            runs.push(text_run(before, styles));
        }

        let after_start = &remaining[start + 2..];
        if let Some(end) = after_start.find("**") {
            runs.push(text_run(&after_start[..end], styles).bold());
            remaining = &after_start[end + 2..];
        } else {
            // No closing **, treat rest as normal text
            runs.push(text_run(remaining, styles));
            return runs;
        }
    }

    if !remaining.is_empty() {
        runs.push(text_run(remaining, styles));
    }

    runs
}
