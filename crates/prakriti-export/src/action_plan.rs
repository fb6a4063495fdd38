use prakriti_core::config::Branding;

use crate::error::ExportError;
use crate::layout::{Block, PageGeometry, paginate};
use crate::pdf::{PageDecor, render_pages};
use crate::styles::PdfStyles;

/// Checklist text to blocks: `- ` lines become bullets, other lines
/// subheadings.
fn checklist_blocks(checklist: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut bullets = Vec::new();
    for line in checklist.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match line.strip_prefix("- ") {
            Some(item) => bullets.push(item.to_string()),
            None => {
                if !bullets.is_empty() {
                    blocks.push(Block::Bullets(std::mem::take(&mut bullets)));
                }
                blocks.push(Block::Subheading(line.to_string()));
            }
        }
    }
    if !bullets.is_empty() {
        blocks.push(Block::Bullets(bullets));
    }
    blocks
}

/// One-page checklist handout: clinic header, hero line, checklist.
pub fn compose_action_plan_pdf(
    patient_name: &str,
    checklist: &str,
    hero: &str,
    branding: &Branding,
) -> Result<Vec<u8>, ExportError> {
    let mut blocks = vec![Block::Title(branding.clinic_name.clone())];
    if !branding.tagline.trim().is_empty() {
        blocks.push(Block::Muted(branding.tagline.clone()));
    }
    blocks.push(Block::Heading(format!("Action plan for {patient_name}")));
    if !hero.trim().is_empty() {
        blocks.push(Block::Paragraph(hero.to_string()));
    }
    blocks.extend(checklist_blocks(checklist));

    let styles = PdfStyles::from_branding(branding);
    let geometry = PageGeometry::A4;
    let pages = paginate(&blocks, geometry, styles);
    render_pages(
        &format!("Action plan - {patient_name}"),
        &pages,
        geometry,
        branding.font_path.as_deref(),
        &PageDecor::plain(branding),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checklist_groups_bullets_under_headings() {
        let blocks = checklist_blocks("ONE-PAGE ACTION CHECKLIST\n- Morning: warm water\n- Work: 2 blocks\n\nWeekly\n- Review");
        assert_eq!(
            blocks,
            vec![
                Block::Subheading("ONE-PAGE ACTION CHECKLIST".to_string()),
                Block::Bullets(vec!["Morning: warm water".to_string(), "Work: 2 blocks".to_string()]),
                Block::Subheading("Weekly".to_string()),
                Block::Bullets(vec!["Review".to_string()]),
            ]
        );
    }
}
