use std::collections::BTreeMap;
use std::fs;

use jiff::civil::date;

use prakriti_core::config::RulesConfig;
use prakriti_core::models::assessment::AssessmentRecord;
use prakriti_core::models::dosha::ScoreDistribution;
use prakriti_core::models::patient::Patient;
use prakriti_core::models::psychometric::PsychometricProfile;
use prakriti_core::models::question::AnswerSet;
use prakriti_core::models::recommendation::HealthRecommendation;
use prakriti_export::action_plan::compose_action_plan_pdf;
use prakriti_export::charts::{ChartSet, Orientation, draw_bar_chart};
use prakriti_export::docx::compose_report_docx;
use prakriti_export::error::ChartError;
use prakriti_export::ics::followup_ics;
use prakriti_export::layout::{Block, Op, PageGeometry, paginate};
use prakriti_export::pdf::{PdfEngine, compose_report_pdf};
use prakriti_export::render::render_report_text;
use prakriti_export::report::{ReportInput, report_blocks};
use prakriti_export::styles::PdfStyles;
use prakriti_instruments::defaults::default_config;
use prakriti_rules::career::recommend_career;
use prakriti_rules::health::recommend_health;
use prakriti_rules::relationship::recommend_relationship;

fn record(config: &RulesConfig) -> AssessmentRecord {
    let prakriti = ScoreDistribution::new(52.4, 28.1, 19.5);
    let vikriti = ScoreDistribution::new(44.0, 36.0, 20.0);
    let psych = PsychometricProfile {
        extraversion: 41.7,
        agreeableness: 58.3,
        conscientiousness: 75.0,
        emotionality: 66.7,
        openness: 83.3,
    };
    let created_at = date(2025, 3, 14).at(10, 30, 0, 0).in_tz("UTC").unwrap().timestamp();
    AssessmentRecord {
        patient: Patient {
            id: 1,
            name: "Asha Rao".to_string(),
            age: 34,
            gender: "Female".to_string(),
            contact: "asha@example.com".to_string(),
            created_at,
        },
        prakriti_answers: AnswerSet::new(),
        vikriti_answers: AnswerSet::new(),
        psych_answers: AnswerSet::new(),
        career_recs: recommend_career(&prakriti, &psych, &config.mappings.career_rules),
        relationship_tips: recommend_relationship(&prakriti, &psych),
        health_recs: recommend_health(&prakriti, &vikriti, &config.mappings.dosha_thresholds),
        prakriti_pct: prakriti,
        vikriti_pct: vikriti,
        psych_pct: psych,
        care_plan: None,
        created_at,
    }
}

fn input() -> ReportInput {
    let config = default_config();
    ReportInput::new(record(&config), &config, date(2025, 3, 14).at(10, 30, 0, 0))
}

#[test]
fn minimal_input_still_renders() {
    let config = default_config();
    let mut record = record(&config);
    record.patient.name = String::new();
    record.career_recs.clear();
    record.relationship_tips.clear();
    record.health_recs = HealthRecommendation {
        diet: Vec::new(),
        lifestyle: Vec::new(),
        herbs: Vec::new(),
        severity: BTreeMap::new(),
    };
    let missing = std::env::temp_dir().join("prakriti-no-such-dir");
    let charts = ChartSet {
        prakriti: missing.join("prakriti_0.png"),
        vikriti: missing.join("vikriti_0.png"),
        psychometric: missing.join("psych_0.png"),
        radar: missing.join("radar_0.png"),
    };
    let input = ReportInput::new(record, &config, date(2025, 3, 14).at(10, 30, 0, 0)).with_charts(charts);
    let pdf = compose_report_pdf(&input);
    assert!(pdf.bytes.starts_with(b"%PDF"));
    assert!(pdf.bytes.len() > 100);
}

#[test]
fn report_pdf_uses_primary_engine() {
    let pdf = compose_report_pdf(&input());
    assert_eq!(pdf.engine, PdfEngine::Primary);
    assert!(pdf.bytes.starts_with(b"%PDF"));
}

#[test]
fn report_pdf_with_charts_and_appendix() {
    let tmp = tempfile::tempdir().unwrap();
    let base = input();
    let charts = ChartSet::render(
        tmp.path(),
        1_700_000_000_000,
        &base.record.prakriti_pct,
        &base.record.vikriti_pct,
        &base.record.psych_pct,
    );
    let report = base
        .with_charts(charts.clone())
        .with_appendix(true)
        .with_doctor_note(Some("Review in four weeks.".to_string()));

    let pdf = compose_report_pdf(&report);
    assert_eq!(pdf.engine, PdfEngine::Primary);
    assert!(pdf.bytes.len() > 1000);
    charts.cleanup();
}

#[test]
fn corrupt_font_falls_back() {
    let tmp = tempfile::tempdir().unwrap();
    let font = tmp.path().join("broken.ttf");
    fs::write(&font, b"definitely not a font").unwrap();

    let mut report = input();
    report.branding.font_path = Some(font);
    let pdf = compose_report_pdf(&report);
    assert_eq!(pdf.engine, PdfEngine::Fallback);
    assert!(pdf.bytes.starts_with(b"%PDF"));
}

#[test]
fn report_blocks_follow_section_order() {
    let report = input().with_appendix(true);
    let headings: Vec<String> = report_blocks(&report)
        .into_iter()
        .filter_map(|b| match b {
            Block::Heading(h) => Some(h),
            _ => None,
        })
        .collect();
    let position = |name: &str| headings.iter().position(|h| h == name).unwrap();
    assert!(position("Executive summary") < position("Prakriti (constitutional)"));
    assert!(position("Personalised guideline") < position("Priority actions"));
    assert!(position("Priority actions") < position("Career suggestions"));
    assert!(position("Health & lifestyle") < position("Appendix - Practical Ayurvedic Plan"));
}

#[test]
fn appendix_is_opt_in() {
    let without = report_blocks(&input());
    assert!(!without.iter().any(|b| matches!(b, Block::Heading(h) if h.starts_with("Appendix"))));
}

#[test]
fn long_flow_spans_pages() {
    let blocks: Vec<Block> = (0..120)
        .map(|i| Block::Paragraph(format!("Paragraph {i} with enough words to take a line.")))
        .collect();
    let pages = paginate(&blocks, PageGeometry::A4, PdfStyles::default());
    assert!(pages.len() > 1);
    assert!(pages[0].text().contains("Paragraph 0"));
    assert!(pages.last().unwrap().text().contains("Paragraph 119"));
}

#[test]
fn page_break_starts_new_page_once() {
    let blocks = vec![
        Block::Paragraph("first".to_string()),
        Block::PageBreak,
        Block::PageBreak,
        Block::Paragraph("second".to_string()),
    ];
    let pages = paginate(&blocks, PageGeometry::A4, PdfStyles::default());
    assert_eq!(pages.len(), 2);
    assert!(pages[1].text().contains("second"));
}

#[test]
fn empty_flow_still_has_a_page() {
    assert_eq!(paginate(&[], PageGeometry::A4, PdfStyles::default()).len(), 1);
}

fn assert_header_on_every_page(rows: Vec<Vec<String>>) -> usize {
    let blocks = vec![Block::Table {
        columns: vec![("Trait".to_string(), 2.0), ("Score".to_string(), 1.0)],
        rows,
    }];
    let geometry = PageGeometry::A4;
    let pages = paginate(&blocks, geometry, PdfStyles::default());
    for (i, page) in pages.iter().enumerate() {
        assert!(page.text().starts_with("Trait"), "page {} starts with {:?}", i + 1, page.text().lines().next());
        for op in &page.ops {
            if let Op::Text { y, .. } = op {
                assert!(*y >= geometry.content_bottom(), "text below the footer band on page {}", i + 1);
            }
        }
    }
    pages.len()
}

#[test]
fn long_table_repeats_header() {
    let rows = (0..150).map(|i| vec![format!("row {i}"), "50.0%".to_string()]).collect();
    assert!(assert_header_on_every_page(rows) > 1);
}

#[test]
fn wrapped_row_moves_below_a_repeated_header() {
    let mut rows: Vec<Vec<String>> =
        (0..27).map(|i| vec![format!("row {i}"), "50.0%".to_string()]).collect();
    rows.push(vec![vec!["word"; 60].join(" "), "12.5%".to_string()]);
    rows.extend((0..40).map(|i| vec![format!("tail {i} {}", "steady ".repeat(12)), "1%".to_string()]));
    assert!(assert_header_on_every_page(rows) > 1);
}

#[test]
fn row_taller_than_a_page_is_split() {
    let rows = vec![
        vec!["short".to_string(), "1%".to_string()],
        vec![vec!["overflow"; 1500].join(" "), "99%".to_string()],
        vec!["after".to_string(), "2%".to_string()],
    ];
    assert!(assert_header_on_every_page(rows) >= 3);
}

#[test]
fn charts_are_written_and_cleaned_up() {
    let tmp = tempfile::tempdir().unwrap();
    let charts = ChartSet::render(
        tmp.path(),
        42,
        &ScoreDistribution::new(50.0, 30.0, 20.0),
        &ScoreDistribution::equal_split(),
        &PsychometricProfile::neutral(),
    );
    assert!(charts.prakriti.ends_with("prakriti_42.png"));
    for path in charts.paths() {
        assert!(path.exists(), "missing {}", path.display());
    }
    charts.cleanup();
    for path in charts.paths() {
        assert!(!path.exists());
    }
    // second cleanup is a no-op
    charts.cleanup();
}

#[test]
fn empty_series_is_rejected() {
    let err = draw_bar_chart(&[], "Nothing", Orientation::Vertical).unwrap_err();
    assert!(matches!(err, ChartError::EmptySeries(_)));
}

#[test]
fn followup_calendar_entry() {
    let ics = followup_ics("Asha Rao", 14, date(2025, 3, 14).at(16, 5, 0, 0)).unwrap();
    assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
    assert!(ics.contains("DTSTART:20250328T090000\r\n"));
    assert!(ics.contains("DTEND:20250328T093000\r\n"));
    assert!(ics.contains("SUMMARY:Follow-up - Asha Rao\r\n"));
    assert!(ics.ends_with("END:VCALENDAR\r\n"));
    assert!(!ics.replace("\r\n", "").contains('\n'));
}

#[test]
fn calendar_escapes_text_values() {
    let ics = followup_ics("Rao, Asha", 7, date(2025, 1, 1).at(9, 0, 0, 0)).unwrap();
    assert!(ics.contains("SUMMARY:Follow-up - Rao\\, Asha"));
}

#[test]
fn report_text_has_every_section() {
    let text = render_report_text(&input().with_doctor_note(Some("Recheck sleep.".to_string())))
        .unwrap();
    for section in [
        "## Prakriti (constitutional) %",
        "## Vikriti (today) %",
        "## Psychometric summary (approx)",
        "## Top career suggestions (ranked)",
        "## Relationship tips",
        "## Health & lifestyle",
        "## Personalised guideline",
        "## Doctor's note",
    ] {
        assert!(text.contains(section), "missing {section}");
    }
    assert!(text.contains("Name: Asha Rao"));
    assert!(text.contains("- Vata: 52.4 %"));
}

#[test]
fn report_docx_is_a_zip() {
    let bytes = compose_report_docx(&input()).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn action_plan_pdf() {
    let report = input();
    let bytes = compose_action_plan_pdf(
        &report.record.patient.name,
        &report.care_plan.checklist,
        &report.care_plan.hero,
        &report.branding,
    )
    .unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn neutralized_report_drops_motivational_phrasing() {
    let report = input();
    assert!(report.care_plan.hero.contains("you have"));
    let neutral = report.neutralized();
    assert!(!neutral.care_plan.hero.contains("you have"));
}
