use jiff::civil::DateTime;
use serde::Serialize;

use prakriti_core::config::{Branding, RulesConfig, WatermarkConfig};
use prakriti_core::models::assessment::AssessmentRecord;
use prakriti_core::models::recommendation::{CarePlan, PriorityAction, Severity};
use prakriti_rules::appendix;
use prakriti_rules::career::career_rationale;
use prakriti_rules::context::PatientContext;
use prakriti_rules::guideline::personalised_guideline;
use prakriti_rules::plan::{care_plan, priority_actions};
use prakriti_rules::tone::neutralize_tone;

use crate::charts::ChartSet;
use crate::layout::{Block, Column};

/// Everything the composers need for one patient report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportInput {
    pub record: AssessmentRecord,
    pub branding: Branding,
    pub watermark: WatermarkConfig,
    pub care_plan: CarePlan,
    pub guideline: String,
    pub priority_actions: Vec<PriorityAction>,
    /// One rationale per entry of `record.career_recs`.
    pub career_rationales: Vec<String>,
    #[serde(skip)]
    pub charts: Option<ChartSet>,
    pub include_appendix: bool,
    /// Printed in a highlighted box near the end when set.
    pub doctor_note: Option<String>,
    pub generated_at: DateTime,
}

impl ReportInput {
    /// Derive the narrative content from a saved record. The season follows
    /// the month of `generated_at`.
    pub fn new(record: AssessmentRecord, config: &RulesConfig, generated_at: DateTime) -> Self {
        let context = PatientContext::new(&record.patient, generated_at.month());
        let plan = record.care_plan.clone().unwrap_or_else(|| {
            care_plan(&record.patient.name, &record.prakriti_pct, &record.vikriti_pct)
        });
        let guideline =
            personalised_guideline(&record.prakriti_pct, &record.vikriti_pct, &record.psych_pct, &context);
        let priority = priority_actions(&record.vikriti_pct, &record.psych_pct, &context);
        let career_rationales = record
            .career_recs
            .iter()
            .map(|rec| career_rationale(rec, &record.prakriti_pct, &record.psych_pct))
            .collect();

        Self {
            branding: config.branding.clone(),
            watermark: config.watermark.clone(),
            care_plan: plan,
            guideline,
            priority_actions: priority,
            career_rationales,
            charts: None,
            include_appendix: false,
            doctor_note: None,
            generated_at,
            record,
        }
    }

    pub fn with_charts(mut self, charts: ChartSet) -> Self {
        self.charts = Some(charts);
        self
    }

    pub fn with_appendix(mut self, include: bool) -> Self {
        self.include_appendix = include;
        self
    }

    pub fn with_doctor_note(mut self, note: Option<String>) -> Self {
        self.doctor_note = note.filter(|n| !n.trim().is_empty());
        self
    }

    /// Rewrite the narrative for a clinician audience.
    pub fn neutralized(mut self) -> Self {
        self.guideline = neutralize_tone(&self.guideline);
        self.care_plan.hero = neutralize_tone(&self.care_plan.hero);
        self.care_plan.doctor_note = neutralize_tone(&self.care_plan.doctor_note);
        self.career_rationales = self.career_rationales.iter().map(|r| neutralize_tone(r)).collect();
        self.doctor_note = self.doctor_note.as_deref().map(neutralize_tone);
        self
    }

    pub fn generated_label(&self) -> String {
        self.generated_at.strftime("%Y-%m-%d %H:%M").to_string()
    }

    pub fn patient_line(&self) -> String {
        let p = &self.record.patient;
        format!("Name: {}    Age: {}    Gender: {}", p.name, p.age, p.gender)
    }
}

fn pct(value: f64) -> String {
    format!("{value:.1}%")
}

fn severity_label(severity: Option<&Severity>) -> String {
    severity.map(|s| s.as_str().to_string()).unwrap_or_else(|| "-".to_string())
}

/// Guideline text to blocks: paragraphs, with `- ` lines as bullets.
fn guideline_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    for paragraph in text.split("\n\n") {
        let mut prose = Vec::new();
        let mut bullets = Vec::new();
        for line in paragraph.lines() {
            match line.trim().strip_prefix("- ") {
                Some(item) => bullets.push(item.to_string()),
                None if !line.trim().is_empty() => prose.push(line.trim()),
                None => {}
            }
        }
        if !prose.is_empty() {
            let text = prose.join(" ");
            blocks.push(if bullets.is_empty() {
                Block::Paragraph(text)
            } else {
                Block::Subheading(text)
            });
        }
        if !bullets.is_empty() {
            blocks.push(Block::Bullets(bullets));
        }
    }
    blocks
}

fn lines_after_heading(text: &str) -> (Option<String>, Vec<String>) {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let heading = lines.next().map(str::to_string);
    let rest = lines
        .map(|l| l.strip_prefix("- ").unwrap_or(l).to_string())
        .collect();
    (heading, rest)
}

fn cover(input: &ReportInput, blocks: &mut Vec<Block>) {
    let record = &input.record;
    if let Some(logo) = input.branding.logo_path.as_ref() {
        blocks.push(Block::Image {
            path: logo.clone(),
            max_width: 40.0,
            max_height: 22.0,
        });
    }
    blocks.push(Block::Title(input.branding.clinic_name.clone()));
    if !input.branding.tagline.trim().is_empty() {
        blocks.push(Block::Muted(input.branding.tagline.clone()));
    }
    blocks.push(Block::Spacer(4.0));
    blocks.push(Block::Heading("Personalized Ayurveda Report".to_string()));
    blocks.push(Block::Paragraph(input.patient_line()));
    blocks.push(Block::Muted(format!("Generated: {}", input.generated_label())));
    blocks.push(Block::Paragraph(input.care_plan.hero.clone()));

    let top_career = record
        .career_recs
        .first()
        .map(|c| c.role.clone())
        .unwrap_or_else(|| "-".to_string());
    blocks.push(Block::Badges(vec![
        ("Dominant Prakriti".to_string(), record.prakriti_pct.dominant().to_string()),
        ("Current Vikriti".to_string(), record.vikriti_pct.dominant().to_string()),
        ("Top career".to_string(), top_career),
    ]));

    if let Some(charts) = &input.charts {
        blocks.push(Block::Image {
            path: charts.radar.clone(),
            max_width: 95.0,
            max_height: 95.0,
        });
    }
    blocks.push(Block::Note {
        title: None,
        text: input.care_plan.doctor_note.clone(),
    });
    if let Some(signature) = input.branding.signature_path.as_ref() {
        blocks.push(Block::Image {
            path: signature.clone(),
            max_width: 40.0,
            max_height: 16.0,
        });
    }
    if !input.branding.doctor.trim().is_empty() {
        blocks.push(Block::Muted(input.branding.doctor.clone()));
    }
    blocks.push(Block::PageBreak);
}

fn executive_summary(input: &ReportInput, blocks: &mut Vec<Block>) {
    let record = &input.record;
    blocks.push(Block::Heading("Executive summary".to_string()));
    let share = |d: &prakriti_core::models::dosha::ScoreDistribution| {
        d.iter()
            .map(|(k, v)| format!("{k} {}", pct(v)))
            .collect::<Vec<_>>()
            .join(", ")
    };
    blocks.push(Block::Paragraph(format!(
        "Constitution (Prakriti): {}. Current state (Vikriti): {}. Strongest personality trait: {}.",
        share(&record.prakriti_pct),
        share(&record.vikriti_pct),
        record.psych_pct.strongest(),
    )));
    if let Some(charts) = &input.charts {
        for path in [&charts.prakriti, &charts.vikriti, &charts.psychometric] {
            blocks.push(Block::Image {
                path: path.clone(),
                max_width: 130.0,
                max_height: 75.0,
            });
        }
    }
}

fn score_tables(input: &ReportInput, blocks: &mut Vec<Block>) {
    let record = &input.record;
    let severity = &record.health_recs.severity;

    blocks.push(Block::Heading("Prakriti (constitutional)".to_string()));
    blocks.push(Block::Table {
        columns: vec![
            ("Dosha".to_string(), 2.0),
            ("Prakriti".to_string(), 1.0),
            ("Vikriti".to_string(), 1.0),
            ("Severity".to_string(), 1.5),
        ],
        rows: record
            .prakriti_pct
            .iter()
            .map(|(dosha, value)| {
                vec![
                    dosha.to_string(),
                    pct(value),
                    pct(record.vikriti_pct.get(dosha)),
                    severity_label(severity.get(&dosha)),
                ]
            })
            .collect(),
    });

    blocks.push(Block::Heading("Psychometric summary (approx)".to_string()));
    blocks.push(Block::Table {
        columns: vec![("Trait".to_string(), 2.0), ("Score".to_string(), 1.0)],
        rows: record
            .psych_pct
            .iter()
            .map(|(axis, value)| vec![axis.to_string(), pct(value)])
            .collect(),
    });
}

fn recommendations(input: &ReportInput, blocks: &mut Vec<Block>) {
    let record = &input.record;

    blocks.push(Block::Heading("Career suggestions".to_string()));
    if record.career_recs.is_empty() {
        blocks.push(Block::Muted("No career rules configured for this constitution.".to_string()));
    } else {
        blocks.push(Block::Table {
            columns: vec![
                ("Role".to_string(), 1.3),
                ("Score".to_string(), 0.6),
                ("Why it fits".to_string(), 4.0),
            ],
            rows: record
                .career_recs
                .iter()
                .enumerate()
                .map(|(i, rec)| {
                    let why = input
                        .career_rationales
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| rec.reason.clone());
                    vec![rec.role.clone(), rec.score.to_string(), why]
                })
                .collect(),
        });
    }

    blocks.push(Block::Heading("Relationship tips".to_string()));
    blocks.push(Block::Bullets(
        record
            .relationship_tips
            .iter()
            .map(|t| format!("{}: {}", t.title, t.detail))
            .collect(),
    ));

    let health = &record.health_recs;
    blocks.push(Block::Heading("Health & lifestyle".to_string()));
    for (label, items) in [
        ("Diet", &health.diet),
        ("Lifestyle", &health.lifestyle),
        ("Herbs & cautions", &health.herbs),
    ] {
        let text = if items.is_empty() { "-".to_string() } else { items.join(" ") };
        blocks.push(Block::Paragraph(format!("{label}: {text}")));
    }
}

fn appendix_blocks(input: &ReportInput, blocks: &mut Vec<Block>) {
    blocks.push(Block::PageBreak);
    blocks.push(Block::Heading("Appendix - Practical Ayurvedic Plan".to_string()));
    blocks.push(Block::Paragraph(appendix::INTRO.to_string()));

    let (plan_heading, plan_lines) = lines_after_heading(&input.care_plan.plan);
    if let Some(heading) = plan_heading {
        blocks.push(Block::Subheading(heading));
    }
    blocks.push(Block::Bullets(plan_lines));

    blocks.push(Block::Subheading("6-week practical plan (small steps)".to_string()));
    for week in &appendix::SIX_WEEK_PLAN {
        blocks.push(Block::Paragraph(format!("{}\n{}", week.title, week.detail)));
    }

    blocks.push(Block::Subheading("Daily habit stack (10-25 minutes)".to_string()));
    blocks.push(Block::Bullets(appendix::DAILY_HABITS.iter().map(|s| s.to_string()).collect()));

    blocks.push(Block::Subheading("Seasonal care (Ritucharya)".to_string()));
    blocks.push(Block::Bullets(appendix::SEASONAL_CARE.iter().map(|s| s.to_string()).collect()));

    blocks.push(Block::Subheading("Simple daily measures (one-line, 4-6 weeks)".to_string()));
    blocks.push(Block::Paragraph(appendix::DAILY_MEASURES.to_string()));

    blocks.push(Block::Subheading("Practical cautions & safe home measures".to_string()));
    blocks.push(Block::Bullets(appendix::CAUTIONS.iter().map(|s| s.to_string()).collect()));

    blocks.push(Block::Subheading("One-page checklist (place on fridge/phone)".to_string()));
    blocks.push(Block::Bullets(appendix::CHECKLIST.iter().map(|s| s.to_string()).collect()));
}

fn contact_blocks(branding: &Branding, blocks: &mut Vec<Block>) {
    let lines: Vec<String> = [
        &branding.clinic_name,
        &branding.address,
        &branding.phone,
        &branding.email,
        &branding.website,
    ]
    .into_iter()
    .filter(|s| !s.trim().is_empty())
    .cloned()
    .collect();
    if lines.is_empty() {
        return;
    }
    blocks.push(Block::Spacer(4.0));
    blocks.push(Block::Subheading("Contact".to_string()));
    for line in lines {
        blocks.push(Block::Muted(line));
    }
}

/// The full report as a linear flow of blocks, in section order.
pub fn report_blocks(input: &ReportInput) -> Vec<Block> {
    let mut blocks = Vec::new();
    cover(input, &mut blocks);
    executive_summary(input, &mut blocks);
    score_tables(input, &mut blocks);

    blocks.push(Block::Heading("Personalised guideline".to_string()));
    blocks.extend(guideline_blocks(&input.guideline));

    blocks.push(Block::Heading("Priority actions".to_string()));
    blocks.push(Block::Columns(
        input
            .priority_actions
            .iter()
            .map(|a| Column {
                title: a.title.clone(),
                items: a.steps.clone(),
                note: a.note.clone(),
            })
            .collect(),
    ));

    recommendations(input, &mut blocks);

    if input.include_appendix {
        appendix_blocks(input, &mut blocks);
    }
    if let Some(note) = &input.doctor_note {
        blocks.push(Block::Spacer(4.0));
        blocks.push(Block::Note {
            title: Some("Doctor's note".to_string()),
            text: note.clone(),
        });
    }
    contact_blocks(&input.branding, &mut blocks);
    blocks
}
