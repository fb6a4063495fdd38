//! Answers → scores → recommendations → documents.

use std::fs;
use std::path::{Path, PathBuf};

use jiff::{Timestamp, Zoned};
use tracing::{info, warn};

use prakriti_core::config::RulesConfig;
use prakriti_core::models::assessment::AssessmentRecord;
use prakriti_core::models::patient::Patient;
use prakriti_export::action_plan::compose_action_plan_pdf;
use prakriti_export::charts::ChartSet;
use prakriti_export::docx::compose_report_docx;
use prakriti_export::ics::followup_ics;
use prakriti_export::pdf::{PdfEngine, compose_report_pdf};
use prakriti_export::report::ReportInput;
use prakriti_instruments::{Instrument, InstrumentSet};
use prakriti_rules::career::recommend_career;
use prakriti_rules::health::recommend_health;
use prakriti_rules::plan::care_plan;
use prakriti_rules::relationship::recommend_relationship;

use crate::answers::AnswerFile;

pub const DEFAULT_FOLLOWUP_DAYS: i64 = 7;

/// Score one submission and attach every recommendation. Unanswered
/// items take their default slider positions; invalid answers are
/// rejected.
pub fn assess(
    config: &RulesConfig,
    patient: &Patient,
    answers: &AnswerFile,
    now: Timestamp,
) -> eyre::Result<AssessmentRecord> {
    let instruments = InstrumentSet::from_banks(&config.questions);
    answers.validate(&instruments)?;
    let filled = answers.with_defaults(&instruments);

    let prakriti = instruments.prakriti.score(&filled.prakriti);
    let vikriti = instruments.vikriti.score(&filled.vikriti);
    let psych = instruments.psychometric.score(&filled.psychometric);

    let record = AssessmentRecord {
        patient: patient.clone(),
        career_recs: recommend_career(&prakriti, &psych, &config.mappings.career_rules),
        relationship_tips: recommend_relationship(&prakriti, &psych),
        health_recs: recommend_health(&prakriti, &vikriti, &config.mappings.dosha_thresholds),
        care_plan: Some(care_plan(&patient.name, &prakriti, &vikriti)),
        prakriti_answers: filled.prakriti,
        vikriti_answers: filled.vikriti,
        psych_answers: filled.psychometric,
        prakriti_pct: prakriti,
        vikriti_pct: vikriti,
        psych_pct: psych,
        created_at: now,
    };
    info!(
        patient_id = patient.id,
        prakriti = %record.prakriti_pct.dominant(),
        vikriti = %record.vikriti_pct.dominant(),
        "Assessment scored"
    );
    Ok(record)
}

/// Which documents to produce for an assessment.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub pdf: bool,
    pub docx: bool,
    pub action_plan: bool,
    pub ics: bool,
    pub appendix: bool,
    pub neutral_tone: bool,
    pub doctor_note: Option<String>,
    /// Defaults to [`DEFAULT_FOLLOWUP_DAYS`].
    pub followup_days: Option<i64>,
}

impl ReportOptions {
    pub fn any(&self) -> bool {
        self.pdf || self.docx || self.action_plan || self.ics
    }
}

/// Files written by [`write_artifacts`].
#[derive(Debug, Clone, Default)]
pub struct Artifacts {
    pub pdf: Option<(PathBuf, PdfEngine)>,
    pub docx: Option<PathBuf>,
    pub action_plan: Option<PathBuf>,
    pub ics: Option<PathBuf>,
}

impl Artifacts {
    pub fn paths(&self) -> Vec<&Path> {
        self.pdf
            .as_ref()
            .map(|(p, _)| p.as_path())
            .into_iter()
            .chain(self.docx.as_deref())
            .chain(self.action_plan.as_deref())
            .chain(self.ics.as_deref())
            .collect()
    }
}

/// Patient name reduced to characters safe in a file name.
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if stem.is_empty() { "patient".to_string() } else { stem }
}

fn write(path: PathBuf, bytes: &[u8]) -> eyre::Result<PathBuf> {
    fs::write(&path, bytes).map_err(|e| eyre::eyre!("failed to write {}: {e}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "Wrote document");
    Ok(path)
}

/// Compose the requested documents into `out_dir`. Charts go to `tmp_dir`
/// and are removed afterwards.
pub fn write_artifacts(
    config: &RulesConfig,
    assessment_id: i64,
    record: AssessmentRecord,
    options: &ReportOptions,
    out_dir: &Path,
    tmp_dir: &Path,
    now: &Zoned,
) -> eyre::Result<Artifacts> {
    fs::create_dir_all(out_dir)?;
    let stem = file_stem(&record.patient.name);
    let mut input = ReportInput::new(record, config, now.datetime())
        .with_appendix(options.appendix)
        .with_doctor_note(options.doctor_note.clone());
    if options.neutral_tone {
        input = input.neutralized();
    }

    let mut artifacts = Artifacts::default();

    if options.pdf {
        let record = &input.record;
        let charts = ChartSet::render(
            tmp_dir,
            now.timestamp().as_millisecond(),
            &record.prakriti_pct,
            &record.vikriti_pct,
            &record.psych_pct,
        );
        let with_charts = input.clone().with_charts(charts.clone());
        let pdf = compose_report_pdf(&with_charts);
        charts.cleanup();
        if pdf.engine != PdfEngine::Primary {
            warn!(engine = ?pdf.engine, "Report produced without the full layout");
        }
        let path = write(out_dir.join(format!("Branded_Report_{stem}_{assessment_id}.pdf")), &pdf.bytes)?;
        artifacts.pdf = Some((path, pdf.engine));
    }

    if options.docx {
        let bytes = compose_report_docx(&input)?;
        artifacts.docx = Some(write(out_dir.join(format!("Report_{stem}_{assessment_id}.docx")), &bytes)?);
    }

    if options.action_plan {
        let bytes = compose_action_plan_pdf(
            &input.record.patient.name,
            &input.care_plan.checklist,
            &input.care_plan.hero,
            &input.branding,
        )?;
        artifacts.action_plan = Some(write(out_dir.join(format!("ActionPlan_{stem}.pdf")), &bytes)?);
    }

    if options.ics {
        let days = options.followup_days.unwrap_or(DEFAULT_FOLLOWUP_DAYS);
        let ics = followup_ics(&input.record.patient.name, days, now.datetime())?;
        artifacts.ics = Some(write(out_dir.join(format!("followup_{stem}.ics")), ics.as_bytes())?);
    }

    Ok(artifacts)
}
