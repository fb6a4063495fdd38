use serde::Serialize;
use tera::{Context, Tera};

use crate::error::ExportError;
use crate::report::ReportInput;

/// Built-in template for the DOCX report.
pub const REPORT_TEMPLATE: &str = include_str!("../templates/report.md.tera");

/// Render a Tera template against any serializable value.
///
/// The `template_content` is the raw template string (Jinja2 syntax).
/// Fields of `data` become the template context variables.
pub fn render_template<T: Serialize>(
    template_name: &str,
    template_content: &str,
    data: &T,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(data)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

#[derive(Serialize)]
struct Share {
    name: String,
    pct: String,
}

#[derive(Serialize)]
struct Career<'a> {
    role: &'a str,
    score: u32,
    rationale: &'a str,
}

#[derive(Serialize)]
struct Tip<'a> {
    title: &'a str,
    detail: &'a str,
}

/// Flattened view the report template iterates over, in canonical order.
#[derive(Serialize)]
struct ReportView<'a> {
    clinic: &'a str,
    patient_line: String,
    generated: String,
    hero: &'a str,
    prakriti: Vec<Share>,
    vikriti: Vec<Share>,
    psych: Vec<Share>,
    careers: Vec<Career<'a>>,
    tips: Vec<Tip<'a>>,
    diet: String,
    lifestyle: String,
    herbs: String,
    guideline: &'a str,
    plan: &'a str,
    habit_stack: &'a str,
    doctor_note: Option<&'a str>,
    contact: String,
}

fn shares<K: ToString>(items: impl Iterator<Item = (K, f64)>) -> Vec<Share> {
    items
        .map(|(k, v)| Share {
            name: k.to_string(),
            pct: format!("{v:.1}"),
        })
        .collect()
}

fn joined(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

/// Render the report into the heading/paragraph/bullet text form that
/// [`crate::docx::generate_docx`] consumes.
pub fn render_report_text(input: &ReportInput) -> Result<String, ExportError> {
    let record = &input.record;
    let view = ReportView {
        clinic: &input.branding.clinic_name,
        patient_line: input.patient_line(),
        generated: input.generated_label(),
        hero: &input.care_plan.hero,
        prakriti: shares(record.prakriti_pct.iter()),
        vikriti: shares(record.vikriti_pct.iter()),
        psych: shares(record.psych_pct.iter()),
        careers: record
            .career_recs
            .iter()
            .enumerate()
            .map(|(i, rec)| Career {
                role: &rec.role,
                score: rec.score,
                rationale: input
                    .career_rationales
                    .get(i)
                    .map(String::as_str)
                    .unwrap_or(&rec.reason),
            })
            .collect(),
        tips: record
            .relationship_tips
            .iter()
            .map(|t| Tip {
                title: &t.title,
                detail: &t.detail,
            })
            .collect(),
        diet: joined(&record.health_recs.diet),
        lifestyle: joined(&record.health_recs.lifestyle),
        herbs: joined(&record.health_recs.herbs),
        guideline: &input.guideline,
        plan: &input.care_plan.plan,
        habit_stack: &input.care_plan.habit_stack,
        doctor_note: input.doctor_note.as_deref(),
        contact: input.branding.contact_line(),
    };
    render_template("report.md", REPORT_TEMPLATE, &view)
}
