//! Follow-up reminder as an iCalendar file.

use jiff::ToSpan;
use jiff::civil::{DateTime, Time};

use crate::error::ExportError;

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

/// A single-event calendar `days` after `now`, starting at 09:00 local
/// time and lasting 30 minutes. Lines end with CRLF.
pub fn followup_ics(patient_name: &str, days: i64, now: DateTime) -> Result<String, ExportError> {
    let date = now
        .date()
        .checked_add(days.days())
        .map_err(|e| ExportError::Calendar(e.to_string()))?;
    let start = date.to_datetime(Time::constant(9, 0, 0, 0));
    let end = start
        .checked_add(30.minutes())
        .map_err(|e| ExportError::Calendar(e.to_string()))?;

    let stamp = now.strftime("%Y%m%dT%H%M00").to_string();
    let start_s = start.strftime("%Y%m%dT%H%M%S").to_string();
    let end_s = end.strftime("%Y%m%dT%H%M%S").to_string();
    let slug: String = patient_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();

    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//AyurPrakriti//Follow-up//EN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:followup-{start_s}-{slug}@ayurprakriti"),
        format!("DTSTAMP:{stamp}"),
        format!("DTSTART:{start_s}"),
        format!("DTEND:{end_s}"),
        format!("SUMMARY:{}", escape(&format!("Follow-up - {patient_name}"))),
        "DESCRIPTION:Review Ayurveda plan and progress.".to_string(),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];
    Ok(lines.join("\r\n") + "\r\n")
}
