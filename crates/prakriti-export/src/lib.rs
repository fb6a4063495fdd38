//! prakriti-export
//!
//! Document composer: branded multi-page PDF report with fallbacks,
//! one-page action plan, DOCX report through a Tera template, follow-up
//! calendar file, and the PNG charts the PDF embeds.

pub mod action_plan;
pub mod charts;
pub mod docx;
pub mod error;
mod glyphs;
pub mod ics;
pub mod layout;
pub mod pdf;
pub mod render;
pub mod report;
pub mod styles;
pub mod text;
