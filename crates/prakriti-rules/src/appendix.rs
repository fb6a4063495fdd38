//! Static content of the practical-plan appendix.

pub struct WeekFocus {
    pub title: &'static str,
    pub detail: &'static str,
}

pub const INTRO: &str = "This appendix gives a simple, stepwise plan rooted in Dinacharya (daily routine) and Ritucharya (seasonal care). Each step is small, repeatable and suitable for home life.";

pub const SIX_WEEK_PLAN: [WeekFocus; 6] = [
    WeekFocus {
        title: "Week 1 — Stabilise digestion & morning routine",
        detail: "Warm water on waking; morning 2–5 min calm breathing; warm, cooked breakfast; avoid cold/raw on an empty stomach.",
    },
    WeekFocus {
        title: "Week 2 — Sleep & evening wind-down",
        detail: "Fix a consistent bedtime; no screens 30 minutes before bed; short 5–10 minute evening calming ritual.",
    },
    WeekFocus {
        title: "Week 3 — Gentle movement",
        detail: "Add 15–25 minutes gentle walk or simple yoga on 3 days; prefer movement after a light gap post-meal.",
    },
    WeekFocus {
        title: "Week 4 — Light dietary shifts",
        detail: "Prefer cooked vegetables, light dals and whole grains; reduce deep-fried, excessive sweets; add jeera/ajwain water if digestion weak.",
    },
    WeekFocus {
        title: "Week 5 — Mind & breath",
        detail: "Daily 3–5 minute breathing or simple meditation; a short journaling line at night (1–2 lines).",
    },
    WeekFocus {
        title: "Week 6 — Observe & stabilise",
        detail: "Note morning energy and digestion daily (1–5). Keep the simplest habits that helped and continue.",
    },
];

pub const DAILY_HABITS: [&str; 5] = [
    "1) Wake: 1 glass warm water + 1–2 min calm breathing.",
    "2) Morning: gentle oil rub (Abhyanga) or 5–10 min stretch (optional).",
    "3) Meals: warm, freshly cooked food; regular mealtimes; avoid late heavy dinner.",
    "4) Movement: 15–25 min walk or gentle yoga (preferably after a short gap post-meal).",
    "5) Evening: short calming routine (warm drink, slow breathing, lights down 30 min before bed).",
];

pub const SEASONAL_CARE: [&str; 4] = [
    "Hemanta / Shishira (cold): Prefer warm oils, soups, and avoid prolonged cold exposure.",
    "Grishma (hot): Prefer cooling foods, increase hydration, avoid mid-day sun.",
    "Varsha (monsoon): Favor freshly cooked, dry foods; avoid street food; support digestion.",
    "Sharad (transition): Use light, warm breakfasts and morning sunlight exposure.",
];

pub const DAILY_MEASURES: &str = "Ask the patient to note each morning for 2–6 weeks: Morning energy (1–5), Digestion (1–5), Sleep hours. These simple markers are clinically useful and easy to record.";

pub const CAUTIONS: [&str; 3] = [
    "If fever, severe pain, bleeding or new severe symptoms occur — seek medical care.",
    "For mild indigestion: warm jeera/ajwain water (1 cup) after meals.",
    "For sleeplessness: reduce late stimuli; try warm milk with a pinch of nutmeg (if suitable).",
];

pub const CHECKLIST: [&str; 5] = [
    "Morning: warm water + 2–3 min breathing.",
    "Breakfast: warm, cooked food.",
    "Midday: light movement (walk/stretch).",
    "Evening: light dinner 2+ hours before bed; 10 min calming routine.",
    "Daily: note morning energy (1–5) and digestion (1–5).",
];
