use prakriti_core::models::dosha::{Dosha, ScoreDistribution};
use prakriti_core::models::psychometric::PsychometricProfile;

use crate::context::{AgeGroup, Gender, PatientContext, Ritu};

/// Current-state share at which a category counts as active.
const ACTIVE_VIKRITI_PCT: f64 = 40.0;
/// Emotionality at which anxiety-oriented advice is added.
pub const ANXIETY_EMOTIONALITY_PCT: f64 = 60.0;

/// Categories that are elevated right now: every Vikriti category at or
/// above 40%, or else the dominant Prakriti category.
pub fn active_doshas(prakriti: &ScoreDistribution, vikriti: &ScoreDistribution) -> Vec<Dosha> {
    let active: Vec<Dosha> = vikriti
        .iter()
        .filter(|(_, pct)| *pct >= ACTIVE_VIKRITI_PCT)
        .map(|(dosha, _)| dosha)
        .collect();
    if active.is_empty() {
        vec![prakriti.dominant()]
    } else {
        active
    }
}

fn immediate_focus(current: Dosha, active: &[Dosha]) -> &'static str {
    if current == Dosha::Pitta || active.contains(&Dosha::Pitta) {
        "Immediate focus: cooling, avoid spicy/heavy oils, prefer cooling fruits & steady hydration."
    } else if current == Dosha::Vata || active.contains(&Dosha::Vata) {
        "Immediate focus: grounding—warm cooked meals, short Abhyanga, protect sleep and routine."
    } else {
        "Immediate focus: lightening—choose lighter warm meals, increase gentle movement, avoid naps."
    }
}

/// Daily routine suggestions for the active categories.
pub fn dinacharya(active: &[Dosha]) -> String {
    let lines: Vec<&str> = active
        .iter()
        .map(|dosha| match dosha {
            Dosha::Vata => "Daily: Wake earlier, warm water on rising, short oil massage (Abhyanga) if possible, simple grounding breath.",
            Dosha::Pitta => "Daily: Avoid heavy midday work close to peak heat; include cooling breaks and calming evenings.",
            Dosha::Kapha => "Daily: Brisk morning movement, lighter breakfasts and reduce late heavy foods.",
        })
        .collect();
    if lines.is_empty() {
        return "Daily: Warm water on waking, 5–10 min movement, regular meals and evening wind-down."
            .to_string();
    }
    lines.join(" ")
}

pub fn age_gender_tips(age_group: AgeGroup, gender: Gender) -> String {
    let mut tips = vec![match age_group {
        AgeGroup::Child => {
            "For children: small, warm meals, regular sleep; avoid long screen time before bed."
        }
        AgeGroup::YoungAdult => {
            "For younger adults: build routine habits, 20–30 min daily movement and consistent sleep."
        }
        AgeGroup::Adult => {
            "For adults: steady daily routine, protect sleep, short breaks during work and light evening activity."
        }
        AgeGroup::OlderAdult => {
            "For older adults: gentle movements, focus on digestion and warmth, avoid heavy exertion."
        }
    }];
    match gender {
        Gender::Female => tips.push(
            "Women: pay attention to iron-rich warm foods if needed and simple self-care around monthly cycles.",
        ),
        Gender::Male => tips.push(
            "Men: ensure balanced protein + warm home-cooked meals and adequate rest when stressed.",
        ),
        Gender::Other => {}
    }
    tips.join(" ")
}

pub fn mind_lines(psych: &PsychometricProfile) -> Vec<String> {
    if psych.emotionality >= ANXIETY_EMOTIONALITY_PCT {
        vec![
            "Anxiety: Short calming practices (2–5 min), reduce stimulants, short grounding tasks."
                .to_string(),
        ]
    } else {
        vec![
            "Mind: Short daily breath practice (3–5 min) and consistent sleep are recommended."
                .to_string(),
        ]
    }
}

/// Seasonal tip followed by one emphasis line per active category.
pub fn ritucharya(ritu: Ritu, active: &[Dosha]) -> String {
    let mut tip = ritu.tip().to_string();
    for dosha in Dosha::ALL {
        if !active.contains(&dosha) {
            continue;
        }
        tip.push_str(match dosha {
            Dosha::Vata => " For Vata tendencies, emphasise warm oils, cooked meals and extra rest.",
            Dosha::Pitta => {
                " For Pitta tendencies, emphasise cooling foods and avoid intense heat exposure."
            }
            Dosha::Kapha => " For Kapha tendencies, emphasise light meals and more activity.",
        });
    }
    tip
}

const MICRO_ACTIONS: [&str; 6] = [
    "Micro-actions (doable today):",
    "- Warm water on waking.",
    "- 2–5 min calm breathing after waking.",
    "- Eat warm, freshly cooked meal for main meals.",
    "- Short 10–20 min walk after lunch.",
    "- Gentle evening wind-down: no screens 30 minutes before bed.",
];

/// Multi-paragraph guideline. Paragraphs are separated by a blank line;
/// the micro-action paragraph is a heading line followed by `- ` bullets.
pub fn personalised_guideline(
    prakriti: &ScoreDistribution,
    vikriti: &ScoreDistribution,
    psych: &PsychometricProfile,
    context: &PatientContext,
) -> String {
    let constitutional = prakriti.dominant();
    let current = vikriti.dominant();
    let active = active_doshas(prakriti, vikriti);

    let mut parts = vec![
        format!(
            "You are constitutionally {constitutional}-dominant and currently showing stronger {current} tendencies."
        ),
        immediate_focus(current, &active).to_string(),
        dinacharya(&active),
        age_gender_tips(context.age_group, context.gender),
    ];
    parts.extend(mind_lines(psych));
    parts.push(ritucharya(context.ritu, &active));
    parts.push(MICRO_ACTIONS.join("\n"));
    parts.join("\n\n")
}
