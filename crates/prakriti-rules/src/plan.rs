use prakriti_core::models::dosha::{Dosha, ScoreDistribution};
use prakriti_core::models::psychometric::PsychometricProfile;
use prakriti_core::models::recommendation::{CarePlan, PriorityAction};

use crate::context::{AgeGroup, Gender, PatientContext};
use crate::guideline::ANXIETY_EMOTIONALITY_PCT;

fn column(title: &str, steps: &[&str]) -> PriorityAction {
    PriorityAction {
        title: title.to_string(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
        note: None,
    }
}

fn base_columns(current: Dosha) -> [PriorityAction; 3] {
    match current {
        Dosha::Vata => [
            column(
                "Start today (Vata grounding)",
                &[
                    "Warm water on waking",
                    "5–10 min gentle oil rub (optional) + slow stretch",
                    "Eat warm, cooked meals on time",
                    "Avoid cold foods early morning",
                    "10 min calming night routine",
                ],
            ),
            column(
                "This week",
                &[
                    "3 days of gentle 20–25 min walk",
                    "Fix sleep and wake-up time",
                    "Reduce screens after 9 PM",
                    "Use light digestion boosters (jeera/ajwain)",
                ],
            ),
            column(
                "This month",
                &[
                    "Stabilise meal timings",
                    "2–3 days/week light yoga",
                    "Keep simple daily schedule",
                    "Keep home warm and tidy",
                ],
            ),
        ],
        Dosha::Pitta => [
            column(
                "Start today (Pitta cooling)",
                &[
                    "Room-temperature or warm water",
                    "5–10 min cooling breath (Sheetali/Sheetkari)",
                    "Prefer cooling foods (cucumber, coconut)",
                    "Avoid spicy/heavy/oily lunch",
                    "10 min soothing evening wind-down",
                ],
            ),
            column(
                "This week",
                &[
                    "3 days of moderate walk (avoid heat)",
                    "Reduce competitive tasks in afternoon",
                    "Limit stimulants after 4 PM",
                    "Pause-breathing when agitated",
                ],
            ),
            column(
                "This month",
                &[
                    "Cultivate relaxed work rhythm",
                    "Evening self-care for stress cooling",
                    "Improve hydration consistency",
                ],
            ),
        ],
        Dosha::Kapha => [
            column(
                "Start today (Kapha lightening)",
                &[
                    "Warm water with pinch of dry ginger",
                    "5–10 min brisk stretch",
                    "Choose lighter meals (moong, soups)",
                    "Avoid naps and heavy sweets",
                    "10 min active movement after meals",
                ],
            ),
            column(
                "This week",
                &[
                    "4 days brisk 20–30 min walk",
                    "Wake up 15–20 min earlier",
                    "Reduce refined sugars and dairy",
                    "One decluttering activity",
                ],
            ),
            column(
                "This month",
                &[
                    "Build regular morning activity habit",
                    "Move every 60–90 minutes at work",
                    "Keep meals lighter at night",
                    "Add warming spices",
                ],
            ),
        ],
    }
}

/// Three columns (start today, this week, this month) for the current
/// dominant category. Personality, age, gender and seasonal extras are
/// attached to the "This week" column.
pub fn priority_actions(
    vikriti: &ScoreDistribution,
    psych: &PsychometricProfile,
    context: &PatientContext,
) -> Vec<PriorityAction> {
    let mut columns = base_columns(vikriti.dominant());

    let mut extras = Vec::new();
    if psych.emotionality >= ANXIETY_EMOTIONALITY_PCT {
        extras.push("Short calming breath (2–5 min) twice daily.");
    }
    if context.age_group == AgeGroup::OlderAdult {
        extras.push("Prefer gentler movement and warm, easy-to-digest food.");
    }
    if context.gender == Gender::Female {
        extras.push("Include iron-friendly warm foods and rest during cycle if needed.");
    }
    extras.push(context.ritu.tip());

    columns[1].note = Some(extras.join(" "));
    columns.into()
}

fn current_state_phrase(current: Dosha) -> &'static str {
    match current {
        Dosha::Kapha => "slow & heavy",
        Dosha::Vata => "scattered & anxious",
        Dosha::Pitta => "hot & impatient",
    }
}

/// The transformation plan: hero line, 90-day plan, habit stack, tips,
/// one-page checklist and the doctor's note. An empty name becomes "You".
pub fn care_plan(
    patient_name: &str,
    prakriti: &ScoreDistribution,
    vikriti: &ScoreDistribution,
) -> CarePlan {
    let name = match patient_name.trim() {
        "" => "You",
        name => name,
    };
    let hero = format!(
        "{name} — you have {}-style strengths: creativity, quick thinking, and unique energy. Right now you may feel {}.",
        prakriti.dominant(),
        current_state_phrase(vikriti.dominant()),
    );

    let plan = [
        "90-day transformation plan (small actions -> identity change):",
        "Day 1: Identity pledge — write one line: 'I am someone who finishes what they start with calm focus.'",
        "Days 1–21: Core daily ritual — warm water, 5–10 min oil rub or warm stretch, two focused 60–90 min blocks.",
        "Weeks 4–12: Publish one small project every 2–3 weeks and get feedback.",
        "Accountability: pick a peer for weekly 2-min check-ins over 12 weeks.",
        "Measure: morning energy 1–5 and sleep time daily; review at day 14, 45, 90.",
    ]
    .join("\n");

    let habit_stack = [
        "Life-changing habit stack (15–25 min total):",
        "A) Warm water + 2 min breathing (inhale 4s / exhale 6s).",
        "B) 5–10 min oil massage or 10 min stretching.",
        "C) One 60–90 min focused work block (timer on).",
        "D) Evening reflection: list 2 wins and 1 tomorrow task.",
    ]
    .join("\n");

    let wow_tips = [
        "- Reduce decision fatigue: limit morning choices to 3 (clothes/breakfast).",
        "- Ship every week: a tiny deliverable that builds momentum.",
        "- Use '2-minute accountability' with a friend; micro-commitments scale.",
        "- Reassess and tweak after 14 days — small changes compound.",
    ]
    .join("\n");

    let checklist = [
        "ONE-PAGE ACTION CHECKLIST",
        "- Morning: warm water + 2 min breathing + 5–10 min oil rub/stretch",
        "- Work: 2 focused blocks (60–90 min each). Timer ON.",
        "- Movement: 25–35 min daily walk / yoga.",
        "- Evening: light dinner by 8 pm; reflect on 2 wins.",
        "- Weekly: share a small project and plan next week (20 min).",
        "- Accountability: weekly check-in with chosen peer for 12 weeks.",
    ]
    .join("\n");

    CarePlan {
        hero,
        plan,
        habit_stack,
        wow_tips,
        checklist,
        doctor_note: "Doctor's note: Begin the 'Start today' actions now. Small consistent changes matter more than rare big efforts. We will review progress at 2 weeks and refine the plan.".to_string(),
    }
}
