use prakriti_core::config::{Branding, WatermarkConfig, parse_hex_color};
use prakriti_core::models::dosha::{Dosha, ScoreDistribution};
use prakriti_core::models::psychometric::{PersonalityAxis, PsychometricProfile};
use prakriti_core::models::user::Role;

#[test]
fn dominant_picks_highest_category() {
    let dist = ScoreDistribution::new(20.0, 15.0, 65.0);
    assert_eq!(dist.dominant(), Dosha::Kapha);
}

#[test]
fn dominant_ties_go_to_canonical_order() {
    let dist = ScoreDistribution::new(40.0, 40.0, 20.0);
    assert_eq!(dist.dominant(), Dosha::Vata);

    let dist = ScoreDistribution::new(20.0, 40.0, 40.0);
    assert_eq!(dist.dominant(), Dosha::Pitta);
}

#[test]
fn equal_split_is_one_third_each() {
    let dist = ScoreDistribution::equal_split();
    for (_, pct) in dist.iter() {
        assert_eq!(pct, 33.3);
    }
}

#[test]
fn distribution_serializes_with_category_names() {
    let dist = ScoreDistribution::new(70.0, 20.0, 10.0);
    let json = serde_json::to_value(dist).unwrap();
    assert_eq!(json["Vata"], 70.0);
    assert_eq!(json["Pitta"], 20.0);
    assert_eq!(json["Kapha"], 10.0);
}

#[test]
fn strongest_axis() {
    let mut profile = PsychometricProfile::neutral();
    profile.openness = 91.7;
    assert_eq!(profile.strongest(), PersonalityAxis::Openness);
    assert_eq!(PsychometricProfile::neutral().strongest(), PersonalityAxis::Extraversion);
}

#[test]
fn role_parses_case_insensitively() {
    assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
    assert_eq!("clinician".parse::<Role>().unwrap(), Role::Clinician);
    assert!("superuser".parse::<Role>().is_err());
}

#[test]
fn hex_colour_parsing() {
    let (r, g, b) = parse_hex_color("#FF8000").unwrap();
    assert_eq!(r, 1.0);
    assert!((g - 128.0 / 255.0).abs() < 1e-6);
    assert_eq!(b, 0.0);
    assert!(parse_hex_color("#12345").is_err());
    assert!(parse_hex_color("zzzzzz").is_err());
}

#[test]
fn page_label_substitutes_placeholders() {
    let mut wm = WatermarkConfig::default();
    assert_eq!(wm.page_label(2, 5), "Page 2");
    wm.page_number_format = "Page {page} of {total}".to_string();
    assert_eq!(wm.page_label(2, 5), "Page 2 of 5");
}

#[test]
fn contact_line_skips_empty_parts() {
    let branding = Branding {
        clinic_name: "Clinic".to_string(),
        phone: "+91-0000".to_string(),
        ..Branding::default()
    };
    assert_eq!(branding.contact_line(), "Clinic - +91-0000");
}
