use super::fixed;
use super::percentage;
use super::Panel;
use super::Row;
use super::ScoreColor;
use super::Tone;

#[test]
fn it_formats_percentages() {
    assert_eq!(percentage(0.82), "82.0%");
    assert_eq!(percentage(0.0), "0.0%");
    assert_eq!(percentage(1.0), "100.0%");
}

#[test]
fn it_rounds_halves_away_from_zero() {
    assert_eq!(percentage(0.0625), "6.3%");
    assert_eq!(fixed(6.25, 1), "6.3");
    assert_eq!(fixed(1.125, 2), "1.13");
    assert_eq!(fixed(1.2, 2), "1.20");
}

#[test]
fn it_maps_risk_levels_to_tones() {
    assert_eq!(Tone::from_risk_level("HIGH"), Tone::High);
    assert_eq!(Tone::from_risk_level("low"), Tone::Low);
    assert_eq!(Tone::from_risk_level("CRITICAL"), Tone::Critical);
    assert_eq!(Tone::from_risk_level("UNKNOWN"), Tone::Neutral);
}

#[test]
fn it_maps_safety_levels_to_tones() {
    assert_eq!(Tone::from_safety_level("SAFE"), Tone::Low);
    assert_eq!(Tone::from_safety_level("MODERATE"), Tone::Medium);
    assert_eq!(Tone::from_safety_level("CAUTION"), Tone::High);
    assert_eq!(Tone::from_safety_level("UNSAFE"), Tone::Critical);
    assert_eq!(Tone::from_safety_level(""), Tone::Critical);
}

#[test]
fn it_colours_toxicity_scores() {
    assert_eq!(ScoreColor::from_toxicity(0.71), ScoreColor::Red);
    assert_eq!(ScoreColor::from_toxicity(0.7), ScoreColor::Orange);
    assert_eq!(ScoreColor::from_toxicity(0.41), ScoreColor::Orange);
    assert_eq!(ScoreColor::from_toxicity(0.4), ScoreColor::Green);
}

#[test]
fn it_colours_emotion_scores() {
    assert_eq!(ScoreColor::from_emotion("sadness", 0.61), ScoreColor::Red);
    assert_eq!(ScoreColor::from_emotion("anger", 0.9), ScoreColor::Red);
    assert_eq!(ScoreColor::from_emotion("fear", 0.6), ScoreColor::Green);
    assert_eq!(ScoreColor::from_emotion("joy", 0.99), ScoreColor::Green);
}

#[test]
fn it_renders_error_panels_as_a_single_line() {
    let panel = Panel::error("bad input");
    assert_eq!(panel.to_text(), "Error: bad input");
    assert_eq!(panel.as_lines().len(), 1);
}

#[test]
fn it_spaces_headings_when_rendering_lines() {
    let panel = Panel::new(vec![
        Row::Field {
            label: "Distance".to_string(),
            value: "2.5 km".to_string(),
        },
        Row::Heading("Recommendations:".to_string()),
        Row::Bullet("Stay alert".to_string()),
    ]);

    assert_eq!(panel.as_lines().len(), 4);
    insta::assert_snapshot!(panel.to_text(), @r###"
    Distance: 2.5 km
    Recommendations:
    - Stay alert
    "###);
}
