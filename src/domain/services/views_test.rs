use anyhow::Result;
use serde_json::json;
use test_utils::conversation_fixture;
use test_utils::emotion_conversation_fixture;
use test_utils::emotion_fixture;
use test_utils::map_fixture;
use test_utils::route_fixture;
use test_utils::safety_fixture;
use test_utils::sos_fixture;
use test_utils::toxicity_fixture;

use super::*;
use crate::domain::models::SosEvent;

#[test]
fn it_renders_toxicity() -> Result<()> {
    let data = serde_json::from_value::<ToxicityAnalysis>(toxicity_fixture())?;
    insta::assert_snapshot!(toxicity_panel(&data).to_text(), @r###"
    [ HIGH RISK ]
    Is Toxic: Yes ⚠️
    Maximum Score: 82.0%
    Detailed Scores:
    IDENTITY ATTACK: 45.0%
    INSULT: 82.0%
    THREAT: 5.0%
    "###);

    return Ok(());
}

#[test]
fn it_renders_minimal_toxicity() -> Result<()> {
    let data = serde_json::from_value::<ToxicityAnalysis>(json!({
        "risk_level": "HIGH",
        "is_toxic": true,
        "max_score": 0.82,
        "scores": { "insult": 0.82 }
    }))?;
    let panel = toxicity_panel(&data);

    assert_eq!(
        panel.rows[0],
        Row::Badge {
            text: "HIGH RISK".to_string(),
            tone: Tone::High
        }
    );
    assert!(panel.to_text().contains("Is Toxic: Yes ⚠️"));
    assert!(panel.to_text().contains("Maximum Score: 82.0%"));
    assert_eq!(
        panel.rows.last(),
        Some(&Row::Score {
            label: "INSULT".to_string(),
            value: 0.82,
            bar: Some(ScoreColor::Red)
        })
    );

    return Ok(());
}

#[test]
fn it_renders_non_toxic_text() -> Result<()> {
    let data = serde_json::from_value::<ToxicityAnalysis>(json!({
        "risk_level": "LOW",
        "is_toxic": false,
        "max_score": 0.01,
        "scores": {}
    }))?;

    assert!(toxicity_panel(&data).to_text().contains("Is Toxic: No ✅"));
    return Ok(());
}

#[test]
fn it_renders_only_the_error_for_failed_replies() {
    let reply: Reply<ToxicityAnalysis> = Reply::Failed("bad input".to_string());
    let panel = reply_panel(&reply, toxicity_panel);

    assert_eq!(panel.to_text(), "Error: bad input");
}

#[test]
fn it_renders_conversations() -> Result<()> {
    let data = serde_json::from_value::<ConversationAnalysis>(conversation_fixture())?;
    insta::assert_snapshot!(conversation_panel(&data).to_text(), @r###"
    [ MEDIUM RISK ]
    Total Messages: 3
    Toxic Messages: 1 (33.3%)
    Average Scores:
    SEVERE TOXICITY: 2.0%
    TOXICITY: 31.0%
    "###);

    return Ok(());
}

#[test]
fn it_rounds_half_percentages_up() -> Result<()> {
    let mut fixture = conversation_fixture();
    fixture["message_count"] = json!(16);
    fixture["toxicity_percentage"] = json!(6.25);
    let data = serde_json::from_value::<ConversationAnalysis>(fixture)?;

    let text = conversation_panel(&data).to_text();
    assert!(text.contains("Toxic Messages: 1 (6.3%)"), "{text}");
    return Ok(());
}

#[test]
fn it_renders_emotions() -> Result<()> {
    let data = serde_json::from_value::<EmotionAnalysis>(emotion_fixture())?;
    let panel = emotion_panel(&data);

    insta::assert_snapshot!(panel.to_text(), @r###"
    [ Mental Health Risk: HIGH ]
    Dominant Emotion: SADNESS (71.0%)
    Sentiment: NEGATIVE (93.0%)
    ⚠️ Support may be needed
    Emotion Breakdown:
    FEAR: 12.0%
    JOY: 5.0%
    SADNESS: 71.0%
    "###);

    assert_eq!(
        panel.rows.last(),
        Some(&Row::Score {
            label: "SADNESS".to_string(),
            value: 0.71,
            bar: Some(ScoreColor::Red)
        })
    );

    return Ok(());
}

#[test]
fn it_omits_support_warning_when_not_needed() -> Result<()> {
    let mut fixture = emotion_fixture();
    fixture["needs_support"] = json!(false);
    let data = serde_json::from_value::<EmotionAnalysis>(fixture)?;

    assert!(!emotion_panel(&data).to_text().contains("Support may be needed"));
    return Ok(());
}

#[test]
fn it_renders_emotion_conversations() -> Result<()> {
    let data =
        serde_json::from_value::<EmotionConversationAnalysis>(emotion_conversation_fixture())?;
    insta::assert_snapshot!(emotion_conversation_panel(&data).to_text(), @r###"
    [ Mental Health Risk: MEDIUM ]
    Total Messages: 2
    High Risk Messages: 1
    Average Emotions:
    JOY: 20.0%
    SADNESS: 55.0%
    Patterns:
    - Persistent sadness detected
    Consider reaching out to someone you trust.
    "###);

    return Ok(());
}

#[test]
fn it_renders_safety_scores() -> Result<()> {
    let data = serde_json::from_value::<SafetyScore>(safety_fixture())?;
    insta::assert_snapshot!(safety_panel(&data).to_text(), @r###"
    [ MODERATE ]
    Location: Connaught Place, New Delhi
    Safety Score: 62.5/100
    Crime Risk: 25.0%
    Time Risk Factor: 1.20x
    Nearby Incidents:
    - theft (medium) - 0.42 km away
    Recommendations:
    - Stay in well-lit areas
    - Share your location with a trusted contact
    "###);

    return Ok(());
}

#[test]
fn it_skips_incidents_heading_without_incidents() -> Result<()> {
    let mut fixture = safety_fixture();
    fixture["nearby_incidents"] = json!([]);
    let data = serde_json::from_value::<SafetyScore>(fixture)?;

    assert!(!safety_panel(&data).to_text().contains("Nearby Incidents:"));
    return Ok(());
}

#[test]
fn it_renders_safety_maps() -> Result<()> {
    let data = serde_json::from_value::<SafetyMap>(map_fixture())?;
    insta::assert_snapshot!(map_panel(&data).to_text(), @r###"
    ✅ Safety map generated
    Center: 28.6139, 77.209
    Radius: 2 km
    Map File: safety_map.html
    "###);

    return Ok(());
}

#[test]
fn it_renders_routes_with_warnings() -> Result<()> {
    let data = serde_json::from_value::<RouteSafety>(route_fixture())?;
    insta::assert_snapshot!(route_panel(&data).to_text(), @r###"
    [ CAUTION ]
    Distance: 2.87 km
    Average Safety Score: 71.4/100
    Minimum Safety Score: 48/100
    ⚠️ Warnings:
    - Waypoint 3 passes near a reported incident
    "###);

    return Ok(());
}

#[test]
fn it_renders_routes_without_warnings() -> Result<()> {
    let mut fixture = route_fixture();
    fixture["warnings"] = json!([]);
    let data = serde_json::from_value::<RouteSafety>(fixture)?;

    let text = route_panel(&data).to_text();
    assert!(text.ends_with("✅ No significant safety concerns detected along this route"));
    assert!(!text.contains("Warnings:"));

    return Ok(());
}

#[test]
fn it_renders_sos_receipts() -> Result<()> {
    let data = serde_json::from_value::<SosReceipt>(sos_fixture())?;
    insta::assert_snapshot!(sos_panel(&data).to_text(), @r###"
    ✅ SOS alert sent to 2 contacts
    Location: View on Map (https://www.google.com/maps?q=28.6139,77.209)
    Time: 3/5/2024, 9:07:09 PM
    Contacts Alerted:
    - +15551234567: simulated
    - +15557654321: sent
    "###);

    return Ok(());
}

#[test]
fn it_renders_checkin_receipts() -> Result<()> {
    let data = serde_json::from_value::<SosReceipt>(json!({
        "status": "success",
        "message": "Check-in sent to 1 contacts"
    }))?;

    assert_eq!(
        sos_panel(&data).to_text(),
        "✅ Check-in sent to 1 contacts"
    );
    return Ok(());
}

#[test]
fn it_falls_back_to_raw_timestamps() {
    assert_eq!(format_timestamp("yesterday"), "yesterday");
    assert_eq!(format_timestamp("2024-12-25T08:00:00"), "12/25/2024, 8:00:00 AM");
}

#[test]
fn it_renders_history() {
    let history = SosHistory {
        history: vec![SosEvent {
            timestamp: "2024-03-05T21:07:09".to_string(),
            user_name: "Asha".to_string(),
            message: "Emergency! I need help!".to_string(),
            contacts_alerted: 2,
        }],
    };

    insta::assert_snapshot!(history_panel(&history).to_text(), @r###"
    SOS History:
    - 3/5/2024, 9:07:09 PM - Asha: Emergency! I need help! (2 contacts)
    "###);
}

#[test]
fn it_renders_empty_history() {
    let history = SosHistory { history: vec![] };
    assert_eq!(history_panel(&history).to_text(), "No SOS alerts sent yet");
}

#[test]
fn it_renders_module_statuses() {
    let panel = modules_panel(&[
        ("toxicity".to_string(), Some("operational".to_string())),
        ("sos".to_string(), None),
    ]);

    insta::assert_snapshot!(panel.to_text(), @r###"
    Module Status:
    toxicity: operational
    sos: unreachable
    "###);
}
