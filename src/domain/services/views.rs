#[cfg(test)]
#[path = "views_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;
use chrono::NaiveDateTime;

use crate::domain::models::fixed;
use crate::domain::models::percentage;
use crate::domain::models::ContactStatus;
use crate::domain::models::ConversationAnalysis;
use crate::domain::models::EmotionAnalysis;
use crate::domain::models::EmotionConversationAnalysis;
use crate::domain::models::Panel;
use crate::domain::models::Reply;
use crate::domain::models::RouteSafety;
use crate::domain::models::Row;
use crate::domain::models::SafetyMap;
use crate::domain::models::SafetyScore;
use crate::domain::models::ScoreColor;
use crate::domain::models::SosHistory;
use crate::domain::models::SosReceipt;
use crate::domain::models::ToxicityAnalysis;
use crate::domain::models::Tone;

const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Renders a backend timestamp in local time. Naive timestamps are taken as
/// already local. Unparseable values are shown as they came.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string();
    }

    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(TIMESTAMP_FORMAT).to_string();
    }

    return raw.to_string();
}

fn score_label(key: &str) -> String {
    return key.replace('_', " ").to_uppercase();
}

fn field(label: &str, value: String) -> Row {
    return Row::Field {
        label: label.to_string(),
        value,
    };
}

/// Collapses a reply into a panel, showing only the error for failures.
pub fn reply_panel<T, F: FnOnce(&T) -> Panel>(reply: &Reply<T>, render: F) -> Panel {
    match reply {
        Reply::Success(data) => return render(data),
        Reply::Failed(message) => return Panel::error(message),
    }
}

pub fn toxicity_panel(data: &ToxicityAnalysis) -> Panel {
    let mut rows = vec![
        Row::Badge {
            text: format!("{} RISK", data.risk_level),
            tone: Tone::from_risk_level(&data.risk_level),
        },
        field(
            "Is Toxic",
            if data.is_toxic { "Yes ⚠️" } else { "No ✅" }.to_string(),
        ),
        field("Maximum Score", percentage(data.max_score)),
        Row::Heading("Detailed Scores:".to_string()),
    ];

    for (key, value) in data.scores.iter() {
        rows.push(Row::Score {
            label: score_label(key),
            value: *value,
            bar: Some(ScoreColor::from_toxicity(*value)),
        });
    }

    return Panel::new(rows);
}

pub fn conversation_panel(data: &ConversationAnalysis) -> Panel {
    let mut rows = vec![
        Row::Badge {
            text: format!("{} RISK", data.overall_risk_level),
            tone: Tone::from_risk_level(&data.overall_risk_level),
        },
        field("Total Messages", data.message_count.to_string()),
        field(
            "Toxic Messages",
            format!(
                "{} ({}%)",
                data.toxic_message_count,
                fixed(data.toxicity_percentage, 1)
            ),
        ),
        Row::Heading("Average Scores:".to_string()),
    ];

    for (key, value) in data.average_scores.iter() {
        rows.push(Row::Score {
            label: score_label(key),
            value: *value,
            bar: None,
        });
    }

    return Panel::new(rows);
}

pub fn emotion_panel(data: &EmotionAnalysis) -> Panel {
    let mut rows = vec![
        Row::Badge {
            text: format!("Mental Health Risk: {}", data.mental_health_risk.level),
            tone: Tone::from_risk_level(&data.mental_health_risk.level),
        },
        field(
            "Dominant Emotion",
            format!(
                "{} ({})",
                data.dominant_emotion.name.to_uppercase(),
                percentage(data.dominant_emotion.score)
            ),
        ),
        field(
            "Sentiment",
            format!(
                "{} ({})",
                data.sentiment.label,
                percentage(data.sentiment.score)
            ),
        ),
    ];

    if data.needs_support {
        rows.push(Row::Warning("⚠️ Support may be needed".to_string()));
    }

    rows.push(Row::Heading("Emotion Breakdown:".to_string()));
    for (emotion, score) in data.emotions.iter() {
        rows.push(Row::Score {
            label: emotion.to_uppercase(),
            value: *score,
            bar: Some(ScoreColor::from_emotion(emotion, *score)),
        });
    }

    return Panel::new(rows);
}

pub fn emotion_conversation_panel(data: &EmotionConversationAnalysis) -> Panel {
    let mut rows = vec![
        Row::Badge {
            text: format!("Mental Health Risk: {}", data.overall_mental_health_risk),
            tone: Tone::from_risk_level(&data.overall_mental_health_risk),
        },
        field("Total Messages", data.message_count.to_string()),
        field(
            "High Risk Messages",
            data.high_risk_message_count.to_string(),
        ),
        Row::Heading("Average Emotions:".to_string()),
    ];

    for (emotion, score) in data.average_emotions.iter() {
        rows.push(Row::Score {
            label: emotion.to_uppercase(),
            value: *score,
            bar: Some(ScoreColor::from_emotion(emotion, *score)),
        });
    }

    if !data.emotional_patterns.is_empty() {
        rows.push(Row::Heading("Patterns:".to_string()));
        for pattern in data.emotional_patterns.iter() {
            rows.push(Row::Bullet(pattern.replace('_', " ")));
        }
    }

    if !data.recommendation.trim().is_empty() {
        rows.push(Row::Text(data.recommendation.to_string()));
    }

    return Panel::new(rows);
}

pub fn safety_panel(data: &SafetyScore) -> Panel {
    let mut rows = vec![
        Row::Badge {
            text: data.safety_level.to_string(),
            tone: Tone::from_safety_level(&data.safety_level),
        },
        field("Location", data.location_name.to_string()),
        field("Safety Score", format!("{}/100", data.safety_score)),
        field("Crime Risk", percentage(data.crime_risk)),
        field("Time Risk Factor", format!("{}x", fixed(data.time_risk_factor, 2))),
    ];

    if !data.nearby_incidents.is_empty() {
        rows.push(Row::Heading("Nearby Incidents:".to_string()));
        for incident in data.nearby_incidents.iter() {
            rows.push(Row::Bullet(format!(
                "{} ({}) - {} km away",
                incident.kind, incident.severity, incident.distance_km
            )));
        }
    }

    rows.push(Row::Heading("Recommendations:".to_string()));
    for recommendation in data.recommendations.iter() {
        rows.push(Row::Bullet(recommendation.to_string()));
    }

    return Panel::new(rows);
}

pub fn map_panel(data: &SafetyMap) -> Panel {
    return Panel::new(vec![
        Row::Success("✅ Safety map generated".to_string()),
        field("Center", data.center.to_string()),
        field("Radius", format!("{} km", data.radius_km)),
        field("Map File", data.map_file.to_string()),
    ]);
}

pub fn route_panel(data: &RouteSafety) -> Panel {
    let mut rows = vec![
        Row::Badge {
            text: data.overall_route_safety.to_string(),
            tone: Tone::from_safety_level(&data.overall_route_safety),
        },
        field("Distance", format!("{} km", data.distance_km)),
        field(
            "Average Safety Score",
            format!("{}/100", data.average_safety_score),
        ),
        field(
            "Minimum Safety Score",
            format!("{}/100", data.minimum_safety_score),
        ),
    ];

    if data.warnings.is_empty() {
        rows.push(Row::Success(
            "✅ No significant safety concerns detected along this route".to_string(),
        ));
    } else {
        rows.push(Row::Heading("⚠️ Warnings:".to_string()));
        for warning in data.warnings.iter() {
            rows.push(Row::Bullet(warning.to_string()));
        }
    }

    return Panel::new(rows);
}

fn contact_rows(contacts: &[ContactStatus]) -> Vec<Row> {
    let mut rows = vec![Row::Heading("Contacts Alerted:".to_string())];
    for contact in contacts {
        rows.push(Row::Bullet(format!(
            "{}: {}",
            contact.contact, contact.status
        )));
    }

    return rows;
}

/// Shared by SOS alerts, location shares and check-ins.
pub fn sos_panel(data: &SosReceipt) -> Panel {
    let mut rows = vec![Row::Success(format!("✅ {}", data.message))];

    if let Some(link) = &data.location_link {
        if !link.is_empty() {
            rows.push(Row::Link {
                label: "Location".to_string(),
                text: "View on Map".to_string(),
                url: link.to_string(),
            });
        }
    }

    if let Some(timestamp) = &data.timestamp {
        if !timestamp.is_empty() {
            rows.push(field("Time", format_timestamp(timestamp)));
        }
    }

    if let Some(contacts) = &data.contacts_alerted {
        rows.extend(contact_rows(contacts));
    }

    return Panel::new(rows);
}

pub fn history_panel(data: &SosHistory) -> Panel {
    if data.history.is_empty() {
        return Panel::new(vec![Row::Text("No SOS alerts sent yet".to_string())]);
    }

    let mut rows = vec![Row::Heading("SOS History:".to_string())];
    for event in data.history.iter() {
        rows.push(Row::Bullet(format!(
            "{} - {}: {} ({} contacts)",
            format_timestamp(&event.timestamp),
            event.user_name,
            event.message,
            event.contacts_alerted
        )));
    }

    return Panel::new(rows);
}

/// `None` marks a module that could not be reached.
pub fn modules_panel(statuses: &[(String, Option<String>)]) -> Panel {
    let mut rows = vec![Row::Heading("Module Status:".to_string())];
    for (module, status) in statuses {
        let status = status.as_deref().unwrap_or("unreachable");
        rows.push(Row::Text(format!("{module}: {status}")));
    }

    return Panel::new(rows);
}
