use serde_json::json;
use serde_json::Value;

pub fn toxicity_fixture() -> Value {
    return json!({
        "risk_level": "HIGH",
        "is_toxic": true,
        "max_score": 0.82,
        "scores": {
            "insult": 0.82,
            "identity_attack": 0.45,
            "threat": 0.05
        }
    });
}

pub fn conversation_fixture() -> Value {
    return json!({
        "overall_risk_level": "MEDIUM",
        "message_count": 3,
        "toxic_message_count": 1,
        "toxicity_percentage": 33.333,
        "average_scores": {
            "toxicity": 0.31,
            "severe_toxicity": 0.02
        }
    });
}

pub fn emotion_fixture() -> Value {
    return json!({
        "emotions": {
            "sadness": 0.71,
            "joy": 0.05,
            "fear": 0.12
        },
        "dominant_emotion": { "name": "sadness", "score": 0.71 },
        "sentiment": { "label": "NEGATIVE", "score": 0.93 },
        "mental_health_risk": { "level": "HIGH", "distress_score": 0.83 },
        "needs_support": true,
        "text_analyzed": "I feel so alone lately"
    });
}

pub fn emotion_conversation_fixture() -> Value {
    return json!({
        "message_count": 2,
        "high_risk_message_count": 1,
        "average_emotions": { "sadness": 0.55, "joy": 0.2 },
        "emotional_patterns": ["Persistent sadness detected"],
        "overall_mental_health_risk": "MEDIUM",
        "recommendation": "Consider reaching out to someone you trust."
    });
}

pub fn safety_fixture() -> Value {
    return json!({
        "latitude": 28.6139,
        "longitude": 77.209,
        "location_name": "Connaught Place, New Delhi",
        "safety_score": 62.5,
        "safety_level": "MODERATE",
        "crime_risk": 0.25,
        "time_risk_factor": 1.2,
        "nearby_incidents": [
            { "type": "theft", "severity": "medium", "distance_km": 0.42 }
        ],
        "recommendations": [
            "Stay in well-lit areas",
            "Share your location with a trusted contact"
        ]
    });
}

pub fn route_fixture() -> Value {
    return json!({
        "start": { "latitude": 28.61, "longitude": 77.2 },
        "end": { "latitude": 28.63, "longitude": 77.22 },
        "distance_km": 2.87,
        "waypoints": [],
        "average_safety_score": 71.4,
        "minimum_safety_score": 48,
        "overall_route_safety": "CAUTION",
        "warnings": ["Waypoint 3 passes near a reported incident"]
    });
}

pub fn map_fixture() -> Value {
    return json!({
        "map_file": "safety_map.html",
        "center": { "latitude": 28.6139, "longitude": 77.209 },
        "radius_km": 2
    });
}

pub fn sos_fixture() -> Value {
    return json!({
        "status": "success",
        "message": "SOS alert sent to 2 contacts",
        "timestamp": "2024-03-05T21:07:09.123456",
        "location_link": "https://www.google.com/maps?q=28.6139,77.209",
        "contacts_alerted": [
            { "contact": "+15551234567", "status": "simulated" },
            { "contact": "+15557654321", "status": "sent", "message_sid": "SM1" }
        ]
    });
}
