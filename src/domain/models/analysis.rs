use std::collections::BTreeMap;

use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToxicityAnalysis {
    pub risk_level: String,
    pub is_toxic: bool,
    pub max_score: f64,
    pub scores: BTreeMap<String, f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationAnalysis {
    pub overall_risk_level: String,
    pub message_count: u64,
    pub toxic_message_count: u64,
    pub toxicity_percentage: f64,
    pub average_scores: BTreeMap<String, f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MentalHealthRisk {
    pub level: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DominantEmotion {
    pub name: String,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: String,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    pub mental_health_risk: MentalHealthRisk,
    pub dominant_emotion: DominantEmotion,
    pub sentiment: Sentiment,
    #[serde(default)]
    pub needs_support: bool,
    pub emotions: BTreeMap<String, f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmotionConversationAnalysis {
    pub message_count: u64,
    pub high_risk_message_count: u64,
    pub average_emotions: BTreeMap<String, f64>,
    #[serde(default)]
    pub emotional_patterns: Vec<String>,
    pub overall_mental_health_risk: String,
    #[serde(default)]
    pub recommendation: String,
}
