use super::Coordinate;
use super::Section;

/// Requests from the UI to the actions worker. Raw field values are passed
/// through untouched, validation happens in the handlers.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    AnalyzeToxicity(String),
    AnalyzeConversation(String),
    AnalyzeEmotion(String),
    AnalyzeEmotionConversation(String),
    CheckModules(Section),
    CheckSystemHealth(),
    GetCurrentLocation(),
    GetSafetyScore(String, String),
    GenerateSafetyMap {
        latitude: String,
        longitude: String,
        radius: String,
    },
    FindSafeRoute {
        start_latitude: String,
        start_longitude: String,
        end_latitude: String,
        end_longitude: String,
    },
    SendSos {
        user_name: String,
        message: String,
        location: Option<Coordinate>,
    },
    SendQuickSos {
        user_name: String,
        location: Option<Coordinate>,
    },
    ShareLocation(String),
    SendCheckin {
        user_name: String,
        status: String,
    },
    AddContact {
        phone: String,
        name: String,
    },
    LoadContacts(),
    RemoveContact(String),
    LoadSosHistory(String),
}
