#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;

use super::views;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::parse_number;
use crate::domain::models::Action;
use crate::domain::models::Coordinate;
use crate::domain::models::Event;
use crate::domain::models::GeolocatorBox;
use crate::domain::models::GeolocatorName;
use crate::domain::models::LocationError;
use crate::domain::models::Panel;
use crate::domain::models::Reply;
use crate::domain::models::Section;
use crate::infrastructure::api::SafetyApi;
use crate::infrastructure::geolocators::GeolocatorManager;

const DEFAULT_USER_NAME: &str = "User";
const DEFAULT_CHECKIN_STATUS: &str = "Safe";
const DEFAULT_HISTORY_LIMIT: u32 = 10;
const QUICK_SOS_MESSAGE: &str = "EMERGENCY ALERT";
const DEFAULT_MAP_RADIUS_KM: f64 = 2.0;

pub fn help_text() -> String {
    let text = r#"
SECTIONS:
- /go (/g) [toxicity,emotion,safety,sos] - Switches to a section. Tab and Shift+Tab cycle through them.

Text entered without a command runs the main action of the active section.

TOXICITY:
- /toxicity (/t, /tox) [TEXT] - Scores a single message for toxicity.
- /conversation (/conv) [MESSAGES] - Scores a conversation. One message per line, at least two. Alt+Enter inserts a new line.

EMOTION:
- /emotion (/e, /emo) [TEXT] - Detects emotions and mental health risk in a message.
- /emotions (/emoconv) [MESSAGES] - Analyzes the emotions of a conversation, one message per line.

SAFETY:
- /locate (/l, /loc) - Gets your current position from the configured geolocator.
- /score (/s) [LAT LNG?] - Safety score for a position. Without arguments the last located position is used.
- /route (/r) [START_LAT START_LNG END_LAT END_LNG] - Safety of the route between two positions.
- /map (/m) [LAT LNG RADIUS?] - Generates a safety heatmap around a position. Radius is in km and defaults to 2.

SOS:
- /sos [MESSAGE?] - Sends an SOS alert with your position to all emergency contacts.
- /quicksos (/qs) - Sends an EMERGENCY ALERT after confirmation.
- /share - Shares your current position with your contacts.
- /checkin (/ci) [STATUS?] - Sends a check-in. Defaults to "Safe".
- /name (/n) [NAME] - Sets the name used for SOS, shares and check-ins.
- /contact add (/c add) [PHONE] [NAME?] - Adds an emergency contact.
- /contact remove (/c rm) [PHONE,INDEX] - Removes an emergency contact after confirmation.
- /contacts - Reloads the emergency contact list.
- /history [LIMIT?] - Lists recently sent SOS alerts.

GENERAL:
- /status - Checks every backend module.
- /help (/h) - Provides this help menu.
- /quit /exit (/q) - Exit SheSafe.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- Tab / Shift+Tab - Next / previous section
- ALT+Enter - New line in the prompt
- CTRL+C - Exit
        "#;

    return text.trim().to_string();
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return default.to_string();
    }

    return trimmed.to_string();
}

/// One message per non-blank line.
fn split_messages(text: &str) -> Vec<String> {
    return text
        .split('\n')
        .map(|line| return line.trim())
        .filter(|line| return !line.is_empty())
        .map(|line| return line.to_string())
        .collect();
}

/// Runs one request behind the loading indicator and publishes the rendered
/// panel. Transport failures are logged and surfaced as `failure_alert`.
async fn request_panel<T, Fut, F>(
    tx: &mpsc::UnboundedSender<Event>,
    section: Section,
    failure_alert: &str,
    request: Fut,
    render: F,
) -> Result<()>
where
    Fut: Future<Output = Result<Reply<T>>>,
    F: FnOnce(&T) -> Panel,
{
    tx.send(Event::Loading(true))?;

    match request.await {
        Ok(reply) => {
            tx.send(Event::Panel(section, views::reply_panel(&reply, render)))?;
        }
        Err(err) => {
            tracing::error!(error = ?err, section = section.to_string(), "Request failed");
            tx.send(Event::Alert(failure_alert.to_string()))?;
        }
    }

    tx.send(Event::Loading(false))?;
    return Ok(());
}

async fn analyze_toxicity(
    api: &SafetyApi,
    tx: &mpsc::UnboundedSender<Event>,
    text: &str,
) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        tx.send(Event::Alert("Please enter text to analyze".to_string()))?;
        return Ok(());
    }

    return request_panel(
        tx,
        Section::Toxicity,
        "Error analyzing text. Please try again.",
        api.analyze_toxicity(text),
        views::toxicity_panel,
    )
    .await;
}

/// Validates conversation input, alerting and returning `None` when it
/// can't be sent.
fn conversation_messages(
    tx: &mpsc::UnboundedSender<Event>,
    text: &str,
) -> Result<Option<Vec<String>>> {
    if text.trim().is_empty() {
        tx.send(Event::Alert("Please enter messages to analyze".to_string()))?;
        return Ok(None);
    }

    let messages = split_messages(text);
    if messages.len() < 2 {
        tx.send(Event::Alert("Please enter at least 2 messages".to_string()))?;
        return Ok(None);
    }

    return Ok(Some(messages));
}

async fn analyze_conversation(
    api: &SafetyApi,
    tx: &mpsc::UnboundedSender<Event>,
    text: &str,
) -> Result<()> {
    let messages = match conversation_messages(tx, text)? {
        Some(messages) => messages,
        None => return Ok(()),
    };

    return request_panel(
        tx,
        Section::Toxicity,
        "Error analyzing conversation. Please try again.",
        api.analyze_conversation(&messages),
        views::conversation_panel,
    )
    .await;
}

async fn analyze_emotion(
    api: &SafetyApi,
    tx: &mpsc::UnboundedSender<Event>,
    text: &str,
) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        tx.send(Event::Alert("Please enter text to analyze".to_string()))?;
        return Ok(());
    }

    return request_panel(
        tx,
        Section::Emotion,
        "Error analyzing emotions. Please try again.",
        api.analyze_emotion(text),
        views::emotion_panel,
    )
    .await;
}

async fn analyze_emotion_conversation(
    api: &SafetyApi,
    tx: &mpsc::UnboundedSender<Event>,
    text: &str,
) -> Result<()> {
    let messages = match conversation_messages(tx, text)? {
        Some(messages) => messages,
        None => return Ok(()),
    };

    return request_panel(
        tx,
        Section::Emotion,
        "Error analyzing emotions. Please try again.",
        api.analyze_emotion_conversation(&messages),
        views::emotion_conversation_panel,
    )
    .await;
}

/// Acquires a fresh fix and publishes it so the UI can replace its cached
/// coordinate.
async fn acquire_location(
    geolocator: &GeolocatorBox,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<Result<Coordinate, LocationError>> {
    let res = geolocator.locate().await;
    match &res {
        Ok(location) => {
            tracing::debug!(geolocator = geolocator.name().to_string(), %location, "Located");
            tx.send(Event::LocationUpdated(*location))?;
        }
        Err(err) => {
            tracing::warn!(geolocator = geolocator.name().to_string(), error = %err, "Location unavailable");
        }
    }

    return Ok(res);
}

async fn get_current_location(
    geolocator: &GeolocatorBox,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    if geolocator.name() == GeolocatorName::None {
        tx.send(Event::Alert(
            "Geolocation is not supported on this system".to_string(),
        ))?;
        return Ok(());
    }

    tx.send(Event::Loading(true))?;
    let alert = match acquire_location(geolocator, tx).await? {
        Ok(_) => "Location obtained successfully!".to_string(),
        Err(LocationError::Unsupported) => {
            "Geolocation is not supported on this system".to_string()
        }
        Err(LocationError::Unavailable(reason)) => format!("Unable to get location: {reason}"),
    };
    tx.send(Event::Loading(false))?;
    tx.send(Event::Alert(alert))?;

    return Ok(());
}

async fn get_safety_score(
    api: &SafetyApi,
    tx: &mpsc::UnboundedSender<Event>,
    latitude: &str,
    longitude: &str,
) -> Result<()> {
    let location = match Coordinate::parse(latitude, longitude) {
        Some(location) => location,
        None => {
            tx.send(Event::Alert(
                "Please enter valid coordinates or use current location".to_string(),
            ))?;
            return Ok(());
        }
    };

    return request_panel(
        tx,
        Section::Safety,
        "Error getting safety score. Please try again.",
        api.safety_score(location),
        views::safety_panel,
    )
    .await;
}

/// A blank radius falls back to the default, anything else must be a
/// positive number.
async fn generate_safety_map(
    api: &SafetyApi,
    tx: &mpsc::UnboundedSender<Event>,
    latitude: &str,
    longitude: &str,
    radius: &str,
) -> Result<()> {
    let center = match Coordinate::parse(latitude, longitude) {
        Some(center) => center,
        None => {
            tx.send(Event::Alert(
                "Please enter valid coordinates or use current location".to_string(),
            ))?;
            return Ok(());
        }
    };

    let radius_km = if radius.trim().is_empty() {
        DEFAULT_MAP_RADIUS_KM
    } else {
        match parse_number(radius) {
            Some(radius_km) if radius_km > 0.0 => radius_km,
            _ => {
                tx.send(Event::Alert(
                    "Please enter a positive radius in kilometers".to_string(),
                ))?;
                return Ok(());
            }
        }
    };

    return request_panel(
        tx,
        Section::Safety,
        "Error generating safety map. Please try again.",
        api.safety_map(center, radius_km),
        views::map_panel,
    )
    .await;
}

async fn find_safe_route(
    api: &SafetyApi,
    tx: &mpsc::UnboundedSender<Event>,
    start: (&str, &str),
    end: (&str, &str),
) -> Result<()> {
    let (start, end) = match (
        Coordinate::parse(start.0, start.1),
        Coordinate::parse(end.0, end.1),
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            tx.send(Event::Alert(
                "Please enter valid coordinates for both locations".to_string(),
            ))?;
            return Ok(());
        }
    };

    return request_panel(
        tx,
        Section::Safety,
        "Error finding route. Please try again.",
        api.safe_route(start, end),
        views::route_panel,
    )
    .await;
}

async fn send_sos_request(
    api: &SafetyApi,
    tx: &mpsc::UnboundedSender<Event>,
    user_name: &str,
    location: Coordinate,
    message: &str,
) -> Result<()> {
    tracing::info!(user_name, %location, "Sending SOS");

    return request_panel(
        tx,
        Section::Sos,
        "Error sending SOS. Please try again.",
        api.send_sos(user_name, location, message),
        views::sos_panel,
    )
    .await;
}

/// Uses the cached coordinate when present, otherwise acquires one. Alerts
/// and returns `None` when no position can be had.
async fn sos_location(
    geolocator: &GeolocatorBox,
    tx: &mpsc::UnboundedSender<Event>,
    cached: Option<Coordinate>,
    unsupported_alert: &str,
) -> Result<Option<Coordinate>> {
    if let Some(location) = cached {
        return Ok(Some(location));
    }

    match acquire_location(geolocator, tx).await? {
        Ok(location) => return Ok(Some(location)),
        Err(LocationError::Unsupported) => {
            tx.send(Event::Alert(unsupported_alert.to_string()))?;
        }
        Err(LocationError::Unavailable(_)) => {
            tx.send(Event::Alert(
                "Location is required for SOS. Please enable location services.".to_string(),
            ))?;
        }
    }

    return Ok(None);
}

async fn send_sos(
    api: &SafetyApi,
    geolocator: &GeolocatorBox,
    tx: &mpsc::UnboundedSender<Event>,
    user_name: &str,
    message: &str,
    cached: Option<Coordinate>,
) -> Result<()> {
    let user_name = or_default(user_name, DEFAULT_USER_NAME);
    let location = sos_location(
        geolocator,
        tx,
        cached,
        "Geolocation is not supported. Cannot send SOS without location.",
    )
    .await?;

    if let Some(location) = location {
        send_sos_request(api, tx, &user_name, location, message.trim()).await?;
    }

    return Ok(());
}

async fn send_quick_sos(
    api: &SafetyApi,
    geolocator: &GeolocatorBox,
    tx: &mpsc::UnboundedSender<Event>,
    user_name: &str,
    cached: Option<Coordinate>,
) -> Result<()> {
    let user_name = or_default(user_name, DEFAULT_USER_NAME);
    let location = sos_location(geolocator, tx, cached, "Geolocation is not supported").await?;

    if let Some(location) = location {
        send_sos_request(api, tx, &user_name, location, QUICK_SOS_MESSAGE).await?;
    }

    return Ok(());
}

async fn share_location(
    api: &SafetyApi,
    geolocator: &GeolocatorBox,
    tx: &mpsc::UnboundedSender<Event>,
    user_name: &str,
) -> Result<()> {
    let user_name = or_default(user_name, DEFAULT_USER_NAME);
    if geolocator.name() == GeolocatorName::None {
        tx.send(Event::Alert("Geolocation is not supported".to_string()))?;
        return Ok(());
    }

    tx.send(Event::Loading(true))?;
    let location = match acquire_location(geolocator, tx).await? {
        Ok(location) => location,
        Err(err) => {
            tx.send(Event::Loading(false))?;
            let alert = match err {
                LocationError::Unsupported => "Geolocation is not supported".to_string(),
                LocationError::Unavailable(reason) => format!("Unable to get location: {reason}"),
            };
            tx.send(Event::Alert(alert))?;
            return Ok(());
        }
    };

    return request_panel(
        tx,
        Section::Sos,
        "Error sharing location. Please try again.",
        api.share_location(&user_name, location),
        views::sos_panel,
    )
    .await;
}

async fn send_checkin(
    api: &SafetyApi,
    tx: &mpsc::UnboundedSender<Event>,
    user_name: &str,
    status: &str,
) -> Result<()> {
    let user_name = or_default(user_name, DEFAULT_USER_NAME);
    let status = or_default(status, DEFAULT_CHECKIN_STATUS);

    return request_panel(
        tx,
        Section::Sos,
        "Error sending check-in. Please try again.",
        api.send_checkin(&user_name, &status),
        views::sos_panel,
    )
    .await;
}

async fn load_contacts(api: &SafetyApi, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    match api.list_contacts().await {
        Ok(Reply::Success(list)) => {
            tracing::debug!(count = list.contacts.len(), "Loaded contacts");
            tx.send(Event::Contacts(list.contacts))?;
        }
        Ok(Reply::Failed(err)) => {
            tracing::error!(error = %err, "Error loading contacts");
        }
        Err(err) => {
            tracing::error!(error = ?err, "Error loading contacts");
        }
    }

    return Ok(());
}

/// Contact updates have no panel, the server message is alerted either way.
fn contact_update_alert<T>(reply: Reply<T>, message: fn(T) -> String) -> String {
    match reply {
        Reply::Success(update) => return message(update),
        Reply::Failed(err) => return err,
    }
}

async fn add_contact(
    api: &SafetyApi,
    tx: &mpsc::UnboundedSender<Event>,
    phone: &str,
    name: &str,
) -> Result<()> {
    let phone = phone.trim();
    if phone.is_empty() {
        tx.send(Event::Alert("Please enter a phone number".to_string()))?;
        return Ok(());
    }

    match api.add_contact(phone, name.trim()).await {
        Ok(reply) => {
            tx.send(Event::Alert(contact_update_alert(reply, |update| {
                return update.message;
            })))?;
            tx.send(Event::ContactAdded())?;
            load_contacts(api, tx).await?;
        }
        Err(err) => {
            tracing::error!(error = ?err, "Error adding contact");
            tx.send(Event::Alert(
                "Error adding contact. Please try again.".to_string(),
            ))?;
        }
    }

    return Ok(());
}

async fn remove_contact(
    api: &SafetyApi,
    tx: &mpsc::UnboundedSender<Event>,
    phone: &str,
) -> Result<()> {
    match api.remove_contact(phone).await {
        Ok(reply) => {
            tx.send(Event::Alert(contact_update_alert(reply, |update| {
                return update.message;
            })))?;
            load_contacts(api, tx).await?;
        }
        Err(err) => {
            tracing::error!(error = ?err, "Error removing contact");
            tx.send(Event::Alert(
                "Error removing contact. Please try again.".to_string(),
            ))?;
        }
    }

    return Ok(());
}

async fn load_sos_history(
    api: &SafetyApi,
    tx: &mpsc::UnboundedSender<Event>,
    limit: &str,
) -> Result<()> {
    let limit = match limit.trim() {
        "" => DEFAULT_HISTORY_LIMIT,
        text => match text.parse::<u32>() {
            Ok(limit) if limit > 0 => limit,
            _ => {
                tx.send(Event::Alert(
                    "Please enter a positive number of alerts to load".to_string(),
                ))?;
                return Ok(());
            }
        },
    };

    return request_panel(
        tx,
        Section::Sos,
        "Error loading SOS history. Please try again.",
        api.sos_history(limit),
        views::history_panel,
    )
    .await;
}

/// Modules are checked one after the other and summarised on `section`.
async fn check_modules(
    api: &SafetyApi,
    tx: &mpsc::UnboundedSender<Event>,
    section: Section,
) -> Result<()> {
    tx.send(Event::Loading(true))?;

    let mut statuses = vec![];
    for module in Section::iter() {
        let module = module.to_string();
        let status = match api.module_status(&module).await {
            Ok(Reply::Success(res)) => {
                tracing::info!(%module, status = %res.status, "Module check");
                Some(res.status)
            }
            Ok(Reply::Failed(err)) => {
                tracing::error!(%module, error = %err, "Module check failed");
                Some(format!("error ({err})"))
            }
            Err(err) => {
                tracing::error!(%module, error = ?err, "Module check failed");
                None
            }
        };
        statuses.push((module, status));
    }

    tx.send(Event::Panel(section, views::modules_panel(&statuses)))?;
    tx.send(Event::Loading(false))?;

    return Ok(());
}

async fn check_system_health(api: &SafetyApi) -> Result<()> {
    match api.health_check().await {
        Ok(health) => tracing::info!(%health, "System health"),
        Err(err) => tracing::error!(error = ?err, "System health check failed"),
    }

    return Ok(());
}

async fn handle(
    api: &SafetyApi,
    geolocator: &GeolocatorBox,
    action: Action,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match action {
        Action::AnalyzeToxicity(text) => return analyze_toxicity(api, tx, &text).await,
        Action::AnalyzeConversation(text) => return analyze_conversation(api, tx, &text).await,
        Action::AnalyzeEmotion(text) => return analyze_emotion(api, tx, &text).await,
        Action::AnalyzeEmotionConversation(text) => {
            return analyze_emotion_conversation(api, tx, &text).await;
        }
        Action::CheckModules(section) => return check_modules(api, tx, section).await,
        Action::CheckSystemHealth() => return check_system_health(api).await,
        Action::GetCurrentLocation() => return get_current_location(geolocator, tx).await,
        Action::GetSafetyScore(latitude, longitude) => {
            return get_safety_score(api, tx, &latitude, &longitude).await;
        }
        Action::GenerateSafetyMap {
            latitude,
            longitude,
            radius,
        } => return generate_safety_map(api, tx, &latitude, &longitude, &radius).await,
        Action::FindSafeRoute {
            start_latitude,
            start_longitude,
            end_latitude,
            end_longitude,
        } => {
            return find_safe_route(
                api,
                tx,
                (&start_latitude, &start_longitude),
                (&end_latitude, &end_longitude),
            )
            .await;
        }
        Action::SendSos {
            user_name,
            message,
            location,
        } => return send_sos(api, geolocator, tx, &user_name, &message, location).await,
        Action::SendQuickSos {
            user_name,
            location,
        } => return send_quick_sos(api, geolocator, tx, &user_name, location).await,
        Action::ShareLocation(user_name) => {
            return share_location(api, geolocator, tx, &user_name).await;
        }
        Action::SendCheckin { user_name, status } => {
            return send_checkin(api, tx, &user_name, &status).await;
        }
        Action::AddContact { phone, name } => return add_contact(api, tx, &phone, &name).await,
        Action::LoadContacts() => return load_contacts(api, tx).await,
        Action::RemoveContact(phone) => return remove_contact(api, tx, &phone).await,
        Action::LoadSosHistory(limit) => return load_sos_history(api, tx, &limit).await,
    }
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let api = Arc::new(SafetyApi::default());
        let geolocator_name = Config::get(ConfigKey::Geolocator);
        let geolocator = Arc::new(GeolocatorManager::get(
            GeolocatorName::parse(&geolocator_name).unwrap_or(GeolocatorName::None),
        )?);

        while let Some(action) = rx.recv().await {
            tracing::debug!(?action, "Action");

            let worker_api = api.clone();
            let worker_geolocator = geolocator.clone();
            let worker_tx = tx.clone();

            // Every action runs on its own task, a slow request never blocks
            // the ones queued behind it.
            tokio::spawn(async move {
                let res = handle(&worker_api, &worker_geolocator, action, &worker_tx).await;
                if let Err(err) = res {
                    tracing::error!(error = ?err, "Action failed");
                }
            });
        }

        return Ok(());
    }
}
