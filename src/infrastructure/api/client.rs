#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ContactList;
use crate::domain::models::ContactUpdate;
use crate::domain::models::ConversationAnalysis;
use crate::domain::models::Coordinate;
use crate::domain::models::EmotionAnalysis;
use crate::domain::models::EmotionConversationAnalysis;
use crate::domain::models::ModuleStatus;
use crate::domain::models::Reply;
use crate::domain::models::RouteSafety;
use crate::domain::models::SafetyMap;
use crate::domain::models::SafetyScore;
use crate::domain::models::SosHistory;
use crate::domain::models::SosReceipt;
use crate::domain::models::ToxicityAnalysis;

/// Same character set browsers leave alone in `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_path_segment(segment: &str) -> String {
    return utf8_percent_encode(segment, URI_COMPONENT).to_string();
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Response from {path} is not valid JSON: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Response from {path} does not match the expected schema: {source}")]
    Schema {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct MessagesRequest<'a> {
    messages: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct LocationRequest {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct MapRequest {
    latitude: f64,
    longitude: f64,
    radius_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct RouteRequest {
    start_latitude: f64,
    start_longitude: f64,
    end_latitude: f64,
    end_longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct SosRequest<'a> {
    user_name: &'a str,
    latitude: f64,
    longitude: f64,
    message: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct ShareLocationRequest<'a> {
    user_name: &'a str,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct CheckinRequest<'a> {
    user_name: &'a str,
    status: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct ContactRequest<'a> {
    phone_number: &'a str,
    name: &'a str,
}

/// Blank, null and `false` error fields don't count as failures.
fn error_message(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => return None,
        Value::String(message) if message.is_empty() => return None,
        Value::String(message) => return Some(message.to_string()),
        other => return Some(other.to_string()),
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<Reply<T>, ApiError> {
    let value: Value = serde_json::from_str(body).map_err(|source| {
        return ApiError::Decode {
            path: path.to_string(),
            source,
        };
    })?;

    if let Some(message) = error_message(&value) {
        return Ok(Reply::Failed(message));
    }

    let parsed = serde_json::from_value::<T>(value).map_err(|source| {
        return ApiError::Schema {
            path: path.to_string(),
            source,
        };
    })?;

    return Ok(Reply::Success(parsed));
}

/// Typed client for the SheSafe REST API.
pub struct SafetyApi {
    url: String,
    timeout: String,
    client: reqwest::Client,
}

impl Default for SafetyApi {
    fn default() -> SafetyApi {
        return SafetyApi {
            url: Config::get(ConfigKey::ApiURL),
            timeout: Config::get(ConfigKey::HealthCheckTimeout),
            client: reqwest::Client::new(),
        };
    }
}

impl SafetyApi {
    pub fn new(url: &str, timeout: &str) -> SafetyApi {
        return SafetyApi {
            url: url.trim_end_matches('/').to_string(),
            timeout: timeout.to_string(),
            client: reqwest::Client::new(),
        };
    }

    fn endpoint(&self, path: &str) -> String {
        return format!("{url}{path}", url = self.url.trim_end_matches('/'));
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, req: RequestBuilder) -> Result<Reply<T>> {
        let transport_err = |source: reqwest::Error| {
            return ApiError::Transport {
                path: path.to_string(),
                source,
            };
        };

        let res = req.send().await.map_err(transport_err)?;
        let status = res.status();
        let body = res.text().await.map_err(transport_err)?;

        // The backend reports failures in the body with a 4xx/5xx, so the
        // body is decoded whatever the status.
        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "Non success status");
        }

        let reply = decode::<T>(path, &body)?;
        if let Reply::Failed(ref message) = reply {
            tracing::warn!(path, error = %message, "Backend returned an error");
        }

        return Ok(reply);
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Reply<T>> {
        tracing::debug!(path, "POST");
        let req = self.client.post(self.endpoint(path)).json(body);
        return self.send(path, req).await;
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Reply<T>> {
        tracing::debug!(path, "GET");
        let req = self.client.get(self.endpoint(path));
        return self.send(path, req).await;
    }

    pub async fn analyze_toxicity(&self, text: &str) -> Result<Reply<ToxicityAnalysis>> {
        return self
            .post("/toxicity/analyze", &TextRequest { text })
            .await;
    }

    pub async fn analyze_conversation(
        &self,
        messages: &[String],
    ) -> Result<Reply<ConversationAnalysis>> {
        return self
            .post(
                "/toxicity/analyze-conversation",
                &MessagesRequest { messages },
            )
            .await;
    }

    pub async fn analyze_emotion(&self, text: &str) -> Result<Reply<EmotionAnalysis>> {
        return self.post("/emotion/analyze", &TextRequest { text }).await;
    }

    pub async fn analyze_emotion_conversation(
        &self,
        messages: &[String],
    ) -> Result<Reply<EmotionConversationAnalysis>> {
        return self
            .post(
                "/emotion/analyze-conversation",
                &MessagesRequest { messages },
            )
            .await;
    }

    pub async fn safety_score(&self, location: Coordinate) -> Result<Reply<SafetyScore>> {
        return self
            .post(
                "/safety/score",
                &LocationRequest {
                    latitude: location.latitude,
                    longitude: location.longitude,
                },
            )
            .await;
    }

    pub async fn safety_map(
        &self,
        center: Coordinate,
        radius_km: f64,
    ) -> Result<Reply<SafetyMap>> {
        return self
            .post(
                "/safety/map",
                &MapRequest {
                    latitude: center.latitude,
                    longitude: center.longitude,
                    radius_km,
                },
            )
            .await;
    }

    pub async fn safe_route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Reply<RouteSafety>> {
        return self
            .post(
                "/safety/route",
                &RouteRequest {
                    start_latitude: start.latitude,
                    start_longitude: start.longitude,
                    end_latitude: end.latitude,
                    end_longitude: end.longitude,
                },
            )
            .await;
    }

    pub async fn send_sos(
        &self,
        user_name: &str,
        location: Coordinate,
        message: &str,
    ) -> Result<Reply<SosReceipt>> {
        return self
            .post(
                "/sos/alert",
                &SosRequest {
                    user_name,
                    latitude: location.latitude,
                    longitude: location.longitude,
                    message,
                },
            )
            .await;
    }

    pub async fn share_location(
        &self,
        user_name: &str,
        location: Coordinate,
    ) -> Result<Reply<SosReceipt>> {
        return self
            .post(
                "/sos/share-location",
                &ShareLocationRequest {
                    user_name,
                    latitude: location.latitude,
                    longitude: location.longitude,
                },
            )
            .await;
    }

    pub async fn send_checkin(&self, user_name: &str, status: &str) -> Result<Reply<SosReceipt>> {
        return self
            .post("/sos/checkin", &CheckinRequest { user_name, status })
            .await;
    }

    pub async fn sos_history(&self, limit: u32) -> Result<Reply<SosHistory>> {
        return self.get(&format!("/sos/history?limit={limit}")).await;
    }

    pub async fn list_contacts(&self) -> Result<Reply<ContactList>> {
        return self.get("/sos/contacts").await;
    }

    pub async fn add_contact(&self, phone: &str, name: &str) -> Result<Reply<ContactUpdate>> {
        return self
            .post(
                "/sos/contacts",
                &ContactRequest {
                    phone_number: phone,
                    name,
                },
            )
            .await;
    }

    pub async fn remove_contact(&self, phone: &str) -> Result<Reply<ContactUpdate>> {
        let path = format!("/sos/contacts/{}", encode_path_segment(phone));
        tracing::debug!(path, "DELETE");
        let req = self.client.delete(self.endpoint(&path));
        return self.send(&path, req).await;
    }

    pub async fn module_status(&self, module: &str) -> Result<Reply<ModuleStatus>> {
        return self.get(&format!("/{module}/check")).await;
    }

    /// Best effort diagnostic. The payload is free form.
    pub async fn health_check(&self) -> Result<Value> {
        let transport_err = |source: reqwest::Error| {
            return ApiError::Transport {
                path: "/health".to_string(),
                source,
            };
        };

        let res = self
            .client
            .get(self.endpoint("/health"))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await
            .and_then(|res| return res.error_for_status())
            .map_err(transport_err)?;

        let body = res.json::<Value>().await.map_err(transport_err)?;

        return Ok(body);
    }
}
