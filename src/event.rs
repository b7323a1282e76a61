//! Storage trigger envelope
//!
//! Events arrive as CloudEvents in binary mode: attributes in `ce-*`
//! headers, the storage object description as the JSON body.

use crate::error::ServiceError;
use axum::http::HeaderMap;
use serde::Deserialize;

/// Storage object description carried by a finalize notification
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageObjectData {
    pub bucket: String,
    pub name: String,
    #[serde(default)]
    pub metageneration: Option<String>,
    #[serde(default)]
    pub time_created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

/// One trigger delivery
#[derive(Debug, Clone)]
pub struct StorageEvent {
    pub id: String,
    pub event_type: String,
    pub source: Option<String>,
    pub subject: Option<String>,
    pub data: StorageObjectData,
}

impl StorageEvent {
    /// Build an event from request headers and the raw JSON body
    pub fn from_request(headers: &HeaderMap, body: &[u8]) -> Result<Self, ServiceError> {
        let id = required_header(headers, "ce-id")?;
        let event_type = required_header(headers, "ce-type")?;
        let data: StorageObjectData = serde_json::from_slice(body)
            .map_err(|e| ServiceError::InvalidEvent(format!("Invalid event data: {}", e)))?;

        if data.bucket.is_empty() || data.name.is_empty() {
            return Err(ServiceError::InvalidEvent(
                "bucket and name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            id,
            event_type,
            source: optional_header(headers, "ce-source"),
            subject: optional_header(headers, "ce-subject"),
            data,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.data.bucket
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Log the delivery metadata
    pub fn log_metadata(&self) {
        tracing::info!("Event ID: {}", self.id);
        tracing::info!("Event Type: {}", self.event_type);
        tracing::info!("Source: {}", self.source.as_deref().unwrap_or("-"));
        tracing::info!("Subject: {}", self.subject.as_deref().unwrap_or("-"));
        tracing::info!("Bucket: {}", self.data.bucket);
        tracing::info!("File: {}", self.data.name);
        tracing::info!(
            "Metageneration: {}",
            self.data.metageneration.as_deref().unwrap_or("-")
        );
        tracing::info!(
            "Created: {}",
            self.data.time_created.as_deref().unwrap_or("-")
        );
        tracing::info!("Updated: {}", self.data.updated.as_deref().unwrap_or("-"));
    }
}

fn required_header(headers: &HeaderMap, name: &'static str) -> Result<String, ServiceError> {
    optional_header(headers, name).ok_or(ServiceError::MissingHeader(name))
}

fn optional_header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("ce-id", HeaderValue::from_static("1234"));
        headers.insert(
            "ce-type",
            HeaderValue::from_static("google.cloud.storage.object.v1.finalized"),
        );
        headers
    }

    #[test]
    fn test_parses_binary_mode_event() {
        let body = br#"{
            "bucket": "meter-photos",
            "name": "2024/06/01/0800.jpg",
            "metageneration": "1",
            "timeCreated": "2024-06-01T08:00:00Z",
            "updated": "2024-06-01T08:00:00Z",
            "contentType": "image/jpeg"
        }"#;

        let event = StorageEvent::from_request(&headers(), body).unwrap();

        assert_eq!(event.id, "1234");
        assert_eq!(event.bucket(), "meter-photos");
        assert_eq!(event.name(), "2024/06/01/0800.jpg");
        assert_eq!(event.data.time_created.as_deref(), Some("2024-06-01T08:00:00Z"));
        assert!(event.source.is_none());
    }

    #[test]
    fn test_missing_id_header_is_rejected() {
        let mut headers = headers();
        headers.remove("ce-id");
        let err = StorageEvent::from_request(&headers, br#"{"bucket":"b","name":"n"}"#).unwrap_err();
        assert!(matches!(err, ServiceError::MissingHeader("ce-id")));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let err = StorageEvent::from_request(&headers(), br#"{"bucket":"b"}"#).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidEvent(_)));
    }

    #[test]
    fn test_optional_metadata_may_be_absent() {
        let event = StorageEvent::from_request(&headers(), br#"{"bucket":"b","name":"n"}"#).unwrap();
        assert!(event.data.metageneration.is_none());
    }
}
