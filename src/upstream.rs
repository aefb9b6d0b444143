use crate::errors::UploadError;
use crate::models::{StoredPayload, UploadEnvelope, UpstreamErrorBody};
use crate::validation::mime_for;
use axum::body::Bytes;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

/// A validated file, ready to forward.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Bytes,
}

/// Client for the processing endpoint that computes the indices.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    url: String,
}

impl UpstreamClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn submit(&self, file: &UploadedFile) -> Result<StoredPayload, UploadError> {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(mime_for(&file.name))?;
        let form = Form::new().part("file", part);

        let response = self.http.post(&self.url).multipart(form).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<UpstreamErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.error)
                .filter(|message| !message.trim().is_empty());
            return Err(match message {
                Some(message) => UploadError::Rejected {
                    status: status.as_u16(),
                    message,
                },
                None => UploadError::UpstreamStatus {
                    status: status.as_u16(),
                },
            });
        }

        let envelope: UploadEnvelope = serde_json::from_slice(&body)?;
        let payload = into_payload(envelope)?;
        info!(
            file = %file.name,
            resultats_len = payload.resultats.len(),
            data_len = payload.data.len(),
            "processing endpoint returned results"
        );
        Ok(payload)
    }
}

/// Accepts the envelope only when it reports success and carries both keys.
pub fn into_payload(envelope: UploadEnvelope) -> Result<StoredPayload, UploadError> {
    if !envelope.success {
        if let Some(error) = envelope.error.as_deref() {
            warn!("processing endpoint reported failure: {error}");
        }
        return Err(UploadError::Unsuccessful);
    }

    match (present(envelope.resultats), present(envelope.data)) {
        (Some(resultats), Some(data)) => Ok(StoredPayload {
            resultats: resultats.to_string(),
            data: data.to_string(),
        }),
        _ => {
            warn!("processing endpoint reported success without resultats/data");
            Err(UploadError::Unsuccessful)
        }
    }
}

fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|value| !value.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn successful_envelope_keeps_payload_verbatim() {
        let envelope: UploadEnvelope = serde_json::from_value(json!({
            "success": true,
            "resultats": {"whipple": {"homme": 1.1}},
            "data": [{"Age": 0, "Homme": 10, "Femme": 12, "Ensemble": 22}]
        }))
        .unwrap();

        let payload = into_payload(envelope).unwrap();
        assert_eq!(payload.resultats, r#"{"whipple":{"homme":1.1}}"#);
        let data: Value = serde_json::from_str(&payload.data).unwrap();
        assert_eq!(
            data,
            json!([{"Age": 0, "Homme": 10, "Femme": 12, "Ensemble": 22}])
        );
    }

    #[test]
    fn failure_flag_or_missing_keys_are_rejected() {
        let failed = UploadEnvelope {
            success: false,
            resultats: Some(json!({})),
            data: Some(json!([])),
            error: None,
        };
        assert!(matches!(into_payload(failed), Err(UploadError::Unsuccessful)));

        let no_data = UploadEnvelope {
            success: true,
            resultats: Some(json!({})),
            data: Some(Value::Null),
            error: None,
        };
        assert!(matches!(into_payload(no_data), Err(UploadError::Unsuccessful)));
    }
}
