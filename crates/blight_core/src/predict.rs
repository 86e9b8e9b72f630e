//! Outbound prediction requests.

use crate::error::PredictError;
use crate::model::{Prediction, SelectedFile};
use reqwest::Url;
use reqwest::blocking::{Client, multipart};
use serde::Deserialize;
use std::time::Duration;

/// Name of the multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// Anything that can turn an image into a prediction.
pub trait Predictor: Send + Sync {
    fn submit_image(&self, file: &SelectedFile) -> Result<Prediction, PredictError>;
}

/// Posts images as `multipart/form-data` to a prediction endpoint.
#[derive(Debug, Clone)]
pub struct HttpPredictor {
    client: Client,
    endpoint: Url,
    health: Url,
}

#[derive(Debug, Deserialize)]
struct PingResponse {
    message: String,
}

impl HttpPredictor {
    pub fn new(endpoint: Url) -> Result<Self, PredictError> {
        let health = endpoint.join("/test").map_err(|e| PredictError::InvalidUrl {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        // Requests run until the server answers or the connection drops.
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(PredictError::Client)?;
        Ok(Self {
            client,
            endpoint,
            health,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Hits the server's `/test` route and returns its greeting.
    pub fn ping(&self) -> Result<String, PredictError> {
        let resp = self
            .client
            .get(self.health.clone())
            .send()
            .map_err(|source| self.transport(&self.health, source))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(PredictError::Status { status });
        }
        let body = resp.text().map_err(|source| self.transport(&self.health, source))?;
        let ping: PingResponse =
            serde_json::from_str(&body).map_err(|e| PredictError::Decode(e.to_string()))?;
        Ok(ping.message)
    }

    fn transport(&self, url: &Url, source: reqwest::Error) -> PredictError {
        PredictError::Transport {
            endpoint: url.to_string(),
            source,
        }
    }
}

impl Predictor for HttpPredictor {
    fn submit_image(&self, file: &SelectedFile) -> Result<Prediction, PredictError> {
        let part = multipart::Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.content_type())
            .map_err(|source| PredictError::InvalidPart {
                name: file.name().to_string(),
                source,
            })?;
        let form = multipart::Form::new().part(FILE_FIELD, part);

        tracing::debug!(
            "posting {} ({} bytes) to {}",
            file.name(),
            file.bytes().len(),
            self.endpoint
        );
        let resp = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .map_err(|source| self.transport(&self.endpoint, source))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PredictError::Status { status });
        }
        let body = resp.text().map_err(|source| self.transport(&self.endpoint, source))?;
        let prediction: Prediction =
            serde_json::from_str(&body).map_err(|e| PredictError::Decode(e.to_string()))?;
        if !prediction.has_valid_confidence() {
            return Err(PredictError::Decode(format!(
                "confidence {} outside [0,1]",
                prediction.confidence
            )));
        }
        Ok(prediction)
    }
}
