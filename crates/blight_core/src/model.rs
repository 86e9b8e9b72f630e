use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An image picked by the user: raw bytes plus the name it was picked under.
///
/// The bytes sit behind an `Arc` so the worker thread can hold the file
/// while the widget keeps its own handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    content_type: &'static str,
    bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        content_type: &'static str,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Original file name as shown in the UI and sent in the multipart part.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Success payload of the prediction endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted class label, e.g. `Late_Blight`.
    #[serde(rename = "class")]
    pub label: String,
    /// Model confidence in [0,1].
    pub confidence: f64,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// Confidence as a percentage with two decimals, `0.87` -> `87.00%`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }

    pub(crate) fn has_valid_confidence(&self) -> bool {
        self.confidence.is_finite() && (0.0..=1.0).contains(&self.confidence)
    }
}
