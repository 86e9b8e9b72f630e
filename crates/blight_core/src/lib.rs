//! Core of the BlightCheck client: selecting an image, posting it to a
//! prediction endpoint and tracking what the window should show.

pub mod config;
pub mod error;
pub mod model;
pub mod predict;
pub mod selection;
pub mod widget;

pub use config::ClientConfig;
pub use error::{ConfigError, PredictError, SelectionError};
pub use model::{Prediction, SelectedFile};
pub use predict::{HttpPredictor, Predictor};
pub use selection::{DroppedFile, FileSink, IMAGE_EXTENSIONS, accept_dropped, accept_paths};
pub use widget::{Submission, SubmissionId, UploadWidget, WidgetError, WidgetState};
