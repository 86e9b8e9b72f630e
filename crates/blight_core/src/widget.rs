//! The upload-and-predict state machine.
//!
//! The widget owns the selected file and the displayed outcome. A submission
//! is split in two halves so the request itself can run anywhere:
//! [`UploadWidget::begin_submit`] hands out the file to send and
//! [`UploadWidget::resolve`] feeds the outcome back.

use crate::error::PredictError;
use crate::model::{Prediction, SelectedFile};
use crate::predict::Predictor;
use crate::selection::FileSink;
use std::fmt;

/// Observable state of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Empty,
    FileSelected,
    Submitting,
    Succeeded,
    Failed,
}

/// The two errors a user can ever see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetError {
    NoFileSelected,
    RequestFailed,
}

impl WidgetError {
    pub fn message(self) -> &'static str {
        match self {
            WidgetError::NoFileSelected => "Please select an image file first.",
            WidgetError::RequestFailed => "Error occurred while processing the image.",
        }
    }
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Identifies one submission so a late response can be matched or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(u64);

/// A request the caller has to carry out and report back via `resolve`.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: SubmissionId,
    pub file: SelectedFile,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum Outcome {
    #[default]
    Nothing,
    Result(Prediction),
    Error(WidgetError),
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    id: SubmissionId,
    // A newer selection took over the display; the response only frees the slot.
    superseded: bool,
}

#[derive(Debug, Default)]
pub struct UploadWidget {
    file: Option<SelectedFile>,
    outcome: Outcome,
    in_flight: Option<InFlight>,
    next_id: u64,
}

impl UploadWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WidgetState {
        if self.in_flight.is_some_and(|f| !f.superseded) {
            return WidgetState::Submitting;
        }
        match self.outcome {
            Outcome::Result(_) => WidgetState::Succeeded,
            Outcome::Error(WidgetError::RequestFailed) => WidgetState::Failed,
            Outcome::Error(WidgetError::NoFileSelected) | Outcome::Nothing => {
                if self.file.is_some() {
                    WidgetState::FileSelected
                } else {
                    WidgetState::Empty
                }
            }
        }
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn result(&self) -> Option<&Prediction> {
        match &self.outcome {
            Outcome::Result(p) => Some(p),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<WidgetError> {
        match self.outcome {
            Outcome::Error(e) => Some(e),
            _ => None,
        }
    }

    /// True while a request is running, whether or not its answer will be shown.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Submit stays available until a request is in flight.
    pub fn can_submit(&self) -> bool {
        self.in_flight.is_none()
    }

    /// Replace the selection. Anything but exactly one file clears it.
    pub fn select(&mut self, mut files: Vec<SelectedFile>) {
        self.outcome = Outcome::Nothing;
        if let Some(f) = self.in_flight.as_mut() {
            f.superseded = true;
        }
        self.file = if files.len() == 1 {
            files.pop()
        } else {
            tracing::debug!("rejecting selection of {} files", files.len());
            None
        };
    }

    /// Start a submission of the selected file.
    ///
    /// Returns `None` when nothing may be sent: either no file is selected
    /// (the no-file error is recorded, even while a superseded request still
    /// runs), or a request is already in flight (state untouched).
    pub fn begin_submit(&mut self) -> Option<Submission> {
        let Some(file) = self.file.clone() else {
            self.outcome = Outcome::Error(WidgetError::NoFileSelected);
            return None;
        };
        if self.in_flight.is_some() {
            tracing::debug!("submit ignored, request in flight");
            return None;
        }
        let id = SubmissionId(self.next_id);
        self.next_id += 1;
        self.outcome = Outcome::Nothing;
        self.in_flight = Some(InFlight {
            id,
            superseded: false,
        });
        Some(Submission { id, file })
    }

    /// Apply the outcome of submission `id`. Returns whether it was displayed.
    pub fn resolve(&mut self, id: SubmissionId, outcome: Result<Prediction, PredictError>) -> bool {
        let Some(flight) = self.in_flight.filter(|f| f.id == id) else {
            tracing::debug!("dropping response for unknown submission {id:?}");
            return false;
        };
        self.in_flight = None;
        if flight.superseded {
            tracing::debug!("dropping response for superseded submission {id:?}");
            return false;
        }
        self.outcome = match outcome {
            Ok(prediction) => Outcome::Result(prediction),
            Err(_) => Outcome::Error(WidgetError::RequestFailed),
        };
        true
    }

    /// Run a whole submission on the current thread.
    pub fn submit_with(&mut self, predictor: &dyn Predictor) -> WidgetState {
        if let Some(submission) = self.begin_submit() {
            let outcome = predictor.submit_image(&submission.file);
            self.resolve(submission.id, outcome);
        }
        self.state()
    }
}

impl FileSink for UploadWidget {
    fn on_files_accepted(&mut self, files: Vec<SelectedFile>) {
        self.select(files);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::sync::Mutex;

    /// Predictor that replays scripted outcomes and records what it was sent.
    struct Scripted {
        outcomes: Mutex<Vec<Result<Prediction, PredictError>>>,
        sent: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(mut outcomes: Vec<Result<Prediction, PredictError>>) -> Self {
            outcomes.reverse();
            Self {
                outcomes: Mutex::new(outcomes),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Predictor for Scripted {
        fn submit_image(&self, file: &SelectedFile) -> Result<Prediction, PredictError> {
            self.sent.lock().unwrap().push(file.name().to_string());
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .expect("unexpected request")
        }
    }

    fn image(name: &str) -> SelectedFile {
        SelectedFile::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF])
    }

    fn late_blight() -> Prediction {
        Prediction::new("Late_Blight", 0.87)
    }

    #[fixture]
    fn selected() -> UploadWidget {
        let mut w = UploadWidget::new();
        w.on_files_accepted(vec![image("leaf.jpg")]);
        w
    }

    #[fixture]
    fn succeeded(selected: UploadWidget) -> UploadWidget {
        let mut w = selected;
        let id = w.begin_submit().unwrap().id;
        w.resolve(id, Ok(late_blight()));
        w
    }

    #[fixture]
    fn failed(selected: UploadWidget) -> UploadWidget {
        let mut w = selected;
        let id = w.begin_submit().unwrap().id;
        w.resolve(id, Err(PredictError::Decode("x".into())));
        w
    }

    #[fixture]
    fn no_file_error() -> UploadWidget {
        let mut w = UploadWidget::new();
        assert!(w.begin_submit().is_none());
        w
    }

    #[test]
    fn starts_empty() {
        let w = UploadWidget::new();
        assert_eq!(w.state(), WidgetState::Empty);
        assert!(w.file().is_none());
        assert!(w.result().is_none());
        assert!(w.error().is_none());
        assert!(w.can_submit());
    }

    #[rstest]
    #[case::from_selected(selected())]
    #[case::from_succeeded(succeeded(selected()))]
    #[case::from_failed(failed(selected()))]
    #[case::from_no_file_error(no_file_error())]
    fn selecting_clears_outcome(#[case] mut w: UploadWidget) {
        w.on_files_accepted(vec![image("other.png")]);
        assert_eq!(w.state(), WidgetState::FileSelected);
        assert_eq!(w.file().unwrap().name(), "other.png");
        assert!(w.result().is_none());
        assert!(w.error().is_none());
    }

    #[test]
    fn submit_without_file_sends_nothing() {
        let predictor = Scripted::new(vec![]);
        let mut w = UploadWidget::new();
        assert_eq!(w.submit_with(&predictor), WidgetState::Empty);
        assert_eq!(w.error(), Some(WidgetError::NoFileSelected));
        assert_eq!(
            w.error().unwrap().to_string(),
            "Please select an image file first."
        );
        assert!(predictor.sent().is_empty());
        assert!(w.can_submit());
    }

    #[rstest]
    fn submit_sends_exactly_one_request(#[from(selected)] mut w: UploadWidget) {
        let predictor = Scripted::new(vec![Ok(late_blight())]);
        assert_eq!(w.submit_with(&predictor), WidgetState::Succeeded);
        assert_eq!(predictor.sent(), vec!["leaf.jpg"]);
        let result = w.result().unwrap();
        assert_eq!(result.label, "Late_Blight");
        assert_eq!(result.confidence_percent(), "87.00%");
        assert!(w.error().is_none());
    }

    #[rstest]
    fn submitting_blocks_second_submit(#[from(selected)] mut w: UploadWidget) {
        let first = w.begin_submit().unwrap();
        assert_eq!(w.state(), WidgetState::Submitting);
        assert!(!w.can_submit());
        assert!(w.begin_submit().is_none());
        assert_eq!(w.state(), WidgetState::Submitting);
        assert!(w.error().is_none());

        assert!(w.resolve(first.id, Ok(late_blight())));
        assert!(w.can_submit());
    }

    #[rstest]
    #[case::server(PredictError::Status { status: reqwest::StatusCode::INTERNAL_SERVER_ERROR })]
    #[case::malformed(PredictError::Decode("expected value at line 1".into()))]
    fn every_failure_shows_the_same_message(
        #[from(selected)] mut w: UploadWidget,
        #[case] err: PredictError,
    ) {
        let predictor = Scripted::new(vec![Err(err)]);
        assert_eq!(w.submit_with(&predictor), WidgetState::Failed);
        assert_eq!(w.error(), Some(WidgetError::RequestFailed));
        assert_eq!(
            w.error().unwrap().message(),
            "Error occurred while processing the image."
        );
        assert!(w.result().is_none());
    }

    #[rstest]
    fn second_submission_replaces_first(#[from(selected)] mut w: UploadWidget) {
        let predictor = Scripted::new(vec![
            Ok(late_blight()),
            Err(PredictError::Decode("bad".into())),
            Ok(Prediction::new("Healthy", 0.5)),
        ]);
        assert_eq!(w.submit_with(&predictor), WidgetState::Succeeded);
        assert_eq!(w.submit_with(&predictor), WidgetState::Failed);
        assert!(w.result().is_none());

        w.on_files_accepted(vec![image("second.jpg")]);
        assert_eq!(w.submit_with(&predictor), WidgetState::Succeeded);
        assert!(w.error().is_none());
        assert_eq!(w.result().unwrap().label, "Healthy");
        assert_eq!(predictor.sent(), vec!["leaf.jpg", "leaf.jpg", "second.jpg"]);
    }

    #[rstest]
    fn beginning_submit_clears_previous_outcome(#[from(failed)] mut w: UploadWidget) {
        assert!(w.begin_submit().is_some());
        assert!(w.error().is_none());
        assert!(w.result().is_none());
    }

    #[rstest]
    fn response_after_new_selection_is_dropped(#[from(selected)] mut w: UploadWidget) {
        let pending = w.begin_submit().unwrap();
        w.on_files_accepted(vec![image("newer.jpg")]);
        assert_eq!(w.state(), WidgetState::FileSelected);
        assert!(!w.can_submit());

        assert!(!w.resolve(pending.id, Ok(late_blight())));
        assert_eq!(w.state(), WidgetState::FileSelected);
        assert!(w.result().is_none());
        assert!(w.can_submit());
    }

    #[rstest]
    fn submit_after_rejected_drop_reports_no_file(#[from(selected)] mut w: UploadWidget) {
        let pending = w.begin_submit().unwrap();
        w.on_files_accepted(vec![]);
        assert_eq!(w.state(), WidgetState::Empty);

        assert!(w.begin_submit().is_none());
        assert_eq!(w.error(), Some(WidgetError::NoFileSelected));
        assert_eq!(w.state(), WidgetState::Empty);

        assert!(!w.resolve(pending.id, Ok(late_blight())));
        assert_eq!(w.error(), Some(WidgetError::NoFileSelected));
        assert!(w.result().is_none());
    }

    #[rstest]
    fn unknown_submission_is_ignored(#[from(succeeded)] mut w: UploadWidget) {
        let stale = SubmissionId(99);
        assert!(!w.resolve(stale, Err(PredictError::Decode("x".into()))));
        assert_eq!(w.state(), WidgetState::Succeeded);
    }

    #[rstest]
    #[case::none(vec![])]
    #[case::two(vec![image("a.jpg"), image("b.jpg")])]
    fn rejected_drop_clears_selection(
        #[from(succeeded)] mut w: UploadWidget,
        #[case] files: Vec<SelectedFile>,
    ) {
        w.on_files_accepted(files);
        assert_eq!(w.state(), WidgetState::Empty);
        assert!(w.file().is_none());
        assert!(w.result().is_none());
    }
}
