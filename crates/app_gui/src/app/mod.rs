//! Window state and the background request worker.

mod settings;
mod upload;

use blight_core::{
    ClientConfig, DroppedFile, FileSink, HttpPredictor, PredictError, Prediction, Predictor,
    Submission, SubmissionId, UploadWidget, accept_dropped,
};
use eframe::{App, Frame, egui};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Panel {
    #[default]
    Upload,
    Settings,
}

/// Messages from worker threads back to the UI thread.
pub(crate) enum WorkerEvent {
    Predicted {
        id: SubmissionId,
        outcome: Result<Prediction, PredictError>,
    },
    Pinged(Result<String, PredictError>),
}

pub(crate) struct UiApp {
    config: ClientConfig,
    client: Arc<HttpPredictor>,
    widget: UploadWidget,
    panel: Panel,
    status: String,
    pinging: bool,
    app_version: &'static str,
    tx: Sender<WorkerEvent>,
    rx: Receiver<WorkerEvent>,
}

impl UiApp {
    pub(crate) fn new(config: ClientConfig, client: HttpPredictor) -> Self {
        let (tx, rx) = channel();
        Self {
            config,
            client: Arc::new(client),
            widget: UploadWidget::new(),
            panel: Panel::default(),
            status: String::new(),
            pinging: false,
            app_version: env!("BLIGHTCHECK_VERSION"),
            tx,
            rx,
        }
    }

    /// Hand a batch of dropped or picked files to the widget.
    fn accept(&mut self, dropped: Vec<DroppedFile>) {
        match accept_dropped(dropped) {
            Ok(files) => {
                self.status.clear();
                self.widget.on_files_accepted(files);
            }
            Err(e) => {
                tracing::warn!("could not read selection: {e}");
                self.status = e.to_string();
            }
        }
    }

    fn submit(&mut self, ctx: &egui::Context) {
        if let Some(submission) = self.widget.begin_submit() {
            let predictor: Arc<dyn Predictor> = self.client.clone();
            let ctx = ctx.clone();
            spawn_submission(predictor, submission, self.tx.clone(), move || {
                ctx.request_repaint()
            });
        }
    }

    fn ping(&mut self, ctx: &egui::Context) {
        if self.pinging {
            return;
        }
        self.pinging = true;
        self.status = "Contacting server...".to_string();
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let _ = tx.send(WorkerEvent::Pinged(client.ping()));
            ctx.request_repaint();
        });
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Predicted { id, outcome } => {
                if let Err(e) = &outcome {
                    tracing::warn!("prediction failed: {e}");
                }
                self.widget.resolve(id, outcome);
            }
            WorkerEvent::Pinged(result) => {
                self.pinging = false;
                self.status = match result {
                    Ok(message) => format!("Server reachable: {message}"),
                    Err(e) => {
                        tracing::warn!("server check failed: {e}");
                        format!("Server unreachable: {e}")
                    }
                };
            }
        }
    }
}

/// Run one submission on its own thread; `done` fires after the event is sent.
pub(crate) fn spawn_submission<F>(
    predictor: Arc<dyn Predictor>,
    submission: Submission,
    tx: Sender<WorkerEvent>,
    done: F,
) -> thread::JoinHandle<()>
where
    F: FnOnce() + Send + 'static,
{
    thread::spawn(move || {
        let Submission { id, file } = submission;
        let outcome = predictor.submit_image(&file);
        // The window may already be gone.
        let _ = tx.send(WorkerEvent::Predicted { id, outcome });
        done();
    })
}

/// egui hands over either a path or, on some platforms, the bytes.
pub(crate) fn from_egui_drops(dropped: &[egui::DroppedFile]) -> Vec<DroppedFile> {
    dropped
        .iter()
        .filter_map(|d| match (&d.path, &d.bytes) {
            (Some(path), _) => Some(DroppedFile::Path(path.clone())),
            (None, Some(bytes)) => Some(DroppedFile::Bytes {
                name: d.name.clone(),
                bytes: bytes.to_vec(),
            }),
            (None, None) => {
                tracing::debug!("ignoring drop without path or bytes: {}", d.name);
                None
            }
        })
        .collect()
}

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.drain_events();

        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if !dropped.is_empty() {
            self.accept(from_egui_drops(&dropped));
        }

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.panel, Panel::Upload, "Classify");
                ui.selectable_value(&mut self.panel, Panel::Settings, "Server");
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            if self.status.is_empty() {
                ui.label(" ");
            } else {
                ui.label(&self.status);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.panel {
            Panel::Upload => self.render_upload_panel(ctx, ui),
            Panel::Settings => self.render_settings_panel(ctx, ui),
        });
    }
}
