use std::time::Instant;

use cf_optimizer::{ProgressSink, SearchProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    LoadingProject,
    Compiling,
    Searching,
    SavingResults,
    Completed,
}

impl RunStage {
    pub fn label(&self) -> &'static str {
        match self {
            RunStage::LoadingProject => "loading project",
            RunStage::Compiling => "compiling",
            RunStage::Searching => "searching",
            RunStage::SavingResults => "saving results",
            RunStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
    pub search: Option<SearchProgress>,
}

impl RunProgressEvent {
    pub fn stage(stage: RunStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
            search: None,
        }
    }
}

/// Forwards search reports to a caller closure as `RunProgressEvent`s.
pub struct CallbackSink<'a> {
    callback: &'a mut dyn FnMut(RunProgressEvent),
    started: Instant,
}

impl<'a> CallbackSink<'a> {
    pub fn new(callback: &'a mut dyn FnMut(RunProgressEvent), started: Instant) -> Self {
        Self { callback, started }
    }
}

impl ProgressSink for CallbackSink<'_> {
    fn on_report(&mut self, progress: &SearchProgress) {
        (self.callback)(RunProgressEvent {
            stage: RunStage::Searching,
            elapsed_wall_s: self.started.elapsed().as_secs_f64(),
            message: None,
            search: Some(progress.clone()),
        });
    }
}
