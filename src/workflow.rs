//! The prompt-driven workflow.
//!
//! One run walks `Welcome -> Gather -> Apply -> Report` and returns to
//! `Welcome`, whether the run succeeded or not. Declining at `Welcome` moves
//! to the terminal `Done` state.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::actions::{dispatch, preflight, Action};
use crate::config::DefaultsConfig;
use crate::error::{ActionError, AppError};
use crate::output::{derive_output_filename, image_path};
use crate::ports::{ConfirmRequest, InputRequest, Prompter, SelectRequest};
use crate::session::{
    BrightnessLevel, EditChoice, EditKind, SessionIntent, Watermark, WatermarkKind,
    CONTRAST_VALUE, EDIT_LABELS,
};

const WELCOME_PROMPT: &str = "Hi! Welcome to \"Watermark manager\". Copy your image files to \
                              `img` folder. Then you'll be able to use them in the app. Are you \
                              ready?";

/// Result of one run: the written output path, or why the run was aborted.
pub type RunOutcome = Result<PathBuf, ActionError>;

/// Workflow states.
#[derive(Debug)]
pub enum WorkflowState {
    /// Ask whether to start a run.
    Welcome,
    /// Collect the session intent.
    Gather,
    /// Check preconditions, edit, and watermark.
    Apply(SessionIntent),
    /// Tell the user how the run went.
    Report(RunOutcome),
    /// Terminal state.
    Done,
}

/// Counts of finished runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Runs that wrote an output file.
    pub succeeded: usize,
    /// Runs that were aborted.
    pub failed: usize,
}

/// Drives the prompts and dispatches image actions.
pub struct Workflow<'a> {
    prompter: &'a dyn Prompter,
    image_dir: PathBuf,
    defaults: &'a DefaultsConfig,
}

impl<'a> Workflow<'a> {
    /// Create a workflow reading and writing images under `image_dir`.
    pub fn new(
        prompter: &'a dyn Prompter,
        image_dir: impl Into<PathBuf>,
        defaults: &'a DefaultsConfig,
    ) -> Self {
        Self { prompter, image_dir: image_dir.into(), defaults }
    }

    /// Run until the user declines at the welcome prompt.
    ///
    /// # Errors
    ///
    /// Returns an error only if the prompt channel fails. Image failures are
    /// reported to the user and counted in the summary.
    pub async fn run(&self) -> Result<RunSummary, AppError> {
        let mut summary = RunSummary::default();
        let mut state = WorkflowState::Welcome;
        loop {
            if let WorkflowState::Report(ref outcome) = state {
                match outcome {
                    Ok(_) => summary.succeeded += 1,
                    Err(_) => summary.failed += 1,
                }
            }
            state = match self.step(state).await? {
                WorkflowState::Done => return Ok(summary),
                next => next,
            };
        }
    }

    /// Perform one transition.
    ///
    /// # Errors
    ///
    /// Returns an error if a prompt cannot be answered.
    pub async fn step(&self, state: WorkflowState) -> Result<WorkflowState, AppError> {
        debug!(?state, "workflow step");
        let next = match state {
            WorkflowState::Welcome => {
                if self.welcome()? {
                    WorkflowState::Gather
                } else {
                    WorkflowState::Done
                }
            }
            WorkflowState::Gather => WorkflowState::Apply(self.gather()?),
            WorkflowState::Apply(intent) => WorkflowState::Report(self.apply(&intent).await),
            WorkflowState::Report(outcome) => {
                report(&outcome);
                WorkflowState::Welcome
            }
            WorkflowState::Done => WorkflowState::Done,
        };
        Ok(next)
    }

    fn welcome(&self) -> Result<bool, AppError> {
        self.prompter.confirm(&ConfirmRequest { prompt: WELCOME_PROMPT.into(), default: true })
    }

    /// Ask every question needed for one run.
    ///
    /// # Errors
    ///
    /// Returns an error if a prompt fails or returns an out-of-range choice.
    pub fn gather(&self) -> Result<SessionIntent, AppError> {
        let input_file = self.prompter.input(&InputRequest {
            prompt: "What file do you want to mark?".into(),
            default: Some(self.defaults.input_file.clone()),
        })?;

        let wants_edit = self.prompter.confirm(&ConfirmRequest {
            prompt: "Do you want to edit your picture?".into(),
            default: false,
        })?;
        let edit = if wants_edit { Some(self.choose_edit()?) } else { None };

        let kind = self.choose(
            &SelectRequest::new("Which watermark do you want to add?", &WatermarkKind::LABELS),
            WatermarkKind::from_index,
        )?;
        let watermark = match kind {
            WatermarkKind::Text => Watermark::Text(self.prompter.input(&InputRequest {
                prompt: "Type your watermark text:".into(),
                default: None,
            })?),
            WatermarkKind::Image => Watermark::Image(self.prompter.input(&InputRequest {
                prompt: "Type your watermark name:".into(),
                default: Some(self.defaults.watermark_file.clone()),
            })?),
        };

        let intent = SessionIntent { input_file, edit, watermark };
        info!(
            input = %intent.input_file,
            editing = intent.editing_requested(),
            watermark = ?intent.watermark.kind(),
            "session intent gathered"
        );
        Ok(intent)
    }

    fn choose_edit(&self) -> Result<EditKind, AppError> {
        let choice = self.choose(
            &SelectRequest::new("Which edit do you want to apply?", &EDIT_LABELS),
            EditChoice::from_index,
        )?;
        match choice {
            EditChoice::Ready(kind) => Ok(kind),
            EditChoice::Brightness => {
                let level = self.choose(
                    &SelectRequest::new("How much brighter?", &BrightnessLevel::LABELS),
                    BrightnessLevel::from_index,
                )?;
                Ok(EditKind::Brightness(level))
            }
        }
    }

    fn choose<T>(
        &self,
        request: &SelectRequest,
        from_index: impl Fn(usize) -> Option<T>,
    ) -> Result<T, AppError> {
        let index = self.prompter.select(request)?;
        from_index(index).ok_or_else(|| {
            AppError::Prompt(format!("Choice {index} out of range for '{}'", request.prompt))
        })
    }

    /// Check preconditions, apply the edit, then the watermark.
    ///
    /// Every source is decoded and the output format resolved before the
    /// edit, so an aborted run never rewrites the original.
    ///
    /// # Errors
    ///
    /// Returns the first [`ActionError`] hit; later steps are skipped.
    pub async fn apply(&self, intent: &SessionIntent) -> RunOutcome {
        let input = image_path(&self.image_dir, &intent.input_file)?;
        let output = image_path(&self.image_dir, &derive_output_filename(&intent.input_file))?;
        let action = match intent.watermark {
            Watermark::Text(ref text) => Action::TextWatermark {
                input: input.clone(),
                output: output.clone(),
                text: text.clone(),
            },
            Watermark::Image(ref name) => Action::ImageWatermark {
                input: input.clone(),
                output: output.clone(),
                watermark: image_path(&self.image_dir, name)?,
            },
        };

        let mut sources = vec![input.clone()];
        if let Action::ImageWatermark { ref watermark, .. } = action {
            sources.push(watermark.clone());
        }
        preflight(sources, output.clone()).await?;

        if let Some(edit) = intent.edit {
            dispatch(edit_action(edit, &input)).await?;
        }

        dispatch(action).await?;
        Ok(output)
    }
}

fn edit_action(edit: EditKind, path: &Path) -> Action {
    let path = path.to_path_buf();
    match edit {
        EditKind::Brightness(level) => Action::Brightness { path, level: level.delta() },
        EditKind::Contrast => Action::Contrast { path, value: CONTRAST_VALUE },
        EditKind::Greyscale => Action::Greyscale { path },
        EditKind::Invert => Action::Invert { path },
    }
}

fn report(outcome: &RunOutcome) {
    match outcome {
        Ok(path) => {
            info!(output = %path.display(), "run finished");
            println!("Adding watermark finished with success!");
            println!("Saved: {}", path.display());
        }
        Err(e) => {
            warn!(error = %e, "run aborted");
            println!("Something went wrong... Try again! ({e})");
        }
    }
}
