// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Scripted sessions against a simulated surface.
//!
//! A script is a JSON array of steps such as
//!
//! ```json
//! [{"op": "type", "text": "hi @wo"}, {"op": "key", "key": "down"}, {"op": "key", "key": "enter"}]
//! ```
//!
//! Every typed character and caret move is reported to the engine exactly as a
//! host widget would report it, and engine edits are applied back to the
//! surface. A step the engine rejects is recorded and the replay carries on.

use std::path::PathBuf;
use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sg_config::SuggestConfig;
use sg_engine::{
    Applied, CandidateSource, CloseReason, KeyOutcome, Session, SuggestEngine, SuggestKey,
    SuggestResult,
};
use tracing::{debug, warn};

use crate::candidates::CandidateArgs;
use crate::host::Surface;

#[derive(clap::Args, Debug, Clone)]
pub struct ReplayArgs {
    /// JSON file holding the list of steps
    #[arg(long)]
    pub script: PathBuf,
    /// Initial buffer contents; the caret starts at its end
    #[arg(long, default_value = "")]
    pub text: String,
    #[command(flatten)]
    pub candidates: CandidateArgs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    /// Type characters one at a time at the caret.
    Type { text: String },
    Backspace {
        #[serde(default = "one")]
        count: usize,
    },
    /// Move the caret without editing.
    Move { caret: usize },
    Key { key: SuggestKey },
    /// Explicit request to show suggestions (Ctrl+Space without the key).
    Manual,
    /// Host-side close such as focus loss.
    Dismiss,
    /// Pointer selection of a list entry.
    Pick { index: usize },
}

fn one() -> usize {
    1
}

#[derive(Debug, Clone, Serialize)]
pub struct StepError {
    pub step: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub text: String,
    pub caret: usize,
    pub session: Session,
    pub last_close: Option<CloseReason>,
    /// Every open/closed flip seen by the listener, in order.
    pub open_changes: Vec<bool>,
    pub commits: Vec<Applied>,
    pub errors: Vec<StepError>,
}

impl ReplayArgs {
    pub fn run(&self, settings: &SuggestConfig) -> Result<Value> {
        let raw = std::fs::read_to_string(&self.script)
            .with_context(|| format!("reading script {}", self.script.display()))?;
        let steps = parse_script(&raw)
            .with_context(|| format!("parsing script {}", self.script.display()))?;
        let source = self.candidates.source(settings.fuzzy)?;
        let report = replay(source, settings, &self.text, &steps)?;
        Ok(serde_json::to_value(report)?)
    }
}

pub fn parse_script(raw: &str) -> Result<Vec<Step>> {
    let de = &mut serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize(de).map_err(|e| anyhow::anyhow!("{}: {}", e.path(), e.inner()))
}

pub fn replay<S: CandidateSource>(
    source: S,
    settings: &SuggestConfig,
    initial: &str,
    steps: &[Step],
) -> Result<ReplayReport> {
    let mut engine = SuggestEngine::new(source, settings.engine_options()?);
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    engine.set_open_listener(move |open| sink.borrow_mut().push(open));

    let mut run = Replay {
        engine,
        surface: Surface::new(initial),
        commits: Vec::new(),
    };
    run.engine.reset_buffer(&run.surface.text);

    let mut errors = Vec::new();
    for (index, step) in steps.iter().enumerate() {
        debug!("step {}: {:?}", index, step);
        if let Err(err) = run.step(step) {
            warn!("step {} rejected: {}", index, err);
            errors.push(StepError {
                step: index,
                message: err.to_string(),
            });
        }
    }

    let open_changes = changes.borrow().clone();
    Ok(ReplayReport {
        text: run.surface.text,
        caret: run.surface.caret,
        session: run.engine.session().clone(),
        last_close: run.engine.last_close_reason(),
        open_changes,
        commits: run.commits,
        errors,
    })
}

struct Replay<S> {
    engine: SuggestEngine<S>,
    surface: Surface,
    commits: Vec<Applied>,
}

impl<S: CandidateSource> Replay<S> {
    fn step(&mut self, step: &Step) -> SuggestResult<()> {
        match step {
            Step::Type { text } => {
                for c in text.chars() {
                    self.type_char(c)?;
                }
            }
            Step::Backspace { count } => {
                for _ in 0..*count {
                    if self.surface.backspace() {
                        self.engine.on_buffer_changed(&self.surface.text, self.surface.caret)?;
                    }
                }
            }
            Step::Move { caret } => {
                self.engine.on_caret_moved(&self.surface.text, *caret)?;
                self.surface.set_caret(*caret)?;
            }
            Step::Key { key } => {
                let outcome = self.engine.handle_key(*key, &self.surface.text, self.surface.caret)?;
                if let Some(edit) = outcome.edit() {
                    self.apply(edit.clone());
                }
                if let KeyOutcome::PassThrough { .. } = outcome {
                    self.host_key(*key)?;
                }
            }
            Step::Manual => self.engine.open_manual(&self.surface.text, self.surface.caret)?,
            Step::Dismiss => self.engine.dismiss(),
            Step::Pick { index } => {
                let edit = self
                    .engine
                    .commit_index(&self.surface.text, self.surface.caret, *index)?;
                if let Some(edit) = edit {
                    self.apply(edit);
                }
            }
        }
        Ok(())
    }

    fn type_char(&mut self, c: char) -> SuggestResult<()> {
        self.surface.insert_char(c);
        self.engine.on_buffer_changed(&self.surface.text, self.surface.caret)
    }

    /// Default widget behaviour for keys the engine let through.
    fn host_key(&mut self, key: SuggestKey) -> SuggestResult<()> {
        match key {
            SuggestKey::Space => self.type_char(' '),
            SuggestKey::Enter => self.type_char('\n'),
            SuggestKey::Tab => self.type_char('\t'),
            _ => Ok(()),
        }
    }

    fn apply(&mut self, edit: Applied) {
        self.surface.apply(&edit);
        self.engine.reset_buffer(&self.surface.text);
        self.commits.push(edit);
    }
}
