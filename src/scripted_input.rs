use anyhow::Context;
use glam::Vec2;
use roomstage_input::PointerEvent;
use roomstage_testkit::{EventRecord, JsonlSink};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::session::StageSession;

#[derive(Debug, Deserialize)]
struct PointerScriptFile {
    steps: Vec<ScriptStep>,
}

/// One scripted step. Pointer coordinates are pixels in the session's
/// current viewport.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum ScriptStep {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Resize { width: u32, height: u32 },
    Remove { name: String },
    Frame,
}

pub struct PointerScript {
    steps: Vec<ScriptStep>,
}

impl PointerScript {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading pointer script {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("parsing pointer script {}", path.display()))
    }

    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let file: PointerScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("pointer script contains no steps");
        }
        Ok(Self { steps: file.steps })
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    /// Apply every step to `session`, logging one record per step.
    pub fn replay(&self, session: &mut StageSession, sink: &mut JsonlSink) -> anyhow::Result<()> {
        for step in &self.steps {
            let viewport = session.viewport();
            match step {
                ScriptStep::Down { x, y } => {
                    let event = PointerEvent::down(Vec2::new(*x, *y), viewport);
                    log_pointer(session, sink, "pointer-down", &event)?;
                }
                ScriptStep::Move { x, y } => {
                    let event = PointerEvent::moved(Vec2::new(*x, *y), viewport);
                    log_pointer(session, sink, "pointer-move", &event)?;
                }
                ScriptStep::Up { x, y } => {
                    let event = PointerEvent::up(Vec2::new(*x, *y), viewport);
                    log_pointer(session, sink, "pointer-up", &event)?;
                }
                ScriptStep::Resize { width, height } => {
                    session.resize(*width, *height);
                    sink.write(&EventRecord {
                        frame: session.frame_count(),
                        kind: "resize",
                        payload: session.viewport(),
                    })?;
                }
                ScriptStep::Remove { name } => {
                    let removed = session.remove_asset(name);
                    sink.write(&EventRecord {
                        frame: session.frame_count(),
                        kind: "remove",
                        payload: serde_json::json!({ "name": name, "removed": removed }),
                    })?;
                }
                ScriptStep::Frame => {
                    let placed = session.frame();
                    sink.write(&EventRecord {
                        frame: session.frame_count(),
                        kind: "frame",
                        payload: placed,
                    })?;
                }
            }
        }
        Ok(())
    }
}

fn log_pointer(
    session: &mut StageSession,
    sink: &mut JsonlSink,
    kind: &str,
    event: &PointerEvent,
) -> anyhow::Result<()> {
    let outcome = session.pointer(event);
    sink.write(&EventRecord {
        frame: session.frame_count(),
        kind,
        payload: outcome,
    })
}
