use std::fs;
use std::path::{Path, PathBuf};

use fpc_core::{InputAction, InputSnapshot, LookDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse script {path} at {json_path}: {message}")]
    Parse {
        path: PathBuf,
        json_path: String,
        message: String,
    },
    #[error("script {path}: frames[{index}].{field} must be a finite, non-negative number, got {value}")]
    InvalidNumber {
        path: PathBuf,
        index: usize,
        field: &'static str,
        value: f32,
    },
}

/// A timeline of held inputs replayed one tick at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct InputScript {
    pub(crate) frames: Vec<ScriptFrame>,
}

/// Inputs held for `ticks` consecutive ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScriptFrame {
    pub(crate) ticks: u32,
    #[serde(default)]
    pub(crate) actions: Vec<InputAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) look: Option<LookDelta>,
    /// Wall-clock frame time for these ticks; the fixed tick period when
    /// absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) frame_time_ms: Option<f32>,
}

impl ScriptFrame {
    fn held(ticks: u32, actions: &[InputAction]) -> Self {
        Self {
            ticks,
            actions: actions.to_vec(),
            look: None,
            frame_time_ms: None,
        }
    }

    pub(crate) fn snapshot(&self) -> InputSnapshot {
        InputSnapshot::from_actions(&self.actions).with_look_delta(self.look.unwrap_or_default())
    }
}

impl InputScript {
    pub(crate) fn total_ticks(&self) -> u64 {
        self.frames.iter().map(|frame| u64::from(frame.ticks)).sum()
    }

    pub(crate) fn parse(raw: &str, origin: &Path) -> Result<Self, ScriptError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let script: InputScript =
            serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
                let json_path = error.path().to_string();
                ScriptError::Parse {
                    path: origin.to_path_buf(),
                    json_path,
                    message: error.into_inner().to_string(),
                }
            })?;
        script.validate(origin)?;
        Ok(script)
    }

    pub(crate) fn load(path: &Path) -> Result<Self, ScriptError> {
        let raw = fs::read_to_string(path).map_err(|source| ScriptError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    fn validate(&self, origin: &Path) -> Result<(), ScriptError> {
        for (index, frame) in self.frames.iter().enumerate() {
            let mut numbers = vec![];
            if let Some(ms) = frame.frame_time_ms {
                numbers.push(("frame_time_ms", ms, true));
            }
            if let Some(look) = frame.look {
                numbers.push(("look.yaw", look.yaw, false));
                numbers.push(("look.pitch", look.pitch, false));
            }
            for (field, value, non_negative) in numbers {
                if !value.is_finite() || (non_negative && value < 0.0) {
                    return Err(ScriptError::InvalidNumber {
                        path: origin.to_path_buf(),
                        index,
                        field,
                        value,
                    });
                }
            }
        }
        Ok(())
    }

    /// Settle, walk, jump, sprint, turn, crouch-walk, stall one frame, coast.
    pub(crate) fn demo() -> Self {
        use InputAction::{Crouch, Forward, Jump, Sprint};

        let quarter_turn = ScriptFrame {
            look: Some(LookDelta {
                yaw: 628.0,
                pitch: 0.0,
            }),
            ..ScriptFrame::held(1, &[])
        };
        let stall = ScriptFrame {
            frame_time_ms: Some(250.0),
            ..ScriptFrame::held(1, &[Forward])
        };
        Self {
            frames: vec![
                ScriptFrame::held(30, &[]),
                ScriptFrame::held(60, &[Forward]),
                ScriptFrame::held(1, &[Forward, Jump]),
                ScriptFrame::held(60, &[Forward, Sprint]),
                quarter_turn,
                ScriptFrame::held(90, &[Forward, Crouch]),
                stall,
                ScriptFrame::held(60, &[]),
            ],
        }
    }
}
