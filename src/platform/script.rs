//! Headless platform that replays a recorded input script

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::Platform;
use super::input::{InputEvent, PointerButton};
use crate::error::Result;

/// Input and elapsed time for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptFrame {
    /// Seconds since the previous frame
    pub dt: f64,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub frames: Vec<ScriptFrame>,
}

impl Script {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// `frames` frames of `dt` seconds, alternating circle and polygon
    /// clicks every `click_every` frames across the top of a `width` wide
    /// window
    pub fn demo(frames: usize, dt: f64, click_every: usize, width: f32) -> Self {
        let click_every = click_every.max(1);
        let clicks = frames.div_ceil(click_every).max(1);
        let frames = (0..frames)
            .map(|i| {
                let mut events = Vec::new();
                if i % click_every == 0 {
                    let n = i / click_every;
                    let button = if n % 2 == 0 {
                        PointerButton::Primary
                    } else {
                        PointerButton::Secondary
                    };
                    let x = width * (n as f32 + 0.5) / clicks as f32;
                    events.push(InputEvent::pointer_down(button, x, 100.0));
                }
                ScriptFrame { dt, events }
            })
            .collect();
        Self { frames }
    }
}

/// Platform fed from a [`Script`]; closes when the script runs out
pub struct ScriptedPlatform {
    frames: VecDeque<ScriptFrame>,
    frame_time: f64,
    close_requested: bool,
}

impl ScriptedPlatform {
    pub fn new(script: Script) -> Self {
        Self {
            frames: script.frames.into(),
            frame_time: 0.0,
            close_requested: false,
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl Platform for ScriptedPlatform {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        match self.frames.pop_front() {
            Some(frame) => {
                self.frame_time = frame.dt;
                if frame.events.contains(&InputEvent::CloseRequested) {
                    self.close_requested = true;
                }
                frame.events
            }
            None => {
                self.frame_time = 0.0;
                Vec::new()
            }
        }
    }

    fn frame_time(&mut self) -> f64 {
        self.frame_time
    }

    fn should_close(&self) -> bool {
        self.close_requested || self.frames.is_empty()
    }
}
