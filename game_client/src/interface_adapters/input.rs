// Input ports for headless runs and tests.

use crate::domain::{InputFrame, InputPort};
use std::collections::VecDeque;

/// Pointer parked mid-screen, button up, no keys.
#[derive(Debug, Clone, Copy)]
pub struct IdleInput {
    pub x: f32,
    pub y: f32,
}

impl Default for IdleInput {
    fn default() -> Self {
        Self { x: 640.0, y: 360.0 }
    }
}

impl InputPort for IdleInput {
    fn sample(&mut self) -> InputFrame {
        InputFrame::default().pointer_at(self.x, self.y, false)
    }
}

/// Replays queued frames, then repeats the last one.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
    last: InputFrame,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            last: InputFrame::default(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputPort for ScriptedInput {
    fn sample(&mut self) -> InputFrame {
        if let Some(frame) = self.frames.pop_front() {
            self.last = frame;
            return self.last.clone();
        }
        // Repeat position and held keys, but never replay key-down events or clicks.
        InputFrame {
            key_events: Vec::new(),
            upgrade_clicked: None,
            ..self.last.clone()
        }
    }
}
