//! Playback state for a generated step sequence.
//!
//! The player is a plain state machine: a driver calls [`Player::tick`] once
//! per fixed period (one second) and renders `current()`/`time_left()`. It
//! holds no timers of its own, so abandoning it mid-workout needs no cleanup.

use crate::TimedStep;

#[derive(Clone, Debug)]
pub struct Player {
    steps: Vec<TimedStep>,
    index: usize,
    time_left: u32,
    playing: bool,
    started: bool,
}

impl Player {
    pub fn new(steps: Vec<TimedStep>) -> Self {
        let time_left = steps.first().map(TimedStep::duration_seconds).unwrap_or(0);
        Self {
            steps,
            index: 0,
            time_left,
            playing: false,
            started: false,
        }
    }

    pub fn steps(&self) -> &[TimedStep] {
        &self.steps
    }

    pub fn current(&self) -> Option<&TimedStep> {
        self.steps.get(self.index)
    }

    /// Step that follows the current one, if any
    pub fn upcoming(&self) -> Option<&TimedStep> {
        self.steps.get(self.index + 1)
    }

    /// 1-based position of the current step
    pub fn position(&self) -> usize {
        self.index + 1
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Last step reached and its time has run out
    pub fn is_complete(&self) -> bool {
        self.steps.is_empty() || (self.index + 1 == self.steps.len() && self.time_left == 0)
    }

    pub fn start(&mut self) {
        self.started = true;
        self.playing = !self.is_complete();
    }

    /// Pause/resume; the first toggle starts playback
    pub fn toggle(&mut self) {
        if !self.started {
            self.start();
        } else if !self.is_complete() {
            self.playing = !self.playing;
        }
    }

    /// Advance the clock by one period
    ///
    /// Returns true when the current step changed. A step with zero time
    /// left moves on immediately, matching how the last second of a step
    /// hands over to the next one.
    pub fn tick(&mut self) -> bool {
        if !self.playing || self.is_complete() {
            return false;
        }

        if self.time_left > 1 {
            self.time_left -= 1;
            return false;
        }

        if self.index + 1 < self.steps.len() {
            self.jump_to(self.index + 1);
            self.playing = true;
            true
        } else {
            self.time_left = 0;
            self.playing = false;
            tracing::debug!("Playback finished after {} steps", self.steps.len());
            false
        }
    }

    /// Skip to the next step and pause
    pub fn next(&mut self) -> bool {
        if self.index + 1 >= self.steps.len() {
            return false;
        }
        self.jump_to(self.index + 1);
        true
    }

    /// Go back one step and pause
    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.jump_to(self.index - 1);
        true
    }

    fn jump_to(&mut self, index: usize) {
        self.index = index;
        self.time_left = self.steps[index].duration_seconds();
        self.playing = false;
    }
}

/// Format a second count as `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
