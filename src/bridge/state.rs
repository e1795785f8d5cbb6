//! Bridge invocation state
//!
//! Tracks a single invocation through
//! `Idle -> WritingInput -> Running -> ReadingOutput -> Done`, or `Failed`.

use log::debug;
use std::fmt;

/// Phase of a single bridge invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Idle,
    WritingInput,
    Running,
    ReadingOutput,
    Done,
    Failed,
}

impl BridgeState {
    /// Whether the invocation has finished, successfully or not.
    pub fn is_terminal(self) -> bool {
        matches!(self, BridgeState::Done | BridgeState::Failed)
    }

    /// The phase that follows this one on the success path.
    pub fn next(self) -> Option<BridgeState> {
        match self {
            BridgeState::Idle => Some(BridgeState::WritingInput),
            BridgeState::WritingInput => Some(BridgeState::Running),
            BridgeState::Running => Some(BridgeState::ReadingOutput),
            BridgeState::ReadingOutput => Some(BridgeState::Done),
            BridgeState::Done | BridgeState::Failed => None,
        }
    }
}

impl fmt::Display for BridgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BridgeState::Idle => "IDLE",
            BridgeState::WritingInput => "WRITING_INPUT",
            BridgeState::Running => "RUNNING",
            BridgeState::ReadingOutput => "READING_OUTPUT",
            BridgeState::Done => "DONE",
            BridgeState::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// State of one in-flight invocation.
#[derive(Debug)]
pub struct Invocation {
    id: u64,
    state: BridgeState,
}

impl Invocation {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            state: BridgeState::Idle,
        }
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    /// Moves to the next phase on the success path. Terminal states stay put.
    pub fn advance(&mut self) {
        if let Some(next) = self.state.next() {
            self.transition(next);
        }
    }

    /// Marks the invocation as failed unless it already finished.
    pub fn fail(&mut self) {
        if !self.state.is_terminal() {
            self.transition(BridgeState::Failed);
        }
    }

    fn transition(&mut self, next: BridgeState) {
        debug!("Invocation #{}: {} -> {}", self.id, self.state, next);
        self.state = next;
    }
}
