//! One session = one qubit
//!
//! The session owns the single mutable QubitState and threads it through
//! event handling; callers hold the session and feed it keys or events one
//! at a time. Gate events mutate the state, note events snapshot it into a
//! tone, anything else is ignored.

use crate::events::{lookup, InputEvent};
use crate::note::PitchClass;
use crate::sonify::{sonify, SonifyConfig, StereoBuffer};
use crate::state::{Gate, QubitState};
use tracing::debug;

/// What one processed event amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// A gate was applied; the session state already reflects it.
    Gate(Gate),
    /// A note was requested; the tone is ready for the playback sink.
    Note {
        pitch: PitchClass,
        buffer: StereoBuffer,
    },
    /// The input matched nothing; state untouched, no sound.
    Ignored,
}

/// Holds the session's qubit and sonification format.
pub struct Session {
    state: QubitState,
    config: SonifyConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Start a fresh session in |0> with the fixed 44.1 kHz / 0.5 s format.
    pub fn new() -> Self {
        Self {
            state: QubitState::zero(),
            config: SonifyConfig::default(),
        }
    }

    /// Read-only view of the current state, for any visualization consumer.
    pub fn state(&self) -> &QubitState {
        &self.state
    }

    pub fn config(&self) -> &SonifyConfig {
        &self.config
    }

    /// Process one raw keystroke. Unbound keys come back as `Ignored`.
    pub fn handle_key(&mut self, key: char) -> Result<Update, String> {
        match lookup(key) {
            Some(event) => self.handle_event(event),
            None => Ok(Update::Ignored),
        }
    }

    /// Process one already-decoded event.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<Update, String> {
        match event {
            InputEvent::Gate(gate) => {
                self.state = self.state.apply(gate)?;
                let (theta, phi) = self.state.bloch_angles();
                debug!(gate = gate.name(), theta, phi, "applied gate");
                Ok(Update::Gate(gate))
            }
            InputEvent::Note(pitch) => {
                let buffer = sonify(&self.state, pitch, &self.config);
                debug!(pitch = pitch.name(), frames = buffer.frames(), "sonified state");
                Ok(Update::Note { pitch, buffer })
            }
        }
    }
}
