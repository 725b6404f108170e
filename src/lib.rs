//! # Mubit - play a single qubit like an instrument
//!
//! Mubit keeps one two-level quantum state ("qubit") alive for the length of
//! a session, mutates it with keyboard-triggered unitary gates, and turns it
//! into sound on demand: a stereo tone whose channel balance encodes the
//! Bloch polar angle and whose right-channel pitch bend encodes the azimuthal
//! phase.
//!
//! ## Core pieces
//!
//! - [`state`] - the state vector and the fixed gate catalog (H, Paulis,
//!   axis rotations in pi/6 steps)
//! - [`sonify`] - the state-to-sound mapping: Bloch angles in, a normalized
//!   0.5 s stereo i16 buffer out
//! - [`events`] / [`session`] - key lookup table and the event loop core that
//!   threads the one mutable state through gate and note events
//! - [`playback`] - cpal sink draining a bounded queue of finished tones
//! - [`render`] - WAV export and "deaf" verification statistics
//!
//! ## Quick start
//!
//! ```rust
//! use mubit::session::{Session, Update};
//!
//! let mut session = Session::new();
//! session.handle_key('h').unwrap();       // Hadamard: |0> -> |+>
//! session.handle_key('x').unwrap();       // RX(+pi/6)
//! match session.handle_key('a').unwrap() {
//!     Update::Note { buffer, .. } => assert_eq!(buffer.frames(), 22050),
//!     other => panic!("expected a tone, got {other:?}"),
//! }
//! ```
//!
//! Presentation (window, sphere plot) and the audio device itself stay
//! outside the core: consumers read the state vector through
//! [`session::Session::state`] and receive buffers to play or write.

pub mod events;
pub mod note;
pub mod playback;
pub mod render;
pub mod session;
pub mod sonify;
pub mod state;

pub use events::InputEvent;
pub use note::PitchClass;
pub use session::{Session, Update};
pub use sonify::{sonify, synthesize, SonifyConfig, StereoBuffer};
pub use state::{Gate, QubitState};
