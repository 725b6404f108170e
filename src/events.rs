//! Key-to-event lookup table
//!
//! One flat table, built once, mapping each bound key to either a gate or a
//! note request. Keys outside the table mean "do nothing" - the caller gets
//! `None` and moves on.

use crate::note::PitchClass;
use crate::state::{Gate, ROTATION_STEP};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// A discrete input event: apply a gate, or sonify the state at a pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Gate(Gate),
    Note(PitchClass),
}

lazy_static! {
    static ref KEYMAP: HashMap<char, InputEvent> = {
        use InputEvent::{Gate as G, Note as N};
        let mut m = HashMap::new();
        // Gates: Hadamard on h, Paulis on the digit row, rotations on
        // x/y/z with case picking the sign.
        m.insert('h', G(Gate::H));
        m.insert('1', G(Gate::X));
        m.insert('2', G(Gate::Y));
        m.insert('3', G(Gate::Z));
        m.insert('x', G(Gate::Rx(ROTATION_STEP)));
        m.insert('y', G(Gate::Ry(ROTATION_STEP)));
        m.insert('z', G(Gate::Rz(ROTATION_STEP)));
        m.insert('X', G(Gate::Rx(-ROTATION_STEP)));
        m.insert('Y', G(Gate::Ry(-ROTATION_STEP)));
        m.insert('Z', G(Gate::Rz(-ROTATION_STEP)));
        // Notes: naturals on their letter, sharps on the shifted letter
        // (except e/b, which have no sharp key).
        m.insert('c', N(PitchClass::C));
        m.insert('C', N(PitchClass::Cs));
        m.insert('d', N(PitchClass::D));
        m.insert('D', N(PitchClass::Ds));
        m.insert('e', N(PitchClass::E));
        m.insert('f', N(PitchClass::F));
        m.insert('F', N(PitchClass::Fs));
        m.insert('g', N(PitchClass::G));
        m.insert('G', N(PitchClass::Gs));
        m.insert('a', N(PitchClass::A));
        m.insert('A', N(PitchClass::As));
        m.insert('b', N(PitchClass::B));
        m
    };
}

/// Look up the event bound to a key, if any.
pub fn lookup(key: char) -> Option<InputEvent> {
    KEYMAP.get(&key).copied()
}

/// The full binding table, sorted by key, for the `keys` help listing.
pub fn bindings() -> Vec<(char, InputEvent)> {
    let mut all: Vec<_> = KEYMAP.iter().map(|(&k, &v)| (k, v)).collect();
    all.sort_by_key(|&(k, _)| k);
    all
}
