//! End-to-end checks of the keystroke -> gate -> tone pipeline
//!
//! We are "deaf" here the same way the audio tests always are: every claim
//! about sound is verified through sample analysis, never by listening.

use mubit::render::{write_wav, BufferStats};
use mubit::session::{Session, Update};
use mubit::{PitchClass, StereoBuffer};

fn play(session: &mut Session, key: char) -> StereoBuffer {
    match session.handle_key(key).unwrap() {
        Update::Note { buffer, .. } => buffer,
        other => panic!("key {key:?} should play a note, got {other:?}"),
    }
}

#[test]
fn every_note_is_half_a_second_regardless_of_state() {
    let mut session = Session::new();
    for (gate_key, note_key) in [('h', 'c'), ('x', 'D'), ('1', 'F'), ('Z', 'b'), ('y', 'G')] {
        session.handle_key(gate_key).unwrap();
        let buffer = play(&mut session, note_key);
        assert_eq!(buffer.frames(), 22050);
        assert_eq!(buffer.sample_rate, 44100);
    }
}

#[test]
fn fresh_session_pans_hard_left_at_the_requested_pitch() {
    let mut session = Session::new();
    let buffer = play(&mut session, 'c');
    let stats = BufferStats::from_buffer(&buffer);

    let expected = PitchClass::C.frequency();
    assert!(
        (stats.left.est_frequency - expected).abs() < 5.0,
        "left should sit near {expected} Hz, got {}",
        stats.left.est_frequency
    );
    assert_eq!(stats.right.peak, 0.0, "right must be silent for |0>");
    assert!((stats.left.peak - 1.0).abs() < 1e-3, "left peaks at full scale");
}

#[test]
fn pauli_x_moves_all_energy_to_the_right_channel() {
    let mut session = Session::new();
    session.handle_key('1').unwrap();
    let buffer = play(&mut session, 'e');
    let stats = BufferStats::from_buffer(&buffer);

    assert!(stats.left.peak < 1e-3, "left must be silent for |1>");
    assert!((stats.right.peak - 1.0).abs() < 1e-3);
    // theta = pi keeps phi at 0, so no pitch bend on the right.
    let expected = PitchClass::E.frequency();
    assert!((stats.right.est_frequency - expected).abs() < 5.0);
}

#[test]
fn double_hadamard_restores_the_opening_sound() {
    let mut session = Session::new();
    let before = play(&mut session, 'g');
    session.handle_key('h').unwrap();
    session.handle_key('h').unwrap();
    let after = play(&mut session, 'g');

    // Identical pitch, identical channel split, sample for sample.
    assert_eq!(before.samples, after.samples);
}

#[test]
fn rotation_pairs_cancel_across_the_keyboard() {
    let mut session = Session::new();
    session.handle_key('h').unwrap();
    let before = play(&mut session, 'a');
    for pair in ["xX", "yY", "zZ"] {
        for key in pair.chars() {
            session.handle_key(key).unwrap();
        }
    }
    let after = play(&mut session, 'a');
    // The state round-trips up to rounding, so samples may sit one
    // quantization step apart at worst.
    assert_eq!(before.samples.len(), after.samples.len());
    for (i, (&b, &a)) in before.samples.iter().zip(&after.samples).enumerate() {
        assert!(
            (i32::from(b) - i32::from(a)).abs() <= 1,
            "sample {i} drifted: {b} vs {a}"
        );
    }
}

#[test]
fn a_long_performance_never_denormalizes_or_missizes() {
    let mut session = Session::new();
    let script = "hx2yYc3zZXdh1eXYZfxyzg";
    for _ in 0..4 {
        for key in script.chars() {
            if let Update::Note { buffer, .. } = session.handle_key(key).unwrap() {
                assert_eq!(buffer.frames(), 22050);
            }
            assert!(session.state().is_normalized());
        }
    }
}

#[test]
fn rendered_wav_matches_the_tone_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plus_state.wav");

    let mut session = Session::new();
    session.handle_key('h').unwrap();
    let buffer = play(&mut session, 'a');
    write_wav(&path, &buffer).unwrap();

    let mut reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().channels, 2);
    assert_eq!(reader.spec().sample_rate, 44100);
    assert_eq!(reader.duration(), 22050);
    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples, buffer.samples);
}

#[test]
fn unbound_keys_change_nothing_audible() {
    let mut session = Session::new();
    session.handle_key('h').unwrap();
    let before = play(&mut session, 'd');
    for key in "qw45!@ #\t".chars() {
        assert_eq!(session.handle_key(key).unwrap(), Update::Ignored);
    }
    let after = play(&mut session, 'd');
    assert_eq!(before.samples, after.samples);
}
