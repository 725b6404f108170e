//! Mubit CLI - live qubit instrument and offline renderer

use clap::{Parser, Subcommand};
use mubit::events::{bindings, InputEvent};
use mubit::note::PitchClass;
use mubit::playback::PlaybackSink;
use mubit::render::{write_wav, BufferStats};
use mubit::session::{Session, Update};
use mubit::sonify::sonify;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mubit")]
#[command(about = "Play a single qubit like an instrument", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: gate keys steer the qubit, note keys play it
    Live,

    /// Apply a key sequence to |0>, sonify one note, write a WAV
    Render {
        /// Output WAV file path
        output: PathBuf,

        /// Gate key sequence applied before rendering, e.g. "hxz" or "1YZ"
        #[arg(short, long, default_value = "")]
        gates: String,

        /// Pitch to render (C, C#, Db, ... B)
        #[arg(short, long, default_value = "A")]
        note: String,
    },

    /// Print the key bindings
    Keys,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Live) {
        Commands::Live => live(),
        Commands::Render {
            output,
            gates,
            note,
        } => render(&output, &gates, &note),
        Commands::Keys => {
            print_keys();
            Ok(())
        }
    }
}

/// Raw-mode key loop: one keystroke, one event, one readout line.
fn live() -> Result<(), Box<dyn std::error::Error>> {
    use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
    use crossterm::terminal;

    let sink = PlaybackSink::new()?;
    let mut session = Session::new();

    println!("Mubit - one qubit, twelve notes");
    println!("Gate keys: h 1 2 3 x y z X Y Z   Note keys: c C d D e f F g G a A b");
    println!("Esc or Ctrl+C quits. `mubit keys` lists everything.");
    println!();
    print_state(&session, None);

    terminal::enable_raw_mode()?;
    let result = (|| -> Result<(), Box<dyn std::error::Error>> {
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Char(c) => match session.handle_key(c) {
                    Ok(Update::Gate(gate)) => {
                        print!("{:<4}", gate.name());
                        print_state(&session, None);
                    }
                    Ok(Update::Note { pitch, buffer }) => {
                        sink.enqueue(buffer);
                        print!("{:<4}", pitch.name());
                        print_state(&session, Some(pitch));
                    }
                    Ok(Update::Ignored) => {}
                    Err(e) => {
                        tracing::warn!("skipped event: {e}");
                    }
                },
                _ => {}
            }
        }
    })();
    terminal::disable_raw_mode()?;
    println!();

    // Let queued tones finish before tearing the stream down.
    while !sink.is_idle() {
        std::thread::sleep(std::time::Duration::from_millis(50));
    }
    result
}

/// One-line state readout. Raw mode needs the explicit \r\n.
fn print_state(session: &Session, note: Option<PitchClass>) {
    let state = session.state();
    let (theta, phi) = state.bloch_angles();
    let [x, y, z] = state.bloch_vector();
    let note = note.map(|p| p.name()).unwrap_or("-");
    print!(
        "a0 = {:+.3}{:+.3}i  a1 = {:+.3}{:+.3}i  theta = {:.3}  phi = {:.3}  bloch = ({:+.2}, {:+.2}, {:+.2})  note = {}\r\n",
        state.a0.re, state.a0.im, state.a1.re, state.a1.im, theta, phi, x, y, z, note
    );
}

fn render(output: &std::path::Path, gates: &str, note: &str) -> Result<(), Box<dyn std::error::Error>> {
    let pitch = PitchClass::from_name(note)
        .ok_or_else(|| format!("unknown pitch {note:?} (expected C, C#, Db, ... B)"))?;

    let mut session = Session::new();
    for key in gates.chars() {
        match session.handle_key(key)? {
            Update::Gate(gate) => println!("applied {}", gate.name()),
            Update::Note { .. } => {
                // Note keys in the sequence are meaningless offline; the
                // tone that matters is the one rendered below.
                println!("skipping note key {key:?} in gate sequence");
            }
            Update::Ignored => println!("ignoring unbound key {key:?}"),
        }
    }

    let buffer = sonify(session.state(), pitch, session.config());
    write_wav(output, &buffer)?;

    let (theta, phi) = session.state().bloch_angles();
    println!();
    println!("Rendered {} at theta = {theta:.3}, phi = {phi:.3}", pitch.name());
    BufferStats::from_buffer(&buffer).print_summary();
    println!("Wrote {}", output.display());
    Ok(())
}

fn print_keys() {
    println!("Key bindings:");
    for (key, event) in bindings() {
        match event {
            InputEvent::Gate(gate) => match gate {
                mubit::Gate::Rx(a) | mubit::Gate::Ry(a) | mubit::Gate::Rz(a) => {
                    let sign = if a >= 0.0 { "+" } else { "-" };
                    println!("  {key}  apply {}({sign}pi/6)", gate.name());
                }
                _ => println!("  {key}  apply {}", gate.name()),
            },
            InputEvent::Note(pitch) => {
                println!("  {key}  play {} ({:.2} Hz)", pitch.name(), pitch.frequency());
            }
        }
    }
}
