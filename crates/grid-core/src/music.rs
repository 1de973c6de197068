use rand::Rng;
use smallvec::SmallVec;
use thiserror::Error;

/// D# minor scale backing the pointer-down note bursts.
pub const DS_MINOR_SCALE: [&str; 8] = ["D#4", "F4", "F#4", "G#4", "A#4", "B4", "C#5", "D#5"];

/// Notes played simultaneously on each pointer-down.
pub const BURST_SIZE: usize = 4;

/// One eighth note at the default 120 BPM transport.
pub const EIGHTH_NOTE_SEC: f64 = 0.25;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NoteError {
    #[error("unrecognized note name: {0}")]
    Unrecognized(String),
}

/// Parse a note name like `D#4` or `Bb3` into its MIDI number (C4 = 60).
pub fn note_to_midi(name: &str) -> Result<i32, NoteError> {
    let unrecognized = || NoteError::Unrecognized(name.to_string());
    let mut chars = name.chars();
    let letter = chars.next().ok_or_else(unrecognized)?;
    let base = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return Err(unrecognized()),
    };
    let rest = chars.as_str();
    let (accidental, octave_str) = match rest.chars().next() {
        Some('#') => (1, &rest[1..]),
        Some('b') => (-1, &rest[1..]),
        _ => (0, rest),
    };
    let octave: i32 = octave_str.parse().map_err(|_| unrecognized())?;
    Ok((octave + 1) * 12 + base + accidental)
}

pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}

/// Convert a dB fader value to a linear gain.
pub fn db_to_gain(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Pick `BURST_SIZE` scale notes uniformly, with replacement.
pub fn random_burst(rng: &mut impl Rng) -> SmallVec<[&'static str; BURST_SIZE]> {
    (0..BURST_SIZE)
        .map(|_| DS_MINOR_SCALE[rng.gen_range(0..DS_MINOR_SCALE.len())])
        .collect()
}
