use std::{fmt::{Debug, Display}, num::NonZeroU8};

use rand::{Rng, random_range};

/// A single roll of a fair six-sided die. Always holds a value in `1..=6`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Roll {
    pips: NonZeroU8,
}

const FACES: [&str; 6] = ["1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣"];

impl Roll {
    pub const ALL: [Self; 6] = [
        Roll::from_pips(1), Roll::from_pips(2), Roll::from_pips(3),
        Roll::from_pips(4), Roll::from_pips(5), Roll::from_pips(6),
    ];

    const fn from_pips(pips: u8) -> Self {
        Roll { pips: NonZeroU8::new(pips).unwrap() }
    }

    /// Returns `None` unless `pips` is in `1..=6`.
    pub fn new(pips: u8) -> Option<Self> {
        match pips {
            1..=6 => Some(Roll::from_pips(pips)),
            _ => None,
        }
    }

    pub fn roll() -> Self {
        Roll::from_pips(random_range(1..=6))
    }

    /// Rolls with an injected source, so tests and simulations can seed it.
    pub fn roll_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Roll::from_pips(rng.random_range(1..=6))
    }

    pub fn value(&self) -> u8 {
        self.pips.get()
    }

    /// Keycap glyph for the face.
    pub fn face(&self) -> &'static str {
        FACES[self.value() as usize - 1]
    }
}

/// Upper bound on the frames [`roll_sequence`] produces.
pub const MAX_REVEAL_FRAMES: usize = 240;

/// Intermediate faces for a cosmetic reveal. The last frame is the real result,
/// every other frame is noise. Holds between one and [`MAX_REVEAL_FRAMES`] frames.
pub fn roll_sequence<R: Rng + ?Sized>(duration_ms: u32, fps: u32, rng: &mut R) -> Vec<Roll> {
    let frames = ((duration_ms as f64 / 1000.0) * fps as f64)
        .round()
        .clamp(1.0, MAX_REVEAL_FRAMES as f64) as usize;
    let mut sequence: Vec<Roll> = (0..frames).map(|_| Roll::roll_with(rng)).collect();
    let result = Roll::roll_with(rng);
    if let Some(last) = sequence.last_mut() {
        *last = result;
    }
    sequence
}

impl Debug for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Roll({})", self.value())
    }
}

impl Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}
