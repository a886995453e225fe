//! Pure reversi rules engine.
//!
//! No I/O and no concurrency: everything here is a deterministic function
//! of board state. The session layer owns mutation and serialization.
//!
//! - [`Board`] — 8x8 grid with capture resolution and terminal detection
//! - [`Square`] — bounds-checked board coordinate
//! - [`Color`] / [`Cell`] — disc colors and square contents
//! - [`Outcome`] — terminal result (winner or draw)
mod board;
mod color;
mod square;

pub use board::*;
pub use color::*;
pub use square::*;
