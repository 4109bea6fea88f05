//! Minefield engine: board generation with a safe first click, flood-fill
//! reveal, chording, flag cycling and win/loss detection.
//!
//! The crate owns no rendering, timing thread or storage. Hosts drive a
//! [`Session`] with board coordinates and repaint the cells listed in each
//! returned update.

#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use outcome::*;
pub use scores::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod error;
mod generator;
mod layout;
mod outcome;
mod scores;
mod session;
mod types;
