//! Building blocks for the hourly notification player: config, file index,
//! active-hour window and the non-repeating rotation.

pub mod config;
pub mod error;
pub mod index;
pub mod platform;
pub mod rotation;
pub mod window;

pub use error::{ChimeError, Result};
