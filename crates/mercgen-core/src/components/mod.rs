//! Component definitions stored in the campaign world.
//!
//! Components are plain data; the generation stages own the behaviour.

mod people;
mod units;

pub use people::*;
pub use units::*;
