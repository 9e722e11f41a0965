//! Domain models for the triage game.

mod department;
mod hospital;
mod outcome;
mod patient;

pub use department::*;
pub use hospital::*;
pub use outcome::*;
pub use patient::*;
