//! Gameplay core for Tilebeat: a lane-based tile tapping game with special
//! tiles and a letter-collection side objective.
//!
//! [`gameplay::session::GameSession`] owns all per-level state and returns
//! explicit [`gameplay::events::GameEvent`] values from every update step, so
//! a host (the desktop binary, the CLI simulator, tests) decides how to render
//! them and which sounds to play.

pub mod audio;
pub mod gameplay;
pub mod input;
pub mod rng;
pub mod time;
