pub mod conductor;
pub mod timers;
