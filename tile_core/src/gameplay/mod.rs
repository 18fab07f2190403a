pub mod effects;
pub mod events;
pub mod hud;
pub mod score;
pub mod session;
pub mod spawner;
pub mod tile;
pub mod words;
