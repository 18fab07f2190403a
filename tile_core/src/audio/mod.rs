pub mod assets;
pub mod backend;
pub mod manager;
pub mod mixer;
