pub mod abilities;
pub mod audio;
pub mod compute;
pub mod config;
pub mod constants;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod level;
pub mod physics;
pub mod player;
pub mod scene;
pub mod services;
