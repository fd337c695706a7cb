pub mod components;
pub mod controllers;
pub mod core;
pub mod physics;
pub mod world;

pub use world::*;
