// Core utilities shared by the engine and the demo

pub mod config;
pub mod math;
