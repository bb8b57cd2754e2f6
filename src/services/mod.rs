// src/services/mod.rs

pub mod fetch;
pub mod normalize;
pub mod render;
pub mod returns;
pub mod table;
