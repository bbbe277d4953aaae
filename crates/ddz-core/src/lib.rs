#![deny(warnings)]

pub mod game;
pub mod model;
pub mod moves;
