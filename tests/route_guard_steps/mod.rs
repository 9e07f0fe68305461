//! Step definitions for route guard BDD scenarios.

mod given;
mod then;
mod when;
pub mod world;
