//! Recorded clips and their ordered store

mod reference;
mod store;

pub use reference::{ClipIndex, ClipReference};
pub use store::ClipStore;
