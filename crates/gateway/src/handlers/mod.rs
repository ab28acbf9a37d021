//! API handlers module

pub mod health;
pub mod citations;
pub mod search;
pub mod export;
