pub mod export;
pub mod names;
