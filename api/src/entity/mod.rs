//! SeaORM entity definitions

pub mod members;
