//! SeaORM entities

pub mod defect;
pub mod project;
pub mod user;
