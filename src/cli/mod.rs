pub mod build;
pub mod draw;
pub mod load;
pub mod query;
pub mod verify;
