pub mod color;
pub mod domain;
pub mod error;
pub mod lyon;
pub mod types;
pub mod value;
