pub mod axis;
pub mod error;
pub mod handle;
pub mod legend;
