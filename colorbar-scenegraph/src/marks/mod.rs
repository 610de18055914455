pub mod group;
pub mod mark;
pub mod path;
pub mod rect;
pub mod rule;
pub mod text;
