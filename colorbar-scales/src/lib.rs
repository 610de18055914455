pub mod array;
pub mod axis_scale;
pub mod band;
pub mod color;
pub mod error;
pub mod formatter;
pub mod kind;
pub mod numeric;
pub mod ordinal;
pub mod temporal;
