use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColorbarCommonError {
    #[error("Invalid color string: {0}")]
    InvalidColor(String),
}
