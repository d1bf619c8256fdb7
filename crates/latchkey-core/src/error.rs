use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Code entry errors
    #[error("Invalid digit: {0}")]
    InvalidDigit(String),

    #[error("Invalid code length: {0}")]
    InvalidCodeLength(String),

    // Pin configuration errors
    #[error("Invalid pin: {0}")]
    InvalidPin(String),

    #[error("Duplicate pin assignment: pin {pin} used for both {first} and {second}")]
    DuplicatePinAssignment {
        pin: u8,
        first: String,
        second: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
