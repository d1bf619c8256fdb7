use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControlError {
    #[error("Configuration error: {0}")]
    Config(#[from] latchkey_core::Error),

    #[error("Hardware error: {0}")]
    Hardware(#[from] latchkey_hardware::HardwareError),
}

pub type Result<T> = std::result::Result<T, ControlError>;
