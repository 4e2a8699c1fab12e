use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid contact number \"{0}\": expected digits only")]
    InvalidContactNumber(String),

    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),
}
