use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invalid prober configuration: {0}")]
    InvalidConfig(String),
}
