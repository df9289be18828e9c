use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cpu vendor is empty")]
    EmptyVendor,

    #[error("cpu target (microarchitecture) is empty")]
    EmptyTarget,
}

pub type ModelResult<T> = Result<T, ModelError>;
