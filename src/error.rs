// src/error.rs
use std::fmt;

#[derive(Debug)]
pub enum ContractError {
    AlreadyExists(String),
    NotFound(String),
    Serialize(String),
    Deserialize(String),
    Storage(String),
    UnknownTransaction(String),
    InvalidArguments { expected: usize, supplied: usize },
    DuplicateContract(String),
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists(id) => write!(f, "The roshan asset {} already exists", id),
            Self::NotFound(id) => write!(f, "The roshan asset {} does not exist", id),
            Self::Serialize(msg) => write!(f, "Serialization error: {}", msg),
            Self::Deserialize(msg) => write!(f, "Deserialization error: {}", msg),
            Self::Storage(msg) => write!(f, "Storage error: {}", msg),
            Self::UnknownTransaction(name) => write!(
                f,
                "You've asked to invoke a function that does not exist: {}",
                name
            ),
            Self::InvalidArguments { expected, supplied } => write!(
                f,
                "Expected {} parameters, but {} have been supplied",
                expected, supplied
            ),
            Self::DuplicateContract(name) => {
                write!(f, "Contract {} is already registered", name)
            }
        }
    }
}

impl std::error::Error for ContractError {}

impl From<serde_json::Error> for ContractError {
    fn from(err: serde_json::Error) -> Self {
        Self::Deserialize(err.to_string())
    }
}

impl ContractError {
    /// Short label used for log fields and metric tags.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AlreadyExists(_) => "already_exists",
            Self::NotFound(_) => "not_found",
            Self::Serialize(_) => "serialize",
            Self::Deserialize(_) => "deserialize",
            Self::Storage(_) => "storage",
            Self::UnknownTransaction(_) => "unknown_transaction",
            Self::InvalidArguments { .. } => "invalid_arguments",
            Self::DuplicateContract(_) => "duplicate_contract",
        }
    }
}
