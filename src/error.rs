use crate::domain::credential::{CredentialState, PaymentProvider};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Gateway account has no current credential")]
    NoCurrentCredential,
    #[error("Gateway account has no switching credential")]
    NoSwitchingCredential,
    #[error("Gateway account has more than one switching credential")]
    AmbiguousSwitchingCredential,
    #[error("Provider switching is not enabled for gateway account {0}")]
    SwitchNotEnabled(String),
    #[error("Gateway account {0} has no active credential to switch from")]
    NoActiveCredential(String),
    #[error("A provider switch is already in progress for gateway account {0}")]
    SwitchInProgress(String),
    #[error("Gateway account already uses {0}")]
    SameProvider(PaymentProvider),
    #[error("No task rules for payment provider {0}")]
    UnsupportedProvider(PaymentProvider),
    #[error("Invalid credential transition from {from} to {to}")]
    InvalidTransition {
        from: CredentialState,
        to: CredentialState,
    },
    #[error("Credential {0} does not have the minimum required credentials")]
    MissingRequiredCredentials(String),
    #[error("Credential {0} is locked in state {1}")]
    CredentialLocked(String, CredentialState),
    #[error("Credential update does not apply to {0}")]
    ProviderMismatch(PaymentProvider),
    #[error("Gateway account not found: {0}")]
    AccountNotFound(String),
    #[error("Credential not found: {0}")]
    CredentialNotFound(String),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
