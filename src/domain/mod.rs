//! Domain layer: gateway accounts, credential records and their lifecycle,
//! setup tasks, and the storage port.

pub mod account;
pub mod credential;
pub mod ports;
pub mod task;
