//! Task workflow engine for PSP onboarding and provider switching.
//!
//! Given a gateway account and one of its credentials, the engine derives
//! the ordered list of setup tasks with their statuses, and the credential
//! state machine decides when a credential moves from created to entered,
//! verified, active and finally retired.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
pub mod rules;
