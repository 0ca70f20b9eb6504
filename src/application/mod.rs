//! Application layer orchestrating the onboarding and provider-switch
//! journeys.
//!
//! This module defines the `OnboardingService`, which loads account
//! snapshots through the storage port, asks the task engine for task lists,
//! and applies credential state changes.

pub mod onboarding;
