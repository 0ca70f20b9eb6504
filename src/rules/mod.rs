//! Per-provider task generators.
//!
//! Each provider implements [`ProviderRules`] once; [`rules_for`] is the
//! lookup table from provider to rule set. Generators are pure: the same
//! account, credential and journey always yield the same ordered list.

mod stripe;
mod worldpay;

pub use stripe::StripeRules;
pub use worldpay::WorldpayRules;

use crate::domain::account::GatewayAccount;
use crate::domain::credential::{CredentialState, GatewayAccountCredential, PaymentProvider};
use crate::domain::task::{JourneyContext, Task, TaskKind, TaskStatus, Tasks};
use crate::error::{Result, WorkflowError};

/// Everything a generator reads for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct TaskInput<'a> {
    pub account: &'a GatewayAccount,
    pub service_external_id: &'a str,
    pub credential: &'a GatewayAccountCredential,
    pub context: JourneyContext,
}

impl TaskInput<'_> {
    pub fn is_verified(&self) -> bool {
        self.credential.state == CredentialState::Verified
    }

    /// Builds a task of `kind` with text and href for this account.
    pub fn task(&self, kind: TaskKind, status: TaskStatus) -> Task {
        let account_type = self.account.r#type;
        Task::new(
            kind,
            kind.link_text(account_type),
            kind.href(
                self.service_external_id,
                account_type,
                &self.credential.external_id,
            ),
            status,
        )
    }
}

pub trait ProviderRules: Send + Sync {
    fn provider(&self) -> PaymentProvider;

    /// Derives the ordered task list for one evaluation.
    fn tasks(&self, input: &TaskInput<'_>) -> Vec<Task>;
}

static WORLDPAY: WorldpayRules = WorldpayRules;
static STRIPE: StripeRules = StripeRules;

pub fn rules_for(provider: PaymentProvider) -> Result<&'static dyn ProviderRules> {
    match provider {
        PaymentProvider::Worldpay => Ok(&WORLDPAY),
        PaymentProvider::Stripe => Ok(&STRIPE),
        PaymentProvider::Sandbox => Err(WorkflowError::UnsupportedProvider(provider)),
    }
}

/// Status of a credential-entry task. A verified credential locks every
/// entry task that has a value.
pub(crate) fn entry_status(present: bool, verified: bool) -> TaskStatus {
    match (present, verified) {
        (false, _) => TaskStatus::NotStarted,
        (true, true) => TaskStatus::CompletedCannotStart,
        (true, false) => TaskStatus::Completed,
    }
}

/// Status of the "make a live payment" task. Verification beats blocking.
pub(crate) fn verification_status(ready: bool, verified: bool) -> TaskStatus {
    match (verified, ready) {
        (true, _) => TaskStatus::CompletedCannotStart,
        (false, false) => TaskStatus::CannotStart,
        (false, true) => TaskStatus::Completed,
    }
}

impl Tasks {
    /// Builds the task list for `credential` on `account`.
    ///
    /// Fails when no credential is supplied: for `Creating` the account has
    /// no current credential, for `Switching` no switching credential.
    pub fn build(
        account: &GatewayAccount,
        service_external_id: &str,
        credential: Option<&GatewayAccountCredential>,
        context: JourneyContext,
    ) -> Result<Self> {
        let credential = credential.ok_or(match context {
            JourneyContext::Creating => WorkflowError::NoCurrentCredential,
            JourneyContext::Switching => WorkflowError::NoSwitchingCredential,
        })?;
        let rules = rules_for(credential.payment_provider)?;
        let input = TaskInput {
            account,
            service_external_id,
            credential,
            context,
        };
        Ok(Tasks::new(rules.provider(), context, rules.tasks(&input)))
    }

    /// Builds the task list for the credential the journey works on: the
    /// current one when creating, the switching one when switching.
    pub fn for_journey(
        account: &GatewayAccount,
        service_external_id: &str,
        context: JourneyContext,
    ) -> Result<Self> {
        let credential = match context {
            JourneyContext::Creating => account.current_credential(),
            JourneyContext::Switching => Some(account.switching_credential()?),
        };
        Self::build(account, service_external_id, credential, context)
    }
}
