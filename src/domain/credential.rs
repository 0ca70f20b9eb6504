use crate::error::{Result, WorkflowError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The payment service provider a credential authenticates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    Worldpay,
    Stripe,
    Sandbox,
}

impl PaymentProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentProvider::Worldpay => "worldpay",
            PaymentProvider::Stripe => "stripe",
            PaymentProvider::Sandbox => "sandbox",
        }
    }
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a credential record.
///
/// Valid transitions:
/// - `Created` -> `Entered` (values saved, not yet checked)
/// - `Entered` -> `Verified` (a check call against the PSP succeeded)
/// - `Verified` -> `Active` (switch completed, credential is now in use)
/// - `Active` -> `Retired` (superseded by a completed switch)
///
/// Discarding entered values produces a fresh `Created` record rather than
/// moving an existing record backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialState {
    Created,
    Entered,
    Verified,
    Active,
    Retired,
}

impl CredentialState {
    pub fn can_transition_to(self, next: CredentialState) -> bool {
        use CredentialState::*;
        matches!(
            (self, next),
            (Created, Entered) | (Entered, Verified) | (Verified, Active) | (Active, Retired)
        )
    }

    /// Values on a locked credential can no longer be edited.
    pub fn is_locked(self) -> bool {
        matches!(
            self,
            CredentialState::Verified | CredentialState::Active | CredentialState::Retired
        )
    }
}

impl fmt::Display for CredentialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CredentialState::Created => "CREATED",
            CredentialState::Entered => "ENTERED",
            CredentialState::Verified => "VERIFIED",
            CredentialState::Active => "ACTIVE",
            CredentialState::Retired => "RETIRED",
        };
        f.write_str(name)
    }
}

/// A Worldpay merchant code and username. Passwords never reach the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldpayMerchantCredential {
    pub merchant_code: String,
    pub username: String,
}

impl WorldpayMerchantCredential {
    pub fn new(merchant_code: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            merchant_code: merchant_code.into(),
            username: username.into(),
        }
    }
}

/// Sub-credentials held by a credential record. Which ones matter depends
/// on the provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_off_customer_initiated: Option<WorldpayMerchantCredential>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_customer_initiated: Option<WorldpayMerchantCredential>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_merchant_initiated: Option<WorldpayMerchantCredential>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe_account_id: Option<String>,
}

impl Credentials {
    /// Both the CIT and MIT credentials are present.
    pub fn has_recurring(&self) -> bool {
        self.recurring_customer_initiated.is_some() && self.recurring_merchant_initiated.is_some()
    }
}

/// A single set of values entered by the merchant for a credential record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialUpdate {
    OneOffCustomerInitiated(WorldpayMerchantCredential),
    RecurringCustomerInitiated(WorldpayMerchantCredential),
    RecurringMerchantInitiated(WorldpayMerchantCredential),
    StripeAccount(String),
}

impl CredentialUpdate {
    pub fn provider(&self) -> PaymentProvider {
        match self {
            CredentialUpdate::StripeAccount(_) => PaymentProvider::Stripe,
            _ => PaymentProvider::Worldpay,
        }
    }
}

/// One configured PSP credential set attached to a gateway account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayAccountCredential {
    pub external_id: String,
    pub payment_provider: PaymentProvider,
    pub state: CredentialState,
    #[serde(default)]
    pub credentials: Credentials,
}

impl GatewayAccountCredential {
    /// Provisions an empty credential slot in the `Created` state.
    pub fn new(external_id: impl Into<String>, payment_provider: PaymentProvider) -> Self {
        Self {
            external_id: external_id.into(),
            payment_provider,
            state: CredentialState::Created,
            credentials: Credentials::default(),
        }
    }

    pub fn has_minimum_credentials(&self) -> bool {
        match self.payment_provider {
            PaymentProvider::Worldpay => {
                self.credentials.one_off_customer_initiated.is_some()
                    || self.credentials.has_recurring()
            }
            PaymentProvider::Stripe => self.credentials.stripe_account_id.is_some(),
            PaymentProvider::Sandbox => true,
        }
    }

    /// Moves the record to `next`, enforcing the transition table and the
    /// minimum-credentials guard on verification.
    pub fn transition_to(&mut self, next: CredentialState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(WorkflowError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        if next == CredentialState::Verified && !self.has_minimum_credentials() {
            return Err(WorkflowError::MissingRequiredCredentials(
                self.external_id.clone(),
            ));
        }
        self.state = next;
        Ok(())
    }

    /// Saves entered values. A `Created` record becomes `Entered`; an
    /// `Entered` record stays `Entered`.
    pub fn enter_credentials(&mut self, update: CredentialUpdate) -> Result<()> {
        if self.state.is_locked() {
            return Err(WorkflowError::CredentialLocked(
                self.external_id.clone(),
                self.state,
            ));
        }
        if update.provider() != self.payment_provider {
            return Err(WorkflowError::ProviderMismatch(self.payment_provider));
        }

        match update {
            CredentialUpdate::OneOffCustomerInitiated(value) => {
                self.credentials.one_off_customer_initiated = Some(value)
            }
            CredentialUpdate::RecurringCustomerInitiated(value) => {
                self.credentials.recurring_customer_initiated = Some(value)
            }
            CredentialUpdate::RecurringMerchantInitiated(value) => {
                self.credentials.recurring_merchant_initiated = Some(value)
            }
            CredentialUpdate::StripeAccount(id) => self.credentials.stripe_account_id = Some(id),
        }

        if self.state == CredentialState::Created {
            self.transition_to(CredentialState::Entered)?;
        }
        Ok(())
    }

    /// Discards unverified values by producing a fresh `Created` record for
    /// the same provider.
    pub fn reset(&self, new_external_id: impl Into<String>) -> Result<Self> {
        if self.state.is_locked() {
            return Err(WorkflowError::CredentialLocked(
                self.external_id.clone(),
                self.state,
            ));
        }
        Ok(Self::new(new_external_id, self.payment_provider))
    }
}
