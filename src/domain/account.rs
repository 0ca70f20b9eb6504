use crate::domain::credential::{CredentialState, GatewayAccountCredential, PaymentProvider};
use crate::error::{Result, WorkflowError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Test,
    Live,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Test => "test",
            AccountType::Live => "live",
        }
    }
}

/// Worldpay 3DS Flex configuration. Only its presence drives task status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worldpay3dsFlex {
    pub organisational_unit_id: String,
    pub issuer: String,
    #[serde(default)]
    pub exemption_engine_enabled: bool,
}

/// Progress through the Stripe onboarding steps for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StripeAccountSetup {
    pub bank_account: bool,
    pub responsible_person: bool,
    pub director: bool,
    pub vat_number: bool,
    pub company_number: bool,
    pub organisation_details: bool,
    pub government_entity_document: bool,
}

impl StripeAccountSetup {
    /// Every onboarding step has been provided.
    pub fn completed() -> Self {
        Self {
            bank_account: true,
            responsible_person: true,
            director: true,
            vat_number: true,
            company_number: true,
            organisation_details: true,
            government_entity_document: true,
        }
    }

    pub fn is_complete(&self) -> bool {
        *self == Self::completed()
    }
}

/// Read model of a merchant's gateway account.
///
/// Holds the feature flags and credential records the task generators read.
/// The account has one current credential and, while a provider switch is in
/// progress, exactly one switching credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayAccount {
    pub gateway_account_id: u64,
    pub external_id: String,
    pub r#type: AccountType,
    #[serde(default)]
    pub recurring_enabled: bool,
    #[serde(default)]
    pub allow_moto: bool,
    #[serde(default)]
    pub provider_switch_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worldpay_3ds_flex: Option<Worldpay3dsFlex>,
    #[serde(default)]
    pub stripe_setup: StripeAccountSetup,
    #[serde(default)]
    pub credentials: Vec<GatewayAccountCredential>,
}

impl GatewayAccount {
    pub fn new(
        gateway_account_id: u64,
        external_id: impl Into<String>,
        r#type: AccountType,
    ) -> Self {
        Self {
            gateway_account_id,
            external_id: external_id.into(),
            r#type,
            recurring_enabled: false,
            allow_moto: false,
            provider_switch_enabled: false,
            worldpay_3ds_flex: None,
            stripe_setup: StripeAccountSetup::default(),
            credentials: Vec::new(),
        }
    }

    /// The credential in use: the only one when exactly one exists, else the
    /// `Active` one.
    pub fn current_credential(&self) -> Option<&GatewayAccountCredential> {
        self.current_index().map(|index| &self.credentials[index])
    }

    /// The credential being switched to. Only defined while provider
    /// switching is enabled.
    pub fn switching_credential(&self) -> Result<&GatewayAccountCredential> {
        self.switching_index().map(|index| &self.credentials[index])
    }

    /// Provider of the current credential.
    pub fn payment_provider(&self) -> Option<PaymentProvider> {
        self.current_credential().map(|c| c.payment_provider)
    }

    pub fn credential(&self, external_id: &str) -> Option<&GatewayAccountCredential> {
        self.credentials.iter().find(|c| c.external_id == external_id)
    }

    pub fn credential_mut(&mut self, external_id: &str) -> Option<&mut GatewayAccountCredential> {
        self.credentials
            .iter_mut()
            .find(|c| c.external_id == external_id)
    }

    /// Checks that a provider switch in progress has its switching credential.
    pub fn validate(&self) -> Result<()> {
        if self.provider_switch_enabled {
            self.switching_index()?;
        }
        Ok(())
    }

    pub(crate) fn current_index(&self) -> Option<usize> {
        if self.credentials.len() == 1 {
            return Some(0);
        }
        self.credentials
            .iter()
            .position(|c| c.state == CredentialState::Active)
    }

    pub(crate) fn switching_index(&self) -> Result<usize> {
        if !self.provider_switch_enabled {
            return Err(WorkflowError::SwitchNotEnabled(self.external_id.clone()));
        }

        let current = self.current_index();
        let mut candidates = self
            .credentials
            .iter()
            .enumerate()
            .filter(|(index, credential)| {
                Some(*index) != current
                    && matches!(
                        credential.state,
                        CredentialState::Created
                            | CredentialState::Entered
                            | CredentialState::Verified
                    )
            })
            .map(|(index, _)| index);

        match (candidates.next(), candidates.next()) {
            (Some(index), None) => Ok(index),
            (None, _) => Err(WorkflowError::NoSwitchingCredential),
            (Some(_), Some(_)) => Err(WorkflowError::AmbiguousSwitchingCredential),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(
        id: &str,
        provider: PaymentProvider,
        state: CredentialState,
    ) -> GatewayAccountCredential {
        let mut credential = GatewayAccountCredential::new(id, provider);
        credential.state = state;
        credential
    }

    #[test]
    fn test_single_credential_is_current() {
        let mut account = GatewayAccount::new(1, "acc-1", AccountType::Test);
        assert!(account.current_credential().is_none());

        account
            .credentials
            .push(credential("c1", PaymentProvider::Worldpay, CredentialState::Created));
        assert_eq!(account.current_credential().unwrap().external_id, "c1");
        assert_eq!(account.payment_provider(), Some(PaymentProvider::Worldpay));
    }

    #[test]
    fn test_active_credential_is_current_among_many() {
        let mut account = GatewayAccount::new(1, "acc-1", AccountType::Live);
        account.provider_switch_enabled = true;
        account
            .credentials
            .push(credential("old", PaymentProvider::Stripe, CredentialState::Active));
        account
            .credentials
            .push(credential("new", PaymentProvider::Worldpay, CredentialState::Entered));

        assert_eq!(account.current_credential().unwrap().external_id, "old");
        assert_eq!(account.switching_credential().unwrap().external_id, "new");
        assert!(account.validate().is_ok());
    }

    #[test]
    fn test_switching_credential_requires_switch_enabled() {
        let mut account = GatewayAccount::new(1, "acc-1", AccountType::Live);
        account
            .credentials
            .push(credential("old", PaymentProvider::Stripe, CredentialState::Active));
        account
            .credentials
            .push(credential("new", PaymentProvider::Worldpay, CredentialState::Created));

        assert!(matches!(
            account.switching_credential(),
            Err(WorkflowError::SwitchNotEnabled(_))
        ));
        assert!(account.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_switch_without_switching_credential() {
        let mut account = GatewayAccount::new(1, "acc-1", AccountType::Live);
        account.provider_switch_enabled = true;
        account
            .credentials
            .push(credential("old", PaymentProvider::Stripe, CredentialState::Active));

        assert!(matches!(
            account.validate(),
            Err(WorkflowError::NoSwitchingCredential)
        ));
    }

    #[test]
    fn test_retired_credentials_are_not_switching_candidates() {
        let mut account = GatewayAccount::new(1, "acc-1", AccountType::Live);
        account.provider_switch_enabled = true;
        account
            .credentials
            .push(credential("retired", PaymentProvider::Sandbox, CredentialState::Retired));
        account
            .credentials
            .push(credential("current", PaymentProvider::Stripe, CredentialState::Active));
        account
            .credentials
            .push(credential("next", PaymentProvider::Worldpay, CredentialState::Verified));

        assert_eq!(account.switching_credential().unwrap().external_id, "next");
    }

    #[test]
    fn test_ambiguous_switching_credentials() {
        let mut account = GatewayAccount::new(1, "acc-1", AccountType::Live);
        account.provider_switch_enabled = true;
        account
            .credentials
            .push(credential("current", PaymentProvider::Stripe, CredentialState::Active));
        account
            .credentials
            .push(credential("a", PaymentProvider::Worldpay, CredentialState::Created));
        account
            .credentials
            .push(credential("b", PaymentProvider::Worldpay, CredentialState::Entered));

        assert!(matches!(
            account.switching_credential(),
            Err(WorkflowError::AmbiguousSwitchingCredential)
        ));
    }

    #[test]
    fn test_account_deserialization_defaults() {
        let account: GatewayAccount = serde_json::from_str(
            r#"{"gateway_account_id": 7, "external_id": "acc-7", "type": "live"}"#,
        )
        .unwrap();
        assert_eq!(account.r#type, AccountType::Live);
        assert!(!account.recurring_enabled);
        assert!(!account.allow_moto);
        assert!(account.worldpay_3ds_flex.is_none());
        assert_eq!(account.stripe_setup, StripeAccountSetup::default());
        assert!(account.credentials.is_empty());
    }

    #[test]
    fn test_stripe_setup_completion() {
        let mut setup = StripeAccountSetup::completed();
        assert!(setup.is_complete());
        setup.director = false;
        assert!(!setup.is_complete());
    }
}
