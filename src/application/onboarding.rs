use crate::domain::account::{GatewayAccount, StripeAccountSetup, Worldpay3dsFlex};
use crate::domain::credential::{
    CredentialState, CredentialUpdate, GatewayAccountCredential, PaymentProvider,
};
use crate::domain::ports::GatewayAccountStoreBox;
use crate::domain::task::{JourneyContext, Tasks};
use crate::error::{Result, WorkflowError};
use tracing::{debug, info};

/// Entry point for the onboarding and provider-switch journeys.
///
/// `OnboardingService` loads a fresh account snapshot from the store for
/// every call, so task lists are recomputed after each credential write
/// rather than patched. All credential state writes go through the
/// credential state machine.
pub struct OnboardingService {
    account_store: GatewayAccountStoreBox,
}

impl OnboardingService {
    /// Creates a new `OnboardingService` backed by `account_store`.
    pub fn new(account_store: GatewayAccountStoreBox) -> Self {
        Self { account_store }
    }

    /// Stores an account snapshot supplied by the caller.
    pub async fn load_account(&self, account: GatewayAccount) -> Result<()> {
        debug!(account = %account.external_id, "loading gateway account");
        self.account_store.store(account).await
    }

    /// Derives the task list for `account_external_id` and `context`.
    pub async fn task_list(
        &self,
        account_external_id: &str,
        service_external_id: &str,
        context: JourneyContext,
    ) -> Result<Tasks> {
        let account = self.account(account_external_id).await?;
        account.validate()?;

        let tasks = Tasks::for_journey(&account, service_external_id, context)?;
        debug!(
            account = %account.external_id,
            provider = %tasks.provider(),
            tasks = tasks.len(),
            complete = tasks.all_complete(),
            "derived task list"
        );
        Ok(tasks)
    }

    /// Saves merchant-entered values on a credential.
    pub async fn enter_credentials(
        &self,
        account_external_id: &str,
        credential_external_id: &str,
        update: CredentialUpdate,
    ) -> Result<GatewayAccountCredential> {
        let mut account = self.account(account_external_id).await?;
        let credential = credential_mut(&mut account, credential_external_id)?;
        let previous = credential.state;
        credential.enter_credentials(update)?;
        let updated = credential.clone();

        if previous != updated.state {
            info!(
                credential = %updated.external_id,
                from = %previous,
                to = %updated.state,
                "credential state changed"
            );
        }
        self.account_store.store(account).await?;
        Ok(updated)
    }

    /// Records a successful check call against the PSP.
    pub async fn record_verification(
        &self,
        account_external_id: &str,
        credential_external_id: &str,
    ) -> Result<GatewayAccountCredential> {
        let mut account = self.account(account_external_id).await?;
        let credential = credential_mut(&mut account, credential_external_id)?;
        credential.transition_to(CredentialState::Verified)?;
        let updated = credential.clone();

        info!(credential = %updated.external_id, "credential verified");
        self.account_store.store(account).await?;
        Ok(updated)
    }

    pub async fn configure_3ds_flex(
        &self,
        account_external_id: &str,
        flex: Worldpay3dsFlex,
    ) -> Result<()> {
        let mut account = self.account(account_external_id).await?;
        account.worldpay_3ds_flex = Some(flex);
        self.account_store.store(account).await
    }

    pub async fn update_stripe_setup(
        &self,
        account_external_id: &str,
        setup: StripeAccountSetup,
    ) -> Result<()> {
        let mut account = self.account(account_external_id).await?;
        account.stripe_setup = setup;
        self.account_store.store(account).await
    }

    /// Provisions a `Created` credential for `provider` and enables
    /// provider switching. The account must be running on an `Active`
    /// credential.
    pub async fn start_switch(
        &self,
        account_external_id: &str,
        provider: PaymentProvider,
        credential_external_id: &str,
    ) -> Result<GatewayAccountCredential> {
        let mut account = self.account(account_external_id).await?;
        if account.provider_switch_enabled {
            return Err(WorkflowError::SwitchInProgress(account.external_id));
        }
        let current_active = account
            .current_credential()
            .is_some_and(|c| c.state == CredentialState::Active);
        if !current_active {
            return Err(WorkflowError::NoActiveCredential(account.external_id));
        }
        if account.payment_provider() == Some(provider) {
            return Err(WorkflowError::SameProvider(provider));
        }

        let credential = GatewayAccountCredential::new(credential_external_id, provider);
        account.credentials.push(credential.clone());
        account.provider_switch_enabled = true;

        info!(
            account = %account.external_id,
            provider = %provider,
            credential = %credential.external_id,
            "provider switch started"
        );
        self.account_store.store(account).await?;
        Ok(credential)
    }

    /// Activates the verified switching credential and retires the one it
    /// replaces.
    pub async fn complete_switch(&self, account_external_id: &str) -> Result<GatewayAccount> {
        let mut account = self.account(account_external_id).await?;
        let switching = account.switching_index()?;
        let current = account.current_index();

        account.credentials[switching].transition_to(CredentialState::Active)?;
        if let Some(current) = current
            && account.credentials[current].state == CredentialState::Active
        {
            account.credentials[current].transition_to(CredentialState::Retired)?;
        }
        account.provider_switch_enabled = false;

        info!(
            account = %account.external_id,
            credential = %account.credentials[switching].external_id,
            "provider switch completed"
        );
        self.account_store.store(account.clone()).await?;
        Ok(account)
    }

    /// Replaces an unverified credential with a fresh `Created` one.
    pub async fn reset_credential(
        &self,
        account_external_id: &str,
        credential_external_id: &str,
        new_external_id: &str,
    ) -> Result<GatewayAccountCredential> {
        let mut account = self.account(account_external_id).await?;
        let credential = credential_mut(&mut account, credential_external_id)?;
        let fresh = credential.reset(new_external_id)?;
        *credential = fresh.clone();

        info!(
            discarded = %credential_external_id,
            credential = %fresh.external_id,
            "credential reset"
        );
        self.account_store.store(account).await?;
        Ok(fresh)
    }

    /// Current state of all accounts.
    pub async fn accounts(&self) -> Result<Vec<GatewayAccount>> {
        self.account_store.get_all().await
    }

    async fn account(&self, external_id: &str) -> Result<GatewayAccount> {
        self.account_store
            .get(external_id)
            .await?
            .ok_or_else(|| WorkflowError::AccountNotFound(external_id.to_string()))
    }
}

fn credential_mut<'a>(
    account: &'a mut GatewayAccount,
    external_id: &str,
) -> Result<&'a mut GatewayAccountCredential> {
    account
        .credential_mut(external_id)
        .ok_or_else(|| WorkflowError::CredentialNotFound(external_id.to_string()))
}
