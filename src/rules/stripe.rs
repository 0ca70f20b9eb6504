use super::{ProviderRules, TaskInput, entry_status, verification_status};
use crate::domain::account::StripeAccountSetup;
use crate::domain::credential::PaymentProvider;
use crate::domain::task::{JourneyContext, Task, TaskKind};

/// Task rules for Stripe accounts: the onboarding details Stripe asks for,
/// then the verifying live payment when switching.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripeRules;

fn onboarding_steps(setup: &StripeAccountSetup) -> [(TaskKind, bool); 7] {
    [
        (TaskKind::StripeBankDetails, setup.bank_account),
        (TaskKind::StripeResponsiblePerson, setup.responsible_person),
        (TaskKind::StripeDirector, setup.director),
        (TaskKind::StripeVatNumber, setup.vat_number),
        (TaskKind::StripeCompanyNumber, setup.company_number),
        (TaskKind::StripeOrganisationDetails, setup.organisation_details),
        (
            TaskKind::StripeGovernmentEntityDocument,
            setup.government_entity_document,
        ),
    ]
}

impl ProviderRules for StripeRules {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Stripe
    }

    fn tasks(&self, input: &TaskInput<'_>) -> Vec<Task> {
        let setup = &input.account.stripe_setup;
        let verified = input.is_verified();

        let mut tasks: Vec<Task> = onboarding_steps(setup)
            .into_iter()
            .map(|(kind, done)| input.task(kind, entry_status(done, verified)))
            .collect();

        if input.context == JourneyContext::Switching {
            let ready =
                setup.is_complete() && input.credential.credentials.stripe_account_id.is_some();
            tasks.push(input.task(
                TaskKind::MakeALivePayment,
                verification_status(ready, verified),
            ));
        }

        tasks
    }
}
