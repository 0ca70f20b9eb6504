use crate::domain::account::AccountType;
use crate::domain::credential::PaymentProvider;
use serde::{Deserialize, Serialize};

/// Status of a setup task. Always derived from account and credential data,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    NotStarted,
    Completed,
    /// Done, and locked until the switch completes.
    CompletedCannotStart,
    /// Blocked on an earlier task.
    CannotStart,
}

impl TaskStatus {
    pub fn is_complete(self) -> bool {
        matches!(
            self,
            TaskStatus::Completed | TaskStatus::CompletedCannotStart
        )
    }
}

/// Which journey a task list is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JourneyContext {
    /// First-time onboarding with the current credential.
    Creating,
    /// Moving an already-live account to a new PSP.
    Switching,
}

/// Every kind of task any provider can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    WorldpayCredentials,
    WorldpayCitCredentials,
    WorldpayMitCredentials,
    Worldpay3dsFlex,
    StripeBankDetails,
    StripeResponsiblePerson,
    StripeDirector,
    StripeVatNumber,
    StripeCompanyNumber,
    StripeOrganisationDetails,
    StripeGovernmentEntityDocument,
    MakeALivePayment,
}

impl TaskKind {
    /// Stable identifier for the kind, used by callers and templates.
    pub fn id(&self) -> &'static str {
        match self {
            TaskKind::WorldpayCredentials => "worldpay-credentials",
            TaskKind::WorldpayCitCredentials => "worldpay-cit-credentials",
            TaskKind::WorldpayMitCredentials => "worldpay-mit-credentials",
            TaskKind::Worldpay3dsFlex => "worldpay-3ds-flex",
            TaskKind::StripeBankDetails => "stripe-bank-details",
            TaskKind::StripeResponsiblePerson => "stripe-responsible-person",
            TaskKind::StripeDirector => "stripe-director",
            TaskKind::StripeVatNumber => "stripe-vat-number",
            TaskKind::StripeCompanyNumber => "stripe-company-number",
            TaskKind::StripeOrganisationDetails => "stripe-organisation-details",
            TaskKind::StripeGovernmentEntityDocument => "stripe-government-entity-document",
            TaskKind::MakeALivePayment => "make-a-live-payment",
        }
    }

    pub fn link_text(&self, account_type: AccountType) -> String {
        let text = match self {
            TaskKind::WorldpayCredentials => "Link your Worldpay account with GOV.UK Pay",
            TaskKind::WorldpayCitCredentials => {
                "Recurring customer initiated transaction (CIT) credentials"
            }
            TaskKind::WorldpayMitCredentials => {
                "Recurring merchant initiated transaction (MIT) credentials"
            }
            TaskKind::Worldpay3dsFlex => "Configure 3DS",
            TaskKind::StripeBankDetails => "Provide your bank details",
            TaskKind::StripeResponsiblePerson => "Provide details about your responsible person",
            TaskKind::StripeDirector => "Provide details about your director",
            TaskKind::StripeVatNumber => "Enter your VAT number",
            TaskKind::StripeCompanyNumber => "Enter your company registration number",
            TaskKind::StripeOrganisationDetails => "Confirm your organisation's name and address",
            TaskKind::StripeGovernmentEntityDocument => "Upload a government entity document",
            TaskKind::MakeALivePayment => {
                return format!(
                    "Make a {} payment to test your payment service provider",
                    account_type.as_str()
                );
            }
        };
        text.to_string()
    }

    /// Settings path below `/service/{service}/account/{type}/settings/`.
    fn settings_path(&self, credential_external_id: &str) -> String {
        match self {
            TaskKind::WorldpayCredentials => {
                format!("worldpay-details/one-off-customer-initiated/{credential_external_id}")
            }
            TaskKind::WorldpayCitCredentials => {
                format!("worldpay-details/recurring-customer-initiated/{credential_external_id}")
            }
            TaskKind::WorldpayMitCredentials => {
                format!("worldpay-details/recurring-merchant-initiated/{credential_external_id}")
            }
            TaskKind::Worldpay3dsFlex => "worldpay-details/flex-credentials".to_string(),
            TaskKind::StripeBankDetails => "stripe-details/bank-details".to_string(),
            TaskKind::StripeResponsiblePerson => "stripe-details/responsible-person".to_string(),
            TaskKind::StripeDirector => "stripe-details/director".to_string(),
            TaskKind::StripeVatNumber => "stripe-details/vat-number".to_string(),
            TaskKind::StripeCompanyNumber => "stripe-details/company-number".to_string(),
            TaskKind::StripeOrganisationDetails => {
                "stripe-details/organisation-details".to_string()
            }
            TaskKind::StripeGovernmentEntityDocument => {
                "stripe-details/government-entity-document".to_string()
            }
            TaskKind::MakeALivePayment => "switch-psp/verify-psp-integration".to_string(),
        }
    }

    pub fn href(
        &self,
        service_external_id: &str,
        account_type: AccountType,
        credential_external_id: &str,
    ) -> String {
        format!(
            "/service/{}/account/{}/settings/{}",
            service_external_id,
            account_type.as_str(),
            self.settings_path(credential_external_id)
        )
    }
}

/// A single actionable setup step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    #[serde(skip)]
    pub kind: TaskKind,
    pub id: &'static str,
    pub link_text: String,
    pub href: String,
    pub status: TaskStatus,
}

impl Task {
    pub fn new(kind: TaskKind, link_text: String, href: String, status: TaskStatus) -> Self {
        Self {
            kind,
            id: kind.id(),
            link_text,
            href,
            status,
        }
    }
}

/// Ordered task list for one provider and journey.
///
/// Order is the generator's insertion order and is never re-sorted, so
/// "next step" lookups are stable across evaluations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tasks {
    provider: PaymentProvider,
    context: JourneyContext,
    tasks: Vec<Task>,
}

impl Tasks {
    pub fn new(provider: PaymentProvider, context: JourneyContext, tasks: Vec<Task>) -> Self {
        Self {
            provider,
            context,
            tasks,
        }
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn provider(&self) -> PaymentProvider {
        self.provider
    }

    pub fn context(&self) -> JourneyContext {
        self.context
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, kind: TaskKind) -> Option<&Task> {
        self.tasks.iter().find(|task| task.kind == kind)
    }

    pub fn contains(&self, kind: TaskKind) -> bool {
        self.get(kind).is_some()
    }

    /// Both the CIT and MIT credential tasks are in the list.
    pub fn has_recurring_tasks(&self) -> bool {
        self.contains(TaskKind::WorldpayCitCredentials)
            && self.contains(TaskKind::WorldpayMitCredentials)
    }

    /// First task the merchant can still act on.
    pub fn next_incomplete(&self) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|task| task.status == TaskStatus::NotStarted)
    }

    pub fn all_complete(&self) -> bool {
        self.tasks.iter().all(|task| task.status.is_complete())
    }
}

impl<'a> IntoIterator for &'a Tasks {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
