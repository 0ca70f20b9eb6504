use super::{ProviderRules, TaskInput, entry_status, verification_status};
use crate::domain::credential::PaymentProvider;
use crate::domain::task::{JourneyContext, Task, TaskKind, TaskStatus};

/// Task rules for Worldpay accounts.
///
/// Recurring accounts need separate CIT and MIT credentials, other accounts a
/// single one-off credential. Accounts without MOTO need 3DS Flex. Switching
/// ends with a live payment that verifies the integration.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldpayRules;

impl ProviderRules for WorldpayRules {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Worldpay
    }

    fn tasks(&self, input: &TaskInput<'_>) -> Vec<Task> {
        let account = input.account;
        let credentials = &input.credential.credentials;
        let verified = input.is_verified();
        let mut tasks = Vec::with_capacity(4);

        let credentials_present = if account.recurring_enabled {
            let cit = credentials.recurring_customer_initiated.is_some();
            let mit = credentials.recurring_merchant_initiated.is_some();
            tasks.push(input.task(
                TaskKind::WorldpayCitCredentials,
                entry_status(cit, verified),
            ));
            tasks.push(input.task(
                TaskKind::WorldpayMitCredentials,
                entry_status(mit, verified),
            ));
            cit && mit
        } else {
            let one_off = credentials.one_off_customer_initiated.is_some();
            tasks.push(input.task(
                TaskKind::WorldpayCredentials,
                entry_status(one_off, verified),
            ));
            one_off
        };

        let flex_configured = account.worldpay_3ds_flex.is_some();
        if !account.allow_moto {
            let status = if flex_configured {
                TaskStatus::Completed
            } else {
                TaskStatus::NotStarted
            };
            tasks.push(input.task(TaskKind::Worldpay3dsFlex, status));
        }

        if input.context == JourneyContext::Switching {
            let ready = credentials_present && (account.allow_moto || flex_configured);
            tasks.push(input.task(
                TaskKind::MakeALivePayment,
                verification_status(ready, verified),
            ));
        }

        tasks
    }
}
