use psp_tasks::domain::account::GatewayAccount;
use psp_tasks::domain::credential::{CredentialState, GatewayAccountCredential};
use psp_tasks::domain::task::{JourneyContext, TaskKind, TaskStatus, Tasks};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod common;

const CASES: usize = 500;

const STATES: [CredentialState; 4] = [
    CredentialState::Created,
    CredentialState::Entered,
    CredentialState::Verified,
    CredentialState::Active,
];

struct Case {
    account: GatewayAccount,
    credential: GatewayAccountCredential,
    context: JourneyContext,
}

fn random_case(rng: &mut StdRng) -> Case {
    let mut account = common::worldpay_account(rng.gen_bool(0.5), rng.gen_bool(0.5));
    if rng.gen_bool(0.5) {
        account.worldpay_3ds_flex = Some(common::flex());
    }

    let mut credential = common::worldpay_credential(STATES[rng.gen_range(0..STATES.len())]);
    if rng.gen_bool(0.5) {
        credential.credentials.one_off_customer_initiated = Some(common::merchant());
    }
    if rng.gen_bool(0.5) {
        credential.credentials.recurring_customer_initiated = Some(common::merchant());
    }
    if rng.gen_bool(0.5) {
        credential.credentials.recurring_merchant_initiated = Some(common::merchant());
    }

    let context = if rng.gen_bool(0.5) {
        JourneyContext::Creating
    } else {
        JourneyContext::Switching
    };

    Case {
        account,
        credential,
        context,
    }
}

fn build(case: &Case) -> Tasks {
    Tasks::build(&case.account, "svc", Some(&case.credential), case.context).unwrap()
}

#[test]
fn test_generation_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..CASES {
        let case = random_case(&mut rng);
        assert_eq!(build(&case), build(&case));
    }
}

#[test]
fn test_recurring_tasks_are_paired() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..CASES {
        let case = random_case(&mut rng);
        let tasks = build(&case);

        if case.account.recurring_enabled {
            assert!(tasks.has_recurring_tasks());
            assert!(!tasks.contains(TaskKind::WorldpayCredentials));
        } else {
            assert!(!tasks.contains(TaskKind::WorldpayCitCredentials));
            assert!(!tasks.contains(TaskKind::WorldpayMitCredentials));
            assert!(!tasks.has_recurring_tasks());
            let one_off = tasks
                .all()
                .iter()
                .filter(|t| t.kind == TaskKind::WorldpayCredentials)
                .count();
            assert_eq!(one_off, 1);
        }
    }
}

#[test]
fn test_flex_task_gated_by_moto() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..CASES {
        let case = random_case(&mut rng);
        let tasks = build(&case);
        let flex_tasks: Vec<_> = tasks
            .all()
            .iter()
            .filter(|t| t.kind == TaskKind::Worldpay3dsFlex)
            .collect();

        if case.account.allow_moto {
            assert!(flex_tasks.is_empty());
        } else {
            assert_eq!(flex_tasks.len(), 1);
            let expected = if case.account.worldpay_3ds_flex.is_some() {
                TaskStatus::Completed
            } else {
                TaskStatus::NotStarted
            };
            assert_eq!(flex_tasks[0].status, expected);
        }
    }
}

#[test]
fn test_verified_credential_locks_entry_task() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..CASES {
        let mut case = random_case(&mut rng);
        case.credential.state = CredentialState::Verified;
        case.account.recurring_enabled = false;
        case.credential.credentials.one_off_customer_initiated = Some(common::merchant());

        let tasks = build(&case);
        assert_eq!(
            tasks.get(TaskKind::WorldpayCredentials).unwrap().status,
            TaskStatus::CompletedCannotStart
        );
        if let Some(live_payment) = tasks.get(TaskKind::MakeALivePayment) {
            assert_eq!(live_payment.status, TaskStatus::CompletedCannotStart);
        }
    }
}

#[test]
fn test_live_payment_present_iff_switching() {
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..CASES {
        let case = random_case(&mut rng);
        let tasks = build(&case);

        assert_eq!(
            tasks.contains(TaskKind::MakeALivePayment),
            case.context == JourneyContext::Switching
        );
        if let Some(last) = tasks.all().last()
            && case.context == JourneyContext::Switching
        {
            assert_eq!(last.kind, TaskKind::MakeALivePayment);
        }
    }
}

#[test]
fn test_live_payment_blocked_reasons() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..CASES {
        let mut case = random_case(&mut rng);
        case.context = JourneyContext::Switching;
        let tasks = build(&case);
        let status = tasks.get(TaskKind::MakeALivePayment).unwrap().status;

        let credentials = &case.credential.credentials;
        let credentials_present = if case.account.recurring_enabled {
            credentials.has_recurring()
        } else {
            credentials.one_off_customer_initiated.is_some()
        };
        let flex_ready = case.account.allow_moto || case.account.worldpay_3ds_flex.is_some();

        let expected = if case.credential.state == CredentialState::Verified {
            TaskStatus::CompletedCannotStart
        } else if credentials_present && flex_ready {
            TaskStatus::Completed
        } else {
            TaskStatus::CannotStart
        };
        assert_eq!(status, expected);
    }
}
