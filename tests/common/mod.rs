use psp_tasks::domain::account::{AccountType, GatewayAccount, Worldpay3dsFlex};
use psp_tasks::domain::credential::{
    CredentialState, GatewayAccountCredential, PaymentProvider, WorldpayMerchantCredential,
};
use std::io::Write;
use tempfile::NamedTempFile;

pub fn worldpay_account(recurring_enabled: bool, allow_moto: bool) -> GatewayAccount {
    let mut account = GatewayAccount::new(100, "acc-100", AccountType::Live);
    account.recurring_enabled = recurring_enabled;
    account.allow_moto = allow_moto;
    account
}

pub fn flex() -> Worldpay3dsFlex {
    Worldpay3dsFlex {
        organisational_unit_id: "5bd9b55e4444761ac0af1c80".to_string(),
        issuer: "5bd9e0e4444dce153428c940".to_string(),
        exemption_engine_enabled: true,
    }
}

pub fn merchant() -> WorldpayMerchantCredential {
    WorldpayMerchantCredential::new("MERCHANTCODE", "username")
}

pub fn worldpay_credential(state: CredentialState) -> GatewayAccountCredential {
    let mut credential = GatewayAccountCredential::new("cred-wp", PaymentProvider::Worldpay);
    credential.state = state;
    credential
}

/// Writes one JSON account per line to a temporary file.
pub fn accounts_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}
