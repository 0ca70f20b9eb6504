use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

const VALID: &str = r#"{"gateway_account_id":1,"external_id":"acc-1","type":"live","allow_moto":true,"credentials":[{"external_id":"cred-1","payment_provider":"worldpay","state":"ENTERED","credentials":{"one_off_customer_initiated":{"merchant_code":"CODE","username":"user"}}}]}"#;

#[test]
fn test_malformed_json_handling() {
    let input = common::accounts_file(&[
        "{not json",
        VALID,
        "",
        r#"{"gateway_account_id":2,"external_id":"acc-2""#,
    ]);

    let mut cmd = Command::new(cargo_bin!("psp-tasks"));
    cmd.arg(input.path()).arg("--service").arg("svc-1");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading account"))
        .stdout(predicate::str::contains(r#""account":"acc-1""#))
        .stdout(predicate::str::contains(r#""all_complete":true"#))
        .stdout(predicate::str::contains("acc-2").not());
}

#[test]
fn test_invalid_field_values() {
    let input = common::accounts_file(&[
        // Unknown provider
        r#"{"gateway_account_id":3,"external_id":"acc-3","type":"live","credentials":[{"external_id":"c","payment_provider":"paypal","state":"CREATED"}]}"#,
        // Unknown credential state
        r#"{"gateway_account_id":4,"external_id":"acc-4","type":"live","credentials":[{"external_id":"c","payment_provider":"worldpay","state":"PENDING"}]}"#,
        // Negative account id
        r#"{"gateway_account_id":-5,"external_id":"acc-5","type":"live"}"#,
        VALID,
    ]);

    let mut cmd = Command::new(cargo_bin!("psp-tasks"));
    cmd.arg(input.path()).arg("--service").arg("svc-1");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading account"))
        .stdout(predicate::str::contains(r#""account":"acc-1""#))
        .stdout(predicate::str::contains("acc-3").not())
        .stdout(predicate::str::contains("acc-4").not())
        .stdout(predicate::str::contains("acc-5").not());
}

#[test]
fn test_sandbox_account_is_reported_as_error() {
    let input = common::accounts_file(&[
        r#"{"gateway_account_id":7,"external_id":"acc-7","type":"test","credentials":[{"external_id":"c","payment_provider":"sandbox","state":"ACTIVE"}]}"#,
        VALID,
    ]);

    let mut cmd = Command::new(cargo_bin!("psp-tasks"));
    cmd.arg(input.path()).arg("--service").arg("svc-1");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error building task list"))
        .stdout(predicate::str::contains(r#""account":"acc-1""#))
        .stdout(predicate::str::contains("acc-7").not());
}
