//! End-to-end tests for the booking, order and status commands.
//!
//! Each test drives the binary against a fresh data directory and checks
//! pool capacity through `petcare capacity` between steps.

mod common;

use common::TestEnv;
use predicates::prelude::*;

fn book_appointment(env: &TestEnv, owner: i64, pet: i64, vet: i64) -> assert_cmd::Command {
    let mut cmd = env.as_user(owner);
    cmd.args([
        "book-appointment",
        "--pet",
        &pet.to_string(),
        "--vet",
        &vet.to_string(),
        "--date",
        "2025-03-14",
        "--time",
        "10:30",
        "--reason",
        "annual checkup",
    ]);
    cmd
}

#[test]
fn test_register_reports_provider_profile() {
    let env = TestEnv::new();

    env.command()
        .args([
            "register", "dr-park", "--role", "vet", "--clinic", "Happy Paws", "--slots", "4",
        ])
        .assert()
        .success()
        .stdout("1\n")
        .stderr(predicate::str::contains("bookable as veterinarian 1"));

    assert_eq!(env.capacity("--vet", 1), 4);
}

#[test]
fn test_vet_slots_default_from_config() {
    let env = TestEnv::new();

    env.register("dr-park", "vet", &["--clinic", "Happy Paws"]);

    assert_eq!(env.capacity("--vet", 1), 10);
}

#[test]
fn test_appointment_consumes_and_cancel_restores_slot() {
    let env = TestEnv::new();
    let m = env.marketplace(2, 5);

    let appointment = env.run_for_id(book_appointment(&env, m.owner, m.pet, m.vet));
    assert_eq!(env.capacity("--vet", m.vet), 1);

    env.as_user(m.vet_user)
        .args(["appointment-status", &appointment.to_string(), "cancelled"])
        .assert()
        .success();
    assert_eq!(env.capacity("--vet", m.vet), 2);

    // Cancelled is terminal, so a second cancel is refused and restores nothing.
    env.as_user(m.vet_user)
        .args(["appointment-status", &appointment.to_string(), "cancelled"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid transition"));
    assert_eq!(env.capacity("--vet", m.vet), 2);
}

#[test]
fn test_last_slot_then_unavailable() {
    let env = TestEnv::new();
    let m = env.marketplace(1, 5);

    env.run_for_id(book_appointment(&env, m.owner, m.pet, m.vet));

    book_appointment(&env, m.owner, m.pet, m.vet)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no appointment slot available"));
    assert_eq!(env.capacity("--vet", m.vet), 0);
}

#[test]
fn test_appointment_dry_run_leaves_slots() {
    let env = TestEnv::new();
    let m = env.marketplace(3, 5);

    book_appointment(&env, m.owner, m.pet, m.vet)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Dry run"));

    assert_eq!(env.capacity("--vet", m.vet), 3);
}

#[test]
fn test_show_appointment_as_json() {
    let env = TestEnv::new();
    let m = env.marketplace(2, 5);
    let appointment = env.run_for_id(book_appointment(&env, m.owner, m.pet, m.vet));

    let output = env
        .command()
        .args(["show", "appointment", &appointment.to_string(), "--format", "json"])
        .output()
        .expect("Failed to run show");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("show did not print JSON");
    assert_eq!(json["kind"], "appointment");
    assert_eq!(json["id"], appointment);
    assert_eq!(json["status"], "Pending");
    assert_eq!(json["reason"], "annual checkup");
}

#[test]
fn test_show_appointment_human() {
    let env = TestEnv::new();
    let m = env.marketplace(2, 5);
    let appointment = env.run_for_id(book_appointment(&env, m.owner, m.pet, m.vet));

    env.command()
        .args(["show", "appointment", &appointment.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!("appointment {appointment}")))
        .stdout(predicate::str::contains("Pending"));
}

#[test]
fn test_sitter_booking_fee_and_lifecycle() {
    let env = TestEnv::new();
    let m = env.marketplace(1, 1);

    let mut cmd = env.as_user(m.owner);
    cmd.args([
        "book-sitter",
        "--pet",
        &m.pet.to_string(),
        "--sitter",
        &m.sitter.to_string(),
        "--start",
        "2025-04-01",
        "--end",
        "2025-04-03",
        "--hours",
        "4",
    ]);
    let booking = env.run_for_id(cmd);

    let output = env
        .command()
        .args(["show", "booking", &booking.to_string(), "--format", "json"])
        .output()
        .expect("Failed to run show");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_fee"], 60_000);

    for status in ["confirmed", "completed"] {
        env.as_user(m.sitter_user)
            .args(["booking-status", &booking.to_string(), status])
            .assert()
            .success();
    }

    env.as_user(m.sitter_user)
        .args(["booking-status", &booking.to_string(), "cancelled"])
        .assert()
        .code(1);
}

#[test]
fn test_order_consumes_and_cancel_restores_stock() {
    let env = TestEnv::new();
    let m = env.marketplace(1, 5);

    let mut cmd = env.as_user(m.owner);
    cmd.args([
        "order",
        "--shop",
        &m.shop.to_string(),
        "--item",
        &format!("{}:3", m.product),
        "--ship-to",
        "1 Harbour Road",
    ]);
    let order = env.run_for_id(cmd);
    assert_eq!(env.capacity("--product", m.product), 2);

    env.as_user(m.manager)
        .args(["order-status", &order.to_string(), "cancelled"])
        .assert()
        .success();
    assert_eq!(env.capacity("--product", m.product), 5);
}

#[test]
fn test_short_order_keeps_stock() {
    let env = TestEnv::new();
    let m = env.marketplace(1, 2);

    env.as_user(m.owner)
        .args([
            "order",
            "--shop",
            &m.shop.to_string(),
            "--item",
            &format!("{}:1", m.product),
            "--item",
            &format!("{}:2", m.product),
            "--ship-to",
            "1 Harbour Road",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("insufficient stock"));

    assert_eq!(env.capacity("--product", m.product), 2);
}

#[test]
fn test_order_status_dry_run_reports_restock() {
    let env = TestEnv::new();
    let m = env.marketplace(1, 5);

    let mut cmd = env.as_user(m.owner);
    cmd.args([
        "order",
        "--shop",
        &m.shop.to_string(),
        "--item",
        &format!("{}:2", m.product),
        "--ship-to",
        "1 Harbour Road",
    ]);
    let order = env.run_for_id(cmd);

    env.as_user(m.manager)
        .args(["order-status", &order.to_string(), "cancelled", "--dry-run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Dry run"));

    assert_eq!(env.capacity("--product", m.product), 3);
}

#[test]
fn test_medical_record_after_completed_visit() {
    let env = TestEnv::new();
    let m = env.marketplace(2, 1);
    let appointment = env.run_for_id(book_appointment(&env, m.owner, m.pet, m.vet));

    for status in ["confirmed", "completed"] {
        env.as_user(m.vet_user)
            .args(["appointment-status", &appointment.to_string(), status])
            .assert()
            .success();
    }

    let mut cmd = env.as_user(m.vet_user);
    cmd.args([
        "add-medical-record",
        "--appointment",
        &appointment.to_string(),
        "--diagnosis",
        "healthy",
        "--treatment",
        "none",
    ]);
    let record = env.run_for_id(cmd);

    env.command()
        .args(["show", "medical-record", &record.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("healthy"));
}
