//! Integration tests for veterinary appointments and their slot pool.

mod common;

use common::{appointment, Marketplace};
use petcare::database::Database;
use petcare::{
    AppointmentId, AppointmentStatus, BookingError, MedicalRecordRequest, PoolId,
    TransitionError,
};

fn status(market: &Marketplace, id: AppointmentId) -> AppointmentStatus {
    Database::get_appointment(market.service.database().connection(), id)
        .unwrap()
        .unwrap()
        .status
}

#[test]
fn test_slots_run_out_and_come_back() {
    let mut market = Marketplace::new();
    let (owner, pet) = market.owner("mina");
    let (vet_user, vet) = market.vet("dr-park", 2);
    let pool = PoolId::VetSlots(vet);

    let first = market
        .service
        .create_appointment(owner, appointment(pet, vet))
        .unwrap();
    assert_eq!(market.service.capacity(pool).unwrap(), 1);

    market
        .service
        .create_appointment(owner, appointment(pet, vet))
        .unwrap();
    assert_eq!(market.service.capacity(pool).unwrap(), 0);

    let err = market
        .service
        .create_appointment(owner, appointment(pet, vet))
        .unwrap_err();
    assert!(matches!(err, BookingError::SlotUnavailable { vet: v } if v == vet));
    assert_eq!(market.service.capacity(pool).unwrap(), 0);

    market
        .service
        .transition_appointment(vet_user, first, AppointmentStatus::Cancelled)
        .unwrap();
    assert_eq!(market.service.capacity(pool).unwrap(), 1);
    assert_eq!(status(&market, first), AppointmentStatus::Cancelled);

    // The returned slot is bookable again.
    market
        .service
        .create_appointment(owner, appointment(pet, vet))
        .unwrap();
    assert_eq!(market.service.capacity(pool).unwrap(), 0);
}

#[test]
fn test_new_appointment_starts_pending() {
    let mut market = Marketplace::new();
    let (owner, pet) = market.owner("mina");
    let (_, vet) = market.vet("dr-park", 1);

    let request = appointment(pet, vet).with_reason(Some("  limping  ".into()));
    let id = market.service.create_appointment(owner, request).unwrap();

    let stored = Database::get_appointment(market.service.database().connection(), id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, AppointmentStatus::Pending);
    assert_eq!(stored.pet, pet);
    assert_eq!(stored.vet, vet);
    assert_eq!(stored.reason.as_deref(), Some("limping"));
}

#[test]
fn test_confirm_then_complete_keeps_slot_consumed() {
    let mut market = Marketplace::new();
    let (owner, pet) = market.owner("mina");
    let (vet_user, vet) = market.vet("dr-park", 3);

    let id = market
        .service
        .create_appointment(owner, appointment(pet, vet))
        .unwrap();
    market
        .service
        .transition_appointment(vet_user, id, AppointmentStatus::Confirmed)
        .unwrap();
    market
        .service
        .transition_appointment(vet_user, id, AppointmentStatus::Completed)
        .unwrap();

    assert_eq!(status(&market, id), AppointmentStatus::Completed);
    assert_eq!(market.service.capacity(PoolId::VetSlots(vet)).unwrap(), 2);

    // Completed is terminal.
    let err = market
        .service
        .transition_appointment(vet_user, id, AppointmentStatus::Cancelled)
        .unwrap_err();
    assert!(matches!(err, TransitionError::InvalidTransition { .. }));
    assert_eq!(market.service.capacity(PoolId::VetSlots(vet)).unwrap(), 2);
}

#[test]
fn test_second_cancel_does_not_restore_twice() {
    let mut market = Marketplace::new();
    let (owner, pet) = market.owner("mina");
    let (vet_user, vet) = market.vet("dr-park", 1);

    let id = market
        .service
        .create_appointment(owner, appointment(pet, vet))
        .unwrap();
    market
        .service
        .transition_appointment(vet_user, id, AppointmentStatus::Cancelled)
        .unwrap();
    let err = market
        .service
        .transition_appointment(vet_user, id, AppointmentStatus::Cancelled)
        .unwrap_err();

    assert!(matches!(err, TransitionError::InvalidTransition { .. }));
    assert_eq!(market.service.capacity(PoolId::VetSlots(vet)).unwrap(), 1);
}

#[test]
fn test_only_the_appointments_vet_may_move_it() {
    let mut market = Marketplace::new();
    let (owner, pet) = market.owner("mina");
    let (_, vet) = market.vet("dr-park", 2);
    let (other_vet, _) = market.vet("dr-lee", 2);

    let id = market
        .service
        .create_appointment(owner, appointment(pet, vet))
        .unwrap();

    let err = market
        .service
        .transition_appointment(other_vet, id, AppointmentStatus::Confirmed)
        .unwrap_err();
    assert!(matches!(err, TransitionError::Forbidden { .. }));

    let err = market
        .service
        .transition_appointment(owner, id, AppointmentStatus::Cancelled)
        .unwrap_err();
    assert!(matches!(err, TransitionError::Forbidden { .. }));

    assert_eq!(status(&market, id), AppointmentStatus::Pending);
    assert_eq!(market.service.capacity(PoolId::VetSlots(vet)).unwrap(), 1);
}

#[test]
fn test_missing_appointment_is_not_found() {
    let mut market = Marketplace::new();
    let (vet_user, _) = market.vet("dr-park", 2);

    let err = market
        .service
        .transition_appointment(vet_user, AppointmentId::new(404), AppointmentStatus::Confirmed)
        .unwrap_err();
    assert!(matches!(err, TransitionError::NotFound { .. }));
}

#[test]
fn test_cannot_book_someone_elses_pet() {
    let mut market = Marketplace::new();
    let (_, pet) = market.owner("mina");
    let (intruder, _) = market.owner("jun");
    let (_, vet) = market.vet("dr-park", 2);

    let err = market
        .service
        .create_appointment(intruder, appointment(pet, vet))
        .unwrap_err();
    assert!(matches!(err, BookingError::Forbidden { .. }));
    assert_eq!(market.service.capacity(PoolId::VetSlots(vet)).unwrap(), 2);
}

#[test]
fn test_vet_writes_medical_record_after_visit() {
    let mut market = Marketplace::new();
    let (owner, pet) = market.owner("mina");
    let (vet_user, vet) = market.vet("dr-park", 2);

    let id = market
        .service
        .create_appointment(owner, appointment(pet, vet))
        .unwrap();
    market
        .service
        .transition_appointment(vet_user, id, AppointmentStatus::Confirmed)
        .unwrap();
    market
        .service
        .transition_appointment(vet_user, id, AppointmentStatus::Completed)
        .unwrap();

    let record_id = market
        .service
        .add_medical_record(
            vet_user,
            MedicalRecordRequest::new(id, "Mild sprain")
                .with_treatment(Some("Rest for a week".into())),
        )
        .unwrap();

    let record = Database::get_medical_record(market.service.database().connection(), record_id)
        .unwrap()
        .unwrap();
    assert_eq!(record.appointment, id);
    assert_eq!(record.pet, pet);
    assert_eq!(record.vet, vet);
    assert_eq!(record.treatment.as_deref(), Some("Rest for a week"));

    // The owner cannot write clinical notes.
    assert!(market
        .service
        .add_medical_record(owner, MedicalRecordRequest::new(id, "Fine"))
        .is_err());
}
