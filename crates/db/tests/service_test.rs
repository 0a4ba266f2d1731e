use chrono::{DateTime, TimeZone, Utc};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use uuid::Uuid;
use vendorslots_core::{
    errors::SlotError,
    models::{
        location::Location,
        time_slot::{CreateTimeSlotRequest, TimeSlot, UpdateTimeSlotRequest},
        vendor::Vendor,
    },
    scope::{Scope, SlotFilter},
    service::TimeSlotService,
};
use vendorslots_db::mock::repositories::MockSlotRepo;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, minute, 0).unwrap()
}

fn location() -> Location {
    Location {
        id: Uuid::new_v4(),
        name: "Main St".to_string(),
        created_at: Utc::now(),
    }
}

fn vendor() -> Vendor {
    Vendor {
        id: Uuid::new_v4(),
        name: "Taco Co".to_string(),
        cuisine: "Mexican".to_string(),
        created_at: Utc::now(),
    }
}

fn stored_slot(location_id: Uuid, start: DateTime<Utc>, finish: DateTime<Utc>) -> TimeSlot {
    TimeSlot {
        id: Uuid::new_v4(),
        vendor_id: None,
        location_id,
        start_at: start,
        finish_at: finish,
        created_at: Utc::now(),
    }
}

fn expect_location(repo: &mut MockSlotRepo, location: &Location) {
    let location = location.clone();
    repo.expect_find_location()
        .with(eq(location.id))
        .returning(move |_| Ok(Some(location.clone())));
}

fn expect_others(repo: &mut MockSlotRepo, others: Vec<TimeSlot>) {
    repo.expect_slots_at_location_excluding()
        .returning(move |_, _| Ok(others.clone()));
}

fn expect_slot(repo: &mut MockSlotRepo, slot: &TimeSlot) {
    let slot = slot.clone();
    repo.expect_find_slot()
        .with(eq(slot.id))
        .returning(move |_| Ok(Some(slot.clone())));
}

#[test_log::test(tokio::test)]
async fn test_create_rejects_overlapping_slot() {
    let location = location();
    let existing = stored_slot(location.id, at(10, 0), at(11, 0));

    let mut repo = MockSlotRepo::new();
    expect_location(&mut repo, &location);
    expect_others(&mut repo, vec![existing.clone()]);
    repo.expect_insert_slot().never();

    let service = TimeSlotService::new(repo);
    let err = service
        .create(CreateTimeSlotRequest {
            location_id: location.id,
            vendor_id: None,
            start_at: at(10, 30),
            finish_at: at(11, 30),
        })
        .await
        .unwrap_err();

    match err {
        SlotError::Conflict { conflicting_id, .. } => assert_eq!(conflicting_id, existing.id),
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[test_log::test(tokio::test)]
async fn test_create_accepts_touching_slot() {
    let location = location();
    let existing = stored_slot(location.id, at(10, 0), at(11, 0));

    let mut repo = MockSlotRepo::new();
    expect_location(&mut repo, &location);
    expect_others(&mut repo, vec![existing]);
    repo.expect_insert_slot()
        .times(1)
        .returning(|slot| Ok(slot.clone()));

    let service = TimeSlotService::new(repo);
    let created = service
        .create(CreateTimeSlotRequest {
            location_id: location.id,
            vendor_id: None,
            start_at: at(11, 0),
            finish_at: at(12, 0),
        })
        .await
        .expect("touching slot should be accepted");

    assert_eq!(created.location_id, location.id);
    assert_eq!(created.start_at, at(11, 0));
    assert_eq!(created.finish_at, at(12, 0));
    assert!(created.is_available());
}

#[test_log::test(tokio::test)]
async fn test_create_excludes_its_own_id_from_conflict_lookup() {
    let location = location();
    let location_id = location.id;

    let mut repo = MockSlotRepo::new();
    expect_location(&mut repo, &location);
    repo.expect_slots_at_location_excluding()
        .withf(move |loc, _| *loc == location_id)
        .times(1)
        .returning(|_, _| Ok(Vec::new()));
    repo.expect_insert_slot()
        .returning(|slot| Ok(slot.clone()));

    let service = TimeSlotService::new(repo);
    let created = service
        .create(CreateTimeSlotRequest {
            location_id,
            vendor_id: None,
            start_at: at(8, 0),
            finish_at: at(9, 0),
        })
        .await
        .unwrap();

    assert!(!created.id.is_nil());
}

#[test_log::test(tokio::test)]
async fn test_create_rejects_inverted_interval() {
    let location = location();

    let mut repo = MockSlotRepo::new();
    expect_location(&mut repo, &location);
    repo.expect_slots_at_location_excluding().never();
    repo.expect_insert_slot().never();

    let service = TimeSlotService::new(repo);
    let err = service
        .create(CreateTimeSlotRequest {
            location_id: location.id,
            vendor_id: None,
            start_at: at(12, 0),
            finish_at: at(12, 0),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, SlotError::Validation(_)));
}

#[test_log::test(tokio::test)]
async fn test_create_with_unknown_vendor() {
    let location = location();
    let vendor_id = Uuid::new_v4();

    let mut repo = MockSlotRepo::new();
    repo.expect_find_vendor()
        .with(eq(vendor_id))
        .returning(|_| Ok(None));
    repo.expect_insert_slot().never();

    let service = TimeSlotService::new(repo);
    let err = service
        .create(CreateTimeSlotRequest {
            location_id: location.id,
            vendor_id: Some(vendor_id),
            start_at: at(8, 0),
            finish_at: at(9, 0),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, SlotError::NotFound(_)));
}

#[test_log::test(tokio::test)]
async fn test_update_moving_onto_neighbour_is_rejected() {
    let location = location();
    let slot = stored_slot(location.id, at(8, 0), at(9, 0));
    let neighbour = stored_slot(location.id, at(10, 0), at(11, 0));
    let slot_id = slot.id;

    let mut repo = MockSlotRepo::new();
    expect_slot(&mut repo, &slot);
    repo.expect_slots_at_location_excluding()
        .withf(move |_, exclude| *exclude == slot_id)
        .returning(move |_, _| Ok(vec![neighbour.clone()]));
    repo.expect_update_slot().never();

    let service = TimeSlotService::new(repo);
    let err = service
        .update(
            slot_id,
            UpdateTimeSlotRequest {
                start_at: Some(at(9, 30)),
                finish_at: Some(at(10, 30)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(err.is_conflict());
}

#[test_log::test(tokio::test)]
async fn test_update_shifting_within_own_interval() {
    let location = location();
    let slot = stored_slot(location.id, at(8, 0), at(9, 0));

    let mut repo = MockSlotRepo::new();
    expect_slot(&mut repo, &slot);
    expect_others(&mut repo, Vec::new());
    repo.expect_update_slot()
        .times(1)
        .returning(|slot| Ok(slot.clone()));

    let service = TimeSlotService::new(repo);
    let updated = service
        .update(
            slot.id,
            UpdateTimeSlotRequest {
                finish_at: Some(at(9, 30)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.start_at, at(8, 0));
    assert_eq!(updated.finish_at, at(9, 30));
}

#[test_log::test(tokio::test)]
async fn test_update_missing_slot() {
    let mut repo = MockSlotRepo::new();
    repo.expect_find_slot().returning(|_| Ok(None));

    let service = TimeSlotService::new(repo);
    let err = service
        .update(Uuid::new_v4(), UpdateTimeSlotRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SlotError::NotFound(_)));
}

#[test_log::test(tokio::test)]
async fn test_update_moving_to_conflicting_location_is_rejected() {
    let home = location();
    let other = location();
    let slot = stored_slot(home.id, at(8, 0), at(9, 0));
    let occupant = stored_slot(other.id, at(8, 30), at(9, 30));
    let (slot_id, other_id, occupant_id) = (slot.id, other.id, occupant.id);

    let mut repo = MockSlotRepo::new();
    expect_slot(&mut repo, &slot);
    expect_location(&mut repo, &other);
    repo.expect_slots_at_location_excluding()
        .withf(move |loc, exclude| *loc == other_id && *exclude == slot_id)
        .times(1)
        .returning(move |_, _| Ok(vec![occupant.clone()]));
    repo.expect_update_slot().never();

    let service = TimeSlotService::new(repo);
    let err = service
        .update(
            slot_id,
            UpdateTimeSlotRequest {
                location_id: Some(other_id),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    match err {
        SlotError::Conflict {
            slot_id: rejected,
            conflicting_id,
        } => {
            assert_eq!(rejected, slot_id);
            assert_eq!(conflicting_id, occupant_id);
        }
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[test_log::test(tokio::test)]
async fn test_update_to_unknown_location() {
    let slot = stored_slot(Uuid::new_v4(), at(8, 0), at(9, 0));
    let missing = Uuid::new_v4();

    let mut repo = MockSlotRepo::new();
    expect_slot(&mut repo, &slot);
    repo.expect_find_location()
        .with(eq(missing))
        .returning(|_| Ok(None));
    repo.expect_update_slot().never();

    let service = TimeSlotService::new(repo);
    let err = service
        .update(
            slot.id,
            UpdateTimeSlotRequest {
                location_id: Some(missing),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SlotError::NotFound(_)));
}

#[test_log::test(tokio::test)]
async fn test_update_inverting_interval_is_rejected() {
    let slot = stored_slot(Uuid::new_v4(), at(8, 0), at(9, 0));

    let mut repo = MockSlotRepo::new();
    expect_slot(&mut repo, &slot);
    repo.expect_slots_at_location_excluding().never();
    repo.expect_update_slot().never();

    let service = TimeSlotService::new(repo);
    let err = service
        .update(
            slot.id,
            UpdateTimeSlotRequest {
                finish_at: Some(at(7, 30)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SlotError::Validation(_)));
}

#[test_log::test(tokio::test)]
async fn test_book_and_release() {
    let location = location();
    let vendor = vendor();
    let slot = stored_slot(location.id, at(8, 0), at(9, 0));
    let vendor_id = vendor.id;

    let mut repo = MockSlotRepo::new();
    expect_slot(&mut repo, &slot);
    repo.expect_find_vendor()
        .with(eq(vendor_id))
        .returning(move |_| Ok(Some(vendor.clone())));
    expect_others(&mut repo, Vec::new());
    repo.expect_update_slot()
        .times(2)
        .returning(|slot| Ok(slot.clone()));

    let service = TimeSlotService::new(repo);

    let booked = service.book(slot.id, vendor_id).await.unwrap();
    assert_eq!(booked.vendor_id, Some(vendor_id));
    assert!(!booked.is_available());

    let released = service.release(slot.id).await.unwrap();
    assert_eq!(released.vendor_id, None);
    assert!(released.is_available());
}

#[test_log::test(tokio::test)]
async fn test_book_unknown_vendor() {
    let slot = stored_slot(Uuid::new_v4(), at(8, 0), at(9, 0));

    let mut repo = MockSlotRepo::new();
    expect_slot(&mut repo, &slot);
    repo.expect_find_vendor().returning(|_| Ok(None));
    repo.expect_update_slot().never();

    let service = TimeSlotService::new(repo);
    let err = service.book(slot.id, Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, SlotError::NotFound(_)));
}

#[test_log::test(tokio::test)]
async fn test_delete() {
    let existing = Uuid::new_v4();
    let missing = Uuid::new_v4();

    let mut repo = MockSlotRepo::new();
    repo.expect_delete_slot()
        .with(eq(existing))
        .returning(|_| Ok(true));
    repo.expect_delete_slot()
        .with(eq(missing))
        .returning(|_| Ok(false));

    let service = TimeSlotService::new(repo);
    service.delete(existing).await.unwrap();
    assert!(matches!(
        service.delete(missing).await.unwrap_err(),
        SlotError::NotFound(_)
    ));
}

#[test_log::test(tokio::test)]
async fn test_has_time_conflict() {
    let location = location();
    let existing = stored_slot(location.id, at(10, 0), at(11, 0));

    let mut repo = MockSlotRepo::new();
    expect_others(&mut repo, vec![existing]);

    let service = TimeSlotService::new(repo);

    let overlapping = stored_slot(location.id, at(10, 30), at(11, 30));
    assert!(service.has_time_conflict(&overlapping).await.unwrap());

    let adjacent = stored_slot(location.id, at(11, 0), at(12, 0));
    assert!(!service.has_time_conflict(&adjacent).await.unwrap());
}

#[test_log::test(tokio::test)]
async fn test_validate_agrees_with_has_time_conflict() {
    let location = location();
    let existing = stored_slot(location.id, at(10, 0), at(11, 0));
    let overlapping = stored_slot(location.id, at(10, 30), at(11, 30));
    let adjacent = stored_slot(location.id, at(11, 0), at(12, 0));

    let mut repo = MockSlotRepo::new();
    // one lookup per call
    repo.expect_slots_at_location_excluding()
        .times(4)
        .returning(move |_, _| Ok(vec![existing.clone()]));

    let service = TimeSlotService::new(repo);

    assert!(service.has_time_conflict(&overlapping).await.unwrap());
    assert!(service.validate(&overlapping).await.unwrap_err().is_conflict());

    assert!(!service.has_time_conflict(&adjacent).await.unwrap());
    service.validate(&adjacent).await.unwrap();
}

#[test_log::test(tokio::test)]
async fn test_by_scope_resolves_filter() {
    let now = at(12, 0);

    let mut repo = MockSlotRepo::new();
    repo.expect_list_slots()
        .with(
            eq(SlotFilter::Scope(Scope::CurrentOrUpcoming)),
            eq(now),
            eq(None::<Uuid>),
        )
        .times(2)
        .returning(|_, _, _| Ok(Vec::new()));
    repo.expect_list_slots()
        .with(eq(SlotFilter::Scope(Scope::Expired)), eq(now), eq(None::<Uuid>))
        .times(1)
        .returning(|_, _, _| Ok(Vec::new()));
    repo.expect_list_slots()
        .with(eq(SlotFilter::All), eq(now), eq(None::<Uuid>))
        .times(1)
        .returning(|_, _, _| Ok(Vec::new()));

    let service = TimeSlotService::new(repo);
    service.by_scope_at(None, now).await.unwrap();
    service.by_scope_at(Some("current_or_upcoming"), now).await.unwrap();
    service.by_scope_at(Some("expired"), now).await.unwrap();
    service.by_scope_at(Some("nonexistent"), now).await.unwrap();
}

#[test_log::test(tokio::test)]
async fn test_to_ical_event_for_unbooked_slot() {
    let slot = stored_slot(Uuid::new_v4(), at(8, 0), at(9, 0));

    let mut repo = MockSlotRepo::new();
    expect_slot(&mut repo, &slot);
    repo.expect_find_vendor().never();

    let service = TimeSlotService::new(repo);
    let err = service.to_ical_event(slot.id).await.unwrap_err();

    assert!(matches!(err, SlotError::Unbooked(id) if id == slot.id));
}

#[test_log::test(tokio::test)]
async fn test_calendar_skips_unbooked_slots() {
    let location = location();
    let vendor = vendor();
    let now = at(7, 0);

    let mut booked = stored_slot(location.id, at(9, 5), at(10, 0));
    booked.vendor_id = Some(vendor.id);
    let open = stored_slot(location.id, at(11, 0), at(12, 0));

    let location_id = location.id;
    let mut repo = MockSlotRepo::new();
    repo.expect_list_slots()
        .with(
            eq(SlotFilter::Scope(Scope::Upcoming)),
            eq(now),
            eq(Some(location_id)),
        )
        .returning(move |_, _, _| Ok(vec![booked.clone(), open.clone()]));
    repo.expect_find_vendor()
        .returning(move |_| Ok(Some(vendor.clone())));
    expect_location(&mut repo, &location);

    let service = TimeSlotService::new(repo);
    let ics = service
        .calendar_at(Some(location_id), Some("upcoming"), now)
        .await
        .unwrap()
        .to_string();

    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
    assert!(ics.contains("SUMMARY:Taco Co at Main St"));
    assert!(ics.contains("DTSTART:20240501T090500Z"));
}
