#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lavage::model::{Area, Booking, BookingStatus, DayWindow, Employee, EmployeeId};
use lavage::Scheduler;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn monday() -> NaiveDate {
    // 2026-08-10 est un lundi (day index 0)
    NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()
}

fn sunday_noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 9).unwrap().and_time(t(12, 0))
}

fn employee(handle: &str, id: &str, start: NaiveTime, end: NaiveTime) -> Employee {
    let mut e = Employee::new(handle, handle.to_string());
    e.id = EmployeeId::new(id);
    e.set_window(DayWindow::new(0, start, end).unwrap());
    e
}

fn setup(employees: Vec<Employee>) -> (Scheduler, lavage::AreaId) {
    let mut s = Scheduler::new();
    let mut area = Area::new("Centre");
    for e in &employees {
        area.add_employee(e.id.clone());
    }
    let area_id = area.id.clone();
    s.add_employees(employees);
    s.add_areas(vec![area]);
    (s, area_id)
}

fn push_booking(s: &mut Scheduler, id: &str, start: NaiveTime) {
    let area_id = s.registry().areas[0].id.clone();
    let b = Booking::new(
        EmployeeId::new(id),
        area_id,
        "client".into(),
        monday(),
        start,
    )
    .unwrap();
    s.registry_mut().bookings.push(b);
}

fn fmt(slots: &[NaiveTime]) -> String {
    slots
        .iter()
        .map(|s| s.format("%H:%M").to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[test]
fn full_day_grid_08_to_20() {
    let (s, _) = setup(vec![employee("ali", "e-a", t(8, 0), t(20, 0))]);
    let slots = s
        .available_slots(&EmployeeId::new("e-a"), monday(), sunday_noon())
        .unwrap();
    // 18:30–20:00 tient exactement ; 20:00 déborderait
    insta::assert_snapshot!(
        fmt(&slots),
        @"08:00,09:30,11:00,12:30,14:00,15:30,17:00,18:30"
    );
}

#[test]
fn busy_slot_removed_others_untouched() {
    let (mut s, _) = setup(vec![employee("ali", "e-a", t(8, 0), t(20, 0))]);
    push_booking(&mut s, "e-a", t(11, 0));

    let slots = s
        .available_slots(&EmployeeId::new("e-a"), monday(), sunday_noon())
        .unwrap();
    assert_eq!(
        fmt(&slots),
        "08:00,09:30,12:30,14:00,15:30,17:00,18:30"
    );
}

#[test]
fn off_grid_booking_blocks_overlapping_slots_only() {
    // réservation hors grille 09:45–11:15 : chevauche 09:30 et 11:00,
    // laisse 08:00 (qui finit à 09:30) intact
    let (mut s, _) = setup(vec![employee("ali", "e-a", t(8, 0), t(20, 0))]);
    push_booking(&mut s, "e-a", t(9, 45));

    let slots = s
        .available_slots(&EmployeeId::new("e-a"), monday(), sunday_noon())
        .unwrap();
    assert_eq!(fmt(&slots), "08:00,12:30,14:00,15:30,17:00,18:30");
}

#[test]
fn completed_and_cancelled_do_not_block() {
    let (mut s, _) = setup(vec![employee("ali", "e-a", t(8, 0), t(20, 0))]);
    push_booking(&mut s, "e-a", t(11, 0));
    push_booking(&mut s, "e-a", t(14, 0));
    {
        let r = s.registry_mut();
        r.bookings[0].status = BookingStatus::Completed;
        r.bookings[1].status = BookingStatus::Cancelled;
    }

    let slots = s
        .available_slots(&EmployeeId::new("e-a"), monday(), sunday_noon())
        .unwrap();
    assert_eq!(slots.len(), 8);
}

#[test]
fn past_slots_excluded_on_same_day_only() {
    let (s, _) = setup(vec![employee("ali", "e-a", t(8, 0), t(20, 0))]);

    // aujourd'hui 10:15 : 08:00 et 09:30 sont passés
    let now = monday().and_time(t(10, 15));
    let slots = s
        .available_slots(&EmployeeId::new("e-a"), monday(), now)
        .unwrap();
    assert_eq!(fmt(&slots), "11:00,12:30,14:00,15:30,17:00,18:30");

    // même « maintenant » mais pour le lundi suivant : aucune exclusion
    let next_monday = NaiveDate::from_ymd_opt(2026, 8, 17).unwrap();
    let slots = s
        .available_slots(&EmployeeId::new("e-a"), next_monday, now)
        .unwrap();
    assert_eq!(slots.len(), 8);
}

#[test]
fn slot_starting_exactly_now_is_excluded() {
    let (s, _) = setup(vec![employee("ali", "e-a", t(8, 0), t(20, 0))]);
    let now = monday().and_time(t(8, 0));
    let slots = s
        .available_slots(&EmployeeId::new("e-a"), monday(), now)
        .unwrap();
    assert_eq!(slots.first().copied(), Some(t(9, 30)));
}

#[test]
fn past_date_has_no_slots() {
    let (s, _) = setup(vec![employee("ali", "e-a", t(8, 0), t(20, 0))]);
    let now = NaiveDate::from_ymd_opt(2026, 8, 12).unwrap().and_time(t(9, 0));
    let slots = s
        .available_slots(&EmployeeId::new("e-a"), monday(), now)
        .unwrap();
    assert!(slots.is_empty());
}

#[test]
fn area_union_is_sorted_and_deduplicated() {
    // A libre à {08:00, 09:30}, B libre à {09:30, 11:00}
    let (s, area_id) = setup(vec![
        employee("ali", "e-a", t(8, 0), t(11, 0)),
        employee("badr", "e-b", t(9, 30), t(12, 30)),
    ]);

    let slots = s.area_slots(&area_id, monday(), sunday_noon()).unwrap();
    assert_eq!(fmt(&slots), "08:00,09:30,11:00");
}

#[test]
fn no_window_that_day_means_no_slots() {
    let mut e = Employee::new("ali", "Ali");
    e.id = EmployeeId::new("e-a");
    e.set_window(DayWindow::new(3, t(8, 0), t(20, 0)).unwrap()); // jeudi seulement
    let (s, area_id) = setup(vec![e]);

    let slots = s.area_slots(&area_id, monday(), sunday_noon()).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn inactive_window_means_no_slots() {
    let mut e = Employee::new("ali", "Ali");
    e.id = EmployeeId::new("e-a");
    let mut w = DayWindow::new(0, t(8, 0), t(20, 0)).unwrap();
    w.is_active = false;
    e.set_window(w);
    let (s, _) = setup(vec![e]);

    let slots = s
        .available_slots(&EmployeeId::new("e-a"), monday(), sunday_noon())
        .unwrap();
    assert!(slots.is_empty());
}

#[test]
fn least_loaded_employee_wins() {
    let (mut s, area_id) = setup(vec![
        employee("ali", "e-x", t(8, 0), t(20, 0)),
        employee("badr", "e-y", t(8, 0), t(20, 0)),
    ]);
    // X : 2 réservations actives ce jour-là, Y : 1
    push_booking(&mut s, "e-x", t(8, 0));
    push_booking(&mut s, "e-x", t(14, 0));
    push_booking(&mut s, "e-y", t(17, 0));

    let picked = s.select_employee(&area_id, monday(), t(10, 0)).unwrap();
    assert_eq!(picked, Some(EmployeeId::new("e-y")));
}

#[test]
fn equal_load_tie_breaks_on_lowest_id() {
    let (s, area_id) = setup(vec![
        employee("badr", "e-b", t(8, 0), t(20, 0)),
        employee("ali", "e-a", t(8, 0), t(20, 0)),
    ]);

    let picked = s.select_employee(&area_id, monday(), t(10, 0)).unwrap();
    assert_eq!(picked, Some(EmployeeId::new("e-a")));
}

#[test]
fn selection_requires_full_span_inside_window() {
    // fenêtre 08:00–11:00 : 10:00 commence dedans mais finirait 11:30
    let (s, area_id) = setup(vec![employee("ali", "e-a", t(8, 0), t(11, 0))]);

    assert!(s.select_employee(&area_id, monday(), t(9, 30)).unwrap().is_some());
    assert_eq!(s.select_employee(&area_id, monday(), t(10, 0)).unwrap(), None);
}

#[test]
fn nobody_scheduled_that_weekday_means_not_found() {
    let mut e = Employee::new("ali", "Ali");
    e.id = EmployeeId::new("e-a");
    e.set_window(DayWindow::new(3, t(8, 0), t(20, 0)).unwrap());
    let (s, area_id) = setup(vec![e]);

    for hour in [8u32, 10, 12, 18] {
        assert_eq!(
            s.select_employee(&area_id, monday(), t(hour, 0)).unwrap(),
            None
        );
    }
}

#[test]
fn reassign_rejects_busy_target_and_accepts_free_one() {
    let (mut s, area_id) = setup(vec![
        employee("ali", "e-a", t(8, 0), t(20, 0)),
        employee("badr", "e-b", t(8, 0), t(20, 0)),
    ]);
    // badr occupé à 10:00
    push_booking(&mut s, "e-b", t(10, 0));

    let id = s
        .create_booking(&area_id, monday(), t(10, 30), "client")
        .unwrap();
    // 10:30 affecté à ali (badr en conflit 10:00–11:30)
    assert_eq!(
        s.registry().find_booking(&id).unwrap().employee,
        EmployeeId::new("e-a")
    );

    let err = s.reassign(&id, &EmployeeId::new("e-b")).unwrap_err();
    assert!(matches!(err, lavage::SchedError::ReassignInvalid(_)));

    // après annulation chez badr, la réaffectation passe
    let badr_booking = s.registry().bookings[0].id.clone();
    s.cancel_booking(&badr_booking).unwrap();
    s.reassign(&id, &EmployeeId::new("e-b")).unwrap();
    assert_eq!(
        s.registry().find_booking(&id).unwrap().employee,
        EmployeeId::new("e-b")
    );
}

#[test]
fn reschedule_checks_window_and_conflicts() {
    let (mut s, area_id) = setup(vec![employee("ali", "e-a", t(8, 0), t(20, 0))]);
    let id = s
        .create_booking(&area_id, monday(), t(10, 0), "client")
        .unwrap();

    // hors fenêtre (finirait après 20:00)
    let err = s.reschedule(&id, monday(), t(19, 0)).unwrap_err();
    assert!(matches!(err, lavage::SchedError::RescheduleInvalid(_)));

    // un report qui ne chevauche que la réservation elle-même est permis
    s.reschedule(&id, monday(), t(10, 30)).unwrap();
    assert_eq!(s.registry().find_booking(&id).unwrap().start, t(10, 30));
}
