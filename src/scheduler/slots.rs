use super::util;
use crate::model::{Area, Booking, DayWindow, Employee, Registry, WASH_DURATION_MIN};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::collections::BTreeSet;

/// Séquence paresseuse des créneaux libres d'un employé pour une date.
///
/// La grille avance de 90 minutes à partir du début de fenêtre ; recalculée
/// à chaque appel, jamais mémorisée (les réservations sous-jacentes bougent).
pub struct Slots<'a> {
    date: NaiveDate,
    cursor_min: i64,
    end_min: i64,
    /// Heure courante lorsque `date` est aujourd'hui : les créneaux qui
    /// démarrent à ou avant cette heure ne sont pas émis.
    cutoff: Option<NaiveTime>,
    bookings: Vec<&'a Booking>,
}

impl<'a> Slots<'a> {
    pub(crate) fn over_window(
        date: NaiveDate,
        window: &DayWindow,
        bookings: Vec<&'a Booking>,
        now: NaiveDateTime,
    ) -> Self {
        let cutoff = if date == now.date() {
            Some(now.time())
        } else {
            None
        };
        Self {
            date,
            cursor_min: i64::from(window.start.num_seconds_from_midnight()) / 60,
            end_min: i64::from(window.end.num_seconds_from_midnight()) / 60,
            cutoff,
            bookings,
        }
    }

    pub(crate) fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            cursor_min: 0,
            end_min: 0,
            cutoff: None,
            bookings: Vec::new(),
        }
    }
}

impl Iterator for Slots<'_> {
    type Item = NaiveTime;

    fn next(&mut self) -> Option<NaiveTime> {
        while self.cursor_min + WASH_DURATION_MIN <= self.end_min {
            let slot = NaiveTime::from_num_seconds_from_midnight_opt(
                (self.cursor_min * 60) as u32,
                0,
            )?;
            self.cursor_min += WASH_DURATION_MIN;

            if let Some(cutoff) = self.cutoff {
                if slot <= cutoff {
                    continue;
                }
            }
            if util::conflicts_with_any(self.date, slot, &self.bookings) {
                continue;
            }
            return Some(slot);
        }
        None
    }
}

/// Créneaux libres d'un employé, croissants. Séquence vide si l'employé n'a
/// pas de fenêtre active ce jour-là ou si la date est déjà passée.
pub(super) fn employee_slots<'a>(
    registry: &'a Registry,
    employee: &'a Employee,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Slots<'a> {
    if date < now.date() {
        return Slots::empty(date);
    }
    match employee.window_for(util::weekday_index(date)) {
        Some(window) => Slots::over_window(
            date,
            window,
            registry.active_bookings_for(&employee.id, date),
            now,
        ),
        None => Slots::empty(date),
    }
}

/// Union triée et dédupliquée des créneaux de tous les employés d'un quartier :
/// un horaire est proposé dès qu'au moins un employé peut le prendre.
pub(super) fn area_slots(
    registry: &Registry,
    area: &Area,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Vec<NaiveTime> {
    let mut union = BTreeSet::new();
    for id in &area.employees {
        if let Some(employee) = registry.find_employee_by_id(id) {
            union.extend(employee_slots(registry, employee, date, now));
        }
    }
    union.into_iter().collect()
}
