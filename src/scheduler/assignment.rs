use super::{util, Scheduler};
use crate::model::{Area, Booking, BookingId, EmployeeId, Registry};
use chrono::{NaiveDate, NaiveTime};

/// Choisit l'employé du quartier pour un créneau donné.
///
/// Éligible = fenêtre active couvrant tout le créneau ET aucune réservation
/// active en chevauchement ce jour-là. Parmi les éligibles, l'employé le
/// moins chargé du jour gagne ; à charge égale, l'id le plus petit
/// (règle d'égalité fixée, indépendante de l'ordre du registre).
pub(super) fn select_employee(
    registry: &Registry,
    area: &Area,
    date: NaiveDate,
    start: NaiveTime,
) -> Option<EmployeeId> {
    let day = util::weekday_index(date);
    let mut candidates: Vec<(usize, &EmployeeId)> = Vec::new();

    for id in &area.employees {
        let Some(employee) = registry.find_employee_by_id(id) else {
            continue;
        };
        let Some(window) = employee.window_for(day) else {
            continue;
        };
        if !window.fits(start) {
            continue;
        }
        let bookings = registry.active_bookings_for(id, date);
        if util::conflicts_with_any(date, start, &bookings) {
            continue;
        }
        candidates.push((bookings.len(), id));
    }

    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.as_str().cmp(b.1.as_str())));
    candidates.first().map(|(_, id)| (*id).clone())
}

impl Scheduler {
    /// Vrai si l'employé peut prendre `[start, start+90)` à cette date,
    /// en ignorant au besoin une réservation (réaffectation, report).
    pub(super) fn employee_free_at(
        &self,
        employee: &EmployeeId,
        date: NaiveDate,
        start: NaiveTime,
        exclude: Option<&BookingId>,
    ) -> bool {
        let Some(emp) = self.registry.find_employee_by_id(employee) else {
            return false;
        };
        let Some(window) = emp.window_for(util::weekday_index(date)) else {
            return false;
        };
        if !window.fits(start) {
            return false;
        }

        let bookings: Vec<&Booking> = self
            .registry
            .bookings
            .iter()
            .filter(|b| {
                &b.employee == employee
                    && b.date == date
                    && b.status.is_active()
                    && exclude.map_or(true, |ex| &b.id != ex)
            })
            .collect();
        !util::conflicts_with_any(date, start, &bookings)
    }
}
