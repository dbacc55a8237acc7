mod assignment;
mod conflicts;
mod mutate;
mod slots;
mod types;
mod util;

pub use slots::Slots;
pub use types::{Conflict, ConflictKind, SchedError};

use crate::model::{Area, AreaId, Booking, BookingId, BookingStatus, Employee, EmployeeId, Registry};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Scheduler : encapsule le registre (employés, quartiers, réservations).
///
/// Toutes les requêtes de disponibilité prennent `now` en paramètre — jamais
/// d'horloge lue en interne, les tests fixent l'instant qu'ils veulent.
#[derive(Debug, Default)]
pub struct Scheduler {
    registry: Registry,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            registry: Registry::default(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn add_employees(&mut self, employees: Vec<Employee>) {
        self.registry.employees.extend(employees);
    }

    pub fn add_areas(&mut self, areas: Vec<Area>) {
        self.registry.areas.extend(areas);
    }

    /// Créneaux libres d'un employé pour une date (ordre croissant).
    pub fn available_slots(
        &self,
        employee: &EmployeeId,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<Vec<NaiveTime>, SchedError> {
        let Some(emp) = self.registry.find_employee_by_id(employee) else {
            return Err(SchedError::UnknownEmployee(employee.as_str().to_string()));
        };
        Ok(slots::employee_slots(&self.registry, emp, date, now).collect())
    }

    /// Disponibilité agrégée d'un quartier : union triée et dédupliquée des
    /// créneaux de tous ses employés.
    pub fn area_slots(
        &self,
        area: &AreaId,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<Vec<NaiveTime>, SchedError> {
        let Some(area) = self.registry.find_area_by_id(area) else {
            return Err(SchedError::UnknownArea(area.as_str().to_string()));
        };
        Ok(slots::area_slots(&self.registry, area, date, now))
    }

    /// Décision d'affectation pure : quel employé prendrait ce créneau ?
    /// `None` signifie « aucun disponible » — résultat attendu, pas une erreur.
    pub fn select_employee(
        &self,
        area: &AreaId,
        date: NaiveDate,
        start: NaiveTime,
    ) -> Result<Option<EmployeeId>, SchedError> {
        let Some(area) = self.registry.find_area_by_id(area) else {
            return Err(SchedError::UnknownArea(area.as_str().to_string()));
        };
        Ok(assignment::select_employee(&self.registry, area, date, start))
    }

    /// Affecte puis enregistre une réservation. La décision et l'insertion
    /// passent par le même prédicat de conflit, dans le même appel.
    pub fn create_booking(
        &mut self,
        area_id: &AreaId,
        date: NaiveDate,
        start: NaiveTime,
        customer: &str,
    ) -> Result<BookingId, SchedError> {
        let employee = self
            .select_employee(area_id, date, start)?
            .ok_or(SchedError::NoAvailability)?;

        let mut booking = Booking::new(
            employee,
            area_id.clone(),
            customer.to_string(),
            date,
            start,
        )
        .map_err(|_| SchedError::InvalidTime)?;
        booking.status = BookingStatus::Assigned;

        let id = booking.id.clone();
        self.registry.bookings.push(booking);
        Ok(id)
    }

    pub fn reassign(&mut self, booking: &BookingId, to: &EmployeeId) -> Result<(), SchedError> {
        mutate::reassign(self, booking, to)
    }

    pub fn reschedule(
        &mut self,
        booking: &BookingId,
        new_date: NaiveDate,
        new_start: NaiveTime,
    ) -> Result<(), SchedError> {
        mutate::reschedule(self, booking, new_date, new_start)
    }

    pub fn cancel_booking(&mut self, booking: &BookingId) -> Result<(), SchedError> {
        mutate::cancel(self, booking)
    }

    pub fn set_status(
        &mut self,
        booking: &BookingId,
        status: BookingStatus,
    ) -> Result<(), SchedError> {
        mutate::set_status(self, booking, status)
    }

    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        conflicts::detect_conflicts(self)
    }
}
