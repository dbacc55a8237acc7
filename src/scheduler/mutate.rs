use super::{util, SchedError, Scheduler};
use crate::model::{BookingId, BookingStatus, EmployeeId};
use chrono::{NaiveDate, NaiveTime};

/// Réaffecte une réservation à un autre employé du registre, après
/// re-vérification fenêtre + chevauchement chez la cible.
pub(super) fn reassign(
    scheduler: &mut Scheduler,
    booking_id: &BookingId,
    to: &EmployeeId,
) -> Result<(), SchedError> {
    let Some(pos) = util::find_booking_index(&scheduler.registry.bookings, booking_id) else {
        return Err(SchedError::UnknownBooking(booking_id.as_str().to_string()));
    };
    if scheduler.registry.find_employee_by_id(to).is_none() {
        return Err(SchedError::UnknownEmployee(to.as_str().to_string()));
    }

    let (date, start) = {
        let booking = &scheduler.registry.bookings[pos];
        if !booking.status.is_active() {
            return Err(SchedError::ReassignInvalid("booking is no longer active"));
        }
        if &booking.employee == to {
            return Err(SchedError::ReassignInvalid(
                "already assigned to this employee",
            ));
        }
        (booking.date, booking.start)
    };

    if !scheduler.employee_free_at(to, date, start, Some(booking_id)) {
        return Err(SchedError::ReassignInvalid(
            "target employee unavailable for this slot",
        ));
    }

    scheduler.registry.bookings[pos].employee = to.clone();
    Ok(())
}

/// Reporte une réservation sur un autre créneau du même employé.
pub(super) fn reschedule(
    scheduler: &mut Scheduler,
    booking_id: &BookingId,
    new_date: NaiveDate,
    new_start: NaiveTime,
) -> Result<(), SchedError> {
    let Some(pos) = util::find_booking_index(&scheduler.registry.bookings, booking_id) else {
        return Err(SchedError::UnknownBooking(booking_id.as_str().to_string()));
    };

    let employee = {
        let booking = &scheduler.registry.bookings[pos];
        if !booking.status.is_active() {
            return Err(SchedError::RescheduleInvalid("booking is no longer active"));
        }
        booking.employee.clone()
    };

    if !scheduler.employee_free_at(&employee, new_date, new_start, Some(booking_id)) {
        return Err(SchedError::RescheduleInvalid(
            "employee unavailable for the new slot",
        ));
    }

    let booking = &mut scheduler.registry.bookings[pos];
    booking.date = new_date;
    booking.start = new_start;
    Ok(())
}

/// Annule une réservation encore active.
pub(super) fn cancel(scheduler: &mut Scheduler, booking_id: &BookingId) -> Result<(), SchedError> {
    set_status(scheduler, booking_id, BookingStatus::Cancelled)
}

/// Change le statut d'une réservation ; les statuts terminaux sont figés.
pub(super) fn set_status(
    scheduler: &mut Scheduler,
    booking_id: &BookingId,
    status: BookingStatus,
) -> Result<(), SchedError> {
    let Some(booking) = scheduler.registry.find_booking_mut(booking_id) else {
        return Err(SchedError::UnknownBooking(booking_id.as_str().to_string()));
    };
    if booking.status.is_terminal() {
        return Err(SchedError::StatusInvalid("booking already closed"));
    }
    booking.status = status;
    Ok(())
}
