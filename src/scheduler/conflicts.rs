use super::{util, Conflict, ConflictKind, Scheduler};
use crate::model::Booking;

/// Audit du registre : chevauchements entre réservations actives d'un même
/// employé, et réservations posées hors fenêtre de disponibilité.
pub(super) fn detect_conflicts(scheduler: &Scheduler) -> Vec<Conflict> {
    let mut out = Vec::new();

    for employee in scheduler.registry.employees.iter() {
        let mut bookings: Vec<&Booking> = scheduler
            .registry
            .bookings
            .iter()
            .filter(|b| b.employee == employee.id && b.status.is_active())
            .collect();
        bookings.sort_by_key(|b| (b.date, b.start));

        for (idx, a) in bookings.iter().enumerate() {
            let fits = employee
                .window_for(util::weekday_index(a.date))
                .map(|w| w.fits(a.start))
                .unwrap_or(false);
            if !fits {
                out.push(Conflict {
                    employee: employee.id.clone(),
                    booking_a: a.id.clone(),
                    booking_b: None,
                    kind: ConflictKind::OutsideWindow,
                });
            }

            for b in bookings.iter().skip(idx + 1) {
                if b.date != a.date {
                    break;
                }
                let (a_start, a_end) = util::wash_span(a.date, a.start);
                let (b_start, b_end) = util::wash_span(b.date, b.start);
                if util::overlaps(a_start, a_end, b_start, b_end) {
                    out.push(Conflict {
                        employee: employee.id.clone(),
                        booking_a: a.id.clone(),
                        booking_b: Some(b.id.clone()),
                        kind: ConflictKind::Overlap,
                    });
                }
            }
        }
    }

    out
}
