use crate::model::{Booking, Employee, Registry};
use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDateTime};

/// Représente un rappel généré pour un employé.
#[derive(Debug, Clone)]
pub struct Reminder {
    pub employee_handle: String,
    pub booking_id: String,
    pub notice_at: NaiveDateTime,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, SMS, etc.).
/// L'envoi effectif reste à la charge de l'appelant.
pub trait ReminderRenderer {
    fn render(&self, employee: &Employee, booking: &Booking, notice_at: NaiveDateTime) -> String;
}

/// Gabarit texte simple destiné à un futur mail/SMS.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReminder;

impl ReminderRenderer for TextReminder {
    fn render(&self, employee: &Employee, booking: &Booking, notice_at: NaiveDateTime) -> String {
        format!(
            "Bonjour {name},\n\nUn lavage est prévu pour {customer} le {date} de {start} à {end}.\nCe message est généré le {notice}.\n\nMerci de vérifier ton matériel avant de partir.\n",
            name = employee.display_name,
            customer = booking.customer,
            date = booking.date.format("%Y-%m-%d"),
            start = booking.start.format("%H:%M"),
            end = booking.end().format("%H:%M"),
            notice = notice_at.format("%Y-%m-%d %H:%M")
        )
    }
}

/// Prépare un rappel pour la prochaine réservation active d'un employé.
pub fn prepare_reminder(
    registry: &Registry,
    handle: &str,
    hours_before: i64,
    now: NaiveDateTime,
    renderer: &dyn ReminderRenderer,
) -> Result<Reminder> {
    if hours_before < 0 {
        bail!("hours_before must be positive");
    }

    let employee = registry
        .find_employee_by_handle(handle)
        .with_context(|| format!("unknown employee handle: {handle}"))?;

    let mut upcoming: Vec<&Booking> = registry
        .bookings
        .iter()
        .filter(|b| {
            b.employee == employee.id && b.status.is_active() && b.date.and_time(b.start) >= now
        })
        .collect();

    if upcoming.is_empty() {
        bail!("no upcoming booking found for handle {handle}");
    }

    upcoming.sort_by_key(|b| (b.date, b.start));
    let booking = upcoming[0];

    let notice_at = booking.date.and_time(booking.start) - Duration::hours(hours_before);

    let content = renderer.render(employee, booking, notice_at);
    Ok(Reminder {
        employee_handle: employee.handle.clone(),
        booking_id: booking.id.as_str().to_string(),
        notice_at,
        content,
    })
}
