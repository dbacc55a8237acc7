#![forbid(unsafe_code)]
//! Lavage — bibliothèque de réservation pour lavage auto à domicile (sans BD).
//!
//! - Stockage fichiers (JSON/CSV).
//! - Créneaux de 90 minutes calculés depuis les plannings hebdomadaires.
//! - Affectation équilibrée par charge, détection de conflits.
//! - Dates et heures naïves ; « maintenant » toujours passé en paramètre.

pub mod io;
pub mod model;
pub mod notification;
pub mod scheduler;
pub mod storage;
pub mod template;

pub use model::{
    Area, AreaId, Booking, BookingId, BookingStatus, DayWindow, Employee, EmployeeId, Registry,
    WASH_DURATION_MIN,
};
pub use notification::{prepare_reminder, Reminder, ReminderRenderer, TextReminder};
pub use scheduler::{Conflict, ConflictKind, SchedError, Scheduler, Slots};
pub use storage::{JsonStorage, Storage};
pub use template::{
    apply_template, export_template_json, load_template_from_file, preview_grid, ScheduleTemplate,
    TemplateInfo, TemplateStore, TemplateWindow,
};
