#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};
use lavage::{
    io,
    model::{BookingId, BookingStatus},
    notification::{prepare_reminder, TextReminder},
    scheduler::{ConflictKind, SchedError, Scheduler},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de réservation de lavage (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de registre
    #[arg(long, global = true, default_value = "registry.json")]
    registry: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer des employés depuis un CSV
    ImportEmployees {
        #[arg(long)]
        csv: String,
    },

    /// Importer des quartiers depuis un CSV
    ImportAreas {
        #[arg(long)]
        csv: String,
    },

    /// Importer des fenêtres de disponibilité depuis un CSV
    ImportWindows {
        #[arg(long)]
        csv: String,
    },

    /// Lister les créneaux libres d'un quartier ou d'un employé
    Slots {
        /// Nom de quartier (union des employés)
        #[arg(long)]
        area: Option<String>,
        /// Handle d'employé
        #[arg(long)]
        employee: Option<String>,
        /// Date `YYYY-MM-DD`
        #[arg(long)]
        date: String,
        /// Instant courant `YYYY-MM-DDTHH:MM` (défaut: maintenant, heure locale)
        #[arg(long)]
        now: Option<String>,
    },

    /// Réserver un lavage (affectation automatique de l'employé)
    Book {
        #[arg(long)]
        area: String,
        /// Date `YYYY-MM-DD`
        #[arg(long)]
        date: String,
        /// Heure de début `HH:MM`
        #[arg(long)]
        time: String,
        #[arg(long)]
        customer: String,
    },

    /// Annuler une réservation
    Cancel {
        #[arg(long)]
        booking_id: String,
    },

    /// Changer le statut d'une réservation
    SetStatus {
        #[arg(long)]
        booking_id: String,
        /// pending|assigned|en_route|arrived|in_progress|completed|cancelled
        #[arg(long)]
        status: String,
    },

    /// Réaffecter une réservation à un autre employé
    Reassign {
        #[arg(long)]
        booking_id: String,
        #[arg(long)]
        employee: String,
    },

    /// Reporter une réservation sur un autre créneau
    Reschedule {
        #[arg(long)]
        booking_id: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
    },

    /// Lister et optionnellement exporter les réservations
    List {
        /// Restreindre à une date `YYYY-MM-DD`
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vérifier les conflits du registre
    Check {
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Générer un rappel texte pour un employé
    Notify {
        #[arg(long)]
        handle: String,
        #[arg(long, default_value_t = 12)]
        hours_before: i64,
        /// Fichier de sortie (texte brut)
        #[arg(long)]
        out: String,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("invalid date (expected YYYY-MM-DD): {raw}"))
}

fn parse_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| anyhow::anyhow!("invalid time (expected HH:MM): {raw}"))
}

fn parse_now(raw: Option<&str>) -> Result<NaiveDateTime> {
    match raw {
        None => Ok(Local::now().naive_local()),
        Some(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
            .map_err(|_| anyhow::anyhow!("invalid instant (expected YYYY-MM-DDTHH:MM): {s}")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.registry)?;
    let mut scheduler = match storage.load() {
        Ok(r) => {
            let mut s = Scheduler::new();
            *s.registry_mut() = r;
            s
        }
        Err(_) => Scheduler::new(),
    };

    let code = match cli.cmd {
        Commands::ImportEmployees { csv } => {
            let employees = io::import_employees_csv(csv)?;
            scheduler.add_employees(employees);
            storage.save(scheduler.registry())?;
            0
        }
        Commands::ImportAreas { csv } => {
            let areas = io::import_areas_csv(csv, scheduler.registry())?;
            scheduler.add_areas(areas);
            storage.save(scheduler.registry())?;
            0
        }
        Commands::ImportWindows { csv } => {
            let count = io::import_windows_csv(csv, scheduler.registry_mut())?;
            storage.save(scheduler.registry())?;
            println!("{count} window(s) imported");
            0
        }
        Commands::Slots {
            area,
            employee,
            date,
            now,
        } => {
            let date = parse_date(&date)?;
            let now = parse_now(now.as_deref())?;
            let slots = match (area, employee) {
                (Some(name), None) => {
                    let area_id = scheduler
                        .registry()
                        .find_area_by_name(&name)
                        .map(|a| a.id.clone())
                        .ok_or_else(|| anyhow::anyhow!("unknown area: {name}"))?;
                    scheduler.area_slots(&area_id, date, now)?
                }
                (None, Some(handle)) => {
                    let employee_id = scheduler
                        .registry()
                        .find_employee_by_handle(&handle)
                        .map(|e| e.id.clone())
                        .ok_or_else(|| anyhow::anyhow!("unknown employee: {handle}"))?;
                    scheduler.available_slots(&employee_id, date, now)?
                }
                _ => bail!("exactly one of --area or --employee is required"),
            };
            for slot in &slots {
                println!("{}", slot.format("%H:%M"));
            }
            0
        }
        Commands::Book {
            area,
            date,
            time,
            customer,
        } => {
            let date = parse_date(&date)?;
            let start = parse_time(&time)?;
            let area_id = scheduler
                .registry()
                .find_area_by_name(&area)
                .map(|a| a.id.clone())
                .ok_or_else(|| anyhow::anyhow!("unknown area: {area}"))?;
            match scheduler.create_booking(&area_id, date, start, &customer) {
                Ok(id) => {
                    storage.save(scheduler.registry())?;
                    let handle = scheduler
                        .registry()
                        .find_booking(&id)
                        .and_then(|b| scheduler.registry().find_employee_by_id(&b.employee))
                        .map(|e| e.handle.clone())
                        .unwrap_or_default();
                    println!("{} | {} {} | {}", id.as_str(), date, time, handle);
                    0
                }
                // résultat attendu, pas une panne : aucun employé libre
                Err(SchedError::NoAvailability) => {
                    eprintln!("no employee available for {date} {time} in {area}");
                    2
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Cancel { booking_id } => {
            scheduler.cancel_booking(&BookingId::new(booking_id))?;
            storage.save(scheduler.registry())?;
            0
        }
        Commands::SetStatus { booking_id, status } => {
            let status: BookingStatus = status.parse().map_err(anyhow::Error::msg)?;
            scheduler.set_status(&BookingId::new(booking_id), status)?;
            storage.save(scheduler.registry())?;
            0
        }
        Commands::Reassign {
            booking_id,
            employee,
        } => {
            let employee_id = scheduler
                .registry()
                .find_employee_by_handle(&employee)
                .map(|e| e.id.clone())
                .ok_or_else(|| anyhow::anyhow!("unknown employee: {employee}"))?;
            scheduler.reassign(&BookingId::new(booking_id), &employee_id)?;
            storage.save(scheduler.registry())?;
            0
        }
        Commands::Reschedule {
            booking_id,
            date,
            time,
        } => {
            let date = parse_date(&date)?;
            let start = parse_time(&time)?;
            scheduler.reschedule(&BookingId::new(booking_id), date, start)?;
            storage.save(scheduler.registry())?;
            0
        }
        Commands::List {
            date,
            out_json,
            out_csv,
        } => {
            let filter = date.as_deref().map(parse_date).transpose()?;
            if let Some(path) = out_json {
                io::export_registry_json(path, scheduler.registry())?;
            }
            if let Some(path) = out_csv {
                io::export_bookings_csv(path, scheduler.registry())?;
            }
            // impression compacte
            for b in &scheduler.registry().bookings {
                if filter.is_some_and(|d| b.date != d) {
                    continue;
                }
                let handle = scheduler
                    .registry()
                    .find_employee_by_id(&b.employee)
                    .map(|e| e.handle.as_str())
                    .unwrap_or("-");
                println!(
                    "{} | {} {} → {} | {} | {} | {}",
                    b.id.as_str(),
                    b.date,
                    b.start.format("%H:%M"),
                    b.end().format("%H:%M"),
                    handle,
                    b.customer,
                    b.status.as_str()
                );
            }
            0
        }
        Commands::Check { report } => {
            let conflicts = scheduler.detect_conflicts();
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["employee_id", "booking_a", "booking_b", "kind"])?;
                    for c in &conflicts {
                        w.write_record([
                            c.employee.as_str(),
                            c.booking_a.as_str(),
                            c.booking_b.as_ref().map(|b| b.as_str()).unwrap_or(""),
                            match c.kind {
                                ConflictKind::Overlap => "overlap",
                                ConflictKind::OutsideWindow => "outside_window",
                            },
                        ])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Notify {
            handle,
            hours_before,
            out,
        } => {
            let renderer = TextReminder;
            let reminder = prepare_reminder(
                scheduler.registry(),
                &handle,
                hours_before,
                Local::now().naive_local(),
                &renderer,
            )?;
            std::fs::write(&out, reminder.content)?;
            println!(
                "Reminder generated for {} (booking {}) at {}",
                reminder.employee_handle,
                reminder.booking_id,
                reminder.notice_at.format("%Y-%m-%d %H:%M")
            );
            0
        }
    };

    std::process::exit(code);
}
