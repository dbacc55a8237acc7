use crate::model::{Area, DayWindow, Employee, Registry};
use anyhow::{bail, Context};
use chrono::NaiveTime;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import d'employés depuis CSV: header `handle,display_name`
pub fn import_employees_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Employee>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let handle = rec.get(0).context("missing handle")?.trim();
        let display = rec.get(1).context("missing display_name")?.trim();
        if handle.is_empty() || display.is_empty() {
            bail!("invalid employee row (empty)");
        }
        out.push(Employee::new(handle.to_string(), display.to_string()));
    }
    Ok(out)
}

/// Import de quartiers depuis CSV: header `name,employee_handles`
/// (handles séparés par `;`). Les handles doivent déjà exister.
pub fn import_areas_csv<P: AsRef<Path>>(path: P, registry: &Registry) -> anyhow::Result<Vec<Area>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing area name")?.trim();
        if name.is_empty() {
            bail!("invalid area row (empty name)");
        }
        let mut area = Area::new(name.to_string());
        if let Some(handles) = rec.get(1) {
            for handle in handles.split(';').map(str::trim).filter(|h| !h.is_empty()) {
                let employee = registry
                    .find_employee_by_handle(handle)
                    .with_context(|| format!("unknown employee handle in area {name}: {handle}"))?;
                area.add_employee(employee.id.clone());
            }
        }
        out.push(area);
    }
    Ok(out)
}

/// Import de fenêtres de disponibilité: header `handle,day,start,end[,active]`
/// avec `day` 0=lundi..6=dimanche et heures `HH:MM`. Remplace la fenêtre
/// existante du même jour.
pub fn import_windows_csv<P: AsRef<Path>>(path: P, registry: &mut Registry) -> anyhow::Result<usize> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut count = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let handle = rec.get(0).context("missing handle")?.trim().to_string();
        let day: u8 = rec
            .get(1)
            .context("missing day")?
            .trim()
            .parse()
            .with_context(|| format!("invalid day for handle {handle}"))?;
        let start = parse_time(rec.get(2).context("missing start")?.trim())
            .with_context(|| format!("invalid start time for handle {handle}"))?;
        let end = parse_time(rec.get(3).context("missing end")?.trim())
            .with_context(|| format!("invalid end time for handle {handle}"))?;

        let mut window = DayWindow::new(day, start, end).map_err(anyhow::Error::msg)?;
        if let Some(flag) = rec.get(4) {
            let flag = flag.trim();
            if !flag.is_empty() {
                window.is_active = parse_bool(flag)
                    .with_context(|| format!("invalid active value for handle {handle}"))?;
            }
        }

        let employee = registry
            .employees
            .iter_mut()
            .find(|e| e.handle == handle)
            .with_context(|| format!("unknown employee handle: {handle}"))?;
        employee.set_window(window);
        count += 1;
    }
    Ok(count)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// `HH:MM`, secondes tolérées.
fn parse_time(raw: &str) -> anyhow::Result<NaiveTime> {
    if let Ok(t) = NaiveTime::parse_from_str(raw, "%H:%M") {
        return Ok(t);
    }
    NaiveTime::parse_from_str(raw, "%H:%M:%S").with_context(|| format!("invalid time: {raw}"))
}

/// Export JSON du registre (jolie mise en forme)
pub fn export_registry_json<P: AsRef<Path>>(path: P, registry: &Registry) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(registry)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des réservations:
/// header `id,date,start,end,employee_handle,area,customer,status`
pub fn export_bookings_csv<P: AsRef<Path>>(path: P, registry: &Registry) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "id",
        "date",
        "start",
        "end",
        "employee_handle",
        "area",
        "customer",
        "status",
    ])?;
    for b in &registry.bookings {
        let employee = registry
            .find_employee_by_id(&b.employee)
            .map(|e| e.handle.as_str())
            .unwrap_or("");
        let area = registry
            .find_area_by_id(&b.area)
            .map(|a| a.name.as_str())
            .unwrap_or("");
        let date = b.date.format("%Y-%m-%d").to_string();
        let start = b.start.format("%H:%M").to_string();
        let end = b.end().format("%H:%M").to_string();
        w.write_record([
            b.id.as_str(),
            date.as_str(),
            start.as_str(),
            end.as_str(),
            employee,
            area,
            b.customer.as_str(),
            b.status.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
