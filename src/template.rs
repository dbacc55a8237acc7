use crate::model::{DayWindow, Employee};
use crate::scheduler::Slots;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Planning hebdomadaire type, applicable à un employé.
///
/// C'est l'outil d'administration : définir une fois « semaine standard »
/// et la poser sur chaque nouvel embauché.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub windows: Vec<TemplateWindow>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl ScheduleTemplate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            bail!("template id cannot be empty");
        }
        if self.name.trim().is_empty() {
            bail!("template name cannot be empty");
        }
        if self.windows.is_empty() {
            bail!("template must contain at least one window");
        }
        for window in &self.windows {
            window.validate()?;
        }
        validate_one_window_per_day(&self.windows)?;
        Ok(())
    }
}

/// Fenêtre d'un jour de semaine (0=lundi .. 6=dimanche).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateWindow {
    pub day: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl TemplateWindow {
    fn validate(&self) -> Result<()> {
        DayWindow::new(self.day, self.start_time, self.end_time)
            .map(|_| ())
            .map_err(anyhow::Error::msg)
    }
}

#[derive(Debug, Clone)]
pub struct TemplateInfo {
    pub template: ScheduleTemplate,
    pub path: PathBuf,
    pub modified: Option<DateTime<Utc>>,
}

/// Gestion simple des templates persistés sur disque.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    base_dir: PathBuf,
}

impl TemplateStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            base_dir: dir.as_ref().to_path_buf(),
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("creating template directory {}", self.base_dir.display()))
    }

    pub fn save(&self, template: &ScheduleTemplate) -> Result<PathBuf> {
        template.validate()?;
        self.ensure_dir()?;
        let path = self.base_dir.join(format!("{}.json", template.id));
        let json = serde_json::to_string_pretty(template)?;
        fs::write(&path, json).with_context(|| format!("writing template {}", path.display()))?;
        Ok(path)
    }

    pub fn load(&self, id: &str) -> Result<ScheduleTemplate> {
        let path = self.base_dir.join(format!("{}.json", id));
        let data =
            fs::read(&path).with_context(|| format!("reading template {}", path.display()))?;
        let template: ScheduleTemplate = serde_json::from_slice(&data)
            .with_context(|| format!("parsing template {}", path.display()))?;
        template.validate()?;
        Ok(template)
    }

    pub fn list(&self) -> Result<Vec<TemplateInfo>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }
        let mut infos = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let data = fs::read(&path)?;
            let template: ScheduleTemplate = match serde_json::from_slice(&data) {
                Ok(t) => t,
                Err(err) => {
                    eprintln!(
                        "Warning: could not parse template {}: {err}",
                        path.display()
                    );
                    continue;
                }
            };
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .ok()
                .map(DateTime::<Utc>::from);
            infos.push(TemplateInfo {
                template,
                path,
                modified,
            });
        }
        infos.sort_by(|a, b| a.template.id.cmp(&b.template.id));
        Ok(infos)
    }
}

/// Pose le planning type sur un employé (remplace les fenêtres des jours
/// couverts par le template, laisse les autres intactes).
pub fn apply_template(employee: &mut Employee, template: &ScheduleTemplate) -> Result<()> {
    template.validate()?;
    for w in &template.windows {
        let window =
            DayWindow::new(w.day, w.start_time, w.end_time).map_err(anyhow::Error::msg)?;
        employee.set_window(window);
    }
    Ok(())
}

/// Grille de créneaux qu'un template offrirait à une date donnée, sans
/// aucune réservation existante — l'aperçu montré avant application.
pub fn preview_grid(template: &ScheduleTemplate, date: NaiveDate) -> Result<Vec<NaiveTime>> {
    template.validate()?;
    let day = date.weekday().num_days_from_monday() as u8;
    let Some(w) = template.windows.iter().find(|w| w.day == day) else {
        return Ok(Vec::new());
    };
    let window = DayWindow::new(w.day, w.start_time, w.end_time).map_err(anyhow::Error::msg)?;
    let eve = date
        .pred_opt()
        .context("date underflow")?
        .and_time(NaiveTime::MIN);
    Ok(Slots::over_window(date, &window, Vec::new(), eve).collect())
}

pub fn export_template_json<P: AsRef<Path>>(path: P, template: &ScheduleTemplate) -> Result<()> {
    let json = serde_json::to_string_pretty(template)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_template_from_file<P: AsRef<Path>>(path: P) -> Result<ScheduleTemplate> {
    let data = fs::read(&path)?;
    let template: ScheduleTemplate = serde_json::from_slice(&data)?;
    template.validate()?;
    Ok(template)
}

fn validate_one_window_per_day(windows: &[TemplateWindow]) -> Result<()> {
    for (i, a) in windows.iter().enumerate() {
        for b in windows.iter().skip(i + 1) {
            if a.day == b.day {
                bail!("template defines more than one window for day {}", a.day);
            }
        }
    }
    Ok(())
}
