#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveTime};
use lavage::model::Employee;
use lavage::{apply_template, preview_grid, ScheduleTemplate, TemplateStore, TemplateWindow};
use tempfile::tempdir;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn sample_template() -> ScheduleTemplate {
    ScheduleTemplate {
        id: "semaine-standard".into(),
        name: "Semaine standard".into(),
        description: Some("Lundi-vendredi, journée pleine".into()),
        windows: (0..5)
            .map(|day| TemplateWindow {
                day,
                start_time: t(8, 0),
                end_time: t(20, 0),
            })
            .collect(),
        metadata: None,
    }
}

#[test]
fn save_and_load_template_roundtrip() {
    let dir = tempdir().unwrap();
    let store = TemplateStore::new(dir.path());
    let template = sample_template();
    store.save(&template).unwrap();

    let loaded = store.load(&template.id).unwrap();
    assert_eq!(loaded.id, template.id);
    assert_eq!(loaded.windows.len(), template.windows.len());

    let infos = store.list().unwrap();
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].template.id, template.id);
}

#[test]
fn two_windows_same_day_rejected() {
    let mut template = sample_template();
    template.windows.push(TemplateWindow {
        day: 0,
        start_time: t(6, 0),
        end_time: t(7, 30),
    });
    assert!(template.validate().is_err());
}

#[test]
fn window_shorter_than_a_wash_rejected() {
    let mut template = sample_template();
    template.windows[0].end_time = t(9, 0); // 60 min < 90
    assert!(template.validate().is_err());
}

#[test]
fn apply_template_replaces_covered_days() {
    let mut employee = Employee::new("ali", "Ali");
    apply_template(&mut employee, &sample_template()).unwrap();
    assert_eq!(employee.windows.len(), 5);
    assert!(employee.window_for(0).is_some());
    assert!(employee.window_for(5).is_none()); // samedi hors template
}

#[test]
fn preview_grid_matches_slot_stride() {
    let template = sample_template();
    let monday = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
    let grid = preview_grid(&template, monday).unwrap();
    assert_eq!(grid.len(), 8);
    assert_eq!(grid.first().copied(), Some(t(8, 0)));
    assert_eq!(grid.last().copied(), Some(t(18, 30)));

    // dimanche : aucun créneau dans ce template
    let sunday = NaiveDate::from_ymd_opt(2026, 8, 9).unwrap();
    assert!(preview_grid(&template, sunday).unwrap().is_empty());
}
