use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Durée fixe d'un lavage, en minutes (constante métier).
pub const WASH_DURATION_MIN: i64 = 90;

/// Identifiant fort pour Employee
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Area
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AreaId(String);

impl AreaId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Booking
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(String);

impl BookingId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fenêtre de disponibilité hebdomadaire (au plus une par jour de semaine).
///
/// `day` : 0=lundi .. 6=dimanche. Une fenêtre inactive équivaut à une absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub day: u8,
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl DayWindow {
    /// Valide `day <= 6`, `end > start`, et qu'au moins un lavage tient dedans.
    pub fn new(day: u8, start: NaiveTime, end: NaiveTime) -> Result<Self, String> {
        if day > 6 {
            return Err("day must be in 0..=6 (0=Monday)".to_string());
        }
        if end <= start {
            return Err("window end must be after start".to_string());
        }
        let minutes =
            i64::from(end.num_seconds_from_midnight() - start.num_seconds_from_midnight()) / 60;
        if minutes < WASH_DURATION_MIN {
            return Err("window shorter than a single wash".to_string());
        }
        Ok(Self {
            day,
            start,
            end,
            is_active: true,
        })
    }

    /// Vrai si `[start, start+90min)` tient entièrement dans la fenêtre.
    pub fn fits(&self, start: NaiveTime) -> bool {
        if start < self.start {
            return false;
        }
        let start_min = i64::from(start.num_seconds_from_midnight()) / 60;
        let end_min = i64::from(self.end.num_seconds_from_midnight()) / 60;
        start_min + WASH_DURATION_MIN <= end_min
    }
}

/// Employé (laveur) avec son planning hebdomadaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub handle: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub windows: Vec<DayWindow>,
}

impl Employee {
    pub fn new<H: Into<String>, D: Into<String>>(handle: H, display_name: D) -> Self {
        Self {
            id: EmployeeId::random(),
            handle: handle.into(),
            display_name: display_name.into(),
            windows: Vec::new(),
        }
    }

    /// Remplace la fenêtre du jour concerné (au plus une par jour).
    pub fn set_window(&mut self, window: DayWindow) {
        self.windows.retain(|w| w.day != window.day);
        self.windows.push(window);
    }

    pub fn clear_window(&mut self, day: u8) {
        self.windows.retain(|w| w.day != day);
    }

    /// Fenêtre active pour un jour de semaine (0=lundi .. 6=dimanche).
    pub fn window_for(&self, day: u8) -> Option<&DayWindow> {
        self.windows.iter().find(|w| w.day == day && w.is_active)
    }
}

/// Quartier desservi : regroupe des employés pour l'agrégation
/// de disponibilités et le périmètre d'affectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub employees: Vec<EmployeeId>,
}

impl Area {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            id: AreaId::random(),
            name: name.into(),
            employees: Vec::new(),
        }
    }

    pub fn add_employee(&mut self, id: EmployeeId) {
        if !self.employees.contains(&id) {
            self.employees.push(id);
        }
    }
}

/// Statut d'une réservation.
///
/// Les cinq premiers occupent le calendrier de l'employé ; `Completed` et
/// `Cancelled` libèrent le créneau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Assigned,
    EnRoute,
    Arrived,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Vrai tant que la réservation bloque le créneau.
    pub fn is_active(self) -> bool {
        !matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Statut terminal : plus aucune transition permise.
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Assigned => "assigned",
            BookingStatus::EnRoute => "en_route",
            BookingStatus::Arrived => "arrived",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "assigned" => Ok(BookingStatus::Assigned),
            "en_route" => Ok(BookingStatus::EnRoute),
            "arrived" => Ok(BookingStatus::Arrived),
            "in_progress" => Ok(BookingStatus::InProgress),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

/// Réservation de lavage : un créneau de 90 minutes chez un employé.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub employee: EmployeeId,
    pub area: AreaId,
    pub customer: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub status: BookingStatus,
}

impl Booking {
    /// Crée une réservation en validant que le créneau ne déborde pas sur
    /// le jour suivant (les fenêtres sont intra-journée).
    pub fn new(
        employee: EmployeeId,
        area: AreaId,
        customer: String,
        date: NaiveDate,
        start: NaiveTime,
    ) -> Result<Self, String> {
        let start_min = i64::from(start.num_seconds_from_midnight()) / 60;
        if start_min + WASH_DURATION_MIN > 24 * 60 {
            return Err("wash would end past midnight".to_string());
        }
        Ok(Self {
            id: BookingId::random(),
            employee,
            area,
            customer,
            date,
            start,
            status: BookingStatus::Pending,
        })
    }

    /// Heure de fin (start + 90 min, garantie intra-journée).
    pub fn end(&self) -> NaiveTime {
        self.start + Duration::minutes(WASH_DURATION_MIN)
    }
}

/// Registre complet (employés, quartiers, réservations)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Registry {
    pub employees: Vec<Employee>,
    pub areas: Vec<Area>,
    pub bookings: Vec<Booking>,
}

impl Registry {
    pub fn find_employee_by_handle<'a>(&'a self, handle: &str) -> Option<&'a Employee> {
        self.employees.iter().find(|e| e.handle == handle)
    }
    pub fn find_employee_by_id<'a>(&'a self, id: &EmployeeId) -> Option<&'a Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }
    pub fn find_employee_mut_by_id(&mut self, id: &EmployeeId) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| &e.id == id)
    }
    pub fn find_area_by_name<'a>(&'a self, name: &str) -> Option<&'a Area> {
        self.areas.iter().find(|a| a.name == name)
    }
    pub fn find_area_by_id<'a>(&'a self, id: &AreaId) -> Option<&'a Area> {
        self.areas.iter().find(|a| &a.id == id)
    }
    pub fn find_area_mut_by_name(&mut self, name: &str) -> Option<&mut Area> {
        self.areas.iter_mut().find(|a| a.name == name)
    }
    pub fn find_booking<'a>(&'a self, id: &BookingId) -> Option<&'a Booking> {
        self.bookings.iter().find(|b| &b.id == id)
    }
    pub fn find_booking_mut(&mut self, id: &BookingId) -> Option<&mut Booking> {
        self.bookings.iter_mut().find(|b| &b.id == id)
    }

    /// Réservations actives d'un employé pour une date donnée.
    pub fn active_bookings_for(&self, employee: &EmployeeId, date: NaiveDate) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| &b.employee == employee && b.date == date && b.status.is_active())
            .collect()
    }
}
