use crate::model::{BookingId, EmployeeId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    Overlap,
    OutsideWindow,
}

#[derive(Debug, Clone)]
pub struct Conflict {
    pub employee: EmployeeId,
    pub booking_a: BookingId,
    pub booking_b: Option<BookingId>,
    pub kind: ConflictKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid time: wash must fit inside a single day")]
    InvalidTime,
    #[error("unknown employee: {0}")]
    UnknownEmployee(String),
    #[error("unknown area: {0}")]
    UnknownArea(String),
    #[error("unknown booking: {0}")]
    UnknownBooking(String),
    #[error("no employee available for the requested slot")]
    NoAvailability,
    #[error("reassign invalid: {0}")]
    ReassignInvalid(&'static str),
    #[error("reschedule invalid: {0}")]
    RescheduleInvalid(&'static str),
    #[error("status change invalid: {0}")]
    StatusInvalid(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
