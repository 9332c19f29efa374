//! Meeting scheduling: ports, date rules and the service tying them together

pub mod ports;
pub mod schedule;
pub mod service;
pub mod validation;

pub use ports::{Clock, MeetingProvider, SystemClock};
pub use schedule::{format_graph_datetime, parse_graph_datetime, reconcile_dates, resolve_window};
pub use service::{MeetingService, ScheduleOutcome};
pub use validation::{validate_draft, ScheduleViolation};
