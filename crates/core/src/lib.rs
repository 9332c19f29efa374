//! # Teams Meeting Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Scheduling rules (date reconciliation, validation, availability)
//! - Port/adapter interfaces (traits)
//! - The `MeetingService` use cases
//!
//! ## Architecture Principles
//! - Only depends on `teamsmeeting-domain`
//! - No HTTP or platform code
//! - The meeting provider is reached through the `MeetingProvider` port

pub mod availability;
pub mod calendar;
pub mod meeting;
pub mod notification;

// Re-export specific items to avoid ambiguity
pub use availability::{availability_message, details_dates, is_joinable_url, AccessDecision};
pub use calendar::{plan_calendar_events, CourseEvent, CourseEventKind};
pub use meeting::{Clock, MeetingProvider, MeetingService, ScheduleOutcome, SystemClock};
pub use notification::CreationNotice;
