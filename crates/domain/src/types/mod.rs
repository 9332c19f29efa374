//! Domain types and models

pub mod course;
pub mod meeting;
pub mod organizer;

pub use course::Course;
pub use meeting::{EventWindow, MeetingDraft, MeetingInstance, MeetingKind, RemoteMeeting};
pub use organizer::Organizer;
