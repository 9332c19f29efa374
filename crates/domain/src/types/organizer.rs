//! Meeting organizer

use serde::{Deserialize, Serialize};

/// Local user who creates and owns a meeting.
///
/// `id` is the course platform's user id; the directory id used by the
/// provider is looked up from `email` when needed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Organizer {
    pub id: i64,
    pub full_name: String,
    pub email: String,
}

impl Organizer {
    pub fn new(id: i64, full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { id, full_name: full_name.into(), email: email.into() }
    }

    /// Mailbox address as used in provider paths.
    pub fn normalised_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalised_email_is_lowercase_and_trimmed() {
        let organizer = Organizer::new(7, "Ada Lovelace", " Ada.Lovelace@Example.EDU ");
        assert_eq!(organizer.normalised_email(), "ada.lovelace@example.edu");
    }
}
