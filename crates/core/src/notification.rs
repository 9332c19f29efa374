//! Creation notice sent to the organizer of a new broadcast event

use serde::Serialize;
use teamsmeeting_domain::constants::CREATION_NOTICE_SUBJECT;

/// Message confirming a meeting was created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreationNotice {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl CreationNotice {
    pub fn compose(meeting_name: &str, course_name: &str, join_url: &str) -> Self {
        let intro = format!(
            "Hello,\nYou have just created the Teams online meeting \"{meeting_name}\" on your \
             course \"{course_name}\".\nYou can find this meeting by clicking on this link : "
        );

        let url = escape_html(join_url);
        let html = format!(
            "<div>\n<p>{}</p>\n<a href=\"{url}\" target=\"_blank\">{url}</a></div>\n",
            escape_html(&intro).replace('\n', "<br>")
        );

        Self { subject: CREATION_NOTICE_SUBJECT.to_string(), text: format!("{intro}{join_url}"), html }
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
