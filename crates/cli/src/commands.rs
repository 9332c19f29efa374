use anyhow::{Context, Result};
use chrono::DateTime;
use clap::{Args, Subcommand};
use serde_json::{json, Value};
use teamsmeeting_core::{availability_message, MeetingProvider, MeetingService};
use teamsmeeting_domain::{Config, Course, MeetingDraft, MeetingKind, Organizer};
use tracing::info;

#[derive(Subcommand)]
pub enum Command {
    /// Acquire an access token and report when it expires
    Token,

    /// Resolve a mailbox to its directory user id
    LookupUser {
        #[arg(long)]
        email: String,
    },

    /// Create a broadcast event, or a reusable meeting with --reusable
    Schedule(ScheduleArgs),

    /// Fetch a broadcast event from the organizer's calendar
    Show {
        #[arg(long)]
        organizer_email: String,

        #[arg(long)]
        event_id: String,
    },

    /// Look up an online meeting by its video teleconference id
    FindMeeting {
        #[arg(long, value_name = "ID")]
        vtc_id: String,
    },

    /// Delete a reusable online meeting
    Delete {
        #[arg(long)]
        meeting_id: String,
    },
}

#[derive(Args)]
pub struct ScheduleArgs {
    /// Meeting subject
    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    intro: String,

    #[arg(long)]
    course_id: i64,

    /// Course name used in the creation notice
    #[arg(long, default_value = "")]
    course_name: String,

    #[arg(long)]
    organizer_email: String,

    #[arg(long)]
    organizer_name: String,

    #[arg(long, default_value_t = 0)]
    organizer_id: i64,

    /// Create a reusable meeting instead of a one-shot event
    #[arg(long)]
    reusable: bool,

    /// Opening time, RFC 3339 (e.g. 2024-06-01T10:00:00+02:00)
    #[arg(long, value_parser = parse_timestamp)]
    open: Option<i64>,

    /// Closing time, RFC 3339
    #[arg(long, value_parser = parse_timestamp)]
    close: Option<i64>,
}

fn parse_timestamp(raw: &str) -> std::result::Result<i64, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.timestamp())
        .map_err(|e| format!("expected an RFC 3339 date-time: {e}"))
}

fn mailbox(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn run(command: Command, config: &Config) -> Result<Value> {
    let connection =
        teamsmeeting_infra::connect(config).context("failed to set up the Graph client")?;

    match command {
        Command::Token => {
            let token = connection.auth.token().await.context("token request failed")?;
            Ok(json!({ "token_type": token.token_type, "expires_at": token.expires_at }))
        }

        Command::LookupUser { email } => {
            let user_id = connection
                .client
                .find_user_id(&mailbox(&email))
                .await
                .with_context(|| format!("lookup of {email} failed"))?;
            Ok(json!({ "email": email, "user_id": user_id }))
        }

        Command::Schedule(args) => {
            let service = MeetingService::new(connection.client, config.meeting.clone())?;

            let kind = if args.reusable { MeetingKind::Reusable } else { MeetingKind::Broadcast };
            let draft = MeetingDraft {
                name: args.name,
                intro: args.intro,
                kind,
                open_date: args.open,
                close_date: args.close,
            };
            let course = Course { id: args.course_id, full_name: args.course_name };
            let organizer =
                Organizer::new(args.organizer_id, args.organizer_name, args.organizer_email);

            let outcome = service
                .schedule(&draft, &course, &organizer)
                .await
                .context("scheduling failed")?;
            info!(remote_id = %outcome.instance.remote_id, "meeting scheduled");

            Ok(serde_json::to_value(&outcome)?)
        }

        Command::Show { organizer_email, event_id } => {
            let remote = connection
                .client
                .get_broadcast_event(&mailbox(&organizer_email), &event_id)
                .await
                .with_context(|| format!("event {event_id} could not be fetched"))?;
            let availability = availability_message(remote.start, remote.end, config.meeting.tz()?);

            Ok(json!({ "meeting": remote, "availability": availability }))
        }

        Command::FindMeeting { vtc_id } => {
            let meeting = connection.client.find_online_meeting(&vtc_id).await?;
            Ok(json!({ "meeting": meeting }))
        }

        Command::Delete { meeting_id } => {
            connection
                .client
                .delete_online_meeting(&meeting_id)
                .await
                .with_context(|| format!("meeting {meeting_id} could not be deleted"))?;
            Ok(json!({ "deleted": meeting_id }))
        }
    }
}
