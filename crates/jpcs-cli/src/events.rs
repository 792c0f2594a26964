//! # Event Subcommand
//!
//! Event catalog management: create, list, show, edit, advance status,
//! delete. Status edits go through the catalog's forward-only
//! transition check, so `jpcs event status` can fail where detail
//! edits cannot.

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use jpcs_core::EventStatus;
use jpcs_ledger::{EventCatalog, EventEdit, NewEvent};
use jpcs_store::DocumentStore;

use crate::event_id;

/// Arguments for the `jpcs event` subcommand.
#[derive(Args, Debug)]
pub struct EventsArgs {
    #[command(subcommand)]
    pub command: EventsCommand,
}

#[derive(Subcommand, Debug)]
pub enum EventsCommand {
    /// Create a new event in the upcoming state.
    Create {
        /// Event name.
        #[arg(long)]
        name: String,
        /// Calendar date as YYYY-MM-DD.
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        start_time: String,
        #[arg(long)]
        end_time: Option<String>,
        #[arg(long, default_value = "")]
        location: String,
        /// Day label for multi-day events. Repeat for each day.
        #[arg(long = "day")]
        days: Vec<String>,
    },

    /// List all events with registrant counts.
    List,

    /// Show one event.
    Show {
        /// Event id.
        id: String,
    },

    /// Edit event details (not status).
    Edit {
        /// Event id.
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        start_time: Option<String>,
        #[arg(long)]
        end_time: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },

    /// Advance an event's status (upcoming → ongoing → completed).
    Status {
        /// Event id.
        id: String,
        /// Target status.
        #[arg(value_enum)]
        status: StatusArg,
    },

    /// Delete an event. Registrations and attendance are left in place.
    Delete {
        /// Event id.
        id: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Upcoming,
    Ongoing,
    Completed,
}

impl From<StatusArg> for EventStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Upcoming => EventStatus::Upcoming,
            StatusArg::Ongoing => EventStatus::Ongoing,
            StatusArg::Completed => EventStatus::Completed,
        }
    }
}

/// Execute the event subcommand.
pub async fn run_events(args: &EventsArgs, store: Arc<dyn DocumentStore>) -> Result<u8> {
    let catalog = EventCatalog::new(store);

    match &args.command {
        EventsCommand::Create {
            name,
            date,
            description,
            start_time,
            end_time,
            location,
            days,
        } => {
            let id = catalog
                .create(NewEvent {
                    name: name.clone(),
                    description: description.clone(),
                    date: date.clone(),
                    start_time: start_time.clone(),
                    end_time: end_time.clone(),
                    location: location.clone(),
                    days: if days.is_empty() {
                        None
                    } else {
                        Some(days.clone())
                    },
                })
                .await?;
            println!("OK: created event {id}");
            Ok(0)
        }

        EventsCommand::List => {
            let rows = catalog.list_with_registrant_counts().await?;
            if rows.is_empty() {
                println!("no events");
                return Ok(0);
            }
            for (event, registrants) in rows {
                println!(
                    "{}  {}  {}  {}  {} registered",
                    event.id, event.date, event.status, event.name, registrants
                );
            }
            Ok(0)
        }

        EventsCommand::Show { id } => {
            let event = catalog.get(&event_id(id)).await?;
            println!("{}", serde_json::to_string_pretty(&event)?);
            Ok(0)
        }

        EventsCommand::Edit {
            id,
            name,
            description,
            date,
            start_time,
            end_time,
            location,
        } => {
            catalog
                .update_details(
                    &event_id(id),
                    EventEdit {
                        name: name.clone(),
                        description: description.clone(),
                        date: date.clone(),
                        start_time: start_time.clone(),
                        end_time: end_time.clone(),
                        location: location.clone(),
                        days: None,
                    },
                )
                .await?;
            println!("OK: updated event {id}");
            Ok(0)
        }

        EventsCommand::Status { id, status } => {
            let next = EventStatus::from(*status);
            catalog.set_status(&event_id(id), next).await?;
            println!("OK: event {id} is now {next}");
            Ok(0)
        }

        EventsCommand::Delete { id } => {
            catalog.delete(&event_id(id)).await?;
            println!("OK: deleted event {id}");
            Ok(0)
        }
    }
}
