//! # Badge Subcommand
//!
//! Defines and lists custom badges. Awarding is a pure computation over
//! attendance counts (`jpcs stats badges`); this subcommand only manages
//! the badge definitions themselves.

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use jpcs_core::BadgeRecord;
use jpcs_store::{to_fields, Collection, DocumentStore};

/// Arguments for the `jpcs badge` subcommand.
#[derive(Args, Debug)]
pub struct BadgesArgs {
    #[command(subcommand)]
    pub command: BadgesCommand,
}

#[derive(Subcommand, Debug)]
pub enum BadgesCommand {
    /// Define a new badge.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Icon label the dashboards render.
        #[arg(long, default_value = "")]
        icon: String,
        /// Attendance count at which the badge is earned.
        #[arg(long)]
        threshold: u32,
    },

    /// List badge definitions, lowest threshold first.
    List,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewBadge<'a> {
    name: &'a str,
    description: &'a str,
    icon: &'a str,
    threshold: u32,
}

/// Execute the badge subcommand.
pub async fn run_badges(args: &BadgesArgs, store: Arc<dyn DocumentStore>) -> Result<u8> {
    match &args.command {
        BadgesCommand::Add {
            name,
            description,
            icon,
            threshold,
        } => {
            let payload = NewBadge {
                name,
                description,
                icon,
                threshold: *threshold,
            };
            let id = store
                .insert(Collection::CustomBadges, to_fields(&payload)?)
                .await?;
            println!("OK: created badge {id}");
            Ok(0)
        }

        BadgesCommand::List => {
            let mut badges: Vec<BadgeRecord> = store
                .get_all(Collection::CustomBadges)
                .await?
                .decode_all(Collection::CustomBadges)?;
            badges.sort_by_key(|b| b.threshold);
            if badges.is_empty() {
                println!("no badges");
                return Ok(0);
            }
            for badge in badges {
                println!("{}  {}  (threshold {})", badge.id, badge.name, badge.threshold);
            }
            Ok(0)
        }
    }
}
