//! # Announce Subcommand
//!
//! Announcement board operations: post, list, delete, and read receipts.

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use jpcs_core::Priority;
use jpcs_ledger::{AnnouncementBoard, NewAnnouncement};
use jpcs_store::DocumentStore;

use crate::announcement_id;

/// Arguments for the `jpcs announce` subcommand.
#[derive(Args, Debug)]
pub struct AnnounceArgs {
    #[command(subcommand)]
    pub command: AnnounceCommand,
}

#[derive(Subcommand, Debug)]
pub enum AnnounceCommand {
    /// Post an announcement.
    Post {
        #[arg(long)]
        title: String,
        #[arg(long)]
        message: String,
        #[arg(long, value_enum, default_value = "normal")]
        priority: PriorityArg,
        /// Recipient audience label.
        #[arg(long, default_value = "all")]
        recipients: String,
        #[arg(long, default_value = "admin")]
        author: String,
    },

    /// List announcements, newest first.
    List,

    /// Delete an announcement.
    Delete {
        /// Announcement id.
        id: String,
    },

    /// Record one view and print the updated count.
    View {
        /// Announcement id.
        id: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PriorityArg {
    Low,
    Normal,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Normal => Priority::Normal,
            PriorityArg::High => Priority::High,
        }
    }
}

/// Execute the announce subcommand.
pub async fn run_announce(args: &AnnounceArgs, store: Arc<dyn DocumentStore>) -> Result<u8> {
    let board = AnnouncementBoard::new(store);

    match &args.command {
        AnnounceCommand::Post {
            title,
            message,
            priority,
            recipients,
            author,
        } => {
            let id = board
                .post(NewAnnouncement {
                    title: title.clone(),
                    message: message.clone(),
                    priority: Priority::from(*priority),
                    recipients: recipients.clone(),
                    author: author.clone(),
                })
                .await?;
            println!("OK: posted announcement {id}");
            Ok(0)
        }

        AnnounceCommand::List => {
            let list = board.list().await?;
            if list.is_empty() {
                println!("no announcements");
                return Ok(0);
            }
            for item in list {
                println!(
                    "{}  [{:?}]  {}  ({} views)",
                    item.id, item.priority, item.title, item.views
                );
            }
            Ok(0)
        }

        AnnounceCommand::Delete { id } => {
            board.delete(&announcement_id(id)).await?;
            println!("OK: deleted announcement {id}");
            Ok(0)
        }

        AnnounceCommand::View { id } => {
            let views = board.record_view(&announcement_id(id)).await?;
            println!("OK: announcement {id} has {views} views");
            Ok(0)
        }
    }
}
