//! # Register Subcommand
//!
//! Registration ledger operations: record intent to attend, list an
//! event's registrants, check one student's registration.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use jpcs_core::StudentId;
use jpcs_ledger::RegistrationLedger;
use jpcs_store::DocumentStore;

use crate::event_id;

/// Arguments for the `jpcs register` subcommand.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[command(subcommand)]
    pub command: RegisterCommand,
}

#[derive(Subcommand, Debug)]
pub enum RegisterCommand {
    /// Register a student for an event.
    Add {
        /// Event id.
        #[arg(long)]
        event: String,
        #[arg(long)]
        student_id: String,
        /// Student name to denormalize onto the registration.
        #[arg(long)]
        name: String,
    },

    /// List an event's registrants.
    List {
        /// Event id.
        #[arg(long)]
        event: String,
    },

    /// Check whether a student is registered for an event.
    Check {
        /// Event id.
        #[arg(long)]
        event: String,
        #[arg(long)]
        student_id: String,
    },
}

/// Execute the register subcommand.
pub async fn run_register(args: &RegisterArgs, store: Arc<dyn DocumentStore>) -> Result<u8> {
    let ledger = RegistrationLedger::new(store);

    match &args.command {
        RegisterCommand::Add {
            event,
            student_id,
            name,
        } => {
            let sid = StudentId::new(student_id.clone()).context("invalid student id")?;
            let id = ledger.register(&event_id(event), &sid, name).await?;
            println!("OK: registration {id}");
            Ok(0)
        }

        RegisterCommand::List { event } => {
            let registrants = ledger.list_registrants(&event_id(event)).await?;
            if registrants.is_empty() {
                println!("no registrants");
                return Ok(0);
            }
            for reg in registrants {
                println!("{}  {}  {}", reg.id, reg.student_id, reg.student_name);
            }
            Ok(0)
        }

        RegisterCommand::Check { event, student_id } => {
            let sid = StudentId::new(student_id.clone()).context("invalid student id")?;
            if ledger.is_registered(&event_id(event), &sid).await? {
                println!("registered");
                Ok(0)
            } else {
                println!("not registered");
                Ok(1)
            }
        }
    }
}
