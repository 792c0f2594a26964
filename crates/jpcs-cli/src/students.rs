//! # Student Subcommand
//!
//! Student directory management. `bootstrap` stands in for the first
//! sign-in of a real identity provider; the remaining commands mirror
//! the profile form and the admin roster screen.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use jpcs_core::{DocId, Identity, ProviderUid, StudentId};
use jpcs_ledger::{ProfileUpdate, StudentDirectory, StudentEdit};
use jpcs_store::DocumentStore;

/// Arguments for the `jpcs student` subcommand.
#[derive(Args, Debug)]
pub struct StudentsArgs {
    #[command(subcommand)]
    pub command: StudentsCommand,
}

#[derive(Subcommand, Debug)]
pub enum StudentsCommand {
    /// Create the user document a first sign-in would create.
    Bootstrap {
        /// Identity provider uid.
        #[arg(long)]
        uid: String,
        /// Display name from the provider profile.
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        photo_url: String,
    },

    /// Complete a bootstrapped profile with student details.
    CompleteProfile {
        /// Identity provider uid of the signed-in student.
        #[arg(long)]
        uid: String,
        #[arg(long)]
        student_id: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        program: String,
    },

    /// Apply an admin edit to a student. Id and name changes propagate
    /// into existing attendance records.
    Edit {
        /// User document id.
        id: String,
        #[arg(long)]
        student_id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        program: Option<String>,
    },

    /// List all students.
    List,

    /// Show one student by student id.
    Show {
        /// Human-facing student id.
        student_id: String,
    },
}

/// Execute the student subcommand.
pub async fn run_students(args: &StudentsArgs, store: Arc<dyn DocumentStore>) -> Result<u8> {
    let directory = StudentDirectory::new(store);

    match &args.command {
        StudentsCommand::Bootstrap {
            uid,
            name,
            email,
            photo_url,
        } => {
            let identity = Identity {
                uid: ProviderUid::new(uid.clone()).context("invalid uid")?,
                display_name: name.clone(),
                email: email.clone(),
                photo_url: photo_url.clone(),
            };
            directory.bootstrap_identity(&identity).await?;
            println!("OK: bootstrapped user for uid {uid}");
            Ok(0)
        }

        StudentsCommand::CompleteProfile {
            uid,
            student_id,
            full_name,
            department,
            program,
        } => {
            let uid = ProviderUid::new(uid.clone()).context("invalid uid")?;
            directory
                .complete_profile(
                    &uid,
                    ProfileUpdate {
                        student_id: StudentId::new(student_id.clone())
                            .context("invalid student id")?,
                        full_name: full_name.clone(),
                        department: department.clone(),
                        program: program.clone(),
                    },
                )
                .await?;
            println!("OK: profile completed for {student_id}");
            Ok(0)
        }

        StudentsCommand::Edit {
            id,
            student_id,
            name,
            department,
            program,
        } => {
            let edit = StudentEdit {
                student_id: student_id
                    .clone()
                    .map(StudentId::new)
                    .transpose()
                    .context("invalid student id")?,
                display_name: name.clone(),
                department: department.clone(),
                program: program.clone(),
            };
            directory.edit_student(&DocId::from_raw(id), edit).await?;
            println!("OK: updated student {id}");
            Ok(0)
        }

        StudentsCommand::List => {
            let users = directory.list().await?;
            if users.is_empty() {
                println!("no students");
                return Ok(0);
            }
            for user in users {
                println!(
                    "{}  {}  {}  attended {}",
                    user.id,
                    if user.student_id.is_empty() {
                        "(no student id)"
                    } else {
                        &user.student_id
                    },
                    user.best_display_name(),
                    user.events_attended
                );
            }
            Ok(0)
        }

        StudentsCommand::Show { student_id } => {
            let sid = StudentId::new(student_id.clone()).context("invalid student id")?;
            match directory.find_by_student_id(&sid).await? {
                Some(user) => {
                    println!("{}", serde_json::to_string_pretty(&user)?);
                    Ok(0)
                }
                None => {
                    println!("no student with id {student_id}");
                    Ok(1)
                }
            }
        }
    }
}
