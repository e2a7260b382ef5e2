//! `rc contact`: validate a contact-form submission and print the
//! notification that would be sent.

use crate::output::{CliError, OutputMode, render, render_error};
use clap::Args;
use raphael_core::contact::ContactSubmission;
use serde::Serialize;
use std::io::Write;
use tracing::info;

#[derive(Args, Debug)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub message: String,

    #[arg(long)]
    pub subject: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Notification {
    pub ok: bool,
    pub subject: String,
    pub body: String,
}

/// Execute `rc contact`.
///
/// # Errors
///
/// Returns an error if the submission is invalid or output fails.
pub fn run_contact(args: &ContactArgs, output: OutputMode) -> anyhow::Result<()> {
    let submission = ContactSubmission {
        name: args.name.clone(),
        email: args.email.clone(),
        subject: args.subject.clone(),
        message: args.message.clone(),
    };

    let valid = match submission.validate() {
        Ok(valid) => valid,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            anyhow::bail!("{err}");
        }
    };
    info!(
        has_subject = valid.subject.is_some(),
        "contact submission accepted"
    );

    let notification = Notification {
        ok: true,
        subject: valid.notification_subject(),
        body: valid.notification_body(),
    };
    render(output, &notification, |notification, w| {
        writeln!(w, "Subject: {}", notification.subject)?;
        writeln!(w)?;
        write!(w, "{}", notification.body)
    })
}
