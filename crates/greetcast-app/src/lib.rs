#![warn(missing_docs)]
//! # greetcast-app
//!
//! ## Purpose
//! Orchestrates the greeting campaign: configuration, run logging, the
//! per-contact loop, and outcome accounting.
//!
//! ## Responsibilities
//! - Resolve runtime configuration from defaults and `GREETCAST_*` env vars.
//! - Install the per-run file/console logger.
//! - Iterate contacts strictly in order, locate then send, tally exactly one
//!   outcome per contact, and pace the inter-contact gap.
//!
//! ## Data flow
//! Resources load once in the binary; [`CampaignRunner::run`] consumes the
//! immutable model, drives `greetcast-automation` per contact, and returns
//! the final [`greetcast_core::CampaignSummary`].
//!
//! ## Ownership and lifetimes
//! The runner borrows the locator/sender for the duration of one run; all
//! campaign inputs are owned by the caller and survive the loop untouched.
//!
//! ## Error model
//! Per-contact failures never leave the loop: each is logged and converted
//! into one [`greetcast_core::ContactOutcome`]. Only resource loading,
//! backend construction, logger installation, and the initial activation
//! surface [`AppError`] and end the run.
//!
//! ## Security and privacy notes
//! Log lines carry recipient names and message sizes, never message bodies.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use rand::Rng;
use thiserror::Error;
use time::OffsetDateTime;

use greetcast_automation::{
    ActivateError, AutomationDelays, BottomCenterTarget, ContactLocator, MessageSender,
};
use greetcast_core::{CampaignSummary, Contact, ContactOutcome, CoreError, MessageTemplate, PhrasePool};
use greetcast_desktop::{DesktopError, Pacer};
use greetcast_resources::ResourceError;

/// Build-time application version loaded from the root `VERSION` file.
pub const APP_VERSION: &str = env!("GREETCAST_VERSION");

/// Returns the app version sourced from the root `VERSION` file.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Runtime configuration for one campaign.
///
/// Everything is explicit value state handed to constructors; nothing reads
/// the environment after [`AppConfig::from_env`] returns, so tests can run
/// differently configured campaigns side by side.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Contact list file: one recipient per non-blank line.
    pub contacts_file: PathBuf,
    /// Template file containing `{name}`/`{word}` tokens.
    pub template_file: PathBuf,
    /// Phrase pool file: one phrase per non-blank line.
    pub phrases_file: PathBuf,
    /// Title substring identifying the target messenger window.
    pub window_title: String,
    /// Countdown before automation starts, giving the operator time to get
    /// the messenger on screen.
    pub preparation: Duration,
    /// Pause between contacts, success or failure.
    pub next_contact: Duration,
    /// Per-step pause plan.
    pub delays: AutomationDelays,
    /// Message input-region heuristic.
    pub input_target: BottomCenterTarget,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            contacts_file: PathBuf::from("contacts.txt"),
            template_file: PathBuf::from("template.txt"),
            phrases_file: PathBuf::from("phrases.txt"),
            window_title: "微信".to_string(),
            preparation: Duration::from_secs(10),
            next_contact: Duration::from_millis(2_500),
            delays: AutomationDelays::default(),
            input_target: BottomCenterTarget::default(),
        }
    }
}

impl AppConfig {
    /// Builds the configuration from defaults plus `GREETCAST_*` overrides.
    ///
    /// Semantics per variable: unset or unparsable => default; otherwise the
    /// trimmed value wins.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            contacts_file: env_path("GREETCAST_CONTACTS_FILE", defaults.contacts_file),
            template_file: env_path("GREETCAST_TEMPLATE_FILE", defaults.template_file),
            phrases_file: env_path("GREETCAST_PHRASES_FILE", defaults.phrases_file),
            window_title: env_text("GREETCAST_WINDOW_TITLE", defaults.window_title),
            preparation: env_secs("GREETCAST_PREPARATION_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.preparation),
            next_contact: defaults.next_contact,
            delays: defaults.delays,
            input_target: defaults.input_target,
        }
    }
}

fn env_path(key: &str, default: PathBuf) -> PathBuf {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or(default)
}

fn env_text(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
}

fn env_secs(key: &str) -> Option<u64> {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
}

/// Validates loaded contact lines into the campaign's ordered recipient list.
///
/// Order is preserved exactly: send order equals file order, duplicates
/// included.
///
/// # Errors
/// Returns [`CoreError::BlankContactName`] if a line survived loading blank
/// (loading already strips those, so this guards direct callers).
pub fn contacts_from_lines(lines: Vec<String>) -> Result<Vec<Contact>, CoreError> {
    let mut contacts = Vec::with_capacity(lines.len());
    for line in lines {
        contacts.push(Contact::new(line)?);
    }
    Ok(contacts)
}

static RUN_LOGGER: OnceLock<RunLogger> = OnceLock::new();

struct RunLogger {
    file: Mutex<File>,
    path: PathBuf,
}

impl RunLogger {
    fn new() -> Result<Self, String> {
        let timestamp = timestamp_compact_utc();
        let path = PathBuf::from(format!("{timestamp}_greetcast.log"));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|error| format!("unable to create log file '{}': {error}", path.display()))?;

        Ok(Self {
            file: Mutex::new(file),
            path,
        })
    }

    fn write_line(&self, level: &str, stage: &str, action: &str, detail: &str) {
        let timestamp = timestamp_compact_utc();
        let line = format!("{timestamp} | {level} | {stage} | {action} | {detail}\n");

        eprint!("{line}");
        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(line.as_bytes());
            if level == "ERROR" {
                let _ = file.flush();
            }
        }
    }
}

/// Installs the per-run logger, once per process.
///
/// Log lines go to a timestamped file in the working directory and are
/// mirrored to stderr. Returns the log file path.
///
/// # Errors
/// Returns [`AppError::Logging`] when the log file cannot be created.
pub fn init_run_logger() -> Result<PathBuf, AppError> {
    if let Some(logger) = RUN_LOGGER.get() {
        return Ok(logger.path.clone());
    }

    let logger = RunLogger::new().map_err(AppError::Logging)?;
    let path = logger.path.clone();
    let _ = RUN_LOGGER.set(logger);
    log_info("logging", "file_created", &format!("log_file={}", path.display()));
    Ok(path)
}

/// Logs an INFO line; no-op before [`init_run_logger`].
pub fn log_info(stage: &str, action: &str, detail: &str) {
    if let Some(logger) = RUN_LOGGER.get() {
        logger.write_line("INFO", stage, action, detail);
    }
}

/// Logs a WARN line; no-op before [`init_run_logger`].
pub fn log_warn(stage: &str, action: &str, detail: &str) {
    if let Some(logger) = RUN_LOGGER.get() {
        logger.write_line("WARN", stage, action, detail);
    }
}

/// Logs an ERROR line; no-op before [`init_run_logger`].
pub fn log_error(stage: &str, action: &str, detail: &str) {
    if let Some(logger) = RUN_LOGGER.get() {
        logger.write_line("ERROR", stage, action, detail);
    }
}

fn timestamp_compact_utc() -> String {
    let now = OffsetDateTime::now_utc();
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        now.year(),
        now.month() as u8,
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

/// Iterates the contact list and tallies exactly one outcome per contact.
pub struct CampaignRunner<'a> {
    locator: &'a ContactLocator<'a>,
    sender: &'a MessageSender<'a>,
    pacer: &'a dyn Pacer,
    next_contact: Duration,
}

impl<'a> CampaignRunner<'a> {
    /// Creates a runner over the shared locator and sender.
    pub fn new(
        locator: &'a ContactLocator<'a>,
        sender: &'a MessageSender<'a>,
        pacer: &'a dyn Pacer,
        next_contact: Duration,
    ) -> Self {
        Self {
            locator,
            sender,
            pacer,
            next_contact,
        }
    }

    /// Runs the campaign over `contacts` in order.
    ///
    /// Per contact: locate, and only on success, send. A locate failure
    /// short-circuits; the send step is never attempted for that contact.
    /// Every contact is followed by the inter-contact pause regardless of
    /// outcome, and no contact is retried within a run. Failures never leave
    /// the loop; they are logged and tallied.
    pub fn run<R: Rng + ?Sized>(
        &self,
        contacts: &[Contact],
        template: &MessageTemplate,
        phrases: &PhrasePool,
        rng: &mut R,
    ) -> CampaignSummary {
        let mut summary = CampaignSummary::new();

        for contact in contacts {
            log_info(
                "campaign",
                "contact_begin",
                &format!("recipient={}", contact.as_str()),
            );

            let outcome = match self.locator.locate(contact) {
                Err(error) => {
                    log_error(
                        "campaign",
                        "locate_failed",
                        &format!("recipient={} cause={error}", contact.as_str()),
                    );
                    ContactOutcome::LocateFailed
                }
                Ok(()) => match self.sender.send(contact, template, phrases, rng) {
                    Err(error) => {
                        log_error(
                            "campaign",
                            "send_failed",
                            &format!("recipient={} cause={error}", contact.as_str()),
                        );
                        ContactOutcome::SendFailed
                    }
                    Ok(receipt) => {
                        if receipt.focus_click_failed {
                            log_warn(
                                "campaign",
                                "input_click_missed",
                                &format!(
                                    "recipient={}; paste relied on existing focus",
                                    contact.as_str()
                                ),
                            );
                        }
                        log_info(
                            "campaign",
                            "sent",
                            &format!(
                                "recipient={} characters={}",
                                contact.as_str(),
                                receipt.characters
                            ),
                        );
                        ContactOutcome::Sent
                    }
                },
            };

            summary.record(outcome);
            self.pacer.pause(self.next_contact);
        }

        summary
    }
}

/// Fatal application error type.
///
/// Everything here ends the run; per-contact failures are handled inside
/// [`CampaignRunner::run`] and never reach this type.
#[derive(Debug, Error)]
pub enum AppError {
    /// A campaign input file is missing or unreadable.
    #[error("resource loading failed: {0}")]
    Resource(#[from] ResourceError),
    /// The contact list contained an invalid entry.
    #[error("contact list invalid: {0}")]
    Contact(#[from] CoreError),
    /// No automation surface is available on this platform.
    #[error("desktop automation unavailable: {0}")]
    Desktop(#[from] DesktopError),
    /// The target window could not be activated before the loop started.
    #[error("initial window activation failed: {0}")]
    Activation(#[from] ActivateError),
    /// The run log file could not be created.
    #[error("run logger could not be installed: {0}")]
    Logging(String),
}
