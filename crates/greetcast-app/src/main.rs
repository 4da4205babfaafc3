#![warn(missing_docs)]
//! # greetcast-app binary
//!
//! Desktop entry point: loads the campaign inputs, counts down so the
//! operator can bring the messenger on screen, then runs the campaign
//! against the real desktop backend.

use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::Duration;

use greetcast_app::{
    AppConfig, AppError, CampaignRunner, app_version, contacts_from_lines, init_run_logger,
    log_error, log_info,
};
use greetcast_automation::{ContactLocator, InputSynthesizer, MessageSender, WindowController};
use greetcast_core::{Contact, MessageTemplate, PhrasePool};
use greetcast_desktop::{RealDesktopBackend, SleepPacer};
use greetcast_resources::{load_lines, load_template};

/// CLI entry point.
fn main() {
    let config = AppConfig::from_env();
    if let Err(error) = run(&config) {
        log_error("run", "fatal", &error.to_string());
        eprintln!("greetcast failed: {error}");
        std::process::exit(1);
    }
}

fn run(config: &AppConfig) -> Result<(), AppError> {
    let log_path = init_run_logger()?;
    log_info(
        "bootstrap",
        "startup",
        &format!(
            "version={} window_title={:?} log_file={}",
            app_version(),
            config.window_title,
            log_path.display()
        ),
    );

    let contacts = load_contacts(&config.contacts_file)?;
    let template = MessageTemplate::new(load_template(&config.template_file)?);
    let phrases = PhrasePool::new(load_lines(&config.phrases_file)?);
    log_info(
        "bootstrap",
        "resources_loaded",
        &format!("contacts={} phrases={}", contacts.len(), phrases.len()),
    );

    countdown(config.preparation);

    let backend = RealDesktopBackend::new()?;
    let pacer = SleepPacer;
    let windows = WindowController::new(
        &backend,
        &pacer,
        config.window_title.clone(),
        config.delays.settle,
    );
    let input = InputSynthesizer::new(&backend, &pacer, &config.delays);
    let locator = ContactLocator::new(&windows, &input, &pacer, &config.delays);
    let sender = MessageSender::new(&windows, &input, &config.delays, &config.input_target);

    // One activation up front gates the whole loop: without the target
    // window there is nothing to drive.
    let activated = windows.activate().map_err(|error| {
        log_error("bootstrap", "activation_failed", &error.to_string());
        AppError::Activation(error)
    })?;
    log_info(
        "bootstrap",
        "window_activated",
        &format!("title={:?}", activated.title),
    );

    let runner = CampaignRunner::new(&locator, &sender, &pacer, config.next_contact);
    let summary = runner.run(&contacts, &template, &phrases, &mut rand::rng());

    log_info(
        "campaign",
        "finished",
        &format!("sent={} failed={}", summary.sent, summary.failed),
    );
    println!(
        "campaign finished: sent={} failed={}",
        summary.sent, summary.failed
    );
    Ok(())
}

fn load_contacts(path: &Path) -> Result<Vec<Contact>, AppError> {
    let lines = load_lines(path)?;
    let contacts = contacts_from_lines(lines)?;
    Ok(contacts)
}

/// Blocking preparation countdown on stdout, rewritten in place once per
/// second.
fn countdown(preparation: Duration) {
    let seconds = preparation.as_secs();
    if seconds == 0 {
        return;
    }

    log_info(
        "bootstrap",
        "countdown",
        &format!("starting in {seconds} s; switch to the messenger window"),
    );
    for remaining in (1..=seconds).rev() {
        print!("\rstarting in {remaining:>3} s");
        let _ = std::io::stdout().flush();
        thread::sleep(Duration::from_secs(1));
    }
    println!();
}
