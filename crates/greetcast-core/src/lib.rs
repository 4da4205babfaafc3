#![warn(missing_docs)]
//! # greetcast-core
//!
//! ## Purpose
//! Defines the pure campaign data model used across the `greetcast` workspace.
//!
//! ## Responsibilities
//! - Represent recipients, message templates, and the phrase pool.
//! - Compose the outgoing message for one recipient.
//! - Tally per-contact outcomes into a campaign summary.
//!
//! ## Data flow
//! Resource loading produces [`Contact`] values, one [`MessageTemplate`], and
//! one [`PhrasePool`]. Per contact, the sender derives an ephemeral
//! [`ComposedMessage`] and the runner records one [`ContactOutcome`] into the
//! [`CampaignSummary`].
//!
//! ## Ownership and lifetimes
//! All model values own their strings; nothing in this crate borrows from the
//! loaded resource buffers, so the automation layers can hold the model for
//! the whole run without lifetime coupling.
//!
//! ## Error model
//! Validation failures (blank contact name, empty phrase pool at selection
//! time) return [`CoreError`] variants. An empty pool is deliberately legal at
//! construction: the failure belongs to the send step that tries to draw from
//! it, and is counted against that contact alone.
//!
//! ## Security and privacy notes
//! Composed message text is never logged by this workspace; [`ComposedMessage`]
//! exposes a character count so call sites can report size instead of content.
//!
//! ## Example
//! ```rust
//! use greetcast_core::{Contact, MessageTemplate, PhrasePool};
//! use rand::SeedableRng;
//!
//! let contact = Contact::new("Alice").unwrap();
//! let template = MessageTemplate::new("Hi {name}, {word}!");
//! let pool = PhrasePool::new(vec!["stay well".to_string()]);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let phrase = pool.choose(&mut rng).unwrap();
//! let message = template.compose(contact.as_str(), phrase);
//! assert_eq!(message.as_str(), "Hi Alice, stay well!");
//! ```

use rand::Rng;
use thiserror::Error;

/// Placeholder token replaced by the recipient name.
pub const NAME_TOKEN: &str = "{name}";

/// Placeholder token replaced by the randomly chosen phrase.
pub const WORD_TOKEN: &str = "{word}";

/// One recipient as named in the target application's contact list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact(String);

impl Contact {
    /// Constructs a validated contact name.
    ///
    /// # Errors
    /// Returns [`CoreError::BlankContactName`] when the name is empty or
    /// whitespace-only.
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::BlankContactName);
        }
        Ok(Self(name))
    }

    /// Returns the contact name as typed into the application's search box.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Greeting template with `{name}` and `{word}` placeholder tokens.
///
/// The template is loaded once and reused verbatim for every contact. A
/// template without placeholders is legal; composition then returns the text
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate(String);

impl MessageTemplate {
    /// Wraps raw template text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the raw template text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitutes every `{name}` occurrence with `name`, then every `{word}`
    /// occurrence with `phrase`, in that order.
    pub fn compose(&self, name: &str, phrase: &str) -> ComposedMessage {
        let text = self.0.replace(NAME_TOKEN, name).replace(WORD_TOKEN, phrase);
        ComposedMessage(text)
    }
}

/// Ordered pool of candidate phrases, one drawn per send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhrasePool {
    phrases: Vec<String>,
}

impl PhrasePool {
    /// Wraps a phrase list. An empty list is accepted; selection from it
    /// fails per send.
    pub fn new(phrases: Vec<String>) -> Self {
        Self { phrases }
    }

    /// Returns the number of pooled phrases.
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Returns `true` when no phrases are pooled.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Picks one phrase uniformly at random.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyPhrasePool`] when no phrase is available.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&str, CoreError> {
        if self.phrases.is_empty() {
            return Err(CoreError::EmptyPhrasePool);
        }
        let index = rng.random_range(0..self.phrases.len());
        Ok(&self.phrases[index])
    }
}

/// Fully substituted greeting for one recipient.
///
/// Exists only for the duration of one send; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage(String);

impl ComposedMessage {
    /// Returns the message text for clipboard injection.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the message length in characters, the only size call sites
    /// are expected to log.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

/// Terminal result of processing one contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Locate and send both succeeded.
    Sent,
    /// The contact could not be brought into focus; the send was skipped.
    LocateFailed,
    /// The contact was located but the send failed.
    SendFailed,
}

/// Campaign tallies, updated exactly once per contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CampaignSummary {
    /// Contacts whose greeting was dispatched.
    pub sent: usize,
    /// Contacts skipped or failed, for any reason.
    pub failed: usize,
}

impl CampaignSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the terminal outcome for one contact.
    pub fn record(&mut self, outcome: ContactOutcome) {
        match outcome {
            ContactOutcome::Sent => self.sent += 1,
            ContactOutcome::LocateFailed | ContactOutcome::SendFailed => self.failed += 1,
        }
    }

    /// Returns the number of contacts tallied so far.
    pub fn total(&self) -> usize {
        self.sent + self.failed
    }
}

/// Error type for campaign model validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Contact names must contain at least one non-whitespace character.
    #[error("contact name is blank")]
    BlankContactName,
    /// The phrase pool has no entries to draw from.
    #[error("phrase pool is empty; no phrase can be selected")]
    EmptyPhrasePool,
}
