#![warn(missing_docs)]
//! # greetcast-automation
//!
//! ## Purpose
//! Implements the interaction steps of one campaign turn: window activation,
//! paced input synthesis, contact lookup via the application's search box,
//! and message delivery through the clipboard.
//!
//! ## Responsibilities
//! - Re-resolve and activate the target window before focus-dependent steps.
//! - Pair every synthetic input with its fixed configured pause.
//! - Drive the search-select sequence that brings a contact into focus.
//! - Compose, paste, and submit one greeting per contact.
//!
//! ## Data flow
//! The campaign runner calls [`ContactLocator::locate`] and, on success,
//! [`MessageSender::send`]. Both run against a shared [`DesktopBackend`] and
//! [`Pacer`], so tests exercise the full sequence without a real desktop or
//! real time.
//!
//! ## Ownership and lifetimes
//! Components borrow the backend, pacer, and delay plan for the duration of
//! the run; they hold no window handles between steps. Window snapshots are
//! taken fresh for every activation and every geometry lookup, because the
//! target window can close, reopen, or move between steps.
//!
//! ## Error model
//! Each component converts surface failures into its own error
//! ([`ActivateError`], [`LocateError`], [`SendError`]); callers decide what is
//! fatal. Nothing in this crate panics on automation failure.
//!
//! ## Timing model
//! There is no event feedback from the target application. The fixed pauses
//! in [`AutomationDelays`] are the only synchronization mechanism; a pause
//! shorter than the application's real latency silently lands input in the
//! wrong place, with no way to detect it here.

use std::time::Duration;

use rand::Rng;
use thiserror::Error;

use greetcast_core::{Contact, CoreError, MessageTemplate, PhrasePool};
use greetcast_desktop::{DesktopBackend, DesktopError, Key, Pacer, WindowInfo, WindowRect};

/// Fixed pauses inserted after each automation step, in send order.
///
/// Defaults reproduce the cadence the campaign was tuned for against the
/// target messenger; every value is an approximation of an unobservable UI
/// transition, not a guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutomationDelays {
    /// After requesting foreground focus.
    pub settle: Duration,
    /// Extra pause after an activation inside locate sequences.
    pub refocus: Duration,
    /// After opening the search box and after pasting into it.
    pub search: Duration,
    /// After replacing the clipboard contents.
    pub clipboard: Duration,
    /// After confirming a search result.
    pub contact_select: Duration,
    /// After clicking the message input region.
    pub click_settle: Duration,
    /// After pasting the composed message.
    pub input: Duration,
    /// After submitting the message.
    pub send: Duration,
}

impl Default for AutomationDelays {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(1_000),
            refocus: Duration::from_millis(500),
            search: Duration::from_millis(1_500),
            clipboard: Duration::from_millis(300),
            contact_select: Duration::from_millis(2_500),
            click_settle: Duration::from_millis(300),
            input: Duration::from_millis(800),
            send: Duration::from_millis(1_200),
        }
    }
}

/// Brings the target application's window to the foreground.
///
/// Windows are re-resolved on every call; handles are never cached across
/// steps. When several windows match the title substring the first one in
/// platform enumeration order wins; the tie-break across multiple matches
/// is deliberately unspecified.
pub struct WindowController<'a> {
    backend: &'a dyn DesktopBackend,
    pacer: &'a dyn Pacer,
    title_needle: String,
    settle: Duration,
}

impl<'a> WindowController<'a> {
    /// Creates a controller for windows whose title contains `title_needle`.
    pub fn new(
        backend: &'a dyn DesktopBackend,
        pacer: &'a dyn Pacer,
        title_needle: impl Into<String>,
        settle: Duration,
    ) -> Self {
        Self {
            backend,
            pacer,
            title_needle: title_needle.into(),
            settle,
        }
    }

    /// Restores (if minimized) and focuses the first matching window, then
    /// always waits the settle pause: no focus-completion event exists, so
    /// the pause stands in for one.
    ///
    /// # Errors
    /// Returns [`ActivateError::WindowNotFound`] when nothing matches, or the
    /// underlying [`DesktopError`] when restore/focus synthesis fails.
    pub fn activate(&self) -> Result<WindowInfo, ActivateError> {
        let window = self.first_match()?;
        if window.minimized {
            self.backend.restore_window(window.id)?;
        }
        self.backend.focus_window(window.id)?;
        self.pacer.pause(self.settle);
        Ok(window)
    }

    /// Re-resolves the first matching window for geometry queries without
    /// changing focus or waiting.
    ///
    /// # Errors
    /// Same taxonomy as [`WindowController::activate`].
    pub fn resolve(&self) -> Result<WindowInfo, ActivateError> {
        self.first_match()
    }

    /// Returns the configured title substring.
    pub fn title_needle(&self) -> &str {
        &self.title_needle
    }

    fn first_match(&self) -> Result<WindowInfo, ActivateError> {
        let mut matches = self.backend.find_windows(&self.title_needle)?;
        if matches.is_empty() {
            return Err(ActivateError::WindowNotFound {
                needle: self.title_needle.clone(),
            });
        }
        Ok(matches.swap_remove(0))
    }
}

/// Window activation error type.
#[derive(Debug, Error)]
pub enum ActivateError {
    /// No visible window title contained the configured substring.
    #[error("no window with title containing {needle:?} was found")]
    WindowNotFound {
        /// Substring that was searched for.
        needle: String,
    },
    /// Surface failure while restoring or focusing.
    #[error(transparent)]
    Desktop(#[from] DesktopError),
}

/// Paced wrapper over the raw input primitives.
///
/// Every synthesized input is followed by a fixed pause drawn from
/// [`AutomationDelays`]; callers pick the pause that models the UI
/// transition the input triggers.
pub struct InputSynthesizer<'a> {
    backend: &'a dyn DesktopBackend,
    pacer: &'a dyn Pacer,
    delays: &'a AutomationDelays,
}

impl<'a> InputSynthesizer<'a> {
    /// Creates a synthesizer over `backend` paced by `pacer`.
    pub fn new(
        backend: &'a dyn DesktopBackend,
        pacer: &'a dyn Pacer,
        delays: &'a AutomationDelays,
    ) -> Self {
        Self {
            backend,
            pacer,
            delays,
        }
    }

    /// Sends a key combination, then waits `settle`.
    pub fn hotkey(&self, keys: &[Key], settle: Duration) -> Result<(), DesktopError> {
        self.backend.send_hotkey(keys)?;
        self.pacer.pause(settle);
        Ok(())
    }

    /// Taps a single key, then waits `settle`.
    pub fn press(&self, key: Key, settle: Duration) -> Result<(), DesktopError> {
        self.backend.press_key(key)?;
        self.pacer.pause(settle);
        Ok(())
    }

    /// Moves the pointer to `(x, y)` and clicks, then waits the click settle
    /// pause.
    pub fn click(&self, x: i32, y: i32) -> Result<(), DesktopError> {
        self.backend.click_at(x, y)?;
        self.pacer.pause(self.delays.click_settle);
        Ok(())
    }

    /// Replaces the clipboard contents, then waits the clipboard pause.
    pub fn copy_to_clipboard(&self, text: &str) -> Result<(), DesktopError> {
        self.backend.write_clipboard(text)?;
        self.pacer.pause(self.delays.clipboard);
        Ok(())
    }
}

/// Drives the application's search feature to focus a contact's
/// conversation.
pub struct ContactLocator<'a> {
    windows: &'a WindowController<'a>,
    input: &'a InputSynthesizer<'a>,
    pacer: &'a dyn Pacer,
    delays: &'a AutomationDelays,
}

impl<'a> ContactLocator<'a> {
    /// Creates a locator over the shared controller and synthesizer.
    pub fn new(
        windows: &'a WindowController<'a>,
        input: &'a InputSynthesizer<'a>,
        pacer: &'a dyn Pacer,
        delays: &'a AutomationDelays,
    ) -> Self {
        Self {
            windows,
            input,
            pacer,
            delays,
        }
    }

    /// Brings `contact`'s conversation into focus via search.
    ///
    /// Sequence: activate window, open search (Ctrl+F), paste the contact
    /// name from the clipboard, confirm with Enter, then re-activate the
    /// window, since the confirmed search result can shift focus to a child
    /// window.
    ///
    /// # Errors
    /// Any activation or synthesis failure. Callers treat this as a
    /// per-contact failure, not a fatal one.
    pub fn locate(&self, contact: &Contact) -> Result<(), LocateError> {
        self.windows.activate()?;
        self.pacer.pause(self.delays.refocus);

        self.input.hotkey(&[Key::Control, Key::F], self.delays.search)?;
        self.input.copy_to_clipboard(contact.as_str())?;
        self.input.hotkey(&[Key::Control, Key::V], self.delays.search)?;
        self.input.press(Key::Enter, self.delays.contact_select)?;

        self.windows.activate()?;
        self.pacer.pause(self.delays.refocus);
        Ok(())
    }
}

/// Contact lookup error type.
#[derive(Debug, Error)]
pub enum LocateError {
    /// Window activation failed before or after the search sequence.
    #[error("window activation failed: {0}")]
    Activate(#[from] ActivateError),
    /// Input synthesis failed mid-sequence.
    #[error(transparent)]
    Desktop(#[from] DesktopError),
}

/// Strategy for picking the point to click so the message input region gains
/// keyboard focus.
///
/// No UI-element query is available against the target application, so the
/// default is a geometric heuristic; alternative strategies (image matching,
/// accessibility APIs) can be swapped in without touching the sender.
pub trait InputTarget: Send + Sync {
    /// Returns the screen point to click for the given window geometry.
    fn input_point(&self, rect: &WindowRect) -> (i32, i32);
}

/// Default heuristic: horizontal window center, fixed offset up from the
/// bottom edge.
///
/// Brittle by construction: a resized or re-laid-out window moves the real
/// input box while this point stays put.
#[derive(Debug, Clone, Copy)]
pub struct BottomCenterTarget {
    /// Distance in pixels above the window's bottom edge.
    pub bottom_offset: i32,
}

impl Default for BottomCenterTarget {
    fn default() -> Self {
        Self { bottom_offset: 100 }
    }
}

impl InputTarget for BottomCenterTarget {
    fn input_point(&self, rect: &WindowRect) -> (i32, i32) {
        (rect.center_x(), rect.bottom - self.bottom_offset)
    }
}

/// Outcome details of one successful send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendReceipt {
    /// Character count of the composed message (content is never logged).
    pub characters: usize,
    /// `true` when the input-region focus click failed and the paste relied
    /// on whatever already had focus.
    pub focus_click_failed: bool,
}

/// Composes and delivers one greeting into the focused conversation.
pub struct MessageSender<'a> {
    windows: &'a WindowController<'a>,
    input: &'a InputSynthesizer<'a>,
    delays: &'a AutomationDelays,
    target: &'a dyn InputTarget,
}

impl<'a> MessageSender<'a> {
    /// Creates a sender sharing the controller and synthesizer.
    pub fn new(
        windows: &'a WindowController<'a>,
        input: &'a InputSynthesizer<'a>,
        delays: &'a AutomationDelays,
        target: &'a dyn InputTarget,
    ) -> Self {
        Self {
            windows,
            input,
            delays,
            target,
        }
    }

    /// Sends one composed greeting to the currently focused conversation.
    ///
    /// The input-region click is best effort: the paste can still land
    /// correctly when the conversation already holds focus, so a click
    /// failure is reported on the receipt instead of aborting the send.
    ///
    /// # Errors
    /// Returns [`SendError::Phrase`] when the pool is empty, or
    /// [`SendError::Desktop`] when clipboard/paste/submit synthesis fails.
    /// Callers treat either as a per-contact failure.
    pub fn send<R: Rng + ?Sized>(
        &self,
        contact: &Contact,
        template: &MessageTemplate,
        phrases: &PhrasePool,
        rng: &mut R,
    ) -> Result<SendReceipt, SendError> {
        let phrase = phrases.choose(rng)?;
        let message = template.compose(contact.as_str(), phrase);

        self.input.copy_to_clipboard(message.as_str())?;
        let focus_click_failed = self.focus_input_region().is_err();

        self.input.hotkey(&[Key::Control, Key::V], self.delays.input)?;
        self.input.press(Key::Enter, self.delays.send)?;

        Ok(SendReceipt {
            characters: message.char_count(),
            focus_click_failed,
        })
    }

    fn focus_input_region(&self) -> Result<(), ActivateError> {
        let window = self.windows.resolve()?;
        let (x, y) = self.target.input_point(&window.rect);
        self.input.click(x, y)?;
        Ok(())
    }
}

/// Message delivery error type.
#[derive(Debug, Error)]
pub enum SendError {
    /// Phrase selection failed (empty pool).
    #[error("phrase selection failed: {0}")]
    Phrase(#[from] CoreError),
    /// Input synthesis failed mid-delivery.
    #[error(transparent)]
    Desktop(#[from] DesktopError),
}

#[cfg(test)]
mod tests {
    //! Unit tests for the input-region heuristic.

    use super::*;

    #[test]
    fn bottom_center_target_tracks_window_geometry() {
        let target = BottomCenterTarget::default();
        let rect = WindowRect {
            left: 200,
            top: 50,
            right: 1000,
            bottom: 750,
        };
        assert_eq!(target.input_point(&rect), (600, 650));
    }
}
