//! Integration tests for locate/send call ordering against the scripted
//! backend. Ordering is the contract here: with fixed-delay synchronization
//! there is no feedback channel, so the exact step sequence is all the
//! target application ever observes.

use std::time::Duration;

use greetcast_automation::{
    AutomationDelays, BottomCenterTarget, ContactLocator, InputSynthesizer, LocateError,
    MessageSender, SendError, WindowController,
};
use greetcast_core::{Contact, MessageTemplate, PhrasePool};
use greetcast_desktop::{
    DesktopCall, DesktopOp, InstantPacer, Key, ScriptedDesktopBackend, WindowId, WindowInfo,
    WindowRect,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn messenger_window() -> WindowInfo {
    WindowInfo {
        id: WindowId(4),
        title: "Messenger".to_string(),
        minimized: false,
        rect: WindowRect {
            left: 200,
            top: 50,
            right: 1000,
            bottom: 750,
        },
    }
}

#[test]
fn interaction_sequence_tests_locate_follows_search_protocol() {
    let backend = ScriptedDesktopBackend::with_windows(vec![messenger_window()]);
    let pacer = InstantPacer::new();
    let delays = AutomationDelays::default();
    let windows = WindowController::new(&backend, &pacer, "Messenger", delays.settle);
    let input = InputSynthesizer::new(&backend, &pacer, &delays);
    let locator = ContactLocator::new(&windows, &input, &pacer, &delays);

    let contact = Contact::new("Alice").expect("valid contact");
    locator.locate(&contact).expect("locate");

    assert_eq!(
        backend.calls(),
        vec![
            DesktopCall::FindWindows {
                needle: "Messenger".to_string()
            },
            DesktopCall::FocusWindow { id: WindowId(4) },
            DesktopCall::Hotkey {
                keys: vec![Key::Control, Key::F]
            },
            DesktopCall::ClipboardWrite {
                text: "Alice".to_string()
            },
            DesktopCall::Hotkey {
                keys: vec![Key::Control, Key::V]
            },
            DesktopCall::PressKey { key: Key::Enter },
            DesktopCall::FindWindows {
                needle: "Messenger".to_string()
            },
            DesktopCall::FocusWindow { id: WindowId(4) },
        ]
    );
}

#[test]
fn interaction_sequence_tests_locate_requests_the_configured_pauses() {
    let backend = ScriptedDesktopBackend::with_windows(vec![messenger_window()]);
    let pacer = InstantPacer::new();
    let delays = AutomationDelays::default();
    let windows = WindowController::new(&backend, &pacer, "Messenger", delays.settle);
    let input = InputSynthesizer::new(&backend, &pacer, &delays);
    let locator = ContactLocator::new(&windows, &input, &pacer, &delays);

    let contact = Contact::new("Alice").expect("valid contact");
    locator.locate(&contact).expect("locate");

    assert_eq!(
        pacer.requested(),
        vec![
            Duration::from_millis(1_000), // settle after first activation
            Duration::from_millis(500),   // refocus
            Duration::from_millis(1_500), // search box opens
            Duration::from_millis(300),   // clipboard
            Duration::from_millis(1_500), // pasted query settles
            Duration::from_millis(2_500), // contact select
            Duration::from_millis(1_000), // settle after re-activation
            Duration::from_millis(500),   // refocus
        ]
    );
}

#[test]
fn interaction_sequence_tests_send_pastes_then_submits() {
    let backend = ScriptedDesktopBackend::with_windows(vec![messenger_window()]);
    let pacer = InstantPacer::new();
    let delays = AutomationDelays::default();
    let windows = WindowController::new(&backend, &pacer, "Messenger", delays.settle);
    let input = InputSynthesizer::new(&backend, &pacer, &delays);
    let target = BottomCenterTarget::default();
    let sender = MessageSender::new(&windows, &input, &delays, &target);

    let contact = Contact::new("Alice").expect("valid contact");
    let template = MessageTemplate::new("Hi {name}, {word}!");
    let pool = PhrasePool::new(vec!["stay well".to_string()]);
    let mut rng = StdRng::seed_from_u64(5);

    let receipt = sender
        .send(&contact, &template, &pool, &mut rng)
        .expect("send");
    assert!(!receipt.focus_click_failed);
    assert_eq!(receipt.characters, "Hi Alice, stay well!".chars().count());

    assert_eq!(
        backend.calls(),
        vec![
            DesktopCall::ClipboardWrite {
                text: "Hi Alice, stay well!".to_string()
            },
            DesktopCall::FindWindows {
                needle: "Messenger".to_string()
            },
            // Center of [200, 1000], 100 px above bottom edge 750.
            DesktopCall::Click { x: 600, y: 650 },
            DesktopCall::Hotkey {
                keys: vec![Key::Control, Key::V]
            },
            DesktopCall::PressKey { key: Key::Enter },
        ]
    );
}

#[test]
fn interaction_sequence_tests_send_survives_focus_click_failure() {
    let backend = ScriptedDesktopBackend::with_windows(vec![messenger_window()]);
    backend.fail_on(DesktopOp::ClickAt);
    let pacer = InstantPacer::new();
    let delays = AutomationDelays::default();
    let windows = WindowController::new(&backend, &pacer, "Messenger", delays.settle);
    let input = InputSynthesizer::new(&backend, &pacer, &delays);
    let target = BottomCenterTarget::default();
    let sender = MessageSender::new(&windows, &input, &delays, &target);

    let contact = Contact::new("Alice").expect("valid contact");
    let template = MessageTemplate::new("Hi {name}, {word}!");
    let pool = PhrasePool::new(vec!["stay well".to_string()]);
    let mut rng = StdRng::seed_from_u64(5);

    let receipt = sender
        .send(&contact, &template, &pool, &mut rng)
        .expect("send proceeds despite click failure");
    assert!(receipt.focus_click_failed);

    // The paste and submit still went out after the failed click.
    let calls = backend.calls();
    assert_eq!(
        &calls[calls.len() - 2..],
        &[
            DesktopCall::Hotkey {
                keys: vec![Key::Control, Key::V]
            },
            DesktopCall::PressKey { key: Key::Enter },
        ]
    );
}

#[test]
fn interaction_sequence_tests_send_survives_vanished_window() {
    // The focus click resolves the window fresh; a window that closed after
    // locate only degrades the click, not the send.
    let backend = ScriptedDesktopBackend::new();
    let pacer = InstantPacer::new();
    let delays = AutomationDelays::default();
    let windows = WindowController::new(&backend, &pacer, "Messenger", delays.settle);
    let input = InputSynthesizer::new(&backend, &pacer, &delays);
    let target = BottomCenterTarget::default();
    let sender = MessageSender::new(&windows, &input, &delays, &target);

    let contact = Contact::new("Alice").expect("valid contact");
    let template = MessageTemplate::new("Hi {name}, {word}!");
    let pool = PhrasePool::new(vec!["stay well".to_string()]);
    let mut rng = StdRng::seed_from_u64(5);

    let receipt = sender
        .send(&contact, &template, &pool, &mut rng)
        .expect("send proceeds");
    assert!(receipt.focus_click_failed);
}

#[test]
fn interaction_sequence_tests_empty_pool_fails_before_any_input() {
    let backend = ScriptedDesktopBackend::with_windows(vec![messenger_window()]);
    let pacer = InstantPacer::new();
    let delays = AutomationDelays::default();
    let windows = WindowController::new(&backend, &pacer, "Messenger", delays.settle);
    let input = InputSynthesizer::new(&backend, &pacer, &delays);
    let target = BottomCenterTarget::default();
    let sender = MessageSender::new(&windows, &input, &delays, &target);

    let contact = Contact::new("Alice").expect("valid contact");
    let template = MessageTemplate::new("Hi {name}, {word}!");
    let pool = PhrasePool::new(Vec::new());
    let mut rng = StdRng::seed_from_u64(5);

    let error = sender
        .send(&contact, &template, &pool, &mut rng)
        .expect_err("empty pool must fail");
    assert!(matches!(error, SendError::Phrase(_)));
    assert!(backend.calls().is_empty());
}

#[test]
fn interaction_sequence_tests_locate_fails_when_search_hotkey_fails() {
    let backend = ScriptedDesktopBackend::with_windows(vec![messenger_window()]);
    backend.fail_on(DesktopOp::SendHotkey);
    let pacer = InstantPacer::new();
    let delays = AutomationDelays::default();
    let windows = WindowController::new(&backend, &pacer, "Messenger", delays.settle);
    let input = InputSynthesizer::new(&backend, &pacer, &delays);
    let locator = ContactLocator::new(&windows, &input, &pacer, &delays);

    let contact = Contact::new("Alice").expect("valid contact");
    let error = locator
        .locate(&contact)
        .expect_err("hotkey failure should fail locate");
    assert!(matches!(error, LocateError::Desktop(_)));
}
