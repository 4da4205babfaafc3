//! Shared fixtures for app integration tests.

use greetcast_desktop::{WindowId, WindowInfo, WindowRect};

/// Creates the standard simulated messenger window.
#[allow(dead_code)]
pub fn messenger_window() -> WindowInfo {
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
