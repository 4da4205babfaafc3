#![warn(missing_docs)]
//! # greetcast-desktop
//!
//! ## Purpose
//! Provides the OS automation surface: window lookup/activation, synthetic
//! keyboard and mouse input, clipboard writes, and the pacing abstraction.
//!
//! ## Responsibilities
//! - Define a backend-agnostic [`DesktopBackend`] trait.
//! - Expose the real Win32 backend on supported platforms.
//! - Expose a deterministic scripted backend for CI and unit tests.
//! - Expose the [`Pacer`] wait abstraction so fixed delays are injectable.
//!
//! ## Data flow
//! Automation components resolve [`WindowInfo`] snapshots per step (no
//! caching across steps, because the target window can close, reopen, or
//! change state between them), then drive key/click/clipboard primitives.
//!
//! ## Ownership and lifetimes
//! [`WindowInfo`] is a snapshot referencing an OS window by opaque id, not an
//! owning handle; a stored id can go stale at any time and later calls on it
//! simply fail.
//!
//! ## Error model
//! Every primitive reports [`DesktopError`]. The pointer-corner failsafe is a
//! distinct variant so callers can log the abort cause verbatim.
//!
//! ## Security and privacy notes
//! Clipboard payloads pass through this crate but are never logged by it.

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use thiserror::Error;

/// Opaque identifier of one top-level OS window.
///
/// The wrapped value is only meaningful to the backend that produced it and
/// only for as long as the window lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub isize);

/// Screen-space window geometry in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl WindowRect {
    /// Returns the window width.
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Returns the window height.
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Returns the horizontal center in screen coordinates.
    pub fn center_x(&self) -> i32 {
        self.left + self.width() / 2
    }
}

/// Point-in-time snapshot of one matching window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Backend-opaque window identity.
    pub id: WindowId,
    /// Full window title at enumeration time.
    pub title: String,
    /// Whether the window was minimized at enumeration time.
    pub minimized: bool,
    /// Window geometry at enumeration time.
    pub rect: WindowRect,
}

/// Keys the campaign synthesizes, alone or in combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Control modifier.
    Control,
    /// Return/Enter.
    Enter,
    /// Letter F (search hotkey).
    F,
    /// Letter V (paste hotkey).
    V,
}

/// Trait implemented by concrete desktop automation providers.
pub trait DesktopBackend: Send + Sync {
    /// Enumerates visible top-level windows whose title contains
    /// `title_substring` (case-sensitive), in platform enumeration order.
    ///
    /// Returns an empty list when nothing matches; the order across multiple
    /// matches is whatever the platform reports and is not otherwise
    /// specified.
    fn find_windows(&self, title_substring: &str) -> Result<Vec<WindowInfo>, DesktopError>;

    /// Restores a minimized window.
    fn restore_window(&self, id: WindowId) -> Result<(), DesktopError>;

    /// Requests foreground focus for a window.
    fn focus_window(&self, id: WindowId) -> Result<(), DesktopError>;

    /// Presses `keys` in order and releases them in reverse order.
    fn send_hotkey(&self, keys: &[Key]) -> Result<(), DesktopError>;

    /// Taps a single key.
    fn press_key(&self, key: Key) -> Result<(), DesktopError>;

    /// Moves the pointer to screen coordinates and left-clicks.
    fn click_at(&self, x: i32, y: i32) -> Result<(), DesktopError>;

    /// Replaces the clipboard contents with Unicode text.
    fn write_clipboard(&self, text: &str) -> Result<(), DesktopError>;
}

/// Desktop surface error type.
#[derive(Debug, Error)]
pub enum DesktopError {
    /// The operator parked the pointer in the primary display's top-left
    /// corner, which aborts all input synthesis as a safety valve.
    #[error("input synthesis aborted: pointer parked in screen corner at ({x}, {y})")]
    FailsafeTriggered {
        /// Pointer x at the time of the check.
        x: i32,
        /// Pointer y at the time of the check.
        y: i32,
    },
    /// Backend runtime failure.
    #[error("desktop backend failure: {0}")]
    Backend(String),
}

/// Injectable wait abstraction.
///
/// Fixed pauses are the only synchronization this system has against the
/// target application; routing them through one trait lets tests substitute
/// zero-delay pacing and assert ordering instead of elapsed time.
pub trait Pacer: Send + Sync {
    /// Waits for `delay` before the caller proceeds.
    fn pause(&self, delay: Duration);
}

/// Production pacer: blocks the calling thread.
#[derive(Debug, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

/// Test pacer: returns immediately and records every requested pause.
#[derive(Debug, Default)]
pub struct InstantPacer {
    requested: Mutex<Vec<Duration>>,
}

impl InstantPacer {
    /// Creates an instant pacer with an empty pause journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pauses requested so far, in order.
    pub fn requested(&self) -> Vec<Duration> {
        self.requested
            .lock()
            .map(|pauses| pauses.clone())
            .unwrap_or_default()
    }
}

impl Pacer for InstantPacer {
    fn pause(&self, delay: Duration) {
        if let Ok(mut pauses) = self.requested.lock() {
            pauses.push(delay);
        }
    }
}

/// Real desktop backend for supported targets.
///
/// # Notes
/// Window snapshots are reacquired on every call; nothing is cached between
/// steps. Before each synthetic key or click the pointer position is
/// sampled, and a pointer parked in the primary display's top-left corner
/// aborts the call with [`DesktopError::FailsafeTriggered`].
#[derive(Debug, Clone)]
pub struct RealDesktopBackend {
    _private: (),
}

impl RealDesktopBackend {
    /// Creates the real backend.
    ///
    /// # Errors
    /// Returns [`DesktopError::Backend`] on targets without a supported
    /// automation surface.
    pub fn new() -> Result<Self, DesktopError> {
        #[cfg(windows)]
        {
            Ok(Self { _private: () })
        }

        #[cfg(not(windows))]
        {
            Err(DesktopError::Backend(
                "real desktop backend is currently implemented for Windows only".to_string(),
            ))
        }
    }
}

impl DesktopBackend for RealDesktopBackend {
    fn find_windows(&self, title_substring: &str) -> Result<Vec<WindowInfo>, DesktopError> {
        #[cfg(windows)]
        {
            win32::find_windows(title_substring)
        }

        #[cfg(not(windows))]
        {
            let _ = title_substring;
            Err(unsupported())
        }
    }

    fn restore_window(&self, id: WindowId) -> Result<(), DesktopError> {
        #[cfg(windows)]
        {
            win32::restore_window(id)
        }

        #[cfg(not(windows))]
        {
            let _ = id;
            Err(unsupported())
        }
    }

    fn focus_window(&self, id: WindowId) -> Result<(), DesktopError> {
        #[cfg(windows)]
        {
            win32::focus_window(id)
        }

        #[cfg(not(windows))]
        {
            let _ = id;
            Err(unsupported())
        }
    }

    fn send_hotkey(&self, keys: &[Key]) -> Result<(), DesktopError> {
        #[cfg(windows)]
        {
            win32::send_hotkey(keys)
        }

        #[cfg(not(windows))]
        {
            let _ = keys;
            Err(unsupported())
        }
    }

    fn press_key(&self, key: Key) -> Result<(), DesktopError> {
        #[cfg(windows)]
        {
            win32::send_hotkey(&[key])
        }

        #[cfg(not(windows))]
        {
            let _ = key;
            Err(unsupported())
        }
    }

    fn click_at(&self, x: i32, y: i32) -> Result<(), DesktopError> {
        #[cfg(windows)]
        {
            win32::click_at(x, y)
        }

        #[cfg(not(windows))]
        {
            let _ = (x, y);
            Err(unsupported())
        }
    }

    fn write_clipboard(&self, text: &str) -> Result<(), DesktopError> {
        #[cfg(windows)]
        {
            win32::write_clipboard(text)
        }

        #[cfg(not(windows))]
        {
            let _ = text;
            Err(unsupported())
        }
    }
}

#[cfg(not(windows))]
fn unsupported() -> DesktopError {
    DesktopError::Backend(
        "real desktop backend is currently implemented for Windows only".to_string(),
    )
}

#[cfg(windows)]
mod win32 {
    //! Win32 implementation of the desktop surface.

    use std::ptr::null_mut;

    use windows_sys::Win32::Foundation::{HWND, LPARAM, POINT, RECT};
    use windows_sys::Win32::System::DataExchange::{
        CloseClipboard, EmptyClipboard, OpenClipboard, SetClipboardData,
    };
    use windows_sys::Win32::System::Memory::{
        GMEM_MOVEABLE, GlobalAlloc, GlobalFree, GlobalLock, GlobalUnlock,
    };
    use windows_sys::Win32::System::Ole::CF_UNICODETEXT;
    use windows_sys::Win32::UI::Input::KeyboardAndMouse::{
        INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYEVENTF_KEYUP,
        MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP, MOUSEINPUT, SendInput, VIRTUAL_KEY, VK_CONTROL,
        VK_F, VK_RETURN, VK_V,
    };
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        EnumWindows, GetCursorPos, GetWindowRect, GetWindowTextLengthW, GetWindowTextW, IsIconic,
        IsWindowVisible, SW_RESTORE, SetCursorPos, SetForegroundWindow, ShowWindow,
    };

    use super::{DesktopError, Key, WindowId, WindowInfo, WindowRect};

    struct EnumContext {
        needle: String,
        matches: Vec<(isize, String)>,
    }

    unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> i32 {
        // Safety:
        // - `lparam` points at the live `EnumContext` for the whole
        //   `EnumWindows` call; Win32 invokes this callback synchronously.
        let context = unsafe { &mut *(lparam as *mut EnumContext) };

        // Safety:
        // - `hwnd` is provided by Win32 for this enumeration step.
        if unsafe { IsWindowVisible(hwnd) } == 0 {
            return 1;
        }

        // Safety:
        // - Valid window handle from the enumeration.
        let length = unsafe { GetWindowTextLengthW(hwnd) };
        if length <= 0 {
            return 1;
        }

        let mut buffer = vec![0_u16; length as usize + 1];
        // Safety:
        // - Buffer is large enough for the reported text plus terminator.
        let written = unsafe { GetWindowTextW(hwnd, buffer.as_mut_ptr(), buffer.len() as i32) };
        if written <= 0 {
            return 1;
        }

        let title = String::from_utf16_lossy(&buffer[..written as usize]);
        if title.contains(&context.needle) {
            context.matches.push((hwnd as isize, title));
        }

        1
    }

    pub fn find_windows(title_substring: &str) -> Result<Vec<WindowInfo>, DesktopError> {
        let mut context = EnumContext {
            needle: title_substring.to_string(),
            matches: Vec::new(),
        };

        unsafe {
            // Safety:
            // - `context` outlives the call and the callback never escapes it.
            EnumWindows(Some(collect_window), &mut context as *mut EnumContext as LPARAM);
        }

        let mut windows = Vec::with_capacity(context.matches.len());
        for (handle, title) in context.matches {
            let hwnd = handle as HWND;
            // Safety:
            // - `hwnd` came from the enumeration above; a window that closed
            //   in the meantime fails GetWindowRect and is skipped.
            let minimized = unsafe { IsIconic(hwnd) } != 0;
            let mut rect = RECT {
                left: 0,
                top: 0,
                right: 0,
                bottom: 0,
            };
            // Safety:
            // - `rect` is a valid out-pointer for this call.
            if unsafe { GetWindowRect(hwnd, &mut rect) } == 0 {
                continue;
            }

            windows.push(WindowInfo {
                id: WindowId(handle),
                title,
                minimized,
                rect: WindowRect {
                    left: rect.left,
                    top: rect.top,
                    right: rect.right,
                    bottom: rect.bottom,
                },
            });
        }

        Ok(windows)
    }

    pub fn restore_window(id: WindowId) -> Result<(), DesktopError> {
        unsafe {
            // Safety:
            // - A stale handle makes this a no-op; the next focus call
            //   reports the failure.
            ShowWindow(id.0 as HWND, SW_RESTORE);
        }
        Ok(())
    }

    pub fn focus_window(id: WindowId) -> Result<(), DesktopError> {
        // Safety:
        // - Valid or stale handle; Win32 rejects the latter via return value.
        let granted = unsafe { SetForegroundWindow(id.0 as HWND) };
        if granted == 0 {
            return Err(DesktopError::Backend(
                "SetForegroundWindow was refused by the window manager".to_string(),
            ));
        }
        Ok(())
    }

    pub fn send_hotkey(keys: &[Key]) -> Result<(), DesktopError> {
        ensure_pointer_clear()?;

        let mut inputs = Vec::with_capacity(keys.len() * 2);
        for key in keys {
            inputs.push(key_event(virtual_key(*key), 0));
        }
        for key in keys.iter().rev() {
            inputs.push(key_event(virtual_key(*key), KEYEVENTF_KEYUP));
        }

        dispatch(&inputs)
    }

    pub fn click_at(x: i32, y: i32) -> Result<(), DesktopError> {
        ensure_pointer_clear()?;

        // Safety:
        // - Coordinates outside the virtual screen are clamped by Win32.
        if unsafe { SetCursorPos(x, y) } == 0 {
            return Err(DesktopError::Backend("SetCursorPos failed".to_string()));
        }

        let inputs = [
            mouse_event(MOUSEEVENTF_LEFTDOWN),
            mouse_event(MOUSEEVENTF_LEFTUP),
        ];
        dispatch(&inputs)
    }

    pub fn write_clipboard(text: &str) -> Result<(), DesktopError> {
        let utf16: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
        let byte_len = utf16.len() * std::mem::size_of::<u16>();

        // Safety:
        // - Passing null claims the clipboard for the current task.
        if unsafe { OpenClipboard(null_mut()) } == 0 {
            return Err(DesktopError::Backend(
                "OpenClipboard failed; another task holds the clipboard".to_string(),
            ));
        }

        let result = (|| {
            // Safety:
            // - Clipboard is open and owned by this task.
            if unsafe { EmptyClipboard() } == 0 {
                return Err(DesktopError::Backend("EmptyClipboard failed".to_string()));
            }

            // Safety:
            // - Movable global memory is the required allocation class for
            //   clipboard payloads.
            let handle = unsafe { GlobalAlloc(GMEM_MOVEABLE, byte_len) };
            if handle.is_null() {
                return Err(DesktopError::Backend("GlobalAlloc failed".to_string()));
            }

            // Safety:
            // - `handle` is a live allocation of `byte_len` bytes.
            let target = unsafe { GlobalLock(handle) } as *mut u16;
            if target.is_null() {
                unsafe {
                    // Safety: allocation was never handed to the clipboard.
                    GlobalFree(handle);
                }
                return Err(DesktopError::Backend("GlobalLock failed".to_string()));
            }

            unsafe {
                // Safety:
                // - `target` spans `utf16.len()` writable u16 slots.
                std::ptr::copy_nonoverlapping(utf16.as_ptr(), target, utf16.len());
                GlobalUnlock(handle);
            }

            // Safety:
            // - On success the system takes ownership of `handle`.
            let stored = unsafe { SetClipboardData(u32::from(CF_UNICODETEXT), handle) };
            if stored.is_null() {
                unsafe {
                    // Safety: rejected allocation stays ours to free.
                    GlobalFree(handle);
                }
                return Err(DesktopError::Backend("SetClipboardData failed".to_string()));
            }

            Ok(())
        })();

        unsafe {
            // Safety:
            // - Balances the successful OpenClipboard above.
            CloseClipboard();
        }

        result
    }

    /// Rejects input synthesis while the pointer is parked in the primary
    /// display's top-left corner, the operator's emergency abort gesture.
    fn ensure_pointer_clear() -> Result<(), DesktopError> {
        let mut point = POINT { x: 0, y: 0 };
        // Safety:
        // - `point` is a valid out-pointer for this call.
        if unsafe { GetCursorPos(&mut point) } == 0 {
            return Err(DesktopError::Backend("GetCursorPos failed".to_string()));
        }
        if point.x <= 0 && point.y <= 0 {
            return Err(DesktopError::FailsafeTriggered {
                x: point.x,
                y: point.y,
            });
        }
        Ok(())
    }

    fn virtual_key(key: Key) -> VIRTUAL_KEY {
        match key {
            Key::Control => VK_CONTROL,
            Key::Enter => VK_RETURN,
            Key::F => VK_F,
            Key::V => VK_V,
        }
    }

    fn key_event(vk: VIRTUAL_KEY, flags: u32) -> INPUT {
        INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: vk,
                    wScan: 0,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        }
    }

    fn mouse_event(flags: u32) -> INPUT {
        INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx: 0,
                    dy: 0,
                    mouseData: 0,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        }
    }

    fn dispatch(inputs: &[INPUT]) -> Result<(), DesktopError> {
        // Safety:
        // - `inputs` is a valid slice; SendInput copies the array before
        //   returning.
        let sent = unsafe {
            SendInput(
                inputs.len() as u32,
                inputs.as_ptr(),
                std::mem::size_of::<INPUT>() as i32,
            )
        };
        if sent != inputs.len() as u32 {
            return Err(DesktopError::Backend(format!(
                "SendInput delivered {sent} of {} events",
                inputs.len()
            )));
        }
        Ok(())
    }
}

/// One recorded call against the scripted backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopCall {
    /// Window enumeration with the given title substring.
    FindWindows {
        /// Requested title substring.
        needle: String,
    },
    /// Restore request.
    RestoreWindow {
        /// Target window.
        id: WindowId,
    },
    /// Focus request.
    FocusWindow {
        /// Target window.
        id: WindowId,
    },
    /// Key combination.
    Hotkey {
        /// Keys pressed, in press order.
        keys: Vec<Key>,
    },
    /// Single key tap.
    PressKey {
        /// Key tapped.
        key: Key,
    },
    /// Pointer click.
    Click {
        /// Screen x.
        x: i32,
        /// Screen y.
        y: i32,
    },
    /// Clipboard replacement.
    ClipboardWrite {
        /// Text written.
        text: String,
    },
}

/// Operation selector for scripted failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DesktopOp {
    /// [`DesktopBackend::find_windows`].
    FindWindows,
    /// [`DesktopBackend::restore_window`].
    RestoreWindow,
    /// [`DesktopBackend::focus_window`].
    FocusWindow,
    /// [`DesktopBackend::send_hotkey`].
    SendHotkey,
    /// [`DesktopBackend::press_key`].
    PressKey,
    /// [`DesktopBackend::click_at`].
    ClickAt,
    /// [`DesktopBackend::write_clipboard`].
    WriteClipboard,
}

/// Deterministic in-memory backend for test and CI usage.
///
/// Records every call in a journal and fails any operation the test marks
/// via [`ScriptedDesktopBackend::fail_on`].
#[derive(Debug, Default)]
pub struct ScriptedDesktopBackend {
    windows: Mutex<Vec<WindowInfo>>,
    journal: Mutex<Vec<DesktopCall>>,
    failing: Mutex<Vec<DesktopOp>>,
}

impl ScriptedDesktopBackend {
    /// Creates a scripted backend with no windows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scripted backend with a caller-provided window list.
    pub fn with_windows(windows: Vec<WindowInfo>) -> Self {
        Self {
            windows: Mutex::new(windows),
            journal: Mutex::new(Vec::new()),
            failing: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the simulated window list.
    pub fn set_windows(&self, windows: Vec<WindowInfo>) {
        if let Ok(mut current) = self.windows.lock() {
            *current = windows;
        }
    }

    /// Makes every future `op` call fail until cleared.
    pub fn fail_on(&self, op: DesktopOp) {
        if let Ok(mut failing) = self.failing.lock() {
            if !failing.contains(&op) {
                failing.push(op);
            }
        }
    }

    /// Clears an injected failure.
    pub fn clear_failure(&self, op: DesktopOp) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.retain(|candidate| candidate != &op);
        }
    }

    /// Returns the recorded calls, in order.
    pub fn calls(&self) -> Vec<DesktopCall> {
        self.journal
            .lock()
            .map(|journal| journal.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: DesktopCall, op: DesktopOp) -> Result<(), DesktopError> {
        self.journal
            .lock()
            .map_err(|_| DesktopError::Backend("scripted journal lock poisoned".to_string()))?
            .push(call);

        let failing = self
            .failing
            .lock()
            .map_err(|_| DesktopError::Backend("scripted failure lock poisoned".to_string()))?;
        if failing.contains(&op) {
            return Err(DesktopError::Backend(format!(
                "scripted failure injected for {op:?}"
            )));
        }
        Ok(())
    }
}

impl DesktopBackend for ScriptedDesktopBackend {
    fn find_windows(&self, title_substring: &str) -> Result<Vec<WindowInfo>, DesktopError> {
        self.record(
            DesktopCall::FindWindows {
                needle: title_substring.to_string(),
            },
            DesktopOp::FindWindows,
        )?;

        let windows = self
            .windows
            .lock()
            .map_err(|_| DesktopError::Backend("scripted window lock poisoned".to_string()))?;
        Ok(windows
            .iter()
            .filter(|window| window.title.contains(title_substring))
            .cloned()
            .collect())
    }

    fn restore_window(&self, id: WindowId) -> Result<(), DesktopError> {
        self.record(DesktopCall::RestoreWindow { id }, DesktopOp::RestoreWindow)?;

        let mut windows = self
            .windows
            .lock()
            .map_err(|_| DesktopError::Backend("scripted window lock poisoned".to_string()))?;
        for window in windows.iter_mut() {
            if window.id == id {
                window.minimized = false;
            }
        }
        Ok(())
    }

    fn focus_window(&self, id: WindowId) -> Result<(), DesktopError> {
        self.record(DesktopCall::FocusWindow { id }, DesktopOp::FocusWindow)
    }

    fn send_hotkey(&self, keys: &[Key]) -> Result<(), DesktopError> {
        self.record(
            DesktopCall::Hotkey {
                keys: keys.to_vec(),
            },
            DesktopOp::SendHotkey,
        )
    }

    fn press_key(&self, key: Key) -> Result<(), DesktopError> {
        self.record(DesktopCall::PressKey { key }, DesktopOp::PressKey)
    }

    fn click_at(&self, x: i32, y: i32) -> Result<(), DesktopError> {
        self.record(DesktopCall::Click { x, y }, DesktopOp::ClickAt)
    }

    fn write_clipboard(&self, text: &str) -> Result<(), DesktopError> {
        self.record(
            DesktopCall::ClipboardWrite {
                text: text.to_string(),
            },
            DesktopOp::WriteClipboard,
        )
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for scripted backend behavior.

    use super::*;

    fn window(id: isize, title: &str, minimized: bool) -> WindowInfo {
        WindowInfo {
            id: WindowId(id),
            title: title.to_string(),
            minimized,
            rect: WindowRect {
                left: 100,
                top: 100,
                right: 1100,
                bottom: 800,
            },
        }
    }

    #[test]
    fn scripted_backend_filters_by_title_substring() {
        let backend = ScriptedDesktopBackend::with_windows(vec![
            window(1, "Messenger - alice", false),
            window(2, "Settings", false),
        ]);

        let matches = backend.find_windows("Messenger").expect("find should work");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, WindowId(1));
        assert_eq!(
            backend.calls(),
            vec![DesktopCall::FindWindows {
                needle: "Messenger".to_string()
            }]
        );
    }

    #[test]
    fn scripted_backend_injected_failure_still_journals_the_call() {
        let backend = ScriptedDesktopBackend::new();
        backend.fail_on(DesktopOp::SendHotkey);

        let result = backend.send_hotkey(&[Key::Control, Key::F]);
        assert!(result.is_err());
        assert_eq!(
            backend.calls(),
            vec![DesktopCall::Hotkey {
                keys: vec![Key::Control, Key::F]
            }]
        );

        backend.clear_failure(DesktopOp::SendHotkey);
        assert!(backend.send_hotkey(&[Key::Control, Key::V]).is_ok());
    }

    #[test]
    fn scripted_backend_restore_clears_minimized_flag() {
        let backend = ScriptedDesktopBackend::with_windows(vec![window(7, "Messenger", true)]);
        backend.restore_window(WindowId(7)).expect("restore");

        let matches = backend.find_windows("Messenger").expect("find");
        assert!(!matches[0].minimized);
    }

    #[test]
    fn instant_pacer_records_requested_pauses() {
        let pacer = InstantPacer::new();
        pacer.pause(Duration::from_millis(300));
        pacer.pause(Duration::from_secs(1));
        assert_eq!(
            pacer.requested(),
            vec![Duration::from_millis(300), Duration::from_secs(1)]
        );
    }
}
