// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Terminal setup and cleanup for the interactive prompt.
//!
//! Every mode change is recorded so [`cleanup_terminal`] undoes exactly what
//! [`setup_terminal`] did, once, including from the panic hook.

use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;

static CLEANUP_DONE: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

static RAW_MODE_ENABLED: AtomicBool = AtomicBool::new(false);
static ALTERNATE_SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);
static KB_FLAGS_PUSHED: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone)]
pub struct TerminalConfig {
    pub raw_mode: bool,
    pub alternate_screen: bool,
    /// Ask for disambiguated key events when the terminal supports them
    pub keyboard_enhancement: bool,
    /// Restore the terminal before the default panic output
    pub panic_hook: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            raw_mode: true,
            alternate_screen: true,
            keyboard_enhancement: true,
            panic_hook: true,
        }
    }
}

pub fn setup_terminal(config: &TerminalConfig) -> io::Result<()> {
    CLEANUP_DONE.store(false, Ordering::SeqCst);
    let mut stdout = io::stdout();

    if config.raw_mode {
        crossterm::terminal::enable_raw_mode()?;
        RAW_MODE_ENABLED.store(true, Ordering::SeqCst);
    }

    if config.alternate_screen {
        stdout.execute(EnterAlternateScreen)?;
        ALTERNATE_SCREEN_ACTIVE.store(true, Ordering::SeqCst);
    }

    stdout.execute(crossterm::cursor::SetCursorStyle::SteadyBar)?;

    if config.keyboard_enhancement
        && crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false)
    {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES,
        ))?;
        KB_FLAGS_PUSHED.store(true, Ordering::SeqCst);
    }

    if config.panic_hook && !PANIC_HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        let default_panic = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            cleanup_terminal();
            default_panic(panic_info);
        }));
    }

    Ok(())
}

pub fn cleanup_terminal() {
    if CLEANUP_DONE.swap(true, Ordering::SeqCst) {
        return;
    }

    let mut stdout = io::stdout();

    // Keyboard flags must be popped while still in raw mode
    if KB_FLAGS_PUSHED.swap(false, Ordering::SeqCst) {
        let _ = stdout.execute(PopKeyboardEnhancementFlags);
    }

    let _ = stdout.execute(crossterm::cursor::SetCursorStyle::DefaultUserShape);

    if RAW_MODE_ENABLED.swap(false, Ordering::SeqCst) {
        let _ = crossterm::terminal::disable_raw_mode();
    }

    if ALTERNATE_SCREEN_ACTIVE.swap(false, Ordering::SeqCst) {
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}

/// Restores the terminal when dropped.
pub struct TerminalGuard(());

impl TerminalGuard {
    pub fn new(config: &TerminalConfig) -> io::Result<Self> {
        if let Err(err) = setup_terminal(config) {
            cleanup_terminal();
            return Err(err);
        }
        Ok(Self(()))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        cleanup_terminal();
    }
}
