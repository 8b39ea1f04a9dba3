//! Operator feedback: toasts, upload progress, and confirmation prompts.

use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

/// A short, non-blocking notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

/// Where toasts and progress go. Shared with upload body streams, so it
/// must be thread-safe.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);

    /// Upload progress in percent.
    fn progress(&self, _percent: u8) {}

    /// Catalog load indicator; `true` while the list request is outstanding.
    fn loading(&self, _active: bool) {}
}

/// Writes toasts to stderr, leaving stdout for rendered output.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        let marker = match toast.kind {
            ToastKind::Success => "\u{2714}",
            ToastKind::Warning => "!",
            ToastKind::Error => "\u{2716}",
        };
        eprintln!("{marker} {}", toast.message);
    }

    fn progress(&self, percent: u8) {
        eprint!("\rUploading... {percent}%");
        if percent >= 100 {
            eprintln!();
        }
    }

    fn loading(&self, active: bool) {
        if active {
            eprintln!("Loading products...");
        }
    }
}

/// Yes/no prompt before destructive operations.
pub trait Confirm: Send + Sync {
    fn confirm(&self, question: &str) -> bool;
}

/// Always answers `answer`; `--yes` and tests use this.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, _question: &str) -> bool {
        self.0
    }
}

/// Asks on the terminal; anything but `y`/`yes` is a no.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, question: &str) -> bool {
        eprint!("{question} [y/N] ");
        if std::io::stderr().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Whole-number percentage of `sent` over `total`; an empty body counts as done.
#[must_use]
pub fn percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (u128::from(sent.min(total)) * 100) / u128::from(total);
    u8::try_from(pct).unwrap_or(100)
}
