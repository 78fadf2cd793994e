//! How the core talks back to the person at the keyboard: a yes/no
//! confirmation and a one-shot notice. The TUI answers with modal dialogs,
//! the command line with stderr and stdin.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
    fn notify(&self, title: &str, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

/// Notices waiting to be shown by the TUI loop as OK dialogs.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    pending: Mutex<VecDeque<Notice>>,
}

impl NoticeQueue {
    pub fn pop(&self) -> Option<Notice> {
        self.pending.lock().ok()?.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().map(|q| q.is_empty()).unwrap_or(true)
    }

    /// A notifier whose `confirm` returns what a dialog already collected.
    pub fn answered(&self, yes: bool) -> DialogAnswer<'_> {
        DialogAnswer { yes, notices: self }
    }
}

impl Notifier for NoticeQueue {
    // Confirmation needs a dialog on screen; see `answered`.
    fn confirm(&self, _message: &str) -> bool {
        false
    }

    fn notify(&self, title: &str, message: &str) {
        if let Ok(mut q) = self.pending.lock() {
            q.push_back(Notice { title: title.to_string(), message: message.to_string() });
        }
    }
}

pub struct DialogAnswer<'a> {
    yes: bool,
    notices: &'a NoticeQueue,
}

impl Notifier for DialogAnswer<'_> {
    fn confirm(&self, _message: &str) -> bool {
        self.yes
    }

    fn notify(&self, title: &str, message: &str) {
        self.notices.notify(title, message);
    }
}

/// Command-line notifier. With `assume_yes` every confirmation passes
/// without prompting.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    pub assume_yes: bool,
}

impl Notifier for ConsoleNotifier {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{message} [y/N] ");
        io::stderr().flush().ok();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }

    fn notify(&self, title: &str, message: &str) {
        eprintln!("{title}: {message}");
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
