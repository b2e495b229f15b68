//! services/client/src/adapters/console.rs
//!
//! Terminal implementations of the `Notifier` and `Confirmer` ports: toasts
//! become prefixed lines on stderr and the delete confirmation becomes a y/N
//! prompt on stdin.

use cinesphere_core::ports::{Confirmer, Notification, NotificationKind, Notifier};
use std::io::{BufRead, Write};
use tracing::{debug, error, info, warn};

/// Prints every notification and mirrors it into the trace log.
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    fn prefix(kind: NotificationKind) -> &'static str {
        match kind {
            NotificationKind::Success => "[ok]",
            NotificationKind::Warning => "[warn]",
            NotificationKind::Error => "[error]",
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                info!(target: "notification", "{}", notification.message)
            }
            NotificationKind::Warning => warn!(target: "notification", "{}", notification.message),
            NotificationKind::Error => error!(target: "notification", "{}", notification.message),
        }
        eprintln!("{} {}", Self::prefix(notification.kind), notification.message);
    }
}

/// Asks on stdin unless `assume_yes` was given on the command line.
pub struct StdinConfirmer {
    assume_yes: bool,
}

impl StdinConfirmer {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirmer for StdinConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            debug!("Auto-confirmed: {}", prompt);
            return true;
        }
        print!("{} [y/N] ", prompt);
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                error!("Failed to read confirmation: {:?}", e);
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
