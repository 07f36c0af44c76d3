//! Terminal presentation of workflow notifications.

use crate::domain::{ActionResponse, NavigationSignal, NotificationSink};

/// Prints creation outcomes to the terminal. Successes go to stdout,
/// failures and fetch errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, response: &ActionResponse) {
        if response.success {
            println!("{}", response.message);
        } else {
            eprintln!("{}", response.message);
        }
    }

    fn notify_error(&self, message: &str) {
        eprintln!("{}", message);
    }
}

impl NavigationSignal for ConsoleNotifier {
    fn navigate_home(&self) {
        // The command exits after a successful creation; leaving the
        // workflow needs no terminal output of its own.
        tracing::debug!("creation workflow finished");
    }
}
