//! Transient notifications with timer-based dismissal

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::debug;

use crate::ui::presenter::{Presenter, StatusKind};

/// Default time a notification stays visible
pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

/// A banner currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: StatusKind,
}

/// Shows one notification at a time and dismisses it after `timeout`
pub struct Notifier {
    presenter: Arc<dyn Presenter>,
    timeout: Duration,
    current: Arc<Mutex<Option<Notification>>>,
    next_id: AtomicU64,
}

impl Notifier {
    pub fn new(presenter: Arc<dyn Presenter>, timeout: Duration) -> Self {
        Self {
            presenter,
            timeout,
            current: Arc::new(Mutex::new(None)),
            next_id: AtomicU64::new(1),
        }
    }

    /// Replace any visible notification with a new one. Must be called from
    /// within a tokio runtime, which runs the dismissal timer.
    pub fn show(&self, message: impl Into<String>, kind: StatusKind) -> u64 {
        let notification = Notification {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            message: message.into(),
            kind,
        };
        let id = notification.id;

        {
            let mut current = lock(&self.current);
            if let Some(previous) = current.take() {
                self.presenter.dismiss_notification(&previous);
            }
            self.presenter.show_notification(&notification);
            *current = Some(notification);
        }

        let current = Arc::clone(&self.current);
        let presenter = Arc::clone(&self.presenter);
        let timeout = self.timeout;
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            if let Some(expired) = take_if_current(&current, id) {
                debug!("Notification {} expired", id);
                presenter.dismiss_notification(&expired);
            }
        });

        id
    }

    /// Dismiss notification `id` if it is still visible
    pub fn dismiss(&self, id: u64) -> bool {
        match take_if_current(&self.current, id) {
            Some(notification) => {
                self.presenter.dismiss_notification(&notification);
                true
            }
            None => false,
        }
    }

    pub fn current(&self) -> Option<Notification> {
        lock(&self.current).clone()
    }
}

fn lock(current: &Mutex<Option<Notification>>) -> MutexGuard<'_, Option<Notification>> {
    current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn take_if_current(current: &Mutex<Option<Notification>>, id: u64) -> Option<Notification> {
    let mut guard = lock(current);
    if guard.as_ref().map(|n| n.id) == Some(id) {
        guard.take()
    } else {
        None
    }
}
