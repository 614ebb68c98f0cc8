//! Notification timing

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use hostforge::ui::notify::{Notifier, DEFAULT_NOTIFICATION_TIMEOUT};
use hostforge::ui::presenter::StatusKind;

use crate::support::{RecordingPresenter, Shown};

fn notifier() -> (Arc<RecordingPresenter>, Notifier) {
    let presenter = Arc::new(RecordingPresenter::default());
    let notifier = Notifier::new(presenter.clone(), DEFAULT_NOTIFICATION_TIMEOUT);
    (presenter, notifier)
}

#[tokio::test(start_paused = true)]
async fn test_notification_dismissed_after_timeout() {
    let (presenter, notifier) = notifier();

    let id = notifier.show("Website deployed successfully!", StatusKind::Success);
    sleep(Duration::from_secs(4)).await;
    assert_eq!(notifier.current().map(|n| n.id), Some(id));

    sleep(Duration::from_secs(2)).await;
    assert!(notifier.current().is_none());
    assert_eq!(presenter.shown().last(), Some(&Shown::Dismiss(id)));
}

#[tokio::test(start_paused = true)]
async fn test_manual_dismiss() {
    let (presenter, notifier) = notifier();

    let id = notifier.show("Deployment failed. Please try again.", StatusKind::Error);
    assert!(notifier.dismiss(id));
    assert!(!notifier.dismiss(id));

    // The timer firing later finds nothing to dismiss
    sleep(Duration::from_secs(6)).await;
    let dismissals = presenter
        .shown()
        .into_iter()
        .filter(|s| matches!(s, Shown::Dismiss(_)))
        .count();
    assert_eq!(dismissals, 1);
}

#[tokio::test(start_paused = true)]
async fn test_stale_timer_keeps_newer_notification() {
    let (presenter, notifier) = notifier();

    let first = notifier.show("Deployment failed. Please try again.", StatusKind::Error);
    sleep(Duration::from_secs(3)).await;
    let second = notifier.show("Website deployed successfully!", StatusKind::Success);
    assert_ne!(first, second);

    // The first timer expires here, the second is still running
    sleep(Duration::from_secs(3)).await;
    let current = notifier.current().unwrap();
    assert_eq!(current.id, second);
    assert_eq!(current.kind, StatusKind::Success);

    sleep(Duration::from_secs(3)).await;
    assert!(notifier.current().is_none());

    let dismissed: Vec<u64> = presenter
        .shown()
        .into_iter()
        .filter_map(|s| match s {
            Shown::Dismiss(id) => Some(id),
            _ => None,
        })
        .collect();
    // Replacing dismisses the first; the second goes on its own timer
    assert_eq!(dismissed, vec![first, second]);
}
