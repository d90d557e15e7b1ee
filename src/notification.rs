/// User-visible, non-blocking messages.
pub trait Notifier {
    fn notify(&self, summary: &str, body: &str);
}

/// Desktop notifications through the session notification daemon.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemNotifier;

impl Notifier for SystemNotifier {
    fn notify(&self, summary: &str, body: &str) {
        if let Err(err) = notify_rust::Notification::new()
            .appname("boxart")
            .summary(summary)
            .body(body)
            .show()
        {
            tracing::warn!("system notification failed: {err}");
        }
    }
}
