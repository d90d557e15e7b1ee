/// Dirty-flag render scheduling.
///
/// Callers report the revision of everything a frame depends on; bursts of changes
/// collapse into one pending frame that is handed out on the next ready poll.
#[derive(Debug, Clone, Default)]
pub struct RenderScheduler {
    requested: Option<u64>,
    rendered: Option<u64>,
    deferred: bool,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the latest input revision; returns whether a frame is now pending.
    pub fn invalidate(&mut self, revision: u64) -> bool {
        if self.rendered == Some(revision) {
            self.requested = None;
            return false;
        }
        if self.requested.is_some_and(|pending| pending != revision) {
            tracing::trace!(revision, "coalescing render request");
        }
        self.requested = Some(revision);
        true
    }

    /// Forces the next ready poll to render even without a new revision.
    pub fn force(&mut self) {
        self.requested = Some(self.requested.or(self.rendered).unwrap_or_default());
        self.rendered = None;
    }

    pub fn is_pending(&self) -> bool {
        self.requested.is_some()
    }

    /// Returns the revision to render now, if any.
    ///
    /// While `fonts_ready` is false the request stays pending and is released on the
    /// first ready poll after it.
    pub fn poll(&mut self, fonts_ready: bool) -> Option<u64> {
        let revision = self.requested?;
        if !fonts_ready {
            if !self.deferred {
                tracing::debug!(revision, "render deferred until fonts are ready");
                self.deferred = true;
            }
            return None;
        }
        self.deferred = false;
        self.requested = None;
        self.rendered = Some(revision);
        Some(revision)
    }

    pub const fn last_rendered(&self) -> Option<u64> {
        self.rendered
    }
}
