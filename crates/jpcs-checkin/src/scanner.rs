//! # Scanner lifecycle
//!
//! The camera feed is a resource that must be paused while an outcome
//! dialog is on screen and released when the station screen goes away.
//! Both obligations are encoded as RAII guards so no exit path can
//! forget them.

/// A pausable scan capture source.
///
/// Implementations wrap whatever actually produces scan payloads; the
/// engine never talks to this trait, only the session around it does.
pub trait ScanSource {
    /// Stop delivering payloads until [`ScanSource::resume`].
    fn pause(&mut self);
    /// Resume delivering payloads.
    fn resume(&mut self);
    /// Release the source permanently. Further calls are not made.
    fn stop(&mut self);
}

/// Pauses the source on creation and resumes it on drop.
///
/// Held across outcome evaluation so a slow store round-trip cannot
/// race a second payload from the same badge.
pub struct ScanGuard<'a, S: ScanSource> {
    source: &'a mut S,
}

impl<'a, S: ScanSource> ScanGuard<'a, S> {
    fn new(source: &'a mut S) -> Self {
        source.pause();
        ScanGuard { source }
    }
}

impl<S: ScanSource> Drop for ScanGuard<'_, S> {
    fn drop(&mut self) {
        self.source.resume();
    }
}

/// Owns a scan source for the lifetime of a station screen and stops it
/// exactly once, on [`ScannerSession::stop`] or on drop.
pub struct ScannerSession<S: ScanSource> {
    source: S,
    stopped: bool,
}

impl<S: ScanSource> ScannerSession<S> {
    pub fn new(source: S) -> Self {
        ScannerSession {
            source,
            stopped: false,
        }
    }

    /// Pause capture while a payload is being evaluated. Capture
    /// resumes when the returned guard is dropped.
    pub fn pause_for_evaluation(&mut self) -> ScanGuard<'_, S> {
        ScanGuard::new(&mut self.source)
    }

    /// Stop capture now instead of waiting for drop.
    pub fn stop(mut self) {
        self.source.stop();
        self.stopped = true;
    }
}

impl<S: ScanSource> Drop for ScannerSession<S> {
    fn drop(&mut self) {
        if !self.stopped {
            self.source.stop();
        }
    }
}
