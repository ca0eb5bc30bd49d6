//! Status line and loading indicator on stderr.
//!
//! Results go to stdout; everything transient (progress, warnings, backend
//! errors) goes through [`StatusReporter`] so piping results stays clean.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            StatusKind::Info => "info",
            StatusKind::Success => "ok",
            StatusKind::Warning => "warn",
            StatusKind::Error => "error",
        };
        f.write_str(tag)
    }
}

pub(crate) struct StatusReporter<W: Write> {
    out: RefCell<W>,
    loading: Cell<bool>,
}

impl StatusReporter<std::io::Stderr> {
    pub(crate) fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> StatusReporter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
            loading: Cell::new(false),
        }
    }

    /// Replace the status line with `message`.
    pub(crate) fn report(&self, kind: StatusKind, message: impl fmt::Display) {
        self.clear_loading_line();
        // Status output is best-effort; a closed stderr must not abort a search.
        let _ = writeln!(self.out.borrow_mut(), "[{kind}] {message}");
        if self.loading.get() {
            self.draw_loading_line();
        }
    }

    /// Show the loading indicator until the returned guard is dropped.
    pub(crate) fn loading(&self) -> LoadingGuard<'_, W> {
        self.loading.set(true);
        self.draw_loading_line();
        LoadingGuard { reporter: self }
    }

    #[cfg(test)]
    pub(crate) fn is_loading(&self) -> bool {
        self.loading.get()
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn draw_loading_line(&self) {
        let mut out = self.out.borrow_mut();
        let _ = write!(out, "\rworking...");
        let _ = out.flush();
    }

    fn clear_loading_line(&self) {
        if self.loading.get() {
            let mut out = self.out.borrow_mut();
            let _ = write!(out, "\r\x1b[2K");
        }
    }
}

/// Clears the loading indicator on drop, on success and error paths alike.
pub(crate) struct LoadingGuard<'a, W: Write> {
    reporter: &'a StatusReporter<W>,
}

impl<W: Write> Drop for LoadingGuard<'_, W> {
    fn drop(&mut self) {
        self.reporter.clear_loading_line();
        self.reporter.loading.set(false);
        let _ = self.reporter.out.borrow_mut().flush();
    }
}
