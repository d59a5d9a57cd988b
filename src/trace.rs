// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Structured failure traces and their filtered rendering.
//!
//! A [`Trace`] is a chain of [`TraceSegment`]s (one per chained cause of a
//! failure), each holding the [`TraceEntry`]s of its call stack. Frames of the
//! test engine's own fixture invocation carry no diagnostic value, so
//! [`TraceFilter`] hides them while rendering, leaving the [`Trace`] itself
//! intact for any later reader.

use std::{borrow::Cow, io, iter, mem, ops::Deref};

use serde::{Deserialize, Serialize};

use crate::writer::{Markup, TerminalWrite};

/// Substring identifying the first source line of an internal
/// fixture-invocation frame.
pub const FIXTURE_INVOCATION_MARKER: &str = "def call_fixture_func";

/// Separator between [`TraceEntry`]s of the same [`TraceSegment`].
const ENTRY_SEPARATOR: &str = "_ ";

/// Prefix of the lines describing the failure itself.
const FAILURE_LINE_PREFIX: &str = "E ";

/// Rendering contract of the [`Trace`] parts.
pub trait Render {
    /// Renders this value into the given terminal.
    ///
    /// # Errors
    ///
    /// If the terminal fails to be written.
    fn render(&self, out: &mut dyn TerminalWrite) -> io::Result<()>;
}

/// Location in a source file with a message attached.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FileLocation {
    /// Path of the source file.
    pub path: String,

    /// Line in the source file.
    pub line: u32,

    /// Message attached to this location.
    pub message: String,
}

impl Render for FileLocation {
    fn render(&self, out: &mut dyn TerminalWrite) -> io::Result<()> {
        let message = self.message.lines().next().unwrap_or_default();
        out.write_styled(&self.path, Markup::RED.bold())?;
        out.write_str(&format!(":{}: {message}\n", self.line))
    }
}

/// Single frame of a [`TraceSegment`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TraceEntry {
    /// Source lines of this frame, followed by the failure description lines
    /// (prefixed with `E `) for the innermost one.
    pub lines: Vec<String>,

    /// Where this frame is located.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<FileLocation>,
}

impl TraceEntry {
    /// Creates a new [`TraceEntry`] out of the given `lines`.
    #[must_use]
    pub fn new<L: Into<String>>(lines: impl IntoIterator<Item = L>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            location: None,
        }
    }

    /// Attaches the given [`FileLocation`] to this [`TraceEntry`].
    #[must_use]
    pub fn at(
        mut self,
        path: impl Into<String>,
        line: u32,
        message: impl Into<String>,
    ) -> Self {
        self.location = Some(FileLocation {
            path: path.into(),
            line,
            message: message.into(),
        });
        self
    }
}

impl Render for TraceEntry {
    fn render(&self, out: &mut dyn TerminalWrite) -> io::Result<()> {
        for line in &self.lines {
            if line.starts_with(FAILURE_LINE_PREFIX) {
                out.line(line, Markup::RED.bold())?;
            } else {
                out.line(line, Markup::PLAIN)?;
            }
        }
        if let Some(loc) = &self.location {
            out.line("", Markup::PLAIN)?;
            loc.render(out)?;
        }
        Ok(())
    }
}

/// Call stack of a single cause in a failure's [`Trace`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TraceSegment {
    /// Frames of this [`TraceSegment`], outermost first.
    pub entries: Vec<TraceEntry>,

    /// Where this cause was raised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crash: Option<FileLocation>,

    /// Text chaining this cause to the next [`TraceSegment`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TraceSegment {
    /// Creates a new [`TraceSegment`] out of the given `entries`.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = TraceEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            crash: None,
            description: None,
        }
    }

    /// Sets the text chaining this [`TraceSegment`] to the next one.
    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the [`FileLocation`] this cause was raised at.
    #[must_use]
    pub fn crashed_at(mut self, crash: FileLocation) -> Self {
        self.crash = Some(crash);
        self
    }
}

impl Render for TraceSegment {
    fn render(&self, out: &mut dyn TerminalWrite) -> io::Result<()> {
        let mut entries = self.entries.iter().peekable();
        while let Some(entry) = entries.next() {
            entry.render(out)?;
            if entries.peek().is_some() {
                out.line("", Markup::PLAIN)?;
                out.sep(ENTRY_SEPARATOR, None, Markup::PLAIN)?;
            }
        }
        Ok(())
    }
}

/// Structured representation of a failure: chain of its causes.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Trace {
    /// [`TraceSegment`]s of every chained cause, in their rendering order.
    pub chain: Vec<TraceSegment>,
}

impl Trace {
    /// Creates a new [`Trace`] out of the given `chain`.
    #[must_use]
    pub fn new(chain: impl IntoIterator<Item = TraceSegment>) -> Self {
        Self { chain: chain.into_iter().collect() }
    }

    /// Returns the [`FileLocation`] the failure was finally raised at.
    #[must_use]
    pub fn crash(&self) -> Option<&FileLocation> {
        self.chain.last().and_then(|s| s.crash.as_ref())
    }
}

impl Render for Trace {
    fn render(&self, out: &mut dyn TerminalWrite) -> io::Result<()> {
        for segment in &self.chain {
            segment.render(out)?;
            if let Some(descr) = &segment.description {
                out.line("", Markup::PLAIN)?;
                out.line(descr, Markup::YELLOW)?;
            }
        }
        Ok(())
    }
}

/// Renderer of [`Trace`]s hiding internal fixture-invocation frames.
#[derive(Clone, Debug)]
pub struct TraceFilter {
    /// Substring the first line of a hidden frame contains.
    marker: Cow<'static, str>,
}

impl Default for TraceFilter {
    fn default() -> Self {
        Self::new(FIXTURE_INVOCATION_MARKER)
    }
}

impl TraceFilter {
    /// Creates a new [`TraceFilter`] hiding frames whose first line contains
    /// the given `marker`.
    #[must_use]
    pub fn new(marker: impl Into<Cow<'static, str>>) -> Self {
        Self { marker: marker.into() }
    }

    /// Indicates whether the given [`TraceEntry`] is a fixture-invocation
    /// frame.
    #[must_use]
    pub fn is_internal(&self, entry: &TraceEntry) -> bool {
        entry
            .lines
            .first()
            .is_some_and(|line| line.contains(self.marker.as_ref()))
    }

    /// Removes the leading fixture-invocation frame of every
    /// [`TraceSegment`] for as long as the returned guard lives.
    #[must_use]
    pub fn elide<'t>(&self, trace: &'t mut Trace) -> ElidedFrames<'t> {
        let removed = trace
            .chain
            .iter_mut()
            .enumerate()
            .map(|(n, segment)| {
                let first = segment.entries.first()?;
                self.is_internal(first).then(|| {
                    tracing::debug!(
                        segment = n,
                        "eliding fixture invocation frame",
                    );
                    segment.entries.remove(0)
                })
            })
            .collect();
        ElidedFrames { trace, removed }
    }

    /// Renders the given [`Trace`] without its fixture-invocation frames.
    ///
    /// The [`Trace`] is restored to its original shape before returning,
    /// whether rendering succeeds or not.
    ///
    /// # Errors
    ///
    /// If the terminal fails to be written.
    pub fn render_trace(
        &self,
        trace: &mut Trace,
        out: &mut dyn TerminalWrite,
    ) -> io::Result<()> {
        self.elide(trace).render(out)
    }
}

/// Guard over a [`Trace`] with its fixture-invocation frames removed.
///
/// Puts every removed frame back at the front of its [`TraceSegment`] on
/// drop, including unwinding.
#[derive(Debug)]
pub struct ElidedFrames<'t> {
    /// Shortened [`Trace`].
    trace: &'t mut Trace,

    /// Frame removed from every [`TraceSegment`], by position.
    removed: Vec<Option<TraceEntry>>,
}

impl ElidedFrames<'_> {
    /// Returns the number of removed frames.
    #[must_use]
    pub fn count(&self) -> usize {
        self.removed.iter().flatten().count()
    }
}

impl Deref for ElidedFrames<'_> {
    type Target = Trace;

    fn deref(&self) -> &Self::Target {
        self.trace
    }
}

impl Drop for ElidedFrames<'_> {
    fn drop(&mut self) {
        let removed = mem::take(&mut self.removed);
        for (segment, entry) in iter::zip(&mut self.trace.chain, removed) {
            if let Some(entry) = entry {
                segment.entries.insert(0, entry);
            }
        }
    }
}
