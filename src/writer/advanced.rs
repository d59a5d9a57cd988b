// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Reporter`] rendering behavior-driven scenarios in detail.

use std::time::Duration;

use crate::{
    event::{RunEvent, Scenario, Step},
    trace::TraceFilter,
    writer::{Markup, Reporter, Stats, TerminalWrite, Verbosity},
    Error, Result, Status,
};

/// Width the [`Step`] keywords are aligned to.
const KEYWORD_WIDTH: usize = 5;

/// Position of a rendered [`Step`] relative to the first failed one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Progress {
    /// No [`Step`] has failed so far.
    NotYetFailed,

    /// This is the first failed [`Step`].
    AtFailure,

    /// The first failed [`Step`] is behind.
    AfterFailure,
}

impl Progress {
    /// Moves to the [`Progress`] of the given next [`Step`].
    ///
    /// Reaching [`Progress::AtFailure`] happens once per [`Scenario`].
    const fn advance(self, step: &Step) -> Self {
        match self {
            Self::NotYetFailed if step.failed => Self::AtFailure,
            Self::NotYetFailed => Self::NotYetFailed,
            Self::AtFailure | Self::AfterFailure => Self::AfterFailure,
        }
    }

    const fn marker(self) -> &'static str {
        match self {
            Self::AtFailure => "->",
            Self::NotYetFailed | Self::AfterFailure => "  ",
        }
    }

    const fn markup(self) -> Markup {
        match self {
            Self::NotYetFailed => Markup::GREEN,
            Self::AtFailure => Markup::RED,
            Self::AfterFailure => Markup::LIGHT,
        }
    }
}

/// [`Reporter`] extending another one with a detailed output of
/// behavior-driven scenarios.
///
/// With a positive [`Verbosity`], a reported [`RunEvent`] carrying
/// [`Scenario`] data is rendered as the [`Scenario`] name and its outcome,
/// and a failed one additionally as its [`Step`]s and a failure trace without
/// internal fixture-invocation frames. Everything else is delegated to the
/// wrapped [`Reporter`].
#[derive(Clone, Debug)]
pub struct Advanced<B> {
    /// Extended [`Reporter`].
    base: B,

    /// Filter of the rendered failure traces.
    filter: TraceFilter,
}

impl<B: Reporter> Advanced<B> {
    /// Wraps the given baseline [`Reporter`].
    #[must_use]
    pub fn new(base: B) -> Self {
        Self { base, filter: TraceFilter::default() }
    }

    /// Replaces the [`TraceFilter`] of the rendered failure traces.
    #[must_use]
    pub fn with_filter(mut self, filter: TraceFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Returns the wrapped [`Reporter`].
    #[must_use]
    pub const fn inner(&self) -> &B {
        &self.base
    }

    /// Unwraps the wrapped [`Reporter`].
    #[must_use]
    pub fn into_inner(self) -> B {
        self.base
    }

    /// Renders the given [`RunEvent`] with its classified [`Status`].
    ///
    /// The [`RunEvent`]'s trace is shortened while being rendered only, and
    /// is left in its original shape once this method returns.
    ///
    /// # Errors
    ///
    /// - [`Error::UnhandledStatus`] if a scenario's [`Status`] is neither
    ///   [`Status::Passed`] nor [`Status::Failed`]. The `": <name> "` prefix
    ///   is already written to the terminal by then.
    /// - [`Error::Io`] if the terminal fails to be written.
    pub fn render(
        &mut self,
        event: &mut RunEvent,
        status: Option<&Status>,
    ) -> Result<()> {
        let Some(status) = status else {
            return Ok(());
        };
        if !self.base.verbosity().is_verbose() || !event.has_scenario() {
            return self.base.render_line(event, status);
        }

        tracing::trace!(id = event.id(), %status, "rendering scenario");
        let scenario = event.scenario()?;
        let out = self.base.terminal();
        out.write_str(&format!(": {} ", scenario.name))?;
        match status {
            Status::Passed => out.write_styled("PASSED", Markup::GREEN)?,
            Status::Failed => {
                out.write_styled("FAILED", Markup::RED)?;
                out.ensure_newline()?;
                write_scenario(out, scenario)?;
                if let Some(trace) = event.trace_mut() {
                    self.filter.render_trace(trace, out)?;
                }
            }
            Status::Skipped | Status::Other(_) => {
                return Err(Error::UnhandledStatus { status: status.clone() });
            }
        }
        Ok(())
    }
}

/// Writes the header and the [`Step`]s of a failed [`Scenario`].
fn write_scenario(
    out: &mut dyn TerminalWrite,
    scenario: &Scenario,
) -> std::io::Result<()> {
    out.write_str(&format!(
        "\nFeature: {}\n    Scenario: {}\n",
        scenario.feature.name, scenario.name,
    ))?;
    let mut progress = Progress::NotYetFailed;
    for step in &scenario.steps {
        progress = progress.advance(step);
        let line = format!(
            "     {} {:>KEYWORD_WIDTH$} {}\n",
            progress.marker(),
            step.keyword,
            step.name,
        );
        out.write_styled(&line, progress.markup())?;
    }
    Ok(())
}

impl<B: Reporter> Reporter for Advanced<B> {
    fn session_started(&mut self) -> Result<()> {
        self.base.session_started()
    }

    fn collection_finished(&mut self, count: usize) -> Result<()> {
        self.base.collection_finished(count)
    }

    fn item_started(&mut self, id: &str, location: &str) -> Result<()> {
        self.base.item_started(id, location)
    }

    fn report(
        &mut self,
        mut event: RunEvent,
        status: Option<Status>,
    ) -> Result<()> {
        let Some(status) = status else {
            return Ok(());
        };
        self.render(&mut event, Some(&status))?;
        self.base.record(status, event);
        Ok(())
    }

    fn session_finished(&mut self, duration: Duration) -> Result<()> {
        self.base.session_finished(duration)
    }

    fn render_line(&mut self, event: &RunEvent, status: &Status) -> Result<()> {
        self.base.render_line(event, status)
    }

    fn record(&mut self, status: Status, event: RunEvent) {
        self.base.record(status, event);
    }

    fn stats(&self) -> &Stats {
        self.base.stats()
    }

    fn verbosity(&self) -> Verbosity {
        self.base.verbosity()
    }

    fn terminal(&mut self) -> &mut dyn TerminalWrite {
        self.base.terminal()
    }
}
