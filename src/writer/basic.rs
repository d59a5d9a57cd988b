// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Baseline [`Reporter`] implementation.

use std::{io, time::Duration};

use crate::{
    cli::Cli,
    event::RunEvent,
    trace::Render as _,
    writer::{
        Coloring, Markup, Reporter, Stats, Terminal, TerminalWrite, Verbosity,
    },
    Result, Status,
};

/// Baseline [`Reporter`] outputting to an [`io::Write`] implementor
/// ([`io::Stdout`] by default).
///
/// Outputs a progress letter per reported item, or a line per item with
/// a positive [`Verbosity`], followed by a summary of failures and counts.
#[derive(Debug)]
pub struct Basic<Out: io::Write = io::Stdout> {
    /// Terminal to write the output into.
    terminal: Terminal<Out>,

    /// [`Verbosity`] of this [`Reporter`].
    verbosity: Verbosity,

    /// Reported items so far.
    stats: Stats,

    /// Prefix the current output line started with.
    current_prefix: Option<String>,
}

impl Basic {
    /// Creates a new [`Basic`] [`Reporter`] outputting to [`io::Stdout`]
    /// according to the given [`Cli`] options.
    #[must_use]
    pub fn stdout(cli: &Cli) -> Self {
        Self::with_terminal(Terminal::stdout(cli.color), cli.verbosity())
    }
}

impl<Out: io::Write> Basic<Out> {
    /// Creates a new [`Basic`] [`Reporter`] outputting to the given `output`.
    #[must_use]
    pub fn new(
        output: Out,
        color: Coloring,
        verbosity: Verbosity,
    ) -> Self {
        Self::with_terminal(Terminal::new(output, color), verbosity)
    }

    /// Creates a new [`Basic`] [`Reporter`] writing into the given
    /// [`Terminal`].
    #[must_use]
    pub fn with_terminal(
        terminal: Terminal<Out>,
        verbosity: Verbosity,
    ) -> Self {
        Self {
            terminal,
            verbosity,
            stats: Stats::new(),
            current_prefix: None,
        }
    }

    /// Unwraps this [`Basic`] [`Reporter`] into its underlying output.
    #[must_use]
    pub fn into_inner(self) -> Out {
        self.terminal.into_inner()
    }

    /// Makes sure the current output line starts with the given `prefix`.
    fn ensure_prefix(&mut self, prefix: &str) -> io::Result<()> {
        if self.current_prefix.as_deref() != Some(prefix) {
            self.terminal.ensure_newline()?;
            self.terminal.write_str(prefix)?;
            self.current_prefix = Some(prefix.to_owned());
        }
        Ok(())
    }

    /// Outputs every recorded failure with its [`Trace`].
    ///
    /// [`Trace`]: crate::Trace
    fn failures(&mut self) -> io::Result<()> {
        let failed = self.stats.reports(&Status::Failed);
        if failed.is_empty() {
            return Ok(());
        }
        let term = &mut self.terminal;
        term.sep("=", Some("FAILURES"), Markup::PLAIN)?;
        for ev in failed {
            term.sep("_", Some(ev.id()), Markup::RED.bold())?;
            if let Some(trace) = ev.trace() {
                term.line("", Markup::PLAIN)?;
                trace.render(term)?;
            }
        }
        Ok(())
    }

    /// Outputs a line per recorded failure with its crash message.
    fn short_summary(&mut self) -> io::Result<()> {
        let failed = self.stats.reports(&Status::Failed);
        if failed.is_empty() {
            return Ok(());
        }
        let term = &mut self.terminal;
        term.sep("=", Some("short test summary info"), Markup::PLAIN)?;
        for ev in failed {
            term.write_styled("FAILED", Markup::RED)?;
            term.write_str(&format!(" {}", ev.id()))?;
            if let Some(crash) = ev.trace().and_then(|t| t.crash()) {
                let message = crash.message.lines().next().unwrap_or_default();
                term.write_str(&format!(" - {message}"))?;
            }
            term.write_str("\n")?;
        }
        Ok(())
    }
}

/// Formats the session `duration` as `1.23s`, adding a human-readable form
/// for long sessions.
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if duration.as_secs() < 60 {
        format!("{secs:.2}s")
    } else {
        let rounded = Duration::from_secs(duration.as_secs());
        format!("{secs:.2}s ({})", humantime::format_duration(rounded))
    }
}

/// Returns the [`Markup`] a [`Status`] word is written with.
fn status_markup(status: &Status) -> Markup {
    match status {
        Status::Passed => Markup::GREEN,
        Status::Failed => Markup::RED,
        Status::Skipped | Status::Other(_) => Markup::YELLOW,
    }
}

impl<Out: io::Write> Reporter for Basic<Out> {
    fn session_started(&mut self) -> Result<()> {
        self.terminal.sep("=", Some("test session starts"), Markup::BOLD)?;
        Ok(())
    }

    fn collection_finished(&mut self, count: usize) -> Result<()> {
        let items = if count == 1 { "item" } else { "items" };
        self.terminal.ensure_newline()?;
        self.terminal
            .line(&format!("collected {count} {items}"), Markup::BOLD)?;
        self.terminal.line("", Markup::PLAIN)?;
        Ok(())
    }

    fn item_started(&mut self, id: &str, location: &str) -> Result<()> {
        if self.verbosity.is_verbose() {
            self.ensure_prefix(&format!("{id} "))?;
        } else {
            self.ensure_prefix(&format!("{location} "))?;
        }
        Ok(())
    }

    fn report(
        &mut self,
        event: RunEvent,
        status: Option<Status>,
    ) -> Result<()> {
        let Some(status) = status else {
            return Ok(());
        };
        self.render_line(&event, &status)?;
        self.record(status, event);
        Ok(())
    }

    fn session_finished(&mut self, duration: Duration) -> Result<()> {
        self.failures()?;
        self.short_summary()?;
        let line = format!(
            "{} in {}",
            self.stats.summary_line(),
            format_duration(duration),
        );
        let markup = self.stats.markup().bold();
        self.terminal.sep("=", Some(&line), markup)?;
        Ok(())
    }

    fn render_line(&mut self, event: &RunEvent, status: &Status) -> Result<()> {
        tracing::trace!(id = event.id(), %status, "rendering baseline line");
        let markup = status_markup(status);
        if self.verbosity.is_verbose() {
            self.terminal.write_styled(&status.word(), markup)?;
        } else {
            self.terminal.write_styled(status.letter(), markup)?;
        }
        Ok(())
    }

    fn record(&mut self, status: Status, event: RunEvent) {
        self.stats.record(status, event);
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }

    fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn terminal(&mut self) -> &mut dyn TerminalWrite {
        &mut self.terminal
    }

    fn is_baseline(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        event::{Outcome, Phase},
        trace::{FileLocation, Trace, TraceEntry, TraceSegment},
        writer::WritableString,
    };

    use super::*;

    fn basic(verbosity: i16) -> Basic<WritableString> {
        Basic::new(
            WritableString::default(),
            Coloring::Never,
            Verbosity(verbosity),
        )
    }

    fn passed(id: &str) -> RunEvent {
        RunEvent::new(id, Phase::Call, Outcome::Passed)
    }

    fn failed(id: &str) -> RunEvent {
        RunEvent::new(id, Phase::Call, Outcome::Failed).with_trace(Trace::new([
            TraceSegment::new([TraceEntry::new(["E   assert 1 == 2"])])
                .crashed_at(FileLocation {
                    path: "tests/a.rs".into(),
                    line: 7,
                    message: "assertion failed\nmore".into(),
                }),
        ]))
    }

    #[test]
    fn terse_output_writes_letters_once_per_file() {
        let mut r = basic(0);
        r.item_started("tests/a.rs::one", "tests/a.rs").unwrap();
        r.report(passed("tests/a.rs::one"), Some(Status::Passed)).unwrap();
        r.item_started("tests/a.rs::two", "tests/a.rs").unwrap();
        r.report(failed("tests/a.rs::two"), Some(Status::Failed)).unwrap();
        r.item_started("tests/b.rs::three", "tests/b.rs").unwrap();
        r.report(passed("tests/b.rs::three"), Some(Status::Skipped))
            .unwrap();

        assert_eq!(r.into_inner().0, "tests/a.rs .F\ntests/b.rs s");
    }

    #[test]
    fn verbose_output_writes_words() {
        let mut r = basic(1);
        r.item_started("tests/a.rs::one", "tests/a.rs").unwrap();
        r.report(passed("tests/a.rs::one"), Some(Status::Passed)).unwrap();
        r.item_started("tests/a.rs::two", "tests/a.rs").unwrap();
        r.report(failed("tests/a.rs::two"), Some(Status::Failed)).unwrap();

        assert_eq!(
            r.into_inner().0,
            "tests/a.rs::one PASSED\ntests/a.rs::two FAILED",
        );
    }

    #[test]
    fn unclassified_reports_are_neither_written_nor_recorded() {
        let mut r = basic(1);
        r.report(passed("tests/a.rs::one"), None).unwrap();

        assert_eq!(r.stats().total(), 0);
        assert_eq!(r.into_inner().0, "");
    }

    #[test]
    fn collection_line() {
        let mut r = basic(0);
        r.collection_finished(1).unwrap();
        r.collection_finished(3).unwrap();

        assert_eq!(
            r.into_inner().0,
            "collected 1 item\n\ncollected 3 items\n\n",
        );
    }

    #[test]
    fn summary_lists_failures() {
        let mut r = basic(0);
        r.terminal = Terminal::new(WritableString::default(), Coloring::Never)
            .with_width(40);
        r.report(passed("tests/a.rs::one"), Some(Status::Passed)).unwrap();
        r.report(failed("tests/a.rs::two"), Some(Status::Failed)).unwrap();
        r.session_finished(Duration::from_millis(1230)).unwrap();

        let out = r.into_inner().0;
        assert_eq!(
            out,
            ".F\n\
             =============== FAILURES ===============\n\
             ___________ tests/a.rs::two ____________\n\
             \n\
             E   assert 1 == 2\n\
             ======= short test summary info ========\n\
             FAILED tests/a.rs::two - assertion failed\n\
             ===== 1 failed, 1 passed in 1.23s ======\n",
        );
    }

    #[test]
    fn long_sessions_get_human_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "0.50s");
        assert_eq!(
            format_duration(Duration::from_secs(65)),
            "65.00s (1m 5s)",
        );
    }

    #[test]
    fn is_baseline() {
        assert!(basic(0).is_baseline());
        assert!(basic(0).type_name().contains("Basic"));
    }
}
