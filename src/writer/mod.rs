// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Terminal reporters of test session events.
//!
//! [`Basic`] is the baseline reporter. [`Advanced`] extends any [`Reporter`]
//! with a detailed rendering of behavior-driven scenarios, delegating
//! everything else to the [`Reporter`] it wraps.

pub mod advanced;
pub mod basic;
pub mod out;
pub mod stats;
pub mod types;

use std::{any, time::Duration};

use sealed::sealed;

use crate::{event::RunEvent, Result, Status};

#[doc(inline)]
pub use self::{
    advanced::Advanced,
    basic::Basic,
    out::{Color, Markup, Styles, Terminal, TerminalWrite, WritableString},
    stats::Stats,
    types::{Coloring, Verbosity},
};

/// Terminal reporter of a test session.
///
/// The lifecycle hooks are called by a host in the order its test engine
/// emits the corresponding [`event::Session`]s. The rest are capabilities
/// extending reporters build upon.
///
/// [`event::Session`]: crate::event::Session
pub trait Reporter {
    /// Handles the start of a test session.
    ///
    /// # Errors
    ///
    /// If the terminal fails to be written.
    fn session_started(&mut self) -> Result<()>;

    /// Handles the end of test items collection.
    ///
    /// # Errors
    ///
    /// If the terminal fails to be written.
    fn collection_finished(&mut self, count: usize) -> Result<()>;

    /// Handles the start of a test item located in the given file.
    ///
    /// # Errors
    ///
    /// If the terminal fails to be written.
    fn item_started(&mut self, id: &str, location: &str) -> Result<()>;

    /// Handles an executed [`RunEvent`] with its classified [`Status`].
    ///
    /// [`None`] [`Status`] means there is nothing to report.
    ///
    /// # Errors
    ///
    /// If the terminal fails to be written, or the [`Status`] can't be
    /// rendered.
    fn report(&mut self, event: RunEvent, status: Option<Status>)
        -> Result<()>;

    /// Handles the end of a test session, outputting its summary.
    ///
    /// # Errors
    ///
    /// If the terminal fails to be written.
    fn session_finished(&mut self, duration: Duration) -> Result<()>;

    /// Renders the given [`RunEvent`] as a progress letter or a status word,
    /// depending on the [`Verbosity`].
    ///
    /// # Errors
    ///
    /// If the terminal fails to be written.
    fn render_line(&mut self, event: &RunEvent, status: &Status) -> Result<()>;

    /// Records the given [`RunEvent`] for the session summary.
    fn record(&mut self, status: Status, event: RunEvent);

    /// Returns the recorded [`Stats`].
    fn stats(&self) -> &Stats;

    /// Returns the [`Verbosity`] of this [`Reporter`].
    fn verbosity(&self) -> Verbosity;

    /// Returns the terminal this [`Reporter`] writes into.
    fn terminal(&mut self) -> &mut dyn TerminalWrite;

    /// Indicates whether this [`Reporter`] is the baseline one, which may be
    /// extended.
    fn is_baseline(&self) -> bool {
        false
    }

    /// Returns the name of this [`Reporter`]'s type.
    fn type_name(&self) -> &'static str {
        any::type_name::<Self>()
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn session_started(&mut self) -> Result<()> {
        (**self).session_started()
    }

    fn collection_finished(&mut self, count: usize) -> Result<()> {
        (**self).collection_finished(count)
    }

    fn item_started(&mut self, id: &str, location: &str) -> Result<()> {
        (**self).item_started(id, location)
    }

    fn report(
        &mut self,
        event: RunEvent,
        status: Option<Status>,
    ) -> Result<()> {
        (**self).report(event, status)
    }

    fn session_finished(&mut self, duration: Duration) -> Result<()> {
        (**self).session_finished(duration)
    }

    fn render_line(&mut self, event: &RunEvent, status: &Status) -> Result<()> {
        (**self).render_line(event, status)
    }

    fn record(&mut self, status: Status, event: RunEvent) {
        (**self).record(status, event);
    }

    fn stats(&self) -> &Stats {
        (**self).stats()
    }

    fn verbosity(&self) -> Verbosity {
        (**self).verbosity()
    }

    fn terminal(&mut self) -> &mut dyn TerminalWrite {
        (**self).terminal()
    }

    fn is_baseline(&self) -> bool {
        (**self).is_baseline()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

/// Extension of [`Reporter`] allowing its wrapping.
#[sealed]
pub trait Ext: Reporter + Sized {
    /// Wraps this [`Reporter`] into an [`Advanced`] one.
    #[must_use]
    fn advanced(self) -> Advanced<Self>;
}

#[sealed]
impl<T: Reporter> Ext for T {
    fn advanced(self) -> Advanced<Self> {
        Advanced::new(self)
    }
}
