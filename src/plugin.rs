// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Selection of the terminal [`Reporter`] at startup.
//!
//! [`Plugins`] is the explicit registry a host owns: it holds exactly one
//! named terminal [`Reporter`] and remembers whether a distributed-execution
//! coordinator is active. [`install()`] swaps the baseline [`Reporter`] for
//! an [`Advanced`] one extending it.

use std::{borrow::Cow, fmt};

use crate::{
    cli::Config,
    error::Conflict,
    writer::{Advanced, Basic, Reporter},
    Result,
};

/// Name the baseline terminal [`Reporter`] is registered under.
pub const TERMINAL_REPORTER: &str = "terminalreporter";

/// Name the [`Advanced`] [`Reporter`] is registered under.
pub const ADVANCED_REPORTER: &str = "advancedreporter";

/// Registry of the components active during a test session.
#[derive(Default)]
pub struct Plugins {
    /// Terminal [`Reporter`] with the name it's registered under.
    reporter: Option<(Cow<'static, str>, Box<dyn Reporter>)>,

    /// Name of the active distributed-execution coordinator.
    coordinator: Option<String>,
}

impl fmt::Debug for Plugins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugins")
            .field(
                "reporter",
                &self.reporter.as_ref().map(|(n, r)| (n, r.type_name())),
            )
            .field("coordinator", &self.coordinator)
            .finish()
    }
}

impl Plugins {
    /// Creates new [`Plugins`] with the given baseline `reporter` registered.
    #[must_use]
    pub fn new(reporter: impl Reporter + 'static) -> Self {
        let mut plugins = Self::default();
        _ = plugins.register(TERMINAL_REPORTER, Box::new(reporter));
        plugins
    }

    /// Marks the distributed-execution coordinator with the given `name` as
    /// active.
    #[must_use]
    pub fn with_coordinator(mut self, name: impl Into<String>) -> Self {
        self.coordinator = Some(name.into());
        self
    }

    /// Registers the given terminal `reporter` under the given `name`,
    /// returning the previously registered one.
    pub fn register(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        reporter: Box<dyn Reporter>,
    ) -> Option<Box<dyn Reporter>> {
        self.reporter
            .replace((name.into(), reporter))
            .map(|(_, old)| old)
    }

    /// Unregisters the terminal [`Reporter`], if any.
    pub fn unregister(&mut self) -> Option<Box<dyn Reporter>> {
        self.reporter.take().map(|(_, r)| r)
    }

    /// Returns the name of the registered terminal [`Reporter`].
    #[must_use]
    pub fn reporter_name(&self) -> Option<&str> {
        self.reporter.as_ref().map(|(name, _)| name.as_ref())
    }

    /// Returns the registered terminal [`Reporter`].
    #[must_use]
    pub fn reporter(&self) -> Option<&dyn Reporter> {
        self.reporter.as_ref().map(|(_, r)| &**r)
    }

    /// Returns the registered terminal [`Reporter`] for mutation.
    #[must_use]
    pub fn reporter_mut(&mut self) -> Option<&mut (dyn Reporter + 'static)> {
        self.reporter.as_mut().map(|(_, r)| &mut **r)
    }

    /// Returns the name of the active distributed-execution coordinator.
    #[must_use]
    pub fn coordinator(&self) -> Option<&str> {
        self.coordinator.as_deref()
    }
}

/// Replaces the baseline terminal [`Reporter`] with an [`Advanced`] one, if
/// enabled by the given [`Config`].
///
/// Without any registered terminal [`Reporter`], a [`Basic`] one outputting
/// to [`io::Stdout`] is extended.
///
/// Nothing is replaced unless every compatibility check passes.
///
/// # Errors
///
/// With [`Error::ReporterConflict`] if:
/// - a non-baseline terminal [`Reporter`] is registered already;
/// - a distributed-execution coordinator is active.
///
/// [`Error::ReporterConflict`]: crate::Error::ReporterConflict
/// [`io::Stdout`]: std::io::Stdout
pub fn install(config: &Config, plugins: &mut Plugins) -> Result<()> {
    if !config.advanced_reporter {
        return Ok(());
    }

    if let Some(current) = plugins.reporter().filter(|r| !r.is_baseline()) {
        return Err(Conflict::Reporter {
            type_name: current.type_name().to_owned(),
        }
        .into());
    }
    if let Some(name) = plugins.coordinator() {
        return Err(Conflict::Distributed { name: name.to_owned() }.into());
    }

    let base: Box<dyn Reporter> = match plugins.unregister() {
        Some(reporter) => reporter,
        None => Box::new(Basic::stdout(config)),
    };
    tracing::debug!(
        replaced = base.type_name(),
        name = ADVANCED_REPORTER,
        "installing advanced reporter",
    );
    _ = plugins.register(ADVANCED_REPORTER, Box::new(Advanced::new(base)));
    Ok(())
}
