// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Host-side driver feeding a test session's events to its reporter.

use crate::{
    cli::Config,
    event,
    plugin::{self, Plugins},
    status::Classifier,
    Result,
};

/// Test session as seen by its terminal [`Reporter`].
///
/// Classifies every reported [`RunEvent`] exactly once and dispatches the
/// [`event::Session`]s to the [`Reporter`] registered in its [`Plugins`],
/// in the order they are handled.
///
/// [`Reporter`]: crate::Reporter
/// [`RunEvent`]: crate::RunEvent
#[derive(Debug)]
pub struct Session {
    /// Configuration of this [`Session`].
    config: Config,

    /// Classifier of the reported [`RunEvent`]s.
    ///
    /// [`RunEvent`]: crate::RunEvent
    classifier: Classifier,

    /// Active components.
    plugins: Plugins,
}

impl Session {
    /// Creates a new [`Session`], installing the advanced reporter into the
    /// given [`Plugins`] if the [`Config`] enables it.
    ///
    /// # Errors
    ///
    /// If the advanced reporter conflicts with the given [`Plugins`].
    pub fn new(
        config: Config,
        classifier: Classifier,
        mut plugins: Plugins,
    ) -> Result<Self> {
        plugin::install(&config, &mut plugins)?;
        Ok(Self { config, classifier, plugins })
    }

    /// Returns the [`Config`] of this [`Session`].
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the active [`Plugins`].
    #[must_use]
    pub const fn plugins(&self) -> &Plugins {
        &self.plugins
    }

    /// Unwraps this [`Session`] into its [`Plugins`].
    #[must_use]
    pub fn into_plugins(self) -> Plugins {
        self.plugins
    }

    /// Dispatches the given [`event::Session`] to the registered
    /// [`Reporter`], if any.
    ///
    /// # Errors
    ///
    /// If the [`Reporter`] fails.
    ///
    /// [`Reporter`]: crate::Reporter
    pub fn handle(&mut self, ev: event::Session) -> Result<()> {
        let Some(reporter) = self.plugins.reporter_mut() else {
            return Ok(());
        };
        match ev {
            event::Session::Started => reporter.session_started(),
            event::Session::Collected { count } => {
                reporter.collection_finished(count)
            }
            event::Session::ItemStarted { id, location } => {
                reporter.item_started(&id, &location)
            }
            event::Session::Report(run) => {
                let status = self.classifier.classify(&run, &self.config);
                reporter.report(run, status)
            }
            event::Session::Finished { duration } => {
                reporter.session_finished(duration)
            }
        }
    }

    /// Dispatches all the given [`event::Session`]s in order, stopping at the
    /// first failure.
    ///
    /// # Errors
    ///
    /// If the [`Reporter`] fails.
    ///
    /// [`Reporter`]: crate::Reporter
    pub fn run(
        &mut self,
        events: impl IntoIterator<Item = event::Session>,
    ) -> Result<()> {
        events.into_iter().try_for_each(|ev| self.handle(ev))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        io,
        rc::Rc,
        time::Duration,
    };

    use crate::{
        event::{Outcome, Phase, RunEvent, Scenario, Step},
        plugin::{ADVANCED_REPORTER, TERMINAL_REPORTER},
        writer::{Basic, Coloring, Verbosity},
        Error, Status,
    };

    use super::*;

    /// Output shared between a test and a boxed reporter.
    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<Vec<u8>>>);

    impl Shared {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl io::Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            io::Write::write(&mut *self.0.borrow_mut(), buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn plugins(out: &Shared) -> Plugins {
        Plugins::new(Basic::new(out.clone(), Coloring::Never, Verbosity(1)))
    }

    fn scenario_event(phase: Phase, outcome: Outcome) -> RunEvent {
        RunEvent::new("tests/login.rs::login", phase, outcome).with_scenario(
            Scenario::new(
                "Login",
                "Login succeeds",
                [Step::new("Given", "a user", false)],
            ),
        )
    }

    #[test]
    fn installs_advanced_reporter_on_creation() {
        let out = Shared::default();
        let session =
            Session::new(Config::advanced(1), Classifier::new(), plugins(&out))
                .unwrap();

        assert_eq!(session.plugins().reporter_name(), Some(ADVANCED_REPORTER));
    }

    #[test]
    fn keeps_baseline_reporter_when_disabled() {
        let out = Shared::default();
        let session =
            Session::new(Config::default(), Classifier::new(), plugins(&out))
                .unwrap();

        assert_eq!(session.plugins().reporter_name(), Some(TERMINAL_REPORTER));
    }

    #[test]
    fn surfaces_installation_conflicts() {
        let out = Shared::default();
        let err = Session::new(
            Config::advanced(1),
            Classifier::new(),
            plugins(&out).with_coordinator("dsession"),
        )
        .unwrap_err();

        assert!(matches!(err, Error::ReporterConflict(_)));
    }

    #[test]
    fn dispatches_events_in_order() {
        let out = Shared::default();
        let mut session =
            Session::new(Config::advanced(1), Classifier::new(), plugins(&out))
                .unwrap();

        session
            .run([
                event::Session::ItemStarted {
                    id: "tests/login.rs::login".into(),
                    location: "tests/login.rs".into(),
                },
                event::Session::Report(scenario_event(
                    Phase::Setup,
                    Outcome::Passed,
                )),
                event::Session::Report(scenario_event(
                    Phase::Call,
                    Outcome::Passed,
                )),
                event::Session::Report(scenario_event(
                    Phase::Teardown,
                    Outcome::Passed,
                )),
            ])
            .unwrap();

        assert_eq!(
            out.contents(),
            "tests/login.rs::login : Login succeeds PASSED",
        );
        let stats = session.plugins().reporter().unwrap().stats();
        assert_eq!(stats.count(&Status::Passed), 1);
        assert_eq!(stats.total(), 1);
    }

    #[test]
    fn classifies_every_report_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let classifier = Classifier::new().with(
            move |_: &RunEvent, _: &Config| -> Option<Status> {
                counter.set(counter.get() + 1);
                None
            },
        );
        let out = Shared::default();
        let mut session =
            Session::new(Config::advanced(1), classifier, plugins(&out))
                .unwrap();

        session
            .run([
                event::Session::Report(scenario_event(
                    Phase::Call,
                    Outcome::Passed,
                )),
                event::Session::Report(scenario_event(
                    Phase::Call,
                    Outcome::Failed,
                )),
            ])
            .unwrap();

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn without_reporter_events_are_ignored() {
        let mut session = Session::new(
            Config::default(),
            Classifier::new(),
            Plugins::default(),
        )
        .unwrap();

        session
            .run([
                event::Session::Started,
                event::Session::Collected { count: 1 },
                event::Session::Finished { duration: Duration::ZERO },
            ])
            .unwrap();

        assert!(session.into_plugins().reporter().is_none());
    }
}
