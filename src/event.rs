// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Events produced by a test engine and consumed by the reporters.
//!
//! The engine emits [`Session`] events in their happened-before order; every
//! executed phase of a test item is reported as a single [`RunEvent`].

mod scenario;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{error, trace::Trace, Error};

#[doc(inline)]
pub use self::scenario::{Feature, Scenario, Step};

/// Phase of a test item's execution a [`RunEvent`] is reported for.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Preparing the fixtures of a test item.
    Setup,

    /// Running the test item itself.
    #[default]
    Call,

    /// Tearing the fixtures of a test item down.
    Teardown,
}

/// Raw outcome of a [`Phase`], as decided by the test engine.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The [`Phase`] completed successfully.
    #[default]
    Passed,

    /// The [`Phase`] failed.
    Failed,

    /// The [`Phase`] was skipped.
    Skipped,
}

/// Outcome record of a single executed [`Phase`] of a test item.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct RunEvent {
    /// Identifier of the test item.
    id: String,

    /// Reported [`Phase`].
    #[serde(default)]
    phase: Phase,

    /// Raw [`Outcome`] of the [`Phase`].
    outcome: Outcome,

    /// Time the [`Phase`] took.
    #[serde(default)]
    duration: Duration,

    /// [`Scenario`] data, present only for behavior-driven test items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scenario: Option<Scenario>,

    /// Failure [`Trace`], present only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace: Option<Trace>,
}

impl RunEvent {
    /// Creates a new [`RunEvent`] without any [`Scenario`] data or [`Trace`].
    #[must_use]
    pub fn new(id: impl Into<String>, phase: Phase, outcome: Outcome) -> Self {
        Self {
            id: id.into(),
            phase,
            outcome,
            duration: Duration::ZERO,
            scenario: None,
            trace: None,
        }
    }

    /// Attaches [`Scenario`] data to this [`RunEvent`].
    #[must_use]
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Attaches a failure [`Trace`] to this [`RunEvent`].
    #[must_use]
    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Sets the time the reported [`Phase`] took.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Returns the identifier of the reported test item.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the reported [`Phase`].
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the raw [`Outcome`].
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the time the reported [`Phase`] took.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Indicates whether this [`RunEvent`] carries [`Scenario`] data.
    #[must_use]
    pub const fn has_scenario(&self) -> bool {
        self.scenario.is_some()
    }

    /// Returns the [`Scenario`] data of this [`RunEvent`].
    ///
    /// # Errors
    ///
    /// With [`Error::MissingScenarioData`] if [`RunEvent::has_scenario()`] is
    /// `false`.
    pub fn scenario(&self) -> error::Result<&Scenario> {
        self.scenario
            .as_ref()
            .ok_or_else(|| Error::missing_scenario(&self.id))
    }

    /// Returns the failure [`Trace`], if any.
    #[must_use]
    pub const fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    /// Returns mutable access to the failure [`Trace`], if any.
    #[must_use]
    pub fn trace_mut(&mut self) -> Option<&mut Trace> {
        self.trace.as_mut()
    }
}

/// Event of a test session, in the order a test engine emits them.
#[derive(Clone, Debug, PartialEq)]
pub enum Session {
    /// The session has started.
    Started,

    /// Test items have been collected.
    Collected {
        /// Number of collected items.
        count: usize,
    },

    /// A test item started executing.
    ItemStarted {
        /// Identifier of the test item.
        id: String,

        /// Path of the file the test item is defined in.
        location: String,
    },

    /// A [`Phase`] of a test item has been executed.
    Report(RunEvent),

    /// The session has finished.
    Finished {
        /// Total time the session took.
        duration: Duration,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_accessor_requires_scenario() {
        let ev =
            RunEvent::new("tests/a.rs::plain", Phase::Call, Outcome::Passed);

        assert!(!ev.has_scenario());
        assert!(matches!(
            ev.scenario(),
            Err(Error::MissingScenarioData { id }) if id == "tests/a.rs::plain",
        ));
    }

    #[test]
    fn scenario_accessor_returns_attached_data() {
        let scenario =
            Scenario::new("Login", "Login succeeds", Vec::<Step>::new());
        let ev = RunEvent::new("id", Phase::Call, Outcome::Failed)
            .with_scenario(scenario.clone());

        assert!(ev.has_scenario());
        assert_eq!(ev.scenario().unwrap(), &scenario);
    }

    #[test]
    fn deserializes_engine_payload() {
        let json = r#"{
            "id": "features/login.feature::Login succeeds",
            "phase": "call",
            "outcome": "failed",
            "scenario": {
                "name": "Login succeeds",
                "feature": {"name": "Login"},
                "steps": [{"keyword": "Given", "name": "a user"}]
            },
            "trace": {"chain": [{"entries": [{"lines": ["E   boom"]}]}]}
        }"#;

        let ev: RunEvent = serde_json::from_str(json).unwrap();

        assert_eq!(ev.phase(), Phase::Call);
        assert_eq!(ev.outcome(), Outcome::Failed);
        assert_eq!(ev.duration(), Duration::ZERO);
        assert_eq!(ev.scenario().unwrap().steps.len(), 1);
        assert_eq!(ev.trace().map(|t| t.chain.len()), Some(1));
    }
}
