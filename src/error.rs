// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types of the reporter.
//!
//! None of these errors are retried: they signal either a static
//! misconfiguration or a logic fault of a collaborator.

use std::io;

use crate::Status;

/// Top-level error of all the reporter operations.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum Error {
    /// [`Scenario`] data was requested from a [`RunEvent`] not carrying any.
    ///
    /// [`RunEvent`]: crate::RunEvent
    /// [`Scenario`]: crate::Scenario
    #[display("Run event `{id}` carries no scenario data")]
    MissingScenarioData {
        /// Identifier of the offending [`RunEvent`].
        ///
        /// [`RunEvent`]: crate::RunEvent
        #[error(not(source))]
        id: String,
    },

    /// Another terminal reporter or a distributed-execution coordinator is
    /// active already.
    #[display("{_0}")]
    ReporterConflict(Conflict),

    /// Classification produced a [`Status`] the reporter has no rendering
    /// for.
    #[display("Unhandled status `{status}` for a scenario report")]
    UnhandledStatus {
        /// The unhandled [`Status`].
        #[error(not(source))]
        status: Status,
    },

    /// Writing to the terminal failed.
    #[display("Terminal output failed: {_0}")]
    Io(io::Error),
}

/// Component the advanced reporter cannot co-exist with.
#[derive(Clone, Debug, derive_more::Display, derive_more::Error, Eq, PartialEq)]
pub enum Conflict {
    /// Some non-baseline terminal reporter is active.
    #[display(
        "advanced-reporter is not compatible with any other terminal \
         reporter. You can use only one terminal reporter. Currently \
         '{type_name}' is used. Please decide to use one by deactivating \
         {type_name} or advanced-reporter."
    )]
    Reporter {
        /// Type name of the active reporter.
        #[error(not(source))]
        type_name: String,
    },

    /// A distributed-execution coordinator is active.
    #[display("advanced-reporter is not compatible with '{name}' plugin.")]
    Distributed {
        /// Name the coordinator is registered under.
        #[error(not(source))]
        name: String,
    },
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a [`Error::MissingScenarioData`] for the given event `id`.
    #[must_use]
    pub fn missing_scenario(id: impl Into<String>) -> Self {
        Self::MissingScenarioData { id: id.into() }
    }

    /// Indicates whether this is a configuration-time [`Conflict`].
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::ReporterConflict(_))
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<Conflict> for Error {
    fn from(conflict: Conflict) -> Self {
        Self::ReporterConflict(conflict)
    }
}
