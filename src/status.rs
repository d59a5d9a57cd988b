// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Classification of [`RunEvent`]s into reportable [`Status`]es.

use std::{borrow::Cow, fmt};

use derive_more::Display;

use crate::{
    cli::Config,
    event::{Outcome, Phase, RunEvent},
};

/// Canonical status of a reported [`RunEvent`].
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
pub enum Status {
    /// The test item passed.
    #[display("passed")]
    Passed,

    /// The test item failed.
    #[display("failed")]
    Failed,

    /// The test item was skipped.
    #[display("skipped")]
    Skipped,

    /// Any other status some [`ResolveStatus`] defines.
    #[display("{_0}")]
    Other(Cow<'static, str>),
}

impl Status {
    /// Returns the progress letter of this [`Status`] for terse output.
    #[must_use]
    pub fn letter(&self) -> &str {
        match self {
            Self::Passed => ".",
            Self::Failed => "F",
            Self::Skipped => "s",
            Self::Other(_) => "?",
        }
    }

    /// Returns the word of this [`Status`] for verbose output.
    #[must_use]
    pub fn word(&self) -> Cow<'static, str> {
        match self {
            Self::Passed => "PASSED".into(),
            Self::Failed => "FAILED".into(),
            Self::Skipped => "SKIPPED".into(),
            Self::Other(name) => name.to_uppercase().into(),
        }
    }
}

/// Strategy resolving the [`Status`] of a [`RunEvent`].
///
/// Returning [`None`] leaves the decision to the next [`ResolveStatus`] in a
/// [`Classifier`].
pub trait ResolveStatus {
    /// Resolves the [`Status`] of the given [`RunEvent`], if known.
    fn resolve(&self, event: &RunEvent, config: &Config) -> Option<Status>;
}

impl<F> ResolveStatus for F
where
    F: Fn(&RunEvent, &Config) -> Option<Status>,
{
    fn resolve(&self, event: &RunEvent, config: &Config) -> Option<Status> {
        self(event, config)
    }
}

/// [`ResolveStatus`] mapping raw [`Outcome`]s, consulted last by a
/// [`Classifier`].
///
/// A passed [`Phase::Setup`] or [`Phase::Teardown`] has nothing to report.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinResolver;

impl ResolveStatus for BuiltinResolver {
    fn resolve(&self, event: &RunEvent, _: &Config) -> Option<Status> {
        match (event.outcome(), event.phase()) {
            (Outcome::Passed, Phase::Call) => Some(Status::Passed),
            (Outcome::Passed, Phase::Setup | Phase::Teardown) => None,
            (Outcome::Failed, _) => Some(Status::Failed),
            (Outcome::Skipped, _) => Some(Status::Skipped),
        }
    }
}

/// Ordered set of [`ResolveStatus`] strategies, taking the first defined
/// result.
pub struct Classifier {
    /// Strategies in their registration order.
    resolvers: Vec<Box<dyn ResolveStatus>>,

    /// Strategy consulted after all the registered ones.
    fallback: Option<Box<dyn ResolveStatus>>,
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("resolvers", &self.resolvers.len())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            resolvers: Vec::new(),
            fallback: Some(Box::new(BuiltinResolver)),
        }
    }
}

impl Classifier {
    /// Creates a new [`Classifier`] falling back to the [`BuiltinResolver`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`Classifier`] without any strategy, not even the
    /// [`BuiltinResolver`].
    #[must_use]
    pub fn empty() -> Self {
        Self { resolvers: Vec::new(), fallback: None }
    }

    /// Registers the given `resolver` after the already registered ones, but
    /// before the fallback.
    #[must_use]
    pub fn with(mut self, resolver: impl ResolveStatus + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Classifies the given [`RunEvent`].
    ///
    /// [`None`] means there is nothing to report about it.
    #[must_use]
    pub fn classify(
        &self,
        event: &RunEvent,
        config: &Config,
    ) -> Option<Status> {
        self.resolvers
            .iter()
            .chain(&self.fallback)
            .find_map(|r| r.resolve(event, config))
    }
}
