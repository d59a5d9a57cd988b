// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Bookkeeping of reported [`RunEvent`]s by their [`Status`].

use itertools::Itertools as _;
use linked_hash_map::LinkedHashMap;

use crate::{event::RunEvent, writer::Markup, Status};

/// Statuses listed first in a summary line, in this order.
static LEADING: [Status; 3] = [Status::Failed, Status::Passed, Status::Skipped];

/// Reported [`RunEvent`]s grouped by their [`Status`], in the order the
/// statuses were first seen.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    /// Recorded [`RunEvent`]s.
    reports: LinkedHashMap<Status, Vec<RunEvent>>,
}

impl Stats {
    /// Creates empty [`Stats`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the given [`RunEvent`] under the given [`Status`].
    pub fn record(&mut self, status: Status, event: RunEvent) {
        self.reports.entry(status).or_insert_with(Vec::new).push(event);
    }

    /// Returns the [`RunEvent`]s recorded under the given [`Status`].
    #[must_use]
    pub fn reports(&self, status: &Status) -> &[RunEvent] {
        self.reports.get(status).map_or(&[][..], Vec::as_slice)
    }

    /// Returns the number of [`RunEvent`]s recorded under the given
    /// [`Status`].
    #[must_use]
    pub fn count(&self, status: &Status) -> usize {
        self.reports(status).len()
    }

    /// Returns the total number of recorded [`RunEvent`]s.
    #[must_use]
    pub fn total(&self) -> usize {
        self.reports.values().map(Vec::len).sum()
    }

    /// Returns the counts of all recorded statuses, [`Status::Failed`],
    /// [`Status::Passed`] and [`Status::Skipped`] first.
    pub fn counts(&self) -> impl Iterator<Item = (&Status, usize)> + '_ {
        let leading = LEADING.iter().filter(|s| self.count(s) > 0);
        let others = self.reports.keys().filter(|s| !LEADING.contains(s));
        leading.chain(others).map(|s| (s, self.count(s)))
    }

    /// Formats the counts as `1 failed, 2 passed`.
    #[must_use]
    pub fn summary_line(&self) -> String {
        if self.total() == 0 {
            return "no tests ran".into();
        }
        self.counts()
            .map(|(status, n)| format!("{n} {status}"))
            .join(", ")
    }

    /// Returns the [`Markup`] a summary line is written with.
    #[must_use]
    pub fn markup(&self) -> Markup {
        if self.count(&Status::Failed) > 0 {
            Markup::RED
        } else if self.reports.keys().any(|s| !LEADING.contains(s)) {
            Markup::YELLOW
        } else if self.count(&Status::Passed) > 0 {
            Markup::GREEN
        } else {
            Markup::YELLOW
        }
    }
}
