// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration options of the reporter.
//!
//! [`Cli`] is meant to be flattened into the CLI of a host test engine, while
//! [`Config`] is the parsed configuration handed down to status resolvers and
//! to the reporter installation.

use derive_more::{Deref, DerefMut};
use smart_default::SmartDefault;

use crate::writer::{Coloring, Verbosity};

pub use clap::{Args, Parser};

/// "terminal reporting" CLI options.
#[derive(Args, Clone, Copy, Debug, SmartDefault)]
#[command(next_help_heading = "terminal reporting")]
pub struct Cli {
    /// Enable advanced output.
    #[arg(long = "advanced-reporter", global = true)]
    pub advanced_reporter: bool,

    /// Increase verbosity.
    ///
    /// Scenarios are rendered in detail only with a positive verbosity.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease verbosity.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Coloring policy for a console output.
    #[arg(
        long,
        value_name = "auto|always|never",
        default_value = "auto",
        global = true
    )]
    #[default(Coloring::Auto)]
    pub color: Coloring,
}

impl Cli {
    /// Returns the [`Verbosity`] these options imply.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_counts(self.verbose, self.quiet)
    }
}

/// Parsed configuration of a test run.
#[derive(Clone, Copy, Debug, Default, Deref, DerefMut, Parser)]
#[command(
    name = "advanced-reporter",
    about = "Advanced console output of behavior-driven test runs"
)]
pub struct Config {
    /// Terminal reporting options.
    #[command(flatten)]
    pub reporting: Cli,
}

impl Config {
    /// Creates a [`Config`] with the advanced reporter enabled and the given
    /// `verbose` count.
    #[must_use]
    pub fn advanced(verbose: u8) -> Self {
        Self {
            reporting: Cli {
                advanced_reporter: true,
                verbose,
                ..Cli::default()
            },
        }
    }
}
