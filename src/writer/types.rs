// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Output policies shared by all the reporters.

use std::str::FromStr;

use derive_more::{Display, From, Into};

/// Signed verbosity of an output.
///
/// Every `-v` raises it by one, every `-q` lowers it by one, so any
/// non-positive value means a terse progress-letter output.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct Verbosity(pub i16);

impl Verbosity {
    /// Computes [`Verbosity`] out of the `-v` and `-q` flag counts.
    #[must_use]
    pub fn from_counts(verbose: u8, quiet: u8) -> Self {
        Self(i16::from(verbose) - i16::from(quiet))
    }

    /// Indicates whether this [`Verbosity`] asks for a line per reported
    /// item instead of a progress letter.
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        self.0 > 0
    }
}

/// Possible policies of a [`console`] output coloring.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Coloring {
    /// Letting [`console::colors_enabled()`] to decide, whether output should
    /// be colored.
    #[default]
    Auto,

    /// Forcing of a colored output.
    Always,

    /// Forcing of a non-colored output.
    Never,
}

impl FromStr for Coloring {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err("possible options: auto, always, never"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_counts_quiet_down() {
        assert_eq!(Verbosity::from_counts(0, 0), Verbosity(0));
        assert_eq!(Verbosity::from_counts(2, 0), Verbosity(2));
        assert_eq!(Verbosity::from_counts(1, 2), Verbosity(-1));
    }

    #[test]
    fn only_positive_verbosity_is_verbose() {
        assert!(!Verbosity(-1).is_verbose());
        assert!(!Verbosity(0).is_verbose());
        assert!(Verbosity(1).is_verbose());
    }

    #[test]
    fn coloring_parses_case_insensitively() {
        assert_eq!("AUTO".parse::<Coloring>(), Ok(Coloring::Auto));
        assert_eq!("always".parse::<Coloring>(), Ok(Coloring::Always));
        assert_eq!("Never".parse::<Coloring>(), Ok(Coloring::Never));
        assert!("sometimes".parse::<Coloring>().is_err());
    }
}
