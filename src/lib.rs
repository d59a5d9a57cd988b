// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Advanced console reporter for behavior-driven test runs.
//!
//! Extends a baseline terminal [`Reporter`] with a detailed rendering of
//! executed scenarios: a passed one is output as its name with `PASSED`,
//! while a failed one is output with its feature, every step of it (marking
//! the first failed one) and a failure [`Trace`] shortened by internal
//! fixture-invocation frames.
//!
//! ```rust
//! use advanced_reporter::{
//!     writer::{Coloring, Verbosity, WritableString},
//!     Basic, Classifier, Config, Plugins, Session,
//! };
//!
//! let baseline =
//!     Basic::new(WritableString::default(), Coloring::Never, Verbosity(1));
//! let session = Session::new(
//!     Config::advanced(1),
//!     Classifier::new(),
//!     Plugins::new(baseline),
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     session.plugins().reporter_name(),
//!     Some(advanced_reporter::plugin::ADVANCED_REPORTER),
//! );
//! ```

#![deny(nonstandard_style, trivial_casts, trivial_numeric_casts)]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    rustdoc::all,
    unreachable_pub,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod cli;
pub mod error;
pub mod event;
pub mod plugin;
pub mod session;
pub mod status;
pub mod trace;
pub mod writer;

#[doc(inline)]
pub use self::{
    cli::Config,
    error::{Conflict, Error, Result},
    event::{Feature, Outcome, Phase, RunEvent, Scenario, Step},
    plugin::{install, Plugins},
    session::Session,
    status::{Classifier, ResolveStatus, Status},
    trace::{Trace, TraceEntry, TraceFilter, TraceSegment},
    writer::{Advanced, Basic, Ext as ReporterExt, Reporter},
};
