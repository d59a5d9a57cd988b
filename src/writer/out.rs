// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for writing output.

use std::{borrow::Cow, io, str};

use console::Style;
use derive_more::{Deref, DerefMut, Display, From, Into};

use super::Coloring;

/// Width of a terminal line, used when the real one can't be detected.
pub const DEFAULT_WIDTH: usize = 80;

/// Color of a [`Markup`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Color {
    /// Successful outcomes.
    Green,

    /// Errors and failed outcomes.
    Red,

    /// Warnings and anything neither passed nor failed.
    Yellow,
}

/// Set of style flags to write some text with.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Markup {
    /// [`Color`] of the text, if any.
    pub color: Option<Color>,

    /// Whether the text is __bold__.
    pub bold: bool,

    /// Whether the text is dimmed.
    pub light: bool,
}

impl Markup {
    /// Plain text.
    pub const PLAIN: Self = Self { color: None, bold: false, light: false };

    /// Green text.
    pub const GREEN: Self = Self::PLAIN.color(Color::Green);

    /// Red text.
    pub const RED: Self = Self::PLAIN.color(Color::Red);

    /// Yellow text.
    pub const YELLOW: Self = Self::PLAIN.color(Color::Yellow);

    /// Dimmed text.
    pub const LIGHT: Self = Self { color: None, bold: false, light: true };

    /// __Bold__ text.
    pub const BOLD: Self = Self { color: None, bold: true, light: false };

    /// Returns this [`Markup`] with the given [`Color`].
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Returns this [`Markup`] made __bold__.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// [`Style`]s for terminal output.
#[derive(Clone, Debug)]
pub struct Styles {
    /// [`Style`] for rendering successful events.
    pub ok: Style,

    /// [`Style`] for rendering errors and failed events.
    pub err: Style,

    /// [`Style`] for rendering warnings and other events.
    pub warn: Style,

    /// [`Style`] for rendering dimmed text.
    pub light: Style,

    /// [`Style`] for rendering __bold__.
    pub bold: Style,

    /// Indicates whether the output should be colored.
    pub is_present: bool,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            ok: Style::new().green(),
            err: Style::new().red(),
            warn: Style::new().yellow(),
            light: Style::new().dim(),
            bold: Style::new().bold(),
            is_present: console::colors_enabled(),
        }
    }
}

impl Styles {
    /// Creates new [`Styles`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the given [`Coloring`] policy to these [`Styles`].
    pub fn apply_coloring(&mut self, color: Coloring) {
        self.is_present = match color {
            Coloring::Auto => console::colors_enabled(),
            Coloring::Always => true,
            Coloring::Never => false,
        };
    }

    /// Combines [`Styles`] into a single [`Style`] for the given [`Markup`].
    #[must_use]
    pub fn style(&self, markup: Markup) -> Style {
        let mut style = match markup.color {
            Some(Color::Green) => self.ok.clone(),
            Some(Color::Red) => self.err.clone(),
            Some(Color::Yellow) => self.warn.clone(),
            None => Style::new(),
        };
        if markup.bold {
            style = style.bold();
        }
        if markup.light {
            style = style.dim();
        }
        style
    }

    /// If coloring is enabled, styles `input` with the given [`Markup`] or
    /// leaves it "as is" otherwise.
    #[must_use]
    pub fn paint<'a>(
        &self,
        input: impl Into<Cow<'a, str>>,
        markup: Markup,
    ) -> Cow<'a, str> {
        let input = input.into();
        if self.is_present && markup != Markup::PLAIN {
            self.style(markup)
                .force_styling(true)
                .apply_to(input)
                .to_string()
                .into()
        } else {
            input
        }
    }
}

/// [`io::Write`] extension for easier manipulation with strings.
pub trait WriteStrExt: io::Write {
    /// Writes the given `string` into this writer.
    ///
    /// # Errors
    ///
    /// If this writer fails to write the given `string`.
    fn write_str(&mut self, string: impl AsRef<str>) -> io::Result<()> {
        self.write_all(string.as_ref().as_bytes())
    }
}

impl<T: io::Write + ?Sized> WriteStrExt for T {}

/// Terminal sink the reporters render into.
///
/// Object safe, so reporters may hand out their terminal without exposing
/// its concrete output type.
pub trait TerminalWrite {
    /// Writes the given raw `text`.
    ///
    /// # Errors
    ///
    /// If the underlying output fails.
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    /// Writes the given `text` styled with the given [`Markup`].
    ///
    /// # Errors
    ///
    /// If the underlying output fails.
    fn write_styled(&mut self, text: &str, markup: Markup) -> io::Result<()>;

    /// Writes a newline, unless the output is at the start of a line already.
    ///
    /// # Errors
    ///
    /// If the underlying output fails.
    fn ensure_newline(&mut self) -> io::Result<()>;

    /// Returns the width of a full terminal line.
    fn width(&self) -> usize {
        DEFAULT_WIDTH
    }

    /// Writes the given `text` followed by a newline.
    ///
    /// # Errors
    ///
    /// If the underlying output fails.
    fn line(&mut self, text: &str, markup: Markup) -> io::Result<()> {
        self.write_styled(text, markup)?;
        self.write_str("\n")
    }

    /// Writes a full-width separator line made of `sep_char`s with the
    /// optional `title` centered in it.
    ///
    /// # Errors
    ///
    /// If the underlying output fails.
    fn sep(
        &mut self,
        sep_char: &str,
        title: Option<&str>,
        markup: Markup,
    ) -> io::Result<()> {
        let line = separator(sep_char, title, self.width());
        self.ensure_newline()?;
        self.line(&line, markup)
    }
}

/// Builds a separator line of the given `width`.
fn separator(sep_char: &str, title: Option<&str>, width: usize) -> String {
    let sep_len = sep_char.chars().count().max(1);
    let mut line = if let Some(title) = title {
        let title_len = title.chars().count();
        let n = (width.saturating_sub(title_len + 2) / (2 * sep_len)).max(1);
        let fill = sep_char.repeat(n);
        format!("{fill} {title} {fill}")
    } else {
        sep_char.repeat(width / sep_len)
    };
    let tail = sep_char.trim_end();
    if line.chars().count() + tail.chars().count() <= width {
        line.push_str(tail);
    }
    line.truncate(line.trim_end().len());
    line
}

/// [`TerminalWrite`] implementation over any [`io::Write`] implementor
/// ([`io::Stdout`] by default).
#[derive(Clone, Debug, Deref, DerefMut)]
pub struct Terminal<Out: io::Write = io::Stdout> {
    /// [`io::Write`] implementor to write the output into.
    #[deref]
    #[deref_mut]
    output: Out,

    /// [`Styles`] for terminal output.
    styles: Styles,

    /// Whether the last written character was a newline.
    at_line_start: bool,

    /// Width of a full line.
    width: usize,
}

impl Terminal {
    /// Creates a new [`Terminal`] outputting to [`io::Stdout`].
    #[must_use]
    pub fn stdout(color: Coloring) -> Self {
        let width = console::Term::stdout()
            .size_checked()
            .map_or(DEFAULT_WIDTH, |(_, cols)| usize::from(cols));
        Self::new(io::stdout(), color).with_width(width)
    }
}

impl<Out: io::Write> Terminal<Out> {
    /// Creates a new [`Terminal`] outputting to the given `output`.
    #[must_use]
    pub fn new(output: Out, color: Coloring) -> Self {
        let mut styles = Styles::new();
        styles.apply_coloring(color);
        Self { output, styles, at_line_start: true, width: DEFAULT_WIDTH }
    }

    /// Overrides the width of a full line.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Unwraps this [`Terminal`] into its underlying output.
    #[must_use]
    pub fn into_inner(self) -> Out {
        self.output
    }
}

impl<Out: io::Write> TerminalWrite for Terminal<Out> {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.write_styled(text, Markup::PLAIN)
    }

    fn write_styled(&mut self, text: &str, markup: Markup) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let painted = self.styles.paint(text, markup);
        WriteStrExt::write_str(&mut self.output, painted)?;
        self.at_line_start = text.ends_with('\n');
        Ok(())
    }

    fn ensure_newline(&mut self) -> io::Result<()> {
        if self.at_line_start {
            Ok(())
        } else {
            TerminalWrite::write_str(self, "\n")
        }
    }

    fn width(&self) -> usize {
        self.width
    }
}

/// [`String`] wrapper implementing [`io::Write`].
#[derive(
    Clone,
    Debug,
    Default,
    Deref,
    DerefMut,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct WritableString(pub String);

impl io::Write for WritableString {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.push_str(
            str::from_utf8(buf)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
        );
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
