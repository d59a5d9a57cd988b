use std::{
    io,
    panic::{self, AssertUnwindSafe},
};

use advanced_reporter::{
    trace::Render as _,
    writer::{Coloring, Markup, Terminal, TerminalWrite, WritableString},
    Trace, TraceEntry, TraceFilter, TraceSegment,
};
use rand::{rngs::StdRng, Rng as _, SeedableRng as _};

#[test]
fn restores_marked_segments_only() {
    let mut trace = Trace::new([
        TraceSegment::new([fixture_frame(0), user_frame(0)])
            .described("During handling of the above exception:"),
        TraceSegment::new([user_frame(1), fixture_frame(1)])
            .described("The above exception was the direct cause of:"),
        TraceSegment::new([fixture_frame(2), user_frame(2), user_frame(3)]),
    ]);
    let original = trace.clone();

    {
        let elided = TraceFilter::default().elide(&mut trace);
        assert_eq!(elided.count(), 2);
        assert_eq!(elided.chain[0].entries, [user_frame(0)]);
        assert_eq!(elided.chain[1], original.chain[1]);
        assert_eq!(elided.chain[2].entries, [user_frame(2), user_frame(3)]);
    }

    assert_eq!(trace, original);
    assert_eq!(trace.chain[0].entries[0], fixture_frame(0));
    assert_eq!(trace.chain[2].entries[0], fixture_frame(2));
}

#[test]
fn rendering_skips_only_leading_fixture_frames() {
    let mut trace = Trace::new([
        TraceSegment::new([fixture_frame(0), user_frame(0)]),
        TraceSegment::new([user_frame(1), fixture_frame(1)]),
    ]);
    let mut term = Terminal::new(WritableString::default(), Coloring::Never);

    TraceFilter::default().render_trace(&mut trace, &mut term).unwrap();

    let out = term.into_inner().0;
    assert!(!out.contains("fixture 0"), "{out}");
    assert!(out.contains("fixture 1"), "{out}");
    assert!(out.contains("def step_0():"), "{out}");
    assert!(out.contains("def step_1():"), "{out}");
}

#[test]
fn random_traces_are_restored() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..200 {
        let mut trace = random_trace(&mut rng);
        let original = trace.clone();
        let mut term =
            Terminal::new(WritableString::default(), Coloring::Never);

        TraceFilter::default().render_trace(&mut trace, &mut term).unwrap();

        assert_eq!(trace, original);
    }
}

#[test]
fn restored_after_failed_write() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let mut trace = random_trace(&mut rng);
        let original = trace.clone();
        let mut out = Failing { writes_left: rng.gen_range(0..10) };

        let res = TraceFilter::default().render_trace(&mut trace, &mut out);

        if let Err(e) = res {
            assert_eq!(e.kind(), io::ErrorKind::Other);
        }
        assert_eq!(trace, original);
    }
}

#[test]
fn restored_after_panic() {
    let mut trace = Trace::new([
        TraceSegment::new([fixture_frame(0), user_frame(0)]),
        TraceSegment::new([user_frame(1)]),
        TraceSegment::new([fixture_frame(2)]),
    ]);
    let original = trace.clone();

    let res = panic::catch_unwind(AssertUnwindSafe(|| {
        let elided = TraceFilter::default().elide(&mut trace);
        elided.render(&mut Panicking).unwrap();
    }));

    assert!(res.is_err());
    assert_eq!(trace, original);
}

fn fixture_frame(n: usize) -> TraceEntry {
    TraceEntry::new([
        "    def call_fixture_func(fixturefunc, request, kwargs):".to_owned(),
        format!(">       res = fixturefunc(**kwargs)  # fixture {n}"),
    ])
}

fn user_frame(n: usize) -> TraceEntry {
    TraceEntry::new([format!("    def step_{n}():"), "E   boom".into()])
        .at("tests/steps.rs", 10, "boom")
}

fn random_trace(rng: &mut StdRng) -> Trace {
    Trace::new((0..rng.gen_range(0..6)).map(|s| {
        TraceSegment::new((0..rng.gen_range(0..4)).map(|n| {
            if rng.gen_bool(0.4) {
                fixture_frame(s * 10 + n)
            } else {
                user_frame(s * 10 + n)
            }
        }))
    }))
}

/// [`TerminalWrite`] failing after the given number of writes.
struct Failing {
    writes_left: usize,
}

impl Failing {
    fn tick(&mut self) -> io::Result<()> {
        if self.writes_left == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "terminal gone"));
        }
        self.writes_left -= 1;
        Ok(())
    }
}

impl TerminalWrite for Failing {
    fn write_str(&mut self, _: &str) -> io::Result<()> {
        self.tick()
    }

    fn write_styled(&mut self, _: &str, _: Markup) -> io::Result<()> {
        self.tick()
    }

    fn ensure_newline(&mut self) -> io::Result<()> {
        self.tick()
    }
}

/// [`TerminalWrite`] panicking on any write.
struct Panicking;

impl TerminalWrite for Panicking {
    fn write_str(&mut self, _: &str) -> io::Result<()> {
        panic!("terminal crashed")
    }

    fn write_styled(&mut self, _: &str, _: Markup) -> io::Result<()> {
        panic!("terminal crashed")
    }

    fn ensure_newline(&mut self) -> io::Result<()> {
        panic!("terminal crashed")
    }
}
