//! Output sink for rendered diffs
//!
//! Writes each tick's block of lines, interleaved with timestamp headers
//! matching the original `--- <timestamp>` separator convention.

use std::io::{self, Write};

use snapshot_diff::{LineStatus, Snapshot, SnapshotDiff};

/// How blocks and lines are decorated on the way out
#[derive(Debug, Clone, Copy)]
pub struct PrinterOptions {
    /// Prefix every line with a timestamp
    pub timestamps: bool,

    /// Emit a separator line between refreshes
    pub separators: bool,

    /// Interleave the original output with ghost delta lines
    pub orig: bool,

    /// Suppress lines whose deltas are all zero
    pub skip_zeros: bool,
}

/// Writes rendered blocks to an output sink, one block per scheduling tick
pub struct Printer<W: Write> {
    out: W,
    opts: PrinterOptions,
    clock: fn() -> String,
    printed_block: bool,
    sep_pending: bool,
    sep_before_next_line: bool,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, opts: PrinterOptions) -> Self {
        Self {
            out,
            opts,
            clock: system_time,
            printed_block: false,
            sep_pending: false,
            sep_before_next_line: false,
        }
    }

    #[cfg(test)]
    fn with_clock(out: W, opts: PrinterOptions, clock: fn() -> String) -> Self {
        Self {
            out,
            opts,
            clock,
            printed_block: false,
            sep_pending: false,
            sep_before_next_line: false,
        }
    }

    /// Emit the very first snapshot unchanged; there is nothing to diff
    /// against yet.
    pub fn print_first(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.begin_block(snapshot.line_count());
        for line in snapshot.lines() {
            self.line(line.raw())?;
        }
        if snapshot.line_count() > 0 {
            self.printed_block = true;
        }
        self.sep_before_next_line = false;
        self.out.flush()
    }

    /// Emit one rendered diff block
    pub fn print_diff(&mut self, diff: &SnapshotDiff) -> io::Result<()> {
        self.begin_block(diff.lines.len());

        let mut printed = 0usize;
        for line in &diff.lines {
            let zero = line.status == LineStatus::AllZero;
            if self.opts.orig {
                self.line(&line.current)?;
                printed += 1;
                if let Some(ghost) = &line.ghost {
                    if !(self.opts.skip_zeros && zero) {
                        self.line(ghost)?;
                        printed += 1;
                    }
                }
            } else {
                if self.opts.skip_zeros && zero {
                    continue;
                }
                self.line(&line.rendered)?;
                printed += 1;
            }
        }

        if printed > 0 {
            self.printed_block = true;
            self.sep_pending = false;
        } else {
            // a fully suppressed refresh earns a separator before the next
            // line that does get printed
            self.sep_pending = true;
        }
        self.sep_before_next_line = false;
        self.out.flush()
    }

    /// Arm the separator for this block: only between blocks, and only when
    /// output is multi-line or a suppressed refresh left a gap. The
    /// separator is not written here; it attaches to the first line of the
    /// block that actually survives suppression.
    fn begin_block(&mut self, line_count: usize) {
        self.sep_before_next_line = self.opts.separators
            && self.printed_block
            && (line_count > 1 || self.sep_pending);
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        if self.sep_before_next_line {
            self.sep_before_next_line = false;
            if self.opts.timestamps {
                writeln!(self.out, "{}", (self.clock)())?;
            } else {
                writeln!(self.out, "--- {}", (self.clock)())?;
            }
        }
        if self.opts.timestamps {
            writeln!(self.out, "{}: {}", (self.clock)(), text)
        } else {
            writeln!(self.out, "{text}")
        }
    }
}

/// Locale-independent asctime-style timestamp
fn system_time() -> String {
    chrono::Local::now().format("%a %b %e %H:%M:%S %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapshot_diff::{diff_snapshots, RenderOptions, Snapshot};

    fn now() -> String {
        "NOW".to_string()
    }

    fn opts(timestamps: bool, separators: bool, orig: bool, skip_zeros: bool) -> PrinterOptions {
        PrinterOptions {
            timestamps,
            separators,
            orig,
            skip_zeros,
        }
    }

    fn diff(prev: &str, cur: &str) -> snapshot_diff::SnapshotDiff {
        diff_snapshots(
            &Snapshot::parse(prev),
            &Snapshot::parse(cur),
            &RenderOptions::default(),
        )
    }

    fn output(printer: Printer<Vec<u8>>) -> String {
        String::from_utf8(printer.out).unwrap()
    }

    #[test]
    fn test_single_line_stream() {
        let mut p = Printer::with_clock(Vec::new(), opts(false, false, false, false), now);

        p.print_first(&Snapshot::parse("hello 999\n")).unwrap();
        p.print_diff(&diff("hello 999\n", "hello 1000\n")).unwrap();
        p.print_diff(&diff("hello 1000\n", "hello 1000\n")).unwrap();
        p.print_diff(&diff("hello 1000\n", "hello 998\n")).unwrap();

        assert_eq!(
            output(p),
            "hello 999\nhello   +1\nhello   +0\nhello  -2\n"
        );
    }

    #[test]
    fn test_timestamps_prefix_every_line() {
        let mut p = Printer::with_clock(Vec::new(), opts(true, false, false, false), now);

        p.print_first(&Snapshot::parse("hello 999\n")).unwrap();
        p.print_diff(&diff("hello 999\n", "hello 1000\n")).unwrap();

        assert_eq!(output(p), "NOW: hello 999\nNOW: hello   +1\n");
    }

    #[test]
    fn test_separators_between_multiline_blocks() {
        let mut p = Printer::with_clock(Vec::new(), opts(false, true, false, false), now);

        p.print_first(&Snapshot::parse("a 1\nb 2\n")).unwrap();
        p.print_diff(&diff("a 1\nb 2\n", "a 2\nb 2\n")).unwrap();
        p.print_diff(&diff("a 2\nb 2\n", "a 3\nb 2\n")).unwrap();

        assert_eq!(
            output(p),
            "a 1\nb 2\n--- NOW\na +1\nb +0\n--- NOW\na +1\nb +0\n"
        );
    }

    #[test]
    fn test_no_separators_for_single_line_output() {
        let mut p = Printer::with_clock(Vec::new(), opts(false, true, false, false), now);

        p.print_first(&Snapshot::parse("hello 1\n")).unwrap();
        p.print_diff(&diff("hello 1\n", "hello 2\n")).unwrap();
        p.print_diff(&diff("hello 2\n", "hello 3\n")).unwrap();

        assert_eq!(output(p), "hello 1\nhello +1\nhello +1\n");
    }

    #[test]
    fn test_skip_zeros_single_line_gets_separator_after_gap() {
        let mut p = Printer::with_clock(Vec::new(), opts(false, true, false, true), now);

        p.print_first(&Snapshot::parse("hello 999\n")).unwrap();
        p.print_diff(&diff("hello 999\n", "hello 1000\n")).unwrap();
        p.print_diff(&diff("hello 1000\n", "hello 1000\n")).unwrap();
        p.print_diff(&diff("hello 1000\n", "hello 998\n")).unwrap();

        assert_eq!(
            output(p),
            "hello 999\nhello   +1\n--- NOW\nhello  -2\n"
        );
    }

    #[test]
    fn test_suppressed_multiline_block_prints_nothing() {
        // An unchanging multi-line output under skip-zeros must stay silent:
        // no dangling separator for refreshes that print no lines
        let mut p = Printer::with_clock(Vec::new(), opts(false, true, false, true), now);

        p.print_first(&Snapshot::parse("a 1\nb 2\n")).unwrap();
        p.print_diff(&diff("a 1\nb 2\n", "a 1\nb 2\n")).unwrap();
        p.print_diff(&diff("a 1\nb 2\n", "a 1\nb 2\n")).unwrap();
        // the next refresh that does print leads with a single separator
        p.print_diff(&diff("a 1\nb 2\n", "a 3\nb 2\n")).unwrap();

        assert_eq!(output(p), "a 1\nb 2\n--- NOW\na +2\n");
    }

    #[test]
    fn test_orig_interleaves_ghost_lines() {
        let mut p = Printer::with_clock(Vec::new(), opts(false, false, true, false), now);

        p.print_first(&Snapshot::parse("hello 999\n")).unwrap();
        p.print_diff(&diff("hello 999\n", "hello 1000\n")).unwrap();

        assert_eq!(output(p), "hello 999\nhello 1000\n        +1\n");
    }

    #[test]
    fn test_orig_with_skip_zeros_drops_only_the_ghost() {
        let mut p = Printer::with_clock(Vec::new(), opts(false, false, true, true), now);

        p.print_first(&Snapshot::parse("hello 999\n")).unwrap();
        p.print_diff(&diff("hello 999\n", "hello 999\n")).unwrap();

        assert_eq!(output(p), "hello 999\nhello 999\n");
    }

    #[test]
    fn test_skip_zeros_hides_unchanged_lines() {
        let mut p = Printer::with_clock(Vec::new(), opts(false, false, false, true), now);

        p.print_first(&Snapshot::parse("a 1\nb 2\n")).unwrap();
        p.print_diff(&diff("a 1\nb 2\n", "a 1\nb 5\n")).unwrap();

        assert_eq!(output(p), "a 1\nb 2\nb +3\n");
    }
}
