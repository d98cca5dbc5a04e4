use derive_more::Display;

use crate::line_diff::{LineDiff, PassthroughReason};
use crate::render::RenderOptions;
use crate::token::TokenizedLine;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One full captured output of the target command at one point in time
///
/// Immutable once captured. The scheduler retains exactly one snapshot
/// between ticks and passes it in as `prev` on the next diff.
#[derive(Debug, Clone)]
pub struct Snapshot {
    lines: Vec<TokenizedLine>,
}

impl Snapshot {
    /// Capture a snapshot from raw command output
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(TokenizedLine::parse).collect(),
        }
    }

    /// The tokenized lines of this snapshot, in output order
    pub fn lines(&self) -> &[TokenizedLine] {
        &self.lines
    }

    /// Number of lines captured
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// How one output line of a snapshot diff was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LineStatus {
    /// Numeric fields were differenced and at least one delta is nonzero
    #[display(fmt = "Changed")]
    Changed,

    /// Differenced, but every delta is zero (includes lines with no numbers)
    #[display(fmt = "AllZero")]
    AllZero,

    /// Token structure changed between runs; current line emitted verbatim
    #[display(fmt = "StructureChanged")]
    StructureChanged,

    /// No line at this index in the previous snapshot
    #[display(fmt = "Unpaired")]
    Unpaired,
}

/// One rendered line of a snapshot diff
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffedLine {
    /// The current line, verbatim
    pub current: String,

    /// The line with numeric fields replaced by deltas (equals `current`
    /// for pass-through lines)
    pub rendered: String,

    /// The delta line with literal text blanked, for interleaved output.
    /// `None` for pass-through lines.
    pub ghost: Option<String>,

    /// How this line was produced
    pub status: LineStatus,
}

/// The rendered diff of two successive snapshots
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SnapshotDiff {
    /// One entry per line of the current snapshot
    pub lines: Vec<DiffedLine>,

    /// Line count of the previous snapshot
    pub prev_line_count: usize,

    /// Line count of the current snapshot
    pub cur_line_count: usize,
}

impl SnapshotDiff {
    /// Whether the command's output grew or shrank between the two runs
    pub fn line_count_changed(&self) -> bool {
        self.prev_line_count != self.cur_line_count
    }

    /// The rendered lines joined into one text block
    pub fn text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.rendered);
            out.push('\n');
        }
        out
    }
}

/// Diff two successive snapshots, pairing lines strictly by index.
///
/// Lines of the current snapshot without a previous counterpart pass through
/// unchanged; surplus previous lines contribute nothing. A line-count change
/// is reported on the result, never treated as an error.
pub fn diff_snapshots(prev: &Snapshot, cur: &Snapshot, opts: &RenderOptions) -> SnapshotDiff {
    let mut lines = Vec::with_capacity(cur.line_count());

    for (i, cur_line) in cur.lines().iter().enumerate() {
        let diff = match prev.lines().get(i) {
            Some(prev_line) => LineDiff::compute(prev_line, cur_line),
            None => LineDiff::passthrough(cur_line.raw(), PassthroughReason::Unpaired),
        };

        let status = if diff.is_diffed() {
            if diff.all_zero() {
                LineStatus::AllZero
            } else {
                LineStatus::Changed
            }
        } else {
            match diff.passthrough_reason() {
                Some(PassthroughReason::Unpaired) => LineStatus::Unpaired,
                _ => LineStatus::StructureChanged,
            }
        };

        lines.push(DiffedLine {
            current: cur_line.raw().to_string(),
            rendered: diff.render(opts),
            ghost: diff.render_ghost(opts),
            status,
        });
    }

    SnapshotDiff {
        lines,
        prev_line_count: prev.line_count(),
        cur_line_count: cur.line_count(),
    }
}
