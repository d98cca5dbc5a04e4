// Core snapshot diffing library for delta
// Tokenizes command output, differences the numeric fields of two successive
// snapshots, and re-renders the output with per-field deltas.

mod line_diff;
mod number;
mod render;
mod snapshot_diff;
mod token;

pub use line_diff::{LineDiff, PassthroughReason};
pub use number::{Delta, NumericToken, NumericValue};
pub use render::{blank_literal, render_delta, RenderOptions};
pub use snapshot_diff::{diff_snapshots, DiffedLine, LineStatus, Snapshot, SnapshotDiff};
pub use token::{Token, TokenizedLine};
