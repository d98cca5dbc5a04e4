use derive_more::Display;

use crate::number::{Delta, NumericToken};
use crate::render::{blank_literal, render_delta, RenderOptions};
use crate::token::{Token, TokenizedLine};

/// Why a line was emitted verbatim instead of diffed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PassthroughReason {
    /// Token layout differs between the two runs
    #[display(fmt = "StructureChanged")]
    StructureChanged,

    /// No line at this index in the previous snapshot
    #[display(fmt = "Unpaired")]
    Unpaired,
}

/// One span of a diffed line: current literal text, or a numeric field
/// replaced by its delta
#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Field {
        delta: Delta,
        prev: NumericToken,
        cur: NumericToken,
    },
}

#[derive(Debug, Clone)]
enum LineDiffKind {
    Diffed(Vec<Segment>),
    Passthrough {
        text: String,
        reason: PassthroughReason,
    },
}

/// The diff of one line against its predecessor at the same index
#[derive(Debug, Clone)]
pub struct LineDiff {
    kind: LineDiffKind,
}

impl LineDiff {
    /// Pair two tokenized lines. If the token structures match, numeric
    /// fields are differenced; otherwise the current line passes through
    /// unchanged.
    pub fn compute(prev: &TokenizedLine, cur: &TokenizedLine) -> Self {
        if prev.tokens().len() != cur.tokens().len() {
            return Self::passthrough(cur.raw(), PassthroughReason::StructureChanged);
        }

        let mut segments = Vec::with_capacity(cur.tokens().len());
        for (p, c) in prev.tokens().iter().zip(cur.tokens()) {
            match (p, c) {
                (Token::Literal(old), Token::Literal(new)) => {
                    // spacing shifts as digit counts change, so only the
                    // non-whitespace text has to agree
                    if old.split_whitespace().ne(new.split_whitespace()) {
                        return Self::passthrough(cur.raw(), PassthroughReason::StructureChanged);
                    }
                    segments.push(Segment::Literal(new.clone()));
                }
                (Token::Number(p), Token::Number(c)) => {
                    segments.push(Segment::Field {
                        delta: Delta::between(p.value(), c.value()),
                        prev: p.clone(),
                        cur: c.clone(),
                    });
                }
                _ => return Self::passthrough(cur.raw(), PassthroughReason::StructureChanged),
            }
        }

        Self {
            kind: LineDiffKind::Diffed(segments),
        }
    }

    /// A line emitted verbatim
    pub fn passthrough(text: &str, reason: PassthroughReason) -> Self {
        Self {
            kind: LineDiffKind::Passthrough {
                text: text.to_string(),
                reason,
            },
        }
    }

    /// Whether numeric fields were differenced
    pub fn is_diffed(&self) -> bool {
        matches!(self.kind, LineDiffKind::Diffed(_))
    }

    /// The pass-through reason, if the line was not diffed
    pub fn passthrough_reason(&self) -> Option<PassthroughReason> {
        match &self.kind {
            LineDiffKind::Passthrough { reason, .. } => Some(*reason),
            LineDiffKind::Diffed(_) => None,
        }
    }

    /// Whether the line was diffed and every delta is zero. Vacuously true
    /// for a diffed line with no numeric fields.
    pub fn all_zero(&self) -> bool {
        match &self.kind {
            LineDiffKind::Diffed(segments) => segments.iter().all(|s| match s {
                Segment::Literal(_) => true,
                Segment::Field { delta, .. } => delta.is_zero(),
            }),
            LineDiffKind::Passthrough { .. } => false,
        }
    }

    /// Render the line with deltas in place of numeric fields
    pub fn render(&self, opts: &RenderOptions) -> String {
        match &self.kind {
            LineDiffKind::Passthrough { text, .. } => text.clone(),
            LineDiffKind::Diffed(segments) => segments
                .iter()
                .map(|s| match s {
                    Segment::Literal(text) => text.clone(),
                    Segment::Field { delta, prev, cur } => render_delta(*delta, prev, cur, opts),
                })
                .collect(),
        }
    }

    /// Render the line with literal text blanked to whitespace, for printing
    /// deltas underneath the original output. `None` for pass-through lines.
    pub fn render_ghost(&self, opts: &RenderOptions) -> Option<String> {
        match &self.kind {
            LineDiffKind::Passthrough { .. } => None,
            LineDiffKind::Diffed(segments) => Some(
                segments
                    .iter()
                    .map(|s| match s {
                        Segment::Literal(text) => blank_literal(text),
                        Segment::Field { delta, prev, cur } => {
                            render_delta(*delta, prev, cur, opts)
                        }
                    })
                    .collect(),
            ),
        }
    }
}
