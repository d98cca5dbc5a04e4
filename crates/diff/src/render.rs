use colored::Colorize;

use crate::number::{Delta, NumericToken};

/// Options controlling how deltas are rendered
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Widen narrow fields so the sign fits without shifting columns
    pub flex: bool,

    /// Colorize positive deltas green and negative deltas red
    pub colors: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            flex: true,
            colors: false,
        }
    }
}

/// Format a delta in the notation family of the field it replaces: explicit
/// leading sign, integer or fixed-point magnitude, padded to the original
/// field width so columns stay visually stable across refreshes.
pub fn render_delta(
    delta: Delta,
    prev: &NumericToken,
    cur: &NumericToken,
    opts: &RenderOptions,
) -> String {
    let mut width = cur.width();
    let text = match delta {
        Delta::Int(v) => {
            if opts.flex && !cur.is_glued() {
                // room for a sign plus one digit
                width = width.max(2);
            }
            if cur.zero_padded() {
                format!("{v:+0width$}")
            } else if cur.is_glued() {
                format!("{v:<+width$}")
            } else {
                format!("{v:+width$}")
            }
        }
        Delta::Float(v) => {
            // keep the current field's fractional digits, or the previous
            // field's when the current value happens to be integral
            let prec = cur.precision().or_else(|| prev.precision()).unwrap_or(0);
            if opts.flex && !cur.is_glued() {
                width = width.max(prec + 3);
            }
            if cur.zero_padded() {
                format!("{v:+0width$.prec$}")
            } else if cur.is_glued() {
                format!("{v:<+width$.prec$}")
            } else {
                format!("{v:+width$.prec$}")
            }
        }
    };
    colorize(delta, text, opts)
}

/// Blank a literal span to whitespace of the same shape, so deltas printed
/// underneath the original output line up under their fields
pub fn blank_literal(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_whitespace() { c } else { ' ' })
        .collect()
}

fn colorize(delta: Delta, text: String, opts: &RenderOptions) -> String {
    if !opts.colors {
        return text;
    }
    if delta.is_positive() {
        text.green().to_string()
    } else if delta.is_negative() {
        text.red().to_string()
    } else {
        text
    }
}
