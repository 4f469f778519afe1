//! Trace line parser.
//!
//! Accepts `ACTIVITY[, PARAMETER][, NAME]`. The operand may also be written
//! right after the activity keyword, so `EXEC program1, 50` and
//! `EXEC, 50, program1` decode to the same event.

use crate::common::SimError;
use crate::trace::event::{Activity, TraceEvent};

/// Decodes a single trace line.
///
/// Errors carry line number 0; [`parse_trace`] fills in the real one.
pub fn parse_line(line: &str) -> Result<TraceEvent, SimError> {
    let trimmed = line.trim();
    let malformed = |reason: &str| SimError::MalformedTrace {
        line_no: 0,
        line: trimmed.to_string(),
        reason: reason.to_string(),
    };

    let mut fields = trimmed.split(',').map(str::trim);
    let head = fields.next().unwrap_or_default();

    let mut words = head.split_whitespace();
    let keyword = words.next().ok_or_else(|| malformed("missing activity"))?;
    let activity = Activity::from_keyword(keyword)
        .ok_or_else(|| malformed(&format!("unknown activity '{keyword}'")))?;
    let inline_name = words.next();
    if words.next().is_some() {
        return Err(malformed("unexpected text after operand"));
    }

    let parameter = match fields.next() {
        None => 0,
        Some(field) => field
            .parse::<u64>()
            .map_err(|_| malformed(&format!("parameter '{field}' is not a non-negative integer")))?,
    };

    let name = match (inline_name, fields.next()) {
        (Some(_), Some(_)) => return Err(malformed("operand given twice")),
        (Some(name), None) | (None, Some(name)) => name.to_string(),
        (None, None) => String::new(),
    };

    if fields.next().is_some() {
        return Err(malformed("too many fields"));
    }

    Ok(TraceEvent {
        activity,
        parameter,
        name,
    })
}

/// Decodes a whole trace file, skipping blank lines.
pub fn parse_trace(text: &str) -> Result<Vec<TraceEvent>, SimError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            parse_line(line).map_err(|err| match err {
                SimError::MalformedTrace { line, reason, .. } => SimError::MalformedTrace {
                    line_no: i + 1,
                    line,
                    reason,
                },
                other => other,
            })
        })
        .collect()
}
