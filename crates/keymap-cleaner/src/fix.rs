//! Quick fixes: deleting a flagged keybinding together with its separator

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::text::{LineIndex, TextEdit, TextSpan};

/// Title of the deletion quick fix
pub const DELETE_KEYBINDING_TITLE: &str = "Delete this keybinding";

/// Code action kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CodeActionKind {
    QuickFix,
}

/// A fix offered for one diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeAction {
    pub title: String,
    pub kind: CodeActionKind,
    pub uri: String,
    pub edit: TextEdit,
    pub diagnostic: Diagnostic,
    pub is_preferred: bool,
}

/// Range to delete so the entry at `span` leaves the array as valid JSON.
///
/// In order of preference:
/// 1. whitespace and a comma right after the object, on the same line;
/// 2. when the object opens its line, a comma ending the previous line;
/// 3. a comma before the object on its own line;
/// 4. the object span alone.
pub fn plan_deletion(text: &str, span: TextSpan) -> TextSpan {
    let index = LineIndex::new(text);

    if let Some(end) = trailing_comma_end(text, &index, span) {
        return TextSpan::new(span.start, end);
    }
    if let Some(start) = previous_line_comma(text, &index, span) {
        return TextSpan::new(start, span.end);
    }
    if let Some(start) = same_line_leading_comma(text, &index, span) {
        return TextSpan::new(start, span.end);
    }

    span
}

fn trailing_comma_end(text: &str, index: &LineIndex, span: TextSpan) -> Option<usize> {
    let line = index.line_of(span.end);
    let line_end = index.line_end(text, line)?.max(span.end);
    let after = text.get(span.end..line_end)?;

    let rest = after.trim_start();
    if !rest.starts_with(',') {
        return None;
    }
    let whitespace = after.len() - rest.len();
    Some(span.end + whitespace + 1)
}

fn previous_line_comma(text: &str, index: &LineIndex, span: TextSpan) -> Option<usize> {
    let line = index.line_of(span.start);
    if line == 0 {
        return None;
    }

    let line_start = index.line_start(line)?;
    let before = text.get(line_start..span.start)?;
    if !before.trim().is_empty() {
        return None;
    }

    let previous = index.line_text(text, line - 1)?;
    if !previous.trim_end().ends_with(',') {
        return None;
    }
    let comma = previous.rfind(',')?;
    Some(index.line_start(line - 1)? + comma)
}

fn same_line_leading_comma(text: &str, index: &LineIndex, span: TextSpan) -> Option<usize> {
    let line_start = index.line_start(index.line_of(span.start))?;
    let before = text.get(line_start..span.start)?;

    let trimmed = before.trim_end();
    if !trimmed.ends_with(',') {
        return None;
    }
    Some(line_start + trimmed.len() - 1)
}

/// One preferred deletion fix per missing/unknown-command diagnostic
pub fn code_actions(text: &str, uri: &str, diagnostics: &[Diagnostic]) -> Vec<CodeAction> {
    diagnostics
        .iter()
        .filter(|d| d.kind.is_fixable())
        .map(|diagnostic| CodeAction {
            title: DELETE_KEYBINDING_TITLE.to_string(),
            kind: CodeActionKind::QuickFix,
            uri: uri.to_string(),
            edit: TextEdit::delete(plan_deletion(text, diagnostic.span)),
            diagnostic: diagnostic.clone(),
            is_preferred: true,
        })
        .collect()
}
