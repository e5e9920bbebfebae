//! The rewrite engine.
//!
//! A single pass over the script's lines that makes it safe to re-run:
//!
//! - active `DROP TABLE` statements are commented out with `-- `,
//! - `CREATE TABLE` statements without a guard get `IF NOT EXISTS`,
//! - the misspelled guard `IF NOT EXIST` is corrected to `IF NOT EXISTS`.
//!
//! Every input line produces exactly one output line with the same
//! terminator, and running the engine on its own output changes nothing.

use serde::Serialize;

use crate::loader::{Line, Script};
use crate::scanner::{
    classify, continuation_table_name, continues_drop, create_table_head_len, find_guard,
    find_leading_guard, is_bare_create_head, is_comment_line, split_bom, split_indent,
    table_name, GuardClause,
    LexState, StatementKind, COMMENT_MARKER, GUARD_CLAUSE,
};

/// Which transforms the engine applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Comment out active `DROP TABLE` statements.
    pub comment_out_drops: bool,
    /// Add `IF NOT EXISTS` to unguarded `CREATE TABLE` statements.
    pub insert_guards: bool,
    /// Correct `IF NOT EXIST` to `IF NOT EXISTS`.
    pub normalize_typos: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            comment_out_drops: true,
            insert_guards: true,
            normalize_typos: true,
        }
    }
}

/// What the engine did to one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RewriteDecision {
    CommentOut,
    InsertGuard,
    NormalizeTypo,
    NoChange,
}

impl std::fmt::Display for RewriteDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RewriteDecision::CommentOut => write!(f, "comment out"),
            RewriteDecision::InsertGuard => write!(f, "insert guard"),
            RewriteDecision::NormalizeTypo => write!(f, "fix guard typo"),
            RewriteDecision::NoChange => write!(f, "no change"),
        }
    }
}

/// A single line edit made by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedChange {
    /// 1-based line number.
    pub line: usize,
    pub decision: RewriteDecision,
    pub kind: StatementKind,
    pub table: Option<String>,
    /// Line content before the edit, without terminator.
    pub before: String,
    /// Line content after the edit, without terminator.
    pub after: String,
}

/// Result of rewriting a script.
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    /// The rewritten script text.
    pub text: String,
    /// Edits in line order. Unchanged lines are not listed.
    pub changes: Vec<AppliedChange>,
    /// Number of lines scanned (equal in input and output).
    pub lines: usize,
    /// `CREATE TABLE` statements that already carried `IF NOT EXISTS`.
    pub already_guarded: usize,
    /// Lexical state at end of input; anything but `Code` means an
    /// unterminated block comment or literal swallowed the tail.
    pub trailing_state: LexState,
}

impl RewriteOutcome {
    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn count(&self, decision: RewriteDecision) -> usize {
        self.changes.iter().filter(|c| c.decision == decision).count()
    }
}

/// Outcome of deciding a single `CREATE TABLE` opening line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRewrite {
    pub decision: RewriteDecision,
    pub text: String,
}

impl LineRewrite {
    fn unchanged(content: &str) -> Self {
        Self {
            decision: RewriteDecision::NoChange,
            text: content.to_string(),
        }
    }
}

/// Prefix the statement with `-- `, after the line's indentation.
pub fn comment_out(content: &str) -> String {
    let (indent, trimmed) = split_indent(content);
    format!("{indent}{COMMENT_MARKER} {trimmed}")
}

/// Apply the guard rules to a `CREATE TABLE` opening line.
///
/// `guard_on_next_line` reports a guard token found at the start of the
/// following line when nothing follows `CREATE TABLE` on this one.
pub fn rewrite_create_line(
    content: &str,
    guard_on_next_line: bool,
    options: &RewriteOptions,
) -> LineRewrite {
    let (indent, trimmed) = split_indent(content);
    let Some(head) = create_table_head_len(trimmed) else {
        return LineRewrite::unchanged(content);
    };
    let rest = &trimmed[head..];

    if let Some(guard) = find_guard(rest) {
        if guard.clause == GuardClause::IfNotExistTypo && options.normalize_typos {
            return LineRewrite {
                decision: RewriteDecision::NormalizeTypo,
                text: format!(
                    "{indent}{}{}{GUARD_CLAUSE}{}",
                    &trimmed[..head],
                    &rest[..guard.start],
                    &rest[guard.end..]
                ),
            };
        }
        return LineRewrite::unchanged(content);
    }

    if guard_on_next_line || !options.insert_guards {
        return LineRewrite::unchanged(content);
    }

    let head_text = &trimmed[..head];
    let lead = if head_text.ends_with(char::is_whitespace) {
        ""
    } else {
        " "
    };
    let trail = if rest.is_empty() { "" } else { " " };
    LineRewrite {
        decision: RewriteDecision::InsertGuard,
        text: format!("{indent}{head_text}{lead}{GUARD_CLAUSE}{trail}{rest}"),
    }
}

/// Correct a typo guard at the start of a continuation line.
fn rewrite_guard_line(content: &str, options: &RewriteOptions) -> LineRewrite {
    match find_leading_guard(content) {
        Some(guard)
            if guard.clause == GuardClause::IfNotExistTypo && options.normalize_typos =>
        {
            LineRewrite {
                decision: RewriteDecision::NormalizeTypo,
                text: format!(
                    "{}{GUARD_CLAUSE}{}",
                    &content[..guard.start],
                    &content[guard.end..]
                ),
            }
        }
        _ => LineRewrite::unchanged(content),
    }
}

/// Accumulates emitted lines and the lexical state of the output.
struct Emitter {
    out: String,
    changes: Vec<AppliedChange>,
    state: LexState,
}

impl Emitter {
    fn emit(&mut self, bom: &str, content: &str, ending: &str) {
        // Lex the emitted text so a second pass sees the same state.
        self.state = self.state.advance(content).end;
        self.out.push_str(bom);
        self.out.push_str(content);
        self.out.push_str(ending);
    }

    fn record(
        &mut self,
        line: usize,
        kind: StatementKind,
        table: Option<String>,
        before: &str,
        rewrite: &LineRewrite,
    ) {
        if rewrite.decision == RewriteDecision::NoChange {
            return;
        }
        self.changes.push(AppliedChange {
            line,
            decision: rewrite.decision,
            kind,
            table,
            before: before.to_string(),
            after: rewrite.text.clone(),
        });
    }
}

/// Rewrite a script into its idempotent form.
///
/// Never fails: lines that cannot be classified pass through unchanged.
pub fn rewrite(script: &Script, options: &RewriteOptions) -> RewriteOutcome {
    let lines: Vec<Line<'_>> = script.lines().collect();
    let mut emitter = Emitter {
        out: String::with_capacity(script.text().len() + 64),
        changes: Vec::new(),
        state: LexState::Code,
    };
    let mut already_guarded = 0;
    // Table of the DROP TABLE whose continuation lines are being commented out.
    let mut open_drop: Option<Option<String>> = None;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let (bom, content) = if i == 0 {
            split_bom(line.content)
        } else {
            ("", line.content)
        };
        let (_, trimmed) = split_indent(content);
        let starts_in_code = emitter.state == LexState::Code;

        if let Some(table) = open_drop.take() {
            if continues_drop(starts_in_code, trimmed) {
                let rewrite = LineRewrite {
                    decision: RewriteDecision::CommentOut,
                    text: comment_out(content),
                };
                emitter.record(i + 1, StatementKind::DropTable, table.clone(), content, &rewrite);
                if !LexState::Code.advance(content).terminated {
                    open_drop = Some(table);
                }
                emitter.emit(bom, &rewrite.text, line.ending);
                i += 1;
                continue;
            }
        }

        if !starts_in_code || trimmed.is_empty() || is_comment_line(trimmed) {
            emitter.emit(bom, content, line.ending);
            i += 1;
            continue;
        }

        match classify(trimmed) {
            StatementKind::DropTable if options.comment_out_drops => {
                let table = table_name(StatementKind::DropTable, trimmed);
                let rewrite = LineRewrite {
                    decision: RewriteDecision::CommentOut,
                    text: comment_out(content),
                };
                emitter.record(i + 1, StatementKind::DropTable, table.clone(), content, &rewrite);
                if !LexState::Code.advance(content).terminated {
                    open_drop = Some(table);
                }
                emitter.emit(bom, &rewrite.text, line.ending);
            }
            StatementKind::CreateTable => {
                let head_only = is_bare_create_head(trimmed);
                let after = emitter.state.advance(content).end;
                let next_guard = match lines.get(i + 1) {
                    Some(next) if head_only && after == LexState::Code => {
                        find_leading_guard(next.content).map(|g| (*next, g.clause))
                    }
                    _ => None,
                };

                let opener = rewrite_create_line(content, next_guard.is_some(), options);
                let table = match next_guard {
                    Some((next, _)) => continuation_table_name(next.content),
                    None if head_only => lines
                        .get(i + 1)
                        .and_then(|next| continuation_table_name(next.content)),
                    None => table_name(StatementKind::CreateTable, trimmed),
                };
                let guarded = match next_guard {
                    Some((_, clause)) => Some(clause),
                    None => create_table_head_len(trimmed)
                        .and_then(|head| find_guard(&trimmed[head..]))
                        .map(|g| g.clause),
                };
                if guarded == Some(GuardClause::IfNotExists) {
                    already_guarded += 1;
                }

                emitter.record(i + 1, StatementKind::CreateTable, table.clone(), content, &opener);
                emitter.emit(bom, &opener.text, line.ending);

                if let Some((next, _)) = next_guard {
                    let guard_line = rewrite_guard_line(next.content, options);
                    emitter.record(i + 2, StatementKind::CreateTable, table, next.content, &guard_line);
                    emitter.emit("", &guard_line.text, next.ending);
                    i += 1;
                }
            }
            _ => emitter.emit(bom, content, line.ending),
        }
        i += 1;
    }

    let changed = emitter.changes.len();
    log::debug!(
        "Rewrite pass complete; lines={}, changes={}, already_guarded={}",
        lines.len(),
        changed,
        already_guarded
    );

    RewriteOutcome {
        text: emitter.out,
        changes: emitter.changes,
        lines: lines.len(),
        already_guarded,
        trailing_state: emitter.state,
    }
}
