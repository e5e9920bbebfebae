//! Line-oriented statement scanning.
//!
//! No SQL grammar is involved. Statements are recognised by their opening
//! keyword at the start of a line, and a small lexical state machine carries
//! block comments and quoted literals across line boundaries so that
//! keywords inside them are never mistaken for statements.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::Serialize;

use crate::loader::{Line, Script};

/// Marker that starts a single-line SQL comment.
pub const COMMENT_MARKER: &str = "--";

/// Canonical spelling of the create guard clause.
pub const GUARD_CLAUSE: &str = "IF NOT EXISTS";

static DROP_TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^DROP\s+TABLE\b").unwrap());

// Includes the whitespace after TABLE so the guard lands before the name.
static CREATE_TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^CREATE\s+TABLE\b\s*").unwrap());

static GUARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bIF\s+NOT\s+EXISTS?\b").unwrap());

static LEADING_GUARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^IF\s+NOT\s+EXISTS?\b").unwrap());

// A possibly dotted name whose parts may be backtick or double quoted.
const NAME_PATTERN: &str = r#"((?:`[^`]*`|"[^"]*"|[^\s(;,.`"]+)(?:\.(?:`[^`]*`|"[^"]*"|[^\s(;,.`"]+))*)"#;

static CREATE_TABLE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^CREATE\s+TABLE\s*(?:IF\s+NOT\s+EXISTS?\s+)?{NAME_PATTERN}"
    ))
    .unwrap()
});

static DROP_TABLE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^DROP\s+TABLE\s+(?:IF\s+EXISTS\s+)?{NAME_PATTERN}"
    ))
    .unwrap()
});

static STATEMENT_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:CREATE|DROP|ALTER|INSERT|UPDATE|DELETE|SELECT|SET|USE|LOCK|UNLOCK|GRANT|REVOKE|TRUNCATE|RENAME|REPLACE|CALL|DELIMITER|START|BEGIN|COMMIT|ROLLBACK|WITH)\b",
    )
    .unwrap()
});

/// Lexical context at a line boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum LexState {
    /// Plain SQL.
    #[default]
    Code,
    /// Inside a `/* ... */` comment.
    BlockComment,
    /// Inside a literal opened by the given quote character.
    Quoted(char),
}

/// Result of lexing one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLex {
    /// State at the end of the line.
    pub end: LexState,
    /// Whether a `;` appeared outside comments and literals.
    pub terminated: bool,
    /// Opened minus closed parentheses outside comments and literals.
    pub paren_delta: i32,
}

impl LexState {
    /// Lex one line (without its terminator) starting from `self`.
    ///
    /// Block comments do not nest. Backslash escapes apply inside `'` and `"`
    /// literals; a doubled quote character escapes itself in all literals.
    pub fn advance(self, line: &str) -> LineLex {
        let mut terminated = false;
        let mut paren_delta = 0;
        let end = self.walk(line, |_, b| {
            match b {
                b';' => terminated = true,
                b'(' => paren_delta += 1,
                b')' => paren_delta -= 1,
                _ => {}
            }
            true
        });

        LineLex {
            end,
            terminated,
            paren_delta,
        }
    }

    /// Walk `line` from `self`, passing the offset of every byte that lies
    /// outside comments and literals to `visit`. Stops at a `--` comment or
    /// when `visit` returns false.
    fn walk(self, line: &str, mut visit: impl FnMut(usize, u8) -> bool) -> LexState {
        let bytes = line.as_bytes();
        let mut state = self;
        let mut i = 0;

        while i < bytes.len() {
            let next = bytes.get(i + 1).copied();
            match state {
                LexState::Code => match bytes[i] {
                    b'-' if next == Some(b'-') => break,
                    b'/' if next == Some(b'*') => {
                        state = LexState::BlockComment;
                        i += 2;
                        continue;
                    }
                    q @ (b'\'' | b'"' | b'`') => state = LexState::Quoted(q as char),
                    b => {
                        if !visit(i, b) {
                            break;
                        }
                    }
                },
                LexState::BlockComment => {
                    if bytes[i] == b'*' && next == Some(b'/') {
                        state = LexState::Code;
                        i += 2;
                        continue;
                    }
                }
                LexState::Quoted(q) => {
                    let q = q as u8;
                    if bytes[i] == b'\\' && q != b'`' {
                        i += 2;
                        continue;
                    }
                    if bytes[i] == q {
                        if next == Some(q) {
                            i += 2;
                            continue;
                        }
                        state = LexState::Code;
                    }
                }
            }
            i += 1;
        }
        state
    }
}

/// `text` with every byte inside a comment or literal replaced by a space.
/// Byte offsets match `text`.
fn code_only(text: &str) -> String {
    let mut code = vec![b' '; text.len()];
    LexState::Code.walk(text, |i, b| {
        code[i] = b;
        true
    });
    String::from_utf8_lossy(&code).into_owned()
}

/// Kind of statement a line opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatementKind {
    CreateTable,
    DropTable,
    Other,
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatementKind::CreateTable => write!(f, "CREATE TABLE"),
            StatementKind::DropTable => write!(f, "DROP TABLE"),
            StatementKind::Other => write!(f, "other"),
        }
    }
}

/// A guard clause found on a `CREATE TABLE` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GuardClause {
    /// `IF NOT EXISTS`, in any case.
    IfNotExists,
    /// The misspelled `IF NOT EXIST`.
    IfNotExistTypo,
}

/// Location of a guard token within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardMatch {
    pub clause: GuardClause,
    /// Byte range of the token within the searched line.
    pub start: usize,
    pub end: usize,
}

/// Split off the leading whitespace of a line: `(indent, rest)`.
pub fn split_indent(content: &str) -> (&str, &str) {
    let rest = content.trim_start();
    (&content[..content.len() - rest.len()], rest)
}

/// Whether the trimmed line is a `--` comment.
pub fn is_comment_line(trimmed: &str) -> bool {
    trimmed.starts_with(COMMENT_MARKER)
}

/// Classify the statement a trimmed line opens.
///
/// Drop is checked before create; both require a word boundary after
/// `TABLE`, so `TABLESPACE` statements are `Other`.
pub fn classify(trimmed: &str) -> StatementKind {
    if DROP_TABLE_RE.is_match(trimmed) {
        StatementKind::DropTable
    } else if CREATE_TABLE_RE.is_match(trimmed) {
        StatementKind::CreateTable
    } else {
        StatementKind::Other
    }
}

/// Whether a trimmed line begins a new statement (or a `/*` directive).
pub fn starts_statement(trimmed: &str) -> bool {
    trimmed.starts_with("/*") || STATEMENT_START_RE.is_match(trimmed)
}

/// Whether an unterminated `DROP TABLE` carries on to a line.
///
/// The statement ends before a line that starts inside a comment or literal,
/// a blank line, a `--` comment line, or a line opening another statement.
pub fn continues_drop(starts_in_code: bool, trimmed: &str) -> bool {
    starts_in_code
        && !trimmed.is_empty()
        && !is_comment_line(trimmed)
        && !starts_statement(trimmed)
}

/// Byte length of the `CREATE TABLE` head, including trailing whitespace.
pub fn create_table_head_len(trimmed: &str) -> Option<usize> {
    CREATE_TABLE_RE.find(trimmed).map(|m| m.end())
}

/// The region after `CREATE TABLE` where a guard may legitimately appear:
/// the code before the column list, with comments and quoted names blanked.
fn guard_region(after_head: &str) -> String {
    let mut region = code_only(after_head);
    if let Some(cut) = region.find('(') {
        region.truncate(cut);
    }
    region
}

/// Whether a trimmed `CREATE TABLE` line holds nothing but the head, ignoring
/// comments, so its name and guard may follow on the next line.
pub fn is_bare_create_head(trimmed: &str) -> bool {
    create_table_head_len(trimmed)
        .is_some_and(|head| code_only(&trimmed[head..]).trim().is_empty())
}

fn guard_from(m: regex_lite::Match<'_>, base: usize) -> GuardMatch {
    let clause = if m.as_str().to_ascii_uppercase().ends_with("EXISTS") {
        GuardClause::IfNotExists
    } else {
        GuardClause::IfNotExistTypo
    };
    GuardMatch {
        clause,
        start: base + m.start(),
        end: base + m.end(),
    }
}

/// Find a guard token in the text following the `CREATE TABLE` head.
/// Offsets are relative to `after_head`.
pub fn find_guard(after_head: &str) -> Option<GuardMatch> {
    let region = guard_region(after_head);
    GUARD_RE.find(&region).map(|m| guard_from(m, 0))
}

/// Find a guard token at the very start of a continuation line.
/// Offsets are relative to `content`.
pub fn find_leading_guard(content: &str) -> Option<GuardMatch> {
    let (indent, trimmed) = split_indent(content);
    LEADING_GUARD_RE
        .find(trimmed)
        .map(|m| guard_from(m, indent.len()))
}

fn unquote(name: &str) -> String {
    name.split('.')
        .map(|part| part.trim_matches(|c| matches!(c, '`' | '"' | '[' | ']')))
        .collect::<Vec<_>>()
        .join(".")
}

/// Extract the table name from a trimmed opening line, if present on it.
pub fn table_name(kind: StatementKind, trimmed: &str) -> Option<String> {
    let re = match kind {
        StatementKind::CreateTable => &CREATE_TABLE_NAME_RE,
        StatementKind::DropTable => &DROP_TABLE_NAME_RE,
        StatementKind::Other => return None,
    };
    let caps = re.captures(trimmed)?;
    let name = caps.get(1)?.as_str();
    if name.eq_ignore_ascii_case("IF") || name.starts_with(COMMENT_MARKER) || name.starts_with("/*") {
        return None;
    }
    Some(unquote(name))
}

/// Strip a UTF-8 byte order mark: `(bom, rest)`.
pub fn split_bom(content: &str) -> (&str, &str) {
    match content.strip_prefix('\u{feff}') {
        Some(rest) => ("\u{feff}", rest),
        None => ("", content),
    }
}

/// The line range occupied by one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementSpan {
    pub kind: StatementKind,
    /// 1-based first line.
    pub start_line: usize,
    /// 1-based last line (inclusive).
    pub end_line: usize,
    /// Byte offset of the first line's start.
    pub start_offset: usize,
    /// Byte offset just past the last line's terminator.
    pub end_offset: usize,
    /// Leading whitespace of the first line.
    pub indent: String,
    pub table: Option<String>,
    /// Guard clause on a `CREATE TABLE`, if any.
    pub guard: Option<GuardClause>,
    /// Whether a `;` closed the statement.
    pub terminated: bool,
}

/// Identify every statement span in a script.
///
/// Comment lines, blank lines, and lines starting inside a block comment or
/// literal never open a span. A span runs to the first line with a `;`
/// outside literals. An unterminated `DROP TABLE` ends where
/// [`continues_drop`] says so; any other unterminated span is closed before
/// the next line that opens a new statement outside any parentheses, or at
/// end of input.
pub fn scan_statements(script: &Script) -> Vec<StatementSpan> {
    let lines: Vec<Line<'_>> = script.lines().collect();
    let mut spans: Vec<StatementSpan> = Vec::new();
    let mut open: Option<StatementSpan> = None;
    let mut depth = 0;
    let mut state = LexState::Code;
    let mut offset = 0;

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_len = line.content.len() + line.ending.len();
        let (_, content) = if idx == 0 {
            split_bom(line.content)
        } else {
            ("", line.content)
        };
        let starts_in_code = state == LexState::Code;
        let lex = state.advance(content);
        state = lex.end;

        let (indent, trimmed) = split_indent(content);
        let opens = starts_in_code
            && !trimmed.is_empty()
            && !is_comment_line(trimmed)
            && !trimmed.starts_with("/*");

        if let Some(span) = open.as_mut() {
            let closes = match span.kind {
                StatementKind::DropTable => !continues_drop(starts_in_code, trimmed),
                _ => opens && depth <= 0 && starts_statement(trimmed),
            };
            if closes {
                spans.extend(open.take());
            } else {
                depth += lex.paren_delta;
                span.end_line = line_no;
                span.end_offset = offset + line_len;
                if lex.terminated {
                    span.terminated = true;
                    spans.extend(open.take());
                }
                offset += line_len;
                continue;
            }
        }

        if opens {
            let kind = classify(trimmed);
            let guard = match kind {
                StatementKind::CreateTable => create_table_head_len(trimmed)
                    .and_then(|head| find_guard(&trimmed[head..]))
                    .map(|g| g.clause),
                _ => None,
            };
            let span = StatementSpan {
                kind,
                start_line: line_no,
                end_line: line_no,
                start_offset: offset,
                end_offset: offset + line_len,
                indent: indent.to_string(),
                table: table_name(kind, trimmed),
                guard,
                terminated: lex.terminated,
            };
            if lex.terminated {
                spans.push(span);
            } else {
                depth = lex.paren_delta;
                open = Some(span);
            }
        }
        offset += line_len;
    }

    spans.extend(open);
    fill_split_guards(&lines, &mut spans);
    spans
}

/// Table name on a continuation line that follows a bare `CREATE TABLE`,
/// skipping a leading guard token.
pub fn continuation_table_name(content: &str) -> Option<String> {
    let (_, trimmed) = split_indent(content);
    let rest = match LEADING_GUARD_RE.find(trimmed) {
        Some(m) => trimmed[m.end()..].trim_start(),
        None => trimmed,
    };
    let name: String = rest
        .chars()
        .take_while(|c| !c.is_whitespace() && !matches!(c, '(' | ';' | ','))
        .collect();
    if name.is_empty() || is_comment_line(&name) {
        None
    } else {
        Some(unquote(&name))
    }
}

/// A `CREATE TABLE` whose head ends the line may carry its guard and name on
/// the next line.
fn fill_split_guards(lines: &[Line<'_>], spans: &mut [StatementSpan]) {
    for span in spans
        .iter_mut()
        .filter(|s| s.kind == StatementKind::CreateTable && s.table.is_none())
    {
        if span.end_line <= span.start_line {
            continue;
        }
        let Some(next) = lines.get(span.start_line) else {
            continue;
        };
        if span.guard.is_none() {
            span.guard = find_leading_guard(next.content).map(|g| g.clause);
        }
        span.table = continuation_table_name(next.content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_plain_terminator() {
        let lex = LexState::Code.advance("DROP TABLE a;");
        assert_eq!(lex.end, LexState::Code);
        assert!(lex.terminated);
    }

    #[test]
    fn test_advance_ignores_semicolon_in_literal_and_comment() {
        let lex = LexState::Code.advance("SELECT 'a;b' -- c;");
        assert!(!lex.terminated);
        assert_eq!(lex.end, LexState::Code);
    }

    #[test]
    fn test_advance_open_block_comment() {
        let lex = LexState::Code.advance("/* start");
        assert_eq!(lex.end, LexState::BlockComment);
        let lex = lex.end.advance("DROP TABLE x; */ SELECT 1;");
        assert_eq!(lex.end, LexState::Code);
        assert!(lex.terminated);
    }

    #[test]
    fn test_advance_multiline_literal() {
        let lex = LexState::Code.advance("INSERT INTO t VALUES ('first");
        assert_eq!(lex.end, LexState::Quoted('\''));
        let lex = lex.end.advance("it''s still; open\\' here");
        assert_eq!(lex.end, LexState::Quoted('\''));
        let lex = lex.end.advance("done');");
        assert_eq!(lex.end, LexState::Code);
        assert!(lex.terminated);
    }

    #[test]
    fn test_advance_mysql_conditional_comment() {
        let lex = LexState::Code.advance("/*!40101 SET NAMES utf8 */;");
        assert_eq!(lex.end, LexState::Code);
        assert!(lex.terminated);
    }

    #[test]
    fn test_classify_word_boundary() {
        assert_eq!(classify("DROP TABLE foo;"), StatementKind::DropTable);
        assert_eq!(classify("drop   table `foo`;"), StatementKind::DropTable);
        assert_eq!(classify("DROP TABLESPACE bar;"), StatementKind::Other);
        assert_eq!(classify("CREATE TABLE foo (id INT);"), StatementKind::CreateTable);
        assert_eq!(classify("Create Table\tfoo"), StatementKind::CreateTable);
        assert_eq!(classify("CREATE TABLESPACE foo ADD DATAFILE 'x';"), StatementKind::Other);
        assert_eq!(classify("CREATE TABLE_x"), StatementKind::Other);
        assert_eq!(classify("CREATE INDEX i ON t (c);"), StatementKind::Other);
    }

    #[test]
    fn test_find_guard_variants() {
        let g = find_guard("IF NOT EXISTS foo (id INT)").unwrap();
        assert_eq!(g.clause, GuardClause::IfNotExists);
        assert_eq!((g.start, g.end), (0, 13));

        let g = find_guard("if  not exist foo").unwrap();
        assert_eq!(g.clause, GuardClause::IfNotExistTypo);
        assert_eq!(g.end, 13);

        assert!(find_guard("foo (id INT)").is_none());
        assert!(find_guard("ifnotexists_log (id INT)").is_none());
    }

    #[test]
    fn test_find_guard_ignores_column_list_and_literals() {
        assert!(find_guard("foo (note VARCHAR(20) DEFAULT 'if not exist')").is_none());
        assert!(find_guard("foo -- if not exists").is_none());
    }

    #[test]
    fn test_find_guard_ignores_quoted_names_and_block_comments() {
        assert!(find_guard("`log if not exist` (id INT)").is_none());
        assert!(find_guard("\"log if not exists\" (id INT)").is_none());
        assert!(find_guard("t /* if not exists */ (id INT)").is_none());

        let g = find_guard("/* keep */ if not exist t (id INT)").unwrap();
        assert_eq!(g.clause, GuardClause::IfNotExistTypo);
        assert_eq!((g.start, g.end), (11, 23));
    }

    #[test]
    fn test_is_bare_create_head() {
        assert!(is_bare_create_head("CREATE TABLE"));
        assert!(is_bare_create_head("CREATE TABLE -- users"));
        assert!(is_bare_create_head("CREATE TABLE /* users */"));
        assert!(!is_bare_create_head("CREATE TABLE users"));
        assert!(!is_bare_create_head("CREATE TABLE ("));
        assert!(!is_bare_create_head("DROP TABLE"));
    }

    #[test]
    fn test_continues_drop() {
        assert!(continues_drop(true, "`a`,"));
        assert!(!continues_drop(true, ""));
        assert!(!continues_drop(true, "-- note"));
        assert!(!continues_drop(true, "CREATE TABLE b (id INT);"));
        assert!(!continues_drop(false, "b;"));
    }

    #[test]
    fn test_find_leading_guard_offsets() {
        let g = find_leading_guard("    if not exist foo (").unwrap();
        assert_eq!(g.clause, GuardClause::IfNotExistTypo);
        assert_eq!((g.start, g.end), (4, 16));
        assert!(find_leading_guard("  foo (").is_none());
    }

    #[test]
    fn test_table_name() {
        assert_eq!(
            table_name(StatementKind::CreateTable, "CREATE TABLE IF NOT EXISTS `db`.`users` ("),
            Some("db.users".to_string())
        );
        assert_eq!(
            table_name(StatementKind::DropTable, "DROP TABLE IF EXISTS old_table;"),
            Some("old_table".to_string())
        );
        assert_eq!(
            table_name(StatementKind::CreateTable, "CREATE TABLE `log if not exist` (id INT);"),
            Some("log if not exist".to_string())
        );
        assert_eq!(table_name(StatementKind::CreateTable, "CREATE TABLE -- users"), None);
        assert_eq!(table_name(StatementKind::CreateTable, "CREATE TABLE"), None);
        assert_eq!(table_name(StatementKind::Other, "SELECT 1"), None);
    }

    #[test]
    fn test_scan_statements_multiline() {
        let script = Script::new(
            "-- header\n\
             CREATE TABLE users (\n\
             \x20 id INT,\n\
             \x20 -- note\n\
             \x20 name TEXT\n\
             );\n\
             \n\
             DROP TABLE IF EXISTS legacy;\n",
        );
        let spans = scan_statements(&script);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].kind, StatementKind::CreateTable);
        assert_eq!((spans[0].start_line, spans[0].end_line), (2, 6));
        assert_eq!(spans[0].table.as_deref(), Some("users"));
        assert!(spans[0].terminated);
        assert_eq!(spans[1].kind, StatementKind::DropTable);
        assert_eq!(spans[1].start_line, 8);
        assert_eq!(spans[1].table.as_deref(), Some("legacy"));
        assert_eq!(&script.text()[spans[1].start_offset..spans[1].end_offset], "DROP TABLE IF EXISTS legacy;\n");
    }

    #[test]
    fn test_scan_statements_unterminated_closed_by_next_statement() {
        let script = Script::new("DROP TABLE a\nCREATE TABLE b (id INT);\n");
        let spans = scan_statements(&script);
        assert_eq!(spans.len(), 2);
        assert!(!spans[0].terminated);
        assert_eq!(spans[0].end_line, 1);
        assert_eq!(spans[1].start_line, 2);
    }

    #[test]
    fn test_scan_statements_drop_stops_at_blank_or_comment() {
        let script = Script::new("DROP TABLE a\n\nb;\nDROP TABLE c\n-- note\nd;\n");
        let spans = scan_statements(&script);
        let drops: Vec<_> = spans
            .iter()
            .filter(|s| s.kind == StatementKind::DropTable)
            .collect();
        assert_eq!(drops.len(), 2);
        assert_eq!((drops[0].start_line, drops[0].end_line), (1, 1));
        assert!(!drops[0].terminated);
        assert_eq!((drops[1].start_line, drops[1].end_line), (4, 4));
    }

    #[test]
    fn test_scan_statements_split_guard_after_comment() {
        let script = Script::new("CREATE TABLE -- users\n  IF NOT EXISTS users (id INT);\n");
        let spans = scan_statements(&script);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].guard, Some(GuardClause::IfNotExists));
        assert_eq!(spans[0].table.as_deref(), Some("users"));
    }

    #[test]
    fn test_scan_statements_keyword_column_inside_parens() {
        let script = Script::new("CREATE TABLE jobs (\n  start DATE,\n  commit_id INT\n);\n");
        let spans = scan_statements(&script);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].end_line, 4);
    }

    #[test]
    fn test_scan_statements_skips_block_comments() {
        let script = Script::new("/*\nDROP TABLE a;\n*/\nCREATE TABLE b (id INT);\n");
        let spans = scan_statements(&script);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, StatementKind::CreateTable);
    }

    #[test]
    fn test_scan_statements_split_guard() {
        let script = Script::new("CREATE TABLE\n  IF NOT EXIST orders (\n  id INT\n);\n");
        let spans = scan_statements(&script);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].guard, Some(GuardClause::IfNotExistTypo));
        assert_eq!(spans[0].table.as_deref(), Some("orders"));
    }

    #[test]
    fn test_scan_statements_bom() {
        let script = Script::new("\u{feff}CREATE TABLE a (id INT);");
        let spans = scan_statements(&script);
        assert_eq!(spans[0].kind, StatementKind::CreateTable);
        assert_eq!(spans[0].indent, "");
    }
}
