//! Tokenizer and statement splitter for assembly source lines.

use twopass_common::opcode;

/// The fields of one source statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Statement<'a> {
    pub label: Option<&'a str>,
    pub mnemonic: Option<&'a str>,
    /// First operand. Anything after it on the line is ignored.
    pub operand: Option<&'a str>,
}

/// Split a line into whitespace-separated tokens.
///
/// Comments start with `;` and extend to end of line.
pub(crate) fn tokenize_line(line: &str) -> Vec<&str> {
    let line = match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    };
    line.split_whitespace().collect()
}

/// Split tokens into label, mnemonic and operand.
///
/// Returns `None` for blank and comment-only lines. A first token ending in
/// `:` is always a label. Otherwise the first token is a label only when it
/// is not a known mnemonic and another token follows it.
pub(crate) fn parse_statement<'a>(tokens: &[&'a str]) -> Option<Statement<'a>> {
    let (&first, rest) = tokens.split_first()?;

    let (label, rest) = if let Some(name) = first.strip_suffix(':') {
        (Some(name).filter(|n| !n.is_empty()), rest)
    } else if !rest.is_empty() && opcode::lookup(first).is_none() {
        (Some(first), rest)
    } else {
        (None, tokens)
    };

    Some(Statement {
        label,
        mnemonic: rest.first().copied(),
        operand: rest.get(1).copied(),
    })
}
