// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Context-aware pull lexer for YAML.
//!
//! This lexer tracks flow depth to properly tokenize characters that have
//! different meanings in block vs flow context:
//! - In **block context** (`flow_depth` = 0): `,[]{}` are valid in plain scalars
//! - In **flow context** (`flow_depth` > 0): `,[]{}` are delimiters
//!
//! Multi-line plain scalars and block scalars come out as single tokens whose
//! text is a slice of the input. Folding, escapes and chomping are left to the
//! scalar parser, so lexing never allocates.
//!
//! Whitespace and comments are skipped. Block structure is recovered by the
//! parser from the [`Position`](crate::span::Position) of each token.

use chumsky::prelude::*;

use crate::directive::parse_directive;
use crate::error::{ErrorKind, ParseError};
use crate::rich_token::RichToken;
use crate::scalar::{BlockHeader, Chomping, ScalarStyle};
use crate::span::{Position, SourceMap, Span};
use crate::token::Token;

const fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t')
}

const fn is_break(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r')
}

const fn is_flow_indicator(byte: u8) -> bool {
    matches!(byte, b',' | b'[' | b']' | b'{' | b'}')
}

/// Whitespace, a line break or the end of input.
fn is_separator(byte: Option<u8>) -> bool {
    byte.is_none_or(|byte| is_blank(byte) || is_break(byte))
}

/// `[1-9]?[-+]?` or `[-+]?[1-9]?`, returning the indentation indicator and chomping.
fn block_header_grammar<'src>()
-> impl Parser<'src, &'src str, (Option<usize>, Chomping), extra::Err<Rich<'src, char>>> {
    let indent = one_of("123456789").map(|digit: char| {
        digit
            .to_digit(10)
            .and_then(|value| usize::try_from(value).ok())
            .unwrap_or_default()
    });
    let chomping = choice((
        just('-').to(Chomping::Strip),
        just('+').to(Chomping::Keep),
    ));
    choice((
        indent
            .clone()
            .or_not()
            .then(chomping.clone().or_not())
            .then_ignore(end()),
        chomping
            .or_not()
            .then(indent.or_not())
            .then_ignore(end())
            .map(|(chomping, indent)| (indent, chomping)),
    ))
    .map(|(indent, chomping)| (indent, chomping.unwrap_or_default()))
}

/// Pull-based lexer state.
///
/// The lifetime `'input` refers to the input string being tokenized.
#[derive(Debug)]
pub struct Lexer<'input> {
    input: &'input str,
    source_map: SourceMap<'input>,
    /// Byte offset of the next unread character.
    pos: usize,
    /// Current flow depth (number of unclosed `{` or `[`)
    flow_depth: usize,
    /// Whether the previous token was a "JSON-like" value
    /// (quoted string, alias, flow end). After these, `:` is always
    /// a mapping indicator in flow context.
    json_like: bool,
    /// Column of the block indicator or implicit key that owns the rest of
    /// the current line.
    line_owner: Option<usize>,
    /// Column of the first node token on the current line since the last
    /// block indicator.
    node_start: Option<usize>,
    finished: bool,
}

impl<'input> Lexer<'input> {
    /// Create a lexer over `input`. A leading byte order mark is skipped.
    #[must_use]
    pub fn new(input: &'input str) -> Self {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        Self {
            input,
            source_map: SourceMap::new(input),
            pos: 0,
            flow_depth: 0,
            json_like: false,
            line_owner: None,
            node_start: None,
            finished: false,
        }
    }

    /// Lex the next token.
    ///
    /// Once the input is exhausted every call returns [`Token::StreamEnd`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for malformed tokens.
    pub fn next_token(&mut self) -> Result<RichToken<'input>, ParseError> {
        self.skip_trivia()?;
        let json_like = std::mem::take(&mut self.json_like);
        let start = self.pos;
        let Some(byte) = self.byte(start) else {
            return Ok(self.rich(Token::StreamEnd, start, start));
        };
        let column = self.source_map.position(start).column;

        if column == 0 && self.flow_depth == 0 {
            if byte == b'%' {
                return self.lex_directive(start);
            }
            if let Some(token) = self.document_marker(start) {
                self.pos = start + 3;
                self.line_owner = None;
                // The document root may follow on the marker line.
                self.node_start = Some(0);
                return Ok(self.rich(token, start, self.pos));
            }
        }

        let in_flow = self.flow_depth > 0;
        let next = self.byte(start + 1);
        match byte {
            b'-' if !in_flow && is_separator(next) => {
                Ok(self.block_indicator(Token::SequenceEntry, start, column))
            }
            b'?' if is_separator(next) => {
                Ok(self.block_indicator(Token::ExplicitKey, start, column))
            }
            b':' if is_separator(next)
                || (in_flow && (json_like || next.is_some_and(is_flow_indicator))) =>
            {
                self.pos = start + 1;
                if !in_flow {
                    self.line_owner = Some(self.node_start.take().unwrap_or(column));
                }
                Ok(self.rich(Token::KeySeparator, start, self.pos))
            }
            b'[' | b'{' => {
                self.note_node_start(column);
                self.flow_depth += 1;
                self.pos = start + 1;
                let token = if byte == b'[' {
                    Token::FlowSequenceStart
                } else {
                    Token::FlowMappingStart
                };
                Ok(self.rich(token, start, self.pos))
            }
            b']' | b'}' if in_flow => {
                self.flow_depth -= 1;
                self.json_like = true;
                self.pos = start + 1;
                let token = if byte == b']' {
                    Token::FlowSequenceEnd
                } else {
                    Token::FlowMappingEnd
                };
                Ok(self.rich(token, start, self.pos))
            }
            b',' if in_flow => {
                self.pos = start + 1;
                Ok(self.rich(Token::FlowEntry, start, self.pos))
            }
            b'&' | b'*' => self.lex_property(start, column, byte),
            b'!' => self.lex_tag(start, column),
            b'"' | b'\'' => self.lex_quoted(start, column, byte),
            b'|' if !in_flow => self.lex_block_scalar(start, column, ScalarStyle::Literal),
            b'>' if !in_flow => self.lex_block_scalar(start, column, ScalarStyle::Folded),
            b',' | b']' | b'}' | b'#' | b'%' | b'@' | b'`' | b'|' | b'>' => {
                Err(self.unexpected(start))
            }
            _ => self.lex_plain(start, column),
        }
    }

    /// Line and column of a byte offset of the input.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        self.source_map.position(offset)
    }

    fn byte(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(offset).copied()
    }

    fn slice(&self, start: usize, end: usize) -> &'input str {
        self.input.get(start..end).unwrap_or_default()
    }

    fn rich(&self, token: Token<'input>, start: usize, end: usize) -> RichToken<'input> {
        RichToken::new(
            token,
            Span::new((), start..end),
            self.source_map.position(start),
        )
    }

    fn error(&self, kind: ErrorKind, start: usize, end: usize) -> ParseError {
        ParseError::new(
            kind,
            Span::new((), start..end),
            self.source_map.position(start),
        )
    }

    fn unexpected(&self, start: usize) -> ParseError {
        let found = self
            .input
            .get(start..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or_default();
        self.error(ErrorKind::UnexpectedToken, start, start + found.len_utf8())
            .with_found(format!("'{found}'"))
    }

    /// Byte offset of the line break ending the line that contains `offset`.
    fn line_end(&self, offset: usize) -> usize {
        self.input
            .as_bytes()
            .get(offset..)
            .and_then(|rest| rest.iter().position(|&byte| byte == b'\n'))
            .map_or(self.input.len(), |idx| offset + idx)
    }

    /// Offset of the line following the one that contains `offset`.
    fn next_line(&self, offset: usize) -> usize {
        (self.line_end(offset) + 1).min(self.input.len())
    }

    fn count_spaces(&self, offset: usize) -> usize {
        self.input
            .as_bytes()
            .get(offset..)
            .map_or(0, |rest| rest.iter().take_while(|&&byte| byte == b' ').count())
    }

    /// Whether only blanks precede `offset` on its line.
    fn in_indentation(&self, offset: usize) -> bool {
        let bytes = self.input.as_bytes();
        let line_start = bytes
            .get(..offset)
            .and_then(|before| before.iter().rposition(|&byte| byte == b'\n'))
            .map_or(0, |idx| idx + 1);
        bytes
            .get(line_start..offset)
            .is_some_and(|prefix| prefix.iter().all(|&byte| is_blank(byte)))
    }

    /// Whether the rest of the line from `offset` is blanks and an optional comment.
    fn rest_is_trivia(&self, offset: usize) -> bool {
        let mut cursor = offset;
        while self.byte(cursor).is_some_and(is_blank) {
            cursor += 1;
        }
        matches!(self.byte(cursor), None | Some(b'\n' | b'\r' | b'#'))
    }

    fn note_node_start(&mut self, column: usize) {
        if self.flow_depth == 0 && self.node_start.is_none() {
            self.node_start = Some(column);
        }
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        while let Some(byte) = self.byte(self.pos) {
            match byte {
                b' ' => self.pos += 1,
                b'\t' => {
                    if self.flow_depth == 0
                        && self.in_indentation(self.pos)
                        && !self.rest_is_trivia(self.pos)
                    {
                        return Err(self.error(
                            ErrorKind::TabInIndentation,
                            self.pos,
                            self.pos + 1,
                        ));
                    }
                    self.pos += 1;
                }
                b'\n' | b'\r' => {
                    self.pos += 1;
                    self.line_owner = None;
                    self.node_start = None;
                }
                // A comment needs whitespace before it
                b'#' if self.pos == 0
                    || self
                        .byte(self.pos - 1)
                        .is_some_and(|prev| is_blank(prev) || is_break(prev)) =>
                {
                    self.pos = self.line_end(self.pos);
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn document_marker(&self, start: usize) -> Option<Token<'input>> {
        let token = match self.input.as_bytes().get(start..start + 3)? {
            b"---" => Token::DocumentStart,
            b"..." => Token::DocumentEnd,
            _ => return None,
        };
        is_separator(self.byte(start + 3)).then_some(token)
    }

    fn block_indicator(
        &mut self,
        token: Token<'input>,
        start: usize,
        column: usize,
    ) -> RichToken<'input> {
        self.pos = start + 1;
        if self.flow_depth == 0 {
            self.line_owner = Some(column);
            self.node_start = None;
        }
        self.rich(token, start, self.pos)
    }

    fn lex_directive(&mut self, start: usize) -> Result<RichToken<'input>, ParseError> {
        let end = self.line_end(start);
        let line = self.slice(start, end).trim_end_matches('\r');
        let content_end = line
            .as_bytes()
            .windows(2)
            .position(|pair| matches!(pair, [b' ' | b'\t', b'#']))
            .unwrap_or(line.len());
        let content = line.get(..content_end).unwrap_or(line);
        let directive = parse_directive(content).map_err(|kind| self.error(kind, start, end))?;
        self.pos = end;
        Ok(self.rich(Token::Directive(directive), start, start + content_end))
    }

    /// End of an anchor or alias name starting at `start`.
    fn name_end(&self, start: usize) -> usize {
        let mut cursor = start;
        while let Some(byte) = self.byte(cursor) {
            let next = self.byte(cursor + 1);
            let stop = is_blank(byte)
                || is_break(byte)
                || is_flow_indicator(byte)
                || (byte == b':' && (is_separator(next) || next.is_some_and(is_flow_indicator)));
            if stop {
                break;
            }
            cursor += 1;
        }
        cursor
    }

    fn lex_property(
        &mut self,
        start: usize,
        column: usize,
        sigil: u8,
    ) -> Result<RichToken<'input>, ParseError> {
        let end = self.name_end(start + 1);
        if end == start + 1 {
            return Err(self.error(ErrorKind::InvalidAnchor, start, end));
        }
        let name = self.slice(start + 1, end);
        self.pos = end;
        self.note_node_start(column);
        let token = if sigil == b'&' {
            Token::Anchor(name)
        } else {
            self.json_like = true;
            Token::Alias(name)
        };
        Ok(self.rich(token, start, end))
    }

    fn lex_tag(&mut self, start: usize, column: usize) -> Result<RichToken<'input>, ParseError> {
        let end = if self.byte(start + 1) == Some(b'<') {
            let mut cursor = start + 2;
            loop {
                match self.byte(cursor) {
                    Some(b'>') => break cursor + 1,
                    Some(byte) if !is_blank(byte) && !is_break(byte) => cursor += 1,
                    _ => return Err(self.error(ErrorKind::InvalidTag, start, cursor)),
                }
            }
        } else {
            let in_flow = self.flow_depth > 0;
            let mut cursor = start + 1;
            while let Some(byte) = self.byte(cursor) {
                if is_blank(byte) || is_break(byte) || (in_flow && is_flow_indicator(byte)) {
                    break;
                }
                cursor += 1;
            }
            cursor
        };
        self.pos = end;
        self.note_node_start(column);
        Ok(self.rich(Token::Tag(self.slice(start, end)), start, end))
    }

    fn lex_quoted(
        &mut self,
        start: usize,
        column: usize,
        quote: u8,
    ) -> Result<RichToken<'input>, ParseError> {
        let double_quoted = quote == b'"';
        let mut cursor = start + 1;
        let close = loop {
            match self.byte(cursor) {
                None => {
                    return Err(self.error(
                        ErrorKind::UnterminatedQuotedString { double_quoted },
                        start,
                        self.input.len(),
                    ));
                }
                Some(b'\\') if double_quoted => cursor += 2,
                Some(b'\'') if !double_quoted && self.byte(cursor + 1) == Some(b'\'') => {
                    cursor += 2;
                }
                Some(byte) if byte == quote => break cursor,
                Some(_) => cursor += 1,
            }
        };
        let style = if double_quoted {
            ScalarStyle::DoubleQuoted
        } else {
            ScalarStyle::SingleQuoted
        };
        self.pos = close + 1;
        self.note_node_start(column);
        self.json_like = true;
        let text = self.slice(start + 1, close);
        Ok(self.rich(Token::Scalar { style, text }, start, self.pos))
    }

    /// Whether a `:` at `offset` ends a plain scalar.
    fn colon_ends_plain(&self, offset: usize) -> bool {
        let next = self.byte(offset + 1);
        is_separator(next) || (self.flow_depth > 0 && next.is_some_and(is_flow_indicator))
    }

    fn lex_plain(&mut self, start: usize, column: usize) -> Result<RichToken<'input>, ParseError> {
        let in_flow = self.flow_depth > 0;
        let next = self.byte(start + 1);
        let bare_indicator = matches!(self.byte(start), Some(b'-' | b'?' | b':'))
            && (is_separator(next) || (in_flow && next.is_some_and(is_flow_indicator)));
        if bare_indicator {
            return Err(self.unexpected(start));
        }

        // Continuation lines must be indented deeper than the owner of the
        // scalar; flow scalars may continue at any indentation.
        let min_indent = if in_flow {
            None
        } else {
            Some(
                self.line_owner
                    .map_or(self.node_start.unwrap_or(column), |owner| owner + 1),
            )
        };

        let mut end = start;
        let mut cursor = start;
        'scalar: loop {
            while let Some(byte) = self.byte(cursor) {
                match byte {
                    b'\n' | b'\r' => break,
                    b':' if cursor > start && self.colon_ends_plain(cursor) => break 'scalar,
                    b'#' if cursor > start && self.byte(cursor - 1).is_some_and(is_blank) => {
                        break 'scalar;
                    }
                    _ if in_flow && is_flow_indicator(byte) => break 'scalar,
                    b' ' | b'\t' => cursor += 1,
                    _ => {
                        cursor += 1;
                        end = cursor;
                    }
                }
            }
            match self.continuation(cursor, min_indent) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        let text = self.slice(start, end);
        self.pos = end;
        self.note_node_start(column);
        Ok(self.rich(
            Token::Scalar {
                style: ScalarStyle::Plain,
                text,
            },
            start,
            end,
        ))
    }

    /// Offset where a plain scalar continues after the line break at `offset`,
    /// skipping blank lines.
    fn continuation(&self, offset: usize, min_indent: Option<usize>) -> Option<usize> {
        let mut cursor = offset;
        loop {
            match self.byte(cursor) {
                Some(b'\r') if self.byte(cursor + 1) == Some(b'\n') => cursor += 2,
                Some(b'\n' | b'\r') => cursor += 1,
                _ => return None,
            }
            let line_start = cursor;
            let indent = self.count_spaces(line_start);
            cursor = line_start + indent;
            while self.byte(cursor).is_some_and(is_blank) {
                cursor += 1;
            }
            match self.byte(cursor) {
                None | Some(b'#') => return None,
                Some(b'\n' | b'\r') => continue,
                Some(_) => {}
            }
            if indent == 0 && self.document_marker(line_start).is_some() {
                return None;
            }
            if min_indent.is_some_and(|min| indent < min) {
                return None;
            }
            if self.byte(cursor) == Some(b':') && self.colon_ends_plain(cursor) {
                return None;
            }
            return Some(cursor);
        }
    }

    fn lex_block_scalar(
        &mut self,
        start: usize,
        column: usize,
        style: ScalarStyle,
    ) -> Result<RichToken<'input>, ParseError> {
        let header_start = start + 1;
        let mut cursor = header_start;
        while self
            .byte(cursor)
            .is_some_and(|byte| !is_blank(byte) && !is_break(byte))
        {
            cursor += 1;
        }
        let header_text = self.slice(header_start, cursor);
        let (indicator, chomping) = block_header_grammar()
            .parse(header_text)
            .into_result()
            .map_err(|_| {
                self.error(
                    ErrorKind::InvalidBlockScalarDetail(format!("unexpected '{header_text}'")),
                    header_start,
                    cursor,
                )
            })?;

        while self.byte(cursor).is_some_and(is_blank) {
            cursor += 1;
        }
        match self.byte(cursor) {
            None | Some(b'\n' | b'\r') => {}
            Some(b'#') => cursor = self.line_end(cursor),
            Some(_) => {
                return Err(self.error(
                    ErrorKind::InvalidBlockScalarDetail(
                        "text after the block scalar indicator".to_owned(),
                    ),
                    cursor,
                    self.line_end(cursor),
                ));
            }
        }
        let content_start = self.next_line(cursor);

        // Indentation of the parent node; `None` at the document root.
        let base = self
            .line_owner
            .or_else(|| self.node_start.unwrap_or(column).checked_sub(1));
        let indent = match indicator {
            Some(indicator) => Some(base.map_or(indicator, |base| base + indicator)),
            None => self.detect_block_indent(content_start, base),
        };
        let end = self.block_content_end(content_start, indent);

        self.pos = end;
        self.line_owner = None;
        self.node_start = None;
        let header = BlockHeader::new(chomping, indent.unwrap_or_default());
        let text = self.slice(content_start, end);
        Ok(self.rich(
            Token::BlockScalar {
                style,
                header,
                text,
            },
            start,
            end,
        ))
    }

    /// Indentation of the first non-blank content line, if it is deeper than `base`.
    fn detect_block_indent(&self, from: usize, base: Option<usize>) -> Option<usize> {
        let mut line_start = from;
        while line_start < self.input.len() {
            let indent = self.count_spaces(line_start);
            match self.byte(line_start + indent) {
                None => break,
                Some(b'\n' | b'\r') => line_start = self.next_line(line_start + indent),
                Some(_) => return base.is_none_or(|base| indent > base).then_some(indent),
            }
        }
        None
    }

    /// End of the block scalar content starting at `from`: all following lines
    /// that are blank or indented at least `indent`.
    fn block_content_end(&self, from: usize, indent: Option<usize>) -> usize {
        let mut line_start = from;
        while line_start < self.input.len() {
            let spaces = self.count_spaces(line_start);
            let blank = matches!(self.byte(line_start + spaces), None | Some(b'\n' | b'\r'));
            let content = indent.is_some_and(|indent| spaces >= indent)
                && !(spaces == 0 && self.document_marker(line_start).is_some());
            if !blank && !content {
                break;
            }
            line_start = self.next_line(line_start + spaces);
        }
        line_start
    }
}

impl<'input> Iterator for Lexer<'input> {
    type Item = Result<RichToken<'input>, ParseError>;

    /// Yields tokens up to and including [`Token::StreamEnd`], or up to the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        self.finished = !matches!(&result, Ok(token) if token.token != Token::StreamEnd);
        Some(result)
    }
}

/// Tokenize a whole input, ending with [`Token::StreamEnd`].
///
/// # Errors
///
/// Returns the first lexing error.
pub fn tokenize(input: &str) -> Result<Vec<RichToken<'_>>, ParseError> {
    Lexer::new(input).collect()
}

#[cfg(test)]
#[allow(
    clippy::indexing_slicing,
    reason = "Tests benefit from direct indexing for readability"
)]
mod tests {
    use super::*;
    use crate::directive::Directive;

    fn get_tokens(input: &str) -> Vec<Token<'_>> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|rich| rich.token)
            .collect()
    }

    fn plain(text: &str) -> Token<'_> {
        Token::Scalar {
            style: ScalarStyle::Plain,
            text,
        }
    }

    fn error_kind(input: &str) -> ErrorKind {
        tokenize(input).unwrap_err().kind
    }

    #[test]
    fn test_simple_mapping_tokens() {
        assert_eq!(
            get_tokens("key: value\n"),
            vec![
                plain("key"),
                Token::KeySeparator,
                plain("value"),
                Token::StreamEnd
            ]
        );
    }

    #[test]
    fn test_empty_and_comment_only_input() {
        assert_eq!(get_tokens(""), vec![Token::StreamEnd]);
        assert_eq!(get_tokens("# just a comment\n\n"), vec![Token::StreamEnd]);
        assert_eq!(get_tokens("\u{FEFF}a"), vec![plain("a"), Token::StreamEnd]);
    }

    #[test]
    fn test_flow_collections() {
        assert_eq!(
            get_tokens("{a: [1, 2], b:c}"),
            vec![
                Token::FlowMappingStart,
                plain("a"),
                Token::KeySeparator,
                Token::FlowSequenceStart,
                plain("1"),
                Token::FlowEntry,
                plain("2"),
                Token::FlowSequenceEnd,
                Token::FlowEntry,
                plain("b:c"),
                Token::FlowMappingEnd,
                Token::StreamEnd,
            ]
        );
    }

    #[test]
    fn test_flow_indicators_in_block_plain_scalar() {
        assert_eq!(
            get_tokens("a: x,y]{z}"),
            vec![
                plain("a"),
                Token::KeySeparator,
                plain("x,y]{z}"),
                Token::StreamEnd
            ]
        );
    }

    #[test]
    fn test_quoted_key_adjacent_value_in_flow() {
        assert_eq!(
            get_tokens(r#"{"a":1}"#),
            vec![
                Token::FlowMappingStart,
                Token::Scalar {
                    style: ScalarStyle::DoubleQuoted,
                    text: "a"
                },
                Token::KeySeparator,
                plain("1"),
                Token::FlowMappingEnd,
                Token::StreamEnd,
            ]
        );
    }

    #[test]
    fn test_url_is_one_plain_scalar() {
        assert_eq!(
            get_tokens("url: http://example.com/a#frag # comment"),
            vec![
                plain("url"),
                Token::KeySeparator,
                plain("http://example.com/a#frag"),
                Token::StreamEnd
            ]
        );
    }

    #[test]
    fn test_multiline_plain_scalar() {
        assert_eq!(
            get_tokens("key: first\n  second\n\n  third\nnext: v"),
            vec![
                plain("key"),
                Token::KeySeparator,
                plain("first\n  second\n\n  third"),
                plain("next"),
                Token::KeySeparator,
                plain("v"),
                Token::StreamEnd,
            ]
        );
    }

    #[test]
    fn test_comment_line_ends_plain_scalar() {
        assert_eq!(
            get_tokens("- a\n  # note\n  b"),
            vec![Token::SequenceEntry, plain("a"), plain("b"), Token::StreamEnd]
        );
    }

    #[test]
    fn test_sequence_item_continuation() {
        assert_eq!(
            get_tokens("- a\n  b\n- c"),
            vec![
                Token::SequenceEntry,
                plain("a\n  b"),
                Token::SequenceEntry,
                plain("c"),
                Token::StreamEnd
            ]
        );
    }

    #[test]
    fn test_indicator_characters_starting_plain_scalars() {
        assert_eq!(
            get_tokens("- -1\n- ?x\n- :y"),
            vec![
                Token::SequenceEntry,
                plain("-1"),
                Token::SequenceEntry,
                plain("?x"),
                Token::SequenceEntry,
                plain(":y"),
                Token::StreamEnd,
            ]
        );
        assert_eq!(
            get_tokens("- - a"),
            vec![
                Token::SequenceEntry,
                Token::SequenceEntry,
                plain("a"),
                Token::StreamEnd
            ]
        );
    }

    #[test]
    fn test_document_markers_and_directives() {
        assert_eq!(
            get_tokens("%YAML 1.2 # version\n---\nfoo\n...\n--- bar"),
            vec![
                Token::Directive(Directive::Yaml("1.2")),
                Token::DocumentStart,
                plain("foo"),
                Token::DocumentEnd,
                Token::DocumentStart,
                plain("bar"),
                Token::StreamEnd,
            ]
        );
        // Markers must be followed by whitespace.
        assert_eq!(get_tokens("---a"), vec![plain("---a"), Token::StreamEnd]);
    }

    #[test]
    fn test_document_marker_ends_plain_scalar() {
        assert_eq!(
            get_tokens("a\n---\nb"),
            vec![
                plain("a"),
                Token::DocumentStart,
                plain("b"),
                Token::StreamEnd
            ]
        );
    }

    #[test]
    fn test_node_properties() {
        assert_eq!(
            get_tokens("&a !!str foo: *b"),
            vec![
                Token::Anchor("a"),
                Token::Tag("!!str"),
                plain("foo"),
                Token::KeySeparator,
                Token::Alias("b"),
                Token::StreamEnd,
            ]
        );
        assert_eq!(
            get_tokens("[!<tag:yaml.org,2002:str> x, *a]"),
            vec![
                Token::FlowSequenceStart,
                Token::Tag("!<tag:yaml.org,2002:str>"),
                plain("x"),
                Token::FlowEntry,
                Token::Alias("a"),
                Token::FlowSequenceEnd,
                Token::StreamEnd,
            ]
        );
    }

    #[test]
    fn test_literal_block_scalar() {
        let tokens = get_tokens("key: |+\n  line\n\nnext: 1");
        assert_eq!(
            tokens[2],
            Token::BlockScalar {
                style: ScalarStyle::Literal,
                header: BlockHeader::new(Chomping::Keep, 2),
                text: "  line\n\n",
            }
        );
        assert_eq!(tokens[3], plain("next"));
    }

    #[test]
    fn test_block_scalar_explicit_indentation() {
        let tokens = get_tokens("- |1\n  text\n- >-\n   a\n   b\n");
        assert_eq!(
            tokens[1],
            Token::BlockScalar {
                style: ScalarStyle::Literal,
                header: BlockHeader::new(Chomping::Clip, 1),
                text: "  text\n",
            }
        );
        assert_eq!(
            tokens[3],
            Token::BlockScalar {
                style: ScalarStyle::Folded,
                header: BlockHeader::new(Chomping::Strip, 3),
                text: "   a\n   b\n",
            }
        );
    }

    #[test]
    fn test_block_scalar_at_root() {
        assert_eq!(
            get_tokens("--- |\nfoo\nbar\n...\n"),
            vec![
                Token::DocumentStart,
                Token::BlockScalar {
                    style: ScalarStyle::Literal,
                    header: BlockHeader::new(Chomping::Clip, 0),
                    text: "foo\nbar\n",
                },
                Token::DocumentEnd,
                Token::StreamEnd,
            ]
        );
    }

    #[test]
    fn test_token_positions() {
        let tokens = tokenize("a:\n  b: c").unwrap();
        let positions: Vec<_> = tokens.iter().map(|rich| rich.position).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(1, 5),
                Position::new(1, 6),
            ]
        );
        assert_eq!(tokens[2].span.start, 5);
    }

    #[test]
    fn test_lexing_errors() {
        let test_cases = [
            ("key:\n\tvalue", ErrorKind::TabInIndentation),
            (
                "'abc",
                ErrorKind::UnterminatedQuotedString {
                    double_quoted: false,
                },
            ),
            (
                "\"abc\\\"",
                ErrorKind::UnterminatedQuotedString {
                    double_quoted: true,
                },
            ),
            ("& x", ErrorKind::InvalidAnchor),
            ("!<abc", ErrorKind::InvalidTag),
            ("]", ErrorKind::UnexpectedToken),
            ("@foo", ErrorKind::UnexpectedToken),
        ];
        for (input, expected) in test_cases {
            assert_eq!(error_kind(input), expected, "input {input:?}");
        }
        assert!(matches!(
            error_kind("key: |0\n  x"),
            ErrorKind::InvalidBlockScalarDetail(_)
        ));
        assert!(matches!(
            error_kind("key: | text"),
            ErrorKind::InvalidBlockScalarDetail(_)
        ));
        assert!(matches!(
            error_kind("%TAG !x"),
            ErrorKind::InvalidDirectiveDetail(_)
        ));
    }

    #[test]
    fn test_tabs_after_indicators_are_separators() {
        assert_eq!(
            get_tokens("-\tfoo\nkey:\tbar"),
            vec![
                Token::SequenceEntry,
                plain("foo"),
                plain("key"),
                Token::KeySeparator,
                plain("bar"),
                Token::StreamEnd,
            ]
        );
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut lexer = Lexer::new("a: 'x");
        assert!(lexer.next().is_some_and(|token| token.is_ok()));
        assert!(lexer.next().is_some_and(|token| token.is_ok()));
        assert!(lexer.next().is_some_and(|token| token.is_err()));
        assert!(lexer.next().is_none());
    }
}
