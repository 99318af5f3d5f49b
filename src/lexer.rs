// File: src/lexer.rs
//
// Lexical analyzer (scanner) for the Lark scripting language.
// Converts source code text into a stream of tokens for parsing.
//
// Supports:
// - Keywords: and, class, else, false, for, function, if, nil, or,
//   print, return, super, this, true, let, while
// - Identifiers, number literals, string literals
// - Operators: + - * / ! != = == < <= > >=
// - Punctuation: ( ) { } , . ;
// - Single-line comments starting with //
//
// `class`, `super` and `this` are reserved words with no grammar
// behind them yet; they still scan as their own token kinds.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::errors::ErrorReporter;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,
    // One or two character tokens
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    // Literals
    Identifier,
    Str(String),
    Number(f64),
    // Keywords
    And,
    Class,
    Else,
    False,
    Function,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Let,
    While,
    Eof,
}

/// A single token: its kind (with the parsed literal for numbers and
/// strings), the exact source slice it came from, and the 1-based line
/// its first character sits on.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        ("and", TokenKind::And),
        ("class", TokenKind::Class),
        ("else", TokenKind::Else),
        ("false", TokenKind::False),
        ("for", TokenKind::For),
        ("function", TokenKind::Function),
        ("if", TokenKind::If),
        ("nil", TokenKind::Nil),
        ("or", TokenKind::Or),
        ("print", TokenKind::Print),
        ("return", TokenKind::Return),
        ("super", TokenKind::Super),
        ("this", TokenKind::This),
        ("true", TokenKind::True),
        ("let", TokenKind::Let),
        ("while", TokenKind::While),
    ])
});

/// Walks the source a character at a time, tracking the start of the
/// current lexeme and the current line. Malformed input is reported
/// through the shared reporter and scanning carries on, so one bad
/// character does not hide later errors.
pub struct Scanner<'a> {
    source: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    /// Line of the current lexeme's first character; a string literal
    /// spanning lines is reported where it opened.
    start_line: usize,
    reporter: &'a mut ErrorReporter,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &str, reporter: &'a mut ErrorReporter) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
            reporter,
        }
    }

    /// Scans the entire source and returns the token list, always
    /// terminated by an `Eof` token.
    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.scan_token();
        }

        self.tokens.push(Token { kind: TokenKind::Eof, lexeme: String::new(), line: self.line });
        self.tokens
    }

    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),
            '!' => {
                let kind = if self.match_next('=') { TokenKind::BangEqual } else { TokenKind::Bang };
                self.add_token(kind);
            }
            '=' => {
                let kind =
                    if self.match_next('=') { TokenKind::EqualEqual } else { TokenKind::Equal };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.match_next('=') { TokenKind::LessEqual } else { TokenKind::Less };
                self.add_token(kind);
            }
            '>' => {
                let kind =
                    if self.match_next('=') { TokenKind::GreaterEqual } else { TokenKind::Greater };
                self.add_token(kind);
            }
            '/' => {
                if self.match_next('/') {
                    // A comment runs to the end of the line.
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.string(),
            _ => {
                if c.is_ascii_digit() {
                    self.number();
                } else if is_alpha(c) {
                    self.identifier();
                } else {
                    self.reporter.error(self.line, "Unexpected character.");
                }
            }
        }
    }

    fn identifier(&mut self) {
        while is_alphanumeric(self.peek()) {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        let kind = KEYWORDS.get(text.as_str()).cloned().unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // A fractional part needs a digit after the dot, otherwise the
        // dot is left for the next token.
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        let value = text.parse().unwrap_or(0.0);
        self.add_token(TokenKind::Number(value));
    }

    fn string(&mut self) {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.reporter.error(self.line, "Unterminated string.");
            return;
        }

        // The closing quote.
        self.advance();

        // Trim the surrounding quotes.
        let value: String = self.source[self.start + 1..self.current - 1].iter().collect();
        self.add_token(TokenKind::Str(value));
    }

    fn match_next(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            '\0'
        } else {
            self.source[self.current + 1]
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme: String = self.source[self.start..self.current].iter().collect();
        self.tokens.push(Token { kind, lexeme, line: self.start_line });
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> (Vec<Token>, ErrorReporter) {
        let mut reporter = ErrorReporter::new();
        let tokens = Scanner::new(source, &mut reporter).scan_tokens();
        (tokens, reporter)
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        scan(source).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn punctuation_and_operators() {
        assert_eq!(
            kinds("( ) { } , . - + ; * / ! != = == < <= > >="),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Minus,
                TokenKind::Plus,
                TokenKind::Semicolon,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Bang,
                TokenKind::BangEqual,
                TokenKind::Equal,
                TokenKind::EqualEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_versus_identifiers() {
        assert_eq!(
            kinds("let letter function functional nil nils"),
            vec![
                TokenKind::Let,
                TokenKind::Identifier,
                TokenKind::Function,
                TokenKind::Identifier,
                TokenKind::Nil,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn reserved_words_still_tokenize() {
        assert_eq!(
            kinds("class this super"),
            vec![TokenKind::Class, TokenKind::This, TokenKind::Super, TokenKind::Eof]
        );
    }

    #[test]
    fn number_literals() {
        assert_eq!(
            kinds("12 3.5 0.25"),
            vec![
                TokenKind::Number(12.0),
                TokenKind::Number(3.5),
                TokenKind::Number(0.25),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn trailing_dot_is_not_part_of_the_number() {
        assert_eq!(kinds("123."), vec![TokenKind::Number(123.0), TokenKind::Dot, TokenKind::Eof]);
    }

    #[test]
    fn string_literal_trims_quotes() {
        let (tokens, reporter) = scan("\"hi there\"");
        assert!(!reporter.had_error);
        assert_eq!(tokens[0].kind, TokenKind::Str("hi there".to_string()));
        assert_eq!(tokens[0].lexeme, "\"hi there\"");
    }

    #[test]
    fn multiline_string_counts_lines() {
        let (tokens, _) = scan("\"a\nb\"\nx");
        // The string is reported on the line where it opened.
        assert_eq!(tokens[0].kind, TokenKind::Str("a\nb".to_string()));
        assert_eq!(tokens[0].line, 1);
        // The identifier after the string sits on line 3.
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn unterminated_string_reports_and_emits_nothing() {
        let (tokens, reporter) = scan("\"oops");
        assert!(reporter.had_error);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn comments_and_whitespace_are_discarded() {
        assert_eq!(
            kinds("let x // the rest is noise ;;;\n= 1;"),
            vec![
                TokenKind::Let,
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::Number(1.0),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unexpected_character_reports_and_continues() {
        let (tokens, reporter) = scan("let @ x");
        assert!(reporter.had_error);
        let kinds: Vec<TokenKind> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Let, TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn lexemes_reassemble_the_source_minus_noise() {
        let source = "let answer = 6 * 7; // comment\nprint \"ok\";";
        let (tokens, _) = scan(source);
        let joined: String = tokens.iter().map(|t| t.lexeme.as_str()).collect::<String>();
        assert_eq!(joined, "letanswer=6*7;print\"ok\";");
    }

    #[test]
    fn line_numbers_track_newlines() {
        let (tokens, _) = scan("a\nb\n\nc");
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 2, 4, 4]);
    }
}
