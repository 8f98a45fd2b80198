//! This scanner tokenizes ILOC source text.
use std::fmt;

use super::opcode::Opcode;

/// The lexical class of a token.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    Opcode,
    Register,
    Constant,
    Identifier,
    Comma,
    AssignArrow,
    Comment,
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenKind::Opcode => "OPCODE",
            TokenKind::Register => "REGISTER",
            TokenKind::Constant => "CONSTANT",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Comma => "COMMA",
            TokenKind::AssignArrow => "ASSIGN_ARROW",
            TokenKind::Comment => "COMMENT",
            TokenKind::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

// Tokens carry the 1-based number of the line they appear on.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub line: usize,
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    pub fn new(line: usize, kind: TokenKind, lexeme: &str) -> Token {
        Token {
            line,
            kind,
            lexeme: lexeme.to_owned(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.line, self.kind, self.lexeme)
    }
}

/// ILOC is line-oriented: no token spans lines, and a
/// comment swallows the rest of its line. Scanning is
/// total; anything unrecognized becomes an Unknown token
/// rather than an error.
pub fn scan(lines: &[String]) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::with_capacity(lines.len() * 4);

    for (index, line) in lines.iter().enumerate() {
        scan_line(line, index + 1, &mut tokens);
    }

    tokens
}

fn scan_line(line: &str, line_num: usize, out: &mut Vec<Token>) {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    let mut i = 0;

    while i < len {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == '/' && i + 1 < len && chars[i + 1] == '/' {
            let rest: String = chars[i..].iter().collect();
            out.push(Token::new(line_num, TokenKind::Comment, rest.trim_end()));
            break;
        }

        // Register names must be checked before plain words:
        // `r` followed by a digit is a register, a bare `r` is
        // a word like any other.
        if c == 'r' && i + 1 < len && chars[i + 1].is_ascii_digit() {
            let start = i;
            i += 1;
            while i < len && chars[i].is_ascii_digit() {
                i += 1;
            }
            let lexeme: String = chars[start..i].iter().collect();
            out.push(Token::new(line_num, TokenKind::Register, &lexeme));
            continue;
        }

        // Constants may carry a leading minus sign; the sign is
        // part of the lexeme.
        if c.is_ascii_digit() || (c == '-' && i + 1 < len && chars[i + 1].is_ascii_digit()) {
            let start = i;
            i += 1;
            while i < len && chars[i].is_ascii_digit() {
                i += 1;
            }
            let lexeme: String = chars[start..i].iter().collect();
            out.push(Token::new(line_num, TokenKind::Constant, &lexeme));
            continue;
        }

        if c.is_alphabetic() {
            let start = i;
            while i < len && chars[i].is_alphanumeric() {
                i += 1;
            }
            let lexeme: String = chars[start..i].iter().collect();
            let kind = if Opcode::from_lexeme(&lexeme).is_some() {
                TokenKind::Opcode
            } else {
                TokenKind::Identifier
            };
            out.push(Token::new(line_num, kind, &lexeme));
            continue;
        }

        if c == ',' {
            out.push(Token::new(line_num, TokenKind::Comma, ","));
            i += 1;
            continue;
        }

        // The arrow is matched atomically; a lone `=` falls
        // through to Unknown.
        if c == '=' && i + 1 < len && chars[i + 1] == '>' {
            out.push(Token::new(line_num, TokenKind::AssignArrow, "=>"));
            i += 2;
            continue;
        }

        out.push(Token::new(line_num, TokenKind::Unknown, &c.to_string()));
        i += 1;
    }
}

/// Groups the token stream by source line, dropping comment
/// tokens and lines with nothing else on them. The stream is
/// already in line order, so a single forward pass keeps the
/// groups in ascending line order.
pub fn line_groups(tokens: &[Token]) -> Vec<(usize, Vec<&Token>)> {
    let mut groups: Vec<(usize, Vec<&Token>)> = Vec::new();

    for token in tokens {
        if token.kind == TokenKind::Comment {
            continue;
        }
        if let Some((line, group)) = groups.last_mut() {
            if *line == token.line {
                group.push(token);
                continue;
            }
        }
        groups.push((token.line, vec![token]));
    }

    groups
}
