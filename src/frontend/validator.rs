//! The Validator takes the token stream from the Scanner
//! and checks every line against its opcode's grammar
//! shape, reporting everything wrong with the program. A
//! bad line never stops later lines from being checked.
use std::fmt;
use std::num::IntErrorKind;

use regex::Regex;

use super::opcode::Opcode;
use super::scanner::{line_groups, Token, TokenKind};

/// One finding, tied to the source line that produced it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Error on line {}: {}", self.line, self.message)
    }
}

pub struct Validator<'a> {
    tokens: &'a [Token],
    diagnostics: Vec<Diagnostic>,
    register_form: Regex,
}

impl<'a> Validator<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Validator {
            tokens,
            diagnostics: Vec::new(),
            // The pattern is a literal and cannot fail to compile.
            register_form: Regex::new(r"^r[0-9]+$").unwrap(),
        }
    }

    /// Run the validator, consuming itself and returning every
    /// diagnostic in line order. An empty result means the
    /// program is a valid ILOC program.
    pub fn run(mut self) -> Vec<Diagnostic> {
        for (line, group) in line_groups(self.tokens) {
            self.check_shape(line, &group);
            // Lexical checks apply to every token on the line,
            // whatever the shape checks concluded.
            for token in &group {
                self.check_token(line, token);
            }
        }
        self.diagnostics
    }

    /// Shape checks for one line: opcode, then token count,
    /// then each grammar position.
    fn check_shape(&mut self, line: usize, group: &[&Token]) {
        let first = group[0];
        let opcode = match (first.kind, Opcode::from_lexeme(&first.lexeme)) {
            (TokenKind::Opcode, Some(op)) => op,
            _ => {
                self.report(line, format!("Unknown opcode '{}'", first.lexeme));
                return;
            }
        };

        if group.len() != opcode.token_count() {
            self.report(
                line,
                format!(
                    "'{}' expects {} token(s), found {}",
                    opcode,
                    opcode.token_count(),
                    group.len()
                ),
            );
            return;
        }

        for (index, slot) in opcode.shape().iter().enumerate() {
            let token = group[index + 1];
            if !slot.accepts(token.kind) {
                self.report(
                    line,
                    format!(
                        "'{}' expects {} as token {}, found '{}'",
                        opcode,
                        slot.expects(),
                        index + 2,
                        token.lexeme
                    ),
                );
            }
        }

        // add/sub/mult reject a pair of constant operands; the
        // shift opcodes are exempt.
        if opcode.forbids_constant_pair()
            && group[1].kind == TokenKind::Constant
            && group[3].kind == TokenKind::Constant
        {
            self.report(
                line,
                format!("Two-constant arithmetic is not allowed for '{}'", opcode),
            );
        }
    }

    /// Lexical checks applied to every token regardless of its
    /// position in the line.
    fn check_token(&mut self, line: usize, token: &Token) {
        match token.kind {
            TokenKind::Constant => match token.lexeme.parse::<i32>() {
                Ok(_) => {}
                Err(err) => match err.kind() {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                        self.report(
                            line,
                            format!("Constant '{}' out of range", token.lexeme),
                        );
                    }
                    _ => {
                        self.report(line, format!("Invalid constant '{}'", token.lexeme));
                    }
                },
            },
            TokenKind::Register => {
                if !self.register_form.is_match(&token.lexeme) {
                    self.report(line, format!("Malformed register '{}'", token.lexeme));
                }
            }
            TokenKind::AssignArrow => {
                if token.lexeme != "=>" {
                    self.report(
                        line,
                        format!("Invalid assignment arrow '{}'", token.lexeme),
                    );
                }
            }
            TokenKind::Unknown => {
                self.report(
                    line,
                    format!("Unrecognized character '{}'", token.lexeme),
                );
            }
            TokenKind::Opcode
            | TokenKind::Identifier
            | TokenKind::Comma
            | TokenKind::Comment => {}
        }
    }

    fn report(&mut self, line: usize, message: String) {
        self.diagnostics.push(Diagnostic { line, message });
    }
}
