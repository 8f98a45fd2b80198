//! The IR Builder turns a scanned token stream into one
//! structured Instruction record per source line. It does no
//! checking of its own: run the Validator first and only
//! build IR from a clean report.
use std::fmt;

use super::opcode::Opcode;
use super::scanner::{line_groups, Token};

/// One ILOC instruction in normalized form. Operand slots
/// are filled by token position within the line; a missing
/// position is None, never a placeholder string.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub line: usize,
    pub opcode: Opcode,
    pub op1: Option<String>,
    pub op2: Option<String>,
    pub op3: Option<String>,
}

/// Builds one Instruction per non-empty line group whose
/// first token is a recognized opcode, in ascending line
/// order.
pub fn build(tokens: &[Token]) -> Vec<Instruction> {
    let mut ir: Vec<Instruction> = Vec::new();

    for (line, group) in line_groups(tokens) {
        let opcode = match Opcode::from_lexeme(&group[0].lexeme) {
            Some(op) => op,
            None => continue,
        };

        ir.push(Instruction {
            line,
            opcode,
            op1: operand(&group, 1),
            op2: operand(&group, 3),
            op3: operand(&group, 5),
        });
    }

    ir
}

fn operand(group: &[&Token], index: usize) -> Option<String> {
    group.get(index).map(|t| t.lexeme.clone())
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.opcode)?;

        let labels = self.opcode.labels();
        let slots = [&self.op1, &self.op2, &self.op3];
        for (label, value) in labels.iter().zip(slots.iter()) {
            if let (Some(label), Some(value)) = (label, value) {
                write!(f, " — {}: {}", label, value)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::scanner::scan;

    fn build_from(src: &[&str]) -> Vec<Instruction> {
        let lines: Vec<String> = src.iter().map(|s| s.to_string()).collect();
        build(&scan(&lines))
    }

    fn ins(
        line: usize,
        opcode: Opcode,
        op1: Option<&str>,
        op2: Option<&str>,
        op3: Option<&str>,
    ) -> Instruction {
        Instruction {
            line,
            opcode,
            op1: op1.map(str::to_owned),
            op2: op2.map(str::to_owned),
            op3: op3.map(str::to_owned),
        }
    }

    #[test]
    fn test_build_arithmetic() {
        assert_eq!(
            build_from(&["add r1, r2 => r3"]),
            vec![ins(1, Opcode::Add, Some("r1"), Some("r2"), Some("r3"))]
        );
    }

    #[test]
    fn test_build_each_shape() {
        assert_eq!(
            build_from(&[
                "load r1 => r2",
                "loadI -7 => r3",
                "store r2 => r4",
                "output r3",
                "nop",
            ]),
            vec![
                ins(1, Opcode::Load, Some("r1"), Some("r2"), None),
                ins(2, Opcode::LoadI, Some("-7"), Some("r3"), None),
                ins(3, Opcode::Store, Some("r2"), Some("r4"), None),
                ins(4, Opcode::Output, Some("r3"), None, None),
                ins(5, Opcode::Nop, None, None, None),
            ]
        );
    }

    #[test]
    fn test_skips_empty_and_unrecognized() {
        // Blank lines, comment-only lines, and lines that do
        // not open with a recognized opcode produce no record.
        assert_eq!(
            build_from(&["foo r1 => r2", "// header", "", "nop"]),
            vec![ins(4, Opcode::Nop, None, None, None)]
        );
    }

    #[test]
    fn test_positional_extraction_without_validation() {
        // The builder fills slots purely by position; a short
        // group just leaves the later slots empty.
        assert_eq!(
            build_from(&["add r1, r2"]),
            vec![ins(1, Opcode::Add, Some("r1"), Some("r2"), None)]
        );
    }

    #[test]
    fn test_comment_does_not_shift_operands() {
        assert_eq!(
            build_from(&["sub r4, r5 => r6 // difference"]),
            vec![ins(1, Opcode::Sub, Some("r4"), Some("r5"), Some("r6"))]
        );
    }

    #[test]
    fn test_ascending_line_order() {
        let records = build_from(&["nop", "", "nop", "// gap", "nop"]);
        let lines: Vec<usize> = records.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![1, 3, 5]);
    }

    #[test]
    fn test_idempotence() {
        let src = ["add r1, r2 => r3", "output 5", "nop"];
        assert_eq!(build_from(&src), build_from(&src));
    }

    #[test]
    fn test_display() {
        let records = build_from(&[
            "add r1, r2 => r3",
            "load r1 => r2",
            "loadI 12 => r3",
            "output 5",
            "nop",
        ]);
        let printed: Vec<String> = records.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            printed,
            vec![
                "Line 1: add — op1: r1 — op2: r2 — op3: r3",
                "Line 2: load — src: r1 — dest: r2",
                "Line 3: loadI — op1: 12 — op2: r3",
                "Line 4: output — op1: 5",
                "Line 5: nop",
            ]
        );
    }
}
