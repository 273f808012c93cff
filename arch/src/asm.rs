use crate::alu::{Alu, Cmp};
use crate::inst::{Builtin, Const, Inst, Line};
use indexmap::IndexMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown operation: `{0}`")]
    UnknownOperation(String),

    #[error("More argument required for `{0}`")]
    MissingArgument(String),

    #[error("Unexpected argument for `{0}`: `{1}`")]
    UnexpectedArgument(String, String),

    #[error("Unknown builtin: `{0}`")]
    UnknownBuiltin(String),

    #[error("Re-defined label: `{0}`")]
    RedefinedLabel(String),

    #[error("line {line}: {source}")]
    At {
        line: usize,
        #[source]
        source: Box<Error>,
    },
}

// ----------------------------------------------------------------------------
// Statement

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Class(String),
    Main,
    Label(String),
    Inst(Inst),
}

impl Stmt {
    pub fn parse(code: &str) -> Result<Option<Stmt>, Error> {
        let words: Vec<&str> = code.split_whitespace().collect();
        let Some((head, args)) = words.split_first() else {
            return Ok(None);
        };

        // .class Name / .main
        match *head {
            ".class" => {
                let name = args
                    .first()
                    .ok_or_else(|| Error::MissingArgument(head.to_string()))?;
                return Ok(Some(Stmt::Class(name.to_string())));
            }
            ".main" => return Ok(Some(Stmt::Main)),
            _ => {}
        }

        // while_start_0:
        if let Some(label) = head.strip_suffix(':') {
            if let Some(extra) = args.first() {
                return Err(Error::UnexpectedArgument(head.to_string(), extra.to_string()));
            }
            return Ok(Some(Stmt::Label(label.to_string())));
        }

        parse_inst(head, args).map(|inst| Some(Stmt::Inst(inst)))
    }
}

fn parse_inst(op: &str, args: &[&str]) -> Result<Inst, Error> {
    // Exactly `$n` operands are accepted
    macro_rules! arity {
        ($n:expr) => {
            if args.len() < $n {
                return Err(Error::MissingArgument(op.to_string()));
            }
            if let Some(extra) = args.get($n) {
                return Err(Error::UnexpectedArgument(op.to_string(), extra.to_string()));
            }
        };
    }

    if let Ok(c) = op.parse::<Const>() {
        arity!(0);
        return Ok(Inst::CONST(c));
    }
    if let Ok(alu) = op.parse::<Alu>() {
        arity!(0);
        return Ok(Inst::CALC(alu));
    }
    if let Some(cmp) = op.strip_prefix("if_icmp") {
        let cmp = cmp
            .parse::<Cmp>()
            .map_err(|_| Error::UnknownOperation(op.to_string()))?;
        arity!(1);
        return Ok(Inst::IF(cmp, args[0].to_string()));
    }
    match op {
        "iload" => {
            arity!(1);
            Ok(Inst::LOAD(args[0].to_string()))
        }
        "istore" => {
            arity!(1);
            Ok(Inst::STORE(args[0].to_string()))
        }
        "goto" => {
            arity!(1);
            Ok(Inst::GOTO(args[0].to_string()))
        }
        "call" => {
            arity!(1);
            let builtin = args[0]
                .parse::<Builtin>()
                .map_err(|_| Error::UnknownBuiltin(args[0].to_string()))?;
            Ok(Inst::CALL(builtin))
        }
        "return" => {
            arity!(0);
            Ok(Inst::RETURN())
        }
        _ => Err(Error::UnknownOperation(op.to_string())),
    }
}

// ----------------------------------------------------------------------------
// Program

/// A loaded `.jasm` method body.
/// Each label maps to the index of the instruction that follows it.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub class: Option<String>,
    pub insts: Vec<Inst>,
    pub labels: IndexMap<String, usize>,
}

impl Program {
    pub fn parse(text: &str) -> Result<Program, Error> {
        let mut program = Program::default();
        for (idx, raw) in text.lines().enumerate() {
            let at = |source: Error| Error::At {
                line: idx + 1,
                source: Box::new(source),
            };
            match Stmt::parse(raw).map_err(at)? {
                None | Some(Stmt::Main) => {}
                Some(Stmt::Class(name)) => program.class = Some(name),
                Some(Stmt::Label(label)) => {
                    if program.labels.contains_key(&label) {
                        return Err(at(Error::RedefinedLabel(label)));
                    }
                    program.labels.insert(label, program.insts.len());
                }
                Some(Stmt::Inst(inst)) => program.insts.push(inst),
            }
        }
        Ok(program)
    }

    pub fn from_lines(lines: &[Line]) -> Result<Program, Error> {
        let text = lines
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Program::parse(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stmt() {
        assert_eq!(Stmt::parse("   "), Ok(None));
        assert_eq!(
            Stmt::parse(".class Foo"),
            Ok(Some(Stmt::Class(format!("Foo"))))
        );
        assert_eq!(Stmt::parse(".main"), Ok(Some(Stmt::Main)));
        assert_eq!(
            Stmt::parse("else_0:"),
            Ok(Some(Stmt::Label(format!("else_0"))))
        );
        assert_eq!(
            Stmt::parse("    iconst_m1"),
            Ok(Some(Stmt::Inst(Inst::CONST(Const::M1))))
        );
        assert_eq!(
            Stmt::parse("    imul"),
            Ok(Some(Stmt::Inst(Inst::CALC(Alu::MUL))))
        );
        assert_eq!(
            Stmt::parse("    if_icmpne else_0"),
            Ok(Some(Stmt::Inst(Inst::IF(Cmp::NE, format!("else_0")))))
        );
        assert_eq!(
            Stmt::parse("    call getint"),
            Ok(Some(Stmt::Inst(Inst::CALL(Builtin::GETINT))))
        );
    }

    #[test]
    fn stmt_errors() {
        assert_eq!(
            Stmt::parse("iconst_6"),
            Err(Error::UnknownOperation(format!("iconst_6")))
        );
        assert_eq!(
            Stmt::parse("iload"),
            Err(Error::MissingArgument(format!("iload")))
        );
        assert_eq!(
            Stmt::parse("iadd x"),
            Err(Error::UnexpectedArgument(format!("iadd"), format!("x")))
        );
        assert_eq!(
            Stmt::parse("if_icmpxx l"),
            Err(Error::UnknownOperation(format!("if_icmpxx")))
        );
        assert_eq!(
            Stmt::parse("call printf"),
            Err(Error::UnknownBuiltin(format!("printf")))
        );
    }

    #[test]
    fn program() {
        let text = ".class T\n\n.main\nloop:\n    iload x\n    goto loop\nend:\n    return\n";
        let program = Program::parse(text).unwrap();
        assert_eq!(program.class.as_deref(), Some("T"));
        assert_eq!(program.insts.len(), 3);
        assert_eq!(program.labels.get("loop"), Some(&0));
        assert_eq!(program.labels.get("end"), Some(&2));
    }

    #[test]
    fn program_redefined_label() {
        let err = Program::parse("a:\na:\n").unwrap_err();
        assert_eq!(
            err,
            Error::At {
                line: 2,
                source: Box::new(Error::RedefinedLabel(format!("a")))
            }
        );
    }

    #[test]
    fn roundtrip_lines() {
        let lines = vec![
            Line::Label(format!("skip_0")),
            Line::Inst(Inst::CONST(Const::C2)),
            Line::Inst(Inst::STORE(format!("x"))),
        ];
        let program = Program::from_lines(&lines).unwrap();
        assert_eq!(program.insts[1], Inst::STORE(format!("x")));
        assert_eq!(program.labels.get("skip_0"), Some(&0));
    }
}
