use crate::alu::{Alu, Cmp};
use color_print::cformat;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;
use strum::{Display, EnumIter, EnumString};

/// Small constants with a dedicated push opcode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive, EnumString, Display, EnumIter,
)]
#[repr(i8)]
pub enum Const {
    #[strum(serialize = "iconst_m1")]
    M1 = -1,
    #[strum(serialize = "iconst_0")]
    C0 = 0,
    #[strum(serialize = "iconst_1")]
    C1 = 1,
    #[strum(serialize = "iconst_2")]
    C2 = 2,
    #[strum(serialize = "iconst_3")]
    C3 = 3,
    #[strum(serialize = "iconst_4")]
    C4 = 4,
    #[strum(serialize = "iconst_5")]
    C5 = 5,
}

impl Const {
    pub const MIN: i64 = -1;
    pub const MAX: i64 = 5;

    pub fn from_value(value: i64) -> Option<Self> {
        i8::try_from(value)
            .ok()
            .and_then(|v| Self::try_from(v).ok())
    }

    pub fn value(self) -> i32 {
        i8::from(self) as i32
    }
}

/// Routines provided by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Builtin {
    PUTINT,
    GETINT,
}

impl Builtin {
    pub fn arity(self) -> usize {
        match self {
            Builtin::PUTINT => 1,
            Builtin::GETINT => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    CONST(Const),
    LOAD(String),
    STORE(String),
    CALC(Alu),
    IF(Cmp, String),
    GOTO(String),
    CALL(Builtin),
    RETURN(),
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::CONST(c) => write!(f, "{}", c),
            Inst::LOAD(slot) => write!(f, "iload {}", slot),
            Inst::STORE(slot) => write!(f, "istore {}", slot),
            Inst::CALC(alu) => write!(f, "{}", alu),
            Inst::IF(cmp, label) => write!(f, "if_icmp{} {}", cmp, label),
            Inst::GOTO(label) => write!(f, "goto {}", label),
            Inst::CALL(builtin) => write!(f, "call {}", builtin),
            Inst::RETURN() => write!(f, "return"),
        }
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        macro_rules! opfmt {
            ($name:expr, $arg:expr) => {
                cformat!("<red>{:<10}</><blue>{}</>", $name, $arg)
            };
        }
        match self {
            Inst::CONST(c) => opfmt!(c.to_string(), ""),
            Inst::LOAD(slot) => opfmt!("iload", slot),
            Inst::STORE(slot) => opfmt!("istore", slot),
            Inst::CALC(alu) => opfmt!(alu.to_string(), ""),
            Inst::IF(cmp, label) => opfmt!(format!("if_icmp{}", cmp), cformat!("<g>{}</>", label)),
            Inst::GOTO(label) => opfmt!("goto", cformat!("<g>{}</>", label)),
            Inst::CALL(builtin) => opfmt!("call", builtin),
            Inst::RETURN() => opfmt!("return", ""),
        }
    }
}

/// One line of a method body: a label definition or an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Label(String),
    Inst(Inst),
}

impl Line {
    pub fn is_label(&self) -> bool {
        matches!(self, Line::Label(_))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Label(name) => write!(f, "{}:", name),
            Line::Inst(inst) => write!(f, "{}", inst),
        }
    }
}

impl From<Inst> for Line {
    fn from(inst: Inst) -> Self {
        Line::Inst(inst)
    }
}
