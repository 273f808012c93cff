use strum::{Display, EnumIter, EnumString};

/// Value-producing operations. Both operands are popped, the result is pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
pub enum Alu {
    #[strum(serialize = "iadd")]
    ADD,
    #[strum(serialize = "isub")]
    SUB,
    #[strum(serialize = "imul")]
    MUL,
    #[strum(serialize = "idiv")]
    DIV,
}

/// Branch conditions of `if_icmp<cmp>`.
/// The branch is taken when `<cmp>` holds between the second-from-top and top values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Cmp {
    EQ,
    NE,
    LT,
    GE,
    GT,
    LE,
}

impl Cmp {
    /// Logical inverse: `a <op> b` holds exactly when `a <op.negate()> b` does not.
    pub fn negate(self) -> Self {
        use Cmp::*;
        match self {
            EQ => NE,
            NE => EQ,
            LT => GE,
            GE => LT,
            GT => LE,
            LE => GT,
        }
    }

    pub fn holds(self, a: i32, b: i32) -> bool {
        use Cmp::*;
        match self {
            EQ => a == b,
            NE => a != b,
            LT => a < b,
            GE => a >= b,
            GT => a > b,
            LE => a <= b,
        }
    }
}

/// 32-bit integer semantics. Division by zero traps (`None`).
pub fn alu_model(op: Alu, a: i32, b: i32) -> Option<i32> {
    use Alu::*;
    match op {
        ADD => Some(a.wrapping_add(b)),
        SUB => Some(a.wrapping_sub(b)),
        MUL => Some(a.wrapping_mul(b)),
        DIV => (b != 0).then(|| a.wrapping_div(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn negate_is_involution() {
        for cmp in Cmp::iter() {
            assert_eq!(cmp.negate().negate(), cmp);
            assert_ne!(cmp.negate(), cmp);
        }
    }

    #[test]
    fn negate_is_complement() {
        for cmp in Cmp::iter() {
            for (a, b) in [(-1, 0), (0, 0), (3, 2), (i32::MIN, i32::MAX)] {
                assert_ne!(cmp.holds(a, b), cmp.negate().holds(a, b), "{cmp} {a} {b}");
            }
        }
    }

    #[test]
    fn alu() {
        assert_eq!(alu_model(Alu::ADD, 2, 3), Some(5));
        assert_eq!(alu_model(Alu::SUB, 2, 3), Some(-1));
        assert_eq!(alu_model(Alu::MUL, -4, 3), Some(-12));
        assert_eq!(alu_model(Alu::DIV, -7, 2), Some(-3));
        assert_eq!(alu_model(Alu::DIV, 1, 0), None);
        assert_eq!(alu_model(Alu::ADD, i32::MAX, 1), Some(i32::MIN));
    }

    #[test]
    fn mnemonic() {
        assert_eq!(Alu::ADD.to_string(), "iadd");
        assert_eq!("idiv".parse::<Alu>(), Ok(Alu::DIV));
        assert_eq!(Cmp::GE.to_string(), "ge");
        assert_eq!("le".parse::<Cmp>(), Ok(Cmp::LE));
    }
}
