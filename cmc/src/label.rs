use std::fmt;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum LabelKind {
    WhileStart,
    WhileEnd,
    Else,
    Endif,
    Skip,
}

/// `<kind>_<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label {
    pub kind: LabelKind,
    pub n: usize,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind, self.n)
    }
}

/// Monotonic label counter for one compilation.
/// Each structured node takes exactly one number.
#[derive(Debug, Default)]
pub struct LabelAllocator {
    next: usize,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self) -> usize {
        let n = self.next;
        self.next += 1;
        n
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// Two labels sharing one number
    pub fn pair(&mut self, first: LabelKind, second: LabelKind) -> (Label, Label) {
        let n = self.alloc();
        (Label { kind: first, n }, Label { kind: second, n })
    }

    pub fn single(&mut self, kind: LabelKind) -> Label {
        Label {
            kind,
            n: self.alloc(),
        }
    }
}
