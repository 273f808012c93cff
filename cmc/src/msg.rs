use crate::error::Error;
use color_print::cprintln;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgKind {
    Error,
    Warn,
}

/// A diagnostic attached to the source file being compiled.
#[derive(Debug)]
pub struct Msg {
    pub kind: MsgKind,
    pub error: Error,
    pub note: Option<String>,
}

impl Msg {
    pub fn error(error: Error) -> Self {
        Msg {
            kind: MsgKind::Error,
            error,
            note: None,
        }
    }

    pub fn warn(error: Error) -> Self {
        Msg {
            kind: MsgKind::Warn,
            error,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == MsgKind::Error
    }
}

impl From<Error> for Msg {
    fn from(error: Error) -> Self {
        Msg::error(error)
    }
}

impl Msg {
    pub fn print(&self, file: &str, source: &str) {
        match self.kind {
            MsgKind::Error => cprintln!("<red,bold>error</>: {}", self.error),
            MsgKind::Warn => cprintln!("<yellow,bold>warn</>: {}", self.error),
        }
        match self.error.pos() {
            Some(pos) => {
                let raw = source.lines().nth(pos.row).unwrap_or("");
                cprintln!("     <blue>--></> <underline>{}:{}</>", file, pos);
                cprintln!("      <blue>|</>");
                cprintln!(" <blue>{:>4} |</> {}", pos.row + 1, raw);
                cprintln!("      <blue>|</> {}<red,bold>^</>", " ".repeat(pos.col));
            }
            None => cprintln!("     <blue>--></> <underline>{}</>", file),
        }
        if let Some(note) = &self.note {
            cprintln!("      <blue>=</> <green,bold>note</>: {}", note);
        }
    }
}

pub fn dump(msgs: &[Msg], file: &str, source: &str) {
    for msg in msgs {
        msg.print(file, source);
    }
}

pub fn has_error(msgs: &[Msg]) -> bool {
    msgs.iter().any(Msg::is_error)
}
