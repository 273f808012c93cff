use crate::error::Error;
use arch::inst::Line;
use std::fmt;
use std::path::{Path, PathBuf};

/// Source extensions stripped to form the class name
const SOURCE_EXTENSIONS: [&str; 2] = [".cminus", ".c-"];

/// Labels flush left, everything else indented. One record per line.
pub fn format(lines: &[Line], indent: usize) -> String {
    let mut out = String::new();
    for line in lines {
        if !line.is_label() {
            out.push_str(&" ".repeat(indent));
        }
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}

/// A complete `.jasm` file
pub struct Jasm {
    pub class: String,
    pub body: String,
}

impl fmt::Display for Jasm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".class {}\n\n.main\n{}\nreturn\n", self.class, self.body)
    }
}

/// `prog.cminus` -> `prog`. Other names lose their last extension.
pub fn class_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    for ext in SOURCE_EXTENSIONS {
        if let Some(stem) = file_name.strip_suffix(ext) {
            if !stem.is_empty() {
                return stem.to_string();
            }
        }
    }
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or(file_name)
}

/// `<class>.<extension>` in the current directory
pub fn output_path(class: &str, extension: &str) -> PathBuf {
    PathBuf::from(format!("{class}.{extension}"))
}

pub fn write(path: &Path, jasm: &Jasm) -> Result<(), Error> {
    std::fs::write(path, jasm.to_string())
        .map_err(|e| Error::FileWrite(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch::inst::{Builtin, Inst};

    #[test]
    fn format_indents_instructions_only() {
        let lines = vec![
            Line::Label(format!("skip_0")),
            Line::Inst(Inst::CALL(Builtin::GETINT)),
        ];
        assert_eq!(format(&lines, 4), "skip_0:\n    call getint\n");
        assert_eq!(format(&lines, 2), "skip_0:\n  call getint\n");
        assert_eq!(format(&[], 4), "");
    }

    #[test]
    fn jasm_layout() {
        let jasm = Jasm {
            class: format!("prog"),
            body: format!("    iconst_1\n"),
        };
        assert_eq!(jasm.to_string(), ".class prog\n\n.main\n    iconst_1\n\nreturn\n");
    }

    #[test]
    fn class_names() {
        assert_eq!(class_name(Path::new("dir/prog.cminus")), "prog");
        assert_eq!(class_name(Path::new("prog.c-")), "prog");
        assert_eq!(class_name(Path::new("prog.c")), "prog");
        assert_eq!(class_name(Path::new("prog")), "prog");
        assert_eq!(output_path("prog", "jasm"), PathBuf::from("prog.jasm"));
    }
}
