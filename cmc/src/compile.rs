use crate::ast::Block;
use crate::builder::Builder;
use crate::config::Config;
use crate::emit::Emitter;
use crate::grammer;
use crate::label::LabelAllocator;
use crate::msg::{has_error, Msg};
use crate::output::{format, Jasm};
use arch::inst::Line;

/// Result of a successful compilation
#[derive(Debug)]
pub struct Compiled {
    pub ast: Block,
    pub lines: Vec<Line>,
    pub warnings: Vec<Msg>,
}

impl Compiled {
    pub fn jasm(&self, class: &str, indent: usize) -> Jasm {
        Jasm {
            class: class.to_string(),
            body: format(&self.lines, indent),
        }
    }
}

/// Source to instruction lines with a fresh label counter
pub fn compile(source: &str, config: &Config) -> Result<Compiled, Vec<Msg>> {
    compile_with(source, config, &mut LabelAllocator::new())
}

/// Source to instruction lines, numbering labels from `labels`.
/// Parse errors stop before building; any build error stops before emitting.
pub fn compile_with(
    source: &str,
    config: &Config,
    labels: &mut LabelAllocator,
) -> Result<Compiled, Vec<Msg>> {
    let (cst, errors) = grammer::parse(source);
    if !errors.is_empty() {
        return Err(errors);
    }
    let (ast, msgs) = Builder::new(config.lenient).build(&cst);
    if has_error(&msgs) {
        return Err(msgs);
    }
    let lines = Emitter::new(labels).emit_block(&ast);
    Ok(Compiled {
        ast,
        lines,
        warnings: msgs,
    })
}
