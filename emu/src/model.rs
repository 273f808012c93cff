use crate::console::Console;
use arch::alu::alu_model;
use arch::asm::Program;
use arch::inst::{Builtin, Inst};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("[{0:0>4}] Stack underflow")]
    StackUnderflow(usize),

    #[error("[{0:0>4}] Read of unassigned slot: `{1}`")]
    UndefinedSlot(usize, String),

    #[error("[{0:0>4}] Undefined label: `{1}`")]
    UndefinedLabel(usize, String),

    #[error("[{0:0>4}] Division by zero")]
    DivisionByZero(usize),

    #[error("[{0:0>4}] No more input for getint")]
    InputExhausted(usize),

    #[error("Step limit exceeded: {0}")]
    StepLimit(u64),
}

pub struct State {
    program: Program,
    pc: usize,
    stack: Vec<i32>,
    slots: HashMap<String, i32>,
    halted: bool,
}

// Accessors
impl State {
    pub fn new(program: Program) -> Self {
        State {
            program,
            pc: 0,
            stack: Vec::new(),
            slots: HashMap::new(),
            halted: false,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.halted || self.pc >= self.program.insts.len()
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn stack(&self) -> &[i32] {
        &self.stack
    }

    pub fn slot(&self, name: &str) -> Option<i32> {
        self.slots.get(name).copied()
    }

    pub fn inst(&self, pc: usize) -> Option<&Inst> {
        self.program.insts.get(pc)
    }

    fn pop(&mut self) -> Result<i32, Error> {
        self.stack.pop().ok_or(Error::StackUnderflow(self.pc))
    }

    fn jump(&mut self, label: &str) -> Result<(), Error> {
        match self.program.labels.get(label) {
            Some(&target) => {
                self.pc = target;
                Ok(())
            }
            None => Err(Error::UndefinedLabel(self.pc, label.to_string())),
        }
    }
}

// Execution
impl State {
    /// Executes one instruction and returns its address.
    pub fn exec(&mut self, console: &mut impl Console) -> Result<usize, Error> {
        let pc = self.pc;
        let Some(inst) = self.program.insts.get(pc).cloned() else {
            self.halted = true;
            return Ok(pc);
        };

        match inst {
            Inst::CONST(c) => {
                self.stack.push(c.value());
                self.pc += 1;
            }
            Inst::LOAD(slot) => {
                let value = self
                    .slot(&slot)
                    .ok_or_else(|| Error::UndefinedSlot(pc, slot.clone()))?;
                self.stack.push(value);
                self.pc += 1;
            }
            Inst::STORE(slot) => {
                let value = self.pop()?;
                self.slots.insert(slot, value);
                self.pc += 1;
            }
            Inst::CALC(alu) => {
                let b = self.pop()?;
                let a = self.pop()?;
                let value = alu_model(alu, a, b).ok_or(Error::DivisionByZero(pc))?;
                self.stack.push(value);
                self.pc += 1;
            }
            Inst::IF(cmp, label) => {
                let b = self.pop()?;
                let a = self.pop()?;
                if cmp.holds(a, b) {
                    self.jump(&label)?;
                } else {
                    self.pc += 1;
                }
            }
            Inst::GOTO(label) => self.jump(&label)?,
            Inst::CALL(Builtin::PUTINT) => {
                let value = self.pop()?;
                console.putint(value);
                self.pc += 1;
            }
            Inst::CALL(Builtin::GETINT) => {
                let value = console.getint().ok_or(Error::InputExhausted(pc))?;
                self.stack.push(value);
                self.pc += 1;
            }
            Inst::RETURN() => self.halted = true,
        }
        Ok(pc)
    }

    /// Runs until `return` or the end of the body. Returns the number of executed steps.
    pub fn run(&mut self, console: &mut impl Console, max_steps: u64) -> Result<u64, Error> {
        let mut steps = 0;
        while !self.is_terminated() {
            if steps >= max_steps {
                return Err(Error::StepLimit(max_steps));
            }
            self.exec(console)?;
            steps += 1;
        }
        Ok(steps)
    }
}
