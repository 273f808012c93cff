pub mod alu;
pub mod asm;
pub mod inst;
