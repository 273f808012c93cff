pub mod console;
pub mod model;

pub use console::{Buffer, Console, StdConsole};
pub use model::{Error, State};
