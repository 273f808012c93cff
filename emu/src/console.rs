use color_print::cprintln;
use std::collections::VecDeque;
use std::io::BufRead;

/// Runtime side of `call putint` / `call getint`.
pub trait Console {
    fn putint(&mut self, value: i32);
    fn getint(&mut self) -> Option<i32>;
}

/// Prints to stdout. Input comes from the preloaded values first, then stdin (one integer per line).
pub struct StdConsole {
    style: bool,
    preload: VecDeque<i32>,
}

impl StdConsole {
    pub fn new(style: bool, preload: Vec<i32>) -> Self {
        Self {
            style,
            preload: preload.into(),
        }
    }
}

impl Console for StdConsole {
    fn putint(&mut self, value: i32) {
        match self.style {
            true => cprintln!(" > <r,s>{}</>", value),
            false => println!("{}", value),
        }
    }

    fn getint(&mut self) -> Option<i32> {
        if let Some(value) = self.preload.pop_front() {
            return Some(value);
        }
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => line.trim().parse().ok(),
        }
    }
}

/// In-memory console.
#[derive(Debug, Default)]
pub struct Buffer {
    input: VecDeque<i32>,
    pub output: Vec<i32>,
}

impl Buffer {
    pub fn new(input: impl IntoIterator<Item = i32>) -> Self {
        Self {
            input: input.into_iter().collect(),
            output: Vec::new(),
        }
    }
}

impl Console for Buffer {
    fn putint(&mut self, value: i32) {
        self.output.push(value);
    }

    fn getint(&mut self) -> Option<i32> {
        self.input.pop_front()
    }
}
