use arch::asm::Program;
use clap::Parser;
use color_print::{cformat, cprintln};
use emu::{State, StdConsole};
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(
    name = "JASM Emulator",
    author = "kanade-k-1228",
    version = "v1.0.0",
    about = "Interpreter for JASM stack machine programs"
)]
struct Args {
    /// Values returned by `getint` before falling back to stdin
    #[arg(short, long)]
    input: Vec<i32>,

    /// YAML list of values returned by `getint`
    #[arg(short = 'f', long)]
    input_file: Option<String>,

    /// Print every executed instruction
    #[arg(short, long)]
    trace: bool,

    /// Highlight program output
    #[arg(short, long)]
    style: bool,

    #[arg(short = 'm', long, default_value_t = 1_000_000)]
    max_steps: u64,

    #[arg(default_value = "main.jasm")]
    input_file_path: String,
}

fn load_inputs(args: &Args) -> Result<Vec<i32>, String> {
    let mut inputs = args.input.clone();
    if let Some(fname) = &args.input_file {
        let file = File::open(fname).map_err(|e| cformat!("<r,s>Failed to open File</>: {}: {}", fname, e))?;
        let list: Vec<i32> = serde_yaml::from_reader(BufReader::new(file))
            .map_err(|e| cformat!("<r,s>Invalid input list</>: {}: {}", fname, e))?;
        inputs.extend(list);
    }
    Ok(inputs)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let text = match std::fs::read_to_string(&args.input_file_path) {
        Ok(text) => text,
        Err(e) => {
            cprintln!("<red,bold>error</>: Failed to open File: {}: {}", args.input_file_path, e);
            return ExitCode::FAILURE;
        }
    };
    let program = match Program::parse(&text) {
        Ok(program) => program,
        Err(e) => {
            cprintln!("<red,bold>error</>: {}: {}", args.input_file_path, e);
            return ExitCode::FAILURE;
        }
    };
    let inputs = match load_inputs(&args) {
        Ok(inputs) => inputs,
        Err(msg) => {
            cprintln!("<red,bold>error</>: {}", msg);
            return ExitCode::FAILURE;
        }
    };

    if args.trace {
        println!("+-----------------------------------------------+");
        println!("| {:<45} |", program.class.as_deref().unwrap_or(&args.input_file_path));
        println!("+-----------------------------------------------+");
    }

    let mut state = State::new(program);
    let mut console = StdConsole::new(args.style, inputs);
    let mut time: u64 = 0;
    while !state.is_terminated() {
        if time >= args.max_steps {
            cprintln!("<red,bold>error</>: {}", emu::Error::StepLimit(args.max_steps));
            return ExitCode::FAILURE;
        }
        if args.trace {
            if let Some(inst) = state.inst(state.pc()) {
                println!("[{:0>4}] {}", time, inst.cformat());
            }
        }
        if let Err(e) = state.exec(&mut console) {
            cprintln!("<red,bold>error</>: {}", e);
            return ExitCode::FAILURE;
        }
        time += 1;
    }

    if args.trace {
        println!("=================================================");
    }
    ExitCode::SUCCESS
}
