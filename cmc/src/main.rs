use clap::Parser;
use cmc::builder::Builder;
use cmc::config::Config;
use cmc::emit::emit;
use cmc::error::Error;
use cmc::grammer;
use cmc::msg::{dump, has_error, Msg};
use cmc::output::{class_name, format, output_path, write, Jasm};
use color_print::cprintln;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Source file
    input: String,

    /// Output file [default: <class>.<extension>]
    #[clap(short, long)]
    output: Option<String>,

    /// YAML config file
    #[clap(short, long)]
    config: Option<String>,

    /// Compile bad literals and calls with warnings instead of errors
    #[clap(short, long)]
    lenient: bool,

    /// Print the syntax tree
    #[clap(short, long)]
    dump: bool,

    /// Print compilation steps
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if args.verbose {
        println!("C-minus Compiler by kanade-k-1228");
    }

    let mut config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                Msg::error(e).print(path, "");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    config.lenient |= args.lenient;
    config.dump |= args.dump;

    let source = match std::fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(e) => {
            Msg::error(Error::FileRead(args.input.clone(), e)).print(&args.input, "");
            return ExitCode::FAILURE;
        }
    };

    step(args.verbose, "1. Lex & Parse");
    let (cst, errors) = grammer::parse(&source);
    if !errors.is_empty() {
        dump(&errors, &args.input, &source);
        return ExitCode::FAILURE;
    }

    step(args.verbose, "2. Build AST");
    let (ast, msgs) = Builder::new(config.lenient).build(&cst);
    dump(&msgs, &args.input, &source);
    if has_error(&msgs) {
        return ExitCode::FAILURE;
    }
    if config.dump {
        println!("{ast}");
    }

    step(args.verbose, "3. Emit");
    let lines = emit(&ast);

    step(args.verbose, "4. Write");
    let class = class_name(Path::new(&args.input));
    let path = match &args.output {
        Some(path) => PathBuf::from(path),
        None => output_path(&class, &config.extension),
    };
    if args.verbose {
        cprintln!("  <green>></> {}", path.display());
    }
    let jasm = Jasm {
        class,
        body: format(&lines, config.indent),
    };
    if let Err(e) = write(&path, &jasm) {
        Msg::error(e).print(&path.display().to_string(), "");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn step(verbose: bool, name: &str) {
    if verbose {
        println!("{name}");
    }
}
