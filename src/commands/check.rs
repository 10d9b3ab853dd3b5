use std::io::{self, Write};

use clap::Args;

use crate::cli_util::print_interpreter_error;
use crate::commands::{SourceArgs, SourceError};
use crate::interpreter::Interpreter;

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

/// Validate loop structure without executing anything.
pub fn run(program: &str, args: CheckArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let code_str = match args.source.load() {
        Ok(s) => s,
        Err(SourceError::Missing) => usage_and_exit(program, 2),
        Err(e @ SourceError::Conflict) => {
            eprintln!("{program}: {e}");
            usage_and_exit(program, 2);
        }
        Err(e) => {
            eprintln!("{program}: {e}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    match Interpreter::default().check(&code_str) {
        Ok(summary) => {
            println!("ok: {} instructions, {} loops", summary.instructions, summary.loops);
            let _ = io::stdout().flush();
            0
        }
        Err(e) => {
            print_interpreter_error(Some(program), &code_str, &e.into());
            1
        }
    }
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} check "<code>"
  {0} check --file <PATH>

Options:
  --file,  -f <PATH>  Read the program from PATH instead of positional "<code>"
  --help,  -h         Show this help

Description:
  Filters the program and matches its loops without running it. Prints the
  instruction and loop counts, or the first structural error.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
