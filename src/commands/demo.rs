use std::io::{self, Write};

use clap::{Args, ValueEnum};

use crate::cli_util::print_interpreter_error;
use crate::commands::install_interrupt_handler;
use crate::interpreter::Interpreter;
use crate::tape::BoundaryPolicy;

pub const HELLO_WORLD: &str = include_str!("../../demos/hello.bf");
pub const SIERPINSKI: &str = include_str!("../../demos/sierpinski.bf");

/// Bundled demonstration programs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    Hello,
    Sierpinski,
}

impl Demo {
    pub fn source(self) -> &'static str {
        match self {
            Demo::Hello => HELLO_WORLD,
            Demo::Sierpinski => SIERPINSKI,
        }
    }
}

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct DemoArgs {
    /// Which demo to run; runs all of them when omitted
    #[arg(value_enum, value_name = "NAME")]
    pub name: Option<Demo>,

    /// Pointer boundary policy: wrap or strict
    #[arg(long = "policy", value_name = "POLICY", default_value_t = BoundaryPolicy::Wrap)]
    pub policy: BoundaryPolicy,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: DemoArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    if let Err(e) = install_interrupt_handler() {
        eprintln!("{program}: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        return 1;
    }

    let demos: Vec<Demo> = match args.name {
        Some(d) => vec![d],
        None => Demo::value_variants().to_vec(),
    };

    // One instance for every demo; each evaluation starts from a reset
    let mut bf = Interpreter::with_policy(args.policy);
    for demo in demos {
        if let Err(err) = bf.evaluate(demo.source()) {
            print_interpreter_error(Some(program), demo.source(), &err);
            return 1;
        }
    }

    let _ = io::stdout().flush();
    0
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} demo [hello|sierpinski] [--policy wrap|strict]

Options:
  --policy <POLICY>   Pointer boundary policy: wrap (default) or strict
  --help,  -h         Show this help

Description:
  Runs the bundled demonstration programs: "hello" prints Hello World!,
  "sierpinski" draws a Sierpinski triangle. Without a name both run in turn
  on the same interpreter.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
