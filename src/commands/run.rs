use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;
use std::{env, thread};

use clap::Args;
use tracing::debug;

use crate::cli_util::print_interpreter_error;
use crate::commands::{install_interrupt_handler, SourceArgs, SourceError};
use crate::config::{self, Overrides, Settings};
use crate::engine::StepControl;
use crate::error::InterpreterError;
use crate::interpreter::Interpreter;
use crate::tape::BoundaryPolicy;

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Print a step-by-step table of operations instead of executing
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Pointer boundary policy: wrap or strict (fallback BF_POLICY; default wrap)
    #[arg(long = "policy", value_name = "POLICY")]
    pub policy: Option<BoundaryPolicy>,

    /// Tape length in cells (fallback BF_CAPACITY; default 30000)
    #[arg(long = "capacity", value_name = "CELLS")]
    pub capacity: Option<usize>,

    /// Wall-clock timeout in milliseconds (fallback BF_TIMEOUT_MS; default none)
    #[arg(long = "timeout", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Maximum interpreter steps before abort (fallback BF_MAX_STEPS; default unlimited)
    #[arg(long = "max-steps", value_name = "N")]
    pub max_steps: Option<u64>,

    /// Read settings from PATH instead of the default bf.toml
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let code_str = match args.source.load() {
        Ok(s) => s,
        Err(e @ (SourceError::Missing | SourceError::Conflict)) => {
            if matches!(e, SourceError::Conflict) {
                eprintln!("{program}: {e}");
            }
            usage_and_exit(program, 2);
        }
        Err(e) => {
            eprintln!("{program}: {e}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    // Resolve limits: flags -> env -> config file -> defaults
    let overrides = Overrides {
        policy: args.policy,
        capacity: args.capacity,
        timeout_ms: args.timeout_ms,
        max_steps: args.max_steps,
    };
    let settings = Settings::resolve(
        overrides,
        |key| env::var(key).ok(),
        config::load(args.config.as_deref()),
    );
    debug!(?settings, "resolved settings");

    if let Err(e) = install_interrupt_handler() {
        eprintln!("{program}: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        return 1;
    }

    let exit_code = execute(program, &code_str, &settings, args.debug);
    let _ = io::stdout().flush();
    exit_code
}

/// Evaluate on a worker thread with cooperative cancellation, waiting at most
/// the configured timeout.
fn execute(program: &str, code_str: &str, settings: &Settings, debug: bool) -> i32 {
    let cancel = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel::<Result<(), InterpreterError>>();

    let max_steps = settings.max_steps.map(|n| usize::try_from(n).unwrap_or(usize::MAX));
    let ctrl = StepControl::new(max_steps, cancel.clone());
    let mut bf = Interpreter::new(settings.capacity, settings.policy);
    bf.set_step_control(ctrl);
    let program_owned = code_str.to_string();

    thread::spawn(move || {
        let res = if debug {
            bf.evaluate_debug(&program_owned, io::stdout())
        } else {
            bf.evaluate(&program_owned)
        };
        let _ = tx.send(res);
    });

    let outcome = match settings.timeout_ms {
        Some(ms) => rx.recv_timeout(Duration::from_millis(ms)),
        None => rx.recv().map_err(|_| mpsc::RecvTimeoutError::Disconnected),
    };

    let timeout_ms = settings.timeout_ms.unwrap_or_default();
    match outcome {
        Ok(Ok(())) => 0,
        Ok(Err(InterpreterError::Canceled)) | Err(mpsc::RecvTimeoutError::Timeout) => {
            cancel.store(true, Ordering::Relaxed);
            eprintln!("Execution aborted: wall-clock timeout exceeded ({timeout_ms} ms)");
            let _ = io::stderr().flush();
            1
        }
        Ok(Err(other)) => {
            print_interpreter_error(Some(program), code_str, &other);
            1
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => 1,
    }
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run [OPTIONS] "<code>"
  {0} run [OPTIONS] --file <PATH>

Options:
  --file,  -f <PATH>   Read the program from PATH instead of positional "<code>"
  --policy <POLICY>    Pointer boundary policy: wrap (default) or strict
  --capacity <CELLS>   Tape length in cells (default 30000)
  --timeout <MS>       Abort after MS milliseconds of wall-clock time
  --max-steps <N>      Abort after N executed instructions
  --config <PATH>      Read settings from PATH instead of the default bf.toml
  --debug, -d          Print a step-by-step table of operations instead of executing
  --help,  -h          Show this help

Notes:
- Characters other than ><+-.,[] are comments and are ignored.
- Options must come before the code: everything after the first code part
  is program text, so `{0} run "+." --policy strict` runs "+.--policystrict".
- Code that starts with '-' must follow a "--" separator: {0} run -- "-[+]".
- Input (`,`) reads a single byte from stdin; on EOF the current cell is set to 0.
- Under the wrap policy the pointer wraps around the tape ends; under the
  strict policy running off either end is an error.

Examples:
- Load a program from a file:
    {0} run --file ./program.bf
- Read bytes from a file as stdin (`,` will consume file input):
    {0} run ",[.,]" < input.txt
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
