mod builtins;
mod error;
mod interpreter;
mod logger;
mod readline;
mod shell;
mod tokenizer;
mod utils;

use std::env;
use std::ffi::OsString;
use std::io;
use std::process;

use interpreter::Interpreter;
use shell::{Shell, run_batch};

fn main() {
    if let Err(error) = logger::init() {
        eprintln!("{error}");
    }

    let cwd = match utils::get_pwd() {
        Ok(cwd) => cwd,
        Err(error) => {
            eprintln!("{error}");
            process::exit(1);
        }
    };

    let interpreter = Interpreter::new();
    let argv: Vec<OsString> = env::args_os().skip(1).collect();

    if !argv.is_empty() {
        let status = run_batch(&interpreter, &argv, &mut io::stdout());
        process::exit(status);
    }

    let mut shell = Shell::new(interpreter, io::stdin(), io::stdout());

    let res = shell.banner(&cwd).and_then(|_| shell.run());
    if let Err(error) = res {
        eprintln!("terminal stopped: {error:#}");
        process::exit(1);
    }
}
