use std::ffi::{OsStr, OsString};
use std::io::Write;

use anyhow::Result;
use log::{debug, warn};

use crate::builtins::{ChangeDir, CopyFile, End, Help, KillProcess, ListDir};

pub const NO_COMMAND: &str = "!A command was not entered!";
pub const UNRECOGNIZED: &str = "Sorry, that command is unrecognized";

/// What the loop should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Terminate,
}

/// A command the interpreter can run.
///
/// `argv[0]` is the command name itself. Arguments are raw OS strings so
/// paths reach the filesystem byte for byte.
pub trait Builtin {
    fn usage(&self) -> &'static str;

    fn execute(&self, argv: &[OsString], out: &mut dyn Write) -> Result<Outcome>;
}

pub struct Interpreter {
    commands: Vec<(&'static str, Box<dyn Builtin>)>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new () -> Self {
        Self::empty()
            .register("cp", CopyFile)
            .register("ls", ListDir)
            .register("kill", KillProcess)
            .register("cd", ChangeDir)
            .register("help", Help)
            .register("end", End)
    }

    pub fn empty () -> Self {
        Self { commands: Vec::new() }
    }

    /// Appends `name` paired with its handler to the end of the registry.
    pub fn register<B: Builtin + 'static> (mut self, name: &'static str, builtin: B) -> Self {
        self.commands.push((name, Box::new(builtin)));
        self
    }

    pub fn names (&self) -> Vec<&'static str> {
        self.commands.iter().map(|(name, _)| *name).collect()
    }

    /// First registry entry whose name equals `name` exactly.
    pub fn lookup<S: AsRef<OsStr>> (&self, name: S) -> Option<&dyn Builtin> {
        let name = name.as_ref();
        self.commands
            .iter()
            .find(|(cmd, _)| name == *cmd)
            .map(|(_, builtin)| builtin.as_ref())
    }

    /// Runs `tokens`, handing any handler error back to the caller.
    pub fn try_dispatch (&self, tokens: &[OsString], out: &mut dyn Write) -> Result<Outcome> {
        let Some(cmd) = tokens.first() else {
            writeln!(out, "{NO_COMMAND}")?;
            return Ok(Outcome::Continue);
        };

        match self.lookup(cmd) {
            Some(builtin) => {
                debug!("dispatching {} with {} argument(s)", cmd.to_string_lossy(), tokens.len() - 1);
                builtin.execute(tokens, out)
            }
            None => {
                debug!("no builtin named {cmd:?}");
                writeln!(out, "{UNRECOGNIZED}")?;
                Ok(Outcome::Continue)
            }
        }
    }

    /// Runs `tokens`; handler errors are reported to `out` and never stop the loop.
    pub fn dispatch (&self, tokens: &[OsString], out: &mut dyn Write) -> Outcome {
        match self.try_dispatch(tokens, out) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!("command {:?} failed: {error:#}", tokens.first());
                let _ = writeln!(out, "{error}");
                Outcome::Continue
            }
        }
    }
}

#[cfg(test)]
mod interpreter_tests {
    use super::*;

    fn argv (line: &str) -> Vec<OsString> {
        crate::tokenizer::tokenize(line.as_bytes())
    }

    fn run (interpreter: &Interpreter, line: &str) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = interpreter.dispatch(&argv(line), &mut out);
        (outcome, String::from_utf8(out).unwrap())
    }

    struct Failing;

    impl Builtin for Failing {
        fn usage(&self) -> &'static str { "fail" }

        fn execute(&self, _argv: &[OsString], _out: &mut dyn Write) -> Result<Outcome> {
            anyhow::bail!("it broke")
        }
    }

    struct Marker(&'static str);

    impl Builtin for Marker {
        fn usage(&self) -> &'static str { self.0 }

        fn execute(&self, _argv: &[OsString], out: &mut dyn Write) -> Result<Outcome> {
            writeln!(out, "{}", self.0)?;
            Ok(Outcome::Continue)
        }
    }

    #[test]
    fn empty_tokens_continue () {
        let (outcome, output) = run(&Interpreter::new(), "   \n");

        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(output, format!("{NO_COMMAND}\n"));
    }

    #[test]
    fn unknown_command () {
        let (outcome, output) = run(&Interpreter::new(), "foobar\n");

        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(output, format!("{UNRECOGNIZED}\n"));
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive () {
        let interpreter = Interpreter::new();

        for name in ["CP", "Ls", "END", "c", "cpx", "en", "end2", "end!"] {
            let (outcome, output) = run(&interpreter, name);
            assert_eq!(outcome, Outcome::Continue, "{name}");
            assert_eq!(output, format!("{UNRECOGNIZED}\n"), "{name}");
        }
    }

    #[test]
    fn non_utf8_name_is_unrecognized () {
        use std::os::unix::ffi::OsStringExt;

        let tokens = vec![OsString::from_vec(b"e\xffnd".to_vec())];
        let mut out = Vec::new();

        assert_eq!(Interpreter::new().dispatch(&tokens, &mut out), Outcome::Continue);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{UNRECOGNIZED}\n"));
    }

    #[test]
    fn registry_order () {
        assert_eq!(Interpreter::new().names(), vec!["cp", "ls", "kill", "cd", "help", "end"]);
    }

    #[test]
    fn first_match_wins () {
        let interpreter = Interpreter::empty()
            .register("dup", Marker("first"))
            .register("dup", Marker("second"));

        let (_, output) = run(&interpreter, "dup");

        assert_eq!(output, "first\n");
    }

    #[test]
    fn only_end_terminates () {
        let interpreter = Interpreter::new();

        assert_eq!(run(&interpreter, "end").0, Outcome::Terminate);
        assert_eq!(run(&interpreter, "end now").0, Outcome::Terminate);

        for line in ["help", "cp", "kill", "cd", "kill abc"] {
            assert_eq!(run(&interpreter, line).0, Outcome::Continue, "{line}");
        }
    }

    #[test]
    fn handler_error_is_reported () {
        let interpreter = Interpreter::empty().register("fail", Failing);

        let (outcome, output) = run(&interpreter, "fail");
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(output, "it broke\n");

        let mut out = Vec::new();
        assert!(interpreter.try_dispatch(&argv("fail"), &mut out).is_err());
    }
}
