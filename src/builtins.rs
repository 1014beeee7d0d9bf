use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::{self, Write};
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use anyhow::Result;
use log::info;

use crate::error::ShellError;
use crate::interpreter::{Builtin, Outcome};
use crate::utils::{change_dir, get_pwd, list_entries, send_signal};

pub const HELP_TEXT: &str = "\
Available commands:
  cp <source> <destination>   copy a file
  ls                          list the working directory
  kill <pid>                  forcibly terminate a process
  cd <directory>              change the working directory
  help                        show this message
  end                         leave the terminal";

pub struct CopyFile;

impl Builtin for CopyFile {
    fn usage(&self) -> &'static str { "cp <source> <destination>" }

    fn execute(&self, argv: &[OsString], out: &mut dyn Write) -> Result<Outcome> {
        let (Some(source), Some(destination)) = (argv.get(1), argv.get(2)) else {
            return Err(ShellError::Usage {
                hint: "Please input a source and destination, ie. cp source destination",
                usage: self.usage(),
            }.into());
        };
        let (source, destination) = (Path::new(source), Path::new(destination));

        writeln!(out, "Copying {} to {}..", source.display(), destination.display())?;

        // both ends are opened before any byte moves
        let mut src = File::open(source)
            .map_err(|err| ShellError::Open { path: source.to_path_buf(), source: err })?;

        // File::create would truncate the source before it is read
        if let (Ok(from), Ok(to)) = (src.metadata(), fs::metadata(destination)) {
            if from.dev() == to.dev() && from.ino() == to.ino() {
                return Err(ShellError::SameFile { from: source.to_path_buf(), to: destination.to_path_buf() }.into());
            }
        }

        let mut dest = File::create(destination)
            .map_err(|err| ShellError::Open { path: destination.to_path_buf(), source: err })?;

        let copied = io::copy(&mut src, &mut dest)
            .and_then(|n| dest.sync_all().map(|_| n))
            .map_err(|err| ShellError::Copy { from: source.to_path_buf(), to: destination.to_path_buf(), source: err })?;

        info!("copied {copied} bytes from {} to {}", source.display(), destination.display());
        writeln!(out, "...Successful")?;

        Ok(Outcome::Continue)
    }
}

pub struct ListDir;

impl Builtin for ListDir {
    fn usage(&self) -> &'static str { "ls" }

    fn execute(&self, _argv: &[OsString], out: &mut dyn Write) -> Result<Outcome> {
        writeln!(out, "Listing contents of the directory...")?;

        for entry in list_entries(get_pwd()?)? {
            writeln!(out, "\t{entry}")?;
        }

        Ok(Outcome::Continue)
    }
}

pub struct KillProcess;

impl KillProcess {
    fn parse_pid (arg: &OsStr) -> Result<libc::pid_t, ShellError> {
        match arg.to_str().map(str::parse::<libc::pid_t>) {
            // 0 and negative ids address process groups
            Some(Ok(pid)) if pid > 0 => Ok(pid),
            _ => Err(ShellError::InvalidPid(arg.to_string_lossy().into_owned())),
        }
    }
}

impl Builtin for KillProcess {
    fn usage(&self) -> &'static str { "kill <pid>" }

    fn execute(&self, argv: &[OsString], out: &mut dyn Write) -> Result<Outcome> {
        writeln!(out, "Executing kill command...")?;

        let Some(arg) = argv.get(1) else {
            return Err(ShellError::Usage { hint: "Please enter a valid Process ID", usage: self.usage() }.into());
        };

        let pid = Self::parse_pid(arg)?;
        if pid as u32 == std::process::id() {
            return Err(ShellError::OwnProcess(pid).into());
        }

        if let Err(err) = send_signal(pid, 0) {
            return Err(match err.raw_os_error() {
                Some(libc::ESRCH) => ShellError::NoSuchProcess(pid),
                _ => ShellError::Signal { pid, source: err },
            }.into());
        }

        send_signal(pid, libc::SIGKILL).map_err(|err| ShellError::Signal { pid, source: err })?;

        info!("sent SIGKILL to {pid}");
        writeln!(out, "Process {pid} terminated")?;

        Ok(Outcome::Continue)
    }
}

pub struct ChangeDir;

impl Builtin for ChangeDir {
    fn usage(&self) -> &'static str { "cd <directory>" }

    fn execute(&self, argv: &[OsString], _out: &mut dyn Write) -> Result<Outcome> {
        let Some(dir) = argv.get(1) else {
            return Err(ShellError::Usage { hint: "Please enter a directory, ie. cd directory", usage: self.usage() }.into());
        };

        change_dir(Path::new(dir))?;

        Ok(Outcome::Continue)
    }
}

pub struct Help;

impl Builtin for Help {
    fn usage(&self) -> &'static str { "help" }

    fn execute(&self, _argv: &[OsString], out: &mut dyn Write) -> Result<Outcome> {
        writeln!(out, "{HELP_TEXT}")?;
        Ok(Outcome::Continue)
    }
}

pub struct End;

impl Builtin for End {
    fn usage(&self) -> &'static str { "end" }

    fn execute(&self, _argv: &[OsString], _out: &mut dyn Write) -> Result<Outcome> {
        Ok(Outcome::Terminate)
    }
}
