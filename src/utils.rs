use std::ffi::{ CStr, CString };
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::io;

use crate::error::ShellError;

#[derive(Debug)]
pub struct DirIter {
    dir: *mut libc::DIR
}

impl DirIter {
    pub fn from_dir(dir: *mut libc::DIR) -> Self {
        Self { dir }
    }
}

impl Iterator for DirIter {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.dir.is_null() {
            return None;
        }

        unsafe {
            let entry = libc::readdir(self.dir);
            if entry.is_null() {
                None
            } else {
                let dname = (*entry).d_name.as_ptr();
                Some(CStr::from_ptr(dname).to_string_lossy().to_string())
            }
        }
    }
}

impl Drop for DirIter {
    fn drop(&mut self) {
        if !self.dir.is_null() {
            unsafe { libc::closedir(self.dir); }
            self.dir = std::ptr::null_mut();
        }
    }
}

pub fn read_directory<P> (dirname: P) -> Result<DirIter, ShellError>
where
    P: AsRef<Path>,
{
    let dirname = dirname.as_ref();
    let c_dirname = CString::new(dirname.as_os_str().as_bytes())
        .map_err(|err| ShellError::ReadDir { path: dirname.to_path_buf(), source: err.into() })?;

    unsafe {
        let dir = libc::opendir(c_dirname.as_ptr());
        if dir.is_null() {
            return Err(ShellError::ReadDir { path: dirname.to_path_buf(), source: io::Error::last_os_error() });
        }

        Ok(DirIter::from_dir(dir))
    }
}

/// Directory entries without the `.` and `..` links.
pub fn list_entries<P: AsRef<Path>> (dirname: P) -> Result<Vec<String>, ShellError> {
    Ok(read_directory(dirname)?.filter(|e| e != "." && e != "..").collect())
}

pub fn get_pwd () -> Result<String, ShellError> {
    // getcwd can't allocate for us
    const SIZE: usize = 4096;
    let mut buf = vec![0u8; SIZE];

    unsafe {
        let ptr = libc::getcwd(buf.as_mut_ptr() as *mut libc::c_char, SIZE);

        if ptr.is_null() {
            let source = io::Error::last_os_error();
            Err(ShellError::CurrentDir { code: source.raw_os_error().unwrap_or(0), source })
        } else {
            let pwd = CStr::from_ptr(ptr).to_string_lossy();
            Ok(pwd.to_string())
        }
    }
}

pub fn change_dir (dir: &Path) -> Result<(), ShellError> {
    let path = CString::new(dir.as_os_str().as_bytes())
        .map_err(|err| ShellError::ChangeDir { path: dir.to_path_buf(), source: err.into() })?;

    unsafe {
        if libc::chdir(path.as_ptr()) != 0 {
            return Err(ShellError::ChangeDir { path: dir.to_path_buf(), source: io::Error::last_os_error() });
        }
    }

    Ok(())
}

/// Sends `signal` to `pid`; signal 0 only checks that the process exists.
pub fn send_signal (pid: libc::pid_t, signal: libc::c_int) -> io::Result<()> {
    let res = unsafe { libc::kill(pid, signal) };

    if res == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}
