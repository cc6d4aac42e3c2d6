//! In-memory fakes for the filesystem and process capabilities, plus a log
//! capture helper for asserting on warnings.

use std::{
    cell::RefCell,
    collections::HashMap,
    io::{self, Write},
    path::{Component, Path, PathBuf},
    sync::{Arc, Mutex},
};

use tracing_subscriber::fmt::MakeWriter;

use crate::filesystem::{DirEntryInfo, EntryType, Filesystem};
use crate::git::{ProcessOutput, ProcessRunner};

#[derive(Debug, Default)]
pub struct FakeFilesystem {
    cwd: PathBuf,
    types: HashMap<PathBuf, EntryType>,
    listings: HashMap<PathBuf, Vec<DirEntryInfo>>,
    stat_errors: HashMap<PathBuf, io::ErrorKind>,
    list_errors: HashMap<PathBuf, io::ErrorKind>,
}

impl FakeFilesystem {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        let mut fs = FakeFilesystem {
            cwd: cwd.into(),
            ..Default::default()
        };
        let cwd = fs.cwd.clone();
        fs.insert(&cwd, EntryType::Directory);
        fs
    }

    pub fn dir(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), EntryType::Directory);
        self
    }

    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), EntryType::File);
        self
    }

    pub fn other(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), EntryType::Other);
        self
    }

    /// Marks `path` as a git repository by creating its `.git` directory.
    pub fn repo(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.dir(path).dir(path.join(".git"))
    }

    pub fn fail_listing(mut self, path: impl AsRef<Path>, kind: io::ErrorKind) -> Self {
        self.list_errors.insert(path.as_ref().to_path_buf(), kind);
        self
    }

    pub fn fail_stat(mut self, path: impl AsRef<Path>, kind: io::ErrorKind) -> Self {
        self.stat_errors.insert(path.as_ref().to_path_buf(), kind);
        self
    }

    fn insert(&mut self, path: &Path, entry_type: EntryType) {
        if self.types.contains_key(path) {
            return;
        }
        if let Some(parent) = path.parent() {
            if parent != path && !parent.as_os_str().is_empty() {
                self.insert(parent, EntryType::Directory);
                if let Some(name) = path.file_name() {
                    self.listings
                        .entry(parent.to_path_buf())
                        .or_default()
                        .push(DirEntryInfo {
                            name: name.to_string_lossy().into_owned(),
                            entry_type,
                        });
                }
            }
        }
        self.types.insert(path.to_path_buf(), entry_type);
        if entry_type == EntryType::Directory {
            self.listings.entry(path.to_path_buf()).or_default();
        }
    }

    /// Folds `..` the way the OS does: the component before it must be an
    /// existing directory. There are no symlinks to follow.
    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        let mut resolved = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    match self.types.get(&resolved) {
                        Some(EntryType::Directory) => {}
                        Some(_) => return Err(io::Error::from(io::ErrorKind::NotADirectory)),
                        None => return Err(io::Error::from(io::ErrorKind::NotFound)),
                    }
                    resolved.pop();
                }
                other => resolved.push(other),
            }
        }
        Ok(resolved)
    }
}

impl Filesystem for FakeFilesystem {
    fn stat(&self, path: &Path) -> io::Result<EntryType> {
        if let Some(kind) = self.stat_errors.get(path) {
            return Err(io::Error::from(*kind));
        }
        let path = self.resolve(path)?;
        self.types
            .get(&path)
            .copied()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn list_entries(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        if let Some(kind) = self.list_errors.get(path) {
            return Err(io::Error::from(*kind));
        }
        let path = self.resolve(path)?;
        let path = path.as_path();
        match self.types.get(path) {
            Some(EntryType::Directory) => Ok(self.listings.get(path).cloned().unwrap_or_default()),
            Some(_) => Err(io::Error::from(io::ErrorKind::NotADirectory)),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        self.stat(path)?;
        self.resolve(path)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }
}

/// A recorded invocation: working directory and space-joined arguments.
pub type Invocation = (PathBuf, String);

/// Scripted process runner.
///
/// Unscripted `status --porcelain` calls report a clean tree; every other
/// unscripted command exits with 128, the way git does without an upstream.
#[derive(Debug, Default)]
pub struct FakeProcessRunner {
    responses: HashMap<Invocation, Result<ProcessOutput, io::ErrorKind>>,
    calls: RefCell<Vec<Invocation>>,
}

impl FakeProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, cwd: impl AsRef<Path>, args: &str, stdout: &str) -> Self {
        self.responses.insert(
            (cwd.as_ref().to_path_buf(), args.to_string()),
            Ok(ProcessOutput {
                exit_code: 0,
                stdout: stdout.to_string(),
                stderr: String::new(),
            }),
        );
        self
    }

    pub fn fail(mut self, cwd: impl AsRef<Path>, args: &str, exit_code: i32, stderr: &str) -> Self {
        self.responses.insert(
            (cwd.as_ref().to_path_buf(), args.to_string()),
            Ok(ProcessOutput {
                exit_code,
                stdout: String::new(),
                stderr: stderr.to_string(),
            }),
        );
        self
    }

    pub fn spawn_error(mut self, cwd: impl AsRef<Path>, args: &str, kind: io::ErrorKind) -> Self {
        self.responses
            .insert((cwd.as_ref().to_path_buf(), args.to_string()), Err(kind));
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }
}

impl ProcessRunner for FakeProcessRunner {
    fn run(&self, _program: &str, args: &[&str], cwd: &Path) -> io::Result<ProcessOutput> {
        let key = (cwd.to_path_buf(), args.join(" "));
        self.calls.borrow_mut().push(key.clone());

        match self.responses.get(&key) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(kind)) => Err(io::Error::from(*kind)),
            None if key.1 == "status --porcelain" => Ok(ProcessOutput::default()),
            None => Ok(ProcessOutput {
                exit_code: 128,
                stdout: String::new(),
                stderr: "fatal: no upstream configured for branch".to_string(),
            }),
        }
    }
}

/// Collects formatted `tracing` output in memory.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Runs `f` with a subscriber that writes into the returned buffer.
    pub fn capture<T>(f: impl FnOnce() -> T) -> (T, CapturedLogs) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs)
    }

    pub fn contents(&self) -> String {
        let buffer = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut buffer) = self.0.lock() {
            buffer.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
