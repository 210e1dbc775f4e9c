//! Parallel loading of a whole history root.
//!
//! One [`LoaderSession`] drives one load: it lists the history files, hands
//! them to a small pool of worker threads and folds every per-file [`Site`]
//! into one aggregate on the calling thread, in completion order.
//!
//! Each worker parses a file with its own cursor and registry, so nothing is
//! shared between workers except the job queue, the result channel and the
//! stop flag.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info, warn};

use crate::assembler::{parse_game_history, FileParse};
use crate::errors::{FileFailure, LoadError, RootError};
use crate::history_dir::{history_dir, list_history_files, validate_history_root};
use crate::site::Site;

/// Cooperative cancellation flag shared between a session and its callers.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LoaderState {
    Idle,
    Scanning,
    Dispatched,
    Merged,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LoaderOptions {
    /// Upper bound on worker threads; at least one is used.
    pub workers: usize,
    /// Run [`validate_history_root`] before listing files.
    pub require_valid_root: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism().map_or(1, |n| n.get()),
            require_valid_root: true,
        }
    }
}

/// What a load produced.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub site: Site,
    /// Files whose site was merged, faulty ones included.
    pub parsed_files: usize,
    /// Unreadable files and files with a parse fault.
    pub failures: Vec<FileFailure>,
    /// Results that arrived after the stop flag was raised.
    pub discarded: usize,
    /// Files no worker picked up before the stop.
    pub not_started: usize,
    pub cancelled: bool,
}

impl LoadReport {
    fn empty() -> Self {
        Self {
            site: Site::winamax(),
            parsed_files: 0,
            failures: Vec::new(),
            discarded: 0,
            not_started: 0,
            cancelled: false,
        }
    }
}

type FileCountCallback = Box<dyn Fn(usize) + Send + Sync>;
type ProgressCallback = Box<dyn Fn(&Path) + Send + Sync>;
type Outcome = Result<FileParse, FileFailure>;

/// One load of a history root.
///
/// The stop flag is never cleared: once stopped, a session loads nothing.
/// Build a new session for the next load.
pub struct LoaderSession {
    options: LoaderOptions,
    stop: StopHandle,
    state: Mutex<LoaderState>,
    on_file_count: Option<FileCountCallback>,
    on_progress: Option<ProgressCallback>,
}

impl LoaderSession {
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            options,
            stop: StopHandle::default(),
            state: Mutex::new(LoaderState::Idle),
            on_file_count: None,
            on_progress: None,
        }
    }

    /// Called once with the number of files found, before any is parsed.
    /// Not called when the history directory holds no candidate file.
    pub fn on_file_count(mut self, f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_file_count = Some(Box::new(f));
        self
    }

    /// Called after each file's site has been merged.
    pub fn on_progress(mut self, f: impl Fn(&Path) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn state(&self) -> LoaderState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: LoaderState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Loads every hand history file of `root`.
    ///
    /// Per-file problems end up in [`LoadReport::failures`] and never abort
    /// the load. Only an invalid root (when required) or an unlistable
    /// history directory is an error.
    pub fn load(&self, root: &Path) -> Result<LoadReport, LoadError> {
        self.set_state(LoaderState::Scanning);
        let files = match self.scan(root) {
            Ok(files) => files,
            Err(e) => {
                self.set_state(LoaderState::Idle);
                return Err(e);
            }
        };

        if !files.is_empty() {
            if let Some(cb) = &self.on_file_count {
                cb(files.len());
            }
        }
        info!(
            root = %root.display(),
            files = files.len(),
            workers = self.options.workers,
            "loading hand histories"
        );

        self.set_state(LoaderState::Dispatched);
        let report = self.run(files);
        self.set_state(LoaderState::Merged);
        info!(
            games = report.site.game_count(),
            players = report.site.player_count(),
            parsed = report.parsed_files,
            failures = report.failures.len(),
            discarded = report.discarded,
            not_started = report.not_started,
            cancelled = report.cancelled,
            "load finished"
        );
        Ok(report)
    }

    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>, LoadError> {
        if self.options.require_valid_root {
            validate_history_root(root)?;
        }
        let history = history_dir(root);
        if !history.is_dir() {
            return Err(RootError::MissingHistoryDir(root.to_path_buf()).into());
        }
        list_history_files(&history).map_err(|source| LoadError::Io {
            path: history,
            source,
        })
    }

    fn run(&self, files: Vec<PathBuf>) -> LoadReport {
        let mut report = LoadReport::empty();
        let total = files.len();
        if total == 0 {
            return report;
        }
        let workers = self.options.workers.clamp(1, total);
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<PathBuf>();
        for path in files {
            if job_tx.send(path).is_err() {
                break;
            }
        }
        drop(job_tx);
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<(PathBuf, Outcome)>();
        let mut received = 0;

        thread::scope(|scope| {
            for _ in 0..workers {
                let jobs = job_rx.clone();
                let results = result_tx.clone();
                let stop = &self.stop;
                scope.spawn(move || work(&jobs, stop, &results));
            }
            drop(result_tx);

            for (path, outcome) in result_rx.iter() {
                received += 1;
                self.fold(&mut report, path, outcome);
            }
        });

        report.not_started = total - received;
        report.cancelled = self.stop.is_stopped();
        report
    }

    fn fold(&self, report: &mut LoadReport, path: PathBuf, outcome: Outcome) {
        if self.stop.is_stopped() {
            debug!(file = %path.display(), "result discarded after stop");
            report.discarded += 1;
            return;
        }
        let parse = match outcome {
            Ok(parse) => parse,
            Err(failure) => {
                warn!(%failure, "history file not loaded");
                report.failures.push(failure);
                return;
            }
        };
        if let Some(fault) = parse.fault {
            report
                .failures
                .push(FileFailure::new(&path, fault.to_string()));
        }
        if let Err(e) = report.site.merge(parse.site) {
            warn!(file = %path.display(), error = %e, "site not merged");
            report.failures.push(FileFailure::new(&path, e.to_string()));
            return;
        }
        report.parsed_files += 1;
        if let Some(cb) = &self.on_progress {
            cb(&path);
        }
    }
}

/// Drains `jobs` until it is empty or the stop flag is raised. The job
/// sender is dropped before any worker starts, so `recv` never blocks.
fn work(jobs: &Receiver<PathBuf>, stop: &StopHandle, results: &Sender<(PathBuf, Outcome)>) {
    while !stop.is_stopped() {
        let Ok(path) = jobs.recv() else {
            return;
        };
        let outcome = reload_file(&path);
        if results.send((path, outcome)).is_err() {
            return;
        }
    }
}

/// Parses one history file outside any session. An unreadable file or a
/// panicking parse becomes a [`FileFailure`].
pub fn reload_file(path: &Path) -> Result<FileParse, FileFailure> {
    match panic::catch_unwind(AssertUnwindSafe(|| parse_game_history(path))) {
        Ok(Ok(parse)) => Ok(parse),
        Ok(Err(e)) => Err(FileFailure::new(path, e.to_string())),
        Err(payload) => Err(FileFailure::new(path, panic_reason(payload.as_ref()))),
    }
}

/// Loads `root` with default options and no callbacks.
pub fn import_history(root: &Path) -> Result<Site, LoadError> {
    LoaderSession::new(LoaderOptions::default())
        .load(root)
        .map(|report| report.site)
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("parser panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("parser panicked: {s}")
    } else {
        "parser panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir_all, write};
    use std::sync::atomic::AtomicUsize;
    use tempfile::TempDir;

    fn hand(table: &str, id: usize) -> String {
        format!(
            "Winamax Poker - CashGame - HandId: #{id}-1-1 - Holdem no limit (1€/2€) - 2014/11/01 21:24:02 UTC\n\
             Table: '{table}' 6-max (real money) Seat #1 is the button\n\
             Seat 1: Alice (200€)\n\
             Seat 2: Hero (200€)\n\
             *** ANTE/BLINDS ***\n\
             Alice posts small blind 1€\n\
             Hero posts big blind 2€\n\
             Dealt to Hero [Ah Ad]\n\
             *** PRE-FLOP ***\n\
             Alice folds\n\
             Hero collected 3€ from pot\n\
             *** SUMMARY ***\n\
             Total pot 3€ | No rake\n\n"
        )
    }

    fn root_with(count: usize) -> TempDir {
        let dir = TempDir::new().unwrap();
        create_dir_all(dir.path().join("history")).unwrap();
        for i in 0..count {
            let table = format!("Table {i:02}");
            write(
                dir.path()
                    .join(format!("history/20141101_{table}_real_holdem_no-limit.txt")),
                hand(&table, i),
            )
            .unwrap();
        }
        dir
    }

    fn lenient(workers: usize) -> LoaderOptions {
        LoaderOptions {
            workers,
            require_valid_root: false,
        }
    }

    #[test]
    fn loads_every_file() {
        let dir = root_with(4);
        let count = Arc::new(AtomicUsize::new(0));
        let progress = Arc::new(AtomicUsize::new(0));
        let (c, p) = (count.clone(), progress.clone());
        let session = LoaderSession::new(lenient(3))
            .on_file_count(move |n| c.store(n, Ordering::SeqCst))
            .on_progress(move |_| {
                p.fetch_add(1, Ordering::SeqCst);
            });
        assert_eq!(session.state(), LoaderState::Idle);

        let report = session.load(dir.path()).unwrap();
        assert_eq!(report.site.cash_games().len(), 4);
        assert_eq!(report.site.player_count(), 2);
        assert_eq!(report.site.hero(), Some("Hero"));
        assert_eq!(report.parsed_files, 4);
        assert!(report.failures.is_empty());
        assert!(!report.cancelled);
        assert_eq!(count.load(Ordering::SeqCst), 4);
        assert_eq!(progress.load(Ordering::SeqCst), 4);
        assert_eq!(session.state(), LoaderState::Merged);
    }

    #[test]
    fn more_workers_than_files_still_load_each_file_once() {
        let dir = root_with(3);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        let report = LoaderSession::new(lenient(16))
            .on_progress(move |path| {
                s.lock().unwrap().push(path.to_path_buf());
            })
            .load(dir.path())
            .unwrap();

        assert_eq!(report.parsed_files, 3);
        assert_eq!(report.not_started, 0);
        assert_eq!(report.discarded, 0);
        let mut seen = seen.lock().unwrap().clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn stop_before_dispatch_loads_nothing() {
        let dir = root_with(10);
        let session = LoaderSession::new(lenient(2));
        let handle = session.stop_handle();
        let session = session.on_file_count(move |_| handle.stop());

        let report = session.load(dir.path()).unwrap();
        assert!(report.site.is_empty());
        assert_eq!(report.parsed_files, 0);
        assert_eq!(report.not_started + report.discarded, 10);
        assert!(report.cancelled);
    }

    #[test]
    fn stop_after_first_merge_keeps_exactly_one_game() {
        let dir = root_with(10);
        let session = LoaderSession::new(lenient(2));
        let handle = session.stop_handle();
        let session = session.on_progress(move |_| handle.stop());

        let report = session.load(dir.path()).unwrap();
        assert_eq!(report.site.game_count(), 1);
        assert_eq!(report.parsed_files, 1);
        assert_eq!(1 + report.discarded + report.not_started, 10);
    }

    #[test]
    fn stopped_session_stays_stopped() {
        let dir = root_with(2);
        let session = LoaderSession::new(lenient(1));
        session.stop();
        let report = session.load(dir.path()).unwrap();
        assert!(report.site.is_empty());
        assert_eq!(report.not_started, 2);
    }

    #[test]
    fn faulty_file_is_reported_and_others_still_load() {
        let dir = root_with(3);
        write(
            dir.path()
                .join("history/20141101_Broken_real_holdem_no-limit.txt"),
            "Winamax Poker - CashGame - HandId: #9-9-9 - Holdem no limit (1€/2€) - 2014/11/01 21:24:02 UTC\n\
             Seat 1: Alice (200€)\n",
        )
        .unwrap();

        let report = LoaderSession::new(lenient(2)).load(dir.path()).unwrap();
        assert_eq!(report.site.game_count(), 3);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("20141101_Broken_real_holdem_no-limit.txt"));
        assert!(report.failures[0].reason.contains("missing table line"));
    }

    #[test]
    fn invalid_root_is_rejected_when_required() {
        let dir = root_with(1);
        let err = LoaderSession::new(LoaderOptions {
            workers: 1,
            require_valid_root: true,
        })
        .load(dir.path())
        .unwrap_err();
        assert!(matches!(err, LoadError::Root(RootError::MissingBuddyDir(_))));
    }

    #[test]
    fn missing_history_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let session = LoaderSession::new(lenient(1));
        let err = session.load(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Root(RootError::MissingHistoryDir(_))));
        assert_eq!(session.state(), LoaderState::Idle);
    }

    #[test]
    fn empty_history_dir_skips_the_file_count_callback() {
        let dir = root_with(0);
        let called = Arc::new(AtomicBool::new(false));
        let c = called.clone();
        let report = LoaderSession::new(lenient(4))
            .on_file_count(move |_| c.store(true, Ordering::SeqCst))
            .load(dir.path())
            .unwrap();
        assert!(report.site.is_empty());
        assert!(!called.load(Ordering::SeqCst));
    }

    #[test]
    fn reload_of_missing_file_is_a_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("20141101_Gone_real_holdem_no-limit.txt");
        let failure = reload_file(&path).unwrap_err();
        assert_eq!(failure.path, path);
    }

    #[test]
    fn panic_payloads_become_reasons() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_reason(payload.as_ref()), "parser panicked: boom");
        let payload: Box<dyn Any + Send> = Box::new(3_u8);
        assert_eq!(panic_reason(payload.as_ref()), "parser panicked");
    }
}
