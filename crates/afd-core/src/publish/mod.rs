//! Crash-safe replacement of the published label file.
//!
//! Labels are written to a temp file in a scratch directory next to the
//! destination, flushed to disk, and renamed over the destination. A
//! reader of the destination sees either the previous file or the new
//! one, never a partial write. Readers that already hold the old file
//! open keep reading the old content.
mod error;
pub use error::{PublishError, PublishStep};

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use afd_model::LabelSet;
use tempfile::TempPath;
use tracing::trace;

/// Name of the scratch directory created next to the published file.
pub const SCRATCH_DIR_NAME: &str = "afd-tmp";

/// Prefix of temp files created in the scratch directory.
pub const TEMP_FILE_PREFIX: &str = "afd-";

/// Permission bits of the published file (`rw-r--r--`).
pub const PUBLISHED_FILE_MODE: u32 = 0o644;

/// Writes label sets to disk with replace-by-rename semantics.
#[derive(Debug, Clone)]
pub struct AtomicPublisher {
    scratch_dir_name: String,
    prefix: String,
    mode: u32,
}

impl Default for AtomicPublisher {
    fn default() -> Self {
        Self {
            scratch_dir_name: SCRATCH_DIR_NAME.to_string(),
            prefix: TEMP_FILE_PREFIX.to_string(),
            mode: PUBLISHED_FILE_MODE,
        }
    }
}

impl AtomicPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scratch directory used for `dest`.
    pub fn scratch_dir(&self, dest: &Path) -> PathBuf {
        dest.parent()
            .unwrap_or_else(|| Path::new("/"))
            .join(&self.scratch_dir_name)
    }

    /// Publish `labels` at `dest`, replacing any previous content.
    pub fn publish(&self, labels: &LabelSet, dest: &Path) -> Result<(), PublishError> {
        self.stage(labels, dest)?.commit()
    }

    /// Write `labels` to a fully synced temp file without touching `dest`.
    ///
    /// The returned [`StagedFile`] must be committed to take effect;
    /// dropping it removes the temp file.
    pub fn stage(&self, labels: &LabelSet, dest: &Path) -> Result<StagedFile, PublishError> {
        let scratch = self.scratch_dir(dest);
        match fs::create_dir(&scratch) {
            Ok(()) => trace!(dir = %scratch.display(), "scratch directory created"),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(PublishError::new(PublishStep::CreateDir, &scratch, e)),
        }

        let tmp = tempfile::Builder::new()
            .prefix(&self.prefix)
            .tempfile_in(&scratch)
            .map_err(|e| PublishError::new(PublishStep::CreateTemp, &scratch, e))?;
        let tmp_path = tmp.path().to_path_buf();
        let fail = |step: PublishStep| {
            let path = tmp_path.clone();
            move |e: io::Error| PublishError::new(step, &path, e)
        };

        let mut writer = BufWriter::new(tmp.as_file());
        for line in labels.lines() {
            writeln!(writer, "{line}").map_err(fail(PublishStep::Write))?;
        }
        set_mode(tmp.as_file(), self.mode).map_err(fail(PublishStep::Chmod))?;

        let file = writer
            .into_inner()
            .map_err(|e| fail(PublishStep::Close)(e.into_error()))?;
        file.sync_all().map_err(fail(PublishStep::Close))?;

        trace!(tmp = %tmp.path().display(), labels = labels.len(), "labels staged");
        Ok(StagedFile {
            tmp: tmp.into_temp_path(),
            dest: dest.to_path_buf(),
        })
    }
}

/// Closed, synced temp file waiting to be renamed over its destination.
#[derive(Debug)]
pub struct StagedFile {
    tmp: TempPath,
    dest: PathBuf,
}

impl StagedFile {
    /// Location of the temp file.
    pub fn temp_path(&self) -> &Path {
        &self.tmp
    }

    pub fn destination(&self) -> &Path {
        &self.dest
    }

    /// Atomically rename the temp file onto the destination.
    ///
    /// On failure the temp file is removed; a failed removal is ignored.
    pub fn commit(self) -> Result<(), PublishError> {
        let StagedFile { tmp, dest } = self;
        tmp.persist(&dest)
            .map_err(|e| PublishError::new(PublishStep::Rename, &dest, e.error))?;
        trace!(dest = %dest.display(), "labels published");
        Ok(())
    }
}

#[cfg(unix)]
fn set_mode(file: &File, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &File, _mode: u32) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use afd_model::{CpuRecord, render};

    use super::*;

    fn labels(target: &str) -> LabelSet {
        render(&CpuRecord::new("GenuineIntel", 6, 142, target).unwrap())
    }

    fn scratch_entries(publisher: &AtomicPublisher, dest: &Path) -> usize {
        fs::read_dir(publisher.scratch_dir(dest)).unwrap().count()
    }

    #[test]
    fn publish_writes_every_line() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("afd");
        let publisher = AtomicPublisher::new();

        publisher.publish(&labels("skylake"), &dest).unwrap();

        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "archspec.io/cpu.vendor=GenuineIntel\n\
             archspec.io/cpu.model=142\n\
             archspec.io/cpu.family=6\n\
             archspec.io/cpu.target=skylake\n"
        );
        assert_eq!(scratch_entries(&publisher, &dest), 0);
    }

    #[test]
    fn publishing_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("afd");
        let publisher = AtomicPublisher::new();

        publisher.publish(&labels("skylake"), &dest).unwrap();
        let first = fs::read(&dest).unwrap();
        publisher.publish(&labels("skylake"), &dest).unwrap();
        let second = fs::read(&dest).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn existing_scratch_directory_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("afd");
        let publisher = AtomicPublisher::new();
        fs::create_dir(publisher.scratch_dir(&dest)).unwrap();

        publisher.publish(&labels("skylake"), &dest).unwrap();
        assert!(dest.exists());
    }

    #[cfg(unix)]
    #[test]
    fn published_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("afd");
        AtomicPublisher::new()
            .publish(&labels("skylake"), &dest)
            .unwrap();

        let mode = fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn staged_file_does_not_touch_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("afd");
        let publisher = AtomicPublisher::new();
        publisher.publish(&labels("skylake"), &dest).unwrap();
        let before = fs::read_to_string(&dest).unwrap();

        let staged = publisher.stage(&labels("icelake"), &dest).unwrap();
        assert!(staged.temp_path().exists());
        assert!(fs::read_to_string(staged.temp_path()).unwrap().contains("icelake"));
        assert_eq!(fs::read_to_string(&dest).unwrap(), before);

        // interrupted before rename
        let tmp = staged.temp_path().to_path_buf();
        drop(staged);
        assert!(!tmp.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), before);
    }

    #[test]
    fn commit_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("afd");
        let publisher = AtomicPublisher::new();
        publisher.publish(&labels("skylake"), &dest).unwrap();

        let staged = publisher.stage(&labels("icelake"), &dest).unwrap();
        assert_eq!(staged.destination(), dest.as_path());
        staged.commit().unwrap();

        let content = fs::read_to_string(&dest).unwrap();
        assert!(content.ends_with("archspec.io/cpu.target=icelake\n"));
    }

    #[test]
    fn open_reader_keeps_old_content() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("afd");
        let publisher = AtomicPublisher::new();
        publisher.publish(&labels("skylake"), &dest).unwrap();

        let mut reader = File::open(&dest).unwrap();
        publisher.publish(&labels("icelake"), &dest).unwrap();

        let mut old = String::new();
        reader.read_to_string(&mut old).unwrap();
        assert!(old.ends_with("archspec.io/cpu.target=skylake\n"));
        assert!(fs::read_to_string(&dest).unwrap().ends_with("target=icelake\n"));
    }

    #[test]
    fn scratch_creation_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("features.d");
        fs::write(&not_a_dir, b"").unwrap();
        let dest = not_a_dir.join("afd");

        let err = AtomicPublisher::new()
            .publish(&labels("skylake"), &dest)
            .unwrap_err();
        assert_eq!(err.step(), PublishStep::CreateDir);
        assert!(err.path().ends_with(SCRATCH_DIR_NAME));
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("afd");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("occupied"), b"x").unwrap();
        let publisher = AtomicPublisher::new();

        let err = publisher.publish(&labels("skylake"), &dest).unwrap_err();

        assert_eq!(err.step(), PublishStep::Rename);
        assert_eq!(err.path(), dest.as_path());
        assert_eq!(scratch_entries(&publisher, &dest), 0);
        assert!(dest.join("occupied").exists());
    }
}
