//! The reconciliation state machine.
//!
//! Four operations drive a managed file between absent and present:
//! create and update converge the declared spec (always a full fetch and
//! rewrite), read re-verifies the tracked record against both the local
//! file and the remote source, and delete tears the file down.
//!
//! All state lives in the [`FileSpec`]/[`TrackedFile`] records passed in
//! and returned; the reconciler itself holds only an immutable fetcher, so
//! distinct resources may be reconciled from parallel threads.

use crate::checksum;
use crate::error::Result;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::persist;
use crate::types::{Drift, FileSpec, ReadOutcome, TrackedFile};

/// Reconciles local files against their declared remote sources.
///
/// # Example
///
/// ```no_run
/// use remotefile::{FileSpec, Reconciler};
///
/// let reconciler = Reconciler::new();
/// let spec = FileSpec::new("https://example.com/app.tar.gz", "/opt/app.tar.gz");
///
/// let tracked = reconciler.create(&spec).unwrap();
/// println!("downloaded, id {}", tracked.id());
///
/// match reconciler.read(&tracked).unwrap() {
///     remotefile::ReadOutcome::InSync(refreshed) => println!("still {}", refreshed.id()),
///     remotefile::ReadOutcome::Drifted(drift) => println!("drifted: {drift:?}"),
/// }
/// ```
pub struct Reconciler {
    fetcher: Box<dyn Fetcher>,
}

impl Reconciler {
    /// Create a reconciler with the default HTTP fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fetcher: Box::new(HttpFetcher::new()),
        }
    }

    /// Create a reconciler with a custom fetcher (useful for testing).
    #[must_use]
    pub fn with_fetcher(fetcher: Box<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Bring the resource from absent to present.
    ///
    /// Validates the spec, performs exactly one fetch, writes the body to
    /// `spec.path` and returns the tracked record with both fingerprints.
    /// On any failure no file is written and no record is produced.
    pub fn create(&self, spec: &FileSpec) -> Result<TrackedFile> {
        self.converge(spec)
    }

    /// Re-converge a present resource onto a (possibly changed) spec.
    ///
    /// Behaviorally identical to [`create`](Self::create): every declared
    /// change causes a full re-fetch and rewrite, without diffing against
    /// the previous record.
    pub fn update(&self, spec: &FileSpec) -> Result<TrackedFile> {
        self.converge(spec)
    }

    /// Detect drift on a tracked resource.
    ///
    /// If the destination file is gone the record is stale:
    /// [`ReadOutcome::Drifted`] with [`Drift::FileMissing`], and no fetch
    /// is performed. Otherwise the stored spec is fetched again, so read
    /// also re-verifies that the remote still agrees with the record. A
    /// changed identity is [`Drift::ContentChanged`]; a matching one comes
    /// back [`ReadOutcome::InSync`] with refreshed fingerprints.
    ///
    /// Fetch and stat failures propagate as errors and leave the record
    /// untouched; only a definitively absent file counts as drift.
    pub fn read(&self, tracked: &TrackedFile) -> Result<ReadOutcome> {
        let spec = &tracked.spec;

        if !persist::exists(&spec.path)? {
            log::debug!("{}: destination file is gone", spec.path.display());
            return Ok(ReadOutcome::Drifted(Drift::FileMissing));
        }

        let bytes = self.fetcher.fetch(spec.method, &spec.url, &spec.headers)?;
        let sums = checksum::checksum(&bytes);

        if sums.sha1 != tracked.sha1 {
            log::debug!(
                "{}: remote content changed ({} -> {})",
                spec.path.display(),
                tracked.sha1,
                sums.sha1
            );
            return Ok(ReadOutcome::Drifted(Drift::ContentChanged {
                expected: tracked.sha1.clone(),
                actual: sums.sha1,
            }));
        }

        Ok(ReadOutcome::InSync(TrackedFile {
            spec: spec.clone(),
            sha1: sums.sha1,
            sha256: sums.sha256,
        }))
    }

    /// Remove the destination file.
    ///
    /// Idempotent: an already-absent file is success. Filesystem failures
    /// are logged and swallowed so teardown never blocks.
    pub fn delete(&self, spec: &FileSpec) {
        if let Err(err) = persist::remove(&spec.path) {
            log::warn!("failed to remove {}: {err}", spec.path.display());
        }
    }

    /// Fire-and-forget download: fetch and write without tracking.
    ///
    /// Same validation, status policy and error taxonomy as
    /// [`create`](Self::create), but nothing is fingerprinted or returned.
    pub fn download(&self, spec: &FileSpec) -> Result<()> {
        spec.validate()?;
        let bytes = self.fetcher.fetch(spec.method, &spec.url, &spec.headers)?;
        persist::write(&spec.path, &bytes)
    }

    fn converge(&self, spec: &FileSpec) -> Result<TrackedFile> {
        spec.validate()?;

        let bytes = self.fetcher.fetch(spec.method, &spec.url, &spec.headers)?;
        persist::write(&spec.path, &bytes)?;

        let sums = checksum::checksum(&bytes);
        log::debug!(
            "{}: wrote {} bytes, id {}",
            spec.path.display(),
            bytes.len(),
            sums.sha1
        );

        Ok(TrackedFile {
            spec: spec.clone(),
            sha1: sums.sha1,
            sha256: sums.sha256,
        })
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}
