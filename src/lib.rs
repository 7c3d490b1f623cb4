//! # remotefile
//!
//! Declarative management of files downloaded from remote URLs.
//!
//! A [`FileSpec`] declares what should exist: a URL, an HTTP method,
//! optional headers and a local destination path. The [`Reconciler`]
//! converges the local file onto that declaration and hands back a
//! [`TrackedFile`] whose content fingerprints let configuration-management
//! tooling detect drift, no-op on an unchanged declaration, and re-converge
//! when either side changes.
//!
//! This crate provides functionality for:
//! - Downloading a file via GET or POST with custom headers
//! - Fingerprinting the content (SHA-1 identity, SHA-256 verification)
//! - Detecting drift on read: a missing file or changed remote content
//!   signals the orchestrator to drop the tracked record
//! - Idempotent teardown of the destination file
//!
//! ## Example
//!
//! ```no_run
//! use remotefile::{FileSpec, ReadOutcome, Reconciler};
//!
//! let reconciler = Reconciler::new();
//!
//! // Declare and converge.
//! let spec = FileSpec::new("https://example.com/app.tar.gz", "/opt/app.tar.gz")
//!     .header("Authorization", "Bearer xyz");
//! let tracked = reconciler.create(&spec).expect("download failed");
//! println!("downloaded, id {}", tracked.id());
//!
//! // Later: check for drift. The orchestrator persists `tracked` between
//! // runs and drops it when a read comes back Drifted.
//! match reconciler.read(&tracked).expect("read failed") {
//!     ReadOutcome::InSync(refreshed) => println!("in sync, id {}", refreshed.id()),
//!     ReadOutcome::Drifted(drift) => println!("drifted: {drift:?}"),
//! }
//!
//! // Teardown is idempotent and never blocks.
//! reconciler.delete(&spec);
//! ```
//!
//! ## Orchestration contract
//!
//! Each operation runs to completion synchronously; the reconciler holds no
//! mutable state, so distinct resources may be reconciled from parallel
//! threads. A destination path is owned by exactly one declared resource —
//! two specs sharing a path is a configuration error, not something guarded
//! against at runtime.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checksum;
pub mod error;
pub mod fetch;
pub mod persist;
pub mod reconcile;
pub mod types;

pub use checksum::{Checksums, checksum};
pub use error::{Error, Result};
pub use fetch::{Fetcher, HttpFetcher, MockFetcher, RecordedRequest};
pub use reconcile::Reconciler;
pub use types::{Drift, FileSpec, Method, ReadOutcome, TrackedFile};
