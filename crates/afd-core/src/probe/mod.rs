//! CPU identification capability used by the labeling loop.
//!
//! The loop only knows this trait; concrete probers (an `archspec`
//! subprocess, an in-process library, a fixed record in tests) are
//! injected when the [`crate::Labeler`] is built.
mod error;
pub use error::ProbeError;

use std::sync::Arc;

use afd_model::CpuRecord;
use async_trait::async_trait;

/// Source of [`CpuRecord`] snapshots.
///
/// A prober is called once per cycle and never retried within a cycle:
/// the next attempt happens on the next interval.
#[async_trait]
pub trait CpuProber: Send + Sync {
    /// Prober name used in logs.
    fn name(&self) -> &'static str;

    /// Take a fresh snapshot of the host CPU.
    async fn probe(&self) -> Result<CpuRecord, ProbeError>;
}

/// Shared handle to a prober.
pub type ProberHandle = Arc<dyn CpuProber>;
