use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ModelError, ModelResult};

/// Snapshot of the host CPU identity taken during one labeling cycle.
///
/// Fields are private so that every record in circulation went through
/// [`CpuRecord::new`]: the vendor and target are never empty and the
/// target carries no surrounding whitespace. Deserialization validates
/// the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCpuRecord")]
pub struct CpuRecord {
    vendor: String,
    family: u32,
    model: u32,
    target: String,
}

impl CpuRecord {
    /// Build a validated record.
    ///
    /// `target` is trimmed, since `archspec cpu` terminates its output
    /// with a newline.
    ///
    /// # Examples
    /// ```
    /// use afd_model::CpuRecord;
    ///
    /// let cpu = CpuRecord::new("GenuineIntel", 6, 142, "skylake\n").unwrap();
    /// assert_eq!(cpu.target(), "skylake");
    /// ```
    pub fn new(
        vendor: impl Into<String>,
        family: u32,
        model: u32,
        target: impl AsRef<str>,
    ) -> ModelResult<Self> {
        let vendor = vendor.into();
        if vendor.trim().is_empty() {
            return Err(ModelError::EmptyVendor);
        }
        let target = target.as_ref().trim();
        if target.is_empty() {
            return Err(ModelError::EmptyTarget);
        }
        Ok(Self {
            vendor,
            family,
            model,
            target: target.to_string(),
        })
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn family(&self) -> u32 {
        self.family
    }

    pub fn model(&self) -> u32 {
        self.model
    }

    /// Microarchitecture name.
    pub fn target(&self) -> &str {
        &self.target
    }
}

#[derive(Deserialize)]
struct RawCpuRecord {
    vendor: String,
    family: u32,
    model: u32,
    target: String,
}

impl TryFrom<RawCpuRecord> for CpuRecord {
    type Error = ModelError;

    fn try_from(raw: RawCpuRecord) -> Result<Self, Self::Error> {
        CpuRecord::new(raw.vendor, raw.family, raw.model, raw.target)
    }
}

impl fmt::Display for CpuRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} family={} model={} target={}",
            self.vendor, self.family, self.model, self.target
        )
    }
}
