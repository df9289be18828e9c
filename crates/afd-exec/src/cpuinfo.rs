//! Vendor, family and model from `/proc/cpuinfo`.
//!
//! Only the first processor block is read: the daemon labels the node,
//! and mixed-vendor sockets are not a thing on supported hosts.
use std::path::Path;

use afd_core::ProbeError;

/// Default location of the kernel's CPU description.
pub const CPUINFO_PATH: &str = "/proc/cpuinfo";

/// Raw CPU identity, before the microarchitecture is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuIdentity {
    pub vendor: String,
    pub family: u32,
    pub model: u32,
}

/// Parse the first processor block of a `/proc/cpuinfo` dump.
///
/// x86 keys (`vendor_id`, `cpu family`, `model`) are preferred. Other
/// architectures fill the gaps:
/// - arm: `CPU implementer`, `CPU architecture` and `CPU part`;
/// - ppc64le: the first word of `cpu` (e.g. `POWER9`) as vendor;
/// - s390x: `vendor_id` plus the `machine = ` type from the per-processor line.
///
/// A missing family or model is reported as `0`; a missing vendor is an error.
pub fn parse_cpuinfo(text: &str) -> Result<CpuIdentity, String> {
    let mut vendor = None;
    let mut family = None;
    let mut model = None;
    let mut implementer = None;
    let mut architecture = None;
    let mut part = None;
    let mut power = None;
    let mut machine = None;
    let mut seen_any = false;

    for line in text.lines() {
        if line.trim().is_empty() {
            if seen_any {
                break;
            }
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        seen_any = true;
        let key = key.trim();
        let value = value.trim();

        match key {
            "vendor_id" => vendor = vendor.or(Some(value)),
            "cpu family" => family = family.or(Some(value)),
            "model" => model = model.or(Some(value)),
            "CPU implementer" => implementer = implementer.or(Some(value)),
            "CPU architecture" => architecture = architecture.or(Some(value)),
            "CPU part" => part = part.or(Some(value)),
            "cpu" => power = power.or(value.split([' ', ',']).next()),
            _ if key.starts_with("processor ") => machine = machine.or(s390_machine(value)),
            _ => {}
        }
    }

    let vendor = vendor
        .or(implementer)
        .or(power)
        .filter(|v| !v.is_empty())
        .ok_or("no vendor_id entry")?;
    let family = match family.or(architecture) {
        Some(v) => parse_number(v).ok_or_else(|| format!("invalid cpu family {v:?}"))?,
        None => 0,
    };
    let model = match model.or(part).or(machine) {
        Some(v) => parse_number(v).ok_or_else(|| format!("invalid model {v:?}"))?,
        None => 0,
    };

    Ok(CpuIdentity {
        vendor: vendor.to_string(),
        family,
        model,
    })
}

/// `machine` field of an s390x `processor N: version = .., machine = 8561` line.
fn s390_machine(value: &str) -> Option<&str> {
    value.split(',').find_map(|field| {
        let (k, v) = field.split_once('=')?;
        (k.trim() == "machine").then(|| v.trim())
    })
}

/// Read and parse `path` (normally [`CPUINFO_PATH`]).
pub async fn read_cpuinfo(path: &Path) -> Result<CpuIdentity, ProbeError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ProbeError::CpuInfo {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    parse_cpuinfo(&text).map_err(|reason| ProbeError::CpuInfo {
        path: path.to_path_buf(),
        reason,
    })
}

/// Decimal, or hex with a `0x` prefix (arm part numbers).
fn parse_number(s: &str) -> Option<u32> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}
