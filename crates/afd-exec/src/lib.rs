mod error;
pub use error::ExecError;

mod cpuinfo;
pub use cpuinfo::{CPUINFO_PATH, CpuIdentity, parse_cpuinfo, read_cpuinfo};

#[cfg(feature = "archspec")]
pub mod archspec;
#[cfg(feature = "archspec")]
pub use archspec::{ArchspecConfig, ArchspecProber};
