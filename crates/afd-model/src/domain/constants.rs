//! Well-known label keys published to the node-feature-discovery file.
//!
//! The consumer matches on these exact strings, so they are part of the
//! external contract and must not change between releases.

/// Namespace shared by every label this daemon publishes.
pub const LABEL_PREFIX: &str = "archspec.io/cpu.";

/// CPU vendor string as reported by the processor (e.g. `GenuineIntel`).
pub const LABEL_CPU_VENDOR: &str = "archspec.io/cpu.vendor";

/// CPU model number, base 10.
pub const LABEL_CPU_MODEL: &str = "archspec.io/cpu.model";

/// CPU family number, base 10.
pub const LABEL_CPU_FAMILY: &str = "archspec.io/cpu.family";

/// Microarchitecture name (e.g. `skylake`).
pub const LABEL_CPU_TARGET: &str = "archspec.io/cpu.target";

/// All label keys in publication order.
pub const LABEL_KEYS: [&str; 4] = [
    LABEL_CPU_VENDOR,
    LABEL_CPU_MODEL,
    LABEL_CPU_FAMILY,
    LABEL_CPU_TARGET,
];
