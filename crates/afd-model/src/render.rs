use crate::{
    CpuRecord, LABEL_CPU_FAMILY, LABEL_CPU_MODEL, LABEL_CPU_TARGET, LABEL_CPU_VENDOR, LabelSet,
};

/// Render a CPU record into the label set published for the node.
///
/// Output order follows [`crate::LABEL_KEYS`]. Numbers are printed in base 10,
/// strings verbatim.
///
/// # Examples
/// ```
/// use afd_model::{CpuRecord, render};
///
/// let cpu = CpuRecord::new("GenuineIntel", 6, 142, "skylake").unwrap();
/// let labels = render(&cpu);
/// assert_eq!(labels.get("archspec.io/cpu.model"), Some("142"));
/// ```
pub fn render(cpu: &CpuRecord) -> LabelSet {
    let mut labels = LabelSet::new();
    labels
        .push(LABEL_CPU_VENDOR, cpu.vendor())
        .push(LABEL_CPU_MODEL, cpu.model().to_string())
        .push(LABEL_CPU_FAMILY, cpu.family().to_string())
        .push(LABEL_CPU_TARGET, cpu.target());
    labels
}
