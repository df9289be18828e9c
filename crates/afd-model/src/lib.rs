mod domain;
pub use domain::{
    KeyValue, LABEL_CPU_FAMILY, LABEL_CPU_MODEL, LABEL_CPU_TARGET, LABEL_CPU_VENDOR, LABEL_KEYS,
    LABEL_PREFIX, LabelSet,
};

mod error;
pub use error::{ModelError, ModelResult};

mod cpu;
pub use cpu::CpuRecord;

mod render;
pub use render::render;
