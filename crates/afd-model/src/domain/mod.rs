mod kv;
pub use kv::KeyValue;

mod labels;
pub use labels::LabelSet;

mod constants;
pub use constants::{
    LABEL_CPU_FAMILY, LABEL_CPU_MODEL, LABEL_CPU_TARGET, LABEL_CPU_VENDOR, LABEL_KEYS,
    LABEL_PREFIX,
};
