//! Machine tags and Linux CPU classification.
//!
//! On Linux the native library ships one build per ARM core family, so the
//! raw architecture alone is not enough. The core is identified from the
//! `lscpu` model name or the `/proc/cpuinfo` CPU part code and mapped to a
//! base tag; 64-bit ARM hosts get an `-aarch64` suffix.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Suffix appended to the base tag on 64-bit ARM Linux hosts.
pub const AARCH64_SUFFIX: &str = "-aarch64";

/// Base tag used when the CPU is not in the classification table.
pub const FALLBACK_BASE: &str = "arm11";

/// One row of the CPU classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuRow {
    /// Last token of the `lscpu` "Model name" field, lower-cased.
    pub model_name: &'static str,
    /// `/proc/cpuinfo` "CPU part" code, lower-cased.
    pub cpu_part: &'static str,
    /// Base machine tag selected by this row.
    pub base: &'static str,
}

/// CPU classification table, scanned in order; first matching row wins.
pub const CPU_TABLE: [CpuRow; 6] = [
    CpuRow {
        model_name: "arm1176",
        cpu_part: "0xb76",
        base: "arm11",
    },
    CpuRow {
        model_name: "cortex-a7",
        cpu_part: "0xc07",
        base: "cortex-a7",
    },
    CpuRow {
        model_name: "cortex-a53",
        cpu_part: "0xd03",
        base: "cortex-a53",
    },
    CpuRow {
        model_name: "cortex-a57",
        cpu_part: "0xd07",
        base: "cortex-a57",
    },
    CpuRow {
        model_name: "cortex-a72",
        cpu_part: "0xd08",
        base: "cortex-a72",
    },
    CpuRow {
        model_name: "cortex-a8",
        cpu_part: "0xc08",
        base: "beaglebone",
    },
];

/// Normalized CPU architecture/model identifier used to pick a library variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineTag(String);

impl MachineTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MachineTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MachineTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for MachineTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl PartialEq<str> for MachineTag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MachineTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// CPU identification read from the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuSignature {
    /// Model name token (empty when the host did not report one).
    pub model_name: String,
    /// CPU part code (empty when the host did not report one).
    pub cpu_part: String,
}

impl CpuSignature {
    pub fn new(model_name: impl Into<String>, cpu_part: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into().to_lowercase(),
            cpu_part: cpu_part.into().to_lowercase(),
        }
    }

    /// Find the first table row matched by either the model name or the CPU part.
    pub fn lookup(&self) -> Option<&'static CpuRow> {
        CPU_TABLE.iter().find(|row| {
            (!self.model_name.is_empty() && row.model_name == self.model_name)
                || (!self.cpu_part.is_empty() && row.cpu_part == self.cpu_part)
        })
    }
}

/// Outcome of classifying a Linux host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub tag: MachineTag,
    /// False when the CPU was not in the table and the fallback tag was used.
    pub recognized: bool,
}

/// Architecture suffix for a raw Linux architecture string.
pub fn arch_suffix(raw_arch: &str) -> &'static str {
    if raw_arch == "aarch64" {
        AARCH64_SUFFIX
    } else {
        ""
    }
}

/// Classify a non-x86_64 Linux host from its CPU signature.
pub fn classify(raw_arch: &str, cpu: &CpuSignature) -> Classification {
    let suffix = arch_suffix(raw_arch);
    match cpu.lookup() {
        Some(row) => Classification {
            tag: MachineTag::new(format!("{}{suffix}", row.base)),
            recognized: true,
        },
        None => Classification {
            tag: MachineTag::new(format!("{FALLBACK_BASE}{suffix}")),
            recognized: false,
        },
    }
}
