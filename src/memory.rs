use crate::constants::{AVAILABLE_OFFSET_MIB, BYTES_PER_MIB};
use std::fmt::{self, Display};
use std::io;

mod system;

pub use system::SystemMemory;

/// Raw memory statistics as reported by the host.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStatus {
    pub available_bytes: u64,
    pub total_bytes: u64,
}

/// Host capability for querying memory statistics.
pub trait MemoryInfo {
    fn fetch(&self) -> io::Result<MemoryStatus>;
}

/// Memory statistics in MiB, as displayed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MemorySample {
    pub available_mib: u64,
    pub total_mib: u64,
}

impl From<MemoryStatus> for MemorySample {
    fn from(status: MemoryStatus) -> Self {
        Self {
            available_mib: status.available_bytes / BYTES_PER_MIB + AVAILABLE_OFFSET_MIB,
            total_mib: status.total_bytes / BYTES_PER_MIB,
        }
    }
}

impl Display for MemorySample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RAM: {}/{} MB", self.available_mib, self.total_mib)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(available_bytes: u64, total_bytes: u64) -> MemorySample {
        MemorySample::from(MemoryStatus {
            available_bytes,
            total_bytes,
        })
    }

    #[test]
    fn formats_exact_spacing() {
        let s = sample(2_147_483_648, 4_294_967_296);
        assert_eq!(s.to_string(), "RAM: 2560/4096 MB");
    }

    #[test]
    fn offset_only_applies_to_available() {
        let s = sample(0, 0);
        assert_eq!(s.available_mib, 512);
        assert_eq!(s.total_mib, 0);
        assert_eq!(s.to_string(), "RAM: 512/0 MB");
    }

    #[test]
    fn truncates_partial_mebibytes() {
        let s = sample(BYTES_PER_MIB - 1, 3 * BYTES_PER_MIB - 1);
        assert_eq!(s.available_mib, 512);
        assert_eq!(s.total_mib, 2);

        let s = sample(BYTES_PER_MIB, 3 * BYTES_PER_MIB);
        assert_eq!(s.available_mib, 513);
        assert_eq!(s.total_mib, 3);
    }

    #[test]
    fn handles_max_values() {
        let s = sample(u64::MAX, u64::MAX);
        assert_eq!(s.total_mib, u64::MAX / BYTES_PER_MIB);
        assert_eq!(s.available_mib, u64::MAX / BYTES_PER_MIB + 512);
    }
}
