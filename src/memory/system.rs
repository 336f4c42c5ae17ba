use crate::memory::{MemoryInfo, MemoryStatus};
use std::io;

/// Memory statistics of the machine we're running on.
pub struct SystemMemory {
    #[cfg(not(windows))]
    system: std::cell::RefCell<sysinfo::System>,
}

impl Default for SystemMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(windows)]
impl SystemMemory {
    pub fn new() -> Self {
        Self {}
    }
}

#[cfg(windows)]
impl MemoryInfo for SystemMemory {
    fn fetch(&self) -> io::Result<MemoryStatus> {
        use std::mem;
        use windows::Win32::System::SystemInformation::{GlobalMemoryStatusEx, MEMORYSTATUSEX};

        let mut mem_status = MEMORYSTATUSEX {
            dwLength: mem::size_of::<MEMORYSTATUSEX>() as u32,
            ..Default::default()
        };
        // SAFETY: `mem_status` is a valid `MEMORYSTATUSEX`
        unsafe { GlobalMemoryStatusEx(&mut mem_status) }
            .map_err(|e| io::Error::other(e.to_string()))?;

        Ok(MemoryStatus {
            available_bytes: mem_status.ullAvailPhys,
            total_bytes: mem_status.ullTotalPhys,
        })
    }
}

#[cfg(not(windows))]
impl SystemMemory {
    pub fn new() -> Self {
        use sysinfo::{MemoryRefreshKind, RefreshKind, System};

        // Only RAM is ever read, so don't load processes, cpus or swap.
        let system = System::new_with_specifics(
            RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        Self {
            system: std::cell::RefCell::new(system),
        }
    }
}

#[cfg(not(windows))]
impl MemoryInfo for SystemMemory {
    fn fetch(&self) -> io::Result<MemoryStatus> {
        let mut system = self.system.borrow_mut();
        system.refresh_memory_specifics(sysinfo::MemoryRefreshKind::nothing().with_ram());

        let total_bytes = system.total_memory();
        if total_bytes == 0 {
            // sysinfo reports zeroes rather than failing on platforms it can't read.
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "host reported no memory",
            ));
        }

        Ok(MemoryStatus {
            available_bytes: system.available_memory(),
            total_bytes,
        })
    }
}
