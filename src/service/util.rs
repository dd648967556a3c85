//! Utility functions for the zoning query server

#[cfg(windows)]
use std::mem::MaybeUninit;

/// Get current process memory usage on Windows (returns bytes)
#[cfg(windows)]
pub fn get_process_memory_bytes() -> Option<u64> {
    use winapi::um::processthreadsapi::GetCurrentProcess;
    use winapi::um::psapi::{GetProcessMemoryInfo, PROCESS_MEMORY_COUNTERS};

    unsafe {
        let mut pmc: MaybeUninit<PROCESS_MEMORY_COUNTERS> = MaybeUninit::uninit();
        let cb = std::mem::size_of::<PROCESS_MEMORY_COUNTERS>() as u32;

        if GetProcessMemoryInfo(GetCurrentProcess(), pmc.as_mut_ptr(), cb) != 0 {
            let pmc = pmc.assume_init();
            Some(pmc.WorkingSetSize as u64)
        } else {
            None
        }
    }
}

/// Fallback for non-Windows platforms
#[cfg(not(windows))]
pub fn get_process_memory_bytes() -> Option<u64> {
    None
}
