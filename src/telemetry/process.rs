//! Process resource sampling for the metrics endpoint

use sysinfo::System;
use tracing::debug;
use super::allocator::heap_used_bytes;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSample {
    pub rss_bytes: u64,
    pub heap_used_bytes: u64,
    pub cpu_user_usec: u64,
    pub cpu_system_usec: u64,
}

/// Point-in-time sample of this process. Unavailable figures read as 0.
pub fn sample_process() -> ProcessSample {
    let (cpu_user_usec, cpu_system_usec) = cpu_times_usec();
    ProcessSample {
        rss_bytes: resident_set_bytes(),
        heap_used_bytes: heap_used_bytes(),
        cpu_user_usec,
        cpu_system_usec,
    }
}

fn resident_set_bytes() -> u64 {
    let pid = match sysinfo::get_current_pid() {
        Ok(pid) => pid,
        Err(e) => {
            debug!("Cannot resolve own pid: {}", e);
            return 0;
        }
    };

    let mut system = System::new();
    system.refresh_process(pid);
    system.process(pid).map(|p| p.memory()).unwrap_or(0)
}

#[cfg(unix)]
fn cpu_times_usec() -> (u64, u64) {
    fn to_usec(tv: libc::timeval) -> u64 {
        (tv.tv_sec as u64) * 1_000_000 + tv.tv_usec as u64
    }

    let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
    // SAFETY: getrusage only writes into the provided rusage struct.
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
    if rc != 0 {
        debug!("getrusage(RUSAGE_SELF) failed: {}", std::io::Error::last_os_error());
        return (0, 0);
    }
    // SAFETY: rc == 0 means the kernel filled the struct.
    let usage = unsafe { usage.assume_init() };
    (to_usec(usage.ru_utime), to_usec(usage.ru_stime))
}

#[cfg(not(unix))]
fn cpu_times_usec() -> (u64, u64) {
    (0, 0)
}
