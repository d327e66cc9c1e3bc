use log::debug;
use std::fmt;
use std::process::Command;

#[derive(Debug, Clone, PartialEq)]
pub enum Device {
    Cpu,
    Cuda { device_id: i32 },
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "CPU"),
            Device::Cuda { device_id } => write!(f, "CUDA(device_id={device_id})"),
        }
    }
}

/// Accelerator information, probed once at startup.
///
/// The memory figures are advisory and possibly stale by the time they are
/// used; the session derives its tile budget from them once and never
/// re-polls.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuInfo {
    pub name: String,
    /// Total device memory in megabytes, if reported.
    pub memory_total_mb: Option<u64>,
    /// Free device memory in megabytes, if reported.
    pub memory_free_mb: Option<u64>,
}

impl GpuInfo {
    /// Probe the device once.
    ///
    /// CPU devices report no memory figures. CUDA devices are queried through
    /// `nvidia-smi`; any failure (missing binary, unparsable output, no such
    /// device) degrades to `None` rather than an error, since headroom is
    /// advisory.
    pub fn probe(device: &Device) -> Self {
        match device {
            Device::Cpu => Self {
                name: "CPU".to_string(),
                memory_total_mb: None,
                memory_free_mb: None,
            },
            Device::Cuda { device_id } => {
                let (name, total, free) = query_nvidia_smi(*device_id)
                    .unwrap_or((format!("CUDA device {device_id}"), None, None));
                debug!(
                    "probed {}: total={:?} MB, free={:?} MB",
                    name, total, free
                );
                Self {
                    name,
                    memory_total_mb: total,
                    memory_free_mb: free,
                }
            }
        }
    }
}

#[allow(clippy::type_complexity)]
fn query_nvidia_smi(device_id: i32) -> Option<(String, Option<u64>, Option<u64>)> {
    let output = Command::new("nvidia-smi")
        .args([
            "--query-gpu=name,memory.total,memory.free",
            "--format=csv,noheader,nounits",
            "-i",
            &device_id.to_string(),
        ])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.lines().next()?;
    let mut fields = line.split(',').map(str::trim);

    let name = fields.next()?.to_string();
    let total = fields.next().and_then(|v| v.parse::<u64>().ok());
    let free = fields.next().and_then(|v| v.parse::<u64>().ok());

    Some((name, total, free))
}
