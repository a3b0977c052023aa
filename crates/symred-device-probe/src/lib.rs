//! Capability probing for symred backend selection.
//!
//! The resolver needs two process-wide facts: whether a GPU is usable and
//! whether the tensor framework is loaded. Both are captured once into a
//! [`RuntimeCapabilities`] snapshot and handed to the resolver through the
//! [`CapabilityProvider`] trait, so tests can inject fixed flags.
//!
//! `SYMRED_GPU_FAKE` and `SYMRED_FRAMEWORK_FAKE` force either flag for
//! deterministic testing (`1`/`true`/`gpu`/`cuda`/`candle` enable,
//! `none`/`0`/`false` disable). Strict mode (`SYMRED_STRICT_MODE=1`) ignores
//! both and probes for real.

use serde::Serialize;
use symred_common::SymredConfig;

// ── capability provider ──────────────────────────────────────────────────────

/// Source of the process-wide flags the resolver consults.
pub trait CapabilityProvider {
    /// A GPU is usable by kernels launched from this process.
    fn gpu_available(&self) -> bool;

    /// The tensor framework is loaded, so framework tensors can be inspected.
    fn framework_available(&self) -> bool;
}

impl<P: CapabilityProvider + ?Sized> CapabilityProvider for &P {
    fn gpu_available(&self) -> bool {
        (**self).gpu_available()
    }

    fn framework_available(&self) -> bool {
        (**self).framework_available()
    }
}

// ── compile-time flags ───────────────────────────────────────────────────────

/// Check if GPU support was compiled into this binary.
///
/// Does **not** check runtime availability; see [`gpu_available_runtime`].
#[inline]
pub const fn gpu_compiled() -> bool {
    cfg!(any(feature = "gpu", feature = "cuda"))
}

/// Check if the candle tensor framework integration was compiled in.
#[inline]
pub const fn framework_compiled() -> bool {
    cfg!(feature = "candle")
}

// ── runtime flags ────────────────────────────────────────────────────────────

/// Returns true when `SYMRED_STRICT_MODE` is `1` or `true`.
pub fn strict_mode_enabled() -> bool {
    std::env::var("SYMRED_STRICT_MODE")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Read a fake override, honouring strict mode.
///
/// `Some(true)` / `Some(false)` when the variable forces the flag, `None`
/// when unset, unrecognised, or strict mode is on.
fn fake_flag(var: &str, enable_words: &[&str]) -> Option<bool> {
    if strict_mode_enabled() {
        return None;
    }

    let raw = std::env::var(var).ok()?;
    let normalized = raw.trim().to_ascii_lowercase();

    match normalized.as_str() {
        "none" | "0" | "false" | "off" => return Some(false),
        "1" | "true" | "on" => return Some(true),
        _ => {}
    }

    let enabled = normalized
        .split([',', ';', '|', ' '])
        .filter(|part| !part.is_empty())
        .any(|part| enable_words.contains(&part));
    if !enabled {
        tracing::debug!(var, value = %raw, "unrecognised fake override; ignoring");
        return None;
    }
    Some(true)
}

/// Check if a GPU is available at runtime.
///
/// - `SYMRED_GPU_FAKE=gpu|cuda|1|true` forces `true`, `none|0|false` forces
///   `false`, unless `SYMRED_STRICT_MODE=1`.
/// - Otherwise, with GPU support compiled, succeeds iff `nvidia-smi` runs.
/// - Without GPU support compiled, always `false`.
pub fn gpu_available_runtime() -> bool {
    if let Some(forced) = fake_flag("SYMRED_GPU_FAKE", &["gpu", "cuda"]) {
        return forced;
    }
    real_gpu_probe()
}

#[cfg(any(feature = "gpu", feature = "cuda"))]
fn real_gpu_probe() -> bool {
    std::process::Command::new("nvidia-smi")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(not(any(feature = "gpu", feature = "cuda")))]
#[inline]
const fn real_gpu_probe() -> bool {
    false
}

/// Check if the tensor framework is available at runtime.
///
/// `SYMRED_FRAMEWORK_FAKE=candle|1|true` / `none|0|false` override unless
/// strict mode; otherwise equal to [`framework_compiled`].
pub fn framework_available_runtime() -> bool {
    fake_flag("SYMRED_FRAMEWORK_FAKE", &["candle"]).unwrap_or(framework_compiled())
}

// ── snapshot ─────────────────────────────────────────────────────────────────

/// Immutable snapshot of the flags consulted during backend resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuntimeCapabilities {
    pub gpu_available: bool,
    pub framework_available: bool,
}

impl RuntimeCapabilities {
    /// Probe the current process.
    pub fn detect() -> Self {
        let caps = Self {
            gpu_available: gpu_available_runtime(),
            framework_available: framework_available_runtime(),
        };
        tracing::debug!(summary = %caps.summary(), "detected runtime capabilities");
        caps
    }

    /// Probe, then apply `force_gpu` / `force_framework` from configuration.
    pub fn detect_with_config(config: &SymredConfig) -> Self {
        Self::detect().with_overrides(config.force_gpu, config.force_framework)
    }

    /// Replace either flag when an override is present.
    pub fn with_overrides(self, gpu: Option<bool>, framework: Option<bool>) -> Self {
        Self {
            gpu_available: gpu.unwrap_or(self.gpu_available),
            framework_available: framework.unwrap_or(self.framework_available),
        }
    }

    /// No GPU, no framework.
    pub const fn cpu_only() -> Self {
        Self { gpu_available: false, framework_available: false }
    }

    /// One-line summary for logs: `gpu=false framework=true`.
    pub fn summary(&self) -> String {
        format!("gpu={} framework={}", self.gpu_available, self.framework_available)
    }
}

impl Default for RuntimeCapabilities {
    fn default() -> Self {
        Self::cpu_only()
    }
}

impl CapabilityProvider for RuntimeCapabilities {
    fn gpu_available(&self) -> bool {
        self.gpu_available
    }

    fn framework_available(&self) -> bool {
        self.framework_available
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn compiled_flags_reflect_features() {
        assert_eq!(gpu_compiled(), cfg!(any(feature = "gpu", feature = "cuda")));
        assert_eq!(framework_compiled(), cfg!(feature = "candle"));
    }

    #[test]
    #[serial(symred_env)]
    fn gpu_fake_env_overrides_detection() {
        temp_env::with_var("SYMRED_STRICT_MODE", None::<&str>, || {
            temp_env::with_var("SYMRED_GPU_FAKE", Some("cuda"), || {
                assert!(gpu_available_runtime());
            });
            temp_env::with_var("SYMRED_GPU_FAKE", Some("none"), || {
                assert!(!gpu_available_runtime());
            });
            temp_env::with_var("SYMRED_GPU_FAKE", Some("TRUE"), || {
                assert!(gpu_available_runtime());
            });
        });
    }

    #[test]
    #[serial(symred_env)]
    fn framework_fake_env_overrides_detection() {
        temp_env::with_var("SYMRED_STRICT_MODE", None::<&str>, || {
            temp_env::with_var("SYMRED_FRAMEWORK_FAKE", Some("candle"), || {
                assert!(framework_available_runtime());
            });
            temp_env::with_var("SYMRED_FRAMEWORK_FAKE", Some("0"), || {
                assert!(!framework_available_runtime());
            });
        });
    }

    #[test]
    #[serial(symred_env)]
    fn unrecognised_fake_falls_back_to_compiled() {
        temp_env::with_vars(
            [("SYMRED_STRICT_MODE", None), ("SYMRED_FRAMEWORK_FAKE", Some("tensorflow"))],
            || {
                assert_eq!(framework_available_runtime(), framework_compiled());
            },
        );
    }

    #[test]
    #[serial(symred_env)]
    fn strict_mode_ignores_fakes() {
        temp_env::with_vars(
            [
                ("SYMRED_STRICT_MODE", Some("1")),
                ("SYMRED_FRAMEWORK_FAKE", Some("candle")),
                ("SYMRED_GPU_FAKE", Some("gpu")),
            ],
            || {
                assert_eq!(framework_available_runtime(), framework_compiled());
                #[cfg(not(any(feature = "gpu", feature = "cuda")))]
                assert!(!gpu_available_runtime());
            },
        );
    }

    #[test]
    fn overrides_replace_only_present_flags() {
        let caps = RuntimeCapabilities { gpu_available: false, framework_available: true };
        let forced = caps.with_overrides(Some(true), None);
        assert!(forced.gpu_available);
        assert!(forced.framework_available);
        assert_eq!(caps.with_overrides(None, None), caps);
    }

    #[test]
    fn provider_reads_snapshot() {
        let caps = RuntimeCapabilities { gpu_available: true, framework_available: false };
        let provider: &dyn CapabilityProvider = &caps;
        assert!(provider.gpu_available());
        assert!(!provider.framework_available());
    }

    #[test]
    fn summary_format_is_stable() {
        let caps = RuntimeCapabilities { gpu_available: true, framework_available: false };
        assert_eq!(caps.summary(), "gpu=true framework=false");
    }
}
