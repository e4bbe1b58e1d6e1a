use super::model::SourceCategory;

// ---------------------------------------------------------------------------
// Filename classification
// ---------------------------------------------------------------------------

/// Ordered classification rules; first matching substring wins.
///
/// The priority order disambiguates names matching more than one rule
/// (a GPUmon log exported from an "HW" build directory is still GPUmon).
/// Matching is substring-based on the lower-cased filename — brittle, but
/// vendor tooling relies on it, so it is preserved as-is.
const RULES: &[(&str, SourceCategory)] = &[
    ("gpu", SourceCategory::GpuMon),
    ("ptat", SourceCategory::Ptat),
    ("hw", SourceCategory::Hw64),
];

/// Classify an uploaded file by name. `None` means unrecognized: the caller
/// skips the file and surfaces a warning, it is never an error.
pub fn classify(filename: &str) -> Option<SourceCategory> {
    let lower = filename.to_lowercase();
    RULES
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|&(_, category)| category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_family() {
        assert_eq!(classify("GPUmon_log_01.csv"), Some(SourceCategory::GpuMon));
        assert_eq!(classify("pTaT-burnin.csv"), Some(SourceCategory::Ptat));
        assert_eq!(classify("HW64_run3.CSV"), Some(SourceCategory::Hw64));
    }

    #[test]
    fn unrecognized_is_none() {
        assert_eq!(classify("fan_curve.csv"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn gpu_outranks_hw() {
        // Both substrings present: priority order must hold.
        assert_eq!(classify("hw_rig_gpu_trace.csv"), Some(SourceCategory::GpuMon));
        assert_eq!(classify("GPU-on-HW64.csv"), Some(SourceCategory::GpuMon));
    }

    #[test]
    fn ptat_outranks_hw() {
        assert_eq!(classify("hw_bench/ptat_idle.csv"), Some(SourceCategory::Ptat));
    }
}
