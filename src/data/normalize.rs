// ---------------------------------------------------------------------------
// Column-label normalization
// ---------------------------------------------------------------------------

/// Canonical comparison key for a column label.
///
/// Trims, lower-cases, strips ASCII spaces and colons, and folds the
/// full-width parentheses some vendor tools emit (`（`, `）`) to their ASCII
/// forms. Two labels name the same parameter iff their keys are equal; the
/// same transformation must be applied to catalog names, aliases, and table
/// columns alike.
pub fn normalize_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .filter(|&c| c != ' ' && c != ':')
        .map(|c| match c {
            '（' => '(',
            '）' => ')',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "  CPU Package Power [W] ",
        " 1:TGP (W)",
        "GPU Temperature（°C）",
        "SEN1-temp(Degree C)",
        "CPU Package [蚓]",
        "Total System Power [W]",
    ];

    #[test]
    fn strips_case_space_and_colon() {
        assert_eq!(normalize_label("  CPU Package Power [W] "), "cpupackagepower[w]");
        assert_eq!(normalize_label(" 1:TGP (W)"), "1tgp(w)");
    }

    #[test]
    fn folds_full_width_parentheses() {
        assert_eq!(
            normalize_label("GPU Temperature（°C）"),
            normalize_label("GPU Temperature(°C)")
        );
    }

    #[test]
    fn idempotent() {
        for s in SAMPLES {
            let once = normalize_label(s);
            assert_eq!(once, normalize_label(&once), "label: {s:?}");
        }
    }

    #[test]
    fn key_has_no_separator_characters() {
        for s in SAMPLES {
            let key = normalize_label(s);
            assert!(!key.contains(' '), "label: {s:?}");
            assert!(!key.contains(':'), "label: {s:?}");
            assert!(!key.contains('（'), "label: {s:?}");
            assert!(!key.contains('）'), "label: {s:?}");
        }
    }

    #[test]
    fn empty_label_never_matches() {
        assert_eq!(normalize_label("   "), "");
    }
}
