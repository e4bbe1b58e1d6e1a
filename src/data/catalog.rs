use super::normalize::normalize_label;

// ---------------------------------------------------------------------------
// Canonical parameter catalog
// ---------------------------------------------------------------------------

/// One catalog entry: the canonical label the summary reports against, plus
/// known alternate spellings other vendor tools emit for the same channel.
#[derive(Debug, Clone, Copy)]
pub struct Parameter {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

/// Fixed reporting order for the summary table.
///
/// Labels are kept byte-for-byte as the vendor tools emit them after the
/// cp950 decode — including the leading spaces on the GPUmon channels and
/// the `蚓` that HW64 headers produce for `℃`. Normalized comparison makes
/// the cosmetic differences irrelevant; the raw forms are what lands in
/// exported sheets.
pub const CATALOG: &[Parameter] = &[
    Parameter {
        canonical: "Total System Power [W]",
        aliases: &["System Power(W)"],
    },
    Parameter {
        canonical: "CPU Package Power [W]",
        aliases: &["CPU Package [W]"],
    },
    Parameter {
        canonical: " 1:TGP (W)",
        aliases: &["TGP(W)", "GPU TGP(W)"],
    },
    Parameter {
        canonical: "Charge Rate [W]",
        aliases: &["Charger In(W)"],
    },
    Parameter {
        canonical: "IA Cores Power [W]",
        aliases: &[],
    },
    Parameter {
        canonical: "GT Cores Power [W]",
        aliases: &[],
    },
    Parameter {
        canonical: " 1:NVVDD Power (W)",
        aliases: &[],
    },
    Parameter {
        canonical: " 1:FBVDD Power (W)",
        aliases: &[],
    },
    Parameter {
        canonical: "CPU Package [蚓]",
        aliases: &["CPU Temperature(°C)", "CPU Package(C)"],
    },
    Parameter {
        canonical: " 1:Temperature GPU (C)",
        aliases: &["GPU Temperature(°C)", "1:GPU Temperature (C)"],
    },
    Parameter {
        canonical: " 1:Temperature Memory (C)",
        aliases: &["Memory Temperature(°C)", "1:Memory Temperature (C)"],
    },
    Parameter {
        canonical: "Temp0 [蚓]",
        aliases: &[],
    },
    Parameter {
        canonical: "SEN1-temp(Degree C)",
        aliases: &["Temp0 [°C]"],
    },
    Parameter {
        canonical: "SEN2-temp(Degree C)",
        aliases: &["Temp1 [°C]"],
    },
    Parameter {
        canonical: "SEN3-temp(Degree C)",
        aliases: &["Temp2 [°C]"],
    },
    Parameter {
        canonical: "SEN4-temp(Degree C)",
        aliases: &["Temp3 [°C]"],
    },
    Parameter {
        canonical: "SEN5-temp(Degree C)",
        aliases: &["Temp4 [°C]"],
    },
    Parameter {
        canonical: "SEN6-temp(Degree C)",
        aliases: &["Temp5 [°C]"],
    },
    Parameter {
        canonical: "SEN7-temp(Degree C)",
        aliases: &["Temp6 [°C]"],
    },
    Parameter {
        canonical: "SEN8-temp(Degree C)",
        aliases: &["Temp7 [°C]"],
    },
    Parameter {
        canonical: "SEN9-temp(Degree C)",
        aliases: &["Temp8 [°C]"],
    },
    Parameter { canonical: "J", aliases: &[] },
    Parameter { canonical: "C", aliases: &[] },
    Parameter { canonical: "D", aliases: &[] },
    Parameter { canonical: "HP1-1", aliases: &[] },
    Parameter { canonical: "HP1-2", aliases: &[] },
    Parameter { canonical: "HP1-3", aliases: &[] },
    Parameter { canonical: "HP1-4", aliases: &[] },
    Parameter { canonical: "HP2-1", aliases: &[] },
    Parameter { canonical: "HP2-2", aliases: &[] },
    Parameter { canonical: "HP2-3", aliases: &[] },
    Parameter { canonical: "HP2-4", aliases: &[] },
    Parameter { canonical: "CPUfin", aliases: &[] },
    Parameter { canonical: "GPUfin", aliases: &[] },
];

// ---------------------------------------------------------------------------
// Alias resolution
// ---------------------------------------------------------------------------

/// Index of the first column (in table order) whose normalized label equals
/// the normalized canonical name or any normalized alias.
///
/// First-match, not best-match: when two columns normalize to the same key,
/// the lower index wins and the duplicate is ignored. With an empty alias
/// list this degenerates to an exact normalized match against the canonical
/// name alone.
pub fn resolve_column(columns: &[String], param: &Parameter) -> Option<usize> {
    let mut keys: Vec<String> = Vec::with_capacity(param.aliases.len() + 1);
    keys.push(normalize_label(param.canonical));
    keys.extend(param.aliases.iter().map(|a| normalize_label(a)));

    columns
        .iter()
        .position(|col| keys.contains(&normalize_label(col)))
}
