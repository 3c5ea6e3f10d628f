use std::time::Duration;

/// Parse a Kubernetes CPU quantity (`250m`, `1`, `1500000n`) into cores.
pub fn parse_cpu_cores(q: &str) -> Option<f64> {
    let q = q.trim();
    if q.is_empty() {
        return None;
    }
    let (digits, divisor) = if let Some(stripped) = q.strip_suffix('n') {
        (stripped, 1e9)
    } else if let Some(stripped) = q.strip_suffix('u') {
        (stripped, 1e6)
    } else if let Some(stripped) = q.strip_suffix('m') {
        (stripped, 1e3)
    } else {
        (q, 1.0)
    };
    let value = digits.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value / divisor)
}

/// Parse a Kubernetes memory quantity (`128Mi`, `1G`, `4096`) into bytes.
pub fn parse_memory_bytes(q: &str) -> Option<f64> {
    let q = q.trim();
    if q.is_empty() {
        return None;
    }

    // Binary suffixes first so that "Mi" is not mistaken for "M" followed by garbage.
    const UNITS: &[(&str, f64)] = &[
        ("Ki", 1024.0),
        ("Mi", 1048576.0),
        ("Gi", 1073741824.0),
        ("Ti", 1099511627776.0),
        ("Pi", 1125899906842624.0),
        ("Ei", 1152921504606846976.0),
        ("k", 1e3),
        ("K", 1e3),
        ("M", 1e6),
        ("G", 1e9),
        ("T", 1e12),
        ("P", 1e15),
        ("E", 1e18),
    ];

    let (digits, multiplier) = UNITS
        .iter()
        .find_map(|(suffix, mul)| q.strip_suffix(suffix).map(|d| (d, *mul)))
        .unwrap_or((q, 1.0));
    let value = digits.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some((value * multiplier).round())
}

/// Parse a human readable duration such as `30s`, `10ms` or `1m30s`.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("duration string is empty".to_string());
    }
    humantime::parse_duration(s).map_err(|e| e.to_string())
}
