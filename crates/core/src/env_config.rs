//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    parse_with_default(var, std::env::var(var).ok().as_deref(), default)
}

/// Read a boolean-ish flag (`1`/`true`/`yes`/`on`, `0`/`false`/`no`/`off`).
///
/// Returns `None` when the variable is unset or unrecognised.
#[must_use]
pub fn env_flag(var: &str) -> Option<bool> {
    parse_flag(var, std::env::var(var).ok().as_deref())
}

fn parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    raw: Option<&str>,
    default: T,
) -> T {
    match raw {
        Some(v) => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        None => default,
    }
}

fn parse_flag(var: &str, raw: Option<&str>) -> Option<bool> {
    let value = raw?.trim().to_ascii_lowercase();
    match value.as_str() {
        "1" | "true" | "yes" | "on" | "dark" => Some(true),
        "0" | "false" | "no" | "off" | "light" => Some(false),
        "" => None,
        _ => {
            tracing::warn!(var, value = %value, "unrecognised flag value, ignoring");
            None
        },
    }
}
