/// Parse a `KEY=VALUE` argument, splitting at the first `=`.
///
/// Used for `--alias PATTERN=PREFIX` and `--chunk NAME=PATTERN`. The value
/// may be empty (an alias that strips its prefix), the key may not.
///
/// # Errors
///
/// Returns an error message if there is no `=` or the key is empty.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, found '{s}'"))?;

    if key.trim().is_empty() {
        return Err(format!("missing key before '=' in '{s}'"));
    }

    Ok((key.to_string(), value.to_string()))
}
