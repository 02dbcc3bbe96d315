//! Parsing of audio server control output.
//!
//! The control tool's output is line-oriented but not a strict machine
//! format: device blocks nest their fields by indentation depth and mix
//! `label: value` pairs with free-text annotations. Each field is extracted
//! by its own small function so that format drift in one field stays
//! isolated to one place. All functions here are pure; parsing the same
//! output twice yields structurally identical results.

use super::{
    error::ParseError,
    runner::RawOutput,
    types::{AudioDevice, DeviceConfiguration, ServerInfo},
};

/// Parses a `list sinks` / `list sources` output into devices.
///
/// Devices are returned in source order; callers may rely on the server's
/// ordering, so no sorting happens here. The default flag on every device
/// is left unset because the list output does not carry it; the
/// configuration manager merges it in from the default-device query.
///
/// # Errors
/// Returns [`ParseError::MissingField`] when a block lacks an expected
/// field and [`ParseError::InvalidValue`] when a field does not parse.
pub fn parse_device_list(raw: &RawOutput) -> Result<Vec<AudioDevice>, ParseError> {
    let text = stdout_text(raw)?;

    let mut devices = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    for line in text.lines() {
        if is_block_header(line) {
            if !block.is_empty() {
                devices.push(device_from_block(&block)?);
                block.clear();
            }
            block.push(line);
        } else if !block.is_empty() {
            block.push(line);
        }
    }
    if !block.is_empty() {
        devices.push(device_from_block(&block)?);
    }

    Ok(devices)
}

/// Parses a `get-default-sink` / `get-default-source` output.
///
/// The tool prints the default device id on a single line. Empty output
/// means no default is configured.
///
/// # Errors
/// Returns [`ParseError::InvalidUtf8`] when the output is not UTF-8.
pub fn parse_default_id(raw: &RawOutput) -> Result<Option<String>, ParseError> {
    let text = stdout_text(raw)?;

    Ok(text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_owned))
}

/// Builds a configuration snapshot from the two default-device outputs.
///
/// # Errors
/// Propagates parse failures from either output.
pub fn parse_current_configuration(
    sink_raw: &RawOutput,
    source_raw: &RawOutput,
) -> Result<DeviceConfiguration, ParseError> {
    Ok(DeviceConfiguration::new(
        parse_default_id(sink_raw)?,
        parse_default_id(source_raw)?,
    ))
}

/// Parses the server identity from an `info` output.
///
/// Both fields are genuinely optional across server implementations, so a
/// missing label yields an empty string rather than an error.
///
/// # Errors
/// Returns [`ParseError::InvalidUtf8`] when the output is not UTF-8.
pub fn parse_server_info(raw: &RawOutput) -> Result<ServerInfo, ParseError> {
    let text = stdout_text(raw)?;
    let lines: Vec<&str> = text.lines().collect();

    Ok(ServerInfo {
        name: field_value(&lines, 0, "Server Name:")
            .unwrap_or_default()
            .to_owned(),
        version: field_value(&lines, 0, "Server Version:")
            .unwrap_or_default()
            .to_owned(),
    })
}

fn stdout_text(raw: &RawOutput) -> Result<&str, ParseError> {
    std::str::from_utf8(&raw.stdout).map_err(|_| ParseError::InvalidUtf8)
}

/// A device block opens with an unindented `Sink #N` or `Source #N` line.
fn is_block_header(line: &str) -> bool {
    line.starts_with("Sink #") || line.starts_with("Source #")
}

fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// Extracts the remainder of the first line at `depth` starting with `label`.
///
/// Lines nested deeper than `depth` belong to sub-sections (properties,
/// ports, per-channel volume continuations) and are never consulted, which
/// keeps deceptively named nested keys from shadowing device fields.
fn field_value<'a>(lines: &[&'a str], depth: usize, label: &str) -> Option<&'a str> {
    lines
        .iter()
        .filter(|line| indent_width(line) == depth)
        .find_map(|line| line.trim().strip_prefix(label))
        .map(str::trim)
}

fn device_from_block(lines: &[&str]) -> Result<AudioDevice, ParseError> {
    // Field depth is whatever indentation the block actually uses, not a
    // fixed column position.
    let depth = lines
        .iter()
        .skip(1)
        .find(|line| !line.trim().is_empty())
        .map(|line| indent_width(line))
        .unwrap_or(0);

    Ok(AudioDevice {
        id: parse_name(lines, depth)?,
        display_name: parse_description(lines, depth),
        volume_percent: parse_volume_percent(lines, depth)?,
        muted: parse_mute(lines, depth)?,
        is_default: false,
    })
}

fn parse_name(lines: &[&str], depth: usize) -> Result<String, ParseError> {
    field_value(lines, depth, "Name:")
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .ok_or(ParseError::MissingField("Name"))
}

/// Description is the one genuinely optional field; devices without one get
/// an explicit empty-string sentinel instead of an error.
fn parse_description(lines: &[&str], depth: usize) -> String {
    field_value(lines, depth, "Description:")
        .unwrap_or_default()
        .to_owned()
}

fn parse_volume_percent(lines: &[&str], depth: usize) -> Result<u8, ParseError> {
    let value = field_value(lines, depth, "Volume:").ok_or(ParseError::MissingField("Volume"))?;

    let run = percent_run(value)
        .or_else(|| first_integer_run(value))
        .ok_or(ParseError::InvalidValue { field: "Volume" })?;
    let percent: u32 = run
        .parse()
        .map_err(|_| ParseError::InvalidValue { field: "Volume" })?;

    // Servers report over-amplified devices as >100%; clamp on the way in.
    Ok(percent.min(100) as u8)
}

fn parse_mute(lines: &[&str], depth: usize) -> Result<bool, ParseError> {
    let value = field_value(lines, depth, "Mute:").ok_or(ParseError::MissingField("Mute"))?;

    match value {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err(ParseError::InvalidValue { field: "Mute" }),
    }
}

/// The digit run immediately before the first `%`, e.g. `66` out of
/// `front-left: 43316 /  66% / -10.77 dB`.
fn percent_run(value: &str) -> Option<&str> {
    let percent = value.find('%')?;
    let bytes = value.as_bytes();

    let mut start = percent;
    while start > 0 && bytes[start - 1].is_ascii_digit() {
        start -= 1;
    }

    (start < percent).then(|| &value[start..percent])
}

/// The first contiguous digit run, used when no percent annotation exists.
fn first_integer_run(value: &str) -> Option<&str> {
    let start = value.find(|c: char| c.is_ascii_digit())?;
    let end = value[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(value.len(), |offset| start + offset);

    Some(&value[start..end])
}
