//! ANSI highlighting of rendered YAML for terminal output.
//!
//! Works line by line over `YamlRenderer` output: keys are bold white, an
//! ` (obsolete)` key suffix is yellow, and `type` values are colored by
//! wire kind with `array<...>` wrappers dimmed.

use colored::{ColoredString, Colorize};

use crate::schema::OBSOLETE_SUFFIX;

/// Whether stdout is a terminal that accepts color.
pub fn stdout_supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Highlight a YAML schema document for display on a terminal.
pub fn highlight_yaml(yaml: &str) -> String {
    let mut out = String::with_capacity(yaml.len() * 2);
    for line in yaml.lines() {
        out.push_str(&highlight_line(line));
        out.push('\n');
    }
    out
}

fn highlight_line(line: &str) -> String {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];
    let (bullet, entry) = match body.strip_prefix("- ") {
        Some(rest) => ("- ", rest),
        None => ("", body),
    };

    let (key, value) = match entry.split_once(": ") {
        Some((key, value)) => (key, Some(value)),
        None => match entry.strip_suffix(':') {
            Some(key) => (key, None),
            None => return line.to_string(),
        },
    };

    let value = match value {
        Some(value) if key == "type" => format!(" {}", type_value(value)),
        Some(value) => format!(" {}", value),
        None => String::new(),
    };

    format!("{}{}{}:{}", indent, bullet, field_key(key), value)
}

fn field_key(key: &str) -> String {
    match key.strip_suffix(OBSOLETE_SUFFIX) {
        Some(name) => format!("{}{}", name.bold().white(), OBSOLETE_SUFFIX.yellow()),
        None => key.bold().white().to_string(),
    }
}

fn type_value(kind: &str) -> String {
    if let Some(inner) = kind.strip_prefix("array<").and_then(|k| k.strip_suffix('>')) {
        return format!("{}{}{}", "array<".dimmed(), type_value(inner), ">".dimmed());
    }

    kind_color(kind).to_string()
}

fn kind_color(kind: &str) -> ColoredString {
    match kind {
        "string" => kind.green(),
        "number" => kind.cyan(),
        "boolean" => kind.magenta(),
        "datetime" => kind.blue(),
        "objectId" => kind.red(),
        "object" | "unknown" => kind.bright_black(),
        _ => kind.normal(),
    }
}
