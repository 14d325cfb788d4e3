use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// The set of variable names a consumer may override. Reduction keeps
/// exactly the parts of a stylesheet reachable from these names.
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    names: HashSet<String>,
}

impl OverrideSet {
    /// Read a variable definitions file and collect every variable it
    /// mentions.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| Error::VarsFileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_source(&source);
        log::debug!(
            "loaded {} override variables from {}",
            set.len(),
            path.display()
        );
        Ok(set)
    }

    pub fn from_source(source: &str) -> Self {
        Self {
            names: scan_variable_names(source).into_iter().collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Every `$name` token terminated by whitespace, `:`, or end of input.
///
/// Other terminators disqualify the token, so the arguments of
/// `map-get($map, $key)` register neither name. End of input counts as a
/// terminator so the same scanner works on loop header text, where the
/// last variable may end the string.
pub fn scan_variable_names(source: &str) -> Vec<String> {
    let bytes = source.as_bytes();
    let mut names = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] != b'$' {
            pos += 1;
            continue;
        }
        let start = pos + 1;
        let mut end = start;
        while end < bytes.len() && is_name_byte(bytes[end]) {
            end += 1;
        }
        let terminated =
            end == bytes.len() || bytes[end].is_ascii_whitespace() || bytes[end] == b':';
        if end > start && terminated {
            names.push(source[start..end].to_string());
        }
        pos = end.max(pos + 1);
    }
    names
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}
