//! Structured view of INI-style service configuration files.
//!
//! The document keeps every original line so that rendering an unmodified
//! document reproduces its input (modulo `\r\n` line endings, which are
//! normalized to `\n`). Only lines touched by [`ConfigDocument::upsert`] or
//! [`ConfigDocument::append_section`] change.

/// Result of inserting or updating a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The key was absent and a new line follows the section header.
    Inserted,
    /// An existing entry was rewritten with the new value.
    Updated,
    /// The entry already carried the requested value.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    header: String,
    lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    preamble: Vec<String>,
    sections: Vec<Section>,
    trailing_newline: bool,
}

impl ConfigDocument {
    pub fn parse(text: &str) -> Self {
        let mut preamble = Vec::new();
        let mut sections: Vec<Section> = Vec::new();

        for line in text.lines() {
            if let Some(name) = parse_header(line) {
                sections.push(Section {
                    name: name.to_string(),
                    header: line.to_string(),
                    lines: Vec::new(),
                });
                continue;
            }
            match sections.last_mut() {
                Some(section) => section.lines.push(line.to_string()),
                None => preamble.push(line.to_string()),
            }
        }

        Self { preamble, sections, trailing_newline: text.is_empty() || text.ends_with('\n') }
    }

    /// Section names in file order. Repeated headers appear once per occurrence.
    #[cfg(test)]
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.name.as_str())
    }

    #[cfg(test)]
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.iter().any(|section| section.name == name)
    }

    /// Value of the first active entry for `key` in the first `[section]`.
    #[cfg(test)]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let section = self.sections.iter().find(|s| s.name == section)?;
        section.lines.iter().find_map(|line| match parse_entry(line) {
            Some((entry_key, value)) if entry_key == key => Some(value),
            _ => None,
        })
    }

    /// Set `key = value` in the first `[section]`.
    ///
    /// Returns `None` when the section does not exist; the document is then untouched.
    pub fn upsert(&mut self, section: &str, key: &str, value: &str) -> Option<UpsertOutcome> {
        let section = self.sections.iter_mut().find(|s| s.name == section)?;
        let rendered = format!("{key} = {value}");

        let existing = section.lines.iter().position(|line| {
            matches!(parse_entry(line), Some((entry_key, _)) if entry_key == key)
        });

        match existing {
            Some(index) => {
                let current = parse_entry(&section.lines[index]).map(|(_, v)| v);
                if current == Some(value) {
                    return Some(UpsertOutcome::Unchanged);
                }
                section.lines[index] = rendered;
                Some(UpsertOutcome::Updated)
            }
            None => {
                section.lines.insert(0, rendered);
                Some(UpsertOutcome::Inserted)
            }
        }
    }

    /// Append an empty `[name]` section at the end of the document.
    pub fn append_section(&mut self, name: &str) {
        if let Some(last) = self.sections.last_mut() {
            if last.lines.last().is_some_and(|line| !line.trim().is_empty()) {
                last.lines.push(String::new());
            }
        } else if self.preamble.last().is_some_and(|line| !line.trim().is_empty()) {
            self.preamble.push(String::new());
        }
        self.sections.push(Section {
            name: name.to_string(),
            header: format!("[{name}]"),
            lines: Vec::new(),
        });
    }

    pub fn render(&self) -> String {
        let mut lines: Vec<&str> = self.preamble.iter().map(String::as_str).collect();
        for section in &self.sections {
            lines.push(&section.header);
            lines.extend(section.lines.iter().map(String::as_str));
        }

        let mut out = lines.join("\n");
        if self.trailing_newline && !lines.is_empty() {
            out.push('\n');
        }
        out
    }
}

fn parse_header(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('[')?.strip_suffix(']')?;
    let name = inner.trim();
    if name.is_empty() { None } else { Some(name) }
}

fn parse_entry(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') || trimmed.starts_with(';') {
        return None;
    }
    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}
