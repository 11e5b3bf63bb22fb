//! Combining and normalising [`RouterConfig`] values

use log::trace;
use std::collections::HashSet;

use crate::models::{RouterConfig, COMMENT_SECTION};

/// Merge several configs into one.
///
/// For every section the result holds the lines of each input in argument
/// order. Sections keep the order in which they first appear.
pub fn merge_router_configs(configs: &[&RouterConfig]) -> RouterConfig {
    let mut merged = RouterConfig::new();
    for config in configs {
        merged.merge(config);
    }
    merged
}

/// Move `sections` to the front, right after the comment section, in the
/// order given. The remaining sections keep their relative order.
pub fn hoist_sections(config: &RouterConfig, sections: &[&str]) -> RouterConfig {
    let mut hoisted = RouterConfig::new();
    if let Some(comments) = config.get(COMMENT_SECTION) {
        hoisted.extend(COMMENT_SECTION, comments.iter().cloned());
    }
    for section in sections {
        if let Some(lines) = config.get(section) {
            hoisted.extend(section, lines.iter().cloned());
        }
    }
    for (section, lines) in config.iter() {
        if section == COMMENT_SECTION || sections.contains(&section) {
            continue;
        }
        hoisted.extend(section, lines.iter().cloned());
    }
    hoisted
}

/// Collapse whitespace runs outside double quotes and trim the line.
/// Quoted text, including backslash escapes inside it, is kept verbatim.
fn normalize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_quotes = false;
    let mut escaped = false;
    let mut pending_space = false;

    for c in line.trim().chars() {
        if in_quotes {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_quotes = false;
            }
            continue;
        }

        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        if c == '"' {
            in_quotes = true;
        }
        out.push(c);
    }

    out
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}

/// Normalise a config before export.
///
/// Applied as the last step of every public generator:
/// 1. each line is trimmed and whitespace runs outside quotes collapse to one
///    space;
/// 2. blank lines are dropped;
/// 3. repeated command lines within a section are dropped, the first copy
///    wins; comment lines are never deduplicated;
/// 4. sections left without lines are dropped.
///
/// The pass is idempotent.
pub fn command_shortener(config: &RouterConfig) -> RouterConfig {
    let mut shortened = RouterConfig::new();

    for (section, lines) in config.iter() {
        let mut seen: HashSet<String> = HashSet::new();
        let mut kept = Vec::with_capacity(lines.len());

        for line in lines {
            let line = normalize_line(line);
            if line.is_empty() {
                continue;
            }
            if !is_comment(&line) && !seen.insert(line.clone()) {
                trace!("dropping duplicate line in '{}': {}", section, line);
                continue;
            }
            kept.push(line);
        }

        if !kept.is_empty() {
            shortened.extend(section, kept);
        }
    }

    shortened
}

impl RouterConfig {
    /// Shorthand for [`command_shortener`].
    pub fn shortened(&self) -> RouterConfig {
        command_shortener(self)
    }

    /// Drop sections that hold no lines.
    pub fn prune_empty(&mut self) {
        self.retain_sections(|_, lines| !lines.is_empty());
    }
}
