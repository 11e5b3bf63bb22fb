//! Value formatting for RouterOS command arguments

use crate::models::ListValue;

/// Convert a boolean to RouterOS `yes`/`no`.
pub fn format_boolean_value(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Join a list into a comma-separated value; a scalar passes through as is.
pub fn format_array_value(value: &ListValue) -> String {
    match value {
        ListValue::One(v) => v.clone(),
        ListValue::Many(values) => format_list(values),
    }
}

/// Comma-join a slice of values.
pub fn format_list<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(",")
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\\' | '$' | ';' | '[' | ']' | '{' | '}' | '?' | '#'))
}

/// Quote a value for the RouterOS command line when it contains whitespace
/// or characters the console would interpret.
///
/// Values that are already safe are returned unchanged.
pub fn quote_value(value: &str) -> String {
    if !needs_quoting(value) {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' | '$' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Incremental builder for one `add`/`set` command line.
///
/// Arguments are appended in call order; `opt_*` variants skip `None`, which
/// is how absent optional fields stay out of the emitted line.
#[derive(Debug, Clone)]
pub struct Command {
    line: String,
}

impl Command {
    pub fn new(verb: &str) -> Self {
        Command {
            line: verb.to_string(),
        }
    }

    pub fn add() -> Self {
        Self::new("add")
    }

    /// `set` command, optionally with a target selector such as
    /// `[ find default-name=wifi1 ]`.
    pub fn set(target: Option<&str>) -> Self {
        match target {
            Some(t) => Self::new(&format!("set {}", t)),
            None => Self::new("set"),
        }
    }

    /// Raw `key=value`, value emitted verbatim.
    pub fn arg(mut self, key: &str, value: impl std::fmt::Display) -> Self {
        self.line.push_str(&format!(" {}={}", key, value));
        self
    }

    /// `key=value` with the value quoted when needed.
    pub fn quoted(self, key: &str, value: &str) -> Self {
        let value = quote_value(value);
        self.arg(key, value)
    }

    pub fn flag(self, key: &str, value: bool) -> Self {
        self.arg(key, format_boolean_value(value))
    }

    pub fn list(self, key: &str, value: &ListValue) -> Self {
        let value = format_array_value(value);
        self.arg(key, value)
    }

    pub fn opt<T: std::fmt::Display>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.arg(key, v),
            None => self,
        }
    }

    pub fn opt_quoted(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.quoted(key, v),
            None => self,
        }
    }

    pub fn opt_flag(self, key: &str, value: Option<bool>) -> Self {
        match value {
            Some(v) => self.flag(key, v),
            None => self,
        }
    }

    pub fn opt_list(self, key: &str, value: Option<&ListValue>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.list(key, v),
            _ => self,
        }
    }

    pub fn comment(self, comment: Option<&str>) -> Self {
        self.opt_quoted("comment", comment)
    }

    pub fn build(self) -> String {
        self.line
    }
}

impl From<Command> for String {
    fn from(command: Command) -> Self {
        command.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_boolean_value() {
        assert_eq!(format_boolean_value(true), "yes");
        assert_eq!(format_boolean_value(false), "no");
    }

    #[test]
    fn test_format_array_value() {
        assert_eq!(format_array_value(&ListValue::from(vec!["a", "b"])), "a,b");
        assert_eq!(format_array_value(&ListValue::from("a")), "a");
        assert_eq!(format_array_value(&ListValue::Many(Vec::new())), "");
    }

    #[test]
    fn test_quote_value() {
        assert_eq!(quote_value("plain"), "plain");
        assert_eq!(quote_value("two words"), "\"two words\"");
        assert_eq!(quote_value("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote_value("$var"), "\"\\$var\"");
        assert_eq!(quote_value(""), "\"\"");
    }

    #[test]
    fn test_command_skips_absent_options() {
        let line = Command::add()
            .arg("name", "pool1")
            .opt::<u16>("port", None)
            .opt_flag("disabled", Some(false))
            .comment(Some("VPN pool"))
            .build();
        assert_eq!(line, "add name=pool1 disabled=no comment=\"VPN pool\"");
    }

    #[test]
    fn test_command_set_target() {
        let line = Command::set(Some("[ find default-name=wifi1 ]"))
            .flag("disabled", false)
            .build();
        assert_eq!(line, "set [ find default-name=wifi1 ] disabled=no");
    }
}
