//! Flattening a [`RouterConfig`] into a pasteable RouterOS script

use log::debug;
use minijinja::{context, Environment};
use once_cell::sync::Lazy;

use crate::error::Result;
use crate::models::{RouterConfig, ShowConfig, COMMENT_SECTION};
use crate::settings::ExportSettings;

pub const DEFAULT_HEADER_TEMPLATE: &str = "\
# RouterOS configuration generated by routergen {{ version }}
{%- if model %}
# Router model: {{ model }}
{%- endif %}
{%- if identity %}
# Identity: {{ identity }}
{%- endif %}
# Sections: {{ sections }}, commands: {{ commands }}";

static HEADER_ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(false);
    env
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub header: bool,
    /// Overrides [`DEFAULT_HEADER_TEMPLATE`].
    pub header_template: Option<String>,
    pub comments: bool,
    pub blank_line_between_sections: bool,
    pub router_model: Option<String>,
    pub identity: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            header: true,
            header_template: None,
            comments: true,
            blank_line_between_sections: true,
            router_model: None,
            identity: None,
        }
    }
}

impl From<&ExportSettings> for ExportOptions {
    fn from(settings: &ExportSettings) -> Self {
        ExportOptions {
            header: settings.header,
            header_template: settings.header_template.clone(),
            comments: settings.comments,
            blank_line_between_sections: settings.blank_line_between_sections,
            ..Default::default()
        }
    }
}

impl ExportOptions {
    /// Apply the presentation flags carried in the router state.
    pub fn with_show_config(mut self, show: &ShowConfig) -> Self {
        if let Some(header) = show.header {
            self.header = header;
        }
        if let Some(comments) = show.comments {
            self.comments = comments;
        }
        self
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}

fn render_header(config: &RouterConfig, options: &ExportOptions) -> Result<String> {
    let template = options
        .header_template
        .as_deref()
        .unwrap_or(DEFAULT_HEADER_TEMPLATE);
    let commands = config
        .iter()
        .filter(|(section, _)| *section != COMMENT_SECTION)
        .map(|(_, lines)| lines.iter().filter(|l| !is_comment(l)).count())
        .sum::<usize>();
    let rendered = HEADER_ENV.render_str(
        template,
        context! {
            version => env!("CARGO_PKG_VERSION"),
            model => options.router_model.as_deref(),
            identity => options.identity.as_deref(),
            sections => config.sections().filter(|s| !s.is_empty()).count(),
            commands => commands,
        },
    )?;
    Ok(rendered)
}

/// Render the script text: optional header, free comments, then every
/// section path followed by its lines, in map order.
pub fn to_script(config: &RouterConfig, options: &ExportOptions) -> Result<String> {
    let mut blocks: Vec<String> = Vec::new();

    if options.header {
        let header = render_header(config, options)?;
        if !header.trim().is_empty() {
            blocks.push(header.trim_end().to_string());
        }
    }

    if options.comments {
        let comments = config.lines(COMMENT_SECTION);
        if !comments.is_empty() {
            blocks.push(comments.join("\n"));
        }
    }

    for (section, lines) in config.iter() {
        if section == COMMENT_SECTION {
            continue;
        }
        let body: Vec<&str> = lines
            .iter()
            .map(String::as_str)
            .filter(|line| options.comments || !is_comment(line))
            .collect();
        if body.is_empty() {
            continue;
        }
        let mut block = String::from(section);
        for line in body {
            block.push('\n');
            block.push_str(line);
        }
        blocks.push(block);
    }

    debug!("exporting {} block(s)", blocks.len());
    let separator = if options.blank_line_between_sections {
        "\n\n"
    } else {
        "\n"
    };
    let mut script = blocks.join(separator);
    script.push('\n');
    Ok(script)
}

/// Pretty JSON object keyed by section, in section order.
pub fn to_json(config: &RouterConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}
