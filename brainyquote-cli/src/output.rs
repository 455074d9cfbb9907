use brainyquote_core::{Format, Quote};

use crate::cli::OutputFormat;

pub(crate) fn render(q: &Quote, fmt: OutputFormat, escape: bool) -> String {
    match (fmt, escape) {
        (OutputFormat::Text(f), _) => q.render(f),
        (OutputFormat::Html, false) => q.to_html(),
        (OutputFormat::Html, true) => q.to_html_escaped(),
        (OutputFormat::Xml, false) => q.to_xml(),
        (OutputFormat::Xml, true) => q.to_xml_escaped(),
    }
}

/// Многострочные форматы разделяются пустой строкой
pub(crate) fn render_all(quotes: &[Quote], fmt: OutputFormat, escape: bool) -> String {
    let sep = match fmt {
        OutputFormat::Text(Format::Content | Format::Tight) => "\n",
        _ => "\n\n",
    };
    quotes
        .iter()
        .map(|q| render(q, fmt, escape))
        .collect::<Vec<_>>()
        .join(sep)
}
