//! Output stage: DOT text, Graphviz-rendered images, or an HTML report.

pub mod dot;
pub mod html;
pub mod image;

use crate::model::Diagram;
use anyhow::Context;
use clap::ValueEnum;
use std::fs;
use std::path::PathBuf;

pub use dot::to_dot;
pub use html::render_html_report;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Pdf,
    Dot,
    Html,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Dot => "dot",
            OutputFormat::Html => "html",
        }
    }

    /// Formats that need the Graphviz executable.
    pub fn needs_graphviz(self) -> bool {
        matches!(self, OutputFormat::Png | OutputFormat::Svg | OutputFormat::Pdf)
    }
}

/// Write `<output>.<ext>` and return its path.
pub fn write_output(
    diagram: &Diagram,
    format: OutputFormat,
    output: &str,
    dot_bin: &str,
) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(format!("{}.{}", output, format.extension()));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }

    if format.needs_graphviz() {
        image::run_graphviz(&to_dot(diagram), format.extension(), &path, dot_bin)?;
    } else {
        let text = match format {
            OutputFormat::Html => render_html_report(diagram)?,
            _ => to_dot(diagram),
        };
        fs::write(&path, text).with_context(|| format!("write {}", path.display()))?;
    }

    tracing::info!(path = %path.display(), "wrote diagram");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DiagramOptions, build_diagram};
    use crate::provider::Provider;

    #[test]
    fn appends_extension_and_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let d = build_diagram(&Default::default(), Provider::Gcp, &DiagramOptions::default());
        let output = dir.path().join("nested/diagram");

        let path = write_output(&d, OutputFormat::Dot, output.to_str().unwrap(), "dot").unwrap();
        assert_eq!(path, dir.path().join("nested/diagram.dot"));
        assert!(fs::read_to_string(&path).unwrap().starts_with("digraph"));
    }

    #[test]
    fn image_formats_need_graphviz() {
        assert!(OutputFormat::Png.needs_graphviz());
        assert!(!OutputFormat::Html.needs_graphviz());
        assert_eq!(OutputFormat::default().extension(), "png");
    }
}
