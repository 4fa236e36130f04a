use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::fmt::Write;
use std::path::PathBuf;

mod icon;
mod logging;
mod model;
mod provider;
mod render;
mod state;

use model::{Diagram, DiagramOptions, Direction};
use provider::Provider;
use render::OutputFormat;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "tfstate-diagram")]
#[command(about = "Generate an infrastructure diagram from a Terraform state file", long_about = None)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug, Clone)]
struct Source {
    /// Path to Terraform state file.
    #[arg(long)]
    state: String,

    /// Cloud provider; detected from resource types when omitted.
    #[arg(long, value_enum)]
    provider: Option<Provider>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the diagram to a file.
    Render {
        #[command(flatten)]
        source: Source,

        /// Output file name (without extension). Defaults per provider.
        #[arg(long)]
        output: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
        format: OutputFormat,

        #[arg(long, value_enum, default_value_t = Direction::TopBottom)]
        direction: Direction,

        /// Diagram title. Defaults per provider.
        #[arg(long)]
        title: Option<String>,

        /// Graphviz executable used for png/svg/pdf.
        #[arg(long, default_value = "dot")]
        dot_bin: String,
    },
    /// Print resources and inferred connections without rendering.
    Inspect {
        #[command(flatten)]
        source: Source,
    },
}

/// Read the state, settle the provider, build the resource table.
fn load(source: &Source) -> Result<(Provider, state::Resources)> {
    let raw = state::parse_state_file(&source.state)?;
    let provider = match source.provider {
        Some(p) => p,
        None => Provider::detect(&raw)
            .with_context(|| format!("detect provider for {}", source.state))?,
    };
    let resources = state::build_resources(raw, provider.naming());
    tracing::info!(
        state = %source.state,
        provider = %provider,
        resources = resources.len(),
        "loaded resources"
    );
    Ok((provider, resources))
}

struct RenderArgs {
    output: Option<String>,
    format: OutputFormat,
    options: DiagramOptions,
    dot_bin: String,
}

fn run_render(source: &Source, args: RenderArgs) -> Result<PathBuf> {
    let (provider, resources) = load(source)?;
    let diagram = model::build_diagram(&resources, provider, &args.options);
    let output = args
        .output
        .unwrap_or_else(|| provider.default_output().to_string());
    render::write_output(&diagram, args.format, &output, &args.dot_bin)
}

/// Plain-text listing: one block per resource with its links.
fn inspect_report(diagram: &Diagram) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} resources, {} edges)",
        diagram.title,
        diagram.nodes.len(),
        diagram.edges.len()
    );
    for node in &diagram.nodes {
        let _ = writeln!(out, "{}  [{}]", node.id, node.icon_class);
        for e in &diagram.edges {
            let line = match (e.from == node.id, e.to == node.id, e.bidirectional) {
                (true, _, true) => format!("<-> {}", e.to),
                (_, true, true) => format!("<-> {}", e.from),
                (true, _, false) => format!("->  {}", e.to),
                (_, true, false) => format!("<-  {}", e.from),
                _ => continue,
            };
            let _ = writeln!(out, "    {}", line);
        }
    }
    out
}

fn run(cli: Cli) -> Result<()> {
    match cli.cmd {
        Commands::Render {
            source,
            output,
            format,
            direction,
            title,
            dot_bin,
        } => {
            let path = run_render(
                &source,
                RenderArgs {
                    output,
                    format,
                    options: DiagramOptions { title, direction },
                    dot_bin,
                },
            )?;
            println!(
                "Infrastructure diagram generated successfully! Saved as {}",
                path.display()
            );
        }
        Commands::Inspect { source } => {
            let (provider, resources) = load(&source)?;
            let diagram = model::build_diagram(&resources, provider, &DiagramOptions::default());
            print!("{}", inspect_report(&diagram));
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        tracing::debug!(error = ?e, "diagram generation failed");
        eprintln!("An error occurred: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn fixture(name: &str) -> String {
        format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn source(name: &str, provider: Option<Provider>) -> Source {
        Source {
            state: fixture(name),
            provider,
        }
    }

    fn dot_args(output: String) -> RenderArgs {
        RenderArgs {
            output: Some(output),
            format: OutputFormat::Dot,
            options: DiagramOptions::default(),
            dot_bin: "dot".to_string(),
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parses_render_flags() {
        let cli = Cli::try_parse_from([
            "tfstate-diagram",
            "render",
            "--state",
            "s.json",
            "--provider",
            "oci",
            "--format",
            "svg",
            "--direction",
            "LR",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Render {
                source,
                format,
                direction,
                output,
                ..
            } => {
                assert_eq!(source.provider, Some(Provider::Oci));
                assert_eq!(format, OutputFormat::Svg);
                assert_eq!(direction, Direction::LeftRight);
                assert_eq!(output, None);
            }
            Commands::Inspect { .. } => panic!("expected render"),
        }
    }

    #[test]
    fn state_is_required() {
        assert!(Cli::try_parse_from(["tfstate-diagram", "render"]).is_err());
    }

    #[test]
    fn minimal_state_renders_a_non_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("min.tfstate");
        std::fs::write(
            &state,
            r#"{ "version": 4, "resources": [
                { "type": "google_compute_network", "name": "vpc",
                  "instances": [ { "attributes": { "name": "main" } } ] }
            ] }"#,
        )
        .unwrap();
        let src = Source {
            state: state.to_string_lossy().into_owned(),
            provider: None,
        };
        let out = dir.path().join("out").to_string_lossy().into_owned();

        let path = run_render(&src, dot_args(out)).unwrap();
        let dot = std::fs::read_to_string(path).unwrap();
        assert!(dot.contains("\"google_compute_network.main\""));
    }

    #[test]
    fn empty_state_renders_with_default_provider() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("empty.tfstate");
        std::fs::write(&state, r#"{"version":4,"resources":[]}"#).unwrap();
        let src = Source {
            state: state.to_string_lossy().into_owned(),
            provider: None,
        };
        let out = dir.path().join("empty").to_string_lossy().into_owned();

        let path = run_render(&src, dot_args(out)).unwrap();
        let dot = std::fs::read_to_string(path).unwrap();
        assert!(dot.starts_with("digraph \"GCP Infrastructure\""));
        assert!(!dot.contains("->"));
    }

    #[test]
    fn state_without_cloud_resources_renders() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("random.tfstate");
        std::fs::write(
            &state,
            r#"{ "version": 4, "resources": [
                { "mode": "managed", "type": "random_id", "name": "suffix",
                  "instances": [ { "attributes": { "hex": "a1b2" } } ] }
            ] }"#,
        )
        .unwrap();
        let src = Source {
            state: state.to_string_lossy().into_owned(),
            provider: None,
        };
        let out = dir.path().join("random").to_string_lossy().into_owned();

        let path = run_render(&src, dot_args(out)).unwrap();
        let dot = std::fs::read_to_string(path).unwrap();
        assert!(dot.contains("\"random_id.suffix\" [label=\"suffix\\nDatacenter\""));
    }

    #[test]
    fn html_for_oci_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report").to_string_lossy().into_owned();
        let mut args = dot_args(out);
        args.format = OutputFormat::Html;

        let path = run_render(&source("oci.tfstate.json", None), args).unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("html"));
        assert!(std::fs::read_to_string(path).unwrap().contains("OCI Infrastructure"));
    }

    #[test]
    fn missing_state_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("x").to_string_lossy().into_owned();
        let err = run_render(&source("does-not-exist.json", None), dot_args(out)).unwrap_err();
        assert!(format!("{err:#}").contains("read state file"));
    }

    #[test]
    fn inspect_lists_links() {
        let (provider, resources) = load(&source("gcp.tfstate.json", Some(Provider::Gcp))).unwrap();
        let diagram = model::build_diagram(&resources, provider, &DiagramOptions::default());
        let report = inspect_report(&diagram);

        assert!(report.starts_with("GCP Infrastructure (7 resources, 7 edges)\n"));
        let nat_block: Vec<&str> = report
            .lines()
            .skip_while(|l| !l.starts_with("google_compute_router_nat.main-nat"))
            .take(2)
            .collect();
        assert_eq!(
            nat_block,
            vec![
                "google_compute_router_nat.main-nat  [gcp/network/NAT]",
                "    ->  google_compute_router.main-router",
            ]
        );
        assert!(report.contains("    <-> google_compute_subnetwork.app-subnet\n"));
        assert!(report.contains("    <-  google_compute_firewall.allow-ssh\n"));
    }
}
