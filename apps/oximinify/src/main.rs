use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;
use log::{debug, info};
use oximinify_static::{BuildPlugin, Config, OutputDescriptor, PluginMode, StaticMinifyPlugin};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "oximinify")]
#[command(about = "Minify static assets of JavaScript projects after a build", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Minify static scripts into build output directories
    Static(Config),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let start = Instant::now();

    match cli.command {
        Commands::Static(cfg) => {
            let options = cfg.plugin_options()?;
            let default_level = if options.verbose.unwrap_or(false) { "info" } else { "warn" };
            env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();
            debug!("Parsed CLI arguments: {:?}", cfg);

            let root = cfg.root()?;
            info!("Using project root: {}", root.display());
            let outputs = cfg.output_dirs(&root);
            let plugin = StaticMinifyPlugin::with_root(root, options);
            debug!("Effective config: {:?}", plugin.config());

            // This host only ever runs builds
            if !plugin.apply(PluginMode::Build) {
                return Ok(());
            }

            let mut files_transformed = 0;
            for dir in &outputs {
                match plugin.process_output(&OutputDescriptor::new(dir)) {
                    Some(summary) => {
                        files_transformed += summary.files_transformed;
                        oximinify_static::print_summary(&mut stdout, dir, &summary)?;
                    }
                    None => oximinify_static::print_skipped_output(&mut stdout, dir)?,
                }
            }

            let elapsed_ms = start.elapsed().as_millis();
            writeln!(
                stdout,
                "\n{} Finished in {}ms ({} files minified across {} outputs).",
                "●".bright_blue(),
                elapsed_ms.to_string().cyan(),
                files_transformed.to_string().cyan(),
                outputs.len().to_string().cyan()
            )?;
            stdout.flush()?;

            Ok(())
        }
    }
}
