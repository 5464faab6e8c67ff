use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use swag_axios_client::type_mapper::ir_type_to_ts;
use swag_axios_client::{AxiosServiceGenerator, TypesGenerator};
use swag_core::GeneratedFile;
use swag_core::config::{self, CONFIG_FILE_NAME, SwagConfig};
use swag_core::ir::IrSpec;
use swag_core::parse;
use swag_core::pipeline::{self, Generators};
use swag_core::transform;
use swag_react_query::ReactQueryHooksGenerator;

const SERVICES_FILE: &str = "services.ts";
const TYPES_FILE: &str = "types.ts";
const HOOKS_FILE: &str = "hooks.ts";

#[derive(Parser)]
#[command(name = "swag", about = "OpenAPI to TypeScript service generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate request functions, types and hooks from an OpenAPI document
    Generate {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory, overriding the config file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file to use instead of `.swag.yaml`
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate an OpenAPI document
    Validate {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the internal representation built from a document
    Inspect {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new swag configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            config,
        } => cmd_generate(input, output, config),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swag", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the config file, falling back to defaults when it is absent.
fn load_config(path: Option<PathBuf>) -> Result<SwagConfig> {
    let path = path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    match config::load_config(&path).map_err(|e| anyhow::anyhow!(e))? {
        Some(cfg) => {
            log::debug!("loaded config from {}", path.display());
            Ok(cfg)
        }
        None => {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(SwagConfig::default())
        }
    }
}

fn read_document(path: &Path) -> Result<serde_json::Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse::document_from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn load_ir(path: &Path, cfg: &SwagConfig) -> Result<IrSpec> {
    let document = read_document(path)?;
    Ok(pipeline::build_ir(document, cfg)?)
}

/// Write generated files under `base`. Files marked as not overwritable are
/// left alone if they already exist.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if !file.overwrite && path.exists() {
            log::info!("kept existing {}", path.display());
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_generate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let cfg = load_config(config_path)?;
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    let document = read_document(&input)?;

    let service = AxiosServiceGenerator;
    let hooks = ReactQueryHooksGenerator;
    let generators = Generators {
        service: &service,
        types: &TypesGenerator,
        hooks: Some(&hooks),
    };
    let artifacts = pipeline::generate(document, &cfg, &generators);

    if artifacts.code.is_empty() || artifacts.types.is_empty() {
        anyhow::bail!(
            "generation from {} failed, nothing was written (run with RUST_LOG=debug for details)",
            input.display()
        );
    }
    if cfg.react_hooks && artifacts.hooks.is_empty() {
        anyhow::bail!("hook generation failed, nothing was written");
    }

    eprintln!("Generating {} → {}", input.display(), output_dir.display());
    fs::create_dir_all(&output_dir).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;

    let mut files = vec![
        GeneratedFile {
            path: SERVICES_FILE.to_string(),
            content: artifacts.code,
            overwrite: true,
        },
        GeneratedFile {
            path: TYPES_FILE.to_string(),
            content: artifacts.types,
            overwrite: true,
        },
    ];
    files.extend(service.runtime_files());
    if cfg.react_hooks {
        files.push(GeneratedFile {
            path: HOOKS_FILE.to_string(),
            content: artifacts.hooks,
            overwrite: true,
        });
        files.extend(hooks.runtime_files());
    }

    write_files(&output_dir, &files)?;
    eprintln!("Generated {} files in {}", files.len(), output_dir.display());
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let content = fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let ext = input.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let parsed = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };

    eprintln!(
        "Valid OpenAPI {} document: {}",
        parsed.openapi, parsed.info.title
    );
    eprintln!("  Version: {}", parsed.info.version);
    eprintln!("  Paths: {}", parsed.paths.len());

    if let Some(ref components) = parsed.components {
        eprintln!("  Schemas: {}", components.schemas.len());
    }

    // Every reference must resolve for generation to succeed
    let ir = transform::transform(&parsed)?;
    eprintln!("  Endpoints: {}", ir.endpoints.len());
    eprintln!("  Types: {}", ir.types.len());
    eprintln!("  Constants: {}", ir.constants.len());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = load_config(None)?;
    let ir = load_ir(&input, &cfg)?;

    let summary = build_inspect_summary(&ir);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(ir: &IrSpec) -> serde_json::Value {
    let endpoints: Vec<serde_json::Value> = ir
        .endpoints
        .iter()
        .map(|ep| {
            serde_json::json!({
                "name": ep.service_name,
                "method": ep.method.as_str(),
                "route": ep.route,
                "content_type": ep.content_type,
                "response": ep.response.as_ref().map(ir_type_to_ts),
                "query_type": ep.query_params_type,
                "header_type": ep.header_params_type,
                "config": ep.config_constant,
                "security": ep.security_constant,
                "deprecated": ep.deprecated,
            })
        })
        .collect();

    let types: Vec<serde_json::Value> = ir
        .types
        .iter()
        .map(|t| {
            serde_json::json!({
                "name": t.name,
                "origin": t.origin.as_str(),
            })
        })
        .collect();

    let constants: Vec<serde_json::Value> = ir
        .constants
        .iter()
        .map(|c| serde_json::json!({ "name": c.name, "value": c.value }))
        .collect();

    serde_json::json!({
        "info": {
            "title": ir.info.title,
            "version": ir.info.version,
        },
        "endpoints": endpoints,
        "types": types,
        "constants": constants,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_files_keeps_user_owned_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.ts"), "// edited").unwrap();
        let files = vec![
            GeneratedFile {
                path: "config.ts".to_string(),
                content: "// fresh".to_string(),
                overwrite: false,
            },
            GeneratedFile {
                path: "nested/httpRequest.ts".to_string(),
                content: "// runtime".to_string(),
                overwrite: true,
            },
        ];
        write_files(dir.path(), &files).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("config.ts")).unwrap(), "// edited");
        assert_eq!(
            fs::read_to_string(dir.path().join("nested/httpRequest.ts")).unwrap(),
            "// runtime"
        );
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(Some(dir.path().join(CONFIG_FILE_NAME))).unwrap();
        assert_eq!(cfg.output, "src/services");
        assert_eq!(cfg.hooks.page_param, "page");
    }
}
