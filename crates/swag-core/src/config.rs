use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

/// Top-level project configuration loaded from `.swag.yaml`.
///
/// The camelCase aliases accept the option names used by JSON-style configs
/// (`reactHooks`, `namingOverrides`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SwagConfig {
    pub input: String,
    pub output: String,
    /// Route prefix stripped (case-insensitive, anchored) from every emitted route.
    pub prefix: Option<String>,
    #[serde(alias = "reactHooks")]
    pub react_hooks: bool,
    #[serde(alias = "namingOverrides")]
    pub naming: NamingConfig,
    pub ignore: IgnoreConfig,
    pub hooks: HooksConfig,
    /// Global flag that gates deprecation warnings in generated code.
    #[serde(alias = "devFlag")]
    pub dev_flag: String,
}

impl Default for SwagConfig {
    fn default() -> Self {
        Self {
            input: "swagger.json".to_string(),
            output: "src/services".to_string(),
            prefix: None,
            react_hooks: false,
            naming: NamingConfig::default(),
            ignore: IgnoreConfig::default(),
            hooks: HooksConfig::default(),
            dev_flag: "__DEV__".to_string(),
        }
    }
}

/// How service names are derived.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Name template with `{method}`, `{path}` and `{operationId}` placeholders.
    /// Defaults to `{method}{path}`.
    pub template: Option<String>,
    /// Map from derived service name to custom alias.
    pub aliases: IndexMap<String, String>,
}

/// Inputs the generator should leave out.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Header parameters left out of synthesized header types (case-insensitive).
    #[serde(alias = "headerParams")]
    pub header_params: Vec<String>,
}

/// Options for the generated hooks.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// Query parameter that selects a page. GET endpoints accepting it also
    /// get an infinite-query hook.
    #[serde(alias = "pageParam")]
    pub page_param: String,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            page_param: "page".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swag.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SwagConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: SwagConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swag configuration
input: swagger.json
output: src/services

# prefix: /api/v1      # stripped from every route (case-insensitive)
react_hooks: false     # also generate hooks.ts (react-query)

naming:
  # template: "{method}{path}"   # placeholders: {method} {path} {operationId}
  aliases: {}
    # getPetsPetId: getPet

ignore:
  header_params: []
    # - Accept
    # - Content-Type

hooks:
  page_param: page     # GET endpoints with this query parameter get an infinite hook

dev_flag: __DEV__
"#
}
