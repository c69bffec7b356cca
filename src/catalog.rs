//! Mental-model catalog.
//!
//! Two tiers resolved once at startup: the built-in models (priority 0) and an
//! optional custom tier read from a TOML file or from every `*.toml` file
//! under a directory, nested directories included. Custom entries override
//! built-ins with the same key. A custom source that cannot be read or fails
//! validation is skipped with a warning and the catalog keeps the built-ins.
//!
//! A custom entry without `priority` gets [`DEFAULT_CUSTOM_PRIORITY`], so it
//! sorts above the built-ins. An explicit `priority = 0` is kept as written.
//!
//! Custom file format:
//!
//! ```toml
//! [models.pre_mortem]
//! name = "Pre-mortem"
//! description = "Assume the plan failed and work out why"
//! category = "decision-making"
//! priority = 5
//! steps = ["Assume failure", "List causes", "Mitigate the likeliest"]
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Priority given to custom models that do not declare one.
pub const DEFAULT_CUSTOM_PRIORITY: i32 = 1;

/// A mental-model definition: what to call it and which steps it prescribes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    pub name: String,
    pub description: String,
    pub steps: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub priority: i32,
}

/// A definition paired with its catalog key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyedModel {
    pub key: String,
    #[serde(flatten)]
    pub model: ModelDefinition,
}

/// Lookup capability the session operations depend on.
pub trait ModelCatalog: Send + Sync {
    fn resolve(&self, key: &str) -> Option<ModelDefinition>;

    /// All models, highest priority first, ties broken by display name.
    fn list_all(&self) -> Vec<KeyedModel>;

    /// Models grouped by category, each group in [`list_all`](Self::list_all) order.
    fn group_by_category(&self) -> BTreeMap<String, Vec<KeyedModel>> {
        let mut groups: BTreeMap<String, Vec<KeyedModel>> = BTreeMap::new();
        for keyed in self.list_all() {
            groups.entry(keyed.model.category.clone()).or_default().push(keyed);
        }
        groups
    }

    /// Catalog keys in [`list_all`](Self::list_all) order.
    fn keys(&self) -> Vec<String> {
        self.list_all().into_iter().map(|k| k.key).collect()
    }

    /// `"<key>: <name>"` labels in [`list_all`](Self::list_all) order.
    fn available(&self) -> Vec<String> {
        self.list_all()
            .into_iter()
            .map(|k| format!("{}: {}", k.key, k.model.name))
            .collect()
    }
}

/// Built-in models merged with an optional custom tier.
#[derive(Debug, Clone)]
pub struct TieredCatalog {
    models: HashMap<String, ModelDefinition>,
}

impl TieredCatalog {
    /// Built-in models only.
    pub fn builtin() -> Self {
        Self {
            models: builtin_models(),
        }
    }

    /// Built-ins, then custom models from `path` if given. Never fails.
    pub fn load(path: Option<&Path>) -> Self {
        let mut catalog = Self::builtin();
        tracing::info!(count = catalog.models.len(), "loaded core mental models");

        if let Some(path) = path {
            match load_custom(path) {
                Ok(custom) => catalog.merge(custom),
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    error = %format!("{e:#}"),
                    "failed to load custom mental models, continuing with core models"
                ),
            }
        }
        catalog
    }

    /// Add or override models by key.
    pub fn merge(&mut self, custom: HashMap<String, ModelDefinition>) {
        for (key, model) in custom {
            tracing::info!(key = %key, priority = model.priority, "loaded custom mental model");
            self.models.insert(key, model);
        }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl ModelCatalog for TieredCatalog {
    fn resolve(&self, key: &str) -> Option<ModelDefinition> {
        self.models.get(key).cloned()
    }

    fn list_all(&self) -> Vec<KeyedModel> {
        let mut all: Vec<KeyedModel> = self
            .models
            .iter()
            .map(|(key, model)| KeyedModel {
                key: key.clone(),
                model: model.clone(),
            })
            .collect();
        all.sort_by(by_priority_then_name);
        all
    }
}

fn by_priority_then_name(a: &KeyedModel, b: &KeyedModel) -> Ordering {
    b.model
        .priority
        .cmp(&a.model.priority)
        .then_with(|| a.model.name.cmp(&b.model.name))
        .then_with(|| a.key.cmp(&b.key))
}

fn builtin_models() -> HashMap<String, ModelDefinition> {
    let define = |name: &str, description: &str, category: &str, steps: [&str; 4]| ModelDefinition {
        name: name.to_string(),
        description: description.to_string(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
        category: category.to_string(),
        priority: 0,
    };

    HashMap::from([
        (
            "first_principles".to_string(),
            define(
                "First Principles Thinking",
                "Break down complex problems into fundamental components",
                "analytical",
                [
                    "Identify the problem clearly",
                    "Break it down into basic components",
                    "Question assumptions",
                    "Build up from the basics",
                ],
            ),
        ),
        (
            "opportunity_cost".to_string(),
            define(
                "Opportunity Cost Analysis",
                "Consider what you give up when making a choice",
                "decision-making",
                [
                    "Identify all available options",
                    "List the benefits of each option",
                    "Identify what you give up with each choice",
                    "Compare opportunity costs",
                ],
            ),
        ),
        (
            "bayesian_thinking".to_string(),
            define(
                "Bayesian Thinking",
                "Update beliefs based on new evidence",
                "probabilistic",
                [
                    "Start with prior beliefs",
                    "Gather new evidence",
                    "Update beliefs using Bayes' theorem",
                    "Consider alternative explanations",
                ],
            ),
        ),
        (
            "systems_thinking".to_string(),
            define(
                "Systems Thinking",
                "Understand how parts of a system interact",
                "holistic",
                [
                    "Identify system boundaries",
                    "Map system components",
                    "Identify relationships and feedback loops",
                    "Consider emergent properties",
                ],
            ),
        ),
    ])
}

#[derive(Debug, Deserialize)]
struct CustomModelFile {
    #[serde(default)]
    models: HashMap<String, CustomModel>,
}

#[derive(Debug, Deserialize)]
struct CustomModel {
    name: String,
    description: String,
    steps: Vec<String>,
    category: String,
    priority: Option<i32>,
}

/// Read custom models from a file, or from every `*.toml` file under a
/// directory, subdirectories included. Unreadable or invalid files inside a
/// directory are skipped with a warning.
pub fn load_custom(path: &Path) -> Result<HashMap<String, ModelDefinition>> {
    if !path.exists() {
        bail!("mental models path does not exist: {}", path.display());
    }
    if !path.is_dir() {
        return load_custom_file(path);
    }

    let mut files = Vec::new();
    collect_toml_files(path, &mut files)
        .with_context(|| format!("failed to read directory {}", path.display()))?;
    files.sort();

    let mut models = HashMap::new();
    for file in files {
        match load_custom_file(&file) {
            Ok(file_models) => models.extend(file_models),
            Err(e) => tracing::warn!(
                path = %file.display(),
                error = %format!("{e:#}"),
                "skipping mental models file"
            ),
        }
    }
    Ok(models)
}

fn collect_toml_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if let Err(e) = collect_toml_files(&path, files) {
                tracing::warn!(path = %path.display(), error = %e, "skipping mental models directory");
            }
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    Ok(())
}

fn load_custom_file(path: &Path) -> Result<HashMap<String, ModelDefinition>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_custom(&contents).with_context(|| format!("invalid mental models in {}", path.display()))
}

/// Parse and validate a custom models document.
pub fn parse_custom(contents: &str) -> Result<HashMap<String, ModelDefinition>> {
    let file: CustomModelFile = toml::from_str(contents).context("failed to parse TOML")?;

    let mut models = HashMap::with_capacity(file.models.len());
    for (key, custom) in file.models {
        if custom.name.trim().is_empty() {
            bail!("model '{key}' has empty name");
        }
        if custom.description.trim().is_empty() {
            bail!("model '{key}' has empty description");
        }
        if custom.category.trim().is_empty() {
            bail!("model '{key}' has empty category");
        }
        if custom.steps.is_empty() {
            bail!("model '{key}' has no steps");
        }
        if let Some(i) = custom.steps.iter().position(|s| s.trim().is_empty()) {
            bail!("model '{key}' has empty step at index {i}");
        }

        models.insert(
            key,
            ModelDefinition {
                name: custom.name,
                description: custom.description,
                steps: custom.steps,
                category: custom.category,
                priority: custom.priority.unwrap_or(DEFAULT_CUSTOM_PRIORITY),
            },
        );
    }
    Ok(models)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, category: &str, priority: i32) -> ModelDefinition {
        ModelDefinition {
            name: name.into(),
            description: "d".into(),
            steps: vec!["s".into()],
            category: category.into(),
            priority,
        }
    }

    #[test]
    fn builtin_first_principles() {
        let catalog = TieredCatalog::builtin();
        assert_eq!(catalog.len(), 4);
        let fp = catalog.resolve("first_principles").unwrap();
        assert_eq!(fp.name, "First Principles Thinking");
        assert_eq!(fp.category, "analytical");
        assert_eq!(fp.priority, 0);
        assert_eq!(fp.steps.len(), 4);
        assert!(catalog.resolve("no_such_model").is_none());
    }

    #[test]
    fn list_all_orders_by_priority_then_name() {
        let mut catalog = TieredCatalog { models: HashMap::new() };
        catalog.merge(HashMap::from([
            ("low".to_string(), model("Low", "a", 1)),
            ("same_2".to_string(), model("Same B", "a", 5)),
            ("high".to_string(), model("High", "b", 10)),
            ("same_1".to_string(), model("Same A", "b", 5)),
        ]));

        assert_eq!(catalog.keys(), vec!["high", "same_1", "same_2", "low"]);
        assert_eq!(catalog.available()[0], "high: High");
    }

    #[test]
    fn group_by_category_keeps_priority_order() {
        let mut catalog = TieredCatalog::builtin();
        catalog.merge(HashMap::from([(
            "root_cause".to_string(),
            model("Root Cause", "analytical", 3),
        )]));

        let groups = catalog.group_by_category();
        let analytical: Vec<&str> = groups["analytical"].iter().map(|k| k.key.as_str()).collect();
        assert_eq!(analytical, vec!["root_cause", "first_principles"]);
        assert_eq!(groups["holistic"].len(), 1);
    }

    #[test]
    fn parse_custom_defaults_priority() {
        let models = parse_custom(
            r#"
[models.test_model]
name = "Test Model"
description = "A test model"
category = "test"
steps = ["Step 1", "Step 2"]
"#,
        )
        .unwrap();
        let m = &models["test_model"];
        assert_eq!(m.priority, DEFAULT_CUSTOM_PRIORITY);
        assert_eq!(m.steps, vec!["Step 1", "Step 2"]);
    }

    #[test]
    fn parse_custom_keeps_explicit_zero_priority() {
        let models = parse_custom(
            r#"
[models.low]
name = "Low"
description = "Sorts with the built-ins"
category = "test"
priority = 0
steps = ["Only step"]
"#,
        )
        .unwrap();
        assert_eq!(models["low"].priority, 0);
    }

    #[test]
    fn parse_custom_rejects_invalid_entries() {
        let empty_step = r#"
[models.bad]
name = "Bad"
description = "d"
category = "c"
steps = ["ok", "  "]
"#;
        let err = parse_custom(empty_step).unwrap_err();
        assert!(err.to_string().contains("empty step at index 1"));

        let no_steps = r#"
[models.bad]
name = "Bad"
description = "d"
category = "c"
steps = []
"#;
        assert!(parse_custom(no_steps).is_err());
        assert!(parse_custom("models = [").is_err());
    }

    #[test]
    fn custom_overrides_builtin_by_key() {
        let mut catalog = TieredCatalog::builtin();
        catalog.merge(HashMap::from([(
            "first_principles".to_string(),
            model("Custom FP", "custom", 2),
        )]));
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.resolve("first_principles").unwrap().name, "Custom FP");
        assert_eq!(catalog.keys()[0], "first_principles");
    }

    #[test]
    fn missing_custom_path_keeps_builtins() {
        let catalog = TieredCatalog::load(Some(Path::new("/definitely/not/here.toml")));
        assert_eq!(catalog.len(), 4);
    }
}
