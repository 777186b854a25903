//! Config and ignore-rule resolution.
//!
//! Walks the input tree once per build, locating `.jshintignore` and
//! `.jshintrc` files, and exposes per-file lookups: `config_for` (the
//! cascaded effective config) and `is_ignored`.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{PipelineError, PipelineOptions};

/// Config file name looked up at every cascade level.
pub const CONFIG_FILE: &str = ".jshintrc";

/// Ignore file name looked up at the resolution root.
pub const IGNORE_FILE: &str = ".jshintignore";

/// Parses ignore-file text into an ordered pattern list.
///
/// Lines are trimmed; empty lines and `#` comment lines are dropped.
/// Order is preserved and duplicates are kept.
pub fn parse_ignore_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// An ordered set of glob patterns from an ignore file.
pub struct IgnoreRules {
    patterns: Vec<String>,
    set: GlobSet,
}

impl IgnoreRules {
    /// Builds matchers from already-parsed pattern lines.
    ///
    /// A literal pattern (no glob metacharacters) also matches as a
    /// directory prefix: `dummy` ignores `dummy/anything.js`.
    pub fn new(patterns: Vec<String>) -> Result<Self, PipelineError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                PipelineError::config(format!("Invalid ignore pattern '{}': {}", pattern, e))
            })?;
            builder.add(glob);

            if !pattern.contains(['*', '?', '[', '{']) {
                let prefixed = format!("{}/**", pattern.trim_end_matches('/'));
                let glob = Glob::new(&prefixed).map_err(|e| {
                    PipelineError::config(format!("Invalid ignore pattern '{}': {}", pattern, e))
                })?;
                builder.add(glob);
            }
        }

        let set = builder
            .build()
            .map_err(|e| PipelineError::config(format!("Failed to build ignore set: {}", e)))?;

        Ok(Self { patterns, set })
    }

    /// An empty rule set that ignores nothing.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
        }
    }

    /// The parsed patterns, in file order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether `rel` (relative to the ignore file's directory) matches.
    pub fn matches(&self, rel: &str) -> bool {
        self.set.is_match(rel)
    }
}

/// Effective configuration for one file: the cascaded options, the merged
/// `globals` mapping, and a fingerprint over both.
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub options: Map<String, Value>,
    pub globals: Map<String, Value>,
    pub fingerprint: String,
}

impl EffectiveConfig {
    /// Splits the merged config value into options + globals and
    /// fingerprints the result.
    fn from_merged(mut merged: Map<String, Value>) -> Self {
        let globals = match merged.remove("globals") {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };

        let canonical = serde_json::json!({ "globals": globals, "options": merged });
        let fingerprint = blake3::hash(canonical.to_string().as_bytes())
            .to_hex()
            .to_string();

        Self {
            options: merged,
            globals,
            fingerprint,
        }
    }
}

/// Deep-merges `overlay` into `base`; overlay wins on conflicting keys,
/// objects merge recursively.
pub fn merge_config(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_config(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Merges an ordered list of parsed config documents, shallowest first.
///
/// Pure over the document list: the filesystem walk supplies the order,
/// this function only folds it.
pub fn cascade(documents: Vec<Map<String, Value>>) -> Map<String, Value> {
    let mut merged = Map::new();
    for doc in documents {
        merge_config(&mut merged, doc);
    }
    merged
}

/// Parses config text permissively: `//` and `/* */` comments are allowed.
fn parse_config_text(text: &str, origin: &Path) -> Result<Map<String, Value>, PipelineError> {
    let value = jsonc_parser::parse_to_serde_value(text, &Default::default())
        .map_err(|e| {
            PipelineError::config(format!("Failed to parse {}: {}", origin.display(), e))
        })?
        .unwrap_or(Value::Null);

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(PipelineError::config(format!(
            "{} must contain a JSON object, found {}",
            origin.display(),
            match other {
                Value::Array(_) => "an array",
                Value::String(_) => "a string",
                Value::Number(_) => "a number",
                Value::Bool(_) => "a boolean",
                _ => "an unexpected value",
            }
        ))),
    }
}

/// Resolves config and ignore rules for one build.
pub struct ConfigResolver;

impl ConfigResolver {
    /// Reads the ignore file and prepares the cascade anchors.
    pub fn resolve(root: &Path, options: &PipelineOptions) -> Result<ResolvedConfig, PipelineError> {
        let config_root = match &options.jshintrc_root {
            Some(sub) => root.join(sub),
            None => root.to_path_buf(),
        };

        // The anchor, relative to the tree root, when the resolution root
        // stays inside the tree. A root outside the tree ("../shared") can
        // still supply configs but can never anchor ignore matching.
        let anchor_rel = options
            .jshintrc_root
            .as_deref()
            .map(rel_anchor)
            .unwrap_or(Some(String::new()));

        let ignore_path = config_root.join(IGNORE_FILE);
        let ignore = if ignore_path.is_file() {
            let text = fs::read_to_string(&ignore_path).map_err(|e| {
                PipelineError::file(format!("Failed to read {}: {}", ignore_path.display(), e))
            })?;
            let patterns = parse_ignore_lines(&text);
            debug!("loaded {} ignore patterns from {}", patterns.len(), ignore_path.display());
            IgnoreRules::new(patterns)?
        } else {
            IgnoreRules::empty()
        };

        Ok(ResolvedConfig {
            root: root.to_path_buf(),
            config_root,
            anchor_rel,
            ignore,
            override_path: options.jshintrc_path.clone(),
            dir_cache: Mutex::new(HashMap::new()),
        })
    }
}

/// Normalizes a configured root to a tree-relative anchor, or `None` when
/// it escapes the tree.
fn rel_anchor(sub: &Path) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in sub.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(parts.join("/"))
}

/// Per-build resolution result: `config_for` and `is_ignored` lookups.
pub struct ResolvedConfig {
    root: PathBuf,
    config_root: PathBuf,
    anchor_rel: Option<String>,
    ignore: IgnoreRules,
    override_path: Option<PathBuf>,
    dir_cache: Mutex<HashMap<String, Arc<EffectiveConfig>>>,
}

impl ResolvedConfig {
    /// The parsed ignore patterns, in file order.
    pub fn ignored_patterns(&self) -> &[String] {
        self.ignore.patterns()
    }

    /// Whether the file at `rel` (relative to the tree root) is ignored.
    ///
    /// Patterns are anchored at the ignore file's directory; a file outside
    /// that directory can never be ignored.
    pub fn is_ignored(&self, rel: &str) -> bool {
        let Some(anchor) = &self.anchor_rel else {
            return false;
        };
        let local = if anchor.is_empty() {
            Some(rel)
        } else {
            rel.strip_prefix(anchor.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
        };
        match local {
            Some(local) => self.ignore.matches(local),
            None => false,
        }
    }

    /// The effective config for the file at `rel` (relative to the tree
    /// root): every `.jshintrc` from the resolution root down to the file's
    /// directory, deep-merged, deeper levels winning.
    pub fn config_for(&self, rel: &str) -> Result<Arc<EffectiveConfig>, PipelineError> {
        let dir = match rel.rsplit_once('/') {
            Some((dir, _)) => dir.to_string(),
            None => String::new(),
        };

        if let Some(cached) = self
            .dir_cache
            .lock()
            .map_err(|_| PipelineError::Internal("Resolver cache mutex poisoned".to_string()))?
            .get(&dir)
        {
            return Ok(Arc::clone(cached));
        }

        let mut documents = Vec::new();
        for candidate in self.candidate_files(&dir) {
            if !candidate.is_file() {
                continue;
            }
            let text = fs::read_to_string(&candidate).map_err(|e| {
                PipelineError::file(format!("Failed to read {}: {}", candidate.display(), e))
            })?;
            documents.push(parse_config_text(&text, &candidate)?);
        }

        let effective = Arc::new(EffectiveConfig::from_merged(cascade(documents)));

        self.dir_cache
            .lock()
            .map_err(|_| PipelineError::Internal("Resolver cache mutex poisoned".to_string()))?
            .insert(dir, Arc::clone(&effective));

        Ok(effective)
    }

    /// Candidate config files for a file directory, shallowest first.
    fn candidate_files(&self, dir: &str) -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Some(override_path) = &self.override_path {
            let override_abs = if override_path.is_absolute() {
                override_path.clone()
            } else {
                self.root.join(override_path)
            };
            // Cascade above the override's own directory, then the
            // override file itself, used verbatim in place of the walk.
            if let Ok(between) = override_abs
                .parent()
                .unwrap_or(self.config_root.as_path())
                .strip_prefix(&self.config_root)
            {
                let mut level = self.config_root.clone();
                candidates.push(level.join(CONFIG_FILE));
                for component in between.components() {
                    level = level.join(component);
                    candidates.push(level.join(CONFIG_FILE));
                }
                // The override replaces its own directory's lookup.
                candidates.pop();
            }
            candidates.push(override_abs);
            return candidates;
        }

        candidates.push(self.config_root.join(CONFIG_FILE));

        // Descend toward the file's directory only when it sits under the
        // resolution root.
        if let Some(anchor) = &self.anchor_rel {
            let descent = if anchor.is_empty() {
                Some(dir)
            } else if dir == anchor {
                Some("")
            } else {
                dir.strip_prefix(anchor.as_str())
                    .and_then(|rest| rest.strip_prefix('/'))
            };

            if let Some(descent) = descent {
                let mut level = self.config_root.clone();
                for part in descent.split('/').filter(|p| !p.is_empty()) {
                    level = level.join(part);
                    candidates.push(level.join(CONFIG_FILE));
                }
            }
        }

        candidates
    }
}
