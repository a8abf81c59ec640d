//! Agent definition checking: frontmatter extraction and restriction policies.
//!
//! Agent files are markdown documents with a YAML frontmatter block that
//! declares what the agent may touch. This module extracts that block,
//! type-checks the fields it understands (the typed struct is the
//! schema; unknown fields pass through untouched), and derives two
//! restriction policies from it:
//!
//! - tools: whitelist, blacklist, or unrestricted, with `security_level:
//!   high` forcing a read-only tool whitelist and `readonly: true`
//!   blacklisting the mutating tools.
//! - paths: always at least the built-in sensitive-path blacklist
//!   (SSH and cloud credentials, env files, secrets), optionally
//!   tightened to a whitelist via `allowed_paths`.
//!
//! Policy checks match a path against each pattern as a glob first and a
//! literal prefix second, with `~` expanded, so `~/.ssh` blocks the whole
//! directory without needing a companion wildcard to resolve.

use std::path::Path;
use std::sync::LazyLock;

use directories::BaseDirs;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Tool whitelist applied when `security_level: high` is set.
const HIGH_SECURITY_ALLOWED: [&str; 3] = ["Read", "Grep", "Glob"];
/// Tool blacklist applied when `security_level: high` is set.
const HIGH_SECURITY_FORBIDDEN: [&str; 3] = ["Write", "Edit", "Bash"];

/// Paths no agent may touch regardless of its own declarations.
const DEFAULT_FORBIDDEN_PATHS: [&str; 9] = [
    "~/.ssh",
    "~/.ssh/*",
    "~/.aws",
    "~/.aws/*",
    "~/.env*",
    ".env",
    ".env.*",
    "credentials.json",
    "secrets.*",
];

// ── frontmatter ──

static FRONTMATTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\n(.*?)\n---\n").unwrap());

/// The restriction-relevant subset of agent frontmatter.
///
/// Deserializing into this struct is the type check: a field of the
/// wrong shape fails the whole file, while fields this struct does not
/// name are carried through to the output untouched.
#[derive(Debug, Default, Deserialize)]
pub struct AgentMetadata {
    pub tools: Option<Vec<String>>,
    pub forbidden_tools: Option<Vec<String>>,
    pub security_level: Option<String>,
    #[serde(default)]
    pub readonly: bool,
    pub allowed_paths: Option<Vec<String>>,
    pub forbidden_paths: Option<Vec<String>>,
}

fn extract_frontmatter(content: &str) -> Option<&str> {
    FRONTMATTER_PATTERN
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Check one agent file and describe the restrictions it implies.
///
/// Returns `{"metadata": <raw frontmatter>, "restrictions": {"tools":
/// ..., "paths": ...}}` so callers can both inspect the declaration and
/// enforce the derived policy.
///
/// # Errors
///
/// Returns an error when the file is unreadable, has no frontmatter
/// block (an empty block counts as missing), or declares a
/// restriction field with the wrong type.
pub fn check_agent_file(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)?;
    let block = extract_frontmatter(&content).ok_or_else(|| Error::MissingFrontmatter {
        path: path.to_path_buf(),
    })?;

    let metadata: Value = serde_yaml::from_str(block)?;
    if metadata.is_null() {
        return Err(Error::MissingFrontmatter {
            path: path.to_path_buf(),
        });
    }
    let typed: AgentMetadata = serde_yaml::from_value(metadata.clone())
        .map_err(|e| Error::InvalidMetadata(e.to_string()))?;

    Ok(json!({
        "metadata": serde_json::to_value(&metadata)?,
        "restrictions": {
            "tools": ToolRestrictions::from_metadata(&typed),
            "paths": PathRestrictions::from_metadata(&typed),
        },
    }))
}

// ── restriction policies ──

/// How a restriction list is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RestrictionMode {
    None,
    Whitelist,
    Blacklist,
}

/// Tool access policy derived from agent frontmatter.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ToolRestrictions {
    pub allowed: Vec<String>,
    pub forbidden: Vec<String>,
    pub mode: RestrictionMode,
}

impl ToolRestrictions {
    /// Later declarations override earlier ones: `security_level: high`
    /// replaces any explicit tool lists, and `readonly` extends the
    /// forbidden list afterwards.
    #[must_use]
    pub fn from_metadata(metadata: &AgentMetadata) -> Self {
        let mut policy = Self {
            allowed: Vec::new(),
            forbidden: Vec::new(),
            mode: RestrictionMode::None,
        };

        if let Some(tools) = &metadata.tools {
            policy.allowed = tools.clone();
            policy.mode = RestrictionMode::Whitelist;
        }
        if let Some(forbidden) = &metadata.forbidden_tools {
            policy.forbidden = forbidden.clone();
            if policy.mode == RestrictionMode::None {
                policy.mode = RestrictionMode::Blacklist;
            }
        }
        if metadata.security_level.as_deref() == Some("high") {
            policy.allowed = HIGH_SECURITY_ALLOWED.map(String::from).to_vec();
            policy.forbidden = HIGH_SECURITY_FORBIDDEN.map(String::from).to_vec();
            policy.mode = RestrictionMode::Whitelist;
        }
        if metadata.readonly {
            for tool in ["Write", "Edit"] {
                if !policy.forbidden.iter().any(|t| t == tool) {
                    policy.forbidden.push(tool.to_string());
                }
            }
            if policy.mode == RestrictionMode::None {
                policy.mode = RestrictionMode::Blacklist;
            }
        }

        policy
    }

    #[must_use]
    pub fn allows(&self, tool: &str) -> bool {
        match self.mode {
            RestrictionMode::Whitelist => self.allowed.iter().any(|t| t == tool),
            RestrictionMode::Blacklist => !self.forbidden.iter().any(|t| t == tool),
            RestrictionMode::None => true,
        }
    }
}

/// Path access policy derived from agent frontmatter.
///
/// Serialized field order mirrors the policy's precedence: forbidden
/// patterns are checked before the allowed list.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PathRestrictions {
    pub forbidden: Vec<String>,
    pub allowed: Vec<String>,
    pub mode: RestrictionMode,
}

impl PathRestrictions {
    #[must_use]
    pub fn from_metadata(metadata: &AgentMetadata) -> Self {
        let mut policy = Self {
            forbidden: DEFAULT_FORBIDDEN_PATHS.map(String::from).to_vec(),
            allowed: Vec::new(),
            mode: RestrictionMode::Blacklist,
        };

        if let Some(extra) = &metadata.forbidden_paths {
            policy.forbidden.extend(extra.iter().cloned());
        }
        if let Some(allowed) = &metadata.allowed_paths {
            policy.allowed = allowed.clone();
            policy.mode = RestrictionMode::Whitelist;
        }

        policy
    }

    /// Forbidden patterns win over the allowed list in whitelist mode.
    #[must_use]
    pub fn allows(&self, path: &str) -> bool {
        let path = expand_tilde(path);
        if self
            .forbidden
            .iter()
            .any(|pattern| matches_pattern(&path, &expand_tilde(pattern)))
        {
            return false;
        }
        if self.mode == RestrictionMode::Whitelist {
            return self
                .allowed
                .iter()
                .any(|pattern| matches_pattern(&path, &expand_tilde(pattern)));
        }
        true
    }
}

/// Glob match first, literal prefix second. The prefix check is what
/// lets a bare directory pattern like `~/.ssh` cover everything below
/// it.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    glob::Pattern::new(pattern).is_ok_and(|p| p.matches(path)) || path.starts_with(pattern)
}

fn expand_tilde(input: &str) -> String {
    if input == "~" {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().display().to_string();
        }
    }
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest).display().to_string();
        }
    }
    input.to_string()
}

// ── tests ──
