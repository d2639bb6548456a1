//! Per-source compiler selection.
//!
//! The external compiler picks one of the declared compilers for each source
//! file from the file's `pragma solidity` directive. The rule is reproduced
//! here so tools can ask which compiler a file will get:
//!
//! 1. An override declared for the file's path wins, provided it satisfies
//!    the pragma.
//! 2. Otherwise the highest declared version satisfying the pragma is used.

use std::fmt;
use std::str::FromStr;

use semver::{Version, VersionReq};
use thiserror::Error;

use crate::config::{BuildConfig, CompilerSpec};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompilerError {
  #[error("no `pragma solidity` directive found")]
  MissingPragma,

  #[error("invalid version requirement '{requirement}': {reason}")]
  InvalidRequirement { requirement: String, reason: String },

  #[error("no declared compiler satisfies '{requirement}' (declared: {})", available.join(", "))]
  NoMatchingCompiler { requirement: String, available: Vec<String> },

  #[error("override for {path} uses {version}, which does not satisfy '{requirement}'")]
  OverrideMismatch {
    path: String,
    version: Version,
    requirement: String,
  },
}

/// A Solidity version range such as `^0.8.0` or `>=0.6.0 <0.8.0 || 0.8.20`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolidityRequirement {
  source: String,
  alternatives: Vec<VersionReq>,
}

impl SolidityRequirement {
  /// Parse a Solidity range expression.
  ///
  /// Differences from plain semver syntax that are handled here: a bare
  /// version means exactly that version, operators may be separated from
  /// their version by spaces, comparators are separated by whitespace,
  /// `a - b` is an inclusive range and `||` separates alternatives.
  pub fn parse(expr: &str) -> Result<Self, CompilerError> {
    let source = expr.trim().to_string();
    let invalid = |reason: String| CompilerError::InvalidRequirement {
      requirement: source.clone(),
      reason,
    };

    if source.is_empty() {
      return Err(invalid("empty requirement".to_string()));
    }

    let alternatives = source
      .split("||")
      .map(|alt| parse_alternative(alt).map_err(invalid))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self { source, alternatives })
  }

  pub fn matches(&self, version: &Version) -> bool {
    self.alternatives.iter().any(|req| req.matches(version))
  }

  pub fn as_str(&self) -> &str {
    &self.source
  }
}

impl FromStr for SolidityRequirement {
  type Err = CompilerError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl fmt::Display for SolidityRequirement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.source)
  }
}

fn is_operator(token: &str) -> bool {
  token.chars().all(|c| matches!(c, '<' | '>' | '=' | '^' | '~'))
}

fn parse_alternative(alt: &str) -> Result<VersionReq, String> {
  let alt = alt.trim();
  if alt.is_empty() {
    return Err("empty alternative".to_string());
  }

  if let Some((low, high)) = alt.split_once(" - ") {
    let range = format!(">={}, <={}", low.trim(), high.trim());
    return VersionReq::parse(&range).map_err(|e| e.to_string());
  }

  let mut comparators = Vec::new();
  let mut pending_op = String::new();
  for token in alt.split_whitespace() {
    if is_operator(token) {
      pending_op.push_str(token);
      continue;
    }
    let mut comparator = std::mem::take(&mut pending_op);
    if comparator.is_empty() && token.starts_with(|c: char| c.is_ascii_digit()) {
      comparator.push('=');
    }
    comparator.push_str(token);
    comparators.push(comparator);
  }

  if !pending_op.is_empty() {
    return Err(format!("operator '{}' is missing a version", pending_op));
  }

  VersionReq::parse(&comparators.join(", ")).map_err(|e| e.to_string())
}

/// Remove `//` and `/* */` comments so commented-out pragmas are ignored.
fn strip_comments(source: &str) -> String {
  let mut out = String::with_capacity(source.len());
  let mut chars = source.chars().peekable();

  while let Some(c) = chars.next() {
    let next = chars.peek().copied();
    match (c, next) {
      ('/', Some('/')) => {
        for c in chars.by_ref() {
          if c == '\n' {
            out.push('\n');
            break;
          }
        }
      }
      ('/', Some('*')) => {
        chars.next();
        let mut prev = '\0';
        for c in chars.by_ref() {
          if prev == '*' && c == '/' {
            break;
          }
          prev = c;
        }
        out.push(' ');
      }
      _ => out.push(c),
    }
  }

  out
}

/// Extract the version requirement of the first `pragma solidity` directive.
pub fn parse_pragma(source: &str) -> Result<SolidityRequirement, CompilerError> {
  let code = strip_comments(source);

  for statement in code.split(';') {
    let mut words = statement.split_whitespace();
    if words.next() != Some("pragma") {
      continue;
    }
    // `pragma solidity>=0.8.0` has no space before the expression.
    let Some(rest) = words.next().and_then(|w| w.strip_prefix("solidity")) else {
      continue;
    };
    if rest.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_') {
      continue;
    }
    let expr = std::iter::once(rest)
      .chain(words)
      .filter(|w| !w.is_empty())
      .collect::<Vec<_>>()
      .join(" ");
    return SolidityRequirement::parse(&expr);
  }

  Err(CompilerError::MissingPragma)
}

/// Normalise a source path to the `contracts/Foo.sol` form used by override keys.
fn source_key(path: &str) -> String {
  let path = path.replace('\\', "/");
  path.strip_prefix("./").unwrap_or(&path).to_string()
}

impl BuildConfig {
  /// Select the compiler for a source file with the given requirement.
  pub fn compiler_for(
    &self,
    source_path: &str,
    requirement: &SolidityRequirement,
  ) -> Result<&CompilerSpec, CompilerError> {
    let key = source_key(source_path);
    if let Some(spec) = self.overrides().get(&key) {
      if !requirement.matches(spec.version()) {
        return Err(CompilerError::OverrideMismatch {
          path: key,
          version: spec.version().clone(),
          requirement: requirement.to_string(),
        });
      }
      return Ok(spec);
    }

    // Reverse first so the earliest declaration wins among equal versions.
    self
      .compilers()
      .iter()
      .rev()
      .filter(|spec| requirement.matches(spec.version()))
      .max_by(|a, b| a.version().cmp(b.version()))
      .ok_or_else(|| CompilerError::NoMatchingCompiler {
        requirement: requirement.to_string(),
        available: self.compilers().iter().map(|c| c.version().to_string()).collect(),
      })
  }

  /// Select the compiler for a source file from its contents.
  pub fn compiler_for_source(&self, source_path: &str, source: &str) -> Result<&CompilerSpec, CompilerError> {
    let requirement = parse_pragma(source)?;
    self.compiler_for(source_path, &requirement)
  }
}
