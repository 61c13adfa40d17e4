//! # Route Manifests
//!
//! Routes can be declared in a YAML or JSON file instead of code. A manifest
//! lists routes per method with their declared variable types, and may carry
//! match cases that describe what a given request is expected to resolve to.
//!
//! ```yaml
//! use_trailing_slash_match: true
//! routes:
//!   - method: GET
//!     name: product_image
//!     pattern: /products/{id}/images/{imgId}
//!     types: [int, long]
//! cases:
//!   - method: GET
//!     path: /products/13/images/35
//!     expect: product_image
//!     variables: { id: 13, imgId: 35 }
//!   - method: PATCH
//!     path: /products/13
//!     error: unsupported_method
//! ```
//!
//! Routes built from a manifest carry no handler; callers inspect
//! [`MatchResult::name`] or attach handlers in code afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::Result;
use crate::route::{MatchResult, NOT_FOUND};
use crate::router::{HttpMethod, Router};

/// Parsed route manifest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RouteManifest {
    /// Overrides the caller's default when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_trailing_slash_match: Option<bool>,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cases: Vec<MatchCase>,
}

/// One route declaration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteEntry {
    pub method: String,
    pub name: String,
    pub pattern: String,
    /// Type names in placeholder order (`int`, `long`, `decimal`, `boolean`, `string`)
    #[serde(default)]
    pub types: Vec<String>,
}

/// An expected outcome for one request.
///
/// Exactly one of `expect` (route name, or `404_NOT_FOUND`) and `error`
/// (an error kind such as `unsupported_method`) should be set.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MatchCase {
    #[serde(default = "default_method")]
    pub method: String,
    /// Absent means the mount root
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<String>,
    /// Checked exactly when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

/// A case whose outcome differed from the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFailure {
    /// Position of the case in the manifest
    pub index: usize,
    pub method: String,
    pub path: String,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for CaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "case #{} {} {}: expected {}, got {}",
            self.index, self.method, self.path, self.expected, self.actual
        )
    }
}

/// Load a manifest, parsing `.yaml`/`.yml` files as YAML and anything else as JSON.
pub fn load_manifest(path: impl AsRef<Path>) -> anyhow::Result<RouteManifest> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let manifest = if is_yaml {
        RouteManifest::from_yaml_str(&content)
    } else {
        RouteManifest::from_json_str(&content)
    }
    .with_context(|| format!("Failed to parse manifest {}", path.display()))?;

    info!(
        manifest = %path.display(),
        routes = manifest.routes.len(),
        cases = manifest.cases.len(),
        "Manifest loaded"
    );
    Ok(manifest)
}

impl RouteManifest {
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Build a router holding every declared route, in declaration order.
    ///
    /// # Errors
    ///
    /// The first registration error: an unknown method, an unknown type name
    /// or a malformed pattern.
    pub fn build_router<C>(&self, default_trailing_slash_match: bool) -> Result<Router<C>> {
        let trailing = self
            .use_trailing_slash_match
            .unwrap_or(default_trailing_slash_match);
        let mut router = Router::new(trailing);
        for entry in &self.routes {
            let method: HttpMethod = entry.method.parse()?;
            router.register_with_type_names(method, &entry.name, &entry.pattern, None, &entry.types)?;
        }
        Ok(router)
    }

    /// Run every case against `router`, returning the ones that failed.
    #[must_use]
    pub fn check<C>(&self, router: &Router<C>) -> Vec<CaseFailure> {
        let failures: Vec<CaseFailure> = self
            .cases
            .iter()
            .enumerate()
            .filter_map(|(index, case)| {
                let outcome = router.match_path(&case.method, case.path.as_deref());
                let (expected, actual) = case.compare(outcome)?;
                Some(CaseFailure {
                    index,
                    method: case.method.clone(),
                    path: case.path.clone().unwrap_or_default(),
                    expected,
                    actual,
                })
            })
            .collect();
        debug!(
            cases = self.cases.len(),
            failures = failures.len(),
            "Manifest cases checked"
        );
        failures
    }
}

impl MatchCase {
    /// `None` when the outcome agrees with the case, else `(expected, actual)`.
    fn compare<C>(&self, outcome: Result<MatchResult<C>>) -> Option<(String, String)> {
        let matched = match (outcome, &self.error) {
            (Err(err), Some(kind)) if err.kind() == kind => return None,
            (Err(err), _) => return Some((self.describe_expected(), format!("error {}", err.kind()))),
            (Ok(m), Some(kind)) => return Some((format!("error {kind}"), m.to_string())),
            (Ok(m), None) => m,
        };

        let expected_name = self.expect.as_deref().unwrap_or(NOT_FOUND);
        if matched.name() != expected_name {
            return Some((self.describe_expected(), matched.to_string()));
        }

        let expected_vars = self.variables.as_ref()?;
        let actual_vars: BTreeMap<String, Value> = matched
            .variables()
            .filter_map(|(k, v)| serde_json::to_value(v).ok().map(|v| (k.to_string(), v)))
            .collect();
        let same = actual_vars.len() == expected_vars.len()
            && expected_vars
                .iter()
                .all(|(k, want)| actual_vars.get(k).is_some_and(|got| values_equal(got, want)));
        if same {
            None
        } else {
            Some((self.describe_expected(), matched.to_string()))
        }
    }

    fn describe_expected(&self) -> String {
        if let Some(kind) = &self.error {
            return format!("error {kind}");
        }
        let name = self.expect.as_deref().unwrap_or(NOT_FOUND);
        match &self.variables {
            Some(vars) if !vars.is_empty() => {
                let vars: Vec<String> = vars.iter().map(|(k, v)| format!("{k}={v}")).collect();
                format!("{name} {{{}}}", vars.join(", "))
            }
            _ => name.to_string(),
        }
    }
}

/// Numbers compare by value so that `10` in a manifest equals a decimal `10.0`.
/// Integers compare exactly, so `long` values past 2^53 stay distinct.
fn values_equal(actual: &Value, expected: &Value) -> bool {
    if let (Some(a), Some(b)) = (actual.as_i64(), expected.as_i64()) {
        return a == b;
    }
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(b)) if actual.is_number() && expected.is_number() => a == b,
        _ => actual == expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouterError;

    const YAML: &str = r#"
use_trailing_slash_match: false
routes:
  - method: get
    name: show
    pattern: /products/{id}
    types: [int]
  - method: POST
    name: create
    pattern: /products/
cases:
  - path: /products/13
    expect: show
    variables: { id: 13 }
  - method: POST
    path: /products
  - method: DELETE
    path: /products/1
    expect: "404_NOT_FOUND"
  - method: PATCH
    path: /products/1
    error: unsupported_method
"#;

    #[test]
    fn test_parse_yaml_defaults() {
        let manifest = RouteManifest::from_yaml_str(YAML).unwrap();
        assert_eq!(manifest.use_trailing_slash_match, Some(false));
        assert_eq!(manifest.routes.len(), 2);
        assert!(manifest.routes[1].types.is_empty());
        assert_eq!(manifest.cases[0].method, "GET");
        assert_eq!(manifest.cases[1].expect, None);
    }

    #[test]
    fn test_manifest_policy_overrides_default() {
        let manifest = RouteManifest::from_yaml_str(YAML).unwrap();
        let router: Router<()> = manifest.build_router(true).unwrap();
        assert!(!router.table(HttpMethod::Post).use_trailing_slash_match());
        assert!(manifest.check(&router).is_empty());
    }

    #[test]
    fn test_failures_are_reported() {
        let mut manifest = RouteManifest::from_yaml_str(YAML).unwrap();
        manifest.cases[0].variables = Some(BTreeMap::from([("id".to_string(), Value::from(14))]));
        manifest.cases[1].expect = Some("create".into());
        let router: Router<()> = manifest.build_router(true).unwrap();

        let failures = manifest.check(&router);
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].index, 0);
        assert_eq!(failures[0].expected, "show {id=14}");
        assert_eq!(failures[0].actual, "show {id=13}");
        assert_eq!(failures[1].actual, NOT_FOUND);
        assert!(failures[1].to_string().starts_with("case #1 POST /products"));
    }

    #[test]
    fn test_unknown_type_name_fails_build() {
        let manifest = RouteManifest::from_json_str(
            r#"{"routes":[{"method":"GET","name":"x","pattern":"/x/{v}","types":["uuid"]}]}"#,
        )
        .unwrap();
        let err = manifest.build_router::<()>(true).unwrap_err();
        assert!(matches!(err, RouterError::UnsupportedType { ref name } if name == "uuid"));
    }

    #[test]
    fn test_unknown_method_fails_build() {
        let manifest = RouteManifest::from_json_str(
            r#"{"routes":[{"method":"PATCH","name":"x","pattern":"/x"}]}"#,
        )
        .unwrap();
        let err = manifest.build_router::<()>(true).unwrap_err();
        assert_eq!(err.kind(), "unsupported_method");
    }

    #[test]
    fn test_values_equal_numbers() {
        assert!(values_equal(&Value::from(10.0), &Value::from(10)));
        assert!(values_equal(&Value::from("a"), &Value::from("a")));
        assert!(!values_equal(&Value::from("10"), &Value::from(10)));
    }

    #[test]
    fn test_values_equal_large_longs() {
        let a = Value::from(9_007_199_254_740_993_i64);
        let b = Value::from(9_007_199_254_740_992_i64);
        assert!(!values_equal(&a, &b));
        assert!(values_equal(&a, &a.clone()));
    }

    #[test]
    fn test_large_long_mismatch_is_reported() {
        let manifest = RouteManifest::from_yaml_str(
            r#"
routes:
  - { method: GET, name: item, pattern: "/items/{id}", types: [long] }
cases:
  - path: /items/9007199254740993
    expect: item
    variables: { id: 9007199254740992 }
"#,
        )
        .unwrap();
        let router: Router<()> = manifest.build_router(true).unwrap();
        assert_eq!(manifest.check(&router).len(), 1);
    }
}
