use chrono::{DateTime, Utc};
use serde::Serialize;
use std::env;
use utoipa::ToSchema;

/// Build metadata exposed via `/api/v1/build-info` and startup logs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct BuildInfo {
    /// Release version, `dev` for local builds
    pub version: String,
    /// Commit the binary was built from
    pub git_sha: String,
    /// RFC 3339 build timestamp in UTC
    pub build_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BuildInfo {
    /// Resolve build metadata from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve build metadata through a custom lookup (used by tests).
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let version = lookup("APP_VERSION")
            .or_else(|| lookup("VERSION"))
            .unwrap_or_else(|| "dev".to_string());

        let git_sha = lookup("GIT_SHA").unwrap_or_else(|| "unknown".to_string());

        let build_time = lookup("BUILD_TIME")
            .and_then(|value| normalize_build_time(&value))
            .unwrap_or_else(|| "unknown".to_string());

        Self {
            version,
            git_sha,
            build_time,
            message: lookup("BUILD_MESSAGE"),
        }
    }
}

fn normalize_build_time(value: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc3339(&format!("{value}Z")))
        .map(|dt| dt.with_timezone(&Utc).to_rfc3339())
        .ok()
}
