//! 제외 규칙 적용 범위 정규화
//!
//! 저장된 제외 규칙과 피드백에서 만든 초안 모두 같은 규칙으로 정규화합니다.
//!
//! - `global`: host/path/method를 비움
//! - `site`: host 필수, path/method를 비움
//! - `route`: path 필수, host/method 유지

use serde::{Deserialize, Serialize};

use logflux_core::types::{RemoveType, ScopeType};

use crate::error::FeedbackError;

/// 허용되는 HTTP 메서드 (빈 값은 "모든 메서드")
pub const ALLOWED_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

/// 적용 범위 문자열을 정규화합니다. 빈 값은 `global`.
pub fn normalize_scope_type(raw: &str) -> Result<ScopeType, FeedbackError> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return Ok(ScopeType::Global);
    }
    normalized
        .parse()
        .map_err(|_| FeedbackError::InvalidScope(raw.to_owned()))
}

/// 제거 방식 문자열을 정규화합니다. 빈 값은 `id`.
pub fn normalize_remove_type(raw: &str) -> Result<RemoveType, FeedbackError> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return Ok(RemoveType::Id);
    }
    normalized
        .parse()
        .map_err(|_| FeedbackError::InvalidRemoveType(raw.to_owned()))
}

/// 호스트: 공백 제거 + 소문자
pub fn normalize_host(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// 경로: 공백 제거, 비어 있지 않으면 `/`로 시작하도록 보정
pub fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

/// 메서드: 공백 제거 + 대문자, 허용 목록 검증
pub fn normalize_method(raw: &str) -> Result<String, FeedbackError> {
    let normalized = raw.trim().to_uppercase();
    if normalized.is_empty() || ALLOWED_METHODS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(FeedbackError::InvalidMethod(raw.to_owned()))
    }
}

/// 정규화된 제외 규칙 적용 범위
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionScope {
    pub scope_type: ScopeType,
    pub host: String,
    pub path: String,
    pub method: String,
}

impl ExclusionScope {
    /// 원시 문자열 필드를 정규화하고 범위별 필수 필드를 검증합니다.
    ///
    /// 메서드는 범위와 무관하게 먼저 검증하므로, `global` 범위라도
    /// 허용되지 않는 메서드가 들어오면 에러입니다.
    pub fn normalize(
        scope_type: &str,
        host: &str,
        path: &str,
        method: &str,
    ) -> Result<Self, FeedbackError> {
        let scope_type = normalize_scope_type(scope_type)?;
        let host = normalize_host(host);
        let path = normalize_path(path);
        let method = normalize_method(method)?;

        Self::prune(scope_type, host, path, method)
    }

    fn prune(
        scope_type: ScopeType,
        host: String,
        path: String,
        method: String,
    ) -> Result<Self, FeedbackError> {
        match scope_type {
            ScopeType::Global => Ok(Self::default()),
            ScopeType::Site => {
                if host.is_empty() {
                    return Err(missing_field(scope_type, "host"));
                }
                Ok(Self {
                    scope_type,
                    host,
                    ..Self::default()
                })
            }
            ScopeType::Route => {
                if path.is_empty() {
                    return Err(missing_field(scope_type, "path"));
                }
                Ok(Self {
                    scope_type,
                    host,
                    path,
                    method,
                })
            }
        }
    }

    /// 대상 요청 정보로부터 가장 좁은 범위를 추론합니다.
    ///
    /// path가 있으면 `route`, host만 있으면 `site`, 둘 다 없으면 `global`.
    pub fn infer(host: &str, path: &str, method: &str) -> Result<Self, FeedbackError> {
        let scope_type = if !path.trim().is_empty() {
            ScopeType::Route
        } else if !host.trim().is_empty() {
            ScopeType::Site
        } else {
            ScopeType::Global
        };
        Self::normalize(scope_type.as_str(), host, path, method)
    }

    pub fn is_global(&self) -> bool {
        self.scope_type == ScopeType::Global
    }
}

fn missing_field(scope_type: ScopeType, field: &str) -> FeedbackError {
    FeedbackError::MissingScopeField {
        scope: scope_type.to_string(),
        field: field.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_type_defaults_to_global() {
        assert_eq!(normalize_scope_type("").unwrap(), ScopeType::Global);
        assert_eq!(normalize_scope_type("  Route ").unwrap(), ScopeType::Route);
        assert!(matches!(
            normalize_scope_type("zone"),
            Err(FeedbackError::InvalidScope(_))
        ));
    }

    #[test]
    fn remove_type_defaults_to_id() {
        assert_eq!(normalize_remove_type(" ").unwrap(), RemoveType::Id);
        assert_eq!(normalize_remove_type("TAG").unwrap(), RemoveType::Tag);
        assert!(matches!(
            normalize_remove_type("msg"),
            Err(FeedbackError::InvalidRemoveType(_))
        ));
    }

    #[test]
    fn path_gets_leading_slash() {
        assert_eq!(normalize_path(" api/login "), "/api/login");
        assert_eq!(normalize_path("/admin"), "/admin");
        assert_eq!(normalize_path("   "), "");
    }

    #[test]
    fn method_is_validated() {
        assert_eq!(normalize_method(" post ").unwrap(), "POST");
        assert_eq!(normalize_method("").unwrap(), "");
        assert!(matches!(
            normalize_method("TRACE"),
            Err(FeedbackError::InvalidMethod(_))
        ));
    }

    #[test]
    fn global_clears_fields() {
        let scope = ExclusionScope::normalize("", "Example.com", "/api", "get").unwrap();
        assert_eq!(scope, ExclusionScope::default());
        assert!(scope.is_global());
    }

    #[test]
    fn global_still_rejects_bad_method() {
        assert!(ExclusionScope::normalize("global", "", "", "BREW").is_err());
    }

    #[test]
    fn site_requires_host() {
        let err = ExclusionScope::normalize("site", " ", "/api", "GET").unwrap_err();
        assert_eq!(err.to_string(), "site scope requires host");

        let scope = ExclusionScope::normalize("site", "WWW.Example.com", "/api", "GET").unwrap();
        assert_eq!(scope.host, "www.example.com");
        assert!(scope.path.is_empty());
        assert!(scope.method.is_empty());
    }

    #[test]
    fn route_requires_path_and_keeps_host_and_method() {
        let err = ExclusionScope::normalize("route", "example.com", "", "").unwrap_err();
        assert_eq!(err.to_string(), "route scope requires path");

        let scope = ExclusionScope::normalize("route", "Example.com", "login", "post").unwrap();
        assert_eq!(scope.scope_type, ScopeType::Route);
        assert_eq!(scope.host, "example.com");
        assert_eq!(scope.path, "/login");
        assert_eq!(scope.method, "POST");
    }

    #[test]
    fn infer_picks_narrowest_scope() {
        assert_eq!(
            ExclusionScope::infer("a.com", "/x", "GET").unwrap().scope_type,
            ScopeType::Route
        );
        let site = ExclusionScope::infer("a.com", "", "GET").unwrap();
        assert_eq!(site.scope_type, ScopeType::Site);
        assert!(site.method.is_empty());
        assert!(ExclusionScope::infer("", "", "").unwrap().is_global());
    }
}
