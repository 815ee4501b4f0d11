//! SecLang 규칙 제외 지시문 생성
//!
//! 저장된 [`RuleExclusion`] 목록을 WAF 엔진이 읽는 지시문으로 변환합니다.
//!
//! - `global`: `SecRuleRemoveById <값>` / `SecRuleRemoveByTag <값>`
//! - `site`/`route`: 요청 조건을 `chain`으로 연결한 `SecRule` 묶음.
//!   마지막 규칙이 `ctl:ruleRemoveById`/`ctl:ruleRemoveByTag`로 제외를 수행합니다.
//!
//! # 출력 예시
//! ```text
//! SecRule REQUEST_HEADERS:Host "@streq shop.example.com" "id:990000,phase:1,pass,nolog,t:none,chain"
//! SecRule REQUEST_URI "@beginsWith /api/cart" "ctl:ruleRemoveById=942100"
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use logflux_core::types::{RemoveType, ScopeType};

use crate::error::FeedbackError;
use crate::exclusion::draft::ExclusionDraft;
use crate::exclusion::scope::{ExclusionScope, normalize_remove_type};

/// 범위 지정 제외 규칙의 기본 시작 ID
pub const DEFAULT_RULE_ID_BASE: u64 = 990_000;

/// 범위 지정 제외 규칙마다 증가하는 기본 ID 간격
pub const DEFAULT_RULE_ID_STEP: u64 = 10;

/// 저장된 규칙 제외 항목
///
/// 저장소에 기록된 원시 문자열 그대로이며, 지시문 생성 시 정규화/검증합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleExclusion {
    pub enabled: bool,
    pub scope_type: String,
    pub host: String,
    pub path: String,
    pub method: String,
    pub remove_type: String,
    pub remove_value: String,
}

impl Default for RuleExclusion {
    fn default() -> Self {
        Self {
            enabled: true,
            scope_type: ScopeType::Global.to_string(),
            host: String::new(),
            path: String::new(),
            method: String::new(),
            remove_type: RemoveType::Id.to_string(),
            remove_value: String::new(),
        }
    }
}

impl From<&ExclusionDraft> for RuleExclusion {
    fn from(draft: &ExclusionDraft) -> Self {
        Self {
            enabled: draft.enabled,
            scope_type: draft.scope.scope_type.to_string(),
            host: draft.scope.host.clone(),
            path: draft.scope.path.clone(),
            method: draft.scope.method.clone(),
            remove_type: draft.remove_type.to_string(),
            remove_value: draft.remove_value.clone(),
        }
    }
}

/// 단일 요청 조건
struct Matcher<'a> {
    variable: &'static str,
    operator: &'static str,
    value: &'a str,
}

/// 규칙 제외 지시문 생성기
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveBuilder {
    /// 첫 범위 지정 규칙의 SecRule ID
    pub rule_id_base: u64,
    /// 범위 지정 규칙마다 증가하는 ID 간격
    pub rule_id_step: u64,
}

impl Default for DirectiveBuilder {
    fn default() -> Self {
        Self {
            rule_id_base: DEFAULT_RULE_ID_BASE,
            rule_id_step: DEFAULT_RULE_ID_STEP,
        }
    }
}

impl DirectiveBuilder {
    /// core 설정에서 생성기를 만듭니다.
    pub fn from_core(core: &logflux_core::config::ExclusionConfig) -> Self {
        Self {
            rule_id_base: core.scoped_rule_id_base,
            rule_id_step: core.scoped_rule_id_step,
        }
    }

    /// 규칙 제외 목록을 지시문 텍스트로 변환합니다.
    ///
    /// 비활성화된 항목은 건너뜁니다. 항목 하나라도 유효하지 않으면 전체가 실패합니다.
    /// 범위 지정 규칙 ID가 `u64` 범위를 넘으면 `FeedbackError::Config`를 반환합니다.
    /// 생성할 지시문이 없으면 빈 문자열을 반환합니다.
    pub fn build(&self, exclusions: &[RuleExclusion]) -> Result<String, FeedbackError> {
        // 다음 범위 지정 규칙에 쓸 ID, 이미 범위를 넘었으면 None
        let mut next_rule_id = Some(self.rule_id_base);
        let mut lines = Vec::with_capacity(exclusions.len() * 3);
        let mut skipped = 0usize;

        for exclusion in exclusions {
            if !exclusion.enabled {
                skipped += 1;
                continue;
            }

            let remove_type = normalize_remove_type(&exclusion.remove_type)?;
            let remove_value = exclusion.remove_value.trim();
            if remove_value.is_empty() {
                return Err(FeedbackError::EmptyRemoveValue);
            }

            let scope = ExclusionScope::normalize(
                &exclusion.scope_type,
                &exclusion.host,
                &exclusion.path,
                &exclusion.method,
            )?;

            if scope.is_global() {
                lines.push(global_directive(remove_type, remove_value));
            } else {
                let rule_id = next_rule_id.ok_or_else(|| FeedbackError::Config {
                    field: "scoped_rule_id_base".to_owned(),
                    reason: format!(
                        "rule id overflows u64 (base {}, step {})",
                        self.rule_id_base, self.rule_id_step
                    ),
                })?;
                lines.extend(scoped_directives(rule_id, &scope, remove_type, remove_value));
                next_rule_id = rule_id.checked_add(self.rule_id_step);
            }
        }

        debug!(
            total = exclusions.len(),
            skipped,
            lines = lines.len(),
            "rendered rule exclusion directives"
        );
        if skipped == exclusions.len() && !exclusions.is_empty() {
            info!(skipped, "all rule exclusions are disabled");
        }

        Ok(lines.join("\n").trim().to_owned())
    }

    /// 초안 목록을 바로 지시문으로 변환합니다.
    pub fn build_drafts(&self, drafts: &[ExclusionDraft]) -> Result<String, FeedbackError> {
        let exclusions: Vec<RuleExclusion> = drafts.iter().map(RuleExclusion::from).collect();
        self.build(&exclusions)
    }
}

fn global_directive(remove_type: RemoveType, remove_value: &str) -> String {
    match remove_type {
        RemoveType::Id => format!("SecRuleRemoveById {remove_value}"),
        RemoveType::Tag => format!("SecRuleRemoveByTag {remove_value}"),
    }
}

fn scoped_directives(
    rule_id: u64,
    scope: &ExclusionScope,
    remove_type: RemoveType,
    remove_value: &str,
) -> Vec<String> {
    let mut matchers = Vec::with_capacity(3);
    if !scope.host.is_empty() {
        matchers.push(Matcher {
            variable: "REQUEST_HEADERS:Host",
            operator: "@streq",
            value: &scope.host,
        });
    }
    if !scope.path.is_empty() {
        matchers.push(Matcher {
            variable: "REQUEST_URI",
            operator: "@beginsWith",
            value: &scope.path,
        });
    }
    if !scope.method.is_empty() {
        matchers.push(Matcher {
            variable: "REQUEST_METHOD",
            operator: "@streq",
            value: &scope.method,
        });
    }

    let control_action = match remove_type {
        RemoveType::Id => format!("ctl:ruleRemoveById={remove_value}"),
        RemoveType::Tag => format!("ctl:ruleRemoveByTag={remove_value}"),
    };

    // site 범위는 host, route 범위는 path가 항상 있으므로 matchers는 비어 있지 않음
    let last = matchers.len().saturating_sub(1);
    matchers
        .iter()
        .enumerate()
        .map(|(idx, matcher)| {
            let mut actions = Vec::with_capacity(6);
            if idx == 0 {
                actions.push(format!("id:{rule_id}"));
                actions.extend(["phase:1", "pass", "nolog", "t:none"].map(String::from));
            }
            if idx < last {
                actions.push("chain".to_owned());
            } else {
                actions.push(control_action.clone());
            }
            format!(
                r#"SecRule {} "{} {}" "{}""#,
                matcher.variable,
                matcher.operator,
                matcher.value.replace('"', r#"\""#),
                actions.join(",")
            )
        })
        .collect()
}
