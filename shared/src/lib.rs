use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 认证令牌的请求头名称
pub const HEADER_AUTH_TOKEN: &str = "X-Auth-Token";

/// 仪表盘默认标签页（作为 `?tab=` 查询参数附加）
pub const DEFAULT_DASHBOARD_TAB: &str = "Home";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 平台用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Investor,
    Issuer,
}

/// 组织群组（大学或其下属课程）
///
/// `parent_group_id` 为空表示顶级群组（大学），
/// 非空表示嵌套群组（课程）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupProperties {
    pub id: String,
    pub group_user_name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_group_id: Option<String>,
}

impl GroupProperties {
    pub fn is_course(&self) -> bool {
        self.parent_group_id.is_some()
    }
}

/// 当前用户与某群组之间的只读成员关系
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMembership {
    pub group: GroupProperties,
    pub role: UserRole,
}

/// 普通平台用户（投资人或发行人）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformUser {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    /// 用户指定的"主群组"，登录后默认落点
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_group_user_name: Option<String>,
}

/// 管理员档案
///
/// `super_admin` 为 true 时为平台级超级管理员；
/// 否则为群组管理员，`administered_groups` 列出其管理的群组。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub super_admin: bool,
    #[serde(default)]
    pub administered_groups: Vec<GroupProperties>,
}

impl AdminProfile {
    /// 群组管理员唯一管理的群组
    ///
    /// 仅当恰好管理一个群组时返回 Some；超级管理员不适用。
    pub fn sole_administered_group(&self) -> Option<&GroupProperties> {
        match self.administered_groups.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// 当前登录身份
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurrentUser {
    User(PlatformUser),
    Admin(AdminProfile),
}

impl CurrentUser {
    pub fn uid(&self) -> &str {
        match self {
            CurrentUser::User(u) => &u.uid,
            CurrentUser::Admin(a) => &a.uid,
        }
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, CurrentUser::Admin(a) if a.super_admin)
    }

    pub fn as_admin(&self) -> Option<&AdminProfile> {
        match self {
            CurrentUser::Admin(a) => Some(a),
            CurrentUser::User(_) => None,
        }
    }

    pub fn as_user(&self) -> Option<&PlatformUser> {
        match self {
            CurrentUser::User(u) => Some(u),
            CurrentUser::Admin(_) => None,
        }
    }
}

/// 会话档案：当前用户及其群组成员关系
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionProfile {
    pub user: CurrentUser,
    #[serde(default)]
    pub memberships: Vec<GroupMembership>,
}

impl SessionProfile {
    /// 是否为指定群组的成员
    pub fn is_member_of(&self, group_user_name: &str) -> bool {
        self.memberships
            .iter()
            .any(|m| m.group.group_user_name == group_user_name)
    }
}

/// 平台全局配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemAttributes {
    pub platform_name: String,
    pub registration_open: bool,
    /// 始终放行的默认群组（守卫规则中的豁免项），由平台配置下发
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_group_user_name: Option<String>,
    pub support_email: String,
}

// =========================================================
// 投资项目 (Offers)
// =========================================================

/// 项目状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Draft,
    Live,
    Closed,
}

/// 项目概要（列表视图）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferSummary {
    pub project_id: String,
    pub project_name: String,
    pub issuer_display_name: String,
    pub group_user_name: String,
    pub status: OfferStatus,
    pub posted_date: DateTime<Utc>,
}

/// 项目详情（公开项目页）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferDetails {
    #[serde(flatten)]
    pub summary: OfferSummary,
    pub description: String,
    pub target_amount_pence: u64,
    pub raised_amount_pence: u64,
}

/// 群组 URL 校验结果：解析出的群组链
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedGroupUrl {
    pub group: GroupProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<GroupProperties>,
}
