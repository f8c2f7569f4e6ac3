//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、它们的分类谓词，以及从会话状态
//! 构造具体 URL 的纯函数。
//!
//! 每个页面都可以带群组作用域：`/groups/:group_user_name` 前缀，
//! 以及更进一步的课程段 `/groups/:group_user_name/:course_user_name`。
//! 保留页面词（signin、dashboard 等）优先于课程 slug，
//! 因此解析是确定性的。

use std::fmt::Display;
use std::sync::OnceLock;

use groupvest_shared::{CurrentUser, GroupMembership, UserRole, DEFAULT_DASHBOARD_TAB};

use super::pattern::{PathParams, PathPattern};

// =========================================================
// 群组作用域 (Group Scope)
// =========================================================

/// URL 中的群组/课程作用域
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupScope {
    pub group_user_name: String,
    pub course_user_name: Option<String>,
}

impl GroupScope {
    pub fn group(group_user_name: impl Into<String>) -> Self {
        Self {
            group_user_name: group_user_name.into(),
            course_user_name: None,
        }
    }

    pub fn course(group_user_name: impl Into<String>, course_user_name: impl Into<String>) -> Self {
        Self {
            group_user_name: group_user_name.into(),
            course_user_name: Some(course_user_name.into()),
        }
    }

    /// 作用域对应的路径前缀，如 `/groups/acme` 或 `/groups/acme/physics`
    pub fn prefix(&self) -> String {
        match &self.course_user_name {
            Some(course) => format!("/groups/{}/{}", self.group_user_name, course),
            None => format!("/groups/{}", self.group_user_name),
        }
    }
}

/// 可选作用域的路径前缀（无作用域时为空串）
fn prefix_of(scope: Option<&GroupScope>) -> String {
    scope.map(GroupScope::prefix).unwrap_or_default()
}

/// 作用域本身作为首页路径（全局首页为 `/`）
fn front_path(scope: Option<&GroupScope>) -> String {
    match scope {
        Some(s) => s.prefix(),
        None => "/".to_string(),
    }
}

// =========================================================
// 路由枚举 (Route Table)
// =========================================================

/// 应用路由枚举
///
/// 作用域为 None 的 SignIn 表示全局（超级管理员）登录页；
/// 作用域为 None 的 AdminDashboard 表示平台管理后台。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    /// 首页（全局 / 群组 / 课程）
    FrontPage { scope: Option<GroupScope> },
    /// 登录页面
    SignIn { scope: Option<GroupScope> },
    /// 注册页面，可携带受邀用户 id
    SignUp {
        scope: Option<GroupScope>,
        invited_id: Option<String>,
    },
    /// 管理后台（None = 超级管理员，Some = 群组管理员）
    AdminDashboard { scope: Option<GroupScope> },
    /// 投资人仪表盘（必须带群组作用域）
    InvestorDashboard { scope: GroupScope },
    /// 发行人仪表盘（必须带群组作用域）
    IssuerDashboard { scope: GroupScope },
    /// 创建项目（必须带群组作用域）
    CreateOffer { scope: GroupScope },
    /// 公开项目页
    OfferDetail {
        scope: Option<GroupScope>,
        project_id: String,
    },
    /// 个人资料页
    Profile { scope: Option<GroupScope> },
    /// 群组详情页
    GroupDetail {
        scope: Option<GroupScope>,
        viewed_group: String,
    },
    /// 资源详情页
    ResourceDetail {
        scope: Option<GroupScope>,
        resource_id: String,
    },
    /// 联系我们
    ContactUs { scope: Option<GroupScope> },
    /// 帮助中心
    Help { scope: Option<GroupScope> },
    /// 使用条款
    TermsOfUse { scope: Option<GroupScope> },
    /// 隐私政策
    PrivacyPolicy { scope: Option<GroupScope> },
    /// 风险提示
    RiskWarning { scope: Option<GroupScope> },
    /// 营销偏好
    MarketingPreferences { scope: Option<GroupScope> },
    /// 认证回调（邮件验证、密码重置等）
    AuthAction,
    /// 页面未找到
    NotFound,
}

/// 页面种类：作用域提取之后剩余路径所匹配的模板
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageKind {
    Front,
    SignIn,
    SignUp,
    SignUpInvited,
    Admin,
    InvestorDashboard,
    IssuerDashboard,
    CreateOffer,
    Project,
    Profile,
    GroupDetail,
    Resource,
    ContactUs,
    Help,
    TermsOfUse,
    PrivacyPolicy,
    RiskWarning,
    MarketingPreferences,
    Error404,
    AuthAction,
}

/// 页面模板表
///
/// 顺序即匹配顺序；字面模板在前，带参数的模板在后。
fn page_table() -> &'static [(PageKind, PathPattern)] {
    static TABLE: OnceLock<Vec<(PageKind, PathPattern)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        vec![
            (PageKind::Front, PathPattern::new("/")),
            (PageKind::SignIn, PathPattern::new("/signin")),
            (PageKind::SignUp, PathPattern::new("/signup")),
            (PageKind::SignUpInvited, PathPattern::new("/signup/:invited_id")),
            (PageKind::Admin, PathPattern::new("/admin")),
            (
                PageKind::InvestorDashboard,
                PathPattern::new("/dashboard/investor"),
            ),
            (
                PageKind::IssuerDashboard,
                PathPattern::new("/dashboard/issuer"),
            ),
            (PageKind::CreateOffer, PathPattern::new("/create-offer")),
            (PageKind::Project, PathPattern::new("/projects/:project_id")),
            (PageKind::Profile, PathPattern::new("/profile")),
            (
                PageKind::GroupDetail,
                PathPattern::new("/group-details/:viewed_group"),
            ),
            (
                PageKind::Resource,
                PathPattern::new("/resources/:resource_id"),
            ),
            (PageKind::ContactUs, PathPattern::new("/contact-us")),
            (PageKind::Help, PathPattern::new("/help")),
            (PageKind::TermsOfUse, PathPattern::new("/terms-of-use")),
            (PageKind::PrivacyPolicy, PathPattern::new("/privacy-policy")),
            (PageKind::RiskWarning, PathPattern::new("/risk-warning")),
            (
                PageKind::MarketingPreferences,
                PathPattern::new("/marketing-preferences"),
            ),
            (PageKind::Error404, PathPattern::new("/error/404")),
            (PageKind::AuthAction, PathPattern::new("/auth/action")),
        ]
    })
}

/// 保留页面词：`/groups/:g/<这里>` 出现这些词时按页面解析而非课程 slug
const RESERVED_SEGMENTS: &[&str] = &[
    "signin",
    "signup",
    "admin",
    "dashboard",
    "create-offer",
    "projects",
    "profile",
    "group-details",
    "resources",
    "contact-us",
    "help",
    "terms-of-use",
    "privacy-policy",
    "risk-warning",
    "marketing-preferences",
    "error",
    "auth",
    "groups",
];

fn is_reserved(segment: &str) -> bool {
    RESERVED_SEGMENTS.contains(&segment)
}

impl AppRoute {
    /// 将 URL path（不含查询串）解析为路由
    ///
    /// 未知路径解析为 `NotFound`。
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        // --- Step 1: 提取群组/课程作用域 ---
        let (scope, rest) = match segments.as_slice() {
            ["groups"] => return AppRoute::NotFound,
            ["groups", group, tail @ ..] => match tail {
                [] => (Some(GroupScope::group(*group)), &[] as &[&str]),
                [next, ..] if is_reserved(next) => (Some(GroupScope::group(*group)), tail),
                [course, page @ ..] => (Some(GroupScope::course(*group, *course)), page),
            },
            all => (None, all),
        };

        // --- Step 2: 剩余路径与页面模板表匹配 ---
        let rest_path = format!("/{}", rest.join("/"));
        for (kind, pattern) in page_table() {
            if let Some(params) = pattern.matches(&rest_path) {
                return Self::assemble(*kind, scope, &params);
            }
        }
        AppRoute::NotFound
    }

    /// 由页面种类、作用域与捕获参数组装路由
    fn assemble(kind: PageKind, scope: Option<GroupScope>, params: &PathParams) -> Self {
        let param = |name: &str| params.get(name).unwrap_or_default().to_string();
        match kind {
            PageKind::Front => AppRoute::FrontPage { scope },
            PageKind::SignIn => AppRoute::SignIn { scope },
            PageKind::SignUp => AppRoute::SignUp {
                scope,
                invited_id: None,
            },
            PageKind::SignUpInvited => AppRoute::SignUp {
                scope,
                invited_id: Some(param("invited_id")),
            },
            PageKind::Admin => AppRoute::AdminDashboard { scope },
            // 仪表盘与创建项目必须有群组作用域，全局形式不存在
            PageKind::InvestorDashboard => match scope {
                Some(scope) => AppRoute::InvestorDashboard { scope },
                None => AppRoute::NotFound,
            },
            PageKind::IssuerDashboard => match scope {
                Some(scope) => AppRoute::IssuerDashboard { scope },
                None => AppRoute::NotFound,
            },
            PageKind::CreateOffer => match scope {
                Some(scope) => AppRoute::CreateOffer { scope },
                None => AppRoute::NotFound,
            },
            PageKind::Project => AppRoute::OfferDetail {
                scope,
                project_id: param("project_id"),
            },
            PageKind::Profile => AppRoute::Profile { scope },
            PageKind::GroupDetail => AppRoute::GroupDetail {
                scope,
                viewed_group: param("viewed_group"),
            },
            PageKind::Resource => AppRoute::ResourceDetail {
                scope,
                resource_id: param("resource_id"),
            },
            PageKind::ContactUs => AppRoute::ContactUs { scope },
            PageKind::Help => AppRoute::Help { scope },
            PageKind::TermsOfUse => AppRoute::TermsOfUse { scope },
            PageKind::PrivacyPolicy => AppRoute::PrivacyPolicy { scope },
            PageKind::RiskWarning => AppRoute::RiskWarning { scope },
            PageKind::MarketingPreferences => AppRoute::MarketingPreferences { scope },
            PageKind::Error404 => AppRoute::NotFound,
            PageKind::AuthAction => AppRoute::AuthAction,
        }
    }

    /// 获取路由对应的规范 URL path
    pub fn to_path(&self) -> String {
        match self {
            AppRoute::FrontPage { scope } => front_path(scope.as_ref()),
            AppRoute::SignIn { scope } => format!("{}/signin", prefix_of(scope.as_ref())),
            AppRoute::SignUp { scope, invited_id } => match invited_id {
                Some(id) => format!("{}/signup/{}", prefix_of(scope.as_ref()), id),
                None => format!("{}/signup", prefix_of(scope.as_ref())),
            },
            AppRoute::AdminDashboard { scope } => {
                format!("{}/admin", prefix_of(scope.as_ref()))
            }
            AppRoute::InvestorDashboard { scope } => {
                format!("{}/dashboard/investor", scope.prefix())
            }
            AppRoute::IssuerDashboard { scope } => {
                format!("{}/dashboard/issuer", scope.prefix())
            }
            AppRoute::CreateOffer { scope } => format!("{}/create-offer", scope.prefix()),
            AppRoute::OfferDetail { scope, project_id } => {
                format!("{}/projects/{}", prefix_of(scope.as_ref()), project_id)
            }
            AppRoute::Profile { scope } => format!("{}/profile", prefix_of(scope.as_ref())),
            AppRoute::GroupDetail {
                scope,
                viewed_group,
            } => format!("{}/group-details/{}", prefix_of(scope.as_ref()), viewed_group),
            AppRoute::ResourceDetail { scope, resource_id } => {
                format!("{}/resources/{}", prefix_of(scope.as_ref()), resource_id)
            }
            AppRoute::ContactUs { scope } => format!("{}/contact-us", prefix_of(scope.as_ref())),
            AppRoute::Help { scope } => format!("{}/help", prefix_of(scope.as_ref())),
            AppRoute::TermsOfUse { scope } => {
                format!("{}/terms-of-use", prefix_of(scope.as_ref()))
            }
            AppRoute::PrivacyPolicy { scope } => {
                format!("{}/privacy-policy", prefix_of(scope.as_ref()))
            }
            AppRoute::RiskWarning { scope } => {
                format!("{}/risk-warning", prefix_of(scope.as_ref()))
            }
            AppRoute::MarketingPreferences { scope } => {
                format!("{}/marketing-preferences", prefix_of(scope.as_ref()))
            }
            AppRoute::AuthAction => "/auth/action".to_string(),
            AppRoute::NotFound => "/error/404".to_string(),
        }
    }

    /// 路由的群组作用域（若有）
    pub fn scope(&self) -> Option<&GroupScope> {
        match self {
            AppRoute::FrontPage { scope }
            | AppRoute::SignIn { scope }
            | AppRoute::SignUp { scope, .. }
            | AppRoute::AdminDashboard { scope }
            | AppRoute::OfferDetail { scope, .. }
            | AppRoute::Profile { scope }
            | AppRoute::GroupDetail { scope, .. }
            | AppRoute::ResourceDetail { scope, .. }
            | AppRoute::ContactUs { scope }
            | AppRoute::Help { scope }
            | AppRoute::TermsOfUse { scope }
            | AppRoute::PrivacyPolicy { scope }
            | AppRoute::RiskWarning { scope }
            | AppRoute::MarketingPreferences { scope } => scope.as_ref(),
            AppRoute::InvestorDashboard { scope }
            | AppRoute::IssuerDashboard { scope }
            | AppRoute::CreateOffer { scope } => Some(scope),
            AppRoute::AuthAction | AppRoute::NotFound => None,
        }
    }

    // =========================================================
    // 分类谓词 (Classification Predicates)
    // =========================================================

    /// **核心守卫逻辑：该路由是否需要认证**
    ///
    /// 显式公开白名单之外的一切路由都受保护。
    pub fn is_protected(&self) -> bool {
        !matches!(
            self,
            AppRoute::FrontPage { .. }
                | AppRoute::SignIn { .. }
                | AppRoute::SignUp { .. }
                | AppRoute::OfferDetail { .. }
                | AppRoute::ContactUs { .. }
                | AppRoute::TermsOfUse { .. }
                | AppRoute::PrivacyPolicy { .. }
                | AppRoute::RiskWarning { .. }
                | AppRoute::MarketingPreferences { .. }
                | AppRoute::AuthAction
                | AppRoute::NotFound
        )
    }

    /// 是否为超级管理员专属路由（平台管理后台）
    pub fn is_reserved_for_super_admin(&self) -> bool {
        matches!(self, AppRoute::AdminDashboard { scope: None })
    }

    /// 是否为群组管理员路由
    pub fn is_group_admin_route(&self) -> bool {
        matches!(self, AppRoute::AdminDashboard { scope: Some(_) })
    }

    pub fn is_issuer_dashboard_route(&self) -> bool {
        matches!(self, AppRoute::IssuerDashboard { .. })
    }

    pub fn is_investor_dashboard_route(&self) -> bool {
        matches!(self, AppRoute::InvestorDashboard { .. })
    }

    pub fn is_create_offer_route(&self) -> bool {
        matches!(self, AppRoute::CreateOffer { .. })
    }

    pub fn is_sign_in_route(&self) -> bool {
        matches!(self, AppRoute::SignIn { .. })
    }

    pub fn is_sign_up_route(&self) -> bool {
        matches!(self, AppRoute::SignUp { .. })
    }

    pub fn is_error_route(&self) -> bool {
        matches!(self, AppRoute::NotFound)
    }

    /// 是否为公开项目页
    pub fn is_public_offer_view(&self) -> bool {
        matches!(self, AppRoute::OfferDetail { .. })
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 会话视图 (Session View)
// =========================================================

/// URL 构造函数所需的最小会话视图
///
/// 守卫与路由构造函数共用，避免对状态管理层产生依赖。
#[derive(Clone, Copy, Default)]
pub struct SessionView<'a> {
    pub user: Option<&'a CurrentUser>,
    pub memberships: &'a [GroupMembership],
}

impl<'a> SessionView<'a> {
    pub fn is_member_of(&self, group_user_name: &str) -> bool {
        self.memberships
            .iter()
            .any(|m| m.group.group_user_name == group_user_name)
    }

    pub fn is_super_admin(&self) -> bool {
        self.user.map(CurrentUser::is_super_admin).unwrap_or(false)
    }

    /// 群组管理员唯一管理的群组 slug
    pub fn sole_admin_group(&self) -> Option<&'a str> {
        self.user?
            .as_admin()?
            .sole_administered_group()
            .map(|g| g.group_user_name.as_str())
    }

    /// 普通用户的平台角色
    pub fn role(&self) -> Option<UserRole> {
        Some(self.user?.as_user()?.role)
    }

    /// 用户指定的主群组 slug
    pub fn home_group(&self) -> Option<&'a str> {
        self.user?.as_user()?.home_group_user_name.as_deref()
    }

    /// 第一个成员群组 slug（主群组缺省时的落点）
    pub fn first_membership_group(&self) -> Option<&'a str> {
        self.memberships
            .first()
            .map(|m| m.group.group_user_name.as_str())
    }
}

// =========================================================
// URL 构造函数 (Route Constructors)
// =========================================================
//
// 全部为纯函数；任何会话/群组状态组合下都返回非空的、
// 以 `/` 开头的绝对路径，状态不足时回落到全局首页。

/// 当前身份对应的"首页"
///
/// 未认证 → 当前作用域的公开首页（无作用域则全局首页）；
/// 超级管理员 → 全局首页；群组管理员 → 其唯一管理群组的首页；
/// 普通成员 → URL 群组（若为成员）、否则主群组、否则全局首页。
pub fn construct_home_route(scope: Option<&GroupScope>, session: &SessionView<'_>) -> String {
    let user = match session.user {
        None => return front_path(scope),
        Some(user) => user,
    };

    match user {
        CurrentUser::Admin(admin) if admin.super_admin => "/".to_string(),
        CurrentUser::Admin(admin) => admin
            .sole_administered_group()
            .map(|g| format!("/groups/{}", g.group_user_name))
            .unwrap_or_else(|| "/".to_string()),
        CurrentUser::User(_) => {
            if let Some(s) = scope {
                if session.is_member_of(&s.group_user_name) {
                    return s.prefix();
                }
            }
            session
                .home_group()
                .map(|slug| format!("/groups/{}", slug))
                .unwrap_or_else(|| "/".to_string())
        }
    }
}

/// 当前作用域对应的登录页
pub fn construct_sign_in_route(scope: Option<&GroupScope>) -> String {
    format!("{}/signin", prefix_of(scope))
}

/// 当前作用域对应的注册页
pub fn construct_sign_up_route(scope: Option<&GroupScope>, invited_id: Option<&str>) -> String {
    match invited_id {
        Some(id) => format!("{}/signup/{}", prefix_of(scope), id),
        None => format!("{}/signup", prefix_of(scope)),
    }
}

/// 角色相关的仪表盘路由，附加默认标签页查询参数
///
/// 超级管理员 → 平台管理后台；群组管理员 → 其唯一管理群组的后台；
/// 投资人/发行人 → 对应仪表盘，群组 slug 取 URL 群组（若为成员）、
/// 主群组、第一个成员群组，依次回落；全部缺失时回落全局首页。
pub fn construct_dashboard_route(scope: Option<&GroupScope>, session: &SessionView<'_>) -> String {
    let user = match session.user {
        // 未认证时没有仪表盘可言，落到对应登录页
        None => return construct_sign_in_route(scope),
        Some(user) => user,
    };

    match user {
        CurrentUser::Admin(admin) if admin.super_admin => {
            with_tab("/admin", DEFAULT_DASHBOARD_TAB)
        }
        CurrentUser::Admin(admin) => match admin.sole_administered_group() {
            Some(g) => with_tab(
                &format!("/groups/{}/admin", g.group_user_name),
                DEFAULT_DASHBOARD_TAB,
            ),
            None => "/".to_string(),
        },
        CurrentUser::User(user) => {
            let slug_scope: Option<GroupScope> = match scope {
                Some(s) if session.is_member_of(&s.group_user_name) => Some(s.clone()),
                _ => session
                    .home_group()
                    .or_else(|| session.first_membership_group())
                    .map(GroupScope::group),
            };
            let scope = match slug_scope {
                Some(s) => s,
                None => return "/".to_string(),
            };
            let suffix = match user.role {
                UserRole::Investor => "dashboard/investor",
                UserRole::Issuer => "dashboard/issuer",
            };
            with_tab(
                &format!("{}/{}", scope.prefix(), suffix),
                DEFAULT_DASHBOARD_TAB,
            )
        }
    }
}

/// 公开项目页路由
pub fn construct_project_detail_route(scope: Option<&GroupScope>, project_id: &str) -> String {
    format!("{}/projects/{}", prefix_of(scope), project_id)
}

/// 创建项目路由（必须有群组作用域，否则回落全局首页）
pub fn construct_create_project_route(scope: Option<&GroupScope>) -> String {
    match scope {
        Some(s) => format!("{}/create-offer", s.prefix()),
        None => "/".to_string(),
    }
}

/// 群组详情路由
pub fn construct_group_detail_route(scope: Option<&GroupScope>, viewed_group: &str) -> String {
    format!("{}/group-details/{}", prefix_of(scope), viewed_group)
}

/// 资源详情路由
pub fn construct_view_resource_detail_route(
    scope: Option<&GroupScope>,
    resource_id: &str,
) -> String {
    format!("{}/resources/{}", prefix_of(scope), resource_id)
}

/// 联系我们路由
pub fn construct_contact_us_route(scope: Option<&GroupScope>) -> String {
    format!("{}/contact-us", prefix_of(scope))
}

fn with_tab(path: &str, tab: &str) -> String {
    format!("{}?tab={}", path, tab)
}

// =========================================================
// 查询串 (Query String)
// =========================================================

/// 已解析的查询串
///
/// 仪表盘使用 `?tab=<name>`；创建项目页使用 `?edit=<projectID>`
/// 或 `?admin=<adminID>&issuer=<issuerID>`。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    /// 解析 `?a=1&b=2` 形式的查询串（问号可带可不带）
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = raw
            .split('&')
            .filter(|s| !s.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();
        Self(pairs)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// 仪表盘标签页参数
    pub fn tab(&self) -> Option<&str> {
        self.get("tab")
    }
}

#[cfg(test)]
mod tests;
