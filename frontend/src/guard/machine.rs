//! 守卫状态机 - 纯函数核心
//!
//! 对"系统属性 × 群组 URL 校验 × 会话"三个独立推进的状态机
//! 的叉积做出裁决：加载中、重定向，或渲染页面。
//!
//! 规则按优先级顺序评估；重定向通过意向旗标保证幂等——
//! 相同输入重复评估至多产生一次导航副作用。
//! 本模块不触碰任何信号、存储或 DOM，副作用以
//! `SideEffect` 描述，由守卫组件统一执行。

use groupvest_shared::UserRole;

use crate::auth::AuthPhase;
use crate::group_url::{GroupUrlPhase, GroupUrlState};
use crate::system::AttrsPhase;
use crate::web::route::{
    construct_dashboard_route, construct_sign_in_route, AppRoute, SessionView,
};

// =========================================================
// 输入 / 输出类型
// =========================================================

/// 重定向意向旗标
///
/// 任一时刻至多一个旗标驱动在途重定向；到达目的路由后必须清除，
/// 否则会导航死锁。旗标只由守卫评估修改。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationIntent {
    /// 正在重定向到登录页
    pub to_sign_in: bool,
    /// 正在重定向到 404
    pub to_error: bool,
    /// 登录/注册页认证完成后正在重定向到仪表盘
    pub from_auth_to_dashboard: bool,
}

/// 一次评估的完整输入快照
#[derive(Clone, Copy)]
pub struct GuardInput<'a> {
    /// 当前请求的路由
    pub route: &'a AppRoute,
    /// 当前完整路径+查询串（登录后回跳用）
    pub full_path: &'a str,
    pub attrs: AttrsPhase,
    pub group_url: &'a GroupUrlState,
    pub auth: AuthPhase,
    pub session: SessionView<'a>,
    /// 会话存储中的回跳路径
    pub pending_path: Option<&'a str>,
    /// 平台配置的始终放行默认群组
    pub default_group: Option<&'a str>,
}

/// 裁决的渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendering {
    /// 渲染加载指示器，本轮不产生导航副作用
    Loading,
    /// 重定向到目标路径（replace-state）
    Redirect(String),
    /// 渲染被包裹的页面
    Page,
}

/// 守卫评估要求执行的存储副作用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    /// 记录登录后回跳路径
    StorePendingPath(String),
    /// 清除回跳路径（规则 4 消费后）
    ClearPendingPath,
}

/// 一次评估的裁决
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub intent: NavigationIntent,
    pub rendering: Rendering,
    pub effects: Vec<SideEffect>,
}

fn in_flight(intent: NavigationIntent) -> Verdict {
    Verdict {
        intent,
        rendering: Rendering::Loading,
        effects: Vec::new(),
    }
}

fn error_path() -> String {
    AppRoute::NotFound.to_path()
}

// =========================================================
// 规则评估
// =========================================================

/// 评估守卫规则
///
/// 规则优先级（与评估顺序一致）：
/// 1. 加载门：任一输入仍未就绪 → 加载中，无副作用；
/// 2. 群组校验失败 → 404（带豁免项）；
/// 3. 受保护路由 + 未认证 → 记录回跳路径，重定向登录页；
/// 4. 登录/注册页 + 已认证 → 消费回跳路径或按角色去仪表盘；
/// 5. 已认证的角色/群组授权检查 → 违规则 404；
/// 6. 清除已到达目的地的旗标，渲染页面。
pub fn evaluate(input: &GuardInput<'_>, mut intent: NavigationIntent) -> Verdict {
    let route = input.route;
    let on_auth_pages = route.is_sign_in_route() || route.is_sign_up_route();

    // --- 规则 1: 加载门 ---
    let group_url_pending = matches!(
        input.group_url.phase,
        GroupUrlPhase::NotStarted | GroupUrlPhase::Validating
    );
    let auth_pending_matters = input.group_url.phase == GroupUrlPhase::Validated
        && input.auth == AuthPhase::NotInitialized
        && !route.is_public_offer_view()
        && !route.is_group_admin_route();
    if input.attrs == AttrsPhase::Loading
        || group_url_pending
        || auth_pending_matters
        || (!on_auth_pages && input.auth == AuthPhase::Authenticating)
    {
        return in_flight(intent);
    }

    // --- 规则 2: 群组校验失败 ---
    let default_group_exempt = match (route.scope(), input.default_group) {
        (Some(scope), Some(default)) => scope.group_user_name == default,
        _ => false,
    };
    if input.group_url.phase == GroupUrlPhase::Failed
        && !intent.from_auth_to_dashboard
        && !on_auth_pages
        && !route.is_public_offer_view()
        && !route.is_create_offer_route()
        && !route.is_group_admin_route()
        && !default_group_exempt
    {
        if intent.to_error {
            return in_flight(intent);
        }
        intent.to_error = true;
        return Verdict {
            intent,
            rendering: Rendering::Redirect(error_path()),
            effects: Vec::new(),
        };
    }

    // --- 规则 3: 受保护路由 + 未认证 ---
    if route.is_protected() && input.auth == AuthPhase::Unauthenticated {
        if intent.to_sign_in {
            return in_flight(intent);
        }
        intent.to_sign_in = true;
        return Verdict {
            intent,
            rendering: Rendering::Redirect(construct_sign_in_route(route.scope())),
            effects: vec![SideEffect::StorePendingPath(input.full_path.to_string())],
        };
    }

    // --- 规则 4: 登录/注册页 + 已认证 ---
    if on_auth_pages && input.auth == AuthPhase::Authenticated {
        if intent.from_auth_to_dashboard {
            return in_flight(intent);
        }
        intent.from_auth_to_dashboard = true;
        let (target, effects) = match input.pending_path {
            Some(pending) if !pending.is_empty() => {
                (pending.to_string(), vec![SideEffect::ClearPendingPath])
            }
            _ => (
                construct_dashboard_route(route.scope(), &input.session),
                Vec::new(),
            ),
        };
        return Verdict {
            intent,
            rendering: Rendering::Redirect(target),
            effects,
        };
    }

    // --- 规则 5: 角色/群组授权 ---
    if input.auth == AuthPhase::Authenticated && !intent.from_auth_to_dashboard {
        if authorization_violation(route, &input.session).is_some() {
            if intent.to_error {
                return in_flight(intent);
            }
            intent.to_error = true;
            return Verdict {
                intent,
                rendering: Rendering::Redirect(error_path()),
                effects: Vec::new(),
            };
        }
    }

    // --- 规则 6: 清旗 + 渲染 ---
    if route.is_sign_in_route() {
        intent.to_sign_in = false;
    }
    if !on_auth_pages {
        intent.from_auth_to_dashboard = false;
    }
    if route.is_error_route() {
        intent.to_error = false;
    }
    Verdict {
        intent,
        rendering: Rendering::Page,
        effects: Vec::new(),
    }
}

/// 角色与路由的授权检查
///
/// 返回违规原因；None 表示放行。
/// 超级管理员可进入任意管理后台；群组管理员只能进入
/// 其唯一管理群组的后台；发行人/投资人仪表盘与创建项目
/// 要求匹配的角色且是 URL 群组的成员。
fn authorization_violation(route: &AppRoute, session: &SessionView<'_>) -> Option<&'static str> {
    if route.is_reserved_for_super_admin() && !session.is_super_admin() {
        return Some("super admin only");
    }

    if route.is_group_admin_route() && !session.is_super_admin() {
        let url_group = route.scope().map(|s| s.group_user_name.as_str());
        if session.sole_admin_group() != url_group || url_group.is_none() {
            return Some("administered group mismatch");
        }
    }

    let member_of_url_group = route
        .scope()
        .map(|s| session.is_member_of(&s.group_user_name))
        .unwrap_or(false);

    if route.is_investor_dashboard_route()
        && (session.role() != Some(UserRole::Investor) || !member_of_url_group)
    {
        return Some("investor dashboard requires investor membership");
    }

    if (route.is_issuer_dashboard_route() || route.is_create_offer_route())
        && (session.role() != Some(UserRole::Issuer) || !member_of_url_group)
    {
        return Some("issuer route requires issuer membership");
    }

    None
}

#[cfg(test)]
mod tests;
