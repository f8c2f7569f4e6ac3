use super::*;
use groupvest_shared::{
    AdminProfile, CurrentUser, GroupMembership, GroupProperties, PlatformUser,
};

// =========================================================
// Scenario builder
// =========================================================

/// 一次评估的可变场景：默认各项输入全部就绪、未认证
struct Scenario {
    route: AppRoute,
    full_path: String,
    attrs: AttrsPhase,
    group_url: GroupUrlState,
    auth: AuthPhase,
    user: Option<CurrentUser>,
    memberships: Vec<GroupMembership>,
    pending: Option<String>,
    default_group: Option<String>,
}

impl Scenario {
    fn at(path: &str) -> Self {
        Self {
            route: AppRoute::from_path(path),
            full_path: path.to_string(),
            attrs: AttrsPhase::Loaded,
            group_url: GroupUrlState::with_phase(GroupUrlPhase::Validated),
            auth: AuthPhase::Unauthenticated,
            user: None,
            memberships: Vec::new(),
            pending: None,
            default_group: None,
        }
    }

    fn attrs_loading(mut self) -> Self {
        self.attrs = AttrsPhase::Loading;
        self
    }

    fn group_validating(mut self) -> Self {
        self.group_url = GroupUrlState::with_phase(GroupUrlPhase::Validating);
        self
    }

    fn group_failed(mut self) -> Self {
        self.group_url = GroupUrlState::with_phase(GroupUrlPhase::Failed);
        self
    }

    fn auth(mut self, phase: AuthPhase) -> Self {
        self.auth = phase;
        self
    }

    fn user(mut self, user: CurrentUser) -> Self {
        self.auth = AuthPhase::Authenticated;
        self.user = Some(user);
        self
    }

    fn member_of(mut self, slug: &str, role: UserRole) -> Self {
        self.memberships.push(GroupMembership {
            group: group(slug),
            role,
        });
        self
    }

    fn pending(mut self, path: &str) -> Self {
        self.pending = Some(path.to_string());
        self
    }

    fn default_group(mut self, slug: &str) -> Self {
        self.default_group = Some(slug.to_string());
        self
    }

    fn eval(&self, intent: NavigationIntent) -> Verdict {
        let input = GuardInput {
            route: &self.route,
            full_path: &self.full_path,
            attrs: self.attrs,
            group_url: &self.group_url,
            auth: self.auth,
            session: SessionView {
                user: self.user.as_ref(),
                memberships: &self.memberships,
            },
            pending_path: self.pending.as_deref(),
            default_group: self.default_group.as_deref(),
        };
        evaluate(&input, intent)
    }
}

fn group(slug: &str) -> GroupProperties {
    GroupProperties {
        id: format!("id-{}", slug),
        group_user_name: slug.to_string(),
        display_name: slug.to_uppercase(),
        parent_group_id: None,
    }
}

fn investor() -> CurrentUser {
    CurrentUser::User(PlatformUser {
        uid: "u1".into(),
        email: "ines@example.com".into(),
        display_name: "Ines".into(),
        role: UserRole::Investor,
        home_group_user_name: None,
    })
}

fn issuer() -> CurrentUser {
    CurrentUser::User(PlatformUser {
        uid: "u2".into(),
        email: "ivan@example.com".into(),
        display_name: "Ivan".into(),
        role: UserRole::Issuer,
        home_group_user_name: None,
    })
}

fn super_admin() -> CurrentUser {
    CurrentUser::Admin(AdminProfile {
        uid: "a1".into(),
        email: "root@example.com".into(),
        display_name: "Root".into(),
        super_admin: true,
        administered_groups: vec![],
    })
}

fn group_admin(slug: &str) -> CurrentUser {
    CurrentUser::Admin(AdminProfile {
        uid: "a2".into(),
        email: "ada@example.com".into(),
        display_name: "Ada".into(),
        super_admin: false,
        administered_groups: vec![group(slug)],
    })
}

fn no_intent() -> NavigationIntent {
    NavigationIntent::default()
}

fn assert_redirect(verdict: &Verdict, target: &str) {
    assert_eq!(verdict.rendering, Rendering::Redirect(target.to_string()));
}

// =========================================================
// Rule 1: loading gate
// =========================================================

#[test]
fn loads_while_system_attributes_pending() {
    let verdict = Scenario::at("/groups/acme/dashboard/investor")
        .attrs_loading()
        .eval(no_intent());
    assert_eq!(verdict.rendering, Rendering::Loading);
    assert!(verdict.effects.is_empty());
}

#[test]
fn loads_while_group_url_validating() {
    let verdict = Scenario::at("/groups/acme/dashboard/investor")
        .group_validating()
        .eval(no_intent());
    assert_eq!(verdict.rendering, Rendering::Loading);
}

#[test]
fn loads_while_auth_uninitialized_on_regular_routes() {
    let verdict = Scenario::at("/groups/acme")
        .auth(AuthPhase::NotInitialized)
        .eval(no_intent());
    assert_eq!(verdict.rendering, Rendering::Loading);
}

#[test]
fn public_offer_view_renders_before_auth_initializes() {
    // 公开项目页不等认证初始化
    let verdict = Scenario::at("/projects/p1")
        .auth(AuthPhase::NotInitialized)
        .eval(no_intent());
    assert_eq!(verdict.rendering, Rendering::Page);
}

#[test]
fn loads_while_authenticating_except_on_auth_pages() {
    let verdict = Scenario::at("/groups/acme")
        .auth(AuthPhase::Authenticating)
        .eval(no_intent());
    assert_eq!(verdict.rendering, Rendering::Loading);

    // 登录页在认证进行中仍然渲染（表单上的提交反馈）
    let verdict = Scenario::at("/groups/acme/signin")
        .auth(AuthPhase::Authenticating)
        .eval(no_intent());
    assert_eq!(verdict.rendering, Rendering::Page);
}

// =========================================================
// Rule 2: failed group validation
// =========================================================

#[test]
fn failed_validation_redirects_to_error() {
    let verdict = Scenario::at("/groups/ghost/dashboard/investor")
        .group_failed()
        .eval(no_intent());
    assert_redirect(&verdict, "/error/404");
    assert!(verdict.intent.to_error);
}

#[test]
fn failed_validation_exempts_sign_in_and_offer_view() {
    // 登录页：照常渲染（公开路由，未认证）
    let verdict = Scenario::at("/groups/ghost/signin")
        .group_failed()
        .eval(no_intent());
    assert_eq!(verdict.rendering, Rendering::Page);

    // 公开项目页同样豁免
    let verdict = Scenario::at("/groups/ghost/projects/p1")
        .group_failed()
        .eval(no_intent());
    assert_eq!(verdict.rendering, Rendering::Page);
}

#[test]
fn failed_validation_exempts_create_offer_into_sign_in() {
    // 创建项目豁免规则 2，但受保护 + 未认证 → 走规则 3 去登录
    let verdict = Scenario::at("/groups/ghost/create-offer")
        .group_failed()
        .eval(no_intent());
    assert_redirect(&verdict, "/groups/ghost/signin");
    assert!(verdict.intent.to_sign_in);
}

#[test]
fn failed_validation_exempts_default_group() {
    let verdict = Scenario::at("/groups/main/dashboard/investor")
        .group_failed()
        .default_group("main")
        .user(investor())
        .member_of("main", UserRole::Investor)
        .eval(no_intent());
    // 默认群组豁免校验失败，授权通过后正常渲染
    assert_eq!(verdict.rendering, Rendering::Page);
}

#[test]
fn failed_validation_exempts_group_admin_route() {
    // 管理后台的群组失配由授权规则处理，不走校验失败分支
    let verdict = Scenario::at("/groups/ghost/admin")
        .group_failed()
        .user(group_admin("acme"))
        .eval(no_intent());
    assert_redirect(&verdict, "/error/404");
    assert!(verdict.intent.to_error);
}

#[test]
fn error_redirect_is_idempotent() {
    let scenario = Scenario::at("/groups/ghost/dashboard/investor").group_failed();
    let first = scenario.eval(no_intent());
    assert_redirect(&first, "/error/404");

    // 输入不变的第二次评估不得再次产生导航副作用
    let second = scenario.eval(first.intent);
    assert_eq!(second.rendering, Rendering::Loading);
    assert!(second.effects.is_empty());
    assert_eq!(second.intent, first.intent);
}

// =========================================================
// Rule 3: protected route, unauthenticated
// =========================================================

#[test]
fn anonymous_protected_visit_redirects_to_group_sign_in() {
    let verdict = Scenario::at("/groups/acme/dashboard/investor").eval(no_intent());
    assert_redirect(&verdict, "/groups/acme/signin");
    assert!(verdict.intent.to_sign_in);
    assert_eq!(
        verdict.effects,
        vec![SideEffect::StorePendingPath(
            "/groups/acme/dashboard/investor".to_string()
        )]
    );
}

#[test]
fn sign_in_redirect_is_idempotent() {
    let scenario = Scenario::at("/groups/acme/dashboard/investor");
    let first = scenario.eval(no_intent());
    let second = scenario.eval(first.intent);
    assert_eq!(second.rendering, Rendering::Loading);
    assert!(second.effects.is_empty());
}

#[test]
fn public_routes_render_for_anonymous_visitors() {
    for path in ["/", "/groups/acme", "/projects/p1", "/contact-us"] {
        let verdict = Scenario::at(path).eval(no_intent());
        assert_eq!(verdict.rendering, Rendering::Page, "path: {}", path);
    }
}

// =========================================================
// Rule 4: authenticated on sign-in/sign-up
// =========================================================

#[test]
fn pending_path_is_consumed_and_cleared() {
    let verdict = Scenario::at("/groups/acme/signin")
        .user(investor())
        .member_of("acme", UserRole::Investor)
        .pending("/groups/acme/dashboard/investor?tab=Offers")
        .eval(no_intent());
    assert_redirect(&verdict, "/groups/acme/dashboard/investor?tab=Offers");
    assert_eq!(verdict.effects, vec![SideEffect::ClearPendingPath]);
    assert!(verdict.intent.from_auth_to_dashboard);
}

#[test]
fn super_admin_sign_in_lands_on_platform_dashboard() {
    // URL 的群组上下文不影响超级管理员的落点
    let verdict = Scenario::at("/groups/acme/signin")
        .user(super_admin())
        .eval(no_intent());
    assert_redirect(&verdict, "/admin?tab=Home");
}

#[test]
fn group_admin_sign_in_lands_on_group_dashboard() {
    let verdict = Scenario::at("/groups/acme/signin")
        .user(group_admin("acme"))
        .eval(no_intent());
    assert_redirect(&verdict, "/groups/acme/admin?tab=Home");
}

#[test]
fn investor_sign_in_lands_on_investor_dashboard() {
    let verdict = Scenario::at("/groups/acme/signin")
        .user(investor())
        .member_of("acme", UserRole::Investor)
        .eval(no_intent());
    assert_redirect(&verdict, "/groups/acme/dashboard/investor?tab=Home");
}

#[test]
fn second_auth_cycle_does_not_replay_consumed_path() {
    // 第一轮：回跳路径被消费并清除
    let first = Scenario::at("/groups/acme/signin")
        .user(investor())
        .member_of("acme", UserRole::Investor)
        .pending("/groups/acme/profile")
        .eval(no_intent());
    assert_redirect(&first, "/groups/acme/profile");
    assert_eq!(first.effects, vec![SideEffect::ClearPendingPath]);

    // 第二轮（槽位已空）：按角色计算仪表盘
    let second = Scenario::at("/groups/acme/signin")
        .user(investor())
        .member_of("acme", UserRole::Investor)
        .eval(no_intent());
    assert_redirect(&second, "/groups/acme/dashboard/investor?tab=Home");
}

#[test]
fn dashboard_redirect_is_idempotent() {
    let scenario = Scenario::at("/groups/acme/signin")
        .user(investor())
        .member_of("acme", UserRole::Investor);
    let first = scenario.eval(no_intent());
    let second = scenario.eval(first.intent);
    assert_eq!(second.rendering, Rendering::Loading);
    assert!(second.effects.is_empty());
}

// =========================================================
// Rule 5: role/group authorization
// =========================================================

#[test]
fn investor_on_issuer_dashboard_is_rejected() {
    let verdict = Scenario::at("/groups/acme/dashboard/issuer")
        .user(investor())
        .member_of("acme", UserRole::Investor)
        .eval(no_intent());
    assert_redirect(&verdict, "/error/404");
    assert!(verdict.intent.to_error);
}

#[test]
fn issuer_on_own_group_routes_is_allowed() {
    for path in [
        "/groups/acme/dashboard/issuer",
        "/groups/acme/create-offer",
    ] {
        let verdict = Scenario::at(path)
            .user(issuer())
            .member_of("acme", UserRole::Issuer)
            .eval(no_intent());
        assert_eq!(verdict.rendering, Rendering::Page, "path: {}", path);
    }
}

#[test]
fn non_member_dashboard_visit_is_rejected() {
    let verdict = Scenario::at("/groups/other/dashboard/investor")
        .user(investor())
        .member_of("acme", UserRole::Investor)
        .eval(no_intent());
    assert_redirect(&verdict, "/error/404");
}

#[test]
fn platform_dashboard_requires_super_admin() {
    let verdict = Scenario::at("/admin").user(investor()).eval(no_intent());
    assert_redirect(&verdict, "/error/404");

    let verdict = Scenario::at("/admin").user(super_admin()).eval(no_intent());
    assert_eq!(verdict.rendering, Rendering::Page);
}

#[test]
fn group_admin_is_confined_to_their_group() {
    // 唯一管理群组为 acme 的管理员访问 other 的后台
    let verdict = Scenario::at("/groups/other/admin")
        .user(group_admin("acme"))
        .eval(no_intent());
    assert_redirect(&verdict, "/error/404");

    let verdict = Scenario::at("/groups/acme/admin")
        .user(group_admin("acme"))
        .eval(no_intent());
    assert_eq!(verdict.rendering, Rendering::Page);
}

#[test]
fn super_admin_may_open_any_group_admin_dashboard() {
    let verdict = Scenario::at("/groups/other/admin")
        .user(super_admin())
        .eval(no_intent());
    assert_eq!(verdict.rendering, Rendering::Page);
}

#[test]
fn authorization_waits_out_dashboard_redirect() {
    // 登录重定向在途时本轮跳过授权检查，到达后旗标被清除
    let intent = NavigationIntent {
        from_auth_to_dashboard: true,
        ..NavigationIntent::default()
    };
    let verdict = Scenario::at("/groups/acme/dashboard/investor")
        .user(investor())
        .member_of("acme", UserRole::Investor)
        .eval(intent);
    assert_eq!(verdict.rendering, Rendering::Page);
    assert!(!verdict.intent.from_auth_to_dashboard);
}

// =========================================================
// Precedence & flag clearing
// =========================================================

#[test]
fn failed_validation_wins_over_authorization() {
    // 群组校验失败与角色违规同时成立：恰好一次 404 重定向，无登录页闪烁
    let scenario = Scenario::at("/groups/ghost/dashboard/issuer")
        .group_failed()
        .user(investor());
    let first = scenario.eval(no_intent());
    assert_redirect(&first, "/error/404");

    let second = scenario.eval(first.intent);
    assert_eq!(second.rendering, Rendering::Loading);
}

#[test]
fn flags_clear_on_arrival() {
    // 到达登录页清除 to_sign_in
    let verdict = Scenario::at("/groups/acme/signin").eval(NavigationIntent {
        to_sign_in: true,
        ..NavigationIntent::default()
    });
    assert_eq!(verdict.rendering, Rendering::Page);
    assert!(!verdict.intent.to_sign_in);

    // 到达 404 页清除 to_error
    let verdict = Scenario::at("/error/404").eval(NavigationIntent {
        to_error: true,
        ..NavigationIntent::default()
    });
    assert_eq!(verdict.rendering, Rendering::Page);
    assert!(!verdict.intent.to_error);
}

#[test]
fn anonymous_scenario_walkthrough() {
    // 匿名访问受保护路由的完整流程：
    // 加载 → 校验通过、认证未初始化 → 加载 → 未认证 → 登录页重定向
    let path = "/groups/acme/dashboard/investor";

    let verdict = Scenario::at(path)
        .attrs_loading()
        .group_validating()
        .auth(AuthPhase::NotInitialized)
        .eval(no_intent());
    assert_eq!(verdict.rendering, Rendering::Loading);

    let verdict = Scenario::at(path)
        .auth(AuthPhase::NotInitialized)
        .eval(no_intent());
    assert_eq!(verdict.rendering, Rendering::Loading);

    let verdict = Scenario::at(path).eval(no_intent());
    assert_redirect(&verdict, "/groups/acme/signin");
    assert_eq!(
        verdict.effects,
        vec![SideEffect::StorePendingPath(path.to_string())]
    );
}
