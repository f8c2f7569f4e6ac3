//! GroupVest 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由表与分类谓词（领域模型）
//! - `web::router`: 路由服务（只负责移动，不做检查）
//! - `guard`: 导航守卫（加载 / 重定向 / 渲染的唯一裁决者）
//! - `auth` / `system` / `group_url`: 三个独立推进的状态提供方
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod create_offer;
    pub mod dashboards;
    pub mod front_page;
    pub mod group;
    pub mod header;
    mod icons;
    pub mod info;
    pub mod loading;
    pub mod not_found;
    pub mod offer;
    pub mod offers;
    pub mod profile;
    pub mod signin;
    pub mod signup;
}
mod group_url;
mod guard;
mod log;
mod system;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod history;
    mod http;
    mod pattern;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::HttpClient;
    pub use storage::{LocalStorage, SessionStorage};
}

use api::GroupVestApi;
use auth::AuthContext;
use components::create_offer::CreateOfferPage;
use components::dashboards::{
    GroupAdminPage, InvestorDashboardPage, IssuerDashboardPage, PlatformAdminPage,
};
use components::front_page::FrontPage;
use components::group::{GroupDetailPage, ResourceDetailPage};
use components::info::{
    AuthActionPage, ContactUsPage, HelpPage, MarketingPreferencesPage, PrivacyPolicyPage,
    RiskWarningPage, TermsOfUsePage,
};
use components::not_found::NotFoundPage;
use components::offer::OfferDetailPage;
use components::profile::ProfilePage;
use components::signin::SignInPage;
use components::signup::SignUpPage;
use group_url::GroupUrlContext;
use guard::{GuardContext, PageOptions, RouteGuard};
use system::SystemContext;
use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 每个页面都包在 `RouteGuard` 里；守卫裁决加载/重定向/渲染，
/// 并按 `PageOptions` 决定是否套头部与主题容器。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::FrontPage { scope } => view! {
            <RouteGuard>
                <FrontPage scope=scope.clone() />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::SignIn { .. } => view! {
            <RouteGuard options=PageOptions::bare()>
                <SignInPage />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::SignUp { invited_id, .. } => view! {
            <RouteGuard options=PageOptions::bare()>
                <SignUpPage invited_id=invited_id.clone() />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::AdminDashboard { scope: None } => view! {
            <RouteGuard>
                <PlatformAdminPage />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::AdminDashboard { scope: Some(scope) } => view! {
            <RouteGuard>
                <GroupAdminPage scope=scope.clone() />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::InvestorDashboard { scope } => view! {
            <RouteGuard>
                <InvestorDashboardPage scope=scope.clone() />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::IssuerDashboard { scope } => view! {
            <RouteGuard>
                <IssuerDashboardPage scope=scope.clone() />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::CreateOffer { scope } => view! {
            <RouteGuard>
                <CreateOfferPage scope=scope.clone() />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::OfferDetail { scope, project_id } => view! {
            <RouteGuard>
                <OfferDetailPage project_id=project_id.clone() scope=scope.clone() />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::Profile { .. } => view! {
            <RouteGuard>
                <ProfilePage />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::GroupDetail {
            scope,
            viewed_group,
        } => view! {
            <RouteGuard>
                <GroupDetailPage viewed_group=viewed_group.clone() scope=scope.clone() />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::ResourceDetail { scope, resource_id } => view! {
            <RouteGuard>
                <ResourceDetailPage resource_id=resource_id.clone() scope=scope.clone() />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::ContactUs { .. } => view! {
            <RouteGuard>
                <ContactUsPage />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::Help { .. } => view! {
            <RouteGuard>
                <HelpPage />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::TermsOfUse { .. } => view! {
            <RouteGuard>
                <TermsOfUsePage />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::PrivacyPolicy { .. } => view! {
            <RouteGuard>
                <PrivacyPolicyPage />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::RiskWarning { .. } => view! {
            <RouteGuard>
                <RiskWarningPage />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::MarketingPreferences { .. } => view! {
            <RouteGuard>
                <MarketingPreferencesPage />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::AuthAction => view! {
            <RouteGuard options=PageOptions::bare()>
                <AuthActionPage />
            </RouteGuard>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <RouteGuard options=PageOptions::bare()>
                <NotFoundPage />
            </RouteGuard>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建各上下文（守卫的意向旗标在根部提供，跨页面切换存续）
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    provide_context(SystemContext::new());
    provide_context(GroupUrlContext::new());
    provide_context(GuardContext::new());

    // 2. API 客户端（同源部署）
    provide_context(GroupVestApi::from_window());

    view! {
        // 3. 路由器只同步信号；守卫在每个页面外层做裁决
        <Router>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
