//! 仪表盘页面
//!
//! 平台管理后台（超级管理员）、群组管理后台、
//! 投资人与发行人仪表盘。到达这里的请求都已通过守卫的
//! 角色/群组授权检查，页面本身不再做权限判断。

use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::offers::OffersList;
use crate::web::route::{construct_create_project_route, GroupScope, Query};
use crate::web::router::use_router;
use groupvest_shared::DEFAULT_DASHBOARD_TAB;

/// 从当前 URL 读取 `?tab=`，缺省为默认标签页
fn current_tab(path_query: &str) -> String {
    let query = path_query.split_once('?').map(|(_, q)| q).unwrap_or("");
    Query::parse(query)
        .tab()
        .unwrap_or(DEFAULT_DASHBOARD_TAB)
        .to_string()
}

#[component]
fn DashboardShell(
    title: String,
    subtitle: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let tab = move || current_tab(&router.current_path_query().get());

    view! {
        <div class="max-w-6xl mx-auto p-4 md:p-8 space-y-6">
            <div class="flex items-center justify-between flex-wrap gap-2">
                <div>
                    <h1 class="text-3xl font-bold">{title}</h1>
                    <p class="text-base-content/70">{subtitle}</p>
                </div>
                <div class="badge badge-outline">{tab}</div>
            </div>
            {children()}
        </div>
    }
}

/// 平台管理后台（超级管理员）
#[component]
pub fn PlatformAdminPage() -> impl IntoView {
    view! {
        <DashboardShell
            title="平台管理".to_string()
            subtitle="全部群组与项目".to_string()
        >
            <OffersList />
        </DashboardShell>
    }
}

/// 群组管理后台
#[component]
pub fn GroupAdminPage(scope: GroupScope) -> impl IntoView {
    let group = scope.group_user_name.clone();
    view! {
        <DashboardShell
            title=format!("{} 管理后台", scope.group_user_name)
            subtitle="群组项目与成员".to_string()
        >
            <OffersList group_user_name=group />
        </DashboardShell>
    }
}

/// 投资人仪表盘
#[component]
pub fn InvestorDashboardPage(scope: GroupScope) -> impl IntoView {
    let auth = use_auth();
    let name = move || {
        auth.state
            .get()
            .profile
            .and_then(|p| p.user.as_user().map(|u| u.display_name.clone()))
            .unwrap_or_default()
    };
    let group = scope.group_user_name.clone();

    view! {
        <DashboardShell
            title=format!("{} · 投资面板", scope.group_user_name)
            subtitle="你关注的群组项目".to_string()
        >
            <p class="text-sm text-base-content/60">{move || format!("欢迎，{}", name())}</p>
            <OffersList group_user_name=group />
        </DashboardShell>
    }
}

/// 发行人仪表盘
#[component]
pub fn IssuerDashboardPage(scope: GroupScope) -> impl IntoView {
    let router = use_router();
    let scope_stored = StoredValue::new(scope.clone());
    let group = scope.group_user_name.clone();

    let on_create = move |_| {
        let scope = scope_stored.get_value();
        router.navigate(&construct_create_project_route(Some(&scope)));
    };

    view! {
        <DashboardShell
            title=format!("{} · 发行面板", scope.group_user_name)
            subtitle="管理你的募资项目".to_string()
        >
            <div class="flex justify-end">
                <button class="btn btn-primary btn-sm" on:click=on_create>
                    "创建项目"
                </button>
            </div>
            <OffersList group_user_name=group />
        </DashboardShell>
    }
}
