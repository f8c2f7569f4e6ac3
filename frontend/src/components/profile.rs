use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::icons::UserCircle;
use groupvest_shared::{CurrentUser, UserRole};

fn role_label(role: UserRole) -> &'static str {
    match role {
        UserRole::Investor => "投资人",
        UserRole::Issuer => "发行人",
    }
}

/// 个人资料页
///
/// 受保护路由：守卫保证到达时会话已认证。
#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();

    view! {
        <div class="max-w-2xl mx-auto p-4 md:p-8">
            {move || {
                let state = auth.state.get();
                match state.profile {
                    Some(profile) => {
                        let (name, email, subtitle) = match &profile.user {
                            CurrentUser::User(user) => (
                                user.display_name.clone(),
                                user.email.clone(),
                                role_label(user.role).to_string(),
                            ),
                            CurrentUser::Admin(admin) => (
                                admin.display_name.clone(),
                                admin.email.clone(),
                                if admin.super_admin {
                                    "平台管理员".to_string()
                                } else {
                                    "群组管理员".to_string()
                                },
                            ),
                        };
                        let memberships = profile.memberships.clone();
                        view! {
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body space-y-4">
                                    <div class="flex items-center gap-4">
                                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                                            <UserCircle attr:class="h-10 w-10" />
                                        </div>
                                        <div>
                                            <h1 class="card-title text-2xl">{name}</h1>
                                            <p class="text-base-content/70">{email}</p>
                                            <span class="badge badge-outline mt-1">{subtitle}</span>
                                        </div>
                                    </div>

                                    <div>
                                        <h2 class="font-semibold mb-2">"我的群组"</h2>
                                        <Show
                                            when={
                                                let memberships = memberships.clone();
                                                move || !memberships.is_empty()
                                            }
                                            fallback=|| view! {
                                                <p class="text-base-content/60">"尚未加入任何群组"</p>
                                            }
                                        >
                                            <ul class="menu bg-base-200 rounded-box">
                                                {memberships
                                                    .iter()
                                                    .map(|m| view! {
                                                        <li>
                                                            <span>
                                                                {m.group.display_name.clone()}
                                                                <span class="badge badge-ghost badge-sm">
                                                                    {role_label(m.role)}
                                                                </span>
                                                            </span>
                                                        </li>
                                                    })
                                                    .collect_view()}
                                            </ul>
                                        </Show>
                                    </div>
                                </div>
                            </div>
                        }
                        .into_any()
                    }
                    None => ().into_any(),
                }
            }}
        </div>
    }
}
