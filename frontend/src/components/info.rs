//! 信息页面集合
//!
//! 联系我们、帮助中心、法律条款与认证回调页。
//! 纯展示内容，统一用 `InfoCard` 包装。

use leptos::prelude::*;

use crate::system::use_system;

#[component]
fn InfoCard(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body space-y-2">
                    <h1 class="card-title text-2xl">{title}</h1>
                    {children()}
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn ContactUsPage() -> impl IntoView {
    let system = use_system();
    let email = move || {
        system
            .state
            .get()
            .attributes
            .map(|a| a.support_email)
            .unwrap_or_else(|| "support@groupvest.example".to_string())
    };

    view! {
        <InfoCard title="联系我们">
            <p>"有任何问题，请发送邮件至："</p>
            <p class="font-mono text-primary">{email}</p>
        </InfoCard>
    }
}

#[component]
pub fn HelpPage() -> impl IntoView {
    view! {
        <InfoCard title="帮助中心">
            <p>"投资人：在群组首页浏览项目，进入项目页查看详情。"</p>
            <p>"发行人：在发行面板创建并管理你的募资项目。"</p>
            <p>"群组管理员：在管理后台审核项目与成员。"</p>
        </InfoCard>
    }
}

#[component]
pub fn TermsOfUsePage() -> impl IntoView {
    view! {
        <InfoCard title="使用条款">
            <p>"使用本平台即表示你同意以下条款。投资有风险，决策需谨慎。"</p>
        </InfoCard>
    }
}

#[component]
pub fn PrivacyPolicyPage() -> impl IntoView {
    view! {
        <InfoCard title="隐私政策">
            <p>"我们只收集提供服务所必需的数据，不向第三方出售个人信息。"</p>
        </InfoCard>
    }
}

#[component]
pub fn RiskWarningPage() -> impl IntoView {
    view! {
        <InfoCard title="风险提示">
            <p>"早期项目投资可能损失全部本金，且流动性有限。"</p>
            <p>"请勿投入超出你承受能力的资金。"</p>
        </InfoCard>
    }
}

#[component]
pub fn MarketingPreferencesPage() -> impl IntoView {
    view! {
        <InfoCard title="营销偏好">
            <p>"你可以随时调整接收平台与群组通知的方式。"</p>
        </InfoCard>
    }
}

/// 认证回调页（邮件验证、密码重置链接的落点）
#[component]
pub fn AuthActionPage() -> impl IntoView {
    view! {
        <InfoCard title="正在处理">
            <p>"正在处理你的认证请求，请稍候……"</p>
            <span class="loading loading-dots loading-md"></span>
        </InfoCard>
    }
}
