//! 认证模块
//!
//! 管理用户会话状态，与路由系统解耦。
//! 守卫通过会话阶段信号做出导航决策；后端交互通过
//! `AuthBackend` trait 抽象，便于在测试中替换为 mock。

use async_trait::async_trait;
use leptos::prelude::*;

use crate::log::log_error;
use crate::web::SessionStorage;
use groupvest_shared::error::VestResult;
use groupvest_shared::protocol::{SignInResponse, SignUpRequest};
use groupvest_shared::SessionProfile;

use crate::web::route::SessionView;

pub mod listener;
#[cfg(test)]
mod tests;

/// 认证令牌的会话存储键
pub const STORAGE_TOKEN_KEY: &str = "groupvest_token";

/// 会话认证阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPhase {
    /// 监听器尚未挂接，什么都不知道
    #[default]
    NotInitialized,
    /// 正在恢复或建立会话
    Authenticating,
    Authenticated,
    Unauthenticated,
}

/// 会话状态
#[derive(Clone, Default, PartialEq)]
pub struct SessionState {
    pub phase: AuthPhase,
    /// 当前用户及其成员关系（仅认证成功后存在）
    pub profile: Option<SessionProfile>,
    /// 当前令牌（仅认证成功后存在，随会话存储同步）
    pub token: Option<String>,
}

impl SessionState {
    /// 路由构造与守卫所需的最小视图
    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            user: self.profile.as_ref().map(|p| &p.user),
            memberships: self
                .profile
                .as_ref()
                .map(|p| p.memberships.as_slice())
                .unwrap_or(&[]),
        }
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话状态（只读）
    pub state: ReadSignal<SessionState>,
    /// 设置会话状态（写入）
    pub set_state: WriteSignal<SessionState>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self { state, set_state }
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

// =========================================================
// 后端抽象 (Auth Backend)
// =========================================================

/// 认证后端抽象
///
/// 生产实现为平台 API 客户端；测试中以 mock 替换。
#[async_trait(?Send)]
pub trait AuthBackend {
    /// 用既有令牌恢复会话
    async fn restore_session(&self, token: &str) -> VestResult<SessionProfile>;
    /// 凭据登录
    async fn sign_in(&self, email: &str, password: &str) -> VestResult<SignInResponse>;
    /// 注册（成功即登录）
    async fn sign_up(&self, request: SignUpRequest) -> VestResult<SignInResponse>;
    /// 服务端作废令牌
    async fn sign_out(&self, token: &str) -> VestResult<()>;
}

/// 由（可能存在的）令牌解析出会话状态
///
/// 无令牌 → 未认证；令牌有效 → 已认证；令牌失效 → 未认证。
/// 纯异步函数，不触碰信号，便于单元测试。
pub(crate) async fn resolve_session(
    backend: &dyn AuthBackend,
    token: Option<String>,
) -> SessionState {
    let token = match token {
        None => {
            return SessionState {
                phase: AuthPhase::Unauthenticated,
                ..Default::default()
            };
        }
        Some(token) => token,
    };

    match backend.restore_session(&token).await {
        Ok(profile) => SessionState {
            phase: AuthPhase::Authenticated,
            profile: Some(profile),
            token: Some(token),
        },
        Err(_) => SessionState {
            phase: AuthPhase::Unauthenticated,
            ..Default::default()
        },
    }
}

// =========================================================
// 会话操作 (Session Operations)
// =========================================================

/// 登录并保存状态
///
/// 成功时令牌写入会话存储（不入 LocalStorage，浏览器会话结束即失效）。
/// 导航由守卫的规则评估自动处理，这里不做跳转。
pub async fn sign_in(
    ctx: &AuthContext,
    backend: &dyn AuthBackend,
    email: String,
    password: String,
) -> bool {
    ctx.set_state.update(|s| s.phase = AuthPhase::Authenticating);

    match backend.sign_in(&email, &password).await {
        Ok(response) => {
            SessionStorage::set(STORAGE_TOKEN_KEY, &response.token);
            ctx.set_state.set(SessionState {
                phase: AuthPhase::Authenticated,
                profile: Some(response.profile),
                token: Some(response.token),
            });
            true
        }
        Err(e) => {
            log_error!("[Auth] 登录失败: {}", e);
            ctx.set_state.update(|s| s.phase = AuthPhase::Unauthenticated);
            false
        }
    }
}

/// 注册并以新账户登录
///
/// 与登录一样，跳转交给守卫处理。
pub async fn sign_up(ctx: &AuthContext, backend: &dyn AuthBackend, request: SignUpRequest) -> bool {
    ctx.set_state.update(|s| s.phase = AuthPhase::Authenticating);

    match backend.sign_up(request).await {
        Ok(response) => {
            SessionStorage::set(STORAGE_TOKEN_KEY, &response.token);
            ctx.set_state.set(SessionState {
                phase: AuthPhase::Authenticated,
                profile: Some(response.profile),
                token: Some(response.token),
            });
            true
        }
        Err(e) => {
            log_error!("[Auth] 注册失败: {}", e);
            ctx.set_state.update(|s| s.phase = AuthPhase::Unauthenticated);
            false
        }
    }
}

/// 注销并清除状态
///
/// 服务端作废失败不影响本地清理；守卫会随状态变化重定向。
pub async fn sign_out(ctx: &AuthContext, backend: &dyn AuthBackend) {
    let token = ctx.state.get_untracked().token;
    if let Some(token) = token {
        if let Err(e) = backend.sign_out(&token).await {
            log_error!("[Auth] 服务端注销失败: {}", e);
        }
    }
    SessionStorage::delete(STORAGE_TOKEN_KEY);
    ctx.set_state.set(SessionState {
        phase: AuthPhase::Unauthenticated,
        ..Default::default()
    });
}
