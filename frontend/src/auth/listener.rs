//! 认证监听模块
//!
//! 进程级唯一的认证状态订阅，带引用计数：
//! 多个守卫实例共存时（页面切换的交叠期）底层订阅只挂接一次，
//! 最后一个句柄释放时订阅随之解除，避免重复挂接/解除的竞态。

use std::cell::RefCell;

use leptos::prelude::{GetUntracked, Set, Update};
use leptos::task::spawn_local;

use super::{resolve_session, AuthBackend, AuthContext, AuthPhase, STORAGE_TOKEN_KEY};
use crate::web::SessionStorage;

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

#[derive(Default)]
struct Registry {
    refs: usize,
    attached: bool,
}

/// 监听器句柄
///
/// Drop 时递减引用计数；计数归零则解除订阅。
pub struct AuthListenerHandle(());

impl Drop for AuthListenerHandle {
    fn drop(&mut self) {
        REGISTRY.with(|r| {
            let mut registry = r.borrow_mut();
            registry.refs = registry.refs.saturating_sub(1);
            if registry.refs == 0 {
                registry.attached = false;
            }
        });
    }
}

/// 获取监听器句柄；首个句柄触发 `attach`
///
/// 返回句柄期间订阅保持存活。`attach` 在整个进程中
/// 至多同时挂接一份。
pub fn acquire(attach: impl FnOnce()) -> AuthListenerHandle {
    let first = REGISTRY.with(|r| {
        let mut registry = r.borrow_mut();
        registry.refs += 1;
        if registry.attached {
            false
        } else {
            registry.attached = true;
            true
        }
    });
    if first {
        attach();
    }
    AuthListenerHandle(())
}

/// 当前引用计数（测试用）
#[cfg(test)]
pub(crate) fn active_refs() -> usize {
    REGISTRY.with(|r| r.borrow().refs)
}

/// 挂接会话监听：恢复既有令牌背后的会话
///
/// 无令牌时立即进入未认证；有令牌时先进入认证中，
/// 待后端应答后落到已认证/未认证。
pub fn attach_session_listener<B>(ctx: AuthContext, backend: B) -> AuthListenerHandle
where
    B: AuthBackend + Clone + 'static,
{
    acquire(move || {
        // 会话状态已解析过（页面切换引起的重挂接），不再重复恢复
        if ctx.state.get_untracked().phase != AuthPhase::NotInitialized {
            return;
        }

        let token = SessionStorage::get(STORAGE_TOKEN_KEY);
        if token.is_none() {
            ctx.set_state.update(|s| s.phase = AuthPhase::Unauthenticated);
            return;
        }

        ctx.set_state.update(|s| s.phase = AuthPhase::Authenticating);
        spawn_local(async move {
            let state = resolve_session(&backend, token).await;
            ctx.set_state.set(state);
        });
    })
}
