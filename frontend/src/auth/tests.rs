use super::*;
use groupvest_shared::error::VestError;
use groupvest_shared::{CurrentUser, PlatformUser, UserRole};
use std::cell::RefCell;
use std::rc::Rc;

// =========================================================
// Mock backend
// =========================================================

#[derive(Clone)]
struct MockBackend {
    /// Operation log to verify calling order
    log: Rc<RefCell<Vec<String>>>,
    /// Tokens the backend accepts
    valid_tokens: Rc<Vec<String>>,
}

impl MockBackend {
    fn new(valid_tokens: &[&str]) -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            valid_tokens: Rc::new(valid_tokens.iter().map(|s| s.to_string()).collect()),
        }
    }

    fn profile() -> SessionProfile {
        SessionProfile {
            user: CurrentUser::User(PlatformUser {
                uid: "u1".into(),
                email: "ines@example.com".into(),
                display_name: "Ines".into(),
                role: UserRole::Investor,
                home_group_user_name: Some("acme".into()),
            }),
            memberships: vec![],
        }
    }
}

#[async_trait(?Send)]
impl AuthBackend for MockBackend {
    async fn restore_session(&self, token: &str) -> VestResult<SessionProfile> {
        self.log.borrow_mut().push(format!("restore:{}", token));
        if self.valid_tokens.iter().any(|t| t == token) {
            Ok(Self::profile())
        } else {
            Err(VestError::unauthorized("token expired"))
        }
    }

    async fn sign_in(&self, email: &str, _password: &str) -> VestResult<SignInResponse> {
        self.log.borrow_mut().push(format!("sign_in:{}", email));
        Ok(SignInResponse {
            token: "t-fresh".into(),
            profile: Self::profile(),
        })
    }

    async fn sign_up(&self, request: SignUpRequest) -> VestResult<SignInResponse> {
        self.log.borrow_mut().push(format!("sign_up:{}", request.email));
        Ok(SignInResponse {
            token: "t-fresh".into(),
            profile: Self::profile(),
        })
    }

    async fn sign_out(&self, token: &str) -> VestResult<()> {
        self.log.borrow_mut().push(format!("sign_out:{}", token));
        Ok(())
    }
}

// =========================================================
// resolve_session
// =========================================================

#[tokio::test]
async fn no_token_resolves_to_unauthenticated() {
    let backend = MockBackend::new(&["t-good"]);
    let state = resolve_session(&backend, None).await;

    assert_eq!(state.phase, AuthPhase::Unauthenticated);
    assert!(state.profile.is_none());
    assert!(state.token.is_none());
    // 无令牌时不应打扰后端
    assert!(backend.log.borrow().is_empty());
}

#[tokio::test]
async fn valid_token_resolves_to_authenticated() {
    let backend = MockBackend::new(&["t-good"]);
    let state = resolve_session(&backend, Some("t-good".into())).await;

    assert_eq!(state.phase, AuthPhase::Authenticated);
    assert_eq!(state.token.as_deref(), Some("t-good"));
    let profile = state.profile.expect("profile should be present");
    assert_eq!(profile.user.uid(), "u1");
    assert_eq!(backend.log.borrow().as_slice(), ["restore:t-good"]);
}

#[tokio::test]
async fn expired_token_resolves_to_unauthenticated() {
    let backend = MockBackend::new(&[]);
    let state = resolve_session(&backend, Some("t-stale".into())).await;

    assert_eq!(state.phase, AuthPhase::Unauthenticated);
    assert!(state.profile.is_none());
    assert!(state.token.is_none());
}

// =========================================================
// Listener reference counting
// =========================================================

#[test]
fn listener_attaches_once_per_generation() {
    let attaches = Rc::new(RefCell::new(0usize));

    let count = attaches.clone();
    let first = listener::acquire(move || *count.borrow_mut() += 1);
    let count = attaches.clone();
    let second = listener::acquire(move || *count.borrow_mut() += 1);

    // 两个守卫实例共存，底层订阅只挂接一次
    assert_eq!(*attaches.borrow(), 1);
    assert_eq!(listener::active_refs(), 2);

    drop(first);
    assert_eq!(listener::active_refs(), 1);
    drop(second);
    assert_eq!(listener::active_refs(), 0);

    // 全部释放后重新获取会重新挂接
    let count = attaches.clone();
    let third = listener::acquire(move || *count.borrow_mut() += 1);
    assert_eq!(*attaches.borrow(), 2);
    drop(third);
}

// =========================================================
// SessionState view
// =========================================================

#[test]
fn session_view_exposes_user_and_memberships() {
    let empty = SessionState::default();
    assert!(empty.view().user.is_none());
    assert!(empty.view().memberships.is_empty());

    let state = SessionState {
        phase: AuthPhase::Authenticated,
        profile: Some(MockBackend::profile()),
        token: Some("t".into()),
    };
    let view = state.view();
    assert_eq!(view.user.map(CurrentUser::uid), Some("u1"));
    assert!(view.home_group().is_some());
}
