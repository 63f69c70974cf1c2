//! 认证模块
//!
//! 管理认证状态，与路由系统解耦：路由服务通过注入的
//! 会话状态信号来检查认证状态。
//!
//! 数据流：`SessionStore` 变更 -> 状态信号 -> 守卫重新判定。
//! 存储是唯一的共享可变资源，只有本模块写入，其余组件只读。

use crate::api::{ApiError, AuthSuccess, RecordApi};
use crate::web::LocalStorage;
use leptos::__reexports::send_wrapper::SendWrapper;
use leptos::prelude::*;
use sanamente_shared::session::{AuthRecord, SessionPhase, SessionStore};
use sanamente_shared::{STORAGE_AUTH_KEY, User};

// =========================================================
// 认证上下文
// =========================================================

/// 认证上下文
///
/// 通过 Context 在组件间共享。状态信号只读暴露，
/// 所有写入都经由 login/logout/register。
#[derive(Clone)]
pub struct AuthContext {
    phase: ReadSignal<SessionPhase>,
    set_phase: WriteSignal<SessionPhase>,
    store: SendWrapper<SessionStore>,
    api: RecordApi,
}

impl AuthContext {
    /// 创建新的认证上下文（状态从 Initializing 开始）
    pub fn new(api: RecordApi) -> Self {
        let (phase, set_phase) = signal(SessionPhase::Initializing);
        Self {
            phase,
            set_phase,
            store: SendWrapper::new(SessionStore::new()),
            api,
        }
    }

    /// 会话状态（只读信号）
    pub fn phase(&self) -> ReadSignal<SessionPhase> {
        self.phase
    }

    /// 会话状态信号（用于路由服务注入）
    pub fn phase_signal(&self) -> Signal<SessionPhase> {
        self.phase.into()
    }

    /// 当前用户的只读快照
    pub fn current_user(&self) -> Option<User> {
        self.store.current().map(|auth| auth.record)
    }

    /// 携带当前会话 token 的 API 客户端
    pub fn authed_api(&self) -> RecordApi {
        match self.store.current() {
            Some(auth) => self.api.with_token(&auth.token),
            None => self.api.clone(),
        }
    }

    // ---------------- 操作 ----------------

    /// 登录
    ///
    /// 成功时写入存储（进而更新状态信号并持久化）；
    /// 失败时会话保持不变，错误返回给调用方处理文案。
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let auth = login_flow(&self.api, email, password).await?;
        self.store.save(auth);
        Ok(())
    }

    /// 登出：无条件清除本地会话缓存，同步完成，不会失败
    ///
    /// 导航由路由服务监听状态变化自动处理。
    pub fn logout(&self) {
        self.store.clear();
    }

    /// 注册并随即登录
    ///
    /// 账号创建成功但登录失败时（部分成功），账号在外部已存在，
    /// 调用方看到的是错误，会话保持 Anonymous。
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<(), ApiError> {
        let auth = register_flow(&self.api, email, password, password_confirm).await?;
        self.store.save(auth);
        Ok(())
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 1. 订阅存储变更：每次变更按到达顺序写入状态信号并同步
///    LocalStorage 副本（订阅在组件卸载时随 `Subscription` 释放）。
/// 2. 从 LocalStorage 加载缓存会话触发首次同步，
///    状态随之离开 Initializing——即使没有缓存也是如此。
pub fn init_auth(ctx: &AuthContext) {
    let set_phase = ctx.set_phase;
    let subscription = ctx.store.on_change(move |auth| {
        match auth {
            Some(auth) => {
                LocalStorage::set_json(STORAGE_AUTH_KEY, auth);
            }
            None => {
                LocalStorage::delete(STORAGE_AUTH_KEY);
            }
        }
        set_phase.set(SessionPhase::after_sync(auth));
    });
    let subscription = SendWrapper::new(subscription);
    on_cleanup(move || drop(subscription));

    // 首次同步：有缓存立即进入 Authenticated，否则 Anonymous
    match LocalStorage::get_json::<AuthRecord>(STORAGE_AUTH_KEY) {
        Some(cached) => ctx.store.save(cached),
        None => ctx.store.clear(),
    }
}

// =========================================================
// 凭据流程（可测试的纯逻辑）
// =========================================================

/// 认证端点的抽象，测试时用 mock 替换
pub(crate) trait AuthGateway {
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthSuccess, ApiError>;
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<User, ApiError>;
}

impl AuthGateway for RecordApi {
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthSuccess, ApiError> {
        self.auth_with_password(email, password).await
    }

    async fn create_account(
        &self,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<User, ApiError> {
        RecordApi::create_account(self, email, password, password_confirm).await
    }
}

/// 登录流程：认证成功才产生可提交的会话记录
async fn login_flow<G: AuthGateway>(
    gateway: &G,
    email: &str,
    password: &str,
) -> Result<AuthRecord, ApiError> {
    let success = gateway.authenticate(email, password).await?;
    Ok(AuthRecord {
        token: success.token,
        record: success.record,
    })
}

/// 注册流程：先建号，再用同一组凭据登录
async fn register_flow<G: AuthGateway>(
    gateway: &G,
    email: &str,
    password: &str,
    password_confirm: &str,
) -> Result<AuthRecord, ApiError> {
    gateway.create_account(email, password, password_confirm).await?;
    login_flow(gateway, email, password).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct MockGateway {
        /// authenticate 是否失败
        reject_login: bool,
        /// create_account 是否失败
        reject_account: bool,
        /// 账号是否已在"外部"创建
        account_created: Cell<bool>,
    }

    impl MockGateway {
        fn new() -> Self {
            Self {
                reject_login: false,
                reject_account: false,
                account_created: Cell::new(false),
            }
        }
    }

    impl AuthGateway for MockGateway {
        async fn authenticate(
            &self,
            email: &str,
            _password: &str,
        ) -> Result<AuthSuccess, ApiError> {
            if self.reject_login {
                return Err(ApiError::Auth("invalid credentials".to_string()));
            }
            Ok(AuthSuccess {
                token: "token-1".to_string(),
                record: User {
                    id: "u1".to_string(),
                    email: email.to_string(),
                    name: String::new(),
                },
            })
        }

        async fn create_account(
            &self,
            _email: &str,
            _password: &str,
            _password_confirm: &str,
        ) -> Result<User, ApiError> {
            if self.reject_account {
                return Err(ApiError::Validation("email already in use".to_string()));
            }
            self.account_created.set(true);
            Ok(User::default())
        }
    }

    #[tokio::test]
    async fn test_login_success_yields_session_record() {
        let gateway = MockGateway::new();
        let auth = login_flow(&gateway, "a@b.com", "pw").await.unwrap();
        assert_eq!(auth.token, "token-1");
        assert_eq!(auth.record.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_auth_error() {
        let mut gateway = MockGateway::new();
        gateway.reject_login = true;

        let result = login_flow(&gateway, "a@b.com", "bad").await;
        assert!(matches!(result, Err(ApiError::Auth(_))));
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let gateway = MockGateway::new();
        let auth = register_flow(&gateway, "a@b.com", "pw", "pw").await.unwrap();
        assert!(gateway.account_created.get());
        assert_eq!(auth.token, "token-1");
    }

    #[tokio::test]
    async fn test_register_partial_success_surfaces_error() {
        // 建号成功但登录失败：账号在外部已存在，调用方只看到错误
        let mut gateway = MockGateway::new();
        gateway.reject_login = true;

        let result = register_flow(&gateway, "a@b.com", "pw", "pw").await;
        assert!(gateway.account_created.get());
        assert!(matches!(result, Err(ApiError::Auth(_))));
    }

    #[tokio::test]
    async fn test_register_account_rejection_skips_login() {
        let mut gateway = MockGateway::new();
        gateway.reject_account = true;

        let result = register_flow(&gateway, "a@b.com", "pw", "pw").await;
        assert!(!gateway.account_created.get());
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
