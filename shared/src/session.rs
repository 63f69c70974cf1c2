//! 会话存储与认证状态机
//!
//! `SessionStore` 持有后端认证客户端的内存缓存（token + 用户记录），
//! 并在每次变更时按注册顺序同步通知订阅者，不合并、不乱序——
//! 过期的通知覆盖新通知会导致界面显示错误的用户。
//!
//! `SessionPhase` 是认证上下文的显式状态机：
//! `Initializing -> Anonymous | Authenticated`，之后在两者之间切换。
//! 在第一次与存储同步之前，"没有用户"不能被当作"未登录"。

use crate::User;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

// =========================================================
// 缓存的认证记录
// =========================================================

/// token + 用户记录，会话的最小缓存单元
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthRecord {
    pub token: String,
    pub record: User,
}

// =========================================================
// 认证状态机
// =========================================================

/// 认证上下文的显式状态
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionPhase {
    /// 首次同步尚未完成，禁止任何导航判定
    #[default]
    Initializing,
    Anonymous,
    Authenticated(User),
}

impl SessionPhase {
    /// 首次认证检查是否尚未完成
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionPhase::Initializing)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionPhase::Authenticated(_))
    }

    /// 当前用户（仅在 Authenticated 时存在）
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionPhase::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// 由一次存储同步结果得到的状态
    ///
    /// 同步一旦发生（无论结果），状态就离开 Initializing。
    pub fn after_sync(record: Option<&AuthRecord>) -> Self {
        match record {
            Some(auth) => SessionPhase::Authenticated(auth.record.clone()),
            None => SessionPhase::Anonymous,
        }
    }
}

// =========================================================
// 会话存储
// =========================================================

type ChangeCallback = Box<dyn Fn(Option<&AuthRecord>)>;

struct StoreInner {
    current: RefCell<Option<AuthRecord>>,
    listeners: RefCell<Vec<(u64, ChangeCallback)>>,
    next_id: RefCell<u64>,
}

/// 会话存储
///
/// 单线程（UI 线程）使用，认证上下文是唯一的写入方，
/// 其余组件只读。克隆共享同一份状态。
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<StoreInner>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(StoreInner {
                current: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
                next_id: RefCell::new(0),
            }),
        }
    }

    /// 当前缓存的会话（同步读取）
    pub fn current(&self) -> Option<AuthRecord> {
        self.inner.current.borrow().clone()
    }

    /// 写入新的会话并通知订阅者
    pub fn save(&self, auth: AuthRecord) {
        *self.inner.current.borrow_mut() = Some(auth);
        self.notify();
    }

    /// 无条件清除本地缓存并通知订阅者
    ///
    /// 纯本地操作，不需要网络往返，不会失败。
    pub fn clear(&self) {
        *self.inner.current.borrow_mut() = None;
        self.notify();
    }

    /// 订阅变更通知
    ///
    /// 回调在每次 save/clear 时同步触发。返回的 `Subscription`
    /// 在 drop 时自动退订（作用域资源，任何退出路径都会释放）。
    #[must_use = "dropping the subscription immediately unsubscribes it"]
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Option<&AuthRecord>) + 'static,
    {
        let id = {
            let mut next = self.inner.next_id.borrow_mut();
            let id = *next;
            *next += 1;
            id
        };
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Box::new(callback)));
        Subscription {
            store: Rc::downgrade(&self.inner),
            id,
        }
    }

    fn notify(&self) {
        let current = self.inner.current.borrow().clone();
        // 回调持有期间不持有 listeners 的借用，允许回调里再读 store
        let snapshot: Vec<u64> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(id, _)| *id)
            .collect();
        for id in snapshot {
            let cb_index = self
                .inner
                .listeners
                .borrow()
                .iter()
                .position(|(lid, _)| *lid == id);
            if let Some(index) = cb_index {
                // 逐个取出回调执行，执行期间不借用 listeners
                let cb = self.inner.listeners.borrow_mut().remove(index).1;
                cb(current.as_ref());
                self.inner.listeners.borrow_mut().insert(index, (id, cb));
            }
        }
    }
}

/// 订阅句柄，drop 时退订
pub struct Subscription {
    store: Weak<StoreInner>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn test_user(id: &str) -> User {
        User {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            name: id.to_string(),
        }
    }

    fn test_auth(id: &str) -> AuthRecord {
        AuthRecord {
            token: format!("token-{}", id),
            record: test_user(id),
        }
    }

    // ---------------- 状态机 ----------------

    #[test]
    fn test_initial_phase_is_loading() {
        let phase = SessionPhase::default();
        assert!(phase.is_loading());
        assert!(!phase.is_authenticated());
        assert!(phase.user().is_none());
    }

    #[test]
    fn test_after_sync_with_record_is_authenticated() {
        let phase = SessionPhase::after_sync(Some(&test_auth("u1")));
        assert!(phase.is_authenticated());
        assert_eq!(phase.user().unwrap().id, "u1");
    }

    #[test]
    fn test_after_sync_without_record_is_anonymous() {
        let phase = SessionPhase::after_sync(None);
        assert_eq!(phase, SessionPhase::Anonymous);
        // 同步过一次之后不再是 loading
        assert!(!phase.is_loading());
    }

    // ---------------- 存储与通知 ----------------

    #[test]
    fn test_save_then_clear_round_trip() {
        let store = SessionStore::new();
        assert!(store.current().is_none());

        store.save(test_auth("u1"));
        assert_eq!(store.current().unwrap().record.id, "u1");

        store.clear();
        assert!(store.current().is_none());
    }

    #[test]
    fn test_change_notifications_fire_in_order() {
        let store = SessionStore::new();
        let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::new(RefCell::new(Vec::new()));

        let seen_cb = seen.clone();
        let _sub = store.on_change(move |auth| {
            seen_cb
                .borrow_mut()
                .push(auth.map(|a| a.record.id.clone()));
        });

        store.save(test_auth("u1"));
        store.save(test_auth("u2"));
        store.clear();

        assert_eq!(
            *seen.borrow(),
            vec![
                Some("u1".to_string()),
                Some("u2".to_string()),
                None
            ]
        );
    }

    #[test]
    fn test_multiple_listeners_in_registration_order() {
        let store = SessionStore::new();
        let order: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));

        let o1 = order.clone();
        let _a = store.on_change(move |_| o1.borrow_mut().push(1));
        let o2 = order.clone();
        let _b = store.on_change(move |_| o2.borrow_mut().push(2));

        store.clear();
        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_dropped_subscription_stops_notifications() {
        let store = SessionStore::new();
        let count = Rc::new(RefCell::new(0));

        let c = count.clone();
        let sub = store.on_change(move |_| *c.borrow_mut() += 1);

        store.save(test_auth("u1"));
        drop(sub);
        store.clear();

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_listener_can_read_store_during_notification() {
        let store = SessionStore::new();
        let seen = Rc::new(RefCell::new(None));

        let inner_store = store.clone();
        let seen_cb = seen.clone();
        let _sub = store.on_change(move |_| {
            // 回调里再次读取 store 不应 panic
            *seen_cb.borrow_mut() = inner_store.current();
        });

        store.save(test_auth("u1"));
        assert_eq!(seen.borrow().as_ref().unwrap().record.id, "u1");
    }

    #[test]
    fn test_phase_follows_store_transitions() {
        let store = SessionStore::new();
        let phase = Rc::new(RefCell::new(SessionPhase::default()));

        let phase_cb = phase.clone();
        let _sub = store.on_change(move |auth| {
            *phase_cb.borrow_mut() = SessionPhase::after_sync(auth);
        });

        // 登录
        store.save(test_auth("u1"));
        assert!(phase.borrow().is_authenticated());

        // 登出：立即回到 Anonymous，没有中间状态
        store.clear();
        assert_eq!(*phase.borrow(), SessionPhase::Anonymous);
    }
}
