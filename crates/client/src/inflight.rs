//! 进行中请求去重
//!
//! 相同请求键的并发调用共享同一个网络操作：第一个调用方发出请求，
//! 后到的调用方等待同一个结果（成功值或错误）。请求结束后无论成败
//! 都会移除条目，之后的相同请求会重新发出。所有调用方都放弃等待时，
//! 请求随之释放，条目同样被移除。

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use futures::future::{BoxFuture, FutureExt, Shared, WeakShared};
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::Result;
use crate::request::RequestKey;

type SharedResult<T> = Shared<BoxFuture<'static, Result<T>>>;
type WeakResult<T> = WeakShared<BoxFuture<'static, Result<T>>>;
type EntryMap<T> = Mutex<HashMap<RequestKey, InflightEntry<T>>>;

/// 进行中的请求
struct InflightEntry<T: Clone> {
    /// 条目代次，防止旧请求的清理误删新条目
    generation: u64,
    /// 表中只持有弱引用，请求的生命周期由调用方决定
    future: WeakResult<T>,
}

/// 进行中请求表
///
/// 由发出请求的客户端持有，每个客户端一份。没有超时和取消：
/// 挂起的请求会一直占住它的键。
pub struct InflightRequests<T: Clone> {
    entries: Arc<EntryMap<T>>,
    next_generation: AtomicU64,
}

impl<T> InflightRequests<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
        }
    }

    /// 发出或加入请求
    ///
    /// 已有相同键的请求在进行时返回它的结果；否则调用 `issue` 发出新请求。
    /// `issue` 在持锁期间被调用，只应构造 future，不能再访问本表。
    pub async fn dispatch<F, Fut>(&self, key: RequestKey, issue: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let future = {
            let mut entries = self.entries.lock();
            match entries.get(&key).and_then(|entry| entry.future.upgrade()) {
                Some(future) => {
                    debug!(key = %key, "동일한 요청이 진행 중, 결과를 공유");
                    future
                }
                None => {
                    let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
                    let slot = InflightSlot {
                        entries: Arc::downgrade(&self.entries),
                        key: key.clone(),
                        generation,
                    };
                    let operation = issue();
                    let future = async move {
                        let _slot = slot;
                        operation.await
                    }
                    .boxed()
                    .shared();
                    if let Some(weak) = future.downgrade() {
                        entries.insert(
                            key,
                            InflightEntry {
                                generation,
                                future: weak,
                            },
                        );
                    }
                    future
                }
            }
        };

        future.await
    }

    /// 当前进行中的请求数
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn contains(&self, key: &RequestKey) -> bool {
        self.entries.lock().contains_key(key)
    }
}

impl<T> Default for InflightRequests<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// 请求槽位：随请求 future 一起释放，释放时移除自己的条目
struct InflightSlot<T: Clone> {
    entries: Weak<EntryMap<T>>,
    key: RequestKey,
    generation: u64,
}

impl<T: Clone> Drop for InflightSlot<T> {
    fn drop(&mut self) {
        let Some(entries) = self.entries.upgrade() else {
            return;
        };
        // 在锁外释放被移除的条目
        let removed = {
            let mut entries = entries.lock();
            match entries.get(&self.key) {
                Some(entry) if entry.generation == self.generation => entries.remove(&self.key),
                _ => None,
            }
        };
        if removed.is_some() {
            trace!(key = %self.key, "요청 완료, 진행 중 목록에서 제거");
        }
        drop(removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use reqwest::Method;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::sync::oneshot;

    fn key(method: Method, path: &str, body: Option<serde_json::Value>) -> RequestKey {
        RequestKey::new(method, path, body.as_ref())
    }

    #[tokio::test]
    async fn test_concurrent_identical_requests_share_one_call() {
        let inflight = Arc::new(InflightRequests::<String>::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let (release, gate) = oneshot::channel::<()>();
        let gate = gate.shared();

        let mut handles = Vec::new();
        for _ in 0..3 {
            let inflight = inflight.clone();
            let calls = calls.clone();
            let gate = gate.clone();
            handles.push(tokio::spawn(async move {
                inflight
                    .dispatch(key(Method::GET, "/students/", None), move || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        async move {
                            let _ = gate.await;
                            Ok("students".to_string())
                        }
                    })
                    .await
            }));
        }

        // 等所有任务都挂在同一个请求上
        while inflight.is_empty() {
            tokio::task::yield_now().await;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(inflight.len(), 1);
        release.send(()).unwrap();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "students");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(inflight.is_empty());
    }

    #[tokio::test]
    async fn test_settled_request_is_issued_again() {
        let inflight = InflightRequests::<u32>::new();
        let calls = AtomicUsize::new(0);

        for expected in 1..=2 {
            let value = inflight
                .dispatch(key(Method::GET, "/dashboard/", None), || {
                    let n = calls.fetch_add(1, Ordering::SeqCst) as u32 + 1;
                    async move { Ok(n) }
                })
                .await
                .unwrap();
            assert_eq!(value, expected);
            assert!(inflight.is_empty());
        }
    }

    #[tokio::test]
    async fn test_error_is_shared_and_cleaned_up() {
        let inflight = Arc::new(InflightRequests::<u32>::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let (release, gate) = oneshot::channel::<()>();
        let gate = gate.shared();

        let request = |inflight: Arc<InflightRequests<u32>>,
                       calls: Arc<AtomicUsize>,
                       gate: Shared<oneshot::Receiver<()>>| async move {
            inflight
                .dispatch(key(Method::POST, "/exams/", Some(serde_json::json!({"score": 1}))), move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async move {
                        let _ = gate.await;
                        Err(ApiError::Http {
                            status: 400,
                            message: "점수는 필수입니다.".to_string(),
                        })
                    }
                })
                .await
        };

        let first = tokio::spawn(request(inflight.clone(), calls.clone(), gate.clone()));
        let second = tokio::spawn(request(inflight.clone(), calls.clone(), gate.clone()));
        while inflight.is_empty() {
            tokio::task::yield_now().await;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        release.send(()).unwrap();

        let first = first.await.unwrap().unwrap_err();
        let second = second.await.unwrap().unwrap_err();
        assert_eq!(first, second);
        assert_eq!(first.status(), Some(400));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // 失败不会留下条目，下一次会重新发出
        assert!(inflight.is_empty());
        let retry = inflight
            .dispatch(key(Method::POST, "/exams/", Some(serde_json::json!({"score": 1}))), || async {
                Ok(7)
            })
            .await;
        assert_eq!(retry, Ok(7));
    }

    #[tokio::test]
    async fn test_different_keys_are_not_shared() {
        let inflight = Arc::new(InflightRequests::<String>::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let (release, gate) = oneshot::channel::<()>();
        let gate = gate.shared();

        let keys = vec![
            key(Method::GET, "/users/1/", None),
            key(Method::DELETE, "/users/1/", None),
            key(Method::PUT, "/users/1/", Some(serde_json::json!({"name": "a"}))),
            key(Method::PUT, "/users/1/", Some(serde_json::json!({"name": "b"}))),
        ];

        let mut handles = Vec::new();
        for k in keys {
            let inflight = inflight.clone();
            let calls = calls.clone();
            let gate = gate.clone();
            handles.push(tokio::spawn(async move {
                let label = k.to_string();
                inflight
                    .dispatch(k, move || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        async move {
                            let _ = gate.await;
                            Ok(label)
                        }
                    })
                    .await
            }));
        }

        while inflight.len() < 4 {
            tokio::task::yield_now().await;
        }
        release.send(()).unwrap();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(inflight.is_empty());
    }

    #[tokio::test]
    async fn test_abandoned_request_releases_entry() {
        let inflight = InflightRequests::<u32>::new();
        let key = key(Method::GET, "/classes/", None);
        let mut pending = Box::pin(inflight.dispatch(key.clone(), || {
            futures::future::pending::<Result<u32>>()
        }));
        // 只轮询一次，让条目登记
        assert!(futures::poll!(pending.as_mut()).is_pending());
        assert!(inflight.contains(&key));

        drop(pending);
        assert!(inflight.is_empty());

        let retry = inflight.dispatch(key, || async { Ok(3) }).await;
        assert_eq!(retry, Ok(3));
    }

    #[tokio::test]
    async fn test_entry_survives_while_one_caller_waits() {
        let inflight = InflightRequests::<u32>::new();
        let key = key(Method::GET, "/dashboard/", None);
        let (release, gate) = oneshot::channel::<()>();

        let mut first = Box::pin(inflight.dispatch(key.clone(), move || async move {
            let _ = gate.await;
            Ok(5)
        }));
        let mut second = Box::pin(inflight.dispatch(key.clone(), || async { Ok(0) }));
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(futures::poll!(second.as_mut()).is_pending());

        drop(first);
        assert!(inflight.contains(&key));

        release.send(()).unwrap();
        assert_eq!(second.await, Ok(5));
        assert!(inflight.is_empty());
    }
}
