//! Bounded pool of gRPC channels to a single node endpoint.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{watch, OwnedSemaphorePermit, Semaphore};
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use crate::SdkError;

/// Default channel cap per pool
pub const DEFAULT_MAX_CONNECTIONS: usize = 4;
/// Default per-call timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pool configuration
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Node endpoint URL, e.g. `http://127.0.0.1:50051`
    pub endpoint: String,
    /// Channels opened up front (clamped to `max_connections`)
    pub initial_connections: usize,
    /// Maximum number of channels kept by the pool
    pub max_connections: usize,
    /// Default timeout applied to every call
    pub timeout: Duration,
}

impl PoolConfig {
    /// Configuration with defaults for everything but the endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        PoolConfig {
            endpoint: endpoint.into(),
            initial_connections: 0,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Owns up to `max_connections` lazily created channels to one endpoint.
///
/// [`ChannelPool::lease`] hands out a guard that returns the channel on
/// drop, so no error path can leak one. `|leased| + |idle|` never exceeds
/// the cap: leases are gated by a semaphore and every returned channel
/// re-enters the idle list. [`ChannelPool::close`] flips a watch flag that
/// in-flight calls observe, refuses future leases and discards channels.
pub struct ChannelPool {
    endpoint: Endpoint,
    url: String,
    timeout: Duration,
    idle: Arc<Mutex<Vec<Channel>>>,
    permits: Arc<Semaphore>,
    closed_tx: watch::Sender<bool>,
    closed_rx: watch::Receiver<bool>,
}

impl ChannelPool {
    /// Build a pool for the configured endpoint. Channels connect lazily
    /// on first use.
    pub fn new(config: PoolConfig) -> Result<Arc<Self>, SdkError> {
        let endpoint = Endpoint::from_shared(config.endpoint.clone())
            .map_err(|e| SdkError::Transport(format!("invalid endpoint url: {}", e)))?
            .connect_timeout(config.timeout);
        let (closed_tx, closed_rx) = watch::channel(false);
        let max = config.max_connections.max(1);
        let warm = config.initial_connections.min(max);
        let idle = (0..warm).map(|_| endpoint.connect_lazy()).collect();
        Ok(Arc::new(ChannelPool {
            endpoint,
            url: config.endpoint,
            timeout: config.timeout,
            idle: Arc::new(Mutex::new(idle)),
            permits: Arc::new(Semaphore::new(max)),
            closed_tx,
            closed_rx,
        }))
    }

    /// The pool's default call timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// A receiver that resolves once the pool closes
    pub fn close_signal(&self) -> watch::Receiver<bool> {
        self.closed_rx.clone()
    }

    /// Whether the pool has been closed
    pub fn is_closed(&self) -> bool {
        *self.closed_rx.borrow()
    }

    /// Channels currently sitting idle (introspection for tests/metrics)
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    /// Lease slots currently free (introspection for tests/metrics)
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Obtain a channel, waiting for a slot when the pool is at its cap.
    pub async fn lease(&self) -> Result<Lease, SdkError> {
        if self.is_closed() {
            return Err(SdkError::PoolClosed);
        }
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| SdkError::PoolClosed)?;
        // close() may have landed between the check and the acquire
        if self.is_closed() {
            return Err(SdkError::PoolClosed);
        }
        let channel = match self.idle.lock().pop() {
            Some(channel) => channel,
            None => {
                debug!(endpoint = %self.url, "opening pooled channel");
                self.endpoint.connect_lazy()
            }
        };
        Ok(Lease {
            channel,
            idle: Arc::clone(&self.idle),
            closed: self.closed_rx.clone(),
            _permit: permit,
        })
    }

    /// Close the pool: refuse future leases, wake in-flight calls through
    /// the close signal, and drop every idle channel. Channels returned
    /// after this point are discarded instead of re-entering the pool.
    pub fn close(&self) {
        let _ = self.closed_tx.send(true);
        self.permits.close();
        self.idle.lock().clear();
        debug!(endpoint = %self.url, "connection pool closed");
    }
}

/// A leased channel. Dropping the lease returns the channel to the pool
/// (or discards it when the pool closed in the meantime).
pub struct Lease {
    channel: Channel,
    idle: Arc<Mutex<Vec<Channel>>>,
    closed: watch::Receiver<bool>,
    _permit: OwnedSemaphorePermit,
}

impl Lease {
    /// The leased channel (cheap handle clone)
    pub fn channel(&self) -> Channel {
        self.channel.clone()
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        // flag is checked under the idle lock so a concurrent close()
        // cannot miss this channel
        let mut idle = self.idle.lock();
        if !*self.closed.borrow() {
            idle.push(self.channel.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_pool(max: usize) -> Arc<ChannelPool> {
        ChannelPool::new(PoolConfig {
            max_connections: max,
            timeout: Duration::from_millis(200),
            ..PoolConfig::new("http://127.0.0.1:50051")
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_initial_connections_clamped_to_cap() {
        let pool = ChannelPool::new(PoolConfig {
            initial_connections: 10,
            max_connections: 2,
            ..PoolConfig::new("http://127.0.0.1:50051")
        })
        .unwrap();
        assert_eq!(pool.idle_count(), 2);
        assert_eq!(pool.available(), 2);
    }

    #[tokio::test]
    async fn test_lease_and_return() {
        let pool = test_pool(2);
        assert_eq!(pool.available(), 2);
        assert_eq!(pool.idle_count(), 0);

        let lease = pool.lease().await.unwrap();
        assert_eq!(pool.available(), 1);
        drop(lease);

        assert_eq!(pool.available(), 2);
        assert_eq!(pool.idle_count(), 1);
    }

    #[tokio::test]
    async fn test_lease_reuses_idle_channel() {
        let pool = test_pool(2);
        drop(pool.lease().await.unwrap());
        assert_eq!(pool.idle_count(), 1);
        let _lease = pool.lease().await.unwrap();
        // the idle channel was taken, not a new one created
        assert_eq!(pool.idle_count(), 0);
    }

    #[tokio::test]
    async fn test_cap_blocks_until_return() {
        let pool = test_pool(1);
        let first = pool.lease().await.unwrap();

        let waiter = {
            let pool = Arc::clone(&pool);
            tokio::spawn(async move { pool.lease().await.map(|_| ()) })
        };
        // the second lease cannot complete while the first is out
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(first);
        waiter.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_close_refuses_leases() {
        let pool = test_pool(2);
        pool.close();
        assert!(matches!(pool.lease().await, Err(SdkError::PoolClosed)));
    }

    #[tokio::test]
    async fn test_close_wakes_waiters() {
        let pool = test_pool(1);
        let _held = pool.lease().await.unwrap();

        let waiter = {
            let pool = Arc::clone(&pool);
            tokio::spawn(async move { pool.lease().await.map(|_| ()) })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        pool.close();
        assert!(matches!(waiter.await.unwrap(), Err(SdkError::PoolClosed)));
    }

    #[tokio::test]
    async fn test_return_after_close_discards() {
        let pool = test_pool(2);
        let lease = pool.lease().await.unwrap();
        pool.close();
        drop(lease);
        assert_eq!(pool.idle_count(), 0);
    }

    #[tokio::test]
    async fn test_invariant_under_concurrency() {
        let pool = test_pool(3);
        let mut tasks = Vec::new();
        for _ in 0..20 {
            let pool = Arc::clone(&pool);
            tasks.push(tokio::spawn(async move {
                let lease = pool.lease().await.unwrap();
                tokio::time::sleep(Duration::from_millis(5)).await;
                drop(lease);
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        // leased back to zero, idle bounded by the cap
        assert_eq!(pool.available(), 3);
        assert!(pool.idle_count() <= 3);
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        assert!(ChannelPool::new(PoolConfig::new("not a url")).is_err());
    }
}
