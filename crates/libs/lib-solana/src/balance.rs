//! # Wallet Balance Watcher
//!
//! Polls a balance source for a wallet's lamport balance and publishes
//! changes over a `tokio::sync::watch` channel. WebSocket handlers subscribe
//! a receiver per connection; the polling task stops on its own once every
//! receiver is gone.

use crate::client::SolanaClient;
use crate::filters::LAMPORTS_PER_SOL;
use async_trait::async_trait;
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::Duration;
use tracing::{debug, warn};

/// Where lamport balances come from. The RPC client is the production
/// implementation; tests substitute a scripted one.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn lamports(&self, wallet: &Pubkey) -> anyhow::Result<u64>;
}

#[async_trait]
impl BalanceSource for SolanaClient {
    async fn lamports(&self, wallet: &Pubkey) -> anyhow::Result<u64> {
        self.get_balance(wallet).await
    }
}

/// A balance observation pushed to subscribers.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceUpdate {
    pub wallet: String,
    pub lamports: u64,
    pub sol: f64,
}

impl BalanceUpdate {
    pub fn new(wallet: String, lamports: u64) -> Self {
        Self {
            wallet,
            lamports,
            sol: lamports as f64 / LAMPORTS_PER_SOL as f64,
        }
    }
}

/// Spawns per-wallet polling tasks.
pub struct BalanceWatcher {
    source: Arc<dyn BalanceSource>,
    poll_interval: Duration,
}

impl BalanceWatcher {
    /// # Arguments
    ///
    /// * `poll_interval` - How often to query the source (2-5s is plenty;
    ///   public RPC endpoints rate-limit around 10 req/sec)
    pub fn new(source: Arc<dyn BalanceSource>, poll_interval: Duration) -> Self {
        Self {
            source,
            poll_interval,
        }
    }

    /// Start watching a wallet.
    ///
    /// The returned receiver holds the latest observation; `changed()`
    /// resolves whenever the balance moves. The first real observation
    /// replaces the zero seed even when the balance is unchanged on-chain.
    pub fn watch(&self, wallet: Pubkey) -> watch::Receiver<BalanceUpdate> {
        let (tx, rx) = watch::channel(BalanceUpdate::new(wallet.to_string(), 0));
        let source = Arc::clone(&self.source);
        let poll_interval = self.poll_interval;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            let mut last: Option<u64> = None;

            loop {
                interval.tick().await;

                if tx.is_closed() {
                    debug!("[BALANCE] All subscribers gone for {}, stopping", wallet);
                    break;
                }

                match source.lamports(&wallet).await {
                    Ok(lamports) => {
                        if last != Some(lamports) {
                            last = Some(lamports);
                            if tx
                                .send(BalanceUpdate::new(wallet.to_string(), lamports))
                                .is_err()
                            {
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        // Transient RPC failures keep the last good value
                        warn!("[BALANCE] Poll failed for {}: {}", wallet, e);
                    }
                }
            }
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::time::timeout;

    /// Replays a fixed sequence of observations, then repeats the last one.
    struct ScriptedSource {
        observations: Mutex<VecDeque<anyhow::Result<u64>>>,
        repeat: u64,
    }

    impl ScriptedSource {
        fn new(observations: Vec<anyhow::Result<u64>>, repeat: u64) -> Arc<Self> {
            Arc::new(Self {
                observations: Mutex::new(observations.into()),
                repeat,
            })
        }
    }

    #[async_trait]
    impl BalanceSource for ScriptedSource {
        async fn lamports(&self, _wallet: &Pubkey) -> anyhow::Result<u64> {
            let mut queue = self.observations.lock().unwrap();
            queue.pop_front().unwrap_or(Ok(self.repeat))
        }
    }

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_balance_update_converts_to_sol() {
        let update = BalanceUpdate::new("wallet".to_string(), 2_500_000_000);
        assert_eq!(update.lamports, 2_500_000_000);
        assert!((update.sol - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_balance_update_serializes() {
        let update = BalanceUpdate::new("abc".to_string(), LAMPORTS_PER_SOL);
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["wallet"], "abc");
        assert_eq!(json["lamports"], 1_000_000_000u64);
        assert_eq!(json["sol"], 1.0);
    }

    #[tokio::test]
    async fn test_watch_publishes_only_on_change() {
        // Arrange: two identical observations, then a higher one
        let source = ScriptedSource::new(
            vec![
                Ok(LAMPORTS_PER_SOL),
                Ok(LAMPORTS_PER_SOL),
                Ok(3 * LAMPORTS_PER_SOL),
            ],
            3 * LAMPORTS_PER_SOL,
        );
        let watcher = BalanceWatcher::new(source, Duration::from_millis(1));

        // Act
        let mut rx = watcher.watch(Pubkey::new_unique());

        // Assert: the first observation replaces the zero seed
        timeout(WAIT, rx.changed()).await.unwrap().unwrap();
        assert_eq!(rx.borrow_and_update().lamports, LAMPORTS_PER_SOL);

        // The duplicate observation is swallowed; the next change is the jump
        timeout(WAIT, rx.changed()).await.unwrap().unwrap();
        assert_eq!(rx.borrow_and_update().lamports, 3 * LAMPORTS_PER_SOL);
    }

    #[tokio::test]
    async fn test_watch_keeps_last_value_through_poll_failures() {
        // Arrange: one good observation, then nothing but errors
        let source = ScriptedSource::new(
            vec![Ok(7 * LAMPORTS_PER_SOL), Err(anyhow::anyhow!("rpc down"))],
            7 * LAMPORTS_PER_SOL,
        );
        // Long enough for several failed polls inside the quiet window below
        let watcher = BalanceWatcher::new(source, Duration::from_millis(1));

        // Act
        let mut rx = watcher.watch(Pubkey::new_unique());
        timeout(WAIT, rx.changed()).await.unwrap().unwrap();
        assert_eq!(rx.borrow_and_update().lamports, 7 * LAMPORTS_PER_SOL);

        // Assert: failures and repeats of the same value publish nothing
        let no_change = timeout(Duration::from_millis(50), rx.changed()).await;
        assert!(no_change.is_err());
        assert_eq!(rx.borrow().lamports, 7 * LAMPORTS_PER_SOL);
    }

    #[tokio::test]
    async fn test_receiver_seeds_at_zero_before_first_poll() {
        // Arrange
        let source = ScriptedSource::new(vec![], LAMPORTS_PER_SOL);
        let watcher = BalanceWatcher::new(source, Duration::from_secs(3600));

        // Act: at a one-hour interval no poll has completed yet
        let rx = watcher.watch(Pubkey::new_unique());

        // Assert
        assert_eq!(rx.borrow().lamports, 0);
        assert_eq!(rx.borrow().sol, 0.0);
    }
}
