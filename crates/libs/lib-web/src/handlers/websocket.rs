//! # WebSocket Handlers
//!
//! Streaming wallet balance updates.
//!
//! ## Endpoints
//!
//! - `GET /api/ws/balance?address={pubkey}` - WebSocket pushing a JSON
//!   [`BalanceUpdate`] whenever the wallet's balance changes
//!
//! ## Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:3001/api/ws/balance?address=...');
//! ws.onmessage = (event) => {
//!   const update = JSON.parse(event.data);
//!   console.log(`${update.wallet}: ${update.sol} SOL`);
//! };
//! ```

use crate::handlers::wallet::WalletQuery;
use crate::services::wallet::WalletService;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use futures_util::{SinkExt, StreamExt};
use lib_solana::balance::BalanceUpdate;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Upgrade to a balance subscription for one wallet.
///
/// The address is validated before the upgrade, so a malformed address
/// fails with a plain 400 instead of a broken socket.
pub async fn balance_websocket(
    ws: WebSocketUpgrade,
    State(wallet): State<Arc<WalletService>>,
    Query(query): Query<WalletQuery>,
) -> Response {
    let rx = match wallet.subscribe(&query.address) {
        Ok(rx) => rx,
        Err(e) => return e.into_response(),
    };

    let client_id = Uuid::new_v4().to_string();
    info!(
        client_id = %client_id,
        wallet = %query.address,
        "[WS] Balance subscription for {}",
        query.address
    );

    ws.on_upgrade(move |socket| handle_socket(socket, rx, client_id))
}

async fn handle_socket(
    socket: WebSocket,
    mut rx: watch::Receiver<BalanceUpdate>,
    client_id: String,
) {
    let (mut sender, mut receiver) = socket.split();

    // Push the current value before waiting for a change.
    let initial = rx.borrow().clone();
    if send_update(&mut sender, &initial).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    // Watcher task stopped
                    break;
                }
                let update = rx.borrow_and_update().clone();
                debug!(client_id = %client_id, lamports = update.lamports, "[WS] Pushing balance update");
                if send_update(&mut sender, &update).await.is_err() {
                    break;
                }
            }
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        warn!(client_id = %client_id, "[WS] Receive error: {}", e);
                        break;
                    }
                    // Pings are answered by axum; other messages are ignored
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    info!(client_id = %client_id, "[WS] Balance subscription closed");
}

async fn send_update(
    sender: &mut (impl SinkExt<Message, Error = axum::Error> + Unpin),
    update: &BalanceUpdate,
) -> Result<(), ()> {
    let text = serde_json::to_string(update).map_err(|_| ())?;
    sender.send(Message::Text(text.into())).await.map_err(|_| ())
}
