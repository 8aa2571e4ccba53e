//! Shell Executor
//!
//! Applies parsed commands to a shared store.

use tracing::debug;

use crate::cache::SharedStore;
use crate::error::Result;
use crate::shell::{Command, Reply};

/// Runs `command` against `store`, holding the lock for the whole command.
pub async fn execute(store: &SharedStore, command: Command) -> Result<Reply> {
    debug!(?command, "executing");

    let reply = match command {
        Command::Ping => Reply::Pong,
        Command::Set {
            key,
            value,
            ttl_seconds,
        } => {
            store.write().await.set(key, value, ttl_seconds);
            Reply::Ok
        }
        Command::Get(key) => Reply::Bulk(store.write().await.get(&key)),
        Command::Del(key) => Reply::Integer(store.write().await.del(&key).into()),
        Command::Clear => {
            store.write().await.clear();
            Reply::Ok
        }
        Command::Size => Reply::from_len(store.read().await.size()),
        Command::MSet(pairs) => {
            store.write().await.mset(pairs);
            Reply::Ok
        }
        Command::MGet(keys) => Reply::Array(store.write().await.mget(&keys)),
        Command::Keys => {
            let mut keys = store.read().await.keys();
            keys.sort_unstable();
            Reply::Array(keys)
        }
        Command::Cleanup => Reply::from_len(store.write().await.cleanup_expired()),
        Command::Ttl(key) => {
            let secs = store
                .read()
                .await
                .ttl(&key)
                .map_or(-1, |remaining| {
                    i64::try_from(remaining.as_secs()).unwrap_or(i64::MAX)
                });
            Reply::Integer(secs)
        }
        Command::Stats => {
            let snapshot = store.read().await.stats().snapshot();
            Reply::Json(snapshot.to_json()?)
        }
        Command::LPush { key, values } => {
            let mut guard = store.write().await;
            for value in values {
                guard.lpush(key.as_str(), value);
            }
            Reply::from_len(guard.llen(&key))
        }
        Command::RPush { key, values } => {
            let mut guard = store.write().await;
            for value in values {
                guard.rpush(key.as_str(), value);
            }
            Reply::from_len(guard.llen(&key))
        }
        Command::LPop(key) => Reply::Bulk(store.write().await.lpop(&key)),
        Command::RPop(key) => Reply::Bulk(store.write().await.rpop(&key)),
        Command::LRange { key, start, stop } => {
            Reply::Array(store.read().await.lrange(&key, start, stop))
        }
        Command::LLen(key) => Reply::from_len(store.read().await.llen(&key)),
    };

    Ok(reply)
}

/// Parses and executes one input line.
pub async fn execute_line(store: &SharedStore, line: &str) -> Result<Reply> {
    let command = Command::parse(line)?;
    execute(store, command).await
}
