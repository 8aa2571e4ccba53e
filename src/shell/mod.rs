//! Shell Module
//!
//! Line-oriented command surface a host uses to drive a [`SharedStore`](crate::cache::SharedStore).
//!
//! # Commands
//! - `SET key value [ttl]`, `GET key`, `DEL key`, `CLEAR`, `SIZE`
//! - `MSET k v [k v ...]`, `MGET k [k ...]`, `KEYS`, `CLEANUP`, `TTL key`, `STATS`
//! - `LPUSH|RPUSH key v [v ...]`, `LPOP|RPOP key`, `LRANGE key start stop`, `LLEN key`

mod command;
mod executor;
mod reply;

pub use command::{tokenize, Command};
pub use executor::{execute, execute_line};
pub use reply::Reply;
