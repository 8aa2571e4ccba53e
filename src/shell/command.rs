//! Shell Commands
//!
//! Parses one text line into a store operation.

use crate::error::{Result, ShellError};

/// One store operation requested from the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ping,
    Set {
        key: String,
        value: String,
        ttl_seconds: i64,
    },
    Get(String),
    Del(String),
    Clear,
    Size,
    MSet(Vec<(String, String)>),
    MGet(Vec<String>),
    Keys,
    Cleanup,
    Ttl(String),
    Stats,
    LPush {
        key: String,
        values: Vec<String>,
    },
    RPush {
        key: String,
        values: Vec<String>,
    },
    LPop(String),
    RPop(String),
    LRange {
        key: String,
        start: i64,
        stop: i64,
    },
    LLen(String),
}

impl Command {
    /// Parses a command line such as `SET greeting "hello world" 30`.
    ///
    /// Verbs are case-insensitive; arguments keep their case.
    pub fn parse(line: &str) -> Result<Command> {
        let mut tokens = tokenize(line)?.into_iter();
        let verb = tokens.next().ok_or(ShellError::Empty)?.to_uppercase();
        let args: Vec<String> = tokens.collect();

        let arity = |ok: bool| {
            if ok {
                Ok(())
            } else {
                Err(ShellError::WrongArity(verb.clone()))
            }
        };

        let cmd = match verb.as_str() {
            "PING" => {
                arity(args.is_empty())?;
                Command::Ping
            }
            "SET" => {
                arity(args.len() == 2 || args.len() == 3)?;
                let ttl_seconds = args.get(2).map(|t| parse_int(t)).transpose()?.unwrap_or(0);
                let mut args = args.into_iter();
                Command::Set {
                    key: next(&mut args),
                    value: next(&mut args),
                    ttl_seconds,
                }
            }
            "GET" => {
                arity(args.len() == 1)?;
                Command::Get(single(args))
            }
            "DEL" => {
                arity(args.len() == 1)?;
                Command::Del(single(args))
            }
            "CLEAR" | "FLUSHDB" => {
                arity(args.is_empty())?;
                Command::Clear
            }
            "SIZE" | "DBSIZE" => {
                arity(args.is_empty())?;
                Command::Size
            }
            "MSET" => {
                arity(!args.is_empty() && args.len() % 2 == 0)?;
                let mut args = args.into_iter();
                let mut pairs = Vec::new();
                while let (Some(key), Some(value)) = (args.next(), args.next()) {
                    pairs.push((key, value));
                }
                Command::MSet(pairs)
            }
            "MGET" => {
                arity(!args.is_empty())?;
                Command::MGet(args)
            }
            "KEYS" => {
                arity(args.is_empty())?;
                Command::Keys
            }
            "CLEANUP" | "SWEEP" => {
                arity(args.is_empty())?;
                Command::Cleanup
            }
            "TTL" => {
                arity(args.len() == 1)?;
                Command::Ttl(single(args))
            }
            "STATS" => {
                arity(args.is_empty())?;
                Command::Stats
            }
            "LPUSH" | "RPUSH" => {
                arity(args.len() >= 2)?;
                let mut args = args.into_iter();
                let key = next(&mut args);
                let values = args.collect();
                if verb == "LPUSH" {
                    Command::LPush { key, values }
                } else {
                    Command::RPush { key, values }
                }
            }
            "LPOP" => {
                arity(args.len() == 1)?;
                Command::LPop(single(args))
            }
            "RPOP" => {
                arity(args.len() == 1)?;
                Command::RPop(single(args))
            }
            "LRANGE" => {
                arity(args.len() == 3)?;
                let start = parse_int(&args[1])?;
                let stop = parse_int(&args[2])?;
                Command::LRange {
                    key: single(args),
                    start,
                    stop,
                }
            }
            "LLEN" => {
                arity(args.len() == 1)?;
                Command::LLen(single(args))
            }
            _ => return Err(ShellError::UnknownCommand(verb.clone())),
        };

        Ok(cmd)
    }
}

// Callers check arity before taking arguments.
fn next(args: &mut impl Iterator<Item = String>) -> String {
    args.next().unwrap_or_default()
}

fn single(args: Vec<String>) -> String {
    next(&mut args.into_iter())
}

fn parse_int(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| ShellError::InvalidInteger(raw.to_string()))
}

/// Splits a line on whitespace, honouring single and double quotes and
/// backslash escapes inside quotes.
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) if c == '\\' => match chars.next() {
                Some('n') => current.push('\n'),
                Some('t') => current.push('\t'),
                Some(other) => current.push(other),
                None => return Err(ShellError::UnterminatedQuote),
            },
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(ShellError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}
