//! Command classification tables
//!
//! Every dispatchable command name must appear in exactly one of the two
//! compiled-in tables. A name absent from both is rejected with
//! [`RouterError::UnknownCommand`] before any network interaction.

use serde::{Deserialize, Serialize};

use crate::error::RouterError;

/// Dispatch class of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandClass {
    /// Served by a rotating replica, falling back to the primary.
    ReadOnly,

    /// Always served by the primary.
    ReadWrite,
}

/// Commands that never mutate the store. Sorted for binary search.
pub const READ_ONLY_COMMANDS: &[&str] = &[
    "bitcount",
    "bitpos",
    "dump",
    "echo",
    "exists",
    "georadius",
    "georadiusbymember",
    "get",
    "getbit",
    "getrange",
    "hexists",
    "hget",
    "hgetall",
    "hkeys",
    "hlen",
    "hmget",
    "hstrlen",
    "hvals",
    "keys",
    "lindex",
    "llen",
    "lrange",
    "mget",
    "pfcount",
    "pttl",
    "randomkey",
    "scard",
    "sdiff",
    "sdiffstore",
    "sinter",
    "sismember",
    "smembers",
    "srandmember",
    "strlen",
    "sunion",
    "ttl",
    "type",
    "zcard",
    "zcount",
    "zlexcount",
    "zrange",
    "zrangebylex",
    "zrangebyscore",
    "zrank",
    "zrevrange",
    "zrevrangebylex",
    "zrevrangebyscore",
    "zrevrank",
    "zscore",
];

/// Commands that may mutate the store. Sorted for binary search.
pub const READ_WRITE_COMMANDS: &[&str] = &[
    "append",
    "bitop",
    "blpop",
    "brpop",
    "brpoplpush",
    "decr",
    "decrby",
    "del",
    "expire",
    "expireat",
    "flushall",
    "flushdb",
    "geoadd",
    "getset",
    "hdel",
    "hincrby",
    "hincrbyfloat",
    "hmset",
    "hset",
    "hsetnx",
    "incr",
    "incrby",
    "incrbyfloat",
    "linsert",
    "lpop",
    "lpush",
    "lpushx",
    "lrem",
    "lset",
    "ltrim",
    "move",
    "mset",
    "msetnx",
    "persist",
    "pexpire",
    "pexpireat",
    "pfadd",
    "pfmerge",
    "psetex",
    "rename",
    "renamenx",
    "restore",
    "rpop",
    "rpoplpush",
    "rpush",
    "rpushx",
    "sadd",
    "set",
    "setbit",
    "setex",
    "setnx",
    "setrange",
    "sinterstore",
    "smove",
    "sort",
    "spop",
    "srem",
    "sunionstore",
    "zadd",
    "zincrby",
    "zinterstore",
    "zrem",
    "zremrangebylex",
    "zremrangebyrank",
    "zremrangebyscore",
    "zunionstore",
];

/// Classify a command name, case-insensitively on ASCII.
///
/// Returns [`RouterError::UnknownCommand`] when the name is in neither table.
pub fn classify(name: &str) -> Result<CommandClass, RouterError> {
    let lowered = name.to_ascii_lowercase();
    if READ_ONLY_COMMANDS.binary_search(&lowered.as_str()).is_ok() {
        Ok(CommandClass::ReadOnly)
    } else if READ_WRITE_COMMANDS.binary_search(&lowered.as_str()).is_ok() {
        Ok(CommandClass::ReadWrite)
    } else {
        Err(RouterError::UnknownCommand(lowered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sorted_unique(table: &[&str]) {
        for pair in table.windows(2) {
            assert!(pair[0] < pair[1], "{} >= {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn tables_are_sorted_and_unique() {
        assert_sorted_unique(READ_ONLY_COMMANDS);
        assert_sorted_unique(READ_WRITE_COMMANDS);
    }

    #[test]
    fn tables_are_disjoint() {
        for name in READ_ONLY_COMMANDS {
            assert!(
                READ_WRITE_COMMANDS.binary_search(name).is_err(),
                "{} appears in both tables",
                name
            );
        }
    }

    #[test]
    fn every_listed_command_classifies() {
        for name in READ_ONLY_COMMANDS {
            assert_eq!(classify(name).unwrap(), CommandClass::ReadOnly);
        }
        for name in READ_WRITE_COMMANDS {
            assert_eq!(classify(name).unwrap(), CommandClass::ReadWrite);
        }
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("GET").unwrap(), CommandClass::ReadOnly);
        assert_eq!(classify("HGetAll").unwrap(), CommandClass::ReadOnly);
        assert_eq!(classify("SET").unwrap(), CommandClass::ReadWrite);
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = classify("frobnicate").unwrap_err();
        assert!(matches!(err, RouterError::UnknownCommand(ref name) if name == "frobnicate"));
    }

    #[test]
    fn admin_commands_are_not_listed() {
        // Commands outside the dispatch surface stay reachable only via
        // explicit primary/replica targeting.
        assert!(classify("ping").is_err());
        assert!(classify("info").is_err());
    }
}
