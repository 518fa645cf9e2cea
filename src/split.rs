// src/split.rs

//! Deterministic sharding of matched paths across CI job agents.
//!
//! Every agent computes the same changed-path list, splits it the same way
//! and then only runs its own shard, so the assignment must depend on
//! nothing but the input order and the number of shards.

use crate::errors::{RadishError, Result};

/// How to split: the number of shards, and optionally which one to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSpec {
    pub splits: usize,
    pub index: Option<usize>,
}

impl Default for SplitSpec {
    fn default() -> Self {
        Self {
            splits: 1,
            index: None,
        }
    }
}

impl SplitSpec {
    /// Parse the raw `--jobs` / `--job` values.
    ///
    /// Absent or blank values fall back to the defaults (one split, no
    /// index), so CI templates that render an empty `--job=` still work.
    pub fn parse(splits: Option<&str>, index: Option<&str>) -> Result<Self> {
        let splits = parse_count(splits, "number of splits")?.unwrap_or(1);
        let index = parse_count(index, "split index")?;

        if splits == 0 {
            return Err(RadishError::InvalidSplit(
                "number of splits must be >= 1 (got 0)".to_string(),
            ));
        }
        if let Some(index) = index {
            if splits > 1 && index >= splits {
                return Err(RadishError::InvalidSplit(format!(
                    "split index {index} is out of range for {splits} splits (0-indexed)"
                )));
            }
        }

        Ok(Self { splits, index })
    }
}

fn parse_count(value: Option<&str>, what: &str) -> Result<Option<usize>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse::<usize>().map(Some).map_err(|_| {
            RadishError::InvalidSplit(format!("{what} must be a non-negative integer, got {v:?}"))
        }),
    }
}

/// Outcome of [`split`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Split<T> {
    /// One split requested: the input, untouched.
    Whole(Vec<T>),
    /// Every shard, indexed by shard number.
    Shards(Vec<Vec<T>>),
    /// The single shard that was asked for.
    Shard(Vec<T>),
}

pub fn split<T>(items: Vec<T>, spec: SplitSpec) -> Split<T> {
    if spec.splits == 1 {
        return Split::Whole(items);
    }

    let mut shards = split_consistently(items, spec.splits);
    match spec.index {
        Some(index) if index < shards.len() => Split::Shard(shards.swap_remove(index)),
        Some(_) => Split::Shard(Vec::new()),
        None => Split::Shards(shards),
    }
}

/// Round-robin `items` into `splits` buckets: item `i` lands in bucket
/// `i % splits`, keeping relative order. Always returns `splits` buckets.
pub fn split_consistently<T>(items: Vec<T>, splits: usize) -> Vec<Vec<T>> {
    let splits = splits.max(1);
    let mut buckets: Vec<Vec<T>> = (0..splits).map(|_| Vec::new()).collect();

    for (i, item) in items.into_iter().enumerate() {
        buckets[i % splits].push(item);
    }

    buckets
}
