// src/config/parsing.rs

use crate::errors::{Error, Result};
use byte_unit::Byte;
use std::str::FromStr;

/// Parses an optional human-readable size ("10k", "2MiB", "1024") into bytes.
pub(super) fn parse_max_size(max_size_str: Option<&str>) -> Result<Option<u64>> {
    max_size_str
        .map(|s| {
            Byte::from_str(s)
                .map(|b| b.as_u64())
                .map_err(|e| Error::Config(format!("Invalid size format: '{}' ({})", s, e)))
        })
        .transpose()
}
