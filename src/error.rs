// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Errors surfaced by the library API.
//!
//! Malformed chapter or segment lists are never errors (they are filtered),
//! and duration-dependent queries degrade to sentinels. Only configuration
//! setters given an impossible value are rejected.

use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeBarError {
    #[error("key count increment must be positive, got {0}")]
    InvalidKeyCountIncrement(u32),

    #[error("key time increment must be positive, got {0}ms")]
    InvalidKeyTimeIncrement(i64),

    #[error("thumbnail frame duration must be positive, got {0}ms")]
    InvalidFrameDuration(i64),

    #[error("storyboard grid must have at least one tile, got {columns}x{rows}")]
    InvalidStoryboardGrid { columns: u32, rows: u32 },
}

pub type Result<T> = std::result::Result<T, TimeBarError>;
