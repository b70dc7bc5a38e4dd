//! Error types
//!
//! The simulation itself never fails; only configuration loading and
//! validation can.

use thiserror::Error;

/// Settings loading and validation errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Malformed settings document
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A size or speed that must be strictly positive was not
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    /// Level-up speed factor must grow every level
    #[error("speedup_scale must be greater than 1, got {0}")]
    SpeedupTooSmall(f32),

    /// Level-up score factor must not shrink the points value
    #[error("score_scale must be at least 1, got {0}")]
    ScoreScaleTooSmall(f32),

    /// At least one life is needed to play
    #[error("ship_limit must be at least 1")]
    NoLives,

    /// At least one projectile must be allowed on screen
    #[error("fire_limit must be at least 1, got {0}")]
    FireLimitTooLow(f32),

    /// The screen cannot hold a single fleet member with the layout margins
    #[error("Screen {width}x{height} is too small for a fleet of {member_width}x{member_height} members")]
    ScreenTooSmall {
        width: f32,
        height: f32,
        member_width: f32,
        member_height: f32,
    },

    /// The ship does not fit horizontally on screen
    #[error("Ship width {ship_width} exceeds screen width {width}")]
    ShipTooWide { ship_width: f32, width: f32 },
}

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;
