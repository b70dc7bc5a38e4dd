//! Game settings
//!
//! Two tiers:
//! - [`StaticSettings`]: fixed for the lifetime of the process (screen, sizes,
//!   limits, colors, scale factors)
//! - [`DynamicSettings`]: speeds, fire limit and points value; reset to the
//!   baseline at every new game and scaled up at every level-up
//!
//! The live dynamic values are private to [`Settings`] and can only change
//! through [`Settings::reset_dynamic`] and [`Settings::increase_speed`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

/// An RGB color for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Settings that never change once the process is running
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticSettings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub bg_color: Rgb,

    // === Ship ===
    /// Lives granted at the start of a game
    pub ship_limit: u32,
    pub ship_width: f32,
    pub ship_height: f32,

    // === Projectiles ===
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_color: Rgb,

    // === Fleet ===
    pub member_width: f32,
    pub member_height: f32,
    /// Pixels the whole fleet drops when it hits a screen edge
    pub fleet_drop_speed: f32,

    // === Level-up ===
    /// Multiplier applied to speeds and fire limit at each level-up (> 1)
    pub speedup_scale: f32,
    /// Multiplier applied to the points value at each level-up (>= 1)
    pub score_scale: f32,
}

impl Default for StaticSettings {
    fn default() -> Self {
        Self {
            screen_width: 1200.0,
            screen_height: 800.0,
            bg_color: Rgb(154, 228, 245),

            ship_limit: 3,
            ship_width: 60.0,
            ship_height: 48.0,

            projectile_width: 3.0,
            projectile_height: 15.0,
            projectile_color: Rgb(60, 60, 60),

            member_width: 60.0,
            member_height: 58.0,
            fleet_drop_speed: 5.0,

            speedup_scale: 1.5,
            score_scale: 1.0,
        }
    }
}

impl StaticSettings {
    pub fn ship_size(&self) -> Vec2 {
        Vec2::new(self.ship_width, self.ship_height)
    }

    pub fn projectile_size(&self) -> Vec2 {
        Vec2::new(self.projectile_width, self.projectile_height)
    }

    pub fn member_size(&self) -> Vec2 {
        Vec2::new(self.member_width, self.member_height)
    }
}

/// Settings that change as the game progresses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicSettings {
    /// Ship pixels per tick
    pub ship_speed: f32,
    /// Projectile pixels per tick (upward)
    pub projectile_speed: f32,
    /// Fleet pixels per tick (horizontal)
    pub fleet_speed: f32,
    /// Maximum live projectiles; fractional once scaled
    pub fire_limit: f32,
    /// Points per destroyed fleet member
    pub alien_points: u64,
}

impl Default for DynamicSettings {
    fn default() -> Self {
        Self {
            ship_speed: 2.5,
            projectile_speed: 5.0,
            fleet_speed: 1.5,
            fire_limit: 3.0,
            alien_points: 50,
        }
    }
}

impl DynamicSettings {
    /// Copy with speeds and fire limit multiplied by `speedup` and the points
    /// value multiplied by `score_scale` (truncated to whole points)
    pub fn scaled(&self, speedup: f32, score_scale: f32) -> Self {
        Self {
            ship_speed: self.ship_speed * speedup,
            projectile_speed: self.projectile_speed * speedup,
            fleet_speed: self.fleet_speed * speedup,
            fire_limit: self.fire_limit * speedup,
            alien_points: (self.alien_points as f64 * score_scale as f64) as u64,
        }
    }
}

/// Complete settings: static tier, dynamic baseline and the live dynamic values
///
/// Only the static tier and baseline are serialized; deserializing starts the
/// live tier from the baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "SettingsDocument")]
pub struct Settings {
    #[serde(rename = "static")]
    pub statics: StaticSettings,
    /// Values the dynamic tier is reset to at each new game
    pub baseline: DynamicSettings,
    #[serde(skip)]
    dynamic: DynamicSettings,
}

/// On-disk shape of [`Settings`]
#[derive(Default, Deserialize)]
#[serde(default)]
struct SettingsDocument {
    #[serde(rename = "static")]
    statics: StaticSettings,
    baseline: DynamicSettings,
}

impl From<SettingsDocument> for Settings {
    fn from(doc: SettingsDocument) -> Self {
        Self::new(doc.statics, doc.baseline)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(StaticSettings::default(), DynamicSettings::default())
    }
}

impl Settings {
    pub fn new(statics: StaticSettings, baseline: DynamicSettings) -> Self {
        Self {
            statics,
            baseline,
            dynamic: baseline,
        }
    }

    /// Current dynamic values
    #[inline]
    pub fn dynamic(&self) -> &DynamicSettings {
        &self.dynamic
    }

    /// Restore the dynamic tier to the baseline (new game)
    pub fn reset_dynamic(&mut self) {
        self.dynamic = self.baseline;
    }

    /// Scale the dynamic tier up by the fixed factors (level-up)
    pub fn increase_speed(&mut self) {
        self.dynamic = self
            .dynamic
            .scaled(self.statics.speedup_scale, self.statics.score_scale);
        log::debug!(
            "Speed increased: ship {:.2}, projectile {:.2}, fleet {:.2}, fire limit {:.2}, points {}",
            self.dynamic.ship_speed,
            self.dynamic.projectile_speed,
            self.dynamic.fleet_speed,
            self.dynamic.fire_limit,
            self.dynamic.alien_points
        );
    }

    /// Parse and validate settings from a JSON document
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Serialize the static tier and baseline to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that these settings keep every simulation invariant satisfiable
    pub fn validate(&self) -> Result<()> {
        let s = &self.statics;
        let b = &self.baseline;

        let positives = [
            ("screen_width", s.screen_width),
            ("screen_height", s.screen_height),
            ("ship_width", s.ship_width),
            ("ship_height", s.ship_height),
            ("projectile_width", s.projectile_width),
            ("projectile_height", s.projectile_height),
            ("member_width", s.member_width),
            ("member_height", s.member_height),
            ("fleet_drop_speed", s.fleet_drop_speed),
            ("ship_speed", b.ship_speed),
            ("projectile_speed", b.projectile_speed),
            ("fleet_speed", b.fleet_speed),
        ];
        for (field, value) in positives {
            // Written this way so NaN is rejected too
            if !(value > 0.0) {
                return Err(SettingsError::NotPositive { field, value });
            }
        }

        if !(s.speedup_scale > 1.0) {
            return Err(SettingsError::SpeedupTooSmall(s.speedup_scale));
        }
        if !(s.score_scale >= 1.0) {
            return Err(SettingsError::ScoreScaleTooSmall(s.score_scale));
        }
        if s.ship_limit == 0 {
            return Err(SettingsError::NoLives);
        }
        if !(b.fire_limit >= 1.0) {
            return Err(SettingsError::FireLimitTooLow(b.fire_limit));
        }
        if s.ship_width > s.screen_width {
            return Err(SettingsError::ShipTooWide {
                ship_width: s.ship_width,
                width: s.screen_width,
            });
        }

        // First column/row of the layout must fit inside the layout margins
        let fits_column = s.member_width < s.screen_width - 2.0 * s.member_width;
        let fits_row = 1.75 * s.member_height < s.screen_height - 12.0 * s.member_height;
        if !fits_column || !fits_row {
            return Err(SettingsError::ScreenTooSmall {
                width: s.screen_width,
                height: s.screen_height,
                member_width: s.member_width,
                member_height: s.member_height,
            });
        }

        Ok(())
    }
}
