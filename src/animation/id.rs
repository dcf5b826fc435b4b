//! Stable animation identifiers.

use core::fmt;

/// Known animation ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnimationId {
    Static,
    Blink,
    Breathe,
    Wipe,
    WipeRandom,
    RandomColors,
    Sweep,
    Dynamic,
    Colorloop,
    Rainbow,
    Scan,
    ScanDual,
    Fade,
    TheaterChase,
    TheaterChaseRainbow,
    Twinkle,
    Sparkle,
    SparkleDark,
    SparklePlus,
    Strobe,
    BlinkRainbow,
    Running,
    RunningColor,
    RunningRedBlue,
    RunningRandom,
    LarsonScanner,
    ChaseFlash,
    ChaseRainbowWhite,
    ChaseBlackout,
    ChaseBlackoutRainbow,
    FireFlicker,
    Comet,
    MeteorShower,
    Fireworks,
    Saw,
    Rain,
    Dissolve,
    DissolveRandom,
    Gradient,
}

/// Grouping used when presenting animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationCategory {
    Basic,
    SparkleTwinkle,
    ChaseRunning,
    FireHeat,
    CometMeteor,
    Fireworks,
    WaveMotion,
    PhysicsSimulation,
    GradientBlend,
}

impl AnimationCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::SparkleTwinkle => "Sparkle & Twinkle",
            Self::ChaseRunning => "Chase & Running",
            Self::FireHeat => "Fire & Heat",
            Self::CometMeteor => "Comet & Meteor",
            Self::Fireworks => "Fireworks & Explosions",
            Self::WaveMotion => "Wave & Motion",
            Self::PhysicsSimulation => "Physics & Simulation",
            Self::GradientBlend => "Gradient & Blend",
        }
    }
}

impl AnimationId {
    pub const ALL: [Self; 39] = [
        Self::Static,
        Self::Blink,
        Self::Breathe,
        Self::Wipe,
        Self::WipeRandom,
        Self::RandomColors,
        Self::Sweep,
        Self::Dynamic,
        Self::Colorloop,
        Self::Rainbow,
        Self::Scan,
        Self::ScanDual,
        Self::Fade,
        Self::TheaterChase,
        Self::TheaterChaseRainbow,
        Self::Twinkle,
        Self::Sparkle,
        Self::SparkleDark,
        Self::SparklePlus,
        Self::Strobe,
        Self::BlinkRainbow,
        Self::Running,
        Self::RunningColor,
        Self::RunningRedBlue,
        Self::RunningRandom,
        Self::LarsonScanner,
        Self::ChaseFlash,
        Self::ChaseRainbowWhite,
        Self::ChaseBlackout,
        Self::ChaseBlackoutRainbow,
        Self::FireFlicker,
        Self::Comet,
        Self::MeteorShower,
        Self::Fireworks,
        Self::Saw,
        Self::Rain,
        Self::Dissolve,
        Self::DissolveRandom,
        Self::Gradient,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Blink => "blink",
            Self::Breathe => "breathe",
            Self::Wipe => "wipe",
            Self::WipeRandom => "wipe_random",
            Self::RandomColors => "random_colors",
            Self::Sweep => "sweep",
            Self::Dynamic => "dynamic",
            Self::Colorloop => "colorloop",
            Self::Rainbow => "rainbow",
            Self::Scan => "scan",
            Self::ScanDual => "scan_dual",
            Self::Fade => "fade",
            Self::TheaterChase => "theater_chase",
            Self::TheaterChaseRainbow => "theater_chase_rainbow",
            Self::Twinkle => "twinkle",
            Self::Sparkle => "sparkle",
            Self::SparkleDark => "sparkle_dark",
            Self::SparklePlus => "sparkle_plus",
            Self::Strobe => "strobe",
            Self::BlinkRainbow => "blink_rainbow",
            Self::Running => "running",
            Self::RunningColor => "running_color",
            Self::RunningRedBlue => "running_red_blue",
            Self::RunningRandom => "running_random",
            Self::LarsonScanner => "larson_scanner",
            Self::ChaseFlash => "chase_flash",
            Self::ChaseRainbowWhite => "chase_rainbow_white",
            Self::ChaseBlackout => "chase_blackout",
            Self::ChaseBlackoutRainbow => "chase_blackout_rainbow",
            Self::FireFlicker => "fire_flicker",
            Self::Comet => "comet",
            Self::MeteorShower => "meteor_shower",
            Self::Fireworks => "fireworks",
            Self::Saw => "saw",
            Self::Rain => "rain",
            Self::Dissolve => "dissolve",
            Self::DissolveRandom => "dissolve_random",
            Self::Gradient => "gradient",
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }

    /// Title-cased name, e.g. "Theater Chase Rainbow"
    pub fn display_name(self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub const fn category(self) -> AnimationCategory {
        match self {
            Self::Static
            | Self::Blink
            | Self::Breathe
            | Self::Wipe
            | Self::WipeRandom
            | Self::RandomColors
            | Self::Sweep
            | Self::Dynamic
            | Self::Colorloop
            | Self::Rainbow
            | Self::Scan
            | Self::ScanDual
            | Self::Fade
            | Self::TheaterChase
            | Self::TheaterChaseRainbow => AnimationCategory::Basic,
            Self::Twinkle
            | Self::Sparkle
            | Self::SparkleDark
            | Self::SparklePlus
            | Self::Strobe
            | Self::BlinkRainbow => AnimationCategory::SparkleTwinkle,
            Self::Running
            | Self::RunningColor
            | Self::RunningRedBlue
            | Self::RunningRandom
            | Self::LarsonScanner
            | Self::ChaseFlash
            | Self::ChaseRainbowWhite
            | Self::ChaseBlackout
            | Self::ChaseBlackoutRainbow => AnimationCategory::ChaseRunning,
            Self::FireFlicker => AnimationCategory::FireHeat,
            Self::Comet | Self::MeteorShower => AnimationCategory::CometMeteor,
            Self::Fireworks => AnimationCategory::Fireworks,
            Self::Saw | Self::Rain => AnimationCategory::WaveMotion,
            Self::Dissolve | Self::DissolveRandom => AnimationCategory::PhysicsSimulation,
            Self::Gradient => AnimationCategory::GradientBlend,
        }
    }

    /// Whether the effect needs a 2D matrix layout
    pub const fn requires_2d(self) -> bool {
        false
    }

    /// Whether the effect reacts to an audio input
    pub const fn requires_audio(self) -> bool {
        false
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
