#[cfg(test)]
#[path = "generation_test.rs"]
mod tests;

use std::ops::RangeInclusive;

use serde::Deserialize;
use serde::Serialize;

pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const MAX_TOKENS_RANGE: RangeInclusive<u32> = 50..=500;

/// Sampling options sent with every request. Values are passed through to
/// the backend untouched, callers clamp at the input boundary.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> GenerationSettings {
        return GenerationSettings {
            temperature: 0.7,
            max_tokens: 150,
        };
    }
}

impl GenerationSettings {
    pub fn new(temperature: f32, max_tokens: u32) -> GenerationSettings {
        return GenerationSettings {
            temperature,
            max_tokens,
        };
    }

    /// Clamps to the slider range and snaps to the nearest 0.1 step.
    pub fn clamp_temperature(value: f32) -> f32 {
        if value.is_nan() {
            return GenerationSettings::default().temperature;
        }

        let clamped = value.clamp(*TEMPERATURE_RANGE.start(), *TEMPERATURE_RANGE.end());
        return ((f64::from(clamped) * 10.0).round() / 10.0) as f32;
    }

    pub fn clamp_max_tokens(value: i64) -> u32 {
        let clamped = value.clamp(
            i64::from(*MAX_TOKENS_RANGE.start()),
            i64::from(*MAX_TOKENS_RANGE.end()),
        );
        return u32::try_from(clamped).unwrap_or(*MAX_TOKENS_RANGE.start());
    }

    pub fn clamped(temperature: f32, max_tokens: i64) -> GenerationSettings {
        return GenerationSettings {
            temperature: GenerationSettings::clamp_temperature(temperature),
            max_tokens: GenerationSettings::clamp_max_tokens(max_tokens),
        };
    }
}
