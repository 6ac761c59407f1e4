use serde::{Deserialize, Serialize};
use shared::error::ConfigError;

pub const DEFAULT_DECLINE_PHRASES: &[&str] = &[
    "Nie",
    "Are you sure?",
    "Really sure?",
    "Think again!",
    "Last chance!",
    "Surely not?",
    "You might regret this!",
    "Give it another thought!",
    "Are you absolutely certain?",
    "This could be a mistake!",
    "Have a heart!",
    "Don't be so cold!",
    "Change of heart?",
    "Wouldn't you reconsider?",
    "Is that your final answer?",
    "You're breaking my heart ;(",
    "Plsss?",
];

/// Tuning constants for the growing-button mechanic.
///
/// `scale` is the affirmative button magnification and `emphasis` its text
/// size in rem. Both grow linearly with the rejection count up to a cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationTuning {
    pub scale_base: f32,
    pub scale_step: f32,
    pub scale_cap: f32,
    pub emphasis_base: f32,
    pub emphasis_step: f32,
    pub emphasis_cap: f32,
    pub decline_phrases: Vec<String>,
}

impl Default for PresentationTuning {
    fn default() -> Self {
        Self {
            scale_base: 1.0,
            scale_step: 0.25,
            scale_cap: 5.0,
            emphasis_base: 1.25,
            emphasis_step: 0.18,
            emphasis_cap: 3.5,
            decline_phrases: DEFAULT_DECLINE_PHRASES
                .iter()
                .map(|phrase| (*phrase).to_string())
                .collect(),
        }
    }
}

impl PresentationTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decline_phrases.is_empty() {
            return Err(ConfigError::InvalidTuning(
                "decline_phrases must contain at least one phrase".to_string(),
            ));
        }

        let curves = [
            ("scale", self.scale_base, self.scale_step, self.scale_cap),
            (
                "emphasis",
                self.emphasis_base,
                self.emphasis_step,
                self.emphasis_cap,
            ),
        ];
        for (name, base, step, cap) in curves {
            if !(base.is_finite() && step.is_finite() && cap.is_finite()) {
                return Err(ConfigError::InvalidTuning(format!(
                    "{name} coefficients must be finite"
                )));
            }
            if base <= 0.0 || step < 0.0 {
                return Err(ConfigError::InvalidTuning(format!(
                    "{name}_base must be positive and {name}_step non-negative"
                )));
            }
            if cap < base {
                return Err(ConfigError::InvalidTuning(format!(
                    "{name}_cap ({cap}) is below {name}_base ({base})"
                )));
            }
        }

        Ok(())
    }

    pub fn scale(&self, rejection_count: u64) -> f32 {
        grow(self.scale_base, self.scale_step, self.scale_cap, rejection_count)
    }

    pub fn emphasis(&self, rejection_count: u64) -> f32 {
        grow(
            self.emphasis_base,
            self.emphasis_step,
            self.emphasis_cap,
            rejection_count,
        )
    }

    /// Clamps at the last phrase once the count runs past the table.
    pub fn decline_phrase(&self, rejection_count: u64) -> &str {
        let last = self.decline_phrases.len().saturating_sub(1);
        let index = usize::try_from(rejection_count).map_or(last, |n| n.min(last));
        self.decline_phrases
            .get(index)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

fn grow(base: f32, step: f32, cap: f32, rejection_count: u64) -> f32 {
    // Past the cap the product only matters for its magnitude, so f32 loss is fine.
    (base + rejection_count as f32 * step).min(cap)
}

/// Values the presentation layer renders for one rejection count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation<'a> {
    pub scale: f32,
    pub emphasis: f32,
    pub decline_phrase: &'a str,
    pub show_hint: bool,
}

pub fn derive_presentation(tuning: &PresentationTuning, rejection_count: u64) -> Presentation<'_> {
    Presentation {
        scale: tuning.scale(rejection_count),
        emphasis: tuning.emphasis(rejection_count),
        decline_phrase: tuning.decline_phrase(rejection_count),
        show_hint: rejection_count > 0,
    }
}

#[cfg(test)]
#[path = "tests/presentation_tests.rs"]
mod tests;
