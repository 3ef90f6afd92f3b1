use serde::{Serialize, Deserialize};

/// Hyperparameters shared by every optimizer run.
///
/// # Fields
/// - `epochs`        — full-batch passes over the dataset
/// - `learning_rate` — η handed to the update rule
/// - `log_every`     — MSE is recorded on epochs divisible by this
/// - `init_range`    — initial weights are uniform in [-init_range, init_range]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub log_every: usize,
    pub init_range: f64,
}

impl TrainConfig {
    pub const DEFAULT_EPOCHS: usize = 10_000;
    pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
    pub const DEFAULT_LOG_EVERY: usize = 100;
    pub const DEFAULT_INIT_RANGE: f64 = 0.5;

    /// Builds a config from the raw positional arguments. Missing,
    /// unparsable or non-positive values fall back to the defaults.
    ///
    /// Epochs are read from the leading integer of the argument, so `"2.5"`
    /// means 2 epochs.
    pub fn from_args(epochs: Option<&str>, learning_rate: Option<&str>) -> TrainConfig {
        let defaults = TrainConfig::default();
        let epochs = epochs
            .and_then(leading_integer)
            .filter(|&n| n > 0)
            .map_or(defaults.epochs, |n| n as usize);
        let learning_rate = learning_rate
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|lr| lr.is_finite() && *lr > 0.0)
            .unwrap_or(defaults.learning_rate);

        TrainConfig { epochs, learning_rate, ..defaults }
    }

    /// Epochs at which the trainer records MSE.
    pub fn checkpoints(&self) -> Vec<usize> {
        (0..self.epochs).step_by(self.log_every.max(1)).collect()
    }
}

/// Parses the optional sign and digits at the start of `s`, ignoring
/// leading whitespace and anything after the digits.
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    s[..sign_len + digits].parse().ok()
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: TrainConfig::DEFAULT_EPOCHS,
            learning_rate: TrainConfig::DEFAULT_LEARNING_RATE,
            log_every: TrainConfig::DEFAULT_LOG_EVERY,
            init_range: TrainConfig::DEFAULT_INIT_RANGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_arguments_are_used() {
        let c = TrainConfig::from_args(Some("250"), Some("0.5"));
        assert_eq!(c.epochs, 250);
        assert_eq!(c.learning_rate, 0.5);
        assert_eq!(c.log_every, TrainConfig::DEFAULT_LOG_EVERY);
    }

    #[test]
    fn bad_arguments_fall_back_to_defaults() {
        for (e, lr) in [
            (None, None),
            (Some("abc"), Some("fast")),
            (Some("0"), Some("0")),
            (Some("-5"), Some("-0.1")),
            (Some("-2.5"), Some("NaN")),
            (Some("x12"), Some("")),
        ] {
            let c = TrainConfig::from_args(e, lr);
            assert_eq!(c.epochs, 10_000);
            assert_eq!(c.learning_rate, 0.01);
        }
    }

    #[test]
    fn epochs_use_the_leading_integer() {
        assert_eq!(TrainConfig::from_args(Some("2.5"), None).epochs, 2);
        assert_eq!(TrainConfig::from_args(Some(" 300epochs"), None).epochs, 300);
        assert_eq!(TrainConfig::from_args(Some("+7"), None).epochs, 7);
        assert_eq!(leading_integer("-"), None);
        assert_eq!(leading_integer("-12x"), Some(-12));
    }

    #[test]
    fn defaults_match_the_reference_run() {
        let c = TrainConfig::default();
        assert_eq!(c.epochs, 10_000);
        assert_eq!(c.learning_rate, 0.01);
        assert_eq!(c.log_every, 100);
        assert_eq!(c.init_range, 0.5);
    }

    #[test]
    fn checkpoints_every_hundredth_epoch() {
        let c = TrainConfig { epochs: 350, ..TrainConfig::default() };
        assert_eq!(c.checkpoints(), vec![0, 100, 200, 300]);
        assert_eq!(TrainConfig::default().checkpoints().len(), 100);
    }
}
