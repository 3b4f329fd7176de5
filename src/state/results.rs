//! Score, percentage, elapsed time and feedback banding

use serde::{Deserialize, Serialize};

/// Percentage of `score` over `total`, rounded half away from zero
pub fn percent(score: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let value = (score.min(total) as f64 / total as f64 * 100.0).round();
    value as u8
}

/// Time taken, split for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElapsedTime {
    pub total_seconds: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl ElapsedTime {
    /// Build from a millisecond span, rounding to the nearest second
    pub fn from_millis(millis: i64) -> Self {
        let total_seconds = (millis.max(0) as f64 / 1000.0).round() as u64;
        Self::from_seconds(total_seconds)
    }

    pub fn from_seconds(total_seconds: u64) -> Self {
        Self {
            total_seconds,
            minutes: total_seconds / 60,
            seconds: total_seconds % 60,
        }
    }
}

/// Qualitative feedback band selected by percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Perfect,
    Excellent,
    VeryGood,
    Acceptable,
    KeepLearning,
}

impl Feedback {
    /// Thresholds are inclusive lower bounds, checked from the top
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            100.. => Feedback::Perfect,
            80..=99 => Feedback::Excellent,
            60..=79 => Feedback::VeryGood,
            40..=59 => Feedback::Acceptable,
            _ => Feedback::KeepLearning,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Feedback::Perfect => "A perfect score! Outstanding work.",
            Feedback::Excellent => "Excellent! Your knowledge is strong.",
            Feedback::VeryGood => "Very good. Keep reading and learning.",
            Feedback::Acceptable => "A fair result. A little more study will go a long way.",
            Feedback::KeepLearning => "Don't be discouraged. Start again and learn more.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn feedback_bands_over_five_questions() {
        let cases = [
            (5, 100, Feedback::Perfect),
            (4, 80, Feedback::Excellent),
            (3, 60, Feedback::VeryGood),
            (2, 40, Feedback::Acceptable),
            (1, 20, Feedback::KeepLearning),
            (0, 0, Feedback::KeepLearning),
        ];

        for (score, expected_percent, expected_band) in cases {
            let p = percent(score, 5);
            assert_eq!(p, expected_percent, "score {score}");
            assert_eq!(Feedback::from_percent(p), expected_band, "score {score}");
        }
    }

    #[test]
    fn band_edges_are_inclusive() {
        assert_eq!(Feedback::from_percent(99), Feedback::Excellent);
        assert_eq!(Feedback::from_percent(79), Feedback::VeryGood);
        assert_eq!(Feedback::from_percent(59), Feedback::Acceptable);
        assert_eq!(Feedback::from_percent(39), Feedback::KeepLearning);
    }

    #[test]
    fn elapsed_splits_minutes_and_seconds() {
        let elapsed = ElapsedTime::from_millis(125_400);
        assert_eq!(elapsed.total_seconds, 125);
        assert_eq!(elapsed.minutes, 2);
        assert_eq!(elapsed.seconds, 5);

        assert_eq!(ElapsedTime::from_millis(1_500).total_seconds, 2);
        assert_eq!(ElapsedTime::from_millis(-10).total_seconds, 0);
    }
}
