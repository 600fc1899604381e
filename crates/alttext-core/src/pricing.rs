//! Per-call cost estimation from token usage.

use serde::{Deserialize, Serialize};

/// Per-1000-token prices in USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pricing {
    /// Price per 1000 prompt tokens
    pub input_per_1k: f64,

    /// Price per 1000 completion tokens
    pub output_per_1k: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            input_per_1k: 0.02,
            output_per_1k: 0.08,
        }
    }
}

impl Pricing {
    /// Estimated cost of one call.
    pub fn estimate(&self, tokens_in: u32, tokens_out: u32) -> f64 {
        (f64::from(tokens_in) / 1000.0 * self.input_per_1k)
            + (f64::from(tokens_out) / 1000.0 * self.output_per_1k)
    }
}

/// Render a cost as `$` followed by six decimal places.
pub fn format_cost(cost: f64) -> String {
    format!("${cost:.6}")
}

/// Render a duration in seconds as `"<secs> seconds"` with two decimal places.
pub fn format_duration(seconds: f64) -> String {
    format!("{seconds:.2} seconds")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prices() {
        let pricing = Pricing::default();
        assert_eq!(pricing.input_per_1k, 0.02);
        assert_eq!(pricing.output_per_1k, 0.08);
    }

    #[test]
    fn test_estimate_reference_example() {
        let cost = Pricing::default().estimate(1000, 500);
        assert!((cost - 0.06).abs() < 1e-12);
        assert_eq!(format_cost(cost), "$0.060000");
    }

    #[test]
    fn test_estimate_zero_tokens() {
        assert_eq!(Pricing::default().estimate(0, 0), 0.0);
        assert_eq!(format_cost(0.0), "$0.000000");
    }

    #[test]
    fn test_estimate_custom_prices() {
        let pricing = Pricing {
            input_per_1k: 0.005,
            output_per_1k: 0.015,
        };
        let cost = pricing.estimate(2000, 1000);
        assert!((cost - 0.025).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let pricing = Pricing::default();
        assert_eq!(pricing.estimate(1234, 321), pricing.estimate(1234, 321));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(2.0), "2.00 seconds");
        assert_eq!(format_duration(0.456), "0.46 seconds");
    }
}
