use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::temporal::timestamp::TickGranularity;

/// How tick values are turned into label text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TickFormat {
    /// Precision derived from the tick step for numbers, from the tick
    /// interval for timestamps
    #[default]
    Auto,
    Fixed {
        precision: usize,
    },
    Percent {
        precision: usize,
    },
    /// A chrono strftime format string
    Time {
        format: String,
    },
}

/// Number of decimals needed to tell apart values `step` apart
pub fn precision_fixed(step: f32) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return 0;
    }
    // nudge so that e.g. 0.1 rounds to one decimal despite float error
    (-(step.abs().log10() + 1e-6).floor()).max(0.0) as usize
}

fn fixed(value: f32, precision: usize) -> String {
    let s = format!("{value:.precision$}");
    // avoid "-0" and "-0.0" labels
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

impl TickFormat {
    /// Formats numeric ticks spaced `step` apart
    pub fn format_numbers(&self, values: &[f32], step: Option<f32>) -> Vec<String> {
        match self {
            TickFormat::Auto => {
                let precision = step.map(precision_fixed);
                values
                    .iter()
                    .map(|v| match precision {
                        Some(p) => fixed(*v, p),
                        None => v.to_string(),
                    })
                    .collect()
            }
            TickFormat::Fixed { precision } => {
                values.iter().map(|v| fixed(*v, *precision)).collect()
            }
            TickFormat::Percent { precision } => values
                .iter()
                .map(|v| format!("{}%", fixed(v * 100.0, *precision)))
                .collect(),
            TickFormat::Time { .. } => values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Formats timestamp ticks produced at the given granularity
    pub fn format_timestamps(
        &self,
        values: &[NaiveDateTime],
        granularity: TickGranularity,
    ) -> Vec<String> {
        let format = match self {
            TickFormat::Time { format } => format.as_str(),
            _ => auto_time_format(granularity),
        };
        values
            .iter()
            .map(|v| v.format(format).to_string())
            .collect()
    }
}

fn auto_time_format(granularity: TickGranularity) -> &'static str {
    match granularity {
        TickGranularity::Millisecond => "%H:%M:%S%.3f",
        TickGranularity::Second => "%H:%M:%S",
        TickGranularity::Minute | TickGranularity::Hour => "%H:%M",
        TickGranularity::Day => "%b %d",
        TickGranularity::Month => "%b %Y",
        TickGranularity::Year => "%Y",
    }
}
