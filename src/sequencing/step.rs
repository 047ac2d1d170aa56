/// Size of a timeline warp, either in raw ticks or as a fraction of a beat.
///
/// Beat fractions are resolved against the clock's ppq when the timeline is
/// loaded, so the tick path only ever sees whole tick counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WarpStep {
    /// Absolute number of ticks
    Ticks(u64),
    /// Fraction of a quarter-note beat (0.5 = eighth note)
    Beats(f64),
}

impl WarpStep {
    /// Resolve to whole ticks. Never returns less than 1.
    ///
    /// Formula for beats: `max(round(ppq * fraction), 1)`
    pub fn to_ticks(self, ppq: u32) -> u64 {
        match self {
            WarpStep::Ticks(ticks) => ticks.max(1),
            WarpStep::Beats(fraction) => {
                let ticks = (ppq as f64 * fraction).round();
                if ticks.is_finite() && ticks >= 1.0 {
                    ticks as u64
                } else {
                    1
                }
            }
        }
    }

    /// Parse a step token: an integer is a tick count, a decimal is a beat fraction
    pub fn parse(token: &str) -> Option<Self> {
        if let Ok(ticks) = token.parse::<u64>() {
            return Some(WarpStep::Ticks(ticks));
        }
        match token.parse::<f64>() {
            Ok(fraction) if fraction.is_finite() && fraction >= 0.0 => {
                Some(WarpStep::Beats(fraction))
            }
            _ => None,
        }
    }
}

impl From<u64> for WarpStep {
    fn from(ticks: u64) -> Self {
        WarpStep::Ticks(ticks)
    }
}

impl From<f64> for WarpStep {
    fn from(fraction: f64) -> Self {
        WarpStep::Beats(fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_steps() {
        assert_eq!(WarpStep::Ticks(50).to_ticks(24), 50);
        assert_eq!(WarpStep::Ticks(0).to_ticks(24), 1);
    }

    #[test]
    fn test_beat_fractions() {
        let ppq = 24;

        // Quarter = 1 beat = 24 ticks
        assert_eq!(WarpStep::Beats(1.0).to_ticks(ppq), 24);
        // Eighth = half a beat
        assert_eq!(WarpStep::Beats(0.5).to_ticks(ppq), 12);
        // 24 * 0.3 = 7.2 -> 7
        assert_eq!(WarpStep::Beats(0.3).to_ticks(ppq), 7);
        // 24 * 0.99 = 23.76 -> 24
        assert_eq!(WarpStep::Beats(0.99).to_ticks(ppq), 24);
    }

    #[test]
    fn test_step_never_below_one() {
        assert_eq!(WarpStep::Beats(0.0).to_ticks(24), 1);
        assert_eq!(WarpStep::Beats(0.001).to_ticks(24), 1);
    }

    #[test]
    fn test_parse() {
        assert_eq!(WarpStep::parse("50"), Some(WarpStep::Ticks(50)));
        assert_eq!(WarpStep::parse("0.25"), Some(WarpStep::Beats(0.25)));
        assert_eq!(WarpStep::parse("-1"), None);
        assert_eq!(WarpStep::parse("soon"), None);
    }
}
