use crate::types::{Classification, SignalColor, ThreatStatus};

/// Score forced onto every fallback record.
pub const FALLBACK_RISK: u8 = 15;

/// Map a base score to a severity band.
///
/// Fallback records are pinned to LOW/neutral at [`FALLBACK_RISK`] whatever
/// the node is configured with; live records keep their score unchanged.
pub fn classify(score: u8, is_fallback: bool) -> Classification {
    if is_fallback {
        return Classification {
            status: ThreatStatus::Low,
            color: SignalColor::Neutral,
            risk: FALLBACK_RISK,
        };
    }

    let (status, color) = if score >= 85 {
        (ThreatStatus::Critical, SignalColor::Red)
    } else if score >= 65 {
        (ThreatStatus::High, SignalColor::Orange)
    } else if score >= 45 {
        (ThreatStatus::Medium, SignalColor::Yellow)
    } else {
        (ThreatStatus::Low, SignalColor::Neutral)
    };

    Classification {
        status,
        color,
        risk: score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(
            classify(85, false),
            Classification { status: ThreatStatus::Critical, color: SignalColor::Red, risk: 85 }
        );
        assert_eq!(
            classify(84, false),
            Classification { status: ThreatStatus::High, color: SignalColor::Orange, risk: 84 }
        );
        assert_eq!(
            classify(65, false),
            Classification { status: ThreatStatus::High, color: SignalColor::Orange, risk: 65 }
        );
        assert_eq!(
            classify(45, false),
            Classification { status: ThreatStatus::Medium, color: SignalColor::Yellow, risk: 45 }
        );
        assert_eq!(
            classify(44, false),
            Classification { status: ThreatStatus::Low, color: SignalColor::Neutral, risk: 44 }
        );
    }

    #[test]
    fn test_extremes() {
        assert_eq!(classify(100, false).status, ThreatStatus::Critical);
        assert_eq!(classify(0, false).status, ThreatStatus::Low);
        assert_eq!(classify(0, false).risk, 0);
    }

    #[test]
    fn test_fallback_always_low() {
        for score in [0, 15, 44, 65, 85, 94, 100] {
            let c = classify(score, true);
            assert_eq!(c.status, ThreatStatus::Low);
            assert_eq!(c.color, SignalColor::Neutral);
            assert_eq!(c.risk, FALLBACK_RISK);
        }
    }
}
