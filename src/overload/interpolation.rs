use crate::rating::CapacitySample;

/// 보간된 PCR 값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolated {
    pub capacity: f64,
    /// true면 표본 범위 밖이라 가장자리 값으로 클램프됨을 의미한다.
    pub clamped: bool,
}

/// 포화도 오름차순 표본 위에서 구간별 선형 보간을 한다.
///
/// 범위 밖은 선형 외삽하지 않고 양 끝 표본값을 그대로 유지한다.
/// 표본 지점과 정확히 같은 포화도는 저장된 값을 그대로 돌려준다.
/// 표본은 포화도 오름차순이어야 한다. 표본이 비었거나 포화도가 NaN이면 `None`.
pub fn interpolate_capacity(samples: &[CapacitySample], saturation: f64) -> Option<Interpolated> {
    let first = *samples.first()?;
    let last = *samples.last()?;
    if saturation <= first.saturation {
        return Some(Interpolated {
            capacity: first.capacity,
            clamped: saturation < first.saturation,
        });
    }
    if saturation >= last.saturation {
        return Some(Interpolated {
            capacity: last.capacity,
            clamped: saturation > last.saturation,
        });
    }
    for win in samples.windows(2) {
        let a = win[0];
        let b = win[1];
        if saturation == a.saturation {
            return Some(exact(a));
        }
        if saturation == b.saturation {
            return Some(exact(b));
        }
        if saturation > a.saturation && saturation < b.saturation {
            let frac = (saturation - a.saturation) / (b.saturation - a.saturation);
            return Some(Interpolated {
                capacity: a.capacity + frac * (b.capacity - a.capacity),
                clamped: false,
            });
        }
    }
    // NaN 포화도만 여기까지 온다.
    None
}

fn exact(sample: CapacitySample) -> Interpolated {
    Interpolated {
        capacity: sample.capacity,
        clamped: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<CapacitySample> {
        vec![
            CapacitySample::new(70.0, 300.0),
            CapacitySample::new(75.0, 280.0),
            CapacitySample::new(80.0, 250.0),
            CapacitySample::new(85.0, 230.0),
        ]
    }

    #[test]
    fn midpoint_of_middle_segment() {
        let v = interpolate_capacity(&samples(), 77.5).expect("value");
        assert_eq!(v.capacity, 265.0);
        assert!(!v.clamped);
    }

    #[test]
    fn below_and_above_range_hold_edge_values() {
        let low = interpolate_capacity(&samples(), 12.0);
        assert_eq!(low, Some(Interpolated { capacity: 300.0, clamped: true }));
        let high = interpolate_capacity(&samples(), 99.9);
        assert_eq!(high, Some(Interpolated { capacity: 230.0, clamped: true }));
    }

    #[test]
    fn range_edges_are_not_flagged_as_clamped() {
        assert_eq!(
            interpolate_capacity(&samples(), 70.0),
            Some(Interpolated { capacity: 300.0, clamped: false })
        );
        assert_eq!(
            interpolate_capacity(&samples(), 85.0),
            Some(Interpolated { capacity: 230.0, clamped: false })
        );
    }

    #[test]
    fn infinities_clamp() {
        let low = interpolate_capacity(&samples(), f64::NEG_INFINITY).expect("value");
        let high = interpolate_capacity(&samples(), f64::INFINITY).expect("value");
        assert_eq!(low.capacity, 300.0);
        assert_eq!(high.capacity, 230.0);
    }

    #[test]
    fn nan_saturation_has_no_value() {
        assert_eq!(interpolate_capacity(&samples(), f64::NAN), None);
    }

    #[test]
    fn empty_samples_have_no_value() {
        assert_eq!(interpolate_capacity(&[], 75.0), None);
    }
}
