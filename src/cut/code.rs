//! Cut kinds and the per-variable pass/fail decision.

use crate::error::{Result, RgsError};
use std::fmt;
use std::str::FromStr;

/// Comparator and tightening direction of a ladder cut.
///
/// There is no default: the caller states which way a ladder tightens,
/// either in the direction token (`ladder>` / `ladder<`) or through
/// [`ScanConfig::with_ladder_direction`](crate::scan::ScanConfig::with_ladder_direction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LadderDirection {
    /// `value > threshold`; tighter cut-points have larger thresholds.
    Above,
    /// `value < threshold`; tighter cut-points have smaller thresholds.
    Below,
}

impl LadderDirection {
    /// Single-sided comparison in this direction.
    #[inline]
    pub fn passes(self, value: f64, threshold: f64) -> bool {
        match self {
            LadderDirection::Above => value > threshold,
            LadderDirection::Below => value < threshold,
        }
    }

    /// Whether `next` is at least as tight as `prev` in this direction.
    #[inline]
    fn tightens(self, prev: f64, next: f64) -> bool {
        match self {
            LadderDirection::Above => next >= prev,
            LadderDirection::Below => next <= prev,
        }
    }
}

/// Threshold of one cut variable at one cut-point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Threshold {
    /// One cut value.
    Single(f64),
    /// Inclusive `[low, high]` range for box cuts.
    Range(f64, f64),
}

impl Threshold {
    /// The primary cut value (`low` for a range).
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Threshold::Single(t) => t,
            Threshold::Range(low, _) => low,
        }
    }

    /// `(low, high)`; a single value reads as a degenerate range.
    #[inline]
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Threshold::Single(t) => (t, t),
            Threshold::Range(low, high) => (low, high),
        }
    }

    /// Appends the raw numbers of this threshold (one or two) to `out`.
    pub(crate) fn extend_into(self, out: &mut Vec<f64>) {
        match self {
            Threshold::Single(t) => out.push(t),
            Threshold::Range(low, high) => {
                out.push(low);
                out.push(high);
            }
        }
    }
}

/// Kind of cut applied to one variable.
///
/// # Examples
///
/// ```
/// use u_cutscan::cut::{CutCode, Threshold};
///
/// let code: CutCode = "<|".parse().unwrap();
/// assert_eq!(code, CutCode::AbsLt);
/// assert!(code.passes(-1.5, Threshold::Single(2.0)));
/// assert!(!code.passes(3.0, Threshold::Single(2.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CutCode {
    /// `value > t`
    Gt,
    /// `value < t`
    Lt,
    /// `|value| > t`
    AbsGt,
    /// `|value| < t`
    AbsLt,
    /// `value == t`, exact. Quantize beforehand if approximate equality is wanted.
    Eq,
    /// `low <= value <= high`
    Box,
    /// Single-sided cut whose thresholds tighten monotonically across the grid.
    Ladder(LadderDirection),
}

impl CutCode {
    /// Pass/fail decision for one variable.
    ///
    /// NaN values fail every code.
    #[inline]
    pub fn passes(self, value: f64, threshold: Threshold) -> bool {
        match self {
            CutCode::Gt => value > threshold.value(),
            CutCode::Lt => value < threshold.value(),
            CutCode::AbsGt => value.abs() > threshold.value(),
            CutCode::AbsLt => value.abs() < threshold.value(),
            CutCode::Eq => value == threshold.value(),
            CutCode::Box => {
                let (low, high) = threshold.bounds();
                low <= value && value <= high
            }
            CutCode::Ladder(dir) => dir.passes(value, threshold.value()),
        }
    }

    /// Whether `next` excludes at least every value `prev` excludes.
    ///
    /// Used to decide whether a walk over cut-points can shrink its active
    /// event set monotonically. NaN thresholds are never comparable.
    pub fn at_least_as_tight(self, prev: Threshold, next: Threshold) -> bool {
        match self {
            CutCode::Gt | CutCode::AbsGt => next.value() >= prev.value(),
            CutCode::Lt | CutCode::AbsLt => next.value() <= prev.value(),
            CutCode::Eq => next.value() == prev.value(),
            CutCode::Box => {
                let (plo, phi) = prev.bounds();
                let (nlo, nhi) = next.bounds();
                nlo >= plo && nhi <= phi
            }
            CutCode::Ladder(dir) => dir.tightens(prev.value(), next.value()),
        }
    }

    /// Direction of a single-sided comparator, if this code is one.
    ///
    /// Only these codes admit a sorted frontier over event values.
    pub fn one_sided_direction(self) -> Option<LadderDirection> {
        match self {
            CutCode::Gt => Some(LadderDirection::Above),
            CutCode::Lt => Some(LadderDirection::Below),
            CutCode::Ladder(dir) => Some(dir),
            CutCode::AbsGt | CutCode::AbsLt | CutCode::Eq | CutCode::Box => None,
        }
    }

    /// Whether the code takes a two-sided [`Threshold::Range`].
    pub fn is_box(self) -> bool {
        matches!(self, CutCode::Box)
    }

    pub fn is_ladder(self) -> bool {
        matches!(self, CutCode::Ladder(_))
    }

    /// Parses a direction token, resolving a bare `ladder` with `ladder_default`.
    pub fn parse_with(token: &str, ladder_default: Option<LadderDirection>) -> Result<Self> {
        if token.trim().eq_ignore_ascii_case("ladder") {
            return ladder_default.map(CutCode::Ladder).ok_or_else(|| {
                RgsError::config(
                    "ladder cut needs a direction: use `ladder>` / `ladder<` or set a default",
                )
            });
        }
        token.parse()
    }
}

impl FromStr for CutCode {
    type Err = RgsError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let code = match token {
            ">" => CutCode::Gt,
            "<" => CutCode::Lt,
            ">|" | "|>|" => CutCode::AbsGt,
            "<|" | "|<|" => CutCode::AbsLt,
            "==" | "=" => CutCode::Eq,
            "<>" => CutCode::Box,
            _ => match token.to_ascii_lowercase().as_str() {
                "gt" => CutCode::Gt,
                "lt" => CutCode::Lt,
                "absgt" => CutCode::AbsGt,
                "abslt" => CutCode::AbsLt,
                "eq" => CutCode::Eq,
                "box" => CutCode::Box,
                "ladder>" | "ladder_gt" => CutCode::Ladder(LadderDirection::Above),
                "ladder<" | "ladder_lt" => CutCode::Ladder(LadderDirection::Below),
                _ => return Err(RgsError::config(format!("unknown cut code: {s:?}"))),
            },
        };
        Ok(code)
    }
}

impl fmt::Display for CutCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CutCode::Gt => ">",
            CutCode::Lt => "<",
            CutCode::AbsGt => ">|",
            CutCode::AbsLt => "<|",
            CutCode::Eq => "==",
            CutCode::Box => "<>",
            CutCode::Ladder(LadderDirection::Above) => "ladder>",
            CutCode::Ladder(LadderDirection::Below) => "ladder<",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(t: f64) -> Threshold {
        Threshold::Single(t)
    }

    #[test]
    fn test_one_sided() {
        assert!(CutCode::Gt.passes(2.0, single(1.0)));
        assert!(!CutCode::Gt.passes(1.0, single(1.0)));
        assert!(CutCode::Lt.passes(0.5, single(1.0)));
        assert!(!CutCode::Lt.passes(1.0, single(1.0)));
    }

    #[test]
    fn test_absolute() {
        assert!(CutCode::AbsGt.passes(-3.0, single(2.0)));
        assert!(!CutCode::AbsGt.passes(-2.0, single(2.0)));
        assert!(CutCode::AbsLt.passes(-1.9, single(2.0)));
        assert!(!CutCode::AbsLt.passes(3.0, single(2.0)));
    }

    #[test]
    fn test_eq_exact() {
        assert!(CutCode::Eq.passes(4.0, single(4.0)));
        assert!(!CutCode::Eq.passes(4.0 + 1e-12, single(4.0)));
    }

    #[test]
    fn test_box_inclusive() {
        let t = Threshold::Range(1.0, 2.0);
        assert!(CutCode::Box.passes(1.0, t));
        assert!(CutCode::Box.passes(2.0, t));
        assert!(CutCode::Box.passes(1.5, t));
        assert!(!CutCode::Box.passes(2.5, t));
        assert!(!CutCode::Box.passes(0.5, t));
    }

    #[test]
    fn test_degenerate_box_matches_eq() {
        for v in [0.5, 1.0, 1.5] {
            assert_eq!(
                CutCode::Box.passes(v, Threshold::Range(1.0, 1.0)),
                CutCode::Eq.passes(v, single(1.0))
            );
        }
    }

    #[test]
    fn test_ladder_directions() {
        let above = CutCode::Ladder(LadderDirection::Above);
        let below = CutCode::Ladder(LadderDirection::Below);
        assert!(above.passes(5.0, single(4.0)));
        assert!(!above.passes(4.0, single(4.0)));
        assert!(below.passes(3.0, single(4.0)));
        assert!(!below.passes(4.0, single(4.0)));
    }

    #[test]
    fn test_nan_fails_everything() {
        let codes = [
            CutCode::Gt,
            CutCode::Lt,
            CutCode::AbsGt,
            CutCode::AbsLt,
            CutCode::Eq,
            CutCode::Box,
            CutCode::Ladder(LadderDirection::Above),
            CutCode::Ladder(LadderDirection::Below),
        ];
        for code in codes {
            assert!(!code.passes(f64::NAN, Threshold::Range(-1e9, 1e9)), "{code}");
        }
    }

    #[test]
    fn test_tightness() {
        assert!(CutCode::Gt.at_least_as_tight(single(1.0), single(2.0)));
        assert!(!CutCode::Gt.at_least_as_tight(single(2.0), single(1.0)));
        assert!(CutCode::AbsLt.at_least_as_tight(single(2.0), single(1.0)));
        assert!(CutCode::Eq.at_least_as_tight(single(2.0), single(2.0)));
        assert!(!CutCode::Eq.at_least_as_tight(single(2.0), single(3.0)));
        assert!(CutCode::Box.at_least_as_tight(
            Threshold::Range(0.0, 10.0),
            Threshold::Range(1.0, 9.0)
        ));
        assert!(!CutCode::Box.at_least_as_tight(
            Threshold::Range(1.0, 9.0),
            Threshold::Range(0.0, 9.0)
        ));
        assert!(!CutCode::Gt.at_least_as_tight(single(f64::NAN), single(1.0)));
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(">".parse::<CutCode>().unwrap(), CutCode::Gt);
        assert_eq!("<".parse::<CutCode>().unwrap(), CutCode::Lt);
        assert_eq!(">|".parse::<CutCode>().unwrap(), CutCode::AbsGt);
        assert_eq!("<|".parse::<CutCode>().unwrap(), CutCode::AbsLt);
        assert_eq!("==".parse::<CutCode>().unwrap(), CutCode::Eq);
        assert_eq!("<>".parse::<CutCode>().unwrap(), CutCode::Box);
        assert_eq!("ABSGT".parse::<CutCode>().unwrap(), CutCode::AbsGt);
        assert_eq!(
            "ladder<".parse::<CutCode>().unwrap(),
            CutCode::Ladder(LadderDirection::Below)
        );
        assert!("!=".parse::<CutCode>().is_err());
    }

    #[test]
    fn test_bare_ladder_requires_direction() {
        assert!(CutCode::parse_with("ladder", None).is_err());
        assert!("ladder".parse::<CutCode>().is_err());
        assert_eq!(
            CutCode::parse_with("LADDER", Some(LadderDirection::Above)).unwrap(),
            CutCode::Ladder(LadderDirection::Above)
        );
        assert_eq!(
            CutCode::parse_with(">", Some(LadderDirection::Below)).unwrap(),
            CutCode::Gt
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let code = CutCode::Ladder(LadderDirection::Below);
        assert_eq!(code.to_string().parse::<CutCode>().unwrap(), code);
    }
}
