use crate::error::ParseError;
use std::f32::consts::{PI, TAU};
use std::str::FromStr;

const BACK_OVERSHOOT: f32 = 1.70158;
const ELASTIC_AMPLITUDE: f32 = 1.0;
const ELASTIC_PERIOD: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EaseDir {
    In,
    Out,
    InOut,
}

/// Easing curves addressed by the names the page markup uses
/// (`power3.out`, `back.out(1.7)`, `elastic.out(1, 0.5)`, ...).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    /// `powerN` maps to a polynomial of degree N + 1.
    Power(u8, EaseDir),
    Sine(EaseDir),
    Back { dir: EaseDir, overshoot: f32 },
    Elastic { dir: EaseDir, amplitude: f32, period: f32 },
}

impl Default for Ease {
    fn default() -> Self {
        Self::Power(1, EaseDir::Out)
    }
}

impl Ease {
    pub const fn back_out(overshoot: f32) -> Self {
        Self::Back {
            dir: EaseDir::Out,
            overshoot,
        }
    }

    pub const fn elastic_out(amplitude: f32, period: f32) -> Self {
        Self::Elastic {
            dir: EaseDir::Out,
            amplitude,
            period,
        }
    }

    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::Power(n, dir) => {
                let p = n as i32 + 1;
                with_dir(dir, t, |x| x.powi(p))
            }
            Self::Sine(dir) => with_dir(dir, t, |x| 1.0 - (x * PI * 0.5).cos()),
            Self::Back { dir, overshoot } => {
                let s = overshoot;
                with_dir(dir, t, |x| x * x * ((s + 1.0) * x - s))
            }
            Self::Elastic {
                dir,
                amplitude,
                period,
            } => with_dir(dir, t, |x| elastic_in(x, amplitude, period)),
        }
    }
}

/// Builds out/inOut variants from an ease-in curve.
#[inline]
fn with_dir(dir: EaseDir, t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    match dir {
        EaseDir::In => ease_in(t),
        EaseDir::Out => 1.0 - ease_in(1.0 - t),
        EaseDir::InOut => {
            if t < 0.5 {
                ease_in(t * 2.0) * 0.5
            } else {
                1.0 - ease_in((1.0 - t) * 2.0) * 0.5
            }
        }
    }
}

fn elastic_in(t: f32, amplitude: f32, period: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let a = amplitude.max(1.0);
    let p = period.max(1e-3);
    let s = p / TAU * (1.0 / a).asin();
    let u = t - 1.0;
    -(a * 2f32.powf(10.0 * u) * ((u - s) * TAU / p).sin())
}

fn parse_dir(s: &str) -> Option<EaseDir> {
    match s {
        "in" => Some(EaseDir::In),
        "out" => Some(EaseDir::Out),
        "inOut" => Some(EaseDir::InOut),
        _ => None,
    }
}

impl FromStr for Ease {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let s = raw.trim();
        let (head, args) = match s.find('(') {
            Some(open) => {
                let close = s
                    .rfind(')')
                    .filter(|c| *c > open)
                    .ok_or_else(|| ParseError::Ease(raw.to_string()))?;
                (&s[..open], Some(&s[open + 1..close]))
            }
            None => (s, None),
        };
        let (family, dir) = match head.split_once('.') {
            Some((f, d)) => (f, parse_dir(d).ok_or_else(|| ParseError::Ease(raw.to_string()))?),
            None => (head, EaseDir::Out),
        };
        let nums: Vec<f32> = match args {
            Some(a) if !a.trim().is_empty() => a
                .split(',')
                .map(|n| n.trim().parse::<f32>())
                .collect::<Result<_, _>>()
                .map_err(|_| ParseError::Ease(raw.to_string()))?,
            _ => Vec::new(),
        };
        let ease = match family {
            "none" | "linear" => Self::Linear,
            "power0" => Self::Linear,
            "power1" | "quad" => Self::Power(1, dir),
            "power2" | "cubic" => Self::Power(2, dir),
            "power3" | "quart" => Self::Power(3, dir),
            "power4" | "quint" => Self::Power(4, dir),
            "sine" => Self::Sine(dir),
            "back" => Self::Back {
                dir,
                overshoot: nums.first().copied().unwrap_or(BACK_OVERSHOOT),
            },
            "elastic" => Self::Elastic {
                dir,
                amplitude: nums.first().copied().unwrap_or(ELASTIC_AMPLITUDE),
                period: nums.get(1).copied().unwrap_or(ELASTIC_PERIOD),
            },
            _ => return Err(ParseError::Ease(raw.to_string())),
        };
        Ok(ease)
    }
}
