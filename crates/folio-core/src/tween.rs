//! Property tweens over a list of targets.
//!
//! A [`Tween`] is driven by a local time in seconds. Target `i` begins at
//! `delay + i * stagger`; its properties are captured the first time the tween
//! renders and interpolated with the configured ease from then on.

use crate::ease::Ease;
use crate::style::{Endpoint, Prop, Style, Value};
use smallvec::SmallVec;

const DEFAULT_DURATION: f32 = 0.5;

/// Index of an animated element inside a director.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

/// Storage the tweens write into, addressed by target.
pub trait StyleStore {
    fn style_mut(&mut self, id: TargetId) -> &mut Style;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Count(u32),
    Forever,
}

impl Repeat {
    /// `-1` means forever, matching the markup convention.
    pub fn from_i32(n: i32) -> Self {
        if n < 0 {
            Repeat::Forever
        } else {
            Repeat::Count(n as u32)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropSpec {
    pub prop: Prop,
    pub from: Option<Endpoint>,
    pub to: Option<Endpoint>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    To,
    From,
    FromTo,
}

#[derive(Clone, Debug)]
pub struct TweenVars {
    mode: Mode,
    pub props: SmallVec<[PropSpec; 4]>,
    pub duration: f32,
    pub ease: Ease,
    pub delay: f32,
    pub stagger: f32,
    pub repeat: Repeat,
    pub yoyo: bool,
    pub snap: Option<f32>,
    pub transform_origin: Option<&'static str>,
    pub overwrite: bool,
}

impl TweenVars {
    fn with_mode(mode: Mode, duration: f32) -> Self {
        Self {
            mode,
            props: SmallVec::new(),
            duration: duration.max(0.0),
            ease: Ease::default(),
            delay: 0.0,
            stagger: 0.0,
            repeat: Repeat::Count(0),
            yoyo: false,
            snap: None,
            transform_origin: None,
            overwrite: false,
        }
    }

    /// Animate from the current values to the given ones.
    pub fn to(duration: f32) -> Self {
        Self::with_mode(Mode::To, duration)
    }

    /// Animate from the given values to the current ones.
    pub fn from(duration: f32) -> Self {
        Self::with_mode(Mode::From, duration)
    }

    /// Both ends are given with [`TweenVars::span`].
    pub fn from_to(duration: f32) -> Self {
        Self::with_mode(Mode::FromTo, duration)
    }

    pub fn prop(mut self, prop: Prop, value: impl Into<Endpoint>) -> Self {
        let ep = Some(value.into());
        let spec = match self.mode {
            Mode::From => PropSpec {
                prop,
                from: ep,
                to: None,
            },
            Mode::To | Mode::FromTo => PropSpec {
                prop,
                from: None,
                to: ep,
            },
        };
        self.props.push(spec);
        self
    }

    pub fn span(mut self, prop: Prop, from: impl Into<Endpoint>, to: impl Into<Endpoint>) -> Self {
        self.props.push(PropSpec {
            prop,
            from: Some(from.into()),
            to: Some(to.into()),
        });
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn delay(mut self, secs: f32) -> Self {
        self.delay = secs.max(0.0);
        self
    }

    pub fn stagger(mut self, secs: f32) -> Self {
        self.stagger = secs.max(0.0);
        self
    }

    pub fn repeat(mut self, n: i32) -> Self {
        self.repeat = Repeat::from_i32(n);
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    pub fn snap(mut self, step: f32) -> Self {
        self.snap = Some(step);
        self
    }

    pub fn transform_origin(mut self, origin: &'static str) -> Self {
        self.transform_origin = Some(origin);
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// From-style tweens show their start state before they begin.
    pub fn immediate_render(&self) -> bool {
        self.props.iter().any(|p| p.from.is_some())
    }

    /// Time one target spends animating, repeats included.
    pub fn active_duration(&self) -> f32 {
        match self.repeat {
            Repeat::Count(n) => self.duration * (n as f32 + 1.0),
            Repeat::Forever => f32::INFINITY,
        }
    }

    /// Eased progress at `lt` seconds into one target's run.
    pub fn progress_at(&self, lt: f32) -> f32 {
        if lt <= 0.0 {
            return self.ease.apply(0.0);
        }
        let d = self.duration;
        if d <= 0.0 {
            return 1.0;
        }
        let active = self.active_duration();
        let (iteration, within) = if lt >= active {
            let n = (active / d).round() as u64;
            (n.saturating_sub(1), d)
        } else {
            let k = (lt / d).floor();
            (k as u64, lt - k * d)
        };
        let mut p = (within / d).clamp(0.0, 1.0);
        if self.yoyo && iteration % 2 == 1 {
            p = 1.0 - p;
        }
        self.ease.apply(p)
    }
}

#[derive(Clone, Debug)]
struct Track {
    spec: PropSpec,
    resolved: Option<(Value, Value)>,
}

#[derive(Clone, Debug)]
struct TweenTarget {
    id: TargetId,
    tracks: SmallVec<[Track; 4]>,
}

#[derive(Clone, Debug)]
pub struct Tween {
    vars: TweenVars,
    targets: Vec<TweenTarget>,
    captured: bool,
}

impl Tween {
    pub fn new(targets: &[TargetId], vars: TweenVars) -> Self {
        let targets = targets
            .iter()
            .map(|&id| TweenTarget {
                id,
                tracks: vars
                    .props
                    .iter()
                    .map(|&spec| Track {
                        spec,
                        resolved: None,
                    })
                    .collect(),
            })
            .collect();
        Self {
            vars,
            targets,
            captured: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.targets.iter().all(|t| t.tracks.is_empty())
    }

    /// Full length including stagger across all targets.
    pub fn duration(&self) -> f32 {
        let n = self.targets.len().max(1) as f32;
        self.vars.delay + (n - 1.0) * self.vars.stagger + self.vars.active_duration()
    }

    /// Drop `props` on target `id`. Returns true once nothing is left to animate.
    pub fn kill(&mut self, id: TargetId, props: &[Prop]) -> bool {
        for t in self.targets.iter_mut().filter(|t| t.id == id) {
            t.tracks.retain(|tr| !props.contains(&tr.spec.prop));
        }
        self.is_empty()
    }

    fn capture(&mut self, store: &mut impl StyleStore) {
        for target in &mut self.targets {
            let style = store.style_mut(target.id);
            if let Some(origin) = self.vars.transform_origin {
                style.set_transform_origin(origin);
            }
            for track in &mut target.tracks {
                let current = style.get(track.spec.prop);
                let from = track
                    .spec
                    .from
                    .map(|ep| ep.resolve(current))
                    .unwrap_or(current);
                let to = track
                    .spec
                    .to
                    .map(|ep| ep.resolve(current))
                    .unwrap_or(current);
                track.resolved = Some((from, to));
            }
        }
        self.captured = true;
    }

    /// Render the tween at `local` seconds from its start.
    pub fn render(&mut self, local: f32, store: &mut impl StyleStore) {
        if !self.captured {
            if local < self.vars.delay && !self.vars.immediate_render() {
                return;
            }
            self.capture(store);
        }
        for (i, target) in self.targets.iter().enumerate() {
            let lt = local - self.vars.delay - i as f32 * self.vars.stagger;
            let p = self.vars.progress_at(lt);
            let style = store.style_mut(target.id);
            for track in &target.tracks {
                let Some((from, to)) = track.resolved else {
                    continue;
                };
                let mut v = from.lerp(to, p);
                if let Some(step) = self.vars.snap {
                    v = v.snapped(step);
                }
                style.set(track.spec.prop, v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ease::EaseDir;

    impl StyleStore for Vec<Style> {
        fn style_mut(&mut self, id: TargetId) -> &mut Style {
            let i = id.0 as usize;
            if self.len() <= i {
                self.resize_with(i + 1, Style::default);
            }
            &mut self[i]
        }
    }

    fn ids(n: u32) -> Vec<TargetId> {
        (0..n).map(TargetId).collect()
    }

    #[test]
    fn to_tween_interpolates_from_current() {
        let mut store = vec![Style::default()];
        store[0].set(Prop::Y, Value::Num(10.0));
        let mut tw = Tween::new(&ids(1), TweenVars::to(1.0).prop(Prop::Y, 20.0).ease(Ease::Linear));
        tw.render(0.5, &mut store);
        assert_eq!(store[0].get(Prop::Y), Value::Num(15.0));
        tw.render(2.0, &mut store);
        assert_eq!(store[0].get(Prop::Y), Value::Num(20.0));
    }

    #[test]
    fn from_tween_renders_start_immediately() {
        let mut store = Vec::new();
        let mut tw = Tween::new(
            &ids(1),
            TweenVars::from(1.0).prop(Prop::Opacity, 0.0).delay(3.0),
        );
        tw.render(0.0, &mut store);
        assert_eq!(store[0].get(Prop::Opacity), Value::Num(0.0));
        tw.render(10.0, &mut store);
        assert_eq!(store[0].get(Prop::Opacity), Value::Num(1.0));
    }

    #[test]
    fn to_tween_waits_for_its_delay() {
        let mut store = vec![Style::default()];
        let mut tw = Tween::new(&ids(1), TweenVars::to(1.0).prop(Prop::X, 5.0).delay(1.0));
        tw.render(0.5, &mut store);
        assert!(!store[0].is_set(Prop::X));
    }

    #[test]
    fn stagger_delays_later_targets() {
        let mut store = Vec::new();
        let mut tw = Tween::new(
            &ids(3),
            TweenVars::to(1.0).prop(Prop::X, 10.0).stagger(0.5).ease(Ease::Linear),
        );
        tw.render(0.5, &mut store);
        assert_eq!(store[0].get(Prop::X), Value::Num(5.0));
        assert_eq!(store[1].get(Prop::X), Value::Num(0.0));
        assert_eq!(store[2].get(Prop::X), Value::Num(0.0));
        assert!((tw.duration() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn yoyo_folds_odd_iterations() {
        let vars = TweenVars::to(1.0).repeat(-1).yoyo(true).ease(Ease::Linear);
        assert!((vars.progress_at(0.25) - 0.25).abs() < 1e-6);
        assert!((vars.progress_at(1.25) - 0.75).abs() < 1e-6);
        assert!((vars.progress_at(2.25) - 0.25).abs() < 1e-6);
        assert!(vars.active_duration().is_infinite());
    }

    #[test]
    fn finite_repeat_ends_on_last_iteration() {
        let vars = TweenVars::to(1.0).repeat(1).yoyo(true).ease(Ease::Linear);
        assert_eq!(vars.progress_at(5.0), 0.0);
        let vars = TweenVars::to(1.0).repeat(2).yoyo(true).ease(Ease::Linear);
        assert_eq!(vars.progress_at(5.0), 1.0);
    }

    #[test]
    fn relative_endpoint_offsets_captured_value() {
        let mut store = vec![Style::default()];
        store[0].set(Prop::Y, Value::Num(4.0));
        let mut tw = Tween::new(
            &ids(1),
            TweenVars::to(1.0).prop(Prop::Y, Endpoint::By(-20.0)),
        );
        tw.render(1.0, &mut store);
        assert_eq!(store[0].get(Prop::Y), Value::Num(-16.0));
    }

    #[test]
    fn snap_rounds_counter_values() {
        let mut store = vec![Style::default()];
        let mut tw = Tween::new(
            &ids(1),
            TweenVars::to(2.0)
                .prop(Prop::Counter, 50.0)
                .snap(1.0)
                .ease(Ease::Power(2, EaseDir::Out)),
        );
        tw.render(0.37, &mut store);
        let v = store[0].get(Prop::Counter).num();
        assert_eq!(v, v.round());
    }

    #[test]
    fn kill_removes_only_named_props() {
        let mut tw = Tween::new(
            &ids(2),
            TweenVars::to(1.0).prop(Prop::X, 1.0).prop(Prop::Scale, 2.0),
        );
        assert!(!tw.kill(TargetId(0), &[Prop::X]));
        let mut store: Vec<Style> = Vec::new();
        tw.render(5.0, &mut store);
        assert!(!store[0].is_set(Prop::X));
        assert_eq!(store[0].get(Prop::Scale), Value::Num(2.0));
        assert_eq!(store[1].get(Prop::X), Value::Num(1.0));
        assert!(!tw.kill(TargetId(0), &[Prop::Scale]));
        assert!(tw.kill(TargetId(1), &[Prop::X, Prop::Scale]));
    }
}
