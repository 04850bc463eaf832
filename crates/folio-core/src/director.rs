//! Registry of every running animation on the page.
//!
//! The director owns one [`Style`] per animated element and a list of
//! timelines. Each tick advances playheads (by wall time, toggle actions or
//! scroll progress), renders timelines whose playhead moved, and leaves the
//! touched elements marked dirty for the host to flush.

use crate::style::{Prop, Style, Value};
use crate::timeline::Timeline;
use crate::trigger::{Action, Bounds, Scrub, ScrollTrigger, ScrollView};
use crate::tween::{StyleStore, TargetId, Tween, TweenVars};
use smallvec::SmallVec;

/// Handle returned for every registered animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

/// Layout queries the director needs from its host.
pub trait Measure<T> {
    /// Document-space bounds of `target`, or `None` if it is not laid out.
    fn bounds(&self, target: &T) -> Option<Bounds>;
    fn view(&self) -> ScrollView;
}

struct Slot<T> {
    target: T,
    style: Style,
    dirty: bool,
}

struct Slots<T>(Vec<Slot<T>>);

impl<T> StyleStore for Slots<T> {
    fn style_mut(&mut self, id: TargetId) -> &mut Style {
        let slot = &mut self.0[id.0 as usize];
        slot.dirty = true;
        &mut slot.style
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug)]
struct Playhead {
    time: f32,
    direction: Direction,
    paused: bool,
}

impl Playhead {
    fn apply(&mut self, action: Action, total: f32) {
        match action {
            Action::None => {}
            Action::Play => {
                self.direction = Direction::Forward;
                self.paused = false;
            }
            Action::Pause => self.paused = true,
            Action::Resume => self.paused = false,
            Action::Reverse => {
                self.direction = Direction::Backward;
                self.paused = false;
            }
            Action::Restart => {
                self.time = 0.0;
                self.direction = Direction::Forward;
                self.paused = false;
            }
            Action::Reset => {
                self.time = 0.0;
                self.direction = Direction::Forward;
                self.paused = true;
            }
            Action::Complete => {
                if total.is_finite() {
                    self.time = total;
                }
                self.paused = true;
            }
        }
    }

    fn step(&mut self, dt: f32, total: f32) {
        if self.paused {
            return;
        }
        let delta = match self.direction {
            Direction::Forward => dt,
            Direction::Backward => -dt,
        };
        self.time = (self.time + delta).clamp(0.0, total);
    }
}

struct Animation {
    id: AnimationId,
    timeline: Timeline,
    playhead: Playhead,
    trigger: Option<ScrollTrigger>,
    last_rendered: Option<f32>,
}

impl Animation {
    fn is_finished(&self) -> bool {
        let total = self.timeline.duration();
        self.trigger.is_none()
            && total.is_finite()
            && self.playhead.time >= total
            && self.last_rendered == Some(self.playhead.time)
    }
}

pub struct Director<T> {
    slots: Slots<T>,
    animations: Vec<Animation>,
    next_id: u64,
    closed: bool,
}

impl<T> Default for Director<T> {
    fn default() -> Self {
        Self {
            slots: Slots(Vec::new()),
            animations: Vec::new(),
            next_id: 1,
            closed: false,
        }
    }
}

impl<T: PartialEq> Director<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `target`, registering it on first sight.
    pub fn target(&mut self, target: T) -> TargetId {
        if let Some(i) = self.slots.0.iter().position(|s| s.target == target) {
            return TargetId(i as u32);
        }
        self.slots.0.push(Slot {
            target,
            style: Style::default(),
            dirty: false,
        });
        TargetId(self.slots.0.len() as u32 - 1)
    }

    pub fn targets(&mut self, targets: impl IntoIterator<Item = T>) -> Vec<TargetId> {
        targets.into_iter().map(|t| self.target(t)).collect()
    }

    pub fn style(&self, id: TargetId) -> Option<&Style> {
        self.slots.0.get(id.0 as usize).map(|s| &s.style)
    }

    /// Record a starting value for `prop` unless something already set it.
    pub fn seed(&mut self, id: TargetId, prop: Prop, value: Value) {
        if let Some(slot) = self.slots.0.get_mut(id.0 as usize) {
            if !slot.style.is_set(prop) {
                slot.style.set(prop, value);
                slot.dirty = true;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    pub fn contains(&self, id: AnimationId) -> bool {
        self.animations.iter().any(|a| a.id == id)
    }

    /// Register a free-running tween. Returns `None` when there is nothing to animate.
    pub fn tween(&mut self, targets: &[TargetId], vars: TweenVars) -> Option<AnimationId> {
        self.tween_on_scroll(targets, vars, None)
    }

    pub fn tween_on_scroll(
        &mut self,
        targets: &[TargetId],
        vars: TweenVars,
        trigger: Option<ScrollTrigger>,
    ) -> Option<AnimationId> {
        if targets.is_empty() || vars.props.is_empty() {
            return None;
        }
        if vars.overwrite {
            let props: SmallVec<[Prop; 4]> = vars.props.iter().map(|p| p.prop).collect();
            self.kill_free_running(targets, &props);
        }
        self.add(Timeline::single(Tween::new(targets, vars)), trigger)
    }

    pub fn add(&mut self, timeline: Timeline, trigger: Option<ScrollTrigger>) -> Option<AnimationId> {
        if self.closed || timeline.is_empty() {
            return None;
        }
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        log::debug!(
            "[director] add #{} children={} scroll={}",
            id.0,
            timeline.len(),
            trigger.is_some()
        );
        let paused = trigger
            .as_ref()
            .is_some_and(|t| matches!(t.scrub, Scrub::Off));
        self.animations.push(Animation {
            id,
            timeline,
            playhead: Playhead {
                time: 0.0,
                direction: Direction::Forward,
                paused,
            },
            trigger,
            last_rendered: None,
        });
        Some(id)
    }

    /// Stop one animation. Styles keep their last rendered values.
    pub fn dispose(&mut self, id: AnimationId) -> bool {
        let before = self.animations.len();
        self.animations.retain(|a| a.id != id);
        self.animations.len() != before
    }

    pub fn clear(&mut self) {
        self.animations.clear();
    }

    /// Clear and refuse every later registration. Listeners that outlive a
    /// teardown become no-ops.
    pub fn close(&mut self) {
        self.closed = true;
        self.clear();
    }

    fn kill_free_running(&mut self, targets: &[TargetId], props: &[Prop]) {
        for anim in self.animations.iter_mut().filter(|a| a.trigger.is_none()) {
            for &id in targets {
                anim.timeline.kill(id, props);
            }
        }
        self.animations.retain(|a| !a.timeline.is_empty());
    }

    pub fn tick(&mut self, dt: f32, measure: &impl Measure<T>) {
        let dt = dt.max(0.0);
        let view = measure.view();
        for anim in &mut self.animations {
            let total = anim.timeline.duration();
            let scrubbed = anim
                .trigger
                .as_ref()
                .is_some_and(|t| !matches!(t.scrub, Scrub::Off));
            if let Some(trigger) = &mut anim.trigger {
                let bounds = self
                    .slots
                    .0
                    .get(trigger.trigger.0 as usize)
                    .and_then(|slot| measure.bounds(&slot.target));
                if let Some(bounds) = bounds {
                    let fired = trigger.advance(bounds, view);
                    match trigger.scrub {
                        Scrub::Off => {
                            for action in fired {
                                anim.playhead.apply(action, total);
                            }
                        }
                        scrub => {
                            let span = if total.is_finite() { total } else { 0.0 };
                            let goal = trigger.progress(bounds, view) * span;
                            anim.playhead.time = match scrub {
                                Scrub::Smooth(tau) if tau > 0.0 && anim.last_rendered.is_some() => {
                                    let alpha = 1.0 - (-dt / tau).exp();
                                    anim.playhead.time + (goal - anim.playhead.time) * alpha
                                }
                                _ => goal,
                            };
                        }
                    }
                }
            }
            if !scrubbed {
                anim.playhead.step(dt, total);
            }
            let t = anim.playhead.time;
            if anim.last_rendered != Some(t) {
                // at the end every child is rendered complete, whatever f32 drift
                // crept into its start offset
                let at = if total.is_finite() && t >= total {
                    f32::INFINITY
                } else {
                    t
                };
                anim.timeline.render(at, &mut self.slots);
                anim.last_rendered = Some(t);
            }
        }
        self.animations.retain(|a| {
            let done = a.is_finished();
            if done {
                log::debug!("[director] #{} finished", a.id.0);
            }
            !done
        });
    }

    /// Hand every element whose style changed since the last flush to `f`.
    pub fn flush(&mut self, mut f: impl FnMut(&T, &Style)) {
        for slot in self.slots.0.iter_mut().filter(|s| s.dirty) {
            f(&slot.target, &slot.style);
            slot.dirty = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ease::Ease;
    use fnv::FnvHashMap;

    #[derive(Default)]
    struct Page {
        bounds: FnvHashMap<&'static str, Bounds>,
        view: ScrollView,
    }

    impl Measure<&'static str> for Page {
        fn bounds(&self, target: &&'static str) -> Option<Bounds> {
            self.bounds.get(target).copied()
        }
        fn view(&self) -> ScrollView {
            self.view
        }
    }

    fn page() -> Page {
        let mut p = Page::default();
        p.view.viewport_height = 1000.0;
        p.bounds.insert(
            "section",
            Bounds {
                top: 2000.0,
                height: 500.0,
            },
        );
        p
    }

    #[test]
    fn targets_are_deduplicated() {
        let mut d = Director::new();
        let a = d.target("a");
        let b = d.target("b");
        assert_ne!(a, b);
        assert_eq!(d.target("a"), a);
    }

    #[test]
    fn empty_selection_registers_nothing() {
        let mut d: Director<&str> = Director::new();
        assert!(d.tween(&[], TweenVars::to(1.0).prop(Prop::X, 1.0)).is_none());
        assert!(d.is_empty());
    }

    #[test]
    fn free_tween_completes_and_is_removed() {
        let mut d = Director::new();
        let id = d.target("btn");
        d.tween(&[id], TweenVars::to(0.3).prop(Prop::Scale, 1.05));
        let p = page();
        d.tick(0.1, &p);
        assert_eq!(d.len(), 1);
        d.tick(0.5, &p);
        assert!(d.is_empty());
        assert_eq!(d.style(id).unwrap().get(Prop::Scale), Value::Num(1.05));
    }

    #[test]
    fn flush_reports_only_changed_targets() {
        let mut d = Director::new();
        let a = d.target("a");
        d.target("b");
        d.tween(&[a], TweenVars::to(1.0).prop(Prop::X, 10.0));
        d.tick(0.5, &page());
        let mut seen = Vec::new();
        d.flush(|t, _| seen.push(*t));
        assert_eq!(seen, vec!["a"]);
        let mut again = 0;
        d.flush(|_, _| again += 1);
        assert_eq!(again, 0);
    }

    #[test]
    fn scroll_trigger_plays_and_reverses() {
        let mut d = Director::new();
        let section = d.target("section");
        let title = d.target("title");
        let trigger = ScrollTrigger::new(section)
            .start("top 80%")
            .unwrap()
            .toggle_actions("play none none reverse")
            .unwrap();
        d.tween_on_scroll(
            &[title],
            TweenVars::from(1.0)
                .prop(Prop::Opacity, 0.0)
                .ease(Ease::Linear),
            Some(trigger),
        );
        let mut p = page();
        d.tick(0.1, &p);
        assert_eq!(d.style(title).unwrap().get(Prop::Opacity), Value::Num(0.0));

        p.view.scroll_y = 1300.0;
        d.tick(0.5, &p);
        d.tick(0.6, &p);
        assert_eq!(d.style(title).unwrap().get(Prop::Opacity), Value::Num(1.0));

        p.view.scroll_y = 0.0;
        d.tick(0.25, &p);
        let o = d.style(title).unwrap().get(Prop::Opacity).num();
        assert!((o - 0.75).abs() < 1e-5);
        d.tick(1.0, &p);
        assert_eq!(d.style(title).unwrap().get(Prop::Opacity), Value::Num(0.0));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn scrub_follows_scroll_progress() {
        let mut d = Director::new();
        let section = d.target("section");
        let trigger = ScrollTrigger::new(section)
            .start("top bottom")
            .unwrap()
            .end("bottom top")
            .unwrap()
            .scrub(Scrub::Instant);
        d.tween_on_scroll(
            &[section],
            TweenVars::to(1.0).prop(Prop::YPercent, -50.0).ease(Ease::Linear),
            Some(trigger),
        );
        let mut p = page();
        // range 1000 .. 2500
        p.view.scroll_y = 1750.0;
        d.tick(0.016, &p);
        let y = d.style(section).unwrap().get(Prop::YPercent).num();
        assert!((y + 25.0).abs() < 1e-4);
    }

    #[test]
    fn missing_trigger_bounds_keeps_animation_idle() {
        let mut d = Director::new();
        let ghost = d.target("ghost");
        let trigger = ScrollTrigger::new(ghost);
        d.tween_on_scroll(
            &[ghost],
            TweenVars::to(1.0).prop(Prop::X, 100.0),
            Some(trigger),
        );
        d.tick(5.0, &page());
        assert_eq!(d.style(ghost).unwrap().get(Prop::X), Value::Num(0.0));
    }

    #[test]
    fn overwrite_kills_conflicting_props() {
        let mut d = Director::new();
        let btn = d.target("btn");
        d.tween(
            &[btn],
            TweenVars::to(10.0).prop(Prop::Scale, 2.0).prop(Prop::X, 5.0),
        );
        d.tween(
            &[btn],
            TweenVars::to(0.3).prop(Prop::Scale, 1.0).overwrite(true),
        );
        assert_eq!(d.len(), 2);
        let p = page();
        d.tick(1.0, &p);
        assert_eq!(d.style(btn).unwrap().get(Prop::Scale), Value::Num(1.0));
        assert_ne!(d.style(btn).unwrap().get(Prop::X), Value::Num(0.0));

        d.tween(&[btn], TweenVars::to(0.3).prop(Prop::X, 0.0).overwrite(true));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn dispose_stops_further_writes() {
        let mut d = Director::new();
        let a = d.target("a");
        let id = d
            .tween(&[a], TweenVars::to(1.0).prop(Prop::X, 10.0).ease(Ease::Linear))
            .unwrap();
        let p = page();
        d.tick(0.5, &p);
        assert!(d.dispose(id));
        assert!(!d.dispose(id));
        d.tick(0.5, &p);
        assert_eq!(d.style(a).unwrap().get(Prop::X), Value::Num(5.0));
    }

    #[test]
    fn overlapping_timeline_lands_on_end_values() {
        let mut d = Director::new();
        let a = d.target("a");
        let b = d.target("b");
        let mut tl = Timeline::new(3.5);
        tl.add(
            Tween::new(&[a], TweenVars::from(1.2).prop(Prop::Opacity, 0.0)),
            crate::timeline::Position::Sequence,
        )
        .add(
            Tween::new(&[b], TweenVars::from(1.0).prop(Prop::Opacity, 0.0)),
            "-=0.7".parse().unwrap(),
        );
        d.add(tl, None).unwrap();
        let p = page();
        for _ in 0..200 {
            d.tick(0.05, &p);
        }
        assert!(d.is_empty());
        assert_eq!(d.style(a).unwrap().get(Prop::Opacity), Value::Num(1.0));
        assert_eq!(d.style(b).unwrap().get(Prop::Opacity), Value::Num(1.0));
    }

    #[test]
    fn scrub_without_bounds_ignores_wall_clock() {
        let mut d = Director::new();
        let ghost = d.target("ghost");
        let trigger = ScrollTrigger::new(ghost).scrub(Scrub::Instant);
        d.tween_on_scroll(
            &[ghost],
            TweenVars::to(1.0).prop(Prop::X, 100.0).ease(Ease::Linear),
            Some(trigger),
        );
        let p = page();
        for _ in 0..10 {
            d.tick(0.25, &p);
        }
        assert_eq!(d.style(ghost).unwrap().get(Prop::X), Value::Num(0.0));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn closed_director_refuses_new_work() {
        let mut d = Director::new();
        let a = d.target("a");
        d.tween(&[a], TweenVars::to(1.0).prop(Prop::X, 10.0));
        d.close();
        assert!(d.is_empty());
        assert!(d
            .tween(&[a], TweenVars::to(0.3).prop(Prop::X, 5.0).overwrite(true))
            .is_none());
        let late = Timeline::single(Tween::new(&[a], TweenVars::to(1.0).prop(Prop::Y, 1.0)));
        assert!(d.add(late, None).is_none());
        d.tick(1.0, &page());
        assert_eq!(d.style(a).unwrap().get(Prop::X), Value::Num(0.0));
    }

    #[test]
    fn seed_does_not_override_animated_values() {
        let mut d = Director::new();
        let a = d.target("a");
        d.seed(a, Prop::Counter, Value::Num(0.0));
        d.seed(a, Prop::Counter, Value::Num(7.0));
        assert_eq!(d.style(a).unwrap().get(Prop::Counter), Value::Num(0.0));
    }
}
