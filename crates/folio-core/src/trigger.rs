//! Scroll triggers: binding an animation to an element's position in the
//! viewport.
//!
//! Positions are document coordinates in CSS pixels. The trigger range runs
//! from the scroll offset at which `start` lines up to the one at which `end`
//! lines up; crossing the range boundaries fires the four toggle callbacks.

use crate::error::ParseError;
use crate::tween::TargetId;
use smallvec::SmallVec;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    Percent(f32),
    Px(f32),
}

impl Edge {
    fn offset(self, extent: f32) -> f32 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => extent * 0.5,
            Edge::Bottom => extent,
            Edge::Percent(p) => extent * p / 100.0,
            Edge::Px(px) => px,
        }
    }
}

impl FromStr for Edge {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::Anchor(s.to_string());
        match s {
            "top" | "left" => Ok(Edge::Top),
            "center" => Ok(Edge::Center),
            "bottom" | "right" => Ok(Edge::Bottom),
            _ => {
                if let Some(p) = s.strip_suffix('%') {
                    p.parse().map(Edge::Percent).map_err(|_| err())
                } else {
                    s.strip_suffix("px")
                        .unwrap_or(s)
                        .parse()
                        .map(Edge::Px)
                        .map_err(|_| err())
                }
            }
        }
    }
}

/// `"<element edge> <viewport marker>"`, e.g. `"top 80%"`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub element: Edge,
    pub viewport: Edge,
}

impl Anchor {
    pub const fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this anchor lines up.
    pub fn scroll_offset(&self, bounds: Bounds, viewport_height: f32) -> f32 {
        bounds.top + self.element.offset(bounds.height) - self.viewport.offset(viewport_height)
    }
}

impl FromStr for Anchor {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.split_whitespace();
        let (Some(el), Some(vp), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseError::Anchor(raw.to_string()));
        };
        Ok(Self {
            element: el.parse()?,
            viewport: vp.parse()?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    Reset,
    Complete,
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "none" => Action::None,
            "play" => Action::Play,
            "pause" => Action::Pause,
            "resume" => Action::Resume,
            "reverse" => Action::Reverse,
            "restart" => Action::Restart,
            "reset" => Action::Reset,
            "complete" => Action::Complete,
            _ => return Err(ParseError::ToggleActions(s.to_string())),
        })
    }
}

/// Actions for onEnter, onLeave, onEnterBack and onLeaveBack, in that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: Action,
    pub on_leave: Action,
    pub on_enter_back: Action,
    pub on_leave_back: Action,
}

impl Default for ToggleActions {
    fn default() -> Self {
        Self {
            on_enter: Action::Play,
            on_leave: Action::None,
            on_enter_back: Action::None,
            on_leave_back: Action::None,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parsed = raw
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<SmallVec<[Action; 4]>, _>>()
            .map_err(|_| ParseError::ToggleActions(raw.to_string()))?;
        match parsed.as_slice() {
            &[on_enter, on_leave, on_enter_back, on_leave_back] => Ok(Self {
                on_enter,
                on_leave,
                on_enter_back,
                on_leave_back,
            }),
            _ => Err(ParseError::ToggleActions(raw.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scrub {
    Off,
    /// Playhead follows scroll progress exactly.
    Instant,
    /// Playhead eases toward scroll progress with this time constant.
    Smooth(f32),
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Bounds {
    pub top: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ScrollView {
    pub scroll_y: f32,
    pub viewport_height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Region {
    Before,
    Active,
    After,
}

#[derive(Clone, Debug)]
pub struct ScrollTrigger {
    pub trigger: TargetId,
    pub start: Anchor,
    pub end: Anchor,
    pub actions: ToggleActions,
    pub scrub: Scrub,
    region: Region,
}

impl ScrollTrigger {
    pub fn new(trigger: TargetId) -> Self {
        Self {
            trigger,
            start: Anchor::new(Edge::Top, Edge::Bottom),
            end: Anchor::new(Edge::Bottom, Edge::Top),
            actions: ToggleActions::default(),
            scrub: Scrub::Off,
            region: Region::Before,
        }
    }

    pub fn start(mut self, anchor: &str) -> Result<Self, ParseError> {
        self.start = anchor.parse()?;
        Ok(self)
    }

    pub fn end(mut self, anchor: &str) -> Result<Self, ParseError> {
        self.end = anchor.parse()?;
        Ok(self)
    }

    pub fn toggle_actions(mut self, actions: &str) -> Result<Self, ParseError> {
        self.actions = actions.parse()?;
        Ok(self)
    }

    pub fn scrub(mut self, scrub: Scrub) -> Self {
        self.scrub = scrub;
        self
    }

    pub fn range(&self, bounds: Bounds, view: ScrollView) -> (f32, f32) {
        let start = self.start.scroll_offset(bounds, view.viewport_height);
        let end = self.end.scroll_offset(bounds, view.viewport_height);
        (start, end.max(start))
    }

    /// Position of the scroll offset within the range, clamped to 0..=1.
    pub fn progress(&self, bounds: Bounds, view: ScrollView) -> f32 {
        let (start, end) = self.range(bounds, view);
        if end - start <= f32::EPSILON {
            return if view.scroll_y >= start { 1.0 } else { 0.0 };
        }
        ((view.scroll_y - start) / (end - start)).clamp(0.0, 1.0)
    }

    fn region_at(&self, bounds: Bounds, view: ScrollView) -> Region {
        let (start, end) = self.range(bounds, view);
        if view.scroll_y < start {
            Region::Before
        } else if view.scroll_y > end {
            Region::After
        } else {
            Region::Active
        }
    }

    /// Move to the region for the current scroll offset and return the toggle
    /// actions fired on the way, skipping `none`.
    pub fn advance(&mut self, bounds: Bounds, view: ScrollView) -> SmallVec<[Action; 2]> {
        let next = self.region_at(bounds, view);
        let a = self.actions;
        let fired: SmallVec<[Action; 2]> = match (self.region, next) {
            (Region::Before, Region::Active) => smallvec::smallvec![a.on_enter],
            (Region::Before, Region::After) => smallvec::smallvec![a.on_enter, a.on_leave],
            (Region::Active, Region::After) => smallvec::smallvec![a.on_leave],
            (Region::After, Region::Active) => smallvec::smallvec![a.on_enter_back],
            (Region::After, Region::Before) => {
                smallvec::smallvec![a.on_enter_back, a.on_leave_back]
            }
            (Region::Active, Region::Before) => smallvec::smallvec![a.on_leave_back],
            _ => SmallVec::new(),
        };
        self.region = next;
        fired.into_iter().filter(|x| *x != Action::None).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW_H: f32 = 1000.0;

    fn view(scroll_y: f32) -> ScrollView {
        ScrollView {
            scroll_y,
            viewport_height: VIEW_H,
        }
    }

    fn section() -> Bounds {
        Bounds {
            top: 2000.0,
            height: 600.0,
        }
    }

    #[test]
    fn parses_anchors() {
        let a: Anchor = "top 80%".parse().unwrap();
        assert_eq!(a, Anchor::new(Edge::Top, Edge::Percent(80.0)));
        let a: Anchor = "bottom top".parse().unwrap();
        assert_eq!(a, Anchor::new(Edge::Bottom, Edge::Top));
        let a: Anchor = "center 100px".parse().unwrap();
        assert_eq!(a, Anchor::new(Edge::Center, Edge::Px(100.0)));
        assert!("top".parse::<Anchor>().is_err());
        assert!("top 80% extra".parse::<Anchor>().is_err());
        assert!("middle 80%".parse::<Anchor>().is_err());
    }

    #[test]
    fn parses_toggle_actions() {
        let t: ToggleActions = "play none none reverse".parse().unwrap();
        assert_eq!(t.on_enter, Action::Play);
        assert_eq!(t.on_leave_back, Action::Reverse);
        assert!("play none".parse::<ToggleActions>().is_err());
        assert!("play none none rewind".parse::<ToggleActions>().is_err());
    }

    #[test]
    fn range_lines_element_up_with_viewport_marker() {
        let st = ScrollTrigger::new(TargetId(0))
            .start("top 80%")
            .unwrap()
            .end("bottom 20%")
            .unwrap();
        let (s, e) = st.range(section(), view(0.0));
        assert_eq!(s, 2000.0 - 800.0);
        assert_eq!(e, 2600.0 - 200.0);
    }

    #[test]
    fn progress_is_clamped() {
        let st = ScrollTrigger::new(TargetId(0));
        assert_eq!(st.progress(section(), view(0.0)), 0.0);
        assert_eq!(st.progress(section(), view(10_000.0)), 1.0);
        // default range: top bottom .. bottom top = 1000 .. 2600
        assert!((st.progress(section(), view(1800.0)) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn toggle_actions_fire_per_transition() {
        let mut st = ScrollTrigger::new(TargetId(0))
            .start("top 80%")
            .unwrap()
            .toggle_actions("play none none reverse")
            .unwrap();
        assert!(st.advance(section(), view(0.0)).is_empty());
        assert_eq!(st.advance(section(), view(1300.0)).as_slice(), &[Action::Play]);
        assert!(st.advance(section(), view(1400.0)).is_empty());
        assert_eq!(st.advance(section(), view(0.0)).as_slice(), &[Action::Reverse]);
        assert_eq!(st.region, Region::Before);
    }

    #[test]
    fn jumping_past_the_range_fires_enter_and_leave() {
        let mut st = ScrollTrigger::new(TargetId(0))
            .toggle_actions("restart complete none none")
            .unwrap();
        assert_eq!(
            st.advance(section(), view(5000.0)).as_slice(),
            &[Action::Restart, Action::Complete]
        );
        assert_eq!(st.region, Region::After);
    }
}
