use crate::error::ParseError;
use crate::style::Prop;
use crate::tween::{StyleStore, TargetId, Tween};
use std::str::FromStr;

/// Where a child is placed when it is added to a timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// Right after the current end.
    Sequence,
    /// Relative to the current end (`"-=0.7"`, `"+=0.3"`).
    Offset(f32),
    /// Absolute time in seconds (`"1.5"`).
    At(f32),
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let s = raw.trim();
        let num = |n: &str| {
            n.trim()
                .parse::<f32>()
                .map_err(|_| ParseError::Position(raw.to_string()))
        };
        if s.is_empty() || s == ">" {
            Ok(Position::Sequence)
        } else if let Some(rest) = s.strip_prefix("-=") {
            Ok(Position::Offset(-num(rest)?))
        } else if let Some(rest) = s.strip_prefix("+=") {
            Ok(Position::Offset(num(rest)?))
        } else {
            Ok(Position::At(num(s)?.max(0.0)))
        }
    }
}

/// A sequence of tweens driven by one playhead.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    delay: f32,
    children: Vec<(f32, Tween)>,
    end: f32,
}

impl Timeline {
    pub fn new(delay: f32) -> Self {
        Self {
            delay: delay.max(0.0),
            children: Vec::new(),
            end: 0.0,
        }
    }

    /// A timeline holding a single tween at time zero.
    pub fn single(tween: Tween) -> Self {
        let mut tl = Self::new(0.0);
        tl.add(tween, Position::At(0.0));
        tl
    }

    pub fn add(&mut self, tween: Tween, pos: Position) -> &mut Self {
        let start = match pos {
            Position::Sequence => self.end,
            Position::Offset(o) => (self.end + o).max(0.0),
            Position::At(t) => t,
        };
        self.end = self.end.max(start + tween.duration());
        self.children.push((start, tween));
        self
    }

    pub fn start_of(&self, index: usize) -> Option<f32> {
        self.children.get(index).map(|(s, _)| *s)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.iter().all(|(_, t)| t.is_empty())
    }

    pub fn duration(&self) -> f32 {
        self.delay + self.end
    }

    /// Remove `props` on `id` from every child; empty children are dropped.
    pub fn kill(&mut self, id: TargetId, props: &[Prop]) -> bool {
        self.children.retain_mut(|(_, t)| !t.kill(id, props));
        self.children.is_empty()
    }

    pub fn render(&mut self, time: f32, store: &mut impl StyleStore) {
        let local = time - self.delay;
        for (start, child) in &mut self.children {
            child.render(local - *start, store);
        }
    }
}
