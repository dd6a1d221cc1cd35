use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Per-step operand order, indexed bottom-up like the proof: entry `i` is
/// `true` when the sibling paired with `proof[i]` is the left operand.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrientationPattern(Vec<bool>);

impl OrientationPattern {
    pub fn new(sides: Vec<bool>) -> Self {
        Self(sides)
    }

    /// Alternating pattern: the first step is left, the next right, and so on.
    pub fn alternating(height: u32) -> Self {
        Self((0..height).map(|i| i % 2 == 0).collect())
    }

    /// Every sibling on the left.
    pub fn all_left(height: u32) -> Self {
        Self(vec![true; height as usize])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// Orientation of step `index`. Indices past the end read as "right".
    pub fn is_left(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Truncate, or extend with the alternating default, so the pattern has
    /// exactly `height` entries.
    pub fn resized(&self, height: u32) -> Self {
        let height = height as usize;
        let mut sides: Vec<bool> = self.0.iter().copied().take(height).collect();
        sides.extend((sides.len()..height).map(|i| i % 2 == 0));
        Self(sides)
    }

    /// Flip step `index`. Returns `false` if the index is out of range.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.0.get_mut(index) {
            Some(side) => {
                *side = !*side;
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for OrientationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for side in &self.0 {
            f.write_str(if *side { "L" } else { "R" })?;
        }
        Ok(())
    }
}

/// Parses strings such as `LRRL` or `1001`, leaf step first.
impl FromStr for OrientationPattern {
    type Err = char;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| match c {
                'L' | 'l' | '1' => Ok(true),
                'R' | 'r' | '0' => Ok(false),
                other => Err(other),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}
