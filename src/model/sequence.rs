//! Append-only colour sequence.

use super::color::Color;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ordered list of colours shown to the player.
///
/// Grows by one colour per round and offers no way to change or remove an
/// element once it has been appended.
///
/// ```rust
/// use recall::model::Sequence;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let mut sequence = Sequence::new();
/// let first = sequence.extend_random(&mut rng);
///
/// assert_eq!(sequence.len(), 1);
/// assert_eq!(sequence.get(0), Some(first));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    colors: Vec<Color>,
}

impl Sequence {
    pub fn new() -> Self {
        Self { colors: Vec::new() }
    }

    /// Append one uniformly drawn colour and return it.
    pub fn extend_random<R: Rng>(&mut self, rng: &mut R) -> Color {
        let color = Color::random(rng);
        self.colors.push(color);
        color
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.colors
    }

    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn extending_keeps_earlier_colors() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut sequence = Sequence::new();

        let first = sequence.extend_random(&mut rng);
        let snapshot = sequence.clone();
        sequence.extend_random(&mut rng);

        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence.get(0), Some(first));
        assert_eq!(&sequence.as_slice()[..1], snapshot.as_slice());
    }

    #[test]
    fn out_of_range_get_is_none() {
        let sequence = Sequence::new();
        assert!(sequence.is_empty());
        assert_eq!(sequence.get(0), None);
    }
}
