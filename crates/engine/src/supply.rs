use rand::Rng;

use crate::Color;

/// Tile supply: counts of tiles in bag and discard
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TileSupply {
    /// Count of tiles of each color in the bag
    pub bag: Vec<u16>,
    /// Count of tiles of each color in the discard ("lid")
    pub discard: Vec<u16>,
}

impl TileSupply {
    /// Full bag of `per_color` tiles for each of `num_colors` colors.
    pub fn full(num_colors: usize, per_color: u16) -> Self {
        TileSupply {
            bag: vec![per_color; num_colors],
            discard: vec![0; num_colors],
        }
    }

    pub fn bag_len(&self) -> usize {
        self.bag.iter().map(|&n| n as usize).sum()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.iter().map(|&n| n as usize).sum()
    }

    /// Tiles available for drawing, counting the discard that refills the bag.
    pub fn available(&self) -> usize {
        self.bag_len() + self.discard_len()
    }

    pub fn discard_tiles(&mut self, color: Color, count: usize) {
        self.discard[color.index()] += count as u16;
    }

    /// Draw a single random tile from the bag, refilling from discard if needed.
    /// Returns None if both bag and discard are empty.
    pub fn draw(&mut self, rng: &mut impl Rng) -> Option<Color> {
        if self.bag_len() == 0 {
            if self.discard_len() == 0 {
                return None;
            }
            std::mem::swap(&mut self.bag, &mut self.discard);
        }

        let mut pick = rng.random_range(0..self.bag_len());
        for (i, count) in self.bag.iter_mut().enumerate() {
            let n = *count as usize;
            if pick < n {
                *count -= 1;
                return Color::from_index(i);
            }
            pick -= n;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_draw_empties_bag_then_refills_from_discard() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut supply = TileSupply::full(2, 2);

        for _ in 0..4 {
            assert!(supply.draw(&mut rng).is_some());
        }
        assert_eq!(supply.bag_len(), 0);

        supply.discard_tiles(Color(1), 3);
        assert_eq!(supply.draw(&mut rng), Some(Color(1)));
        assert_eq!(supply.bag, vec![0, 2]);
        assert_eq!(supply.discard_len(), 0);
    }

    #[test]
    fn test_draw_from_exhausted_supply() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut supply = TileSupply::full(3, 0);

        assert_eq!(supply.available(), 0);
        assert_eq!(supply.draw(&mut rng), None);
    }

    #[test]
    fn test_draws_are_reproducible_from_seed() {
        let draws = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut supply = TileSupply::full(5, 20);
            (0..20).map(|_| supply.draw(&mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(draws(9), draws(9));
    }
}
