use rand::Rng;

pub const ROUND_TILES: usize = 9;

const BASE_MARGIN: u16 = 100;

// Channels may sit past 255: the odd tile adds the margin unclamped and
// only the renderer clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb
{
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl Rgb
{
    fn offset(self, margin: u16) -> Self
    {
        Self {
            r: self.r + margin,
            g: self.g + margin,
            b: self.b + margin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile
{
    pub color: Rgb,
    pub is_odd: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round
{
    tiles: Vec<Tile>,
}

impl Round
{
    pub fn tiles(&self) -> &[Tile]
    {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile>
    {
        self.tiles.get(index)
    }
}

pub fn generate_round(rng: &mut impl Rng, tile_count: usize, margin: u16) -> Round
{
    let base = random_color(rng);
    let mut tiles = vec![
        Tile {
            color: base,
            is_odd: false,
        };
        tile_count
    ];

    let odd_index = rng.gen_range(0..tile_count);
    tiles[odd_index] = Tile {
        color: base.offset(margin),
        is_odd: true,
    };

    Round { tiles }
}

pub fn margin_for_score(score: u32) -> u16
{
    (BASE_MARGIN as u32 / score.max(1)) as u16
}

fn random_color(rng: &mut impl Rng) -> Rgb
{
    Rgb {
        r: rng.gen_range(0..=255),
        g: rng.gen_range(0..=255),
        b: rng.gen_range(0..=255),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng(seed: u64) -> StdRng
    {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn round_has_nine_tiles_with_exactly_one_odd()
    {
        for seed in 0..50 {
            let round = generate_round(&mut rng(seed), ROUND_TILES, 100);
            assert_eq!(round.tiles().len(), ROUND_TILES);
            let odd_count = round.tiles().iter().filter(|tile| tile.is_odd).count();
            assert_eq!(odd_count, 1);
        }
    }

    #[test]
    fn odd_tile_is_base_plus_margin_and_rest_match_base()
    {
        let margin = 33;
        for seed in 0..50 {
            let round = generate_round(&mut rng(seed), ROUND_TILES, margin);
            let base = round
                .tiles()
                .iter()
                .find(|tile| !tile.is_odd)
                .map(|tile| tile.color)
                .unwrap();

            for tile in round.tiles() {
                if tile.is_odd {
                    assert_eq!(tile.color.r, base.r + margin);
                    assert_eq!(tile.color.g, base.g + margin);
                    assert_eq!(tile.color.b, base.b + margin);
                } else {
                    assert_eq!(tile.color, base);
                }
            }
        }
    }

    #[test]
    fn base_channels_stay_within_byte_range()
    {
        for seed in 0..50 {
            let round = generate_round(&mut rng(seed), ROUND_TILES, 100);
            let base = round
                .tiles()
                .iter()
                .find(|tile| !tile.is_odd)
                .map(|tile| tile.color)
                .unwrap();
            assert!(base.r <= 255 && base.g <= 255 && base.b <= 255);
        }
    }

    #[test]
    fn odd_channels_are_not_clamped_to_byte_range()
    {
        let mut exceeded = false;
        for seed in 0..50 {
            let round = generate_round(&mut rng(seed), ROUND_TILES, 100);
            let odd = round.tiles().iter().find(|tile| tile.is_odd).unwrap();
            if odd.color.r > 255 || odd.color.g > 255 || odd.color.b > 255 {
                exceeded = true;
            }
        }
        assert!(exceeded);
    }

    #[test]
    fn every_tile_index_can_host_the_odd_tile()
    {
        let mut seen = [false; ROUND_TILES];
        for seed in 0..200 {
            let round = generate_round(&mut rng(seed), ROUND_TILES, 100);
            let index = round
                .tiles()
                .iter()
                .position(|tile| tile.is_odd)
                .unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|hosted| *hosted));
    }

    #[test]
    fn margin_shrinks_with_score_and_score_zero_is_clamped()
    {
        assert_eq!(margin_for_score(0), 100);
        assert_eq!(margin_for_score(1), 100);
        assert_eq!(margin_for_score(2), 50);
        assert_eq!(margin_for_score(3), 33);
        assert_eq!(margin_for_score(100), 1);
        assert_eq!(margin_for_score(101), 0);
    }

    #[test]
    fn zero_margin_round_still_marks_one_odd_tile()
    {
        let round = generate_round(&mut rng(3), ROUND_TILES, 0);
        let odd = round.tiles().iter().find(|tile| tile.is_odd).unwrap();
        let plain = round.tiles().iter().find(|tile| !tile.is_odd).unwrap();
        assert_eq!(odd.color, plain.color);
    }
}
