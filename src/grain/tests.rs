use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::config::GrainSettings;

#[test]
fn pattern_density_bounds() {
    let mut rng = StdRng::seed_from_u64(11);
    assert_eq!(GrainPattern::random(0.0, &mut rng).speck_count(), 0);

    let full = GrainPattern::random(1.0, &mut rng);
    assert_eq!(
        full.speck_count(),
        PATTERN_WIDTH as usize * PATTERN_HEIGHT as usize
    );
}

#[test]
fn pattern_tiles_across_the_screen() {
    let mut rng = StdRng::seed_from_u64(5);
    let p = GrainPattern::random(0.3, &mut rng);
    for (x, y) in [(0, 0), (3, 7), (63, 23)] {
        assert_eq!(p.speck_at(x, y), p.speck_at(x + PATTERN_WIDTH, y));
        assert_eq!(p.speck_at(x, y), p.speck_at(x, y + 2 * PATTERN_HEIGHT));
    }
}

#[test]
fn disabled_grain_has_no_pattern_and_never_ticks() {
    let mut grain = Grain::start(&GrainSettings {
        enabled: false,
        ..GrainSettings::default()
    });
    assert!(!grain.is_enabled());
    assert!(!grain.tick());
    assert!(grain.pattern().is_none());
}
