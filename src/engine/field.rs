use super::random::{char_at, sample, MATRIX_CHARS};

/// Number of particles in each decorative field.
pub const FIELD_SIZE: usize = 50;

/// Per-index seed multipliers. Four pairwise-different factors decorrelate
/// the four samples drawn for the same index.
const SEED_MULTIPLIERS: [u64; 4] = [123, 456, 789, 321];

/// One static background particle, placed once per page mount.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundParticle {
    pub id: usize,
    /// Horizontal position as a percentage of the page width.
    pub left: f64,
    /// Vertical position as a percentage of the page height.
    pub top: f64,
    /// Twinkle phase offset in seconds.
    pub delay: f64,
    /// Twinkle cycle duration in seconds.
    pub duration: f64,
}

/// One matrix-rain column of the splash screen.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixColumn {
    pub id: usize,
    /// Horizontal position as a percentage of the page width.
    pub left: f64,
    /// Fall start delay in seconds.
    pub delay: f64,
    /// Duration of one full fall in seconds.
    pub duration: f64,
    /// The glyph this column rains.
    pub glyph: char,
}

/// The background particle field with the canonical layout.
pub fn background_field(count: usize) -> Vec<BackgroundParticle> {
    background_field_with(count, 0)
}

/// Background field with an index offset. Offset 0 is the canonical layout;
/// a nonzero offset shifts every derived seed, producing a different but
/// equally stable field.
pub fn background_field_with(count: usize, offset: u64) -> Vec<BackgroundParticle> {
    (0..count)
        .map(|i| {
            let [s1, s2, s3, s4] = index_seeds(i, offset);
            BackgroundParticle {
                id: i,
                left: sample(s1) * 100.0,
                top: sample(s2) * 100.0,
                delay: sample(s3) * 3.0,
                duration: 3.0 + sample(s4) * 3.0,
            }
        })
        .collect()
}

/// The matrix-rain column field with the canonical layout.
pub fn matrix_field(count: usize) -> Vec<MatrixColumn> {
    matrix_field_with(count, 0)
}

/// Matrix-rain field with an index offset; see [`background_field_with`].
///
/// Columns have no vertical coordinate, so the second and third seeds drive
/// timing and the fourth picks the glyph.
pub fn matrix_field_with(count: usize, offset: u64) -> Vec<MatrixColumn> {
    (0..count)
        .map(|i| {
            let [s1, s2, s3, s4] = index_seeds(i, offset);
            let glyph_index = (sample(s4) * MATRIX_CHARS.len() as f64) as usize;
            MatrixColumn {
                id: i,
                left: sample(s1) * 100.0,
                delay: sample(s2) * 3.0,
                duration: 3.0 + sample(s3) * 3.0,
                glyph: char_at(MATRIX_CHARS, glyph_index),
            }
        })
        .collect()
}

/// The four derived seeds for one field index.
fn index_seeds(index: usize, offset: u64) -> [u64; 4] {
    SEED_MULTIPLIERS.map(|m| offset.wrapping_add(index as u64).wrapping_mul(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_fields_are_stable_across_builds() {
        assert_eq!(background_field(FIELD_SIZE), background_field(FIELD_SIZE));
        assert_eq!(matrix_field(FIELD_SIZE), matrix_field(FIELD_SIZE));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    fn test_left_comes_from_first_multiplier(#[case] i: usize) {
        let expected = sample(i as u64 * 123) * 100.0;
        assert_eq!(background_field(5)[i].left, expected);
        assert_eq!(matrix_field(5)[i].left, expected);
    }

    #[test]
    fn test_background_seed_roles() {
        let field = background_field(8);
        for (i, particle) in field.iter().enumerate() {
            let i = i as u64;
            assert_eq!(particle.top, sample(i * 456) * 100.0);
            assert_eq!(particle.delay, sample(i * 789) * 3.0);
            assert_eq!(particle.duration, 3.0 + sample(i * 321) * 3.0);
        }
    }

    #[test]
    fn test_matrix_seed_roles() {
        let field = matrix_field(8);
        for (i, column) in field.iter().enumerate() {
            let i = i as u64;
            assert_eq!(column.delay, sample(i * 456) * 3.0);
            assert_eq!(column.duration, 3.0 + sample(i * 789) * 3.0);
            let glyph_index = (sample(i * 321) * MATRIX_CHARS.len() as f64) as usize;
            assert_eq!(column.glyph, MATRIX_CHARS[glyph_index]);
        }
    }

    #[test]
    fn test_values_land_in_semantic_ranges() {
        for particle in background_field(FIELD_SIZE) {
            assert!((0.0..100.0).contains(&particle.left));
            assert!((0.0..100.0).contains(&particle.top));
            assert!((0.0..3.0).contains(&particle.delay));
            assert!((3.0..6.0).contains(&particle.duration));
        }
        for column in matrix_field(FIELD_SIZE) {
            assert!((0.0..100.0).contains(&column.left));
            assert!((0.0..3.0).contains(&column.delay));
            assert!((3.0..6.0).contains(&column.duration));
            assert!(MATRIX_CHARS.contains(&column.glyph));
        }
    }

    #[test]
    fn test_ids_follow_index_order() {
        let ids: Vec<_> = matrix_field(10).iter().map(|c| c.id).collect();
        assert_eq!(ids, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_offset_shifts_the_sequence() {
        let shifted = background_field_with(5, 7);
        for (i, particle) in shifted.iter().enumerate() {
            assert_eq!(particle.left, sample((7 + i as u64) * 123) * 100.0);
        }
        assert_ne!(shifted, background_field(5));
    }
}
