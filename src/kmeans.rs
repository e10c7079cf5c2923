//! K-means clustering of colors in RGB space.
//!
//! Colors are projected onto `(red, green, blue)` coordinates and clustered
//! with a fixed number of Lloyd iterations (no early stop). Each iteration
//! assigns every point to its nearest mean, then moves each mean to the
//! average of its members.
//!
//! Failure is explicit rather than left to a solver:
//! - `k = 0` with data is [`ClusterError::NoClusters`];
//! - a keep-existing guess of the wrong size is [`ClusterError::SeedCountMismatch`];
//! - a cluster that loses all members is re-seeded with the point farthest
//!   from its own mean; if every point already sits on a mean (fewer
//!   distinct colors than clusters) the result is
//!   [`ClusterError::InsufficientDiversity`];
//! - a non-finite centroid is [`ClusterError::NonFinite`].

use std::collections::HashSet;

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::color::Color;
use crate::config::ClusterConfig;
use crate::error::ClusterError;

type Point = [f64; 3];

/// How the initial means are placed.
#[derive(Clone, Copy, Debug)]
pub enum SeedMode<'a> {
    /// Start from the caller's guess, which must hold exactly `k` colors.
    KeepExisting(&'a [Color]),
    /// Sample data points at random, each new one weighted by its squared
    /// distance to the means chosen so far.
    RandomSpread,
    /// Deterministic farthest-point traversal starting at the first data point.
    StaticSpread,
}

impl SeedMode<'_> {
    fn name(&self) -> &'static str {
        match self {
            SeedMode::KeepExisting(_) => "keep-existing",
            SeedMode::RandomSpread => "random-spread",
            SeedMode::StaticSpread => "static-spread",
        }
    }
}

/// Partition `colors` into `k` clusters with the default [`ClusterConfig`].
pub fn find_clusters(
    k: usize,
    seed: SeedMode<'_>,
    colors: &[Color],
) -> Result<Vec<Color>, ClusterError> {
    find_clusters_with(k, seed, colors, &ClusterConfig::default())
}

/// Partition `colors` into `k` clusters and return the centroid colors.
///
/// When `k >= colors.len()` no clustering happens and the input is returned
/// as-is.
pub fn find_clusters_with(
    k: usize,
    seed: SeedMode<'_>,
    colors: &[Color],
    config: &ClusterConfig,
) -> Result<Vec<Color>, ClusterError> {
    if k >= colors.len() {
        debug!(k, colors = colors.len(), "not more colors than clusters; skipping k-means");
        return Ok(colors.to_vec());
    }
    if k == 0 {
        return Err(ClusterError::NoClusters {
            points: colors.len(),
        });
    }

    let points: Vec<Point> = colors.iter().map(Color::rgb_point).collect();
    let mut means = match seed {
        SeedMode::KeepExisting(guess) => {
            if guess.len() != k {
                return Err(ClusterError::SeedCountMismatch {
                    expected: k,
                    actual: guess.len(),
                });
            }
            guess.iter().map(Color::rgb_point).collect()
        }
        SeedMode::RandomSpread => {
            let mut rng = match config.random_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            random_spread(&points, k, &mut rng)?
        }
        SeedMode::StaticSpread => static_spread(&points, k)?,
    };

    let parallel = points.len() >= config.parallel_threshold;
    debug!(
        k,
        points = points.len(),
        seed = seed.name(),
        iterations = config.iterations,
        parallel,
        "running k-means"
    );

    let mut assignments = vec![0usize; points.len()];
    let mut reseeded = false;
    for iteration in 0..config.iterations {
        assign(&points, &means, &mut assignments, parallel);
        let counts = update_means(&points, &assignments, &mut means);
        reseeded = recover_dead_clusters(&points, &assignments, &counts, &mut means, iteration)?;
    }
    if reseeded {
        // Re-seeded means still sit on raw points; settle membership once more.
        assign(&points, &means, &mut assignments, parallel);
        update_means(&points, &assignments, &mut means);
    }

    means
        .iter()
        .enumerate()
        .map(|(index, mean)| {
            if mean.iter().all(|v| v.is_finite()) {
                Ok(to_color(mean))
            } else {
                Err(ClusterError::NonFinite { index })
            }
        })
        .collect()
}

fn distance_squared(a: &Point, b: &Point) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Index of the nearest mean and the squared distance to it; ties go to the lower index.
fn nearest(point: &Point, means: &[Point]) -> (usize, f64) {
    means
        .iter()
        .map(|mean| distance_squared(point, mean))
        .enumerate()
        .fold((0, f64::INFINITY), |best, (i, d)| if d < best.1 { (i, d) } else { best })
}

fn assign(points: &[Point], means: &[Point], assignments: &mut [usize], parallel: bool) {
    if parallel {
        assignments
            .par_iter_mut()
            .zip(points.par_iter())
            .for_each(|(slot, point)| *slot = nearest(point, means).0);
    } else {
        for (slot, point) in assignments.iter_mut().zip(points) {
            *slot = nearest(point, means).0;
        }
    }
}

/// Move each mean to the average of its members and return the member counts.
/// Means without members are left where they are.
fn update_means(points: &[Point], assignments: &[usize], means: &mut [Point]) -> Vec<usize> {
    let mut sums = vec![[0.0f64; 3]; means.len()];
    let mut counts = vec![0usize; means.len()];
    for (point, &cluster) in points.iter().zip(assignments) {
        for (sum, v) in sums[cluster].iter_mut().zip(point) {
            *sum += v;
        }
        counts[cluster] += 1;
    }
    for ((mean, sum), &count) in means.iter_mut().zip(&sums).zip(&counts) {
        if count > 0 {
            *mean = sum.map(|s| s / count as f64);
        }
    }
    counts
}

fn recover_dead_clusters(
    points: &[Point],
    assignments: &[usize],
    counts: &[usize],
    means: &mut [Point],
    iteration: usize,
) -> Result<bool, ClusterError> {
    let dead: Vec<usize> = (0..counts.len()).filter(|&i| counts[i] == 0).collect();
    if dead.is_empty() {
        return Ok(false);
    }

    // Surviving means have already moved; measure against their new positions.
    let mut spread: Vec<f64> = points
        .iter()
        .zip(assignments)
        .map(|(point, &cluster)| distance_squared(point, &means[cluster]))
        .collect();

    for cluster in dead {
        let (farthest, distance) = spread
            .iter()
            .copied()
            .enumerate()
            .fold((0, 0.0), |best, (i, d)| if d > best.1 { (i, d) } else { best });
        if distance <= 0.0 {
            debug!(k = means.len(), iteration, "cluster left empty with no point to re-seed it");
            return Err(ClusterError::InsufficientDiversity {
                k: means.len(),
                distinct: count_distinct(points),
            });
        }
        debug!(cluster, iteration, "re-seeding empty cluster");
        means[cluster] = points[farthest];
        spread[farthest] = 0.0;
    }
    Ok(true)
}

fn random_spread(points: &[Point], k: usize, rng: &mut impl Rng) -> Result<Vec<Point>, ClusterError> {
    let mut means = Vec::with_capacity(k);
    means.push(points[rng.gen_range(0..points.len())]);
    while means.len() < k {
        let weights: Vec<f64> = points.iter().map(|p| nearest(p, &means).1).collect();
        let chooser = WeightedIndex::new(&weights).map_err(|_| ClusterError::InsufficientDiversity {
            k,
            distinct: count_distinct(points),
        })?;
        means.push(points[chooser.sample(&mut *rng)]);
    }
    Ok(means)
}

fn static_spread(points: &[Point], k: usize) -> Result<Vec<Point>, ClusterError> {
    let mut means = Vec::with_capacity(k);
    means.push(points[0]);
    let mut closest: Vec<f64> = points.iter().map(|p| distance_squared(p, &points[0])).collect();
    while means.len() < k {
        let (farthest, distance) = closest
            .iter()
            .copied()
            .enumerate()
            .fold((0, 0.0), |best, (i, d)| if d > best.1 { (i, d) } else { best });
        if distance <= 0.0 {
            return Err(ClusterError::InsufficientDiversity {
                k,
                distinct: count_distinct(points),
            });
        }
        let mean = points[farthest];
        means.push(mean);
        for (c, p) in closest.iter_mut().zip(points) {
            *c = c.min(distance_squared(p, &mean));
        }
    }
    Ok(means)
}

fn count_distinct(points: &[Point]) -> usize {
    points
        .iter()
        .map(|p| p.map(f64::to_bits))
        .collect::<HashSet<_>>()
        .len()
}

fn to_color(mean: &Point) -> Color {
    let [r, g, b] = mean.map(|v| v.round().clamp(0.0, 255.0) as u8);
    Color::new(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn two_groups() -> Vec<Color> {
        vec![
            Color::new(250, 0, 0),
            Color::new(240, 10, 5),
            Color::new(255, 5, 10),
            Color::new(0, 0, 250),
            Color::new(10, 5, 240),
            Color::new(5, 10, 255),
        ]
    }

    fn assert_red_and_blue(centroids: &[Color]) {
        assert_eq!(centroids.len(), 2);
        assert!(centroids.iter().any(|c| c.red() > 200 && c.blue() < 50));
        assert!(centroids.iter().any(|c| c.blue() > 200 && c.red() < 50));
    }

    #[test]
    fn identity_when_k_covers_input() {
        let colors = two_groups();
        let out = find_clusters(6, SeedMode::StaticSpread, &colors).unwrap();
        assert_eq!(out, colors);
        let out = find_clusters(10, SeedMode::RandomSpread, &colors).unwrap();
        assert_eq!(out, colors);
    }

    #[test]
    fn empty_input_is_identity() {
        assert_eq!(find_clusters(3, SeedMode::StaticSpread, &[]).unwrap(), vec![]);
    }

    #[test]
    fn zero_clusters_is_an_error() {
        let err = find_clusters(0, SeedMode::StaticSpread, &two_groups()).unwrap_err();
        assert_eq!(err, ClusterError::NoClusters { points: 6 });
    }

    #[test]
    fn guess_must_have_k_colors() {
        let guess = [Color::new(255, 0, 0)];
        let err = find_clusters(2, SeedMode::KeepExisting(&guess), &two_groups()).unwrap_err();
        assert_eq!(err, ClusterError::SeedCountMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn separates_groups_with_every_seed_mode() {
        let colors = two_groups();
        let guess = [Color::new(255, 0, 0), Color::new(0, 255, 255)];
        let seeded = ClusterConfig {
            random_seed: Some(7),
            ..ClusterConfig::default()
        };
        assert_red_and_blue(&find_clusters(2, SeedMode::KeepExisting(&guess), &colors).unwrap());
        assert_red_and_blue(&find_clusters(2, SeedMode::StaticSpread, &colors).unwrap());
        assert_red_and_blue(
            &find_clusters_with(2, SeedMode::RandomSpread, &colors, &seeded).unwrap(),
        );
    }

    #[test]
    fn centroids_are_group_means() {
        let colors = vec![
            Color::new(10, 10, 10),
            Color::new(20, 20, 20),
            Color::new(200, 200, 200),
            Color::new(210, 210, 210),
        ];
        let mut out = find_clusters(2, SeedMode::StaticSpread, &colors).unwrap();
        out.sort();
        assert_eq!(out, vec![Color::new(15, 15, 15), Color::new(205, 205, 205)]);
    }

    #[test]
    fn seeded_random_spread_is_reproducible() {
        let config = ClusterConfig {
            random_seed: Some(42),
            ..ClusterConfig::default()
        };
        let colors: Vec<Color> = (0..50u8).map(|i| Color::new(i * 5, 255 - i * 3, i)).collect();
        let a = find_clusters_with(4, SeedMode::RandomSpread, &colors, &config).unwrap();
        let b = find_clusters_with(4, SeedMode::RandomSpread, &colors, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_cluster_is_reseeded() {
        // Nothing is green, so the green seed starts without members.
        let colors = two_groups();
        let guess = [Color::new(255, 0, 0), Color::new(0, 255, 0), Color::new(0, 0, 255)];
        let out = find_clusters(3, SeedMode::KeepExisting(&guess), &colors).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|c| c.green() < 50));
    }

    #[test]
    fn cluster_reseeded_on_last_iteration_is_settled() {
        let colors = two_groups();
        let guess = [Color::new(255, 0, 0), Color::new(0, 255, 0), Color::new(0, 0, 255)];
        let config = ClusterConfig {
            iterations: 1,
            ..ClusterConfig::default()
        };
        let out = find_clusters_with(3, SeedMode::KeepExisting(&guess), &colors, &config).unwrap();
        // The re-seeded point leaves the red cluster instead of being counted twice.
        assert_eq!(
            out,
            vec![Color::new(253, 3, 5), Color::new(240, 10, 5), Color::new(5, 5, 248)]
        );
    }

    #[test]
    fn too_few_distinct_colors_fails() {
        let mut colors = vec![Color::new(255, 0, 0); 5];
        colors.extend(vec![Color::new(0, 0, 255); 5]);
        let guess = [Color::new(255, 0, 0), Color::new(0, 255, 0), Color::new(0, 0, 255)];
        let err = find_clusters(3, SeedMode::KeepExisting(&guess), &colors).unwrap_err();
        assert_eq!(err, ClusterError::InsufficientDiversity { k: 3, distinct: 2 });
        assert!(find_clusters(3, SeedMode::StaticSpread, &colors).is_err());
        assert!(find_clusters(3, SeedMode::RandomSpread, &colors).is_err());
    }

    #[test]
    fn parallel_assignment_matches_sequential() {
        let colors: Vec<Color> = (0..=255u8)
            .map(|i| Color::new(i, i.wrapping_mul(7), 255 - i))
            .collect();
        let sequential = ClusterConfig {
            parallel_threshold: usize::MAX,
            ..ClusterConfig::default()
        };
        let parallel = ClusterConfig {
            parallel_threshold: 0,
            ..ClusterConfig::default()
        };
        assert_eq!(
            find_clusters_with(5, SeedMode::StaticSpread, &colors, &sequential).unwrap(),
            find_clusters_with(5, SeedMode::StaticSpread, &colors, &parallel).unwrap()
        );
    }

    proptest! {
        #[test]
        fn k_at_least_len_returns_input(
            colors in proptest::collection::vec(
                (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::new(r, g, b)),
                0..20,
            ),
            extra in 0usize..5,
        ) {
            let k = colors.len() + extra;
            let out = find_clusters(k, SeedMode::RandomSpread, &colors).unwrap();
            prop_assert_eq!(out, colors);
        }
    }
}
