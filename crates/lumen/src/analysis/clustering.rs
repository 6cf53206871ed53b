//! K-means clustering over two-dimensional points and silhouette scoring.

use super::math::euclidean;
use super::random::RandomSource;

/// A point in the plane spanned by two numeric fields.
pub type Point = [f64; 2];

/// Outcome of a k-means run.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult {
    /// Cluster index per input point.
    pub assignments: Vec<usize>,
    pub centroids: Vec<Point>,
    /// Member count per cluster.
    pub sizes: Vec<usize>,
    /// Iterations performed, including the one that found no change.
    pub iterations: usize,
    /// Whether membership stabilised before the iteration cap.
    pub converged: bool,
}

impl KMeansResult {
    /// Number of clusters that received at least one point.
    pub fn non_empty_clusters(&self) -> usize {
        self.sizes.iter().filter(|&&s| s > 0).count()
    }
}

/// Lloyd's k-means.
///
/// Initial centroids are `k` distinct points drawn without replacement
/// through `rng`. Points go to the nearest centroid (ties to the lower
/// index), centroids move to the mean of their members, and the loop ends
/// when no assignment changes or after `max_iterations`. A cluster that
/// loses every member keeps its previous centroid.
///
/// Returns `None` when `k` or `max_iterations` is 0, or there are fewer
/// points than clusters.
pub fn kmeans(
    points: &[Point],
    k: usize,
    max_iterations: usize,
    rng: &mut dyn RandomSource,
) -> Option<KMeansResult> {
    let n = points.len();
    if k == 0 || max_iterations == 0 || n < k {
        return None;
    }

    let mut centroids: Vec<Point> = sample_without_replacement(n, k, rng)
        .into_iter()
        .map(|i| points[i])
        .collect();

    let mut assignments = vec![usize::MAX; n];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < max_iterations {
        iterations += 1;

        let next: Vec<usize> = points.iter().map(|p| nearest(p, &centroids)).collect();
        if next == assignments {
            converged = true;
            break;
        }
        assignments = next;

        let mut sums = vec![[0.0, 0.0]; k];
        let mut counts = vec![0usize; k];
        for (point, &cluster) in points.iter().zip(&assignments) {
            sums[cluster][0] += point[0];
            sums[cluster][1] += point[1];
            counts[cluster] += 1;
        }
        for (cluster, centroid) in centroids.iter_mut().enumerate() {
            if counts[cluster] > 0 {
                let c = counts[cluster] as f64;
                *centroid = [sums[cluster][0] / c, sums[cluster][1] / c];
            }
        }
    }

    let mut sizes = vec![0usize; k];
    for &cluster in &assignments {
        sizes[cluster] += 1;
    }

    Some(KMeansResult {
        assignments,
        centroids,
        sizes,
        iterations,
        converged,
    })
}

/// Mean silhouette coefficient.
///
/// For each point, `a` is its mean distance to the rest of its cluster and
/// `b` the smallest mean distance to any other non-empty cluster; the point
/// scores `(b - a) / max(a, b)`. Points alone in their cluster, or with no
/// other cluster to compare against, score 0. Empty input scores 0.
pub fn silhouette_score(points: &[Point], assignments: &[usize], k: usize) -> f64 {
    let n = points.len();
    if n == 0 || assignments.len() != n {
        return 0.0;
    }

    let mut sizes = vec![0usize; k];
    for &cluster in assignments {
        if cluster < k {
            sizes[cluster] += 1;
        }
    }

    let mut total = 0.0;
    for (i, point) in points.iter().enumerate() {
        let own = assignments[i];
        if own >= k || sizes[own] <= 1 {
            continue;
        }

        let mut distance_sums = vec![0.0; k];
        for (j, other) in points.iter().enumerate() {
            if i != j && assignments[j] < k {
                distance_sums[assignments[j]] += euclidean(point, other);
            }
        }

        let a = distance_sums[own] / (sizes[own] - 1) as f64;
        let b = (0..k)
            .filter(|&c| c != own && sizes[c] > 0)
            .map(|c| distance_sums[c] / sizes[c] as f64)
            .min_by(f64::total_cmp);

        let Some(b) = b else {
            continue;
        };
        let scale = a.max(b);
        if scale > 0.0 {
            total += (b - a) / scale;
        }
    }

    total / n as f64
}

/// Index of the closest centroid, lowest index on ties.
fn nearest(point: &Point, centroids: &[Point]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = euclidean(point, centroid);
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

/// Draw `k` distinct indices from `0..n` with a partial Fisher-Yates shuffle.
fn sample_without_replacement(n: usize, k: usize, rng: &mut dyn RandomSource) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    for i in 0..k {
        let remaining = n - i;
        let offset = ((rng.next_f64() * remaining as f64) as usize).min(remaining - 1);
        indices.swap(i, i + offset);
    }
    indices.truncate(k);
    indices
}
