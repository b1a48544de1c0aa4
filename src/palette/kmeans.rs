use rand::Rng;

/// Result of clustering: centers plus the number of samples assigned to each.
#[derive(Clone, Debug, PartialEq)]
pub struct Clusters<const D: usize> {
    /// Cluster centers, in initialization order.
    pub centers: Vec<[f64; D]>,
    /// Samples assigned to each center in the final assignment pass.
    pub populations: Vec<usize>,
}

impl<const D: usize> Clusters<D> {
    /// Centers paired with populations, most populous first.
    ///
    /// The sort is stable, so ties keep initialization order.
    pub fn sorted_by_population(&self) -> Vec<([f64; D], usize)> {
        let mut out: Vec<_> = self
            .centers
            .iter()
            .copied()
            .zip(self.populations.iter().copied())
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1));
        out
    }
}

fn dist2<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn nearest<const D: usize>(sample: &[f64; D], centers: &[[f64; D]]) -> usize {
    let mut best = 0;
    let mut best_d = f64::INFINITY;
    for (i, c) in centers.iter().enumerate() {
        let d = dist2(sample, c);
        if d < best_d {
            best_d = d;
            best = i;
        }
    }
    best
}

/// Lloyd's algorithm with `iterations` rounds over `samples`.
///
/// Centers start as uniform random picks (with replacement) from `samples`. A center that loses
/// all of its samples keeps its previous value. Returns `None` when `samples` is empty or `k == 0`.
pub fn kmeans<const D: usize, R: Rng + ?Sized>(
    samples: &[[f64; D]],
    k: usize,
    iterations: usize,
    rng: &mut R,
) -> Option<Clusters<D>> {
    if samples.is_empty() || k == 0 {
        return None;
    }

    let mut centers: Vec<[f64; D]> = (0..k)
        .map(|_| samples[rng.random_range(0..samples.len())])
        .collect();

    let mut sums = vec![[0.0f64; D]; k];
    let mut counts = vec![0usize; k];
    for _ in 0..iterations {
        sums.iter_mut().for_each(|s| *s = [0.0; D]);
        counts.iter_mut().for_each(|c| *c = 0);

        for s in samples {
            let i = nearest(s, &centers);
            counts[i] += 1;
            for (acc, v) in sums[i].iter_mut().zip(s) {
                *acc += v;
            }
        }

        for ((center, sum), &count) in centers.iter_mut().zip(&sums).zip(&counts) {
            if count == 0 {
                continue;
            }
            let n = count as f64;
            for (c, s) in center.iter_mut().zip(sum) {
                *c = s / n;
            }
        }
    }

    let mut populations = vec![0usize; k];
    for s in samples {
        populations[nearest(s, &centers)] += 1;
    }

    Some(Clusters {
        centers,
        populations,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/palette/kmeans.rs"]
mod tests;
