use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn two_blobs() -> Vec<[f64; 3]> {
    let mut out = Vec::new();
    for i in 0..30 {
        out.push([10.0 + (i % 3) as f64, 10.0, 10.0]);
    }
    for i in 0..10 {
        out.push([200.0, 200.0 + (i % 2) as f64, 200.0]);
    }
    out
}

#[test]
fn empty_input_or_zero_k_yields_none() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(kmeans::<3, _>(&[], 4, 8, &mut rng).is_none());
    assert!(kmeans(&two_blobs(), 0, 8, &mut rng).is_none());
}

#[test]
fn populations_cover_every_sample() {
    let samples = two_blobs();
    let mut rng = StdRng::seed_from_u64(7);
    let clusters = kmeans(&samples, 4, 8, &mut rng).unwrap();
    assert_eq!(clusters.centers.len(), 4);
    assert_eq!(clusters.populations.iter().sum::<usize>(), samples.len());
}

#[test]
fn separates_obvious_blobs() {
    let samples = two_blobs();
    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let clusters = kmeans(&samples, 2, 8, &mut rng).unwrap();
        let sorted = clusters.sorted_by_population();
        // Random init can pick both seeds from one blob; the larger blob still wins.
        assert!(sorted[0].1 >= sorted[1].1);
        if sorted[1].1 > 0 {
            assert_eq!(sorted[0].1, 30, "seed {seed}");
            assert!(sorted[0].0[0] < 20.0);
            assert!(sorted[1].0[0] > 190.0);
        }
    }
}

#[test]
fn single_sample_with_many_centers_keeps_them_all() {
    let mut rng = StdRng::seed_from_u64(3);
    let clusters = kmeans(&[[5.0, 6.0]], 3, 8, &mut rng).unwrap();
    assert_eq!(clusters.centers, vec![[5.0, 6.0]; 3]);
    assert_eq!(clusters.populations, vec![1, 0, 0]);
}

#[test]
fn same_seed_same_result() {
    let samples = two_blobs();
    let a = kmeans(&samples, 3, 8, &mut StdRng::seed_from_u64(11)).unwrap();
    let b = kmeans(&samples, 3, 8, &mut StdRng::seed_from_u64(11)).unwrap();
    assert_eq!(a, b);
}
