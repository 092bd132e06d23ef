use scan_core::rng::{derive_substream_seed, RngStream};

#[test]
fn streams_repeat_for_equal_seeds() {
    let mut a = RngStream::for_dimension(1234, 2);
    let mut b = RngStream::for_dimension(1234, 2);

    let seq_a: Vec<f64> = (0..100).map(|_| a.unit()).collect();
    let seq_b: Vec<f64> = (0..100).map(|_| b.unit()).collect();

    assert_eq!(seq_a, seq_b);
    assert_eq!(a.permutation(50), b.permutation(50));
}

#[test]
fn substreams_are_distinct() {
    assert_ne!(derive_substream_seed(7, 0), derive_substream_seed(7, 1));
    assert_ne!(derive_substream_seed(7, 0), derive_substream_seed(8, 0));
}

#[test]
fn unit_draws_stay_in_half_open_interval() {
    let mut stream = RngStream::from_seed(99);
    for _ in 0..1000 {
        let u = stream.unit();
        assert!((0.0..1.0).contains(&u));
    }
}

#[test]
fn permutations_cover_every_stratum() {
    let mut stream = RngStream::for_dimension(5, 0);
    let mut order = stream.permutation(64);
    order.sort_unstable();
    assert_eq!(order, (0..64).collect::<Vec<_>>());
}
