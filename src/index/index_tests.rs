use itertools::Itertools;

use crate::combinatorics::{num_unique_values_in_symmetric_tensor, num_values_in_tensor};
use crate::index::xyz::{X, Y, Z};
use crate::index::{
    axis_label, canonical, dimensional_indices, flat_index, lexicographical_index,
    lexicographical_indices, pack_indices, packed_rank, unpack_indices, wxyz,
};

fn check_flat_round_trip<const R: usize>(dimension: usize) {
    let n = num_unique_values_in_symmetric_tensor(dimension, R);
    let mut previous: Option<[usize; R]> = None;
    for flat in 0..n {
        let indices = dimensional_indices::<R>(flat, dimension);
        assert_eq!(indices, canonical(indices));
        assert!(indices.iter().all(|&i| i < dimension));
        assert_eq!(flat_index(indices, dimension), flat);
        if let Some(prev) = previous {
            assert!(prev < indices, "{prev:?} should precede {indices:?}");
        }
        previous = Some(indices);
    }
}

fn check_permutation_invariance<const R: usize>(dimension: usize) {
    for linear in 0..num_values_in_tensor(dimension, R) {
        let indices = lexicographical_indices::<R>(linear, dimension);
        assert_eq!(lexicographical_index(indices, dimension), linear);
        let expected = flat_index(canonical(indices), dimension);
        for perm in indices.iter().permutations(R) {
            let mut permuted = [0; R];
            permuted
                .iter_mut()
                .zip(perm)
                .for_each(|(dst, &src)| *dst = src);
            assert_eq!(flat_index(permuted, dimension), expected);
        }
    }
}

#[test]
fn test_index_flat_round_trip() {
    for dimension in 2..=4 {
        check_flat_round_trip::<1>(dimension);
        check_flat_round_trip::<2>(dimension);
        check_flat_round_trip::<3>(dimension);
        check_flat_round_trip::<4>(dimension);
        check_flat_round_trip::<5>(dimension);
    }
}

#[test]
fn test_index_permutation_invariance() {
    for dimension in 2..=4 {
        check_permutation_invariance::<1>(dimension);
        check_permutation_invariance::<2>(dimension);
        check_permutation_invariance::<3>(dimension);
        check_permutation_invariance::<4>(dimension);
    }
}

#[test]
fn test_index_canonical_order_3d() {
    let rank2 = (0..6)
        .map(|i| dimensional_indices::<2>(i, 3))
        .collect_vec();
    assert_eq!(
        rank2,
        vec![[X, X], [X, Y], [X, Z], [Y, Y], [Y, Z], [Z, Z]]
    );

    let rank3 = (0..10)
        .map(|i| dimensional_indices::<3>(i, 3))
        .collect_vec();
    assert_eq!(
        rank3,
        vec![
            [X, X, X],
            [X, X, Y],
            [X, X, Z],
            [X, Y, Y],
            [X, Y, Z],
            [X, Z, Z],
            [Y, Y, Y],
            [Y, Y, Z],
            [Y, Z, Z],
            [Z, Z, Z],
        ]
    );

    assert_eq!(flat_index([Y, Y, X, Y], 3), 6);
    assert_eq!(flat_index([Z, Z, Z, Z], 3), 14);
    assert_eq!(flat_index([Z, X, Y, Z, Z], 3), 13);
    assert_eq!(dimensional_indices::<5>(20, 3), [Z, Z, Z, Z, Z]);
}

#[test]
fn test_index_lexicographical() {
    assert_eq!(lexicographical_indices::<2>(0, 3), [X, X]);
    assert_eq!(lexicographical_indices::<2>(1, 3), [X, Y]);
    assert_eq!(lexicographical_indices::<2>(3, 3), [Y, X]);
    assert_eq!(lexicographical_indices::<3>(26, 3), [Z, Z, Z]);
    assert_eq!(lexicographical_index([Z, X], 3), 6);
}

#[test]
fn test_index_packing() {
    const CODE: u64 = pack_indices(&[Z, X, Y]);
    assert_eq!(packed_rank(CODE), 3);
    assert_eq!(unpack_indices::<3>(CODE), [Z, X, Y]);
    assert_eq!(packed_rank(pack_indices(&[wxyz::W])), 1);
}

#[test]
fn test_index_axis_labels() {
    assert_eq!(axis_label(2, 1), "Y");
    assert_eq!(axis_label(3, 2), "Z");
    assert_eq!(axis_label(4, wxyz::W), "W");
    assert_eq!(axis_label(4, wxyz::Z), "Z");
    assert_eq!(axis_label(5, 4), "x4");
}
