use itertools::Itertools;

use crate::combinatorics::{
    binomial, factorial, kronecker_delta, multiplicity, num_unique_values_in_symmetric_tensor,
    num_values_in_tensor, pascal, pow,
};

#[test]
fn test_combinatorics_pow_factorial() {
    assert_eq!(pow(3, 0), 1);
    assert_eq!(pow(3, 4), 81);
    assert_eq!(pow(0, 0), 1);
    assert_eq!(factorial(0), 1);
    assert_eq!(factorial(1), 1);
    assert_eq!(factorial(5), 120);
    assert_eq!(binomial(5, 2), 10);
    assert_eq!(binomial(5, 0), 1);
    assert_eq!(binomial(2, 5), 0);
}

#[test]
fn test_combinatorics_pascal_recurrence() {
    for x in 0..8 {
        assert_eq!(pascal(x, 0), 1);
        assert_eq!(pascal(0, x), 1);
    }
    for x in 1..8 {
        for y in 1..8 {
            assert_eq!(pascal(x, y), pascal(x - 1, y) + pascal(x, y - 1));
        }
    }
}

#[test]
fn test_combinatorics_tensor_sizes() {
    assert_eq!(num_values_in_tensor(3, 2), 9);
    assert_eq!(num_values_in_tensor(4, 5), 1024);

    let expected_3d = [1, 3, 6, 10, 15, 21];
    for (rank, expected) in expected_3d.iter().enumerate() {
        assert_eq!(num_unique_values_in_symmetric_tensor(3, rank), *expected);
    }
    assert_eq!(num_unique_values_in_symmetric_tensor(2, 4), 5);
    assert_eq!(num_unique_values_in_symmetric_tensor(4, 2), 10);
    assert_eq!(num_unique_values_in_symmetric_tensor(1, 7), 1);

    const N: usize = num_unique_values_in_symmetric_tensor(3, 3);
    assert_eq!([0u8; N].len(), 10);
}

#[test]
fn test_combinatorics_multiplicity() {
    assert_eq!(multiplicity(&[]), 1);
    assert_eq!(multiplicity(&[2]), 1);
    assert_eq!(multiplicity(&[0, 0, 0]), 1);
    assert_eq!(multiplicity(&[0, 1]), 2);
    assert_eq!(multiplicity(&[0, 1, 1]), 3);
    assert_eq!(multiplicity(&[0, 1, 2]), 6);
    assert_eq!(multiplicity(&[1, 0, 1, 0]), 6);

    // The multiplicities of all sorted index tuples add up to the size of the full tensor.
    for dimension in 1..5 {
        for rank in 1..6 {
            let total: usize = (0..rank)
                .map(|_| 0..dimension)
                .multi_cartesian_product()
                .filter(|indices| indices.windows(2).all(|w| w[0] <= w[1]))
                .map(|indices| multiplicity(&indices))
                .sum();
            assert_eq!(total, pow(dimension, rank));
        }
    }
}

#[test]
fn test_combinatorics_kronecker_delta() {
    assert!(kronecker_delta(&[]));
    assert!(kronecker_delta(&[1]));
    assert!(kronecker_delta(&[2, 2, 2]));
    assert!(!kronecker_delta(&[2, 2, 1]));
}
