//! Counting helpers for symmetric tensors.
//!
//! Everything here is a `const fn` so that storage sizes and flat offsets can be resolved at
//! compile time.

#[cfg(test)]
#[path = "combinatorics_tests.rs"]
mod combinatorics_tests;

/// Raises `base` to the non-negative integer power `exp`.
pub const fn pow(base: usize, exp: usize) -> usize {
    let mut result = 1;
    let mut i = 0;
    while i < exp {
        result *= base;
        i += 1;
    }
    result
}

/// Returns the factorial $`n!`$.
pub const fn factorial(n: usize) -> usize {
    let mut result = 1;
    let mut i = 2;
    while i <= n {
        result *= i;
        i += 1;
    }
    result
}

/// Returns the binomial coefficient $`\binom{n}{k}`$, or zero if $`k > n`$.
pub const fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    pascal(k, n - k)
}

/// Returns the entry of Pascal's triangle at position `(x, y)`.
///
/// This is the solution of the recurrence
/// $`P(x, y) = P(x - 1, y) + P(x, y - 1)`$ with $`P(0, y) = P(x, 0) = 1`$, which equals
/// $`\binom{x + y}{x}`$. The closed form is evaluated with exact intermediate integer divisions.
pub const fn pascal(x: usize, y: usize) -> usize {
    let mut result = 1;
    let mut i = 1;
    while i <= x {
        // result == C(y + i - 1, i - 1) here, so the division is exact.
        result = result * (y + i) / i;
        i += 1;
    }
    result
}

/// Returns the number of values in a full (non-symmetric) tensor, $`D^R`$.
pub const fn num_values_in_tensor(dimension: usize, rank: usize) -> usize {
    pow(dimension, rank)
}

/// Returns the number of unique values in a symmetric tensor of the given dimension and rank.
///
/// # Panics
///
/// Panics if `dimension` is zero.
pub const fn num_unique_values_in_symmetric_tensor(dimension: usize, rank: usize) -> usize {
    assert!(dimension > 0, "A tensor must have at least one dimension.");
    pascal(dimension - 1, rank)
}

/// Determines whether all indices in an index tuple are equal, i.e. whether the generalised
/// Kronecker delta of the tuple is one. The empty tuple gives `true`.
pub const fn kronecker_delta(indices: &[usize]) -> bool {
    let mut i = 1;
    while i < indices.len() {
        if indices[i] != indices[0] {
            return false;
        }
        i += 1;
    }
    true
}

/// Returns the number of distinct orderings of an index tuple, $`R! / \prod_k c_k!`$, where
/// $`c_k`$ is the number of occurrences of symbol $`k`$.
///
/// This is the number of positions in a full tensor that share the storage slot of `indices`.
pub const fn multiplicity(indices: &[usize]) -> usize {
    let mut result = factorial(indices.len());
    let mut i = 0;
    while i < indices.len() {
        // Only the first occurrence of each symbol contributes its count.
        let mut seen = false;
        let mut j = 0;
        while j < i {
            if indices[j] == indices[i] {
                seen = true;
            }
            j += 1;
        }
        if !seen {
            let mut count = 0;
            let mut k = i;
            while k < indices.len() {
                if indices[k] == indices[i] {
                    count += 1;
                }
                k += 1;
            }
            result /= factorial(count);
        }
        i += 1;
    }
    result
}
