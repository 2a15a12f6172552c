//! Index model for symmetric tensors.
//!
//! A *dimensional index* of a rank-$`R`$ tensor in $`D`$ dimensions is an array of $`R`$ axis
//! symbols, each in `0..D`. Because the tensors are fully symmetric, only sorted (canonical)
//! dimensional indices are stored. They are laid out in a *flat* order in which every entry
//! prefixed with the lowest symbol comes first, followed recursively by the entries of the
//! remaining symbols. For $`D = 3`$ and $`R = 2`$ this gives
//! `[XX, XY, XZ, YY, YZ, ZZ]`.
//!
//! The *lexicographical* order enumerates all $`D^R`$ positions of a full tensor, with the first
//! index being the most significant.

use crate::combinatorics::{num_unique_values_in_symmetric_tensor, pow};

#[cfg(test)]
#[path = "index_tests.rs"]
mod index_tests;

/// Axis symbols for two-dimensional tensors.
pub mod xy {
    pub const X: usize = 0;
    pub const Y: usize = 1;
}

/// Axis symbols for three-dimensional tensors.
pub mod xyz {
    pub const X: usize = 0;
    pub const Y: usize = 1;
    pub const Z: usize = 2;
}

/// Axis symbols for four-dimensional tensors.
pub mod wxyz {
    pub const W: usize = 0;
    pub const X: usize = 1;
    pub const Y: usize = 2;
    pub const Z: usize = 3;
}

/// Returns the printable label of axis `axis` in a space of the given dimension.
///
/// Two- and three-dimensional spaces use `X, Y[, Z]`, four-dimensional spaces use `W, X, Y, Z`,
/// and any other dimension falls back to numbered axes.
pub fn axis_label(dimension: usize, axis: usize) -> String {
    debug_assert!(axis < dimension, "Axis symbol out of range.");
    match (dimension, axis) {
        (2 | 3, 0) => "X".to_string(),
        (2 | 3, 1) => "Y".to_string(),
        (3, 2) => "Z".to_string(),
        (4, 0) => "W".to_string(),
        (4, 1) => "X".to_string(),
        (4, 2) => "Y".to_string(),
        (4, 3) => "Z".to_string(),
        _ => format!("x{axis}"),
    }
}

/// Sorts a dimensional index into its canonical (non-decreasing) form.
pub const fn canonical<const R: usize>(mut indices: [usize; R]) -> [usize; R] {
    let mut i = 1;
    while i < R {
        let mut j = i;
        while j > 0 && indices[j - 1] > indices[j] {
            let tmp = indices[j - 1];
            indices[j - 1] = indices[j];
            indices[j] = tmp;
            j -= 1;
        }
        i += 1;
    }
    indices
}

/// Returns the canonical dimensional index stored at position `flat` of a symmetric tensor of
/// rank `R` in `dimension` dimensions.
///
/// # Arguments
///
/// * `flat` - The flat storage position, which must be smaller than the number of unique
/// values of the tensor.
/// * `dimension` - The dimension of the tensor.
///
/// # Returns
///
/// The sorted dimensional index.
pub const fn dimensional_indices<const R: usize>(flat: usize, dimension: usize) -> [usize; R] {
    debug_assert!(
        R == 0 || flat < num_unique_values_in_symmetric_tensor(dimension, R),
        "Flat index out of range."
    );
    let mut indices = [0; R];
    let mut remaining = flat;
    let mut offset = 0;
    let mut dim = dimension;
    let mut pos = 0;
    while pos < R {
        let rank_left = R - pos;
        if rank_left == 1 {
            indices[pos] = remaining + offset;
            break;
        }
        // Entries whose next symbol is the lowest available one come first.
        let prefixed = num_unique_values_in_symmetric_tensor(dim, rank_left - 1);
        if remaining < prefixed {
            indices[pos] = offset;
            pos += 1;
        } else {
            remaining -= prefixed;
            offset += 1;
            dim -= 1;
        }
    }
    indices
}

/// Returns the flat storage position of a dimensional index in a symmetric tensor of rank `R`
/// in `dimension` dimensions. The index does not need to be sorted: every permutation of an
/// index maps to the same position.
pub const fn flat_index<const R: usize>(indices: [usize; R], dimension: usize) -> usize {
    let sorted = canonical(indices);
    let mut flat = 0;
    let mut symbol = 0;
    let mut dim = dimension;
    let mut pos = 0;
    while pos < R {
        debug_assert!(sorted[pos] < dimension, "Axis symbol out of range.");
        let rank_left = R - pos;
        if rank_left == 1 {
            flat += sorted[pos] - symbol;
            break;
        }
        if sorted[pos] == symbol {
            pos += 1;
        } else {
            // Skip every entry that still starts with the current lowest symbol.
            flat += num_unique_values_in_symmetric_tensor(dim, rank_left - 1);
            symbol += 1;
            dim -= 1;
        }
    }
    flat
}

/// Returns the dimensional index of position `linear` of a full tensor of rank `R` enumerated
/// lexicographically (first index most significant).
pub const fn lexicographical_indices<const R: usize>(linear: usize, dimension: usize) -> [usize; R] {
    debug_assert!(linear < pow(dimension, R), "Lexicographical index out of range.");
    let mut indices = [0; R];
    let mut remaining = linear;
    let mut pos = R;
    while pos > 0 {
        pos -= 1;
        indices[pos] = remaining % dimension;
        remaining /= dimension;
    }
    indices
}

/// Returns the lexicographical position of a dimensional index in a full tensor. This is the
/// inverse of [`lexicographical_indices`].
pub const fn lexicographical_index<const R: usize>(indices: [usize; R], dimension: usize) -> usize {
    let mut linear = 0;
    let mut pos = 0;
    while pos < R {
        debug_assert!(indices[pos] < dimension, "Axis symbol out of range.");
        linear = linear * dimension + indices[pos];
        pos += 1;
    }
    linear
}

// ------------------------
// Compile-time index codes
// ------------------------

const CODE_BITS: usize = 4;
const CODE_MASK: u64 = (1 << CODE_BITS) - 1;

/// Packs a dimensional index into a single `u64` code that can be used as a const generic
/// argument. The lowest four bits hold the rank and every following group of four bits holds
/// one axis symbol, so ranks up to 15 and symbols up to 15 can be encoded.
pub const fn pack_indices(indices: &[usize]) -> u64 {
    assert!(indices.len() <= 15, "Too many indices to pack.");
    let mut code = indices.len() as u64;
    let mut pos = 0;
    while pos < indices.len() {
        assert!(indices[pos] <= CODE_MASK as usize, "Axis symbol too large to pack.");
        code |= (indices[pos] as u64) << (CODE_BITS * (pos + 1));
        pos += 1;
    }
    code
}

/// Returns the rank stored in a packed index code.
pub const fn packed_rank(code: u64) -> usize {
    (code & CODE_MASK) as usize
}

/// Unpacks a code produced by [`pack_indices`] into a dimensional index of rank `R`.
pub const fn unpack_indices<const R: usize>(code: u64) -> [usize; R] {
    let mut indices = [0; R];
    let mut pos = 0;
    while pos < R {
        indices[pos] = ((code >> (CODE_BITS * (pos + 1))) & CODE_MASK) as usize;
        pos += 1;
    }
    indices
}

/// Accesses a tensor element through a dimensional index fixed at compile time.
///
/// The flat storage offset is computed during compilation, and an index whose length differs
/// from the tensor rank, or whose symbols exceed the tensor dimension, fails to compile.
///
/// ```
/// use symtensor::at;
/// use symtensor::index::xyz::{X, Y};
/// use symtensor::tensor::d3::Rank2;
///
/// let t = Rank2::new([0, 1, 2, 3, 4, 5]);
/// assert_eq!(*at!(t, Y, X), 1);
/// ```
#[macro_export]
macro_rules! at {
    ($tensor:expr, $($axis:expr),+ $(,)?) => {
        $tensor.at::<{ $crate::index::pack_indices(&[$($axis),+]) }>()
    };
}

/// Mutable counterpart of [`at!`].
#[macro_export]
macro_rules! at_mut {
    ($tensor:expr, $($axis:expr),+ $(,)?) => {
        $tensor.at_mut::<{ $crate::index::pack_indices(&[$($axis),+]) }>()
    };
}
