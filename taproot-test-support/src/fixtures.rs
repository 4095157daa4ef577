//! Seeded inputs shared by tests and benchmarks.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// The nine-edge weighted graph on six nodes used across the MST suites.
/// Its minimum spanning tree is unique in cost, [`REFERENCE_MST_COST`].
pub const REFERENCE_GRAPH: [(usize, usize, f32); 9] = [
    (0, 1, 5.0),
    (0, 2, 6.0),
    (1, 2, 2.0),
    (1, 3, 4.0),
    (1, 4, 3.0),
    (2, 4, 7.0),
    (3, 4, 2.0),
    (3, 5, 6.0),
    (4, 5, 5.0),
];

/// Total weight of the minimum spanning tree of [`REFERENCE_GRAPH`].
pub const REFERENCE_MST_COST: f64 = 17.0;

/// Shape of a generated vector family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FamilyShape {
    /// Number of vectors.
    pub count: usize,
    /// Length of every vector.
    pub dimension: usize,
    /// Symbols are drawn from `0..alphabet`.
    pub alphabet: u8,
    /// Positions rewritten when deriving a vector from an earlier one.
    pub mutations: usize,
}

/// Generates a family of related vectors: the first is uniform random and
/// every later one copies a random earlier vector and rewrites `mutations`
/// random positions. Families like this compress well.
///
/// # Examples
/// ```
/// use taproot_test_support::fixtures::{FamilyShape, mutated_family};
///
/// let shape = FamilyShape { count: 5, dimension: 8, alphabet: 4, mutations: 1 };
/// let family = mutated_family(7, shape);
/// assert_eq!(family.len(), 5);
/// assert!(family.iter().all(|vector| vector.len() == 8));
/// assert_eq!(family, mutated_family(7, shape));
/// ```
#[must_use]
pub fn mutated_family(seed: u64, shape: FamilyShape) -> Vec<Vec<u8>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let alphabet = shape.alphabet.max(1);
    let mut family: Vec<Vec<u8>> = Vec::with_capacity(shape.count);
    for index in 0..shape.count {
        let vector = if index == 0 {
            (0..shape.dimension)
                .map(|_| rng.gen_range(0..alphabet))
                .collect()
        } else {
            let mut derived = family[rng.gen_range(0..index)].clone();
            if shape.dimension > 0 {
                for _ in 0..shape.mutations {
                    let position = rng.gen_range(0..shape.dimension);
                    derived[position] = rng.gen_range(0..alphabet);
                }
            }
            derived
        };
        family.push(vector);
    }
    family
}

/// Generates `count` independent uniform random vectors.
#[must_use]
pub fn uniform_vectors(seed: u64, count: usize, dimension: usize, alphabet: u8) -> Vec<Vec<u8>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let alphabet = alphabet.max(1);
    (0..count)
        .map(|_| (0..dimension).map(|_| rng.gen_range(0..alphabet)).collect())
        .collect()
}

/// Renders vectors in the whitespace-separated line format read by the
/// `taproot` binary.
///
/// # Examples
/// ```
/// use taproot_test_support::fixtures::to_lines;
///
/// assert_eq!(to_lines(&[vec![0, 1], vec![2, 3]]), "0 1\n2 3\n");
/// ```
#[must_use]
pub fn to_lines(vectors: &[Vec<u8>]) -> String {
    vectors
        .iter()
        .map(|vector| {
            let mut line = vector
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            line.push('\n');
            line
        })
        .collect()
}
