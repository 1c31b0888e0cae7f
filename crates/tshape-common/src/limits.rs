//! Centralized limits and thresholds for shape validation.
//!
//! Shapes can refer to other named shapes, and candidates can nest object
//! literals arbitrarily deep. These limits bound the recursion in both the
//! declaration loader and the validator.

/// Maximum nesting depth for shape resolution and validation.
///
/// Declarations such as
///
/// ```json
/// { "shapes": { "Node": { "properties": { "next": "Node" } } } }
/// ```
///
/// describe recursive shapes. The declaration loader reports a
/// `DepthLimitExceeded` error once resolution reaches this depth, and the
/// validator reports a type mismatch for values nested deeper than this.
pub const MAX_SHAPE_DEPTH: u32 = 64;

/// Maximum number of union members produced by distributing an intersection
/// over unions (`(A | B | C) & (D | E | F)` yields up to nine members).
///
/// The declaration loader rejects a distribution beyond this size with
/// `UnionTooLarge`; the unchecked intersection collapses it to `never`.
pub const MAX_UNION_DISTRIBUTION: usize = 1024;

/// Maximum number of errors a single validation call accumulates.
///
/// Only reachable with the exhaustive report policy on very large candidates.
pub const MAX_ERRORS_PER_VALIDATION: usize = 256;
