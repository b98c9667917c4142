//! Order-independent snapshot comparison

use stacks_api::StackStatus;

/// Whether two snapshots hold the same records, regardless of order
///
/// Both sides are compared on name-sorted copies of their record
/// references; every field takes part in the comparison.
pub fn snapshots_equal(a: &[StackStatus], b: &[StackStatus]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut a_sorted: Vec<&StackStatus> = a.iter().collect();
    let mut b_sorted: Vec<&StackStatus> = b.iter().collect();
    a_sorted.sort();
    b_sorted.sort();

    a_sorted == b_sorted
}
