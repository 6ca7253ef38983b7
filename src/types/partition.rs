/// Partition owning a postal code: its leading digit modulo the partition count.
///
/// Postal codes are grouped by leading digit, so ten partitions give one
/// postal-code region each. Returns `None` for codes without a leading digit
/// or a non-positive partition count.
pub fn partition_for_post_code(post_code: &str, partitions: i32) -> Option<i32> {
    if partitions <= 0 {
        return None;
    }

    let digit = post_code.trim().chars().next()?.to_digit(10)? as i32;
    Some(digit % partitions)
}

/// Makes a string usable as one Graphite path component.
pub fn sanitize_metric_component(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(' ', "-")
        .replace('.', "_")
}
