/// Number of reports to list: the requested limit capped by retention
/// capacity, or the full capacity when no limit was given.
#[must_use]
pub fn effective_limit(requested: Option<u32>, capacity: usize) -> usize {
    requested
        .and_then(|limit| usize::try_from(limit).ok())
        .map_or(capacity, |limit| limit.min(capacity))
}

#[cfg(test)]
mod tests {
    use super::effective_limit;

    #[test]
    fn requested_limit_is_used() {
        assert_eq!(effective_limit(Some(2), 5), 2);
    }

    #[test]
    fn capacity_caps_requested_limit() {
        assert_eq!(effective_limit(Some(50), 5), 5);
    }

    #[test]
    fn capacity_used_when_none_set() {
        assert_eq!(effective_limit(None, 5), 5);
    }

    #[test]
    fn zero_limit_lists_nothing() {
        assert_eq!(effective_limit(Some(0), 5), 0);
    }
}
