//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

/// Pagination parameters as they arrive from the query string
#[derive(Clone, Copy, Debug, Default)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Pagination {
    /// Clamp to sane bounds and convert to (offset, limit)
    pub fn normalize(self) -> (u64, u64) {
        let limit = self.limit.unwrap_or(50).clamp(1, 500) as u64;
        let offset = self.offset.unwrap_or(0) as u64;
        (offset, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn defaults_are_sane() {
        let (offset, limit) = Pagination::default().normalize();
        assert_eq!(offset, 0);
        assert_eq!(limit, 50);
    }

    #[test]
    fn normalize_clamps_bounds() {
        let (offset, limit) = Pagination { limit: Some(1000), offset: Some(40) }.normalize();
        assert_eq!(offset, 40);
        assert_eq!(limit, 500);

        let (_, limit) = Pagination { limit: Some(0), offset: None }.normalize();
        assert_eq!(limit, 1);
    }
}
