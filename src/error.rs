//! Errors surfaced by the tracking pipeline.

/// Failures the frame loop can observe. Framing and I/O errors are fatal for
/// the process; there is no retry, a restart rebuilds the initial state.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("observation frame truncated: expected {expected} bytes, received {received}")]
    Framing { expected: usize, received: usize },

    #[error("observation channel failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snake body holds {0} segment(s); two are needed to locate the previous head")]
    BodyTooShort(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framing_error_display() {
        let err = TrackerError::Framing {
            expected: 1032,
            received: 1031,
        };
        assert_eq!(
            err.to_string(),
            "observation frame truncated: expected 1032 bytes, received 1031"
        );
    }

    #[test]
    fn body_error_display() {
        let err = TrackerError::BodyTooShort(1);
        assert_eq!(
            err.to_string(),
            "snake body holds 1 segment(s); two are needed to locate the previous head"
        );
    }
}
