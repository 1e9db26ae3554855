use crate::error::ProbeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Up,
    Down,
    Error,
}

/// classified result of one probe, one per target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub target: String,
    pub status: ProbeStatus,
    pub detail: Option<String>,
}

impl ProbeOutcome {
    pub fn up(target: &str, detail: Option<String>) -> Self {
        ProbeOutcome {
            target: target.to_string(),
            status: ProbeStatus::Up,
            detail,
        }
    }

    pub fn down(target: &str, status_code: u16) -> Self {
        ProbeOutcome {
            target: target.to_string(),
            status: ProbeStatus::Down,
            detail: Some(format!("{} is down (status {})", target, status_code)),
        }
    }

    pub fn failed(target: &str, error: &ProbeError) -> Self {
        ProbeOutcome {
            target: target.to_string(),
            status: ProbeStatus::Error,
            detail: Some(format!("{} check failed: {}", target, error)),
        }
    }

    pub fn is_problem(&self) -> bool {
        matches!(self.status, ProbeStatus::Down | ProbeStatus::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_detail_carries_status_code() {
        let outcome = ProbeOutcome::down("https://bad.example", 503);
        assert_eq!(outcome.status, ProbeStatus::Down);
        assert_eq!(
            outcome.detail.as_deref(),
            Some("https://bad.example is down (status 503)")
        );
        assert!(outcome.is_problem());
    }

    #[test]
    fn failed_detail_carries_cause() {
        let outcome = ProbeOutcome::failed("https://slow.example", &ProbeError::DeadlineExceeded);
        assert_eq!(outcome.status, ProbeStatus::Error);
        assert_eq!(
            outcome.detail.as_deref(),
            Some("https://slow.example check failed: batch deadline exceeded")
        );
    }

    #[test]
    fn up_is_not_a_problem() {
        assert!(!ProbeOutcome::up("https://good.example", None).is_problem());
    }
}
