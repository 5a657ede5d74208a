use std::fmt;

/// Progress of one dashboard run.
///
/// `Failed` is only entered from `Listing` or `Enriching`; metrics collection
/// cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Listing,
    Enriching,
    CollectingMetrics,
    Done,
    Failed,
}

impl PipelineState {
    pub fn can_advance_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Idle, Listing)
                | (Listing, Enriching)
                | (Listing, Failed)
                | (Enriching, CollectingMetrics)
                | (Enriching, Failed)
                | (CollectingMetrics, Done)
                | (Done, Idle)
                | (Failed, Idle)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PipelineState::Idle => "idle",
            PipelineState::Listing => "listing",
            PipelineState::Enriching => "enriching",
            PipelineState::CollectingMetrics => "collecting-metrics",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineState::*;

    #[test]
    fn failure_only_from_listing_or_enriching() {
        assert!(Listing.can_advance_to(Failed));
        assert!(Enriching.can_advance_to(Failed));
        assert!(!CollectingMetrics.can_advance_to(Failed));
        assert!(!Idle.can_advance_to(Failed));
    }

    #[test]
    fn steps_cannot_be_skipped() {
        assert!(!Idle.can_advance_to(Enriching));
        assert!(!Listing.can_advance_to(CollectingMetrics));
        assert!(!Enriching.can_advance_to(Done));
        assert!(Done.is_terminal() && Failed.is_terminal());
    }
}
