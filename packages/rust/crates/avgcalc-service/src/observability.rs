//! Stable `event` names for structured logs.

/// Log events emitted by the gateway, handler and upstream client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayEvent {
    NumbersFetched,
    NumbersSoftFailure,
    InvalidCategory,
    BudgetExceeded,
    UpstreamRequestFailed,
    UpstreamNonSuccessStatus,
    UpstreamDecodeFailed,
    UpstreamCompleted,
    GatewayListening,
    GatewayStopped,
}

impl GatewayEvent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NumbersFetched => "avgcalc.numbers.fetched",
            Self::NumbersSoftFailure => "avgcalc.numbers.soft_failure",
            Self::InvalidCategory => "avgcalc.numbers.invalid_category",
            Self::BudgetExceeded => "avgcalc.numbers.budget_exceeded",
            Self::UpstreamRequestFailed => "avgcalc.upstream.request_failed",
            Self::UpstreamNonSuccessStatus => "avgcalc.upstream.non_success_status",
            Self::UpstreamDecodeFailed => "avgcalc.upstream.decode_failed",
            Self::UpstreamCompleted => "avgcalc.upstream.completed",
            Self::GatewayListening => "avgcalc.gateway.listening",
            Self::GatewayStopped => "avgcalc.gateway.stopped",
        }
    }
}
