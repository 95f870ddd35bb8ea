//! Shuttle dispatch state machine — pure transition planning.
//!
//! The cargo shuttle cycles between the station and Central Command:
//! `DockedStation → OnRouteCentcom → DockedCentcom → OnRouteStation → ...`
//!
//! Transitions are driven by exactly two inputs: a shuttle call and the
//! mover's arrival notice. The functions here only decide what should happen;
//! applying side effects (ledger resets, order delivery, movement requests)
//! is the manager's job.

use serde::{Deserialize, Serialize};

/// Where the cargo shuttle currently is, or which leg it is flying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ShuttleStatus {
    /// Docked at the station. Initial state.
    DockedStation = 0,
    /// Outbound leg, flying toward Central Command.
    OnRouteCentcom = 1,
    /// Docked at Central Command, ready to be sent back with goods.
    DockedCentcom = 2,
    /// Return leg, flying back to the station.
    OnRouteStation = 3,
}

impl ShuttleStatus {
    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::DockedStation),
            1 => Some(Self::OnRouteCentcom),
            2 => Some(Self::DockedCentcom),
            3 => Some(Self::OnRouteStation),
            _ => None,
        }
    }

    /// Is the shuttle mid-flight on either leg?
    pub fn in_flight(&self) -> bool {
        matches!(self, Self::OnRouteCentcom | Self::OnRouteStation)
    }
}

/// Physical movement request for the shuttle mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementRequest {
    ToCentcom,
    ToStation,
}

/// What a shuttle call should do, as decided by [`plan_call`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightPlan {
    pub next_status: ShuttleStatus,
    /// Immediate movement request, if any. The return leg defers movement to
    /// timer expiry, so it carries `None`.
    pub movement: Option<MovementRequest>,
    /// A fresh outbound trip begins: export ledger and dispatch log reset.
    pub begins_outbound: bool,
    /// Confirmed orders must be materialized before departure.
    pub delivers_orders: bool,
}

/// Decide the outcome of a shuttle call. Returns `None` (caller does
/// nothing) while the countdown is running or the shuttle is mid-flight.
pub fn plan_call(status: ShuttleStatus, fly_time: f32) -> Option<FlightPlan> {
    if fly_time > 0.0 {
        return None;
    }
    match status {
        ShuttleStatus::DockedStation => Some(FlightPlan {
            next_status: ShuttleStatus::OnRouteCentcom,
            movement: Some(MovementRequest::ToCentcom),
            begins_outbound: true,
            delivers_orders: false,
        }),
        // The shuttle stays put at centcom until the timer runs out, then
        // starts moving to the station.
        ShuttleStatus::DockedCentcom => Some(FlightPlan {
            next_status: ShuttleStatus::OnRouteStation,
            movement: None,
            begins_outbound: false,
            delivers_orders: true,
        }),
        ShuttleStatus::OnRouteCentcom | ShuttleStatus::OnRouteStation => None,
    }
}

/// Decide the outcome of the mover's arrival notice. Strict: an arrival
/// while already docked changes nothing.
pub fn plan_arrival(status: ShuttleStatus) -> Option<ShuttleStatus> {
    match status {
        ShuttleStatus::OnRouteCentcom => Some(ShuttleStatus::DockedCentcom),
        ShuttleStatus::OnRouteStation => Some(ShuttleStatus::DockedStation),
        ShuttleStatus::DockedStation | ShuttleStatus::DockedCentcom => None,
    }
}

/// One fixed one-second countdown step, clamped at zero.
pub fn tick_timer(fly_time: f32) -> f32 {
    (fly_time - 1.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_u8_roundtrip() {
        for status in [
            ShuttleStatus::DockedStation,
            ShuttleStatus::OnRouteCentcom,
            ShuttleStatus::DockedCentcom,
            ShuttleStatus::OnRouteStation,
        ] {
            assert_eq!(ShuttleStatus::from_u8(status as u8), Some(status));
        }
        assert_eq!(ShuttleStatus::from_u8(4), None);
    }

    #[test]
    fn test_call_from_station_goes_outbound() {
        let plan = plan_call(ShuttleStatus::DockedStation, 0.0).unwrap();
        assert_eq!(plan.next_status, ShuttleStatus::OnRouteCentcom);
        assert_eq!(plan.movement, Some(MovementRequest::ToCentcom));
        assert!(plan.begins_outbound);
        assert!(!plan.delivers_orders);
    }

    #[test]
    fn test_call_from_centcom_returns_with_goods() {
        let plan = plan_call(ShuttleStatus::DockedCentcom, 0.0).unwrap();
        assert_eq!(plan.next_status, ShuttleStatus::OnRouteStation);
        assert_eq!(plan.movement, None);
        assert!(plan.delivers_orders);
        assert!(!plan.begins_outbound);
    }

    #[test]
    fn test_call_refused_while_timer_running() {
        assert_eq!(plan_call(ShuttleStatus::DockedStation, 3.0), None);
        assert_eq!(plan_call(ShuttleStatus::DockedCentcom, 0.5), None);
    }

    #[test]
    fn test_call_refused_mid_flight() {
        assert_eq!(plan_call(ShuttleStatus::OnRouteCentcom, 0.0), None);
        assert_eq!(plan_call(ShuttleStatus::OnRouteStation, 0.0), None);
    }

    #[test]
    fn test_arrival_docks_each_leg() {
        assert_eq!(
            plan_arrival(ShuttleStatus::OnRouteCentcom),
            Some(ShuttleStatus::DockedCentcom)
        );
        assert_eq!(
            plan_arrival(ShuttleStatus::OnRouteStation),
            Some(ShuttleStatus::DockedStation)
        );
    }

    #[test]
    fn test_arrival_while_docked_is_noop() {
        assert_eq!(plan_arrival(ShuttleStatus::DockedStation), None);
        assert_eq!(plan_arrival(ShuttleStatus::DockedCentcom), None);
    }

    #[test]
    fn test_tick_timer_clamps_at_zero() {
        assert_eq!(tick_timer(10.0), 9.0);
        assert_eq!(tick_timer(0.5), 0.0);
        assert_eq!(tick_timer(0.0), 0.0);
    }

    #[test]
    fn test_in_flight() {
        assert!(ShuttleStatus::OnRouteCentcom.in_flight());
        assert!(ShuttleStatus::OnRouteStation.in_flight());
        assert!(!ShuttleStatus::DockedStation.in_flight());
        assert!(!ShuttleStatus::DockedCentcom.in_flight());
    }
}
