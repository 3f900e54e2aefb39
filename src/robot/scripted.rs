use std::fmt::{self, Display, Formatter};

use log::debug;

use crate::robot::{ActionResult, Halt, Robot};

/// One recorded actuator call on a [`ScriptedRobot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotCall {
    /// `move_forward` with its distance operand.
    Move(Option<i64>),
    /// `turn_left`
    TurnLeft,
    /// `turn_right`
    TurnRight,
    /// `turn_around`
    TurnAround,
    /// `set_shield` with the requested state.
    SetShield(bool),
    /// `take_fuel`
    TakeFuel,
    /// `idle_wait` with its duration operand.
    Wait(Option<i64>),
}

impl Display for RobotCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move(None) => f.write_str("move"),
            Self::Move(Some(distance)) => write!(f, "move({distance})"),
            Self::TurnLeft => f.write_str("turnL"),
            Self::TurnRight => f.write_str("turnR"),
            Self::TurnAround => f.write_str("turnAround"),
            Self::SetShield(true) => f.write_str("shieldOn"),
            Self::SetShield(false) => f.write_str("shieldOff"),
            Self::TakeFuel => f.write_str("takeFuel"),
            Self::Wait(None) => f.write_str("wait"),
            Self::Wait(Some(duration)) => write!(f, "wait({duration})"),
        }
    }
}

/// A robot whose world never changes.
///
/// Opponent, barrel and wall readings stay at whatever they were configured
/// to. The only state that evolves is fuel: every step moved costs one unit
/// (a bare `move` is one step, negative distances cost nothing), and moving
/// with an empty tank halts the run.
///
/// An optional action budget limits how many actuator calls succeed; the
/// call after the last permitted one halts instead of being recorded.
///
/// ## Example
/// ```
/// use robolang::robot::{Robot, RobotCall, ScriptedRobot};
///
/// let mut robot = ScriptedRobot::new().with_fuel(2).with_budget(2);
///
/// robot.move_forward(None).unwrap();
/// robot.turn_left().unwrap();
/// assert!(robot.take_fuel().is_err());
///
/// assert_eq!(robot.fuel(), 1);
/// assert_eq!(robot.calls(), &[RobotCall::Move(None), RobotCall::TurnLeft]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedRobot {
    fuel:          i64,
    opponent:      (i64, i64),
    barrels:       Vec<(i64, i64)>,
    wall_distance: i64,
    shield:        bool,
    budget:        Option<usize>,
    calls:         Vec<RobotCall>,
}

impl ScriptedRobot {
    /// A robot with no fuel, no barrels, everything at distance 0 and no
    /// action budget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the starting fuel.
    #[must_use]
    pub const fn with_fuel(mut self, fuel: i64) -> Self {
        self.fuel = fuel;
        self
    }

    /// Places the opponent at `(lr, fb)` relative to the robot.
    #[must_use]
    pub const fn with_opponent(mut self, lr: i64, fb: i64) -> Self {
        self.opponent = (lr, fb);
        self
    }

    /// Adds a visible barrel at `(lr, fb)` relative to the robot.
    #[must_use]
    pub fn with_barrel(mut self, lr: i64, fb: i64) -> Self {
        self.barrels.push((lr, fb));
        self
    }

    /// Sets the distance to the wall ahead.
    #[must_use]
    pub const fn with_wall_distance(mut self, distance: i64) -> Self {
        self.wall_distance = distance;
        self
    }

    /// Allows at most `actions` actuator calls before halting.
    #[must_use]
    pub const fn with_budget(mut self, actions: usize) -> Self {
        self.budget = Some(actions);
        self
    }

    /// Every actuator call that succeeded, in order.
    #[must_use]
    pub fn calls(&self) -> &[RobotCall] {
        &self.calls
    }

    /// Whether the shield is currently raised.
    #[must_use]
    pub const fn shield(&self) -> bool {
        self.shield
    }

    /// The barrel with the smallest Manhattan distance, if any is visible.
    fn closest_barrel(&self) -> Option<(i64, i64)> {
        self.barrels
            .iter()
            .copied()
            .min_by_key(|(lr, fb)| lr.unsigned_abs().saturating_add(fb.unsigned_abs()))
    }

    /// Records `call`, or halts if the budget is spent.
    fn record(&mut self, call: RobotCall) -> ActionResult {
        if let Some(budget) = self.budget
           && self.calls.len() >= budget
        {
            debug!("scripted robot refused {call}: budget of {budget} spent");
            return Err(Halt::new(format!("action budget of {budget} exhausted")));
        }
        self.calls.push(call);
        Ok(())
    }
}

impl Robot for ScriptedRobot {
    fn move_forward(&mut self, distance: Option<i64>) -> ActionResult {
        if self.fuel <= 0 {
            return Err(Halt::new("out of fuel"));
        }
        self.record(RobotCall::Move(distance))?;
        let cost = distance.unwrap_or(1).max(0);
        self.fuel = self.fuel.saturating_sub(cost).max(0);
        Ok(())
    }

    fn turn_left(&mut self) -> ActionResult {
        self.record(RobotCall::TurnLeft)
    }

    fn turn_right(&mut self) -> ActionResult {
        self.record(RobotCall::TurnRight)
    }

    fn turn_around(&mut self) -> ActionResult {
        self.record(RobotCall::TurnAround)
    }

    fn set_shield(&mut self, on: bool) -> ActionResult {
        self.record(RobotCall::SetShield(on))?;
        self.shield = on;
        Ok(())
    }

    fn take_fuel(&mut self) -> ActionResult {
        self.record(RobotCall::TakeFuel)
    }

    fn idle_wait(&mut self, duration: Option<i64>) -> ActionResult {
        self.record(RobotCall::Wait(duration))
    }

    fn fuel(&self) -> i64 {
        self.fuel
    }

    fn opponent_lr(&self) -> i64 {
        self.opponent.0
    }

    fn opponent_fb(&self) -> i64 {
        self.opponent.1
    }

    fn num_barrels(&self) -> i64 {
        i64::try_from(self.barrels.len()).unwrap_or(i64::MAX)
    }

    fn closest_barrel_lr(&self) -> i64 {
        self.closest_barrel().map_or(0, |(lr, _)| lr)
    }

    fn closest_barrel_fb(&self) -> i64 {
        self.closest_barrel().map_or(0, |(_, fb)| fb)
    }

    fn distance_to_wall(&self) -> i64 {
        self.wall_distance
    }
}
