/// A configurable robot with fixed sensor readings.
///
/// Records every actuator call, burns fuel on movement and halts once an
/// action budget is spent. Used for dry runs and tests.
pub mod scripted;

pub use scripted::{RobotCall, ScriptedRobot};

use thiserror::Error;

/// Signal raised by a robot to abort the running program.
///
/// A halt returned from an actuator unwinds the whole program run; the
/// interpreter never catches or retries it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct Halt {
    /// Why the robot stopped, e.g. `"robot destroyed"`.
    pub reason: String,
}

impl Halt {
    /// Creates a halt signal with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Outcome of a single actuator call.
pub type ActionResult = Result<(), Halt>;

/// The sensor/actuator interface a program runs against.
///
/// Actuators take `&mut self`, may block (for instance until the next
/// simulation tick), and may abort the run by returning a [`Halt`]. Sensors
/// take `&self` and must not change the robot.
///
/// The operands of `move(n)` and `wait(n)` are passed through unchanged; a
/// robot that only supports unit moves or single-tick waits is free to
/// ignore them.
pub trait Robot {
    /// Moves forward, by `distance` if the program gave one.
    fn move_forward(&mut self, distance: Option<i64>) -> ActionResult;
    /// Turns 90 degrees to the left.
    fn turn_left(&mut self) -> ActionResult;
    /// Turns 90 degrees to the right.
    fn turn_right(&mut self) -> ActionResult;
    /// Turns 180 degrees.
    fn turn_around(&mut self) -> ActionResult;
    /// Raises or lowers the shield.
    fn set_shield(&mut self, on: bool) -> ActionResult;
    /// Picks up a fuel barrel at the current position, if any.
    fn take_fuel(&mut self) -> ActionResult;
    /// Stays idle, for `duration` ticks if the program gave one.
    fn idle_wait(&mut self, duration: Option<i64>) -> ActionResult;

    /// Fuel remaining.
    fn fuel(&self) -> i64;
    /// Opponent's lateral position relative to this robot.
    fn opponent_lr(&self) -> i64;
    /// Opponent's forward position relative to this robot.
    fn opponent_fb(&self) -> i64;
    /// Number of barrels currently visible.
    fn num_barrels(&self) -> i64;
    /// Lateral position of the closest barrel.
    fn closest_barrel_lr(&self) -> i64;
    /// Forward position of the closest barrel.
    fn closest_barrel_fb(&self) -> i64;
    /// Distance to the nearest wall ahead.
    fn distance_to_wall(&self) -> i64;
}
