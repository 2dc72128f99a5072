pub mod controller;
pub mod protocol;

pub use controller::{Action, RelayController};
pub use protocol::{parse_event, ButtonEvent, ControlMessage, EventError, Switch, SENTINEL};
