use crate::protocol::{parse_event, ControlMessage, EventError, Switch, SENTINEL};

/// Relay toggle driven by inbound button events.
///
/// Owns the relay/LED state for one operator session. Feed each received
/// text message to [`RelayController::handle`]; the returned [`Action`]
/// tells the caller what, if anything, to put on the wire. The relay starts
/// off and flips exactly once per valid event.
#[derive(Debug, Default)]
pub struct RelayController {
    is_on: bool,
}

/// Outcome of one received message.
#[derive(Debug)]
pub enum Action {
    /// Sentinel received: end the session without replying.
    Disconnect,
    /// Message was not a usable button event; nothing is sent and the relay
    /// state is untouched.
    Ignore(EventError),
    /// Valid button event: send this command back to the device.
    Reply(ControlMessage),
}

impl RelayController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Decide the response to one inbound text message.
    ///
    /// The command in [`Action::Reply`] reflects the state before this
    /// message: the first valid event turns the relay on, the second turns
    /// it off, and so on.
    pub fn handle(&mut self, raw: &str) -> Action {
        if raw == SENTINEL {
            return Action::Disconnect;
        }
        match parse_event(raw) {
            Ok(_) => {
                let position = if self.is_on { Switch::Off } else { Switch::On };
                self.is_on = !self.is_on;
                Action::Reply(ControlMessage::set_relay(position))
            }
            Err(e) => Action::Ignore(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PRESS: &str = r#"{"event":{"button0":1}}"#;

    fn reply(action: Action) -> ControlMessage {
        match action {
            Action::Reply(cmd) => cmd,
            other => panic!("expected a reply, got {other:?}"),
        }
    }

    #[test]
    fn first_event_turns_relay_on() {
        let mut ctl = RelayController::new();
        assert_eq!(reply(ctl.handle(PRESS)).control.relay0, Switch::On);
        assert!(ctl.is_on());
    }

    #[test]
    fn valid_events_alternate_starting_on() {
        let mut ctl = RelayController::new();
        let expected = [Switch::On, Switch::Off, Switch::On, Switch::Off, Switch::On];
        for want in expected {
            assert_eq!(reply(ctl.handle(PRESS)).control.relay0, want);
        }
    }

    #[test]
    fn malformed_input_keeps_state_and_parity() {
        let mut ctl = RelayController::new();
        assert_eq!(reply(ctl.handle(PRESS)).control.relay0, Switch::On);

        assert!(matches!(
            ctl.handle("not json at all"),
            Action::Ignore(EventError::Malformed(_))
        ));
        assert!(ctl.is_on());

        // alternation resumes as if the bad message never arrived
        assert_eq!(reply(ctl.handle(PRESS)).control.relay0, Switch::Off);
    }

    #[test]
    fn event_without_button_field_is_a_no_op() {
        let mut ctl = RelayController::new();
        for raw in ["{}", r#"{"event":{}}"#, r#"{"other":true}"#] {
            assert!(matches!(
                ctl.handle(raw),
                Action::Ignore(EventError::MissingButton)
            ));
            assert!(!ctl.is_on());
        }
    }

    #[test]
    fn sentinel_ends_session_without_reply() {
        let mut ctl = RelayController::new();
        assert!(matches!(ctl.handle("999"), Action::Disconnect));

        // regardless of how far the toggle has advanced
        let mut ctl = RelayController::new();
        ctl.handle(PRESS);
        assert!(matches!(ctl.handle("999"), Action::Disconnect));
    }

    #[test]
    fn commands_keep_leds_consistent_with_relay() {
        let mut ctl = RelayController::new();
        for _ in 0..4 {
            let cmd = reply(ctl.handle(PRESS));
            assert_eq!(cmd.control.red_button_led, cmd.control.relay0);
            assert_ne!(cmd.control.green_button_led, cmd.control.relay0);
        }
    }

    #[test]
    fn scripted_session_matches_device_trace() {
        let mut ctl = RelayController::new();

        assert!(matches!(ctl.handle("bad json"), Action::Ignore(_)));

        let on = reply(ctl.handle(PRESS));
        assert_eq!(
            serde_json::to_value(&on).unwrap(),
            json!({"control":{"relay0":"on","display0":"Relay On","redButtonLED":"on","greenButtonLED":"off"}})
        );

        let off = reply(ctl.handle(PRESS));
        assert_eq!(
            serde_json::to_value(&off).unwrap(),
            json!({"control":{"relay0":"off","display0":"Relay Off","redButtonLED":"off","greenButtonLED":"on"}})
        );

        assert!(matches!(ctl.handle("999"), Action::Disconnect));
    }

    #[test]
    fn sessions_do_not_share_state() {
        let mut first = RelayController::new();
        first.handle(PRESS);
        first.handle(PRESS);
        first.handle(PRESS);
        assert!(first.is_on());

        let mut second = RelayController::new();
        assert!(!second.is_on());
        assert_eq!(reply(second.handle(PRESS)).control.relay0, Switch::On);
    }
}
