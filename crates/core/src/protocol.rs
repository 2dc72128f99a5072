use serde::{Deserialize, Serialize};

// Wire message shapes and constants matching the ESP32 operator panel firmware

/// Out-of-band termination signal, honored by every session mode.
pub const SENTINEL: &str = "999";

/// Two-position output state as the firmware spells it on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn opposite(self) -> Switch {
        match self {
            Switch::On => Switch::Off,
            Switch::Off => Switch::On,
        }
    }
}

/// Inbound button press notification, reported under `event.button0`.
/// The value itself carries no meaning here; presence of the path is the event.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonEvent {
    pub button0: serde_json::Value,
}

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("message is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("JSON message has no event.button0 field")]
    MissingButton,
}

/// Parse one inbound text message as a button event.
pub fn parse_event(raw: &str) -> Result<ButtonEvent, EventError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    match value.pointer("/event/button0") {
        Some(button0) => Ok(ButtonEvent {
            button0: button0.clone(),
        }),
        None => Err(EventError::MissingButton),
    }
}

/// Outbound command driving the relay, panel display and button LEDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlMessage {
    pub control: ControlOutputs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlOutputs {
    pub relay0: Switch,
    pub display0: String,
    #[serde(rename = "redButtonLED")]
    pub red_button_led: Switch,
    #[serde(rename = "greenButtonLED")]
    pub green_button_led: Switch,
}

impl ControlMessage {
    /// Command setting every output for the given relay position. The red
    /// LED tracks the relay; the green LED is its complement.
    pub fn set_relay(position: Switch) -> Self {
        let display = match position {
            Switch::On => "Relay On",
            Switch::Off => "Relay Off",
        };
        Self {
            control: ControlOutputs {
                relay0: position,
                display0: display.to_string(),
                red_button_led: position,
                green_button_led: position.opposite(),
            },
        }
    }
}
