use std::io::Write;

use anyhow::Result;
use opremote_core::{Action, RelayController, SENTINEL};
use opremote_ws::DeviceLink;
use tokio::io::AsyncBufReadExt;
use tracing::debug;

/// Interactive session modes, selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Send stdin lines to the device verbatim.
    RawInput,
    /// Print every text message the device sends.
    PrintIncoming,
    /// Answer button events with relay toggle commands.
    Operator,
}

impl Mode {
    /// Any answer other than 1 or 2 selects the operator interface.
    pub fn from_choice(choice: &str) -> Mode {
        match choice.trim() {
            "1" => Mode::RawInput,
            "2" => Mode::PrintIncoming,
            _ => Mode::Operator,
        }
    }
}

pub async fn prompt_mode() -> Result<Mode> {
    println!("Enter config state for Websocket behavior:");
    println!("1 - User JSON input only");
    println!("2 - Websocket receiver only.");
    println!("3 - Operator Remote Interface test.");
    print!("Program State: ");
    std::io::stdout().flush()?;

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let choice = lines.next_line().await?.unwrap_or_default();
    Ok(Mode::from_choice(&choice))
}

/// Run the selected mode over the link, then close the socket.
pub async fn run(mode: Mode, mut link: DeviceLink) -> Result<()> {
    let result = match mode {
        Mode::RawInput => raw_input(&mut link).await,
        Mode::PrintIncoming => print_incoming(&mut link).await,
        Mode::Operator => operator(&mut link).await,
    };
    link.close().await;
    result
}

/// Mode 1: forward stdin lines to the device. Sending the sentinel also
/// ends the session, after it has gone out.
async fn raw_input(link: &mut DeviceLink) -> Result<()> {
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("Say something: ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let text = line.trim();
        link.send_text(text).await?;
        if text == SENTINEL {
            break;
        }
    }
    Ok(())
}

/// Mode 2: print whatever the device sends until the sentinel arrives.
async fn print_incoming(link: &mut DeviceLink) -> Result<()> {
    while let Some(message) = link.recv_text().await? {
        println!("Received: {message}");
        if message == SENTINEL {
            break;
        }
    }
    Ok(())
}

/// Mode 3: the operator remote interface. Each valid button event gets one
/// relay toggle command back; anything else is skipped.
async fn operator(link: &mut DeviceLink) -> Result<()> {
    let mut controller = RelayController::new();
    while let Some(message) = link.recv_text().await? {
        match controller.handle(&message) {
            Action::Disconnect => break,
            Action::Ignore(reason) => {
                debug!(%reason, "ignoring message");
            }
            Action::Reply(command) => {
                println!("Button event: {message}");
                println!("Sending back:\n{}", serde_json::to_string_pretty(&command)?);
                link.send_text(serde_json::to_string(&command)?).await?;
            }
        }
    }
    Ok(())
}
