//! Terminal host
//!
//! Reads commands from stdin and prints the display target every time it
//! changes, including changes made by actions that finish while the user is
//! typing.

use crate::commands::{self, Reply};
use crate::display::DisplayMessage;
use crate::error::Result;
use crate::state::AppState;
use chrono::Local;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Format a display message as printed by the panel
pub fn render(message: &DisplayMessage) -> String {
    format!(
        "[{}] {}",
        message.shown_at.with_timezone(&Local).format("%H:%M:%S"),
        message.text
    )
}

/// Run the panel until `quit` or end of input
pub async fn run_panel(state: Arc<AppState>) -> Result<()> {
    let mut display_rx = state.display.subscribe();
    let printer = tokio::spawn(async move {
        while display_rx.changed().await.is_ok() {
            let message = display_rx.borrow_and_update().clone();
            if let Some(message) = message {
                println!("{}", render(&message));
            }
        }
    });

    println!(
        "Forecast panel ({:?}) - service at {}. Type 'help' for commands.",
        state.config.variant, state.config.base_url
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match commands::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match commands::execute(&state, command) {
            Reply::Text(text) => println!("{}", text),
            Reply::Nothing => {}
            Reply::Quit => break,
        }
    }

    info!("Panel closed");
    printer.abort();
    Ok(())
}
