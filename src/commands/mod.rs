//! Panel commands
//!
//! The line grammar typed into the terminal host, and what each command does
//! to the application state.

pub mod actions;

use crate::error::{AppError, Result};
use crate::form::{FormState, FIELD_NAMES};
use crate::state::AppState;
use actions::Action;

pub const HELP: &str = "\
Commands:
  set <field> <value>   set a form field
  check <field>         tick a checkbox field
  uncheck <field>       clear a checkbox field
  fields                show form values
  collect               collect market data
  train                 train the model
  predict               predict days to target profit
  ping                  check the service
  show                  show the current result
  help                  this text
  quit                  leave the panel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: String, value: String },
    Check { field: String, checked: bool },
    Fields,
    Run(Action),
    Show,
    Help,
    Quit,
    Empty,
}

/// What the host should do after a command
pub enum Reply {
    /// Print this text
    Text(String),
    /// Leave the panel
    Quit,
    Nothing,
}

/// Parse one input line
pub fn parse(line: &str) -> Result<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "" => Command::Empty,
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            Command::Set {
                field: known_field(field)?,
                value: value.to_string(),
            }
        }
        "check" | "uncheck" => Command::Check {
            field: known_field(rest)?,
            checked: word == "check",
        },
        "fields" => Command::Fields,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => match other.parse::<Action>() {
            Ok(action) => Command::Run(action),
            Err(()) => {
                return Err(AppError::Validation(format!(
                    "Unknown command '{}'. Type 'help' for a list.",
                    other
                )))
            }
        },
    };

    Ok(command)
}

fn known_field(name: &str) -> Result<String> {
    if name.is_empty() {
        return Err(AppError::Validation("Missing field name".to_string()));
    }
    if !FormState::is_known(name) {
        return Err(AppError::Validation(format!(
            "Unknown field '{}'. Fields: {}",
            name,
            FIELD_NAMES.join(", ")
        )));
    }
    Ok(name.to_string())
}

/// Apply a command to the state
pub fn execute(state: &AppState, command: Command) -> Reply {
    match command {
        Command::Set { field, value } => {
            state.form.set(&field, value);
            Reply::Nothing
        }
        Command::Check { field, checked } => {
            state.form.set(&field, checked.to_string());
            Reply::Nothing
        }
        Command::Fields => Reply::Text(
            state
                .form
                .snapshot()
                .into_iter()
                .map(|(name, value)| format!("  {:<13}{}", name, value))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        Command::Run(action) => {
            // Runs detached; its outcome arrives through the display
            actions::launch(state, action);
            Reply::Nothing
        }
        Command::Show => Reply::Text(state.display.text()),
        Command::Help => Reply::Text(HELP.to_string()),
        Command::Quit => Reply::Quit,
        Command::Empty => Reply::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelConfig;
    use crate::form::{self, FieldSource};

    #[test]
    fn test_parse_set_keeps_spaces() {
        assert_eq!(
            parse("set symbol  ETH/USDT ").unwrap(),
            Command::Set {
                field: "symbol".to_string(),
                value: "ETH/USDT".to_string()
            }
        );
        assert_eq!(
            parse("set timeframe 4 h").unwrap(),
            Command::Set {
                field: "timeframe".to_string(),
                value: "4 h".to_string()
            }
        );
        assert_eq!(
            parse("set targetProfit").unwrap(),
            Command::Set {
                field: "targetProfit".to_string(),
                value: String::new()
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(parse("set colour red").is_err());
        assert!(parse("set").is_err());
        assert!(parse("check").is_err());
        assert!(parse("launch").is_err());
    }

    #[test]
    fn test_parse_actions_and_controls() {
        assert_eq!(parse("collect").unwrap(), Command::Run(Action::Collect));
        assert_eq!(parse("  predict ").unwrap(), Command::Run(Action::Predict));
        assert_eq!(parse("exit").unwrap(), Command::Quit);
        assert_eq!(parse("").unwrap(), Command::Empty);
        assert_eq!(
            parse("uncheck fetchAll").unwrap(),
            Command::Check {
                field: "fetchAll".to_string(),
                checked: false
            }
        );
    }

    #[test]
    fn test_execute_updates_form() {
        let state = AppState::new(PanelConfig::default()).unwrap();

        execute(&state, parse("set limit 250").unwrap());
        execute(&state, parse("check fetchAll").unwrap());

        assert_eq!(state.form.value(form::LIMIT), "250");
        assert!(state.form.checked(form::FETCH_ALL));

        match execute(&state, Command::Fields) {
            Reply::Text(text) => assert!(text.contains("250")),
            _ => panic!("expected field listing"),
        }
        assert!(matches!(execute(&state, Command::Quit), Reply::Quit));
    }

    #[tokio::test]
    async fn test_run_reports_through_display() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let state = AppState::new(PanelConfig {
            base_url: format!("http://{}", addr),
            ..Default::default()
        })
        .unwrap();
        let mut rx = state.display.subscribe();

        let reply = execute(&state, parse("ping").unwrap());
        assert!(matches!(reply, Reply::Nothing));

        rx.changed().await.unwrap();
        assert!(state.display.text().starts_with("Erro: "));
    }
}
