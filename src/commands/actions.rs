//! Action launching
//!
//! Each action runs in its own task so the host keeps reading commands while
//! requests are in flight. Nothing stops the same action from being launched
//! again before the previous one settles.

use crate::state::AppState;
use std::str::FromStr;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Collect,
    Train,
    Predict,
    Ping,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Collect => "collect",
            Action::Train => "train",
            Action::Predict => "predict",
            Action::Ping => "ping",
        }
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "collect" => Ok(Action::Collect),
            "train" => Ok(Action::Train),
            "predict" => Ok(Action::Predict),
            "ping" => Ok(Action::Ping),
            _ => Err(()),
        }
    }
}

/// Spawn `action` on the runtime
pub fn launch(state: &AppState, action: Action) -> JoinHandle<()> {
    debug!("Launching {}", action.name());
    let dispatcher = state.dispatcher.clone();

    tokio::spawn(async move {
        match action {
            Action::Collect => dispatcher.collect_data().await,
            Action::Train => dispatcher.train_model().await,
            Action::Predict => dispatcher.predict_profit().await,
            Action::Ping => dispatcher.check_service().await,
        }
    })
}
