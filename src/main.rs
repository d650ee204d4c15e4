// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapty console host.
//!
//! Wires the controller to a file-backed store and console views, then
//! feeds it one command per line from stdin.

use mapty_tracker::{
    config::Config,
    db::FileStore,
    models::Coordinates,
    services::{PersistenceAdapter, WorkoutStore},
    ui::{
        console::{
            ConsoleDialogs, ConsoleForm, ConsoleFormState, ConsoleList, ConsoleMap,
            FixedGeolocation, SharedFormState,
        },
        Views,
    },
    InteractionController,
};
use std::cell::RefCell;
use std::io::{self, BufRead};
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "commands: click <lat> <lng> | kind <running|cycling> | \
submit <distance> <duration> <cadence|elevation> | cancel | edit <id> | \
delete <id> | show <id> | list | reset | help | quit";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment
    let config = Config::from_env()?;
    init_logging(config.log_json);
    tracing::info!(path = %config.store_path.display(), "Starting Mapty");

    let persistence = PersistenceAdapter::new(
        FileStore::open(&config.store_path),
        config.storage_key.clone(),
    );

    let form_state: SharedFormState = Rc::new(RefCell::new(ConsoleFormState::default()));
    form_state.borrow_mut().fields.kind = "running".to_string();

    let views = Views {
        map: Box::new(ConsoleMap),
        form: Box::new(ConsoleForm::new(form_state.clone())),
        list: Box::new(ConsoleList),
        dialogs: Box::new(ConsoleDialogs),
    };

    let mut controller =
        InteractionController::new(WorkoutStore::new(), persistence, views, config.map_zoom);
    controller
        .start(&FixedGeolocation::new(config.home))
        .await;

    println!("{}", HELP);
    let stdin = io::stdin();
    loop {
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let args: Vec<&str> = line.split_whitespace().collect();
        if !run_command(&mut controller, &form_state, &args) {
            break;
        }
    }

    tracing::info!(count = controller.store().len(), "Exiting");
    Ok(())
}

/// Apply one console command. Returns `false` to quit.
fn run_command(
    controller: &mut InteractionController,
    form: &SharedFormState,
    args: &[&str],
) -> bool {
    match args {
        [] => {}
        ["quit"] | ["exit"] => return false,
        ["help"] => println!("{}", HELP),
        ["click", lat, lng] => match (lat.parse::<f64>(), lng.parse::<f64>()) {
            (Ok(lat), Ok(lng)) => controller.handle_map_click(Coordinates::new(lat, lng)),
            _ => println!("click needs two numbers"),
        },
        ["kind", kind] => {
            if form.borrow().kind_locked {
                println!("kind cannot change while editing");
            } else {
                form.borrow_mut().fields.kind = kind.to_string();
                controller.handle_kind_change();
            }
        }
        ["submit", distance, duration, value] => {
            {
                let mut state = form.borrow_mut();
                state.fields.distance = distance.to_string();
                state.fields.duration = duration.to_string();
                state.fields.cadence = value.to_string();
                state.fields.elevation = value.to_string();
            }
            controller.handle_submit();
        }
        ["cancel"] => controller.handle_cancel(),
        ["edit", id] => controller.handle_edit_click(id),
        ["delete", id] => controller.handle_delete_click(id),
        ["show", id] => controller.handle_entry_click(id),
        ["list"] => controller.handle_list(),
        ["reset"] => controller.handle_reset_click(),
        _ => println!("unknown command; {}", HELP),
    }
    true
}

/// Initialize logging to stderr: JSON when requested, plain text otherwise.
fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,mapty_tracker=debug"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_writer(io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}
