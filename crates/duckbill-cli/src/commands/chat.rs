//! Interactive chat REPL over the conversation engine.
//!
//! Free text goes through `process_turn`; the selection entry points the
//! real front end drives with buttons are exposed as slash commands:
//!
//!   /pick <restaurant>       choose a restaurant option
//!   /destination <name>      choose a ski destination
//!   /trip-tasks a; b; c      check off suggested trip tasks
//!   /tasks                   list stored tasks
//!   /session                 dump the current session state
//!   /quit                    leave

use anyhow::{Context, Result};
use duckbill_core::task::{InMemoryTaskStore, TaskRepository};
use duckbill_core::{ConversationEngine, EngineConfig, SystemClock};
use duckbill_types::task_draft::BRAIN_DUMP_SOURCE;
use duckbill_types::{Priority, TaskDraft, TurnResult};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

pub async fn run(config_path: Option<PathBuf>) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EngineConfig::from_toml_str(&text)?
        }
        None => EngineConfig::default(),
    };

    let engine = ConversationEngine::new(config)?;
    let clock = Arc::new(SystemClock);
    let tasks = InMemoryTaskStore::with_sample_data(clock).await;

    println!("duckbill ready. Tell me what's on your mind (/quit to leave).");

    let stdin = std::io::stdin();
    let mut session_id: Option<String> = None;

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let result = match line.split_once(' ') {
            _ if line == "/quit" => break,
            _ if line == "/tasks" => {
                for task in tasks.list().await? {
                    println!(
                        "  #{} {} {} [{}] {}",
                        task.id,
                        task.icon,
                        task.title,
                        task.state.as_str(),
                        task.status
                    );
                }
                continue;
            }
            _ if line == "/session" => {
                match &session_id {
                    Some(id) => match engine.get_session(id).await {
                        Some(session) => println!("{}", serde_json::to_string_pretty(&session)?),
                        None => println!("no active session"),
                    },
                    None => println!("no active session"),
                }
                continue;
            }
            Some(("/pick", rest)) => {
                let id = session_id.clone().unwrap_or_default();
                engine.select_restaurant(&id, rest.trim()).await
            }
            Some(("/destination", rest)) => {
                let id = session_id.clone().unwrap_or_default();
                engine.select_destination(&id, rest.trim()).await
            }
            Some(("/trip-tasks", rest)) => {
                let chosen: Vec<String> = rest
                    .split(';')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
                let id = session_id.clone().unwrap_or_default();
                engine.select_trip_tasks(&id, chosen).await
            }
            _ => {
                let outcome = engine.process_turn(session_id.as_deref(), line).await;
                session_id = Some(outcome.session_id);
                outcome.result
            }
        };

        render(&result, &tasks).await?;
    }

    Ok(())
}

async fn render(result: &TurnResult, tasks: &InMemoryTaskStore) -> Result<()> {
    println!("duckbill> {}", result.reply);

    if let Some(options) = &result.restaurant_options {
        println!("  options (/pick <name>):");
        for option in options {
            println!("    - {} ({}) — {}", option.name, option.cuisine, option.note);
        }
    }
    if let Some(options) = &result.destination_options {
        println!("  destinations (/destination <name>):");
        for option in options {
            println!("    - {}, {} — {}", option.name, option.location, option.note);
        }
    }
    if let Some(suggested) = &result.suggested_tasks {
        println!("  checklist (/trip-tasks a; b; c):");
        for item in suggested {
            println!("    [ ] {item}");
        }
    }

    if result.create_task {
        if let Some(draft) = &result.task_data {
            let task = tasks.create_from_draft(draft.clone()).await?;
            println!("  task #{} created: {}", task.id, task.title);
        }
    }

    if let Some(batch) = &result.tasks_to_create {
        for title in batch {
            let draft = TaskDraft {
                title: title.clone(),
                description: title.clone(),
                priority: Priority::Medium,
                deadline: None,
                source: BRAIN_DUMP_SOURCE.to_string(),
                task_type: None,
                appointment_details: None,
                booking_details: None,
            };
            let task = tasks.create_from_draft(draft).await?;
            println!("  task #{} created: {}", task.id, task.title);
        }
    }

    Ok(())
}
