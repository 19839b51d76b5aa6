use std::fmt;
use std::io::Write;

use anyhow::{anyhow, Result};

use crate::cli::{AddArgs, CliCommand, DeleteArgs, DoneArgs, ListArgs};
use crate::config::AppConfig;
use crate::core::commands as core_commands;
use crate::model::{CompleteOutcome, DeleteOutcome, Filter, Task};

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::Add(args) => handle_add(config, &args, &mut writer),
        CliCommand::List(args) => handle_list(config, &args, &mut writer),
        CliCommand::Done(args) => handle_done(config, &args, &mut writer),
        CliCommand::Delete(args) => handle_delete(config, &args, &mut writer),
        CliCommand::ClearCompleted => handle_clear_completed(config, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch interactive surfaces directly")),
    }
}

fn handle_add<W: Write>(config: &AppConfig, args: &AddArgs, mut writer: W) -> Result<()> {
    let task = core_commands::add_task(config, &args.text.join(" "))?;
    writeln!(writer, "Added {}  {}", task.id, task.title)?;
    Ok(())
}

fn handle_list<W: Write>(config: &AppConfig, args: &ListArgs, mut writer: W) -> Result<()> {
    let tasks = core_commands::list_tasks(config, args.filter);
    if tasks.is_empty() {
        let message = match args.filter {
            Filter::All => "No todos yet",
            Filter::Active => "No active todos",
            Filter::Completed => "No completed todos",
        };
        writeln!(writer, "{}", message)?;
        return Ok(());
    }
    for task in &tasks {
        writeln!(writer, "{}", ListLine(task))?;
    }
    Ok(())
}

fn handle_done<W: Write>(config: &AppConfig, args: &DoneArgs, mut writer: W) -> Result<()> {
    let results = core_commands::complete_tasks(config, &args.ids)?;
    CompleteSummary::from_results(&results).write_to(&mut writer)?;
    Ok(())
}

fn handle_delete<W: Write>(config: &AppConfig, args: &DeleteArgs, mut writer: W) -> Result<()> {
    let results = core_commands::delete_tasks(config, &args.ids)?;
    DeleteSummary::from_results(&results).write_to(&mut writer)?;
    Ok(())
}

fn handle_clear_completed<W: Write>(config: &AppConfig, mut writer: W) -> Result<()> {
    let removed = core_commands::clear_completed(config)?;
    if removed > 0 {
        writeln!(
            writer,
            "Cleared {} completed todo{}",
            removed,
            plural(removed)
        )?;
    } else {
        writeln!(writer, "No completed todos")?;
    }
    Ok(())
}

struct ListLine<'a>(&'a Task);

impl fmt::Display for ListLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.0.completed { 'x' } else { ' ' };
        write!(f, "[{}] {:>13}  {}", mark, self.0.id, self.0.title)
    }
}

struct CompleteSummary {
    completed: usize,
    unchanged: Vec<i64>,
}

impl CompleteSummary {
    fn from_results(results: &[CompleteOutcome]) -> Self {
        let mut completed = 0usize;
        let mut unchanged = Vec::new();
        for result in results {
            if result.changed {
                completed += 1;
            } else {
                unchanged.push(result.id);
            }
        }
        Self {
            completed,
            unchanged,
        }
    }

    fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        if self.completed > 0 {
            writeln!(
                writer,
                "Completed {} todo{}",
                self.completed,
                plural(self.completed)
            )?;
        } else {
            writeln!(writer, "No todos completed")?;
        }
        if !self.unchanged.is_empty() {
            writeln!(writer, "Not found or already done: {}", join_ids(&self.unchanged))?;
        }
        Ok(())
    }
}

struct DeleteSummary {
    deleted: usize,
    missing: Vec<i64>,
}

impl DeleteSummary {
    fn from_results(results: &[DeleteOutcome]) -> Self {
        let mut deleted = 0usize;
        let mut missing = Vec::new();
        for result in results {
            if result.deleted {
                deleted += 1;
            } else {
                missing.push(result.id);
            }
        }
        Self { deleted, missing }
    }

    fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        if self.deleted > 0 {
            writeln!(writer, "Deleted {} todo{}", self.deleted, plural(self.deleted))?;
        } else {
            writeln!(writer, "No todos deleted")?;
        }
        if !self.missing.is_empty() {
            writeln!(writer, "Not found: {}", join_ids(&self.missing))?;
        }
        Ok(())
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        (config, dir)
    }

    fn run(config: &AppConfig, command: CliCommand) -> String {
        let mut output = Vec::new();
        execute(config, command, &mut output).expect("execute command");
        String::from_utf8(output).expect("utf8")
    }

    #[test]
    fn add_then_list_round_trips_through_the_store() {
        let (config, _dir) = temp_config();
        let added = run(
            &config,
            CliCommand::Add(AddArgs {
                text: vec!["Buy".into(), "milk".into()],
            }),
        );
        assert!(added.contains("Buy milk"));

        let listed = run(
            &config,
            CliCommand::List(ListArgs {
                filter: crate::model::Filter::All,
            }),
        );
        assert!(listed.contains("[ ]"));
        assert!(listed.contains("Buy milk"));
    }

    #[test]
    fn add_rejects_blank_text() {
        let (config, _dir) = temp_config();
        let mut output = Vec::new();
        let err = execute(
            &config,
            CliCommand::Add(AddArgs {
                text: vec!["   ".into()],
            }),
            &mut output,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Title should not be empty");
    }

    #[test]
    fn done_command_reports_completed_and_unknown() {
        let (config, _dir) = temp_config();
        let task = core_commands::add_task(&config, "Test").expect("add task");

        let output = run(
            &config,
            CliCommand::Done(DoneArgs {
                ids: vec![task.id, 42],
            }),
        );
        assert!(output.contains("Completed 1 todo"));
        assert!(output.contains("Not found or already done: 42"));
    }

    #[test]
    fn delete_command_reports_deleted_and_missing() {
        let (config, _dir) = temp_config();
        let task = core_commands::add_task(&config, "Test").expect("add task");

        let output = run(
            &config,
            CliCommand::Delete(DeleteArgs {
                ids: vec![task.id, 42],
            }),
        );
        assert!(output.contains("Deleted 1 todo"));
        assert!(output.contains("Not found: 42"));
    }

    #[test]
    fn clear_completed_handles_no_matches() {
        let (config, _dir) = temp_config();
        core_commands::add_task(&config, "Still active").expect("add task");

        let output = run(&config, CliCommand::ClearCompleted);
        assert!(output.contains("No completed todos"));
    }
}
