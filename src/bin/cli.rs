use chrono::NaiveDate;
use homework_planner::config::StoreBackend;
use homework_planner::frame::{
    assignments_frame, instances_frame, progress_frame, render_text_table,
};
use homework_planner::persistence::PersistenceResult;
use homework_planner::{
    Assignment, JsonFileStore, Planner, PlannerConfig, ScheduledTaskInstance, SlotStore,
    load_instances_from_csv, load_planner, save_instances_to_csv, save_planner, subject,
};
use std::io::{self, Write};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const HARD_FLAG: &str = "--hard";

fn init_tracing() {
    // Opt-in via RUST_LOG; logs go to stderr so they never mix with the REPL.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn open_store(config: &PlannerConfig) -> PersistenceResult<Box<dyn SlotStore>> {
    match config.store.backend {
        StoreBackend::Json => Ok(Box::new(JsonFileStore::new(&config.store.data_dir)?)),
        #[cfg(feature = "sqlite")]
        StoreBackend::Sqlite => {
            std::fs::create_dir_all(&config.store.data_dir)?;
            Ok(Box::new(homework_planner::SqliteSlotStore::new(
                config.sqlite_path(),
            )?))
        }
        #[cfg(not(feature = "sqlite"))]
        StoreBackend::Sqlite => Err(homework_planner::PersistenceError::InvalidData(
            "sqlite backend requires the `sqlite` feature".into(),
        )),
    }
}

fn persist(store: &dyn SlotStore, planner: &Planner) {
    if let Err(err) = save_planner(store, planner) {
        tracing::warn!(error = %err, "saving planner state failed");
        println!("Warning: state not saved ({err})");
    }
}

fn print_help() {
    println!(
        "Commands:\n  help                                   Show this help\n  today                                  Tasks scheduled for today\n  day <YYYY-MM-DD>                       Tasks scheduled on a date\n  schedule                               Whole schedule grouped by date\n  progress                               Completion per subject\n  subjects                               List subjects and colors\n  list                                   List assignments\n  add <subject> <units> <name...> [--hard]\n                                         Add an assignment split across the range\n  daily <subject> <name...> [--hard]     Add an assignment due every day\n  delete <assignment_id>                 Delete an assignment and its tasks\n  done <task_id>                         Toggle a task's done flag\n  move <task_id> <YYYY-MM-DD>            Move a task to another date\n  export <path.csv>                      Write all tasks to CSV\n  import <path.csv>                      Restore done flags from a CSV export\n  save                                   Save state now\n  quit|exit                              Exit"
    );
}

fn print_tasks(tasks: &[ScheduledTaskInstance]) {
    match instances_frame(tasks) {
        Ok(df) => println!("{}", render_text_table(&df)),
        Err(e) => println!("Error: {}", e),
    }
}

fn print_day(planner: &Planner, date: NaiveDate) {
    let tasks: Vec<ScheduledTaskInstance> = planner.tasks_on(date).into_iter().cloned().collect();
    if tasks.is_empty() {
        println!("No tasks on {date}.");
        return;
    }
    let done = tasks.iter().filter(|t| t.done).count();
    println!("{date}: {done}/{} done", tasks.len());
    print_tasks(&tasks);
}

fn print_schedule(planner: &Planner) {
    let days = planner.day_schedules();
    if days.is_empty() {
        println!("Schedule is empty. Add an assignment first.");
        return;
    }
    for day in days {
        println!("{} ({}/{})", day.date, day.completed_count(), day.tasks.len());
        for task in &day.tasks {
            let mark = if task.done { "x" } else { " " };
            let effort = if task.high_effort { " !" } else { "" };
            println!("  [{mark}] {:<8} {} ({}){effort}", task.id, task.name, task.category);
        }
    }
}

fn print_subjects() {
    for (label, color) in subject::SUBJECT_COLORS {
        println!("  {:<12} {}", label, color);
    }
}

/// Splits trailing words into a name and the high-effort flag.
fn parse_name<'a>(words: impl Iterator<Item = &'a str>) -> (String, bool) {
    let mut high_effort = false;
    let mut name = Vec::new();
    for word in words {
        if word == HARD_FLAG {
            high_effort = true;
        } else {
            name.push(word);
        }
    }
    (name.join(" "), high_effort)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn add_assignment(planner: &mut Planner, assignment: Assignment) -> bool {
    let id = assignment.id.clone();
    match planner.add_assignment(assignment) {
        Ok(summary) => {
            println!("Added assignment {id} ({}).", summary.to_cli_summary());
            true
        }
        Err(e) => {
            println!("Error: {}", e);
            false
        }
    }
}

fn main() {
    init_tracing();

    let config = match PlannerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(2);
        }
    };
    let range = match config.range() {
        Ok(range) => range,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(2);
        }
    };
    let store = match open_store(&config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Store error: {e}");
            std::process::exit(2);
        }
    };

    let mut planner = load_planner(store.as_ref(), range);

    println!(
        "Homework Planner (CLI) {} - {} - type 'help' for commands\n",
        range.start(),
        range.end()
    );

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "today" => {
                let today = chrono::Local::now().date_naive();
                print_day(&planner, today);
            }
            "day" => match parts.next().map(parse_date) {
                Some(Some(date)) => print_day(&planner, date),
                Some(None) => println!("Invalid date (YYYY-MM-DD)"),
                None => println!("Usage: day <YYYY-MM-DD>"),
            },
            "schedule" => print_schedule(&planner),
            "progress" => {
                let summary = planner.progress();
                println!("Progress: {}", summary.to_cli_summary());
                match progress_frame(&summary) {
                    Ok(df) => println!("{}", render_text_table(&df)),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "subjects" => print_subjects(),
            "list" => {
                if planner.assignments().is_empty() {
                    println!("No assignments.");
                    continue;
                }
                match assignments_frame(planner.assignments()) {
                    Ok(df) => println!("{}", render_text_table(&df)),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "add" => {
                let category = parts.next();
                let units_s = parts.next();
                let (name, high_effort) = parse_name(parts);
                match (category, units_s, name.is_empty()) {
                    (Some(category), Some(units_s), false) => {
                        let units: u32 = match units_s.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid units");
                                continue;
                            }
                        };
                        if !subject::is_known_subject(category) {
                            println!("Note: '{category}' is not a known subject; it will use the default color.");
                        }
                        let assignment =
                            Assignment::split(planner.next_assignment_id(), name, category, units)
                                .with_high_effort(high_effort);
                        if add_assignment(&mut planner, assignment) {
                            persist(store.as_ref(), &planner);
                        }
                    }
                    _ => println!("Usage: add <subject> <units> <name...> [--hard]"),
                }
            }
            "daily" => {
                let category = parts.next();
                let (name, high_effort) = parse_name(parts);
                match (category, name.is_empty()) {
                    (Some(category), false) => {
                        if !subject::is_known_subject(category) {
                            println!("Note: '{category}' is not a known subject; it will use the default color.");
                        }
                        let assignment =
                            Assignment::recurring(planner.next_assignment_id(), name, category)
                                .with_high_effort(high_effort);
                        if add_assignment(&mut planner, assignment) {
                            persist(store.as_ref(), &planner);
                        }
                    }
                    _ => println!("Usage: daily <subject> <name...> [--hard]"),
                }
            }
            "delete" => match parts.next() {
                Some(id) => {
                    let label = planner
                        .find_assignment(id)
                        .map(|a| format!("{} [{}]", a.name, a.describe()));
                    match (label, planner.remove_assignment(id)) {
                        (Some(label), Some(summary)) => {
                            println!(
                                "Deleted assignment {id}: {label} ({}).",
                                summary.to_cli_summary()
                            );
                            persist(store.as_ref(), &planner);
                        }
                        _ => println!("Assignment {id} not found."),
                    }
                }
                None => println!("Usage: delete <assignment_id>"),
            },
            "done" => match parts.next() {
                Some(id) => {
                    if planner.toggle_done(id) {
                        let state = planner
                            .find_instance(id)
                            .map(|t| if t.done { "done" } else { "not done" })
                            .unwrap_or("unknown");
                        println!("Task {id} marked {state}.");
                        persist(store.as_ref(), &planner);
                    } else {
                        println!("Task {id} not found.");
                    }
                }
                None => println!("Usage: done <task_id>"),
            },
            "move" => {
                let id = parts.next();
                let date_s = parts.next();
                match (id, date_s) {
                    (Some(id), Some(date_s)) => {
                        let date = match parse_date(date_s) {
                            Some(d) => d,
                            None => {
                                println!("Invalid date (YYYY-MM-DD)");
                                continue;
                            }
                        };
                        if planner.reschedule(id, date) {
                            if !planner.range().contains(date) {
                                println!("Note: {date} is outside the planning range.");
                            }
                            println!("Task {id} moved to {date}.");
                            persist(store.as_ref(), &planner);
                        } else {
                            println!("Task {id} not found.");
                        }
                    }
                    _ => println!("Usage: move <task_id> <YYYY-MM-DD>"),
                }
            }
            "export" => match parts.next() {
                Some(path) => match save_instances_to_csv(planner.instances(), path) {
                    Ok(()) => println!("Exported {} tasks to {path}.", planner.instances().len()),
                    Err(e) => println!("Error exporting tasks: {}", e),
                },
                None => println!("Usage: export <path.csv>"),
            },
            "import" => match parts.next() {
                Some(path) => match load_instances_from_csv(path) {
                    Ok(snapshot) => {
                        let report = planner.restore_completion(&snapshot);
                        println!(
                            "Imported from {path}: matched={}, done={}, unmatched={}.",
                            report.carried, report.carried_done, report.dropped
                        );
                        persist(store.as_ref(), &planner);
                    }
                    Err(e) => println!("Error importing tasks: {}", e),
                },
                None => println!("Usage: import <path.csv>"),
            },
            "save" => match save_planner(store.as_ref(), &planner) {
                Ok(()) => println!("State saved."),
                Err(e) => println!("Error saving state: {}", e),
            },
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
