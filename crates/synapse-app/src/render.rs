//! Plain-text rendering of replies and errors for the terminal.

use std::fmt::Write;

use synapse_ai::schema::StructuredResult;
use synapse_ai::{AiError, Reply};

pub fn render_reply(reply: &Reply) -> String {
    match reply {
        Reply::Text(text) => text.clone(),
        Reply::Structured(result) => render_structured(result),
    }
}

pub fn render_error(err: &AiError) -> String {
    format!("error [{}]: {}", err.kind(), err.detail())
}

/// Four sections in dashboard order: projects, tasks, decisions, people.
pub fn render_structured(result: &StructuredResult) -> String {
    let mut out = String::new();

    section(&mut out, "Projects", result.projects.len(), "No projects found.");
    for project in &result.projects {
        let _ = writeln!(out, "  - {} [{}]", project.name, project.status);
        let _ = writeln!(out, "    {}", project.description);
        if let Some(deadline) = &project.deadline {
            let _ = writeln!(out, "    Due: {deadline}");
        }
    }

    section(&mut out, "Tasks", result.tasks.len(), "No tasks found.");
    for task in &result.tasks {
        let _ = write!(
            out,
            "  - [{}] {} ({})",
            task.priority, task.description, task.assignee
        );
        if let Some(due) = &task.due_date {
            let _ = write!(out, ", due {due}");
        }
        out.push('\n');
    }

    section(&mut out, "Decisions", result.decisions.len(), "No decisions found.");
    for decision in &result.decisions {
        let _ = writeln!(out, "  - {}", decision.summary);
        let _ = write!(out, "    Impact: {}", decision.impact);
        if let Some(date) = &decision.date_made {
            let _ = write!(out, "  Date: {date}");
        }
        out.push('\n');
    }

    section(&mut out, "People", result.people.len(), "No people extracted.");
    for person in &result.people {
        let _ = writeln!(out, "  - {}, {}", person.name, person.role);
    }

    out.trim_end().to_string()
}

fn section(out: &mut String, title: &str, count: usize, empty: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "{title} ({count})");
    if count == 0 {
        let _ = writeln!(out, "  {empty}");
    }
}
