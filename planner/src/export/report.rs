//! Plain-text board report

use crate::types::{timestamp, Board, Task, TaskStatus, UserId};
use chrono::NaiveDateTime;
use std::collections::HashMap;

const RULE: char = '=';
const BAND: char = '▓';
const SEPARATOR: char = '─';
const WIDTH: usize = 80;

/// Everything needed to render one board
#[derive(Debug, Clone)]
pub struct BoardReport {
    pub board: Board,
    /// `None` when the owning team no longer resolves
    pub team_name: Option<String>,
    /// Tasks on this board, in creation order
    pub tasks: Vec<Task>,
    /// Assignee id -> display name
    pub display_names: HashMap<UserId, String>,
}

/// Task totals per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub open: usize,
    pub in_progress: usize,
    pub complete: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.open + self.in_progress + self.complete
    }

    /// Percentage of complete tasks; 0.0 for an empty board
    pub fn completion_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.complete as f64 / total as f64 * 100.0,
        }
    }
}

impl BoardReport {
    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for task in &self.tasks {
            match task.status {
                TaskStatus::Open => counts.open += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Complete => counts.complete += 1,
            }
        }
        counts
    }

    /// Render the report; lines are joined by `\n` with no trailing newline
    pub fn render(&self) -> String {
        let rule = RULE.to_string().repeat(WIDTH);
        let band = BAND.to_string().repeat(WIDTH);
        let separator = SEPARATOR.to_string().repeat(WIDTH - 4);
        let board = &self.board;

        let mut lines = vec![
            rule.clone(),
            format!("PROJECT BOARD: {}", board.name),
            rule.clone(),
            format!("Team: {}", self.team_name.as_deref().unwrap_or("Unknown")),
            format!("Description: {}", board.description),
            format!("Status: {}", board.status),
            format!("Created: {}", board.creation_time.format(timestamp::FORMAT)),
        ];
        if let Some(end_time) = board.end_time {
            lines.push(format!("Closed: {}", end_time.format(timestamp::FORMAT)));
        }
        lines.push(rule.clone());
        lines.push(String::new());

        for status in TaskStatus::ALL {
            let tasks: Vec<&Task> = self.tasks.iter().filter(|t| t.status == status).collect();

            lines.push(String::new());
            lines.push(band.clone());
            lines.push(format!("  {} ({} tasks)", status, tasks.len()));
            lines.push(band.clone());
            lines.push(String::new());

            if tasks.is_empty() {
                lines.push("  No tasks in this status".to_string());
                lines.push(String::new());
                continue;
            }

            for task in tasks {
                let assignee = self
                    .display_names
                    .get(&task.user_id)
                    .map(String::as_str)
                    .unwrap_or("Unknown User");
                lines.push(format!("  [{}] {}", task.id, task.title));
                lines.push(format!("  {separator}"));
                lines.push(format!("  Description: {}", task.description));
                lines.push(format!("  Assigned to: {} ({})", assignee, task.user_id));
                lines.push(format!(
                    "  Created: {}",
                    task.creation_time.format(timestamp::FORMAT)
                ));
                lines.push(String::new());
            }
        }

        let counts = self.counts();
        lines.extend([
            rule.clone(),
            "SUMMARY".to_string(),
            rule.clone(),
            format!("Total Tasks: {}", counts.total()),
            format!("  • Open: {}", counts.open),
            format!("  • In Progress: {}", counts.in_progress),
            format!("  • Complete: {}", counts.complete),
            format!("  • Completion Rate: {:.1}%", counts.completion_rate()),
            rule,
        ]);

        lines.join("\n")
    }
}

/// `<name>_<board id>_<YYYYmmdd_HHMMSS>.txt`, with spaces and slashes in the name replaced
///
/// A non-zero `copy` is appended as `_<copy>` so exports within the same second get distinct names.
pub fn report_file_name(board: &Board, at: NaiveDateTime, copy: u32) -> String {
    let safe_name = board.name.replace([' ', '/'], "_");
    let stamp = at.format("%Y%m%d_%H%M%S");
    match copy {
        0 => format!("{}_{}_{}.txt", safe_name, board.id, stamp),
        n => format!("{}_{}_{}_{}.txt", safe_name, board.id, stamp, n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoardId, BoardStatus, TaskId, TeamId};

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, timestamp::FORMAT).unwrap()
    }

    fn board() -> Board {
        let mut board = Board::new(BoardId::from("board_1"), "Sprint 1", "First sprint", TeamId::from("team_1"));
        board.creation_time = at("2024-05-01 09:00:00");
        board
    }

    fn task(n: u64, title: &str, user: &str, status: TaskStatus) -> Task {
        let mut task = Task::new(
            TaskId::from(format!("task_{n}")),
            title,
            format!("{title} description"),
            UserId::from(user),
            BoardId::from("board_1"),
        );
        task.status = status;
        task.creation_time = at("2024-05-02 10:30:00");
        task
    }

    #[test]
    fn test_completion_rate() {
        let counts = StatusCounts {
            open: 1,
            in_progress: 0,
            complete: 3,
        };
        assert_eq!(format!("{:.1}", counts.completion_rate()), "75.0");
        assert_eq!(StatusCounts::default().completion_rate(), 0.0);
    }

    #[test]
    fn test_render_empty_board() {
        let report = BoardReport {
            board: board(),
            team_name: None,
            tasks: Vec::new(),
            display_names: HashMap::new(),
        };
        let text = report.render();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=".repeat(80));
        assert_eq!(lines[1], "PROJECT BOARD: Sprint 1");
        assert_eq!(lines[3], "Team: Unknown");
        assert_eq!(lines[5], "Status: OPEN");
        assert_eq!(lines[6], "Created: 2024-05-01 09:00:00");
        assert!(!text.contains("Closed:"));
        assert_eq!(text.matches("No tasks in this status").count(), 3);
        assert!(text.contains("  • Completion Rate: 0.0%"));
        assert!(!text.ends_with('\n'));
        assert!(text.ends_with(&"=".repeat(80)));
    }

    #[test]
    fn test_render_tasks_grouped_by_status() {
        let mut board = board();
        board.status = BoardStatus::Closed;
        board.end_time = Some(at("2024-05-09 17:00:00"));

        let report = BoardReport {
            board,
            team_name: Some("core".into()),
            tasks: vec![
                task(1, "Design", "user_1", TaskStatus::Complete),
                task(2, "Build", "user_2", TaskStatus::InProgress),
                task(3, "Ship", "user_9", TaskStatus::Complete),
                task(4, "Review", "user_1", TaskStatus::Complete),
            ],
            display_names: HashMap::from([
                (UserId::from("user_1"), "Ana Lima".to_string()),
                (UserId::from("user_2"), "Bo".to_string()),
            ]),
        };
        let text = report.render();

        assert!(text.contains("Team: core"));
        assert!(text.contains("Closed: 2024-05-09 17:00:00"));
        assert!(text.contains(&format!("{}\n  OPEN (0 tasks)\n", "▓".repeat(80))));
        assert!(text.contains("  IN_PROGRESS (1 tasks)"));
        assert!(text.contains("  COMPLETE (3 tasks)"));
        assert!(text.contains(&format!(
            "  [task_1] Design\n  {}\n  Description: Design description\n  Assigned to: Ana Lima (user_1)\n  Created: 2024-05-02 10:30:00\n",
            "─".repeat(76)
        )));
        assert!(text.contains("  Assigned to: Unknown User (user_9)"));

        // Complete tasks keep creation order within the group
        let design = text.find("[task_1]").unwrap();
        let ship = text.find("[task_3]").unwrap();
        let review = text.find("[task_4]").unwrap();
        assert!(design < ship && ship < review);

        assert!(text.contains("Total Tasks: 4\n  • Open: 0\n  • In Progress: 1\n  • Complete: 3\n  • Completion Rate: 75.0%"));
    }

    #[test]
    fn test_report_file_name() {
        let mut board = board();
        board.name = "Q3 plan/ops".into();
        assert_eq!(
            report_file_name(&board, at("2024-07-01 08:05:09"), 0),
            "Q3_plan_ops_board_1_20240701_080509.txt"
        );
        assert_eq!(
            report_file_name(&board, at("2024-07-01 08:05:09"), 2),
            "Q3_plan_ops_board_1_20240701_080509_2.txt"
        );
    }
}
