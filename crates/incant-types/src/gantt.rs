//! Mermaid-style Gantt chart schemas.

use incant_core::{Field, FieldType, Schema};

pub const GANTT_TASK: &str = "GanttTask";
pub const GANTT_SECTION: &str = "GanttSection";
pub const GANTT_CHART: &str = "GanttChart";

/// The Gantt chart schema family, root last.
pub fn schemas() -> Vec<Schema> {
    vec![task(), section(), chart()]
}

fn task() -> Schema {
    Schema::new(GANTT_TASK)
        .with_field(Field::new("name", FieldType::String))
        .with_field(
            Field::new("status", FieldType::String)
                .optional()
                .with_description(
                    "Status of the task, e.g., 'done', 'active', 'crit', 'milestone'",
                ),
        )
        .with_field(
            Field::new("id", FieldType::String)
                .optional()
                .with_description("ID of the task"),
        )
        .with_field(
            Field::new("start_date", FieldType::String)
                .optional()
                .with_description("Start date of the task in the format specified by date_format"),
        )
        .with_field(
            Field::new("end_date", FieldType::String)
                .optional()
                .with_description("End date of the task in the format specified by date_format"),
        )
        .with_field(
            Field::new("duration", FieldType::String)
                .optional()
                .with_description("Duration of the task"),
        )
        .with_field(
            Field::new("dependencies", FieldType::String)
                .optional()
                .with_description("Dependencies on other tasks using the 'after' keyword"),
        )
}

fn section() -> Schema {
    Schema::new(GANTT_SECTION)
        .with_field(Field::new("name", FieldType::String))
        .with_field(Field::new("tasks", FieldType::list_of(GANTT_TASK)))
}

fn chart() -> Schema {
    Schema::new(GANTT_CHART)
        .with_field(
            Field::new("date_format", FieldType::String)
                .with_description("Format of the dates used in the Gantt chart"),
        )
        .with_field(
            Field::new("title", FieldType::String)
                .optional()
                .with_description("Title of the Gantt chart"),
        )
        .with_field(
            Field::new("excludes", FieldType::String)
                .optional()
                .with_description("Dates or days to be excluded, e.g., 'weekends', specific dates"),
        )
        .with_field(Field::new("sections", FieldType::list_of(GANTT_SECTION)))
        .with_field(
            Field::new("tick_interval", FieldType::String)
                .optional()
                .with_description("Interval for axis ticks"),
        )
        .with_field(
            Field::new("weekday", FieldType::String)
                .optional()
                .with_description("Start day of the week for tick_interval"),
        )
        .with_field(
            Field::new("axis_format", FieldType::String)
                .optional()
                .with_description("Format of the dates on the axis"),
        )
}
