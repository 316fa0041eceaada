// crates/interactive_editor/src/lib.rs

use std::io::{BufRead, Write};

use load_config_schema::Schema;
use repo_config_error::{ConfigError, Result};
use stored_values::SchemaSink;

/// What the editor hands back when the user continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOutcome {
    /// The schema with every edit made during the session, saved or not.
    pub schema: Schema,
    /// How many times the user saved.
    pub saves: usize,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Save,
    Continue,
    Edit(usize),
    Invalid,
}

fn parse_command(line: &str, item_count: usize) -> Command {
    match line.to_lowercase().as_str() {
        "s" => Command::Save,
        "c" => Command::Continue,
        other => match other.parse::<usize>() {
            Ok(index) if (1..=item_count).contains(&index) => Command::Edit(index - 1),
            _ => Command::Invalid,
        },
    }
}

/// Renders the `Index / Description / Default Value` table, rows in key order.
pub fn render_table(schema: &Schema) -> String {
    let mut rows: Vec<[String; 3]> = vec![
        ["Index".into(), "Description".into(), "Default Value".into()],
        ["-----".into(), "-----------".into(), "-------------".into()],
    ];
    for (i, (_, item)) in schema.iter().enumerate() {
        rows.push([(i + 1).to_string(), item.description.clone(), item.default.clone()]);
    }

    let width = |col: usize| rows.iter().map(|row| row[col].chars().count()).max().unwrap_or(0);
    let (index_width, description_width) = (width(0), width(1));

    let mut table = String::new();
    for [index, description, default] in &rows {
        table.push_str(&format!(
            "{:<iw$}  {:<dw$}  {}\n",
            index,
            description,
            default,
            iw = index_width,
            dw = description_width
        ));
    }
    table
}

/// Runs the update loop until the user continues with `c`.
///
/// The editor owns `schema` for the session and returns it afterwards. Edits
/// reach `sink` only when the user presses `s`; continuing does not save.
pub fn run_editor<R, W, S>(
    mut schema: Schema,
    sink: &S,
    input: &mut R,
    output: &mut W,
) -> Result<EditorOutcome>
where
    R: BufRead,
    W: Write,
    S: SchemaSink + ?Sized,
{
    // Keys do not change during the session, so indices stay stable.
    let keys: Vec<String> = schema.keys().map(str::to_string).collect();
    let item_count = keys.len();
    let mut saves = 0;

    loop {
        write!(
            output,
            "{}\nEnter a number [1..{}] to update. Press 's' to save, or 'c' to continue: ",
            render_table(&schema),
            item_count
        )
        .and_then(|_| output.flush())
        .map_err(prompt_error)?;

        let line = read_line(input)?;
        match parse_command(&line, item_count) {
            Command::Save => {
                sink.save(&schema)?;
                saves += 1;
                writeln!(output, "Configuration saved.").map_err(prompt_error)?;
            }
            Command::Continue => return Ok(EditorOutcome { schema, saves }),
            Command::Edit(index) => {
                write!(output, "Enter new default value (leave empty to keep current value): ")
                    .and_then(|_| output.flush())
                    .map_err(prompt_error)?;
                let value = read_line(input)?;
                let Some(item) = schema.get_mut(&keys[index]) else {
                    continue;
                };
                if value.is_empty() {
                    writeln!(
                        output,
                        "Default value for '{}' remains '{}'",
                        item.description, item.default
                    )
                    .map_err(prompt_error)?;
                } else {
                    log::debug!("updated '{}'", keys[index]);
                    writeln!(
                        output,
                        "Default value for '{}' updated to '{}'",
                        item.description, value
                    )
                    .map_err(prompt_error)?;
                    item.default = value;
                }
            }
            Command::Invalid => {
                writeln!(
                    output,
                    "Invalid input. Please enter a number between 1 and {}, 's', or 'c'.",
                    item_count
                )
                .map_err(prompt_error)?;
            }
        }
    }
}

/// Reads one trimmed line; a closed input is an error rather than an empty line.
fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(ConfigError::input)?;
    if read == 0 {
        return Err(ConfigError::end_of_input());
    }
    Ok(line.trim().to_string())
}

fn prompt_error(e: std::io::Error) -> ConfigError {
    ConfigError::io("failed to write prompt", e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use load_config_schema::ConfigItem;
    use repo_config_error::ErrorKind;
    use std::cell::RefCell;
    use std::io::Cursor;

    /// Remembers every schema it was asked to save.
    #[derive(Default)]
    struct RecordingSink {
        saved: RefCell<Vec<Schema>>,
    }

    impl SchemaSink for RecordingSink {
        fn save(&self, schema: &Schema) -> Result<()> {
            self.saved.borrow_mut().push(schema.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl SchemaSink for FailingSink {
        fn save(&self, _schema: &Schema) -> Result<()> {
            Err(ConfigError::io(
                "failed to create JSON output file",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ))
        }
    }

    fn one_item_schema() -> Schema {
        let mut schema = Schema::new();
        schema.insert("key1", ConfigItem::new("Test key 1", "default1"));
        schema
    }

    fn run(schema: Schema, sink: &dyn SchemaSink, input: &str) -> (Result<EditorOutcome>, String) {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = run_editor(schema, sink, &mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_update_save_continue() {
        let sink = RecordingSink::default();
        let (result, output) = run(one_item_schema(), &sink, "1\nnewvalue\ns\nc\n");

        let outcome = result.unwrap();
        assert_eq!(outcome.schema.get("key1").unwrap().default, "newvalue");
        assert_eq!(outcome.saves, 1);
        let saved = sink.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].get("key1").unwrap().default, "newvalue");
        assert!(output.contains("Default value for 'Test key 1' updated to 'newvalue'"));
        assert!(output.contains("Configuration saved."));
    }

    #[test]
    fn test_continue_without_save_does_not_persist() {
        let sink = RecordingSink::default();
        let (result, _) = run(one_item_schema(), &sink, "1\nedited\nc\n");

        let outcome = result.unwrap();
        assert_eq!(outcome.saves, 0);
        assert_eq!(outcome.schema.get("key1").unwrap().default, "edited");
        assert!(sink.saved.borrow().is_empty());
    }

    #[test]
    fn test_empty_replacement_keeps_value() {
        let sink = RecordingSink::default();
        let (result, output) = run(one_item_schema(), &sink, "1\n\nc\n");

        assert_eq!(result.unwrap().schema.get("key1").unwrap().default, "default1");
        assert!(output.contains("Default value for 'Test key 1' remains 'default1'"));
    }

    #[test]
    fn test_invalid_input_reloops_without_change() {
        let sink = RecordingSink::default();
        let (result, output) = run(one_item_schema(), &sink, "0\n2\nx\n-1\n\nC\n");

        let outcome = result.unwrap();
        assert_eq!(outcome.schema, one_item_schema());
        assert_eq!(output.matches("Invalid input.").count(), 5);
        // Table shown once per prompt.
        assert_eq!(output.matches("Index").count(), 6);
    }

    #[test]
    fn test_uppercase_save_is_accepted() {
        let sink = RecordingSink::default();
        let (result, _) = run(one_item_schema(), &sink, "S\nc\n");
        assert_eq!(result.unwrap().saves, 1);
    }

    #[test]
    fn test_last_line_without_newline() {
        let sink = RecordingSink::default();
        let (result, _) = run(one_item_schema(), &sink, "c");
        assert!(result.is_ok());
    }

    #[test]
    fn test_end_of_input_is_input_error() {
        let sink = RecordingSink::default();
        let (result, _) = run(one_item_schema(), &sink, "1\nnewvalue\n");
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Input);

        let (result, _) = run(one_item_schema(), &sink, "1\n");
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Input);
    }

    #[test]
    fn test_save_failure_propagates() {
        let (result, _) = run(one_item_schema(), &FailingSink, "s\nc\n");
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Io);
    }

    #[test]
    fn test_indices_follow_key_order() {
        let mut schema = Schema::new();
        schema.insert("zeta", ConfigItem::new("Zeta", "z"));
        schema.insert("alpha", ConfigItem::new("Alpha", "a"));
        let sink = RecordingSink::default();

        let (result, _) = run(schema, &sink, "2\nchanged\nc\n");
        let outcome = result.unwrap();
        assert_eq!(outcome.schema.get("zeta").unwrap().default, "changed");
        assert_eq!(outcome.schema.get("alpha").unwrap().default, "a");
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let mut schema = Schema::new();
        schema.insert("a", ConfigItem::new("Short", "1"));
        schema.insert("b", ConfigItem::new("A longer description", ""));

        let table = render_table(&schema);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Index  Description           Default Value");
        assert_eq!(lines[1], "-----  -----------           -------------");
        assert_eq!(lines[2], "1      Short                 1");
        assert_eq!(lines[3], "2      A longer description  ");
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("s", 3), Command::Save);
        assert_eq!(parse_command("c", 3), Command::Continue);
        assert_eq!(parse_command("3", 3), Command::Edit(2));
        assert_eq!(parse_command("4", 3), Command::Invalid);
        assert_eq!(parse_command("1", 0), Command::Invalid);
        assert_eq!(parse_command("save", 3), Command::Invalid);
    }
}
