use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use kifields_config::{
    PREFERENCES_FILE, Preferences,
    order_file::{DEFAULT_EXPORT_FILENAME, FieldOrder},
    preferences_path,
};
use kifields_engine::{Direction, FieldList};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{env, io::stdout, path::PathBuf, process};

/// What the single-line prompt at the bottom is collecting.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PromptKind {
    AddField,
    ExportPath,
    ImportPath,
}

#[derive(Debug)]
enum Mode {
    Browse,
    Prompt { kind: PromptKind, buffer: String },
}

struct App {
    preferences: Preferences,
    fields: FieldList,
    list_state: ListState,
    mode: Mode,
    status: Option<String>,
    dirty: bool,
}

impl App {
    fn new(preferences: Preferences) -> Self {
        let fields = FieldList::parse(preferences.field_names());

        let mut app = Self {
            preferences,
            fields,
            list_state: ListState::default(),
            mode: Mode::Browse,
            status: None,
            dirty: false,
        };

        // Select first entry if available
        if !app.fields.is_empty() {
            app.list_state.select(Some(0));
        }
        app
    }

    fn next_entry(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.fields.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous_entry(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.fields.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn move_selected(&mut self, direction: Direction) {
        let Some(i) = self.list_state.selected() else {
            return;
        };
        if self.fields.move_field(i, direction) {
            let new_index = match direction {
                Direction::Up => i - 1,
                Direction::Down => i + 1,
            };
            self.list_state.select(Some(new_index));
            self.dirty = true;
        }
    }

    fn delete_selected(&mut self) {
        let Some(i) = self.list_state.selected() else {
            return;
        };
        let name = self.fields.get(i).map(|f| f.name.clone());
        if self.fields.remove(i) {
            self.dirty = true;
            if self.fields.is_empty() {
                self.list_state.select(None);
            } else {
                self.list_state.select(Some(i.min(self.fields.len() - 1)));
            }
            if let Some(name) = name {
                self.status = Some(format!("Removed {name}"));
            }
        }
    }

    fn add_field(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            self.status = Some("Field name is empty, nothing added".to_string());
        } else if self.fields.add(name) {
            self.list_state.select(Some(self.fields.len() - 1));
            self.dirty = true;
            self.status = Some(format!("Added {name}"));
        } else {
            self.status = Some(format!("A field named {name} already exists"));
        }
    }

    fn export_order(&mut self, path: &str) {
        let path = path.trim();
        if path.is_empty() {
            self.status = Some("Export path is empty".to_string());
            return;
        }
        match FieldOrder::new(self.fields.names()).save(path) {
            Ok(()) => self.status = Some(format!("Exported {} names to {path}", self.fields.len())),
            Err(e) => self.status = Some(format!("Export failed: {e}")),
        }
    }

    fn import_order(&mut self, path: &str) {
        let path = path.trim();
        if path.is_empty() {
            self.status = Some("Import path is empty".to_string());
            return;
        }
        match FieldOrder::load(path) {
            Ok(order) => {
                self.fields.reorder_by_names(&order.fields);
                self.list_state
                    .select((!self.fields.is_empty()).then_some(0));
                self.dirty = true;
                self.status = Some(format!("Imported {} names from {path}", order.fields.len()));
            }
            Err(e) => self.status = Some(format!("Import failed: {e}")),
        }
    }

    fn save(&mut self) {
        self.preferences.set_field_names(&self.fields.to_sexpr());
        match self.preferences.save() {
            Ok(Some(backup)) => {
                self.dirty = false;
                self.status = Some(format!(
                    "Saved, backup at {}. Restart KiCad to apply.",
                    backup.display()
                ));
            }
            Ok(None) => {
                self.dirty = false;
                self.status = Some("Saved (no backup made). Restart KiCad to apply.".to_string());
            }
            Err(e) => self.status = Some(format!("Failed to write preferences: {e}")),
        }
    }

    /// Suggested path for the export/import prompts: the order file next
    /// to eeschema.json.
    fn default_order_path(&self) -> String {
        self.preferences
            .path()
            .parent()
            .map(|dir| dir.join(DEFAULT_EXPORT_FILENAME))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILENAME))
            .display()
            .to_string()
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        let buffer = match kind {
            PromptKind::AddField => String::new(),
            PromptKind::ExportPath | PromptKind::ImportPath => self.default_order_path(),
        };
        self.mode = Mode::Prompt { kind, buffer };
        self.status = None;
    }

    fn confirm_prompt(&mut self) {
        let Mode::Prompt { kind, buffer } = std::mem::replace(&mut self.mode, Mode::Browse) else {
            return;
        };
        match kind {
            PromptKind::AddField => self.add_field(&buffer),
            PromptKind::ExportPath => self.export_order(&buffer),
            PromptKind::ImportPath => self.import_order(&buffer),
        }
    }

    fn prompt_input(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc => self.mode = Mode::Browse,
            KeyCode::Enter => self.confirm_prompt(),
            KeyCode::Backspace => {
                if let Mode::Prompt { buffer, .. } = &mut self.mode {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                if let Mode::Prompt { buffer, .. } = &mut self.mode {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let prefs_path = if args.len() == 2 {
        PathBuf::from(&args[1])
    } else if args.len() == 1 {
        match preferences_path() {
            Some(path) => path,
            None => {
                eprintln!("Error: no {PREFERENCES_FILE} found in the usual places");
                eprintln!("Usage: {} [path-to-eeschema.json]", args[0]);
                eprintln!("Set KICAD_CONFIG_HOME or pass the path explicitly.");
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [path-to-eeschema.json]", args[0]);
        process::exit(1);
    };

    let preferences = match Preferences::load(&prefs_path) {
        Ok(preferences) => preferences,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(preferences);

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if matches!(app.mode, Mode::Prompt { .. }) {
            app.prompt_input(key.code, key.modifiers);
        } else {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Up if key.modifiers.contains(KeyModifiers::SHIFT) => {
                    app.move_selected(Direction::Up);
                }
                KeyCode::Down if key.modifiers.contains(KeyModifiers::SHIFT) => {
                    app.move_selected(Direction::Down);
                }
                KeyCode::Char('K') => app.move_selected(Direction::Up),
                KeyCode::Char('J') => app.move_selected(Direction::Down),
                KeyCode::Up | KeyCode::Char('k') => app.previous_entry(),
                KeyCode::Down | KeyCode::Char('j') => app.next_entry(),
                KeyCode::Char('a') => app.open_prompt(PromptKind::AddField),
                KeyCode::Char('x') | KeyCode::Delete => app.delete_selected(),
                KeyCode::Char('e') => app.open_prompt(PromptKind::ExportPath),
                KeyCode::Char('i') => app.open_prompt(PromptKind::ImportPath),
                KeyCode::Char('s') => app.save(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(f.area());

    // Header: which file is being edited, and whether it has unsaved edits
    let modified = if app.dirty { "  [modified]" } else { "" };
    let header = Paragraph::new(vec![
        Line::from(format!(
            "Default fields: {}{modified}",
            app.preferences.path().display()
        )),
        Line::from(Span::styled(
            "Changes take effect after KiCad restarts.",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    f.render_widget(header, chunks[0]);

    // Field list panel
    let items: Vec<ListItem> = app
        .fields
        .fields()
        .iter()
        .map(|field| {
            let mut spans = vec![Span::raw(field.name.clone())];
            let flags = field.trimmed_flags();
            if !flags.is_empty() {
                spans.push(Span::styled(
                    format!("  {flags}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Fields"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(list, chunks[1], &mut app.list_state);

    // Status / prompt line
    let status_line = match &app.mode {
        Mode::Prompt { kind, buffer } => {
            let label = match kind {
                PromptKind::AddField => "New field name",
                PromptKind::ExportPath => "Export to",
                PromptKind::ImportPath => "Import from",
            };
            Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(Color::Cyan)),
                Span::raw(buffer.clone()),
                Span::styled("▏", Style::default().fg(Color::Cyan)),
            ])
        }
        Mode::Browse => Line::from(app.status.clone().unwrap_or_default()),
    };
    f.render_widget(Paragraph::new(status_line), chunks[2]);

    // Key help
    let help = match &app.mode {
        Mode::Prompt { .. } => "Enter: Confirm | Esc: Cancel",
        Mode::Browse => {
            "q: Quit | ↑/k ↓/j: Select | Shift+↑/↓: Move | a: Add | x: Delete | \
             e: Export | i: Import | s: Save"
        }
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        ))),
        chunks[3],
    );
}
