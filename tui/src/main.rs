//! GATEKEEP admin dashboard shell: interactive Ratatui TUI
//!
//! Layout:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  GATEKEEP Admin   Overview  Notifications  User Management  ...     │
//!   ├─── left panel ──────────┬─── right panel ───────────────────────────┤
//!   │  Backend identities     │  Selected tab (rows + gated actions)      │
//!   ├─────────────────────────┴───────────────────────────────────────────┤
//!   │  Session status                                                     │
//!   ├─────────────────────────────────────────────────────────────────────┤
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘
//!
//! The shell owns one live `Session` over one `SnapshotStore`. Every frame
//! checks the store revision and rebuilds the dashboard only when the grants
//! changed, so the screen is always a function of the current snapshot.

use std::{io, sync::Arc, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};

use gatekeep_contracts::{
    error::GatekeepResult,
    session::{SessionEvent, SessionId},
};
use gatekeep_core::{
    capability::Capability,
    session::{Session, SessionOutcome},
    store::SnapshotStore,
};
use gatekeep_ingest::IdentityValidator;
use gatekeep_policy::TomlGateCatalog;
use gatekeep_ref_admin::{
    build_dashboard, default_catalog,
    mock_data::IDENTITIES,
    screens::{tabs::AdminTab, ScreenAction},
    source::MockIdentitySource,
    DashboardView,
};

// ── App state ─────────────────────────────────────────────────────────────────

struct App {
    catalog: TomlGateCatalog,
    store: Arc<SnapshotStore>,
    source: Arc<MockIdentitySource>,
    session: Session,

    // Cursor into IDENTITIES.
    cursor: usize,
    tab: AdminTab,

    // Dashboard as of `rendered_revision`.
    view: DashboardView,
    rendered_revision: u64,

    // Most recent session event result.
    status: String,
    status_is_error: bool,
}

impl App {
    fn new() -> GatekeepResult<Self> {
        let catalog = default_catalog()?;
        let store = Arc::new(SnapshotStore::new());
        let source = Arc::new(MockIdentitySource::new(IDENTITIES[0]));
        let session = Session::new(
            Box::new(Arc::clone(&source)),
            Box::new(IdentityValidator::new()?),
            Arc::clone(&store),
        );
        let view = build_dashboard(&store.get_snapshot(), &catalog);
        let rendered_revision = store.revision();

        Ok(Self {
            catalog,
            store,
            source,
            session,
            cursor: 0,
            tab: AdminTab::Overview,
            view,
            rendered_revision,
            status: "Signed out. Pick an identity and press Enter.".to_string(),
            status_is_error: false,
        })
    }

    fn selected_identity(&self) -> &'static str {
        IDENTITIES[self.cursor]
    }

    /// Rebuild the dashboard if the store changed since the last render.
    fn refresh(&mut self) {
        let revision = self.store.revision();
        if revision == self.rendered_revision {
            return;
        }
        self.view = build_dashboard(&self.store.get_snapshot(), &self.catalog);
        self.rendered_revision = revision;
        if !self.view.has_tab(self.tab) {
            self.tab = self.view.tabs.first().copied().unwrap_or(AdminTab::Overview);
        }
    }

    /// End any active session and sign the selected identity in.
    fn sign_in(&mut self) {
        if self.session.active().is_some() {
            self.apply(SessionEvent::LoggedOut, "Sign out");
        }
        let identity = self.selected_identity();
        self.source.switch_to(identity);
        self.apply(
            SessionEvent::LoggedIn {
                session_id: SessionId::new(),
            },
            &format!("Sign in as {}", identity),
        );
    }

    /// Move the backend to the selected identity's grants and notify the
    /// active session, as an administrator editing this user's roles would.
    fn change_grants(&mut self) {
        let Some(session_id) = self.session.active() else {
            self.set_status("No active session to refresh.".to_string(), true);
            return;
        };
        let identity = self.selected_identity();
        self.source.switch_to(identity);
        self.apply(
            SessionEvent::PermissionsChanged { session_id },
            &format!("Grants changed to {}", identity),
        );
    }

    fn apply(&mut self, event: SessionEvent, what: &str) {
        match self.session.apply(event) {
            Ok(SessionOutcome::Loaded {
                revision,
                permissions,
                roles,
            }) => self.set_status(
                format!(
                    "{}: {} permission(s), {} role(s) loaded (revision {})",
                    what, permissions, roles, revision
                ),
                false,
            ),
            Ok(SessionOutcome::Cleared { revision }) => {
                self.set_status(format!("{}: grants cleared (revision {})", what, revision), false)
            }
            Ok(SessionOutcome::Ignored) => {
                self.set_status(format!("{}: ignored, session not active", what), false)
            }
            Ok(SessionOutcome::Superseded) => {
                self.set_status(format!("{}: superseded by a newer event", what), false)
            }
            Err(e) => self.set_status(format!("{} failed: {}. Grants cleared.", what, e), true),
        }
    }

    fn set_status(&mut self, message: String, is_error: bool) {
        let now = chrono::Local::now().format("%H:%M:%S");
        self.status = format!("[{}] {}", now, message);
        self.status_is_error = is_error;
    }

    fn next_tab(&mut self, forward: bool) {
        let tabs = &self.view.tabs;
        if tabs.is_empty() {
            return;
        }
        let current = tabs.iter().position(|t| *t == self.tab).unwrap_or(0);
        let next = if forward {
            (current + 1) % tabs.len()
        } else {
            (current + tabs.len() - 1) % tabs.len()
        };
        self.tab = tabs[next];
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn ui(f: &mut Frame, app: &App) {
    let full = f.area();

    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(10),   // identities + tab body
            Constraint::Length(4), // session status
            Constraint::Length(3), // footer
        ])
        .split(full);

    render_header(f, outer_chunks[0], app);

    let mid_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(40)])
        .split(outer_chunks[1]);

    render_identities(f, mid_chunks[0], app);
    render_tab(f, mid_chunks[1], app);
    render_status(f, outer_chunks[2], app);
    render_footer(f, outer_chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut spans: Vec<Span> = vec![Span::styled("GATEKEEP Admin    ", title_style)];

    if app.view.tabs.is_empty() {
        spans.push(Span::styled("(no tabs: signed out)", Style::default().fg(Color::DarkGray)));
    }

    for tab in &app.view.tabs {
        let style = if *tab == app.tab {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", tab.label()), style));
        spans.push(Span::raw(" "));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(header, area);
}

fn render_identities(f: &mut Frame, area: Rect, app: &App) {
    let backend = app.source.identity();
    let signed_in = app.session.active().is_some();

    let items: Vec<ListItem> = IDENTITIES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let marker = if signed_in && *name == backend { "●" } else { " " };
            let style = if i == app.cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", marker), Style::default().fg(Color::Green)),
                Span::styled(name.to_string(), style),
            ]))
        })
        .collect();

    let block = Block::default()
        .title(" Backend identities ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(List::new(items).block(block), area);
}

fn render_tab(f: &mut Frame, area: Rect, app: &App) {
    let view = &app.view;
    let lines = if !view.authenticated {
        vec![
            Line::from(Span::styled(
                "Not signed in.",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Every gated region is hidden until grants are loaded.",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    } else {
        match app.tab {
            AdminTab::Overview => overview_lines(view),
            AdminTab::Notifications => notification_lines(view),
            AdminTab::Applications => application_lines(view),
            AdminTab::UserManagement => user_lines(view),
            AdminTab::RoleManagement => role_lines(view),
            AdminTab::SystemLogs => log_lines(view),
            AdminTab::HelpCenter => help_lines(view),
        }
    };

    let title = if view.authenticated {
        format!(" {} ", app.tab.label())
    } else {
        " Dashboard ".to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let body = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(body, area);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let color = if app.status_is_error { Color::Red } else { Color::Green };
    let lines = vec![
        Line::from(Span::styled(app.status.clone(), Style::default().fg(color))),
        Line::from(Span::styled(
            format!(
                "store revision {}  loaded at {}",
                app.rendered_revision,
                app.view.loaded_at.as_deref().unwrap_or("-")
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let block = Block::default()
        .title(" Session ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan);
    let spans = vec![
        Span::styled(" [↑/↓] ", key),
        Span::raw("Identity  "),
        Span::styled("[Enter] ", key),
        Span::raw("Sign in  "),
        Span::styled("[g] ", key),
        Span::raw("Change grants  "),
        Span::styled("[f] ", key),
        Span::raw("Auth failure  "),
        Span::styled("[o] ", key),
        Span::raw("Sign out  "),
        Span::styled("[←/→] ", key),
        Span::raw("Tab  "),
        Span::styled("[q] ", key),
        Span::raw("Quit"),
    ];
    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}

// ── Tab bodies ────────────────────────────────────────────────────────────────

fn overview_lines(view: &DashboardView) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(banner) = view.banner {
        lines.push(Line::from(Span::styled(
            banner,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Roles:       ", Style::default().fg(Color::DarkGray)),
        Span::raw(join_or_none(&view.role_names)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Permissions: ", Style::default().fg(Color::DarkGray)),
        Span::raw(join_or_none(&view.permission_codes)),
    ]));
    lines.push(Line::from(""));

    for cap in Capability::ALL {
        let granted = view.capabilities.get(cap);
        let (mark, color) = if granted { ("✓", Color::Green) } else { ("✗", Color::Red) };
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", mark), Style::default().fg(color)),
            Span::raw(cap.name()),
        ]));
    }
    lines
}

fn notification_lines(view: &DashboardView) -> Vec<Line<'static>> {
    let Some(inbox) = &view.notifications else {
        return hidden();
    };
    let mut lines = vec![
        actions_line(&inbox.actions),
        Line::from(Span::styled(
            format!("{} unread", inbox.unread),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    for item in &inbox.items {
        let style = if item.read {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(format!("  {}", item.title), style)));
    }
    lines
}

fn application_lines(view: &DashboardView) -> Vec<Line<'static>> {
    let Some(apps) = &view.applications else {
        return hidden();
    };
    apps.rows
        .iter()
        .map(|row| {
            let a = &row.application;
            let mut spans = vec![Span::raw(format!(
                "{:<8} {:<20} {:>9} {:<13} {:<7} ",
                a.reference, truncate(a.applicant, 20), a.amount, a.status, a.risk_band
            ))];
            spans.extend(action_spans(&row.actions));
            Line::from(spans)
        })
        .collect()
}

fn user_lines(view: &DashboardView) -> Vec<Line<'static>> {
    let Some(users) = &view.users else {
        return hidden();
    };
    let mut lines = vec![actions_line(&users.toolbar), Line::from("")];
    for row in &users.rows {
        let u = &row.user;
        let state = if u.active { "active" } else { "inactive" };
        let mut spans = vec![Span::raw(format!(
            "{:<18} {:<26} {:<9} ",
            truncate(u.full_name, 18),
            truncate(u.email, 26),
            state
        ))];
        spans.extend(action_spans(&row.actions));
        lines.push(Line::from(spans));
    }
    lines
}

fn role_lines(view: &DashboardView) -> Vec<Line<'static>> {
    let Some(roles) = &view.roles else {
        return hidden();
    };
    let mut lines = vec![actions_line(&roles.toolbar), Line::from("")];
    for row in &roles.rows {
        let r = &row.role;
        let mut spans = vec![Span::raw(format!("{:<15} {:>3} members  ", r.name, r.member_count))];
        spans.extend(action_spans(&row.actions));
        lines.push(Line::from(spans));
        if roles.show_permission_codes {
            lines.push(Line::from(Span::styled(
                format!("    {}", r.permission_codes.join(", ")),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    lines
}

fn log_lines(view: &DashboardView) -> Vec<Line<'static>> {
    let Some(logs) = &view.logs else {
        return hidden();
    };
    let mut lines = vec![actions_line(&logs.toolbar), Line::from("")];
    for entry in &logs.entries {
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", entry.at), Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{:<12} {:<18} {}", entry.actor, entry.action, entry.target)),
        ]));
    }
    lines
}

fn help_lines(view: &DashboardView) -> Vec<Line<'static>> {
    let Some(actions) = &view.help else {
        return hidden();
    };
    vec![
        Line::from("Guides and FAQs for the admin dashboard."),
        Line::from(""),
        actions_line(actions),
    ]
}

// ── Utility helpers ───────────────────────────────────────────────────────────

fn hidden() -> Vec<Line<'static>> {
    vec![Line::from(Span::styled("(hidden)", Style::default().fg(Color::DarkGray)))]
}

/// Gated controls as bracketed buttons.
fn action_spans(actions: &[ScreenAction]) -> Vec<Span<'static>> {
    if actions.is_empty() {
        return vec![Span::styled("(no actions)", Style::default().fg(Color::DarkGray))];
    }
    actions
        .iter()
        .map(|a| Span::styled(format!("[{}] ", a.label), Style::default().fg(Color::Cyan)))
        .collect()
}

fn actions_line(actions: &[ScreenAction]) -> Line<'static> {
    Line::from(action_spans(actions))
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

/// Truncate a string to at most `max` chars, appending "…" if truncated.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    let mut app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("TUI error: {}", e);
            std::process::exit(1);
        }
    };

    // Restore the terminal before the panic message is printed.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    loop {
        app.refresh();
        terminal.draw(|f| ui(f, &app))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,

                KeyCode::Up | KeyCode::Char('k') => {
                    app.cursor = app.cursor.checked_sub(1).unwrap_or(IDENTITIES.len() - 1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    app.cursor = (app.cursor + 1) % IDENTITIES.len();
                }

                KeyCode::Enter => app.sign_in(),
                KeyCode::Char('g') => app.change_grants(),
                KeyCode::Char('o') => app.apply(SessionEvent::LoggedOut, "Sign out"),
                KeyCode::Char('f') => app.apply(
                    SessionEvent::AuthenticationFailed {
                        reason: "token rejected".to_string(),
                    },
                    "Authentication failure",
                ),

                KeyCode::Left | KeyCode::Char('h') => app.next_tab(false),
                KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => app.next_tab(true),

                _ => {}
            }
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
