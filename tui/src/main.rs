//! CARESLOT Reference Clinic: interactive Ratatui TUI
//!
//! Layout:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  [1] Admin  [2] Front Office  [3] Back Office  [4] Dr.  [5] Patient │
//!   ├─── left panel ──────────────────┬─── right panel ───────────────────┤
//!   │  Appointments (role-filtered)   │  Open slots for provider + date   │
//!   ├─────────────────────────────────┴───────────────────────────────────┤
//!   │  Dialog / notice               │  Activity trail                    │
//!   ├─────────────────────────────────────────────────────────────────────┤
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘

use std::{io, time::Duration};

use chrono::{Local, NaiveDate, Utc};
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

use careslot_audit::TrailEntry;
use careslot_contracts::{
    activity::ActionKind,
    appointment::{Appointment, BookingRequest, PatientId, ReminderChannel},
    catalog::{AppointmentTypeId, LocationId, ProviderId},
    error::CareResult,
    notice::Notice,
    role::Role,
    session::User,
};
use careslot_core::{
    calendar::long_date,
    visibility::{self, Feature},
    AppointmentDialogs,
};
use careslot_policy::TomlAccessPolicy;
use careslot_ref_clinic::{
    mock_data, session::FileSessionStore, store::InMemoryAppointmentStore, ClinicConfig,
    ReferenceClinic, CLINIC_POLICY,
};

/// Walk-in patient used when staff book from the TUI.
const WALK_IN_PATIENT: (&str, &str) = ("p1", "John Doe");

// ── App state ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Appointments,
    Slots,
}

struct App {
    clinic: ReferenceClinic,
    users: Vec<User>,
    dialogs: AppointmentDialogs,
    today: NaiveDate,

    focus: Focus,
    /// Appointments the logged-in user may see, refreshed after every action.
    appointments: Vec<Appointment>,
    appointment_cursor: usize,

    provider: ProviderId,
    date: NaiveDate,
    slots: Vec<String>,
    slot_cursor: usize,
    date_disabled: bool,

    /// Last outcome shown to the user.
    notice: Option<Notice>,
}

impl App {
    fn new(clinic: ReferenceClinic, today: NaiveDate) -> CareResult<Self> {
        let provider = ProviderId::new("1");
        let date = clinic.next_available_date(&provider, today, today).unwrap_or(today);
        let mut app = Self {
            clinic,
            users: mock_data::users(),
            dialogs: AppointmentDialogs::new(),
            today,
            focus: Focus::Appointments,
            appointments: Vec::new(),
            appointment_cursor: 0,
            provider,
            date,
            slots: Vec::new(),
            slot_cursor: 0,
            date_disabled: false,
            notice: None,
        };
        if let Some(provider) = app.clinic.default_provider() {
            app.date = app.clinic.next_available_date(&provider, today, today).unwrap_or(today);
            app.provider = provider;
        }
        app.refresh();
        Ok(app)
    }

    /// A clinic whose session survives restarts in the configured file.
    fn persistent_clinic(config: ClinicConfig) -> CareResult<ReferenceClinic> {
        let policy = TomlAccessPolicy::from_toml_str(CLINIC_POLICY)?;
        let sessions =
            FileSessionStore::new(&config.session.directory, &config.session.storage_key);
        let mut clinic = ReferenceClinic::new(
            config,
            Box::new(policy),
            InMemoryAppointmentStore::seeded(),
            Box::new(sessions),
        )?;
        clinic.sessions.restore()?;
        Ok(clinic)
    }

    fn role(&self) -> Option<Role> {
        self.clinic.sessions.role()
    }

    /// Re-read appointments and slots after any change.
    fn refresh(&mut self) {
        self.appointments = self.clinic.visible_appointments().unwrap_or_default();
        self.appointment_cursor =
            self.appointment_cursor.min(self.appointments.len().saturating_sub(1));

        self.date_disabled =
            self.clinic.desk.is_date_disabled(self.date, Some(&self.provider), self.today);
        self.slots = if self.date_disabled {
            Vec::new()
        } else {
            self.clinic
                .desk
                .available_time_slots(Some(self.date), Some(&self.provider))
                .unwrap_or_default()
        };
        self.slot_cursor = self.slot_cursor.min(self.slots.len().saturating_sub(1));
    }

    fn show(&mut self, result: CareResult<Notice>) {
        self.notice = Some(match result {
            Ok(notice) => notice,
            Err(e) => e.notice(),
        });
        self.refresh();
    }

    // ── Session ───────────────────────────────────────────────────────────────

    fn switch_user(&mut self, index: usize) {
        let Some(email) = self.users.get(index).map(|u| u.email.clone()) else {
            return;
        };
        let result = self.switch_user_inner(&email);
        self.show(result);
    }

    fn switch_user_inner(&mut self, email: &str) -> CareResult<Notice> {
        if self.clinic.sessions.current().is_some() {
            self.clinic.sessions.logout()?;
        }
        self.dialogs = AppointmentDialogs::new();
        let landing = self.clinic.sessions.login(email, "demo", Utc::now())?;
        if let Some(provider) = self.clinic.default_provider() {
            self.provider = provider;
            self.date = self
                .clinic
                .next_available_date(&self.provider, self.today, self.today)
                .unwrap_or(self.today);
        }
        let name = self.clinic.sessions.user().map(|u| u.name.clone()).unwrap_or_default();
        Ok(Notice::info("Signed In", format!("{} landed on {}", name, landing)))
    }

    fn logout(&mut self) {
        let result = self
            .clinic
            .sessions
            .logout()
            .map(|to| Notice::info("Signed Out", format!("Returned to {}", to)));
        self.dialogs = AppointmentDialogs::new();
        self.show(result);
    }

    // ── Browsing ──────────────────────────────────────────────────────────────

    fn move_cursor(&mut self, down: bool) {
        let (cursor, len) = match self.focus {
            Focus::Appointments => (&mut self.appointment_cursor, self.appointments.len()),
            Focus::Slots => (&mut self.slot_cursor, self.slots.len()),
        };
        if len == 0 {
            return;
        }
        *cursor = if down { (*cursor + 1) % len } else { (*cursor + len - 1) % len };
    }

    fn shift_date(&mut self, days: i64) {
        self.date += chrono::Duration::days(days);
        if self.date < self.today {
            self.date = self.today;
        }
        self.slot_cursor = 0;
        self.refresh();
    }

    fn next_provider(&mut self) {
        // Clinicians stay on their own schedule; a reschedule stays with its provider.
        if self.role() == Some(Role::ClinicalStaff) || self.dialogs.reschedule.is_open() {
            return;
        }
        let providers = &self.clinic.desk.catalog().providers;
        let current = providers.iter().position(|p| p.id == self.provider).unwrap_or(0);
        if let Some(next) = providers.get((current + 1) % providers.len().max(1)) {
            self.provider = next.id.clone();
        }
        self.slot_cursor = 0;
        self.refresh();
    }

    // ── Dialogs ───────────────────────────────────────────────────────────────

    fn open_booking(&mut self) {
        if self.role().is_none() {
            self.notice =
                Some(Notice::destructive("Sign In Required", "Choose a user with [1-5] first."));
            return;
        }
        let provider = self.provider.clone();
        if let Err(e) = self.clinic.desk.open_booking(&mut self.dialogs.booking, Some(&provider)) {
            self.notice = Some(e.notice());
        }
    }

    fn open_cancel(&mut self) {
        let Some(id) = self.appointments.get(self.appointment_cursor).map(|a| a.id.clone()) else {
            return;
        };
        if let Err(e) = self.clinic.desk.request_cancel(&mut self.dialogs.cancel, &id) {
            self.show(Err(e));
        }
    }

    fn open_reschedule(&mut self) {
        let Some(appointment) = self.appointments.get(self.appointment_cursor).cloned() else {
            return;
        };
        let opened =
            self.clinic.desk.request_reschedule(&mut self.dialogs.reschedule, &appointment.id);
        if let Err(e) = opened {
            self.show(Err(e));
            return;
        }
        // New slots come from the appointment's own provider.
        let from = appointment.date.max(self.today);
        self.date = self
            .clinic
            .next_available_date(&appointment.provider_id, from, self.today)
            .unwrap_or(from);
        self.provider = appointment.provider_id;
        self.slot_cursor = 0;
        self.refresh();
    }

    fn open_calendar(&mut self) {
        let allowed = self
            .role()
            .is_some_and(|r| visibility::has_feature(r, Feature::CalendarIntegration));
        if !allowed {
            return;
        }
        if let Err(e) = self.dialogs.calendar.open("calendar") {
            self.notice = Some(e.notice());
        }
    }

    fn booking_request(&self) -> BookingRequest {
        let (patient_id, patient_name) = match self.clinic.sessions.user() {
            Some(user) if user.role == Role::Patient => (user.id.0.clone(), user.name.clone()),
            _ => (WALK_IN_PATIENT.0.to_string(), WALK_IN_PATIENT.1.to_string()),
        };
        let catalog = self.clinic.desk.catalog();
        let location_id = catalog
            .provider(&self.provider)
            .and_then(|p| p.location.as_deref())
            .and_then(|name| catalog.locations.iter().find(|l| l.name == name))
            .map(|l| l.id.clone())
            .unwrap_or_else(|| LocationId::new("1"));

        BookingRequest {
            date: Some(self.date),
            provider_id: Some(self.provider.clone()),
            location_id: Some(location_id),
            type_id: Some(AppointmentTypeId::new("2")),
            time_slot: self.slots.get(self.slot_cursor).cloned(),
            patient_id: PatientId::new(patient_id),
            patient_name,
            reminder: ReminderChannel::Email,
            notes: None,
        }
    }

    /// Confirm whichever dialog is open.
    fn confirm(&mut self) {
        let actor = self.clinic.actor();
        let today = self.today;
        let result = if self.dialogs.booking.is_open() {
            let request = self.booking_request();
            self.clinic
                .desk
                .confirm_booking(&mut self.dialogs.booking, &request, &actor, today)
                .map(|c| c.notice)
        } else if self.dialogs.cancel.is_open() {
            self.clinic.desk.confirm_cancel(&mut self.dialogs.cancel, &actor).map(|c| c.notice)
        } else if self.dialogs.reschedule.is_open() {
            let slot = self.slots.get(self.slot_cursor).cloned();
            self.clinic
                .desk
                .confirm_reschedule(
                    &mut self.dialogs.reschedule,
                    Some(self.date),
                    slot.as_deref(),
                    &actor,
                    today,
                )
                .map(|c| c.notice)
        } else if self.dialogs.calendar.is_open() {
            self.clinic.desk.confirm_calendar(&mut self.dialogs.calendar, &actor)
        } else {
            return;
        };
        self.show(result);
    }

    fn dismiss(&mut self) {
        let dialogs = [
            &mut self.dialogs.booking,
            &mut self.dialogs.cancel,
            &mut self.dialogs.reschedule,
            &mut self.dialogs.calendar,
        ];
        for dialog in dialogs {
            if dialog.is_open() {
                if let Err(e) = dialog.dismiss() {
                    self.notice = Some(e.notice());
                }
                return;
            }
        }
    }
}

// ── UI rendering ──────────────────────────────────────────────────────────────

fn ui(f: &mut Frame, app: &App) {
    let full = f.area();

    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // header
            Constraint::Min(10),    // appointments + slots
            Constraint::Length(10), // dialog + trail
            Constraint::Length(3),  // footer
        ])
        .split(full);

    render_header(f, outer_chunks[0], app);

    let mid_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(outer_chunks[1]);
    render_appointments(f, mid_chunks[0], app);
    render_slots(f, mid_chunks[1], app);

    let low_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(outer_chunks[2]);
    render_dialog(f, low_chunks[0], app);
    render_trail(f, low_chunks[1], app);

    render_footer(f, outer_chunks[3], app);
}

fn panel(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut spans: Vec<Span> = vec![Span::styled("CARESLOT    ", title_style)];

    let current = app.clinic.sessions.user().map(|u| u.id.clone());
    for (i, user) in app.users.iter().enumerate() {
        let style = if current.as_ref() == Some(&user.id) {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}] {}  ", i + 1, user.role.label()), style));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(header, area);
}

fn render_appointments(f: &mut Frame, area: Rect, app: &App) {
    let mut items: Vec<ListItem> = Vec::new();

    match app.role() {
        None => items.push(ListItem::new(Span::styled(
            "  Signed out. Press [1-5] to sign in.",
            Style::default().fg(Color::DarkGray),
        ))),
        Some(_) if app.appointments.is_empty() => items.push(ListItem::new(Span::styled(
            "  No appointments.",
            Style::default().fg(Color::DarkGray),
        ))),
        Some(_) => {
            let catalog = app.clinic.desk.catalog();
            for (i, appointment) in app.appointments.iter().enumerate() {
                let view = catalog.describe(appointment);
                let marker = if i == app.appointment_cursor && app.focus == Focus::Appointments {
                    "▸ "
                } else {
                    "  "
                };
                let status_color = match view.status.as_str() {
                    "Confirmed" => Color::Green,
                    "Cancelled" => Color::Red,
                    _ => Color::Yellow,
                };
                items.push(ListItem::new(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(
                        format!("{} {} ", view.date, view.time),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::raw(format!("{}  ", truncate(&view.patient_name, 14))),
                    Span::raw(format!("{}  ", truncate(&view.provider_name, 18))),
                    Span::styled(view.status, Style::default().fg(status_color)),
                ])));
            }
        }
    }

    let title = match app.role() {
        Some(role) => format!(" Appointments ({}) ", visibility::calendar_heading(role).0),
        None => " Appointments ".to_string(),
    };
    let list = List::new(items).block(panel(&title, app.focus == Focus::Appointments));
    f.render_widget(list, area);
}

fn render_slots(f: &mut Frame, area: Rect, app: &App) {
    let catalog = app.clinic.desk.catalog();
    let mut items: Vec<ListItem> = vec![
        ListItem::new(Line::from(vec![
            Span::styled("  Provider: ", Style::default().fg(Color::Gray)),
            Span::raw(catalog.provider_name(&app.provider).to_string()),
        ])),
        ListItem::new(Line::from(vec![
            Span::styled("  Date:     ", Style::default().fg(Color::Gray)),
            Span::raw(long_date(app.date)),
        ])),
        ListItem::new(""),
    ];

    if app.date_disabled {
        items.push(ListItem::new(Span::styled(
            "  Provider unavailable on this date",
            Style::default().fg(Color::Red),
        )));
    } else if app.slots.is_empty() {
        let full = Span::styled("  Fully booked", Style::default().fg(Color::Yellow));
        items.push(ListItem::new(full));
    } else {
        for (i, slot) in app.slots.iter().enumerate() {
            let selected = i == app.slot_cursor && app.focus == Focus::Slots;
            let style = if selected {
                Style::default().fg(Color::Black).bg(Color::Green)
            } else {
                Style::default().fg(Color::Green)
            };
            items.push(ListItem::new(Span::styled(format!("  {}", slot), style)));
        }
    }

    let list = List::new(items).block(panel(" Open Slots ", app.focus == Focus::Slots));
    f.render_widget(list, area);
}

fn render_dialog(f: &mut Frame, area: Rect, app: &App) {
    let block = panel(" Dialog ", false);
    let mut lines: Vec<Line> = Vec::new();

    if let Some(dialog) = app.dialogs.active() {
        let prompt = match dialog.kind() {
            ActionKind::Book => format!(
                "Book {} with {} on {}?",
                app.slots.get(app.slot_cursor).map(String::as_str).unwrap_or("(no slot)"),
                app.clinic.desk.catalog().provider_name(&app.provider),
                long_date(app.date)
            ),
            ActionKind::Cancel => format!("Cancel appointment {}?", dialog.target().unwrap_or("")),
            ActionKind::Reschedule => format!(
                "Move appointment {} to {} at {}?",
                dialog.target().unwrap_or(""),
                long_date(app.date),
                app.slots.get(app.slot_cursor).map(String::as_str).unwrap_or("(no slot)")
            ),
            ActionKind::ConnectCalendar => "Connect your external calendar?".to_string(),
            _ => String::new(),
        };
        lines.push(Line::from(Span::styled(
            format!("  [{}]", dialog.state().name()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("  {}", prompt)));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  [y] confirm   [Esc] close",
            Style::default().fg(Color::Cyan),
        )));
    }

    if let Some(notice) = &app.notice {
        let color = if notice.is_destructive() { Color::Red } else { Color::Green };
        lines.push(Line::from(Span::styled(
            format!("  {}", notice.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("  {}", notice.description)));
    }

    if let Some(user) = app.clinic.sessions.user() {
        let with_forecast = visibility::has_feature(user.role, Feature::NoShowForecast);
        if with_forecast && app.dialogs.active().is_none() {
            let forecast = app.clinic.forecast(app.appointments.get(app.appointment_cursor));
            let settings = &app.clinic.config().forecast;
            lines.push(Line::from(Span::styled(
                format!(
                    "  No-show risk {}% ({}): {}",
                    forecast.risk_percent,
                    forecast.band(settings).label(),
                    forecast.recommendation(settings)
                ),
                Style::default().fg(Color::Gray),
            )));
        }
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Nothing to confirm.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn render_trail(f: &mut Frame, area: Rect, app: &App) {
    let trail = app.clinic.trail();
    let entries: Vec<TrailEntry> = trail.export().map(|e| e.entries).unwrap_or_default();
    let visible = usize::from(area.height.saturating_sub(3));

    let mut items: Vec<ListItem> = entries
        .iter()
        .rev()
        .take(visible)
        .map(|entry| {
            let color = match entry.record.action {
                ActionKind::AccessDenied => Color::Red,
                ActionKind::Login | ActionKind::Logout => Color::Gray,
                _ => Color::Green,
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("  #{} ", entry.sequence),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    entry.record.action.as_str(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {} ", truncate(&entry.record.subject, 14))),
                Span::styled(shorten_hash(&entry.this_hash), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let (label, color) = if trail.verify_integrity() {
        ("  Chain integrity: VERIFIED", Color::Green)
    } else {
        ("  Chain integrity: BROKEN", Color::Red)
    };
    items.push(ListItem::new(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));

    f.render_widget(List::new(items).block(panel(" Activity Trail ", false)), area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));
    let mut spans: Vec<Span> = vec![
        key(" [1-5] "),
        Span::raw("Sign in  "),
        key("[Tab] "),
        Span::raw("Focus  "),
        key("[←/→] "),
        Span::raw("Date  "),
    ];

    if let Some(role) = app.role() {
        if role != Role::ClinicalStaff {
            spans.push(key("[p] "));
            spans.push(Span::raw("Provider  "));
        }
        spans.push(key("[b] "));
        spans.push(Span::raw(format!("{}  ", visibility::booking_action_label(role))));
        spans.push(key("[x] "));
        spans.push(Span::raw("Cancel  "));
        spans.push(key("[s] "));
        spans.push(Span::raw("Reschedule  "));
        if visibility::has_feature(role, Feature::CalendarIntegration) {
            spans.push(key("[k] "));
            spans.push(Span::raw("Calendar  "));
        }
        spans.push(key("[l] "));
        spans.push(Span::raw("Sign out  "));
    }

    spans.push(key("[q] "));
    spans.push(Span::raw("Quit"));

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}

// ── Utility helpers ───────────────────────────────────────────────────────────

/// Truncate a string to at most `max` chars, appending "…" if truncated.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// "xxxx...xxxx" from a 64-hex-char hash.
fn shorten_hash(h: &str) -> String {
    if h.len() >= 8 {
        format!("{}...{}", &h[..4], &h[h.len() - 4..])
    } else {
        h.to_string()
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

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    let today = Local::now().date_naive();
    let config = ClinicConfig::embedded().map_err(io::Error::other)?;
    let clinic = App::persistent_clinic(config).map_err(io::Error::other)?;
    let mut app = App::new(clinic, today).map_err(io::Error::other)?;

    // Restore the terminal before printing a panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        let dialog_open = app.dialogs.active().is_some();

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') if !dialog_open => break,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,

            // Dialog keys.
            KeyCode::Char('y') | KeyCode::Enter if dialog_open => app.confirm(),
            KeyCode::Esc if dialog_open => app.dismiss(),

            // Sign in as one of the directory users.
            KeyCode::Char(c @ '1'..='9') if !dialog_open => {
                let index = c as usize - '1' as usize;
                app.switch_user(index);
            }
            KeyCode::Char('l') if !dialog_open => app.logout(),

            // Browsing.
            KeyCode::Tab => {
                app.focus = match app.focus {
                    Focus::Appointments => Focus::Slots,
                    Focus::Slots => Focus::Appointments,
                };
            }
            KeyCode::Up => app.move_cursor(false),
            KeyCode::Down => app.move_cursor(true),
            KeyCode::Left => app.shift_date(-1),
            KeyCode::Right => app.shift_date(1),
            KeyCode::Char('p') if !dialog_open => app.next_provider(),

            // Dialog triggers.
            KeyCode::Char('b') if !dialog_open => app.open_booking(),
            KeyCode::Char('x') if !dialog_open => app.open_cancel(),
            KeyCode::Char('s') if !dialog_open => app.open_reschedule(),
            KeyCode::Char('k') if !dialog_open => app.open_calendar(),

            _ => {}
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
