use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use oddstab::dataset::{OddsDataset, load_dataset, open_db};
use oddstab::h2h::h2h_tab;
use oddstab::league_tab::league_odds_tab;
use oddstab::selectors::{
    CountryFilter, MatchOption, country_options, league_options, match_options,
};
use oddstab::table::{CellStyle, ColumnId, Rgb, TabOutput};
use oddstab::team_tab::{Side, team_odds_tab};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Country,
    League,
    Match,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    League,
    Match,
}

struct App {
    data: OddsDataset,
    today: NaiveDate,
    country_filter: CountryFilter,
    countries: Vec<String>,
    country_ix: usize,
    leagues: Vec<String>,
    league_ix: usize,
    match_opts: Vec<MatchOption>,
    match_ix: usize,
    focus: Focus,
    view: View,
    league_out: Option<TabOutput>,
    match_out: Option<(TabOutput, TabOutput, TabOutput)>,
    log: Vec<String>,
    should_quit: bool,
}

impl App {
    fn new(data: OddsDataset, today: NaiveDate) -> Self {
        let mut app = Self {
            data,
            today,
            country_filter: CountryFilter::Top,
            countries: Vec::new(),
            country_ix: 0,
            leagues: Vec::new(),
            league_ix: 0,
            match_opts: Vec::new(),
            match_ix: 0,
            focus: Focus::Country,
            view: View::League,
            league_out: None,
            match_out: None,
            log: Vec::new(),
            should_quit: false,
        };
        app.reload_countries();
        app
    }

    fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
        if self.log.len() > 50 {
            self.log.remove(0);
        }
    }

    fn country(&self) -> Option<&str> {
        self.countries.get(self.country_ix).map(|s| s.as_str())
    }

    fn league(&self) -> Option<&str> {
        self.leagues.get(self.league_ix).map(|s| s.as_str())
    }

    fn reload_countries(&mut self) {
        self.countries = country_options(&self.data, self.country_filter);
        // Initial selection mirrors the dashboard default.
        self.country_ix = self
            .countries
            .iter()
            .position(|c| c == "spain")
            .unwrap_or(0);
        self.reload_leagues();
    }

    fn reload_leagues(&mut self) {
        self.leagues = match self.country() {
            Some(country) => league_options(&self.data, country),
            None => Vec::new(),
        };
        self.league_ix = 0;
        self.reload_matches();
    }

    fn reload_matches(&mut self) {
        self.match_opts = match (self.country(), self.league()) {
            (Some(country), Some(league)) => match_options(&self.data, country, league, self.today),
            _ => Vec::new(),
        };
        self.match_ix = 0;
        self.view = View::League;
        self.match_out = None;
        self.rebuild_league_tab();
    }

    fn rebuild_league_tab(&mut self) {
        self.league_out = match (self.country(), self.league()) {
            (Some(country), Some(league)) => Some(league_odds_tab(&self.data, country, league)),
            _ => None,
        };
    }

    fn open_selected_match(&mut self) {
        let Some(link) = self
            .match_opts
            .get(self.match_ix)
            .and_then(|opt| opt.link.clone())
        else {
            // "All matches" entry: stay on the league fixtures view.
            self.view = View::League;
            self.match_out = None;
            return;
        };
        let home = team_odds_tab(&self.data, &link, Side::Home);
        let away = team_odds_tab(&self.data, &link, Side::Away);
        let h2h = h2h_tab(&self.data, &link);
        match (home, away, h2h) {
            (Ok(home), Ok(away), Ok(h2h)) => {
                self.match_out = Some((home, away, h2h));
                self.view = View::Match;
            }
            (home, away, h2h) => {
                for err in [home.err(), away.err(), h2h.err()].into_iter().flatten() {
                    self.push_log(format!("[WARN] {err}"));
                }
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Country => Focus::League,
                    Focus::League => Focus::Match,
                    Focus::Match => Focus::Country,
                };
            }
            KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Country => Focus::Match,
                    Focus::League => Focus::Country,
                    Focus::Match => Focus::League,
                };
            }
            KeyCode::Char('t') => {
                self.country_filter = self.country_filter.toggle();
                self.reload_countries();
            }
            KeyCode::Char('j') | KeyCode::Down => self.bump_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.bump_selection(-1),
            KeyCode::Enter => {
                if self.focus == Focus::Match {
                    self.open_selected_match();
                }
            }
            KeyCode::Char('b') | KeyCode::Esc => {
                self.view = View::League;
                self.match_out = None;
            }
            _ => {}
        }
    }

    fn bump_selection(&mut self, delta: isize) {
        let (ix, len) = match self.focus {
            Focus::Country => (&mut self.country_ix, self.countries.len()),
            Focus::League => (&mut self.league_ix, self.leagues.len()),
            Focus::Match => (&mut self.match_ix, self.match_opts.len()),
        };
        if len == 0 {
            return;
        }
        *ix = (*ix as isize + delta).rem_euclid(len as isize) as usize;
        match self.focus {
            Focus::Country => self.reload_leagues(),
            Focus::League => self.reload_matches(),
            Focus::Match => {}
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let db_path = std::env::var("ODDSTAB_DB").unwrap_or_else(|_| "oddstab.sqlite".to_string());
    let conn = open_db(&PathBuf::from(&db_path))?;
    let now = Local::now().naive_local();
    let data = load_dataset(&conn, now).with_context(|| format!("load odds archive {db_path}"))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(data, now.date());
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(app)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.view {
        View::League => render_league_view(frame, chunks[1], app),
        View::Match => render_match_view(frame, chunks[1], app),
    }

    let footer = Paragraph::new(footer_text(app));
    frame.render_widget(footer, chunks[2]);
}

fn header_text(app: &App) -> String {
    let mark = |focus: Focus| if app.focus == focus { ">" } else { " " };
    let filter = match app.country_filter {
        CountryFilter::Top => "TOP countries",
        CountryFilter::All => "All countries",
    };
    let match_label = app
        .match_opts
        .get(app.match_ix)
        .map(|opt| opt.label.as_str())
        .unwrap_or("-");
    format!(
        "ODDSTAB | {filter}\n{} Country: {}   {} League: {}   {} Match: {}",
        mark(Focus::Country),
        app.country().unwrap_or("-"),
        mark(Focus::League),
        app.league().unwrap_or("-"),
        mark(Focus::Match),
        match_label,
    )
}

fn footer_text(app: &App) -> String {
    let keys = "Tab Focus | j/k Select | Enter Open | b/Esc Back | t Countries | q Quit";
    match app.log.last() {
        Some(line) => format!("{keys} | {line}"),
        None => keys.to_string(),
    }
}

fn render_league_view(frame: &mut Frame, area: Rect, app: &App) {
    match &app.league_out {
        Some(tab) if !tab.rows.is_empty() => render_tab(frame, area, tab, "Fixtures"),
        _ => {
            let empty = Paragraph::new("No upcoming fixtures for this league")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, area);
        }
    }
}

fn render_match_view(frame: &mut Frame, area: Rect, app: &App) {
    let Some((home, away, h2h)) = &app.match_out else {
        return;
    };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(36),
            Constraint::Percentage(36),
            Constraint::Percentage(28),
        ])
        .split(area);
    render_tab(frame, chunks[0], home, "Home side");
    render_tab(frame, chunks[1], away, "Away side");
    render_tab(frame, chunks[2], h2h, "Head to head");
}

fn render_tab(frame: &mut Frame, area: Rect, tab: &TabOutput, title: &str) {
    let style_map: HashMap<(usize, ColumnId), CellStyle> = tab
        .styles
        .iter()
        .map(|d| ((d.row_index, d.column), d.style))
        .collect();

    let header = Row::new(
        tab.columns
            .iter()
            .map(|col| Cell::from(col.header()))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = tab
        .rows
        .iter()
        .enumerate()
        .map(|(row_ix, row)| {
            let cells: Vec<Cell> = tab
                .columns
                .iter()
                .map(|&col| {
                    let text = if col == ColumnId::MatchDate {
                        plain_date(row.cell(col)).to_string()
                    } else {
                        row.cell(col).to_string()
                    };
                    let style = style_map
                        .get(&(row_ix, col))
                        .map(|s| terminal_style(*s))
                        .unwrap_or_default();
                    Cell::from(text).style(style)
                })
                .collect();
            Row::new(cells)
        })
        .collect();

    let widths: Vec<Constraint> = tab
        .columns
        .iter()
        .map(|col| match col {
            ColumnId::Result => Constraint::Length(2),
            ColumnId::MatchDate => Constraint::Length(10),
            ColumnId::FinalScore => Constraint::Length(6),
            ColumnId::HomeName | ColumnId::AwayName => Constraint::Min(12),
            ColumnId::League => Constraint::Length(12),
            ColumnId::HomeOdds | ColumnId::DrawOdds | ColumnId::AwayOdds => Constraint::Length(7),
            ColumnId::Total | ColumnId::Handicap => Constraint::Length(6),
        })
        .collect();

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string()),
    );
    frame.render_widget(table, area);
}

/// The emitted date cell is markdown link text; the terminal shows just the
/// date part.
fn plain_date(cell: &str) -> &str {
    match (cell.find('['), cell.find(']')) {
        (Some(open), Some(close)) if open < close => &cell[open + 1..close],
        _ => cell,
    }
}

fn terminal_style(style: CellStyle) -> Style {
    let mut out = Style::default()
        .bg(terminal_color(style.background))
        .fg(terminal_color(style.color));
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    out
}

fn terminal_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}
