//! Interactive navigation loop.
//!
//! Year loads run as spawned tasks and report back over a channel. The loop
//! below is the only owner of the view; a load answer is applied only when
//! its ticket is still the latest one, so quickly paging across a year
//! boundary never shows the wrong year's events.

use crate::config::today;
use crate::render;
use anyhow::Result;
use chrono_tz::Tz;
use lib_skycal::Event;
use lib_skycal::aggregate::{EventAggregator, LoadTicket, LoadTracker};
use lib_skycal::calendar::{CalendarView, MonthCursor, ViewMode};
use lib_skycal::events::without_quarter_phases;
use lib_skycal::sources::{EventRepository, FeedSource};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

pub const HELP: &str = "commands: n next month | p previous month | t toggle grid/list | \
    d <day> day detail | r <row> list row detail | g <YYYY-MM> go to month | h help | q quit";

/// One typed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Next,
    Previous,
    Toggle,
    Day(u32),
    Row(usize),
    GoTo(MonthCursor),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or("");
    let arg = words.next();

    match (verb, arg) {
        ("n", None) => Ok(SessionCommand::Next),
        ("p", None) => Ok(SessionCommand::Previous),
        ("t", None) => Ok(SessionCommand::Toggle),
        ("h", None) | ("?", None) => Ok(SessionCommand::Help),
        ("q", None) => Ok(SessionCommand::Quit),
        ("d", Some(day)) => day
            .parse()
            .map(SessionCommand::Day)
            .map_err(|_| format!("not a day: {}", day)),
        ("r", Some(row)) => match row.parse::<usize>() {
            Ok(n) if n > 0 => Ok(SessionCommand::Row(n - 1)),
            _ => Err(format!("not a row number: {}", row)),
        },
        ("g", Some(target)) => parse_month(target)
            .map(SessionCommand::GoTo)
            .ok_or_else(|| format!("expected YYYY-MM, got {}", target)),
        _ => Err(format!("unknown command `{}` ({})", line.trim(), HELP)),
    }
}

fn parse_month(text: &str) -> Option<MonthCursor> {
    let (year, month) = text.split_once('-')?;
    MonthCursor::new(year.parse().ok()?, month.parse().ok()?)
}

/// What the loop must do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Print the current screen.
    Redraw,
    /// Print the screen and start loading the ticket's year.
    Load(LoadTicket),
    /// Print this text.
    Output(String),
    /// Leave the loop.
    Quit,
}

/// View state plus load bookkeeping.
pub struct Session {
    view: CalendarView,
    tracker: LoadTracker,
}

impl Session {
    /// A session on `start`, with the ticket of its first load.
    pub fn new(start: MonthCursor) -> (Self, LoadTicket) {
        let mut tracker = LoadTracker::new();
        let ticket = tracker.begin(start.year());
        let session = Self {
            view: CalendarView::new(start),
            tracker,
        };
        (session, ticket)
    }

    pub fn view(&self) -> &CalendarView {
        &self.view
    }

    pub fn handle(&mut self, command: SessionCommand) -> Reaction {
        match command {
            SessionCommand::Next => {
                let year_changed = self.view.navigate(1);
                self.moved(year_changed)
            }
            SessionCommand::Previous => {
                let year_changed = self.view.navigate(-1);
                self.moved(year_changed)
            }
            SessionCommand::GoTo(cursor) => {
                let year_changed = self.view.go_to(cursor);
                self.moved(year_changed)
            }
            SessionCommand::Toggle => {
                self.view.toggle_mode();
                Reaction::Redraw
            }
            SessionCommand::Day(day) => Reaction::Output(match self.view.day_detail(day) {
                Some(detail) => render::detail(&detail),
                None => format!("No events on day {}.", day),
            }),
            SessionCommand::Row(index) => Reaction::Output(match self.view.row_detail(index) {
                Some(detail) => render::detail(&detail),
                None => format!("No row {}.", index + 1),
            }),
            SessionCommand::Help => Reaction::Output(HELP.to_string()),
            SessionCommand::Quit => Reaction::Quit,
        }
    }

    fn moved(&mut self, year_changed: bool) -> Reaction {
        if year_changed {
            Reaction::Load(self.tracker.begin(self.view.cursor().year()))
        } else {
            Reaction::Redraw
        }
    }

    /// Applies a finished load. Returns false for superseded answers.
    pub fn receive(&mut self, ticket: LoadTicket, events: Vec<Event>) -> bool {
        self.tracker.accept(&ticket) && self.view.set_events(ticket.year, without_quarter_phases(events))
    }

    /// The current screen in the active mode.
    pub fn screen(&self, today: chrono::NaiveDate) -> String {
        let cursor = self.view.cursor();
        if self.view.needs_load() {
            return format!("{}\nLoading {}...\n", cursor.label(), cursor.year());
        }
        match self.view.mode() {
            ViewMode::Month => render::month(&self.view.month_grid(today)),
            ViewMode::List => render::list(&cursor.label(), &self.view.list_rows()),
        }
    }
}

fn spawn_load<S, R>(
    aggregator: &Arc<EventAggregator<S, R>>,
    ticket: LoadTicket,
    tx: &mpsc::Sender<(LoadTicket, Vec<Event>)>,
) where
    S: FeedSource + 'static,
    R: EventRepository + 'static,
{
    let aggregator = Arc::clone(aggregator);
    let tx = tx.clone();
    debug!(year = ticket.year, generation = ticket.generation, "starting year load");
    tokio::spawn(async move {
        let events = aggregator.get_events(ticket.year).await;
        // The receiver only goes away when the session has ended.
        let _ = tx.send((ticket, events)).await;
    });
}

/// Runs the loop on stdin until `q` or end of input.
pub async fn run<S, R>(aggregator: Arc<EventAggregator<S, R>>, start: MonthCursor, zone: Option<Tz>) -> Result<()>
where
    S: FeedSource + 'static,
    R: EventRepository + 'static,
{
    let (tx, mut rx) = mpsc::channel(8);
    let (mut session, ticket) = Session::new(start);
    spawn_load(&aggregator, ticket, &tx);

    println!("{}", HELP);
    print!("{}", session.screen(today(zone)));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some((ticket, events)) = rx.recv() => {
                if session.receive(ticket, events) {
                    print!("{}", session.screen(today(zone)));
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Err(message) => println!("{}", message),
                    Ok(command) => match session.handle(command) {
                        Reaction::Redraw => print!("{}", session.screen(today(zone))),
                        Reaction::Load(ticket) => {
                            print!("{}", session.screen(today(zone)));
                            spawn_load(&aggregator, ticket, &tx);
                        }
                        Reaction::Output(text) => println!("{}", text),
                        Reaction::Quit => break,
                    },
                }
            }
        }
    }

    info!("interactive session ended");
    Ok(())
}
