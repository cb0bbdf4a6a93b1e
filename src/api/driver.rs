//! Interactive session as an explicit state machine.
//!
//! Each state has one handler that returns the next state. Any error from a
//! handler is reported to the user and control moves to the restart question.

use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::{error, info, instrument, warn};

use crate::api::console::{parse_yes_no, Console};
use crate::core::aggregate::StatsEngine;
use crate::core::filter::filter;
use crate::core::lookup::lookup;
use crate::infra::loader::TripSource;
use crate::infra::utils::parse_user_ids;
use crate::models::error::{FilterError, InputError, StatsError};
use crate::models::filter::{parse_day, parse_month, FilterMode, FilterSpec};
use crate::models::trip::{City, TripTable, TABLE_HEADER};

const CITY_PROMPT: &str = "\nHello! Let's explore some US bikeshare data!\n\
Would you like to see data for Chicago, New York or Washington? ";
const FILTER_PROMPT: &str = "\nWould you like to filter data by month, day, both or not at all?\n\
Type \"None\" for no time filter: ";
const DAY_PROMPT: &str = "Which day?\ne.g. Monday, Tuesday, ... Sunday: ";
const MONTH_PROMPT: &str = "Which month?\ne.g. January, February, ... June: ";
const EXTENDED_PROMPT: &str = "\nWould you like to get users statistics?\n\"Yes\" or \"No\": ";
const LOOKUP_PROMPT: &str = "\nWould you like to get information on specific user(s)?\n\
Type \"Yes\", \"No\" or \"Restart\": ";
const IDS_PROMPT: &str = "Enter user(s) separated by commas: ";
const RESTART_PROMPT: &str = "\nWould you like to restart?\nType \"Yes\" or \"No\": ";

/// City data loaded for one pass through the loop.
#[derive(Debug)]
struct Session {
    city: City,
    table: TripTable,
}

#[derive(Debug)]
enum State {
    SelectCity,
    SelectFilter(Session),
    SelectFilterParams(Session, FilterMode),
    ShowCoreStats(Session, FilterSpec),
    ShowExtendedStats {
        session: Session,
        filtered: TripTable,
        spec: FilterSpec,
    },
    OfferLookup(Session),
    UserLookup(Session),
    RestartDecision,
    Terminate,
}

pub struct Driver<S, R, W> {
    source: S,
    engine: StatsEngine,
    console: Console<R, W>,
}

impl<S, R, W> Driver<S, R, W>
where
    S: TripSource,
    R: BufRead,
    W: Write,
{
    pub fn new(source: S, engine: StatsEngine, console: Console<R, W>) -> Self {
        Self {
            source,
            engine,
            console,
        }
    }

    /// Run until the user declines to restart or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut state = State::SelectCity;
        loop {
            if matches!(state, State::Terminate) {
                break;
            }
            state = match self.step(state) {
                Ok(next) => next,
                Err(err) => {
                    self.report(&err)?;
                    State::RestartDecision
                }
            };
        }
        info!("session finished");
        Ok(())
    }

    #[cfg(test)]
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn step(&mut self, state: State) -> anyhow::Result<State> {
        match state {
            State::SelectCity => self.select_city(),
            State::SelectFilter(session) => self.select_filter(session),
            State::SelectFilterParams(session, mode) => self.select_filter_params(session, mode),
            State::ShowCoreStats(session, spec) => self.show_core_stats(session, spec),
            State::ShowExtendedStats {
                session,
                filtered,
                spec,
            } => self.show_extended_stats(session, &filtered, spec),
            State::OfferLookup(session) => self.offer_lookup(session),
            State::UserLookup(session) => self.user_lookup(&session),
            State::RestartDecision => self.restart_decision(),
            State::Terminate => Ok(State::Terminate),
        }
    }

    /// Print an error, naming the stage it came from.
    fn report(&mut self, err: &anyhow::Error) -> anyhow::Result<()> {
        let stage = if err.downcast_ref::<InputError>().is_some() {
            "Invalid input"
        } else if err.downcast_ref::<FilterError>().is_some() {
            "Invalid filter"
        } else if err.downcast_ref::<StatsError>().is_some() {
            "No statistics"
        } else {
            "Error"
        };
        error!("{}: {:#}", stage, err);
        self.console.say(format!("\n{}: {:#}", stage, err))
    }

    fn ask(&mut self, question: &str) -> anyhow::Result<Option<String>> {
        self.console.prompt(question)
    }

    fn select_city(&mut self) -> anyhow::Result<State> {
        let Some(answer) = self.ask(CITY_PROMPT)? else {
            return Ok(State::Terminate);
        };
        let city = City::parse(&answer)?;
        let table = self.source.load(city)?;
        info!("selected {} ({} trips)", city, table.len());
        Ok(State::SelectFilter(Session { city, table }))
    }

    fn select_filter(&mut self, session: Session) -> anyhow::Result<State> {
        let Some(answer) = self.ask(FILTER_PROMPT)? else {
            return Ok(State::Terminate);
        };
        let mode = FilterMode::parse(&answer)?;
        Ok(State::SelectFilterParams(session, mode))
    }

    fn select_filter_params(&mut self, session: Session, mode: FilterMode) -> anyhow::Result<State> {
        let spec = match mode {
            FilterMode::None => FilterSpec::None,
            FilterMode::Day => {
                let Some(day) = self.ask(DAY_PROMPT)? else {
                    return Ok(State::Terminate);
                };
                FilterSpec::Day(parse_day(&day)?)
            }
            FilterMode::Month => {
                let Some(month) = self.ask(MONTH_PROMPT)? else {
                    return Ok(State::Terminate);
                };
                FilterSpec::Month(parse_month(&month)?)
            }
            FilterMode::Both => {
                let Some(month) = self.ask(MONTH_PROMPT)? else {
                    return Ok(State::Terminate);
                };
                let month = parse_month(&month)?;
                let Some(day) = self.ask(DAY_PROMPT)? else {
                    return Ok(State::Terminate);
                };
                FilterSpec::Both {
                    month,
                    day: parse_day(&day)?,
                }
            }
        };
        Ok(State::ShowCoreStats(session, spec))
    }

    #[instrument(skip(self, session), fields(city = %session.city))]
    fn show_core_stats(&mut self, session: Session, spec: FilterSpec) -> anyhow::Result<State> {
        let start = Instant::now();
        let filtered = filter(&session.table, spec);
        info!("filter {} kept {} of {} trips", spec, filtered.len(), session.table.len());

        let hours = self.engine.hour_stats(&filtered)?;
        let stations = self.engine.station_stats(&filtered)?;
        let durations = self.engine.duration_stats(&filtered)?;

        self.console.say("\nCalculating the first statistics...")?;
        self.console.say(hours)?;
        self.console.say("\nCalculating the next statistics...")?;
        self.console.say(stations)?;
        self.console.say("\nCalculating the next statistics...")?;
        self.console.say(durations)?;
        self.console.say(format!("\nFilter: {}", spec.mode()))?;
        self.console.say(format!(
            "\nThat took: {:.4} second(s)",
            start.elapsed().as_secs_f64()
        ))?;

        let Some(answer) = self.ask(EXTENDED_PROMPT)? else {
            return Ok(State::Terminate);
        };
        if parse_yes_no(&answer)? {
            Ok(State::ShowExtendedStats {
                session,
                filtered,
                spec,
            })
        } else {
            Ok(State::OfferLookup(session))
        }
    }

    fn show_extended_stats(
        &mut self,
        session: Session,
        filtered: &TripTable,
        spec: FilterSpec,
    ) -> anyhow::Result<State> {
        let user_types = self.engine.user_type_counts(filtered)?;
        self.console.say("\nCalculating the next statistics... User Type")?;
        self.console.say(user_types)?;
        self.console.say(format!("Filter: {}", spec.mode()))?;

        let schema = filtered.schema();
        if schema.has_gender && schema.has_birth_year {
            let genders = self.engine.gender_counts(filtered)?;
            let ages = self.engine.age_stats(filtered)?;
            self.console.say("\nCalculating the next statistics... Gender")?;
            self.console.say(genders)?;
            self.console.say("\nCalculating the next statistics... Birth Year")?;
            self.console.say(ages)?;
            self.console.say(format!("\nFilter: {}", spec.mode()))?;
        } else {
            info!("{} has no gender or birth year data, skipping", session.city);
        }
        Ok(State::OfferLookup(session))
    }

    fn offer_lookup(&mut self, session: Session) -> anyhow::Result<State> {
        let Some(answer) = self.ask(LOOKUP_PROMPT)? else {
            return Ok(State::Terminate);
        };
        match answer.to_lowercase().as_str() {
            "restart" => {
                self.console.say("\nRestarting")?;
                Ok(State::SelectCity)
            }
            _ => {
                if parse_yes_no(&answer)? {
                    Ok(State::UserLookup(session))
                } else {
                    Ok(State::RestartDecision)
                }
            }
        }
    }

    /// Lookup runs against the full city table, not the filtered one.
    fn user_lookup(&mut self, session: &Session) -> anyhow::Result<State> {
        let Some(answer) = self.ask(IDS_PROMPT)? else {
            return Ok(State::Terminate);
        };
        let ids = parse_user_ids(&answer)?;
        let result = lookup(&session.table, &ids);
        if !result.unmatched.is_empty() {
            warn!("no trips for user ids {:?}", result.unmatched);
        }

        self.console.say(TABLE_HEADER)?;
        for record in result.rows.records() {
            self.console.say(record)?;
        }
        Ok(State::RestartDecision)
    }

    fn restart_decision(&mut self) -> anyhow::Result<State> {
        let Some(answer) = self.ask(RESTART_PROMPT)? else {
            return Ok(State::Terminate);
        };
        if parse_yes_no(&answer)? {
            Ok(State::SelectCity)
        } else {
            Ok(State::Terminate)
        }
    }
}
