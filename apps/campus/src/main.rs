use std::{io, path::PathBuf};

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use events_core::{config::resolve_settings, share::share_link, Command};
use shared::domain::{Category, EventId, Location, NewEvent, ProfileFields, TimeFilter, View};
use tracing_subscriber::EnvFilter;

mod app;
mod render;
mod share_targets;
mod shell;

use app::{notifications, App};
use render::render;

#[derive(Parser, Debug)]
#[command(name = "campus", about = "Browse, register for and share campus events")]
struct Cli {
    /// Config file (defaults to ./campus.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    database_url: Option<String>,
    /// Pin "today" for date filters and the calendar.
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// List events matching the given filters.
    List(FilterArgs),
    /// List registered events matching the given filters.
    MyEvents(FilterArgs),
    Show {
        event_id: String,
    },
    Register {
        event_id: String,
    },
    Unregister {
        event_id: String,
    },
    FindCompany {
        event_id: String,
    },
    Share {
        event_id: String,
    },
    /// Month grid for the current month; `--day` lists registered events that day.
    Calendar {
        #[arg(long)]
        day: Option<u32>,
    },
    #[command(subcommand)]
    Profile(ProfileCommand),
    CreateEvent(CreateEventArgs),
    /// Interactive session (the default).
    Shell,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    #[arg(long)]
    time: Option<TimeFilter>,
    #[arg(long = "category")]
    categories: Vec<Category>,
    #[arg(long = "location")]
    locations: Vec<Location>,
}

impl FilterArgs {
    fn commands(self) -> Vec<Command> {
        self.time
            .map(Command::ToggleTimeFilter)
            .into_iter()
            .chain(self.categories.into_iter().map(Command::ToggleCategoryFilter))
            .chain(self.locations.into_iter().map(Command::ToggleLocationFilter))
            .collect()
    }
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    Show,
    /// Update profile fields; omitted fields keep their stored value.
    Save {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        about: Option<String>,
        #[arg(long)]
        course: Option<String>,
        #[arg(long)]
        specialty: Option<String>,
        #[arg(long)]
        hobbies: Option<String>,
    },
    AddInterest {
        interest: String,
    },
    RemoveInterest {
        interest: String,
    },
}

#[derive(Args, Debug)]
struct CreateEventArgs {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long)]
    date: NaiveDate,
    #[arg(long, value_parser = parse_time)]
    time: NaiveTime,
    #[arg(long, default_value = "On Campus")]
    location: Location,
    #[arg(long, default_value = "Meetup")]
    category: Category,
    #[arg(long)]
    photo: Option<String>,
}

fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    shared::domain::hh_mm::parse(raw).map_err(|error| format!("expected HH:MM: {error}"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = resolve_settings(cli.config.as_deref(), cli.database_url);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut app = App::open(&settings, cli.today).await?;
    tracing::debug!(database_url = %settings.database_url, "campus store opened");

    match cli.command.unwrap_or(CliCommand::Shell) {
        CliCommand::List(filters) => {
            let mut commands = filters.commands();
            commands.push(navigate(View::Events, None));
            show(&mut app, commands).await?;
        }
        CliCommand::MyEvents(filters) => {
            let mut commands = filters.commands();
            commands.push(navigate(View::MyEvents, None));
            show(&mut app, commands).await?;
        }
        CliCommand::Show { event_id } => {
            show(&mut app, [navigate(View::EventDetails, Some(event_id.into()))]).await?;
        }
        CliCommand::Register { event_id } => {
            let event_id = EventId::from(event_id);
            show(
                &mut app,
                [
                    Command::Register {
                        event_id: event_id.clone(),
                    },
                    navigate(View::EventDetails, Some(event_id)),
                ],
            )
            .await?;
        }
        CliCommand::Unregister { event_id } => {
            show(
                &mut app,
                [
                    Command::Unregister {
                        event_id: event_id.into(),
                    },
                    navigate(View::MyEvents, None),
                ],
            )
            .await?;
        }
        CliCommand::FindCompany { event_id } => {
            let event_id = EventId::from(event_id);
            show(
                &mut app,
                [
                    Command::FindCompany {
                        event_id: event_id.clone(),
                    },
                    navigate(View::EventDetails, Some(event_id)),
                ],
            )
            .await?;
        }
        CliCommand::Share { event_id } => {
            let event_id = EventId::from(event_id);
            let event = app
                .controller()
                .state()
                .find_event(&event_id)
                .ok_or_else(|| anyhow!("no event with id {event_id}"))?;
            share_targets::share(&share_link(event, app.share_base()));
        }
        CliCommand::Calendar { day } => {
            let mut commands = vec![navigate(View::Calendar, None)];
            commands.extend(day.map(|day| Command::SelectDate { day }));
            show(&mut app, commands).await?;
        }
        CliCommand::Profile(command) => {
            let command = match command {
                ProfileCommand::Show => None,
                ProfileCommand::Save {
                    username,
                    about,
                    course,
                    specialty,
                    hobbies,
                } => {
                    let mut fields = ProfileFields::from(&app.controller().state().profile);
                    let updates = [
                        (&mut fields.username, username),
                        (&mut fields.about, about),
                        (&mut fields.course, course),
                        (&mut fields.specialty, specialty),
                        (&mut fields.hobbies, hobbies),
                    ];
                    for (field, value) in updates {
                        if let Some(value) = value {
                            *field = value;
                        }
                    }
                    Some(Command::SaveProfile(fields))
                }
                ProfileCommand::AddInterest { interest } => Some(Command::AddInterest {
                    interest,
                    pending: None,
                }),
                ProfileCommand::RemoveInterest { interest } => Some(Command::RemoveInterest {
                    interest,
                    pending: None,
                }),
            };
            let mut commands: Vec<Command> = command.into_iter().collect();
            commands.push(navigate(View::Profile, None));
            show(&mut app, commands).await?;
        }
        CliCommand::CreateEvent(args) => {
            let new_event = NewEvent {
                title: args.title,
                description: args.description,
                photo: args.photo,
                location: args.location,
                category: args.category,
                date: args.date,
                time: args.time,
            };
            app.apply(Command::CreateEvent(new_event)).await?;
            let created = app
                .controller()
                .state()
                .events
                .first()
                .map(|event| event.id.clone());
            show(&mut app, [navigate(View::EventDetails, created)]).await?;
        }
        CliCommand::Shell => {
            let stdin = io::stdin();
            shell::run(&mut app, stdin.lock(), io::stdout()).await?;
        }
    }

    Ok(())
}

fn navigate(view: View, event_id: Option<EventId>) -> Command {
    Command::Navigate { view, event_id }
}

/// Applies the commands in order, then prints notifications and the final view.
async fn show(app: &mut App, commands: impl IntoIterator<Item = Command>) -> Result<()> {
    let effects = app.apply_all(commands).await?;
    for message in notifications(&effects) {
        println!("{message}");
    }
    print!("{}", render(app.controller(), app.share_base()));
    Ok(())
}
