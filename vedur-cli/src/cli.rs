use anyhow::anyhow;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select};
use log::debug;
use vedur_core::{OpenMeteoClient, SearchController, SearchLocation, locations, view};

const MY_LOCATION: &str = "Mín staðsetning";
const QUIT: &str = "Hætta";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "vedur", version, about = "Hourly forecast for a fixed set of locations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the hourly forecast for a known location.
    Show {
        /// Location title, e.g. "Reykjavík" (case-insensitive).
        location: String,
    },

    /// List the locations the app can search for.
    Locations,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let locations = locations::builtin();
        let controller = SearchController::new(OpenMeteoClient::new());

        match self.command {
            Some(Command::Show { location }) => {
                let location = find_location(&locations, &location)?;
                println!("{}", view::LOADING);
                controller.on_search(location).await;
                print!("{}", controller.render().await);
            }
            Some(Command::Locations) => {
                print!("{}", view::render_shell(&locations));
            }
            None => interactive(&controller, &locations).await?,
        }

        Ok(())
    }
}

/// Interactive loop: the CLI stand-in for the location buttons of the
/// original UI. Runs until the user quits or cancels the prompt.
async fn interactive(
    controller: &SearchController<OpenMeteoClient>,
    locations: &[SearchLocation],
) -> anyhow::Result<()> {
    print!("{}", view::render_shell(locations));

    // The location list is fixed, so the prompt options are too.
    let options = prompt_options(locations);

    loop {
        let choice = match Select::new("Veldu staðsetningu:", options.clone()).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        if choice == QUIT {
            break;
        }

        if choice == MY_LOCATION {
            controller.on_search_my_location();
            println!("Leit út frá núverandi staðsetningu er ekki studd enn.");
            continue;
        }

        let Some(location) = locations.iter().find(|l| l.title == choice) else {
            continue;
        };

        debug!("selected {}", location.title);
        println!("{}", view::LOADING);
        controller.on_search(location).await;
        print!("{}", controller.render().await);
    }

    Ok(())
}

/// One prompt entry per location title, then the fixed entries.
fn prompt_options(locations: &[SearchLocation]) -> Vec<String> {
    let mut options: Vec<String> = locations.iter().map(|l| l.title.clone()).collect();
    options.push(MY_LOCATION.to_string());
    options.push(QUIT.to_string());
    options
}

/// Resolves a user-supplied title to one of the built-in locations.
fn find_location<'a>(
    locations: &'a [SearchLocation],
    title: &str,
) -> anyhow::Result<&'a SearchLocation> {
    let needle = title.to_lowercase();

    locations
        .iter()
        .find(|l| l.title.to_lowercase() == needle)
        .ok_or_else(|| {
            let known = locations
                .iter()
                .map(|l| l.title.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            anyhow!(
                "Unknown location '{title}'. Supported locations: {known}.\n\
                 Hint: run `vedur locations` to list them."
            )
        })
}
